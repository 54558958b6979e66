//! Camera permission interface.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Platform camera authorization state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CameraAuthorization {
    Authorized,
    /// The user has not been asked yet
    NotDetermined,
    Denied,
    /// Blocked by policy (parental controls, MDM)
    Restricted,
}

/// Outcome of checking or requesting camera access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PermissionGrant {
    Granted,
    Denied,
}

#[async_trait]
pub trait PermissionEffects: Send + Sync {
    /// Current authorization without prompting.
    async fn camera_authorization(&self) -> CameraAuthorization;

    /// Prompt the user for camera access. Returns whether it was granted.
    async fn request_camera_access(&self) -> bool;

    /// Check the current state and prompt only when it is undetermined.
    async fn check_or_request_camera_permission(&self) -> PermissionGrant {
        match self.camera_authorization().await {
            CameraAuthorization::Authorized => PermissionGrant::Granted,
            CameraAuthorization::NotDetermined => {
                if self.request_camera_access().await {
                    PermissionGrant::Granted
                } else {
                    PermissionGrant::Denied
                }
            }
            CameraAuthorization::Denied | CameraAuthorization::Restricted => {
                PermissionGrant::Denied
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};

    struct FixedPermission {
        state: CameraAuthorization,
        grant_on_request: bool,
        prompted: AtomicBool,
    }

    #[async_trait]
    impl PermissionEffects for FixedPermission {
        async fn camera_authorization(&self) -> CameraAuthorization {
            self.state
        }

        async fn request_camera_access(&self) -> bool {
            self.prompted.store(true, Ordering::SeqCst);
            self.grant_on_request
        }
    }

    fn permission(state: CameraAuthorization, grant_on_request: bool) -> FixedPermission {
        FixedPermission {
            state,
            grant_on_request,
            prompted: AtomicBool::new(false),
        }
    }

    #[tokio::test]
    async fn authorized_does_not_prompt() {
        let p = permission(CameraAuthorization::Authorized, false);
        assert_eq!(
            p.check_or_request_camera_permission().await,
            PermissionGrant::Granted
        );
        assert!(!p.prompted.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn undetermined_prompts() {
        let granted = permission(CameraAuthorization::NotDetermined, true);
        assert_eq!(
            granted.check_or_request_camera_permission().await,
            PermissionGrant::Granted
        );
        assert!(granted.prompted.load(Ordering::SeqCst));

        let refused = permission(CameraAuthorization::NotDetermined, false);
        assert_eq!(
            refused.check_or_request_camera_permission().await,
            PermissionGrant::Denied
        );
    }

    #[tokio::test]
    async fn denied_and_restricted_never_prompt() {
        for state in [CameraAuthorization::Denied, CameraAuthorization::Restricted] {
            let p = permission(state, true);
            assert_eq!(
                p.check_or_request_camera_permission().await,
                PermissionGrant::Denied
            );
            assert!(!p.prompted.load(Ordering::SeqCst));
        }
    }
}
