//! Module-level entry point.
//!
//! Only one enrollment session is active at a time. Starting a new one tells
//! the previous session's consumer that it was superseded; the previous
//! controller still runs to completion, but its adapter has already settled.

use crate::controller::EnrollmentController;
use crate::effects::EnrollmentEffects;
use crate::retry::RetryBound;
use crate::session::SessionSummary;
use facescan_core::effects::{ProcessingDelegate, UxEvent};
use facescan_core::{EnrollmentConfig, Result, SessionStatus};
use parking_lot::Mutex;
use std::sync::Arc;
use uuid::Uuid;

struct ActiveSession {
    handle: Uuid,
    delegate: Arc<dyn ProcessingDelegate>,
}

/// Releases the active slot when its session ends, including when the
/// session future is dropped before completing.
struct ActiveSlot<'a> {
    active: &'a Mutex<Option<ActiveSession>>,
    handle: Uuid,
}

impl Drop for ActiveSlot<'_> {
    fn drop(&mut self) {
        let mut active = self.active.lock();
        if active
            .as_ref()
            .is_some_and(|session| session.handle == self.handle)
        {
            *active = None;
        }
    }
}

pub struct EnrollmentModule<E: EnrollmentEffects> {
    effects: Arc<E>,
    config: EnrollmentConfig,
    active: Mutex<Option<ActiveSession>>,
}

impl<E: EnrollmentEffects> EnrollmentModule<E> {
    /// Create a module. Fails if `config` does not validate.
    pub fn new(effects: Arc<E>, config: EnrollmentConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            effects,
            config,
            active: Mutex::new(None),
        })
    }

    pub fn config(&self) -> &EnrollmentConfig {
        &self.config
    }

    pub fn has_active_session(&self) -> bool {
        self.active.lock().is_some()
    }

    /// Run a face verification session for `identifier`.
    ///
    /// `max_retries` falls back to the configured default; absent or negative
    /// means unlimited liveness retries.
    pub async fn face_verification(
        &self,
        identifier: impl Into<String>,
        max_retries: Option<i64>,
        delegate: Arc<dyn ProcessingDelegate>,
    ) -> SessionSummary {
        let handle = Uuid::new_v4();
        let previous = self.active.lock().replace(ActiveSession {
            handle,
            delegate: Arc::clone(&delegate),
        });
        if let Some(previous) = previous {
            tracing::info!(
                previous = %previous.handle,
                current = %handle,
                "superseding active enrollment session"
            );
            previous.delegate.on_session_context_switch();
        }
        let _slot = ActiveSlot {
            active: &self.active,
            handle,
        };

        let bound = RetryBound::from_max_retries(max_retries.or(self.config.default_max_retries));
        EnrollmentController::new(Arc::clone(&self.effects), delegate, &self.config)
            .enroll(identifier, bound)
            .await
    }

    /// Status names and codes exported to consumers.
    pub fn session_status_constants() -> Vec<(&'static str, u32)> {
        SessionStatus::constants()
    }

    /// Names of the UX events a session may dispatch.
    pub fn ux_event_names() -> [&'static str; 3] {
        UxEvent::NAMES
    }
}
