//! Capture session statuses reported by the capture subsystem.

use serde::{Deserialize, Serialize};

/// Terminal status of a single capture attempt.
///
/// Codes are stable and exported to consumers through [`SessionStatus::constants`],
/// so new variants must be appended, never inserted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SessionStatus {
    /// Capture finished and produced a face scan
    SessionCompletedSuccessfully,
    /// User closed the capture UI
    UserCancelled,
    /// Capture did not complete in time
    Timeout,
    /// App went to background during capture
    ContextSwitch,
    /// Camera permission missing at capture time
    CameraPermissionDenied,
    /// Camera could not be started
    CameraInitializationIssue,
    /// Device held in landscape orientation
    LandscapeModeNotAllowed,
    /// Device held upside down
    ReversePortraitNotAllowed,
    /// Too many failed attempts on this device
    LockedOut,
    /// Capture subsystem failed internally
    UnknownInternalError,
}

impl SessionStatus {
    /// Every status in code order.
    pub const ALL: [SessionStatus; 10] = [
        SessionStatus::SessionCompletedSuccessfully,
        SessionStatus::UserCancelled,
        SessionStatus::Timeout,
        SessionStatus::ContextSwitch,
        SessionStatus::CameraPermissionDenied,
        SessionStatus::CameraInitializationIssue,
        SessionStatus::LandscapeModeNotAllowed,
        SessionStatus::ReversePortraitNotAllowed,
        SessionStatus::LockedOut,
        SessionStatus::UnknownInternalError,
    ];

    /// Stable numeric code used when rejecting consumer promises.
    pub fn code(self) -> u32 {
        match self {
            SessionStatus::SessionCompletedSuccessfully => 0,
            SessionStatus::UserCancelled => 1,
            SessionStatus::Timeout => 2,
            SessionStatus::ContextSwitch => 3,
            SessionStatus::CameraPermissionDenied => 4,
            SessionStatus::CameraInitializationIssue => 5,
            SessionStatus::LandscapeModeNotAllowed => 6,
            SessionStatus::ReversePortraitNotAllowed => 7,
            SessionStatus::LockedOut => 8,
            SessionStatus::UnknownInternalError => 9,
        }
    }

    /// PascalCase name shared with the web SDK status tables.
    pub fn name(self) -> &'static str {
        match self {
            SessionStatus::SessionCompletedSuccessfully => "SessionCompletedSuccessfully",
            SessionStatus::UserCancelled => "UserCancelled",
            SessionStatus::Timeout => "Timeout",
            SessionStatus::ContextSwitch => "ContextSwitch",
            SessionStatus::CameraPermissionDenied => "CameraPermissionDenied",
            SessionStatus::CameraInitializationIssue => "CameraInitializationIssue",
            SessionStatus::LandscapeModeNotAllowed => "LandscapeModeNotAllowed",
            SessionStatus::ReversePortraitNotAllowed => "ReversePortraitNotAllowed",
            SessionStatus::LockedOut => "LockedOut",
            SessionStatus::UnknownInternalError => "UnknownInternalError",
        }
    }

    /// Look up a status by its numeric code.
    pub fn from_code(code: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|status| status.code() == code)
    }

    /// Whether the attempt produced a usable capture.
    pub fn is_success(self) -> bool {
        self == SessionStatus::SessionCompletedSuccessfully
    }

    /// Name → code table exported to consumers.
    pub fn constants() -> Vec<(&'static str, u32)> {
        Self::ALL
            .into_iter()
            .map(|status| (status.name(), status.code()))
            .collect()
    }
}

impl std::fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_round_trip_and_are_unique() {
        for status in SessionStatus::ALL {
            assert_eq!(SessionStatus::from_code(status.code()), Some(status));
        }
        let mut codes: Vec<u32> = SessionStatus::ALL.iter().map(|s| s.code()).collect();
        codes.dedup();
        assert_eq!(codes.len(), SessionStatus::ALL.len());
        assert_eq!(SessionStatus::from_code(99), None);
    }

    #[test]
    fn only_completed_is_success() {
        let successes: Vec<_> = SessionStatus::ALL
            .into_iter()
            .filter(|status| status.is_success())
            .collect();
        assert_eq!(successes, vec![SessionStatus::SessionCompletedSuccessfully]);
    }

    #[test]
    fn constants_table_uses_pascal_case_names() {
        let table = SessionStatus::constants();
        assert_eq!(table[0], ("SessionCompletedSuccessfully", 0));
        assert!(table.contains(&("UserCancelled", 1)));
    }
}
