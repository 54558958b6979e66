//! UX event stream.

use serde::{Deserialize, Serialize};

/// Payload of an `FV_RETRY` event.
///
/// `match3d` and `liveness` say whether the check passed; `duplicate` and
/// `enrolled` mirror the server flags as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryEvent {
    pub reason: String,
    pub match3d: bool,
    pub liveness: bool,
    pub duplicate: bool,
    pub enrolled: bool,
}

/// Events emitted to UX listeners while a session runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UxEvent {
    /// Capture UI presented
    UiReady,
    /// A capture attempt completed and is about to be submitted
    CaptureDone,
    /// Server asked for another capture
    FvRetry(RetryEvent),
}

impl UxEvent {
    /// Every event name, for the constants table exported to consumers.
    pub const NAMES: [&'static str; 3] = ["UI_READY", "CAPTURE_DONE", "FV_RETRY"];

    pub fn name(&self) -> &'static str {
        match self {
            UxEvent::UiReady => "UI_READY",
            UxEvent::CaptureDone => "CAPTURE_DONE",
            UxEvent::FvRetry(_) => "FV_RETRY",
        }
    }
}

pub trait UxEventEffects: Send + Sync {
    fn dispatch(&self, event: UxEvent);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_wire_names() {
        let value = serde_json::to_value(UxEvent::UiReady).unwrap();
        assert_eq!(value["event"], "UI_READY");

        let retry = UxEvent::FvRetry(RetryEvent {
            reason: "Liveness failed".to_string(),
            match3d: true,
            liveness: false,
            duplicate: false,
            enrolled: false,
        });
        let value = serde_json::to_value(&retry).unwrap();
        assert_eq!(value["event"], retry.name());
        assert_eq!(value["data"]["reason"], "Liveness failed");
        assert_eq!(value["data"]["match3d"], true);
        assert_eq!(value["data"]["liveness"], false);
    }
}
