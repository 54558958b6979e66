//! Enrollment configuration: customization strings and retry defaults.
//!
//! Configuration is layered: built-in defaults, then an optional TOML file,
//! then `FACESCAN_*` environment variables. The result must pass
//! [`EnrollmentConfig::validate`] before a session is started with it.

use crate::errors::{EnrollmentError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Prefix for environment overrides.
pub const ENV_PREFIX: &str = "FACESCAN_";

/// Human-readable strings shown in the capture UI and reported to consumers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CustomizationMessages {
    /// Shown on the result screen after a successful enrollment
    pub success: String,
    /// Replaces the upload message once all bytes are sent
    pub processing: String,
    /// Duplicate identity or 3D match failure
    pub hard_failure: String,
    /// Liveness check failed
    pub liveness_failure: String,
    /// Network failure or verdict without actionable flags
    pub unknown_failure: String,
    /// Session token could not be obtained
    pub session_token_error: String,
    /// Camera access refused
    pub camera_access_error: String,
    /// Session superseded by a newer one
    pub context_switch: String,
}

impl Default for CustomizationMessages {
    fn default() -> Self {
        Self {
            success: "Your face was successfully verified.".to_string(),
            processing: "Processing your face scan...".to_string(),
            hard_failure: "Your face could not be verified.".to_string(),
            liveness_failure: "We could not confirm a live face. Please try again.".to_string(),
            unknown_failure: "An unexpected issue occurred during face verification.".to_string(),
            session_token_error:
                "Session could not be started due to an unexpected issue during the network request."
                    .to_string(),
            camera_access_error: "Camera access is required for face verification.".to_string(),
            context_switch: "Face verification was interrupted by a new session.".to_string(),
        }
    }
}

impl CustomizationMessages {
    fn entries(&self) -> [(&'static str, &str); 8] {
        [
            ("success", self.success.as_str()),
            ("processing", self.processing.as_str()),
            ("hard_failure", self.hard_failure.as_str()),
            ("liveness_failure", self.liveness_failure.as_str()),
            ("unknown_failure", self.unknown_failure.as_str()),
            ("session_token_error", self.session_token_error.as_str()),
            ("camera_access_error", self.camera_access_error.as_str()),
            ("context_switch", self.context_switch.as_str()),
        ]
    }

    fn set(&mut self, key: &str, value: String) -> bool {
        let slot = match key {
            "success" => &mut self.success,
            "processing" => &mut self.processing,
            "hard_failure" => &mut self.hard_failure,
            "liveness_failure" => &mut self.liveness_failure,
            "unknown_failure" => &mut self.unknown_failure,
            "session_token_error" => &mut self.session_token_error,
            "camera_access_error" => &mut self.camera_access_error,
            "context_switch" => &mut self.context_switch,
            _ => return false,
        };
        *slot = value;
        true
    }
}

/// Top-level enrollment configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnrollmentConfig {
    /// Retry bound used when the caller does not pass one.
    /// Absent or negative means unlimited.
    pub default_max_retries: Option<i64>,
    pub messages: CustomizationMessages,
}

impl EnrollmentConfig {
    /// Parse a TOML document. Missing keys keep their defaults.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }

    /// Load configuration from a TOML file.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            EnrollmentError::config(format!(
                "Failed to read config file {}: {e}",
                path.display()
            ))
        })?;
        Self::from_toml_str(&content)
    }

    /// Apply `FACESCAN_*` overrides from the process environment.
    pub fn merge_with_env(&mut self) -> Result<()> {
        self.merge_with_vars(std::env::vars())
    }

    /// Apply overrides from `(key, value)` pairs.
    ///
    /// `FACESCAN_MAX_RETRIES` sets the default bound (`unlimited` or an empty
    /// value clears it); `FACESCAN_<MESSAGE>_MESSAGE` sets a customization
    /// string, e.g. `FACESCAN_SUCCESS_MESSAGE`. Unrelated keys are ignored.
    pub fn merge_with_vars<I, K, V>(&mut self, vars: I) -> Result<()>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        for (key, value) in vars {
            let Some(name) = key.as_ref().strip_prefix(ENV_PREFIX) else {
                continue;
            };
            let value = value.into();

            if name == "MAX_RETRIES" {
                self.default_max_retries = parse_max_retries(&value)?;
                continue;
            }

            if let Some(message_key) = name.strip_suffix("_MESSAGE") {
                let message_key = message_key.to_lowercase();
                if self.messages.set(&message_key, value) {
                    tracing::debug!(key = %message_key, "customization message overridden from environment");
                }
            }
        }
        Ok(())
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in self.messages.entries() {
            if value.trim().is_empty() {
                return Err(EnrollmentError::config(format!(
                    "customization message '{name}' must not be empty"
                )));
            }
        }
        Ok(())
    }
}

fn parse_max_retries(value: &str) -> Result<Option<i64>> {
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("unlimited") {
        return Ok(None);
    }
    trimmed
        .parse::<i64>()
        .map(Some)
        .map_err(|e| EnrollmentError::config(format!("invalid FACESCAN_MAX_RETRIES '{trimmed}': {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::io::Write;

    #[test]
    fn defaults_are_valid() {
        let config = EnrollmentConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.default_max_retries, None);
    }

    #[test]
    fn toml_overrides_keep_remaining_defaults() {
        let config = EnrollmentConfig::from_toml_str(
            r#"
            default_max_retries = 3

            [messages]
            success = "Enrolled"
            "#,
        )
        .unwrap();

        assert_eq!(config.default_max_retries, Some(3));
        assert_eq!(config.messages.success, "Enrolled");
        assert_eq!(
            config.messages.processing,
            CustomizationMessages::default().processing
        );
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "default_max_retries = -1").unwrap();
        let config = EnrollmentConfig::load_from_file(file.path()).unwrap();
        assert_eq!(config.default_max_retries, Some(-1));

        let missing = EnrollmentConfig::load_from_file(Path::new("/nonexistent/facescan.toml"));
        assert_matches!(missing, Err(EnrollmentError::Config { .. }));
    }

    #[test]
    fn env_overrides() {
        let mut config = EnrollmentConfig::default();
        config
            .merge_with_vars([
                ("FACESCAN_MAX_RETRIES", "2"),
                ("FACESCAN_PROCESSING_MESSAGE", "Hold on"),
                ("FACESCAN_BOGUS_MESSAGE", "ignored"),
                ("HOME", "/root"),
            ])
            .unwrap();

        assert_eq!(config.default_max_retries, Some(2));
        assert_eq!(config.messages.processing, "Hold on");

        config
            .merge_with_vars([("FACESCAN_MAX_RETRIES", "unlimited")])
            .unwrap();
        assert_eq!(config.default_max_retries, None);

        let bad = config.merge_with_vars([("FACESCAN_MAX_RETRIES", "many")]);
        assert_matches!(bad, Err(EnrollmentError::Config { .. }));
    }

    #[test]
    fn process_environment_overrides() {
        std::env::set_var("FACESCAN_CONTEXT_SWITCH_MESSAGE", "Another scan started");
        let mut config = EnrollmentConfig::default();
        let merged = config.merge_with_env();
        std::env::remove_var("FACESCAN_CONTEXT_SWITCH_MESSAGE");

        merged.unwrap();
        assert_eq!(config.messages.context_switch, "Another scan started");
    }

    #[test]
    fn empty_message_fails_validation() {
        let mut config = EnrollmentConfig::default();
        config.messages.success = "  ".to_string();
        assert_matches!(config.validate(), Err(EnrollmentError::Config { .. }));
    }
}
