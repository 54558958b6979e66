//! Facescan Testing Infrastructure
//!
//! Scriptable collaborators, recording consumers and fixtures shared by the
//! enrollment crates' tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(missing_docs)]
//!
//! # Usage
//!
//! ```toml
//! [dev-dependencies]
//! facescan-testkit = { path = "../facescan-testkit" }
//! ```
//!
//! ```rust,no_run
//! use facescan_testkit::*;
//!
//! let effects = MockEnrollmentEffects::new();
//! effects.push_capture(completed_capture("session-1"));
//! effects.script_submission(ScriptedSubmission::accepted(clean_verdict()));
//! ```

pub mod delegate;
pub mod fixtures;
pub mod mock_effects;

pub use delegate::*;
pub use fixtures::*;
pub use mock_effects::*;

/// Install a test subscriber once per process. Honors `RUST_LOG`.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
