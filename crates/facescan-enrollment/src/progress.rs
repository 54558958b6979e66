//! Progress Translator
//!
//! Maps the fraction of request bytes sent into the capture UI's progress bar:
//!
//! ```text
//! [0.0, 0.1)  setup, before submission starts
//! [0.1, 0.8]  upload: 0.1 + 0.7 * fraction
//! (0.8, 1.0]  verdict received and classified
//! ```
//!
//! Within one attempt emitted progress never decreases. The only reset is
//! [`ProgressTranslator::begin_attempt`]; samples arriving outside an attempt
//! produce nothing.

/// Progress shown when a submission is about to start.
pub const SUBMISSION_START_PROGRESS: f32 = 0.0;
/// Lower edge of the upload band.
pub const UPLOAD_PROGRESS_FLOOR: f32 = 0.1;
/// Width of the upload band.
pub const UPLOAD_PROGRESS_SPAN: f32 = 0.7;
/// Progress after the verdict has been classified.
pub const COMPLETE_PROGRESS: f32 = 1.0;

/// Something to deliver to the capture subsystem's result callback.
#[derive(Debug, Clone, PartialEq)]
pub enum ProgressEmission {
    Progress(f32),
    MessageOverride(String),
}

/// UI progress for an upload fraction, clamped to the upload band.
pub fn upload_progress(fraction: f32) -> f32 {
    let fraction = if fraction.is_nan() {
        0.0
    } else {
        fraction.clamp(0.0, 1.0)
    };
    UPLOAD_PROGRESS_FLOOR + UPLOAD_PROGRESS_SPAN * fraction
}

#[derive(Debug)]
pub struct ProgressTranslator {
    processing_message: String,
    attempt: Option<u32>,
    last_progress: f32,
    override_emitted: bool,
}

impl ProgressTranslator {
    /// `processing_message` replaces the upload text once every byte is sent.
    pub fn new(processing_message: impl Into<String>) -> Self {
        Self {
            processing_message: processing_message.into(),
            attempt: None,
            last_progress: SUBMISSION_START_PROGRESS,
            override_emitted: false,
        }
    }

    /// Attempt currently being uploaded, if any.
    pub fn attempt(&self) -> Option<u32> {
        self.attempt
    }

    /// Start tracking `attempt` and reset progress to zero.
    pub fn begin_attempt(&mut self, attempt: u32) -> ProgressEmission {
        self.attempt = Some(attempt);
        self.last_progress = SUBMISSION_START_PROGRESS;
        self.override_emitted = false;
        ProgressEmission::Progress(SUBMISSION_START_PROGRESS)
    }

    /// Translate an upload fraction for the current attempt.
    ///
    /// The first fraction at or above `1.0` yields the processing message
    /// override ahead of its progress value.
    pub fn translate(&mut self, fraction: f32) -> Vec<ProgressEmission> {
        if self.attempt.is_none() {
            return Vec::new();
        }

        let mut emissions = Vec::with_capacity(2);
        if fraction >= 1.0 && !self.override_emitted {
            self.override_emitted = true;
            emissions.push(ProgressEmission::MessageOverride(
                self.processing_message.clone(),
            ));
        }

        self.last_progress = self.last_progress.max(upload_progress(fraction));
        emissions.push(ProgressEmission::Progress(self.last_progress));
        emissions
    }

    /// Close the attempt with full progress, whatever the verdict was.
    pub fn finish(&mut self) -> ProgressEmission {
        self.attempt = None;
        self.last_progress = COMPLETE_PROGRESS;
        ProgressEmission::Progress(COMPLETE_PROGRESS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn progress_values(emissions: &[ProgressEmission]) -> Vec<f32> {
        emissions
            .iter()
            .filter_map(|e| match e {
                ProgressEmission::Progress(p) => Some(*p),
                ProgressEmission::MessageOverride(_) => None,
            })
            .collect()
    }

    #[test]
    fn maps_fraction_into_upload_band() {
        assert!((upload_progress(0.0) - 0.1).abs() < f32::EPSILON);
        assert!((upload_progress(0.5) - 0.45).abs() < 1e-6);
        assert!((upload_progress(1.0) - 0.8).abs() < 1e-6);
        assert!((upload_progress(7.0) - 0.8).abs() < 1e-6);
        assert!((upload_progress(f32::NAN) - 0.1).abs() < f32::EPSILON);
    }

    #[test]
    fn override_fires_once_before_progress() {
        let mut translator = ProgressTranslator::new("Processing");
        assert_eq!(translator.begin_attempt(0), ProgressEmission::Progress(0.0));

        let first = translator.translate(1.0);
        assert_eq!(
            first[0],
            ProgressEmission::MessageOverride("Processing".to_string())
        );
        assert_eq!(first.len(), 2);

        let second = translator.translate(1.0);
        assert_eq!(second.len(), 1);
        assert!(matches!(second[0], ProgressEmission::Progress(_)));
    }

    #[test]
    fn override_rearms_on_next_attempt() {
        let mut translator = ProgressTranslator::new("Processing");
        translator.begin_attempt(0);
        translator.translate(1.0);
        translator.finish();

        translator.begin_attempt(1);
        let emissions = translator.translate(1.0);
        assert!(emissions
            .iter()
            .any(|e| matches!(e, ProgressEmission::MessageOverride(_))));
    }

    #[test]
    fn ignores_samples_outside_an_attempt() {
        let mut translator = ProgressTranslator::new("Processing");
        assert!(translator.translate(0.5).is_empty());

        translator.begin_attempt(0);
        translator.finish();
        assert!(translator.translate(0.9).is_empty());
        assert_eq!(translator.attempt(), None);
    }

    #[test]
    fn never_decreases_within_attempt() {
        let mut translator = ProgressTranslator::new("Processing");
        translator.begin_attempt(0);
        let high = progress_values(&translator.translate(0.8));
        let low = progress_values(&translator.translate(0.2));
        assert_eq!(high, low);
    }

    proptest! {
        #[test]
        fn upload_band_is_bounded_and_monotone(a in 0.0f32..=1.0, b in 0.0f32..=1.0) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            let p_lo = upload_progress(lo);
            let p_hi = upload_progress(hi);
            prop_assert!(p_lo <= p_hi);
            prop_assert!((0.1..=0.8).contains(&p_lo));
            prop_assert!((0.1..=0.8).contains(&p_hi));
        }

        #[test]
        fn emitted_sequence_is_non_decreasing(fractions in proptest::collection::vec(0.0f32..=1.2, 1..40)) {
            let mut translator = ProgressTranslator::new("Processing");
            translator.begin_attempt(3);
            let mut emitted = Vec::new();
            let mut overrides = 0;
            for fraction in fractions {
                for emission in translator.translate(fraction) {
                    match emission {
                        ProgressEmission::Progress(p) => emitted.push(p),
                        ProgressEmission::MessageOverride(_) => overrides += 1,
                    }
                }
            }
            prop_assert!(emitted.windows(2).all(|w| w[0] <= w[1]));
            prop_assert!(emitted.iter().all(|p| (0.1..=0.8).contains(p)));
            prop_assert!(overrides <= 1);
        }
    }
}
