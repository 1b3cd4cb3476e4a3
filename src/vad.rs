//! The end-to-end pipeline: frame → score → gate → reconstruct.
//!
//! Each call is independent. Inputs are validated before framing begins, and every stage
//! fully materializes its output before the next one runs.

use tracing::{debug, warn};

use crate::deframe::{apply_mask, trim_trailing_zeros, voice_mask, voiced_ranges};
use crate::energy::{EnergyProfile, score};
use crate::error::{Error, Result};
use crate::framing::{FrameGeometry, frame};
use crate::gate::{VoiceDecision, gate};
use crate::opts::{Dataset, VadOpts};

/// Energy-based voice activity detector.
///
/// Typical usage:
/// - Build once from [`VadOpts`].
/// - Call [`Vad::run`] for every buffer; the detector holds no per-call state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vad {
    opts: VadOpts,
}

/// Intermediate products of one run, kept for diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub struct Detection {
    pub geometry: FrameGeometry,
    pub profile: EnergyProfile,
    pub decisions: VoiceDecision,
    /// One entry per input sample.
    pub mask: Vec<bool>,
}

impl Detection {
    /// Voiced sample ranges `[start, end)`, sorted.
    pub fn voiced_ranges(&self) -> Vec<(usize, usize)> {
        voiced_ranges(&self.mask)
    }

    pub fn voiced_frames(&self) -> usize {
        self.decisions.voiced_count()
    }

    /// Apply the mask to `signal` and trim trailing zeros.
    ///
    /// `signal` should be the buffer this detection was computed from.
    pub fn apply(&self, signal: &[f32]) -> Vec<f32> {
        let mut out = apply_mask(signal, &self.mask);
        trim_trailing_zeros(&mut out);
        out
    }
}

impl Vad {
    /// Create a detector, rejecting options the gate cannot interpret.
    pub fn new(opts: VadOpts) -> Result<Self> {
        opts.validate()?;
        Ok(Self { opts })
    }

    pub fn opts(&self) -> &VadOpts {
        &self.opts
    }

    /// Run the pipeline and return the voiced-only signal.
    ///
    /// Unvoiced regions are zeroed and trailing zeros are trimmed; a signal with no voiced
    /// frame yields an empty vector.
    pub fn run(&self, signal: &[f32], sampling_rate: u32) -> Result<Vec<f32>> {
        let detection = self.detect(signal, sampling_rate)?;
        let out = detection.apply(signal);
        debug!(
            input_len = signal.len(),
            output_len = out.len(),
            "voiced signal reconstructed"
        );
        Ok(out)
    }

    /// Run framing, scoring and gating, and build the per-sample mask.
    pub fn detect(&self, signal: &[f32], sampling_rate: u32) -> Result<Detection> {
        check_signal(signal)?;
        let geometry = FrameGeometry::for_sampling_rate(sampling_rate)?;

        let frames = frame(signal, geometry)?;
        if frames.is_empty() {
            warn!(
                signal_len = signal.len(),
                win_len = geometry.win_len(),
                "signal too short for a single frame"
            );
        }

        let profile = score(&frames, self.opts.degenerate)?;
        drop(frames);

        let decisions = gate(&profile, self.opts.gate_params());
        let mask = voice_mask(signal.len(), &decisions, geometry);

        debug!(
            sampling_rate,
            win_len = geometry.win_len(),
            overlap = geometry.overlap(),
            frames = decisions.len(),
            voiced_frames = decisions.voiced_count(),
            "frames gated"
        );

        Ok(Detection {
            geometry,
            profile,
            decisions,
            mask,
        })
    }
}

/// One-shot entry point for batch drivers.
///
/// `dataset_id` selects the voiced-fraction threshold: `1` → 0.4, `2` → 0.3. Any other id is
/// an [`Error::InvalidConfiguration`].
pub fn vad(
    signal: &[f32],
    sampling_rate: u32,
    dataset_id: u8,
    energy_threshold: f64,
    context: usize,
) -> Result<Vec<f32>> {
    let dataset = Dataset::try_from(dataset_id)?;
    let opts = VadOpts::for_dataset(dataset)
        .with_energy_threshold(energy_threshold)
        .with_context(context);
    Vad::new(opts)?.run(signal, sampling_rate)
}

fn check_signal(signal: &[f32]) -> Result<()> {
    if signal.is_empty() {
        return Err(Error::EmptySignal);
    }
    if let Some(index) = signal.iter().position(|s| !s.is_finite()) {
        return Err(Error::NonFiniteSample { index });
    }
    Ok(())
}
