use serde::{Deserialize, Serialize};

use crate::energy::DegeneratePolicy;
use crate::error::{Error, Result};
use crate::gate::{DEFAULT_CONTEXT, DEFAULT_ENERGY_THRESHOLD, GateParams};

/// Labeled corpora whose conventions fix the voiced-fraction threshold.
///
/// The pipeline itself only sees `percent_th`; this mapping belongs to the caller's
/// configuration layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dataset {
    /// Dataset id 1.
    Ravdess,

    /// Dataset id 2.
    Savee,
}

impl Dataset {
    /// Fraction of the context window that must be energetic for a frame to be voiced.
    pub fn percent_th(self) -> f64 {
        match self {
            Self::Ravdess => 0.4,
            Self::Savee => 0.3,
        }
    }

    /// The numeric id callers pass to [`crate::vad()`].
    pub fn id(self) -> u8 {
        match self {
            Self::Ravdess => 1,
            Self::Savee => 2,
        }
    }
}

impl TryFrom<u8> for Dataset {
    type Error = Error;

    fn try_from(id: u8) -> Result<Self> {
        match id {
            1 => Ok(Self::Ravdess),
            2 => Ok(Self::Savee),
            other => Err(Error::config(format!(
                "unknown dataset id {other} (expected 1 or 2)"
            ))),
        }
    }
}

/// Options that control a VAD run.
///
/// This is library-level configuration: drivers build it programmatically or deserialize it
/// (every field falls back to its default when missing).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VadOpts {
    /// Normalized score a frame must strictly exceed to count as energetic.
    pub energy_threshold: f64,

    /// Neighbouring frames considered on each side of a frame.
    pub context: usize,

    /// Fraction of the context window that must be energetic.
    pub percent_th: f64,

    /// Handling of silent frames and flat energy profiles.
    pub degenerate: DegeneratePolicy,
}

impl Default for VadOpts {
    fn default() -> Self {
        Self::for_dataset(Dataset::Ravdess)
    }
}

impl VadOpts {
    /// Defaults for a dataset convention.
    pub fn for_dataset(dataset: Dataset) -> Self {
        Self {
            energy_threshold: DEFAULT_ENERGY_THRESHOLD,
            context: DEFAULT_CONTEXT,
            percent_th: dataset.percent_th(),
            degenerate: DegeneratePolicy::default(),
        }
    }

    pub fn with_energy_threshold(mut self, energy_threshold: f64) -> Self {
        self.energy_threshold = energy_threshold;
        self
    }

    pub fn with_context(mut self, context: usize) -> Self {
        self.context = context;
        self
    }

    pub fn with_degenerate(mut self, degenerate: DegeneratePolicy) -> Self {
        self.degenerate = degenerate;
        self
    }

    /// Reject values the gate cannot interpret.
    pub fn validate(&self) -> Result<()> {
        if !self.energy_threshold.is_finite() {
            return Err(Error::config(format!(
                "energy threshold must be finite, got {}",
                self.energy_threshold
            )));
        }
        if !(0.0..=1.0).contains(&self.percent_th) {
            return Err(Error::config(format!(
                "percent_th must lie in [0, 1], got {}",
                self.percent_th
            )));
        }
        Ok(())
    }

    pub(crate) fn gate_params(&self) -> GateParams {
        GateParams {
            threshold: self.energy_threshold,
            context: self.context,
            percent_th: self.percent_th,
        }
    }
}
