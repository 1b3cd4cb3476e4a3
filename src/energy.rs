//! Per-frame log energy, min-max normalized into `[-1, 1]`.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{Error, Result};
use crate::framing::FrameSet;

/// Raw energy substituted for an all-zero frame under [`DegeneratePolicy::Fallback`].
pub const ENERGY_FLOOR: f64 = 1e-10;

/// What to do when the profile cannot be normalized as-is.
///
/// Two situations are degenerate: a frame with zero energy (its log is undefined) and a
/// profile where every frame has the same log energy (the normalization divides by zero).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DegeneratePolicy {
    /// Floor zero energies at [`ENERGY_FLOOR`] and map a flat profile to all zeros.
    #[default]
    Fallback,

    /// Fail with [`Error::DegenerateEnergyProfile`].
    Reject,
}

/// Normalized log energies, one per frame, in frame order.
#[derive(Debug, Clone, PartialEq)]
pub struct EnergyProfile {
    scores: Vec<f64>,
}

impl EnergyProfile {
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.scores
    }

    pub fn into_vec(self) -> Vec<f64> {
        self.scores
    }
}

impl From<Vec<f64>> for EnergyProfile {
    fn from(scores: Vec<f64>) -> Self {
        Self { scores }
    }
}

/// Sum of squared samples, accumulated in `f64`.
pub fn frame_energy(frame: &[f32]) -> f64 {
    frame
        .iter()
        .map(|&s| {
            let s = f64::from(s);
            s * s
        })
        .sum()
}

/// Score every frame: `2 * (ln(e) - min) / (max - min) - 1`.
///
/// An empty frame set scores to an empty profile.
pub fn score(frames: &FrameSet, policy: DegeneratePolicy) -> Result<EnergyProfile> {
    let mut log_energies = Vec::with_capacity(frames.len());
    let mut floored = 0usize;

    for (i, frame) in frames.iter().enumerate() {
        let mut energy = frame_energy(frame);
        if energy <= 0.0 {
            if policy == DegeneratePolicy::Reject {
                return Err(Error::degenerate(format!("frame {i} has zero energy")));
            }
            energy = ENERGY_FLOOR;
            floored += 1;
        }
        log_energies.push(energy.ln());
    }

    if floored > 0 {
        warn!(frames = floored, floor = ENERGY_FLOOR, "silent frames floored");
    }

    let Some((min, max)) = min_max(&log_energies) else {
        return Ok(EnergyProfile::from(log_energies));
    };

    let range = max - min;
    if range == 0.0 {
        if policy == DegeneratePolicy::Reject {
            return Err(Error::degenerate(format!(
                "all {} frames share the same energy",
                log_energies.len()
            )));
        }
        warn!(frames = log_energies.len(), "flat energy profile, scoring all frames as 0");
        return Ok(EnergyProfile::from(vec![0.0; log_energies.len()]));
    }

    let scores: Vec<f64> = log_energies
        .into_iter()
        .map(|l| 2.0 * (l - min) / range - 1.0)
        .collect();
    Ok(EnergyProfile::from(scores))
}

fn min_max(values: &[f64]) -> Option<(f64, f64)> {
    let first = *values.first()?;
    Some(
        values
            .iter()
            .fold((first, first), |(lo, hi), &v| (lo.min(v), hi.max(v))),
    )
}
