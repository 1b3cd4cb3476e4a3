//! Context-window gate turning an energy profile into voiced/unvoiced decisions.
//!
//! For frame `i` we look at `profile[start..end]` with `start = i.saturating_sub(context)` and
//! `end = min(len, i + context)`, count the scores strictly above `threshold`, and divide by
//! `end - start + 1`, one more than the slice length. The frame is voiced when the ratio
//! strictly exceeds `percent_th`.

use crate::energy::EnergyProfile;

/// Default energy threshold on the normalized `[-1, 1]` scale.
pub const DEFAULT_ENERGY_THRESHOLD: f64 = 0.0;

/// Default number of neighbouring frames considered on each side.
pub const DEFAULT_CONTEXT: usize = 5;

/// Parameters of the gate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GateParams {
    /// Score a frame must strictly exceed to count as energetic.
    pub threshold: f64,

    /// Neighbouring frames considered on each side.
    pub context: usize,

    /// Fraction of the window that must be energetic for a frame to be voiced.
    pub percent_th: f64,
}

/// One flag per frame, in frame order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoiceDecision {
    voiced: Vec<bool>,
}

impl VoiceDecision {
    pub fn len(&self) -> usize {
        self.voiced.len()
    }

    pub fn is_empty(&self) -> bool {
        self.voiced.is_empty()
    }

    pub fn as_slice(&self) -> &[bool] {
        &self.voiced
    }

    pub fn is_voiced(&self, frame: usize) -> bool {
        self.voiced.get(frame).copied().unwrap_or(false)
    }

    pub fn voiced_count(&self) -> usize {
        self.voiced.iter().filter(|&&v| v).count()
    }
}

impl From<Vec<bool>> for VoiceDecision {
    fn from(voiced: Vec<bool>) -> Self {
        Self { voiced }
    }
}

impl FromIterator<bool> for VoiceDecision {
    fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> Self {
        Self {
            voiced: iter.into_iter().collect(),
        }
    }
}

/// Decide, for every frame, whether it is voiced.
pub fn gate(profile: &EnergyProfile, params: GateParams) -> VoiceDecision {
    let scores = profile.as_slice();
    let n = scores.len();

    (0..n)
        .map(|i| {
            let (start, end) = window(i, n, params.context);
            ratio(&scores[start..end], params.threshold, start, end) > params.percent_th
        })
        .collect()
}

fn window(i: usize, n: usize, context: usize) -> (usize, usize) {
    let start = i.saturating_sub(context);
    let end = i.saturating_add(context).min(n);
    (start, end)
}

fn ratio(window: &[f64], threshold: f64, start: usize, end: usize) -> f64 {
    let above = window.iter().filter(|&&s| s > threshold).count();
    above as f64 / (end - start + 1) as f64
}
