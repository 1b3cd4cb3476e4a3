//! Splitting a signal into fixed-length, overlapping frames.
//!
//! Frame `i` starts at `i * hop` where `hop = win_len - overlap`, and always holds exactly
//! `win_len` samples: a frame that runs past the end of the signal is right-padded with zeros.

use crate::error::{Error, Result};

/// Analysis window length in milliseconds.
pub const WINDOW_MS: u64 = 25;

/// Share of the window that consecutive frames have in common, as `numerator / denominator`.
const OVERLAP_FRACTION: (u64, u64) = (1, 4);

/// Window length and overlap (both in samples) shared by the framer and the reconstructor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameGeometry {
    win_len: usize,
    overlap: usize,
}

impl FrameGeometry {
    /// Build a geometry from explicit sample counts.
    ///
    /// Fails with [`Error::InvalidConfiguration`] when `win_len` is zero or when `overlap`
    /// is not strictly smaller than `win_len`.
    pub fn new(win_len: usize, overlap: usize) -> Result<Self> {
        if win_len == 0 {
            return Err(Error::config("win_len must be at least one sample"));
        }
        if overlap >= win_len {
            return Err(Error::config(format!(
                "overlap ({overlap}) must be smaller than win_len ({win_len})"
            )));
        }
        Ok(Self { win_len, overlap })
    }

    /// Derive the geometry for a sampling rate: a 25 ms window with a quarter-window overlap.
    ///
    /// Both values are rounded to the nearest sample, ties to even.
    pub fn for_sampling_rate(sampling_rate: u32) -> Result<Self> {
        if sampling_rate == 0 {
            return Err(Error::config("sampling rate must be positive"));
        }

        let win_len = div_round_half_even(u64::from(sampling_rate) * WINDOW_MS, 1000);
        if win_len == 0 {
            return Err(Error::config(format!(
                "sampling rate {sampling_rate} Hz is too low for a {WINDOW_MS} ms window"
            )));
        }

        let (num, den) = OVERLAP_FRACTION;
        let overlap = div_round_half_even(win_len * num, den);
        Self::new(to_usize(win_len)?, to_usize(overlap)?)
    }

    pub fn win_len(&self) -> usize {
        self.win_len
    }

    pub fn overlap(&self) -> usize {
        self.overlap
    }

    /// Distance between the starts of consecutive frames.
    pub fn hop(&self) -> usize {
        self.win_len - self.overlap
    }

    /// Number of frames for a signal of `signal_len` samples:
    /// `round((signal_len - overlap) / hop)`, or zero when that is not positive.
    pub fn frame_count(&self, signal_len: usize) -> usize {
        if signal_len <= self.overlap {
            return 0;
        }
        let frames = div_round_half_even((signal_len - self.overlap) as u64, self.hop() as u64);
        usize::try_from(frames).unwrap_or(usize::MAX)
    }

    /// Sample span `[start, end)` covered by frame `index`, before clamping to the signal.
    pub fn span(&self, index: usize) -> (usize, usize) {
        let start = index * self.hop();
        (start, start + self.win_len)
    }
}

/// A set of equally sized frames, stored contiguously.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameSet {
    win_len: usize,
    samples: Vec<f32>,
}

impl FrameSet {
    /// Number of frames.
    pub fn len(&self) -> usize {
        self.samples.len() / self.win_len
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn win_len(&self) -> usize {
        self.win_len
    }

    /// Frame `index`, or `None` past the end.
    pub fn get(&self, index: usize) -> Option<&[f32]> {
        let start = index.checked_mul(self.win_len)?;
        let end = start.checked_add(self.win_len)?;
        self.samples.get(start..end)
    }

    /// Frames in order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &[f32]> + '_ {
        self.samples.chunks_exact(self.win_len)
    }
}

/// Split `signal` into overlapping frames.
///
/// A signal too short to hold a single frame produces an empty [`FrameSet`]; an empty signal
/// is rejected with [`Error::EmptySignal`].
pub fn frame(signal: &[f32], geometry: FrameGeometry) -> Result<FrameSet> {
    if signal.is_empty() {
        return Err(Error::EmptySignal);
    }

    let win_len = geometry.win_len();
    let n_frames = geometry.frame_count(signal.len());

    // Zero-initialised, so the tail of a short last frame is already padded.
    let mut samples = vec![0.0_f32; n_frames * win_len];

    for (i, dst) in samples.chunks_exact_mut(win_len).enumerate() {
        let (start, end) = geometry.span(i);
        let start = start.min(signal.len());
        let end = end.min(signal.len());
        let src = &signal[start..end];
        dst[..src.len()].copy_from_slice(src);
    }

    Ok(FrameSet { win_len, samples })
}

/// `round(num / den)` with ties going to the even neighbour.
fn div_round_half_even(num: u64, den: u64) -> u64 {
    let q = num / den;
    let r = num % den;
    let twice = r * 2;
    if twice > den || (twice == den && q % 2 == 1) {
        q + 1
    } else {
        q
    }
}

fn to_usize(value: u64) -> Result<usize> {
    usize::try_from(value).map_err(|_| Error::config(format!("{value} samples does not fit")))
}
