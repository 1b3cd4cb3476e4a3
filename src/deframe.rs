//! Mapping frame decisions back onto samples.
//!
//! Current behavior:
//! - Build a per-sample mask by writing each frame's decision over its span, in frame order.
//!   Where frames overlap, the later frame wins, including when it is unvoiced.
//! - Keep voiced samples, zero the rest. The buffer keeps its original indexing.
//! - Drop the trailing run of zero-valued samples. Interior silence stays in place.

use crate::framing::FrameGeometry;
use crate::gate::VoiceDecision;

/// Per-sample voiced mask for a signal of `signal_len` samples.
///
/// Spans reaching past the end of the signal are clamped; samples not covered by any frame
/// stay unvoiced.
pub fn voice_mask(
    signal_len: usize,
    decisions: &VoiceDecision,
    geometry: FrameGeometry,
) -> Vec<bool> {
    let mut mask = vec![false; signal_len];

    for (i, &voiced) in decisions.as_slice().iter().enumerate() {
        let (start, end) = geometry.span(i);
        if start >= signal_len {
            break;
        }
        mask[start..end.min(signal_len)].fill(voiced);
    }

    mask
}

/// Contiguous voiced runs of `mask` as `[start, end)` sample ranges.
///
/// Ranges are sorted and never touch: two ranges always have at least one unvoiced sample
/// between them.
pub fn voiced_ranges(mask: &[bool]) -> Vec<(usize, usize)> {
    let mut ranges = Vec::new();
    let mut open: Option<usize> = None;

    for (i, &voiced) in mask.iter().enumerate() {
        match (voiced, open) {
            (true, None) => open = Some(i),
            (false, Some(start)) => {
                ranges.push((start, i));
                open = None;
            }
            _ => {}
        }
    }

    if let Some(start) = open {
        ranges.push((start, mask.len()));
    }

    ranges
}

/// Rebuild the voiced-only signal.
pub fn reconstruct(
    signal: &[f32],
    decisions: &VoiceDecision,
    geometry: FrameGeometry,
) -> Vec<f32> {
    let mask = voice_mask(signal.len(), decisions, geometry);
    let mut out = apply_mask(signal, &mask);
    trim_trailing_zeros(&mut out);
    out
}

/// Copy voiced samples, zero everything else.
pub(crate) fn apply_mask(signal: &[f32], mask: &[bool]) -> Vec<f32> {
    signal
        .iter()
        .zip(mask)
        .map(|(&s, &voiced)| if voiced { s } else { 0.0 })
        .collect()
}

/// Truncate `samples` after its last non-zero value.
pub(crate) fn trim_trailing_zeros(samples: &mut Vec<f32>) {
    let keep = samples
        .iter()
        .rposition(|&s| s != 0.0)
        .map_or(0, |last| last + 1);
    samples.truncate(keep);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn geometry(win_len: usize, overlap: usize) -> FrameGeometry {
        match FrameGeometry::new(win_len, overlap) {
            Ok(g) => g,
            Err(err) => panic!("bad test geometry: {err}"),
        }
    }

    fn decisions(flags: &[bool]) -> VoiceDecision {
        VoiceDecision::from(flags.to_vec())
    }

    #[test]
    fn later_frame_overwrites_overlap() {
        // Frames at 0..4 and 3..7; the second one is unvoiced and clears sample 3.
        let mask = voice_mask(8, &decisions(&[true, false]), geometry(4, 1));
        assert_eq!(mask, [true, true, true, false, false, false, false, false]);

        let mask = voice_mask(8, &decisions(&[false, true]), geometry(4, 1));
        assert_eq!(mask, [false, false, false, true, true, true, true, false]);
    }

    #[test]
    fn spans_past_the_end_are_clamped() {
        let mask = voice_mask(5, &decisions(&[false, true, true]), geometry(4, 1));
        assert_eq!(mask, [false, false, false, true, true]);
    }

    #[test]
    fn trims_only_trailing_zeros() {
        let signal = [0.5, 0.25, 0.0, 0.0, -0.5, 0.75, 0.1, 0.2];
        // Frame 1 (2..4) unvoiced, frame 3 (6..8) unvoiced.
        let out = reconstruct(
            &signal,
            &decisions(&[true, false, true, false]),
            geometry(2, 0),
        );
        assert_eq!(out, vec![0.5, 0.25, 0.0, 0.0, -0.5, 0.75]);
    }

    #[test]
    fn voiced_zero_samples_at_the_tail_are_trimmed_too() {
        let out = reconstruct(&[0.3, 0.0, 0.0], &decisions(&[true]), geometry(3, 0));
        assert_eq!(out, vec![0.3]);
    }

    #[test]
    fn all_unvoiced_is_empty() {
        let out = reconstruct(
            &[0.3, 0.4, 0.5, 0.6],
            &decisions(&[false, false]),
            geometry(2, 0),
        );
        assert!(out.is_empty());
    }

    #[test]
    fn all_voiced_restores_covered_samples() {
        let signal: Vec<f32> = (0..23).map(|i| (i as f32 * 0.37).sin()).collect();
        let g = geometry(6, 2);
        let n_frames = g.frame_count(signal.len());
        let mask = voice_mask(signal.len(), &decisions(&vec![true; n_frames]), g);
        let out = apply_mask(&signal, &mask);

        let (_, covered) = g.span(n_frames - 1);
        for i in 0..covered.min(signal.len()) {
            assert_eq!(out[i], signal[i], "sample {i}");
        }
    }

    #[test]
    fn output_never_longer_than_input() {
        let signal = [0.1_f32; 17];
        for flags in [
            [true, true, true, true],
            [false, true, false, true],
            [true, false, false, false],
        ] {
            let out = reconstruct(&signal, &decisions(&flags), geometry(5, 1));
            assert!(out.len() <= signal.len());
        }
    }

    #[test]
    fn ranges_follow_mask_runs() {
        let mask = [false, true, true, false, false, true, false, true];
        assert_eq!(voiced_ranges(&mask), vec![(1, 3), (5, 6), (7, 8)]);
        assert!(voiced_ranges(&[false, false]).is_empty());
        assert_eq!(voiced_ranges(&[true, true]), vec![(0, 2)]);
    }
}
