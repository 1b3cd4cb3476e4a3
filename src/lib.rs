//! `energy-vad`: energy-based voice activity detection for offline audio preprocessing.
//!
//! Given a mono sample buffer and its sampling rate, the pipeline:
//! - splits the signal into 25 ms frames overlapping by a quarter window
//! - scores each frame by its min-max normalized log energy
//! - marks a frame voiced when enough of its neighbours are energetic
//! - zeroes unvoiced samples and trims the trailing silence
//!
//! Audio I/O is left to the caller: buffers go in and come out in memory.

// High-level API (most consumers should start here).
pub mod opts;
pub mod vad;

// Pipeline stages, usable on their own.
pub mod deframe;
pub mod energy;
pub mod framing;
pub mod gate;

pub mod error;

// Logging configuration for embedding drivers.
#[cfg(feature = "logging")]
pub mod logging;

pub use error::{Error, Result};
pub use opts::{Dataset, VadOpts};
pub use vad::{Detection, Vad, vad};
