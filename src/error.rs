use thiserror::Error;

/// energy-vad's crate-wide result type.
pub type Result<T> = std::result::Result<T, Error>;

/// energy-vad's crate-wide error type.
///
/// Every variant is detected synchronously, before any stage produces a partial result.
/// An input with no voiced frames is not an error: it yields an empty output.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// A parameter combination that can never produce a valid run
    /// (frame geometry, dataset id, thresholds, sampling rate).
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// The input signal has no samples.
    #[error("signal is empty")]
    EmptySignal,

    /// The input signal contains NaN or an infinity.
    #[error("sample {index} is not finite")]
    NonFiniteSample { index: usize },

    /// The energy profile cannot be normalized and the policy asks us to fail.
    #[error("degenerate energy profile: {0}")]
    DegenerateEnergyProfile(String),
}

impl Error {
    pub(crate) fn config(message: impl Into<String>) -> Self {
        Self::InvalidConfiguration(message.into())
    }

    pub(crate) fn degenerate(message: impl Into<String>) -> Self {
        Self::DegenerateEnergyProfile(message.into())
    }
}
