//! Extrapolation errors.

use alsvid_sim::SimError;
use thiserror::Error;

/// Errors that can occur during zero-noise extrapolation.
#[derive(Error, Debug)]
pub enum ZneError {
    /// Fewer than two scale factors were configured.
    #[error("Extrapolation needs at least 2 scale factors, got {got}")]
    TooFewScaleFactors {
        /// Number of configured scale factors.
        got: usize,
    },

    /// A scale factor below 1 would de-amplify noise.
    #[error("Scale factor {value} is below 1")]
    ScaleFactorBelowOne {
        /// The offending scale factor.
        value: f64,
    },

    /// Two scale factors coincide, making the fit degenerate.
    #[error("Duplicate scale factor {value}")]
    DuplicateScaleFactor {
        /// The repeated scale factor.
        value: f64,
    },

    /// Execution at a scaled noise level failed.
    #[error("Execution error: {0}")]
    Execution(#[from] SimError),
}

/// Result type for extrapolation operations.
pub type ZneResult<T> = Result<T, ZneError>;
