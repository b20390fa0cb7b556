//! Zero-Noise Extrapolation for Alsvid
//!
//! Estimates the noiseless expectation value of a circuit by executing
//! it at several amplified noise levels and extrapolating the results
//! back to zero noise. The companion report module formats side-by-side
//! comparisons of mitigation quality.
//!
//! # Example
//!
//! ```rust
//! use alsvid_ir::Circuit;
//! use alsvid_sim::NoisyExecutor;
//! use alsvid_zne::{zero_noise_extrapolate, ZneConfig};
//!
//! let circuit = Circuit::bell().unwrap();
//! let executor = NoisyExecutor::new(0.05).unwrap();
//!
//! let noisy = executor.execute(&circuit).unwrap();
//! let mitigated = zero_noise_extrapolate(&executor, &circuit, &ZneConfig::default()).unwrap();
//!
//! // The true value is 0.5; mitigation recovers it better than the raw run.
//! assert!((mitigated - 0.5).abs() < (noisy - 0.5).abs());
//! ```

mod error;
mod extrapolate;
mod report;

pub use error::{ZneError, ZneResult};
pub use extrapolate::{zero_noise_extrapolate, FitMethod, ScaledExecutor, ZneConfig};
pub use report::{compare, format_report, ComparisonRecord};
