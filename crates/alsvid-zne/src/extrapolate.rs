//! Noise scaling and extrapolation to the zero-noise limit.

use tracing::debug;

use alsvid_ir::Circuit;
use alsvid_sim::NoisyExecutor;

use crate::error::{ZneError, ZneResult};

/// An executor whose noise strength can be amplified by a scalar factor.
///
/// Scale 1 is the executor's native noise level and scale 0 is
/// noiseless. Extrapolation only ever requests scales of 1 or more.
pub trait ScaledExecutor {
    /// Execute the circuit with noise amplified by `scale`.
    fn execute_scaled(&self, circuit: &Circuit, scale: f64) -> ZneResult<f64>;
}

impl ScaledExecutor for NoisyExecutor {
    fn execute_scaled(&self, circuit: &Circuit, scale: f64) -> ZneResult<f64> {
        Ok(self.execute_at(circuit, self.noise_level() * scale)?)
    }
}

/// How measurements at scaled noise are fitted to the zero-noise limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FitMethod {
    /// Richardson extrapolation: the unique polynomial through all
    /// points, evaluated at zero. Exact when the expectation value is a
    /// polynomial of degree below the number of scale factors.
    #[default]
    Richardson,
    /// Least-squares linear fit, more robust when measurements are not
    /// polynomial in the noise level.
    Linear,
}

/// Configuration for zero-noise extrapolation.
#[derive(Debug, Clone)]
pub struct ZneConfig {
    /// Noise amplification factors, each at least 1.
    pub scale_factors: Vec<f64>,
    /// Fit method for the zero-noise estimate.
    pub fit: FitMethod,
}

impl Default for ZneConfig {
    fn default() -> Self {
        Self {
            scale_factors: vec![1.0, 2.0, 3.0],
            fit: FitMethod::default(),
        }
    }
}

impl ZneConfig {
    /// Validate the scale factors.
    pub fn validate(&self) -> ZneResult<()> {
        if self.scale_factors.len() < 2 {
            return Err(ZneError::TooFewScaleFactors {
                got: self.scale_factors.len(),
            });
        }
        for (i, &factor) in self.scale_factors.iter().enumerate() {
            if factor < 1.0 {
                return Err(ZneError::ScaleFactorBelowOne { value: factor });
            }
            if self.scale_factors[..i].iter().any(|&f| f == factor) {
                return Err(ZneError::DuplicateScaleFactor { value: factor });
            }
        }
        Ok(())
    }
}

/// Estimate the noiseless expectation value of a circuit.
///
/// Executes the circuit once per scale factor and extrapolates the
/// measurements back to scale zero with the configured fit.
pub fn zero_noise_extrapolate(
    executor: &dyn ScaledExecutor,
    circuit: &Circuit,
    config: &ZneConfig,
) -> ZneResult<f64> {
    config.validate()?;

    let mut points = Vec::with_capacity(config.scale_factors.len());
    for &scale in &config.scale_factors {
        let value = executor.execute_scaled(circuit, scale)?;
        debug!(scale, value, "scaled execution");
        points.push((scale, value));
    }

    let estimate = match config.fit {
        FitMethod::Richardson => richardson(&points),
        FitMethod::Linear => linear_intercept(&points),
    };
    debug!(estimate, "zero-noise estimate");
    Ok(estimate)
}

/// Lagrange interpolation through all points, evaluated at zero.
fn richardson(points: &[(f64, f64)]) -> f64 {
    let mut estimate = 0.0;
    for (i, &(xi, yi)) in points.iter().enumerate() {
        let mut weight = 1.0;
        for (j, &(xj, _)) in points.iter().enumerate() {
            if i != j {
                weight *= xj / (xj - xi);
            }
        }
        estimate += yi * weight;
    }
    estimate
}

/// Intercept of the least-squares line through the points.
fn linear_intercept(points: &[(f64, f64)]) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    let n = points.len() as f64;
    let sum_x: f64 = points.iter().map(|(x, _)| x).sum();
    let sum_y: f64 = points.iter().map(|(_, y)| y).sum();
    let sum_xx: f64 = points.iter().map(|(x, _)| x * x).sum();
    let sum_xy: f64 = points.iter().map(|(x, y)| x * y).sum();

    let slope = (n * sum_xy - sum_x * sum_y) / (n * sum_xx - sum_x * sum_x);
    (sum_y - slope * sum_x) / n
}

#[cfg(test)]
mod tests {
    use super::*;
    use alsvid_ir::QubitId;

    /// Executor whose expectation value is a fixed polynomial in scale.
    struct PolyExecutor(Vec<f64>);

    impl ScaledExecutor for PolyExecutor {
        fn execute_scaled(&self, _circuit: &Circuit, scale: f64) -> ZneResult<f64> {
            Ok(self
                .0
                .iter()
                .rev()
                .fold(0.0, |acc, &coef| acc * scale + coef))
        }
    }

    #[test]
    fn test_richardson_exact_on_linear() {
        // y = 0.8 - 0.1 s
        let executor = PolyExecutor(vec![0.8, -0.1]);
        let circuit = Circuit::new("test");
        let config = ZneConfig::default();

        let estimate = zero_noise_extrapolate(&executor, &circuit, &config).unwrap();
        assert!((estimate - 0.8).abs() < 1e-12);
    }

    #[test]
    fn test_richardson_exact_on_quadratic() {
        // y = 1.0 - 0.1 s - 0.05 s², three points pin down the parabola.
        let executor = PolyExecutor(vec![1.0, -0.1, -0.05]);
        let circuit = Circuit::new("test");
        let config = ZneConfig::default();

        let estimate = zero_noise_extrapolate(&executor, &circuit, &config).unwrap();
        assert!((estimate - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_linear_fit_on_linear_data() {
        let executor = PolyExecutor(vec![0.6, -0.05]);
        let circuit = Circuit::new("test");
        let config = ZneConfig {
            scale_factors: vec![1.0, 1.5, 2.0, 3.0],
            fit: FitMethod::Linear,
        };

        let estimate = zero_noise_extrapolate(&executor, &circuit, &config).unwrap();
        assert!((estimate - 0.6).abs() < 1e-12);
    }

    #[test]
    fn test_mitigation_beats_raw_execution() {
        let circuit = {
            let mut c = Circuit::with_size("test", 2, 0);
            c.h(QubitId(0)).unwrap();
            c.cx(QubitId(0), QubitId(1)).unwrap();
            c.cx(QubitId(0), QubitId(1)).unwrap();
            c.cx(QubitId(0), QubitId(1)).unwrap();
            c
        };
        let executor = NoisyExecutor::new(0.05).unwrap();

        let ideal = executor.execute_scaled(&circuit, 0.0).unwrap();
        let noisy = executor.execute_scaled(&circuit, 1.0).unwrap();
        let mitigated =
            zero_noise_extrapolate(&executor, &circuit, &ZneConfig::default()).unwrap();

        assert!((mitigated - ideal).abs() < (noisy - ideal).abs());
    }

    #[test]
    fn test_config_validation() {
        let too_few = ZneConfig {
            scale_factors: vec![1.0],
            fit: FitMethod::Richardson,
        };
        assert!(matches!(
            too_few.validate(),
            Err(ZneError::TooFewScaleFactors { got: 1 })
        ));

        let below_one = ZneConfig {
            scale_factors: vec![0.5, 2.0],
            fit: FitMethod::Richardson,
        };
        assert!(matches!(
            below_one.validate(),
            Err(ZneError::ScaleFactorBelowOne { .. })
        ));

        let duplicate = ZneConfig {
            scale_factors: vec![1.0, 2.0, 2.0],
            fit: FitMethod::Richardson,
        };
        assert!(matches!(
            duplicate.validate(),
            Err(ZneError::DuplicateScaleFactor { .. })
        ));

        assert!(ZneConfig::default().validate().is_ok());
    }

    #[test]
    fn test_scaling_past_unit_probability_fails() {
        let circuit = Circuit::bell().unwrap();
        let executor = NoisyExecutor::new(0.4).unwrap();
        let config = ZneConfig {
            scale_factors: vec![1.0, 3.0],
            fit: FitMethod::Richardson,
        };

        assert!(matches!(
            zero_noise_extrapolate(&executor, &circuit, &config),
            Err(ZneError::Execution(_))
        ));
    }
}
