//! Noisy circuit execution.

use ndarray::array;
use num_complex::Complex64;
use tracing::debug;

use alsvid_ir::{Circuit, Instruction, InstructionKind, NoiseModel, StandardGate};

use crate::density::DensityMatrix;
use crate::error::{SimError, SimResult};
use crate::matrices::gate_matrix;

/// Default two-qubit depolarizing error rate.
pub const DEFAULT_NOISE_LEVEL: f64 = 0.05;

/// Default qubit cap. A 12-qubit density matrix is 16M complex entries.
pub const DEFAULT_MAX_QUBITS: u32 = 12;

/// Insert a depolarizing channel after every two-qubit gate.
///
/// Single-qubit gates are treated as error-free. A noise level of zero
/// returns the circuit unchanged.
pub fn inject_noise(circuit: &Circuit, noise_level: f64) -> SimResult<Circuit> {
    if noise_level == 0.0 {
        return Ok(circuit.clone());
    }

    let mut noisy = Circuit::with_size(
        circuit.name(),
        u32::try_from(circuit.num_qubits()).unwrap_or(u32::MAX),
        u32::try_from(circuit.num_clbits()).unwrap_or(u32::MAX),
    );
    for inst in circuit.iter() {
        let follow = inst.is_two_qubit_gate().then(|| {
            Instruction::noise_channel(
                NoiseModel::Depolarizing { p: noise_level },
                inst.qubits.clone(),
            )
        });
        noisy.apply(inst.clone())?;
        if let Some(channel) = follow {
            noisy.apply(channel)?;
        }
    }
    Ok(noisy)
}

/// Executes circuits on the density-matrix simulator with depolarizing
/// noise after every two-qubit gate.
///
/// The returned expectation value is the ground-state population, the
/// real part of the top-left density matrix element.
#[derive(Debug, Clone)]
pub struct NoisyExecutor {
    noise_level: f64,
    max_qubits: u32,
}

impl NoisyExecutor {
    /// Create an executor with the given two-qubit error rate.
    pub fn new(noise_level: f64) -> SimResult<Self> {
        if !(0.0..=1.0).contains(&noise_level) {
            return Err(SimError::InvalidNoiseLevel {
                value: noise_level,
            });
        }
        Ok(Self {
            noise_level,
            max_qubits: DEFAULT_MAX_QUBITS,
        })
    }

    /// Create a noiseless executor.
    pub fn ideal() -> Self {
        Self {
            noise_level: 0.0,
            max_qubits: DEFAULT_MAX_QUBITS,
        }
    }

    /// Override the qubit cap.
    #[must_use]
    pub fn with_max_qubits(mut self, max_qubits: u32) -> Self {
        self.max_qubits = max_qubits;
        self
    }

    /// The configured two-qubit error rate.
    pub fn noise_level(&self) -> f64 {
        self.noise_level
    }

    /// Execute a circuit at the configured noise level.
    pub fn execute(&self, circuit: &Circuit) -> SimResult<f64> {
        self.execute_at(circuit, self.noise_level)
    }

    /// Execute a circuit at an explicit noise level.
    ///
    /// Used by noise-scaling callers; the level is validated, so scaling
    /// past a total error probability of 1 is rejected.
    pub fn execute_at(&self, circuit: &Circuit, noise_level: f64) -> SimResult<f64> {
        if !(0.0..=1.0).contains(&noise_level) {
            return Err(SimError::InvalidNoiseLevel {
                value: noise_level,
            });
        }
        if circuit.num_qubits() > self.max_qubits as usize {
            return Err(SimError::CircuitTooLarge {
                num_qubits: circuit.num_qubits(),
                max_qubits: self.max_qubits,
            });
        }

        let noisy = inject_noise(circuit, noise_level)?;
        let rho = simulate(&noisy)?;
        let population = rho.ground_state_population();
        debug!(
            circuit = circuit.name(),
            noise_level, population, "execution finished"
        );
        Ok(population)
    }
}

impl Default for NoisyExecutor {
    fn default() -> Self {
        Self {
            noise_level: DEFAULT_NOISE_LEVEL,
            max_qubits: DEFAULT_MAX_QUBITS,
        }
    }
}

/// Evolve the density matrix through every instruction.
///
/// Measurements dephase the measured qubit in the computational basis;
/// they do not sample an outcome. Barriers are no-ops.
fn simulate(circuit: &Circuit) -> SimResult<DensityMatrix> {
    let mut rho = DensityMatrix::new(circuit.num_qubits());
    let zero = Complex64::new(0.0, 0.0);
    let one = Complex64::new(1.0, 0.0);

    for inst in circuit.iter() {
        match &inst.kind {
            InstructionKind::Gate(gate) => {
                rho.apply_unitary(&gate_matrix(gate)?, &inst.qubits);
            }
            InstructionKind::Measure => {
                let p0 = array![[one, zero], [zero, zero]];
                let p1 = array![[zero, zero], [zero, one]];
                rho.apply_kraus(&[p0, p1], &inst.qubits);
            }
            InstructionKind::Reset => {
                let k0 = array![[one, zero], [zero, zero]];
                let k1 = array![[zero, one], [zero, zero]];
                rho.apply_kraus(&[k0, k1], &inst.qubits);
            }
            InstructionKind::Barrier => {}
            InstructionKind::NoiseChannel { model } => apply_noise(&mut rho, inst, model)?,
        }
    }
    Ok(rho)
}

fn apply_noise(rho: &mut DensityMatrix, inst: &Instruction, model: &NoiseModel) -> SimResult<()> {
    let p = model.error_param();
    if !(0.0..=1.0).contains(&p) {
        return Err(SimError::InvalidProbability { value: p });
    }

    match model {
        NoiseModel::Depolarizing { p } => rho.depolarize(&inst.qubits, *p),
        NoiseModel::BitFlip { p } => {
            rho.mix_unitary(&gate_matrix(&StandardGate::X)?, &inst.qubits, *p);
        }
        NoiseModel::PhaseFlip { p } => {
            rho.mix_unitary(&gate_matrix(&StandardGate::Z)?, &inst.qubits, *p);
        }
        // `NoiseModel` is `#[non_exhaustive]`; no other variants exist today.
        _ => unreachable!("unhandled noise model variant"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use alsvid_ir::QubitId;

    const EPS: f64 = 1e-12;

    #[test]
    fn test_ideal_bell_is_exact() {
        let circuit = Circuit::bell().unwrap();
        let population = NoisyExecutor::ideal().execute(&circuit).unwrap();
        assert!((population - 0.5).abs() < EPS);
    }

    #[test]
    fn test_ideal_x_is_exact() {
        let mut circuit = Circuit::with_size("test", 1, 0);
        circuit.x(QubitId(0)).unwrap();

        let population = NoisyExecutor::ideal().execute(&circuit).unwrap();
        assert!(population.abs() < EPS);
    }

    #[test]
    fn test_ideal_ghz() {
        let circuit = Circuit::ghz(4).unwrap();
        let population = NoisyExecutor::ideal().execute(&circuit).unwrap();
        assert!((population - 0.5).abs() < EPS);
    }

    #[test]
    fn test_noise_level_irrelevant_without_two_qubit_gates() {
        let mut circuit = Circuit::with_size("test", 2, 0);
        circuit.h(QubitId(0)).unwrap().t(QubitId(1)).unwrap();

        let quiet = NoisyExecutor::new(0.0).unwrap().execute(&circuit).unwrap();
        let loud = NoisyExecutor::new(0.3).unwrap().execute(&circuit).unwrap();
        assert!((quiet - loud).abs() < EPS);
    }

    #[test]
    fn test_depolarizing_monotone_on_single_cx() {
        // From |00⟩, CX is the identity, so the population decays as
        // 1 - 3p/4 toward the maximally mixed value 1/4.
        let mut circuit = Circuit::with_size("test", 2, 0);
        circuit.cx(QubitId(0), QubitId(1)).unwrap();

        let mut previous = f64::INFINITY;
        for step in 0..=5 {
            let p = f64::from(step) * 0.1;
            let population = NoisyExecutor::new(p).unwrap().execute(&circuit).unwrap();
            assert!((population - (1.0 - 0.75 * p)).abs() < EPS);
            assert!(population < previous);
            previous = population;
        }
    }

    #[test]
    fn test_noisy_bell_below_ideal() {
        let circuit = Circuit::bell().unwrap();
        let ideal = NoisyExecutor::ideal().execute(&circuit).unwrap();
        let noisy = NoisyExecutor::default().execute(&circuit).unwrap();
        assert!(noisy < ideal);
        assert!(noisy > 0.25);
    }

    #[test]
    fn test_measurement_keeps_population() {
        let mut circuit = Circuit::bell().unwrap();
        circuit.measure_all().unwrap();

        let population = NoisyExecutor::ideal().execute(&circuit).unwrap();
        assert!((population - 0.5).abs() < EPS);
    }

    #[test]
    fn test_reset_restores_ground_state() {
        let mut circuit = Circuit::with_size("test", 1, 0);
        circuit.x(QubitId(0)).unwrap().reset(QubitId(0)).unwrap();

        let population = NoisyExecutor::ideal().execute(&circuit).unwrap();
        assert!((population - 1.0).abs() < EPS);
    }

    #[test]
    fn test_qubit_cap_enforced() {
        let circuit = Circuit::ghz(3).unwrap();
        let executor = NoisyExecutor::ideal().with_max_qubits(2);
        assert!(matches!(
            executor.execute(&circuit),
            Err(SimError::CircuitTooLarge {
                num_qubits: 3,
                max_qubits: 2
            })
        ));
    }

    #[test]
    fn test_invalid_noise_level_rejected() {
        assert!(NoisyExecutor::new(-0.1).is_err());
        assert!(NoisyExecutor::new(1.5).is_err());
        assert!(NoisyExecutor::new(1.0).is_ok());
    }

    #[test]
    fn test_inject_noise_counts() {
        let mut circuit = Circuit::with_size("test", 3, 0);
        circuit.h(QubitId(0)).unwrap();
        circuit.cx(QubitId(0), QubitId(1)).unwrap();
        circuit.cz(QubitId(1), QubitId(2)).unwrap();

        let noisy = inject_noise(&circuit, 0.05).unwrap();
        assert_eq!(
            noisy.iter().filter(|i| i.is_noise_channel()).count(),
            2
        );
        assert_eq!(noisy.num_ops(), 5);
        assert_eq!(noisy.depth(), circuit.depth());
    }

    #[test]
    fn test_inject_zero_noise_is_identity() {
        let circuit = Circuit::bell().unwrap();
        let noisy = inject_noise(&circuit, 0.0).unwrap();
        assert_eq!(noisy, circuit);
    }
}
