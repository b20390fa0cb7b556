//! Seeded random circuit generation.
//!
//! Used by the mitigation pipeline to produce benchmark circuits: each
//! layer fills a random fraction of the qubits with a mix of single-qubit
//! rotations and two-qubit entangling gates. Generation is deterministic
//! for a fixed seed.

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::f64::consts::PI;

use crate::circuit::Circuit;
use crate::error::{IrError, IrResult};
use crate::qubit::QubitId;

/// Configuration for random circuit generation.
#[derive(Debug, Clone)]
pub struct RandomCircuitConfig {
    /// Number of qubits.
    pub num_qubits: u32,
    /// Number of layers; the resulting circuit depth is at most this.
    pub depth: u32,
    /// Fraction of qubit slots filled per layer, in (0, 1].
    pub density: f64,
    /// RNG seed.
    pub seed: u64,
}

impl Default for RandomCircuitConfig {
    fn default() -> Self {
        Self {
            num_qubits: 4,
            depth: 10,
            density: 0.8,
            seed: 0,
        }
    }
}

/// Generate a random circuit from the given configuration.
///
/// Within each layer, qubits are visited in shuffled order. A visited
/// qubit is skipped with probability `1 - density`; otherwise it receives
/// either a random single-qubit gate or, together with the next qubit in
/// the shuffled order, a random two-qubit gate. No measurements are
/// appended.
pub fn random_circuit(config: &RandomCircuitConfig) -> IrResult<Circuit> {
    if config.num_qubits == 0 {
        return Err(IrError::InvalidCircuitSpec(
            "random circuit needs at least one qubit".into(),
        ));
    }
    if !(config.density > 0.0 && config.density <= 1.0) {
        return Err(IrError::InvalidCircuitSpec(format!(
            "density must be in (0, 1], got {}",
            config.density
        )));
    }

    let mut rng = rand::rngs::SmallRng::seed_from_u64(config.seed);
    let mut circuit = Circuit::with_size(
        format!("random_{}x{}", config.num_qubits, config.depth),
        config.num_qubits,
        0,
    );

    for _layer in 0..config.depth {
        let mut order: Vec<u32> = (0..config.num_qubits).collect();
        order.shuffle(&mut rng);

        let mut i = 0;
        while i < order.len() {
            if !rng.gen_bool(config.density) {
                i += 1;
                continue;
            }

            if i + 1 < order.len() && rng.gen_bool(0.5) {
                apply_random_two_qubit(&mut circuit, &mut rng, order[i], order[i + 1])?;
                i += 2;
            } else {
                apply_random_single_qubit(&mut circuit, &mut rng, order[i])?;
                i += 1;
            }
        }
    }

    Ok(circuit)
}

fn apply_random_single_qubit(
    circuit: &mut Circuit,
    rng: &mut impl Rng,
    qubit: u32,
) -> IrResult<()> {
    let q = QubitId(qubit);
    match rng.gen_range(0..8) {
        0 => circuit.h(q)?,
        1 => circuit.x(q)?,
        2 => circuit.s(q)?,
        3 => circuit.t(q)?,
        4 => circuit.sx(q)?,
        5 => circuit.rx(rng.gen_range(0.0..2.0 * PI), q)?,
        6 => circuit.ry(rng.gen_range(0.0..2.0 * PI), q)?,
        _ => circuit.rz(rng.gen_range(0.0..2.0 * PI), q)?,
    };
    Ok(())
}

fn apply_random_two_qubit(
    circuit: &mut Circuit,
    rng: &mut impl Rng,
    q1: u32,
    q2: u32,
) -> IrResult<()> {
    let (a, b) = (QubitId(q1), QubitId(q2));
    match rng.gen_range(0..4) {
        0 => circuit.cx(a, b)?,
        1 => circuit.cz(a, b)?,
        2 => circuit.swap(a, b)?,
        _ => circuit.cp(rng.gen_range(0.0..2.0 * PI), a, b)?,
    };
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deterministic_for_seed() {
        let config = RandomCircuitConfig {
            num_qubits: 4,
            depth: 8,
            density: 0.9,
            seed: 42,
        };
        let a = random_circuit(&config).unwrap();
        let b = random_circuit(&config).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_seeds_differ() {
        let mut config = RandomCircuitConfig::default();
        config.seed = 1;
        let a = random_circuit(&config).unwrap();
        config.seed = 2;
        let b = random_circuit(&config).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_depth_bounded() {
        let config = RandomCircuitConfig {
            num_qubits: 5,
            depth: 12,
            density: 1.0,
            seed: 7,
        };
        let circuit = random_circuit(&config).unwrap();
        assert!(circuit.depth() <= 12);
        assert!(circuit.depth() > 0);
    }

    #[test]
    fn test_rejects_bad_density() {
        let config = RandomCircuitConfig {
            density: 0.0,
            ..RandomCircuitConfig::default()
        };
        assert!(random_circuit(&config).is_err());

        let config = RandomCircuitConfig {
            density: 1.5,
            ..RandomCircuitConfig::default()
        };
        assert!(random_circuit(&config).is_err());
    }

    #[test]
    fn test_rejects_zero_qubits() {
        let config = RandomCircuitConfig {
            num_qubits: 0,
            ..RandomCircuitConfig::default()
        };
        assert!(random_circuit(&config).is_err());
    }

    #[test]
    fn test_no_measurements() {
        let circuit = random_circuit(&RandomCircuitConfig::default()).unwrap();
        assert!(circuit.iter().all(|i| !i.is_measure()));
    }
}
