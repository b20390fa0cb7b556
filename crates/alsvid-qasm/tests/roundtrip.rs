//! Property tests for the QASM round-trip.

use alsvid_ir::{random_circuit, Circuit, RandomCircuitConfig};
use alsvid_qasm::{emit, parse};
use proptest::prelude::*;

proptest! {
    /// Emitting a circuit and parsing it back preserves the instruction
    /// sequence exactly.
    #[test]
    fn random_circuit_roundtrips(
        num_qubits in 1u32..6,
        depth in 0u32..12,
        density in 0.1f64..=1.0,
        seed in any::<u64>(),
    ) {
        let config = RandomCircuitConfig { num_qubits, depth, density, seed };
        let circuit = random_circuit(&config).unwrap();

        let reparsed = parse(&emit(&circuit)).unwrap();
        prop_assert_eq!(reparsed.instructions(), circuit.instructions());
        prop_assert_eq!(reparsed.num_qubits(), circuit.num_qubits());
    }

    /// Round-trip is stable: a second emit of the reparsed circuit yields
    /// identical text.
    #[test]
    fn emit_is_stable(seed in any::<u64>()) {
        let config = RandomCircuitConfig { seed, ..RandomCircuitConfig::default() };
        let circuit = random_circuit(&config).unwrap();

        let text = emit(&circuit);
        let text2 = emit(&parse(&text).unwrap());
        prop_assert_eq!(text, text2);
    }
}

#[test]
fn ghz_with_measurement_roundtrips() {
    let mut circuit = Circuit::ghz(4).unwrap();
    circuit.measure_all().unwrap();

    let reparsed = parse(&emit(&circuit)).unwrap();
    assert_eq!(reparsed.instructions(), circuit.instructions());
    assert_eq!(reparsed.num_clbits(), 4);
}
