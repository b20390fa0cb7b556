//! End-to-end pipeline: generate, serialize, compile, execute, mitigate.

use alsvid_compile::{compile_circuit, PassCompiler};
use alsvid_ir::{random_circuit, RandomCircuitConfig};
use alsvid_qasm::{emit, parse};
use alsvid_sim::NoisyExecutor;
use alsvid_zne::{compare, format_report, ZneConfig};

fn test_circuit() -> alsvid_ir::Circuit {
    let config = RandomCircuitConfig {
        num_qubits: 4,
        depth: 6,
        density: 0.8,
        seed: 99,
    };
    random_circuit(&config).unwrap()
}

#[test]
fn compilation_preserves_ideal_population() {
    let circuit = test_circuit();
    let compiled = compile_circuit(&PassCompiler::new(), &circuit).unwrap();

    let executor = NoisyExecutor::ideal();
    let before = executor.execute(&circuit).unwrap();
    let after = executor.execute(&compiled).unwrap();

    assert!((before - after).abs() < 1e-9);
}

#[test]
fn qasm_roundtrip_preserves_population() {
    let circuit = test_circuit();
    let reparsed = parse(&emit(&circuit)).unwrap();

    let executor = NoisyExecutor::new(0.05).unwrap();
    let before = executor.execute(&circuit).unwrap();
    let after = executor.execute(&reparsed).unwrap();

    assert!((before - after).abs() < 1e-12);
}

#[test]
fn full_comparison_report() {
    // GHZ decays monotonically toward the mixed state under depolarizing
    // noise, so mitigation reliably improves on the raw value.
    let circuit = alsvid_ir::Circuit::ghz(4).unwrap();
    let compiled = compile_circuit(&PassCompiler::new(), &circuit).unwrap();

    let executor = NoisyExecutor::new(0.05).unwrap();
    let config = ZneConfig::default();

    let uncompiled = compare("uncompiled", &circuit, &executor, &config).unwrap();
    let compiled = compare("compiled", &compiled, &executor, &config).unwrap();

    // Both variants implement the same unitary.
    assert!((uncompiled.ideal - compiled.ideal).abs() < 1e-9);

    // Mitigation improves on the raw noisy value for both variants.
    assert!(uncompiled.error() < (uncompiled.ideal - uncompiled.noisy).abs());
    assert!(compiled.error() < (compiled.ideal - compiled.noisy).abs());

    let report = format_report(&[uncompiled, compiled]);
    assert!(report.contains("uncompiled"));
    assert!(report.contains("mitigated"));
    assert_eq!(report.lines().count(), 6);
}
