//! Pass manager for orchestrating compilation.

use tracing::{debug, info, instrument};

use alsvid_ir::Circuit;

use crate::error::CompileResult;
use crate::pass::Pass;
use crate::passes::{BasisTranslation, InverseCancellation};

/// Manages and executes a sequence of compilation passes.
pub struct PassManager {
    /// The passes to execute, in order.
    passes: Vec<Box<dyn Pass>>,
}

impl PassManager {
    /// Create a new empty pass manager.
    pub fn new() -> Self {
        Self { passes: vec![] }
    }

    /// Create a pass manager with the standard pipeline.
    ///
    /// Inverse cancellation runs before basis translation so that
    /// self-cancelling pairs disappear while the named gates are still
    /// recognizable.
    pub fn standard() -> Self {
        let mut pm = Self::new();
        pm.add_pass(InverseCancellation);
        pm.add_pass(BasisTranslation);
        pm
    }

    /// Add a pass to the manager.
    pub fn add_pass(&mut self, pass: impl Pass + 'static) {
        self.passes.push(Box::new(pass));
    }

    /// Run all passes on the given circuit.
    #[instrument(skip(self, circuit))]
    pub fn run(&self, circuit: &mut Circuit) -> CompileResult<()> {
        info!(
            "Running pass manager with {} passes on circuit with {} qubits",
            self.passes.len(),
            circuit.num_qubits()
        );

        for pass in &self.passes {
            if pass.should_run(circuit) {
                debug!("Running pass: {}", pass.name());
                let changed = pass.run(circuit)?;
                debug!(
                    "Pass {} completed, changed: {changed}, ops: {}",
                    pass.name(),
                    circuit.num_ops()
                );
            } else {
                debug!("Skipping pass: {}", pass.name());
            }
        }

        info!(
            "Pass manager completed, final depth: {}, ops: {}",
            circuit.depth(),
            circuit.num_ops()
        );

        Ok(())
    }

    /// Get the number of passes.
    pub fn len(&self) -> usize {
        self.passes.len()
    }

    /// Check if the manager has no passes.
    pub fn is_empty(&self) -> bool {
        self.passes.is_empty()
    }
}

impl Default for PassManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alsvid_ir::QubitId;

    #[test]
    fn test_empty_pass_manager() {
        let pm = PassManager::new();
        assert!(pm.is_empty());
        assert_eq!(pm.len(), 0);
    }

    #[test]
    fn test_empty_manager_leaves_circuit_alone() {
        let pm = PassManager::new();
        let mut circuit = Circuit::with_size("test", 2, 0);
        circuit.h(QubitId(0)).unwrap();
        circuit.cx(QubitId(0), QubitId(1)).unwrap();

        pm.run(&mut circuit).unwrap();
        assert_eq!(circuit.num_ops(), 2);
    }

    #[test]
    fn test_standard_pipeline() {
        let pm = PassManager::standard();
        assert_eq!(pm.len(), 2);

        let mut circuit = Circuit::with_size("test", 2, 0);
        circuit.h(QubitId(0)).unwrap();
        circuit.swap(QubitId(0), QubitId(1)).unwrap();

        pm.run(&mut circuit).unwrap();
        assert!(circuit
            .iter()
            .all(|i| matches!(i.name(), "u" | "cx")));
    }
}
