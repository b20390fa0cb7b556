//! Pass trait for circuit transformations.

use alsvid_ir::Circuit;

use crate::error::CompileResult;

/// A compilation pass that rewrites a circuit in place.
///
/// Passes are the fundamental unit of compilation. Each pass performs
/// one transformation over the instruction sequence and reports whether
/// it changed anything.
pub trait Pass: Send + Sync {
    /// Get the name of this pass.
    fn name(&self) -> &str;

    /// Run the pass on the given circuit.
    ///
    /// Returns `true` if the circuit was modified.
    fn run(&self, circuit: &mut Circuit) -> CompileResult<bool>;

    /// Check if this pass should run on the given circuit.
    ///
    /// This can be overridden to skip passes that are not needed.
    fn should_run(&self, _circuit: &Circuit) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NoopPass;

    impl Pass for NoopPass {
        fn name(&self) -> &'static str {
            "noop"
        }

        fn run(&self, _circuit: &mut Circuit) -> CompileResult<bool> {
            Ok(false)
        }
    }

    #[test]
    fn test_default_should_run() {
        let pass = NoopPass;
        assert!(pass.should_run(&Circuit::new("test")));
        assert_eq!(pass.name(), "noop");
    }
}
