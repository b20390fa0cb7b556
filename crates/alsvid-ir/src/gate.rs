//! Quantum gate types.

use serde::{Deserialize, Serialize};

use crate::parameter::ParameterExpression;

/// Standard gates with known semantics.
///
/// The set is the one-and-two-qubit subset of the common OpenQASM
/// vocabulary. Every gate here has an exact decomposition into the
/// `{u, cx}` target basis used by the compiler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StandardGate {
    // Single-qubit Pauli gates
    /// Identity gate.
    I,
    /// Pauli-X gate.
    X,
    /// Pauli-Y gate.
    Y,
    /// Pauli-Z gate.
    Z,

    // Single-qubit Clifford gates
    /// Hadamard gate.
    H,
    /// S gate (sqrt(Z)).
    S,
    /// S-dagger gate.
    Sdg,
    /// T gate (fourth root of Z).
    T,
    /// T-dagger gate.
    Tdg,
    /// sqrt(X) gate.
    SX,
    /// sqrt(X)-dagger gate.
    SXdg,

    // Single-qubit rotation gates
    /// Rotation around X axis.
    Rx(ParameterExpression),
    /// Rotation around Y axis.
    Ry(ParameterExpression),
    /// Rotation around Z axis.
    Rz(ParameterExpression),
    /// Phase gate.
    P(ParameterExpression),
    /// Universal single-qubit gate U(θ, φ, λ).
    U(
        ParameterExpression,
        ParameterExpression,
        ParameterExpression,
    ),

    // Two-qubit gates
    /// Controlled-X (CNOT) gate.
    CX,
    /// Controlled-Y gate.
    CY,
    /// Controlled-Z gate.
    CZ,
    /// SWAP gate.
    Swap,
    /// Controlled rotation around Z.
    CRz(ParameterExpression),
    /// Controlled phase gate.
    CP(ParameterExpression),
}

impl StandardGate {
    /// Get the name of this gate.
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            StandardGate::I => "id",
            StandardGate::X => "x",
            StandardGate::Y => "y",
            StandardGate::Z => "z",
            StandardGate::H => "h",
            StandardGate::S => "s",
            StandardGate::Sdg => "sdg",
            StandardGate::T => "t",
            StandardGate::Tdg => "tdg",
            StandardGate::SX => "sx",
            StandardGate::SXdg => "sxdg",
            StandardGate::Rx(_) => "rx",
            StandardGate::Ry(_) => "ry",
            StandardGate::Rz(_) => "rz",
            StandardGate::P(_) => "p",
            StandardGate::U(_, _, _) => "u",
            StandardGate::CX => "cx",
            StandardGate::CY => "cy",
            StandardGate::CZ => "cz",
            StandardGate::Swap => "swap",
            StandardGate::CRz(_) => "crz",
            StandardGate::CP(_) => "cp",
        }
    }

    /// Get the number of qubits this gate operates on.
    #[inline]
    pub fn num_qubits(&self) -> u32 {
        match self {
            StandardGate::I
            | StandardGate::X
            | StandardGate::Y
            | StandardGate::Z
            | StandardGate::H
            | StandardGate::S
            | StandardGate::Sdg
            | StandardGate::T
            | StandardGate::Tdg
            | StandardGate::SX
            | StandardGate::SXdg
            | StandardGate::Rx(_)
            | StandardGate::Ry(_)
            | StandardGate::Rz(_)
            | StandardGate::P(_)
            | StandardGate::U(_, _, _) => 1,

            StandardGate::CX
            | StandardGate::CY
            | StandardGate::CZ
            | StandardGate::Swap
            | StandardGate::CRz(_)
            | StandardGate::CP(_) => 2,
        }
    }

    /// Check if this gate has unbound symbolic parameters.
    pub fn is_symbolic(&self) -> bool {
        self.parameters().iter().any(|p| p.is_symbolic())
    }

    /// Get parameters of this gate.
    pub fn parameters(&self) -> Vec<&ParameterExpression> {
        match self {
            StandardGate::Rx(p)
            | StandardGate::Ry(p)
            | StandardGate::Rz(p)
            | StandardGate::P(p)
            | StandardGate::CRz(p)
            | StandardGate::CP(p) => vec![p],

            StandardGate::U(a, b, c) => vec![a, b, c],

            _ => vec![],
        }
    }

    /// The inverse gate, if it is itself a standard gate in this set.
    ///
    /// Used by the inverse-cancellation pass; parameterized gates are
    /// left out deliberately (comparing angle expressions for equality
    /// is not meaningful across a parse round-trip).
    pub fn inverse(&self) -> Option<StandardGate> {
        match self {
            StandardGate::I => Some(StandardGate::I),
            StandardGate::X => Some(StandardGate::X),
            StandardGate::Y => Some(StandardGate::Y),
            StandardGate::Z => Some(StandardGate::Z),
            StandardGate::H => Some(StandardGate::H),
            StandardGate::S => Some(StandardGate::Sdg),
            StandardGate::Sdg => Some(StandardGate::S),
            StandardGate::T => Some(StandardGate::Tdg),
            StandardGate::Tdg => Some(StandardGate::T),
            StandardGate::SX => Some(StandardGate::SXdg),
            StandardGate::SXdg => Some(StandardGate::SX),
            StandardGate::CX => Some(StandardGate::CX),
            StandardGate::CY => Some(StandardGate::CY),
            StandardGate::CZ => Some(StandardGate::CZ),
            StandardGate::Swap => Some(StandardGate::Swap),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_gate_properties() {
        assert_eq!(StandardGate::H.num_qubits(), 1);
        assert_eq!(StandardGate::CX.num_qubits(), 2);
        assert_eq!(StandardGate::H.name(), "h");
        assert_eq!(StandardGate::CP(PI.into()).name(), "cp");
    }

    #[test]
    fn test_symbolic() {
        assert!(!StandardGate::Rx(ParameterExpression::constant(PI)).is_symbolic());
        assert!(StandardGate::Rx(ParameterExpression::symbol("theta")).is_symbolic());
    }

    #[test]
    fn test_inverse_pairs() {
        assert_eq!(StandardGate::S.inverse(), Some(StandardGate::Sdg));
        assert_eq!(StandardGate::Sdg.inverse(), Some(StandardGate::S));
        assert_eq!(StandardGate::CX.inverse(), Some(StandardGate::CX));
        assert_eq!(StandardGate::Rx(PI.into()).inverse(), None);
    }
}
