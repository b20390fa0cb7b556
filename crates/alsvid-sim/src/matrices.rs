//! Unitary matrices for the standard gate set.

use ndarray::{array, Array2};
use num_complex::Complex64;
use std::f64::consts::FRAC_1_SQRT_2;

use alsvid_ir::{ParameterExpression, StandardGate};

use crate::error::{SimError, SimResult};

fn c(re: f64, im: f64) -> Complex64 {
    Complex64::new(re, im)
}

fn r(re: f64) -> Complex64 {
    Complex64::new(re, 0.0)
}

fn eval(gate: &StandardGate, param: &ParameterExpression) -> SimResult<f64> {
    param.as_f64().ok_or_else(|| SimError::UnboundParameter {
        gate: gate.name().to_string(),
    })
}

/// Get the unitary matrix of a standard gate.
///
/// Single-qubit gates yield a 2x2 matrix, two-qubit gates a 4x4 matrix.
/// Bit `k` of the matrix index corresponds to the gate's `k`-th operand,
/// so for controlled gates the control is the least significant bit.
///
/// # Errors
///
/// Returns [`SimError::UnboundParameter`] when a gate angle contains an
/// unbound symbol.
pub fn gate_matrix(gate: &StandardGate) -> SimResult<Array2<Complex64>> {
    let matrix = match gate {
        StandardGate::I => array![[r(1.0), r(0.0)], [r(0.0), r(1.0)]],
        StandardGate::X => array![[r(0.0), r(1.0)], [r(1.0), r(0.0)]],
        StandardGate::Y => array![[c(0.0, 0.0), c(0.0, -1.0)], [c(0.0, 1.0), c(0.0, 0.0)]],
        StandardGate::Z => array![[r(1.0), r(0.0)], [r(0.0), r(-1.0)]],
        StandardGate::H => array![
            [r(FRAC_1_SQRT_2), r(FRAC_1_SQRT_2)],
            [r(FRAC_1_SQRT_2), r(-FRAC_1_SQRT_2)]
        ],
        StandardGate::S => array![[r(1.0), r(0.0)], [r(0.0), c(0.0, 1.0)]],
        StandardGate::Sdg => array![[r(1.0), r(0.0)], [r(0.0), c(0.0, -1.0)]],
        StandardGate::T => array![
            [r(1.0), r(0.0)],
            [r(0.0), c(FRAC_1_SQRT_2, FRAC_1_SQRT_2)]
        ],
        StandardGate::Tdg => array![
            [r(1.0), r(0.0)],
            [r(0.0), c(FRAC_1_SQRT_2, -FRAC_1_SQRT_2)]
        ],
        StandardGate::SX => array![
            [c(0.5, 0.5), c(0.5, -0.5)],
            [c(0.5, -0.5), c(0.5, 0.5)]
        ],
        StandardGate::SXdg => array![
            [c(0.5, -0.5), c(0.5, 0.5)],
            [c(0.5, 0.5), c(0.5, -0.5)]
        ],
        StandardGate::Rx(theta) => {
            let half = eval(gate, theta)? / 2.0;
            array![
                [r(half.cos()), c(0.0, -half.sin())],
                [c(0.0, -half.sin()), r(half.cos())]
            ]
        }
        StandardGate::Ry(theta) => {
            let half = eval(gate, theta)? / 2.0;
            array![
                [r(half.cos()), r(-half.sin())],
                [r(half.sin()), r(half.cos())]
            ]
        }
        StandardGate::Rz(theta) => {
            let half = eval(gate, theta)? / 2.0;
            array![
                [Complex64::from_polar(1.0, -half), r(0.0)],
                [r(0.0), Complex64::from_polar(1.0, half)]
            ]
        }
        StandardGate::P(theta) => {
            let angle = eval(gate, theta)?;
            array![
                [r(1.0), r(0.0)],
                [r(0.0), Complex64::from_polar(1.0, angle)]
            ]
        }
        StandardGate::U(theta, phi, lambda) => {
            let theta = eval(gate, theta)?;
            let phi = eval(gate, phi)?;
            let lambda = eval(gate, lambda)?;
            let (sin, cos) = (theta / 2.0).sin_cos();
            array![
                [r(cos), -Complex64::from_polar(sin, lambda)],
                [
                    Complex64::from_polar(sin, phi),
                    Complex64::from_polar(cos, phi + lambda)
                ]
            ]
        }

        // Two-qubit gates. The control is bit 0 of the index.
        StandardGate::CX => {
            let mut m = Array2::zeros((4, 4));
            m[(0, 0)] = r(1.0);
            m[(3, 1)] = r(1.0);
            m[(2, 2)] = r(1.0);
            m[(1, 3)] = r(1.0);
            m
        }
        StandardGate::CY => {
            let mut m = Array2::zeros((4, 4));
            m[(0, 0)] = r(1.0);
            m[(3, 1)] = c(0.0, 1.0);
            m[(2, 2)] = r(1.0);
            m[(1, 3)] = c(0.0, -1.0);
            m
        }
        StandardGate::CZ => Array2::from_diag(&ndarray::arr1(&[
            r(1.0),
            r(1.0),
            r(1.0),
            r(-1.0),
        ])),
        StandardGate::Swap => {
            let mut m = Array2::zeros((4, 4));
            m[(0, 0)] = r(1.0);
            m[(2, 1)] = r(1.0);
            m[(1, 2)] = r(1.0);
            m[(3, 3)] = r(1.0);
            m
        }
        StandardGate::CRz(theta) => {
            let half = eval(gate, theta)? / 2.0;
            Array2::from_diag(&ndarray::arr1(&[
                r(1.0),
                Complex64::from_polar(1.0, -half),
                r(1.0),
                Complex64::from_polar(1.0, half),
            ]))
        }
        StandardGate::CP(theta) => {
            let angle = eval(gate, theta)?;
            Array2::from_diag(&ndarray::arr1(&[
                r(1.0),
                r(1.0),
                r(1.0),
                Complex64::from_polar(1.0, angle),
            ]))
        }
    };
    Ok(matrix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn is_unitary(m: &Array2<Complex64>) -> bool {
        let dim = m.nrows();
        let mut product = Array2::<Complex64>::zeros((dim, dim));
        for i in 0..dim {
            for j in 0..dim {
                let mut sum = c(0.0, 0.0);
                for k in 0..dim {
                    sum += m[(k, i)].conj() * m[(k, j)];
                }
                product[(i, j)] = sum;
            }
        }
        (0..dim).all(|i| {
            (0..dim).all(|j| {
                let expected = if i == j { 1.0 } else { 0.0 };
                (product[(i, j)] - r(expected)).norm() < 1e-12
            })
        })
    }

    #[test]
    fn test_all_fixed_gates_unitary() {
        let gates = [
            StandardGate::I,
            StandardGate::X,
            StandardGate::Y,
            StandardGate::Z,
            StandardGate::H,
            StandardGate::S,
            StandardGate::Sdg,
            StandardGate::T,
            StandardGate::Tdg,
            StandardGate::SX,
            StandardGate::SXdg,
            StandardGate::CX,
            StandardGate::CY,
            StandardGate::CZ,
            StandardGate::Swap,
        ];
        for gate in gates {
            assert!(is_unitary(&gate_matrix(&gate).unwrap()), "{}", gate.name());
        }
    }

    #[test]
    fn test_parameterized_gates_unitary() {
        for gate in [
            StandardGate::Rx(0.7.into()),
            StandardGate::Ry(1.3.into()),
            StandardGate::Rz(2.1.into()),
            StandardGate::P(0.4.into()),
            StandardGate::U(0.5.into(), 1.0.into(), 1.5.into()),
            StandardGate::CRz(0.9.into()),
            StandardGate::CP(2.3.into()),
        ] {
            assert!(is_unitary(&gate_matrix(&gate).unwrap()), "{}", gate.name());
        }
    }

    #[test]
    fn test_cx_flips_target_when_control_set() {
        // Control is bit 0: input index 1 maps to index 3.
        let m = gate_matrix(&StandardGate::CX).unwrap();
        assert_eq!(m[(3, 1)], r(1.0));
        assert_eq!(m[(1, 3)], r(1.0));
        assert_eq!(m[(2, 2)], r(1.0));
        assert_eq!(m[(3, 3)], r(0.0));
    }

    #[test]
    fn test_u_matches_named_gates() {
        let x = gate_matrix(&StandardGate::X).unwrap();
        let u = gate_matrix(&StandardGate::U(
            PI.into(),
            0.0.into(),
            PI.into(),
        ))
        .unwrap();
        for i in 0..2 {
            for j in 0..2 {
                assert!((x[(i, j)] - u[(i, j)]).norm() < 1e-12);
            }
        }
    }

    #[test]
    fn test_unbound_symbol_rejected() {
        let gate = StandardGate::Rx(ParameterExpression::symbol("theta"));
        assert!(matches!(
            gate_matrix(&gate),
            Err(SimError::UnboundParameter { .. })
        ));
    }
}
