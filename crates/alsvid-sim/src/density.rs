//! Density matrix representation and channel primitives.

use ndarray::Array2;
use num_complex::Complex64;

use alsvid_ir::QubitId;

/// A density matrix over `n` qubits.
///
/// The matrix is dense with dimension `2^n`, so memory grows as `4^n`.
/// Qubit `k` is bit `k` of the basis index; the all-zeros state is the
/// top-left element.
#[derive(Debug, Clone)]
pub struct DensityMatrix {
    data: Array2<Complex64>,
    num_qubits: usize,
}

impl DensityMatrix {
    /// Create the pure state |0...0⟩⟨0...0|.
    pub fn new(num_qubits: usize) -> Self {
        let dim = 1usize << num_qubits;
        let mut data = Array2::zeros((dim, dim));
        data[(0, 0)] = Complex64::new(1.0, 0.0);
        Self { data, num_qubits }
    }

    /// Number of qubits.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Matrix dimension, `2^n`.
    pub fn dim(&self) -> usize {
        1 << self.num_qubits
    }

    /// The matrix element at `(row, col)`.
    pub fn element(&self, row: usize, col: usize) -> Complex64 {
        self.data[(row, col)]
    }

    /// The population of the all-zeros basis state.
    pub fn ground_state_population(&self) -> f64 {
        self.data[(0, 0)].re
    }

    /// The trace of the matrix. Stays 1 under every channel here.
    pub fn trace(&self) -> Complex64 {
        (0..self.dim()).map(|i| self.data[(i, i)]).sum()
    }

    /// Apply a unitary to the given qubits: ρ → UρU†.
    ///
    /// The matrix dimension must be `2^k` for `k` target qubits, with
    /// bit `k` of the matrix index addressing `qubits[k]`.
    pub fn apply_unitary(&mut self, u: &Array2<Complex64>, qubits: &[QubitId]) {
        let targets = self.bit_positions(qubits);
        transform_rows(&mut self.data, u, &targets);
        transform_cols(&mut self.data, u, &targets);
    }

    /// Apply a general channel from its Kraus operators: ρ → Σ KρK†.
    pub fn apply_kraus(&mut self, operators: &[Array2<Complex64>], qubits: &[QubitId]) {
        let targets = self.bit_positions(qubits);
        let mut acc: Array2<Complex64> = Array2::zeros(self.data.raw_dim());
        for k in operators {
            let mut term = self.data.clone();
            transform_rows(&mut term, k, &targets);
            transform_cols(&mut term, k, &targets);
            acc += &term;
        }
        self.data = acc;
    }

    /// Apply a depolarizing channel on the given qubits.
    ///
    /// With probability `p` the targets are replaced by the maximally
    /// mixed state: ρ → (1-p)ρ + p · Tr_targets(ρ) ⊗ I/2^k.
    pub fn depolarize(&mut self, qubits: &[QubitId], p: f64) {
        debug_assert!((0.0..=1.0).contains(&p));
        let targets = self.bit_positions(qubits);
        let m = 1usize << targets.len();
        let mask = spread_mask(&targets);
        let offsets = spread_offsets(&targets);
        let dim = self.dim();

        let old = self.data.clone();
        let keep = Complex64::new(1.0 - p, 0.0);
        self.data.mapv_inplace(|v| v * keep);

        #[allow(clippy::cast_precision_loss)]
        let weight = Complex64::new(p / m as f64, 0.0);
        for rbase in 0..dim {
            if rbase & mask != 0 {
                continue;
            }
            for cbase in 0..dim {
                if cbase & mask != 0 {
                    continue;
                }
                let mut partial = Complex64::new(0.0, 0.0);
                for &off in &offsets {
                    partial += old[(rbase | off, cbase | off)];
                }
                let add = partial * weight;
                for &off in &offsets {
                    self.data[(rbase | off, cbase | off)] += add;
                }
            }
        }
    }

    /// Apply a probabilistic unitary error: ρ → (1-p)ρ + p UρU†.
    ///
    /// Covers bit-flip (U = X) and phase-flip (U = Z) channels.
    pub fn mix_unitary(&mut self, u: &Array2<Complex64>, qubits: &[QubitId], p: f64) {
        debug_assert!((0.0..=1.0).contains(&p));
        let mut flipped = self.clone();
        flipped.apply_unitary(u, qubits);

        let keep = Complex64::new(1.0 - p, 0.0);
        let mix = Complex64::new(p, 0.0);
        ndarray::Zip::from(&mut self.data)
            .and(&flipped.data)
            .for_each(|a, &b| *a = *a * keep + b * mix);
    }

    fn bit_positions(&self, qubits: &[QubitId]) -> Vec<usize> {
        qubits
            .iter()
            .map(|q| {
                let bit = q.0 as usize;
                debug_assert!(bit < self.num_qubits);
                bit
            })
            .collect()
    }
}

fn spread_mask(targets: &[usize]) -> usize {
    targets.iter().map(|&t| 1usize << t).sum()
}

/// For each `s` in `0..2^k`, the basis offset with bit `i` of `s` placed
/// at bit position `targets[i]`.
fn spread_offsets(targets: &[usize]) -> Vec<usize> {
    let m = 1usize << targets.len();
    (0..m)
        .map(|s| {
            let mut idx = 0usize;
            for (i, &t) in targets.iter().enumerate() {
                if (s >> i) & 1 == 1 {
                    idx |= 1 << t;
                }
            }
            idx
        })
        .collect()
}

/// Left-multiply by `u` within the target subspace: data → U · data.
fn transform_rows(data: &mut Array2<Complex64>, u: &Array2<Complex64>, targets: &[usize]) {
    let dim = data.nrows();
    let m = 1usize << targets.len();
    debug_assert_eq!(u.nrows(), m);
    let mask = spread_mask(targets);
    let offsets = spread_offsets(targets);
    let mut scratch = vec![Complex64::new(0.0, 0.0); m];

    for base in 0..dim {
        if base & mask != 0 {
            continue;
        }
        for col in 0..dim {
            for (s, slot) in scratch.iter_mut().enumerate() {
                *slot = data[(base | offsets[s], col)];
            }
            for s in 0..m {
                let mut sum = Complex64::new(0.0, 0.0);
                for (t, &v) in scratch.iter().enumerate() {
                    sum += u[(s, t)] * v;
                }
                data[(base | offsets[s], col)] = sum;
            }
        }
    }
}

/// Right-multiply by `u†` within the target subspace: data → data · U†.
fn transform_cols(data: &mut Array2<Complex64>, u: &Array2<Complex64>, targets: &[usize]) {
    let dim = data.nrows();
    let m = 1usize << targets.len();
    let mask = spread_mask(targets);
    let offsets = spread_offsets(targets);
    let mut scratch = vec![Complex64::new(0.0, 0.0); m];

    for base in 0..dim {
        if base & mask != 0 {
            continue;
        }
        for row in 0..dim {
            for (s, slot) in scratch.iter_mut().enumerate() {
                *slot = data[(row, base | offsets[s])];
            }
            for s in 0..m {
                let mut sum = Complex64::new(0.0, 0.0);
                for (t, &v) in scratch.iter().enumerate() {
                    sum += u[(s, t)].conj() * v;
                }
                data[(row, base | offsets[s])] = sum;
            }
        }
    }
}
