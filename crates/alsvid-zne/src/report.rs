//! Side-by-side mitigation comparison reports.

use std::fmt::Write;

use serde::Serialize;

use alsvid_ir::Circuit;

use crate::error::ZneResult;
use crate::extrapolate::{zero_noise_extrapolate, ScaledExecutor, ZneConfig};

/// The measurements for one circuit variant.
#[derive(Debug, Clone, Serialize)]
pub struct ComparisonRecord {
    /// Column label, e.g. "uncompiled" or "compiled".
    pub label: String,
    /// Noiseless expectation value.
    pub ideal: f64,
    /// Expectation value at the native noise level.
    pub noisy: f64,
    /// Zero-noise extrapolated estimate.
    pub mitigated: f64,
    /// Circuit depth.
    pub depth: usize,
}

impl ComparisonRecord {
    /// Absolute mitigation error, |ideal - mitigated|.
    pub fn error(&self) -> f64 {
        (self.ideal - self.mitigated).abs()
    }
}

/// Measure one circuit variant: ideal, noisy and mitigated values.
///
/// The ideal value runs at scale 0 and the noisy value at scale 1, so a
/// single executor covers all three measurements.
pub fn compare(
    label: impl Into<String>,
    circuit: &Circuit,
    executor: &dyn ScaledExecutor,
    config: &ZneConfig,
) -> ZneResult<ComparisonRecord> {
    let ideal = executor.execute_scaled(circuit, 0.0)?;
    let noisy = executor.execute_scaled(circuit, 1.0)?;
    let mitigated = zero_noise_extrapolate(executor, circuit, config)?;

    Ok(ComparisonRecord {
        label: label.into(),
        ideal,
        noisy,
        mitigated,
        depth: circuit.depth(),
    })
}

const ROW_LABEL_WIDTH: usize = 10;
const COLUMN_WIDTH: usize = 12;

/// Format records as a fixed-width table.
///
/// One column per record; the rows are the ideal, noisy and mitigated
/// values, the absolute mitigation error and the circuit depth. Values
/// are printed with four decimals.
pub fn format_report(records: &[ComparisonRecord]) -> String {
    let mut out = String::new();

    let _ = write!(out, "{:<ROW_LABEL_WIDTH$}", "");
    for record in records {
        let _ = write!(out, "{:>COLUMN_WIDTH$}", record.label);
    }
    out.push('\n');

    let value_row = |out: &mut String, label: &str, values: &dyn Fn(&ComparisonRecord) -> f64| {
        let _ = write!(out, "{label:<ROW_LABEL_WIDTH$}");
        for record in records {
            let _ = write!(out, "{:>COLUMN_WIDTH$.4}", values(record));
        }
        out.push('\n');
    };

    value_row(&mut out, "ideal", &|r| r.ideal);
    value_row(&mut out, "noisy", &|r| r.noisy);
    value_row(&mut out, "mitigated", &|r| r.mitigated);
    value_row(&mut out, "error", &ComparisonRecord::error);

    let _ = write!(out, "{:<ROW_LABEL_WIDTH$}", "depth");
    for record in records {
        let _ = write!(out, "{:>COLUMN_WIDTH$}", record.depth);
    }
    out.push('\n');

    out
}
