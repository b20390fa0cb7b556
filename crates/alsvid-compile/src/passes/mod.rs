//! Compilation passes.

mod basis;
mod cancel;

pub use basis::BasisTranslation;
pub use cancel::InverseCancellation;
