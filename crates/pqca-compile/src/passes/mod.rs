//! Built-in compilation passes.

mod cancellation;
mod optimize_1q;
mod translation;
mod verification;

pub use cancellation::InverseCancellation;
pub use optimize_1q::Optimize1qGates;
pub use translation::BasisTranslation;
pub use verification::MeasurementVerification;
