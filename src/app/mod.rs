// Application layer: the calculators themselves. Each module is independent.

pub mod conversion;
#[cfg(feature = "cli")]
pub mod dispatch;
pub mod finance;
pub mod fitness;
