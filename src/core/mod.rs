pub mod engine;
pub mod schedule;

pub use crate::domain::model::{PeriodRecord, Report, Schedule, Table, Termination};
pub use crate::domain::ports::{ConfigProvider, RateProvider, Reportable, Storage};
pub use crate::utils::error::Result;
