pub mod bmi;
pub mod bmr;
pub mod calories;
pub mod pace;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum UnitSystem {
    #[default]
    Metric,
    Imperial,
}

pub(crate) const KG_PER_LB: f64 = 0.453_592_37;
pub(crate) const CM_PER_IN: f64 = 2.54;
