//! Basal metabolic rate (Mifflin-St Jeor) and total daily energy expenditure.

use super::{UnitSystem, CM_PER_IN, KG_PER_LB};
use crate::domain::model::Report;
use crate::domain::ports::Reportable;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum Sex {
    #[default]
    Male,
    Female,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum ActivityLevel {
    #[default]
    Sedentary,
    Light,
    Moderate,
    Active,
    VeryActive,
}

impl ActivityLevel {
    pub fn multiplier(self) -> f64 {
        match self {
            ActivityLevel::Sedentary => 1.2,
            ActivityLevel::Light => 1.375,
            ActivityLevel::Moderate => 1.55,
            ActivityLevel::Active => 1.725,
            ActivityLevel::VeryActive => 1.9,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BmrInput {
    pub weight: f64,
    pub height: f64,
    pub age: f64,
    pub sex: Sex,
    pub activity: ActivityLevel,
    pub system: UnitSystem,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BmrResult {
    pub bmr: f64,
    pub tdee: f64,
}

pub fn calculate_bmr(input: &BmrInput) -> BmrResult {
    let (kg, cm) = match input.system {
        UnitSystem::Metric => (input.weight, input.height),
        UnitSystem::Imperial => (input.weight * KG_PER_LB, input.height * CM_PER_IN),
    };

    let base = 10.0 * kg + 6.25 * cm - 5.0 * input.age;
    let bmr = match input.sex {
        Sex::Male => base + 5.0,
        Sex::Female => base - 161.0,
    }
    .max(0.0);

    BmrResult {
        bmr,
        tdee: bmr * input.activity.multiplier(),
    }
}

impl Reportable for BmrResult {
    fn to_report(&self) -> Report {
        Report::new("BMR")
            .line_with_unit("bmr", self.bmr, "kcal/day")
            .line_with_unit("tdee", self.tdee, "kcal/day")
    }
}
