//! Calories burned from MET values: `kcal = MET × kg × hours`.

use super::{UnitSystem, KG_PER_LB};
use crate::domain::model::Report;
use crate::domain::ports::Reportable;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum Activity {
    Walking,
    BriskWalking,
    Running,
    Cycling,
    Swimming,
    Yoga,
    WeightLifting,
    Hiking,
    Dancing,
    Rowing,
    JumpRope,
}

impl Activity {
    pub fn met(self) -> f64 {
        match self {
            Activity::Walking => 3.5,
            Activity::BriskWalking => 4.3,
            Activity::Running => 9.8,
            Activity::Cycling => 7.5,
            Activity::Swimming => 8.0,
            Activity::Yoga => 2.5,
            Activity::WeightLifting => 6.0,
            Activity::Hiking => 6.0,
            Activity::Dancing => 5.0,
            Activity::Rowing => 7.0,
            Activity::JumpRope => 12.3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaloriesInput {
    pub weight: f64,
    pub system: UnitSystem,
    pub minutes: f64,
    pub activity: Option<Activity>,
    /// 自訂 MET 值，優先於 `activity`
    pub custom_met: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaloriesResult {
    pub met: f64,
    pub calories: f64,
    pub calories_per_minute: f64,
}

pub fn calculate_calories(input: &CaloriesInput) -> CaloriesResult {
    let met = input
        .custom_met
        .filter(|met| *met > 0.0)
        .or(input.activity.map(Activity::met))
        .unwrap_or(0.0);
    let kg = match input.system {
        UnitSystem::Metric => input.weight,
        UnitSystem::Imperial => input.weight * KG_PER_LB,
    };
    let minutes = input.minutes.max(0.0);
    let calories = met * kg.max(0.0) * minutes / 60.0;

    CaloriesResult {
        met,
        calories,
        calories_per_minute: if minutes > 0.0 { calories / minutes } else { 0.0 },
    }
}

impl Reportable for CaloriesResult {
    fn to_report(&self) -> Report {
        Report::new("Calories Burned")
            .line("met", self.met)
            .line_with_unit("calories", self.calories, "kcal")
            .line_with_unit("calories_per_minute", self.calories_per_minute, "kcal/min")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_running_half_hour() {
        let result = calculate_calories(&CaloriesInput {
            weight: 70.0,
            system: UnitSystem::Metric,
            minutes: 30.0,
            activity: Some(Activity::Running),
            custom_met: None,
        });
        assert!((result.calories - 343.0).abs() < 1e-9);
    }

    #[test]
    fn test_custom_met_overrides_activity() {
        let result = calculate_calories(&CaloriesInput {
            weight: 100.0,
            system: UnitSystem::Metric,
            minutes: 60.0,
            activity: Some(Activity::Yoga),
            custom_met: Some(4.0),
        });
        assert_eq!(result.met, 4.0);
        assert!((result.calories - 400.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_minutes() {
        let result = calculate_calories(&CaloriesInput {
            weight: 80.0,
            system: UnitSystem::Imperial,
            minutes: 0.0,
            activity: Some(Activity::Cycling),
            custom_met: None,
        });
        assert_eq!(result.calories, 0.0);
        assert_eq!(result.calories_per_minute, 0.0);
    }
}
