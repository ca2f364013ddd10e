use super::UnitSystem;
use crate::domain::model::Report;
use crate::domain::ports::Reportable;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl BmiCategory {
    pub fn from_bmi(bmi: f64) -> Self {
        if bmi < 18.5 {
            BmiCategory::Underweight
        } else if bmi < 25.0 {
            BmiCategory::Normal
        } else if bmi < 30.0 {
            BmiCategory::Overweight
        } else {
            BmiCategory::Obese
        }
    }
}

/// `weight` is kg or lb, `height` is cm or inches depending on `system`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BmiInput {
    pub weight: f64,
    pub height: f64,
    pub system: UnitSystem,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BmiResult {
    pub bmi: f64,
    pub category: BmiCategory,
    /// 正常 BMI（18.5–24.9）對應的體重範圍，單位同輸入
    pub healthy_weight_min: f64,
    pub healthy_weight_max: f64,
}

pub fn calculate_bmi(input: &BmiInput) -> BmiResult {
    let (factor, height) = match input.system {
        UnitSystem::Metric => (1.0, input.height / 100.0),
        UnitSystem::Imperial => (703.0, input.height),
    };

    let squared = height * height;
    let bmi = if squared > 0.0 {
        factor * input.weight / squared
    } else {
        0.0
    };

    BmiResult {
        bmi,
        category: BmiCategory::from_bmi(bmi),
        healthy_weight_min: 18.5 * squared / factor,
        healthy_weight_max: 24.9 * squared / factor,
    }
}

impl Reportable for BmiResult {
    fn to_report(&self) -> Report {
        Report::new("BMI")
            .line("bmi", self.bmi)
            .line("healthy_weight_min", self.healthy_weight_min)
            .line("healthy_weight_max", self.healthy_weight_max)
            .note(format!("category: {:?}", self.category))
    }
}
