//! Kitchen conversions: volume ↔ weight through ingredient densities, and oven temperatures.

use crate::app::conversion::units::{self, Category};
use crate::domain::model::Report;
use crate::domain::ports::Reportable;
use crate::utils::error::{CalcError, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

const LITRES_PER_CUP: f64 = 0.236_588_236_5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum Ingredient {
    Water,
    AllPurposeFlour,
    GranulatedSugar,
    BrownSugar,
    Butter,
    Milk,
    Honey,
    Rice,
    Oats,
    CocoaPowder,
    Salt,
}

impl Ingredient {
    /// 每一美制量杯的公克數
    pub fn grams_per_cup(self) -> f64 {
        match self {
            Ingredient::Water => 236.59,
            Ingredient::AllPurposeFlour => 125.0,
            Ingredient::GranulatedSugar => 200.0,
            Ingredient::BrownSugar => 220.0,
            Ingredient::Butter => 227.0,
            Ingredient::Milk => 245.0,
            Ingredient::Honey => 340.0,
            Ingredient::Rice => 185.0,
            Ingredient::Oats => 90.0,
            Ingredient::CocoaPowder => 100.0,
            Ingredient::Salt => 292.0,
        }
    }
}

impl FromStr for Ingredient {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_ascii_lowercase().replace([' ', '-'], "_");
        let ingredient = match normalized.as_str() {
            "water" => Ingredient::Water,
            "flour" | "all_purpose_flour" => Ingredient::AllPurposeFlour,
            "sugar" | "granulated_sugar" => Ingredient::GranulatedSugar,
            "brown_sugar" => Ingredient::BrownSugar,
            "butter" => Ingredient::Butter,
            "milk" => Ingredient::Milk,
            "honey" => Ingredient::Honey,
            "rice" => Ingredient::Rice,
            "oats" => Ingredient::Oats,
            "cocoa" | "cocoa_powder" => Ingredient::CocoaPowder,
            "salt" => Ingredient::Salt,
            _ => {
                return Err(CalcError::UnknownUnit {
                    unit: s.to_string(),
                })
            }
        };
        Ok(ingredient)
    }
}

/// Convert between kitchen volumes and weights. Crossing volume/weight needs an ingredient.
pub fn convert_kitchen(
    value: f64,
    from: &str,
    to: &str,
    ingredient: Option<Ingredient>,
) -> Result<f64> {
    let from_unit = units::find_unit(from)?;
    let to_unit = units::find_unit(to)?;

    match (from_unit.category, to_unit.category, ingredient) {
        (a, b, _) if a == b => units::convert(value, from, to),
        (Category::Volume, Category::Mass, Some(ingredient)) => {
            let cups = from_unit.to_base(value) / LITRES_PER_CUP;
            let kilograms = cups * ingredient.grams_per_cup() / 1000.0;
            Ok(to_unit.from_base(kilograms))
        }
        (Category::Mass, Category::Volume, Some(ingredient)) => {
            let grams = from_unit.to_base(value) * 1000.0;
            let litres = grams / ingredient.grams_per_cup() * LITRES_PER_CUP;
            Ok(to_unit.from_base(litres))
        }
        _ => Err(CalcError::IncompatibleUnits {
            from: from_unit.symbol.to_string(),
            to: to_unit.symbol.to_string(),
        }),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KitchenConversion {
    pub value: f64,
    pub from: String,
    pub to: String,
    pub ingredient: Option<Ingredient>,
    pub result: f64,
}

pub fn kitchen_conversion(
    value: f64,
    from: &str,
    to: &str,
    ingredient: Option<Ingredient>,
) -> Result<KitchenConversion> {
    Ok(KitchenConversion {
        value,
        from: from.to_string(),
        to: to.to_string(),
        ingredient,
        result: convert_kitchen(value, from, to, ingredient)?,
    })
}

impl Reportable for KitchenConversion {
    fn to_report(&self) -> Report {
        let mut report = Report::new("Cooking Conversion")
            .line_with_unit("input", self.value, self.from.clone())
            .line_with_unit("result", self.result, self.to.clone());
        if let Some(ingredient) = self.ingredient {
            report = report.note(format!(
                "density: {} g per cup ({:?})",
                ingredient.grams_per_cup(),
                ingredient
            ));
        }
        report
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum OvenScale {
    Fahrenheit,
    Celsius,
    GasMark,
}

pub fn gas_mark_to_fahrenheit(mark: f64) -> f64 {
    if mark >= 1.0 {
        250.0 + 25.0 * mark
    } else {
        // ¼ → 225°F，½ → 250°F
        200.0 + 100.0 * mark.max(0.0)
    }
}

/// 取最接近的瓦斯爐刻度（¼、½、1–10）
pub fn fahrenheit_to_gas_mark(fahrenheit: f64) -> f64 {
    if fahrenheit >= 262.5 {
        ((fahrenheit - 250.0) / 25.0).round().clamp(1.0, 10.0)
    } else if fahrenheit >= 237.5 {
        0.5
    } else {
        0.25
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OvenTemperature {
    pub fahrenheit: f64,
    pub celsius: f64,
    pub gas_mark: f64,
}

pub fn oven_temperature(value: f64, scale: OvenScale) -> OvenTemperature {
    let fahrenheit = match scale {
        OvenScale::Fahrenheit => value,
        OvenScale::Celsius => value * 9.0 / 5.0 + 32.0,
        OvenScale::GasMark => gas_mark_to_fahrenheit(value),
    };
    OvenTemperature {
        fahrenheit,
        celsius: (fahrenheit - 32.0) * 5.0 / 9.0,
        gas_mark: fahrenheit_to_gas_mark(fahrenheit),
    }
}

impl Reportable for OvenTemperature {
    fn to_report(&self) -> Report {
        Report::new("Oven Temperature")
            .line_with_unit("fahrenheit", self.fahrenheit, "°F")
            .line_with_unit("celsius", self.celsius, "°C")
            .line("gas_mark", self.gas_mark)
    }
}
