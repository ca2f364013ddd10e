//! Million/billion converter, including the Indian lakh and crore.

use crate::domain::model::Report;
use crate::domain::ports::Reportable;
use crate::utils::error::{CalcError, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum ScaleUnit {
    One,
    Thousand,
    Lakh,
    Million,
    Crore,
    Billion,
    Trillion,
}

impl ScaleUnit {
    pub const ALL: [ScaleUnit; 7] = [
        ScaleUnit::One,
        ScaleUnit::Thousand,
        ScaleUnit::Lakh,
        ScaleUnit::Million,
        ScaleUnit::Crore,
        ScaleUnit::Billion,
        ScaleUnit::Trillion,
    ];

    pub fn factor(self) -> f64 {
        match self {
            ScaleUnit::One => 1.0,
            ScaleUnit::Thousand => 1e3,
            ScaleUnit::Lakh => 1e5,
            ScaleUnit::Million => 1e6,
            ScaleUnit::Crore => 1e7,
            ScaleUnit::Billion => 1e9,
            ScaleUnit::Trillion => 1e12,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ScaleUnit::One => "one",
            ScaleUnit::Thousand => "thousand",
            ScaleUnit::Lakh => "lakh",
            ScaleUnit::Million => "million",
            ScaleUnit::Crore => "crore",
            ScaleUnit::Billion => "billion",
            ScaleUnit::Trillion => "trillion",
        }
    }
}

impl FromStr for ScaleUnit {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self> {
        let unit = match s.trim().to_ascii_lowercase().as_str() {
            "one" | "unit" | "units" | "" => ScaleUnit::One,
            "thousand" | "k" => ScaleUnit::Thousand,
            "lakh" | "lac" | "lakhs" => ScaleUnit::Lakh,
            "million" | "mn" | "m" => ScaleUnit::Million,
            "crore" | "cr" | "crores" => ScaleUnit::Crore,
            "billion" | "bn" | "b" => ScaleUnit::Billion,
            "trillion" | "tn" | "t" => ScaleUnit::Trillion,
            other => {
                return Err(CalcError::UnknownUnit {
                    unit: other.to_string(),
                })
            }
        };
        Ok(unit)
    }
}

pub fn convert_scale(value: f64, from: ScaleUnit, to: ScaleUnit) -> f64 {
    value * from.factor() / to.factor()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScaleConversion {
    pub value: f64,
    pub from: ScaleUnit,
    pub absolute: f64,
    /// 以每種單位表示的數值
    pub expressed: Vec<(ScaleUnit, f64)>,
}

pub fn scale_conversion(value: f64, from: ScaleUnit) -> ScaleConversion {
    ScaleConversion {
        value,
        from,
        absolute: value * from.factor(),
        expressed: ScaleUnit::ALL
            .iter()
            .map(|&unit| (unit, convert_scale(value, from, unit)))
            .collect(),
    }
}

impl Reportable for ScaleConversion {
    fn to_report(&self) -> Report {
        self.expressed.iter().fold(
            Report::new("Number Scale").line("absolute", self.absolute),
            |report, (unit, value)| report.line(unit.name(), *value),
        )
    }
}
