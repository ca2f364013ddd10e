//! Closed-form interest formulas and APR/APY conversion. Rates are annual percentages.

use crate::app::finance::CompoundingFrequency;
use crate::domain::model::Report;
use crate::domain::ports::Reportable;
use serde::{Deserialize, Serialize};

/// Nominal APR compounded at `frequency` → effective annual yield, both in percent.
pub fn apr_to_apy(apr: f64, frequency: CompoundingFrequency) -> f64 {
    let r = apr / 100.0;
    let apy = match frequency.periods_per_year() {
        Some(m) => {
            let m = m as f64;
            (1.0 + r / m).powf(m) - 1.0
        }
        None => r.exp() - 1.0,
    };
    apy * 100.0
}

pub fn apy_to_apr(apy: f64, frequency: CompoundingFrequency) -> f64 {
    let y = apy / 100.0;
    let apr = match frequency.periods_per_year() {
        Some(m) => {
            let m = m as f64;
            m * ((1.0 + y).powf(1.0 / m) - 1.0)
        }
        None => (1.0 + y).ln(),
    };
    apr * 100.0
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompoundInterestInput {
    pub principal: f64,
    pub annual_rate: f64,
    pub compounding: CompoundingFrequency,
    pub years: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompoundInterestResult {
    pub final_amount: f64,
    pub interest_earned: f64,
    pub apy: f64,
}

pub fn calculate_compound_interest(input: &CompoundInterestInput) -> CompoundInterestResult {
    let r = input.annual_rate / 100.0;
    let t = input.years.max(0.0);
    let growth = match input.compounding.periods_per_year() {
        Some(m) => {
            let m = m as f64;
            (1.0 + r / m).powf(m * t)
        }
        None => (r * t).exp(),
    };
    let final_amount = input.principal * growth;

    CompoundInterestResult {
        final_amount,
        interest_earned: final_amount - input.principal,
        apy: apr_to_apy(input.annual_rate, input.compounding),
    }
}

impl Reportable for CompoundInterestResult {
    fn to_report(&self) -> Report {
        Report::new("Compound Interest")
            .line("final_amount", self.final_amount)
            .line("interest_earned", self.interest_earned)
            .line_with_unit("apy", self.apy, "%")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimpleInterestInput {
    pub principal: f64,
    pub annual_rate: f64,
    pub years: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimpleInterestResult {
    pub interest: f64,
    pub total_amount: f64,
}

pub fn calculate_simple_interest(input: &SimpleInterestInput) -> SimpleInterestResult {
    let interest = input.principal * input.annual_rate / 100.0 * input.years.max(0.0);
    SimpleInterestResult {
        interest,
        total_amount: input.principal + interest,
    }
}

impl Reportable for SimpleInterestResult {
    fn to_report(&self) -> Report {
        Report::new("Simple Interest")
            .line("interest", self.interest)
            .line("total_amount", self.total_amount)
    }
}
