//! Systematic investment plan: a fixed amount invested at the start of every month.

use crate::app::finance::truncation_note;
use crate::core::schedule::{self, ProjectionParams, Timing};
use crate::domain::model::{Report, Schedule, Table};
use crate::domain::ports::Reportable;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SipInput {
    pub monthly_investment: f64,
    pub annual_return: f64,
    pub years: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SipResult {
    pub invested_amount: f64,
    pub estimated_returns: f64,
    pub total_value: f64,
    pub schedule: Schedule,
    pub truncated: bool,
}

pub fn calculate_sip(input: &SipInput, cap: u32) -> SipResult {
    let rate = schedule::periodic_rate(input.annual_return, 12);
    let requested = input.years.saturating_mul(12);
    let months = requested.min(cap);
    let contribution = input.monthly_investment.max(0.0);

    // 期初投入（annuity due）
    let total_value = schedule::annuity_future_value(contribution, rate, months, Timing::Begin);
    let invested_amount = contribution * months as f64;

    let params = ProjectionParams::grow(0.0, rate, contribution, months).with_timing(Timing::Begin);
    let schedule = schedule::project(&params);

    SipResult {
        invested_amount,
        estimated_returns: total_value - invested_amount,
        total_value,
        schedule,
        truncated: requested > cap,
    }
}

impl Reportable for SipResult {
    fn to_report(&self) -> Report {
        let report = Report::new("SIP")
            .line("invested_amount", self.invested_amount)
            .line("estimated_returns", self.estimated_returns)
            .line("total_value", self.total_value)
            .with_table(Table::from_records("year", &self.schedule.yearly(12)));
        if self.truncated {
            return report.note(truncation_note(self.schedule.len()));
        }
        report
    }
}
