use crate::app::finance::truncation_note;
use crate::core::schedule::{self, ProjectionParams, Timing};
use crate::domain::model::{Report, Schedule, Table};
use crate::domain::ports::Reportable;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum ContributionFrequency {
    #[default]
    Monthly,
    Annually,
}

impl ContributionFrequency {
    pub fn periods_per_year(self) -> u32 {
        match self {
            ContributionFrequency::Monthly => 12,
            ContributionFrequency::Annually => 1,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InvestmentInput {
    pub initial_amount: f64,
    pub contribution: f64,
    pub contribution_frequency: ContributionFrequency,
    pub annual_return: f64,
    pub years: u32,
    pub timing: Timing,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvestmentResult {
    pub final_balance: f64,
    pub total_contributions: f64,
    pub total_returns: f64,
    pub schedule: Schedule,
    pub truncated: bool,
    periods_per_year: u32,
}

impl InvestmentResult {
    pub fn yearly(&self) -> Vec<crate::domain::model::PeriodRecord> {
        self.schedule.yearly(self.periods_per_year)
    }
}

pub fn calculate_investment(input: &InvestmentInput, cap: u32) -> InvestmentResult {
    let per_year = input.contribution_frequency.periods_per_year();
    let rate = schedule::periodic_rate(input.annual_return, per_year);
    let requested = input.years.saturating_mul(per_year);
    let periods = requested.min(cap);
    let initial = input.initial_amount.max(0.0);

    let params = ProjectionParams::grow(initial, rate, input.contribution.max(0.0), periods)
        .with_timing(input.timing);
    let schedule = schedule::project(&params);

    let final_balance = schedule.final_balance().unwrap_or(initial);
    let total_contributions = initial + schedule.total_cash_flow();

    InvestmentResult {
        final_balance,
        total_contributions,
        total_returns: schedule.total_interest(),
        schedule,
        truncated: requested > cap,
        periods_per_year: per_year,
    }
}

impl Reportable for InvestmentResult {
    fn to_report(&self) -> Report {
        let report = Report::new("Investment")
            .line("final_balance", self.final_balance)
            .line("total_contributions", self.total_contributions)
            .line("total_returns", self.total_returns)
            .with_table(Table::from_records("year", &self.yearly()));
        if self.truncated {
            return report.note(truncation_note(self.schedule.len()));
        }
        report
    }
}
