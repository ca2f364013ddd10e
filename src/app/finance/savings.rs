use crate::app::finance::interest::apr_to_apy;
use crate::app::finance::truncation_note;
use crate::app::finance::CompoundingFrequency;
use crate::core::schedule::{self, ProjectionParams};
use crate::domain::model::{Report, Schedule, Table};
use crate::domain::ports::Reportable;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SavingsInput {
    pub initial_deposit: f64,
    pub monthly_contribution: f64,
    pub annual_rate: f64,
    pub compounding: CompoundingFrequency,
    pub years: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavingsResult {
    pub final_balance: f64,
    pub total_contributions: f64,
    pub total_interest: f64,
    pub apy: f64,
    pub schedule: Schedule,
    pub truncated: bool,
}

pub fn calculate_savings(input: &SavingsInput, cap: u32) -> SavingsResult {
    let rate = input.compounding.effective_monthly_rate(input.annual_rate);
    let requested = input.years.saturating_mul(12);
    let months = requested.min(cap);
    let initial = input.initial_deposit.max(0.0);

    let schedule = schedule::project(&ProjectionParams::grow(
        initial,
        rate,
        input.monthly_contribution.max(0.0),
        months,
    ));

    let final_balance = schedule.final_balance().unwrap_or(initial);

    SavingsResult {
        final_balance,
        total_contributions: initial + schedule.total_cash_flow(),
        total_interest: schedule.total_interest(),
        apy: apr_to_apy(input.annual_rate, input.compounding),
        schedule,
        truncated: requested > cap,
    }
}

impl Reportable for SavingsResult {
    fn to_report(&self) -> Report {
        let report = Report::new("Savings")
            .line("final_balance", self.final_balance)
            .line("total_contributions", self.total_contributions)
            .line("total_interest", self.total_interest)
            .line_with_unit("apy", self.apy, "%")
            .with_table(Table::from_records("year", &self.schedule.yearly(12)));
        if self.truncated {
            return report.note(truncation_note(self.schedule.len()));
        }
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::schedule::DRAWDOWN_PERIOD_CAP;

    #[test]
    fn test_annual_compounding_lump_sum() {
        let input = SavingsInput {
            initial_deposit: 10_000.0,
            annual_rate: 5.0,
            compounding: CompoundingFrequency::Annually,
            years: 10,
            ..Default::default()
        };
        let result = calculate_savings(&input, DRAWDOWN_PERIOD_CAP);
        // 10000 × 1.05^10
        assert!((result.final_balance - 16_288.946_267_774_4).abs() < 1e-4);
        assert!((result.apy - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_balance_reconciles_with_contributions() {
        let input = SavingsInput {
            initial_deposit: 2_500.0,
            monthly_contribution: 150.0,
            annual_rate: 3.5,
            compounding: CompoundingFrequency::Daily,
            years: 7,
        };
        let result = calculate_savings(&input, DRAWDOWN_PERIOD_CAP);
        let expected = result.total_contributions + result.total_interest;
        assert!((result.final_balance - expected).abs() < 1e-6);
        assert_eq!(result.total_contributions, 2_500.0 + 150.0 * 84.0);
    }

    #[test]
    fn test_zero_years_keeps_deposit() {
        let input = SavingsInput {
            initial_deposit: 500.0,
            annual_rate: 4.0,
            ..Default::default()
        };
        let result = calculate_savings(&input, DRAWDOWN_PERIOD_CAP);
        assert_eq!(result.final_balance, 500.0);
        assert_eq!(result.total_interest, 0.0);
    }

    #[test]
    fn test_cap_truncation_adds_note() {
        let input = SavingsInput {
            monthly_contribution: 50.0,
            annual_rate: 2.0,
            years: 30,
            ..Default::default()
        };
        let result = calculate_savings(&input, 120);
        assert!(result.truncated);
        assert_eq!(result.schedule.len(), 120);
        assert_eq!(result.to_report().notes.len(), 1);
    }
}
