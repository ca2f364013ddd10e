//! Retirement drawdown: how long a nest egg lasts under inflation-indexed withdrawals.

use crate::core::schedule::{self, ProjectionParams};
use crate::domain::model::{Report, Schedule, Table, Termination};
use crate::domain::ports::Reportable;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RetirementInput {
    pub savings: f64,
    pub monthly_withdrawal: f64,
    pub annual_return: f64,
    pub annual_inflation: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetirementResult {
    pub months_lasted: u32,
    pub years_lasted: f64,
    /// 到達迭代上限時仍有餘額
    pub outlasts_horizon: bool,
    pub total_withdrawn: f64,
    pub total_interest: f64,
    pub ending_balance: f64,
    pub schedule: Schedule,
}

pub fn calculate_retirement(input: &RetirementInput, cap: u32) -> RetirementResult {
    let rate = schedule::periodic_rate(input.annual_return, 12);
    let params = ProjectionParams::deplete(
        input.savings.max(0.0),
        rate,
        input.monthly_withdrawal.max(0.0),
        cap,
    )
    .with_escalation(12, input.annual_inflation / 100.0);
    let schedule = schedule::project(&params);

    let months_lasted = schedule.len() as u32;
    let outlasts_horizon = schedule.terminated_by == Termination::Cap;

    tracing::debug!(months_lasted, outlasts_horizon, "retirement drawdown projected");

    RetirementResult {
        months_lasted,
        years_lasted: months_lasted as f64 / 12.0,
        outlasts_horizon,
        total_withdrawn: schedule.total_cash_flow(),
        total_interest: schedule.total_interest(),
        ending_balance: schedule.final_balance().unwrap_or(0.0),
        schedule,
    }
}

impl Reportable for RetirementResult {
    fn to_report(&self) -> Report {
        let mut report = Report::new("Retirement Drawdown")
            .line_with_unit("months_lasted", self.months_lasted as f64, "months")
            .line_with_unit("years_lasted", self.years_lasted, "years")
            .line("total_withdrawn", self.total_withdrawn)
            .line("total_interest", self.total_interest)
            .line("ending_balance", self.ending_balance)
            .with_table(Table::from_records("year", &self.schedule.yearly(12)));
        if self.outlasts_horizon {
            report = report.note(format!(
                "Savings still last after {:.0} years",
                self.years_lasted
            ));
        }
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::schedule::DRAWDOWN_PERIOD_CAP;

    #[test]
    fn test_zero_return_no_inflation_is_linear() {
        let input = RetirementInput {
            savings: 120_000.0,
            monthly_withdrawal: 1_000.0,
            ..Default::default()
        };
        let result = calculate_retirement(&input, DRAWDOWN_PERIOD_CAP);
        assert_eq!(result.months_lasted, 120);
        assert_eq!(result.years_lasted, 10.0);
        assert!(!result.outlasts_horizon);
        assert_eq!(result.total_withdrawn, 120_000.0);
    }

    #[test]
    fn test_inflation_shortens_drawdown() {
        let flat = RetirementInput {
            savings: 500_000.0,
            monthly_withdrawal: 3_000.0,
            annual_return: 5.0,
            annual_inflation: 0.0,
        };
        let indexed = RetirementInput {
            annual_inflation: 3.0,
            ..flat.clone()
        };
        let a = calculate_retirement(&flat, DRAWDOWN_PERIOD_CAP);
        let b = calculate_retirement(&indexed, DRAWDOWN_PERIOD_CAP);
        assert!(b.months_lasted < a.months_lasted);
        let reconciled = 500_000.0 + b.total_interest - b.total_withdrawn;
        assert!(reconciled.abs() < 1e-4);
    }

    #[test]
    fn test_withdrawal_below_growth_hits_cap() {
        let input = RetirementInput {
            savings: 1_000_000.0,
            monthly_withdrawal: 1_000.0,
            annual_return: 6.0,
            annual_inflation: 0.0,
        };
        let result = calculate_retirement(&input, DRAWDOWN_PERIOD_CAP);
        assert!(result.outlasts_horizon);
        assert_eq!(result.months_lasted, DRAWDOWN_PERIOD_CAP);
        assert!(result.ending_balance > 1_000_000.0);
    }
}
