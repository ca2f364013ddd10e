//! Credit card payoff: either a fixed monthly payment or a target payoff date.

use crate::core::schedule::{self, ProjectionParams};
use crate::domain::model::{Report, Schedule, Table, Termination};
use crate::domain::ports::Reportable;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "mode", content = "value")]
pub enum RepaymentPlan {
    FixedPayment(f64),
    TargetMonths(u32),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreditCardInput {
    pub balance: f64,
    pub apr: f64,
    pub plan: RepaymentPlan,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreditCardResult {
    pub monthly_payment: f64,
    pub first_month_interest: f64,
    pub months_to_payoff: Option<u32>,
    pub total_interest: f64,
    pub total_paid: f64,
    pub paid_off: bool,
    pub schedule: Schedule,
}

pub fn calculate_credit_card(input: &CreditCardInput, cap: u32) -> CreditCardResult {
    let rate = schedule::periodic_rate(input.apr, 12);
    let balance = input.balance.max(0.0);
    let first_month_interest = balance * rate;

    let monthly_payment = match input.plan {
        RepaymentPlan::FixedPayment(payment) => payment.max(0.0),
        RepaymentPlan::TargetMonths(months) => schedule::amortized_payment(balance, rate, months),
    };

    if input.plan == RepaymentPlan::TargetMonths(0) {
        tracing::debug!("target of 0 months; no repayment schedule");
        return CreditCardResult {
            monthly_payment,
            first_month_interest,
            months_to_payoff: None,
            total_interest: 0.0,
            total_paid: 0.0,
            paid_off: false,
            schedule: Schedule::empty(),
        };
    }

    if balance > 0.0 && monthly_payment <= first_month_interest {
        tracing::warn!(
            monthly_payment,
            first_month_interest,
            "payment does not cover interest; balance never reaches zero"
        );
    }

    let schedule = schedule::project(&ProjectionParams::deplete(balance, rate, monthly_payment, cap));
    let paid_off = schedule.terminated_by == Termination::Depleted;

    CreditCardResult {
        monthly_payment,
        first_month_interest,
        months_to_payoff: paid_off.then_some(schedule.len() as u32),
        total_interest: schedule.total_interest(),
        total_paid: schedule.total_cash_flow(),
        paid_off,
        schedule,
    }
}

impl Reportable for CreditCardResult {
    fn to_report(&self) -> Report {
        let mut report = Report::new("Credit Card Repayment")
            .line("monthly_payment", self.monthly_payment)
            .line("first_month_interest", self.first_month_interest)
            .line("total_interest", self.total_interest)
            .line("total_paid", self.total_paid);
        match self.months_to_payoff {
            Some(months) => {
                report = report.line_with_unit("months_to_payoff", months as f64, "months");
            }
            None if self.schedule.is_empty() => {
                report = report.note("A payoff target of 0 months produces no repayment schedule");
            }
            None => {
                report = report.note(format!(
                    "The balance is not paid off within {} months; the payment must exceed the monthly interest",
                    self.schedule.len()
                ));
            }
        }
        report.with_table(Table::from_records("month", &self.schedule.records))
    }
}
