//! Mortgage and generic loan amortization.

use crate::core::schedule::{self, ProjectionParams};
use crate::domain::model::{Report, Schedule, Table};
use crate::domain::ports::Reportable;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MortgageInput {
    pub home_price: f64,
    pub down_payment: f64,
    pub annual_rate: f64,
    pub term_years: u32,
    pub annual_property_tax: f64,
    pub annual_insurance: f64,
    pub monthly_hoa: f64,
    pub extra_monthly_principal: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MortgageResult {
    pub loan_amount: f64,
    pub monthly_principal_and_interest: f64,
    pub monthly_tax: f64,
    pub monthly_insurance: f64,
    pub monthly_hoa: f64,
    pub total_monthly_payment: f64,
    pub total_interest: f64,
    pub total_paid: f64,
    pub payoff_months: u32,
    pub schedule: Schedule,
}

pub fn calculate_mortgage(input: &MortgageInput, cap: u32) -> MortgageResult {
    let loan_amount = (input.home_price - input.down_payment).max(0.0);
    let rate = schedule::periodic_rate(input.annual_rate, 12);
    let months = input.term_years.saturating_mul(12);
    let payment = schedule::amortized_payment(loan_amount, rate, months);

    let monthly_tax = input.annual_property_tax.max(0.0) / 12.0;
    let monthly_insurance = input.annual_insurance.max(0.0) / 12.0;
    let monthly_hoa = input.monthly_hoa.max(0.0);

    let cash_flow = payment + input.extra_monthly_principal.max(0.0);
    let mut params = ProjectionParams::deplete(loan_amount, rate, cash_flow, cap);
    if months == 0 {
        // 期數為 0 時不產生攤還表
        params = params.with_periods(0);
    }
    let schedule = schedule::project(&params);

    tracing::debug!(
        loan_amount,
        payment,
        months = schedule.len(),
        "mortgage schedule built"
    );

    MortgageResult {
        loan_amount,
        monthly_principal_and_interest: payment,
        monthly_tax,
        monthly_insurance,
        monthly_hoa,
        total_monthly_payment: payment + monthly_tax + monthly_insurance + monthly_hoa,
        total_interest: schedule.total_interest(),
        total_paid: schedule.total_cash_flow(),
        payoff_months: schedule.len() as u32,
        schedule,
    }
}

impl Reportable for MortgageResult {
    fn to_report(&self) -> Report {
        let mut report = Report::new("Mortgage")
            .line("loan_amount", self.loan_amount)
            .line("monthly_principal_and_interest", self.monthly_principal_and_interest)
            .line("monthly_tax", self.monthly_tax)
            .line("monthly_insurance", self.monthly_insurance)
            .line("monthly_hoa", self.monthly_hoa)
            .line("total_monthly_payment", self.total_monthly_payment)
            .line("total_interest", self.total_interest)
            .line("total_paid", self.total_paid)
            .line_with_unit("payoff_months", self.payoff_months as f64, "months")
            .with_table(Table::from_records("month", &self.schedule.records));
        if self.schedule.capped() {
            report = report.note("Schedule stopped at the iteration cap before the loan was repaid");
        }
        report
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanInput {
    pub principal: f64,
    pub annual_rate: f64,
    pub years: u32,
    pub payments_per_year: u32,
}

impl Default for LoanInput {
    fn default() -> Self {
        Self {
            principal: 0.0,
            annual_rate: 0.0,
            years: 0,
            payments_per_year: 12,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanResult {
    pub payment: f64,
    pub number_of_payments: u32,
    pub total_interest: f64,
    pub total_paid: f64,
    pub schedule: Schedule,
}

pub fn calculate_loan(input: &LoanInput, cap: u32) -> LoanResult {
    let rate = schedule::periodic_rate(input.annual_rate, input.payments_per_year);
    let periods = input.years.saturating_mul(input.payments_per_year);
    let payment = schedule::amortized_payment(input.principal, rate, periods);

    let params = ProjectionParams::deplete(input.principal, rate, payment, cap).with_periods(periods);
    let schedule = schedule::project(&params);

    LoanResult {
        payment,
        number_of_payments: periods,
        total_interest: schedule.total_interest(),
        total_paid: schedule.total_cash_flow(),
        schedule,
    }
}

impl Reportable for LoanResult {
    fn to_report(&self) -> Report {
        let mut report = Report::new("Loan Amortization")
            .line("payment", self.payment)
            .line_with_unit("number_of_payments", self.number_of_payments as f64, "payments")
            .line("total_interest", self.total_interest)
            .line("total_paid", self.total_paid)
            .with_table(Table::from_records("payment", &self.schedule.records));
        if self.schedule.capped() {
            report = report.note("Schedule truncated at the iteration cap");
        }
        report
    }
}
