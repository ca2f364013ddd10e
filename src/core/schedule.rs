//! Period-by-period projection shared by every schedule calculator.
//!
//! A projection starts from an opening balance, accrues interest at a fixed
//! periodic rate and then adds (`Grow`) or removes (`Deplete`) a cash flow.
//! It stops after a fixed number of periods, when the balance is paid down
//! to zero, or at a hard iteration cap, whichever comes first.

use crate::domain::model::{PeriodRecord, Schedule, Termination};
use serde::{Deserialize, Serialize};

/// 貸款、信用卡的迭代上限（50 年的月數）
pub const DEFAULT_PERIOD_CAP: u32 = 600;
/// 退休提領的迭代上限（100 年的月數）
pub const DRAWDOWN_PERIOD_CAP: u32 = 1200;

/// Rates with a smaller magnitude fall back to linear division.
pub const RATE_EPSILON: f64 = 1e-9;
const BALANCE_EPSILON: f64 = 1e-4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Grow,
    Deplete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum Timing {
    Begin,
    #[default]
    End,
}

/// Step-up of the cash flow every `every` periods, e.g. inflation-indexed withdrawals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Escalation {
    pub every: u32,
    pub rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionParams {
    pub opening_balance: f64,
    pub periodic_rate: f64,
    pub cash_flow: f64,
    pub direction: Direction,
    pub timing: Timing,
    pub periods: Option<u32>,
    pub cap: u32,
    pub escalation: Option<Escalation>,
}

impl ProjectionParams {
    pub fn grow(opening_balance: f64, periodic_rate: f64, contribution: f64, periods: u32) -> Self {
        Self {
            opening_balance,
            periodic_rate,
            cash_flow: contribution,
            direction: Direction::Grow,
            timing: Timing::End,
            periods: Some(periods),
            cap: periods.max(1),
            escalation: None,
        }
    }

    pub fn deplete(balance: f64, periodic_rate: f64, payment: f64, cap: u32) -> Self {
        Self {
            opening_balance: balance,
            periodic_rate,
            cash_flow: payment,
            direction: Direction::Deplete,
            timing: Timing::End,
            periods: None,
            cap,
            escalation: None,
        }
    }

    pub fn with_timing(mut self, timing: Timing) -> Self {
        self.timing = timing;
        self
    }

    pub fn with_periods(mut self, periods: u32) -> Self {
        self.periods = Some(periods);
        self
    }

    pub fn with_cap(mut self, cap: u32) -> Self {
        self.cap = cap;
        self
    }

    pub fn with_escalation(mut self, every: u32, rate: f64) -> Self {
        self.escalation = Some(Escalation { every, rate });
        self
    }
}

pub fn is_zero_rate(rate: f64) -> bool {
    rate.abs() < RATE_EPSILON
}

/// 年利率（百分比）換算成每期利率
pub fn periodic_rate(annual_percent: f64, periods_per_year: u32) -> f64 {
    if periods_per_year == 0 {
        return 0.0;
    }
    annual_percent / 100.0 / periods_per_year as f64
}

/// Level payment that amortizes `principal` over `periods` at `rate` per period.
pub fn amortized_payment(principal: f64, rate: f64, periods: u32) -> f64 {
    if periods == 0 || principal <= 0.0 {
        return 0.0;
    }
    let n = periods as f64;
    if is_zero_rate(rate) {
        return principal / n;
    }
    principal * rate / (1.0 - (1.0 + rate).powf(-n))
}

/// Future value of a level series of `periods` payments.
pub fn annuity_future_value(payment: f64, rate: f64, periods: u32, timing: Timing) -> f64 {
    let n = periods as f64;
    if is_zero_rate(rate) {
        return payment * n;
    }
    let ordinary = payment * ((1.0 + rate).powf(n) - 1.0) / rate;
    match timing {
        Timing::End => ordinary,
        Timing::Begin => ordinary * (1.0 + rate),
    }
}

pub fn lump_sum_future_value(present: f64, rate: f64, periods: u32) -> f64 {
    present * (1.0 + rate).powf(periods as f64)
}

pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Run the projection loop. Never fails and never exceeds `params.cap` periods.
pub fn project(params: &ProjectionParams) -> Schedule {
    let limit = match params.periods {
        Some(n) => n.min(params.cap),
        None => params.cap,
    };

    if limit == 0 {
        return Schedule::empty();
    }
    if params.direction == Direction::Deplete && params.opening_balance <= 0.0 {
        return Schedule {
            records: Vec::new(),
            terminated_by: Termination::Depleted,
        };
    }

    let rate = params.periodic_rate;
    let mut balance = params.opening_balance;
    let mut cash_flow = params.cash_flow.max(0.0);
    let mut total_cash_flow = 0.0;
    let mut total_interest = 0.0;
    let mut records = Vec::with_capacity(limit.min(DRAWDOWN_PERIOD_CAP) as usize);

    for period in 1..=limit {
        let (flow, interest, principal, depleted) = match (params.direction, params.timing) {
            (Direction::Grow, Timing::End) => {
                let interest = balance * rate;
                balance += interest + cash_flow;
                (cash_flow, interest, cash_flow, false)
            }
            (Direction::Grow, Timing::Begin) => {
                balance += cash_flow;
                let interest = balance * rate;
                balance += interest;
                (cash_flow, interest, cash_flow, false)
            }
            (Direction::Deplete, Timing::End) => {
                let interest = balance * rate;
                let due = balance + interest;
                if cash_flow >= due - BALANCE_EPSILON {
                    // 最後一期只付清剩餘金額
                    balance = 0.0;
                    (due, interest, due - interest, true)
                } else {
                    balance = due - cash_flow;
                    (cash_flow, interest, cash_flow - interest, false)
                }
            }
            (Direction::Deplete, Timing::Begin) => {
                let flow = if cash_flow >= balance - BALANCE_EPSILON {
                    balance
                } else {
                    cash_flow
                };
                balance -= flow;
                let interest = balance * rate;
                balance += interest;
                let depleted = balance <= BALANCE_EPSILON;
                if depleted {
                    balance = 0.0;
                }
                (flow, interest, flow - interest, depleted)
            }
        };

        total_cash_flow += flow;
        total_interest += interest;
        records.push(PeriodRecord {
            period,
            cash_flow: flow,
            interest,
            principal,
            balance,
            total_cash_flow,
            total_interest,
        });

        if depleted {
            return Schedule {
                records,
                terminated_by: Termination::Depleted,
            };
        }

        if let Some(Escalation { every, rate }) = params.escalation {
            if every > 0 && period % every == 0 {
                cash_flow *= 1.0 + rate;
            }
        }
    }

    let terminated_by = match params.periods {
        Some(n) if n <= params.cap => Termination::PeriodCount,
        _ => Termination::Cap,
    };

    tracing::debug!(
        periods = records.len(),
        ?terminated_by,
        "projection finished"
    );

    Schedule {
        records,
        terminated_by,
    }
}
