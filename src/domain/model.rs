use serde::{Deserialize, Serialize};

/// One row of a period-by-period projection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PeriodRecord {
    pub period: u32,
    /// 該期的投入（成長型）或還款/提領（消耗型）金額，恆為正值
    pub cash_flow: f64,
    pub interest: f64,
    /// 本期本金變動：貸款為「還款 − 利息」，成長型為「投入」
    pub principal: f64,
    pub balance: f64,
    pub total_cash_flow: f64,
    pub total_interest: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Termination {
    PeriodCount,
    Depleted,
    Cap,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    pub records: Vec<PeriodRecord>,
    pub terminated_by: Termination,
}

impl Schedule {
    pub fn empty() -> Self {
        Self {
            records: Vec::new(),
            terminated_by: Termination::PeriodCount,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn capped(&self) -> bool {
        self.terminated_by == Termination::Cap
    }

    pub fn final_balance(&self) -> Option<f64> {
        self.records.last().map(|r| r.balance)
    }

    pub fn total_interest(&self) -> f64 {
        self.records.last().map(|r| r.total_interest).unwrap_or(0.0)
    }

    pub fn total_cash_flow(&self) -> f64 {
        self.records.last().map(|r| r.total_cash_flow).unwrap_or(0.0)
    }

    /// 將逐月紀錄彙整為逐年紀錄（每 `per_year` 期一列）
    pub fn yearly(&self, per_year: u32) -> Vec<PeriodRecord> {
        if per_year == 0 {
            return Vec::new();
        }
        let mut years = Vec::new();
        for chunk in self.records.chunks(per_year as usize) {
            let Some(last) = chunk.last() else { continue };
            years.push(PeriodRecord {
                period: years.len() as u32 + 1,
                cash_flow: chunk.iter().map(|r| r.cash_flow).sum(),
                interest: chunk.iter().map(|r| r.interest).sum(),
                principal: chunk.iter().map(|r| r.principal).sum(),
                balance: last.balance,
                total_cash_flow: last.total_cash_flow,
                total_interest: last.total_interest,
            });
        }
        years
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryLine {
    pub label: String,
    pub value: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<f64>>,
}

impl Table {
    pub fn from_records(period_label: &str, records: &[PeriodRecord]) -> Self {
        Self {
            headers: vec![
                period_label.to_string(),
                "cash_flow".to_string(),
                "interest".to_string(),
                "principal".to_string(),
                "balance".to_string(),
                "total_cash_flow".to_string(),
                "total_interest".to_string(),
            ],
            rows: records
                .iter()
                .map(|r| {
                    vec![
                        r.period as f64,
                        r.cash_flow,
                        r.interest,
                        r.principal,
                        r.balance,
                        r.total_cash_flow,
                        r.total_interest,
                    ]
                })
                .collect(),
        }
    }
}

/// Common output of every calculator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub title: String,
    pub summary: Vec<SummaryLine>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table: Option<Table>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub notes: Vec<String>,
}

impl Report {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            summary: Vec::new(),
            table: None,
            notes: Vec::new(),
        }
    }

    pub fn line(mut self, label: impl Into<String>, value: f64) -> Self {
        self.summary.push(SummaryLine {
            label: label.into(),
            value,
            unit: None,
        });
        self
    }

    pub fn line_with_unit(
        mut self,
        label: impl Into<String>,
        value: f64,
        unit: impl Into<String>,
    ) -> Self {
        self.summary.push(SummaryLine {
            label: label.into(),
            value,
            unit: Some(unit.into()),
        });
        self
    }

    pub fn with_table(mut self, table: Table) -> Self {
        self.table = Some(table);
        self
    }

    pub fn note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    pub fn value(&self, label: &str) -> Option<f64> {
        self.summary
            .iter()
            .find(|line| line.label == label)
            .map(|line| line.value)
    }

    /// 匯出檔名用的代稱
    pub fn slug(&self) -> String {
        let mut slug = String::new();
        for c in self.title.chars() {
            if c.is_ascii_alphanumeric() {
                slug.push(c.to_ascii_lowercase());
            } else if !slug.ends_with('-') && !slug.is_empty() {
                slug.push('-');
            }
        }
        slug.trim_end_matches('-').to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(period: u32, cash_flow: f64, interest: f64, balance: f64) -> PeriodRecord {
        PeriodRecord {
            period,
            cash_flow,
            interest,
            principal: cash_flow,
            balance,
            total_cash_flow: cash_flow * period as f64,
            total_interest: interest * period as f64,
        }
    }

    #[test]
    fn test_yearly_rollup() {
        let schedule = Schedule {
            records: (1..=30).map(|p| record(p, 100.0, 1.0, p as f64 * 101.0)).collect(),
            terminated_by: Termination::PeriodCount,
        };

        let years = schedule.yearly(12);
        assert_eq!(years.len(), 3);
        assert_eq!(years[0].period, 1);
        assert!((years[0].cash_flow - 1200.0).abs() < 1e-9);
        assert!((years[1].interest - 12.0).abs() < 1e-9);
        // 最後一年只有 6 期
        assert!((years[2].cash_flow - 600.0).abs() < 1e-9);
        assert_eq!(years[2].balance, 30.0 * 101.0);
    }

    #[test]
    fn test_report_slug() {
        let report = Report::new("Credit Card Repayment (fixed payment)");
        assert_eq!(report.slug(), "credit-card-repayment-fixed-payment");
    }

    #[test]
    fn test_report_value_lookup() {
        let report = Report::new("Loan").line("monthly_payment", 1216.04);
        assert_eq!(report.value("monthly_payment"), Some(1216.04));
        assert_eq!(report.value("missing"), None);
    }
}
