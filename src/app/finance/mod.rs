pub mod credit_card;
pub mod interest;
pub mod investment;
pub mod mortgage;
pub mod retirement;
pub mod savings;
pub mod sip;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum CompoundingFrequency {
    Annually,
    Semiannually,
    Quarterly,
    #[default]
    Monthly,
    Daily,
    Continuous,
}

impl CompoundingFrequency {
    /// 每年複利次數；連續複利回傳 None
    pub fn periods_per_year(self) -> Option<u32> {
        match self {
            CompoundingFrequency::Annually => Some(1),
            CompoundingFrequency::Semiannually => Some(2),
            CompoundingFrequency::Quarterly => Some(4),
            CompoundingFrequency::Monthly => Some(12),
            CompoundingFrequency::Daily => Some(365),
            CompoundingFrequency::Continuous => None,
        }
    }

    /// Rate per month equivalent to the nominal `annual_percent` compounded at this frequency.
    pub fn effective_monthly_rate(self, annual_percent: f64) -> f64 {
        let r = annual_percent / 100.0;
        match self.periods_per_year() {
            Some(m) => {
                let m = m as f64;
                (1.0 + r / m).powf(m / 12.0) - 1.0
            }
            None => (r / 12.0).exp() - 1.0,
        }
    }
}

/// 要求的期數超過迭代上限時附在報表上的說明
pub(crate) fn truncation_note(periods: usize) -> String {
    format!(
        "Horizon truncated at the iteration cap ({} periods); raise --max-periods for longer terms",
        periods
    )
}
