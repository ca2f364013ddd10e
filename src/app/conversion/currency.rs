//! Currency conversion backed by a live exchange-rate endpoint, with a
//! hardcoded USD table when the endpoint cannot be used.

use crate::app::conversion::number_scale::ScaleUnit;
use crate::domain::model::Report;
use crate::domain::ports::{RateProvider, Reportable};
use crate::utils::error::{CalcError, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

pub const DEFAULT_RATES_ENDPOINT: &str = "https://open.er-api.com/v6/latest/USD";
pub const FALLBACK_NOTICE: &str = "Failed to load exchange rates. Using default USD values.";

const FALLBACK_RATES: &[(&str, f64)] = &[
    ("USD", 1.0),
    ("EUR", 0.92),
    ("GBP", 0.79),
    ("JPY", 149.5),
    ("INR", 83.2),
    ("CNY", 7.24),
    ("CAD", 1.36),
    ("AUD", 1.52),
    ("CHF", 0.88),
    ("SGD", 1.34),
    ("HKD", 7.82),
    ("AED", 3.6725),
    ("MXN", 17.1),
    ("BRL", 4.97),
    ("ZAR", 18.6),
    ("KRW", 1330.0),
    ("SEK", 10.5),
    ("NZD", 1.64),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RateSource {
    Live,
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateTable {
    pub base: String,
    pub rates: BTreeMap<String, f64>,
    pub source: RateSource,
    pub fetched_at: DateTime<Utc>,
}

impl RateTable {
    pub fn fallback() -> Self {
        Self {
            base: "USD".to_string(),
            rates: FALLBACK_RATES
                .iter()
                .map(|(code, rate)| (code.to_string(), *rate))
                .collect(),
            source: RateSource::Fallback,
            fetched_at: Utc::now(),
        }
    }

    pub fn live(base: String, mut rates: BTreeMap<String, f64>) -> Self {
        let base = base.to_ascii_uppercase();
        rates.entry(base.clone()).or_insert(1.0);
        Self {
            base,
            rates,
            source: RateSource::Live,
            fetched_at: Utc::now(),
        }
    }

    pub fn notice(&self) -> Option<&'static str> {
        match self.source {
            RateSource::Live => None,
            RateSource::Fallback => Some(FALLBACK_NOTICE),
        }
    }

    pub fn rate(&self, code: &str) -> Result<f64> {
        let code = code.trim().to_ascii_uppercase();
        self.rates
            .get(&code)
            .copied()
            .filter(|rate| *rate > 0.0)
            .ok_or(CalcError::UnknownCurrency { code })
    }

    /// 金額先換回基準幣別再換成目標幣別
    pub fn convert(&self, amount: f64, from: &str, to: &str) -> Result<f64> {
        let from_rate = self.rate(from)?;
        let to_rate = self.rate(to)?;
        Ok(amount / from_rate * to_rate)
    }
}

#[derive(Debug, Deserialize)]
struct RatesResponse {
    #[serde(alias = "base_code")]
    base: Option<String>,
    rates: BTreeMap<String, f64>,
}

pub struct HttpRateProvider {
    client: Client,
    endpoint: String,
}

impl HttpRateProvider {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }
}

#[async_trait]
impl RateProvider for HttpRateProvider {
    async fn fetch_rates(&self) -> Result<(String, BTreeMap<String, f64>)> {
        tracing::debug!("Fetching exchange rates from: {}", self.endpoint);
        let response = self.client.get(&self.endpoint).send().await?;

        tracing::debug!("Exchange-rate response status: {}", response.status());
        let response = response.error_for_status()?;

        let body: RatesResponse = response.json().await?;
        if body.rates.is_empty() {
            return Err(CalcError::ConfigError {
                message: "exchange-rate response contained no rates".to_string(),
            });
        }

        Ok((body.base.unwrap_or_else(|| "USD".to_string()), body.rates))
    }
}

pub struct CurrencyConverter<P: RateProvider> {
    provider: P,
}

impl<P: RateProvider> CurrencyConverter<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    /// 抓取失敗時改用內建匯率，不回傳錯誤
    pub async fn load_rates(&self) -> RateTable {
        match self.provider.fetch_rates().await {
            Ok((base, rates)) => {
                tracing::info!("Loaded {} exchange rates (base {})", rates.len(), base);
                RateTable::live(base, rates)
            }
            Err(e) => {
                tracing::warn!("⚠️ Exchange-rate fetch failed: {}", e);
                tracing::warn!("{}", FALLBACK_NOTICE);
                RateTable::fallback()
            }
        }
    }

    pub async fn convert(&self, request: &CurrencyRequest) -> Result<CurrencyConversion> {
        let table = self.load_rates().await;
        CurrencyConversion::compute(request, &table)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrencyRequest {
    pub amount: f64,
    pub from: String,
    pub to: String,
    pub from_scale: ScaleUnit,
    pub to_scale: ScaleUnit,
}

impl CurrencyRequest {
    pub fn new(amount: f64, from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            amount,
            from: from.into(),
            to: to.into(),
            from_scale: ScaleUnit::One,
            to_scale: ScaleUnit::One,
        }
    }

    pub fn with_scales(mut self, from_scale: ScaleUnit, to_scale: ScaleUnit) -> Self {
        self.from_scale = from_scale;
        self.to_scale = to_scale;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrencyConversion {
    pub request: CurrencyRequest,
    pub rate: f64,
    pub result: f64,
    pub source: RateSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
}

impl CurrencyConversion {
    pub fn compute(request: &CurrencyRequest, table: &RateTable) -> Result<Self> {
        let absolute = request.amount * request.from_scale.factor();
        let converted = table.convert(absolute, &request.from, &request.to)?;
        Ok(Self {
            request: request.clone(),
            rate: table.convert(1.0, &request.from, &request.to)?,
            result: converted / request.to_scale.factor(),
            source: table.source,
            notice: table.notice().map(str::to_string),
        })
    }
}

impl Reportable for CurrencyConversion {
    fn to_report(&self) -> Report {
        let from = self.request.from.to_ascii_uppercase();
        let to = self.request.to.to_ascii_uppercase();
        let scaled = |code: &str, scale: ScaleUnit| match scale {
            ScaleUnit::One => code.to_string(),
            other => format!("{} {}", other.name(), code),
        };

        let mut report = Report::new("Currency Conversion")
            .line_with_unit("amount", self.request.amount, scaled(&from, self.request.from_scale))
            .line_with_unit("rate", self.rate, format!("{} per {}", to, from))
            .line_with_unit("result", self.result, scaled(&to, self.request.to_scale));
        if let Some(notice) = &self.notice {
            report = report.note(notice.clone());
        }
        report
    }
}
