use crate::domain::model::Report;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::collections::BTreeMap;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn rates_endpoint(&self) -> &str;
    fn rates_timeout_seconds(&self) -> u64;
    fn max_periods(&self) -> Option<u32>;
    fn output_path(&self) -> Option<&str>;
}

/// Source of exchange rates, quoted as units of currency per one unit of `base`.
#[async_trait]
pub trait RateProvider: Send + Sync {
    async fn fetch_rates(&self) -> Result<(String, BTreeMap<String, f64>)>;
}

/// 所有計算結果都能轉成 `Report`
pub trait Reportable {
    fn to_report(&self) -> Report;
}
