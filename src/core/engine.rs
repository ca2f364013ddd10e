use crate::core::{Report, Storage, Table};
use crate::utils::error::Result;
use serde::{Deserialize, Serialize};
use std::io::Write;
use zip::write::{FileOptions, ZipWriter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Csv,
}

/// Renders reports and writes export bundles through a [`Storage`].
pub struct ReportEngine<S: Storage> {
    storage: S,
}

impl<S: Storage> ReportEngine<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn render(&self, report: &Report, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Text => Ok(render_text(report)),
            OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
            OutputFormat::Csv => match &report.table {
                Some(table) => render_delimited(table, b','),
                // 沒有表格時改輸出摘要
                None => render_summary_csv(report),
            },
        }
    }

    /// 將報表打包成 `<slug>.zip` 並回傳檔名
    pub async fn export(&self, report: &Report) -> Result<String> {
        let file_name = format!("{}.zip", report.slug());

        tracing::debug!(
            "Creating export bundle {} with {} files",
            file_name,
            1 + if report.table.is_some() { 2 } else { 0 }
        );

        let zip_data = {
            let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));

            zip.start_file::<_, ()>("summary.json", FileOptions::default())?;
            let json_data = serde_json::to_string_pretty(report)?;
            zip.write_all(json_data.as_bytes())?;

            if let Some(table) = &report.table {
                zip.start_file::<_, ()>("schedule.csv", FileOptions::default())?;
                zip.write_all(render_delimited(table, b',')?.as_bytes())?;

                zip.start_file::<_, ()>("schedule.tsv", FileOptions::default())?;
                zip.write_all(render_delimited(table, b'\t')?.as_bytes())?;
            }

            let cursor = zip.finish()?;
            cursor.into_inner()
        };

        tracing::debug!("Writing export bundle ({} bytes) to storage", zip_data.len());
        self.storage.write_file(&file_name, &zip_data).await?;

        Ok(file_name)
    }
}

pub fn render_text(report: &Report) -> String {
    let mut out = String::new();
    out.push_str(&report.title);
    out.push('\n');
    out.push_str(&"=".repeat(report.title.chars().count()));
    out.push('\n');

    let width = report
        .summary
        .iter()
        .map(|line| line.label.len())
        .max()
        .unwrap_or(0);
    for line in &report.summary {
        let unit = line
            .unit
            .as_deref()
            .map(|u| format!(" {}", u))
            .unwrap_or_default();
        out.push_str(&format!(
            "{:<width$}  {:>16.2}{}\n",
            line.label,
            line.value,
            unit,
            width = width
        ));
    }

    for note in &report.notes {
        out.push_str(&format!("note: {}\n", note));
    }

    if let Some(table) = &report.table {
        out.push('\n');
        let header: Vec<String> = table.headers.iter().map(|h| format!("{:>16}", h)).collect();
        out.push_str(&header.join(""));
        out.push('\n');
        for row in &table.rows {
            let cells: Vec<String> = row.iter().map(|v| format!("{:>16.2}", v)).collect();
            out.push_str(&cells.join(""));
            out.push('\n');
        }
    }

    out
}

pub fn render_delimited(table: &Table, delimiter: u8) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(Vec::new());
    writer.write_record(&table.headers)?;
    for row in &table.rows {
        writer.write_record(row.iter().map(|v| format!("{:.2}", v)))?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| crate::utils::error::CalcError::IoError(e.into_error()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn render_summary_csv(report: &Report) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["label", "value", "unit"])?;
    for line in &report.summary {
        let value = line.value.to_string();
        writer.write_record([
            line.label.as_str(),
            value.as_str(),
            line.unit.as_deref().unwrap_or(""),
        ])?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| crate::utils::error::CalcError::IoError(e.into_error()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::PeriodRecord;
    use crate::utils::error::CalcError;
    use std::collections::HashMap;
    use std::io::Read;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[derive(Clone)]
    struct MockStorage {
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    }

    impl MockStorage {
        fn new() -> Self {
            Self {
                files: Arc::new(Mutex::new(HashMap::new())),
            }
        }

        async fn get_file(&self, path: &str) -> Option<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned()
        }
    }

    impl Storage for MockStorage {
        async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned().ok_or_else(|| {
                CalcError::IoError(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("File not found: {}", path),
                ))
            })
        }

        async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            let mut files = self.files.lock().await;
            files.insert(path.to_string(), data.to_vec());
            Ok(())
        }
    }

    fn sample_report() -> Report {
        let records = vec![PeriodRecord {
            period: 1,
            cash_flow: 100.0,
            interest: 1.5,
            principal: 98.5,
            balance: 901.5,
            total_cash_flow: 100.0,
            total_interest: 1.5,
        }];
        Report::new("Sample Loan")
            .line("monthly_payment", 100.0)
            .line_with_unit("payoff_months", 10.0, "months")
            .with_table(Table::from_records("month", &records))
    }

    #[test]
    fn test_render_text_contains_summary_and_table() {
        let engine = ReportEngine::new(MockStorage::new());
        let text = engine.render(&sample_report(), OutputFormat::Text).unwrap();
        assert!(text.starts_with("Sample Loan\n==========="));
        assert!(text.contains("monthly_payment"));
        assert!(text.contains("months"));
        assert!(text.contains("901.50"));
    }

    #[test]
    fn test_render_csv_uses_table() {
        let engine = ReportEngine::new(MockStorage::new());
        let csv = engine.render(&sample_report(), OutputFormat::Csv).unwrap();
        let mut lines = csv.lines();
        assert_eq!(
            lines.next(),
            Some("month,cash_flow,interest,principal,balance,total_cash_flow,total_interest")
        );
        assert_eq!(lines.next(), Some("1.00,100.00,1.50,98.50,901.50,100.00,1.50"));
    }

    #[test]
    fn test_render_csv_without_table_falls_back_to_summary() {
        let engine = ReportEngine::new(MockStorage::new());
        let report = Report::new("BMI").line("bmi", 22.5);
        let csv = engine.render(&report, OutputFormat::Csv).unwrap();
        assert!(csv.starts_with("label,value,unit"));
        assert!(csv.contains("bmi,22.5,"));
    }

    #[tokio::test]
    async fn test_export_writes_zip_bundle() {
        let storage = MockStorage::new();
        let engine = ReportEngine::new(storage.clone());

        let name = engine.export(&sample_report()).await.unwrap();
        assert_eq!(name, "sample-loan.zip");

        let data = storage.get_file("sample-loan.zip").await.unwrap();
        let mut archive = zip::ZipArchive::new(std::io::Cursor::new(data)).unwrap();
        assert_eq!(archive.len(), 3);

        let mut summary = String::new();
        archive
            .by_name("summary.json")
            .unwrap()
            .read_to_string(&mut summary)
            .unwrap();
        let parsed: Report = serde_json::from_str(&summary).unwrap();
        assert_eq!(parsed, sample_report());
    }
}
