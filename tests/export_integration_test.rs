use anyhow::Result;
use calckit::app::finance::mortgage::{calculate_mortgage, MortgageInput};
use calckit::app::fitness::bmi::{calculate_bmi, BmiInput};
use calckit::core::schedule::DEFAULT_PERIOD_CAP;
use calckit::core::Reportable;
use calckit::{LocalStorage, OutputFormat, Report, ReportEngine};
use std::io::Read;
use tempfile::TempDir;

fn mortgage_report() -> Report {
    calculate_mortgage(
        &MortgageInput {
            home_price: 240_000.0,
            annual_rate: 4.5,
            term_years: 30,
            ..Default::default()
        },
        DEFAULT_PERIOD_CAP,
    )
    .to_report()
}

#[tokio::test]
async fn test_export_bundle_to_local_directory() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    let engine = ReportEngine::new(LocalStorage::new(output_path.clone()));
    let file_name = engine.export(&mortgage_report()).await?;
    assert_eq!(file_name, "mortgage.zip");

    let full_path = std::path::Path::new(&output_path).join(&file_name);
    assert!(full_path.exists());

    let zip_data = std::fs::read(&full_path)?;
    let mut archive = zip::ZipArchive::new(std::io::Cursor::new(zip_data))?;

    let file_names: Vec<String> = (0..archive.len())
        .map(|i| archive.by_index(i).unwrap().name().to_string())
        .collect();
    assert!(file_names.contains(&"summary.json".to_string()));
    assert!(file_names.contains(&"schedule.csv".to_string()));
    assert!(file_names.contains(&"schedule.tsv".to_string()));

    let mut csv_content = String::new();
    archive.by_name("schedule.csv")?.read_to_string(&mut csv_content)?;
    // 表頭 + 360 期
    assert_eq!(csv_content.lines().count(), 361);
    assert!(csv_content.starts_with("month,cash_flow,interest,principal,balance"));

    let mut tsv_content = String::new();
    archive.by_name("schedule.tsv")?.read_to_string(&mut tsv_content)?;
    assert!(tsv_content.starts_with("month\tcash_flow"));

    Ok(())
}

#[test]
fn test_export_without_table_only_has_summary() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    let report = calculate_bmi(&BmiInput {
        weight: 70.0,
        height: 175.0,
        ..Default::default()
    })
    .to_report();

    let engine = ReportEngine::new(LocalStorage::new(output_path.clone()));
    let file_name = tokio_test::block_on(engine.export(&report))?;

    let zip_data = std::fs::read(std::path::Path::new(&output_path).join(file_name))?;
    let archive = zip::ZipArchive::new(std::io::Cursor::new(zip_data))?;
    assert_eq!(archive.len(), 1);
    Ok(())
}

#[test]
fn test_json_render_round_trips() -> Result<()> {
    let engine = ReportEngine::new(LocalStorage::new(".".to_string()));
    let report = mortgage_report();
    let json = engine.render(&report, OutputFormat::Json)?;
    let parsed: serde_json::Value = serde_json::from_str(&json)?;
    assert_eq!(parsed["title"], "Mortgage");
    assert_eq!(parsed["table"]["rows"].as_array().map(|rows| rows.len()), Some(360));
    Ok(())
}
