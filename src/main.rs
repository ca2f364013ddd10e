use calckit::app::dispatch::build_report;
use calckit::utils::error::ErrorSeverity;
use calckit::utils::{logger, validation::Validate};
use calckit::{CliConfig, LocalStorage, ReportEngine, Settings, TomlConfig};
use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    logger::init_logger(cli.log_format, cli.verbose);

    tracing::debug!("CLI config: {:?}", cli);

    // 載入 TOML 配置（可選）
    let file_config = match &cli.config {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path);
            match TomlConfig::from_file(path) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("❌ Failed to load config file '{}': {}", path, e);
                    eprintln!("💡 Make sure the file exists and is valid TOML format");
                    std::process::exit(1);
                }
            }
        }
        None => TomlConfig::default(),
    };

    // 驗證配置
    let settings = Settings::resolve(&cli, &file_config);
    if let Err(e) = file_config.validate().and_then(|_| settings.validate()) {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let storage = LocalStorage::new(settings.export_dir().unwrap_or("."));
    let engine = ReportEngine::new(storage);

    let outcome = async {
        let report = build_report(&cli.command, &settings).await?;
        let rendered = engine.render(&report, settings.format)?;
        println!("{}", rendered);

        if settings.export_dir().is_some() {
            let file_name = engine.export(&report).await?;
            tracing::info!("📦 Export bundle written: {}", file_name);
        }
        Ok::<(), calckit::CalcError>(())
    }
    .await;

    if let Err(e) = outcome {
        tracing::error!(
            "❌ Calculation failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

        // 根據錯誤嚴重程度決定退出碼
        let exit_code = match e.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };

        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }

    Ok(())
}
