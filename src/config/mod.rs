#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::core::engine::OutputFormat;
use crate::core::schedule::{DEFAULT_PERIOD_CAP, DRAWDOWN_PERIOD_CAP};
use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use toml_config::{TomlConfig, DEFAULT_TIMEOUT_SECONDS};

#[cfg(feature = "cli")]
use crate::app::conversion::cooking::{Ingredient, OvenScale};
#[cfg(feature = "cli")]
use crate::app::conversion::number_scale::ScaleUnit;
#[cfg(feature = "cli")]
use crate::app::finance::investment::ContributionFrequency;
#[cfg(feature = "cli")]
use crate::app::finance::CompoundingFrequency;
#[cfg(feature = "cli")]
use crate::app::fitness::bmr::{ActivityLevel, Sex};
#[cfg(feature = "cli")]
use crate::app::fitness::calories::Activity;
#[cfg(feature = "cli")]
use crate::app::fitness::pace::DistanceUnit;
#[cfg(feature = "cli")]
use crate::app::fitness::UnitSystem;
#[cfg(feature = "cli")]
use crate::core::schedule::Timing;
#[cfg(feature = "cli")]
use crate::utils::logger::LogFormat;
#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};

/// 數值參數一律以字串接收，解析失敗時視為 0
#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "calckit")]
#[command(about = "Finance, conversion and fitness calculators")]
pub struct CliConfig {
    /// Path to TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, value_enum)]
    pub format: Option<OutputFormat>,

    /// Write a zip bundle (summary.json, schedule.csv, schedule.tsv) into this directory;
    /// overrides `[output] path`
    #[arg(long, global = true)]
    pub export: Option<String>,

    /// Log line format on stderr
    #[arg(long, global = true, value_enum, default_value = "text")]
    pub log_format: LogFormat,

    #[arg(long, global = true)]
    pub rates_endpoint: Option<String>,

    /// Override the schedule iteration cap
    #[arg(long, global = true)]
    pub max_periods: Option<u32>,

    #[command(subcommand)]
    pub command: Command,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Mortgage payment with taxes, insurance and an amortization schedule
    Mortgage {
        #[arg(long)]
        price: String,
        #[arg(long, default_value = "0")]
        down: String,
        #[arg(long)]
        rate: String,
        #[arg(long, default_value = "30")]
        years: String,
        #[arg(long, default_value = "0")]
        tax: String,
        #[arg(long, default_value = "0")]
        insurance: String,
        #[arg(long, default_value = "0")]
        hoa: String,
        #[arg(long, default_value = "0")]
        extra: String,
    },
    /// Generic loan amortization
    Loan {
        #[arg(long)]
        principal: String,
        #[arg(long)]
        rate: String,
        #[arg(long)]
        years: String,
        #[arg(long, default_value = "12")]
        payments_per_year: String,
    },
    /// Credit card payoff by fixed payment or target months
    CreditCard {
        #[arg(long)]
        balance: String,
        #[arg(long)]
        apr: String,
        #[arg(long, conflicts_with = "months")]
        payment: Option<String>,
        #[arg(long)]
        months: Option<String>,
    },
    /// Systematic investment plan
    Sip {
        #[arg(long)]
        monthly: String,
        #[arg(long)]
        rate: String,
        #[arg(long)]
        years: String,
    },
    /// Savings growth with monthly contributions
    Savings {
        #[arg(long, default_value = "0")]
        initial: String,
        #[arg(long, default_value = "0")]
        monthly: String,
        #[arg(long)]
        rate: String,
        #[arg(long, value_enum, default_value = "monthly")]
        compounding: CompoundingFrequency,
        #[arg(long)]
        years: String,
    },
    /// Investment growth with periodic contributions
    Investment {
        #[arg(long, default_value = "0")]
        initial: String,
        #[arg(long, default_value = "0")]
        contribution: String,
        #[arg(long, value_enum, default_value = "monthly")]
        frequency: ContributionFrequency,
        #[arg(long)]
        rate: String,
        #[arg(long)]
        years: String,
        #[arg(long, value_enum, default_value = "end")]
        timing: Timing,
    },
    /// Compound interest and APY
    Compound {
        #[arg(long)]
        principal: String,
        #[arg(long)]
        rate: String,
        #[arg(long)]
        years: String,
        #[arg(long, value_enum, default_value = "monthly")]
        compounding: CompoundingFrequency,
    },
    /// Simple interest
    SimpleInterest {
        #[arg(long)]
        principal: String,
        #[arg(long)]
        rate: String,
        #[arg(long)]
        years: String,
    },
    /// How long retirement savings last
    Retirement {
        #[arg(long)]
        savings: String,
        #[arg(long)]
        withdrawal: String,
        #[arg(long, default_value = "0")]
        rate: String,
        #[arg(long, default_value = "0")]
        inflation: String,
    },
    /// General unit conversion
    Convert {
        #[arg(allow_hyphen_values = true)]
        value: String,
        from: String,
        to: String,
    },
    /// Kitchen volume/weight conversion
    Cooking {
        #[arg(allow_hyphen_values = true)]
        value: String,
        from: String,
        to: String,
        #[arg(long, value_enum)]
        ingredient: Option<Ingredient>,
    },
    /// Oven temperature in °F, °C and gas mark
    Oven {
        #[arg(allow_hyphen_values = true)]
        value: String,
        #[arg(long, value_enum, default_value = "fahrenheit")]
        scale: OvenScale,
    },
    /// Million / billion / lakh / crore conversion
    Scale {
        #[arg(allow_hyphen_values = true)]
        value: String,
        #[arg(long, value_enum, default_value = "one")]
        from: ScaleUnit,
    },
    /// Currency conversion with live exchange rates
    Currency {
        #[arg(allow_hyphen_values = true)]
        amount: String,
        from: String,
        to: String,
        #[arg(long, value_enum, default_value = "one")]
        from_scale: ScaleUnit,
        #[arg(long, value_enum, default_value = "one")]
        to_scale: ScaleUnit,
    },
    /// Body mass index
    Bmi {
        #[arg(long)]
        weight: String,
        #[arg(long)]
        height: String,
        #[arg(long, value_enum, default_value = "metric")]
        system: UnitSystem,
    },
    /// Basal metabolic rate and daily energy expenditure
    Bmr {
        #[arg(long)]
        weight: String,
        #[arg(long)]
        height: String,
        #[arg(long)]
        age: String,
        #[arg(long, value_enum, default_value = "male")]
        sex: Sex,
        #[arg(long, value_enum, default_value = "sedentary")]
        activity: ActivityLevel,
        #[arg(long, value_enum, default_value = "metric")]
        system: UnitSystem,
    },
    /// Calories burned from MET values
    Calories {
        #[arg(long)]
        weight: String,
        #[arg(long)]
        minutes: String,
        #[arg(long, value_enum)]
        activity: Option<Activity>,
        #[arg(long)]
        met: Option<String>,
        #[arg(long, value_enum, default_value = "metric")]
        system: UnitSystem,
    },
    /// Running pace, speed and finish-time prediction
    Pace {
        #[arg(long)]
        distance: String,
        /// h:mm:ss, mm:ss or seconds
        #[arg(long)]
        time: String,
        #[arg(long, value_enum, default_value = "km")]
        unit: DistanceUnit,
        #[arg(long)]
        predict: Option<String>,
    },
}

/// Effective settings after layering CLI flags over the TOML file.
#[derive(Debug, Clone)]
pub struct Settings {
    pub rates_endpoint: String,
    pub rates_timeout_seconds: u64,
    pub max_periods: Option<u32>,
    pub output_path: Option<String>,
    pub format: OutputFormat,
}

impl Settings {
    pub fn from_toml(file: &TomlConfig) -> Self {
        Self {
            rates_endpoint: file.rates_endpoint().to_string(),
            rates_timeout_seconds: file.rates_timeout_seconds(),
            max_periods: file.max_periods(),
            output_path: file.output_path().map(str::to_string),
            format: file.output.format.unwrap_or_default(),
        }
    }

    /// 命令列參數覆蓋設定檔
    #[cfg(feature = "cli")]
    pub fn resolve(cli: &CliConfig, file: &TomlConfig) -> Self {
        let mut settings = Self::from_toml(file);
        if let Some(endpoint) = &cli.rates_endpoint {
            settings.rates_endpoint = endpoint.clone();
        }
        if let Some(max_periods) = cli.max_periods {
            settings.max_periods = Some(max_periods);
        }
        if let Some(export) = &cli.export {
            settings.output_path = Some(export.clone());
        }
        if let Some(format) = cli.format {
            settings.format = format;
        }
        settings
    }

    /// 匯出目錄：`--export` 優先，其次為設定檔的 `[output] path`；皆未設定則不匯出
    pub fn export_dir(&self) -> Option<&str> {
        self.output_path.as_deref()
    }

    pub fn loan_cap(&self) -> u32 {
        self.max_periods.unwrap_or(DEFAULT_PERIOD_CAP)
    }

    pub fn drawdown_cap(&self) -> u32 {
        self.max_periods.unwrap_or(DRAWDOWN_PERIOD_CAP)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::from_toml(&TomlConfig::default())
    }
}

impl ConfigProvider for Settings {
    fn rates_endpoint(&self) -> &str {
        &self.rates_endpoint
    }

    fn rates_timeout_seconds(&self) -> u64 {
        if self.rates_timeout_seconds == 0 {
            DEFAULT_TIMEOUT_SECONDS
        } else {
            self.rates_timeout_seconds
        }
    }

    fn max_periods(&self) -> Option<u32> {
        self.max_periods
    }

    fn output_path(&self) -> Option<&str> {
        self.output_path.as_deref()
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        validation::validate_url("rates_endpoint", &self.rates_endpoint)?;
        if let Some(max_periods) = self.max_periods {
            validation::validate_range("max_periods", max_periods, 1, 12_000)?;
        }
        if let Some(path) = &self.output_path {
            validation::validate_path("export", path)?;
        }
        Ok(())
    }
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;

    #[test]
    fn test_cli_overrides_file() {
        let file = TomlConfig::from_toml_str(
            r#"
[rates]
endpoint = "https://file.example.com/USD"

[schedule]
max_periods = 360

[output]
format = "json"
"#,
        )
        .unwrap();

        let cli = CliConfig::parse_from([
            "calckit",
            "--max-periods",
            "120",
            "--format",
            "csv",
            "sip",
            "--monthly",
            "100",
            "--rate",
            "12",
            "--years",
            "5",
        ]);

        let settings = Settings::resolve(&cli, &file);
        assert_eq!(settings.rates_endpoint, "https://file.example.com/USD");
        assert_eq!(settings.max_periods, Some(120));
        assert_eq!(settings.format, OutputFormat::Csv);
        assert_eq!(settings.loan_cap(), 120);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_default_caps() {
        let settings = Settings::default();
        assert_eq!(settings.loan_cap(), DEFAULT_PERIOD_CAP);
        assert_eq!(settings.drawdown_cap(), DRAWDOWN_PERIOD_CAP);
        assert_eq!(settings.format, OutputFormat::Text);
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = CliConfig::parse_from([
            "calckit",
            "convert",
            "10",
            "km",
            "mi",
            "--verbose",
        ]);
        assert!(cli.verbose);
        assert!(matches!(cli.command, Command::Convert { .. }));
    }

    #[test]
    fn test_output_path_from_file_enables_export() {
        let file = TomlConfig::from_toml_str("[output]\npath = \"./reports\"\n").unwrap();

        let cli = CliConfig::parse_from(["calckit", "scale", "5", "--from", "lakh"]);
        let settings = Settings::resolve(&cli, &file);
        assert_eq!(settings.export_dir(), Some("./reports"));

        let cli = CliConfig::parse_from(["calckit", "--export", "out", "scale", "5"]);
        let settings = Settings::resolve(&cli, &file);
        assert_eq!(settings.export_dir(), Some("out"));

        let cli = CliConfig::parse_from(["calckit", "scale", "5"]);
        let settings = Settings::resolve(&cli, &TomlConfig::default());
        assert_eq!(settings.export_dir(), None);
    }

    #[test]
    fn test_negative_positional_values() {
        let cli = CliConfig::parse_from(["calckit", "scale", "-5"]);
        assert!(matches!(cli.command, Command::Scale { ref value, .. } if value == "-5"));

        let cli = CliConfig::parse_from(["calckit", "cooking", "-2", "cup", "ml"]);
        assert!(matches!(cli.command, Command::Cooking { ref value, .. } if value == "-2"));

        let cli = CliConfig::parse_from(["calckit", "currency", "-10", "USD", "EUR"]);
        assert!(matches!(cli.command, Command::Currency { ref amount, .. } if amount == "-10"));
    }

    #[test]
    fn test_log_format_flag() {
        let cli = CliConfig::parse_from([
            "calckit",
            "--log-format",
            "json",
            "bmi",
            "--weight",
            "70",
            "--height",
            "175",
        ]);
        assert_eq!(cli.log_format, LogFormat::Json);

        let cli = CliConfig::parse_from(["calckit", "bmi", "--weight", "70", "--height", "175"]);
        assert_eq!(cli.log_format, LogFormat::Text);
    }

    #[test]
    fn test_credit_card_payment_conflicts_with_months() {
        let parsed = CliConfig::try_parse_from([
            "calckit",
            "credit-card",
            "--balance",
            "1000",
            "--apr",
            "20",
            "--payment",
            "50",
            "--months",
            "12",
        ]);
        assert!(parsed.is_err());
    }
}
