//! Maps a parsed CLI command onto its calculator and returns the resulting report.

use crate::app::conversion::cooking;
use crate::app::conversion::currency::{CurrencyConverter, CurrencyRequest, HttpRateProvider};
use crate::app::conversion::{number_scale, units};
use crate::app::finance::credit_card::{self, CreditCardInput, RepaymentPlan};
use crate::app::finance::interest::{self, CompoundInterestInput, SimpleInterestInput};
use crate::app::finance::investment::{self, InvestmentInput};
use crate::app::finance::mortgage::{self, LoanInput, MortgageInput};
use crate::app::finance::retirement::{self, RetirementInput};
use crate::app::finance::savings::{self, SavingsInput};
use crate::app::finance::sip::{self, SipInput};
use crate::app::fitness::bmi::{self, BmiInput};
use crate::app::fitness::bmr::{self, BmrInput};
use crate::app::fitness::calories::{self, CaloriesInput};
use crate::app::fitness::pace::{self, PaceInput};
use crate::config::{Command, Settings};
use crate::core::{ConfigProvider, Report, Reportable};
use crate::utils::error::Result;
use crate::utils::input::{coerce, coerce_count};
use std::time::Duration;

pub async fn build_report(command: &Command, settings: &Settings) -> Result<Report> {
    let report = match command {
        Command::Mortgage {
            price,
            down,
            rate,
            years,
            tax,
            insurance,
            hoa,
            extra,
        } => {
            let input = MortgageInput {
                home_price: coerce("price", price),
                down_payment: coerce("down", down),
                annual_rate: coerce("rate", rate),
                term_years: coerce_count("years", years),
                annual_property_tax: coerce("tax", tax),
                annual_insurance: coerce("insurance", insurance),
                monthly_hoa: coerce("hoa", hoa),
                extra_monthly_principal: coerce("extra", extra),
            };
            mortgage::calculate_mortgage(&input, settings.loan_cap()).to_report()
        }
        Command::Loan {
            principal,
            rate,
            years,
            payments_per_year,
        } => {
            let input = LoanInput {
                principal: coerce("principal", principal),
                annual_rate: coerce("rate", rate),
                years: coerce_count("years", years),
                payments_per_year: coerce_count("payments-per-year", payments_per_year),
            };
            mortgage::calculate_loan(&input, settings.loan_cap()).to_report()
        }
        Command::CreditCard {
            balance,
            apr,
            payment,
            months,
        } => {
            let plan = match (payment, months) {
                (_, Some(months)) => RepaymentPlan::TargetMonths(coerce_count("months", months)),
                (Some(payment), None) => RepaymentPlan::FixedPayment(coerce("payment", payment)),
                (None, None) => RepaymentPlan::FixedPayment(0.0),
            };
            let input = CreditCardInput {
                balance: coerce("balance", balance),
                apr: coerce("apr", apr),
                plan,
            };
            credit_card::calculate_credit_card(&input, settings.loan_cap()).to_report()
        }
        Command::Sip {
            monthly,
            rate,
            years,
        } => {
            let input = SipInput {
                monthly_investment: coerce("monthly", monthly),
                annual_return: coerce("rate", rate),
                years: coerce_count("years", years),
            };
            sip::calculate_sip(&input, settings.drawdown_cap()).to_report()
        }
        Command::Savings {
            initial,
            monthly,
            rate,
            compounding,
            years,
        } => {
            let input = SavingsInput {
                initial_deposit: coerce("initial", initial),
                monthly_contribution: coerce("monthly", monthly),
                annual_rate: coerce("rate", rate),
                compounding: *compounding,
                years: coerce_count("years", years),
            };
            savings::calculate_savings(&input, settings.drawdown_cap()).to_report()
        }
        Command::Investment {
            initial,
            contribution,
            frequency,
            rate,
            years,
            timing,
        } => {
            let input = InvestmentInput {
                initial_amount: coerce("initial", initial),
                contribution: coerce("contribution", contribution),
                contribution_frequency: *frequency,
                annual_return: coerce("rate", rate),
                years: coerce_count("years", years),
                timing: *timing,
            };
            investment::calculate_investment(&input, settings.drawdown_cap()).to_report()
        }
        Command::Compound {
            principal,
            rate,
            years,
            compounding,
        } => {
            let input = CompoundInterestInput {
                principal: coerce("principal", principal),
                annual_rate: coerce("rate", rate),
                compounding: *compounding,
                years: coerce("years", years),
            };
            interest::calculate_compound_interest(&input).to_report()
        }
        Command::SimpleInterest {
            principal,
            rate,
            years,
        } => {
            let input = SimpleInterestInput {
                principal: coerce("principal", principal),
                annual_rate: coerce("rate", rate),
                years: coerce("years", years),
            };
            interest::calculate_simple_interest(&input).to_report()
        }
        Command::Retirement {
            savings,
            withdrawal,
            rate,
            inflation,
        } => {
            let input = RetirementInput {
                savings: coerce("savings", savings),
                monthly_withdrawal: coerce("withdrawal", withdrawal),
                annual_return: coerce("rate", rate),
                annual_inflation: coerce("inflation", inflation),
            };
            retirement::calculate_retirement(&input, settings.drawdown_cap()).to_report()
        }
        Command::Convert { value, from, to } => {
            units::conversion(coerce("value", value), from, to)?.to_report()
        }
        Command::Cooking {
            value,
            from,
            to,
            ingredient,
        } => cooking::kitchen_conversion(coerce("value", value), from, to, *ingredient)?
            .to_report(),
        Command::Oven { value, scale } => {
            cooking::oven_temperature(coerce("value", value), *scale).to_report()
        }
        Command::Scale { value, from } => {
            number_scale::scale_conversion(coerce("value", value), *from).to_report()
        }
        Command::Currency {
            amount,
            from,
            to,
            from_scale,
            to_scale,
        } => {
            let provider = HttpRateProvider::new(
                settings.rates_endpoint(),
                Duration::from_secs(settings.rates_timeout_seconds()),
            )?;
            let converter = CurrencyConverter::new(provider);
            let request = CurrencyRequest::new(coerce("amount", amount), from, to)
                .with_scales(*from_scale, *to_scale);
            converter.convert(&request).await?.to_report()
        }
        Command::Bmi {
            weight,
            height,
            system,
        } => {
            let input = BmiInput {
                weight: coerce("weight", weight),
                height: coerce("height", height),
                system: *system,
            };
            bmi::calculate_bmi(&input).to_report()
        }
        Command::Bmr {
            weight,
            height,
            age,
            sex,
            activity,
            system,
        } => {
            let input = BmrInput {
                weight: coerce("weight", weight),
                height: coerce("height", height),
                age: coerce("age", age),
                sex: *sex,
                activity: *activity,
                system: *system,
            };
            bmr::calculate_bmr(&input).to_report()
        }
        Command::Calories {
            weight,
            minutes,
            activity,
            met,
            system,
        } => {
            let input = CaloriesInput {
                weight: coerce("weight", weight),
                system: *system,
                minutes: coerce("minutes", minutes),
                activity: *activity,
                custom_met: met.as_deref().map(|m| coerce("met", m)),
            };
            calories::calculate_calories(&input).to_report()
        }
        Command::Pace {
            distance,
            time,
            unit,
            predict,
        } => {
            let input = PaceInput {
                distance: coerce("distance", distance),
                unit: *unit,
                total_seconds: pace::parse_duration(time),
                predict_distance: predict.as_deref().map(|d| coerce("predict", d)),
            };
            pace::calculate_pace(&input).to_report()
        }
    };

    tracing::debug!("Built report '{}' with {} summary lines", report.title, report.summary.len());
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CliConfig;
    use clap::Parser;

    async fn run(args: &[&str]) -> Result<Report> {
        let cli = CliConfig::parse_from(args);
        build_report(&cli.command, &Settings::default()).await
    }

    #[tokio::test]
    async fn test_mortgage_command() {
        let report = run(&[
            "calckit", "mortgage", "--price", "$300,000", "--down", "60000", "--rate", "4.5",
        ])
        .await
        .unwrap();
        let payment = report.value("monthly_principal_and_interest").unwrap();
        assert!((payment - 1216.04).abs() < 0.005);
    }

    #[tokio::test]
    async fn test_malformed_numbers_become_zero() {
        let report = run(&["calckit", "loan", "--principal", "lots", "--rate", "5", "--years", "10"])
            .await
            .unwrap();
        assert_eq!(report.value("payment"), Some(0.0));
        assert!(report.table.unwrap().rows.is_empty());
    }

    #[tokio::test]
    async fn test_unparseable_mortgage_term_gives_empty_schedule() {
        let report = run(&[
            "calckit", "mortgage", "--price", "300000", "--rate", "4.5", "--years", "abc",
        ])
        .await
        .unwrap();
        assert_eq!(report.value("payoff_months"), Some(0.0));
        assert_eq!(report.value("total_interest"), Some(0.0));
        assert!(report.table.unwrap().rows.is_empty());
    }

    #[tokio::test]
    async fn test_negative_temperature_conversion() {
        let report = run(&["calckit", "convert", "-40", "c", "f"]).await.unwrap();
        let result = report.value("result").unwrap();
        assert!((result + 40.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_unknown_unit_is_an_error() {
        let err = run(&["calckit", "convert", "1", "parsec", "m"]).await.unwrap_err();
        assert!(err.user_friendly_message().contains("parsec"));
    }

    #[tokio::test]
    async fn test_credit_card_target_months() {
        let report = run(&[
            "calckit", "credit-card", "--balance", "3000", "--apr", "24", "--months", "12",
        ])
        .await
        .unwrap();
        assert_eq!(report.value("months_to_payoff"), Some(12.0));
    }

    #[tokio::test]
    async fn test_pace_command() {
        let report = run(&["calckit", "pace", "--distance", "5", "--time", "25:00"])
            .await
            .unwrap();
        assert_eq!(report.value("seconds_per_km"), Some(300.0));
    }
}
