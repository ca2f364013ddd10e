use crate::domain::model::Report;
use crate::domain::ports::Reportable;
use serde::{Deserialize, Serialize};

const KM_PER_MILE: f64 = 1.609_344;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum DistanceUnit {
    #[default]
    Km,
    Mile,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PaceInput {
    pub distance: f64,
    pub unit: DistanceUnit,
    pub total_seconds: f64,
    /// 以目前配速預估完成此距離所需時間（同 `unit`）
    pub predict_distance: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaceResult {
    pub seconds_per_km: f64,
    pub seconds_per_mile: f64,
    pub kmh: f64,
    pub mph: f64,
    pub predicted_seconds: Option<f64>,
}

pub fn calculate_pace(input: &PaceInput) -> PaceResult {
    let km = match input.unit {
        DistanceUnit::Km => input.distance,
        DistanceUnit::Mile => input.distance * KM_PER_MILE,
    };
    let seconds = input.total_seconds.max(0.0);

    if km <= 0.0 || seconds <= 0.0 {
        return PaceResult {
            seconds_per_km: 0.0,
            seconds_per_mile: 0.0,
            kmh: 0.0,
            mph: 0.0,
            predicted_seconds: input.predict_distance.map(|_| 0.0),
        };
    }

    let seconds_per_km = seconds / km;
    let kmh = km / (seconds / 3600.0);
    let predicted_seconds = input.predict_distance.map(|d| {
        let d_km = match input.unit {
            DistanceUnit::Km => d,
            DistanceUnit::Mile => d * KM_PER_MILE,
        };
        seconds_per_km * d_km.max(0.0)
    });

    PaceResult {
        seconds_per_km,
        seconds_per_mile: seconds_per_km * KM_PER_MILE,
        kmh,
        mph: kmh / KM_PER_MILE,
        predicted_seconds,
    }
}

/// `h:mm:ss` 或 `mm:ss` 或純秒數；無法解析的部分視為 0
pub fn parse_duration(raw: &str) -> f64 {
    raw.split(':')
        .map(crate::utils::input::parse_input)
        .fold(0.0, |acc, part| acc * 60.0 + part)
}

pub fn format_duration(seconds: f64) -> String {
    let total = seconds.max(0.0).round() as u64;
    let (h, m, s) = (total / 3600, (total % 3600) / 60, total % 60);
    if h > 0 {
        format!("{}:{:02}:{:02}", h, m, s)
    } else {
        format!("{}:{:02}", m, s)
    }
}

impl Reportable for PaceResult {
    fn to_report(&self) -> Report {
        let mut report = Report::new("Pace")
            .line_with_unit("seconds_per_km", self.seconds_per_km, "s/km")
            .line_with_unit("seconds_per_mile", self.seconds_per_mile, "s/mi")
            .line_with_unit("speed_kmh", self.kmh, "km/h")
            .line_with_unit("speed_mph", self.mph, "mph")
            .note(format!("pace: {} per km", format_duration(self.seconds_per_km)));
        if let Some(predicted) = self.predicted_seconds {
            report = report
                .line_with_unit("predicted_seconds", predicted, "s")
                .note(format!("predicted finish: {}", format_duration(predicted)));
        }
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_10k_in_50_minutes() {
        let result = calculate_pace(&PaceInput {
            distance: 10.0,
            unit: DistanceUnit::Km,
            total_seconds: 3000.0,
            predict_distance: Some(42.195),
        });
        assert!((result.seconds_per_km - 300.0).abs() < 1e-9);
        assert!((result.kmh - 12.0).abs() < 1e-9);
        assert!((result.predicted_seconds.unwrap() - 12_658.5).abs() < 1e-6);
    }

    #[test]
    fn test_zero_distance() {
        let result = calculate_pace(&PaceInput {
            total_seconds: 600.0,
            ..Default::default()
        });
        assert_eq!(result.seconds_per_km, 0.0);
        assert_eq!(result.kmh, 0.0);
    }

    #[test]
    fn test_parse_and_format_duration() {
        assert_eq!(parse_duration("1:02:03"), 3723.0);
        assert_eq!(parse_duration("25:30"), 1530.0);
        assert_eq!(parse_duration("90"), 90.0);
        assert_eq!(parse_duration("abc"), 0.0);
        assert_eq!(format_duration(3723.0), "1:02:03");
        assert_eq!(format_duration(330.0), "5:30");
    }
}
