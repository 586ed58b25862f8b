use super::domain::Metric;
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrendPoint {
    pub year: i32,
    pub value: f64,
}

/// Values of one metric for one company, ascending by year.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendSeries {
    pub company: String,
    pub metric: Metric,
    pub points: Vec<TrendPoint>,
}

impl TrendSeries {
    /// File name (without extension) for a chart of this series rendered at `at`.
    /// Characters outside `[A-Za-z0-9_.-]` in the company name become `_`.
    pub fn file_stem(&self, at: DateTime<Utc>) -> String {
        let company: String = self
            .company
            .chars()
            .map(|ch| {
                if ch.is_ascii_alphanumeric() || matches!(ch, '_' | '.' | '-') {
                    ch
                } else {
                    '_'
                }
            })
            .collect();
        format!("{company}_{}_{}", self.metric.key(), at.timestamp())
    }

    /// Chart heading, e.g. "Apple - Total Revenue Trend".
    pub fn title(&self) -> String {
        format!("{} - {} Trend", self.company, title_case(self.metric.label()))
    }
}

pub(crate) fn title_case(value: &str) -> String {
    value
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Turns a series into a servable image and returns its public reference.
///
/// Implementations own all side effects (files, object storage); the
/// interpreter only hands over the series and a suggested file stem.
pub trait TrendRenderer: Send + Sync {
    fn render(&self, series: &TrendSeries, file_stem: &str) -> Result<String, RenderError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("cannot chart an empty series")]
    EmptySeries,
    #[error("failed to write chart: {0}")]
    Io(#[from] std::io::Error),
    #[error("chart backend unavailable: {0}")]
    Unavailable(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn series(company: &str) -> TrendSeries {
        TrendSeries {
            company: company.to_string(),
            metric: Metric::NetIncome,
            points: vec![TrendPoint {
                year: 2023,
                value: 1.0,
            }],
        }
    }

    #[test]
    fn file_stem_combines_company_metric_and_timestamp() {
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).single().expect("valid");
        assert_eq!(
            series("Berkshire Hathaway").file_stem(at),
            "Berkshire_Hathaway_net_income_1704067200"
        );
    }

    #[test]
    fn file_stem_replaces_path_separators_and_symbols() {
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).single().expect("valid");
        let stem = series("AT&T / Mobile").file_stem(at);
        assert_eq!(stem, "AT_T___Mobile_net_income_1704067200");
        assert!(!stem.contains(['/', '\\']));
    }

    #[test]
    fn title_uses_title_cased_metric_label() {
        assert_eq!(series("Tesla").title(), "Tesla - Net Income Trend");
        assert_eq!(title_case("operating cash flow"), "Operating Cash Flow");
    }
}
