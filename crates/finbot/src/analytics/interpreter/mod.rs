//! Keyword-driven question answering over the financial dataset.
//!
//! Questions are classified in a single pass by fixed rules checked in order:
//! total revenue, net income change, trend, then a help fallback. Unresolvable
//! input never fails; it degrades to a clarifying question or the help text.

pub mod entities;
pub mod reply;

use crate::analytics::dataset::Dataset;
use crate::analytics::domain::Metric;
use crate::analytics::trend::TrendRenderer;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};

/// Caller-owned conversation state, passed through untouched.
pub type SessionState = serde_json::Map<String, serde_json::Value>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntentKind {
    TotalRevenue,
    NetIncomeChange,
    Trend,
    Fallback,
}

impl IntentKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::TotalRevenue => "total_revenue",
            Self::NetIncomeChange => "net_income_change",
            Self::Trend => "trend",
            Self::Fallback => "fallback",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Reply {
    pub text: String,
    pub image: Option<String>,
    pub session: SessionState,
    pub intent: IntentKind,
}

/// Entities pulled out of a question before dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedQuery {
    pub lowered: String,
    pub company: Option<String>,
    pub years: Vec<i32>,
    pub metric: Option<Metric>,
}

impl ParsedQuery {
    fn mentions_any(&self, keywords: &[&str]) -> bool {
        keywords.iter().any(|keyword| self.lowered.contains(keyword))
    }
}

pub struct FinancialInterpreter<T> {
    dataset: Arc<Dataset>,
    renderer: Arc<T>,
}

impl<T> FinancialInterpreter<T>
where
    T: TrendRenderer + 'static,
{
    pub fn new(dataset: Arc<Dataset>, renderer: Arc<T>) -> Self {
        Self { dataset, renderer }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn parse(&self, text: &str) -> ParsedQuery {
        let lowered = text.to_lowercase();
        ParsedQuery {
            company: entities::resolve_company(text, self.dataset.companies()),
            years: entities::parse_years(text),
            metric: entities::detect_metric(&lowered),
            lowered,
        }
    }

    /// Answers one free-text question. The session comes back unchanged.
    pub fn interpret(&self, text: &str, session: SessionState) -> Reply {
        let query = self.parse(text);
        debug!(
            company = ?query.company,
            years = ?query.years,
            metric = ?query.metric,
            "parsed financial question"
        );

        let (intent, text, image) = if query.metric == Some(Metric::TotalRevenue)
            && query.mentions_any(&["total", "sum", "overall"])
        {
            let text = self.answer_total_revenue(&query);
            (IntentKind::TotalRevenue, text, None)
        } else if query.metric == Some(Metric::NetIncome)
            && query.mentions_any(&["change"])
            && query.years.len() >= 2
        {
            let text = self.answer_net_income_change(&query);
            (IntentKind::NetIncomeChange, text, None)
        } else if query.mentions_any(&["trend", "plot", "chart"]) {
            let (text, image) = self.answer_trend(&query);
            (IntentKind::Trend, text, image)
        } else {
            (IntentKind::Fallback, reply::FALLBACK_HELP.to_string(), None)
        };

        debug!(intent = intent.label(), has_image = image.is_some(), "answered question");

        Reply {
            text,
            image,
            session,
            intent,
        }
    }

    fn answer_total_revenue(&self, query: &ParsedQuery) -> String {
        let Some(company) = query.company.as_deref() else {
            return reply::ASK_COMPANY.to_string();
        };
        let year = query.years.first().copied();

        match self.dataset.total_revenue(company, year) {
            Some(value) => reply::total_revenue(company, year, value),
            None => reply::NO_DATA.to_string(),
        }
    }

    fn answer_net_income_change(&self, query: &ParsedQuery) -> String {
        let Some(company) = query.company.as_deref() else {
            return reply::ASK_COMPANY.to_string();
        };

        match self
            .dataset
            .net_income_change(company, query.years[0], query.years[1])
        {
            Some(change) => reply::net_income_change(company, &change),
            None => reply::NO_DATA_FOR_YEARS.to_string(),
        }
    }

    fn answer_trend(&self, query: &ParsedQuery) -> (String, Option<String>) {
        let Some(company) = query.company.as_deref() else {
            return (reply::ASK_TREND_COMPANY.to_string(), None);
        };
        let metric = query.metric.unwrap_or(Metric::TotalRevenue);

        let Some(series) = self.dataset.trend_series(company, metric.key()) else {
            return (
                format!("No {} data found for {company}.", metric.label()),
                None,
            );
        };

        let file_stem = series.file_stem(Utc::now());
        match self.renderer.render(&series, &file_stem) {
            Ok(image) => (
                format!("Here's the {} trend for {company}.", metric.label()),
                Some(image),
            ),
            Err(error) => {
                warn!(%company, metric = metric.key(), %error, "trend chart rendering failed");
                (
                    format!(
                        "I couldn't render the {} trend chart for {company}.",
                        metric.label()
                    ),
                    None,
                )
            }
        }
    }
}
