use serde::{Deserialize, Serialize};
use std::fmt;

/// Numeric columns carried by every financial statement row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    TotalRevenue,
    NetIncome,
    TotalAssets,
    TotalLiabilities,
    OperatingCashFlow,
}

impl Metric {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::TotalRevenue,
            Self::NetIncome,
            Self::TotalAssets,
            Self::TotalLiabilities,
            Self::OperatingCashFlow,
        ]
    }

    pub const fn key(self) -> &'static str {
        match self {
            Self::TotalRevenue => "total_revenue",
            Self::NetIncome => "net_income",
            Self::TotalAssets => "total_assets",
            Self::TotalLiabilities => "total_liabilities",
            Self::OperatingCashFlow => "operating_cash_flow",
        }
    }

    /// Lowercase phrase used in replies, e.g. "total revenue".
    pub const fn label(self) -> &'static str {
        match self {
            Self::TotalRevenue => "total revenue",
            Self::NetIncome => "net income",
            Self::TotalAssets => "total assets",
            Self::TotalLiabilities => "total liabilities",
            Self::OperatingCashFlow => "operating cash flow",
        }
    }

    /// Parses a metric key, accepting the raw dataset column name for operating
    /// cash flow as well.
    pub fn from_key(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "total_revenue" => Some(Self::TotalRevenue),
            "net_income" => Some(Self::NetIncome),
            "total_assets" => Some(Self::TotalAssets),
            "total_liabilities" => Some(Self::TotalLiabilities),
            "operating_cash_flow" | "cash_flow_from_operating_activities" => {
                Some(Self::OperatingCashFlow)
            }
            _ => None,
        }
    }

    /// Only these two metrics can be compared across companies.
    pub const fn is_comparable(self) -> bool {
        matches!(self, Self::TotalRevenue | Self::NetIncome)
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// One row of the dataset. Missing or unparsable numbers are `None`, never zero.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FinancialRecord {
    pub company: String,
    pub year: Option<i32>,
    pub total_revenue: Option<f64>,
    pub net_income: Option<f64>,
    pub total_assets: Option<f64>,
    pub total_liabilities: Option<f64>,
    pub operating_cash_flow: Option<f64>,
}

impl FinancialRecord {
    pub fn value(&self, metric: Metric) -> Option<f64> {
        match metric {
            Metric::TotalRevenue => self.total_revenue,
            Metric::NetIncome => self.net_income,
            Metric::TotalAssets => self.total_assets,
            Metric::TotalLiabilities => self.total_liabilities,
            Metric::OperatingCashFlow => self.operating_cash_flow,
        }
    }

    pub fn is_company(&self, company: &str) -> bool {
        !self.company.is_empty() && self.company.to_lowercase() == company.to_lowercase()
    }
}
