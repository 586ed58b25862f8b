//! Financial statements dataset, the metrics computed over it and the
//! free-text interpreter that answers questions with them.

pub mod dataset;
pub mod domain;
pub mod interpreter;
pub mod metrics;
pub mod trend;

pub use dataset::{Dataset, DatasetError};
pub use domain::{FinancialRecord, Metric};
pub use interpreter::{FinancialInterpreter, IntentKind, ParsedQuery, Reply, SessionState};
pub use metrics::{safe_pct_change, CompanyComparison, NetIncomeChange};
pub use trend::{RenderError, TrendPoint, TrendRenderer, TrendSeries};
