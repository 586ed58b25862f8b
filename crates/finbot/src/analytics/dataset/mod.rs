mod normalizer;
mod parser;

use crate::analytics::domain::FinancialRecord;
use std::collections::BTreeSet;
use std::io::Read;
use std::path::Path;
use tracing::info;

use parser::ParseFailure;

#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("failed to read financial dataset: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid financial dataset: {0}")]
    Csv(#[from] csv::Error),
    #[error("financial dataset is missing required column '{0}'")]
    MissingColumn(&'static str),
}

impl From<ParseFailure> for DatasetError {
    fn from(value: ParseFailure) -> Self {
        match value {
            ParseFailure::Csv(err) => Self::Csv(err),
            ParseFailure::MissingColumn(column) => Self::MissingColumn(column),
        }
    }
}

/// Immutable, in-memory financial statements table.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<FinancialRecord>,
    companies: Vec<String>,
}

impl Dataset {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, DatasetError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)?;
        let dataset = Self::from_reader(file)?;
        info!(
            path = %path.display(),
            rows = dataset.len(),
            companies = dataset.companies.len(),
            "financial dataset loaded"
        );
        Ok(dataset)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, DatasetError> {
        let records = parser::parse_records(reader)?;
        Ok(Self::from_records(records))
    }

    pub fn from_records(records: Vec<FinancialRecord>) -> Self {
        let companies = records
            .iter()
            .map(|record| record.company.trim())
            .filter(|company| !company.is_empty())
            .map(str::to_string)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        Self { records, companies }
    }

    /// Distinct company names, sorted, as spelled in the source.
    pub fn companies(&self) -> &[String] {
        &self.companies
    }

    pub fn records(&self) -> &[FinancialRecord] {
        &self.records
    }

    /// Rows for `company` (case-insensitive), optionally pinned to one year.
    pub fn filter<'a>(
        &'a self,
        company: &'a str,
        year: Option<i32>,
    ) -> impl Iterator<Item = &'a FinancialRecord> + 'a {
        self.records.iter().filter(move |record| {
            record.is_company(company) && year.map_or(true, |year| record.year == Some(year))
        })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
