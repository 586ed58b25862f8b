use super::normalizer::normalize_header;
use crate::analytics::domain::FinancialRecord;
use csv::StringRecord;
use serde::{Deserialize, Deserializer};
use std::io::Read;

pub(crate) const REQUIRED_COLUMNS: [&str; 2] = ["company", "year"];

#[derive(Debug)]
pub(crate) enum ParseFailure {
    Csv(csv::Error),
    MissingColumn(&'static str),
}

impl From<csv::Error> for ParseFailure {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

pub(crate) fn parse_records<R: Read>(reader: R) -> Result<Vec<FinancialRecord>, ParseFailure> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers: StringRecord = csv_reader
        .headers()?
        .iter()
        .map(normalize_header)
        .collect();

    if let Some(missing) = REQUIRED_COLUMNS
        .iter()
        .copied()
        .find(|column| !headers.iter().any(|header| header == *column))
    {
        return Err(ParseFailure::MissingColumn(missing));
    }

    csv_reader.set_headers(headers);

    let mut records = Vec::new();
    for row in csv_reader.deserialize::<FinancialRow>() {
        records.push(row?.into_record());
    }

    Ok(records)
}

#[derive(Debug, Deserialize)]
struct FinancialRow {
    #[serde(default, deserialize_with = "empty_string_as_none")]
    company: Option<String>,
    #[serde(default, deserialize_with = "lenient_year")]
    year: Option<i32>,
    #[serde(default, deserialize_with = "lenient_number")]
    total_revenue: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    net_income: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    total_assets: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    total_liabilities: Option<f64>,
    #[serde(
        rename = "cash_flow_from_operating_activities",
        alias = "operating_cash_flow",
        default,
        deserialize_with = "lenient_number"
    )]
    operating_cash_flow: Option<f64>,
}

impl FinancialRow {
    fn into_record(self) -> FinancialRecord {
        FinancialRecord {
            company: self.company.unwrap_or_default(),
            year: self.year,
            total_revenue: self.total_revenue,
            net_income: self.net_income,
            total_assets: self.total_assets,
            total_liabilities: self.total_liabilities,
            operating_cash_flow: self.operating_cash_flow,
        }
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty()))
}

fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.as_deref().and_then(parse_number))
}

fn lenient_year<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.as_deref().and_then(parse_year))
}

fn parse_number(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    let unsigned = trimmed.strip_prefix('$').unwrap_or(trimmed);
    let cleaned = unsigned.replace(',', "");
    if cleaned.is_empty() {
        return None;
    }

    cleaned
        .parse::<f64>()
        .ok()
        .filter(|number| number.is_finite())
}

fn parse_year(value: &str) -> Option<i32> {
    let number = parse_number(value)?;
    if number.fract() != 0.0 || number < f64::from(i32::MIN) || number > f64::from(i32::MAX) {
        return None;
    }
    Some(number as i32)
}

#[cfg(test)]
pub(crate) fn parse_number_for_tests(value: &str) -> Option<f64> {
    parse_number(value)
}

#[cfg(test)]
pub(crate) fn parse_year_for_tests(value: &str) -> Option<i32> {
    parse_year(value)
}
