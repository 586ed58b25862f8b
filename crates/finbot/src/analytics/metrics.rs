use super::dataset::Dataset;
use super::domain::Metric;
use super::trend::{TrendPoint, TrendSeries};
use serde::Serialize;

/// Net income of one company in two years.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NetIncomeChange {
    pub company: String,
    pub year1: i32,
    pub year2: i32,
    pub val1: f64,
    pub val2: f64,
    pub pct_change: f64,
}

impl NetIncomeChange {
    pub fn increased(&self) -> bool {
        self.pct_change > 0.0
    }
}

/// Side-by-side value of one metric for two companies.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompanyComparison {
    pub company_a: String,
    pub company_b: String,
    pub metric: Metric,
    pub year: Option<i32>,
    pub a_val: f64,
    pub b_val: f64,
    pub diff: f64,
    pub pct_diff: f64,
}

/// Percent change from `old` to `new`, relative to `|old|`.
///
/// A zero baseline yields `+inf` when the new value moved and `0` otherwise.
pub fn safe_pct_change(old: f64, new: f64) -> f64 {
    if old == 0.0 {
        return if new != 0.0 { f64::INFINITY } else { 0.0 };
    }
    (new - old) / old.abs() * 100.0
}

impl Dataset {
    /// Sum of total revenue over every matching row. `None` when nothing matches.
    pub fn total_revenue(&self, company: &str, year: Option<i32>) -> Option<f64> {
        let mut rows = self.filter(company, year).peekable();
        rows.peek()?;
        Some(rows.filter_map(|record| record.total_revenue).sum())
    }

    pub fn net_income_change(
        &self,
        company: &str,
        year1: i32,
        year2: i32,
    ) -> Option<NetIncomeChange> {
        let val1 = self.filter(company, Some(year1)).next()?.net_income?;
        let val2 = self.filter(company, Some(year2)).next()?.net_income?;

        Some(NetIncomeChange {
            company: company.to_string(),
            year1,
            year2,
            val1,
            val2,
            pct_change: safe_pct_change(val1, val2),
        })
    }

    /// Compares `metric` (a key such as `"total_revenue"`) between two companies
    /// using the first matching row of each. `pct_diff` is relative to `company_b`.
    pub fn compare_companies(
        &self,
        company_a: &str,
        company_b: &str,
        metric: &str,
        year: Option<i32>,
    ) -> Option<CompanyComparison> {
        let metric = Metric::from_key(metric).filter(|metric| metric.is_comparable())?;
        let a_val = self.filter(company_a, year).next()?.value(metric)?;
        let b_val = self.filter(company_b, year).next()?.value(metric)?;

        Some(CompanyComparison {
            company_a: company_a.to_string(),
            company_b: company_b.to_string(),
            metric,
            year,
            a_val,
            b_val,
            diff: a_val - b_val,
            pct_diff: safe_pct_change(b_val, a_val),
        })
    }

    /// Year-ordered values of `metric` for a company, skipping rows where either
    /// the year or the value is missing.
    pub fn trend_series(&self, company: &str, metric: &str) -> Option<TrendSeries> {
        let metric = Metric::from_key(metric)?;
        let mut points: Vec<TrendPoint> = self
            .filter(company, None)
            .filter_map(|record| {
                Some(TrendPoint {
                    year: record.year?,
                    value: record.value(metric)?,
                })
            })
            .collect();

        if points.is_empty() {
            return None;
        }
        points.sort_by_key(|point| point.year);

        Some(TrendSeries {
            company: company.to_string(),
            metric,
            points,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::domain::FinancialRecord;

    fn record(
        company: &str,
        year: Option<i32>,
        revenue: Option<f64>,
        income: Option<f64>,
    ) -> FinancialRecord {
        FinancialRecord {
            company: company.to_string(),
            year,
            total_revenue: revenue,
            net_income: income,
            total_assets: None,
            total_liabilities: None,
            operating_cash_flow: None,
        }
    }

    fn dataset() -> Dataset {
        Dataset::from_records(vec![
            record("Apple", Some(2023), Some(383285.0), Some(96995.0)),
            record("Apple", Some(2022), Some(394328.0), Some(99803.0)),
            record("Microsoft", Some(2023), Some(211915.0), Some(72361.0)),
            record("Microsoft", Some(2024), Some(245122.0), Some(88136.0)),
            record("Tesla", Some(2022), Some(81462.0), Some(12556.0)),
            record("Tesla", Some(2023), Some(96773.0), Some(14997.0)),
            record("Tesla", Some(2024), None, None),
            record("Tesla", None, Some(1.0), Some(1.0)),
            record("Rivian", Some(2022), Some(1658.0), Some(0.0)),
            record("Rivian", Some(2023), Some(4434.0), Some(0.0)),
            record("Rivian", Some(2024), Some(4970.0), Some(-4747.0)),
        ])
    }

    #[test]
    fn safe_pct_change_handles_zero_baseline() {
        assert_eq!(safe_pct_change(0.0, 5.0), f64::INFINITY);
        assert_eq!(safe_pct_change(0.0, -5.0), f64::INFINITY);
        assert_eq!(safe_pct_change(0.0, 0.0), 0.0);
        assert!((safe_pct_change(-50.0, -25.0) - 50.0).abs() < 1e-9);
        assert!((safe_pct_change(200.0, 150.0) + 25.0).abs() < 1e-9);
    }

    #[test]
    fn total_revenue_sums_matching_rows() {
        let data = dataset();
        assert_eq!(data.total_revenue("Microsoft", Some(2024)), Some(245122.0));
        assert_eq!(data.total_revenue("apple", None), Some(383285.0 + 394328.0));
        assert_eq!(data.total_revenue("Apple", Some(2021)), None);
        assert_eq!(data.total_revenue("Amazon", None), None);
    }

    #[test]
    fn total_revenue_sums_duplicate_company_years() {
        let data = Dataset::from_records(vec![
            record("Apple", Some(2023), Some(100.0), None),
            record("APPLE", Some(2023), Some(50.0), None),
            record("Apple", Some(2023), None, None),
        ]);
        assert_eq!(data.total_revenue("Apple", Some(2023)), Some(150.0));
    }

    #[test]
    fn net_income_change_reports_percent_change() {
        let change = dataset()
            .net_income_change("Tesla", 2022, 2023)
            .expect("both years present");
        let expected = (14997.0 - 12556.0) / 12556.0 * 100.0;
        assert!((change.pct_change - expected).abs() < 1e-6);
        assert_eq!((change.val1, change.val2), (12556.0, 14997.0));
        assert!(change.increased());
    }

    #[test]
    fn net_income_change_flips_sign_when_years_swap() {
        let data = dataset();
        let forward = data.net_income_change("Apple", 2022, 2023).expect("forward");
        let backward = data.net_income_change("Apple", 2023, 2022).expect("backward");
        assert!(forward.pct_change < 0.0);
        assert!(backward.pct_change > 0.0);
        assert_eq!(forward.val1, backward.val2);
    }

    #[test]
    fn net_income_change_requires_both_years() {
        let data = dataset();
        assert!(data.net_income_change("Tesla", 2021, 2023).is_none());
        assert!(data.net_income_change("Tesla", 2023, 2024).is_none());
        let flat = data.net_income_change("Rivian", 2022, 2023).expect("zero baseline");
        assert_eq!(flat.pct_change, 0.0);
        assert!(!flat.increased());
        let from_zero = data.net_income_change("Rivian", 2023, 2024).expect("zero baseline");
        assert!(from_zero.pct_change.is_infinite());
    }

    #[test]
    fn compare_companies_uses_b_as_baseline() {
        let comparison = dataset()
            .compare_companies("Apple", "Microsoft", "total_revenue", Some(2023))
            .expect("comparison");
        assert!(comparison.a_val > comparison.b_val);
        assert_eq!(comparison.diff, 383285.0 - 211915.0);
        let expected = (383285.0 - 211915.0) / 211915.0 * 100.0;
        assert!((comparison.pct_diff - expected).abs() < 1e-9);
        assert_eq!(comparison.metric, Metric::TotalRevenue);
    }

    #[test]
    fn compare_companies_rejects_other_metrics_and_missing_sides() {
        let data = dataset();
        for metric in ["total_assets", "operating_cash_flow", "ebitda", ""] {
            assert!(data
                .compare_companies("Apple", "Microsoft", metric, None)
                .is_none());
        }
        assert!(data
            .compare_companies("Apple", "Microsoft", "NET_INCOME", None)
            .is_some());
        assert!(data
            .compare_companies("Apple", "Microsoft", "total_revenue", Some(2022))
            .is_none());
    }

    #[test]
    fn trend_series_is_year_ordered_and_skips_missing_values() {
        let series = dataset()
            .trend_series("tesla", "total_revenue")
            .expect("series");
        let years: Vec<i32> = series.points.iter().map(|point| point.year).collect();
        assert_eq!(years, vec![2022, 2023]);
        assert!(series.points.windows(2).all(|pair| pair[0].year <= pair[1].year));
        assert_eq!(series.company, "tesla");
    }

    #[test]
    fn trend_series_rejects_unknown_metric_or_empty_result() {
        let data = dataset();
        assert!(data.trend_series("Tesla", "ebitda").is_none());
        assert!(data.trend_series("Tesla", "total_assets").is_none());
        assert!(data.trend_series("Amazon", "total_revenue").is_none());
    }
}
