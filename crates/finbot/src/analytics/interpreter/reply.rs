use crate::analytics::metrics::NetIncomeChange;

pub const FALLBACK_HELP: &str = "Sorry, I can answer things like:\n\
- 'Total revenue for Apple in 2023'\n\
- 'Net income change for Microsoft between 2022 and 2024'\n\
- 'Show revenue trend for Tesla'";

pub const ASK_COMPANY: &str = "Which company?";
pub const ASK_TREND_COMPANY: &str = "Which company's trend?";
pub const NO_DATA: &str = "No data found.";
pub const NO_DATA_FOR_YEARS: &str = "No data for those years.";

pub(crate) fn total_revenue(company: &str, year: Option<i32>, value: f64) -> String {
    match year {
        Some(year) => format!(
            "Total revenue for {company} in {year} is {}.",
            currency(value)
        ),
        None => format!("Total revenue for {company} is {}.", currency(value)),
    }
}

pub(crate) fn net_income_change(company: &str, change: &NetIncomeChange) -> String {
    let direction = if change.increased() {
        "increased"
    } else {
        "decreased"
    };
    format!(
        "{company}'s net income {direction} from {} in {} to {} in {} ({:.2}% change).",
        currency(change.val1),
        change.year1,
        currency(change.val2),
        change.year2,
        change.pct_change
    )
}

/// Whole dollars with thousands separators, e.g. `$383,285` or `-$4,747`.
pub fn currency(value: f64) -> String {
    let sign = if value.round() < 0.0 { "-" } else { "" };
    format!("{sign}${}", group_thousands(value.abs().round()))
}

fn group_thousands(whole: f64) -> String {
    let digits = format!("{whole:.0}");
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn change(val1: f64, val2: f64, pct_change: f64) -> NetIncomeChange {
        NetIncomeChange {
            company: "Tesla".to_string(),
            year1: 2022,
            year2: 2023,
            val1,
            val2,
            pct_change,
        }
    }

    #[test]
    fn currency_groups_thousands_and_rounds() {
        assert_eq!(currency(383285.0), "$383,285");
        assert_eq!(currency(1_234_567.6), "$1,234,568");
        assert_eq!(currency(999.0), "$999");
        assert_eq!(currency(0.0), "$0");
        assert_eq!(currency(-4747.0), "-$4,747");
        assert_eq!(currency(-0.2), "$0");
    }

    #[test]
    fn total_revenue_mentions_year_only_when_given() {
        assert_eq!(
            total_revenue("Apple", Some(2023), 383285.0),
            "Total revenue for Apple in 2023 is $383,285."
        );
        assert_eq!(
            total_revenue("Apple", None, 10.0),
            "Total revenue for Apple is $10."
        );
    }

    #[test]
    fn net_income_change_states_direction_and_percent() {
        let text = net_income_change("Tesla", &change(12556.0, 14997.0, 19.4409));
        assert_eq!(
            text,
            "Tesla's net income increased from $12,556 in 2022 to $14,997 in 2023 (19.44% change)."
        );

        let text = net_income_change("Tesla", &change(0.0, 0.0, 0.0));
        assert!(text.contains("decreased"));

        let text = net_income_change("Tesla", &change(0.0, 5.0, f64::INFINITY));
        assert_eq!(
            text,
            "Tesla's net income increased from $0 in 2022 to $5 in 2023 (inf% change)."
        );
    }
}
