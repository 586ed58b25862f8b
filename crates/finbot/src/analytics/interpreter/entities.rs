use crate::analytics::domain::Metric;
use regex::Regex;
use std::sync::OnceLock;

/// Minimum token-sort similarity (0-100) for a fuzzy company match.
pub const COMPANY_MATCH_THRESHOLD: f64 = 65.0;

fn year_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\b(?:19|20)[0-9]{2}\b").expect("year pattern compiles"))
}

fn subject_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?i)for\s+([A-Za-z0-9 &._-]+)").expect("subject pattern compiles")
    })
}

/// Four-digit 19xx/20xx years in order of appearance, duplicates kept.
pub fn parse_years(text: &str) -> Vec<i32> {
    year_pattern()
        .find_iter(text)
        .filter_map(|found| found.as_str().parse().ok())
        .collect()
}

pub fn detect_metric(lowered: &str) -> Option<Metric> {
    if lowered.contains("revenue") {
        Some(Metric::TotalRevenue)
    } else if lowered.contains("net income") || lowered.contains("profit") {
        Some(Metric::NetIncome)
    } else {
        None
    }
}

/// Finds the company a question is about.
///
/// A known name appearing verbatim (ignoring case) wins; otherwise the phrase
/// after "for" is fuzzy matched against the known names.
pub fn resolve_company(text: &str, companies: &[String]) -> Option<String> {
    let lowered = text.to_lowercase();
    if let Some(company) = companies
        .iter()
        .find(|company| lowered.contains(&company.to_lowercase()))
    {
        return Some(company.clone());
    }

    let subject = subject_pattern()
        .captures(text)
        .and_then(|captures| captures.get(1))
        .map(|found| found.as_str().trim())?;

    best_company_match(subject, companies, COMPANY_MATCH_THRESHOLD)
}

/// Highest scoring candidate at or above `threshold`; the earliest wins ties.
pub fn best_company_match(name: &str, companies: &[String], threshold: f64) -> Option<String> {
    if name.trim().is_empty() {
        return None;
    }

    let mut best: Option<(&String, f64)> = None;
    for company in companies {
        let score = token_sort_ratio(name, company);
        if best.map_or(true, |(_, top)| score > top) {
            best = Some((company, score));
        }
    }

    best.filter(|(_, score)| *score >= threshold)
        .map(|(company, _)| company.clone())
}

/// Order-insensitive similarity on a 0-100 scale: both inputs are lowercased,
/// split into tokens, sorted and rejoined, then scored as
/// `2 * LCS / (len_a + len_b)` over characters (the indel ratio).
pub fn token_sort_ratio(left: &str, right: &str) -> f64 {
    indel_ratio(&sorted_tokens(left), &sorted_tokens(right))
}

fn indel_ratio(left: &str, right: &str) -> f64 {
    let left: Vec<char> = left.chars().collect();
    let right: Vec<char> = right.chars().collect();
    let total = left.len() + right.len();
    if total == 0 {
        return 100.0;
    }
    200.0 * longest_common_subsequence(&left, &right) as f64 / total as f64
}

fn longest_common_subsequence(left: &[char], right: &[char]) -> usize {
    let mut previous = vec![0usize; right.len() + 1];
    let mut current = vec![0usize; right.len() + 1];
    for &a in left {
        for (index, &b) in right.iter().enumerate() {
            current[index + 1] = if a == b {
                previous[index] + 1
            } else {
                current[index].max(previous[index + 1])
            };
        }
        std::mem::swap(&mut previous, &mut current);
    }
    previous[right.len()]
}

fn sorted_tokens(value: &str) -> String {
    let lowered = value.to_lowercase();
    let mut tokens: Vec<&str> = lowered.split_whitespace().collect();
    tokens.sort_unstable();
    tokens.join(" ")
}
