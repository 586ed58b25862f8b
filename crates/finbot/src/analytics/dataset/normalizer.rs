/// Canonical column key: trimmed, lowercased, spaces replaced by underscores.
pub(crate) fn normalize_header(value: &str) -> String {
    let cleaned = value.replace(['\u{feff}', '\u{200b}'], "");
    cleaned.trim().to_lowercase().replace(' ', "_")
}
