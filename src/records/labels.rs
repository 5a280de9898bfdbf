use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Fallback label for an absent category.
pub const UNCATEGORIZED: &str = "Uncategorized";
/// Fallback label for every other absent dimension value.
pub const UNKNOWN: &str = "Unknown";

/// Raw spellings that recur in upstream exports, folded to one canonical
/// label so they land in the same group.
static LABEL_ALIASES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("gpay", "Google Pay"),
        ("google pay", "Google Pay"),
        ("cc", "Card"),
        ("credit card", "Card"),
        ("debit card", "Card"),
        ("upi payment", "UPI"),
        ("n/a", ""),
        ("-", ""),
    ])
});

/// Trims and collapses internal whitespace, then applies the alias table.
/// Returns an empty string when nothing usable remains; callers substitute
/// their dimension's fallback label.
pub fn normalize_label(raw: &str) -> String {
    let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    match LABEL_ALIASES.get(collapsed.to_ascii_lowercase().as_str()) {
        Some(canonical) => canonical.to_string(),
        None => collapsed,
    }
}

/// Picks the first non-empty normalized candidate, else the fallback.
pub fn label_or(candidates: &[&str], fallback: &str) -> String {
    for candidate in candidates {
        let normalized = normalize_label(candidate);
        if !normalized.is_empty() {
            return normalized;
        }
    }
    fallback.to_string()
}
