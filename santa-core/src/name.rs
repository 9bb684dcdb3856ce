/// Canonical form of a participant name: first whitespace-delimited token,
/// upper-cased. Blank input yields `None`.
///
/// Multi-word input is truncated, so `"John Smith"` becomes `"JOHN"`.
pub fn normalize_name(raw: &str) -> Option<String> {
    raw.split_whitespace().next().map(str::to_uppercase)
}
