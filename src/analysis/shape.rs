//! Extraction of `(low, high)` operands from range expressions.

use regex::Regex;
use std::sync::LazyLock;

static BRACKETED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\[(.*),(.*)\]$").expect("valid bracket pattern"));
static SPELLED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.*)to(.*)$").expect("valid range pattern"));

/// Parses `[low, high]` or `low to high`, returning trimmed operands.
///
/// Both patterns are greedy, so `[a, b, c]` splits at the last comma and
/// `1 to 2 to 3` at the last `to`.
pub fn parse_range(expression: &str) -> Option<(&str, &str)> {
    let caps = BRACKETED
        .captures(expression)
        .or_else(|| SPELLED.captures(expression))?;
    let low = caps.get(1)?.as_str().trim();
    let high = caps.get(2)?.as_str().trim();
    Some((low, high))
}
