use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;

use crate::models::{TransactionFilter, TransactionType};

/// Format a decimal amount with thousand separators and 2 decimal places.
/// e.g. `1234567.89` with `"₹"` → `"₹1,234,567.89"`
pub(crate) fn format_amount(val: Decimal, symbol: &str) -> String {
    let abs = val.abs();
    let formatted = format!("{abs:.2}");
    let mut parts = formatted.split('.');
    let int_part = parts.next().unwrap_or("0");
    let dec_part = parts.next().unwrap_or("00");

    let with_commas: String = int_part
        .as_bytes()
        .rchunks(3)
        .rev()
        .map(|chunk| std::str::from_utf8(chunk).unwrap_or(""))
        .collect::<Vec<_>>()
        .join(",");

    if val < Decimal::ZERO {
        format!("-{symbol}{with_commas}.{dec_part}")
    } else {
        format!("{symbol}{with_commas}.{dec_part}")
    }
}

/// Truncate a string to `max` visible characters, appending "…" if truncated.
/// The result is guaranteed to be at most `max` characters (counting "…" as one).
/// Safe for multi-byte UTF-8 characters.
pub(crate) fn truncate(s: &str, max: usize) -> String {
    if max == 0 {
        return String::new();
    }
    let char_count = s.chars().count();
    if char_count <= max {
        return s.to_string();
    }
    let truncated: String = s.chars().take(max.saturating_sub(1)).collect();
    format!("{truncated}…")
}

/// Move a list cursor down by one, adjusting scroll to keep cursor visible.
pub(crate) fn scroll_down(index: &mut usize, scroll: &mut usize, len: usize, page: usize) {
    if *index + 1 < len {
        *index += 1;
        if *index >= *scroll + page {
            *scroll = index.saturating_sub(page.saturating_sub(1));
        }
    }
}

/// Move a list cursor up by one, adjusting scroll to keep cursor visible.
pub(crate) fn scroll_up(index: &mut usize, scroll: &mut usize) {
    *index = index.saturating_sub(1);
    if *index < *scroll {
        *scroll = *index;
    }
}

pub(crate) fn scroll_to_top(index: &mut usize, scroll: &mut usize) {
    *index = 0;
    *scroll = 0;
}

pub(crate) fn scroll_to_bottom(index: &mut usize, scroll: &mut usize, len: usize, page: usize) {
    if len > 0 {
        *index = len - 1;
        *scroll = index.saturating_sub(page.saturating_sub(1));
    }
}

/// Clamp a cursor after the list under it shrank.
pub(crate) fn clamp_index(index: &mut usize, len: usize) {
    if *index >= len {
        *index = len.saturating_sub(1);
    }
}

/// Month-to-date window used by the transactions screen until the user
/// sets a filter.
pub(crate) fn month_to_date(today: NaiveDate) -> TransactionFilter {
    TransactionFilter {
        from: today.with_day(1),
        to: Some(today),
        ..TransactionFilter::default()
    }
}

/// Parse the arguments of `:filter`.
///
/// `key=value` pairs with keys `from`, `to`, `account`, `category`, `type`
/// and `limit`. An empty string restores the month-to-date window and
/// `all` clears every constraint.
pub(crate) fn parse_filter_spec(spec: &str, today: NaiveDate) -> Result<TransactionFilter, String> {
    let spec = spec.trim();
    if spec.is_empty() {
        return Ok(month_to_date(today));
    }
    if spec.eq_ignore_ascii_case("all") {
        return Ok(TransactionFilter::default());
    }

    let mut filter = TransactionFilter::default();
    for pair in spec.split_whitespace() {
        let (key, value) = pair
            .split_once('=')
            .ok_or_else(|| format!("Expected key=value, got '{pair}'"))?;
        match key {
            "from" => filter.from = Some(parse_day(value, today)?),
            "to" => filter.to = Some(parse_day(value, today)?),
            "account" => filter.account_id = Some(value.to_string()),
            "category" => filter.category_id = Some(value.to_string()),
            "type" => {
                filter.kind = Some(
                    value
                        .parse::<TransactionType>()
                        .map_err(|e| e.to_string())?,
                )
            }
            "limit" => {
                filter.limit = Some(
                    value
                        .parse::<u32>()
                        .map_err(|_| format!("Invalid limit: {value}"))?,
                )
            }
            other => return Err(format!("Unknown filter key: {other}")),
        }
    }
    Ok(filter)
}

/// `today` or a `YYYY-MM-DD` date.
pub(crate) fn parse_day(s: &str, today: NaiveDate) -> Result<NaiveDate, String> {
    if s.eq_ignore_ascii_case("today") {
        return Ok(today);
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| format!("Invalid date (use YYYY-MM-DD): {s}"))
}

/// One-line description of the active filter for screen titles.
pub(crate) fn describe_filter(filter: &TransactionFilter) -> String {
    if filter.is_empty() {
        return "all time".to_string();
    }
    let mut parts = Vec::new();
    match (filter.from, filter.to) {
        (Some(from), Some(to)) => parts.push(format!("{from} → {to}")),
        (Some(from), None) => parts.push(format!("from {from}")),
        (None, Some(to)) => parts.push(format!("until {to}")),
        (None, None) => {}
    }
    if let Some(ref a) = filter.account_id {
        parts.push(format!("account={a}"));
    }
    if let Some(ref c) = filter.category_id {
        parts.push(format!("category={c}"));
    }
    if let Some(kind) = filter.kind {
        parts.push(format!("type={kind}"));
    }
    parts.join(", ")
}
