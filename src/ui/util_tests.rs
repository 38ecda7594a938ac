#![allow(clippy::unwrap_used)]

use chrono::NaiveDate;
use rust_decimal_macros::dec;

use super::util::*;
use crate::models::TransactionType;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

// ── truncate ──────────────────────────────────────────────────

#[test]
fn test_truncate_short_string() {
    assert_eq!(truncate("Food", 10), "Food");
}

#[test]
fn test_truncate_exact_length() {
    assert_eq!(truncate("Salary", 6), "Salary");
}

#[test]
fn test_truncate_long_string() {
    assert_eq!(truncate("Entertainment", 6), "Enter…");
}

#[test]
fn test_truncate_zero_max() {
    assert_eq!(truncate("Food", 0), "");
}

#[test]
fn test_truncate_unicode() {
    assert_eq!(truncate("café résumé", 5), "café…");
    assert_eq!(truncate("日本語テスト", 4), "日本語…");
}

#[test]
fn test_truncate_one_char() {
    assert_eq!(truncate("ab", 1), "…");
    assert_eq!(truncate("a", 1), "a");
}

// ── format_amount ─────────────────────────────────────────────

#[test]
fn test_format_amount_basic() {
    assert_eq!(format_amount(dec!(1234.56), "₹"), "₹1,234.56");
}

#[test]
fn test_format_amount_zero() {
    assert_eq!(format_amount(dec!(0), "$"), "$0.00");
}

#[test]
fn test_format_amount_negative() {
    assert_eq!(format_amount(dec!(-42.50), "₹"), "-₹42.50");
}

#[test]
fn test_format_amount_large() {
    assert_eq!(format_amount(dec!(1234567.89), "$"), "$1,234,567.89");
    assert_eq!(format_amount(dec!(-99999.01), "$"), "-$99,999.01");
}

#[test]
fn test_format_amount_pads_decimals() {
    assert_eq!(format_amount(dec!(1.5), ""), "1.50");
    assert_eq!(format_amount(dec!(52000), "₹"), "₹52,000.00");
}

// ── scrolling ─────────────────────────────────────────────────

#[test]
fn test_scroll_down_keeps_cursor_visible() {
    let (mut index, mut scroll) = (0, 0);
    for _ in 0..5 {
        scroll_down(&mut index, &mut scroll, 10, 3);
    }
    assert_eq!(index, 5);
    assert_eq!(scroll, 3);
}

#[test]
fn test_scroll_down_stops_at_end() {
    let (mut index, mut scroll) = (2, 0);
    scroll_down(&mut index, &mut scroll, 3, 10);
    assert_eq!(index, 2);
}

#[test]
fn test_scroll_up_and_bounds() {
    let (mut index, mut scroll) = (3, 3);
    scroll_up(&mut index, &mut scroll);
    assert_eq!((index, scroll), (2, 2));

    scroll_to_bottom(&mut index, &mut scroll, 10, 4);
    assert_eq!((index, scroll), (9, 6));
    scroll_to_top(&mut index, &mut scroll);
    assert_eq!((index, scroll), (0, 0));
}

#[test]
fn test_clamp_index() {
    let mut index = 7;
    clamp_index(&mut index, 3);
    assert_eq!(index, 2);
    clamp_index(&mut index, 0);
    assert_eq!(index, 0);
}

// ── filters ───────────────────────────────────────────────────

#[test]
fn test_month_to_date() {
    let f = month_to_date(date(2024, 3, 17));
    assert_eq!(f.from, Some(date(2024, 3, 1)));
    assert_eq!(f.to, Some(date(2024, 3, 17)));
    assert!(f.account_id.is_none());
}

#[test]
fn test_parse_filter_spec_defaults() {
    let today = date(2024, 3, 17);
    assert_eq!(parse_filter_spec("", today).unwrap(), month_to_date(today));
    assert!(parse_filter_spec("all", today).unwrap().is_empty());
}

#[test]
fn test_parse_filter_spec_pairs() {
    let f = parse_filter_spec(
        "from=2024-01-01 to=today account=a_cash category=c_food type=expense limit=5",
        date(2024, 3, 17),
    )
    .unwrap();
    assert_eq!(f.from, Some(date(2024, 1, 1)));
    assert_eq!(f.to, Some(date(2024, 3, 17)));
    assert_eq!(f.account_id.as_deref(), Some("a_cash"));
    assert_eq!(f.category_id.as_deref(), Some("c_food"));
    assert_eq!(f.kind, Some(TransactionType::Expense));
    assert_eq!(f.limit, Some(5));
}

#[test]
fn test_parse_filter_spec_errors() {
    let today = date(2024, 3, 17);
    assert!(parse_filter_spec("from", today).is_err());
    assert!(parse_filter_spec("from=2024-13-01", today).is_err());
    assert!(parse_filter_spec("colour=red", today).is_err());
    assert!(parse_filter_spec("type=transfer", today).is_err());
    assert!(parse_filter_spec("limit=-1", today).is_err());
}

#[test]
fn test_describe_filter() {
    let f = parse_filter_spec("from=2024-01-01 to=2024-01-31 type=income", date(2024, 3, 1)).unwrap();
    assert_eq!(describe_filter(&f), "2024-01-01 → 2024-01-31, type=income");
    assert_eq!(describe_filter(&Default::default()), "all time");
}
