#![allow(clippy::unwrap_used)]

use chrono::NaiveDate;
use rust_decimal_macros::dec;

use super::*;
use crate::models::{Transaction, TransactionType};

fn row(note: Option<&str>, account: Option<&str>) -> TransactionRow {
    TransactionRow {
        transaction: Transaction {
            id: "t1".into(),
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            account_id: "a1".into(),
            category_id: "c1".into(),
            kind: TransactionType::Expense,
            amount: dec!(12.5),
            note: note.map(str::to_string),
        },
        account_name: account.map(str::to_string),
        group_name: Some("Wallet".into()),
        category_name: Some("Food".into()),
    }
}

fn render(rows: &[TransactionRow]) -> String {
    let mut buf = Vec::new();
    write_transactions_csv(rows, &mut buf).unwrap();
    String::from_utf8(buf).unwrap()
}

#[test]
fn test_header_only_when_empty() {
    let out = render(&[]);
    assert_eq!(
        out,
        "\"Date\",\"Account\",\"Category\",\"Type\",\"Note\",\"Amount\"\n"
    );
}

#[test]
fn test_quotes_are_doubled_and_fields_wrapped() {
    let out = render(&[row(Some("He said \"Hello\", then left"), Some("Cash"))]);
    let line = out.lines().nth(1).unwrap();
    assert_eq!(
        line,
        "\"2024-01-01\",\"Cash\",\"Food\",\"expense\",\"He said \"\"Hello\"\", then left\",\"12.50\""
    );
}

#[test]
fn test_missing_names_written_empty() {
    let out = render(&[row(None, None)]);
    let line = out.lines().nth(1).unwrap();
    assert_eq!(line, "\"2024-01-01\",\"\",\"Food\",\"expense\",\"\",\"12.50\"");
}

#[test]
fn test_export_to_file_counts_rows() {
    let db = Database::open_in_memory().unwrap();
    db.create_transaction(&crate::models::NewTransaction {
        date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        account_id: "a_cash".into(),
        category_id: "c_food".into(),
        kind: TransactionType::Expense,
        amount: dec!(40),
        note: Some("Dinner".into()),
    })
    .unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.csv");
    let count = export_transactions_csv(&db, &TransactionFilter::default(), &path).unwrap();
    assert_eq!(count, 1);

    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.contains("\"Cash\",\"Food\",\"expense\",\"Dinner\",\"40.00\""));
}
