#![allow(clippy::unwrap_used)]

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::*;

// ── Transaction ───────────────────────────────────────────────

fn make_txn(kind: TransactionType, amount: Decimal) -> Transaction {
    Transaction {
        id: "t1".into(),
        date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
        account_id: "a_cash".into(),
        category_id: "c_food".into(),
        kind,
        amount,
        note: None,
    }
}

#[test]
fn test_income() {
    let txn = make_txn(TransactionType::Income, dec!(100.00));
    assert!(txn.is_income());
    assert!(!txn.is_expense());
    assert_eq!(txn.signed_amount(), dec!(100));
}

#[test]
fn test_expense() {
    let txn = make_txn(TransactionType::Expense, dec!(50.00));
    assert!(!txn.is_income());
    assert!(txn.is_expense());
    assert_eq!(txn.signed_amount(), dec!(-50));
}

#[test]
fn test_transaction_type_parse() {
    assert_eq!("income".parse::<TransactionType>().unwrap(), TransactionType::Income);
    assert_eq!(" EXPENSE ".parse::<TransactionType>().unwrap(), TransactionType::Expense);
    let err = "transfer".parse::<TransactionType>().unwrap_err();
    assert!(err.is_validation());
    assert!(err.to_string().contains("transfer"));
}

#[test]
fn test_transaction_type_display() {
    assert_eq!(TransactionType::Income.to_string(), "income");
    assert_eq!(format!("{}", TransactionType::Expense), "expense");
}

// ── TransactionRow ────────────────────────────────────────────

fn make_row(account: Option<&str>, group: Option<&str>, category: Option<&str>) -> TransactionRow {
    TransactionRow {
        transaction: make_txn(TransactionType::Expense, dec!(1)),
        account_name: account.map(String::from),
        group_name: group.map(String::from),
        category_name: category.map(String::from),
    }
}

#[test]
fn test_row_labels() {
    let row = make_row(Some("Cash"), Some("Cash & Wallet"), Some("Food"));
    assert_eq!(row.account_label(), "Cash (Cash & Wallet)");
    assert_eq!(row.category_label(), "Food");
}

#[test]
fn test_row_labels_orphaned() {
    let row = make_row(None, None, None);
    assert_eq!(row.account_label(), "-");
    assert_eq!(row.category_label(), "-");

    let no_group = make_row(Some("Cash"), None, Some("Food"));
    assert_eq!(no_group.account_label(), "Cash");
}

// ── TransactionFilter ─────────────────────────────────────────

#[test]
fn test_filter_is_empty() {
    assert!(TransactionFilter::default().is_empty());
    let limited = TransactionFilter {
        limit: Some(10),
        ..Default::default()
    };
    assert!(limited.is_empty());
    let typed = TransactionFilter {
        kind: Some(TransactionType::Income),
        ..Default::default()
    };
    assert!(!typed.is_empty());
}

// ── GroupType ─────────────────────────────────────────────────

#[test]
fn test_group_type_parse() {
    assert_eq!("cash".parse::<GroupType>().unwrap(), GroupType::Cash);
    assert_eq!("Bank".parse::<GroupType>().unwrap(), GroupType::Bank);
    assert_eq!("DEBIT".parse::<GroupType>().unwrap(), GroupType::Debit);
    assert_eq!("credit".parse::<GroupType>().unwrap(), GroupType::Credit);
    let err = "loan".parse::<GroupType>().unwrap_err();
    assert!(err.is_validation());
    assert!(err.to_string().contains("cash, bank, debit, credit"));
}

#[test]
fn test_group_type_roundtrip() {
    for t in GroupType::all() {
        let back: GroupType = t.as_str().parse().unwrap();
        assert_eq!(*t, back, "Roundtrip failed for {t}");
    }
    assert_eq!(GroupType::all().len(), 4);
}

// ── CategoryType ──────────────────────────────────────────────

#[test]
fn test_category_type_accepts() {
    assert!(CategoryType::Income.accepts(TransactionType::Income));
    assert!(!CategoryType::Income.accepts(TransactionType::Expense));
    assert!(CategoryType::Expense.accepts(TransactionType::Expense));
    assert!(!CategoryType::Expense.accepts(TransactionType::Income));
    assert!(CategoryType::Both.accepts(TransactionType::Income));
    assert!(CategoryType::Both.accepts(TransactionType::Expense));
}

#[test]
fn test_category_type_parse() {
    for t in CategoryType::all() {
        assert_eq!(t.as_str().parse::<CategoryType>().unwrap(), *t);
    }
    let err = "neither".parse::<CategoryType>().unwrap_err();
    assert!(err.to_string().contains("income, expense, both"));
}

#[test]
fn test_category_display_and_lookup() {
    let cats = vec![
        Category {
            id: "c1".into(),
            name: "Groceries".into(),
            kind: CategoryType::Expense,
        },
        Category {
            id: "c2".into(),
            name: "Salary".into(),
            kind: CategoryType::Income,
        },
    ];
    assert_eq!(format!("{}", cats[0]), "Groceries");
    assert_eq!(Category::find_by_name(&cats, "salary").unwrap().id, "c2");
    assert!(Category::find_by_name(&cats, "Rent").is_none());
}

// ── AccountChoice ─────────────────────────────────────────────

#[test]
fn test_account_choice_label() {
    let choice = AccountChoice {
        id: "a1".into(),
        name: "Main Bank Account".into(),
        group_name: Some("Bank Accounts".into()),
    };
    assert_eq!(choice.label(), "Main Bank Account (Bank Accounts)");

    let orphan = AccountChoice {
        group_name: None,
        ..choice
    };
    assert_eq!(orphan.label(), "Main Bank Account");
}

// ── Money ─────────────────────────────────────────────────────

#[test]
fn test_to_cents() {
    assert_eq!(to_cents(dec!(12.34)), Some(1234));
    assert_eq!(to_cents(dec!(0.01)), Some(1));
    assert_eq!(to_cents(dec!(1000)), Some(100_000));
    assert_eq!(to_cents(dec!(2.500)), Some(250));
    assert_eq!(to_cents(dec!(0.005)), None);
    assert_eq!(to_cents(Decimal::MAX), None);
    assert_eq!(to_cents(Decimal::MAX / dec!(10)), None);
}

#[test]
fn test_from_cents() {
    assert_eq!(from_cents(1234), dec!(12.34));
    assert_eq!(from_cents(-5), dec!(-0.05));
    assert_eq!(from_cents(0), Decimal::ZERO);
    assert_eq!(from_cents(100).to_string(), "1.00");
}

// ── Reports ───────────────────────────────────────────────────

#[test]
fn test_type_totals_net() {
    let totals = TypeTotals {
        income: dec!(1000),
        expense: dec!(250),
    };
    assert_eq!(totals.net(), dec!(750));
    assert_eq!(TypeTotals::default().net(), Decimal::ZERO);
}

#[test]
fn test_category_total_magnitude() {
    let total = CategoryTotal {
        category_id: "c_other".into(),
        name: "Other".into(),
        income: dec!(300),
        expense: dec!(280),
    };
    assert_eq!(total.magnitude(), dec!(20));

    let spend = CategoryTotal {
        income: Decimal::ZERO,
        expense: dec!(50),
        ..total
    };
    assert_eq!(spend.magnitude(), dec!(50));
}
