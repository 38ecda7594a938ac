use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::str::FromStr;

use crate::error::LedgerError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }

    /// `+1` for income, `-1` for expense.
    pub fn sign(&self) -> Decimal {
        match self {
            Self::Income => Decimal::ONE,
            Self::Expense => Decimal::NEGATIVE_ONE,
        }
    }
}

impl FromStr for TransactionType {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            other => Err(LedgerError::Validation(format!(
                "unknown transaction type '{other}' (expected income or expense)"
            ))),
        }
    }
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub id: String,
    pub date: NaiveDate,
    pub account_id: String,
    pub category_id: String,
    pub kind: TransactionType,
    /// Always non-negative; direction comes from `kind`.
    pub amount: Decimal,
    pub note: Option<String>,
}

impl Transaction {
    pub fn is_income(&self) -> bool {
        self.kind == TransactionType::Income
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionType::Expense
    }

    pub fn signed_amount(&self) -> Decimal {
        self.amount * self.kind.sign()
    }
}

/// Input for creating a transaction. Validated by the store before any write.
#[derive(Debug, Clone)]
pub struct NewTransaction {
    pub date: NaiveDate,
    pub account_id: String,
    pub category_id: String,
    pub kind: TransactionType,
    pub amount: Decimal,
    pub note: Option<String>,
}

/// Conjunctive filter over the transaction list. `None` means unconstrained.
/// Date bounds are inclusive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionFilter {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub account_id: Option<String>,
    pub category_id: Option<String>,
    pub kind: Option<TransactionType>,
    pub limit: Option<u32>,
}

impl TransactionFilter {
    pub fn is_empty(&self) -> bool {
        self.from.is_none()
            && self.to.is_none()
            && self.account_id.is_none()
            && self.category_id.is_none()
            && self.kind.is_none()
    }
}

/// A transaction joined with its display names. Names are `None` when the
/// referenced row no longer exists.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionRow {
    pub transaction: Transaction,
    pub account_name: Option<String>,
    pub group_name: Option<String>,
    pub category_name: Option<String>,
}

impl TransactionRow {
    /// "Cash (Cash & Wallet)", or "-" for an orphaned account.
    pub fn account_label(&self) -> String {
        match (&self.account_name, &self.group_name) {
            (Some(acc), Some(group)) => format!("{acc} ({group})"),
            (Some(acc), None) => acc.clone(),
            (None, _) => "-".to_string(),
        }
    }

    pub fn category_label(&self) -> &str {
        self.category_name.as_deref().unwrap_or("-")
    }
}
