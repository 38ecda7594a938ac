use std::str::FromStr;

use super::TransactionType;
use crate::error::LedgerError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryType {
    Income,
    Expense,
    Both,
}

impl CategoryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
            Self::Both => "both",
        }
    }

    pub fn all() -> &'static [CategoryType] {
        &[Self::Income, Self::Expense, Self::Both]
    }

    /// Whether a transaction of `kind` may be filed under a category of this type.
    pub fn accepts(&self, kind: TransactionType) -> bool {
        match self {
            Self::Both => true,
            Self::Income => kind == TransactionType::Income,
            Self::Expense => kind == TransactionType::Expense,
        }
    }
}

impl FromStr for CategoryType {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            "both" => Ok(Self::Both),
            other => Err(LedgerError::Validation(format!(
                "unknown category type '{other}' (expected one of: {})",
                Self::all().iter().map(Self::as_str).collect::<Vec<_>>().join(", ")
            ))),
        }
    }
}

impl std::fmt::Display for CategoryType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub kind: CategoryType,
}

impl Category {
    /// Find a category by name (case-insensitive) in a slice.
    pub fn find_by_name<'a>(categories: &'a [Category], name: &str) -> Option<&'a Category> {
        let lower = name.to_lowercase();
        categories.iter().find(|c| c.name.to_lowercase() == lower)
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}
