use std::str::FromStr;

use crate::error::LedgerError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupType {
    Cash,
    Bank,
    Debit,
    Credit,
}

impl GroupType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cash => "cash",
            Self::Bank => "bank",
            Self::Debit => "debit",
            Self::Credit => "credit",
        }
    }

    pub fn all() -> &'static [GroupType] {
        &[Self::Cash, Self::Bank, Self::Debit, Self::Credit]
    }
}

impl FromStr for GroupType {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cash" => Ok(Self::Cash),
            "bank" => Ok(Self::Bank),
            "debit" => Ok(Self::Debit),
            "credit" => Ok(Self::Credit),
            other => Err(LedgerError::Validation(format!(
                "unknown account group type '{other}' (expected one of: {})",
                Self::all().iter().map(Self::as_str).collect::<Vec<_>>().join(", ")
            ))),
        }
    }
}

impl std::fmt::Display for GroupType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A bucket of accounts such as "Bank Accounts", tagged with a type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountGroup {
    pub id: String,
    pub name: String,
    pub kind: GroupType,
}
