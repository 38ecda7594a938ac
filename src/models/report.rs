use rust_decimal::Decimal;

use super::GroupType;

#[derive(Debug, Clone, PartialEq)]
pub struct GroupBalance {
    pub group_id: String,
    pub name: String,
    pub kind: GroupType,
    pub account_count: u32,
    pub total_balance: Decimal,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AccountBalance {
    pub account_id: String,
    pub name: String,
    pub balance: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TypeTotals {
    pub income: Decimal,
    pub expense: Decimal,
}

impl TypeTotals {
    pub fn net(&self) -> Decimal {
        self.income - self.expense
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTotal {
    pub category_id: String,
    pub name: String,
    pub income: Decimal,
    pub expense: Decimal,
}

impl CategoryTotal {
    pub fn magnitude(&self) -> Decimal {
        (self.income - self.expense).abs()
    }
}

/// Income and expense for one calendar month, keyed `YYYY-MM`.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthBucket {
    pub month: String,
    pub income: Decimal,
    pub expense: Decimal,
}
