mod account;
mod account_group;
mod category;
mod money;
mod report;
mod transaction;

pub use account::{Account, AccountChoice};
pub use account_group::{AccountGroup, GroupType};
pub use category::{Category, CategoryType};
pub use money::{from_cents, to_cents, MAX_CENTS};
pub use report::{AccountBalance, CategoryTotal, GroupBalance, MonthBucket, TypeTotals};
pub use transaction::{NewTransaction, Transaction, TransactionFilter, TransactionRow, TransactionType};

#[cfg(test)]
mod tests;
