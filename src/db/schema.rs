// Referential integrity is enforced by the store's delete guards, not by
// SQLite foreign keys.
pub(crate) const SCHEMA_V1: &str = r#"
CREATE TABLE IF NOT EXISTS schema_version (
    version INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS account_groups (
    id    TEXT PRIMARY KEY,
    name  TEXT NOT NULL,
    type  TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS accounts (
    id        TEXT PRIMARY KEY,
    name      TEXT NOT NULL,
    group_id  TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS categories (
    id    TEXT PRIMARY KEY,
    name  TEXT NOT NULL,
    type  TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS transactions (
    id            TEXT PRIMARY KEY,
    date          TEXT NOT NULL,
    account_id    TEXT NOT NULL,
    category_id   TEXT NOT NULL,
    type          TEXT NOT NULL,
    amount_cents  INTEGER NOT NULL,
    note          TEXT
);

CREATE INDEX IF NOT EXISTS idx_transactions_date ON transactions(date);
CREATE INDEX IF NOT EXISTS idx_transactions_account ON transactions(account_id);
CREATE INDEX IF NOT EXISTS idx_transactions_category ON transactions(category_id);
CREATE INDEX IF NOT EXISTS idx_accounts_group ON accounts(group_id);
"#;

pub(crate) const CURRENT_VERSION: i32 = 1;

/// Migrations from version N to N+1.
/// Each entry is (from_version, sql).
pub(crate) const MIGRATIONS: &[(i32, &str)] = &[];

pub(crate) const DEFAULT_GROUPS: &[(&str, &str, &str)] = &[
    ("g_cash", "Cash & Wallet", "cash"),
    ("g_bank", "Bank Accounts", "bank"),
    ("g_debit", "Debit Cards", "debit"),
    ("g_credit", "Credit Cards", "credit"),
];

pub(crate) const DEFAULT_ACCOUNTS: &[(&str, &str, &str)] = &[
    ("a_cash", "Cash", "g_cash"),
    ("a_bank", "Main Bank Account", "g_bank"),
    ("a_debit", "Primary Debit Card", "g_debit"),
    ("a_credit", "Main Credit Card", "g_credit"),
];

pub(crate) const DEFAULT_CATEGORIES: &[(&str, &str, &str)] = &[
    ("c_food", "Food", "expense"),
    ("c_transport", "Transport", "expense"),
    ("c_util", "Utilities", "expense"),
    ("c_shop", "Shopping", "expense"),
    ("c_ent", "Entertainment", "expense"),
    ("c_salary", "Salary", "income"),
    ("c_other", "Other", "both"),
];
