mod accounts;
mod categories;
mod dashboard;
mod schema;
mod transactions;

use chrono::{Duration, NaiveDate};
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use rusqlite::{params, Connection, DatabaseName, OptionalExtension};
use rust_decimal::Decimal;
use std::path::Path;
use tracing::{debug, info};

use crate::error::{LedgerError, LedgerResult};
use crate::models::*;

/// The store session. Every query and mutation goes through one of these;
/// there is no ambient global handle.
pub(crate) struct Database {
    conn: Connection,
}

impl Database {
    pub(crate) fn open(path: &Path) -> LedgerResult<Self> {
        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;
        info!(path = %path.display(), "opened database");
        Self::init(conn)
    }

    #[cfg(test)]
    pub(crate) fn open_in_memory() -> LedgerResult<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    /// In-memory store with the schema but none of the default rows.
    #[cfg(test)]
    pub(crate) fn open_blank() -> LedgerResult<Self> {
        let mut db = Self {
            conn: Connection::open_in_memory()?,
        };
        db.migrate()?;
        Ok(db)
    }

    fn init(conn: Connection) -> LedgerResult<Self> {
        let mut db = Self { conn };
        if db.migrate()? {
            db.seed_defaults()?;
        }
        Ok(db)
    }

    /// Bring the schema up to date. Returns `true` when the schema was created
    /// from scratch.
    fn migrate(&mut self) -> LedgerResult<bool> {
        let has_version_table: bool = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version')",
            [],
            |row| row.get(0),
        )?;

        let current: Option<i32> = if has_version_table {
            self.conn
                .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
                    row.get(0)
                })
                .optional()?
        } else {
            None
        };

        let Some(current) = current else {
            self.conn.execute_batch(schema::SCHEMA_V1)?;
            self.conn.execute(
                "INSERT INTO schema_version (version) VALUES (?1)",
                params![schema::CURRENT_VERSION],
            )?;
            debug!(version = schema::CURRENT_VERSION, "created schema");
            return Ok(true);
        };

        for &(from_version, sql) in schema::MIGRATIONS {
            if current <= from_version {
                self.conn.execute_batch(sql)?;
            }
        }

        if current < schema::CURRENT_VERSION {
            self.conn.execute(
                "UPDATE schema_version SET version = ?1",
                params![schema::CURRENT_VERSION],
            )?;
            info!(from = current, to = schema::CURRENT_VERSION, "migrated schema");
        }

        Ok(false)
    }

    fn seed_defaults(&mut self) -> LedgerResult<()> {
        let tx = self.conn.transaction()?;
        for (id, name, kind) in schema::DEFAULT_GROUPS {
            tx.execute(
                "INSERT OR IGNORE INTO account_groups (id, name, type) VALUES (?1, ?2, ?3)",
                params![id, name, kind],
            )?;
        }
        for (id, name, group_id) in schema::DEFAULT_ACCOUNTS {
            tx.execute(
                "INSERT OR IGNORE INTO accounts (id, name, group_id) VALUES (?1, ?2, ?3)",
                params![id, name, group_id],
            )?;
        }
        for (id, name, kind) in schema::DEFAULT_CATEGORIES {
            tx.execute(
                "INSERT OR IGNORE INTO categories (id, name, type) VALUES (?1, ?2, ?3)",
                params![id, name, kind],
            )?;
        }
        tx.commit()?;
        debug!("seeded default groups, accounts and categories");
        Ok(())
    }

    // ── Whole-store operations ────────────────────────────────

    /// Remove every row from every table, then restore the default rows.
    pub(crate) fn reset(&mut self) -> LedgerResult<()> {
        self.conn.execute_batch(
            "BEGIN;
             DELETE FROM transactions;
             DELETE FROM accounts;
             DELETE FROM categories;
             DELETE FROM account_groups;
             COMMIT;",
        )?;
        self.seed_defaults()?;
        info!("reset database to defaults");
        Ok(())
    }

    /// Write a full snapshot of the store to `path`.
    pub(crate) fn backup_to(&self, path: &Path) -> LedgerResult<()> {
        self.conn.backup(DatabaseName::Main, path, None)?;
        info!(path = %path.display(), "wrote database snapshot");
        Ok(())
    }

    /// Replace the store's contents with a snapshot file. Snapshots missing
    /// tables get them created.
    pub(crate) fn restore_from(&mut self, path: &Path) -> LedgerResult<()> {
        if !path.exists() {
            return Err(LedgerError::not_found("snapshot", path.display().to_string()));
        }
        self.conn
            .restore(DatabaseName::Main, path, None::<fn(rusqlite::backup::Progress)>)?;
        self.conn.execute_batch(schema::SCHEMA_V1)?;
        self.migrate()?;
        info!(path = %path.display(), "restored database snapshot");
        Ok(())
    }

    /// Insert a handful of example transactions dated relative to `today`.
    /// Returns how many were inserted.
    pub(crate) fn seed_sample(&mut self, today: NaiveDate) -> LedgerResult<usize> {
        let account_ids: Vec<String> = self.accounts()?.into_iter().map(|a| a.id).collect();
        let categories = self.categories()?;

        if account_ids.is_empty() || categories.is_empty() {
            return Err(LedgerError::Validation(
                "sample data needs at least one account and one category".into(),
            ));
        }

        let samples: [(i64, usize, &str, TransactionType, i64, &str); 5] = [
            (-2, 0, "food", TransactionType::Expense, 240, "Lunch"),
            (-5, 1, "salary", TransactionType::Income, 52000, "Salary"),
            (-1, 2, "transport", TransactionType::Expense, 120, "Auto"),
            (-15, 3, "shopping", TransactionType::Expense, 3100, "Shoes"),
            (-20, 1, "utilities", TransactionType::Expense, 1600, "Electricity"),
        ];

        let mut inserted = 0;
        for (offset, account_idx, category_hint, kind, amount, note) in samples {
            let Some(category) = pick_sample_category(&categories, category_hint, kind) else {
                continue;
            };
            let account_id = &account_ids[account_idx % account_ids.len()];
            self.create_transaction(&NewTransaction {
                date: today + Duration::days(offset),
                account_id: account_id.clone(),
                category_id: category.id.clone(),
                kind,
                amount: Decimal::from(amount),
                note: Some(note.to_string()),
            })?;
            inserted += 1;
        }
        info!(inserted, "seeded sample transactions");
        Ok(inserted)
    }

    /// Run a `SELECT COUNT(*) ... WHERE <column> = ?1` style query.
    fn count(&self, sql: &str, id: &str) -> LedgerResult<i64> {
        Ok(self.conn.query_row(sql, params![id], |row| row.get(0))?)
    }
}

fn pick_sample_category<'a>(
    categories: &'a [Category],
    hint: &str,
    kind: TransactionType,
) -> Option<&'a Category> {
    categories
        .iter()
        .find(|c| c.name.to_lowercase().contains(hint) && c.kind.accepts(kind))
        .or_else(|| categories.iter().find(|c| c.kind.accepts(kind)))
}

pub(crate) fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Trim a user-supplied name, rejecting blanks.
pub(crate) fn clean_name(name: &str, what: &str) -> LedgerResult<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(LedgerError::Validation(format!("{what} name cannot be empty")));
    }
    Ok(trimmed.to_string())
}

// ── Column conversions ────────────────────────────────────────

fn parse_column<T>(value: ValueRef<'_>) -> FromSqlResult<T>
where
    T: std::str::FromStr<Err = LedgerError>,
{
    value
        .as_str()?
        .parse()
        .map_err(|e: LedgerError| FromSqlError::Other(e.to_string().into()))
}

impl ToSql for GroupType {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for GroupType {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        parse_column(value)
    }
}

impl ToSql for CategoryType {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for CategoryType {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        parse_column(value)
    }
}

impl ToSql for TransactionType {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for TransactionType {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        parse_column(value)
    }
}
