use rusqlite::{params, OptionalExtension, Row};
use rust_decimal::Decimal;
use tracing::{info, warn};

use super::{clean_name, new_id, Database};
use crate::error::{LedgerError, LedgerResult};
use crate::models::*;

/// Signed per-transaction contribution in cents: income adds, expense subtracts.
pub(super) const SIGNED_CENTS: &str =
    "CASE WHEN t.type = 'income' THEN t.amount_cents WHEN t.type = 'expense' THEN -t.amount_cents END";

fn group_from_row(row: &Row<'_>) -> rusqlite::Result<AccountGroup> {
    Ok(AccountGroup {
        id: row.get(0)?,
        name: row.get(1)?,
        kind: row.get(2)?,
    })
}

fn account_from_row(row: &Row<'_>) -> rusqlite::Result<Account> {
    Ok(Account {
        id: row.get(0)?,
        name: row.get(1)?,
        group_id: row.get(2)?,
    })
}

impl Database {
    // ── Account groups ────────────────────────────────────────

    pub(crate) fn create_account_group(&self, name: &str, kind: GroupType) -> LedgerResult<String> {
        let name = clean_name(name, "Account group")?;
        let id = new_id();
        self.conn.execute(
            "INSERT INTO account_groups (id, name, type) VALUES (?1, ?2, ?3)",
            params![id, name, kind],
        )?;
        info!(%id, %name, %kind, "created account group");
        Ok(id)
    }

    pub(crate) fn account_groups(&self) -> LedgerResult<Vec<AccountGroup>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, type FROM account_groups ORDER BY name, id")?;
        let rows = stmt.query_map([], group_from_row)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    pub(crate) fn get_account_group(&self, id: &str) -> LedgerResult<Option<AccountGroup>> {
        Ok(self
            .conn
            .query_row(
                "SELECT id, name, type FROM account_groups WHERE id = ?1",
                params![id],
                group_from_row,
            )
            .optional()?)
    }

    pub(crate) fn update_account_group(
        &self,
        id: &str,
        name: &str,
        kind: GroupType,
    ) -> LedgerResult<()> {
        let name = clean_name(name, "Account group")?;
        let changed = self.conn.execute(
            "UPDATE account_groups SET name = ?1, type = ?2 WHERE id = ?3",
            params![name, kind, id],
        )?;
        if changed == 0 {
            return Err(LedgerError::not_found("account group", id));
        }
        info!(%id, %name, %kind, "updated account group");
        Ok(())
    }

    pub(crate) fn can_delete_account_group(&self, id: &str) -> LedgerResult<bool> {
        Ok(self.count("SELECT COUNT(*) FROM accounts WHERE group_id = ?1", id)? == 0)
    }

    pub(crate) fn delete_account_group(&self, id: &str) -> LedgerResult<()> {
        if self.get_account_group(id)?.is_none() {
            return Err(LedgerError::not_found("account group", id));
        }
        let accounts = self.count("SELECT COUNT(*) FROM accounts WHERE group_id = ?1", id)?;
        if accounts > 0 {
            warn!(%id, accounts, "refused to delete account group with accounts");
            return Err(LedgerError::Guard {
                entity: "account group",
                id: id.to_string(),
                dependents: format!("{accounts} account(s); move or delete them first"),
            });
        }
        self.conn
            .execute("DELETE FROM account_groups WHERE id = ?1", params![id])?;
        info!(%id, "deleted account group");
        Ok(())
    }

    // ── Accounts ──────────────────────────────────────────────

    pub(crate) fn create_account(&self, name: &str, group_id: &str) -> LedgerResult<String> {
        let name = clean_name(name, "Account")?;
        if self.get_account_group(group_id)?.is_none() {
            return Err(LedgerError::not_found("account group", group_id));
        }
        let id = new_id();
        self.conn.execute(
            "INSERT INTO accounts (id, name, group_id) VALUES (?1, ?2, ?3)",
            params![id, name, group_id],
        )?;
        info!(%id, %name, %group_id, "created account");
        Ok(id)
    }

    pub(crate) fn accounts(&self) -> LedgerResult<Vec<Account>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, group_id FROM accounts ORDER BY name, id")?;
        let rows = stmt.query_map([], account_from_row)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    pub(crate) fn get_account(&self, id: &str) -> LedgerResult<Option<Account>> {
        Ok(self
            .conn
            .query_row(
                "SELECT id, name, group_id FROM accounts WHERE id = ?1",
                params![id],
                account_from_row,
            )
            .optional()?)
    }

    /// Every account labelled with its group, ordered by group then account name.
    pub(crate) fn account_choices(&self) -> LedgerResult<Vec<AccountChoice>> {
        let mut stmt = self.conn.prepare(
            "SELECT a.id, a.name, g.name
             FROM accounts a
             LEFT JOIN account_groups g ON g.id = a.group_id
             ORDER BY g.name, a.name, a.id",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(AccountChoice {
                id: row.get(0)?,
                name: row.get(1)?,
                group_name: row.get(2)?,
            })
        })?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    pub(crate) fn rename_account(&self, id: &str, name: &str) -> LedgerResult<()> {
        let name = clean_name(name, "Account")?;
        let changed = self.conn.execute(
            "UPDATE accounts SET name = ?1 WHERE id = ?2",
            params![name, id],
        )?;
        if changed == 0 {
            return Err(LedgerError::not_found("account", id));
        }
        info!(%id, %name, "renamed account");
        Ok(())
    }

    pub(crate) fn can_delete_account(&self, id: &str) -> LedgerResult<bool> {
        Ok(self.count("SELECT COUNT(*) FROM transactions WHERE account_id = ?1", id)? == 0)
    }

    pub(crate) fn delete_account(&self, id: &str) -> LedgerResult<()> {
        if self.get_account(id)?.is_none() {
            return Err(LedgerError::not_found("account", id));
        }
        let txns = self.count("SELECT COUNT(*) FROM transactions WHERE account_id = ?1", id)?;
        if txns > 0 {
            warn!(%id, txns, "refused to delete account with transactions");
            return Err(LedgerError::Guard {
                entity: "account",
                id: id.to_string(),
                dependents: format!("{txns} transaction(s)"),
            });
        }
        self.conn
            .execute("DELETE FROM accounts WHERE id = ?1", params![id])?;
        info!(%id, "deleted account");
        Ok(())
    }

    // ── Balances ──────────────────────────────────────────────

    /// Every group with its account count and the summed balance of its
    /// accounts. Groups without accounts or transactions report zero.
    pub(crate) fn account_group_balances(&self) -> LedgerResult<Vec<GroupBalance>> {
        let sql = format!(
            "SELECT g.id, g.name, g.type,
                    COUNT(DISTINCT a.id),
                    COALESCE(SUM({SIGNED_CENTS}), 0)
             FROM account_groups g
             LEFT JOIN accounts a ON a.group_id = g.id
             LEFT JOIN transactions t ON t.account_id = a.id
             GROUP BY g.id
             ORDER BY g.name, g.id"
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map([], |row| {
            Ok(GroupBalance {
                group_id: row.get(0)?,
                name: row.get(1)?,
                kind: row.get(2)?,
                account_count: row.get(3)?,
                total_balance: from_cents(row.get(4)?),
            })
        })?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    /// Balances of the accounts in one group, ordered by name. An unknown
    /// group yields an empty list.
    pub(crate) fn account_balances(&self, group_id: &str) -> LedgerResult<Vec<AccountBalance>> {
        let sql = format!(
            "SELECT a.id, a.name, COALESCE(SUM({SIGNED_CENTS}), 0)
             FROM accounts a
             LEFT JOIN transactions t ON t.account_id = a.id
             WHERE a.group_id = ?1
             GROUP BY a.id
             ORDER BY a.name, a.id"
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(params![group_id], |row| {
            Ok(AccountBalance {
                account_id: row.get(0)?,
                name: row.get(1)?,
                balance: from_cents(row.get(2)?),
            })
        })?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    /// All-time balance for a single account; zero when it has no transactions.
    pub(crate) fn account_balance(&self, account_id: &str) -> LedgerResult<Decimal> {
        let sql = format!(
            "SELECT COALESCE(SUM({SIGNED_CENTS}), 0) FROM transactions t WHERE t.account_id = ?1"
        );
        let cents: i64 = self
            .conn
            .query_row(&sql, params![account_id], |row| row.get(0))?;
        Ok(from_cents(cents))
    }
}
