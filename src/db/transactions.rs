use rusqlite::{params, OptionalExtension, Row};
use tracing::{debug, info};

use super::{new_id, Database};
use crate::error::{LedgerError, LedgerResult};
use crate::models::*;

const ROW_SELECT: &str = "SELECT t.id, t.date, t.account_id, t.category_id, t.type, t.amount_cents, t.note,
            a.name, g.name, c.name
     FROM transactions t
     LEFT JOIN accounts a ON a.id = t.account_id
     LEFT JOIN account_groups g ON g.id = a.group_id
     LEFT JOIN categories c ON c.id = t.category_id";

fn transaction_from_row(row: &Row<'_>) -> rusqlite::Result<Transaction> {
    Ok(Transaction {
        id: row.get(0)?,
        date: row.get(1)?,
        account_id: row.get(2)?,
        category_id: row.get(3)?,
        kind: row.get(4)?,
        amount: from_cents(row.get(5)?),
        note: row.get(6)?,
    })
}

fn joined_from_row(row: &Row<'_>) -> rusqlite::Result<TransactionRow> {
    Ok(TransactionRow {
        transaction: transaction_from_row(row)?,
        account_name: row.get(7)?,
        group_name: row.get(8)?,
        category_name: row.get(9)?,
    })
}

fn reject(msg: String) -> LedgerError {
    debug!(reason = %msg, "rejected transaction");
    LedgerError::Validation(msg)
}

impl Database {
    /// Validate and insert a transaction. Nothing is written when any check fails.
    pub(crate) fn create_transaction(&self, new: &NewTransaction) -> LedgerResult<String> {
        let account_id = new.account_id.trim();
        let category_id = new.category_id.trim();
        if account_id.is_empty() || category_id.is_empty() || new.amount.is_zero() {
            return Err(reject("account, category and amount are required".into()));
        }
        if new.amount.is_sign_negative() {
            return Err(reject(format!(
                "amount must be positive (got {}); use the transaction type for direction",
                new.amount
            )));
        }
        if new.amount.normalize().scale() > 2 {
            return Err(reject(format!(
                "amount {} has more than two decimal places",
                new.amount
            )));
        }
        let cents = to_cents(new.amount)
            .filter(|c| *c <= MAX_CENTS)
            .ok_or_else(|| {
                reject(format!(
                    "amount {} exceeds the maximum of {}",
                    new.amount,
                    from_cents(MAX_CENTS)
                ))
            })?;

        if self.get_account(account_id)?.is_none() {
            return Err(LedgerError::not_found("account", account_id));
        }
        let category = self
            .get_category(category_id)?
            .ok_or_else(|| LedgerError::not_found("category", category_id))?;
        if !category.kind.accepts(new.kind) {
            return Err(reject(format!(
                "category {} ({}) does not accept {} transactions",
                category.name, category.kind, new.kind
            )));
        }

        let note = new
            .note
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty());

        let id = new_id();
        self.conn.execute(
            "INSERT INTO transactions (id, date, account_id, category_id, type, amount_cents, note)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![id, new.date, account_id, category_id, new.kind, cents, note],
        )?;
        info!(%id, date = %new.date, kind = %new.kind, amount = %new.amount, "created transaction");
        Ok(id)
    }

    pub(crate) fn get_transaction(&self, id: &str) -> LedgerResult<Option<Transaction>> {
        Ok(self
            .conn
            .query_row(
                "SELECT id, date, account_id, category_id, type, amount_cents, note
                 FROM transactions t WHERE id = ?1",
                params![id],
                transaction_from_row,
            )
            .optional()?)
    }

    pub(crate) fn delete_transaction(&self, id: &str) -> LedgerResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM transactions WHERE id = ?1", params![id])?;
        if changed == 0 {
            return Err(LedgerError::not_found("transaction", id));
        }
        info!(%id, "deleted transaction");
        Ok(())
    }

    pub(crate) fn transaction_count(&self) -> LedgerResult<i64> {
        Ok(self
            .conn
            .query_row("SELECT COUNT(*) FROM transactions", [], |row| row.get(0))?)
    }

    /// Transactions matching every constraint present in `filter`, newest
    /// date first; same-date rows come most recently inserted first.
    pub(crate) fn filter_transactions(
        &self,
        filter: &TransactionFilter,
    ) -> LedgerResult<Vec<TransactionRow>> {
        let mut sql = format!("{ROW_SELECT} WHERE 1=1");
        let mut param_values: Vec<Box<dyn rusqlite::types::ToSql>> = Vec::new();

        if let Some(from) = filter.from {
            sql.push_str(&format!(" AND t.date >= ?{}", param_values.len() + 1));
            param_values.push(Box::new(from));
        }
        if let Some(to) = filter.to {
            sql.push_str(&format!(" AND t.date <= ?{}", param_values.len() + 1));
            param_values.push(Box::new(to));
        }
        if let Some(aid) = filter.account_id.as_deref().filter(|s| !s.is_empty()) {
            sql.push_str(&format!(" AND t.account_id = ?{}", param_values.len() + 1));
            param_values.push(Box::new(aid.to_string()));
        }
        if let Some(cid) = filter.category_id.as_deref().filter(|s| !s.is_empty()) {
            sql.push_str(&format!(" AND t.category_id = ?{}", param_values.len() + 1));
            param_values.push(Box::new(cid.to_string()));
        }
        if let Some(kind) = filter.kind {
            sql.push_str(&format!(" AND t.type = ?{}", param_values.len() + 1));
            param_values.push(Box::new(kind));
        }

        sql.push_str(" ORDER BY t.date DESC, t.rowid DESC");

        if let Some(l) = filter.limit {
            sql.push_str(&format!(" LIMIT {l}"));
        }

        let params_ref: Vec<&dyn rusqlite::types::ToSql> =
            param_values.iter().map(|p| p.as_ref()).collect();

        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(params_ref.as_slice(), joined_from_row)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    /// The `limit` newest transactions, same ordering as the filtered list.
    pub(crate) fn recent_transactions(&self, limit: u32) -> LedgerResult<Vec<TransactionRow>> {
        self.filter_transactions(&TransactionFilter {
            limit: Some(limit),
            ..TransactionFilter::default()
        })
    }
}
