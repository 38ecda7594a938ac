use rusqlite::{params, OptionalExtension, Row};
use tracing::{info, warn};

use super::{clean_name, new_id, Database};
use crate::error::{LedgerError, LedgerResult};
use crate::models::*;

fn category_from_row(row: &Row<'_>) -> rusqlite::Result<Category> {
    Ok(Category {
        id: row.get(0)?,
        name: row.get(1)?,
        kind: row.get(2)?,
    })
}

impl Database {
    pub(crate) fn create_category(&self, name: &str, kind: CategoryType) -> LedgerResult<String> {
        let name = clean_name(name, "Category")?;
        let id = new_id();
        self.conn.execute(
            "INSERT INTO categories (id, name, type) VALUES (?1, ?2, ?3)",
            params![id, name, kind],
        )?;
        info!(%id, %name, %kind, "created category");
        Ok(id)
    }

    pub(crate) fn categories(&self) -> LedgerResult<Vec<Category>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, type FROM categories ORDER BY name, id")?;
        let rows = stmt.query_map([], category_from_row)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    /// Categories a transaction of `kind` may use: same type or `both`.
    pub(crate) fn categories_for_type(&self, kind: TransactionType) -> LedgerResult<Vec<Category>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, type FROM categories
             WHERE type = ?1 OR type = 'both'
             ORDER BY name, id",
        )?;
        let rows = stmt.query_map(params![kind], category_from_row)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    pub(crate) fn get_category(&self, id: &str) -> LedgerResult<Option<Category>> {
        Ok(self
            .conn
            .query_row(
                "SELECT id, name, type FROM categories WHERE id = ?1",
                params![id],
                category_from_row,
            )
            .optional()?)
    }

    pub(crate) fn rename_category(&self, id: &str, name: &str) -> LedgerResult<()> {
        let name = clean_name(name, "Category")?;
        let changed = self.conn.execute(
            "UPDATE categories SET name = ?1 WHERE id = ?2",
            params![name, id],
        )?;
        if changed == 0 {
            return Err(LedgerError::not_found("category", id));
        }
        info!(%id, %name, "renamed category");
        Ok(())
    }

    pub(crate) fn can_delete_category(&self, id: &str) -> LedgerResult<bool> {
        Ok(self.count("SELECT COUNT(*) FROM transactions WHERE category_id = ?1", id)? == 0)
    }

    pub(crate) fn delete_category(&self, id: &str) -> LedgerResult<()> {
        if self.get_category(id)?.is_none() {
            return Err(LedgerError::not_found("category", id));
        }
        let txns = self.count("SELECT COUNT(*) FROM transactions WHERE category_id = ?1", id)?;
        if txns > 0 {
            warn!(%id, txns, "refused to delete category with transactions");
            return Err(LedgerError::Guard {
                entity: "category",
                id: id.to_string(),
                dependents: format!("{txns} transaction(s)"),
            });
        }
        self.conn
            .execute("DELETE FROM categories WHERE id = ?1", params![id])?;
        info!(%id, "deleted category");
        Ok(())
    }
}
