use chrono::{Datelike, Local, Months, NaiveDate};
use rusqlite::params;
use rust_decimal::Decimal;
use std::collections::HashMap;

use super::accounts::SIGNED_CENTS;
use super::Database;
use crate::error::{LedgerError, LedgerResult};
use crate::models::*;

const INCOME_CENTS: &str =
    "COALESCE(SUM(CASE WHEN t.type = 'income' THEN t.amount_cents END), 0)";
const EXPENSE_CENTS: &str =
    "COALESCE(SUM(CASE WHEN t.type = 'expense' THEN t.amount_cents END), 0)";

/// First day of the oldest month and last day of the newest month of a
/// `months`-long window ending with the month containing `today`, plus the
/// `YYYY-MM` keys of every month in it, oldest first.
pub(crate) fn month_window(
    today: NaiveDate,
    months: u32,
) -> LedgerResult<(NaiveDate, NaiveDate, Vec<String>)> {
    let out_of_range = || LedgerError::Validation(format!("month window around {today} is out of range"));
    if months == 0 {
        return Err(LedgerError::Validation("month window must span at least one month".into()));
    }

    let this_month = today.with_day(1).ok_or_else(out_of_range)?;
    let start = this_month
        .checked_sub_months(Months::new(months - 1))
        .ok_or_else(out_of_range)?;
    let end = this_month
        .checked_add_months(Months::new(1))
        .and_then(|d| d.pred_opt())
        .ok_or_else(out_of_range)?;

    let keys = (0..months)
        .filter_map(|i| start.checked_add_months(Months::new(i)))
        .map(|d| d.format("%Y-%m").to_string())
        .collect();

    Ok((start, end, keys))
}

impl Database {
    /// All-time income and expense totals.
    pub(crate) fn totals_by_type(&self) -> LedgerResult<TypeTotals> {
        let sql = format!("SELECT {INCOME_CENTS}, {EXPENSE_CENTS} FROM transactions t");
        let (income, expense): (i64, i64) = self
            .conn
            .query_row(&sql, [], |row| Ok((row.get(0)?, row.get(1)?)))?;
        Ok(TypeTotals {
            income: from_cents(income),
            expense: from_cents(expense),
        })
    }

    /// Income minus expense over every transaction.
    pub(crate) fn net_total(&self) -> LedgerResult<Decimal> {
        let sql = format!("SELECT COALESCE(SUM({SIGNED_CENTS}), 0) FROM transactions t");
        let cents: i64 = self.conn.query_row(&sql, [], |row| row.get(0))?;
        Ok(from_cents(cents))
    }

    /// Categories ranked by |income - expense|, largest first, ties by name.
    /// Categories without transactions are included with zero totals.
    pub(crate) fn top_categories(&self, limit: u32) -> LedgerResult<Vec<CategoryTotal>> {
        let sql = format!(
            "SELECT c.id, c.name, {INCOME_CENTS}, {EXPENSE_CENTS}
             FROM categories c
             LEFT JOIN transactions t ON t.category_id = c.id
             GROUP BY c.id
             ORDER BY ABS({INCOME_CENTS} - {EXPENSE_CENTS}) DESC, c.name ASC, c.id ASC
             LIMIT ?1"
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(params![limit], |row| {
            Ok(CategoryTotal {
                category_id: row.get(0)?,
                name: row.get(1)?,
                income: from_cents(row.get(2)?),
                expense: from_cents(row.get(3)?),
            })
        })?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    /// Income/expense per calendar month for the `months` months ending with
    /// the current one.
    pub(crate) fn monthly_window(&self, months: u32) -> LedgerResult<Vec<MonthBucket>> {
        self.monthly_window_at(Local::now().date_naive(), months)
    }

    /// Like [`Database::monthly_window`] but anchored at `today`. Every month
    /// in the window gets an entry, zero-filled when it has no transactions.
    pub(crate) fn monthly_window_at(
        &self,
        today: NaiveDate,
        months: u32,
    ) -> LedgerResult<Vec<MonthBucket>> {
        let (start, end, keys) = month_window(today, months)?;

        let sql = format!(
            "SELECT substr(t.date, 1, 7) AS month, {INCOME_CENTS}, {EXPENSE_CENTS}
             FROM transactions t
             WHERE t.date >= ?1 AND t.date <= ?2
             GROUP BY month"
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(params![start, end], |row| {
            Ok((
                row.get::<_, String>(0)?,
                (row.get::<_, i64>(1)?, row.get::<_, i64>(2)?),
            ))
        })?;
        let sums: HashMap<String, (i64, i64)> = rows.collect::<Result<_, _>>()?;

        Ok(keys
            .into_iter()
            .map(|month| {
                let (income, expense) = sums.get(&month).copied().unwrap_or((0, 0));
                MonthBucket {
                    month,
                    income: from_cents(income),
                    expense: from_cents(expense),
                }
            })
            .collect())
    }
}
