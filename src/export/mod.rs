use std::io::Write;
use std::path::Path;
use tracing::info;

use crate::db::Database;
use crate::error::LedgerResult;
use crate::models::{TransactionFilter, TransactionRow};

pub(crate) const CSV_HEADER: [&str; 6] = ["Date", "Account", "Category", "Type", "Note", "Amount"];

/// Write rows as CSV with every field quoted. Missing names are left empty.
/// Returns the number of records written.
pub(crate) fn write_transactions_csv<W: Write>(
    rows: &[TransactionRow],
    writer: W,
) -> LedgerResult<usize> {
    let mut wtr = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Always)
        .from_writer(writer);

    wtr.write_record(CSV_HEADER)?;
    for row in rows {
        let txn = &row.transaction;
        wtr.write_record([
            txn.date.format("%Y-%m-%d").to_string(),
            row.account_name.clone().unwrap_or_default(),
            row.category_name.clone().unwrap_or_default(),
            txn.kind.as_str().to_string(),
            txn.note.clone().unwrap_or_default(),
            format!("{:.2}", txn.amount),
        ])?;
    }
    wtr.flush()?;
    Ok(rows.len())
}

/// Export the transactions matching `filter` to a CSV file at `path`.
pub(crate) fn export_transactions_csv(
    db: &Database,
    filter: &TransactionFilter,
    path: &Path,
) -> LedgerResult<usize> {
    let rows = db.filter_transactions(filter)?;
    let file = std::fs::File::create(path)?;
    let count = write_transactions_csv(&rows, file)?;
    info!(path = %path.display(), count, "exported transactions to CSV");
    Ok(count)
}

#[cfg(test)]
mod tests;
