use anyhow::{bail, Context, Result};
use chrono::{Local, NaiveDate};
use rust_decimal::Decimal;
use std::path::Path;
use std::str::FromStr;

use crate::config::Config;
use crate::db::Database;
use crate::error::LedgerError;
use crate::models::*;
use crate::ui::util::{format_amount, parse_day};

pub(crate) fn as_cli(args: &[String], db: &mut Database, config: &Config) -> Result<()> {
    let Some(command) = args.get(1) else {
        print_usage();
        return Ok(());
    };
    let rest = &args[2..];
    let today = Local::now().date_naive();

    match command.as_str() {
        "summary" | "s" => cli_summary(db, config, today),
        "groups" => cli_groups(db, config),
        "accounts" => cli_accounts(rest, db, config),
        "categories" => cli_categories(rest, db),
        "txns" => cli_txns(rest, db, config, today),
        "add-txn" => cli_add_txn(rest, db, config, today),
        "delete-txn" => {
            let id = require(rest, 0, "delete-txn <id>")?;
            let txn = db
                .get_transaction(id)?
                .ok_or_else(|| LedgerError::not_found("transaction", id))?;
            db.delete_transaction(id)?;
            println!(
                "Deleted {} of {} on {}",
                txn.kind,
                format_amount(txn.amount, &config.currency_symbol),
                txn.date
            );
            Ok(())
        }
        "add-group" => {
            let kind: GroupType = require(rest, 0, "add-group <type> <name>")?.parse()?;
            let name = joined_name(rest, 1, "add-group <type> <name>")?;
            let id = db.create_account_group(&name, kind)?;
            println!("Created group {name} ({kind}): {id}");
            Ok(())
        }
        "add-account" => {
            let group_id = require(rest, 0, "add-account <group-id> <name>")?;
            let name = joined_name(rest, 1, "add-account <group-id> <name>")?;
            let id = db.create_account(&name, group_id)?;
            println!("Created account {name}: {id}");
            Ok(())
        }
        "add-category" => {
            let kind: CategoryType = require(rest, 0, "add-category <type> <name>")?.parse()?;
            let name = joined_name(rest, 1, "add-category <type> <name>")?;
            let id = db.create_category(&name, kind)?;
            println!("Created category {name} ({kind}): {id}");
            Ok(())
        }
        "rename-group" => {
            let usage = "rename-group <id> <name>";
            let id = require(rest, 0, usage)?;
            let name = joined_name(rest, 1, usage)?;
            let group = db
                .get_account_group(id)?
                .ok_or_else(|| LedgerError::not_found("account group", id))?;
            db.update_account_group(id, &name, group.kind)?;
            println!("Renamed group {id} to {name}");
            Ok(())
        }
        "set-group-type" => {
            let usage = "set-group-type <id> <type>";
            let id = require(rest, 0, usage)?;
            let kind: GroupType = require(rest, 1, usage)?.parse()?;
            let group = db
                .get_account_group(id)?
                .ok_or_else(|| LedgerError::not_found("account group", id))?;
            db.update_account_group(id, &group.name, kind)?;
            println!("Group {} is now {kind}", group.name);
            Ok(())
        }
        "rename-account" => {
            let usage = "rename-account <id> <name>";
            let id = require(rest, 0, usage)?;
            db.rename_account(id, &joined_name(rest, 1, usage)?)?;
            println!("Renamed account {id}");
            Ok(())
        }
        "rename-category" => {
            let usage = "rename-category <id> <name>";
            let id = require(rest, 0, usage)?;
            db.rename_category(id, &joined_name(rest, 1, usage)?)?;
            println!("Renamed category {id}");
            Ok(())
        }
        "delete-group" => {
            let id = require(rest, 0, "delete-group <id>")?;
            db.delete_account_group(id)?;
            println!("Deleted group {id}");
            Ok(())
        }
        "delete-account" => {
            let id = require(rest, 0, "delete-account <id>")?;
            db.delete_account(id)?;
            println!("Deleted account {id}");
            Ok(())
        }
        "delete-category" => {
            let id = require(rest, 0, "delete-category <id>")?;
            db.delete_category(id)?;
            println!("Deleted category {id}");
            Ok(())
        }
        "export-csv" => cli_export(rest, db, today),
        "backup" => {
            let path = shellexpand(require(rest, 0, "backup <path>")?);
            db.backup_to(Path::new(&path))?;
            println!("Snapshot written to {path}");
            Ok(())
        }
        "restore" => {
            let path = shellexpand(require(rest, 0, "restore <path>")?);
            db.restore_from(Path::new(&path))?;
            println!("Restored from {path}");
            Ok(())
        }
        "seed-sample" => {
            let n = db.seed_sample(today)?;
            println!("Inserted {n} sample transactions");
            Ok(())
        }
        "reset" => {
            if !rest.iter().any(|a| a == "--yes") {
                bail!("reset deletes every row; run `pocketledger reset --yes` to confirm");
            }
            db.reset()?;
            println!("Reset to default groups, accounts and categories");
            Ok(())
        }
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        "--version" | "-V" | "version" => {
            println!("pocketledger {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        other => {
            print_usage();
            bail!("Unknown command: {other}");
        }
    }
}

fn print_usage() {
    println!("PocketLedger: local personal finance tracker");
    println!();
    println!("Usage: pocketledger [command]");
    println!();
    println!("Commands:");
    println!("  (none)                                Launch interactive TUI");
    println!("  summary                               Totals, group balances, top categories, last 6 months");
    println!("  groups                                List account groups with balances");
    println!("  accounts [group-id]                   List accounts with balances");
    println!("  categories [income|expense]           List categories");
    println!("  txns [filters]                        List transactions, newest first");
    println!("    --from <date> --to <date>           Inclusive date range (YYYY-MM-DD or today)");
    println!("    --account <id> --category <id>      Restrict to an account or category");
    println!("    --type <income|expense>             Restrict to one type");
    println!("    --limit <n>                         Show at most n rows");
    println!("  add-txn <date> <account-id> <category-id> <income|expense> <amount> [note]");
    println!("  delete-txn <id>");
    println!("  add-group <cash|bank|debit|credit> <name>");
    println!("  add-account <group-id> <name>");
    println!("  add-category <income|expense|both> <name>");
    println!("  rename-group|rename-account|rename-category <id> <name>");
    println!("  set-group-type <id> <type>");
    println!("  delete-group|delete-account|delete-category <id>");
    println!("  export-csv <path> [filters]           Export transactions to CSV");
    println!("  backup <path>                         Write a database snapshot");
    println!("  restore <path>                        Replace all data with a snapshot");
    println!("  seed-sample                           Insert example transactions");
    println!("  reset --yes                           Delete everything and restore defaults");
    println!("  --help, -h                            Show this help");
    println!("  --version, -V                         Show version");
}

// ── Argument helpers ─────────────────────────────────────────

/// Positional argument `idx`, or a usage error.
pub(super) fn require<'a>(args: &'a [String], idx: usize, usage: &str) -> Result<&'a str> {
    args.get(idx)
        .map(String::as_str)
        .ok_or_else(|| anyhow::anyhow!("Usage: pocketledger {usage}"))
}

/// Everything from `idx` on, joined with spaces, so names need no quoting.
pub(super) fn joined_name(args: &[String], idx: usize, usage: &str) -> Result<String> {
    let name = args.get(idx..).unwrap_or(&[]).join(" ");
    if name.trim().is_empty() {
        bail!("Usage: pocketledger {usage}");
    }
    Ok(name)
}

pub(super) fn parse_date(s: &str, today: NaiveDate) -> Result<NaiveDate> {
    parse_day(s, today).map_err(|msg| anyhow::anyhow!(msg))
}

pub(super) fn parse_amount(s: &str) -> Result<Decimal> {
    Decimal::from_str(s).with_context(|| format!("Invalid amount: {s}"))
}

/// Parse `--from/--to/--account/--category/--type/--limit` flags.
pub(super) fn parse_filter(args: &[String], today: NaiveDate) -> Result<TransactionFilter> {
    let mut filter = TransactionFilter::default();
    let mut iter = args.iter();
    while let Some(flag) = iter.next() {
        let value = iter
            .next()
            .map(String::as_str)
            .ok_or_else(|| anyhow::anyhow!("{flag} needs a value"))?;
        match flag.as_str() {
            "--from" => filter.from = Some(parse_date(value, today)?),
            "--to" => filter.to = Some(parse_date(value, today)?),
            "--account" => filter.account_id = Some(value.to_string()),
            "--category" => filter.category_id = Some(value.to_string()),
            "--type" => filter.kind = Some(value.parse()?),
            "--limit" => {
                filter.limit = Some(
                    value
                        .parse()
                        .with_context(|| format!("Invalid limit: {value}"))?,
                )
            }
            other => bail!("Unknown option: {other}"),
        }
    }
    Ok(filter)
}

pub(crate) fn shellexpand(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
        format!("{home}/{rest}")
    } else {
        path.to_string()
    }
}

// ── Commands ─────────────────────────────────────────────────

fn cli_summary(db: &Database, config: &Config, today: NaiveDate) -> Result<()> {
    let symbol = config.currency_symbol.as_str();
    let totals = db.totals_by_type()?;
    let txn_count = db.transaction_count()?;

    println!("PocketLedger summary ({today})");
    println!("{}", "─".repeat(48));
    println!("  Income:       {}", format_amount(totals.income, symbol));
    println!("  Expenses:     {}", format_amount(totals.expense, symbol));
    println!("  Net:          {}", format_amount(totals.net(), symbol));
    println!("  Transactions: {txn_count}");

    println!();
    println!("Account groups:");
    for g in db.account_group_balances()? {
        println!(
            "  {:<24} {:<7} {:>3} acct  {:>16}",
            g.name,
            g.kind,
            g.account_count,
            format_amount(g.total_balance, symbol)
        );
    }

    let top = db.top_categories(8)?;
    if !top.is_empty() {
        println!();
        println!("Top categories:");
        for c in &top {
            println!(
                "  {:<24} +{:>14}  -{:>14}  ={:>14}",
                c.name,
                format_amount(c.income, symbol),
                format_amount(c.expense, symbol),
                format_amount(c.magnitude(), symbol)
            );
        }
    }

    println!();
    println!("Last 6 months:");
    for m in db.monthly_window(6)? {
        println!(
            "  {}  +{:>14}  -{:>14}",
            m.month,
            format_amount(m.income, symbol),
            format_amount(m.expense, symbol)
        );
    }
    Ok(())
}

fn cli_groups(db: &Database, config: &Config) -> Result<()> {
    let groups = db.account_group_balances()?;
    if groups.is_empty() {
        println!("No account groups");
        return Ok(());
    }

    println!("{:<38} {:<24} {:<7} {:>5} {:>16}", "ID", "Name", "Type", "Accts", "Balance");
    println!("{}", "─".repeat(94));
    for g in &groups {
        println!(
            "{:<38} {:<24} {:<7} {:>5} {:>16}",
            g.group_id,
            g.name,
            g.kind,
            g.account_count,
            format_amount(g.total_balance, &config.currency_symbol)
        );
    }
    Ok(())
}

fn cli_accounts(args: &[String], db: &Database, config: &Config) -> Result<()> {
    let groups = match args.first() {
        Some(id) => vec![db
            .get_account_group(id)?
            .ok_or_else(|| LedgerError::not_found("account group", id.as_str()))?],
        None => db.account_groups()?,
    };

    for group in &groups {
        println!("{} ({}) [{}]", group.name, group.kind, group.id);
        let accounts = db.account_balances(&group.id)?;
        if accounts.is_empty() {
            println!("  (no accounts)");
        }
        for a in &accounts {
            println!(
                "  {:<38} {:<28} {:>16}",
                a.account_id,
                a.name,
                format_amount(a.balance, &config.currency_symbol)
            );
        }
    }
    Ok(())
}

fn cli_categories(args: &[String], db: &Database) -> Result<()> {
    let categories = match args.first() {
        Some(kind) => db.categories_for_type(kind.parse()?)?,
        None => db.categories()?,
    };
    for c in &categories {
        println!("{:<38} {:<24} {}", c.id, c.name, c.kind);
    }
    Ok(())
}

fn cli_txns(args: &[String], db: &Database, config: &Config, today: NaiveDate) -> Result<()> {
    let filter = parse_filter(args, today)?;
    let rows = db.filter_transactions(&filter)?;
    if rows.is_empty() {
        println!("No transactions");
        return Ok(());
    }

    for row in &rows {
        let txn = &row.transaction;
        println!(
            "{}  {:<36}  {:<7} {:>16}  {:<32} {:<16} {}",
            txn.date,
            txn.id,
            txn.kind,
            format_amount(txn.signed_amount(), &config.currency_symbol),
            row.account_label(),
            row.category_label(),
            txn.note.as_deref().unwrap_or("")
        );
    }
    println!("{} transaction(s)", rows.len());
    Ok(())
}

fn cli_add_txn(args: &[String], db: &Database, config: &Config, today: NaiveDate) -> Result<()> {
    let usage = "add-txn <date|today> <account-id> <category-id> <income|expense> <amount> [note]";
    let date = parse_date(require(args, 0, usage)?, today)?;
    let account_id = require(args, 1, usage)?.to_string();
    let category_id = require(args, 2, usage)?.to_string();
    let kind: TransactionType = require(args, 3, usage)?.parse()?;
    let amount = parse_amount(require(args, 4, usage)?)?;
    let note = args.get(5..).map(|n| n.join(" ")).filter(|n| !n.is_empty());

    let id = db.create_transaction(&NewTransaction {
        date,
        account_id: account_id.clone(),
        category_id,
        kind,
        amount,
        note,
    })?;
    println!("Added {kind} of {amount} on {date}: {id}");
    println!(
        "Account balance: {}",
        format_amount(db.account_balance(&account_id)?, &config.currency_symbol)
    );
    Ok(())
}

fn cli_export(args: &[String], db: &Database, today: NaiveDate) -> Result<()> {
    let path = shellexpand(require(args, 0, "export-csv <path> [filters]")?);
    let filter = parse_filter(&args[1..], today)?;
    let count = crate::export::export_transactions_csv(db, &filter, Path::new(&path))?;
    println!("Exported {count} transactions to {path}");
    Ok(())
}
