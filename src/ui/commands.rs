use std::collections::HashMap;
use std::path::Path;
use std::str::FromStr;
use std::sync::LazyLock;

use rust_decimal::Decimal;
use tracing::warn;

use super::app::{App, Pane, PendingAction, Screen};
use super::util::{describe_filter, parse_day, parse_filter_spec};
use crate::db::Database;
use crate::error::{LedgerError, LedgerResult};
use crate::models::{
    AccountChoice, Category, CategoryType, GroupType, NewTransaction, TransactionType,
};
use crate::run::shellexpand;

pub(crate) struct Command {
    pub(crate) description: &'static str,
    pub(crate) run: fn(&str, &mut App, &mut Database) -> anyhow::Result<()>,
}

macro_rules! register_command {
    ($name:expr, $desc:expr, $func:expr, $registry:expr) => {{
        $registry.insert(
            $name,
            Command {
                description: $desc,
                run: $func,
            },
        );
    }};
}

pub(crate) static COMMANDS: LazyLock<HashMap<&str, Command>> = LazyLock::new(|| {
    let mut r: HashMap<&str, Command> = HashMap::new();

    register_command!("q", "Quit PocketLedger", cmd_quit, r);
    register_command!("quit", "Quit PocketLedger", cmd_quit, r);
    register_command!("d", "Go to Dashboard", cmd_dashboard, r);
    register_command!("dashboard", "Go to Dashboard", cmd_dashboard, r);
    register_command!("t", "Go to Transactions", cmd_transactions, r);
    register_command!("transactions", "Go to Transactions", cmd_transactions, r);
    register_command!("a", "Go to Accounts", cmd_accounts, r);
    register_command!("accounts", "Go to Accounts", cmd_accounts, r);
    register_command!("c", "Go to Categories", cmd_categories, r);
    register_command!("categories", "Go to Categories", cmd_categories, r);
    register_command!("h", "Show available commands", cmd_help, r);
    register_command!("help", "Show available commands", cmd_help, r);
    register_command!(
        "filter",
        "Filter transactions (e.g. :filter from=2024-01-01 type=expense)",
        cmd_filter,
        r
    );
    register_command!("f", "Filter transactions", cmd_filter, r);
    register_command!(
        "add-txn",
        "Add transaction (e.g. :add-txn today a_cash Food expense 250 lunch)",
        cmd_add_txn,
        r
    );
    register_command!(
        "add-group",
        "Create account group (e.g. :add-group bank Savings)",
        cmd_add_group,
        r
    );
    register_command!(
        "add-account",
        "Create account in the selected group (e.g. :add-account Wallet)",
        cmd_add_account,
        r
    );
    register_command!(
        "add-category",
        "Create category (e.g. :add-category expense Rent)",
        cmd_add_category,
        r
    );
    register_command!("rename", "Rename the selected group, account or category", cmd_rename, r);
    register_command!(
        "group-type",
        "Change the selected group's type (cash, bank, debit, credit)",
        cmd_group_type,
        r
    );
    register_command!("delete", "Delete the selected row", cmd_delete, r);
    register_command!(
        "export",
        "Export filtered transactions to CSV (e.g. :export ~/ledger.csv)",
        cmd_export,
        r
    );
    register_command!("backup", "Write a snapshot (e.g. :backup ~/ledger.bak)", cmd_backup, r);
    register_command!("restore", "Replace all data with a snapshot", cmd_restore, r);
    register_command!("seed-sample", "Insert a few example transactions", cmd_seed_sample, r);
    register_command!("reset", "Delete everything and restore defaults", cmd_reset, r);
    register_command!("refresh", "Reload every view", cmd_refresh, r);

    r
});

pub(crate) fn handle_command(input: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    let trimmed = input.trim();
    let mut parts = trimmed.splitn(2, ' ');
    let cmd_name = parts.next().unwrap_or("");
    let args = parts.next().unwrap_or("").trim();

    if let Some(cmd) = COMMANDS.get(cmd_name) {
        (cmd.run)(args, app, db)?;
    } else {
        let suggestion = find_closest(cmd_name);
        app.set_status(format!(
            "Unknown command: :{cmd_name}. Did you mean :{suggestion}?"
        ));
    }

    Ok(())
}

fn find_closest(input: &str) -> String {
    COMMANDS
        .keys()
        .filter(|k| k.len() > 1)
        .min_by_key(|k| levenshtein(input, k))
        .unwrap_or(&"help")
        .to_string()
}

fn levenshtein(a: &str, b: &str) -> usize {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for i in 1..=a.len() {
        curr[0] = i;
        for j in 1..=b.len() {
            let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };
            curr[j] = (prev[j] + 1).min(curr[j - 1] + 1).min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

/// Put rejected operations and file errors in the status line. Storage
/// failures still abort.
pub(crate) fn report<T>(app: &mut App, result: LedgerResult<T>) -> anyhow::Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(e)
            if e.is_validation()
                || e.is_guard()
                || e.is_not_found()
                || matches!(e, LedgerError::Io(_) | LedgerError::Csv(_)) =>
        {
            warn!(error = %e, "command rejected");
            app.set_status(e.to_string());
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}

/// Apply a mutation, then recompute every view.
fn mutate<T>(
    app: &mut App,
    db: &mut Database,
    op: impl FnOnce(&mut Database) -> LedgerResult<T>,
) -> anyhow::Result<Option<T>> {
    let result = report(app, op(db))?;
    if result.is_some() {
        app.refresh_all(db)?;
    }
    Ok(result)
}

// ── Navigation ───────────────────────────────────────────────

fn cmd_quit(_args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    app.running = false;
    Ok(())
}

fn cmd_dashboard(_args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    app.screen = Screen::Dashboard;
    app.refresh_dashboard(db)
}

fn cmd_transactions(_args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    app.screen = Screen::Transactions;
    app.refresh_transactions(db)
}

fn cmd_accounts(_args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    app.screen = Screen::Accounts;
    app.refresh_accounts(db)
}

fn cmd_categories(_args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    app.screen = Screen::Categories;
    app.refresh_categories(db)
}

fn cmd_help(_args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    app.show_help = true;
    Ok(())
}

fn cmd_refresh(_args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    app.refresh_all(db)?;
    app.set_status("Refreshed");
    Ok(())
}

fn cmd_filter(args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    match parse_filter_spec(args, app.today) {
        Ok(filter) => {
            app.filter = filter;
            app.transaction_index = 0;
            app.transaction_scroll = 0;
            app.screen = Screen::Transactions;
            app.refresh_transactions(db)?;
            app.set_status(format!(
                "{} transaction(s): {}",
                app.transactions.len(),
                describe_filter(&app.filter)
            ));
        }
        Err(msg) => app.set_status(msg),
    }
    Ok(())
}

// ── Mutations ────────────────────────────────────────────────

/// Accept an account id or an exact (case-insensitive) account name.
fn resolve_account(db: &Database, token: &str) -> LedgerResult<AccountChoice> {
    let lower = token.to_lowercase();
    let choices = db.account_choices()?;
    choices
        .iter()
        .find(|a| a.id == token)
        .or_else(|| choices.iter().find(|a| a.name.to_lowercase() == lower))
        .cloned()
        .ok_or_else(|| LedgerError::not_found("account", token))
}

/// Accept a category id or an exact (case-insensitive) category name.
fn resolve_category(db: &Database, token: &str) -> LedgerResult<String> {
    if db.get_category(token)?.is_some() {
        return Ok(token.to_string());
    }
    let categories = db.categories()?;
    Category::find_by_name(&categories, token)
        .map(|c| c.id.clone())
        .ok_or_else(|| LedgerError::not_found("category", token))
}

fn cmd_add_txn(args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    let parts: Vec<&str> = args.split_whitespace().collect();
    if parts.len() < 5 {
        app.set_status("Usage: :add-txn <date|today> <account> <category> <income|expense> <amount> [note]");
        return Ok(());
    }

    let date = match parse_day(parts[0], app.today) {
        Ok(d) => d,
        Err(msg) => {
            app.set_status(msg);
            return Ok(());
        }
    };
    let kind = match parts[3].parse::<TransactionType>() {
        Ok(k) => k,
        Err(e) => {
            app.set_status(e.to_string());
            return Ok(());
        }
    };
    let Ok(amount) = Decimal::from_str(parts[4]) else {
        app.set_status(format!("Invalid amount: {}", parts[4]));
        return Ok(());
    };
    let note = parts[5..].join(" ");

    let Some(account) = report(app, resolve_account(db, parts[1]))? else {
        return Ok(());
    };
    let Some(category_id) = report(app, resolve_category(db, parts[2]))? else {
        return Ok(());
    };

    let new = NewTransaction {
        date,
        account_id: account.id.clone(),
        category_id,
        kind,
        amount,
        note: Some(note),
    };
    if mutate(app, db, |db| db.create_transaction(&new))?.is_some() {
        app.set_status(format!("Added {kind} of {amount} on {date} to {}", account.label()));
    }
    Ok(())
}

/// Split `<type> <name...>`.
fn type_and_name<T: FromStr<Err = LedgerError>>(args: &str) -> Result<(T, String), String> {
    let (kind, name) = args
        .split_once(' ')
        .ok_or_else(|| "Expected <type> <name>".to_string())?;
    let kind = kind.parse::<T>().map_err(|e| e.to_string())?;
    Ok((kind, name.trim().to_string()))
}

fn cmd_add_group(args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    let (kind, name) = match type_and_name::<GroupType>(args) {
        Ok(v) => v,
        Err(msg) => {
            app.set_status(format!("{msg} (e.g. :add-group bank Savings)"));
            return Ok(());
        }
    };
    if mutate(app, db, |db| db.create_account_group(&name, kind))?.is_some() {
        app.set_status(format!("Created group: {name}"));
    }
    Ok(())
}

fn cmd_add_account(args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    let Some(group) = app.selected_group() else {
        app.set_status("Select a group on the Accounts screen first");
        return Ok(());
    };
    let (group_id, group_name) = (group.group_id.clone(), group.name.clone());
    let name = args.to_string();
    if mutate(app, db, |db| db.create_account(&name, &group_id))?.is_some() {
        app.set_status(format!("Created account {name} in {group_name}"));
    }
    Ok(())
}

fn cmd_add_category(args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    let (kind, name) = match type_and_name::<CategoryType>(args) {
        Ok(v) => v,
        Err(msg) => {
            app.set_status(format!("{msg} (e.g. :add-category expense Rent)"));
            return Ok(());
        }
    };
    if mutate(app, db, |db| db.create_category(&name, kind))?.is_some() {
        app.set_status(format!("Created category: {name}"));
    }
    Ok(())
}

fn cmd_rename(args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    let name = args.to_string();
    let done = match (app.screen, app.accounts_pane) {
        (Screen::Accounts, Pane::Left) => match app.selected_group() {
            Some(g) => {
                let (id, kind) = (g.group_id.clone(), g.kind);
                mutate(app, db, |db| db.update_account_group(&id, &name, kind))?
            }
            None => None,
        },
        (Screen::Accounts, Pane::Right) => match app.selected_account() {
            Some(a) => {
                let id = a.account_id.clone();
                mutate(app, db, |db| db.rename_account(&id, &name))?
            }
            None => None,
        },
        (Screen::Categories, _) => match app.selected_category() {
            Some(c) => {
                let id = c.id.clone();
                mutate(app, db, |db| db.rename_category(&id, &name))?
            }
            None => None,
        },
        _ => {
            app.set_status("Nothing to rename here");
            return Ok(());
        }
    };
    if done.is_some() {
        app.set_status(format!("Renamed to: {}", name.trim()));
    }
    Ok(())
}

fn cmd_group_type(args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    let kind = match args.parse::<GroupType>() {
        Ok(k) => k,
        Err(e) => {
            app.set_status(e.to_string());
            return Ok(());
        }
    };
    let Some(group) = app.selected_group() else {
        app.set_status("Select a group on the Accounts screen first");
        return Ok(());
    };
    let (id, name) = (group.group_id.clone(), group.name.clone());
    if mutate(app, db, |db| db.update_account_group(&id, &name, kind))?.is_some() {
        app.set_status(format!("{name} is now a {kind} group"));
    }
    Ok(())
}

fn cmd_delete(_args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    request_delete(app, db)
}

/// Ask for confirmation before deleting the row under the cursor. Rows that
/// the store would refuse are reported without prompting.
pub(crate) fn request_delete(app: &mut App, db: &Database) -> anyhow::Result<()> {
    match app.screen {
        Screen::Transactions => {
            if let Some(row) = app.selected_transaction() {
                let action = PendingAction::DeleteTransaction {
                    id: row.transaction.id.clone(),
                    label: format!(
                        "{} {} {}",
                        row.transaction.date,
                        row.transaction.kind,
                        row.transaction.amount
                    ),
                };
                let msg = format!(
                    "Delete {} {} on {}?",
                    row.transaction.kind, row.transaction.amount, row.transaction.date
                );
                app.confirm(action, msg);
            }
        }
        Screen::Accounts if app.accounts_pane == Pane::Left => {
            if let Some(g) = app.selected_group() {
                let (id, name) = (g.group_id.clone(), g.name.clone());
                if db.can_delete_account_group(&id)? {
                    app.confirm(
                        PendingAction::DeleteGroup { id, name: name.clone() },
                        format!("Delete group {name}?"),
                    );
                } else {
                    app.set_status(format!("{name} still has accounts; move or delete them first"));
                }
            }
        }
        Screen::Accounts => {
            if let Some(a) = app.selected_account() {
                let (id, name) = (a.account_id.clone(), a.name.clone());
                if db.can_delete_account(&id)? {
                    app.confirm(
                        PendingAction::DeleteAccount { id, name: name.clone() },
                        format!("Delete account {name}?"),
                    );
                } else {
                    app.set_status(format!("{name} still has transactions; delete them first"));
                }
            }
        }
        Screen::Categories => {
            if let Some(c) = app.selected_category() {
                let (id, name) = (c.id.clone(), c.name.clone());
                if db.can_delete_category(&id)? {
                    app.confirm(
                        PendingAction::DeleteCategory { id, name: name.clone() },
                        format!("Delete category {name}?"),
                    );
                } else {
                    app.set_status(format!("{name} is used by transactions; delete them first"));
                }
            }
        }
        Screen::Dashboard => app.set_status("Nothing to delete here"),
    }
    Ok(())
}

/// Run a confirmed action.
pub(crate) fn execute_pending(
    action: PendingAction,
    app: &mut App,
    db: &mut Database,
) -> anyhow::Result<()> {
    match action {
        PendingAction::DeleteTransaction { id, label } => {
            if mutate(app, db, |db| db.delete_transaction(&id))?.is_some() {
                app.set_status(format!("Deleted: {label}"));
            }
        }
        PendingAction::DeleteAccount { id, name } => {
            if mutate(app, db, |db| db.delete_account(&id))?.is_some() {
                app.set_status(format!("Deleted account: {name}"));
            }
        }
        PendingAction::DeleteGroup { id, name } => {
            if mutate(app, db, |db| db.delete_account_group(&id))?.is_some() {
                app.set_status(format!("Deleted group: {name}"));
            }
        }
        PendingAction::DeleteCategory { id, name } => {
            if mutate(app, db, |db| db.delete_category(&id))?.is_some() {
                app.set_status(format!("Deleted category: {name}"));
            }
        }
        PendingAction::Reset => {
            if mutate(app, db, |db| db.reset())?.is_some() {
                app.set_status("Reset to default groups, accounts and categories");
            }
        }
        PendingAction::Restore { path } => {
            if mutate(app, db, |db| db.restore_from(Path::new(&path)))?.is_some() {
                app.set_status(format!("Restored from {path}"));
            }
        }
    }
    Ok(())
}

// ── Whole-store ──────────────────────────────────────────────

fn cmd_export(args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    if args.is_empty() {
        app.set_status("Usage: :export <path>");
        return Ok(());
    }
    let path = shellexpand(args);
    let filter = app.filter.clone();
    if let Some(count) = report(
        app,
        crate::export::export_transactions_csv(db, &filter, Path::new(&path)),
    )? {
        app.set_status(format!("Exported {count} transactions to {path}"));
    }
    Ok(())
}

fn cmd_backup(args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    if args.is_empty() {
        app.set_status("Usage: :backup <path>");
        return Ok(());
    }
    let path = shellexpand(args);
    if report(app, db.backup_to(Path::new(&path)))?.is_some() {
        app.set_status(format!("Snapshot written to {path}"));
    }
    Ok(())
}

fn cmd_restore(args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    if args.is_empty() {
        app.set_status("Usage: :restore <path>");
        return Ok(());
    }
    let path = shellexpand(args);
    app.confirm(
        PendingAction::Restore { path: path.clone() },
        format!("Replace all data with {path}?"),
    );
    Ok(())
}

fn cmd_seed_sample(_args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    let today = app.today;
    if let Some(n) = mutate(app, db, |db| db.seed_sample(today))? {
        app.set_status(format!("Inserted {n} sample transactions"));
    }
    Ok(())
}

fn cmd_reset(_args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    app.confirm(PendingAction::Reset, "Delete ALL data and restore defaults?");
    Ok(())
}
