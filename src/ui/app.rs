use anyhow::Result;
use chrono::{Local, NaiveDate};
use rust_decimal::Decimal;

use crate::config::Config;
use crate::db::Database;
use crate::models::*;

use super::util::{clamp_index, month_to_date};

/// Months shown in the dashboard bar chart.
pub(crate) const CHART_MONTHS: u32 = 6;
/// Categories listed on the dashboard.
pub(crate) const TOP_CATEGORIES: u32 = 8;
/// Rows in the dashboard's recent-transactions table.
pub(crate) const RECENT_LIMIT: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Screen {
    Dashboard,
    Transactions,
    Accounts,
    Categories,
}

impl Screen {
    pub(crate) fn all() -> &'static [Screen] {
        &[
            Self::Dashboard,
            Self::Transactions,
            Self::Accounts,
            Self::Categories,
        ]
    }
}

impl std::fmt::Display for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Dashboard => write!(f, "Dashboard"),
            Self::Transactions => write!(f, "Transactions"),
            Self::Accounts => write!(f, "Accounts"),
            Self::Categories => write!(f, "Categories"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InputMode {
    Normal,
    Command,
    Confirm,
}

impl std::fmt::Display for InputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => write!(f, "NORMAL"),
            Self::Command => write!(f, "COMMAND"),
            Self::Confirm => write!(f, "CONFIRM"),
        }
    }
}

/// Which half of a two-pane screen has the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Pane {
    Left,
    Right,
}

impl Pane {
    pub(crate) fn toggle(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

/// Pending action that requires user confirmation.
#[derive(Debug, Clone)]
pub(crate) enum PendingAction {
    DeleteTransaction { id: String, label: String },
    DeleteAccount { id: String, name: String },
    DeleteGroup { id: String, name: String },
    DeleteCategory { id: String, name: String },
    Reset,
    Restore { path: String },
}

pub(crate) struct App {
    pub(crate) running: bool,
    pub(crate) screen: Screen,
    pub(crate) input_mode: InputMode,
    pub(crate) command_input: String,
    pub(crate) status_message: String,
    pub(crate) show_help: bool,
    pub(crate) currency: String,
    pub(crate) today: NaiveDate,

    // Dashboard
    pub(crate) totals: TypeTotals,
    pub(crate) net: Decimal,
    pub(crate) top_categories: Vec<CategoryTotal>,
    pub(crate) monthly: Vec<MonthBucket>,
    pub(crate) recent: Vec<TransactionRow>,
    pub(crate) transaction_count: i64,

    // Transactions
    pub(crate) filter: TransactionFilter,
    pub(crate) transactions: Vec<TransactionRow>,
    pub(crate) transaction_index: usize,
    pub(crate) transaction_scroll: usize,

    // Accounts
    pub(crate) groups: Vec<GroupBalance>,
    pub(crate) group_accounts: Vec<Vec<AccountBalance>>,
    pub(crate) group_index: usize,
    pub(crate) account_index: usize,
    pub(crate) accounts_pane: Pane,

    // Categories
    pub(crate) expense_categories: Vec<Category>,
    pub(crate) income_categories: Vec<Category>,
    pub(crate) category_index: usize,
    pub(crate) categories_pane: Pane,

    // Confirmation
    pub(crate) pending_action: Option<PendingAction>,
    pub(crate) confirm_message: String,

    // Layout (updated each render frame)
    pub(crate) visible_rows: usize,
}

impl App {
    pub(crate) fn new(config: &Config) -> Self {
        let today = Local::now().date_naive();

        Self {
            running: true,
            screen: Screen::Dashboard,
            input_mode: InputMode::Normal,
            command_input: String::new(),
            status_message: String::new(),
            show_help: false,
            currency: config.currency_symbol.clone(),
            today,

            totals: TypeTotals::default(),
            net: Decimal::ZERO,
            top_categories: Vec::new(),
            monthly: Vec::new(),
            recent: Vec::new(),
            transaction_count: 0,

            filter: month_to_date(today),
            transactions: Vec::new(),
            transaction_index: 0,
            transaction_scroll: 0,

            groups: Vec::new(),
            group_accounts: Vec::new(),
            group_index: 0,
            account_index: 0,
            accounts_pane: Pane::Left,

            expense_categories: Vec::new(),
            income_categories: Vec::new(),
            category_index: 0,
            categories_pane: Pane::Left,

            pending_action: None,
            confirm_message: String::new(),

            visible_rows: 20,
        }
    }

    pub(crate) fn refresh_dashboard(&mut self, db: &Database) -> Result<()> {
        self.totals = db.totals_by_type()?;
        self.net = db.net_total()?;
        self.top_categories = db.top_categories(TOP_CATEGORIES)?;
        self.monthly = db.monthly_window_at(self.today, CHART_MONTHS)?;
        self.recent = db.recent_transactions(RECENT_LIMIT)?;
        self.transaction_count = db.transaction_count()?;
        Ok(())
    }

    pub(crate) fn refresh_transactions(&mut self, db: &Database) -> Result<()> {
        self.transactions = db.filter_transactions(&self.filter)?;
        clamp_index(&mut self.transaction_index, self.transactions.len());
        if self.transaction_scroll > self.transaction_index {
            self.transaction_scroll = self.transaction_index;
        }
        Ok(())
    }

    pub(crate) fn refresh_accounts(&mut self, db: &Database) -> Result<()> {
        self.groups = db.account_group_balances()?;
        self.group_accounts = self
            .groups
            .iter()
            .map(|g| db.account_balances(&g.group_id))
            .collect::<Result<Vec<_>, _>>()?;
        clamp_index(&mut self.group_index, self.groups.len());
        let len = self.selected_group_accounts().len();
        clamp_index(&mut self.account_index, len);
        Ok(())
    }

    pub(crate) fn refresh_categories(&mut self, db: &Database) -> Result<()> {
        self.expense_categories = db.categories_for_type(TransactionType::Expense)?;
        self.income_categories = db.categories_for_type(TransactionType::Income)?;
        let len = self.active_categories().len();
        clamp_index(&mut self.category_index, len);
        Ok(())
    }

    /// Recompute every view. Called after each mutation.
    pub(crate) fn refresh_all(&mut self, db: &Database) -> Result<()> {
        self.today = Local::now().date_naive();
        self.refresh_dashboard(db)?;
        self.refresh_transactions(db)?;
        self.refresh_accounts(db)?;
        self.refresh_categories(db)?;
        Ok(())
    }

    pub(crate) fn selected_transaction(&self) -> Option<&TransactionRow> {
        self.transactions.get(self.transaction_index)
    }

    pub(crate) fn selected_group(&self) -> Option<&GroupBalance> {
        self.groups.get(self.group_index)
    }

    pub(crate) fn selected_group_accounts(&self) -> &[AccountBalance] {
        self.group_accounts
            .get(self.group_index)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub(crate) fn selected_account(&self) -> Option<&AccountBalance> {
        self.selected_group_accounts().get(self.account_index)
    }

    pub(crate) fn active_categories(&self) -> &[Category] {
        match self.categories_pane {
            Pane::Left => &self.expense_categories,
            Pane::Right => &self.income_categories,
        }
    }

    pub(crate) fn selected_category(&self) -> Option<&Category> {
        self.active_categories().get(self.category_index)
    }

    /// Rows available to the transactions table (minus borders and header).
    pub(crate) fn transaction_page(&self) -> usize {
        self.visible_rows.saturating_sub(3).max(1)
    }

    pub(crate) fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = msg.into();
    }

    pub(crate) fn confirm(&mut self, action: PendingAction, message: impl Into<String>) {
        self.pending_action = Some(action);
        self.confirm_message = message.into();
        self.input_mode = InputMode::Confirm;
    }
}
