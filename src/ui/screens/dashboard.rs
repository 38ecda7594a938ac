use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::{format_amount, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5),  // Summary cards
            Constraint::Min(10),    // Top categories + monthly chart
            Constraint::Length(13), // Recent transactions
        ])
        .split(area);

    render_summary_cards(f, chunks[0], app);

    let middle = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(chunks[1]);
    render_top_categories(f, middle[0], app);
    render_monthly_chart(f, middle[1], app);

    render_recent(f, chunks[2], app);
}

fn panel(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(format!(" {title} "), theme::title_style(false)))
}

fn render_summary_cards(f: &mut Frame, area: Rect, app: &App) {
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
        ])
        .split(area);

    let net = app.net;
    let symbol = app.currency.as_str();

    render_card(f, cards[0], "Income", format_amount(app.totals.income, symbol), theme::GREEN);
    render_card(f, cards[1], "Expenses", format_amount(app.totals.expense, symbol), theme::RED);
    render_card(
        f,
        cards[2],
        "Net",
        format_amount(net, symbol),
        if net >= Decimal::ZERO {
            theme::GREEN
        } else {
            theme::RED
        },
    );
    render_card(
        f,
        cards[3],
        "Transactions",
        app.transaction_count.to_string(),
        theme::ACCENT,
    );
}

fn render_card(f: &mut Frame, area: Rect, title: &str, value: String, color: ratatui::style::Color) {
    let text = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            value,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
    ])
    .centered()
    .block(panel(title));

    f.render_widget(text, area);
}

fn render_top_categories(f: &mut Frame, area: Rect, app: &App) {
    let header = Row::new(
        ["Category", "Income", "Expense"]
            .iter()
            .map(|h| Cell::from(*h).style(theme::header_style())),
    );

    let symbol = app.currency.as_str();
    let rows: Vec<Row> = app
        .top_categories
        .iter()
        .enumerate()
        .map(|(i, cat)| {
            let style = if i % 2 == 1 {
                theme::alt_row_style()
            } else {
                theme::normal_style()
            };
            Row::new(vec![
                Cell::from(truncate(&cat.name, 16)),
                Cell::from(Span::styled(
                    format_amount(cat.income, symbol),
                    theme::income_style(),
                )),
                Cell::from(Span::styled(
                    format_amount(cat.expense, symbol),
                    theme::expense_style(),
                )),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Min(12),
        Constraint::Length(14),
        Constraint::Length(14),
    ];
    let table = Table::new(rows, widths)
        .header(header)
        .block(panel("Top Categories"));
    f.render_widget(table, area);
}

fn render_monthly_chart(f: &mut Frame, area: Rect, app: &App) {
    let mut chart = BarChart::default()
        .block(panel("Income vs Expense, last 6 months"))
        .bar_width(5)
        .bar_gap(1)
        .group_gap(2)
        .value_style(Style::default().fg(theme::HEADER_BG));

    for bucket in &app.monthly {
        let income = Bar::default()
            .value(bucket.income.round().to_u64().unwrap_or(0))
            .style(theme::income_style());
        let expense = Bar::default()
            .value(bucket.expense.round().to_u64().unwrap_or(0))
            .style(theme::expense_style());
        let label = bucket.month.get(2..).unwrap_or(&bucket.month).to_string();
        chart = chart.data(
            BarGroup::default()
                .label(Line::from(label))
                .bars(&[income, expense]),
        );
    }

    f.render_widget(chart, area);
}

fn render_recent(f: &mut Frame, area: Rect, app: &App) {
    if app.recent.is_empty() {
        let msg = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled("No transactions yet", theme::dim_style())),
            Line::from(Span::styled(
                "Add one with :add-txn or try :seed-sample",
                theme::dim_style(),
            )),
        ])
        .centered()
        .block(panel("Recent Transactions"));
        f.render_widget(msg, area);
        return;
    }

    let header = Row::new(
        ["Date", "Account", "Category", "Amount", "Note"]
            .iter()
            .map(|h| Cell::from(*h).style(theme::header_style())),
    );

    let symbol = app.currency.as_str();
    let rows: Vec<Row> = app
        .recent
        .iter()
        .map(|row| {
            let txn = &row.transaction;
            let (sign, style) = if txn.is_income() {
                ("+", theme::income_style())
            } else {
                ("-", theme::expense_style())
            };
            Row::new(vec![
                Cell::from(txn.date.to_string()),
                Cell::from(truncate(&row.account_label(), 30)),
                Cell::from(truncate(row.category_label(), 16)),
                Cell::from(Span::styled(
                    format!("{sign}{}", format_amount(txn.amount, symbol)),
                    style,
                )),
                Cell::from(txn.note.clone().unwrap_or_default()),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(11),
        Constraint::Length(30),
        Constraint::Length(16),
        Constraint::Length(15),
        Constraint::Min(10),
    ];
    let table = Table::new(rows, widths)
        .header(header)
        .block(panel("Recent Transactions"));
    f.render_widget(table, area);
}
