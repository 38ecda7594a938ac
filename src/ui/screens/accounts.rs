use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};
use rust_decimal::Decimal;

use crate::ui::app::{App, Pane};
use crate::ui::theme;
use crate::ui::util::{format_amount, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);

    render_groups(f, chunks[0], app);
    render_group_accounts(f, chunks[1], app);
}

fn render_groups(f: &mut Frame, area: Rect, app: &App) {
    let focused = app.accounts_pane == Pane::Left;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::border_style(focused))
        .title(Span::styled(
            format!(" Account Groups ({}) ", app.groups.len()),
            theme::title_style(focused),
        ));

    if app.groups.is_empty() {
        let msg = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                "No account groups yet.",
                theme::dim_style().add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "Create one with :add-group <type> <name>",
                theme::dim_style(),
            )),
        ])
        .centered()
        .block(block);
        f.render_widget(msg, area);
        return;
    }

    let header = Row::new(
        ["Group", "Type", "Accounts", "Balance"]
            .iter()
            .map(|h| Cell::from(*h).style(theme::header_style())),
    );

    let symbol = app.currency.as_str();
    let rows: Vec<Row> = app
        .groups
        .iter()
        .enumerate()
        .map(|(i, g)| {
            let style = if i == app.group_index {
                if focused {
                    theme::selected_style()
                } else {
                    theme::alt_row_style().add_modifier(Modifier::BOLD)
                }
            } else {
                theme::normal_style()
            };
            Row::new(vec![
                Cell::from(truncate(&g.name, 24)),
                Cell::from(g.kind.as_str()),
                Cell::from(g.account_count.to_string()),
                Cell::from(Span::styled(
                    format_amount(g.total_balance, symbol),
                    theme::balance_style(g.total_balance >= Decimal::ZERO),
                )),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Min(16),
        Constraint::Length(7),
        Constraint::Length(9),
        Constraint::Length(16),
    ];
    f.render_widget(Table::new(rows, widths).header(header).block(block), area);
}

fn render_group_accounts(f: &mut Frame, area: Rect, app: &App) {
    let focused = app.accounts_pane == Pane::Right;
    let group_name = app
        .selected_group()
        .map(|g| g.name.as_str())
        .unwrap_or("-");
    let accounts = app.selected_group_accounts();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::border_style(focused))
        .title(Span::styled(
            format!(" {group_name} ({}) ", accounts.len()),
            theme::title_style(focused),
        ));

    if accounts.is_empty() {
        let msg = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled("No accounts in this group", theme::dim_style())),
            Line::from(Span::styled(
                "Add one with :add-account <name>",
                theme::dim_style(),
            )),
        ])
        .centered()
        .block(block);
        f.render_widget(msg, area);
        return;
    }

    let symbol = app.currency.as_str();
    let rows: Vec<Row> = accounts
        .iter()
        .enumerate()
        .map(|(i, a)| {
            let style = if focused && i == app.account_index {
                theme::selected_style()
            } else {
                theme::normal_style()
            };
            Row::new(vec![
                Cell::from(truncate(&a.name, 28)),
                Cell::from(Span::styled(
                    format_amount(a.balance, symbol),
                    theme::balance_style(a.balance >= Decimal::ZERO),
                )),
            ])
            .style(style)
        })
        .collect();

    let widths = [Constraint::Min(16), Constraint::Length(16)];
    f.render_widget(Table::new(rows, widths).block(block), area);
}
