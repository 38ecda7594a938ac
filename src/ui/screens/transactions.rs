use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::{describe_filter, format_amount, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let title = format!(
        " Transactions ({}) | {} ",
        app.transactions.len(),
        describe_filter(&app.filter)
    );
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(
            title,
            Style::default()
                .fg(theme::TEXT_DIM)
                .add_modifier(Modifier::BOLD),
        ));

    if app.transactions.is_empty() {
        let msg = vec![
            Line::from(""),
            Line::from(Span::styled(
                "No transactions match this filter",
                theme::dim_style(),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "Widen it with :filter all or add one with :add-txn",
                theme::dim_style(),
            )),
        ];
        f.render_widget(Paragraph::new(msg).centered().block(block), area);
        return;
    }

    let header_cells = ["Date", "Type", "Account", "Category", "Amount", "Note"]
        .iter()
        .map(|h| Cell::from(*h).style(theme::header_style()));
    let header = Row::new(header_cells).height(1);

    let symbol = app.currency.as_str();
    let rows: Vec<Row> = app
        .transactions
        .iter()
        .enumerate()
        .skip(app.transaction_scroll)
        .take(area.height.saturating_sub(3) as usize)
        .map(|(i, row)| {
            let txn = &row.transaction;
            let amount_style = if txn.is_expense() {
                theme::expense_style()
            } else {
                theme::income_style()
            };
            let sign = if txn.is_income() { "+" } else { "-" };

            let style = if i == app.transaction_index {
                theme::selected_style()
            } else if i % 2 == 1 {
                theme::alt_row_style()
            } else {
                theme::normal_style()
            };

            Row::new(vec![
                Cell::from(txn.date.to_string()),
                Cell::from(txn.kind.as_str()),
                Cell::from(truncate(&row.account_label(), 32)),
                Cell::from(truncate(row.category_label(), 18)),
                Cell::from(Span::styled(
                    format!("{sign}{}", format_amount(txn.amount, symbol)),
                    amount_style,
                )),
                Cell::from(truncate(txn.note.as_deref().unwrap_or(""), 40)),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Length(11),
        Constraint::Length(8),
        Constraint::Length(32),
        Constraint::Length(18),
        Constraint::Length(15),
        Constraint::Min(10),
    ];

    let table = Table::new(rows, widths).header(header).block(block);
    f.render_widget(table, area);
}
