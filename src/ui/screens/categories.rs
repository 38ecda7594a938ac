use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

use crate::models::{Category, CategoryType};
use crate::ui::app::{App, Pane};
use crate::ui::theme;

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    render_list(f, chunks[0], app, Pane::Left, "Expense", &app.expense_categories);
    render_list(f, chunks[1], app, Pane::Right, "Income", &app.income_categories);
}

fn render_list(
    f: &mut Frame,
    area: Rect,
    app: &App,
    pane: Pane,
    title: &str,
    categories: &[Category],
) {
    let focused = app.categories_pane == pane;

    let items: Vec<ListItem> = categories
        .iter()
        .enumerate()
        .map(|(i, cat)| {
            let style = if focused && i == app.category_index {
                theme::selected_style()
            } else {
                theme::normal_style()
            };
            // Shared categories show up in both lists.
            let marker = if cat.kind == CategoryType::Both {
                Span::styled("  (both)", theme::dim_style())
            } else {
                Span::raw("")
            };
            ListItem::new(Line::from(vec![Span::styled(cat.name.clone(), style), marker]))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(theme::border_style(focused))
            .title(Span::styled(
                format!(" {title} ({}) ", categories.len()),
                theme::title_style(focused),
            )),
    );
    f.render_widget(list, area);
}
