use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use tracing::{error, info};

use crate::config::Config;
use crate::db::Database;
use crate::ui::app::{App, InputMode, Pane, Screen};
use crate::ui::commands;
use crate::ui::util::{scroll_down, scroll_to_bottom, scroll_to_top, scroll_up};

pub(crate) fn as_tui(db: &mut Database, config: &Config) -> Result<()> {
    let mut app = App::new(config);
    app.refresh_all(db)?;
    info!("starting TUI");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app, db);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(ref e) = result {
        error!(error = ?e, "TUI exited with an error");
        eprintln!("Error: {e:?}");
    }

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    db: &mut Database,
) -> Result<()> {
    while app.running {
        terminal.draw(|f| {
            // Tab bar, status bar and command bar
            let content_height = f.area().height.saturating_sub(3) as usize;
            app.visible_rows = content_height.max(1);
            crate::ui::render::render(f, app);
        })?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if app.show_help {
                app.show_help = false;
                continue;
            }
            match app.input_mode {
                InputMode::Normal => handle_normal_input(key, app, db)?,
                InputMode::Command => handle_command_input(key, app, db)?,
                InputMode::Confirm => handle_confirm_input(key, app, db)?,
            }
        }
    }
    Ok(())
}

// ── Input handlers ───────────────────────────────────────────

fn handle_normal_input(key: event::KeyEvent, app: &mut App, db: &mut Database) -> Result<()> {
    match key.code {
        KeyCode::Char(':') => {
            app.input_mode = InputMode::Command;
            app.command_input.clear();
        }
        KeyCode::Char('q') | KeyCode::Char('c')
            if key.modifiers.contains(KeyModifiers::CONTROL) =>
        {
            app.running = false;
        }
        KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            for _ in 0..app.visible_rows / 2 {
                handle_move_down(app);
            }
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            for _ in 0..app.visible_rows / 2 {
                handle_move_up(app);
            }
        }
        KeyCode::Char('j') | KeyCode::Down => handle_move_down(app),
        KeyCode::Char('k') | KeyCode::Up => handle_move_up(app),
        KeyCode::Char('h') | KeyCode::Left | KeyCode::Char('l') | KeyCode::Right => {
            switch_pane(app);
        }
        KeyCode::Char('1') => switch_screen(app, db, Screen::Dashboard)?,
        KeyCode::Char('2') => switch_screen(app, db, Screen::Transactions)?,
        KeyCode::Char('3') => switch_screen(app, db, Screen::Accounts)?,
        KeyCode::Char('4') => switch_screen(app, db, Screen::Categories)?,
        KeyCode::Tab => {
            let screens = Screen::all();
            let idx = screens.iter().position(|s| *s == app.screen).unwrap_or(0);
            let next = (idx + 1) % screens.len();
            switch_screen(app, db, screens[next])?;
        }
        KeyCode::BackTab => {
            let screens = Screen::all();
            let idx = screens.iter().position(|s| *s == app.screen).unwrap_or(0);
            let prev = if idx == 0 { screens.len() - 1 } else { idx - 1 };
            switch_screen(app, db, screens[prev])?;
        }
        KeyCode::Char('g') => handle_goto_top(app),
        KeyCode::Char('G') => handle_goto_bottom(app),
        KeyCode::Char('D') => commands::request_delete(app, db)?,
        KeyCode::Char('R') => commands::handle_command("refresh", app, db)?,
        KeyCode::Char('?') => {
            app.show_help = true;
        }
        KeyCode::Esc => {
            app.status_message.clear();
        }
        _ => {}
    }
    Ok(())
}

fn handle_command_input(key: event::KeyEvent, app: &mut App, db: &mut Database) -> Result<()> {
    match key.code {
        KeyCode::Enter => {
            let input = app.command_input.clone();
            app.input_mode = InputMode::Normal;
            app.command_input.clear();
            commands::handle_command(&input, app, db)?;
        }
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
            app.command_input.clear();
        }
        KeyCode::Backspace => {
            app.command_input.pop();
            if app.command_input.is_empty() {
                app.input_mode = InputMode::Normal;
            }
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.command_input.clear();
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Char('w') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            let trimmed = app.command_input.trim_end();
            if let Some(pos) = trimmed.rfind(' ') {
                app.command_input.truncate(pos + 1);
            } else {
                app.command_input.clear();
                app.input_mode = InputMode::Normal;
            }
        }
        KeyCode::Char(c) => {
            app.command_input.push(c);
        }
        _ => {}
    }
    Ok(())
}

fn handle_confirm_input(key: event::KeyEvent, app: &mut App, db: &mut Database) -> Result<()> {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => {
            app.input_mode = InputMode::Normal;
            app.confirm_message.clear();
            if let Some(action) = app.pending_action.take() {
                commands::execute_pending(action, app, db)?;
            }
        }
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc | KeyCode::Enter => {
            app.pending_action = None;
            app.input_mode = InputMode::Normal;
            app.confirm_message.clear();
            app.set_status("Cancelled");
        }
        _ => {}
    }
    Ok(())
}

// ── Navigation helpers ───────────────────────────────────────

fn switch_screen(app: &mut App, db: &mut Database, screen: Screen) -> Result<()> {
    app.screen = screen;
    match screen {
        Screen::Dashboard => app.refresh_dashboard(db)?,
        Screen::Transactions => app.refresh_transactions(db)?,
        Screen::Accounts => app.refresh_accounts(db)?,
        Screen::Categories => app.refresh_categories(db)?,
    }
    app.set_status(format!("{screen}"));
    Ok(())
}

fn switch_pane(app: &mut App) {
    match app.screen {
        Screen::Accounts => {
            app.accounts_pane = app.accounts_pane.toggle();
            app.account_index = 0;
        }
        Screen::Categories => {
            app.categories_pane = app.categories_pane.toggle();
            app.category_index = 0;
        }
        _ => {}
    }
}

fn handle_move_down(app: &mut App) {
    match app.screen {
        Screen::Transactions => {
            let page = app.transaction_page();
            scroll_down(
                &mut app.transaction_index,
                &mut app.transaction_scroll,
                app.transactions.len(),
                page,
            );
        }
        Screen::Accounts => {
            let mut scroll = 0;
            if app.accounts_pane == Pane::Left {
                let len = app.groups.len();
                scroll_down(&mut app.group_index, &mut scroll, len, len);
                app.account_index = 0;
            } else {
                let len = app.selected_group_accounts().len();
                scroll_down(&mut app.account_index, &mut scroll, len, len);
            }
        }
        Screen::Categories => {
            let mut scroll = 0;
            let len = app.active_categories().len();
            scroll_down(&mut app.category_index, &mut scroll, len, len);
        }
        Screen::Dashboard => {}
    }
}

fn handle_move_up(app: &mut App) {
    let mut scroll = 0;
    match app.screen {
        Screen::Transactions => {
            scroll_up(&mut app.transaction_index, &mut app.transaction_scroll);
        }
        Screen::Accounts => {
            if app.accounts_pane == Pane::Left {
                scroll_up(&mut app.group_index, &mut scroll);
                app.account_index = 0;
            } else {
                scroll_up(&mut app.account_index, &mut scroll);
            }
        }
        Screen::Categories => scroll_up(&mut app.category_index, &mut scroll),
        Screen::Dashboard => {}
    }
}

fn handle_goto_top(app: &mut App) {
    let mut scroll = 0;
    match app.screen {
        Screen::Transactions => {
            scroll_to_top(&mut app.transaction_index, &mut app.transaction_scroll);
        }
        Screen::Accounts => {
            if app.accounts_pane == Pane::Left {
                app.account_index = 0;
                scroll_to_top(&mut app.group_index, &mut scroll);
            } else {
                scroll_to_top(&mut app.account_index, &mut scroll);
            }
        }
        Screen::Categories => scroll_to_top(&mut app.category_index, &mut scroll),
        Screen::Dashboard => {}
    }
}

fn handle_goto_bottom(app: &mut App) {
    let mut scroll = 0;
    match app.screen {
        Screen::Transactions => {
            let page = app.transaction_page();
            scroll_to_bottom(
                &mut app.transaction_index,
                &mut app.transaction_scroll,
                app.transactions.len(),
                page,
            );
        }
        Screen::Accounts => {
            if app.accounts_pane == Pane::Left {
                let len = app.groups.len();
                scroll_to_bottom(&mut app.group_index, &mut scroll, len, len);
                app.account_index = 0;
            } else {
                let len = app.selected_group_accounts().len();
                scroll_to_bottom(&mut app.account_index, &mut scroll, len, len);
            }
        }
        Screen::Categories => {
            let len = app.active_categories().len();
            scroll_to_bottom(&mut app.category_index, &mut scroll, len, len);
        }
        Screen::Dashboard => {}
    }
}
