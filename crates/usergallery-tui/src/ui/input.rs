use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use tracing::debug;

use usergallery_core::GalleryEvent;

use crate::app::{App, AppState};

use super::gallery::{contains, GridLayout};
use super::modal::modal_layout;
use super::render::main_layout;

/// Handle keyboard input. Returns true if the app should quit.
pub fn handle_input(app: &mut App, key: KeyEvent) -> Result<bool> {
    // Handle help overlay
    if matches!(app.state, AppState::ShowingHelp) {
        if matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')) {
            app.state = AppState::Normal;
        }
        return Ok(false);
    }

    // Handle quit confirmation
    if matches!(app.state, AppState::ConfirmingQuit) {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                app.state = AppState::Quitting;
                return Ok(true);
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                app.state = AppState::Normal;
            }
            _ => {}
        }
        return Ok(false);
    }

    if matches!(app.state, AppState::Searching) {
        return handle_search_input(app, key);
    }

    if app.modal_open() {
        return handle_modal_input(app, key);
    }

    match key.code {
        KeyCode::Char('q') => app.state = AppState::ConfirmingQuit,
        KeyCode::Char('?') => app.state = AppState::ShowingHelp,
        KeyCode::Char('/') => app.start_search(),
        KeyCode::Left | KeyCode::Char('h') => app.select_left(),
        KeyCode::Right | KeyCode::Char('l') => app.select_right(),
        KeyCode::Up | KeyCode::Char('k') => app.select_up(),
        KeyCode::Down | KeyCode::Char('j') => app.select_down(),
        KeyCode::Home => app.select_first(),
        KeyCode::End => app.select_last(),
        KeyCode::Enter | KeyCode::Char(' ') => {
            app.open_selected();
        }
        KeyCode::Esc => {
            if !app.applied_query.is_empty() {
                app.clear_search();
            }
        }
        _ => {}
    }

    Ok(false)
}

fn handle_search_input(app: &mut App, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Esc => app.cancel_search(),
        KeyCode::Enter => app.submit_search(),
        KeyCode::Backspace => {
            app.search_query.pop();
        }
        KeyCode::Char(c) => app.push_search_char(c),
        _ => {}
    }
    Ok(false)
}

fn handle_modal_input(app: &mut App, key: KeyEvent) -> Result<bool> {
    let event = match key.code {
        KeyCode::Left | KeyCode::Char('p') | KeyCode::Char('h') => GalleryEvent::PrevClicked,
        KeyCode::Right | KeyCode::Char('n') | KeyCode::Char('l') => GalleryEvent::NextClicked,
        KeyCode::Esc | KeyCode::Char('c') => GalleryEvent::CloseClicked,
        KeyCode::Char('?') => {
            app.state = AppState::ShowingHelp;
            return Ok(false);
        }
        KeyCode::Char('q') => {
            app.state = AppState::ConfirmingQuit;
            return Ok(false);
        }
        _ => return Ok(false),
    };
    app.dispatch(event);
    Ok(false)
}

/// Handle mouse input: left clicks act as page clicks, the wheel scrolls cards.
pub fn handle_mouse(app: &mut App, mouse: MouseEvent) -> Result<()> {
    if matches!(app.state, AppState::ShowingHelp | AppState::ConfirmingQuit) {
        return Ok(());
    }

    let (column, row) = (mouse.column, mouse.row);
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            if app.modal_open() {
                click_modal(app, column, row);
            } else {
                click_page(app, column, row);
            }
        }
        MouseEventKind::ScrollDown if !app.modal_open() => app.select_down(),
        MouseEventKind::ScrollUp if !app.modal_open() => app.select_up(),
        _ => {}
    }
    Ok(())
}

fn click_modal(app: &mut App, column: u16, row: u16) {
    let layout = modal_layout(app.viewport);
    let event = if contains(layout.prev, column, row) {
        GalleryEvent::PrevClicked
    } else if contains(layout.next, column, row) {
        GalleryEvent::NextClicked
    } else if contains(layout.close, column, row) {
        GalleryEvent::CloseClicked
    } else if !contains(layout.area, column, row) {
        GalleryEvent::OutsideClicked
    } else {
        return;
    };
    app.dispatch(event);
}

fn click_page(app: &mut App, column: u16, row: u16) {
    let layout = main_layout(app.viewport);

    if contains(layout.search, column, row) {
        if app.state != AppState::Searching {
            app.start_search();
        }
        return;
    }

    // A click anywhere else leaves the search box as it was submitted
    if app.state == AppState::Searching {
        app.cancel_search();
    }

    let grid = GridLayout::new(layout.gallery, app.gallery.view().card_count(), app.selection);
    match grid.card_at(column, row) {
        Some(index) => {
            app.open_card(index);
        }
        None => debug!(column, row, "Click did not land on a card"),
    }
}
