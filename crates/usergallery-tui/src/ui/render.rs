use chrono::Utc;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use usergallery_core::utils::format_elapsed;
use usergallery_core::LoadState;

use crate::app::{App, AppState};

use super::{gallery, modal, styles};

/// Screen regions of the main window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MainLayout {
    pub title: Rect,
    pub search: Rect,
    pub gallery: Rect,
    pub status: Rect,
}

pub fn main_layout(area: Rect) -> MainLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title bar
            Constraint::Length(3), // Search bar
            Constraint::Min(5),    // Card grid
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    MainLayout {
        title: chunks[0],
        search: chunks[1],
        gallery: chunks[2],
        status: chunks[3],
    }
}

pub fn render(frame: &mut Frame, app: &App) {
    let layout = main_layout(frame.area());

    render_title_bar(frame, layout.title);
    render_search_bar(frame, app, layout.search);
    gallery::render(frame, app, layout.gallery);
    render_status_bar(frame, app, layout.status);

    // Render overlays
    if let Some(view) = app.gallery.view().modal() {
        modal::render_modal(frame, view);
    }

    if matches!(app.state, AppState::ShowingHelp) {
        render_help_overlay(frame);
    }

    if matches!(app.state, AppState::ConfirmingQuit) {
        render_quit_overlay(frame);
    }
}

fn render_title_bar(frame: &mut Frame, area: Rect) {
    let title = "  Random User Directory";
    let help_hint = "[?] Help";

    let title_line = Line::from(vec![
        Span::styled(title, styles::title_style()),
        Span::raw(" ".repeat(
            area.width
                .saturating_sub(title.len() as u16 + help_hint.len() as u16 + 4)
                as usize,
        )),
        Span::styled(help_hint, styles::muted_style()),
    ]);

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(styles::muted_style());

    let paragraph = Paragraph::new(title_line).block(block);
    frame.render_widget(paragraph, area);
}

fn render_search_bar(frame: &mut Frame, app: &App, area: Rect) {
    let searching = app.state == AppState::Searching;

    let line = if searching {
        Line::from(vec![
            Span::styled(" Name: ", styles::muted_style()),
            Span::styled(format!("{}_", app.search_query), styles::search_style()),
        ])
    } else if !app.applied_query.is_empty() {
        Line::from(vec![
            Span::styled(" Name: ", styles::muted_style()),
            Span::styled(app.applied_query.clone(), styles::search_style()),
            Span::styled("   [Esc] show everyone", styles::muted_style()),
        ])
    } else {
        Line::from(Span::styled(" Press / to search by name", styles::muted_style()))
    };

    let block = Block::default()
        .title(" Search ")
        .borders(Borders::ALL)
        .border_style(styles::border_style(searching));

    frame.render_widget(Paragraph::new(line).block(block), area);
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let (left_text, left_style) = match app.gallery.load_state() {
        LoadState::Pending => (" Loading users... ".to_string(), styles::muted_style()),
        LoadState::Failed(reason) => (
            format!(" Load failed: {} ", reason),
            styles::error_style(),
        ),
        LoadState::Loaded { count, fetched_at } => {
            let mut text = format!(
                " Loaded {} users {}",
                count,
                format_elapsed(*fetched_at, Utc::now())
            );
            if !app.applied_query.is_empty() {
                text.push_str(&format!(
                    " | Showing {} of {} for \"{}\"",
                    app.gallery.view().card_count(),
                    count,
                    app.applied_query
                ));
            }
            text.push(' ');
            (text, styles::success_style())
        }
    };

    let shortcuts = if app.modal_open() {
        "[←/→] prev/next | [Esc] close"
    } else {
        "[/] search | [Enter] open | [q]uit"
    };
    let right_text = format!(" {} ", shortcuts);

    let width = area.width as usize;
    let padding_len = width
        .saturating_sub(left_text.chars().count())
        .saturating_sub(right_text.chars().count());

    let status_line = Line::from(vec![
        Span::styled(left_text, left_style),
        Span::raw(" ".repeat(padding_len)),
        Span::styled(right_text, styles::muted_style()),
    ]);
    let paragraph = Paragraph::new(status_line).style(styles::status_bar_style());
    frame.render_widget(paragraph, area);
}

fn help_line(key: &'static str, desc: &'static str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {:<10}", key), styles::help_key_style()),
        Span::styled(desc, styles::help_desc_style()),
    ])
}

fn render_help_overlay(frame: &mut Frame) {
    let area = centered_rect_fixed(52, 22, frame.area());

    // Clear the area
    frame.render_widget(Clear, area);

    let version = env!("CARGO_PKG_VERSION");

    let help_text = vec![
        Line::from(Span::styled("  Random User Directory", styles::title_style())),
        Line::from(Span::styled(
            format!("  version {}", version),
            styles::muted_style(),
        )),
        Line::from(""),
        Line::from(Span::styled(" Gallery", styles::highlight_style())),
        help_line("←↑↓→", "Move between cards"),
        help_line("Home/End", "First/last card"),
        help_line("Enter", "Open card details"),
        help_line("Click", "Open the card under the mouse"),
        help_line("/", "Search by first, last or full name"),
        help_line("Esc", "Clear the search"),
        Line::from(""),
        Line::from(Span::styled(" Details", styles::highlight_style())),
        help_line("←/→ p/n", "Previous/next user"),
        help_line("Esc c", "Close details"),
        Line::from(""),
        help_line("q", "Quit"),
        Line::from(""),
        Line::from(vec![
            Span::styled("       Press ", styles::muted_style()),
            Span::styled("?", styles::help_key_style()),
            Span::styled(" or ", styles::muted_style()),
            Span::styled("Esc", styles::help_key_style()),
            Span::styled(" to close", styles::muted_style()),
        ]),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(true))
        .style(Style::default());

    let paragraph = Paragraph::new(help_text).block(block);

    frame.render_widget(paragraph, area);
}

/// Create a centered rectangle with fixed dimensions
pub fn centered_rect_fixed(width: u16, height: u16, r: Rect) -> Rect {
    let x = r.x + (r.width.saturating_sub(width)) / 2;
    let y = r.y + (r.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(r.width), height.min(r.height))
}

fn render_quit_overlay(frame: &mut Frame) {
    let area = centered_rect_fixed(46, 7, frame.area());

    // Clear the area
    frame.render_widget(Clear, area);

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "   Are you sure you want to quit?",
            styles::highlight_style(),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("   Press ", styles::muted_style()),
            Span::styled("[Y]", styles::help_key_style()),
            Span::styled(" to quit, ", styles::muted_style()),
            Span::styled("[N]", styles::help_key_style()),
            Span::styled(" to cancel", styles::muted_style()),
        ]),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(true))
        .style(Style::default());

    let paragraph = Paragraph::new(lines).block(block);

    frame.render_widget(paragraph, area);
}
