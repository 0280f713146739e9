//! Card grid for the gallery container.
//!
//! Drawing and mouse hit-testing share `GridLayout`, so a click always
//! resolves to the card that was drawn under it. Clicks resolve to a grid
//! position, and the card at that position carries its record id.

use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use usergallery_core::utils::truncate_string;
use usergallery_core::{CardView, LoadState};

use crate::app::{App, AppState};
use crate::ui::styles;

/// Outer width of one card, borders included
pub const CARD_WIDTH: u16 = 38;

/// Outer height of one card: name, email and locality plus borders
pub const CARD_HEIGHT: u16 = 5;

const NO_RESULTS_TEXT: &str = "No results found";

/// Area inside the gallery border where cards are laid out
pub fn grid_area(area: Rect) -> Rect {
    Block::default().borders(Borders::ALL).inner(area)
}

/// Cards per row for a gallery drawn in `area`
pub fn columns_for(area: Rect) -> usize {
    (grid_area(area).width / CARD_WIDTH).max(1) as usize
}

/// Placement of cards in the grid, scrolled so the selected card is visible.
pub struct GridLayout {
    area: Rect,
    columns: usize,
    first_row: usize,
    visible_rows: usize,
    count: usize,
}

impl GridLayout {
    /// `area` is the whole gallery panel, border included
    pub fn new(area: Rect, count: usize, selection: usize) -> Self {
        let inner = grid_area(area);
        let columns = columns_for(area);
        let visible_rows = (inner.height / CARD_HEIGHT).max(1) as usize;
        let selected_row = selection / columns;
        let first_row = (selected_row + 1).saturating_sub(visible_rows);

        Self {
            area: inner,
            columns,
            first_row,
            visible_rows,
            count,
        }
    }

    /// Screen rectangle of the card at `index`, if it is scrolled into view
    pub fn card_rect(&self, index: usize) -> Option<Rect> {
        if index >= self.count {
            return None;
        }
        let row = index / self.columns;
        let column = index % self.columns;
        if row < self.first_row || row >= self.first_row + self.visible_rows {
            return None;
        }

        let x = self.area.x + column as u16 * CARD_WIDTH;
        let y = self.area.y + (row - self.first_row) as u16 * CARD_HEIGHT;
        let rect = Rect::new(x, y, CARD_WIDTH, CARD_HEIGHT).intersection(self.area);
        (!rect.is_empty()).then_some(rect)
    }

    /// Index of the card drawn at a terminal cell
    pub fn card_at(&self, column: u16, row: u16) -> Option<usize> {
        self.visible_indices()
            .find(|&i| self.card_rect(i).is_some_and(|rect| contains(rect, column, row)))
    }

    fn visible_indices(&self) -> impl Iterator<Item = usize> + '_ {
        let start = self.first_row * self.columns;
        let end = ((self.first_row + self.visible_rows) * self.columns).min(self.count);
        start..end
    }
}

pub fn contains(rect: Rect, column: u16, row: u16) -> bool {
    column >= rect.x && column < rect.right() && row >= rect.y && row < rect.bottom()
}

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let view = app.gallery.view();
    let count = view.card_count();
    let focused = !app.modal_open() && app.state != AppState::Searching;

    let title = if app.applied_query.is_empty() {
        format!(" Users ({}) ", count)
    } else {
        format!(" Users ({} of {}) ", count, app.gallery.state().store.len())
    };

    let block = Block::default()
        .title(title)
        .title_style(styles::muted_style())
        .borders(Borders::ALL)
        .border_style(styles::border_style(focused));
    frame.render_widget(block, area);

    // Nothing fetched yet, the fetch failed, or it returned an empty batch
    if view.items().is_empty() || app.gallery.state().store.is_empty() {
        render_placeholder(frame, app, grid_area(area));
        return;
    }

    if view.shows_no_results() {
        let message = Paragraph::new(Line::from(Span::styled(NO_RESULTS_TEXT, styles::highlight_style())))
            .alignment(Alignment::Center);
        frame.render_widget(message, centered_line(grid_area(area)));
        return;
    }

    let layout = GridLayout::new(area, count, app.selection);
    for (i, card) in view.cards().enumerate() {
        if let Some(rect) = layout.card_rect(i) {
            render_card(frame, card, rect, i == app.selection && focused);
        }
    }
}

fn render_card(frame: &mut Frame, card: &CardView, area: Rect, selected: bool) {
    let text_width = CARD_WIDTH.saturating_sub(4) as usize;
    let name_style = if selected {
        styles::selected_style()
    } else {
        styles::title_style()
    };

    let lines = vec![
        Line::from(vec![
            Span::styled(format!("[{}] ", initials(&card.name)), styles::highlight_style()),
            Span::styled(truncate_string(&card.name, text_width.saturating_sub(5)), name_style),
        ]),
        Line::from(Span::styled(
            truncate_string(&card.email, text_width),
            styles::list_item_style(),
        )),
        Line::from(Span::styled(
            truncate_string(&card.locality, text_width),
            styles::muted_style(),
        )),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(selected));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_placeholder(frame: &mut Frame, app: &App, area: Rect) {
    let line = match app.gallery.load_state() {
        LoadState::Pending => Line::from(Span::styled("Waiting for the directory...", styles::muted_style())),
        LoadState::Failed(_) => Line::from(Span::styled(
            "Could not load users. See the log for details.",
            styles::error_style(),
        )),
        LoadState::Loaded { .. } => Line::from(Span::styled(
            "The directory returned no users",
            styles::muted_style(),
        )),
    };
    frame.render_widget(
        Paragraph::new(line).alignment(Alignment::Center),
        centered_line(area),
    );
}

fn centered_line(area: Rect) -> Rect {
    let y = area.y + area.height / 2;
    Rect::new(area.x, y, area.width, 1).intersection(area)
}

/// First letter of the first two words, e.g. "JD" for "Jane Doe"
fn initials(name: &str) -> String {
    name.split_whitespace()
        .take(2)
        .filter_map(|word| word.chars().next())
        .flat_map(char::to_uppercase)
        .collect()
}
