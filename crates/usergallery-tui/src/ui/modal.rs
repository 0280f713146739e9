//! Detail modal overlay.

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use usergallery_core::utils::truncate_string;
use usergallery_core::ModalView;

use super::render::centered_rect_fixed;
use super::styles;

pub const MODAL_WIDTH: u16 = 64;
pub const MODAL_HEIGHT: u16 = 15;

const PREV_LABEL: &str = "[◀ Prev]";
const NEXT_LABEL: &str = "[Next ▶]";
const CLOSE_LABEL: &str = "[Close]";

/// Where the modal and its buttons sit on screen.
///
/// Shared by drawing and mouse handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModalLayout {
    pub area: Rect,
    pub prev: Rect,
    pub next: Rect,
    pub close: Rect,
}

pub fn modal_layout(frame_area: Rect) -> ModalLayout {
    let area = centered_rect_fixed(MODAL_WIDTH, MODAL_HEIGHT, frame_area);
    let inner = Block::default().borders(Borders::ALL).inner(area);
    let y = inner.bottom().saturating_sub(1);

    let button = |offset: u16, label: &str| {
        Rect::new(inner.x + offset, y, label.chars().count() as u16, 1).intersection(inner)
    };

    ModalLayout {
        area,
        prev: button(2, PREV_LABEL),
        next: button(12, NEXT_LABEL),
        close: button(22, CLOSE_LABEL),
    }
}

pub fn render_modal(frame: &mut Frame, modal: &ModalView) {
    let layout = modal_layout(frame.area());
    frame.render_widget(Clear, layout.area);

    let block = Block::default()
        .title(" User Details ")
        .title_style(styles::title_style())
        .borders(Borders::ALL)
        .border_style(styles::border_style(true));
    let inner = block.inner(layout.area);
    frame.render_widget(block, layout.area);

    let value_width = (inner.width as usize).saturating_sub(14);
    let field = |label: &'static str, value: &str| {
        Line::from(vec![
            Span::styled(format!("  {:<11} ", label), styles::muted_style()),
            Span::styled(truncate_string(value, value_width), styles::list_item_style()),
        ])
    };

    let birthday = match modal.age {
        Some(age) => format!("{} (age {})", modal.birthday, age),
        None => modal.birthday.clone(),
    };

    let mut lines = vec![
        Line::from(Span::styled(format!("  {}", modal.name), styles::highlight_style())),
        Line::from(Span::styled(format!("  {}", modal.email), styles::list_item_style())),
        Line::from(Span::styled(format!("  {}", modal.city), styles::muted_style())),
        Line::from(Span::styled(
            format!("  {}", "─".repeat((inner.width as usize).saturating_sub(4))),
            styles::muted_style(),
        )),
        field("Cell", &modal.phone),
    ];
    if let Some(landline) = &modal.landline {
        lines.push(field("Landline", landline));
    }
    lines.push(field("Address", &modal.address));
    lines.push(field("Birthday", &birthday));
    if let Some(nationality) = &modal.nationality {
        lines.push(field("Nationality", nationality));
    }
    lines.push(field("Photo", &modal.picture_url));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        format!("  User {} of {}", modal.index + 1, modal.total),
        styles::muted_style(),
    )));

    let body = Rect::new(inner.x, inner.y, inner.width, inner.height.saturating_sub(1));
    frame.render_widget(Paragraph::new(lines), body);

    render_button(frame, layout.prev, PREV_LABEL, modal.has_prev());
    render_button(frame, layout.next, NEXT_LABEL, modal.has_next());
    render_button(frame, layout.close, CLOSE_LABEL, true);
}

fn render_button(frame: &mut Frame, area: Rect, label: &str, enabled: bool) {
    let style = if enabled {
        styles::help_key_style()
    } else {
        styles::muted_style()
    };
    frame.render_widget(Paragraph::new(Span::styled(label.to_string(), style)), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modal_layout_centered() {
        let layout = modal_layout(Rect::new(0, 0, 80, 24));
        assert_eq!(layout.area, Rect::new(8, 4, 64, 15));
        assert_eq!(layout.prev, Rect::new(11, 17, 8, 1));
        assert_eq!(layout.next, Rect::new(21, 17, 8, 1));
        assert_eq!(layout.close, Rect::new(31, 17, 7, 1));
    }

    #[test]
    fn test_modal_layout_small_terminal() {
        let layout = modal_layout(Rect::new(0, 0, 40, 10));
        assert_eq!(layout.area, Rect::new(0, 0, 40, 10));
        // Buttons stay on the last interior line
        assert_eq!(layout.close.y, 8);
        assert!(layout.close.right() <= 39);
    }
}
