//! HTML serialization of a `GalleryView`.
//!
//! Field values come from an external generator, so every one of them is
//! escaped before it is written into markup or an attribute.

use super::fragment::{CardView, GalleryItem, GalleryView, ModalView};

const NO_RESULTS_TEXT: &str = "No results found";

pub fn escape_html(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

pub fn render_card_html(card: &CardView) -> String {
    format!(
        concat!(
            "<div class=\"card\" data-record-id=\"{id}\">\n",
            "  <div class=\"card-img-container\">\n",
            "    <img class=\"card-img\" src=\"{img}\" alt=\"profile picture\">\n",
            "  </div>\n",
            "  <div class=\"card-info-container\">\n",
            "    <h3 class=\"card-name cap\">{name}</h3>\n",
            "    <p class=\"card-text\">{email}</p>\n",
            "    <p class=\"card-text cap\">{locality}</p>\n",
            "  </div>\n",
            "</div>\n",
        ),
        id = card.record_id,
        img = escape_html(&card.thumbnail_url),
        name = escape_html(&card.name),
        email = escape_html(&card.email),
        locality = escape_html(&card.locality),
    )
}

pub fn render_modal_html(modal: &ModalView) -> String {
    let disabled = |enabled: bool| if enabled { "" } else { " disabled" };
    format!(
        concat!(
            "<div class=\"modal-container\" data-record-id=\"{id}\">\n",
            "  <div class=\"modal\">\n",
            "    <button type=\"button\" id=\"modal-close-btn\" class=\"modal-close-btn\"><strong>X</strong></button>\n",
            "    <div class=\"modal-info-container\">\n",
            "      <img class=\"modal-img\" src=\"{img}\" alt=\"profile picture\">\n",
            "      <h3 class=\"modal-name cap\">{name}</h3>\n",
            "      <p class=\"modal-text\">{email}</p>\n",
            "      <p class=\"modal-text cap\">{city}</p>\n",
            "      <hr>\n",
            "      <p class=\"modal-text\">{phone}</p>\n",
            "{landline}",
            "      <p class=\"modal-text\">{address}</p>\n",
            "      <p class=\"modal-text\">Birthday: {birthday}{age}</p>\n",
            "{nationality}",
            "    </div>\n",
            "  </div>\n",
            "  <div class=\"modal-btn-container\">\n",
            "    <button type=\"button\" id=\"modal-prev\" class=\"modal-prev btn\"{prev}>Prev</button>\n",
            "    <button type=\"button\" id=\"modal-next\" class=\"modal-next btn\"{next}>Next</button>\n",
            "  </div>\n",
            "</div>\n",
        ),
        id = modal.record_id,
        img = escape_html(&modal.picture_url),
        name = escape_html(&modal.name),
        email = escape_html(&modal.email),
        city = escape_html(&modal.city),
        phone = escape_html(&modal.phone),
        address = escape_html(&modal.address),
        birthday = escape_html(&modal.birthday),
        landline = optional_line("Landline", modal.landline.as_deref()),
        age = modal.age.map(|age| format!(" (age {})", age)).unwrap_or_default(),
        nationality = optional_line("Nationality", modal.nationality.as_deref()),
        prev = disabled(modal.has_prev()),
        next = disabled(modal.has_next()),
    )
}

fn optional_line(label: &str, value: Option<&str>) -> String {
    value
        .map(|v| format!("      <p class=\"modal-text\">{}: {}</p>\n", label, escape_html(v)))
        .unwrap_or_default()
}

/// Serialize the gallery container followed by the modal, if open
pub fn render_gallery_html(view: &GalleryView) -> String {
    let mut out = String::new();
    out.push_str("<div id=\"gallery\" class=\"gallery\">\n");
    for item in view.items() {
        match item {
            GalleryItem::Card(card) => out.push_str(&render_card_html(card)),
            GalleryItem::NoResults => {
                out.push_str(&format!("<p class=\"no-results\">{}</p>\n", NO_RESULTS_TEXT));
            }
        }
    }
    out.push_str("</div>\n");
    if let Some(modal) = view.modal() {
        out.push_str(&render_modal_html(modal));
    }
    out
}

/// A standalone page: search form, gallery and modal
pub fn render_page(view: &GalleryView, title: &str) -> String {
    let mut out = String::new();
    out.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    out.push_str("<meta charset=\"utf-8\">\n");
    out.push_str(&format!("<title>{}</title>\n", escape_html(title)));
    out.push_str("</head>\n<body>\n<header>\n");
    out.push_str(&format!("<h1>{}</h1>\n", escape_html(title)));
    out.push_str(concat!(
        "<div class=\"search-container\">\n",
        "<form action=\"#\" method=\"get\">\n",
        "<input type=\"search\" id=\"search-input\" class=\"search-input\" placeholder=\"Search...\">\n",
        "<input type=\"submit\" value=\"Search\" id=\"search-submit\" class=\"search-submit\">\n",
        "</form>\n",
        "</div>\n",
    ));
    out.push_str("</header>\n");
    out.push_str(&render_gallery_html(view));
    out.push_str("</body>\n</html>\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::user::fixtures::user;
    use crate::models::RecordId;
    use crate::view::renderer::{render_card, render_gallery, render_modal};

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<b onclick="x">Tom & 'Jerry'</b>"#),
            "&lt;b onclick=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/b&gt;"
        );
        assert_eq!(escape_html("plain"), "plain");
    }

    #[test]
    fn test_card_html_escapes_injected_markup() {
        let mut record = user("Jane", "Doe");
        record.name.first = "<script>alert(1)</script>".to_string();
        let mut view = GalleryView::new();
        render_card(&mut view, RecordId(4), &record);

        let html = render_gallery_html(&view);
        assert!(html.contains("data-record-id=\"4\""));
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt; Doe"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_no_results_html() {
        let mut view = GalleryView::new();
        render_gallery(&mut view, std::iter::empty());
        let html = render_gallery_html(&view);
        assert!(html.contains("<p class=\"no-results\">No results found</p>"));
        assert!(!html.contains("class=\"card\""));
    }

    #[test]
    fn test_modal_html_disables_bounds() {
        let mut view = GalleryView::new();
        render_modal(&mut view, RecordId(0), &user("Jane", "Doe"), 0, 1);
        let html = render_gallery_html(&view);
        assert!(html.contains("class=\"modal-prev btn\" disabled>Prev"));
        assert!(html.contains("class=\"modal-next btn\" disabled>Next"));
        assert!(html.contains("Birthday: 05/21/1990 (age 34)"));
        assert!(html.contains("(123) 456-7890"));
        assert!(html.contains("Nationality: US"));
        assert!(!html.contains("Landline"));
    }

    #[test]
    fn test_page_wraps_gallery() {
        let view = GalleryView::new();
        let page = render_page(&view, "Random <Users>");
        assert!(page.starts_with("<!DOCTYPE html>"));
        assert!(page.contains("<title>Random &lt;Users&gt;</title>"));
        assert!(page.contains("id=\"search-input\""));
        assert!(page.contains("<div id=\"gallery\" class=\"gallery\">"));
    }
}
