//! Builds fragments from records and inserts them into a `GalleryView`.

use tracing::debug;

use crate::models::{RecordId, UserRecord};
use crate::utils::{format_address, format_birthday, format_phone};

use super::fragment::{CardView, GalleryItem, GalleryView, ModalView};

/// Append a card for the record after any existing items
pub fn render_card(view: &mut GalleryView, id: RecordId, record: &UserRecord) {
    view.items.push(GalleryItem::Card(CardView {
        record_id: id,
        thumbnail_url: record.picture.thumbnail.clone(),
        name: record.full_name(),
        email: record.email.clone(),
        locality: record.locality(),
    }));
}

/// Append a card per record, or the no-results indicator when there are none.
/// Existing items are kept; call `clear_gallery` first to re-render.
pub fn render_gallery<'a, I>(view: &mut GalleryView, records: I)
where
    I: IntoIterator<Item = (RecordId, &'a UserRecord)>,
{
    let before = view.items.len();
    for (id, record) in records {
        render_card(view, id, record);
    }
    if view.items.len() == before {
        view.items.push(GalleryItem::NoResults);
    }
    debug!(cards = view.items.len() - before, "Gallery rendered");
}

/// Show the record in the modal, replacing any modal already open
pub fn render_modal(
    view: &mut GalleryView,
    id: RecordId,
    record: &UserRecord,
    index: usize,
    total: usize,
) {
    view.modal = Some(ModalView {
        record_id: id,
        index,
        total,
        picture_url: record.picture.medium.clone(),
        name: record.full_name(),
        email: record.email.clone(),
        city: record.location.city.clone(),
        phone: format_phone(&record.cell),
        address: format_address(&record.location),
        birthday: format_birthday(&record.dob.date),
        landline: record.phone.as_deref().map(format_phone),
        age: record.dob.age,
        nationality: record.nat.clone(),
    });
}

pub fn close_modal(view: &mut GalleryView) {
    view.modal = None;
}

/// Remove all cards and the no-results indicator; the modal is left alone
pub fn clear_gallery(view: &mut GalleryView) {
    view.items.clear();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::user::fixtures::user;

    #[test]
    fn test_render_card_fields() {
        let mut view = GalleryView::new();
        let record = user("Jane", "Doe");
        render_card(&mut view, RecordId(3), &record);

        let card = view.cards().next().unwrap();
        assert_eq!(card.record_id, RecordId(3));
        assert_eq!(card.name, "Jane Doe");
        assert_eq!(card.email, "jane.doe@example.com");
        assert_eq!(card.locality, "Portland, OR");
        assert_eq!(card.thumbnail_url, record.picture.thumbnail);
    }

    #[test]
    fn test_render_gallery_appends_in_order() {
        let records = vec![user("A", "One"), user("B", "Two")];
        let mut view = GalleryView::new();
        render_gallery(&mut view, records.iter().enumerate().map(|(i, r)| (RecordId(i), r)));
        render_gallery(&mut view, records.iter().enumerate().map(|(i, r)| (RecordId(i), r)).take(1));

        let names: Vec<&str> = view.cards().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["A One", "B Two", "A One"]);
        assert!(!view.shows_no_results());
    }

    #[test]
    fn test_render_gallery_empty_shows_no_results() {
        let mut view = GalleryView::new();
        render_gallery(&mut view, std::iter::empty());
        assert_eq!(view.items(), &[GalleryItem::NoResults]);
        assert_eq!(view.card_count(), 0);
    }

    #[test]
    fn test_render_modal_formats_fields() {
        let mut view = GalleryView::new();
        render_modal(&mut view, RecordId(0), &user("Jane", "Doe"), 0, 12);

        let modal = view.modal().unwrap();
        assert_eq!(modal.phone, "(123) 456-7890");
        assert_eq!(modal.address, "42 Main St, Portland, OR, 97204");
        assert_eq!(modal.birthday, "05/21/1990");
        assert_eq!(modal.city, "Portland");
        assert_eq!(modal.landline, None);
        assert_eq!(modal.age, Some(34));
        assert_eq!(modal.nationality.as_deref(), Some("US"));
        assert!(!modal.has_prev());
        assert!(modal.has_next());
        assert_eq!(view.active_modal_index(), Some(0));
    }

    #[test]
    fn test_render_modal_formats_landline() {
        let mut record = user("Jane", "Doe");
        record.phone = Some("555.111.2222".to_string());
        let mut view = GalleryView::new();
        render_modal(&mut view, RecordId(0), &record, 0, 1);
        assert_eq!(
            view.modal().unwrap().landline.as_deref(),
            Some("(555) 111-2222")
        );
    }

    #[test]
    fn test_render_modal_replaces_existing() {
        let mut view = GalleryView::new();
        render_modal(&mut view, RecordId(0), &user("Jane", "Doe"), 0, 2);
        render_modal(&mut view, RecordId(1), &user("John", "Smith"), 1, 2);

        let modal = view.modal().unwrap();
        assert_eq!(modal.name, "John Smith");
        assert!(modal.has_prev());
        assert!(!modal.has_next());

        close_modal(&mut view);
        assert!(view.modal().is_none());
        assert_eq!(view.active_modal_index(), None);
    }

    #[test]
    fn test_clear_gallery_keeps_modal() {
        let mut view = GalleryView::new();
        let record = user("Jane", "Doe");
        render_card(&mut view, RecordId(0), &record);
        render_modal(&mut view, RecordId(0), &record, 0, 1);

        clear_gallery(&mut view);
        assert!(view.items().is_empty());
        assert!(view.modal().is_some());
    }
}
