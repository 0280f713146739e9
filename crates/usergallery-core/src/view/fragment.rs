use crate::models::RecordId;

/// Summary card for one record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardView {
    /// Identifier of the record the card was built from; clicks resolve through it
    pub record_id: RecordId,
    pub thumbnail_url: String,
    pub name: String,
    pub email: String,
    /// "city, state"
    pub locality: String,
}

/// Detail view of one record with navigation controls
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModalView {
    pub record_id: RecordId,
    /// Position in the full record list
    pub index: usize,
    pub total: usize,
    pub picture_url: String,
    pub name: String,
    pub email: String,
    pub city: String,
    pub phone: String,
    pub address: String,
    pub birthday: String,
    /// Formatted landline, when the record has one
    pub landline: Option<String>,
    pub age: Option<u32>,
    pub nationality: Option<String>,
}

impl ModalView {
    pub fn has_prev(&self) -> bool {
        self.index > 0
    }

    pub fn has_next(&self) -> bool {
        self.index + 1 < self.total
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GalleryItem {
    Card(CardView),
    /// Shown in place of cards when a search matches nothing
    NoResults,
}

/// The gallery container: cards in insertion order plus a single modal slot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GalleryView {
    pub(crate) items: Vec<GalleryItem>,
    pub(crate) modal: Option<ModalView>,
}

impl GalleryView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[GalleryItem] {
        &self.items
    }

    pub fn cards(&self) -> impl Iterator<Item = &CardView> + '_ {
        self.items.iter().filter_map(|item| match item {
            GalleryItem::Card(card) => Some(card),
            GalleryItem::NoResults => None,
        })
    }

    pub fn card_count(&self) -> usize {
        self.cards().count()
    }

    pub fn shows_no_results(&self) -> bool {
        self.items.iter().any(|item| matches!(item, GalleryItem::NoResults))
    }

    pub fn modal(&self) -> Option<&ModalView> {
        self.modal.as_ref()
    }

    /// Index into the full record list of the open modal, if any
    pub fn active_modal_index(&self) -> Option<usize> {
        self.modal.as_ref().map(|m| m.index)
    }
}
