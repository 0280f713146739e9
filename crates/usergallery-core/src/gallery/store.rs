use tracing::{debug, warn};

use crate::models::{RecordId, UserRecord};

/// In-memory record list populated once per run.
///
/// `displayed` always holds ids of `records` in ascending order, so the
/// displayed set is an order-preserving subsequence of the full list.
#[derive(Debug, Default)]
pub struct GalleryStore {
    records: Vec<UserRecord>,
    displayed: Vec<RecordId>,
    loaded: bool,
}

impl GalleryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Populate the store from the first successful fetch.
    /// Returns false (and changes nothing) if it was already populated.
    pub fn initialize(&mut self, records: Vec<UserRecord>) -> bool {
        if self.loaded {
            warn!(count = records.len(), "Ignoring duplicate store initialization");
            return false;
        }
        self.displayed = (0..records.len()).map(RecordId).collect();
        self.records = records;
        self.loaded = true;
        debug!(count = self.records.len(), "Store initialized");
        true
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: RecordId) -> Option<&UserRecord> {
        self.records.get(id.index())
    }

    pub fn displayed(&self) -> &[RecordId] {
        &self.displayed
    }

    /// Displayed ids paired with their records, in display order
    pub fn displayed_records(&self) -> impl Iterator<Item = (RecordId, &UserRecord)> + '_ {
        self.displayed
            .iter()
            .filter_map(|&id| self.get(id).map(|record| (id, record)))
    }

    /// Keep only records whose first, last or full name equals the query,
    /// ignoring case and surrounding whitespace. Returns the new displayed set.
    pub fn filter(&mut self, query: &str) -> &[RecordId] {
        let query = query.trim().to_lowercase();
        self.displayed = self
            .records
            .iter()
            .enumerate()
            .filter(|(_, record)| name_matches(record, &query))
            .map(|(i, _)| RecordId(i))
            .collect();
        debug!(query = %query, matches = self.displayed.len(), "Store filtered");
        &self.displayed
    }

    /// Show every record again
    pub fn clear(&mut self) {
        self.displayed = (0..self.records.len()).map(RecordId).collect();
    }

    /// First record whose "first last" equals `name` exactly.
    /// Generated names can repeat; the earliest record wins.
    pub fn find_by_display_name(&self, name: &str) -> Option<(RecordId, &UserRecord)> {
        self.records
            .iter()
            .enumerate()
            .find(|(_, record)| record.full_name() == name)
            .map(|(i, record)| (RecordId(i), record))
    }
}

/// Query must already be lowercased and trimmed
fn name_matches(record: &UserRecord, query: &str) -> bool {
    record.name.first.to_lowercase() == query
        || record.name.last.to_lowercase() == query
        || record.full_name().to_lowercase() == query
}
