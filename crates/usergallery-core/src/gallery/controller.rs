//! Interaction controller for the gallery.
//!
//! Owns the `GalleryState` (store plus view container) and turns front-end
//! events into store and renderer calls. The modal follows a small state
//! machine: `Closed` -> card clicked -> `Open(i)` -> next/prev within bounds
//! -> `Open(i±1)`; close or outside click -> `Closed`. Navigation is clamped
//! at both ends, never wrapped.

use chrono::{DateTime, Utc};
use tracing::{debug, error, info};

use crate::models::{RecordId, UserRecord};
use crate::view::{clear_gallery, close_modal, render_gallery, render_modal, GalleryView};

use super::store::GalleryStore;

/// Events a front end reports to the controller
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GalleryEvent {
    /// A card was clicked; carries the id the card was rendered with
    CardClicked(RecordId),
    SearchSubmitted(String),
    NextClicked,
    PrevClicked,
    CloseClicked,
    /// A click landed outside the open modal
    OutsideClicked,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalState {
    Closed,
    Open(usize),
}

/// Progress of the one-shot start-up fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Pending,
    Loaded {
        count: usize,
        fetched_at: DateTime<Utc>,
    },
    Failed(String),
}

/// Everything the page shows, owned by the controller.
#[derive(Debug, Default)]
pub struct GalleryState {
    pub store: GalleryStore,
    pub view: GalleryView,
}

impl GalleryState {
    /// Index into the full record list of the open modal
    pub fn active_modal_index(&self) -> Option<usize> {
        self.view.active_modal_index()
    }
}

pub struct GalleryController {
    state: GalleryState,
    load_state: LoadState,
}

impl Default for GalleryController {
    fn default() -> Self {
        Self::new()
    }
}

impl GalleryController {
    pub fn new() -> Self {
        Self {
            state: GalleryState::default(),
            load_state: LoadState::Pending,
        }
    }

    pub fn state(&self) -> &GalleryState {
        &self.state
    }

    pub fn view(&self) -> &GalleryView {
        &self.state.view
    }

    pub fn load_state(&self) -> &LoadState {
        &self.load_state
    }

    pub fn modal_state(&self) -> ModalState {
        match self.state.active_modal_index() {
            Some(index) => ModalState::Open(index),
            None => ModalState::Closed,
        }
    }

    // =========================================================================
    // Fetch results
    // =========================================================================

    /// Store the fetched records and render every card.
    /// Returns false if the gallery was already loaded.
    pub fn on_loaded(&mut self, records: Vec<UserRecord>) -> bool {
        let count = records.len();
        if !self.state.store.initialize(records) {
            return false;
        }

        let GalleryState { store, view } = &mut self.state;
        clear_gallery(view);
        render_gallery(view, store.displayed_records());

        self.load_state = LoadState::Loaded {
            count,
            fetched_at: Utc::now(),
        };
        info!(count, "Gallery loaded");
        true
    }

    /// Record a failed fetch. The gallery stays empty and nothing is retried.
    pub fn on_load_failed(&mut self, err: &anyhow::Error) {
        let detail = format!("{:#}", err);
        error!(error = %detail, "Looks like there was a problem loading users");
        if !self.state.store.is_loaded() {
            self.load_state = LoadState::Failed(err.to_string());
        }
    }

    // =========================================================================
    // Events
    // =========================================================================

    /// Apply one event. Returns true if the view changed.
    pub fn handle(&mut self, event: GalleryEvent) -> bool {
        debug!(?event, "Handling gallery event");
        match event {
            GalleryEvent::CardClicked(id) => self.open(id),
            GalleryEvent::SearchSubmitted(query) => self.search(&query),
            GalleryEvent::NextClicked => self.step(Step::Next),
            GalleryEvent::PrevClicked => self.step(Step::Prev),
            GalleryEvent::CloseClicked | GalleryEvent::OutsideClicked => self.close(),
        }
    }

    /// Open the modal on a record, replacing any modal already shown.
    /// Unknown ids are ignored.
    pub fn open(&mut self, id: RecordId) -> bool {
        let total = self.state.store.len();
        match self.state.store.get(id) {
            Some(record) => {
                render_modal(&mut self.state.view, id, record, id.index(), total);
                true
            }
            None => {
                debug!(%id, "Ignoring click on unknown record");
                false
            }
        }
    }

    /// Open the modal on the first record whose "first last" equals `name`
    pub fn open_by_name(&mut self, name: &str) -> bool {
        match self.state.store.find_by_display_name(name) {
            Some((id, _)) => self.open(id),
            None => {
                debug!(name, "No record with that name");
                false
            }
        }
    }

    pub fn close(&mut self) -> bool {
        if self.state.view.modal().is_none() {
            return false;
        }
        close_modal(&mut self.state.view);
        true
    }

    /// Re-render the cards for a search. An empty query shows everything.
    pub fn search(&mut self, query: &str) -> bool {
        if !self.state.store.is_loaded() {
            debug!("Ignoring search before users are loaded");
            return false;
        }

        let GalleryState { store, view } = &mut self.state;
        clear_gallery(view);
        if query.trim().is_empty() {
            store.clear();
        } else {
            store.filter(query);
        }
        render_gallery(view, store.displayed_records());
        true
    }

    fn step(&mut self, step: Step) -> bool {
        let Some(index) = self.state.active_modal_index() else {
            return false;
        };
        let target = match step {
            Step::Next if index + 1 < self.state.store.len() => index + 1,
            Step::Prev if index > 0 => index - 1,
            _ => {
                debug!(index, ?step, "Modal navigation at bound");
                return false;
            }
        };
        self.open(RecordId(target))
    }
}

#[derive(Debug, Clone, Copy)]
enum Step {
    Next,
    Prev,
}
