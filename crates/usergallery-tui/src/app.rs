//! Application state management for usergallery.
//!
//! This module contains the `App` struct that owns the gallery controller,
//! the terminal UI state (search input, card cursor, overlays) and the
//! channel the start-up fetch reports back on.

use anyhow::Result;
use ratatui::layout::Rect;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use usergallery_core::{
    ApiClient, Config, FetchRequest, GalleryController, GalleryEvent, ModalState, UserRecord,
};

use crate::ui::gallery::columns_for;
use crate::ui::render::main_layout;

// ============================================================================
// Constants
// ============================================================================

/// Buffer size for the background fetch channel.
/// The fetch sends exactly one message.
const CHANNEL_BUFFER_SIZE: usize = 4;

/// Maximum length for search input.
/// Generated full names stay well under this.
const MAX_SEARCH_LENGTH: usize = 64;

// ============================================================================
// UI State Types
// ============================================================================

/// Overall application state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Normal,
    Searching,
    ShowingHelp,
    ConfirmingQuit,
    Quitting,
}

// ============================================================================
// Background Task Results
// ============================================================================

/// Result of the start-up fetch, sent from the background task.
enum LoadResult {
    Users(Vec<UserRecord>),
    Error(anyhow::Error),
}

// ============================================================================
// Main Application Struct
// ============================================================================

/// Main application state container
pub struct App {
    // Core services
    pub config: Config,
    api: ApiClient,
    pub gallery: GalleryController,

    // UI State
    pub state: AppState,
    /// Text in the search box while editing
    pub search_query: String,
    /// Query of the last submitted search; empty when showing everyone
    pub applied_query: String,
    /// Position of the card cursor among displayed cards
    pub selection: usize,
    /// Terminal area of the last frame, used for grid navigation and mouse hits
    pub viewport: Rect,

    // Background task channel
    load_rx: mpsc::Receiver<LoadResult>,
    load_tx: mpsc::Sender<LoadResult>,
}

impl App {
    /// Create a new application instance from the on-disk config
    pub fn new() -> Result<Self> {
        let config = match Config::load() {
            Ok(c) => c,
            Err(e) => {
                warn!(error = %e, "Failed to load config, using defaults");
                Config::default()
            }
        };
        Self::from_config(config)
    }

    /// Build the app for a config. Fails if the configured endpoint is unusable.
    pub fn from_config(config: Config) -> Result<Self> {
        debug!(api_url = %config.api_url, results = config.results, "Config loaded");
        let api = ApiClient::from_config(&config)?;
        Ok(Self::with_client(config, api))
    }

    fn with_client(config: Config, api: ApiClient) -> Self {
        let (tx, rx) = mpsc::channel(CHANNEL_BUFFER_SIZE);

        Self {
            config,
            api,
            gallery: GalleryController::new(),

            state: AppState::Normal,
            search_query: String::new(),
            applied_query: String::new(),
            selection: 0,
            viewport: Rect::default(),

            load_rx: rx,
            load_tx: tx,
        }
    }

    // =========================================================================
    // Background Data Load
    // =========================================================================

    /// Spawn the one-shot fetch. Its result arrives via `check_background_tasks`.
    pub fn start_load(&mut self) {
        info!(results = self.config.results, nationalities = ?self.config.nationalities, "Starting user fetch");

        let api = self.api.clone();
        let request = FetchRequest::from(&self.config);
        let tx = self.load_tx.clone();

        tokio::spawn(async move {
            let result = match api.fetch_users(&request).await {
                Ok(users) => LoadResult::Users(users),
                Err(e) => LoadResult::Error(e),
            };
            if let Err(e) = tx.send(result).await {
                error!(error = %e, "Failed to send load result - channel closed");
            }
        });
    }

    /// Apply any finished fetch result
    pub fn check_background_tasks(&mut self) {
        while let Ok(result) = self.load_rx.try_recv() {
            self.process_load_result(result);
        }
    }

    fn process_load_result(&mut self, result: LoadResult) {
        match result {
            LoadResult::Users(users) => {
                self.gallery.on_loaded(users);
                self.selection = 0;
            }
            LoadResult::Error(e) => {
                self.gallery.on_load_failed(&e);
            }
        }
    }

    // =========================================================================
    // Card Cursor
    // =========================================================================

    /// Number of cards per grid row at the current terminal width
    pub fn grid_columns(&self) -> usize {
        columns_for(main_layout(self.viewport).gallery)
    }

    fn card_count(&self) -> usize {
        self.gallery.view().card_count()
    }

    fn move_selection(&mut self, delta: isize) {
        let count = self.card_count();
        if count == 0 {
            self.selection = 0;
            return;
        }
        let target = self.selection as isize + delta;
        self.selection = target.clamp(0, count as isize - 1) as usize;
    }

    pub fn select_left(&mut self) {
        self.move_selection(-1);
    }

    pub fn select_right(&mut self) {
        self.move_selection(1);
    }

    pub fn select_up(&mut self) {
        self.move_selection(-(self.grid_columns() as isize));
    }

    pub fn select_down(&mut self) {
        self.move_selection(self.grid_columns() as isize);
    }

    pub fn select_first(&mut self) {
        self.selection = 0;
    }

    pub fn select_last(&mut self) {
        self.selection = self.card_count().saturating_sub(1);
    }

    /// Click the card under the cursor
    pub fn open_selected(&mut self) -> bool {
        let record_id = self
            .gallery
            .view()
            .cards()
            .nth(self.selection)
            .map(|card| card.record_id);
        match record_id {
            Some(id) => self.gallery.handle(GalleryEvent::CardClicked(id)),
            None => false,
        }
    }

    /// Click a card by its position in the grid
    pub fn open_card(&mut self, index: usize) -> bool {
        if index >= self.card_count() {
            return false;
        }
        self.selection = index;
        self.open_selected()
    }

    pub fn modal_open(&self) -> bool {
        matches!(self.gallery.modal_state(), ModalState::Open(_))
    }

    pub fn dispatch(&mut self, event: GalleryEvent) -> bool {
        self.gallery.handle(event)
    }

    // =========================================================================
    // Search
    // =========================================================================

    pub fn start_search(&mut self) {
        self.state = AppState::Searching;
        self.search_query = self.applied_query.clone();
    }

    /// Submit the search box; an empty box shows every user again
    pub fn submit_search(&mut self) {
        self.state = AppState::Normal;
        self.applied_query = self.search_query.trim().to_string();
        self.gallery
            .handle(GalleryEvent::SearchSubmitted(self.applied_query.clone()));
        self.selection = 0;
    }

    /// Leave the search box without changing the gallery
    pub fn cancel_search(&mut self) {
        self.state = AppState::Normal;
        self.search_query = self.applied_query.clone();
    }

    pub fn clear_search(&mut self) {
        self.search_query.clear();
        self.submit_search();
    }

    pub fn push_search_char(&mut self, c: char) {
        if can_add_search_char(self.search_query.chars().count(), c) {
            self.search_query.push(c);
        }
    }
}

// ============================================================================
// Input validation helpers
// ============================================================================

/// Check if a search character should be accepted
pub fn can_add_search_char(current_len: usize, c: char) -> bool {
    current_len < MAX_SEARCH_LENGTH && !c.is_control()
}

// ============================================================================
// Tests
// ============================================================================
