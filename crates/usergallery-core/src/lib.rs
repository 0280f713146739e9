//! Core library for usergallery.
//!
//! Fetches a batch of generated users from randomuser.me, keeps them in a
//! once-initialized store, and renders cards and a detail modal as
//! structured view fragments. Front ends feed user events to the
//! `GalleryController` and draw its `GalleryView`.
//!
//! - `api`: the one-shot fetch gateway and its error taxonomy
//! - `config`: endpoint, batch size and nationality settings
//! - `gallery`: record store and interaction controller
//! - `models`: wire types for the API response
//! - `utils`: display formatting for phones, addresses and dates
//! - `view`: card/modal fragments and their HTML serialization

pub mod api;
pub mod config;
pub mod gallery;
pub mod models;
pub mod utils;
pub mod view;

pub use api::{ApiClient, ApiError, FetchRequest};
pub use config::Config;
pub use gallery::{GalleryController, GalleryEvent, GalleryStore, LoadState, ModalState};
pub use models::{RecordId, UserRecord};
pub use view::{CardView, GalleryItem, GalleryView, ModalView};
