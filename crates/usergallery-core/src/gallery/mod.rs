//! Gallery state: the loaded records, the displayed subset and the
//! interaction controller that drives rendering.
//!
//! - `store`: `GalleryStore`, the once-initialized record list and its filter
//! - `controller`: `GalleryController`, event handling and the modal state machine

pub mod controller;
pub mod store;

pub use controller::{GalleryController, GalleryEvent, GalleryState, LoadState, ModalState};
pub use store::GalleryStore;
