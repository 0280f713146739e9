//! View fragments for the gallery page.
//!
//! Records are turned into structured fragments (`CardView`, `ModalView`)
//! held by a `GalleryView` container. Front ends draw the container; `html`
//! serializes it with every field value escaped.

pub mod fragment;
pub mod html;
pub mod renderer;

pub use fragment::{CardView, GalleryItem, GalleryView, ModalView};
pub use renderer::{clear_gallery, close_modal, render_card, render_gallery, render_modal};
