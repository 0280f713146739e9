//! Terminal UI module using ratatui.
//!
//! This module provides the TUI rendering and input handling:
//!
//! - `render`: Main frame rendering, layout and overlays
//! - `gallery`: Card grid drawing and hit-testing
//! - `modal`: Detail modal drawing and button hit-testing
//! - `input`: Keyboard and mouse event handling
//! - `styles`: Color schemes and text styling

pub mod gallery;
pub mod input;
pub mod modal;
pub mod render;
pub mod styles;
