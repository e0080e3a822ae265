//! Terminal rendering of the dialog.
//!
//! - [`viewmodel`]: display-ready snapshot computed from the state
//! - [`renderer`]: entry points
//! - [`components`]: header, search bar, table, placeholder, footer
//! - [`helpers`]: frame buffer and match highlighting
//! - [`theme`]: color themes

pub mod components;
pub mod helpers;
pub mod renderer;
pub mod theme;
pub mod viewmodel;

pub use renderer::{render, render_to_string};
pub use theme::Theme;
pub use viewmodel::{DisplayItem, EmptyState, FooterInfo, HeaderInfo, SearchBarInfo, UIViewModel};
