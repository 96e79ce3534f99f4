//! Bots and Tiles: rich-text boxes for a tile-based board game.
//!
//! This is the main umbrella crate. It re-exports the core and render
//! crates and adds the interactive layer: [`widget::BoxWidget`] and
//! [`widget::Screen`].
//!
//! # Example
//!
//! ```no_run
//! use bots_tiles::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let mut title = BoxWidget::new(
//!         (500.0, 500.0),
//!         |w, h| Vector2d::new(w / 2.0, h / 2.0),
//!         |w, h| Vector2d::new(w / 2.5, h / 2.5),
//!         "<s: 40,b>Bots and Tiles</>",
//!     );
//!     title.change_attrs([("background_color", "gray"), ("text_justification", "center")])?;
//!
//!     let mut fonts = FontSystem::new();
//!     let mut canvas = DisplayList::new();
//!     title.update(&BoxEvent::Tick, &mut canvas, &mut fonts)?;
//!     Ok(())
//! }
//! ```

pub use bots_tiles_core::*;

/// Drawing types and the text pipeline.
pub mod render {
    pub use bots_tiles_render::*;
}

mod error;
pub mod prelude;
pub mod widget;

pub use error::{BoxError, Result};
