//! Drawing types and the text pipeline for Bots and Tiles.
//!
//! This crate knows how to turn box markup into positioned runs of text and
//! how to describe a box to a drawing surface. It does not open windows or
//! rasterize anything itself: a backend implements [`Canvas`], and
//! [`DisplayList`] records calls for headless use.
//!
//! # Measuring text
//!
//! Layout needs text sizes. Use [`text::FontSystem`] for real fonts, or
//! [`text::FixedAdvance`] when no fonts are available:
//!
//! ```no_run
//! use bots_tiles_render::text::{FontSystem, TextMeasurer, TextStyle};
//!
//! let mut fonts = FontSystem::new();
//! let size = fonts.measure("Bots and Tiles", &TextStyle::default().size(40));
//! println!("title is {}px wide", size.width);
//! ```
//!
//! # Hit testing
//!
//! ```
//! use bots_tiles_render::{Point, Rect, RoundedRect};
//!
//! let button = RoundedRect::new(Rect::new(0.0, 0.0, 100.0, 40.0), 10.0);
//! assert!(button.contains(Point::new(50.0, 20.0)));
//! assert!(!button.contains(Point::new(0.5, 0.5)));
//! ```

mod canvas;
mod error;
mod box_image;
pub mod text;
mod types;

pub use canvas::{Canvas, DisplayList, DrawCommand};
pub use error::{ImageError, ParseError, TextError, TextResult};
pub use box_image::{BoxImage, ImagePlacement};
pub use types::{Color, Point, Rect, RoundedRect, Size};
