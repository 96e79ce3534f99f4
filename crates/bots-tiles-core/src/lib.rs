//! Core pieces for Bots and Tiles.
//!
//! This crate provides the foundational components shared by the rendering
//! and widget crates:
//!
//! - **Vector math**: [`Vector2d`], the value type for positions and sizes
//! - **Logging**: target names, span names and [`PerfSpan`]
//!
//! # Example
//!
//! ```
//! use bots_tiles_core::Vector2d;
//!
//! let position = Vector2d::new(250.0, 250.0);
//! let offset = Vector2d::new(0.0, 100.0);
//! assert_eq!(position + offset, Vector2d::new(250.0, 350.0));
//! assert_eq!(offset.normalized(), Some(Vector2d::new(0.0, 1.0)));
//! ```

pub mod logging;
mod vector;

pub use logging::PerfSpan;
pub use vector::Vector2d;
