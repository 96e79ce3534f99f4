//! Prelude module for Bots and Tiles.
//!
//! ```
//! use bots_tiles::prelude::*;
//! ```

// ============================================================================
// Boxes and Screens
// ============================================================================

pub use crate::widget::{AttrValue, BoxConfig, BoxEvent, BoxId, BoxWidget, Screen};

// ============================================================================
// Errors
// ============================================================================

pub use crate::{BoxError, Result};

// ============================================================================
// Geometry and Drawing
// ============================================================================

pub use crate::Vector2d;
pub use crate::render::{Canvas, Color, DisplayList, Point, Rect, Size};

// ============================================================================
// Text
// ============================================================================

pub use crate::render::text::{
    FixedAdvance, FontSystem, Justification, OverflowPolicy, TextMeasurer,
};
