//! The text pipeline of a box.
//!
//! Text flows through these stages:
//!
//! 1. [`parse_markup`] turns tagged text into lines of [`StyledRun`]s.
//! 2. A [`TextMeasurer`] gives every run a size ([`shape_run`]).
//! 3. [`wrap_lines`] fits runs into visual lines no wider than the box.
//! 4. [`layout_lines`] positions each run according to a [`Justification`].
//! 5. [`resolve_overflow`] repeats steps 3 and 4 until the text fits, as
//!    its [`OverflowPolicy`] asks.
//!
//! # Example
//!
//! ```
//! use bots_tiles_render::text::{
//!     parse_markup, resolve_overflow, FixedAdvance, OverflowSettings, TextStyle,
//! };
//! use bots_tiles_render::Rect;
//!
//! let parsed = parse_markup("<s:20>Bots</> and <b>Tiles</>", &TextStyle::default()).unwrap();
//! let mut measurer = FixedAdvance::default();
//! let rect = Rect::new(0.0, 0.0, 300.0, 100.0);
//!
//! let resolution =
//!     resolve_overflow(&mut measurer, &parsed, &OverflowSettings::default(), rect).unwrap();
//! assert_eq!(resolution.block.line_count(), 1);
//! ```

mod font_system;
mod layout;
mod markup;
mod overflow;
mod shaping;
mod style;
mod wrap;

pub use font_system::{FontSystem, FontSystemConfig, LINE_HEIGHT_MULTIPLIER};
pub use layout::{
    HorizontalAlign, Justification, Placement, TextBlock, VerticalAlign, block_height,
    layout_lines,
};
pub use markup::parse_markup;
pub use overflow::{
    OverflowPolicy, OverflowSettings, Resolution, TOO_SMALL_MESSAGE, resolve_overflow,
};
pub use shaping::{FixedAdvance, TextMeasurer, shape_run, shape_text};
pub use style::{Line, RenderedRun, StyledRun, TextStyle, VisualLine};
pub use wrap::{Wrapped, unwrapped_lines, wrap_lines, wrap_run};
