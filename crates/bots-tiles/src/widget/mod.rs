//! Boxes and screens.
//!
//! - [`BoxWidget`]: a rounded box of marked-up text, optionally with an
//!   image, that reports a value when clicked
//! - [`BoxConfig`]: the attributes that control how a box looks
//! - [`Screen`]: a named group of boxes shown and updated together
//!
//! # Frame loop
//!
//! Each frame the host turns its input into a [`BoxEvent`] and passes it to
//! [`Screen::update`] (or [`BoxWidget::update`]) together with a
//! [`Canvas`](crate::render::Canvas) to draw on and a
//! [`TextMeasurer`](crate::render::text::TextMeasurer) to size text with.
//!
//! ```
//! use bots_tiles::widget::{BoxEvent, BoxWidget, Screen};
//! use bots_tiles::render::DisplayList;
//! use bots_tiles::render::text::FixedAdvance;
//! use bots_tiles::Vector2d;
//!
//! let mut menu = Screen::new().with_box(
//!     "quit",
//!     BoxWidget::new((500.0, 500.0), |_, _| Vector2d::ZERO, |_, _| Vector2d::new(100.0, 50.0), "Quit")
//!         .with_click_result("quit"),
//! );
//!
//! let mut canvas = DisplayList::new();
//! let clicks = menu
//!     .update(&BoxEvent::pointer_press(50.0, 20.0), &mut canvas, &mut FixedAdvance::default())
//!     .unwrap();
//! assert_eq!(clicks, vec!["quit"]);
//! ```

mod box_widget;
mod config;
mod events;
mod interaction;
mod screen;

pub use box_widget::{BoxId, BoxWidget, GeometryFn};
pub use config::{AttrValue, BoxConfig, Invalidation, attrs_from_toml};
pub use events::BoxEvent;
pub use interaction::{Interaction, InteractionState};
pub use screen::Screen;
