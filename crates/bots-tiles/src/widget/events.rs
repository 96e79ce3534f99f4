//! Events delivered to boxes and screens.
//!
//! The host window translates its own input into [`BoxEvent`]s once per
//! frame. Positions are in surface coordinates, the same space the box
//! position callbacks return.

use bots_tiles_render::{Point, Size};

/// An input or frame event for a box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BoxEvent {
    /// The drawing surface changed size.
    Resize {
        /// New surface size.
        surface: Size,
    },
    /// The pointer moved.
    PointerMove {
        /// Pointer position.
        position: Point,
    },
    /// A pointer button was pressed.
    PointerPress {
        /// Pointer position at the time of the press.
        position: Point,
    },
    /// A frame with no input.
    Tick,
}

impl BoxEvent {
    /// Create a resize event.
    pub fn resize(width: f32, height: f32) -> Self {
        Self::Resize {
            surface: Size::new(width, height),
        }
    }

    /// Create a pointer move event.
    pub fn pointer_move(x: f32, y: f32) -> Self {
        Self::PointerMove {
            position: Point::new(x, y),
        }
    }

    /// Create a pointer press event.
    pub fn pointer_press(x: f32, y: f32) -> Self {
        Self::PointerPress {
            position: Point::new(x, y),
        }
    }

    /// The pointer position carried by the event, if any.
    pub fn position(&self) -> Option<Point> {
        match self {
            Self::PointerMove { position } | Self::PointerPress { position } => Some(*position),
            Self::Resize { .. } | Self::Tick => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors() {
        assert_eq!(
            BoxEvent::resize(500.0, 400.0),
            BoxEvent::Resize {
                surface: Size::new(500.0, 400.0)
            }
        );
        assert_eq!(
            BoxEvent::pointer_press(1.0, 2.0).position(),
            Some(Point::new(1.0, 2.0))
        );
        assert_eq!(BoxEvent::pointer_move(3.0, 4.0).position(), Some(Point::new(3.0, 4.0)));
        assert_eq!(BoxEvent::Tick.position(), None);
        assert_eq!(BoxEvent::resize(1.0, 1.0).position(), None);
    }
}
