//! Basic geometry and color types for rendering.
//!
//! This module provides fundamental types used throughout the rendering system.

use bots_tiles_core::Vector2d;

/// A point in 2D space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    /// Create a new point.
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// The origin point (0, 0).
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    /// Euclidean distance to another point.
    #[inline]
    pub fn distance_to(self, other: Point) -> f32 {
        (Vector2d::new(self.x, self.y) - (other.x, other.y)).magnitude()
    }
}

impl From<(f32, f32)> for Point {
    fn from((x, y): (f32, f32)) -> Self {
        Self { x, y }
    }
}

impl From<Vector2d> for Point {
    fn from(v: Vector2d) -> Self {
        Self { x: v.x, y: v.y }
    }
}

impl From<glam::Vec2> for Point {
    fn from(v: glam::Vec2) -> Self {
        Self { x: v.x, y: v.y }
    }
}

impl From<Point> for glam::Vec2 {
    fn from(p: Point) -> Self {
        glam::Vec2::new(p.x, p.y)
    }
}

impl From<Point> for Vector2d {
    fn from(p: Point) -> Self {
        Vector2d::new(p.x, p.y)
    }
}

/// A size in 2D space (width and height).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    /// Create a new size.
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Zero size.
    pub const ZERO: Self = Self {
        width: 0.0,
        height: 0.0,
    };

    /// Check if the size has zero area.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

impl From<(f32, f32)> for Size {
    fn from((width, height): (f32, f32)) -> Self {
        Self { width, height }
    }
}

impl From<(u32, u32)> for Size {
    fn from((width, height): (u32, u32)) -> Self {
        Self {
            width: width as f32,
            height: height as f32,
        }
    }
}

impl From<Vector2d> for Size {
    fn from(v: Vector2d) -> Self {
        Self {
            width: v.x,
            height: v.y,
        }
    }
}

/// A rectangle defined by origin and size.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub origin: Point,
    pub size: Size,
}

impl Rect {
    /// Create a new rectangle from origin and size.
    #[inline]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            origin: Point { x, y },
            size: Size { width, height },
        }
    }

    /// Create a rectangle from a top-left position and a size.
    #[inline]
    pub fn from_origin_size(origin: impl Into<Point>, size: impl Into<Size>) -> Self {
        Self {
            origin: origin.into(),
            size: size.into(),
        }
    }

    /// Empty rectangle at origin.
    pub const ZERO: Self = Self {
        origin: Point::ZERO,
        size: Size::ZERO,
    };

    /// Left edge x coordinate.
    #[inline]
    pub fn left(&self) -> f32 {
        self.origin.x
    }

    /// Top edge y coordinate.
    #[inline]
    pub fn top(&self) -> f32 {
        self.origin.y
    }

    /// Right edge x coordinate.
    #[inline]
    pub fn right(&self) -> f32 {
        self.origin.x + self.size.width
    }

    /// Bottom edge y coordinate.
    #[inline]
    pub fn bottom(&self) -> f32 {
        self.origin.y + self.size.height
    }

    /// Width of the rectangle.
    #[inline]
    pub fn width(&self) -> f32 {
        self.size.width
    }

    /// Height of the rectangle.
    #[inline]
    pub fn height(&self) -> f32 {
        self.size.height
    }

    /// Center point of the rectangle.
    #[inline]
    pub fn center(&self) -> Point {
        Point {
            x: self.origin.x + self.size.width / 2.0,
            y: self.origin.y + self.size.height / 2.0,
        }
    }

    /// Check if the rectangle is empty (zero or negative size).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.size.is_empty()
    }

    /// Check if a point is inside the rectangle.
    ///
    /// The left and top edges are inside, the right and bottom edges are not.
    #[inline]
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.left()
            && point.x < self.right()
            && point.y >= self.top()
            && point.y < self.bottom()
    }

    /// Return a copy with a different width, keeping the origin.
    #[inline]
    pub fn with_width(&self, width: f32) -> Rect {
        Rect::new(self.origin.x, self.origin.y, width, self.size.height)
    }

    /// Return a copy with a different height, keeping the origin.
    #[inline]
    pub fn with_height(&self, height: f32) -> Rect {
        Rect::new(self.origin.x, self.origin.y, self.size.width, height)
    }
}

/// A rectangle with uniformly rounded corners.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RoundedRect {
    /// The base rectangle.
    pub rect: Rect,
    /// Requested corner radius. The effective radius is clamped to half the
    /// shorter side.
    pub radius: f32,
}

impl RoundedRect {
    /// Create a rounded rectangle.
    #[inline]
    pub fn new(rect: Rect, radius: f32) -> Self {
        Self { rect, radius }
    }

    /// Check if the corners are square.
    #[inline]
    pub fn is_rect(&self) -> bool {
        self.radius <= 0.0
    }

    /// The radius actually drawn: never more than half the width or height.
    #[inline]
    pub fn effective_radius(&self) -> f32 {
        self.radius
            .min(self.rect.width() / 2.0)
            .min(self.rect.height() / 2.0)
            .max(0.0)
    }

    /// Check if a point is inside the rounded rectangle.
    ///
    /// A point inside the bounding rectangle is inside the shape when it lies
    /// in the band between the corners horizontally or vertically, or within
    /// the circle of the nearest corner.
    pub fn contains(&self, point: Point) -> bool {
        if !self.rect.contains(point) {
            return false;
        }
        if self.is_rect() {
            return true;
        }

        let rounding = self.effective_radius();
        let center = self.rect.center();
        let half_width = self.rect.width() / 2.0;
        let half_height = self.rect.height() / 2.0;

        if (center.x - point.x).abs() < half_width - rounding
            || (center.y - point.y).abs() < half_height - rounding
        {
            return true;
        }

        let corner_center = Point::new(
            if point.x > center.x {
                self.rect.right() - rounding
            } else {
                self.rect.left() + rounding
            },
            if point.y > center.y {
                self.rect.bottom() - rounding
            } else {
                self.rect.top() + rounding
            },
        );
        point.distance_to(corner_center) < rounding
    }
}

/// An RGBA color with premultiplied alpha.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    /// Create a new color from RGBA components (0.0-1.0 range).
    ///
    /// Note: This expects premultiplied alpha. Use [`from_rgba`](Self::from_rgba)
    /// for non-premultiplied input.
    #[inline]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Create a color from non-premultiplied RGBA components.
    #[inline]
    pub fn from_rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self {
            r: r * a,
            g: g * a,
            b: b * a,
            a,
        }
    }

    /// Create a color from 8-bit RGBA components (0-255 range).
    #[inline]
    pub fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::from_rgba(
            r as f32 / 255.0,
            g as f32 / 255.0,
            b as f32 / 255.0,
            a as f32 / 255.0,
        )
    }

    /// Create an opaque color from RGB components.
    #[inline]
    pub const fn from_rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Create an opaque color from 8-bit RGB components.
    #[inline]
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::from_rgb(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0)
    }

    /// Create a color from a hex string (e.g., "#FF0000" or "#FF0000FF").
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim_start_matches('#');
        let len = hex.len();

        if (len != 6 && len != 8) || !hex.is_ascii() {
            return None;
        }

        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        let a = if len == 8 {
            u8::from_str_radix(&hex[6..8], 16).ok()?
        } else {
            255
        };

        Some(Self::from_rgba8(r, g, b, a))
    }

    /// Look up a color by name.
    ///
    /// Names are matched case-insensitively and ignoring spaces, so
    /// `"light gray"`, `"LightGray"` and `"lightgray"` are the same color.
    /// Hex strings starting with `#` are accepted as well.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        if name.starts_with('#') {
            return Self::from_hex(name);
        }

        let key: String = name
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '_')
            .flat_map(char::to_lowercase)
            .collect();

        let (r, g, b) = match key.as_str() {
            "black" => (0, 0, 0),
            "white" => (255, 255, 255),
            "red" => (255, 0, 0),
            "green" => (0, 255, 0),
            "blue" => (0, 0, 255),
            "yellow" => (255, 255, 0),
            "cyan" | "aqua" => (0, 255, 255),
            "magenta" | "fuchsia" => (255, 0, 255),
            "gray" | "grey" => (190, 190, 190),
            "lightgray" | "lightgrey" => (211, 211, 211),
            "darkgray" | "darkgrey" => (169, 169, 169),
            "lightgreen" => (144, 238, 144),
            "darkgreen" => (0, 100, 0),
            "lightblue" => (173, 216, 230),
            "darkblue" => (0, 0, 139),
            "darkred" => (139, 0, 0),
            "orange" => (255, 165, 0),
            "purple" => (160, 32, 240),
            "pink" => (255, 192, 203),
            "brown" => (165, 42, 42),
            "gold" => (255, 215, 0),
            "navy" => (0, 0, 128),
            "teal" => (0, 128, 128),
            "transparent" => return Some(Self::TRANSPARENT),
            _ => return None,
        };
        Some(Self::from_rgb8(r, g, b))
    }

    /// Convert to 8-bit non-premultiplied RGBA components.
    pub fn to_rgba8(self) -> [u8; 4] {
        let unpremultiply = |c: f32| {
            if self.a == 0.0 {
                0
            } else {
                ((c / self.a).clamp(0.0, 1.0) * 255.0).round() as u8
            }
        };
        [
            unpremultiply(self.r),
            unpremultiply(self.g),
            unpremultiply(self.b),
            (self.a.clamp(0.0, 1.0) * 255.0).round() as u8,
        ]
    }

    // Common colors
    pub const TRANSPARENT: Self = Self::new(0.0, 0.0, 0.0, 0.0);
    pub const BLACK: Self = Self::from_rgb(0.0, 0.0, 0.0);
    pub const WHITE: Self = Self::from_rgb(1.0, 1.0, 1.0);
    pub const RED: Self = Self::from_rgb(1.0, 0.0, 0.0);
    pub const GREEN: Self = Self::from_rgb(0.0, 1.0, 0.0);
    pub const BLUE: Self = Self::from_rgb(0.0, 0.0, 1.0);
}
