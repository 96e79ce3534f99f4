//! The box widget.
//!
//! A [`BoxWidget`] is a rounded rectangle with optional border, image and
//! marked-up text. Its position and size are functions of the surface size,
//! so the box follows the window when it is resized.
//!
//! Work is cached in stages: markup is parsed once per text or style
//! change, and wrapping plus overflow resolution run once per layout change.
//! Painting reuses both caches, so an idle frame only issues draw calls.
//!
//! # Example
//!
//! ```
//! use bots_tiles::widget::{BoxEvent, BoxWidget};
//! use bots_tiles::render::DisplayList;
//! use bots_tiles::render::text::FixedAdvance;
//! use bots_tiles::Vector2d;
//!
//! let mut play = BoxWidget::new(
//!     (500.0, 500.0),
//!     |w, h| Vector2d::new(w / 2.0, h / 2.0 + 100.0),
//!     |w, h| Vector2d::new(w / 5.0, h / 5.0),
//!     "<s: 28>Play</>",
//! )
//! .with_click_result("play");
//!
//! let mut canvas = DisplayList::new();
//! let mut fonts = FixedAdvance::default();
//! play.update(&BoxEvent::pointer_move(300.0, 360.0), &mut canvas, &mut fonts).unwrap();
//! let clicked = play
//!     .update(&BoxEvent::pointer_press(300.0, 360.0), &mut canvas, &mut fonts)
//!     .unwrap();
//! assert_eq!(clicked, Some("play"));
//! ```

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use bots_tiles_core::logging::{span_names, targets};
use bots_tiles_core::{PerfSpan, Vector2d};
use bots_tiles_render::text::{Line, Resolution, TextMeasurer, parse_markup, resolve_overflow};
use bots_tiles_render::{BoxImage, Canvas, Point, Rect, RoundedRect, Size};

use super::config::{AttrValue, BoxConfig, Invalidation, attrs_from_toml};
use super::events::BoxEvent;
use super::interaction::{Interaction, InteractionState};
use crate::error::Result;

static NEXT_BOX_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identifier of a box.
///
/// Unless [`BoxWidget::with_click_result`] says otherwise, clicking a box
/// reports its id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BoxId(u64);

impl BoxId {
    fn next() -> Self {
        Self(NEXT_BOX_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// The raw id value.
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for BoxId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "box#{}", self.0)
    }
}

/// Maps the surface width and height to a box position or size.
pub type GeometryFn = Box<dyn Fn(f32, f32) -> Vector2d>;

/// A clickable box of marked-up text.
///
/// `T` is the value reported when the box is clicked.
pub struct BoxWidget<T: Clone = BoxId> {
    id: BoxId,
    config: BoxConfig,
    text: String,
    position_fn: GeometryFn,
    size_fn: GeometryFn,
    surface: Size,
    /// Rectangle from the geometry callbacks, before any overflow resizing.
    frame: Rect,
    parsed: Option<Vec<Line>>,
    /// Only `Some` while `parsed` is.
    layout: Option<Resolution>,
    image: Option<BoxImage>,
    image_loaded: bool,
    interaction: Interaction,
    click_result: T,
}

impl BoxWidget<BoxId> {
    /// Create a box with the default attributes.
    ///
    /// `position_fn` gives the top-left corner and `size_fn` the size, both
    /// from the surface width and height.
    pub fn new(
        surface: impl Into<Size>,
        position_fn: impl Fn(f32, f32) -> Vector2d + 'static,
        size_fn: impl Fn(f32, f32) -> Vector2d + 'static,
        text: impl Into<String>,
    ) -> Self {
        let id = BoxId::next();
        let surface = surface.into();
        let position_fn: GeometryFn = Box::new(position_fn);
        let size_fn: GeometryFn = Box::new(size_fn);
        let frame = frame_for(&position_fn, &size_fn, surface);
        tracing::trace!(target: targets::WIDGET, %id, ?frame, "created box");

        Self {
            id,
            config: BoxConfig::default(),
            text: text.into(),
            position_fn,
            size_fn,
            surface,
            frame,
            parsed: None,
            layout: None,
            image: None,
            image_loaded: false,
            interaction: Interaction::new(),
            click_result: id,
        }
    }
}

impl<T: Clone> BoxWidget<T> {
    /// Report `result` instead of the box id when the box is clicked.
    pub fn with_click_result<U: Clone>(self, result: U) -> BoxWidget<U> {
        BoxWidget {
            id: self.id,
            config: self.config,
            text: self.text,
            position_fn: self.position_fn,
            size_fn: self.size_fn,
            surface: self.surface,
            frame: self.frame,
            parsed: self.parsed,
            layout: self.layout,
            image: self.image,
            image_loaded: self.image_loaded,
            interaction: self.interaction,
            click_result: result,
        }
    }

    /// Set attributes in builder style. See [`change_attrs`](Self::change_attrs).
    pub fn with_attrs<I, K, V>(mut self, attrs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<AttrValue>,
    {
        self.change_attrs(attrs)?;
        Ok(self)
    }

    pub fn id(&self) -> BoxId {
        self.id
    }

    pub fn config(&self) -> &BoxConfig {
        &self.config
    }

    /// The box text, markup included.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn click_result(&self) -> &T {
        &self.click_result
    }

    pub fn interaction(&self) -> Interaction {
        self.interaction
    }

    pub fn state(&self) -> InteractionState {
        self.interaction.state()
    }

    pub fn is_hovered(&self) -> bool {
        self.interaction.is_hovered()
    }

    pub fn is_selected(&self) -> bool {
        self.interaction.is_selected()
    }

    /// Forget hover and selection.
    pub fn reset_interaction(&mut self) {
        self.interaction.reset();
    }

    /// Surface size the geometry was last computed for.
    pub fn surface_size(&self) -> Size {
        self.surface
    }

    /// Rectangle from the position and size callbacks.
    pub fn frame(&self) -> Rect {
        self.frame
    }

    /// Current box rectangle. Once text is laid out this includes any
    /// resizing done to fit the text.
    pub fn rect(&self) -> Rect {
        self.layout.as_ref().map_or(self.frame, |layout| layout.rect)
    }

    /// The rounded outline used for drawing and hit testing.
    pub fn shape(&self) -> RoundedRect {
        RoundedRect::new(self.rect(), self.config.corner_rounding)
    }

    /// Check if `point` is on the box, honoring rounded corners.
    pub fn contains(&self, point: Point) -> bool {
        self.shape().contains(point)
    }

    /// The cached layout, if the text has been laid out since the last change.
    pub fn resolution(&self) -> Option<&Resolution> {
        self.layout.as_ref()
    }

    /// The cached parse, if the text has been parsed since the last change.
    pub fn parsed(&self) -> Option<&[Line]> {
        self.parsed.as_deref()
    }

    /// Change several attributes at once.
    ///
    /// Either every attribute is applied or, on error, none is.
    pub fn change_attrs<I, K, V>(&mut self, attrs: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<AttrValue>,
    {
        let mut config = self.config.clone();
        let invalidation = config.apply(attrs)?;
        self.config = config;
        self.invalidate(invalidation);
        Ok(self)
    }

    /// Change attributes from a TOML table.
    ///
    /// ```
    /// # use bots_tiles::widget::BoxWidget;
    /// # use bots_tiles::Vector2d;
    /// let mut title = BoxWidget::new((500.0, 500.0), |_, _| Vector2d::ZERO, |w, h| Vector2d::new(w, h), "Title");
    /// title.change_attrs_toml("corner_rounding = 25\nfill_in_border = true").unwrap();
    /// assert_eq!(title.config().corner_rounding, 25.0);
    /// ```
    pub fn change_attrs_toml(&mut self, src: &str) -> Result<&mut Self> {
        let attrs = attrs_from_toml(src)?;
        self.change_attrs(attrs)
    }

    /// Replace the box text.
    pub fn set_text(&mut self, text: impl Into<String>) -> &mut Self {
        self.text = text.into();
        self.invalidate(Invalidation::PARSE);
        self
    }

    fn invalidate(&mut self, invalidation: Invalidation) {
        if invalidation.parse {
            self.parsed = None;
        }
        if invalidation.parse || invalidation.layout {
            self.layout = None;
        }
        if invalidation.image {
            self.image = None;
            self.image_loaded = false;
        }
        tracing::trace!(target: targets::WIDGET, id = %self.id, ?invalidation, "invalidated box caches");
    }

    /// Handle one event. Returns the click result if the event clicked the box.
    pub fn handle_event(
        &mut self,
        event: &BoxEvent,
        measurer: &mut impl TextMeasurer,
    ) -> Result<Option<T>> {
        match *event {
            BoxEvent::Resize { surface } => {
                self.resize(surface, measurer)?;
                Ok(None)
            }
            BoxEvent::PointerMove { position } => {
                self.hover(position, measurer)?;
                Ok(None)
            }
            BoxEvent::PointerPress { position } => {
                self.hover(position, measurer)?;
                if self.interaction.press() {
                    tracing::debug!(
                        target: targets::WIDGET,
                        id = %self.id,
                        selected = self.interaction.is_selected(),
                        "box clicked"
                    );
                    Ok(Some(self.click_result.clone()))
                } else {
                    Ok(None)
                }
            }
            BoxEvent::Tick => Ok(None),
        }
    }

    fn resize(&mut self, surface: Size, measurer: &mut impl TextMeasurer) -> Result<()> {
        self.surface = surface;
        self.frame = frame_for(&self.position_fn, &self.size_fn, surface);
        self.layout = None;
        tracing::debug!(target: targets::WIDGET, id = %self.id, frame = ?self.frame, "box resized");
        self.layout = Some(self.compute_layout(measurer)?);
        Ok(())
    }

    fn hover(&mut self, position: Point, measurer: &mut impl TextMeasurer) -> Result<()> {
        if self.layout.is_none() {
            self.layout = Some(self.compute_layout(measurer)?);
        }
        let inside = self.contains(position);
        if self.interaction.pointer_moved(inside) {
            tracing::trace!(target: targets::WIDGET, id = %self.id, hovered = inside, "hover changed");
        }
        Ok(())
    }

    /// Parse (if needed) and lay out the text against the current frame.
    fn compute_layout(&mut self, measurer: &mut impl TextMeasurer) -> Result<Resolution> {
        let settings = self.config.overflow_settings();
        let frame = self.frame;
        let parsed = match self.parsed.take() {
            Some(parsed) => parsed,
            None => {
                let parsed = parse_markup(&self.text, &self.config.text_style())?;
                tracing::trace!(target: targets::WIDGET, id = %self.id, lines = parsed.len(), "parsed box text");
                parsed
            }
        };
        let parsed = self.parsed.insert(parsed);
        let resolution = resolve_overflow(measurer, parsed, &settings, frame)?;
        tracing::debug!(
            target: targets::WIDGET,
            id = %self.id,
            lines = resolution.lines.len(),
            too_small = resolution.too_small,
            "laid out box text"
        );
        Ok(resolution)
    }

    fn ensure_image(&mut self) -> Result<()> {
        if self.image_loaded {
            return Ok(());
        }
        self.image = match &self.config.image_path {
            Some(path) => Some(BoxImage::open(path)?),
            None => None,
        };
        self.image_loaded = true;
        Ok(())
    }

    /// Draw the box: background, border, image, then text.
    pub fn paint(&mut self, canvas: &mut impl Canvas, measurer: &mut impl TextMeasurer) -> Result<()> {
        let _span = PerfSpan::new(span_names::PAINT);
        self.ensure_image()?;
        let resolution = match self.layout.take() {
            Some(resolution) => resolution,
            None => self.compute_layout(measurer)?,
        };
        self.draw(canvas, &resolution);
        self.layout = Some(resolution);
        Ok(())
    }

    fn draw(&self, canvas: &mut impl Canvas, resolution: &Resolution) {
        let config = &self.config;
        let shape = RoundedRect::new(resolution.rect, config.corner_rounding);
        let active = self.interaction.is_active();
        let fill = if active {
            config.hovered_over_color
        } else {
            config.background_color
        };

        if config.border_size > 0.0 {
            if config.fill_in_border {
                canvas.fill_rounded_rect(shape, fill);
            }
            let outline = if active && !config.fill_in_border {
                fill
            } else {
                config.border_color
            };
            canvas.stroke_rounded_rect(shape, outline, config.border_size);
        } else {
            canvas.fill_rounded_rect(shape, fill);
        }

        if let Some(image) = &self.image {
            let placement = config.image_placement();
            let dest = placement.destination(image.size(), resolution.rect);
            let radius = if placement.resize { config.corner_rounding } else { 0.0 };
            canvas.draw_image(image, RoundedRect::new(dest, radius));
        }

        for placement in resolution.block.placements() {
            canvas.draw_text(&placement.run, placement.origin());
        }
    }

    /// Handle `event`, then paint. This is the per-frame entry point.
    pub fn update(
        &mut self,
        event: &BoxEvent,
        canvas: &mut impl Canvas,
        measurer: &mut impl TextMeasurer,
    ) -> Result<Option<T>> {
        let clicked = self.handle_event(event, measurer)?;
        self.paint(canvas, measurer)?;
        Ok(clicked)
    }
}

impl<T: Clone + fmt::Debug> fmt::Debug for BoxWidget<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoxWidget")
            .field("id", &self.id)
            .field("text", &self.text)
            .field("frame", &self.frame)
            .field("rect", &self.rect())
            .field("interaction", &self.interaction)
            .field("click_result", &self.click_result)
            .finish_non_exhaustive()
    }
}

fn frame_for(position_fn: &GeometryFn, size_fn: &GeometryFn, surface: Size) -> Rect {
    let position = position_fn(surface.width, surface.height);
    let size = size_fn(surface.width, surface.height);
    Rect::from_origin_size(position, size)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BoxError;
    use bots_tiles_render::text::{FixedAdvance, OverflowPolicy};
    use bots_tiles_render::TextError;
    use bots_tiles_render::{Color, DisplayList, DrawCommand};

    fn measurer() -> FixedAdvance {
        FixedAdvance::new(1.0, 1.0)
    }

    /// A 200x100 box at the origin.
    fn fixed_box(text: &str) -> BoxWidget {
        BoxWidget::new(
            (400.0, 400.0),
            |_, _| Vector2d::ZERO,
            |_, _| Vector2d::new(200.0, 100.0),
            text,
        )
    }

    #[test]
    fn test_ids_are_unique() {
        let a = fixed_box("a");
        let b = fixed_box("b");
        assert_ne!(a.id(), b.id());
        assert_eq!(*a.click_result(), a.id());
        assert!(a.id().to_string().starts_with("box#"));
    }

    #[test]
    fn test_frame_follows_surface() {
        let mut widget = BoxWidget::new(
            (500.0, 500.0),
            |w, h| Vector2d::new(w / 2.0, h / 2.0),
            |w, h| Vector2d::new(w / 5.0, h / 5.0),
            "",
        );
        assert_eq!(widget.frame(), Rect::new(250.0, 250.0, 100.0, 100.0));

        widget
            .handle_event(&BoxEvent::resize(1000.0, 800.0), &mut measurer())
            .unwrap();
        assert_eq!(widget.surface_size(), Size::new(1000.0, 800.0));
        assert_eq!(widget.frame(), Rect::new(500.0, 400.0, 200.0, 160.0));
    }

    #[test]
    fn test_resize_box_down_fits_text() {
        let mut widget = fixed_box("Hi");
        widget
            .handle_event(&BoxEvent::resize(400.0, 400.0), &mut measurer())
            .unwrap();

        // One 24x12 run plus a margin of 10 on each side.
        assert_eq!(widget.rect(), Rect::new(0.0, 0.0, 200.0, 32.0));
        let placements = widget.resolution().unwrap().block.placements();
        assert_eq!(placements.len(), 1);
        assert_eq!(placements[0].rect, Rect::new(88.0, 10.0, 24.0, 12.0));
    }

    #[test]
    fn test_click_only_when_hovered() {
        let mut widget = fixed_box("Hi").with_click_result("hi");
        let mut m = measurer();

        assert_eq!(widget.handle_event(&BoxEvent::pointer_press(300.0, 300.0), &mut m).unwrap(), None);
        assert!(!widget.is_selected());

        assert_eq!(widget.handle_event(&BoxEvent::pointer_move(100.0, 16.0), &mut m).unwrap(), None);
        assert_eq!(widget.state(), InteractionState::Hovered);

        assert_eq!(
            widget.handle_event(&BoxEvent::pointer_press(100.0, 16.0), &mut m).unwrap(),
            Some("hi")
        );
        assert_eq!(widget.state(), InteractionState::Selected);

        // The press moves the pointer off the box first.
        assert_eq!(widget.handle_event(&BoxEvent::pointer_press(100.0, 90.0), &mut m).unwrap(), None);
        assert_eq!(widget.state(), InteractionState::Idle);
    }

    #[test]
    fn test_rounded_corners_are_not_clickable() {
        let mut widget = fixed_box("Hi");
        widget.change_attrs([("corner_rounding", 10)]).unwrap();
        let mut m = measurer();
        assert_eq!(widget.handle_event(&BoxEvent::pointer_press(0.5, 0.5), &mut m).unwrap(), None);
        assert!(!widget.is_hovered());
        assert!(widget.handle_event(&BoxEvent::pointer_press(10.0, 10.0), &mut m).unwrap().is_some());
    }

    #[test]
    fn test_change_attrs_is_atomic() {
        let mut widget = fixed_box("Hi");
        let err = widget
            .change_attrs([("margin", AttrValue::Int(4)), ("text_size", AttrValue::Int(-3))])
            .unwrap_err();
        assert!(matches!(err, BoxError::InvalidValue { ref attribute, .. } if attribute == "text_size"));
        assert_eq!(widget.config().margin, 10.0);

        assert!(matches!(
            widget.change_attrs([("marjin", 4)]),
            Err(BoxError::UnknownAttribute(_))
        ));
    }

    #[test]
    fn test_caches_invalidate_by_kind() {
        let mut widget = fixed_box("Hi");
        let mut m = measurer();
        widget.paint(&mut DisplayList::new(), &mut m).unwrap();
        assert!(widget.parsed().is_some() && widget.resolution().is_some());

        widget.change_attrs([("background_color", "red")]).unwrap();
        assert!(widget.parsed().is_some() && widget.resolution().is_some());

        widget.change_attrs([("margin", 0)]).unwrap();
        assert!(widget.parsed().is_some());
        assert!(widget.resolution().is_none());

        widget.paint(&mut DisplayList::new(), &mut m).unwrap();
        widget.change_attrs([("text_size", 20)]).unwrap();
        assert!(widget.parsed().is_none() && widget.resolution().is_none());

        widget.paint(&mut DisplayList::new(), &mut m).unwrap();
        widget.set_text("Bye");
        assert!(widget.parsed().is_none() && widget.resolution().is_none());
        assert_eq!(widget.text(), "Bye");
    }

    #[test]
    fn test_paint_order_and_colors() {
        let mut widget = fixed_box("Hi");
        let mut canvas = DisplayList::new();
        widget.paint(&mut canvas, &mut measurer()).unwrap();

        let background = widget.config().background_color;
        assert_eq!(canvas.len(), 2);
        assert!(matches!(
            canvas.commands()[0],
            DrawCommand::FillRoundedRect { color, rect } if color == background && rect.radius == 10.0
        ));
        assert_eq!(canvas.texts().collect::<Vec<_>>(), vec!["Hi"]);

        widget.handle_event(&BoxEvent::pointer_move(100.0, 16.0), &mut measurer()).unwrap();
        canvas.clear();
        widget.paint(&mut canvas, &mut measurer()).unwrap();
        let hovered = widget.config().hovered_over_color;
        assert!(matches!(canvas.commands()[0], DrawCommand::FillRoundedRect { color, .. } if color == hovered));
    }

    #[test]
    fn test_border_outline_and_filled() {
        let mut widget = fixed_box("Hi");
        widget
            .change_attrs([("border_size", AttrValue::Int(2)), ("border_color", "black".into())])
            .unwrap();
        let mut canvas = DisplayList::new();
        widget.paint(&mut canvas, &mut measurer()).unwrap();
        assert!(matches!(
            canvas.commands()[0],
            DrawCommand::StrokeRoundedRect { color, width, .. } if color == Color::BLACK && width == 2.0
        ));
        assert_eq!(canvas.len(), 2);

        widget.change_attrs([("fill_in_border", true)]).unwrap();
        canvas.clear();
        widget.paint(&mut canvas, &mut measurer()).unwrap();
        assert!(matches!(canvas.commands()[0], DrawCommand::FillRoundedRect { .. }));
        assert!(matches!(
            canvas.commands()[1],
            DrawCommand::StrokeRoundedRect { color, .. } if color == Color::BLACK
        ));
    }

    #[test]
    fn test_too_small_is_an_error() {
        let mut widget = BoxWidget::new(
            (400.0, 400.0),
            |_, _| Vector2d::ZERO,
            |_, _| Vector2d::new(20.0, 20.0),
            "abc",
        );
        let err = widget
            .handle_event(&BoxEvent::resize(400.0, 400.0), &mut measurer())
            .unwrap_err();
        assert!(matches!(err, BoxError::Text(TextError::TooSmall { .. })));
        assert!(widget.resolution().is_none());

        widget
            .change_attrs([("if_overflowing_text", OverflowPolicy::ResizeText)])
            .unwrap();
        widget.paint(&mut DisplayList::new(), &mut measurer()).unwrap();
        assert!(widget.resolution().unwrap().too_small);
    }

    #[test]
    fn test_tick_does_nothing() {
        let mut widget = fixed_box("Hi");
        assert_eq!(widget.handle_event(&BoxEvent::Tick, &mut measurer()).unwrap(), None);
        assert!(widget.parsed().is_none());
    }

    #[test]
    fn test_missing_image_fails_paint() {
        let mut widget = fixed_box("Hi");
        widget.change_attrs([("image_path", "/nonexistent/tile.png")]).unwrap();
        let err = widget.paint(&mut DisplayList::new(), &mut measurer()).unwrap_err();
        assert!(matches!(err, BoxError::Image(_)));
    }
}
