//! Named groups of boxes.
//!
//! A [`Screen`] is one page of the interface, such as a title screen, made
//! of boxes that are shown, hidden and updated together.

use bots_tiles_core::logging::targets;
use bots_tiles_render::Canvas;
use bots_tiles_render::text::TextMeasurer;

use super::box_widget::{BoxId, BoxWidget};
use super::events::BoxEvent;
use crate::error::Result;

/// Boxes updated and drawn together, in insertion order.
#[derive(Debug)]
pub struct Screen<T: Clone = BoxId> {
    boxes: Vec<(String, BoxWidget<T>)>,
    hidden: bool,
}

impl<T: Clone> Default for Screen<T> {
    fn default() -> Self {
        Self {
            boxes: Vec::new(),
            hidden: false,
        }
    }
}

impl<T: Clone> Screen<T> {
    /// Create an empty, visible screen.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a box under `name`, replacing and returning any box already
    /// using that name. A replaced box keeps its place in the draw order.
    pub fn insert(&mut self, name: impl Into<String>, widget: BoxWidget<T>) -> Option<BoxWidget<T>> {
        let name = name.into();
        match self.boxes.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => Some(std::mem::replace(slot, widget)),
            None => {
                self.boxes.push((name, widget));
                None
            }
        }
    }

    /// Add a box, builder style.
    pub fn with_box(mut self, name: impl Into<String>, widget: BoxWidget<T>) -> Self {
        self.insert(name, widget);
        self
    }

    /// Remove the box called `name`.
    pub fn remove(&mut self, name: &str) -> Option<BoxWidget<T>> {
        let index = self.boxes.iter().position(|(existing, _)| existing == name)?;
        Some(self.boxes.remove(index).1)
    }

    pub fn get(&self, name: &str) -> Option<&BoxWidget<T>> {
        self.boxes
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, widget)| widget)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut BoxWidget<T>> {
        self.boxes
            .iter_mut()
            .find(|(existing, _)| existing == name)
            .map(|(_, widget)| widget)
    }

    /// Box names in draw order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.boxes.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }

    /// Stop updating and drawing the screen. Hover and selection are
    /// cleared so the boxes come back idle.
    pub fn hide(&mut self) {
        if !self.hidden {
            tracing::debug!(target: targets::WIDGET, boxes = self.boxes.len(), "screen hidden");
        }
        self.hidden = true;
        for (_, widget) in &mut self.boxes {
            widget.reset_interaction();
        }
    }

    pub fn show(&mut self) {
        if self.hidden {
            tracing::debug!(target: targets::WIDGET, boxes = self.boxes.len(), "screen shown");
        }
        self.hidden = false;
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    /// Update and draw every box.
    ///
    /// Returns the click results of this frame in draw order. A hidden
    /// screen does nothing and returns no results.
    pub fn update(
        &mut self,
        event: &BoxEvent,
        canvas: &mut impl Canvas,
        measurer: &mut impl TextMeasurer,
    ) -> Result<Vec<T>> {
        if self.hidden {
            return Ok(Vec::new());
        }

        let mut results = Vec::new();
        for (_, widget) in &mut self.boxes {
            if let Some(result) = widget.update(event, canvas, measurer)? {
                results.push(result);
            }
        }
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bots_tiles_core::Vector2d;
    use bots_tiles_render::DisplayList;
    use bots_tiles_render::text::FixedAdvance;

    fn tile(x: f32, label: &'static str) -> BoxWidget<&'static str> {
        BoxWidget::new(
            (400.0, 400.0),
            move |_, _| Vector2d::new(x, 0.0),
            |_, _| Vector2d::new(100.0, 100.0),
            label,
        )
        .with_click_result(label)
    }

    #[test]
    fn test_insert_keeps_order_and_replaces() {
        let mut screen = Screen::new();
        assert!(screen.insert("a", tile(0.0, "a")).is_none());
        assert!(screen.insert("b", tile(100.0, "b")).is_none());
        let old = screen.insert("a", tile(200.0, "c"));
        assert_eq!(old.map(|w| *w.click_result()), Some("a"));

        assert_eq!(screen.names().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(screen.get("a").map(|w| *w.click_result()), Some("c"));
        assert!(screen.get_mut("b").is_some());
        assert!(screen.get("z").is_none());

        assert!(screen.remove("b").is_some());
        assert_eq!(screen.len(), 1);
    }

    #[test]
    fn test_update_collects_clicks() {
        let mut screen = Screen::new().with_box("left", tile(0.0, "left")).with_box("right", tile(100.0, "right"));
        let mut canvas = DisplayList::new();
        let mut measurer = FixedAdvance::new(1.0, 1.0);

        let clicks = screen
            .update(&BoxEvent::pointer_press(150.0, 10.0), &mut canvas, &mut measurer)
            .unwrap();
        assert_eq!(clicks, vec!["right"]);
        assert_eq!(canvas.texts().collect::<Vec<_>>(), vec!["left", "right"]);
    }

    #[test]
    fn test_hidden_screen_is_inert() {
        let mut screen = Screen::new().with_box("only", tile(0.0, "only"));
        let mut canvas = DisplayList::new();
        let mut measurer = FixedAdvance::new(1.0, 1.0);

        screen.hide();
        assert!(screen.is_hidden());
        let clicks = screen
            .update(&BoxEvent::pointer_press(50.0, 10.0), &mut canvas, &mut measurer)
            .unwrap();
        assert!(clicks.is_empty());
        assert!(canvas.is_empty());

        screen.show();
        let clicks = screen
            .update(&BoxEvent::pointer_press(50.0, 10.0), &mut canvas, &mut measurer)
            .unwrap();
        assert_eq!(clicks, vec!["only"]);
    }
}
