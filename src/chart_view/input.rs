use crate::chart_container::LineChartContainer;
use gpui::*;
use std::cell::RefCell;
use std::rc::Rc;

/// Moves the highlight to the entry under the mouse.
pub struct HoverHandler {
    pub container: Rc<RefCell<LineChartContainer>>,
    pub bounds: Rc<RefCell<Bounds<Pixels>>>,
    pub enabled: bool,
}

impl HoverHandler {
    pub fn new(
        container: Rc<RefCell<LineChartContainer>>,
        bounds: Rc<RefCell<Bounds<Pixels>>>,
    ) -> Self {
        Self {
            container,
            bounds,
            enabled: true,
        }
    }

    /// Returns whether the highlight changed.
    pub fn handle_mouse_move(&self, event: &MouseMoveEvent) -> bool {
        if !self.enabled {
            return false;
        }
        let bounds = *self.bounds.borrow();
        let mut container = self.container.borrow_mut();
        let highlight = container.highlight_at_pixel(event.position, bounds);
        if container.highlight() == highlight.as_ref() {
            return false;
        }
        tracing::trace!(?highlight, "hover highlight");
        container.set_highlight(highlight);
        true
    }

    pub fn handle_mouse_leave(&self) -> bool {
        if !self.enabled {
            return false;
        }
        let mut container = self.container.borrow_mut();
        if container.highlight().is_none() {
            return false;
        }
        container.set_highlight(None);
        true
    }
}
