pub mod input;

use crate::chart_container::LineChartContainer;
use crate::data_types::{Highlight, RenderMode};
use crate::rendering::WindowCanvas;
use gpui::prelude::*;
use gpui::*;
use std::cell::RefCell;
use std::rc::Rc;

use self::input::HoverHandler;

/// A gpui view painting one [`LineChartContainer`] on a canvas.
pub struct SplitLineChartView {
    pub container: Rc<RefCell<LineChartContainer>>,
    bounds: Rc<RefCell<Bounds<Pixels>>>,
    input: HoverHandler,
}

impl SplitLineChartView {
    pub fn new(container: LineChartContainer, _cx: &mut Context<Self>) -> Self {
        let container = Rc::new(RefCell::new(container));
        let bounds = Rc::new(RefCell::new(Bounds::default()));
        let input = HoverHandler::new(container.clone(), bounds.clone());
        Self {
            container,
            bounds,
            input,
        }
    }

    pub fn highlight(&self) -> Option<Highlight> {
        self.container.borrow().highlight().copied()
    }

    pub fn set_highlight(&mut self, highlight: Option<Highlight>, cx: &mut Context<Self>) {
        self.container.borrow_mut().set_highlight(highlight);
        cx.notify();
    }

    pub fn set_render_mode(&mut self, mode: RenderMode, cx: &mut Context<Self>) {
        self.container.borrow_mut().set_render_mode(mode);
        cx.notify();
    }

    /// Bounds of the last painted frame.
    pub fn last_bounds(&self) -> Bounds<Pixels> {
        *self.bounds.borrow()
    }

    /// Enables or disables tracking the highlight under the mouse.
    pub fn set_hover_tracking(&mut self, enabled: bool) {
        self.input.enabled = enabled;
    }
}

impl Render for SplitLineChartView {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let container = self.container.clone();
        let bounds_rc = self.bounds.clone();

        div()
            .id(("split-line-chart", cx.entity_id()))
            .size_full()
            .on_mouse_move(cx.listener(|this, event: &MouseMoveEvent, _window, cx| {
                if this.input.handle_mouse_move(event) {
                    cx.notify();
                }
            }))
            .on_hover(cx.listener(|this, hovered: &bool, _window, cx| {
                if !*hovered && this.input.handle_mouse_leave() {
                    cx.notify();
                }
            }))
            .child(
                canvas(
                    move |_, _, _| {},
                    move |bounds, (), window, _cx| {
                        *bounds_rc.borrow_mut() = bounds;
                        let mut canvas = WindowCanvas::new(window);
                        container.borrow_mut().draw(&mut canvas, bounds);
                    },
                )
                .size_full(),
            )
    }
}
