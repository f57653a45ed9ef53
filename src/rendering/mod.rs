//! Backend-independent drawing surface.
//!
//! Renderers issue draw calls against [`DrawContext`]; a gpui window
//! ([`gpui_backend::WindowCanvas`]) and an in-memory log
//! ([`recording::RecordingContext`]) implement it.

pub mod gpui_backend;
pub mod recording;

use crate::data_types::{GradientSpec, LineCap};
use crate::path::Path;
use gpui::{Bounds, Hsla, Pixels};
use std::ops::{Deref, DerefMut};

pub use gpui_backend::WindowCanvas;
pub use recording::{DrawCommand, RecordingContext};

/// What a path is painted with.
#[derive(Clone, Debug, PartialEq)]
pub enum Paint {
    Color(Hsla),
    /// Gradient whose unit-space points refer to `rect`.
    Gradient {
        spec: GradientSpec,
        rect: Bounds<Pixels>,
    },
}

impl Paint {
    pub fn with_opacity(&self, alpha: f32) -> Self {
        match self {
            Paint::Color(color) => Paint::Color(color.opacity(alpha)),
            Paint::Gradient { spec, rect } => Paint::Gradient {
                spec: spec.with_opacity(alpha),
                rect: *rect,
            },
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StrokeStyle {
    pub width: f32,
    pub cap: LineCap,
}

impl StrokeStyle {
    pub fn new(width: f32, cap: LineCap) -> Self {
        Self { width, cap }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FillRule {
    #[default]
    NonZero,
    EvenOdd,
}

/// Immediate-mode 2D drawing target.
pub trait DrawContext {
    /// Pushes the current clip onto the state stack.
    fn save_state(&mut self);
    /// Pops the state pushed by the matching [`DrawContext::save_state`].
    fn restore_state(&mut self);
    /// Intersects the current clip with `rect`.
    fn clip_to_rect(&mut self, rect: Bounds<Pixels>);
    fn stroke_path(&mut self, path: &Path, style: StrokeStyle, paint: &Paint);
    fn fill_path(&mut self, path: &Path, rule: FillRule, paint: &Paint);
}

/// Saves the context state on creation and restores it when dropped, so
/// every exit path of a draw call leaves the stack balanced.
pub struct StateGuard<'a, C: DrawContext + ?Sized> {
    ctx: &'a mut C,
}

impl<'a, C: DrawContext + ?Sized> StateGuard<'a, C> {
    pub fn new(ctx: &'a mut C) -> Self {
        ctx.save_state();
        Self { ctx }
    }
}

impl<C: DrawContext + ?Sized> Deref for StateGuard<'_, C> {
    type Target = C;

    fn deref(&self) -> &C {
        self.ctx
    }
}

impl<C: DrawContext + ?Sized> DerefMut for StateGuard<'_, C> {
    fn deref_mut(&mut self) -> &mut C {
        self.ctx
    }
}

impl<C: DrawContext + ?Sized> Drop for StateGuard<'_, C> {
    fn drop(&mut self) {
        self.ctx.restore_state();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn early_return(ctx: &mut dyn DrawContext, bail: bool) {
        let mut ctx = StateGuard::new(ctx);
        if bail {
            return;
        }
        ctx.fill_path(&Path::new(), FillRule::NonZero, &Paint::Color(gpui::red()));
    }

    #[test]
    fn guard_restores_on_every_exit() {
        let mut ctx = RecordingContext::new();
        early_return(&mut ctx, true);
        early_return(&mut ctx, false);
        assert!(ctx.is_balanced());
        assert_eq!(ctx.fills().count(), 1);
    }
}
