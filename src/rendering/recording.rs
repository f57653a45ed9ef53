use super::{DrawContext, FillRule, Paint, StrokeStyle};
use crate::path::Path;
use gpui::{Bounds, Pixels};

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Save,
    Restore,
    ClipRect(Bounds<Pixels>),
    Stroke {
        path: Path,
        style: StrokeStyle,
        paint: Paint,
    },
    Fill {
        path: Path,
        rule: FillRule,
        paint: Paint,
    },
}

/// A [`DrawContext`] that only records what it is asked to draw.
#[derive(Clone, Debug, Default)]
pub struct RecordingContext {
    commands: Vec<DrawCommand>,
    depth: usize,
    underflow: bool,
}

impl RecordingContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn clear(&mut self) {
        self.commands.clear();
        self.depth = 0;
        self.underflow = false;
    }

    /// Every save was matched by a restore, and no restore came first.
    pub fn is_balanced(&self) -> bool {
        self.depth == 0 && !self.underflow
    }

    pub fn strokes(&self) -> impl Iterator<Item = (&Path, &StrokeStyle, &Paint)> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Stroke { path, style, paint } => Some((path, style, paint)),
            _ => None,
        })
    }

    pub fn fills(&self) -> impl Iterator<Item = (&Path, &FillRule, &Paint)> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Fill { path, rule, paint } => Some((path, rule, paint)),
            _ => None,
        })
    }

    pub fn clips(&self) -> impl Iterator<Item = &Bounds<Pixels>> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::ClipRect(rect) => Some(rect),
            _ => None,
        })
    }
}

impl DrawContext for RecordingContext {
    fn save_state(&mut self) {
        self.depth += 1;
        self.commands.push(DrawCommand::Save);
    }

    fn restore_state(&mut self) {
        match self.depth.checked_sub(1) {
            Some(depth) => self.depth = depth,
            None => self.underflow = true,
        }
        self.commands.push(DrawCommand::Restore);
    }

    fn clip_to_rect(&mut self, rect: Bounds<Pixels>) {
        self.commands.push(DrawCommand::ClipRect(rect));
    }

    fn stroke_path(&mut self, path: &Path, style: StrokeStyle, paint: &Paint) {
        self.commands.push(DrawCommand::Stroke {
            path: path.clone(),
            style,
            paint: paint.clone(),
        });
    }

    fn fill_path(&mut self, path: &Path, rule: FillRule, paint: &Paint) {
        self.commands.push(DrawCommand::Fill {
            path: path.clone(),
            rule,
            paint: paint.clone(),
        });
    }
}
