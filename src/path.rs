//! Pixel-space paths and the geometry helpers built on them.

use crate::utils::PixelsExt;
use gpui::{px, Bounds, Pixels, Point, Size};
use std::f32::consts::TAU;

/// Segments used to approximate a full circle.
const ELLIPSE_SEGMENTS: usize = 48;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PathOp {
    MoveTo(Point<Pixels>),
    LineTo(Point<Pixels>),
    Close,
}

/// An ordered list of move/line/close operations in pixel space.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Path {
    ops: Vec<PathOp>,
}

impl Path {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn move_to(&mut self, point: Point<Pixels>) {
        self.ops.push(PathOp::MoveTo(point));
    }

    /// Adds a line, or starts the path if nothing has been emitted yet.
    pub fn line_to(&mut self, point: Point<Pixels>) {
        if self.ops.is_empty() {
            self.ops.push(PathOp::MoveTo(point));
        } else {
            self.ops.push(PathOp::LineTo(point));
        }
    }

    pub fn close(&mut self) {
        if !self.ops.is_empty() {
            self.ops.push(PathOp::Close);
        }
    }

    pub fn ops(&self) -> &[PathOp] {
        &self.ops
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    pub fn is_closed(&self) -> bool {
        matches!(self.ops.last(), Some(PathOp::Close))
    }

    /// Every move/line target in order.
    pub fn points(&self) -> Vec<Point<Pixels>> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                PathOp::MoveTo(p) | PathOp::LineTo(p) => Some(*p),
                PathOp::Close => None,
            })
            .collect()
    }

    pub fn vertex_count(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| !matches!(op, PathOp::Close))
            .count()
    }

    pub fn first_point(&self) -> Option<Point<Pixels>> {
        self.ops.iter().find_map(|op| match op {
            PathOp::MoveTo(p) | PathOp::LineTo(p) => Some(*p),
            PathOp::Close => None,
        })
    }

    pub fn last_point(&self) -> Option<Point<Pixels>> {
        self.ops.iter().rev().find_map(|op| match op {
            PathOp::MoveTo(p) | PathOp::LineTo(p) => Some(*p),
            PathOp::Close => None,
        })
    }

    /// Smallest rect containing every vertex.
    pub fn bounds(&self) -> Option<Bounds<Pixels>> {
        let points = self.points();
        let first = points.first()?;
        let (mut min_x, mut min_y) = (first.x.as_f32(), first.y.as_f32());
        let (mut max_x, mut max_y) = (min_x, min_y);
        for p in &points[1..] {
            min_x = min_x.min(p.x.as_f32());
            min_y = min_y.min(p.y.as_f32());
            max_x = max_x.max(p.x.as_f32());
            max_y = max_y.max(p.y.as_f32());
        }
        Some(Bounds::new(
            Point::new(px(min_x), px(min_y)),
            Size::new(px(max_x - min_x), px(max_y - min_y)),
        ))
    }

    /// Closed rectangle, clockwise from the origin.
    pub fn rect(bounds: Bounds<Pixels>) -> Self {
        let Bounds { origin, size } = bounds;
        let mut path = Self::new();
        path.move_to(origin);
        path.line_to(Point::new(origin.x + size.width, origin.y));
        path.line_to(Point::new(origin.x + size.width, origin.y + size.height));
        path.line_to(Point::new(origin.x, origin.y + size.height));
        path.close();
        path
    }

    /// A disk of radius `outer` with a hole of radius `inner`. The hole is
    /// wound the other way so both even-odd and non-zero filling leave it empty.
    pub fn ring(center: Point<Pixels>, outer: f32, inner: f32) -> Self {
        let mut path = Self::new();
        append_circle(&mut path, center, outer, false);
        if inner > 0.0 {
            append_circle(&mut path, center, inner.min(outer), true);
        }
        path
    }

    /// Closes a stroke into a fillable region by running down to the bottom
    /// corners of `bounds`.
    pub fn to_mask_region(&self, bounds: Bounds<Pixels>) -> Self {
        if self.is_empty() {
            return Self::new();
        }
        let max_x = bounds.origin.x + bounds.size.width;
        let max_y = bounds.origin.y + bounds.size.height;

        let mut mask = self.clone();
        mask.line_to(Point::new(max_x, max_y));
        mask.line_to(Point::new(bounds.origin.x, max_y));
        mask.close();
        mask
    }
}

fn append_circle(path: &mut Path, center: Point<Pixels>, radius: f32, reversed: bool) {
    let cx = center.x.as_f32();
    let cy = center.y.as_f32();
    for i in 0..ELLIPSE_SEGMENTS {
        let step = i as f32 / ELLIPSE_SEGMENTS as f32;
        let angle = if reversed { -step * TAU } else { step * TAU };
        let point = Point::new(px(cx + radius * angle.cos()), px(cy + radius * angle.sin()));
        if i == 0 {
            path.move_to(point);
        } else {
            path.line_to(point);
        }
    }
    path.close();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pt(x: f32, y: f32) -> Point<Pixels> {
        Point::new(px(x), px(y))
    }

    #[test]
    fn mask_region_closes_to_bottom_corners() {
        let mut stroke = Path::new();
        stroke.move_to(pt(0.0, 10.0));
        stroke.line_to(pt(50.0, 20.0));
        let bounds = Bounds::new(pt(0.0, 0.0), Size::new(px(100.0), px(40.0)));

        let mask = stroke.to_mask_region(bounds);
        assert!(mask.is_closed());
        assert_eq!(
            mask.points(),
            vec![pt(0.0, 10.0), pt(50.0, 20.0), pt(100.0, 40.0), pt(0.0, 40.0)]
        );
        assert!(Path::new().to_mask_region(bounds).is_empty());
    }

    #[test]
    fn ring_has_two_closed_subpaths() {
        let ring = Path::ring(pt(0.0, 0.0), 10.0, 4.0);
        let closes = ring.ops().iter().filter(|op| **op == PathOp::Close).count();
        assert_eq!(closes, 2);
        assert_eq!(ring.vertex_count(), ELLIPSE_SEGMENTS * 2);
    }

    #[test]
    fn bounds_cover_all_vertices() {
        let rect = Path::rect(Bounds::new(pt(5.0, 5.0), Size::new(px(10.0), px(20.0))));
        let bounds = rect.bounds().unwrap();
        assert_eq!(bounds.origin, pt(5.0, 5.0));
        assert_eq!(bounds.size, Size::new(px(10.0), px(20.0)));
    }
}
