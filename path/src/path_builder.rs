// Copyright 2006 The Android Open Source Project
// Copyright 2020 Yevhenii Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use alloc::vec::Vec;

use crate::{Path, Point, Rect, Verb};

/// Builds a `Path` one verb at a time.
///
/// Mirrors the `Path`/`PathBuilder` split: the builder is append-only and mutable, the
/// finished path is immutable and cheap to iterate.
#[derive(Clone, Default, Debug)]
pub struct PathBuilder {
    verbs: Vec<Verb>,
    points: Vec<Point>,
    has_open_contour: bool,
    contour_start: Point,
}

impl PathBuilder {
    /// Creates a new, empty builder.
    #[inline]
    pub fn new() -> Self {
        PathBuilder::default()
    }

    /// Starts a new contour at `p`.
    pub fn move_to(&mut self, p: Point) {
        self.verbs.push(Verb::Move);
        self.points.push(p);
        self.has_open_contour = true;
        self.contour_start = p;
    }

    /// Adds a line from the current point to `p`.
    ///
    /// Does nothing if no contour has been started yet.
    pub fn line_to(&mut self, p: Point) {
        if !self.has_open_contour {
            return;
        }
        self.verbs.push(Verb::Line);
        self.points.push(p);
    }

    /// Adds a quadratic Bezier curve from the current point through control point `p1`
    /// to `p2`.
    pub fn quad_to(&mut self, p1: Point, p2: Point) {
        if !self.has_open_contour {
            return;
        }
        self.verbs.push(Verb::Quad);
        self.points.push(p1);
        self.points.push(p2);
    }

    /// Adds a cubic Bezier curve from the current point through control points `p1`, `p2`
    /// to `p3`.
    pub fn cubic_to(&mut self, p1: Point, p2: Point, p3: Point) {
        if !self.has_open_contour {
            return;
        }
        self.verbs.push(Verb::Cubic);
        self.points.push(p1);
        self.points.push(p2);
        self.points.push(p3);
    }

    /// Closes the current contour.
    ///
    /// Connects the last point back to the contour's starting point with a line, then
    /// requires a new `move_to` before any further `line_to`/`quad_to`/`cubic_to` calls.
    ///
    /// Does nothing if no contour is open (an empty builder, or one already closed).
    pub fn close(&mut self) {
        if !self.has_open_contour {
            return;
        }

        if let Some(&last) = self.points.last() {
            if last != self.contour_start {
                self.verbs.push(Verb::Line);
                self.points.push(self.contour_start);
            }
        }

        self.has_open_contour = false;
    }

    /// Appends the four sides of `rect` as a closed contour, in clockwise order.
    pub fn push_rect(&mut self, rect: Rect) {
        let [lt, rt, rb, lb] = rect.to_quad();
        self.move_to(lt);
        self.line_to(rt);
        self.line_to(rb);
        self.line_to(lb);
        self.close();
    }

    /// Appends a closed polygon contour through `points`, in the order given.
    pub fn push_polygon(&mut self, points: &[Point]) {
        if points.is_empty() {
            return;
        }
        self.move_to(points[0]);
        for p in &points[1..] {
            self.line_to(*p);
        }
        self.close();
    }

    /// Appends a circle contour centered at `center` with radius `r`, in clockwise order.
    ///
    /// Approximates the circle with four cubic arcs (one per quadrant), using the
    /// standard Bezier circle constant `k = r * 0.55228475` so each arc's midpoint
    /// deviates from the true circle by a fraction of a pixel.
    ///
    /// Does nothing if `r` is not positive.
    pub fn push_circle(&mut self, center: Point, r: f32) {
        if !(r > 0.0) {
            return;
        }

        const KAPPA: f32 = 0.552_284_75;
        let k = r * KAPPA;
        let (cx, cy) = (center.x, center.y);

        self.move_to(Point::from_xy(cx + r, cy));
        self.cubic_to(
            Point::from_xy(cx + r, cy + k),
            Point::from_xy(cx + k, cy + r),
            Point::from_xy(cx, cy + r),
        );
        self.cubic_to(
            Point::from_xy(cx - k, cy + r),
            Point::from_xy(cx - r, cy + k),
            Point::from_xy(cx - r, cy),
        );
        self.cubic_to(
            Point::from_xy(cx - r, cy - k),
            Point::from_xy(cx - k, cy - r),
            Point::from_xy(cx, cy - r),
        );
        self.cubic_to(
            Point::from_xy(cx + k, cy - r),
            Point::from_xy(cx + r, cy - k),
            Point::from_xy(cx + r, cy),
        );
        self.close();
    }

    /// Returns the number of verbs accumulated so far.
    #[inline]
    pub fn len(&self) -> usize {
        self.verbs.len()
    }

    /// Returns `true` if no verbs have been accumulated.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.verbs.is_empty()
    }

    /// Consumes the builder, producing an immutable `Path`.
    ///
    /// Returns `None` if the builder is empty.
    pub fn finish(self) -> Option<Path> {
        if self.verbs.is_empty() {
            return None;
        }
        Some(Path::new(self.verbs, self.points))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_builder_produces_no_path() {
        assert!(PathBuilder::new().finish().is_none());
    }

    #[test]
    fn line_before_move_is_ignored() {
        let mut pb = PathBuilder::new();
        pb.line_to(Point::from_xy(1.0, 1.0));
        assert!(pb.is_empty());
    }

    #[test]
    fn rect_has_four_lines_and_closes() {
        let mut pb = PathBuilder::new();
        pb.push_rect(Rect::from_ltrb(0.0, 0.0, 10.0, 10.0).unwrap());
        let path = pb.finish().unwrap();
        // 3 explicit sides plus the closing line back to the start point.
        assert_eq!(path.verbs_count(), 5);
        assert_eq!(path.points_count(), 5);
    }

    #[test]
    fn close_is_a_no_op_when_already_closed() {
        let mut pb = PathBuilder::new();
        pb.push_rect(Rect::from_ltrb(0.0, 0.0, 10.0, 10.0).unwrap());
        pb.close();
        let path = pb.finish().unwrap();
        assert_eq!(path.verbs_count(), 5);
    }

    #[test]
    fn close_without_a_contour_is_a_no_op() {
        let mut pb = PathBuilder::new();
        pb.close();
        assert!(pb.is_empty());
    }

    #[test]
    fn circle_is_four_cubics_and_closes() {
        let mut pb = PathBuilder::new();
        pb.push_circle(Point::from_xy(5.0, 5.0), 3.0);
        let path = pb.finish().unwrap();
        // Move + 4 cubics + the closing line.
        assert_eq!(path.verbs_count(), 6);
    }

    #[test]
    fn degenerate_circle_is_ignored() {
        let mut pb = PathBuilder::new();
        pb.push_circle(Point::from_xy(5.0, 5.0), 0.0);
        assert!(pb.is_empty());
    }
}
