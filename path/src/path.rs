// Copyright 2006 The Android Open Source Project
// Copyright 2020 Yevhenii Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use alloc::vec::Vec;

use crate::{Point, Rect};

/// The maximum number of points a single call to `Iter::next`/`Edger::next` can write.
pub const MAX_NEXT_POINTS: usize = 4;

/// A path verb.
#[allow(missing_docs)]
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Verb {
    Move,
    Line,
    Quad,
    Cubic,
}

/// A Bezier path.
///
/// Stored as parallel arrays of verbs and on-curve/control points, matching the layout a
/// verb walker expects: `Move` consumes one point, `Line` two, `Quad` three, `Cubic` four,
/// where the first point of every non-`Move` verb is simply the previous verb's last point.
#[derive(Clone, PartialEq, Debug)]
pub struct Path {
    verbs: Vec<Verb>,
    points: Vec<Point>,
}

impl Path {
    pub(crate) fn new(verbs: Vec<Verb>, points: Vec<Point>) -> Self {
        Path { verbs, points }
    }

    /// Returns the number of points stored in the path.
    #[inline]
    pub fn points_count(&self) -> usize {
        self.points.len()
    }

    /// Returns the number of verbs stored in the path.
    #[inline]
    pub fn verbs_count(&self) -> usize {
        self.verbs.len()
    }

    /// Returns `true` if the path has no verbs.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.verbs.is_empty()
    }

    /// Returns the raw points slice, one entry per on-curve/control point.
    #[inline]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Creates an iterator that walks each verb exactly as stored.
    #[inline]
    pub fn verbs_iter(&self) -> Iter<'_> {
        Iter::new(self)
    }

    /// Creates an iterator that additionally synthesizes the implicit closing line
    /// of every contour, so that a walked path is always made of closed contours.
    #[inline]
    pub fn edger(&self) -> Edger<'_> {
        Edger::new(self)
    }

    /// A loose bounding box: the bounds of the path's verb/control points.
    ///
    /// Does not account for curves bulging past their control points; callers that need
    /// a tight box should flatten the path first.
    pub fn bounds(&self) -> Rect {
        if self.points.is_empty() {
            return Rect::from_ltrb(0.0, 0.0, 0.0, 0.0).unwrap();
        }

        let mut left = self.points[0].x;
        let mut right = self.points[0].x;
        let mut top = self.points[0].y;
        let mut bottom = self.points[0].y;
        for p in &self.points[1..] {
            left = left.min(p.x);
            right = right.max(p.x);
            top = top.min(p.y);
            bottom = bottom.max(p.y);
        }

        Rect::from_ltrb(left, top, right, bottom).unwrap()
    }
}

/// Walks a path verb by verb, exactly as it was built.
#[derive(Clone)]
pub struct Iter<'a> {
    verbs: core::slice::Iter<'a, Verb>,
    points: &'a [Point],
    point_index: usize,
}

impl<'a> Iter<'a> {
    fn new(path: &'a Path) -> Self {
        Iter {
            verbs: path.verbs.iter(),
            points: &path.points,
            point_index: 0,
        }
    }

    /// Returns the next verb, filling `pts` with its points.
    ///
    /// `pts[0]` is always the previous on-curve point (unused for `Move`).
    pub fn next(&mut self, pts: &mut [Point; MAX_NEXT_POINTS]) -> Option<Verb> {
        let verb = *self.verbs.next()?;
        match verb {
            Verb::Move => {
                pts[0] = self.points[self.point_index];
                self.point_index += 1;
            }
            Verb::Line => {
                pts[0] = self.points[self.point_index - 1];
                pts[1] = self.points[self.point_index];
                self.point_index += 1;
            }
            Verb::Quad => {
                pts[0] = self.points[self.point_index - 1];
                pts[1] = self.points[self.point_index];
                pts[2] = self.points[self.point_index + 1];
                self.point_index += 2;
            }
            Verb::Cubic => {
                pts[0] = self.points[self.point_index - 1];
                pts[1] = self.points[self.point_index];
                pts[2] = self.points[self.point_index + 1];
                pts[3] = self.points[self.point_index + 2];
                self.point_index += 3;
            }
        }
        Some(verb)
    }
}

/// Walks a path verb by verb, synthesizing an implicit closing `Line` at the end of
/// every contour (on a `Move` that follows a non-`Move` verb, and at end of stream).
///
/// Never yields `Verb::Move` itself — it only uses it internally to track where the
/// current contour started, so the synthesized closing line has somewhere to go back to.
#[derive(Clone)]
pub struct Edger<'a> {
    verbs: &'a [Verb],
    points: &'a [Point],
    verb_index: usize,
    point_index: usize,
    prev_move_point: Option<Point>,
    prev_verb: Option<Verb>,
    done: bool,
}

impl<'a> Edger<'a> {
    fn new(path: &'a Path) -> Self {
        Edger {
            verbs: &path.verbs,
            points: &path.points,
            verb_index: 0,
            point_index: 0,
            prev_move_point: None,
            prev_verb: None,
            done: false,
        }
    }

    /// Returns the next verb (never `Verb::Move`), filling `pts` with its points.
    pub fn next(&mut self, pts: &mut [Point; MAX_NEXT_POINTS]) -> Option<Verb> {
        while self.verb_index < self.verbs.len() {
            let verb = self.verbs[self.verb_index];
            self.verb_index += 1;

            match verb {
                Verb::Move => {
                    let move_point = self.points[self.point_index];
                    self.point_index += 1;

                    if self.prev_verb.is_some() && self.prev_verb != Some(Verb::Move) {
                        let last_point = self.points[self.point_index - 2];
                        pts[0] = last_point;
                        pts[1] = self.prev_move_point.unwrap();
                        self.prev_move_point = Some(move_point);
                        self.prev_verb = Some(Verb::Move);
                        return Some(Verb::Line);
                    }

                    self.prev_move_point = Some(move_point);
                    self.prev_verb = Some(Verb::Move);
                }
                Verb::Line => {
                    pts[0] = self.points[self.point_index - 1];
                    pts[1] = self.points[self.point_index];
                    self.point_index += 1;
                    self.prev_verb = Some(Verb::Line);
                    return Some(Verb::Line);
                }
                Verb::Quad => {
                    pts[0] = self.points[self.point_index - 1];
                    pts[1] = self.points[self.point_index];
                    pts[2] = self.points[self.point_index + 1];
                    self.point_index += 2;
                    self.prev_verb = Some(Verb::Quad);
                    return Some(Verb::Quad);
                }
                Verb::Cubic => {
                    pts[0] = self.points[self.point_index - 1];
                    pts[1] = self.points[self.point_index];
                    pts[2] = self.points[self.point_index + 1];
                    pts[3] = self.points[self.point_index + 2];
                    self.point_index += 3;
                    self.prev_verb = Some(Verb::Cubic);
                    return Some(Verb::Cubic);
                }
            }
        }

        // End of stream: close the final contour, once.
        if !self.done {
            self.done = true;
            let drew_something = matches!(self.prev_verb, Some(Verb::Line) | Some(Verb::Quad) | Some(Verb::Cubic));
            if drew_something {
                if let Some(prev) = self.prev_move_point {
                    pts[0] = self.points[self.point_index - 1];
                    pts[1] = prev;
                    return Some(Verb::Line);
                }
            }
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PathBuilder;

    #[test]
    fn edger_closes_contour() {
        let mut pb = PathBuilder::new();
        pb.move_to(Point::from_xy(0.0, 0.0));
        pb.line_to(Point::from_xy(10.0, 0.0));
        pb.line_to(Point::from_xy(10.0, 10.0));
        pb.line_to(Point::from_xy(0.0, 10.0));
        let path = pb.finish().unwrap();

        let mut pts = [Point::zero(); MAX_NEXT_POINTS];
        let mut edger = path.edger();
        let mut lines = Vec::new();
        while let Some(verb) = edger.next(&mut pts) {
            assert_eq!(verb, Verb::Line);
            lines.push((pts[0], pts[1]));
        }

        assert_eq!(lines.len(), 4);
        // The final synthesized edge closes back to the start point.
        assert_eq!(lines[3], (Point::from_xy(0.0, 10.0), Point::from_xy(0.0, 0.0)));
    }

    #[test]
    fn verbs_iter_sees_move() {
        let mut pb = PathBuilder::new();
        pb.move_to(Point::from_xy(1.0, 1.0));
        pb.line_to(Point::from_xy(2.0, 2.0));
        let path = pb.finish().unwrap();

        let mut pts = [Point::zero(); MAX_NEXT_POINTS];
        let mut iter = path.verbs_iter();
        assert_eq!(iter.next(&mut pts), Some(Verb::Move));
        assert_eq!(iter.next(&mut pts), Some(Verb::Line));
        assert_eq!(iter.next(&mut pts), None);
    }
}
