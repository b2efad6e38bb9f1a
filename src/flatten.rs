// Copyright 2024 Aruj Bansal
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

//! Adaptive flattening of quadratic and cubic curves into line segments.

use raster_path::Point;

use crate::bezier::{eval_cubic, eval_quad};

/// Flatness tolerance, in device pixels, used by [`flatten_quad`] and [`flatten_cubic`].
pub const FLATNESS_TOLERANCE: f32 = 0.25;

/// Appends line segments approximating a quadratic curve to `out`.
///
/// The segment count is chosen so the chord never deviates from the curve by more than
/// [`FLATNESS_TOLERANCE`] device pixels.
pub fn flatten_quad(points: &[Point; 3], out: &mut Vec<(Point, Point)>) {
    let error = (points[0] - points[1] * 2.0 + points[2]) * 0.25;
    let num_segments = (error_len(error) / FLATNESS_TOLERANCE).sqrt().ceil().max(1.0) as u32;

    let inv = 1.0 / num_segments as f32;
    let mut prev = eval_quad(0.0, points);
    let mut t = inv;
    for _ in 0..num_segments {
        let cur = eval_quad(t, points);
        out.push((prev, cur));
        t += inv;
        prev = cur;
    }
}

/// Appends line segments approximating a cubic curve to `out`.
pub fn flatten_cubic(points: &[Point; 4], out: &mut Vec<(Point, Point)>) {
    let e0 = points[0] - points[1] * 2.0 + points[2];
    let e1 = points[1] - points[2] * 2.0 + points[3];
    let res = Point::from_xy(e0.x.abs().max(e1.x.abs()), e0.y.abs().max(e1.y.abs()));

    let num_segments =
        (3.0 * error_len(res) / (4.0 * FLATNESS_TOLERANCE)).sqrt().ceil().max(1.0) as u32;

    let inv = 1.0 / num_segments as f32;
    let mut prev = eval_cubic(0.0, points);
    let mut t = inv;
    for _ in 0..num_segments {
        let cur = eval_cubic(t, points);
        out.push((prev, cur));
        t += inv;
        prev = cur;
    }
}

#[inline]
fn error_len(p: Point) -> f32 {
    (p.x * p.x + p.y * p.y).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_quad_is_one_segment() {
        let pts =
            [Point::from_xy(0.0, 0.0), Point::from_xy(5.0, 0.0), Point::from_xy(10.0, 0.0)];
        let mut out = Vec::new();
        flatten_quad(&pts, &mut out);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].0, pts[0]);
        assert_eq!(out[0].1, pts[2]);
    }

    #[test]
    fn bulgy_quad_needs_multiple_segments() {
        let pts =
            [Point::from_xy(0.0, 0.0), Point::from_xy(50.0, 100.0), Point::from_xy(100.0, 0.0)];
        let mut out = Vec::new();
        flatten_quad(&pts, &mut out);
        assert!(out.len() > 1);
        assert_eq!(out[0].0, pts[0]);
        assert_eq!(out.last().unwrap().1, pts[2]);
    }

    #[test]
    fn flat_cubic_is_one_segment() {
        let pts = [
            Point::from_xy(0.0, 0.0),
            Point::from_xy(3.0, 0.0),
            Point::from_xy(7.0, 0.0),
            Point::from_xy(10.0, 0.0),
        ];
        let mut out = Vec::new();
        flatten_cubic(&pts, &mut out);
        assert_eq!(out.len(), 1);
    }

    #[test]
    fn flattened_segments_are_contiguous() {
        let pts =
            [Point::from_xy(0.0, 0.0), Point::from_xy(20.0, 40.0), Point::from_xy(40.0, 0.0)];
        let mut out = Vec::new();
        flatten_quad(&pts, &mut out);
        for w in out.windows(2) {
            assert_eq!(w[0].1, w[1].0);
        }
    }
}
