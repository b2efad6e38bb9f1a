// Copyright 2006 The Android Open Source Project
// Copyright 2020 Yevhenii Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use raster_path::Point;

/// An affine transformation matrix.
///
/// Stored as the six coefficients of
///
/// ```text
/// [ a  c  e ]     x' = a*x + c*y + e
/// [ b  d  f ]     y' = b*x + d*y + f
/// [ 0  0  1 ]  (implied, not stored)
/// ```
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Transform {
    a: f32, c: f32, e: f32,
    b: f32, d: f32, f: f32,
}

impl Default for Transform {
    #[inline]
    fn default() -> Self {
        Transform::identity()
    }
}

impl Transform {
    /// Creates an identity transform.
    #[inline]
    pub fn identity() -> Self {
        Transform { a: 1.0, c: 0.0, e: 0.0, b: 0.0, d: 1.0, f: 0.0 }
    }

    /// Creates a transform from its six raw coefficients.
    #[inline]
    pub fn from_row(a: f32, b: f32, c: f32, d: f32, e: f32, f: f32) -> Self {
        Transform { a, c, e, b, d, f }
    }

    /// Creates a transform from a basis: two axis vectors and an origin.
    #[inline]
    pub fn from_basis(e0: Point, e1: Point, origin: Point) -> Self {
        Transform { a: e0.x, c: e1.x, e: origin.x, b: e0.y, d: e1.y, f: origin.y }
    }

    /// Creates a translating transform.
    #[inline]
    pub fn from_translate(tx: f32, ty: f32) -> Self {
        Transform { a: 1.0, c: 0.0, e: tx, b: 0.0, d: 1.0, f: ty }
    }

    /// Creates a scaling transform.
    #[inline]
    pub fn from_scale(sx: f32, sy: f32) -> Self {
        Transform { a: sx, c: 0.0, e: 0.0, b: 0.0, d: sy, f: 0.0 }
    }

    /// Creates a rotating transform, `radians` counter-clockwise... in a y-down device
    /// space this reads as clockwise on screen, matching the source convention.
    #[inline]
    pub fn from_rotate(radians: f32) -> Self {
        let sin = radians.sin();
        let cos = radians.cos();
        Transform { a: cos, c: -sin, e: 0.0, b: sin, d: cos, f: 0.0 }
    }

    /// Returns the raw six coefficients, in `[a, b, c, d, e, f]` order (column-major).
    #[inline]
    pub fn coeffs(&self) -> [f32; 6] {
        [self.a, self.b, self.c, self.d, self.e, self.f]
    }

    /// Returns the product `self * other`: applying the result is equivalent to first
    /// applying `other`, then `self`.
    #[inline]
    pub fn concat(&self, other: &Transform) -> Transform {
        Transform {
            a: self.a * other.a + self.c * other.b,
            c: self.a * other.c + self.c * other.d,
            e: self.a * other.e + self.c * other.f + self.e,
            b: self.b * other.a + self.d * other.b,
            d: self.b * other.c + self.d * other.d,
            f: self.b * other.e + self.d * other.f + self.f,
        }
    }

    /// Returns the analytic inverse, or `None` if the matrix is singular
    /// (`a*d - b*c == 0`).
    pub fn invert(&self) -> Option<Transform> {
        let det = self.a * self.d - self.b * self.c;
        if det == 0.0 {
            return None;
        }

        let k = 1.0 / det;
        Some(Transform {
            a: k * self.d,
            c: k * -self.c,
            e: k * (self.c * self.f - self.d * self.e),
            b: k * -self.b,
            d: k * self.a,
            f: k * (self.b * self.e - self.a * self.f),
        })
    }

    /// Maps `src` points into `dst`.
    ///
    /// `src` and `dst` may be the same slice (in-place mapping); they must not partially
    /// overlap otherwise.
    pub fn map_points(&self, dst: &mut [Point], src: &[Point]) {
        debug_assert_eq!(dst.len(), src.len());
        for (d, s) in dst.iter_mut().zip(src.iter()) {
            let x = s.x;
            let y = s.y;
            *d = Point::from_xy(self.a * x + self.c * y + self.e, self.b * x + self.d * y + self.f);
        }
    }

    /// Maps a single point.
    #[inline]
    pub fn map_point(&self, p: Point) -> Point {
        Point::from_xy(self.a * p.x + self.c * p.y + self.e, self.b * p.x + self.d * p.y + self.f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_nearly_eq(a: Transform, b: Transform) {
        for (x, y) in a.coeffs().iter().zip(b.coeffs().iter()) {
            assert!((x - y).abs() < 1e-5, "{} != {}", x, y);
        }
    }

    #[test]
    fn identity_concat_is_noop() {
        let m = Transform::from_translate(3.0, 4.0).concat(&Transform::from_scale(2.0, 2.0));
        let m2 = m.concat(&Transform::identity());
        assert_eq!(m, m2);
    }

    #[test]
    fn invert_roundtrip() {
        let m = Transform::from_rotate(0.4).concat(&Transform::from_translate(5.0, -2.0));
        let inv = m.invert().unwrap();
        assert_nearly_eq(m.concat(&inv), Transform::identity());
        assert_nearly_eq(inv.concat(&m), Transform::identity());
    }

    #[test]
    fn singular_matrix_has_no_inverse() {
        let m = Transform::from_row(1.0, 2.0, 2.0, 4.0, 0.0, 0.0);
        assert!(m.invert().is_none());
    }

    #[test]
    fn map_points_in_place() {
        let m = Transform::from_translate(1.0, 1.0);
        let mut pts = [Point::from_xy(0.0, 0.0), Point::from_xy(2.0, 2.0)];
        let src = pts;
        m.map_points(&mut pts, &src);
        assert_eq!(pts, [Point::from_xy(1.0, 1.0), Point::from_xy(3.0, 3.0)]);
    }
}
