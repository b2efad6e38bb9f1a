// Copyright 2024 Aruj Bansal
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use core::cell::Cell;

use raster_path::Point;

use crate::color::{Color, PremultipliedColorU8};
use crate::transform::Transform;

/// Interpolates three vertex colors barycentrically across a triangle.
pub struct TriangleGradientShader {
    unit_mapper: Transform,
    color0: Color,
    diff1: Color,
    diff2: Color,
    inv: Cell<Option<Transform>>,
}

impl TriangleGradientShader {
    /// Builds a shader over the triangle `verts`, with one color per vertex.
    pub fn new(verts: [Point; 3], colors: [Color; 3]) -> Self {
        let vec_u = verts[1] - verts[0];
        let vec_v = verts[2] - verts[0];
        let unit_mapper = Transform::from_row(vec_u.x, vec_u.y, vec_v.x, vec_v.y, verts[0].x, verts[0].y);

        TriangleGradientShader {
            unit_mapper,
            color0: colors[0],
            diff1: colors[1] - colors[0],
            diff2: colors[2] - colors[0],
            inv: Cell::new(None),
        }
    }

    pub(crate) fn is_opaque(&self) -> bool {
        false
    }

    pub(crate) fn set_context(&self, ctm: &Transform) -> bool {
        match ctm.concat(&self.unit_mapper).invert() {
            Some(inv) => {
                self.inv.set(Some(inv));
                true
            }
            None => false,
        }
    }

    pub(crate) fn shade_row(&self, x: i32, y: i32, out_row: &mut [PremultipliedColorU8]) {
        if out_row.is_empty() {
            return;
        }

        let inv = self.inv.get().expect("shade_row called before a successful set_context");
        let p = inv.map_point(Point::from_xy(x as f32 + 0.5, y as f32 + 0.5));
        let coeffs = inv.coeffs();

        // Constant per-step delta: the row only moves along the inverse's x-basis vector.
        let diff_color = self.diff1 * coeffs[0] + self.diff2 * coeffs[1];

        let mut cur_color = self.diff1 * p.x + self.diff2 * p.y + self.color0;

        let last = out_row.len() - 1;
        out_row[0] = cur_color.premultiply();
        cur_color += diff_color;

        for px in out_row.iter_mut().take(last).skip(1) {
            *px = cur_color.premultiply_unchecked();
            cur_color += diff_color;
        }

        if last > 0 {
            out_row[last] = cur_color.premultiply();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_pixels_match_vertex_colors() {
        let verts = [Point::from_xy(0.0, 0.0), Point::from_xy(10.0, 0.0), Point::from_xy(0.0, 10.0)];
        let colors = [
            Color::from_rgba(1.0, 0.0, 0.0, 1.0),
            Color::from_rgba(0.0, 1.0, 0.0, 1.0),
            Color::from_rgba(0.0, 0.0, 1.0, 1.0),
        ];
        let shader = TriangleGradientShader::new(verts, colors);
        assert!(shader.set_context(&Transform::identity()));

        let mut row = [PremultipliedColorU8::TRANSPARENT; 1];
        shader.shade_row(0, 0, &mut row);
        assert_eq!(row[0], colors[0].premultiply());
    }

    #[test]
    fn single_pixel_row_still_clamps() {
        let verts = [Point::from_xy(0.0, 0.0), Point::from_xy(10.0, 0.0), Point::from_xy(0.0, 10.0)];
        let colors = [Color::BLACK, Color::WHITE, Color::BLACK];
        let shader = TriangleGradientShader::new(verts, colors);
        assert!(shader.set_context(&Transform::identity()));
        let mut row = [PremultipliedColorU8::TRANSPARENT; 1];
        shader.shade_row(0, 0, &mut row);
        assert_eq!(row[0], Color::BLACK.premultiply());
    }
}
