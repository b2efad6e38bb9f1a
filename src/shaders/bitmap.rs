// Copyright 2024 Aruj Bansal
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use core::cell::Cell;

use raster_path::scalar::Scalar;
use raster_path::Point;

use crate::color::PremultipliedColorU8;
use crate::pixmap::Pixmap;
use crate::shaders::TileMode;
use crate::transform::Transform;

/// Samples a [`Pixmap`] through a local matrix, with one of the three tile modes.
///
/// An empty bitmap can't be constructed (`Pixmap::new` rejects zero size), so the "empty
/// bitmap shader" edge case in the error-handling design degrades to "at least one pixel
/// sampled", not a distinct code path here.
pub struct BitmapShader<'a> {
    bitmap: &'a Pixmap,
    local_matrix: Transform,
    tile_mode: TileMode,
    inv: Cell<Option<Transform>>,
}

impl<'a> BitmapShader<'a> {
    /// Creates a new bitmap shader over `bitmap`, mapped through `local_matrix`.
    pub fn new(bitmap: &'a Pixmap, local_matrix: Transform, tile_mode: TileMode) -> Self {
        BitmapShader { bitmap, local_matrix, tile_mode, inv: Cell::new(None) }
    }

    pub(crate) fn is_opaque(&self) -> bool {
        self.bitmap.is_opaque()
    }

    pub(crate) fn set_context(&self, ctm: &Transform) -> bool {
        match ctm.concat(&self.local_matrix).invert() {
            Some(inv) => {
                self.inv.set(Some(inv));
                true
            }
            None => false,
        }
    }

    pub(crate) fn shade_row(&self, x: i32, y: i32, out_row: &mut [PremultipliedColorU8]) {
        let inv = self.inv.get().expect("shade_row called before a successful set_context");
        let coeffs = inv.coeffs();
        let step_x = coeffs[0];
        let step_y = coeffs[1];

        let start = inv.map_point(Point::from_xy(x as f32 + 0.5, y as f32 + 0.5));
        let mut sx = start.x;
        let mut sy = start.y;

        let width = self.bitmap.width() as i32;
        let height = self.bitmap.height() as i32;

        for px in out_row.iter_mut() {
            let (tx, ty) = tile(sx.floor_to_int(), sy.floor_to_int(), width, height, self.tile_mode);
            *px = self.bitmap.pixel(tx as u32, ty as u32).unwrap_or(PremultipliedColorU8::TRANSPARENT);

            sx += step_x;
            sy += step_y;
        }
    }
}

fn tile(x: i32, y: i32, width: i32, height: i32, mode: TileMode) -> (i32, i32) {
    match mode {
        TileMode::Clamp => (x.clamp(0, width - 1), y.clamp(0, height - 1)),
        TileMode::Repeat => (repeat_1d(x, width), repeat_1d(y, height)),
        TileMode::Mirror => (mirror_1d(x, width), mirror_1d(y, height)),
    }
}

fn repeat_1d(mut v: i32, span: i32) -> i32 {
    v %= span;
    v += span;
    if v >= span {
        v -= span;
    }
    v
}

fn mirror_1d(mut v: i32, span: i32) -> i32 {
    v %= 2 * span;
    if v < 0 {
        v += 2 * span;
    }
    if v >= span {
        v = 2 * span - v - 1;
    }
    v
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;

    fn checker() -> Pixmap {
        let mut pm = Pixmap::new(2, 2).unwrap();
        *pm.pixel_mut(0, 0).unwrap() = Color::from_rgba(1.0, 0.0, 0.0, 1.0).premultiply();
        *pm.pixel_mut(1, 0).unwrap() = Color::from_rgba(0.0, 0.0, 1.0, 1.0).premultiply();
        *pm.pixel_mut(0, 1).unwrap() = Color::from_rgba(0.0, 0.0, 1.0, 1.0).premultiply();
        *pm.pixel_mut(1, 1).unwrap() = Color::from_rgba(1.0, 0.0, 0.0, 1.0).premultiply();
        pm
    }

    #[test]
    fn repeat_tiles_a_checker() {
        let bm = checker();
        let shader = BitmapShader::new(&bm, Transform::identity(), TileMode::Repeat);
        assert!(shader.set_context(&Transform::identity()));

        let mut row = [PremultipliedColorU8::TRANSPARENT; 4];
        shader.shade_row(0, 0, &mut row);
        assert_eq!(row[0], bm.pixel(0, 0).unwrap());
        assert_eq!(row[1], bm.pixel(1, 0).unwrap());
        assert_eq!(row[2], bm.pixel(0, 0).unwrap());
        assert_eq!(row[3], bm.pixel(1, 0).unwrap());
    }

    #[test]
    fn clamp_extends_edge_pixel() {
        let bm = checker();
        let shader = BitmapShader::new(&bm, Transform::identity(), TileMode::Clamp);
        assert!(shader.set_context(&Transform::identity()));

        let mut row = [PremultipliedColorU8::TRANSPARENT; 4];
        shader.shade_row(0, 0, &mut row);
        for px in &row[2..] {
            assert_eq!(*px, bm.pixel(1, 0).unwrap());
        }
    }

    #[test]
    fn singular_ctm_fails_set_context() {
        let bm = checker();
        let shader = BitmapShader::new(&bm, Transform::identity(), TileMode::Clamp);
        let singular = Transform::from_row(1.0, 2.0, 2.0, 4.0, 0.0, 0.0);
        assert!(!shader.set_context(&singular));
    }

    #[test]
    fn mirror_reflects_past_the_edge() {
        assert_eq!(mirror_1d(0, 2), 0);
        assert_eq!(mirror_1d(1, 2), 1);
        assert_eq!(mirror_1d(2, 2), 1);
        assert_eq!(mirror_1d(3, 2), 0);
        assert_eq!(mirror_1d(-1, 2), 0);
    }
}
