// Copyright 2024 Aruj Bansal
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use core::cell::Cell;

use alloc::vec::Vec;

use raster_path::scalar::Scalar;
use raster_path::Point;

use crate::color::{Color, PremultipliedColorU8};
use crate::shaders::TileMode;
use crate::transform::Transform;

/// Interpolates a sequence of colors along the `P0 -> P1` direction.
pub struct LinearGradientShader {
    line_mapper: Transform,
    tile_mode: TileMode,
    colors: Vec<Color>,
    colors_diff: Vec<Color>,
    premul_first: PremultipliedColorU8,
    premul_last: PremultipliedColorU8,
    inv: Cell<Option<Transform>>,
}

impl LinearGradientShader {
    /// Builds a shader over `colors` (at least one) spaced evenly from `p0` to `p1`.
    ///
    /// Panics if `colors` is empty — callers are expected to reject that before
    /// constructing a shader, the same contract the teacher's convex-fill argument
    /// validation follows.
    pub fn new(p0: Point, p1: Point, colors: &[Color], tile_mode: TileMode) -> Self {
        assert!(!colors.is_empty(), "a linear gradient needs at least one color");

        let dx = p1.x - p0.x;
        let dy = p1.y - p0.y;
        let line_mapper = Transform::from_row(dx, dy, -dy, dx, p0.x, p0.y);

        let premul_first = colors[0].premultiply();
        let premul_last = colors[colors.len() - 1].premultiply();

        let mut diffs = Vec::with_capacity(colors.len().saturating_sub(1));
        for pair in colors.windows(2) {
            diffs.push(pair[1] - pair[0]);
        }

        LinearGradientShader {
            line_mapper,
            tile_mode,
            colors: colors.to_vec(),
            colors_diff: diffs,
            premul_first,
            premul_last,
            inv: Cell::new(None),
        }
    }

    pub(crate) fn is_opaque(&self) -> bool {
        false
    }

    pub(crate) fn set_context(&self, ctm: &Transform) -> bool {
        match ctm.concat(&self.line_mapper).invert() {
            Some(inv) => {
                self.inv.set(Some(inv));
                true
            }
            None => false,
        }
    }

    pub(crate) fn shade_row(&self, x: i32, y: i32, out_row: &mut [PremultipliedColorU8]) {
        let n = self.colors.len();
        if n == 1 {
            for px in out_row.iter_mut() {
                *px = self.premul_first;
            }
            return;
        }

        let inv = self.inv.get().expect("shade_row called before a successful set_context");
        let coeffs = inv.coeffs();
        let step = coeffs[0];

        let mut u = coeffs[0] * (x as f32 + 0.5) + coeffs[2] * (y as f32 + 0.5) + coeffs[4];

        for px in out_row.iter_mut() {
            *px = self.sample(u, n);
            u += step;
        }
    }

    fn sample(&self, u: f32, n: usize) -> PremultipliedColorU8 {
        let clamp = self.tile_mode == TileMode::Clamp;
        if clamp && u <= 0.0 {
            return self.premul_first;
        }
        if clamp && u >= 1.0 {
            return self.premul_last;
        }

        let (index, frac) = if u <= 0.0 || u >= 1.0 {
            match self.tile_mode {
                TileMode::Repeat => tile_repeat(u, n),
                TileMode::Mirror => tile_mirror(u, n),
                TileMode::Clamp => unreachable!("clamp short-circuits above"),
            }
        } else if n == 2 {
            (0, u)
        } else {
            let scaled = u * (n - 1) as f32;
            let floored = scaled.floor_to_int();
            (floored, scaled - floored as f32)
        };

        let color = self.colors[index as usize] + self.colors_diff[index as usize] * frac;
        color.premultiply()
    }
}

fn tile_repeat(u: f32, n: usize) -> (i32, f32) {
    let u = u - u.floor();
    let scaled = u * (n - 1) as f32;
    let floored = scaled.floor_to_int();
    (floored.abs(), scaled - floored as f32)
}

fn tile_mirror(u: f32, n: usize) -> (i32, f32) {
    let mut u = u * 0.5;
    u -= u.floor();
    if u > 0.5 {
        u = 1.0 - u;
    }
    u *= 2.0;

    let scaled = u * (n - 1) as f32;
    let floored = scaled.floor_to_int();
    (floored.abs(), scaled - floored as f32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_color_is_constant() {
        let shader = LinearGradientShader::new(
            Point::from_xy(0.0, 0.0),
            Point::from_xy(10.0, 0.0),
            &[Color::from_rgba(1.0, 0.0, 0.0, 1.0)],
            TileMode::Clamp,
        );
        assert!(shader.set_context(&Transform::identity()));
        let mut row = [PremultipliedColorU8::TRANSPARENT; 3];
        shader.shade_row(0, 0, &mut row);
        let red = Color::from_rgba(1.0, 0.0, 0.0, 1.0).premultiply();
        assert!(row.iter().all(|&p| p == red));
    }

    #[test]
    fn clamp_endpoints_match_scenario_s3() {
        let colors = [Color::from_rgba(1.0, 0.0, 0.0, 1.0), Color::from_rgba(0.0, 0.0, 1.0, 1.0)];
        let shader = LinearGradientShader::new(
            Point::from_xy(0.0, 0.0),
            Point::from_xy(10.0, 0.0),
            &colors,
            TileMode::Clamp,
        );
        assert!(shader.set_context(&Transform::identity()));

        let mut row = [PremultipliedColorU8::TRANSPARENT; 10];
        shader.shade_row(0, 5, &mut row);

        assert_eq!(row[0], colors[0].premultiply());
        assert_eq!(row[9], colors[1].premultiply());
        assert!((row[5].red() as i32 - 128).abs() <= 2);
        assert!((row[5].blue() as i32 - 128).abs() <= 2);
    }
}
