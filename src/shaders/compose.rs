// Copyright 2024 Aruj Bansal
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use arrayvec::ArrayVec;

use crate::color::{div_255, PremultipliedColorU8};
use crate::shaders::Shader;
use crate::transform::Transform;

/// Row width above which [`ComposeShader::shade_row`] falls back to heap-allocated
/// scratch buffers instead of a stack array.
const STACK_ROW_LEN: usize = 256;

/// Multiplies two shaders channel-by-channel, e.g. a triangle gradient modulated by a
/// texture-mapped bitmap for `draw_mesh` triangles that carry both colors and texcoords.
pub struct ComposeShader<'a> {
    a: &'a Shader<'a>,
    b: &'a Shader<'a>,
}

impl<'a> ComposeShader<'a> {
    /// Composes `a` and `b`; both must bind successfully for the compose to shade.
    pub fn new(a: &'a Shader<'a>, b: &'a Shader<'a>) -> Self {
        ComposeShader { a, b }
    }

    pub(crate) fn is_opaque(&self) -> bool {
        self.a.is_opaque() && self.b.is_opaque()
    }

    pub(crate) fn set_context(&self, ctm: &Transform) -> bool {
        self.a.set_context(ctm) && self.b.set_context(ctm)
    }

    pub(crate) fn shade_row(&self, x: i32, y: i32, out_row: &mut [PremultipliedColorU8]) {
        let mut a_row: ArrayVec<PremultipliedColorU8, STACK_ROW_LEN> = ArrayVec::new();
        let mut b_row: ArrayVec<PremultipliedColorU8, STACK_ROW_LEN> = ArrayVec::new();

        if out_row.len() <= STACK_ROW_LEN {
            a_row.extend(core::iter::repeat(PremultipliedColorU8::TRANSPARENT).take(out_row.len()));
            b_row.extend(core::iter::repeat(PremultipliedColorU8::TRANSPARENT).take(out_row.len()));

            self.a.shade_row(x, y, &mut a_row);
            self.b.shade_row(x, y, &mut b_row);

            for ((dst, &sa), &sb) in out_row.iter_mut().zip(a_row.iter()).zip(b_row.iter()) {
                *dst = multiply(sa, sb);
            }
        } else {
            let mut a_vec = alloc::vec![PremultipliedColorU8::TRANSPARENT; out_row.len()];
            let mut b_vec = alloc::vec![PremultipliedColorU8::TRANSPARENT; out_row.len()];
            self.a.shade_row(x, y, &mut a_vec);
            self.b.shade_row(x, y, &mut b_vec);

            for ((dst, &sa), &sb) in out_row.iter_mut().zip(a_vec.iter()).zip(b_vec.iter()) {
                *dst = multiply(sa, sb);
            }
        }
    }
}

fn multiply(a: PremultipliedColorU8, b: PremultipliedColorU8) -> PremultipliedColorU8 {
    PremultipliedColorU8::from_rgba_unchecked(
        div_255(a.red() as u32 * b.red() as u32) as u8,
        div_255(a.green() as u32 * b.green() as u32) as u8,
        div_255(a.blue() as u32 * b.blue() as u32) as u8,
        div_255(a.alpha() as u32 * b.alpha() as u32) as u8,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use crate::pixmap::Pixmap;
    use crate::shaders::{BitmapShader, TileMode};
    use crate::transform::Transform as T;

    #[test]
    fn compose_multiplies_channels() {
        let mut white = Pixmap::new(1, 1).unwrap();
        white.fill(Color::WHITE);
        let mut half_red = Pixmap::new(1, 1).unwrap();
        *half_red.pixel_mut(0, 0).unwrap() = Color::from_rgba(1.0, 0.0, 0.0, 1.0).premultiply();

        let a = Shader::Bitmap(BitmapShader::new(&white, T::identity(), TileMode::Clamp));
        let b = Shader::Bitmap(BitmapShader::new(&half_red, T::identity(), TileMode::Clamp));

        let compose = ComposeShader::new(&a, &b);
        assert!(compose.set_context(&T::identity()));

        let mut row = [PremultipliedColorU8::TRANSPARENT; 1];
        compose.shade_row(0, 0, &mut row);
        assert_eq!(row[0], Color::from_rgba(1.0, 0.0, 0.0, 1.0).premultiply());
    }

    #[test]
    fn compose_is_opaque_only_if_both_are() {
        let mut opaque = Pixmap::new(1, 1).unwrap();
        opaque.fill(Color::BLACK);
        let mut transparent = Pixmap::new(1, 1).unwrap();
        transparent.fill(Color::TRANSPARENT);

        let a = Shader::Bitmap(BitmapShader::new(&opaque, T::identity(), TileMode::Clamp));
        let b = Shader::Bitmap(BitmapShader::new(&transparent, T::identity(), TileMode::Clamp));
        assert!(!ComposeShader::new(&a, &b).is_opaque());
    }
}
