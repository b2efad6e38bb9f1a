// Copyright 2024 Aruj Bansal
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use crate::color::PremultipliedColorU8;
use crate::shaders::Shader;
use crate::transform::Transform;

/// Delegates to another shader, composing an extra matrix onto the canvas transform first.
///
/// Used by mesh/quad tessellation to re-map a bitmap shader's texture coordinates through
/// the triangle's own basis without building a whole new bitmap shader per triangle.
pub struct ProxyShader<'a> {
    shader: &'a Shader<'a>,
    extra: Transform,
}

impl<'a> ProxyShader<'a> {
    /// Wraps `shader`, applying `extra` after the canvas transform on every `set_context`.
    pub fn new(shader: &'a Shader<'a>, extra: Transform) -> Self {
        ProxyShader { shader, extra }
    }

    pub(crate) fn is_opaque(&self) -> bool {
        self.shader.is_opaque()
    }

    pub(crate) fn set_context(&self, ctm: &Transform) -> bool {
        self.shader.set_context(&ctm.concat(&self.extra))
    }

    pub(crate) fn shade_row(&self, x: i32, y: i32, out_row: &mut [PremultipliedColorU8]) {
        self.shader.shade_row(x, y, out_row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use crate::pixmap::Pixmap;
    use crate::shaders::{BitmapShader, TileMode};

    #[test]
    fn proxy_delegates_shading() {
        let mut bm = Pixmap::new(1, 1).unwrap();
        bm.fill(Color::from_rgba(0.0, 1.0, 0.0, 1.0));
        let inner = Shader::Bitmap(BitmapShader::new(&bm, Transform::identity(), TileMode::Clamp));

        let proxy = ProxyShader::new(&inner, Transform::from_translate(5.0, 0.0));
        assert!(proxy.set_context(&Transform::identity()));

        let mut row = [PremultipliedColorU8::TRANSPARENT; 1];
        proxy.shade_row(0, 0, &mut row);
        assert_eq!(row[0], Color::from_rgba(0.0, 1.0, 0.0, 1.0).premultiply());
    }

    #[test]
    fn proxy_fails_on_singular_extra() {
        let mut bm = Pixmap::new(1, 1).unwrap();
        bm.fill(Color::BLACK);
        let inner = Shader::Bitmap(BitmapShader::new(&bm, Transform::identity(), TileMode::Clamp));

        let singular = Transform::from_row(1.0, 2.0, 2.0, 4.0, 0.0, 0.0);
        let proxy = ProxyShader::new(&inner, singular);
        assert!(!proxy.set_context(&Transform::identity()));
    }
}
