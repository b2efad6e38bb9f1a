// Copyright 2024 Aruj Bansal
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

//! The twelve Porter-Duff blend modes and the row-blit dispatch that specializes them.

use crate::color::{div_255, PremultipliedColorU8};

/// One of the twelve Porter-Duff compositing modes.
///
/// Discriminants are part of the public contract: callers may use them as table indices.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[repr(u8)]
pub enum BlendMode {
    /// Result is fully transparent, regardless of source or destination.
    Clear = 0,
    /// Result is the source, unchanged.
    Src = 1,
    /// Result is the destination, unchanged.
    Dst = 2,
    /// Standard "source over destination" alpha compositing.
    SrcOver = 3,
    /// Destination over source.
    DstOver = 4,
    /// Source, masked by destination alpha.
    SrcIn = 5,
    /// Destination, masked by source alpha.
    DstIn = 6,
    /// Source, masked by the inverse of destination alpha.
    SrcOut = 7,
    /// Destination, masked by the inverse of source alpha.
    DstOut = 8,
    /// Source where destination is opaque, destination blend where it is not.
    SrcATop = 9,
    /// Destination where source is opaque, source blend where it is not.
    DstATop = 10,
    /// Each masked by the other's inverse alpha, then summed.
    Xor = 11,
}

/// Classifies the source of a scanline, so [`effective_mode`] can pick a cheaper
/// equivalent blend mode when the simplification is sound for every pixel in the row.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum SourceClass {
    /// Per-pixel source, e.g. a shader; alpha is not known to be constant across the row.
    Shader,
    /// A constant color with alpha 255.
    ConstantOpaque,
    /// A constant color with alpha 0.
    ConstantTransparent,
    /// A constant color with some other alpha.
    ConstantGeneral,
}

impl SourceClass {
    /// Classifies a constant source color by its alpha channel.
    pub fn of_constant(color: PremultipliedColorU8) -> Self {
        match color.alpha() {
            255 => SourceClass::ConstantOpaque,
            0 => SourceClass::ConstantTransparent,
            _ => SourceClass::ConstantGeneral,
        }
    }
}

/// Applies one pixel of Porter-Duff compositing.
///
/// `src` and `dst` are premultiplied ABGR8 pixels; the result is premultiplied too.
pub fn blend_pixel(mode: BlendMode, src: PremultipliedColorU8, dst: PremultipliedColorU8) -> PremultipliedColorU8 {
    let (sa, sr, sg, sb) = (src.alpha() as i32, src.red() as i32, src.green() as i32, src.blue() as i32);
    let (da, dr, dg, db) = (dst.alpha() as i32, dst.red() as i32, dst.green() as i32, dst.blue() as i32);

    let d255 = |p: i32| div_255(p as u32) as i32;

    let (a, r, g, b) = match mode {
        BlendMode::Clear => (0, 0, 0, 0),
        BlendMode::Src => (sa, sr, sg, sb),
        BlendMode::Dst => (da, dr, dg, db),
        BlendMode::SrcOver => (
            sa + d255((255 - sa) * da),
            sr + d255((255 - sa) * dr),
            sg + d255((255 - sa) * dg),
            sb + d255((255 - sa) * db),
        ),
        BlendMode::DstOver => (
            da + d255((255 - da) * sa),
            dr + d255((255 - da) * sr),
            dg + d255((255 - da) * sg),
            db + d255((255 - da) * sb),
        ),
        BlendMode::SrcIn => (d255(sa * da), d255(sr * da), d255(sg * da), d255(sb * da)),
        BlendMode::DstIn => (d255(da * sa), d255(dr * sa), d255(dg * sa), d255(db * sa)),
        BlendMode::SrcOut => (
            d255((255 - da) * sa),
            d255((255 - da) * sr),
            d255((255 - da) * sg),
            d255((255 - da) * sb),
        ),
        BlendMode::DstOut => (
            d255((255 - sa) * da),
            d255((255 - sa) * dr),
            d255((255 - sa) * dg),
            d255((255 - sa) * db),
        ),
        BlendMode::SrcATop => (
            d255((255 - sa) * da) + d255(sa * da),
            d255((255 - sa) * dr) + d255(sr * da),
            d255((255 - sa) * dg) + d255(sg * da),
            d255((255 - sa) * db) + d255(sb * da),
        ),
        BlendMode::DstATop => (
            d255((255 - da) * sa) + d255(da * sa),
            d255((255 - da) * sr) + d255(dr * sa),
            d255((255 - da) * sg) + d255(dg * sa),
            d255((255 - da) * sb) + d255(db * sa),
        ),
        BlendMode::Xor => (
            d255((255 - da) * sa) + d255((255 - sa) * da),
            d255((255 - da) * sr) + d255((255 - sa) * dr),
            d255((255 - da) * sg) + d255((255 - sa) * dg),
            d255((255 - da) * sb) + d255((255 - sa) * db),
        ),
    };

    PremultipliedColorU8::from_rgba_unchecked(r as u8, g as u8, b as u8, a as u8)
}

/// Replaces `mode` with a cheaper, equivalent mode for a fully opaque constant source.
pub fn opaque_src_mode(mode: BlendMode) -> BlendMode {
    match mode {
        BlendMode::SrcOver => BlendMode::Src,
        BlendMode::DstIn => BlendMode::Dst,
        BlendMode::DstOut => BlendMode::Clear,
        BlendMode::SrcATop => BlendMode::SrcIn,
        BlendMode::Xor => BlendMode::SrcOut,
        other => other,
    }
}

/// Replaces `mode` with a cheaper, equivalent mode for a fully transparent constant source.
pub fn zero_alpha_src_mode(mode: BlendMode) -> BlendMode {
    match mode {
        BlendMode::Src => BlendMode::Clear,
        BlendMode::SrcOver => BlendMode::Dst,
        BlendMode::DstOver => BlendMode::Dst,
        BlendMode::SrcIn => BlendMode::Clear,
        BlendMode::DstIn => BlendMode::Clear,
        BlendMode::SrcOut => BlendMode::Clear,
        BlendMode::DstOut => BlendMode::Dst,
        BlendMode::SrcATop => BlendMode::Dst,
        BlendMode::DstATop => BlendMode::Clear,
        BlendMode::Xor => BlendMode::Dst,
        other => other,
    }
}

/// The mode a row-blit should actually run, given the source classification.
///
/// `Shader` rows never simplify: per-pixel alpha isn't known until each pixel is sampled,
/// so the optimization would be unsound applied uniformly across the row.
pub fn effective_mode(mode: BlendMode, class: SourceClass) -> BlendMode {
    match class {
        SourceClass::ConstantOpaque => opaque_src_mode(mode),
        SourceClass::ConstantTransparent => zero_alpha_src_mode(mode),
        SourceClass::ConstantGeneral | SourceClass::Shader => mode,
    }
}

/// A per-row source: either a constant color, or one sample per destination pixel.
pub enum SourceRow<'a> {
    /// The same color for every pixel in the span.
    Constant(PremultipliedColorU8),
    /// One already-shaded color per destination pixel.
    Shader(&'a [PremultipliedColorU8]),
}

/// Blends `source` into `dst`, picking the row's effective mode once.
///
/// `dst.len()` must equal `source`'s length when it is [`SourceRow::Shader`].
pub fn blend_row(mode: BlendMode, source: SourceRow<'_>, dst: &mut [PremultipliedColorU8]) {
    match source {
        SourceRow::Constant(color) => {
            let mode = effective_mode(mode, SourceClass::of_constant(color));
            for px in dst.iter_mut() {
                *px = blend_pixel(mode, color, *px);
            }
        }
        SourceRow::Shader(src_row) => {
            debug_assert_eq!(src_row.len(), dst.len());
            for (px, &src) in dst.iter_mut().zip(src_row.iter()) {
                *px = blend_pixel(mode, src, *px);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opaque_red() -> PremultipliedColorU8 {
        PremultipliedColorU8::from_rgba_unchecked(255, 0, 0, 255)
    }

    fn opaque_blue() -> PremultipliedColorU8 {
        PremultipliedColorU8::from_rgba_unchecked(0, 0, 255, 255)
    }

    #[test]
    fn src_over_opaque_src_equals_src() {
        let out = blend_pixel(BlendMode::SrcOver, opaque_red(), opaque_blue());
        assert_eq!(out, opaque_red());
    }

    #[test]
    fn dst_is_always_a_no_op() {
        let dst = opaque_blue();
        assert_eq!(blend_pixel(BlendMode::Dst, opaque_red(), dst), dst);
    }

    #[test]
    fn clear_is_always_transparent() {
        assert_eq!(blend_pixel(BlendMode::Clear, opaque_red(), opaque_blue()), PremultipliedColorU8::TRANSPARENT);
    }

    #[test]
    fn half_alpha_src_over() {
        let src = PremultipliedColorU8::from_rgba_unchecked(128, 0, 0, 128);
        let dst = PremultipliedColorU8::from_rgba_unchecked(0, 0, 128, 255);
        let out = blend_pixel(BlendMode::SrcOver, src, dst);
        assert_eq!(out.alpha(), 255);
        assert!((out.red() as i32 - 128).abs() <= 1);
    }

    #[test]
    fn opaque_replacement_table() {
        assert_eq!(opaque_src_mode(BlendMode::SrcOver), BlendMode::Src);
        assert_eq!(opaque_src_mode(BlendMode::DstIn), BlendMode::Dst);
        assert_eq!(opaque_src_mode(BlendMode::DstOut), BlendMode::Clear);
        assert_eq!(opaque_src_mode(BlendMode::SrcATop), BlendMode::SrcIn);
        assert_eq!(opaque_src_mode(BlendMode::Xor), BlendMode::SrcOut);
        assert_eq!(opaque_src_mode(BlendMode::DstOver), BlendMode::DstOver);
    }

    #[test]
    fn zero_alpha_replacement_table() {
        assert_eq!(zero_alpha_src_mode(BlendMode::Src), BlendMode::Clear);
        assert_eq!(zero_alpha_src_mode(BlendMode::SrcOver), BlendMode::Dst);
        assert_eq!(zero_alpha_src_mode(BlendMode::DstOut), BlendMode::Dst);
        assert_eq!(zero_alpha_src_mode(BlendMode::DstATop), BlendMode::Clear);
    }

    #[test]
    fn shader_rows_never_use_the_constant_tables() {
        assert_eq!(effective_mode(BlendMode::SrcOver, SourceClass::Shader), BlendMode::SrcOver);
    }

    #[test]
    fn blend_row_constant_applies_simplification() {
        let mut row = [opaque_blue(); 3];
        blend_row(BlendMode::SrcOver, SourceRow::Constant(opaque_red()), &mut row);
        assert!(row.iter().all(|&p| p == opaque_red()));
    }
}
