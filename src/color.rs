// Copyright 2006 The Android Open Source Project
// Copyright 2020 Yevhenii Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use core::ops::{Add, AddAssign, Mul, Sub, SubAssign};

/// 8-bit type for an alpha value. 255 is 100% opaque, zero is 100% transparent.
pub type AlphaU8 = u8;

/// An unpremultiplied RGBA color, holding four single-precision floating point
/// components in (nominally) the `0..=1` range.
///
/// Unlike `PremultipliedColorU8`, components are not clamped: gradient shaders build
/// `Color` deltas (`c1 - c0`) that are legitimately negative, and interpolation can walk
/// a value outside `0..=1` before it gets clamped at [`Color::premultiply`] time.
#[derive(Copy, Clone, PartialEq, Default, Debug)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    /// A transparent color.
    pub const TRANSPARENT: Color = Color { r: 0.0, g: 0.0, b: 0.0, a: 0.0 };
    /// An opaque black color.
    pub const BLACK: Color = Color { r: 0.0, g: 0.0, b: 0.0, a: 1.0 };
    /// An opaque white color.
    pub const WHITE: Color = Color { r: 1.0, g: 1.0, b: 1.0, a: 1.0 };

    /// Creates a new color from four components.
    #[inline]
    pub fn from_rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Color { r, g, b, a }
    }

    /// Returns `true` if alpha is exactly `1.0`.
    #[inline]
    pub fn is_opaque(&self) -> bool {
        self.a == 1.0
    }

    /// Converts into a premultiplied, 8-bit-per-channel pixel.
    ///
    /// Components are clamped to `0..=1` before scaling, per the numeric-safety rule in
    /// the gradient shaders: interior gradient samples may skip clamping, but anything
    /// that reaches a pixel must not.
    #[inline]
    pub fn premultiply(&self) -> PremultipliedColorU8 {
        let a = self.a.clamp(0.0, 1.0);
        let r = (self.r * self.a).clamp(0.0, 1.0);
        let g = (self.g * self.a).clamp(0.0, 1.0);
        let b = (self.b * self.a).clamp(0.0, 1.0);
        PremultipliedColorU8::from_rgba_unchecked(
            unit_to_u8(r),
            unit_to_u8(g),
            unit_to_u8(b),
            unit_to_u8(a),
        )
    }

    /// Converts into a premultiplied pixel without clamping.
    ///
    /// Only safe to use for interior gradient/shader samples that are already known to
    /// lie within range; see [`Color::premultiply`] for the checked version.
    #[inline]
    pub fn premultiply_unchecked(&self) -> PremultipliedColorU8 {
        PremultipliedColorU8::from_rgba_unchecked(
            unit_to_u8(self.r * self.a),
            unit_to_u8(self.g * self.a),
            unit_to_u8(self.b * self.a),
            unit_to_u8(self.a),
        )
    }
}

impl Add for Color {
    type Output = Color;

    #[inline]
    fn add(self, other: Color) -> Color {
        Color::from_rgba(self.r + other.r, self.g + other.g, self.b + other.b, self.a + other.a)
    }
}

impl AddAssign for Color {
    #[inline]
    fn add_assign(&mut self, other: Color) {
        self.r += other.r;
        self.g += other.g;
        self.b += other.b;
        self.a += other.a;
    }
}

impl Sub for Color {
    type Output = Color;

    #[inline]
    fn sub(self, other: Color) -> Color {
        Color::from_rgba(self.r - other.r, self.g - other.g, self.b - other.b, self.a - other.a)
    }
}

impl SubAssign for Color {
    #[inline]
    fn sub_assign(&mut self, other: Color) {
        self.r -= other.r;
        self.g -= other.g;
        self.b -= other.b;
        self.a -= other.a;
    }
}

impl Mul<f32> for Color {
    type Output = Color;

    #[inline]
    fn mul(self, s: f32) -> Color {
        Color::from_rgba(self.r * s, self.g * s, self.b * s, self.a * s)
    }
}

impl Mul<Color> for f32 {
    type Output = Color;

    #[inline]
    fn mul(self, c: Color) -> Color {
        c * self
    }
}

#[inline]
fn unit_to_u8(v: f32) -> u8 {
    // Rounds half away from zero, matching the rasterizer's pixel-center convention.
    (v * 255.0 + 0.5) as u8
}

/// A 32-bit premultiplied RGBA pixel value.
///
/// Byteorder: ABGR in memory (little-endian `u32`), i.e. red in the lowest byte.
///
/// # Invariant
///
/// Each of R, G, B is always <= A.
#[repr(transparent)]
#[derive(Copy, Clone, PartialEq, Eq)]
pub struct PremultipliedColorU8(u32);

impl PremultipliedColorU8 {
    /// A fully transparent pixel.
    pub const TRANSPARENT: Self = PremultipliedColorU8::from_rgba_unchecked(0, 0, 0, 0);

    /// Creates a new premultiplied pixel from already-premultiplied 8-bit channels.
    ///
    /// The caller is responsible for the R/G/B <= A invariant.
    #[inline]
    pub const fn from_rgba_unchecked(r: u8, g: u8, b: u8, a: u8) -> Self {
        PremultipliedColorU8(
            (r as u32) | ((g as u32) << 8) | ((b as u32) << 16) | ((a as u32) << 24),
        )
    }

    /// Red channel (`<= alpha()`).
    #[inline]
    pub const fn red(self) -> u8 {
        (self.0 & 0xFF) as u8
    }

    /// Green channel (`<= alpha()`).
    #[inline]
    pub const fn green(self) -> u8 {
        ((self.0 >> 8) & 0xFF) as u8
    }

    /// Blue channel (`<= alpha()`).
    #[inline]
    pub const fn blue(self) -> u8 {
        ((self.0 >> 16) & 0xFF) as u8
    }

    /// Alpha channel.
    #[inline]
    pub const fn alpha(self) -> u8 {
        ((self.0 >> 24) & 0xFF) as u8
    }

    /// Returns `true` if alpha is 255.
    #[inline]
    pub fn is_opaque(&self) -> bool {
        self.alpha() == 255
    }

    /// Returns the raw packed value.
    #[inline]
    pub const fn get(self) -> u32 {
        self.0
    }

    /// Reverses premultiplication, for PNG export.
    ///
    /// Division by alpha is exact only for a handful of input values; this matches the
    /// rounding the codec tests expect rather than any stronger guarantee.
    pub fn demultiply(self) -> (u8, u8, u8, u8) {
        let a = self.alpha();
        if a == 255 {
            return (self.red(), self.green(), self.blue(), a);
        }
        if a == 0 {
            return (0, 0, 0, 0);
        }

        let scale = 255.0 / a as f32;
        let unmul = |c: u8| ((c as f32 * scale) + 0.5) as u8;
        (unmul(self.red()), unmul(self.green()), unmul(self.blue()), a)
    }
}

impl core::fmt::Debug for PremultipliedColorU8 {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PremultipliedColorU8")
            .field("r", &self.red())
            .field("g", &self.green())
            .field("b", &self.blue())
            .field("a", &self.alpha())
            .finish()
    }
}

/// The fast integer approximation of `x / 255`, exact for all `x` in `0..=65535`.
#[inline]
pub(crate) fn div_255(prod: u32) -> u32 {
    (prod + 128) * 257 >> 16
}
