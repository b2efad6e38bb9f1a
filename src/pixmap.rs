// Copyright 2006 The Android Open Source Project
// Copyright 2020 Yevhenii Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use alloc::vec;
use alloc::vec::Vec;

use crate::color::{Color, PremultipliedColorU8};

#[cfg(feature = "png-format")]
use crate::Error;

/// A container that owns a buffer of premultiplied pixels.
///
/// Rows are tightly packed: width == stride. A freshly allocated pixmap is transparent
/// black, i.e. every pixel is `(0, 0, 0, 0)`.
#[derive(Clone, PartialEq, Debug)]
pub struct Pixmap {
    data: Vec<PremultipliedColorU8>,
    width: u32,
    height: u32,
}

impl Pixmap {
    /// Allocates a new, transparent-black pixmap.
    ///
    /// Returns `None` for a zero width or height, or if `width * height` overflows `usize`.
    pub fn new(width: u32, height: u32) -> Option<Self> {
        if width == 0 || height == 0 {
            return None;
        }
        let len = (width as usize).checked_mul(height as usize)?;
        Some(Pixmap { data: vec![PremultipliedColorU8::TRANSPARENT; len], width, height })
    }

    /// Pixmap width, in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Pixmap height, in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Row stride, in pixels. Always equal to `width`.
    #[inline]
    pub fn stride(&self) -> u32 {
        self.width
    }

    /// Returns `true` if every pixel has alpha 255.
    pub fn is_opaque(&self) -> bool {
        self.data.iter().all(|p| p.is_opaque())
    }

    /// Fills the whole pixmap with a premultiplied color, ignoring any blend mode.
    pub fn fill(&mut self, color: Color) {
        let p = color.premultiply();
        for px in self.data.iter_mut() {
            *px = p;
        }
    }

    /// Returns the pixel at `(x, y)`, or `None` if out of bounds.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> Option<PremultipliedColorU8> {
        self.index(x, y).map(|i| self.data[i])
    }

    /// Returns a mutable reference to the pixel at `(x, y)`, or `None` if out of bounds.
    #[inline]
    pub fn pixel_mut(&mut self, x: u32, y: u32) -> Option<&mut PremultipliedColorU8> {
        let i = self.index(x, y)?;
        Some(&mut self.data[i])
    }

    /// Returns the full row buffer for `y`, or `None` if `y` is out of bounds.
    #[inline]
    pub fn row(&self, y: u32) -> Option<&[PremultipliedColorU8]> {
        if y >= self.height {
            return None;
        }
        let start = y as usize * self.width as usize;
        Some(&self.data[start..start + self.width as usize])
    }

    /// Returns the full mutable row buffer for `y`, or `None` if `y` is out of bounds.
    #[inline]
    pub fn row_mut(&mut self, y: u32) -> Option<&mut [PremultipliedColorU8]> {
        if y >= self.height {
            return None;
        }
        let start = y as usize * self.width as usize;
        let w = self.width as usize;
        Some(&mut self.data[start..start + w])
    }

    /// Returns all pixels as a flat, row-major slice.
    #[inline]
    pub fn pixels(&self) -> &[PremultipliedColorU8] {
        &self.data
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }
}

#[cfg(feature = "png-format")]
impl Pixmap {
    /// Decodes PNG data into a pixmap, premultiplying alpha on the way in.
    ///
    /// Only 8-bit-depth, non-indexed images are supported.
    pub fn decode_png(data: &[u8]) -> Result<Self, Error> {
        let decoder = png::Decoder::new(data);
        let (info, mut reader) = decoder.read_info()?;

        if info.bit_depth != png::BitDepth::Eight {
            return Err(Error::InvalidSize);
        }

        let width = info.width;
        let height = info.height;
        let color_type = info.color_type;

        let mut buf = vec![0u8; info.buffer_size()];
        reader.next_frame(&mut buf)?;

        let rgba = expand_to_rgba8(&buf, color_type)?;

        let mut pixmap = Pixmap::new(width, height).ok_or(Error::InvalidSize)?;
        for (px, chunk) in pixmap.data.iter_mut().zip(rgba.chunks_exact(4)) {
            let c = Color::from_rgba(
                chunk[0] as f32 / 255.0,
                chunk[1] as f32 / 255.0,
                chunk[2] as f32 / 255.0,
                chunk[3] as f32 / 255.0,
            );
            *px = c.premultiply();
        }

        Ok(pixmap)
    }

    /// Encodes the pixmap as PNG data, demultiplying alpha on the way out.
    pub fn encode_png(&self) -> Result<Vec<u8>, Error> {
        let mut raw = Vec::with_capacity(self.data.len() * 4);
        for px in &self.data {
            let (r, g, b, a) = px.demultiply();
            raw.push(r);
            raw.push(g);
            raw.push(b);
            raw.push(a);
        }

        let mut out = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut out, self.width, self.height);
            encoder.set_color(png::ColorType::RGBA);
            encoder.set_depth(png::BitDepth::Eight);
            let mut writer = encoder.write_header()?;
            writer.write_image_data(&raw)?;
        }
        Ok(out)
    }
}

#[cfg(feature = "png-format")]
fn expand_to_rgba8(data: &[u8], color_type: png::ColorType) -> Result<Vec<u8>, Error> {
    match color_type {
        png::ColorType::RGBA => Ok(data.to_vec()),
        png::ColorType::RGB => {
            let mut out = Vec::with_capacity(data.len() / 3 * 4);
            for rgb in data.chunks_exact(3) {
                out.extend_from_slice(rgb);
                out.push(255);
            }
            Ok(out)
        }
        png::ColorType::Grayscale => {
            let mut out = Vec::with_capacity(data.len() * 4);
            for &gray in data {
                out.extend_from_slice(&[gray, gray, gray, 255]);
            }
            Ok(out)
        }
        png::ColorType::GrayscaleAlpha => {
            let mut out = Vec::with_capacity(data.len() * 2);
            for ga in data.chunks_exact(2) {
                out.extend_from_slice(&[ga[0], ga[0], ga[0], ga[1]]);
            }
            Ok(out)
        }
        png::ColorType::Indexed => Err(Error::InvalidSize),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_rejects_zero_size() {
        assert!(Pixmap::new(0, 10).is_none());
        assert!(Pixmap::new(10, 0).is_none());
    }

    #[test]
    fn fresh_pixmap_is_transparent() {
        let pm = Pixmap::new(4, 4).unwrap();
        assert!(!pm.is_opaque());
        assert_eq!(pm.pixel(0, 0).unwrap(), PremultipliedColorU8::TRANSPARENT);
    }

    #[test]
    fn fill_makes_opaque() {
        let mut pm = Pixmap::new(2, 2).unwrap();
        pm.fill(Color::BLACK);
        assert!(pm.is_opaque());
        assert_eq!(pm.pixel(1, 1).unwrap(), Color::BLACK.premultiply());
    }

    #[test]
    fn out_of_bounds_is_none() {
        let pm = Pixmap::new(2, 2).unwrap();
        assert!(pm.pixel(2, 0).is_none());
        assert!(pm.pixel(0, 2).is_none());
    }

    #[test]
    fn row_mut_writes_through() {
        let mut pm = Pixmap::new(3, 2).unwrap();
        for px in pm.row_mut(1).unwrap() {
            *px = Color::WHITE.premultiply();
        }
        assert_eq!(pm.pixel(0, 0).unwrap(), PremultipliedColorU8::TRANSPARENT);
        assert_eq!(pm.pixel(0, 1).unwrap(), Color::WHITE.premultiply());
    }
}
