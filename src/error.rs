// Copyright 2020 Yevhenii Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

//! The crate's one propagated error type: PNG codec failures.
//!
//! Every other recoverable condition in the rasterizer (singular transforms, degenerate
//! primitives, an empty bitmap) degrades to "draw nothing" rather than returning a `Result`.

use core::fmt;

/// An error produced by [`crate::Pixmap::decode_png`] or [`crate::Pixmap::encode_png`].
#[derive(Debug)]
#[cfg(feature = "png-format")]
pub enum Error {
    /// The image has a zero width or height, or is larger than the pixel buffer can index.
    InvalidSize,
    /// An underlying PNG decoding error.
    Decoding(png::DecodingError),
    /// An underlying PNG encoding error.
    Encoding(png::EncodingError),
}

#[cfg(feature = "png-format")]
impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidSize => write!(f, "image size is invalid"),
            Error::Decoding(e) => write!(f, "failed to decode PNG: {}", e),
            Error::Encoding(e) => write!(f, "failed to encode PNG: {}", e),
        }
    }
}

#[cfg(feature = "png-format")]
impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::InvalidSize => None,
            Error::Decoding(e) => Some(e),
            Error::Encoding(e) => Some(e),
        }
    }
}

#[cfg(feature = "png-format")]
impl From<png::DecodingError> for Error {
    fn from(e: png::DecodingError) -> Self {
        Error::Decoding(e)
    }
}

#[cfg(feature = "png-format")]
impl From<png::EncodingError> for Error {
    fn from(e: png::EncodingError) -> Self {
        Error::Encoding(e)
    }
}
