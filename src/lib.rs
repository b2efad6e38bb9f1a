// Copyright 2006 The Android Open Source Project
// Copyright 2020 Yevhenii Reizner
// Copyright 2024 Aruj Bansal
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

//! A tiny CPU software rasterizer with Porter-Duff compositing.
//!
//! [`Canvas`] owns a destination [`Pixmap`] and a matrix stack, and turns convex polygons,
//! [`raster_path::Path`]s, and meshes into blended pixels, using one of the library's
//! [`Shader`](shaders::Shader)s or a plain [`Color`] as the pixel source.
//!
//! ```
//! use raster_core::{BlendMode, Canvas, Color, Paint, Pixmap};
//! use raster_path::Rect;
//!
//! let mut pixmap = Pixmap::new(100, 100).unwrap();
//! let mut canvas = Canvas::new(&mut pixmap);
//! canvas.clear(Color::WHITE);
//!
//! let rect = Rect::from_xywh(10.0, 10.0, 50.0, 50.0).unwrap();
//! let paint = Paint::from_color(Color::from_rgba(1.0, 0.0, 0.0, 1.0)).with_blend_mode(BlendMode::SrcOver);
//! canvas.draw_rect(&rect, &paint);
//! ```

#![no_std]
#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::too_many_arguments)]

#[cfg(not(any(feature = "std", feature = "no-std-float")))]
compile_error!("You have to activate either the `std` or the `no-std-float` feature.");

#[cfg(feature = "std")]
extern crate std;

extern crate alloc;

mod bezier;
mod blend;
mod canvas;
mod color;
mod edge;
mod edge_clipper;
#[cfg(feature = "png-format")]
mod error;
mod flatten;
mod paint;
mod pixmap;
mod shaders;
mod transform;

pub use blend::BlendMode;
pub use canvas::Canvas;
pub use color::{AlphaU8, Color, PremultipliedColorU8};
#[cfg(feature = "png-format")]
pub use error::Error;
pub use paint::Paint;
pub use pixmap::Pixmap;
pub use shaders::{BitmapShader, ComposeShader, LinearGradientShader, ProxyShader, Shader, TileMode, TriangleGradientShader};
pub use transform::Transform;

pub use raster_path::{Edger, Iter, Path, PathBuilder, Point, Rect, Verb, MAX_NEXT_POINTS};
