// Copyright 2006 The Android Open Source Project
// Copyright 2020 Yevhenii Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

//! Geometry primitives for [`raster-core`](https://docs.rs/raster-core): points, rects and
//! a memory-efficient Bezier path container with its builder.
//!
//! Note that all types use single precision floats (`f32`), matching the rasterizer's own
//! pixel-center sampling.

#![no_std]
#![warn(missing_docs)]
#![warn(missing_copy_implementations)]
#![warn(missing_debug_implementations)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::too_many_arguments)]

#[cfg(not(any(feature = "std", feature = "no-std-float")))]
compile_error!("You have to activate either the `std` or the `no-std-float` feature.");

#[cfg(feature = "std")]
extern crate std;

extern crate alloc;

mod floating_point;
mod path;
mod path_builder;
mod point;
mod rect;
pub mod scalar;

#[cfg(all(not(feature = "std"), feature = "no-std-float"))]
pub use floating_point::NoStdFloat;

pub use path::{Edger, Iter, Path, Verb, MAX_NEXT_POINTS};
pub use path_builder::PathBuilder;
pub use point::Point;
pub use rect::Rect;
