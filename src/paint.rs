// Copyright 2024 Aruj Bansal
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use crate::blend::BlendMode;
use crate::color::Color;
use crate::shaders::Shader;

/// A source color or shader, plus a blend mode, for a single draw call.
///
/// A `Paint` never owns its shader: the caller's shader must outlive the draw call, the
/// same contract `Canvas` places on every non-owning reference it touches.
pub struct Paint<'a> {
    source: Source<'a>,
    blend_mode: BlendMode,
}

enum Source<'a> {
    Color(Color),
    Shader(&'a Shader<'a>),
}

impl<'a> Paint<'a> {
    /// A solid-color paint, blended with [`BlendMode::SrcOver`] by default.
    pub fn from_color(color: Color) -> Self {
        Paint { source: Source::Color(color), blend_mode: BlendMode::SrcOver }
    }

    /// A shader-backed paint, blended with [`BlendMode::SrcOver`] by default.
    pub fn from_shader(shader: &'a Shader<'a>) -> Self {
        Paint { source: Source::Shader(shader), blend_mode: BlendMode::SrcOver }
    }

    /// Overrides the blend mode.
    pub fn with_blend_mode(mut self, mode: BlendMode) -> Self {
        self.blend_mode = mode;
        self
    }

    /// The paint's blend mode.
    pub fn blend_mode(&self) -> BlendMode {
        self.blend_mode
    }

    /// The solid color, if this paint has no shader.
    pub fn color(&self) -> Option<Color> {
        match self.source {
            Source::Color(c) => Some(c),
            Source::Shader(_) => None,
        }
    }

    /// The shader, if this paint is shader-backed.
    pub fn shader(&self) -> Option<&'a Shader<'a>> {
        match self.source {
            Source::Color(_) => None,
            Source::Shader(s) => Some(s),
        }
    }
}
