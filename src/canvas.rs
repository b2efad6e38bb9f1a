// Copyright 2024 Aruj Bansal
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use alloc::vec::Vec;

use raster_path::{Point, Rect, Verb};

use crate::blend::{blend_row, BlendMode, SourceRow};
use crate::color::{Color, PremultipliedColorU8};
use crate::edge::Edge;
use crate::edge_clipper::clip_edges;
use crate::flatten::{flatten_cubic, flatten_quad};
use crate::paint::Paint;
use crate::pixmap::Pixmap;
use crate::shaders::{ProxyShader, Shader};
use crate::transform::Transform;

/// Owns a destination [`Pixmap`] and a matrix stack, and turns polygons, paths and
/// meshes into blended pixels on that bitmap.
///
/// The matrix stack is never empty: it starts as `[identity]`, `save` duplicates the top,
/// `restore` pops it. Popping the last entry is a contract violation (the C++ original
/// simply underflows its stack); debug builds assert instead of silently corrupting state.
pub struct Canvas<'a> {
    pixmap: &'a mut Pixmap,
    stack: Vec<Transform>,
}

impl<'a> Canvas<'a> {
    /// Creates a canvas drawing into `pixmap`, with an identity transform.
    pub fn new(pixmap: &'a mut Pixmap) -> Self {
        Canvas { pixmap, stack: alloc::vec![Transform::identity()] }
    }

    /// Pushes a duplicate of the current transform.
    pub fn save(&mut self) {
        let top = *self.stack.last().expect("matrix stack is never empty");
        self.stack.push(top);
    }

    /// Pops the current transform.
    ///
    /// Debug builds assert on underflow rather than popping the implicit identity floor.
    pub fn restore(&mut self) {
        debug_assert!(self.stack.len() > 1, "matrix stack underflow");
        if self.stack.len() > 1 {
            self.stack.pop();
        }
    }

    /// `top <- top . m`.
    pub fn concat(&mut self, m: &Transform) {
        let top = self.stack.last_mut().expect("matrix stack is never empty");
        *top = top.concat(m);
    }

    /// Shorthand for `concat(Transform::from_translate(tx, ty))`.
    pub fn translate(&mut self, tx: f32, ty: f32) {
        self.concat(&Transform::from_translate(tx, ty));
    }

    /// Shorthand for `concat(Transform::from_scale(sx, sy))`.
    pub fn scale(&mut self, sx: f32, sy: f32) {
        self.concat(&Transform::from_scale(sx, sy));
    }

    /// Shorthand for `concat(Transform::from_rotate(radians))`.
    pub fn rotate(&mut self, radians: f32) {
        self.concat(&Transform::from_rotate(radians));
    }

    fn ctm(&self) -> Transform {
        *self.stack.last().expect("matrix stack is never empty")
    }

    /// Fills the entire device with a premultiplied `color`, ignoring blend mode.
    pub fn clear(&mut self, color: Color) {
        self.pixmap.fill(color);
    }

    /// `draw_convex_polygon([LT, RT, RB, LB], paint)`.
    pub fn draw_rect(&mut self, rect: &Rect, paint: &Paint) {
        self.draw_convex_polygon(&rect.to_quad(), paint);
    }

    /// Fills a convex polygon, walking two active edges per scanline.
    ///
    /// Vertices are transformed by the current matrix, closed into an edge loop, clipped
    /// to the device, and sorted by `top`. Fewer than two surviving edges is a no-op.
    pub fn draw_convex_polygon(&mut self, points: &[Point], paint: &Paint) {
        if points.len() < 2 {
            return;
        }

        let ctm = self.ctm();
        let transformed: Vec<Point> = points.iter().map(|&p| ctm.map_point(p)).collect();

        let n = transformed.len();
        let mut segments = Vec::with_capacity(n);
        for i in 0..n {
            segments.push((transformed[i], transformed[(i + 1) % n]));
        }

        let width = self.pixmap.width() as i32;
        let height = self.pixmap.height() as i32;

        let mut clipped = Vec::new();
        clip_edges(&segments, width, height, &mut clipped);
        clipped.sort_by_key(|e| e.top);

        if clipped.len() < 2 {
            return;
        }

        let row_bounds = convex_row_bounds(&mut clipped);
        self.blit_rows(row_bounds.0, &row_bounds.1, paint);
    }

    /// Fills a path under the non-zero winding rule.
    ///
    /// The path is transformed, flattened (quads/cubics become line-segment chains via
    /// [`flatten_quad`]/[`flatten_cubic`]) through its closing edger, then clipped.
    pub fn draw_path(&mut self, path: &raster_path::Path, paint: &Paint) {
        let ctm = self.ctm();

        let mut segments = Vec::with_capacity(path.points_count());
        let mut edger = path.edger();
        let mut pts = [Point::zero(); raster_path::MAX_NEXT_POINTS];

        while let Some(verb) = edger.next(&mut pts) {
            match verb {
                Verb::Move => {}
                Verb::Line => segments.push((ctm.map_point(pts[0]), ctm.map_point(pts[1]))),
                Verb::Quad => {
                    let q = [ctm.map_point(pts[0]), ctm.map_point(pts[1]), ctm.map_point(pts[2])];
                    flatten_quad(&q, &mut segments);
                }
                Verb::Cubic => {
                    let c = [
                        ctm.map_point(pts[0]),
                        ctm.map_point(pts[1]),
                        ctm.map_point(pts[2]),
                        ctm.map_point(pts[3]),
                    ];
                    flatten_cubic(&c, &mut segments);
                }
            }
        }

        let width = self.pixmap.width() as i32;
        let height = self.pixmap.height() as i32;

        let mut clipped = Vec::new();
        clip_edges(&segments, width, height, &mut clipped);

        if clipped.len() < 2 {
            return;
        }

        clipped.sort_by_key(|e| e.top);
        self.fill_non_zero(&mut clipped, paint);
    }

    /// Dispatches `tri_count` triangles from `indices` (three per triangle) through
    /// whichever combination of `colors`/`texs` is present.
    ///
    /// - Colors only: a triangle-gradient fill.
    /// - Texcoords only: `paint`'s shader, re-mapped through a proxy from texture space
    ///   into vertex space.
    /// - Both: the triangle gradient and the re-mapped shader, multiplicatively composed.
    pub fn draw_mesh(
        &mut self,
        verts: &[Point],
        colors: Option<&[Color]>,
        texs: Option<&[Point]>,
        tri_count: usize,
        indices: &[u32],
        paint: &Paint,
    ) {
        debug_assert!(indices.len() >= tri_count * 3);

        for t in 0..tri_count {
            let i0 = indices[t * 3] as usize;
            let i1 = indices[t * 3 + 1] as usize;
            let i2 = indices[t * 3 + 2] as usize;
            let tri_verts = [verts[i0], verts[i1], verts[i2]];

            match (colors, texs) {
                (Some(colors), None) => {
                    let tri_colors = [colors[i0], colors[i1], colors[i2]];
                    let shader = Shader::Triangle(crate::shaders::TriangleGradientShader::new(tri_verts, tri_colors));
                    let tri_paint = Paint::from_shader(&shader).with_blend_mode(paint.blend_mode());
                    self.draw_convex_polygon(&tri_verts, &tri_paint);
                }
                (colors, Some(texs)) => {
                    let base_shader = match paint.shader() {
                        Some(s) => s,
                        None => continue,
                    };

                    let tri_texs = [texs[i0], texs[i1], texs[i2]];
                    let draw_basis = triangle_basis(tri_verts);
                    let tex_basis = match triangle_basis(tri_texs).invert() {
                        Some(inv) => inv,
                        None => continue,
                    };

                    let proxy = ProxyShader::new(base_shader, draw_basis.concat(&tex_basis));
                    let proxy_shader = Shader::Proxy(proxy);

                    if let Some(colors) = colors {
                        let tri_colors = [colors[i0], colors[i1], colors[i2]];
                        let gradient = Shader::Triangle(crate::shaders::TriangleGradientShader::new(tri_verts, tri_colors));
                        let composed = Shader::Compose(crate::shaders::ComposeShader::new(&gradient, &proxy_shader));
                        let tri_paint = Paint::from_shader(&composed).with_blend_mode(paint.blend_mode());
                        self.draw_convex_polygon(&tri_verts, &tri_paint);
                    } else {
                        let tri_paint = Paint::from_shader(&proxy_shader).with_blend_mode(paint.blend_mode());
                        self.draw_convex_polygon(&tri_verts, &tri_paint);
                    }
                }
                (None, None) => {}
            }
        }
    }

    /// Tessellates a bilinear patch into a `(level + 2)^2` point grid and dispatches it
    /// as a mesh of `2 * (level + 1)^2` triangles.
    ///
    /// Winding order for bilinear interpolation is `(v0, v1, v3, v2)`: `v2`/`v3` are
    /// swapped from the caller's quad order to match the corners' actual spatial layout.
    pub fn draw_quad(
        &mut self,
        verts: [Point; 4],
        colors: Option<[Color; 4]>,
        texs: Option<[Point; 4]>,
        level: u32,
        paint: &Paint,
    ) {
        let point_count = (level + 2) as usize;
        let step = 1.0 / (level + 1) as f32;

        let verts_payload = [verts[0], verts[1], verts[3], verts[2]];
        let texs_payload = texs.map(|t| [t[0], t[1], t[3], t[2]]);
        let colors_payload = colors.map(|c| [c[0], c[1], c[3], c[2]]);

        let mut points = Vec::with_capacity(point_count * point_count);
        let mut out_texs = Vec::with_capacity(point_count * point_count);
        let mut out_colors = Vec::with_capacity(point_count * point_count);

        let mut t = 0.0f32;
        for _ in 0..point_count {
            let mut s = 0.0f32;
            for _ in 0..point_count {
                points.push(bilinear_point(s, t, &verts_payload));
                if let Some(p) = &texs_payload {
                    out_texs.push(bilinear_point(s, t, p));
                }
                if let Some(c) = &colors_payload {
                    out_colors.push(bilinear_color(s, t, c));
                }
                s += step;
            }
            t += step;
        }

        let mut indices = Vec::with_capacity((point_count - 1) * point_count * 3);
        for i in 0..point_count - 1 {
            for j in 0..point_count {
                let cur = (i * point_count + j) as u32;
                let stride = point_count as u32;

                if j < point_count - 1 {
                    indices.push(cur);
                    indices.push(cur + 1);
                    indices.push(cur + stride);
                }
                if j >= 1 {
                    indices.push(cur);
                    indices.push(cur + stride - 1);
                    indices.push(cur + stride);
                }
            }
        }

        let tri_count = indices.len() / 3;
        self.draw_mesh(
            &points,
            colors.map(|_| out_colors.as_slice()),
            texs.map(|_| out_texs.as_slice()),
            tri_count,
            &indices,
            paint,
        );
    }

    fn blit_rows(&mut self, (min_y, max_y): (i32, i32), row_bounds: &[(i32, i32)], paint: &Paint) {
        match paint.shader() {
            Some(shader) => {
                if !shader.set_context(&self.ctm()) {
                    return;
                }
                for y in min_y..max_y {
                    let (left, right) = row_bounds[(y - min_y) as usize];
                    let len = (right - left + 1) as usize;
                    let mut row = alloc::vec![PremultipliedColorU8::TRANSPARENT; len];
                    shader.shade_row(left, y, &mut row);
                    self.blend_span(y, left, right, paint.blend_mode(), SourceRow::Shader(&row));
                }
            }
            None => {
                let color = paint.color().unwrap_or(Color::TRANSPARENT).premultiply();
                for y in min_y..max_y {
                    let (left, right) = row_bounds[(y - min_y) as usize];
                    self.blend_span(y, left, right, paint.blend_mode(), SourceRow::Constant(color));
                }
            }
        }
    }

    /// Blends `source` into the inclusive device span `[left, right]` of scanline `y`.
    ///
    /// `source` is clipped to whatever part of `[left, right]` actually falls on the
    /// pixmap; for `SourceRow::Shader`, the caller's row must already cover `[left, right]`.
    fn blend_span(&mut self, y: i32, left: i32, right: i32, mode: BlendMode, source: SourceRow<'_>) {
        if y < 0 || y as u32 >= self.pixmap.height() || right < left {
            return;
        }
        let row = match self.pixmap.row_mut(y as u32) {
            Some(row) => row,
            None => return,
        };

        let clamped_left = left.max(0) as usize;
        let clamped_right = (right as usize + 1).min(row.len());
        if clamped_left >= clamped_right {
            return;
        }

        match source {
            SourceRow::Constant(color) => {
                blend_row(mode, SourceRow::Constant(color), &mut row[clamped_left..clamped_right]);
            }
            SourceRow::Shader(shaded) => {
                let skip = (clamped_left as i32 - left).max(0) as usize;
                let len = clamped_right - clamped_left;
                blend_row(mode, SourceRow::Shader(&shaded[skip..skip + len]), &mut row[clamped_left..clamped_right]);
            }
        }
    }

    fn fill_non_zero(&mut self, clipped: &mut [Edge], paint: &Paint) {
        if let Some(shader) = paint.shader() {
            if !shader.set_context(&self.ctm()) {
                return;
            }
        }

        let top_y = clipped.iter().map(|e| e.top).min().unwrap();
        let bottom_y = clipped.iter().map(|e| e.bottom).max().unwrap();
        let num_edges = clipped.len();

        let mut next_edge: Vec<usize> = (1..=num_edges).collect();
        let mut x_vals: Vec<(i32, i32)> = Vec::with_capacity(num_edges);
        let mut start_idx = 0usize;

        for y in top_y..bottom_y {
            x_vals.clear();

            let mut prev_idx = start_idx;
            let mut cur_idx = start_idx;

            while cur_idx < num_edges {
                if clipped[cur_idx].bottom <= y {
                    if cur_idx == start_idx {
                        start_idx = next_edge[cur_idx];
                        prev_idx = start_idx;
                    } else {
                        next_edge[prev_idx] = next_edge[cur_idx];
                    }
                    cur_idx = next_edge[cur_idx];
                    continue;
                }

                if !clipped[cur_idx].is_inside(y) {
                    break;
                }

                let x = clipped[cur_idx].query_x().round() as i32;
                x_vals.push((x, clipped[cur_idx].winding));

                if clipped[cur_idx].is_inside(y + 1) {
                    prev_idx = cur_idx;
                } else if cur_idx == start_idx {
                    start_idx = next_edge[cur_idx];
                    prev_idx = start_idx;
                } else {
                    next_edge[prev_idx] = next_edge[cur_idx];
                }

                cur_idx = next_edge[cur_idx];
            }

            x_vals.sort_unstable();

            let mut winding = 0;
            let mut left = 0;
            for &(x, orientation) in x_vals.iter() {
                if winding == 0 {
                    left = x;
                }
                winding += orientation;
                if winding == 0 {
                    self.blit_row_span(y, left, x, paint);
                }
            }
        }
    }

    fn blit_row_span(&mut self, y: i32, left: i32, right: i32, paint: &Paint) {
        match paint.shader() {
            Some(shader) => {
                let len = (right - left + 1) as usize;
                let mut row = alloc::vec![PremultipliedColorU8::TRANSPARENT; len];
                shader.shade_row(left, y, &mut row);
                self.blend_span(y, left, right, paint.blend_mode(), SourceRow::Shader(&row));
            }
            None => {
                let color = paint.color().unwrap_or(Color::TRANSPARENT).premultiply();
                self.blend_span(y, left, right, paint.blend_mode(), SourceRow::Constant(color));
            }
        }
    }
}

/// Returns the `(min_y, max_y)` scanline range and each row's `(left, right)` inclusive
/// span, walking two active edges forward per the two-edge convex-fill invariant.
fn convex_row_bounds(clipped: &mut [Edge]) -> ((i32, i32), Vec<(i32, i32)>) {
    let min_y = clipped[0].top;
    let max_y = clipped[clipped.len() - 1].bottom;

    let mut bounds = Vec::with_capacity((max_y - min_y).max(0) as usize);
    let mut edge_1 = 0usize;
    let mut edge_2 = 1usize;

    for y in min_y..max_y {
        if y >= clipped[edge_1].bottom {
            edge_1 = edge_1.max(edge_2) + 1;
        }
        if y >= clipped[edge_2].bottom {
            edge_2 = edge_1.max(edge_2) + 1;
        }

        let mut q1 = clipped[edge_1].query_x().round() as i32;
        let mut q2 = clipped[edge_2].query_x().round() as i32;
        if q1 > q2 {
            core::mem::swap(&mut q1, &mut q2);
        }
        bounds.push((q1, q2));
    }

    ((min_y, max_y), bounds)
}

fn triangle_basis(verts: [Point; 3]) -> Transform {
    Transform::from_basis(verts[1] - verts[0], verts[2] - verts[0], verts[0])
}

fn bilinear_point(s: f32, t: f32, payload: &[Point; 4]) -> Point {
    payload[0] * ((1.0 - s) * (1.0 - t))
        + payload[1] * (s * (1.0 - t))
        + payload[2] * ((1.0 - s) * t)
        + payload[3] * (s * t)
}

fn bilinear_color(s: f32, t: f32, payload: &[Color; 4]) -> Color {
    payload[0] * ((1.0 - s) * (1.0 - t))
        + payload[1] * (s * (1.0 - t))
        + payload[2] * ((1.0 - s) * t)
        + payload[3] * (s * t)
}

#[cfg(test)]
mod tests {
    use super::*;
    use raster_path::PathBuilder;

    #[test]
    fn scenario_s1_opaque_rect_fill() {
        let mut pm = Pixmap::new(100, 100).unwrap();
        let mut canvas = Canvas::new(&mut pm);
        canvas.clear(Color::from_rgba(0.0, 0.0, 0.0, 1.0));

        let rect = Rect::from_ltrb(10.0, 10.0, 20.0, 20.0).unwrap();
        let paint = Paint::from_color(Color::from_rgba(1.0, 0.0, 0.0, 1.0)).with_blend_mode(crate::blend::BlendMode::Src);
        canvas.draw_rect(&rect, &paint);

        let red = Color::from_rgba(1.0, 0.0, 0.0, 1.0).premultiply();
        let black = Color::from_rgba(0.0, 0.0, 0.0, 1.0).premultiply();

        assert_eq!(pm.pixel(15, 15).unwrap(), red);
        assert_eq!(pm.pixel(9, 15).unwrap(), black);
        assert_eq!(pm.pixel(20, 15).unwrap(), black);
    }

    #[test]
    fn scenario_s2_closed_path_src_over() {
        let mut pm = Pixmap::new(10, 10).unwrap();
        let mut canvas = Canvas::new(&mut pm);
        canvas.clear(Color::from_rgba(0.0, 0.0, 0.0, 1.0));

        let mut pb = PathBuilder::new();
        pb.move_to(Point::from_xy(0.0, 0.0));
        pb.line_to(Point::from_xy(10.0, 0.0));
        pb.line_to(Point::from_xy(10.0, 10.0));
        pb.line_to(Point::from_xy(0.0, 10.0));
        let path = pb.finish().unwrap();

        let paint = Paint::from_color(Color::from_rgba(0.0, 1.0, 0.0, 0.5));
        canvas.draw_path(&path, &paint);

        let px = pm.pixel(5, 5).unwrap();
        assert_eq!(px.alpha(), 255);
        assert_eq!(px.red(), 0);
        assert_eq!(px.blue(), 0);
        assert!((px.green() as i32 - 128).abs() <= 1);
    }

    #[test]
    fn concat_identity_is_a_no_op() {
        let mut pm = Pixmap::new(4, 4).unwrap();
        let mut canvas = Canvas::new(&mut pm);
        canvas.concat(&Transform::identity());
        assert_eq!(canvas.ctm(), Transform::identity());
    }

    #[test]
    fn save_restore_pairs_cleanly() {
        let mut pm = Pixmap::new(4, 4).unwrap();
        let mut canvas = Canvas::new(&mut pm);
        canvas.save();
        canvas.translate(5.0, 5.0);
        canvas.restore();
        assert_eq!(canvas.ctm(), Transform::identity());
    }

    #[test]
    fn dst_mode_is_a_no_op() {
        let mut pm = Pixmap::new(4, 4).unwrap();
        let mut canvas = Canvas::new(&mut pm);
        canvas.clear(Color::BLACK);
        let before = pm.clone();

        let rect = Rect::from_xywh(0.0, 0.0, 4.0, 4.0).unwrap();
        let paint = Paint::from_color(Color::WHITE).with_blend_mode(crate::blend::BlendMode::Dst);
        canvas.draw_rect(&rect, &paint);

        assert_eq!(pm, before);
    }

    #[test]
    fn convex_polygon_winding_direction_is_irrelevant() {
        let mut pm_ccw = Pixmap::new(20, 20).unwrap();
        let mut pm_cw = Pixmap::new(20, 20).unwrap();

        let ccw = [
            Point::from_xy(2.0, 2.0),
            Point::from_xy(18.0, 2.0),
            Point::from_xy(18.0, 18.0),
            Point::from_xy(2.0, 18.0),
        ];
        let mut cw = ccw;
        cw.reverse();

        let paint = Paint::from_color(Color::from_rgba(1.0, 1.0, 1.0, 1.0)).with_blend_mode(crate::blend::BlendMode::Src);

        Canvas::new(&mut pm_ccw).draw_convex_polygon(&ccw, &paint);
        Canvas::new(&mut pm_cw).draw_convex_polygon(&cw, &paint);

        assert_eq!(pm_ccw, pm_cw);
    }
}
