//! Stroke glyph meshes for the balance text
//!
//! Glyphs are drawn from straight strokes and circular arcs in a unit cell
//! (0.6 wide, 1.0 tall, baseline at 0) and emitted as flat quads facing +Z.

use std::f32::consts::{FRAC_PI_2, PI, TAU};

use bevy::prelude::*;

use super::MeshBuffers;

const GLYPH_WIDTH: f32 = 0.6;
const NARROW_WIDTH: f32 = 0.25;
const LETTER_SPACING: f32 = 0.12;
const STROKE_WIDTH: f32 = 0.14;
const ARC_SEGMENTS_PER_TURN: f32 = 20.0;

#[derive(Debug, Clone, Copy)]
enum Stroke {
    Line(Vec2, Vec2),
    /// Circular arc from `start` to `end` (radians, counter-clockwise when
    /// `end > start`).
    Arc {
        center: Vec2,
        radius: f32,
        start: f32,
        end: f32,
    },
}

fn line(x1: f32, y1: f32, x2: f32, y2: f32) -> Stroke {
    Stroke::Line(Vec2::new(x1, y1), Vec2::new(x2, y2))
}

fn arc(cx: f32, cy: f32, radius: f32, start: f32, end: f32) -> Stroke {
    Stroke::Arc {
        center: Vec2::new(cx, cy),
        radius,
        start,
        end,
    }
}

/// Strokes and advance width of `c`. Unsupported characters render as a
/// blank of normal width.
fn glyph(c: char) -> (Vec<Stroke>, f32) {
    let strokes = match c {
        '0' => vec![
            arc(0.3, 0.72, 0.25, 0.0, PI),
            arc(0.3, 0.28, 0.25, PI, TAU),
            line(0.05, 0.28, 0.05, 0.72),
            line(0.55, 0.28, 0.55, 0.72),
        ],
        '1' => vec![
            line(0.35, 0.0, 0.35, 1.0),
            line(0.15, 0.8, 0.35, 1.0),
            line(0.15, 0.0, 0.55, 0.0),
        ],
        '2' => vec![
            arc(0.3, 0.72, 0.25, PI, 0.0),
            line(0.55, 0.72, 0.05, 0.0),
            line(0.05, 0.0, 0.6, 0.0),
        ],
        '3' => vec![
            arc(0.3, 0.75, 0.23, PI, -FRAC_PI_2),
            arc(0.3, 0.27, 0.25, FRAC_PI_2, -PI),
        ],
        '4' => vec![
            line(0.45, 0.0, 0.45, 1.0),
            line(0.45, 1.0, 0.05, 0.3),
            line(0.05, 0.3, 0.6, 0.3),
        ],
        '5' => vec![
            line(0.55, 1.0, 0.08, 1.0),
            line(0.08, 1.0, 0.08, 0.55),
            line(0.08, 0.55, 0.3, 0.57),
            arc(0.3, 0.3, 0.27, FRAC_PI_2, -0.9 * PI),
        ],
        '6' => vec![
            arc(0.3, 0.28, 0.25, 0.0, TAU),
            line(0.05, 0.3, 0.45, 1.0),
        ],
        '7' => vec![line(0.02, 1.0, 0.58, 1.0), line(0.58, 1.0, 0.2, 0.0)],
        '8' => vec![
            arc(0.3, 0.75, 0.22, 0.0, TAU),
            arc(0.3, 0.27, 0.26, 0.0, TAU),
        ],
        '9' => vec![
            arc(0.3, 0.72, 0.25, 0.0, TAU),
            line(0.55, 0.72, 0.15, 0.0),
        ],
        '$' => vec![
            arc(0.3, 0.72, 0.22, 0.0, 1.5 * PI),
            arc(0.3, 0.28, 0.22, FRAC_PI_2, -PI),
            line(0.3, -0.12, 0.3, 1.12),
        ],
        '-' => vec![line(0.1, 0.5, 0.5, 0.5)],
        '.' => return (vec![line(0.12, 0.0, 0.12, 0.1)], NARROW_WIDTH),
        ',' => return (vec![line(0.14, 0.08, 0.06, -0.12)], NARROW_WIDTH),
        _ => Vec::new(),
    };
    (strokes, GLYPH_WIDTH)
}

impl MeshBuffers {
    /// A flat quad of `width` along `from -> to`, extended by half the width
    /// at both ends so joined strokes overlap.
    fn push_stroke_quad(&mut self, from: Vec2, to: Vec2, width: f32) {
        let delta = to - from;
        let len = delta.length();
        if len < 1e-4 {
            return;
        }
        let dir = delta / len;
        let half = width / 2.0;
        let side = Vec2::new(-dir.y, dir.x) * half;
        let a = from - dir * half;
        let b = to + dir * half;

        let base = self.positions.len() as u32;
        for p in [a - side, b - side, b + side, a + side] {
            self.positions.push([p.x, p.y, 0.0]);
            self.normals.push([0.0, 0.0, 1.0]);
            self.uvs.push([0.5, 0.5]);
        }
        self.indices
            .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    fn push_glyph_stroke(&mut self, stroke: Stroke, origin: Vec2, scale: f32) {
        let width = STROKE_WIDTH * scale;
        match stroke {
            Stroke::Line(p, q) => {
                self.push_stroke_quad(origin + p * scale, origin + q * scale, width);
            }
            Stroke::Arc {
                center,
                radius,
                start,
                end,
            } => {
                let sweep = end - start;
                let segments = ((sweep.abs() / TAU) * ARC_SEGMENTS_PER_TURN).ceil().max(2.0) as usize;
                let point = |angle: f32| {
                    origin + (center + Vec2::new(angle.cos(), angle.sin()) * radius) * scale
                };
                for i in 0..segments {
                    let a1 = start + sweep * i as f32 / segments as f32;
                    let a2 = start + sweep * (i + 1) as f32 / segments as f32;
                    self.push_stroke_quad(point(a1), point(a2), width);
                }
            }
        }
    }
}

/// Buffers for `text` at `font_size` world units, anchored so the right edge
/// sits at `x = 0` and the lowest point at `y = 0`.
pub fn balance_text_buffers(text: &str, font_size: f32) -> MeshBuffers {
    let mut buffers = MeshBuffers::default();
    let mut cursor = 0.0;
    for (i, c) in text.chars().enumerate() {
        if i > 0 {
            cursor += LETTER_SPACING * font_size;
        }
        let (strokes, advance) = glyph(c);
        for stroke in strokes {
            buffers.push_glyph_stroke(stroke, Vec2::new(cursor, 0.0), font_size);
        }
        cursor += advance * font_size;
    }

    if let Some((min, max)) = buffers.bounds() {
        buffers.translate(Vec3::new(-max.x, -min.y, 0.0));
    }
    buffers
}

pub fn create_balance_text_mesh(text: &str, font_size: f32) -> Mesh {
    balance_text_buffers(text, font_size).into_mesh()
}
