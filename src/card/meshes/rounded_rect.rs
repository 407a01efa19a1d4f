//! Rounded rectangle meshes
//!
//! The outline is a rectangle whose corners are quadratic curves with the
//! corner point as control point. It is convex, so faces are triangulated as
//! a fan around the center.

use bevy::prelude::*;

use super::MeshBuffers;

/// Segments per rounded corner.
pub const CORNER_SEGMENTS: usize = 8;

/// Corner radius of the 3D card body.
pub const CARD_CORNER_RADIUS: f32 = 1.2;

/// Counter-clockwise outline (viewed from +Z) of a centered rounded rectangle.
pub fn rounded_rect_outline(width: f32, height: f32, radius: f32, segments: usize) -> Vec<Vec2> {
    let radius = radius.clamp(0.0, width.min(height) / 2.0);
    let segments = segments.max(1);
    let x = -width / 2.0;
    let y = -height / 2.0;

    // (start of straight edge, end of straight edge, corner control point, end of curve)
    let corners = [
        (
            Vec2::new(x + radius, y),
            Vec2::new(x + width - radius, y),
            Vec2::new(x + width, y),
            Vec2::new(x + width, y + radius),
        ),
        (
            Vec2::new(x + width, y + radius),
            Vec2::new(x + width, y + height - radius),
            Vec2::new(x + width, y + height),
            Vec2::new(x + width - radius, y + height),
        ),
        (
            Vec2::new(x + width - radius, y + height),
            Vec2::new(x + radius, y + height),
            Vec2::new(x, y + height),
            Vec2::new(x, y + height - radius),
        ),
        (
            Vec2::new(x, y + height - radius),
            Vec2::new(x, y + radius),
            Vec2::new(x, y),
            Vec2::new(x + radius, y),
        ),
    ];

    let mut outline = Vec::with_capacity(4 * (segments + 1));
    for (edge_start, edge_end, control, curve_end) in corners {
        outline.push(edge_start);
        if radius <= f32::EPSILON {
            continue;
        }
        outline.push(edge_end);
        // The last curve point is the next edge's start.
        for i in 1..segments {
            let t = i as f32 / segments as f32;
            outline.push(quadratic_bezier(edge_end, control, curve_end, t));
        }
    }
    outline
}

fn quadratic_bezier(p0: Vec2, p1: Vec2, p2: Vec2, t: f32) -> Vec2 {
    let u = 1.0 - t;
    p0 * (u * u) + p1 * (2.0 * u * t) + p2 * (t * t)
}

impl MeshBuffers {
    /// Fan-triangulated face at height `z`. UVs span the bounding rectangle
    /// with `v = 0` at the top edge.
    fn push_face(&mut self, outline: &[Vec2], size: Vec2, z: f32, facing_front: bool) {
        let normal = if facing_front {
            [0.0, 0.0, 1.0]
        } else {
            [0.0, 0.0, -1.0]
        };
        let uv = |p: Vec2| {
            [
                (p.x + size.x / 2.0) / size.x,
                1.0 - (p.y + size.y / 2.0) / size.y,
            ]
        };

        let center = self.positions.len() as u32;
        self.positions.push([0.0, 0.0, z]);
        self.normals.push(normal);
        self.uvs.push(uv(Vec2::ZERO));

        for p in outline {
            self.positions.push([p.x, p.y, z]);
            self.normals.push(normal);
            self.uvs.push(uv(*p));
        }

        let n = outline.len() as u32;
        for i in 0..n {
            let a = center + 1 + i;
            let b = center + 1 + (i + 1) % n;
            if facing_front {
                self.indices.extend_from_slice(&[center, a, b]);
            } else {
                self.indices.extend_from_slice(&[center, b, a]);
            }
        }
    }

    /// Side walls between `z_back` and `z_front`, one flat-shaded quad per
    /// outline edge.
    fn push_sides(&mut self, outline: &[Vec2], z_front: f32, z_back: f32) {
        let n = outline.len();
        for i in 0..n {
            let p = outline[i];
            let q = outline[(i + 1) % n];
            let edge = q - p;
            if edge.length_squared() <= f32::EPSILON {
                continue;
            }
            let outward = Vec2::new(edge.y, -edge.x).normalize();
            let normal = [outward.x, outward.y, 0.0];

            let base = self.positions.len() as u32;
            // a: p front, b: q front, c: q back, d: p back
            self.positions.extend_from_slice(&[
                [p.x, p.y, z_front],
                [q.x, q.y, z_front],
                [q.x, q.y, z_back],
                [p.x, p.y, z_back],
            ]);
            self.normals.extend_from_slice(&[normal; 4]);
            self.uvs
                .extend_from_slice(&[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]]);
            let (a, b, c, d) = (base, base + 1, base + 2, base + 3);
            self.indices.extend_from_slice(&[d, c, b, d, b, a]);
        }
    }
}

/// Buffers of an extruded rounded rectangle centered on the origin, spanning
/// `-depth / 2 ..= depth / 2` in Z.
pub fn rounded_slab_buffers(width: f32, height: f32, radius: f32, depth: f32) -> MeshBuffers {
    let outline = rounded_rect_outline(width, height, radius, CORNER_SEGMENTS);
    let size = Vec2::new(width, height);
    let half = depth / 2.0;

    let mut buffers = MeshBuffers::default();
    buffers.push_face(&outline, size, half, true);
    buffers.push_face(&outline, size, -half, false);
    buffers.push_sides(&outline, half, -half);
    buffers
}

/// Extruded card body.
pub fn create_rounded_card_mesh(width: f32, height: f32, radius: f32, depth: f32) -> Mesh {
    rounded_slab_buffers(width, height, radius, depth).into_mesh()
}

/// Buffers of a flat rounded rectangle facing +Z.
pub fn rounded_plane_buffers(width: f32, height: f32, radius: f32) -> MeshBuffers {
    let outline = rounded_rect_outline(width, height, radius, CORNER_SEGMENTS);
    let mut buffers = MeshBuffers::default();
    buffers.push_face(&outline, Vec2::new(width, height), 0.0, true);
    buffers
}

/// Flat rounded rectangle used for the logo, textured edge to edge.
pub fn create_rounded_plane_mesh(width: f32, height: f32, radius: f32) -> Mesh {
    rounded_plane_buffers(width, height, radius).into_mesh()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle_normal(b: &MeshBuffers, tri: &[u32]) -> Vec3 {
        let p = |i: u32| Vec3::from_array(b.positions[i as usize]);
        let (a, bb, c) = (p(tri[0]), p(tri[1]), p(tri[2]));
        (bb - a).cross(c - a)
    }

    #[test]
    fn test_outline_is_counter_clockwise_and_bounded() {
        let outline = rounded_rect_outline(20.0, 12.6, 1.2, CORNER_SEGMENTS);
        assert_eq!(outline.len(), 4 * (CORNER_SEGMENTS + 1));

        // Shoelace area is positive for counter-clockwise outlines.
        let mut area = 0.0;
        for i in 0..outline.len() {
            let p = outline[i];
            let q = outline[(i + 1) % outline.len()];
            area += p.x * q.y - q.x * p.y;
        }
        assert!(area > 0.0);
        // Rounded corners remove a little area from the full rectangle.
        assert!(area / 2.0 < 20.0 * 12.6);
        assert!(area / 2.0 > 20.0 * 12.6 - 4.0 * 1.2 * 1.2);

        for p in &outline {
            assert!(p.x.abs() <= 10.0 + 1e-4);
            assert!(p.y.abs() <= 6.3 + 1e-4);
        }
    }

    #[test]
    fn test_radius_is_limited_to_half_the_short_side() {
        let outline = rounded_rect_outline(2.0, 1.0, 5.0, 4);
        for p in &outline {
            assert!(p.x.abs() <= 1.0 + 1e-4);
            assert!(p.y.abs() <= 0.5 + 1e-4);
        }
    }

    #[test]
    fn test_zero_radius_is_a_plain_rectangle() {
        let outline = rounded_rect_outline(4.0, 2.0, 0.0, CORNER_SEGMENTS);
        assert_eq!(outline.len(), 4);
    }

    #[test]
    fn test_slab_faces_point_outward() {
        let buffers = rounded_slab_buffers(20.0, 12.6, CARD_CORNER_RADIUS, 0.2);
        assert_eq!(buffers.positions.len(), buffers.normals.len());
        assert_eq!(buffers.positions.len(), buffers.uvs.len());
        assert_eq!(buffers.indices.len() % 3, 0);

        for tri in buffers.indices.chunks(3) {
            let geometric = triangle_normal(&buffers, tri);
            let stored = Vec3::from_array(buffers.normals[tri[0] as usize]);
            assert!(
                geometric.dot(stored) > 0.0,
                "triangle {:?} winds against its normal",
                tri
            );
        }
    }

    #[test]
    fn test_slab_depth_is_centered() {
        let buffers = rounded_slab_buffers(20.0, 12.6, CARD_CORNER_RADIUS, 0.2);
        let (min_z, max_z) = buffers
            .positions
            .iter()
            .fold((f32::MAX, f32::MIN), |(lo, hi), p| (lo.min(p[2]), hi.max(p[2])));
        assert!((min_z - -0.1).abs() < 1e-6);
        assert!((max_z - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_plane_uvs_span_unit_square() {
        let buffers = rounded_plane_buffers(3.2, 3.2, 0.3);
        for uv in &buffers.uvs {
            assert!((0.0..=1.0).contains(&uv[0]));
            assert!((0.0..=1.0).contains(&uv[1]));
        }
        // Center of the face samples the center of the texture.
        assert_eq!(buffers.uvs[0], [0.5, 0.5]);
        assert!(buffers.normals.iter().all(|n| *n == [0.0, 0.0, 1.0]));
    }
}
