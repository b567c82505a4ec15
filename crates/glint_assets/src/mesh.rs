use glam::Vec2;

use crate::outline::signed_area;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

#[derive(Debug, Clone, Default)]
pub struct MeshData {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

/// Extrudes flattened glyph contours into a prism of the given depth.
///
/// The front cap sits at `z = depth`, the back cap at `z = 0`, matching the
/// original extruded-text placement. Each contour is capped independently;
/// the glyphs rendered here ("N", "7") have no interior holes, so no
/// hole/solid classification is attempted.
pub fn extrude_contours(contours: &[Vec<Vec2>], depth: f32) -> MeshData {
    let mut mesh = MeshData::default();

    for raw in contours {
        // Normalize to counter-clockwise so cap winding and wall normals
        // can assume one orientation.
        let mut contour = raw.clone();
        if signed_area(&contour) < 0.0 {
            contour.reverse();
        }

        let triangles = triangulate(&contour);
        let n = contour.len() as u32;

        // Front cap, facing +Z.
        let base = mesh.vertices.len() as u32;
        for p in &contour {
            mesh.vertices.push(Vertex {
                position: [p.x, p.y, depth],
                normal: [0.0, 0.0, 1.0],
            });
        }
        for [a, b, c] in &triangles {
            mesh.indices.extend([base + a, base + b, base + c]);
        }

        // Back cap, facing -Z, reversed winding.
        let base = mesh.vertices.len() as u32;
        for p in &contour {
            mesh.vertices.push(Vertex {
                position: [p.x, p.y, 0.0],
                normal: [0.0, 0.0, -1.0],
            });
        }
        for [a, b, c] in &triangles {
            mesh.indices.extend([base + c, base + b, base + a]);
        }

        // Side walls, one quad per contour edge with the edge's outward
        // normal. For a CCW contour the outward direction is (dy, -dx).
        for i in 0..contour.len() {
            let a = contour[i];
            let b = contour[(i + 1) % contour.len()];
            let edge = b - a;
            let normal = Vec2::new(edge.y, -edge.x).normalize_or_zero();
            let normal = [normal.x, normal.y, 0.0];

            let base = mesh.vertices.len() as u32;
            for position in [
                [a.x, a.y, 0.0],
                [b.x, b.y, 0.0],
                [b.x, b.y, depth],
                [a.x, a.y, depth],
            ] {
                mesh.vertices.push(Vertex { position, normal });
            }
            mesh.indices
                .extend([base, base + 1, base + 2, base, base + 2, base + 3]);
        }

        debug_assert_eq!(triangles.len() as u32, n.saturating_sub(2));
    }

    mesh
}

/// Ear-clipping triangulation of a simple polygon. Returns indices into
/// `contour`, `len - 2` triangles for well-formed input.
pub fn triangulate(contour: &[Vec2]) -> Vec<[u32; 3]> {
    let n = contour.len();
    if n < 3 {
        return Vec::new();
    }

    let mut order: Vec<u32> = (0..n as u32).collect();
    if signed_area(contour) < 0.0 {
        order.reverse();
    }

    let mut triangles = Vec::with_capacity(n - 2);
    while order.len() > 3 {
        let len = order.len();
        let mut clipped = false;

        for i in 0..len {
            let i_prev = (i + len - 1) % len;
            let i_next = (i + 1) % len;
            let prev = contour[order[i_prev] as usize];
            let curr = contour[order[i] as usize];
            let next = contour[order[i_next] as usize];

            // Reflex corner: not an ear.
            if cross(curr - prev, next - curr) <= 0.0 {
                continue;
            }

            let blocked = order.iter().enumerate().any(|(j, &idx)| {
                j != i_prev
                    && j != i
                    && j != i_next
                    && point_in_triangle(contour[idx as usize], prev, curr, next)
            });
            if blocked {
                continue;
            }

            triangles.push([order[i_prev], order[i], order[i_next]]);
            order.remove(i);
            clipped = true;
            break;
        }

        if !clipped {
            // Self-intersecting or collinear remainder; fan what is left
            // rather than looping forever.
            log::warn!("ear clipping stalled with {} vertices left", order.len());
            for i in 1..order.len() - 1 {
                triangles.push([order[0], order[i], order[i + 1]]);
            }
            return triangles;
        }
    }

    triangles.push([order[0], order[1], order[2]]);
    triangles
}

/// Axis-aligned cube centered on the origin, flat normals per face.
pub fn cube(size: f32) -> MeshData {
    let h = size * 0.5;
    let faces: [([f32; 3], [[f32; 3]; 4]); 6] = [
        // +Z
        (
            [0.0, 0.0, 1.0],
            [[-h, -h, h], [h, -h, h], [h, h, h], [-h, h, h]],
        ),
        // -Z
        (
            [0.0, 0.0, -1.0],
            [[h, -h, -h], [-h, -h, -h], [-h, h, -h], [h, h, -h]],
        ),
        // +X
        (
            [1.0, 0.0, 0.0],
            [[h, -h, h], [h, -h, -h], [h, h, -h], [h, h, h]],
        ),
        // -X
        (
            [-1.0, 0.0, 0.0],
            [[-h, -h, -h], [-h, -h, h], [-h, h, h], [-h, h, -h]],
        ),
        // +Y
        (
            [0.0, 1.0, 0.0],
            [[-h, h, h], [h, h, h], [h, h, -h], [-h, h, -h]],
        ),
        // -Y
        (
            [0.0, -1.0, 0.0],
            [[-h, -h, -h], [h, -h, -h], [h, -h, h], [-h, -h, h]],
        ),
    ];

    let mut mesh = MeshData::default();
    for (normal, corners) in faces {
        let base = mesh.vertices.len() as u32;
        for position in corners {
            mesh.vertices.push(Vertex { position, normal });
        }
        mesh.indices
            .extend([base, base + 1, base + 2, base, base + 2, base + 3]);
    }
    mesh
}

fn cross(a: Vec2, b: Vec2) -> f32 {
    a.x * b.y - a.y * b.x
}

fn point_in_triangle(p: Vec2, a: Vec2, b: Vec2, c: Vec2) -> bool {
    // Strict interior test; points on an edge (shared contour vertices) do
    // not block an ear.
    let d1 = cross(b - a, p - a);
    let d2 = cross(c - b, p - b);
    let d3 = cross(a - c, p - c);
    let eps = 1e-7;
    d1 > eps && d2 > eps && d3 > eps
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3 as V3;

    fn square() -> Vec<Vec2> {
        vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(0.0, 1.0),
        ]
    }

    /// Concave hexagon (an "L" shape).
    fn ell() -> Vec<Vec2> {
        vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(2.0, 0.0),
            Vec2::new(2.0, 1.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(1.0, 2.0),
            Vec2::new(0.0, 2.0),
        ]
    }

    #[test]
    fn triangulation_produces_n_minus_two_triangles() {
        assert_eq!(triangulate(&square()).len(), 2);
        assert_eq!(triangulate(&ell()).len(), 4);
    }

    #[test]
    fn triangulated_area_matches_the_polygon() {
        let contour = ell();
        let total: f32 = triangulate(&contour)
            .iter()
            .map(|&[a, b, c]| {
                cross(
                    contour[b as usize] - contour[a as usize],
                    contour[c as usize] - contour[a as usize],
                )
                .abs()
                    * 0.5
            })
            .sum();
        assert!((total - 3.0).abs() < 1e-5);
    }

    #[test]
    fn extrusion_has_caps_and_walls() {
        let mesh = extrude_contours(&[square()], 0.2);
        let n = 4;
        assert_eq!(mesh.vertices.len(), 2 * n + 4 * n);
        // 2 cap triangles per side + 2 per wall quad.
        assert_eq!(mesh.indices.len(), 3 * 2 * (n - 2) + 6 * n);
    }

    #[test]
    fn extruded_normals_are_unit_length() {
        let mesh = extrude_contours(&[ell()], 0.2);
        for vertex in &mesh.vertices {
            let length = V3::from_array(vertex.normal).length();
            assert!((length - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn clockwise_input_is_normalized() {
        let mut reversed = square();
        reversed.reverse();
        let mesh = extrude_contours(&[reversed], 0.2);
        // Front cap vertices all sit at z = depth with a +Z normal.
        let front: Vec<_> = mesh
            .vertices
            .iter()
            .filter(|v| v.normal == [0.0, 0.0, 1.0])
            .collect();
        assert_eq!(front.len(), 4);
        assert!(front.iter().all(|v| v.position[2] == 0.2));
    }

    #[test]
    fn cube_has_six_flat_faces() {
        let mesh = cube(1.0);
        assert_eq!(mesh.vertices.len(), 24);
        assert_eq!(mesh.indices.len(), 36);
        for vertex in &mesh.vertices {
            assert_eq!(V3::from_array(vertex.normal).length(), 1.0);
        }
    }
}
