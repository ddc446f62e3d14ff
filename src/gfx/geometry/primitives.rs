//! # Primitive Shape Generation
//!
//! All shapes are centred at the origin in their local space.

use super::{GeometryData, Topology};

/// Generate a cube with edge length `size` centred at the origin
///
/// Each face has its own four vertices so normals stay flat per face.
pub fn generate_cube(size: f32) -> GeometryData {
    let mut data = GeometryData::new(Topology::Triangles);
    let h = size * 0.5;

    #[rustfmt::skip]
    let positions = [
        // Front face
        [-h, -h,  h], [ h, -h,  h], [ h,  h,  h], [-h,  h,  h],
        // Back face
        [-h, -h, -h], [-h,  h, -h], [ h,  h, -h], [ h, -h, -h],
        // Left face
        [-h, -h, -h], [-h, -h,  h], [-h,  h,  h], [-h,  h, -h],
        // Right face
        [ h, -h,  h], [ h, -h, -h], [ h,  h, -h], [ h,  h,  h],
        // Top face
        [-h,  h,  h], [ h,  h,  h], [ h,  h, -h], [-h,  h, -h],
        // Bottom face
        [-h, -h, -h], [ h, -h, -h], [ h, -h,  h], [-h, -h,  h],
    ];

    let face_normals = [
        [0.0, 0.0, 1.0],
        [0.0, 0.0, -1.0],
        [-1.0, 0.0, 0.0],
        [1.0, 0.0, 0.0],
        [0.0, 1.0, 0.0],
        [0.0, -1.0, 0.0],
    ];

    data.vertices = positions.to_vec();
    data.normals = face_normals
        .iter()
        .flat_map(|normal| std::iter::repeat(*normal).take(4))
        .collect();

    for face in 0..6u32 {
        let base = face * 4;
        data.indices
            .extend_from_slice(&[base, base + 1, base + 2, base + 2, base + 3, base]);
    }

    data
}

/// Generate a plane in the XY plane with its normal along +Z
///
/// # Arguments
/// * `width` - Extent along X
/// * `height` - Extent along Y
/// * `width_segments` - Subdivisions along X (at least 1)
/// * `height_segments` - Subdivisions along Y (at least 1)
///
/// Rotate by -90° about X to lay it flat as a floor.
pub fn generate_plane(
    width: f32,
    height: f32,
    width_segments: u32,
    height_segments: u32,
) -> GeometryData {
    let mut data = GeometryData::new(Topology::Triangles);

    let w_segs = width_segments.max(1);
    let h_segs = height_segments.max(1);

    for y in 0..=h_segs {
        let v = y as f32 / h_segs as f32;
        let pos_y = (v - 0.5) * height;

        for x in 0..=w_segs {
            let u = x as f32 / w_segs as f32;
            let pos_x = (u - 0.5) * width;

            data.vertices.push([pos_x, pos_y, 0.0]);
            data.normals.push([0.0, 0.0, 1.0]);
        }
    }

    // Counter-clockwise when viewed from +Z
    for y in 0..h_segs {
        for x in 0..w_segs {
            let i = y * (w_segs + 1) + x;
            let next_row = i + w_segs + 1;

            data.indices.push(i);
            data.indices.push(i + 1);
            data.indices.push(next_row);

            data.indices.push(i + 1);
            data.indices.push(next_row + 1);
            data.indices.push(next_row);
        }
    }

    data
}

/// Generate the 12 edges of a cube with edge length `size` as a line list
///
/// Matches the silhouette of [`generate_cube`] so it can be overlaid on it.
pub fn generate_box_edges(size: f32) -> GeometryData {
    let mut data = GeometryData::new(Topology::Lines);
    let h = size * 0.5;

    // Corner i has x = bit 0, y = bit 1, z = bit 2
    for i in 0..8u32 {
        let pick = |bit: u32| if i & bit != 0 { h } else { -h };
        let corner = [pick(1), pick(2), pick(4)];
        data.vertices.push(corner);

        let length = (corner[0] * corner[0] + corner[1] * corner[1] + corner[2] * corner[2]).sqrt();
        data.normals.push(if length > 0.0 {
            [corner[0] / length, corner[1] / length, corner[2] / length]
        } else {
            [0.0, 1.0, 0.0]
        });
    }

    // Two corners share an edge when they differ in exactly one bit
    for a in 0..8u32 {
        for bit in [1u32, 2, 4] {
            let b = a | bit;
            if b != a {
                data.indices.push(a);
                data.indices.push(b);
            }
        }
    }

    data
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cube_generation() {
        let cube = generate_cube(1.0);
        assert_eq!(cube.vertices.len(), 24); // 6 faces * 4 vertices
        assert_eq!(cube.indices.len(), 36); // 6 faces * 2 triangles * 3 indices
        assert_eq!(cube.normals.len(), cube.vertices.len());
        assert_eq!(cube.triangle_count(), 12);
        assert_eq!(cube.topology, Topology::Triangles);
    }

    #[test]
    fn test_cube_size_scales_extent() {
        let cube = generate_cube(2.0);
        for vertex in &cube.vertices {
            for component in vertex {
                assert_eq!(component.abs(), 1.0);
            }
        }
    }

    #[test]
    fn test_cube_faces_wind_counter_clockwise() {
        let cube = generate_cube(1.0);
        for (t, triangle) in cube.indices.chunks(3).enumerate() {
            let [a, b, c] = [
                cube.vertices[triangle[0] as usize],
                cube.vertices[triangle[1] as usize],
                cube.vertices[triangle[2] as usize],
            ];
            let e1 = [b[0] - a[0], b[1] - a[1], b[2] - a[2]];
            let e2 = [c[0] - a[0], c[1] - a[1], c[2] - a[2]];
            let cross = [
                e1[1] * e2[2] - e1[2] * e2[1],
                e1[2] * e2[0] - e1[0] * e2[2],
                e1[0] * e2[1] - e1[1] * e2[0],
            ];
            let normal = cube.normals[triangle[0] as usize];
            let dot = cross[0] * normal[0] + cross[1] * normal[1] + cross[2] * normal[2];
            assert!(dot > 0.0, "triangle {} winds against its normal", t);
        }
    }

    #[test]
    fn test_plane_generation() {
        let plane = generate_plane(2.0, 2.0, 2, 2);
        assert_eq!(plane.vertices.len(), 9); // 3x3 grid
        assert_eq!(plane.indices.len(), 24); // 4 quads * 2 triangles * 3 indices
        assert!(plane.normals.iter().all(|n| *n == [0.0, 0.0, 1.0]));
    }

    #[test]
    fn test_plane_clamps_segments() {
        let plane = generate_plane(10.0, 10.0, 0, 0);
        assert_eq!(plane.vertices.len(), 4);
        assert_eq!(plane.triangle_count(), 2);
    }

    #[test]
    fn test_box_edges() {
        let edges = generate_box_edges(1.0);
        assert_eq!(edges.vertices.len(), 8);
        assert_eq!(edges.segment_count(), 12);
        assert_eq!(edges.triangle_count(), 0);

        // Every edge is axis-aligned with the cube's edge length
        for segment in edges.indices.chunks(2) {
            let a = edges.vertices[segment[0] as usize];
            let b = edges.vertices[segment[1] as usize];
            let differing = (0..3).filter(|&axis| a[axis] != b[axis]).count();
            assert_eq!(differing, 1);
            let length: f32 = (0..3).map(|axis| (a[axis] - b[axis]).abs()).sum();
            assert_eq!(length, 1.0);
        }
    }
}
