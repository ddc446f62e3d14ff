//! # Procedural Geometry Generation
//!
//! Generates the handful of shapes the scene needs, so no model files are
//! loaded at runtime.
//!
//! ## Supported Primitives
//!
//! - **Cube**: box centred at the origin with per-face normals
//! - **Plane**: subdivided plane lying in XY with a +Z normal
//! - **Box edges**: the 12 edges of a box as a line list, used for wireframe overlays
//!
//! ## Usage
//!
//! ```rust
//! use dragcube::gfx::geometry::{generate_box_edges, generate_cube, generate_plane};
//!
//! let cube = generate_cube(1.0);
//! let edges = generate_box_edges(1.0);
//! let floor = generate_plane(10.0, 10.0, 1, 1);
//! assert_eq!(edges.segment_count(), 12);
//! ```

pub mod primitives;

pub use primitives::*;

use crate::gfx::scene::vertex::Vertex3D;

/// How the index buffer of a [`GeometryData`] is to be interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topology {
    /// Every 3 indices form a counter-clockwise triangle
    Triangles,
    /// Every 2 indices form a line segment
    Lines,
}

/// Generated geometry data ready for GPU upload
#[derive(Debug, Clone)]
pub struct GeometryData {
    /// Vertex positions (x, y, z)
    pub vertices: Vec<[f32; 3]>,
    /// Normal vectors (x, y, z), one per vertex
    pub normals: Vec<[f32; 3]>,
    pub indices: Vec<u32>,
    pub topology: Topology,
}

impl GeometryData {
    /// Create a new empty geometry data structure
    pub fn new(topology: Topology) -> Self {
        Self {
            vertices: Vec::new(),
            normals: Vec::new(),
            indices: Vec::new(),
            topology,
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of triangles, zero for line geometry
    pub fn triangle_count(&self) -> usize {
        match self.topology {
            Topology::Triangles => self.indices.len() / 3,
            Topology::Lines => 0,
        }
    }

    /// Number of line segments, zero for triangle geometry
    pub fn segment_count(&self) -> usize {
        match self.topology {
            Topology::Lines => self.indices.len() / 2,
            Topology::Triangles => 0,
        }
    }

    /// Interleaves positions and normals into the renderer's vertex format
    pub fn to_vertices(&self) -> Vec<Vertex3D> {
        self.vertices
            .iter()
            .enumerate()
            .map(|(i, position)| Vertex3D {
                position: *position,
                normal: self.normals.get(i).copied().unwrap_or([0.0, 1.0, 0.0]),
            })
            .collect()
    }
}
