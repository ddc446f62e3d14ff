use cgmath::{Matrix4, Rad, Vector3, Zero};

use crate::gfx::{geometry::GeometryData, picking::Aabb, resources::material::Material};

/// Stable handle to an object in a [`Scene`](super::Scene)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(pub(crate) u32);

impl ObjectId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Position, Euler rotation and scale of an object
///
/// Rotation is in radians and applied in X, then Y, then Z order of the
/// intrinsic axes, i.e. `R = Rx * Ry * Rz`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vector3<f32>,
    pub rotation: Vector3<f32>,
    pub scale: Vector3<f32>,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vector3::zero(),
            rotation: Vector3::zero(),
            scale: Vector3::new(1.0, 1.0, 1.0),
        }
    }
}

impl Transform {
    pub fn from_position(position: Vector3<f32>) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    pub fn with_rotation(mut self, rotation: Vector3<f32>) -> Self {
        self.rotation = rotation;
        self
    }

    /// Model matrix `T * Rx * Ry * Rz * S`
    pub fn matrix(&self) -> Matrix4<f32> {
        Matrix4::from_translation(self.position)
            * Matrix4::from_angle_x(Rad(self.rotation.x))
            * Matrix4::from_angle_y(Rad(self.rotation.y))
            * Matrix4::from_angle_z(Rad(self.rotation.z))
            * Matrix4::from_nonuniform_scale(self.scale.x, self.scale.y, self.scale.z)
    }
}

/// A renderable entry of the scene graph
pub struct SceneObject {
    pub name: String,
    pub geometry: GeometryData,
    pub material: Material,
    pub transform: Transform,
    /// Whether pointer-down on this object starts a drag
    pub draggable: bool,
    pub visible: bool,
    local_bounds: Aabb,
}

impl SceneObject {
    pub fn new(name: &str, geometry: GeometryData, material: Material) -> Self {
        let local_bounds = Aabb::from_vertices(&geometry.vertices);
        Self {
            name: name.to_string(),
            geometry,
            material,
            transform: Transform::default(),
            draggable: false,
            visible: true,
            local_bounds,
        }
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    pub fn with_draggable(mut self, draggable: bool) -> Self {
        self.draggable = draggable;
        self
    }

    /// Bounding box of the untransformed geometry
    pub fn local_bounds(&self) -> Aabb {
        self.local_bounds
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::geometry::generate_cube;
    use approx::assert_abs_diff_eq;
    use cgmath::Vector4;

    #[test]
    fn test_transform_applies_translation_last() {
        let transform = Transform::from_position(Vector3::new(1.0, 2.0, 3.0))
            .with_rotation(Vector3::new(0.0, std::f32::consts::FRAC_PI_2, 0.0));
        let p = transform.matrix() * Vector4::new(1.0, 0.0, 0.0, 1.0);
        // +X turns into -Z under a quarter turn about Y
        assert_abs_diff_eq!(p.x, 1.0, epsilon = 1e-6);
        assert_abs_diff_eq!(p.y, 2.0, epsilon = 1e-6);
        assert_abs_diff_eq!(p.z, 2.0, epsilon = 1e-6);
    }

    #[test]
    fn test_local_bounds_follow_geometry() {
        let object = SceneObject::new("cube", generate_cube(2.0), Material::default());
        assert_eq!(object.local_bounds().min, Vector3::new(-1.0, -1.0, -1.0));
        assert_eq!(object.local_bounds().max, Vector3::new(1.0, 1.0, 1.0));
        assert!(!object.draggable);
        assert!(object.visible);
    }
}
