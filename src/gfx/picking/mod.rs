//! # Object Picking System
//!
//! Mouse ray-casting against scene objects and against the drag plane.
//!
//! ## How it works
//!
//! 1. **Pointer to NDC**: window pixels are rescaled to [-1, 1] with Y pointing up
//! 2. **NDC to Ray**: the near and far points are unprojected through the camera
//! 3. **Ray-Object Intersection**: the ray is moved into each object's local
//!    space and tested against the object's local bounding box, which is exact
//!    for boxes under any rotation
//! 4. **Selection**: the closest hit wins
//!
//! ## Usage
//!
//! ```no_run
//! use dragcube::gfx::picking::ObjectPicker;
//! # fn demo(camera: &dragcube::gfx::camera::OrbitCamera, scene: &dragcube::gfx::scene::Scene) {
//! let picker = ObjectPicker::new(1200.0, 800.0);
//! let ray = picker.screen_to_ray((600.0, 400.0), camera);
//! if let Some(hit) = picker.pick(&ray, scene, |object| object.draggable) {
//!     println!("Selected object: {:?}", hit.object);
//! }
//! # }
//! ```

use cgmath::{ElementWise, InnerSpace, Matrix4, SquareMatrix, Vector3, Vector4, Zero};

use crate::gfx::{
    camera::orbit_camera::OrbitCamera,
    scene::{ObjectId, Scene, SceneObject},
};

/// Below this, a ray is treated as parallel to a plane
const PARALLEL_EPSILON: f32 = 1e-6;

/// A 3D ray for intersection testing
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// Ray origin point in world space
    pub origin: Vector3<f32>,
    /// Ray direction (normalized)
    pub direction: Vector3<f32>,
}

impl Ray {
    /// Create a new ray; `direction` is normalized
    pub fn new(origin: Vector3<f32>, direction: Vector3<f32>) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
        }
    }

    /// Get a point along the ray at distance t
    pub fn point_at(&self, t: f32) -> Vector3<f32> {
        self.origin + self.direction * t
    }

    /// Applies an affine transform to origin and direction.
    ///
    /// The direction is not renormalized, so a parameter `t` on the result
    /// maps to the same point as `t` on the original ray.
    fn transformed(&self, matrix: &Matrix4<f32>) -> Self {
        let origin = matrix * self.origin.extend(1.0);
        let direction = matrix * self.direction.extend(0.0);
        Self {
            origin: origin.truncate() / origin.w,
            direction: direction.truncate(),
        }
    }
}

/// Plane defined by `normal · p + constant = 0`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    pub normal: Vector3<f32>,
    pub constant: f32,
}

impl Plane {
    pub fn new(normal: Vector3<f32>, constant: f32) -> Self {
        Self {
            normal: normal.normalize(),
            constant,
        }
    }

    /// Horizontal plane with an upward normal through `y = height`
    pub fn horizontal(height: f32) -> Self {
        Self::new(Vector3::unit_y(), -height)
    }

    pub fn distance_to_point(&self, point: Vector3<f32>) -> f32 {
        self.normal.dot(point) + self.constant
    }

    /// Ray parameter where `ray` meets the plane.
    ///
    /// `None` when the ray is parallel to the plane or the plane lies behind
    /// the ray origin.
    pub fn intersect_ray_distance(&self, ray: &Ray) -> Option<f32> {
        let denominator = self.normal.dot(ray.direction);
        if denominator.abs() < PARALLEL_EPSILON {
            return None;
        }
        let t = -self.distance_to_point(ray.origin) / denominator;
        (t >= 0.0).then_some(t)
    }

    pub fn intersect_ray(&self, ray: &Ray) -> Option<Vector3<f32>> {
        self.intersect_ray_distance(ray).map(|t| ray.point_at(t))
    }
}

/// Axis-aligned bounding box for intersection testing
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner of the bounding box
    pub min: Vector3<f32>,
    /// Maximum corner of the bounding box
    pub max: Vector3<f32>,
}

impl Aabb {
    pub fn new(min: Vector3<f32>, max: Vector3<f32>) -> Self {
        Self { min, max }
    }

    /// Create AABB from a set of vertices
    pub fn from_vertices(vertices: &[[f32; 3]]) -> Self {
        let Some(first) = vertices.first() else {
            return Self::new(Vector3::zero(), Vector3::zero());
        };

        let mut min = Vector3::from(*first);
        let mut max = min;

        for vertex in vertices.iter().skip(1) {
            min.x = min.x.min(vertex[0]);
            min.y = min.y.min(vertex[1]);
            min.z = min.z.min(vertex[2]);
            max.x = max.x.max(vertex[0]);
            max.y = max.y.max(vertex[1]);
            max.z = max.z.max(vertex[2]);
        }

        Self::new(min, max)
    }

    /// Test ray-AABB intersection (slab method)
    ///
    /// Returns the ray parameter of the entry point, or of the exit point if
    /// the origin is inside the box.
    pub fn intersect_ray(&self, ray: &Ray) -> Option<f32> {
        let inv_dir = Vector3::new(
            1.0 / ray.direction.x,
            1.0 / ray.direction.y,
            1.0 / ray.direction.z,
        );

        let t_min = (self.min - ray.origin).mul_element_wise(inv_dir);
        let t_max = (self.max - ray.origin).mul_element_wise(inv_dir);

        let t1 = Vector3::new(
            t_min.x.min(t_max.x),
            t_min.y.min(t_max.y),
            t_min.z.min(t_max.z),
        );
        let t2 = Vector3::new(
            t_min.x.max(t_max.x),
            t_min.y.max(t_max.y),
            t_min.z.max(t_max.z),
        );

        let t_near = t1.x.max(t1.y.max(t1.z));
        let t_far = t2.x.min(t2.y.min(t2.z));

        if t_near <= t_far && t_far >= 0.0 {
            Some(if t_near >= 0.0 { t_near } else { t_far })
        } else {
            None
        }
    }
}

/// Result of an object picking operation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickResult {
    pub object: ObjectId,
    /// Distance from the ray origin to the intersection point
    pub distance: f32,
    /// World space intersection point
    pub intersection_point: Vector3<f32>,
}

/// Converts pointer positions into rays for a viewport of a given size
#[derive(Debug, Clone, Copy)]
pub struct ObjectPicker {
    screen_size: (f32, f32),
}

impl ObjectPicker {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            screen_size: (width.max(1.0), height.max(1.0)),
        }
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        if width <= 0.0 || height <= 0.0 {
            return;
        }
        self.screen_size = (width, height);
    }

    pub fn screen_size(&self) -> (f32, f32) {
        self.screen_size
    }

    /// Convert window coordinates to normalized device coordinates (-1 to 1)
    pub fn screen_to_ndc(&self, screen_pos: (f32, f32)) -> (f32, f32) {
        let (width, height) = self.screen_size;
        let ndc_x = (2.0 * screen_pos.0) / width - 1.0;
        let ndc_y = 1.0 - (2.0 * screen_pos.1) / height; // Flip Y axis
        (ndc_x, ndc_y)
    }

    /// Inverse of [`ObjectPicker::screen_to_ndc`]
    pub fn ndc_to_screen(&self, ndc: (f32, f32)) -> (f32, f32) {
        let (width, height) = self.screen_size;
        ((ndc.0 + 1.0) * 0.5 * width, (1.0 - ndc.1) * 0.5 * height)
    }

    pub fn screen_to_ray(&self, screen_pos: (f32, f32), camera: &OrbitCamera) -> Ray {
        ndc_to_ray(self.screen_to_ndc(screen_pos), camera)
    }

    /// Closest object accepted by `filter` that `ray` hits
    pub fn pick<F>(&self, ray: &Ray, scene: &Scene, filter: F) -> Option<PickResult>
    where
        F: Fn(&SceneObject) -> bool,
    {
        scene
            .iter()
            .filter(|(_, object)| object.visible && filter(object))
            .filter_map(|(id, object)| intersect_object(ray, id, object))
            .min_by(|a, b| a.distance.total_cmp(&b.distance))
    }
}

/// Unprojects a point in normalized device coordinates into a world-space ray
pub fn ndc_to_ray(ndc: (f32, f32), camera: &OrbitCamera) -> Ray {
    let view_proj = camera.projection_matrix() * camera.view_matrix();
    let inv_view_proj = view_proj.invert().unwrap_or_else(Matrix4::identity);

    let unproject = |z: f32| {
        let world = inv_view_proj * Vector4::new(ndc.0, ndc.1, z, 1.0);
        world.truncate() / world.w
    };

    let near = unproject(-1.0);
    let far = unproject(1.0);
    Ray::new(near, far - near)
}

/// Tests `ray` against the object's bounds in the object's local space
pub fn intersect_object(ray: &Ray, id: ObjectId, object: &SceneObject) -> Option<PickResult> {
    let model = object.transform.matrix();
    let inverse = model.invert()?;
    let local_ray = ray.transformed(&inverse);
    let t = object.local_bounds().intersect_ray(&local_ray)?;
    let intersection_point = ray.point_at(t);

    Some(PickResult {
        object: id,
        distance: t,
        intersection_point,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CameraConfig;
    use crate::gfx::{
        geometry::generate_cube,
        resources::material::Material,
        scene::{SceneObject, Transform},
    };
    use approx::assert_abs_diff_eq;

    fn default_camera() -> OrbitCamera {
        OrbitCamera::from_config(&CameraConfig::default(), 1200.0 / 800.0)
    }

    fn cube_scene(position: Vector3<f32>) -> (Scene, ObjectId) {
        let mut scene = Scene::new();
        let mut cube = SceneObject::new("cube", generate_cube(1.0), Material::default());
        cube.transform = Transform::from_position(position);
        cube.draggable = true;
        let id = scene.add_object(cube);
        (scene, id)
    }

    #[test]
    fn test_aabb_creation() {
        let vertices = vec![[0.0, 0.0, 0.0], [1.0, 1.0, 1.0], [-1.0, -1.0, -1.0]];
        let aabb = Aabb::from_vertices(&vertices);

        assert_eq!(aabb.min, Vector3::new(-1.0, -1.0, -1.0));
        assert_eq!(aabb.max, Vector3::new(1.0, 1.0, 1.0));
    }

    #[test]
    fn test_ray_aabb_intersection() {
        let aabb = Aabb::new(Vector3::new(-1.0, -1.0, -1.0), Vector3::new(1.0, 1.0, 1.0));

        let ray = Ray::new(Vector3::new(0.0, 0.0, -5.0), Vector3::new(0.0, 0.0, 1.0));
        assert_eq!(aabb.intersect_ray(&ray), Some(4.0));

        let ray_miss = Ray::new(Vector3::new(5.0, 0.0, -5.0), Vector3::new(0.0, 0.0, 1.0));
        assert!(aabb.intersect_ray(&ray_miss).is_none());

        let ray_away = Ray::new(Vector3::new(0.0, 0.0, -5.0), Vector3::new(0.0, 0.0, -1.0));
        assert!(aabb.intersect_ray(&ray_away).is_none());
    }

    #[test]
    fn test_plane_intersection() {
        let plane = Plane::horizontal(0.0);
        let ray = Ray::new(Vector3::new(0.0, 5.0, 10.0), Vector3::new(2.0, -5.0, -7.0));
        let point = plane.intersect_ray(&ray).expect("ray points at the floor");
        assert_abs_diff_eq!(point.x, 2.0, epsilon = 1e-5);
        assert_abs_diff_eq!(point.y, 0.0, epsilon = 1e-5);
        assert_abs_diff_eq!(point.z, 3.0, epsilon = 1e-5);
    }

    #[test]
    fn test_plane_parallel_ray_has_no_intersection() {
        let plane = Plane::horizontal(0.0);
        let ray = Ray::new(Vector3::new(0.0, 1.0, 0.0), Vector3::new(1.0, 0.0, 0.0));
        assert!(plane.intersect_ray(&ray).is_none());
    }

    #[test]
    fn test_plane_behind_ray_has_no_intersection() {
        let plane = Plane::horizontal(0.0);
        let ray = Ray::new(Vector3::new(0.0, 1.0, 0.0), Vector3::new(0.0, 1.0, 0.0));
        assert!(plane.intersect_ray(&ray).is_none());
    }

    #[test]
    fn test_ndc_round_trip_of_screen_corners() {
        let picker = ObjectPicker::new(1200.0, 800.0);
        assert_eq!(picker.screen_to_ndc((0.0, 0.0)), (-1.0, 1.0));
        assert_eq!(picker.screen_to_ndc((1200.0, 800.0)), (1.0, -1.0));
        assert_eq!(picker.screen_to_ndc((600.0, 400.0)), (0.0, 0.0));
        assert_eq!(picker.ndc_to_screen((0.5, -0.5)), (900.0, 600.0));
    }

    #[test]
    fn test_center_ray_passes_through_target() {
        let camera = default_camera();
        let ray = ndc_to_ray((0.0, 0.0), &camera);
        let to_target = (camera.target - ray.origin).normalize();
        assert_abs_diff_eq!(ray.direction.dot(to_target), 1.0, epsilon = 1e-4);
    }

    #[test]
    fn test_pick_hits_cube_at_screen_center() {
        let camera = default_camera();
        let picker = ObjectPicker::new(1200.0, 800.0);
        let (scene, id) = cube_scene(Vector3::zero());

        let ray = picker.screen_to_ray((600.0, 400.0), &camera);
        let hit = picker.pick(&ray, &scene, |o| o.draggable).expect("cube is under the cursor");
        assert_eq!(hit.object, id);
        assert!(hit.distance > 0.0);
    }

    #[test]
    fn test_pick_misses_from_corner() {
        let camera = default_camera();
        let picker = ObjectPicker::new(1200.0, 800.0);
        let (scene, _) = cube_scene(Vector3::zero());

        let ray = picker.screen_to_ray((0.0, 0.0), &camera);
        assert!(picker.pick(&ray, &scene, |o| o.draggable).is_none());
    }

    #[test]
    fn test_pick_respects_rotation() {
        // A ray grazing the corner of the axis-aligned box misses once the
        // box is turned 45 degrees about Y
        let (mut scene, id) = cube_scene(Vector3::zero());
        let ray = Ray::new(Vector3::new(0.45, 0.0, 10.0), Vector3::new(0.0, 0.0, -1.0));
        let picker = ObjectPicker::new(100.0, 100.0);
        assert!(picker.pick(&ray, &scene, |_| true).is_some());

        scene.rotate_by(id, Vector3::new(0.0, std::f32::consts::FRAC_PI_4, 0.0));
        let ray = Ray::new(Vector3::new(0.69, 0.0, 10.0), Vector3::new(0.0, 0.0, -1.0));
        assert!(picker.pick(&ray, &scene, |_| true).is_some());
        let ray = Ray::new(Vector3::new(0.72, 0.0, 10.0), Vector3::new(0.0, 0.0, -1.0));
        assert!(picker.pick(&ray, &scene, |_| true).is_none());
    }

    #[test]
    fn test_pick_ignores_filtered_objects() {
        let camera = default_camera();
        let picker = ObjectPicker::new(1200.0, 800.0);
        let (scene, _) = cube_scene(Vector3::zero());
        let ray = picker.screen_to_ray((600.0, 400.0), &camera);
        assert!(picker.pick(&ray, &scene, |o| !o.draggable).is_none());
    }

    #[test]
    fn test_pick_returns_closest() {
        let mut scene = Scene::new();
        let mut far = SceneObject::new("far", generate_cube(1.0), Material::default());
        far.transform = Transform::from_position(Vector3::new(0.0, 0.0, -3.0));
        scene.add_object(far);
        let near_id = scene.add_object(SceneObject::new(
            "near",
            generate_cube(1.0),
            Material::default(),
        ));

        let ray = Ray::new(Vector3::new(0.0, 0.0, 10.0), Vector3::new(0.0, 0.0, -1.0));
        let hit = ObjectPicker::new(1.0, 1.0).pick(&ray, &scene, |_| true).expect("two cubes on the ray");
        assert_eq!(hit.object, near_id);
        assert_abs_diff_eq!(hit.distance, 9.5, epsilon = 1e-5);
        assert_abs_diff_eq!(hit.intersection_point.z, 0.5, epsilon = 1e-5);
    }
}
