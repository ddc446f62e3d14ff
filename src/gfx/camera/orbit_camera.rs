use cgmath::*;

use super::camera_utils::{convert_matrix4_to_array, Camera, CameraUniform};
use crate::config::CameraConfig;

#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: cgmath::Matrix4<f32> = cgmath::Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.5,
    0.0, 0.0, 0.0, 1.0,
);

/// Perspective camera parameterised by spherical coordinates around a target.
///
/// `yaw` is the azimuth around +Y measured from +Z, `pitch` the elevation
/// above the XZ plane. The eye position is always derived from these and the
/// target, never set directly.
#[derive(Debug, Clone, Copy)]
pub struct OrbitCamera {
    pub distance: f32,
    pub pitch: f32,
    pub yaw: f32,
    pub eye: Vector3<f32>,
    pub target: Vector3<f32>,
    pub up: Vector3<f32>,
    pub bounds: OrbitCameraBounds,
    pub aspect: f32,
    pub fovy: Rad<f32>,
    pub znear: f32,
    pub zfar: f32,
    pub uniform: CameraUniform,
}

impl Camera for OrbitCamera {
    fn build_view_projection_matrix(&self) -> Matrix4<f32> {
        OPENGL_TO_WGPU_MATRIX * self.projection_matrix() * self.view_matrix()
    }
}

impl OrbitCamera {
    pub fn new(distance: f32, pitch: f32, yaw: f32, target: Vector3<f32>, aspect: f32) -> Self {
        let mut camera = Self {
            distance,
            pitch,
            yaw,
            eye: Vector3::zero(), // Will be auto-calculated in `update()` nevertheless.
            target,
            up: Vector3::unit_y(),
            bounds: OrbitCameraBounds::default(),
            aspect,
            fovy: Rad(std::f32::consts::PI / 4.0),
            znear: 0.1,
            zfar: 1000.0,
            uniform: CameraUniform::default(),
        };
        camera.update();
        camera
    }

    /// Builds a camera placed at `config.eye` looking at `config.target`
    pub fn from_config(config: &CameraConfig, aspect: f32) -> Self {
        let target = config.target.to_vec();
        let offset = config.eye.to_vec() - target;
        let distance = offset.magnitude();
        let (pitch, yaw) = if distance > f32::EPSILON {
            ((offset.y / distance).clamp(-1.0, 1.0).asin(), offset.x.atan2(offset.z))
        } else {
            (0.0, 0.0)
        };

        let mut camera = Self::new(distance, pitch, yaw, target, aspect);
        camera.fovy = config.fovy.into();
        camera.znear = config.znear;
        camera.zfar = config.zfar;
        camera.bounds.min_distance = config.min_distance;
        camera.bounds.max_distance = config.max_distance;
        camera.update_view_proj();
        camera
    }

    pub fn view_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(
            Point3::from_vec(self.eye),
            Point3::from_vec(self.target),
            self.up,
        )
    }

    /// OpenGL-convention projection (clip z in [-1, 1]), used for unprojection
    pub fn projection_matrix(&self) -> Matrix4<f32> {
        perspective(self.fovy, self.aspect, self.znear, self.zfar)
    }

    pub fn set_distance(&mut self, distance: f32) {
        self.distance = distance.clamp(
            self.bounds.min_distance.unwrap_or(f32::EPSILON),
            self.bounds.max_distance.unwrap_or(f32::MAX),
        );
        self.update();
    }

    pub fn add_distance(&mut self, delta: f32) {
        // Proportional to distance so each wheel notch feels the same at any zoom level
        let corrected_zoom = self.distance * delta;
        self.set_distance(self.distance + corrected_zoom);
    }

    pub fn set_pitch(&mut self, pitch: f32) {
        self.pitch = pitch.clamp(self.bounds.min_pitch, self.bounds.max_pitch);
        self.update();
    }

    pub fn add_pitch(&mut self, delta: f32) {
        self.set_pitch(self.pitch + delta);
    }

    pub fn set_yaw(&mut self, yaw: f32) {
        let mut bounded_yaw = yaw;
        if let Some(min_yaw) = self.bounds.min_yaw {
            bounded_yaw = bounded_yaw.max(min_yaw);
        }
        if let Some(max_yaw) = self.bounds.max_yaw {
            bounded_yaw = bounded_yaw.min(max_yaw);
        }
        self.yaw = bounded_yaw;
        self.update();
    }

    pub fn add_yaw(&mut self, delta: f32) {
        self.set_yaw(self.yaw + delta);
    }

    /// Pans the target relative to the current view direction
    ///
    /// `delta` is expressed in viewport heights: (1, 0) moves the target one
    /// visible frustum height to the right at the target's depth.
    pub fn pan(&mut self, delta: (f32, f32)) {
        let forward = (self.target - self.eye).normalize();
        let right = forward.cross(self.up).normalize();
        let up = right.cross(forward).normalize();

        let visible_height = 2.0 * self.distance * (self.fovy.0 * 0.5).tan();
        self.target += (right * delta.0 + up * delta.1) * visible_height;
        self.update();
    }

    /// Updates the camera after changing `distance`, `pitch`, `yaw` or `target`.
    fn update(&mut self) {
        self.eye =
            calculate_cartesian_eye_position(self.pitch, self.yaw, self.distance, self.target);
    }

    pub fn resize_projection(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.aspect = width as f32 / height as f32;
    }

    pub fn update_view_proj(&mut self) {
        self.uniform.view_position = [self.eye.x, self.eye.y, self.eye.z, 1.0];
        self.uniform.view_proj = convert_matrix4_to_array(self.build_view_projection_matrix());
    }
}

#[derive(Debug, Clone, Copy)]
pub struct OrbitCameraBounds {
    pub min_distance: Option<f32>,
    pub max_distance: Option<f32>,
    pub min_pitch: f32,
    pub max_pitch: f32,
    pub min_yaw: Option<f32>,
    pub max_yaw: Option<f32>,
}

impl Default for OrbitCameraBounds {
    fn default() -> Self {
        Self {
            min_distance: None,
            max_distance: Some(100.0),
            min_pitch: -std::f32::consts::FRAC_PI_2 + 0.001,
            max_pitch: std::f32::consts::FRAC_PI_2 - 0.001,
            min_yaw: None,
            max_yaw: None,
        }
    }
}

fn calculate_cartesian_eye_position(
    pitch: f32,
    yaw: f32,
    distance: f32,
    target: Vector3<f32>,
) -> Vector3<f32> {
    Vector3::new(
        distance * yaw.sin() * pitch.cos(),
        distance * pitch.sin(),
        distance * yaw.cos() * pitch.cos(),
    ) + target
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_from_config_reproduces_eye() {
        let camera = OrbitCamera::from_config(&CameraConfig::default(), 1.5);
        assert_abs_diff_eq!(camera.eye.x, 0.0, epsilon = 1e-5);
        assert_abs_diff_eq!(camera.eye.y, 5.0, epsilon = 1e-5);
        assert_abs_diff_eq!(camera.eye.z, 10.0, epsilon = 1e-5);
        assert_abs_diff_eq!(camera.distance, 125f32.sqrt(), epsilon = 1e-5);
        assert_abs_diff_eq!(camera.fovy.0, 75f32.to_radians(), epsilon = 1e-6);
    }

    #[test]
    fn test_pitch_is_clamped() {
        let mut camera = OrbitCamera::new(5.0, 0.0, 0.0, Vector3::zero(), 1.0);
        camera.add_pitch(10.0);
        assert!(camera.pitch < std::f32::consts::FRAC_PI_2);
        assert!(camera.eye.y > 0.0);
    }

    #[test]
    fn test_distance_respects_bounds() {
        let mut camera = OrbitCamera::new(5.0, 0.0, 0.0, Vector3::zero(), 1.0);
        camera.bounds.min_distance = Some(2.0);
        camera.set_distance(0.5);
        assert_eq!(camera.distance, 2.0);
        camera.set_distance(1000.0);
        assert_eq!(camera.distance, 100.0);
    }

    #[test]
    fn test_pan_moves_target_and_eye_together() {
        let mut camera = OrbitCamera::new(5.0, 0.3, 0.2, Vector3::zero(), 1.0);
        let offset_before = camera.eye - camera.target;
        camera.pan((0.1, -0.05));
        let offset_after = camera.eye - camera.target;
        assert!(camera.target.magnitude() > 0.0);
        assert_abs_diff_eq!(offset_before.x, offset_after.x, epsilon = 1e-5);
        assert_abs_diff_eq!(offset_before.y, offset_after.y, epsilon = 1e-5);
        assert_abs_diff_eq!(offset_before.z, offset_after.z, epsilon = 1e-5);
    }

    #[test]
    fn test_zero_sized_resize_keeps_aspect() {
        let mut camera = OrbitCamera::new(5.0, 0.0, 0.0, Vector3::zero(), 1.5);
        camera.resize_projection(0, 600);
        assert_eq!(camera.aspect, 1.5);
        camera.resize_projection(800, 400);
        assert_eq!(camera.aspect, 2.0);
    }
}
