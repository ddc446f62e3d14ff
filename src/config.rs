//! Scene configuration
//!
//! Every tunable constant of the demo scene lives here so the controller,
//! camera and renderer never hard-code values. `SceneConfig::default()`
//! reproduces the stock scene: white background, grey floor and wall, a
//! shiny green cube with black edges, ambient plus point lighting and a
//! camera at (0, 5, 10) looking at the origin.

use cgmath::{Deg, Point3};

/// Window creation settings
#[derive(Debug, Clone)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub vsync: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "dragcube".to_string(),
            width: 1200,
            height: 800,
            vsync: true,
        }
    }
}

/// Perspective camera placement and projection
#[derive(Debug, Clone, Copy)]
pub struct CameraConfig {
    pub eye: Point3<f32>,
    pub target: Point3<f32>,
    /// Vertical field of view
    pub fovy: Deg<f32>,
    pub znear: f32,
    pub zfar: f32,
    pub min_distance: Option<f32>,
    pub max_distance: Option<f32>,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            eye: Point3::new(0.0, 5.0, 10.0),
            target: Point3::new(0.0, 0.0, 0.0),
            fovy: Deg(75.0),
            znear: 0.1,
            zfar: 1000.0,
            min_distance: Some(1.1),
            max_distance: Some(100.0),
        }
    }
}

/// Orbit controller sensitivity and damping
#[derive(Debug, Clone, Copy)]
pub struct ControlsConfig {
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub pan_speed: f32,
    /// Fraction of the pending motion applied per tick, in (0, 1]
    pub damping_factor: f32,
}

impl Default for ControlsConfig {
    fn default() -> Self {
        Self {
            rotate_speed: 1.0,
            zoom_speed: 0.1,
            pan_speed: 1.0,
            damping_factor: 0.05,
        }
    }
}

/// Ambient and point light parameters
#[derive(Debug, Clone, Copy)]
pub struct LightConfig {
    pub ambient_color: [f32; 3],
    pub ambient_intensity: f32,
    pub point_position: [f32; 3],
    pub point_color: [f32; 3],
    pub point_intensity: f32,
}

impl Default for LightConfig {
    fn default() -> Self {
        Self {
            ambient_color: [1.0, 1.0, 1.0],
            ambient_intensity: 0.5,
            point_position: [5.0, 5.0, 5.0],
            point_color: [1.0, 1.0, 1.0],
            point_intensity: 1.0,
        }
    }
}

/// Idle spin applied to the cube while nothing is being dragged
#[derive(Debug, Clone, Copy)]
pub struct AnimationConfig {
    /// Radians added to the X and Y Euler angles per tick
    pub spin_per_tick: [f32; 2],
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            spin_per_tick: [0.01, 0.01],
        }
    }
}

/// Colours and sizes of the scene's objects
#[derive(Debug, Clone, Copy)]
pub struct StageConfig {
    pub background: [f32; 4],
    pub floor_size: f32,
    pub floor_color: [f32; 3],
    pub wall_size: f32,
    pub wall_color: [f32; 3],
    pub wall_offset: f32,
    pub cube_size: f32,
    pub cube_position: [f32; 3],
    pub cube_color: [f32; 3],
    pub cube_roughness: f32,
    pub cube_metallic: f32,
    pub edge_color: [f32; 3],
}

impl Default for StageConfig {
    fn default() -> Self {
        Self {
            background: [1.0, 1.0, 1.0, 1.0],
            floor_size: 10.0,
            floor_color: hex_rgb(0xe0e0e0),
            wall_size: 10.0,
            wall_color: hex_rgb(0xd3d3d3),
            wall_offset: -5.0,
            cube_size: 1.0,
            cube_position: [0.0, 0.0, 0.0],
            cube_color: hex_rgb(0x00ff00),
            cube_roughness: 0.5,
            cube_metallic: 0.5,
            edge_color: hex_rgb(0x000000),
        }
    }
}

/// Top-level configuration for the whole application
#[derive(Debug, Clone, Default)]
pub struct SceneConfig {
    pub window: WindowConfig,
    pub camera: CameraConfig,
    pub controls: ControlsConfig,
    pub lights: LightConfig,
    pub animation: AnimationConfig,
    pub stage: StageConfig,
}

impl SceneConfig {
    pub fn with_window(mut self, window: WindowConfig) -> Self {
        self.window = window;
        self
    }

    pub fn with_camera(mut self, camera: CameraConfig) -> Self {
        self.camera = camera;
        self
    }

    pub fn with_controls(mut self, controls: ControlsConfig) -> Self {
        self.controls = controls;
        self
    }

    pub fn with_lights(mut self, lights: LightConfig) -> Self {
        self.lights = lights;
        self
    }

    pub fn with_animation(mut self, animation: AnimationConfig) -> Self {
        self.animation = animation;
        self
    }

    pub fn with_stage(mut self, stage: StageConfig) -> Self {
        self.stage = stage;
        self
    }
}

/// Converts a 0xRRGGBB literal into linear-ish RGB floats in [0, 1]
pub fn hex_rgb(hex: u32) -> [f32; 3] {
    [
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_rgb() {
        assert_eq!(hex_rgb(0x00ff00), [0.0, 1.0, 0.0]);
        assert_eq!(hex_rgb(0x000000), [0.0, 0.0, 0.0]);
        assert_eq!(hex_rgb(0xffffff), [1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_default_camera_matches_stock_scene() {
        let config = SceneConfig::default();
        assert_eq!(config.camera.eye, Point3::new(0.0, 5.0, 10.0));
        assert_eq!(config.camera.fovy, Deg(75.0));
        assert_eq!(config.controls.damping_factor, 0.05);
        assert_eq!(config.animation.spin_per_tick, [0.01, 0.01]);
    }

    #[test]
    fn test_builder_replaces_section() {
        let config = SceneConfig::default().with_animation(AnimationConfig {
            spin_per_tick: [0.0, 0.5],
        });
        assert_eq!(config.animation.spin_per_tick, [0.0, 0.5]);
        assert_eq!(config.window.width, 1200);
    }
}
