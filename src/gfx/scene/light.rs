//! Scene lighting: one ambient term and one point light.

use cgmath::Vector3;

use crate::config::LightConfig;

/// Uniform light reaching every surface regardless of orientation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmbientLight {
    pub color: [f32; 3],
    pub intensity: f32,
}

/// Omnidirectional light at a position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLight {
    pub position: Vector3<f32>,
    pub color: [f32; 3],
    pub intensity: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lights {
    pub ambient: AmbientLight,
    pub point: PointLight,
}

impl Lights {
    pub fn from_config(config: &LightConfig) -> Self {
        Self {
            ambient: AmbientLight {
                color: config.ambient_color,
                intensity: config.ambient_intensity,
            },
            point: PointLight {
                position: Vector3::from(config.point_position),
                color: config.point_color,
                intensity: config.point_intensity,
            },
        }
    }
}

impl Default for Lights {
    fn default() -> Self {
        Self::from_config(&LightConfig::default())
    }
}
