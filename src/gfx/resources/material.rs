//! Material definitions
//!
//! A material is plain data owned by its scene object. The render engine
//! turns it into a [`MaterialUniform`] when the object is uploaded.

/// GPU uniform data for materials
///
/// MUST match the `Material` struct in the shaders.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MaterialUniform {
    pub base_color: [f32; 4],
    pub metallic: f32,
    pub roughness: f32,
    /// 1.0 when back faces should be lit as front faces
    pub double_sided: f32,
    _padding: f32,
}

/// Surface description with metallic/roughness parameters
///
/// Line geometry only uses `base_color`.
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub name: String,
    pub base_color: [f32; 4],
    pub metallic: f32,
    pub roughness: f32,
    /// Render both faces; back faces are shaded with a flipped normal
    pub double_sided: bool,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            name: "Default".to_string(),
            base_color: [0.8, 0.8, 0.8, 1.0],
            metallic: 0.0,
            roughness: 0.5,
            double_sided: false,
        }
    }
}

impl Material {
    /// Creates a new material
    ///
    /// # Arguments
    /// * `name` - Name used in debug labels
    /// * `base_color` - RGBA base color
    /// * `metallic` - Metallic factor (0.0 = dielectric, 1.0 = metallic)
    /// * `roughness` - Surface roughness (0.0 = mirror, 1.0 = rough)
    pub fn new(name: &str, base_color: [f32; 4], metallic: f32, roughness: f32) -> Self {
        Self {
            name: name.to_string(),
            base_color,
            metallic: metallic.clamp(0.0, 1.0),
            roughness: roughness.clamp(0.0, 1.0),
            double_sided: false,
        }
    }

    /// Opaque material from an RGB colour
    pub fn from_rgb(name: &str, rgb: [f32; 3], metallic: f32, roughness: f32) -> Self {
        Self::new(name, [rgb[0], rgb[1], rgb[2], 1.0], metallic, roughness)
    }

    pub fn with_double_sided(mut self, double_sided: bool) -> Self {
        self.double_sided = double_sided;
        self
    }

    pub fn to_uniform(&self) -> MaterialUniform {
        MaterialUniform {
            base_color: self.base_color,
            metallic: self.metallic,
            roughness: self.roughness,
            double_sided: if self.double_sided { 1.0 } else { 0.0 },
            _padding: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factors_are_clamped() {
        let material = Material::new("m", [1.0; 4], 2.0, -1.0);
        assert_eq!(material.metallic, 1.0);
        assert_eq!(material.roughness, 0.0);
    }

    #[test]
    fn test_uniform_layout() {
        assert_eq!(std::mem::size_of::<MaterialUniform>(), 32);
        let uniform = Material::from_rgb("m", [0.0, 1.0, 0.0], 0.5, 0.5)
            .with_double_sided(true)
            .to_uniform();
        assert_eq!(uniform.base_color, [0.0, 1.0, 0.0, 1.0]);
        assert_eq!(uniform.double_sided, 1.0);
    }
}
