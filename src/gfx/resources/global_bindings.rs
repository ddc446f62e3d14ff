//! Global uniform bindings for camera and light data
//!
//! Per-frame data shared by every object in the scene, bound to slot 0 in
//! all render pipelines.

use crate::{
    gfx::{camera::camera_utils::CameraUniform, scene::light::Lights},
    wgpu_utils::{
        binding_builder::{BindGroupBuilder, BindGroupLayoutBuilder, BindGroupLayoutWithDesc},
        binding_types,
        uniform_buffer::UniformBuffer,
    },
};

/// Global uniform buffer content structure
///
/// MUST match the `Globals` struct in the shaders exactly.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GlobalUBOContent {
    view_position: [f32; 4],  // Camera position (homogeneous coordinates)
    view_proj: [[f32; 4]; 4], // Camera view-projection matrix
    ambient: [f32; 4],        // rgb pre-multiplied by intensity
    light_position: [f32; 4],
    light_color: [f32; 4], // rgb, w = intensity
}

impl GlobalUBOContent {
    pub fn new(camera: CameraUniform, lights: &Lights) -> Self {
        let ambient = lights.ambient;
        let point = lights.point;
        Self {
            view_position: camera.view_position,
            view_proj: camera.view_proj,
            ambient: [
                ambient.color[0] * ambient.intensity,
                ambient.color[1] * ambient.intensity,
                ambient.color[2] * ambient.intensity,
                1.0,
            ],
            light_position: [point.position.x, point.position.y, point.position.z, 1.0],
            light_color: [point.color[0], point.color[1], point.color[2], point.intensity],
        }
    }
}

/// Type alias for the global uniform buffer
pub type GlobalUBO = UniformBuffer<GlobalUBOContent>;

/// Writes camera and light data into the global uniform buffer
///
/// Called once per frame before rendering.
pub fn update_global_ubo(
    ubo: &mut GlobalUBO,
    queue: &wgpu::Queue,
    camera: CameraUniform,
    lights: &Lights,
) {
    ubo.update_content(queue, GlobalUBOContent::new(camera, lights));
}

/// Bind group layout and bind group for the global uniforms
pub struct GlobalBindings {
    bind_group_layout: BindGroupLayoutWithDesc,
    bind_group: wgpu::BindGroup,
}

impl GlobalBindings {
    pub fn new(device: &wgpu::Device, ubo: &GlobalUBO) -> Self {
        let bind_group_layout = BindGroupLayoutBuilder::new()
            .next_binding_rendering(binding_types::uniform()) // Global uniforms (camera + light)
            .create(device, "Globals Bind Group Layout");

        let bind_group = BindGroupBuilder::new(&bind_group_layout)
            .resource(ubo.binding_resource())
            .create(device, "Global Bind Group");

        GlobalBindings {
            bind_group_layout,
            bind_group,
        }
    }

    /// Used when creating render pipelines that need access to global uniforms.
    pub fn bind_group_layout(&self) -> &wgpu::BindGroupLayout {
        &self.bind_group_layout.layout
    }

    pub fn bind_group(&self) -> &wgpu::BindGroup {
        &self.bind_group
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_size_is_uniform_aligned() {
        assert_eq!(std::mem::size_of::<GlobalUBOContent>(), 128);
        assert_eq!(std::mem::size_of::<GlobalUBOContent>() % 16, 0);
    }

    #[test]
    fn test_ambient_is_premultiplied() {
        let content = GlobalUBOContent::new(CameraUniform::default(), &Lights::default());
        assert_eq!(content.ambient, [0.5, 0.5, 0.5, 1.0]);
        assert_eq!(content.light_position, [5.0, 5.0, 5.0, 1.0]);
        assert_eq!(content.light_color, [1.0, 1.0, 1.0, 1.0]);
    }
}
