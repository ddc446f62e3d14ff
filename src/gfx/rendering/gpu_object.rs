//! GPU-side copies of scene objects
//!
//! Each [`GpuObject`] owns the vertex and index buffers of one scene object
//! plus its transform and material uniforms. Geometry is uploaded once; the
//! transform uniform is rewritten whenever the object moves.

use cgmath::{Matrix, Matrix4, SquareMatrix};
use wgpu::util::DeviceExt;

use crate::{
    gfx::{
        camera::camera_utils::convert_matrix4_to_array,
        geometry::Topology,
        resources::material::MaterialUniform,
        scene::{object::SceneObject, ObjectId},
    },
    wgpu_utils::{
        binding_builder::{BindGroupBuilder, BindGroupLayoutBuilder, BindGroupLayoutWithDesc},
        binding_types,
        uniform_buffer::UniformBuffer,
    },
};

/// Per-object transform uniform
///
/// MUST match the `Transform` struct in the shaders.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct TransformUniform {
    pub model: [[f32; 4]; 4],
    pub normal_matrix: [[f32; 4]; 4],
}

impl TransformUniform {
    pub fn from_model(model: Matrix4<f32>) -> Self {
        // Inverse-transpose keeps normals perpendicular under non-uniform scale
        let normal = model.invert().map(|m| m.transpose()).unwrap_or(model);
        Self {
            model: convert_matrix4_to_array(model),
            normal_matrix: convert_matrix4_to_array(normal),
        }
    }
}

/// Layouts for the per-object bind groups (transform at group 1, material at group 2)
pub struct ObjectLayouts {
    pub transform: BindGroupLayoutWithDesc,
    pub material: BindGroupLayoutWithDesc,
}

impl ObjectLayouts {
    pub fn new(device: &wgpu::Device) -> Self {
        Self {
            transform: BindGroupLayoutBuilder::new()
                .next_binding_vertex(binding_types::uniform())
                .create(device, "Transform Bind Group Layout"),
            material: BindGroupLayoutBuilder::new()
                .next_binding_fragment(binding_types::uniform())
                .create(device, "Material Bind Group Layout"),
        }
    }
}

/// Uploaded buffers and bind groups for one scene object
pub struct GpuObject {
    pub id: ObjectId,
    pub topology: Topology,
    pub double_sided: bool,
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
    transform_ubo: UniformBuffer<TransformUniform>,
    transform_bind_group: wgpu::BindGroup,
    material_bind_group: wgpu::BindGroup,
    // Keeps the buffer alive for the bind group
    _material_ubo: UniformBuffer<MaterialUniform>,
}

impl GpuObject {
    pub fn upload(
        device: &wgpu::Device,
        layouts: &ObjectLayouts,
        id: ObjectId,
        object: &SceneObject,
    ) -> Self {
        let vertices = object.geometry.to_vertices();
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{} Vertex Buffer", object.name)),
            contents: bytemuck::cast_slice(&vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{} Index Buffer", object.name)),
            contents: bytemuck::cast_slice(&object.geometry.indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        let transform_ubo = UniformBuffer::new_with_data(
            device,
            &TransformUniform::from_model(object.transform.matrix()),
        );
        let transform_bind_group = BindGroupBuilder::new(&layouts.transform)
            .resource(transform_ubo.binding_resource())
            .create(device, &format!("{} Transform Bind Group", object.name));

        let material_ubo = UniformBuffer::new_with_data(device, &object.material.to_uniform());
        let material_bind_group = BindGroupBuilder::new(&layouts.material)
            .resource(material_ubo.binding_resource())
            .create(device, &format!("{} Material Bind Group", object.name));

        Self {
            id,
            topology: object.geometry.topology,
            double_sided: object.material.double_sided,
            vertex_buffer,
            index_buffer,
            index_count: object.geometry.indices.len() as u32,
            transform_ubo,
            transform_bind_group,
            material_bind_group,
            _material_ubo: material_ubo,
        }
    }

    /// Rewrites the transform uniform; unchanged transforms cost nothing
    pub fn sync_transform(&mut self, queue: &wgpu::Queue, object: &SceneObject) {
        self.transform_ubo
            .update_content(queue, TransformUniform::from_model(object.transform.matrix()));
    }
}

pub trait DrawObject<'a> {
    fn draw_object(&mut self, object: &'a GpuObject);
}

impl<'a, 'b> DrawObject<'b> for wgpu::RenderPass<'a>
where
    'b: 'a,
{
    fn draw_object(&mut self, object: &'b GpuObject) {
        if object.index_count == 0 {
            return;
        }
        self.set_bind_group(1, &object.transform_bind_group, &[]);
        self.set_bind_group(2, &object.material_bind_group, &[]);
        self.set_vertex_buffer(0, object.vertex_buffer.slice(..));
        self.set_index_buffer(object.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        self.draw_indexed(0..object.index_count, 0, 0..1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use cgmath::Vector3;

    #[test]
    fn test_transform_uniform_size() {
        assert_eq!(std::mem::size_of::<TransformUniform>(), 128);
    }

    #[test]
    fn test_normal_matrix_of_pure_translation_is_identity_rotation() {
        let uniform =
            TransformUniform::from_model(Matrix4::from_translation(Vector3::new(2.0, 0.0, 3.0)));
        assert_abs_diff_eq!(uniform.model[3][0], 2.0);
        assert_abs_diff_eq!(uniform.model[3][2], 3.0);
        for col in 0..3 {
            for row in 0..3 {
                let expected = if col == row { 1.0 } else { 0.0 };
                assert_abs_diff_eq!(uniform.normal_matrix[col][row], expected, epsilon = 1e-6);
            }
        }
    }

    #[test]
    fn test_normal_matrix_inverts_scale() {
        let uniform = TransformUniform::from_model(Matrix4::from_nonuniform_scale(2.0, 1.0, 4.0));
        assert_abs_diff_eq!(uniform.normal_matrix[0][0], 0.5, epsilon = 1e-6);
        assert_abs_diff_eq!(uniform.normal_matrix[2][2], 0.25, epsilon = 1e-6);
    }
}
