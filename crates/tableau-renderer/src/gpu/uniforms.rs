//! wgpu shader uniform engine.
//!
//! The shader's named uniforms are backed by one CPU-side block that is
//! flushed to a uniform buffer when dirty. Setting a name routes into the
//! matching field; unknown names are ignored with a warning, the way GL
//! ignores uniforms resolved to location -1.

use std::sync::Arc;

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec2, Vec3, Vec4};
use wgpu::util::DeviceExt;

use crate::traits::ShaderInterface;
use crate::uniforms::{self, MAX_POINT_LIGHTS, parse_point_light};

/// Material block as laid out in shader memory.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct MaterialUniform {
    /// Ambient color in xyz, ambient strength in w.
    pub ambient: [f32; 4],
    /// Diffuse color in xyz, shininess in w.
    pub diffuse: [f32; 4],
    /// Specular color in xyz, w unused.
    pub specular: [f32; 4],
}

/// Point-light block as laid out in shader memory.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct PointLightUniform {
    /// Position in xyz, active flag in w (1.0 or 0.0).
    pub position: [f32; 4],
    pub ambient: [f32; 4],
    pub diffuse: [f32; 4],
    pub specular: [f32; 4],
}

/// The whole per-scene uniform block.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct SceneUniforms {
    pub model: [[f32; 4]; 4],
    pub object_color: [f32; 4],
    /// Camera position in xyz, w unused.
    pub view_position: [f32; 4],
    pub uv_scale: [f32; 2],
    pub use_texture: u32,
    pub use_lighting: u32,
    pub texture_index: u32,
    pub spot_active: u32,
    pub _pad: [u32; 2],
    pub material: MaterialUniform,
    pub lights: [PointLightUniform; MAX_POINT_LIGHTS],
}

impl Default for SceneUniforms {
    fn default() -> Self {
        Self {
            model: Mat4::IDENTITY.to_cols_array_2d(),
            object_color: [1.0; 4],
            view_position: [0.0; 4],
            uv_scale: [1.0, 1.0],
            use_texture: 0,
            use_lighting: 0,
            texture_index: 0,
            spot_active: 0,
            _pad: [0; 2],
            material: MaterialUniform::zeroed(),
            lights: [PointLightUniform::zeroed(); MAX_POINT_LIGHTS],
        }
    }
}

fn set_xyz(target: &mut [f32; 4], value: Vec3) {
    target[0] = value.x;
    target[1] = value.y;
    target[2] = value.z;
}

impl SceneUniforms {
    /// Routes a flag uniform. Returns false for unknown names.
    fn route_flag(&mut self, name: &str, value: bool) -> bool {
        match name {
            uniforms::USE_TEXTURE => self.use_texture = value as u32,
            uniforms::USE_LIGHTING => self.use_lighting = value as u32,
            uniforms::SPOTLIGHT_ACTIVE => self.spot_active = value as u32,
            _ => match parse_point_light(name) {
                Some((index, "bActive")) if index < MAX_POINT_LIGHTS => {
                    self.lights[index].position[3] = if value { 1.0 } else { 0.0 };
                }
                _ => return false,
            },
        }
        true
    }

    fn route_float(&mut self, name: &str, value: f32) -> bool {
        match name {
            uniforms::material::AMBIENT_STRENGTH => self.material.ambient[3] = value,
            uniforms::material::SHININESS => self.material.diffuse[3] = value,
            _ => return false,
        }
        true
    }

    fn route_vec2(&mut self, name: &str, value: Vec2) -> bool {
        match name {
            uniforms::UV_SCALE => self.uv_scale = value.to_array(),
            _ => return false,
        }
        true
    }

    fn route_vec3(&mut self, name: &str, value: Vec3) -> bool {
        match name {
            uniforms::VIEW_POSITION => set_xyz(&mut self.view_position, value),
            uniforms::material::AMBIENT_COLOR => set_xyz(&mut self.material.ambient, value),
            uniforms::material::DIFFUSE_COLOR => set_xyz(&mut self.material.diffuse, value),
            uniforms::material::SPECULAR_COLOR => set_xyz(&mut self.material.specular, value),
            _ => match parse_point_light(name) {
                Some((index, field)) if index < MAX_POINT_LIGHTS => {
                    let light = &mut self.lights[index];
                    match field {
                        // Position keeps the active flag stored in w.
                        "position" => set_xyz(&mut light.position, value),
                        "ambient" => set_xyz(&mut light.ambient, value),
                        "diffuse" => set_xyz(&mut light.diffuse, value),
                        "specular" => set_xyz(&mut light.specular, value),
                        _ => return false,
                    }
                }
                _ => return false,
            },
        }
        true
    }

    fn route_vec4(&mut self, name: &str, value: Vec4) -> bool {
        match name {
            uniforms::OBJECT_COLOR => self.object_color = value.to_array(),
            _ => return false,
        }
        true
    }

    fn route_mat4(&mut self, name: &str, value: Mat4) -> bool {
        match name {
            uniforms::MODEL => self.model = value.to_cols_array_2d(),
            _ => return false,
        }
        true
    }

    fn route_sampler(&mut self, name: &str, unit: u32) -> bool {
        match name {
            uniforms::OBJECT_TEXTURE => self.texture_index = unit,
            _ => return false,
        }
        true
    }
}

/// [`ShaderInterface`] over a wgpu uniform buffer.
///
/// Setters mutate the CPU block; [`flush`](Self::flush) uploads it before
/// the embedding pipeline submits a draw. The bind group pairs the buffer
/// with binding 0 of its layout.
pub struct ShaderUniforms {
    queue: Arc<wgpu::Queue>,
    block: SceneUniforms,
    buffer: wgpu::Buffer,
    bind_group_layout: wgpu::BindGroupLayout,
    bind_group: wgpu::BindGroup,
    dirty: bool,
}

impl ShaderUniforms {
    pub fn new(device: &wgpu::Device, queue: Arc<wgpu::Queue>) -> Self {
        let block = SceneUniforms::default();
        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Scene Uniform Buffer"),
            contents: bytemuck::cast_slice(&[block]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Scene Uniform Bind Group Layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Scene Uniform Bind Group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
        });

        Self {
            queue,
            block,
            buffer,
            bind_group_layout,
            bind_group,
            dirty: false,
        }
    }

    /// Uploads the block if any setter ran since the last flush.
    ///
    /// Call once per draw submission; the buffer otherwise holds the state
    /// of an earlier draw.
    pub fn flush(&mut self) {
        if self.dirty {
            self.queue
                .write_buffer(&self.buffer, 0, bytemuck::cast_slice(&[self.block]));
            self.dirty = false;
        }
    }

    /// The current CPU-side block.
    pub fn block(&self) -> &SceneUniforms {
        &self.block
    }

    pub fn buffer(&self) -> &wgpu::Buffer {
        &self.buffer
    }

    pub fn bind_group_layout(&self) -> &wgpu::BindGroupLayout {
        &self.bind_group_layout
    }

    pub fn bind_group(&self) -> &wgpu::BindGroup {
        &self.bind_group
    }

    fn routed(&mut self, name: &str, handled: bool) {
        if handled {
            self.dirty = true;
        } else {
            tracing::warn!(name, "unknown uniform name ignored");
        }
    }
}

impl ShaderInterface for ShaderUniforms {
    fn set_bool(&mut self, name: &str, value: bool) {
        let handled = self.block.route_flag(name, value);
        self.routed(name, handled);
    }

    fn set_int(&mut self, name: &str, value: i32) {
        // GL shaders take flags as ints; route them the same way.
        let handled = self.block.route_flag(name, value != 0);
        self.routed(name, handled);
    }

    fn set_float(&mut self, name: &str, value: f32) {
        let handled = self.block.route_float(name, value);
        self.routed(name, handled);
    }

    fn set_vec2(&mut self, name: &str, value: Vec2) {
        let handled = self.block.route_vec2(name, value);
        self.routed(name, handled);
    }

    fn set_vec3(&mut self, name: &str, value: Vec3) {
        let handled = self.block.route_vec3(name, value);
        self.routed(name, handled);
    }

    fn set_vec4(&mut self, name: &str, value: Vec4) {
        let handled = self.block.route_vec4(name, value);
        self.routed(name, handled);
    }

    fn set_mat4(&mut self, name: &str, value: Mat4) {
        let handled = self.block.route_mat4(name, value);
        self.routed(name, handled);
    }

    fn set_sampler(&mut self, name: &str, unit: u32) {
        let handled = self.block.route_sampler(name, unit);
        self.routed(name, handled);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::vec3;

    #[test]
    fn block_size_matches_shader_layout() {
        // 64 model + 16 color + 16 view + 16 scale/flags + 8 pad-pair
        // + 48 material + 320 lights.
        assert_eq!(std::mem::size_of::<SceneUniforms>(), 496);
        assert_eq!(std::mem::align_of::<SceneUniforms>(), 4);
    }

    #[test]
    fn routes_core_names() {
        let mut block = SceneUniforms::default();

        assert!(block.route_flag(uniforms::USE_TEXTURE, true));
        assert_eq!(block.use_texture, 1);

        assert!(block.route_sampler(uniforms::OBJECT_TEXTURE, 2));
        assert_eq!(block.texture_index, 2);

        assert!(block.route_vec4(uniforms::OBJECT_COLOR, Vec4::new(0.1, 0.2, 0.3, 1.0)));
        assert_eq!(block.object_color, [0.1, 0.2, 0.3, 1.0]);

        let matrix = Mat4::from_translation(vec3(1.0, 2.0, 3.0));
        assert!(block.route_mat4(uniforms::MODEL, matrix));
        assert_eq!(block.model, matrix.to_cols_array_2d());
    }

    #[test]
    fn routes_material_fields_into_packed_lanes() {
        let mut block = SceneUniforms::default();

        block.route_vec3(uniforms::material::AMBIENT_COLOR, vec3(0.2, 0.15, 0.1));
        block.route_float(uniforms::material::AMBIENT_STRENGTH, 0.4);
        block.route_vec3(uniforms::material::DIFFUSE_COLOR, vec3(0.6, 0.4, 0.2));
        block.route_float(uniforms::material::SHININESS, 64.0);
        block.route_vec3(uniforms::material::SPECULAR_COLOR, vec3(0.4, 0.4, 0.4));

        assert_eq!(block.material.ambient, [0.2, 0.15, 0.1, 0.4]);
        assert_eq!(block.material.diffuse, [0.6, 0.4, 0.2, 64.0]);
        assert_eq!(block.material.specular[..3], [0.4, 0.4, 0.4]);
    }

    #[test]
    fn routes_point_light_fields_and_preserves_active_flag() {
        let mut block = SceneUniforms::default();

        assert!(block.route_flag("pointLights[1].bActive", true));
        assert!(block.route_vec3("pointLights[1].position", vec3(-77.0, 10.0, -27.0)));

        assert_eq!(block.lights[1].position, [-77.0, 10.0, -27.0, 1.0]);
    }

    #[test]
    fn rejects_unknown_and_out_of_range_names() {
        let mut block = SceneUniforms::default();

        assert!(!block.route_flag("bUseFog", true));
        assert!(!block.route_vec3("pointLights[9].ambient", Vec3::ZERO));
        assert!(!block.route_float(uniforms::OBJECT_COLOR, 1.0));
        assert!(!block.route_vec3("pointLights[0].intensity", Vec3::ONE));
    }
}
