//! In-crate mock collaborators for tests.

use std::collections::HashMap;

use glam::{Mat4, Vec2, Vec3, Vec4, vec3};
use tableau_core::{Material, PrimitiveKind};

use crate::traits::{
    MeshError, MeshProvider, ShaderInterface, TextureData, TextureDevice, TextureHandle,
};

/// A uniform value captured by [`RecordingShader`].
#[derive(Debug, Clone, PartialEq)]
pub enum UniformValue {
    Bool(bool),
    Int(i32),
    Float(f32),
    Vec2(Vec2),
    Vec3(Vec3),
    Vec4(Vec4),
    Mat4(Mat4),
    Sampler(u32),
}

/// Shader interface that records the last value written per uniform name,
/// mimicking the retained global uniform state of a real shader program.
#[derive(Debug, Default)]
pub struct RecordingShader {
    values: HashMap<String, UniformValue>,
}

impl RecordingShader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&UniformValue> {
        self.values.get(name)
    }

    fn put(&mut self, name: &str, value: UniformValue) {
        self.values.insert(name.to_string(), value);
    }
}

impl ShaderInterface for RecordingShader {
    fn set_bool(&mut self, name: &str, value: bool) {
        self.put(name, UniformValue::Bool(value));
    }

    fn set_int(&mut self, name: &str, value: i32) {
        self.put(name, UniformValue::Int(value));
    }

    fn set_float(&mut self, name: &str, value: f32) {
        self.put(name, UniformValue::Float(value));
    }

    fn set_vec2(&mut self, name: &str, value: Vec2) {
        self.put(name, UniformValue::Vec2(value));
    }

    fn set_vec3(&mut self, name: &str, value: Vec3) {
        self.put(name, UniformValue::Vec3(value));
    }

    fn set_vec4(&mut self, name: &str, value: Vec4) {
        self.put(name, UniformValue::Vec4(value));
    }

    fn set_mat4(&mut self, name: &str, value: Mat4) {
        self.put(name, UniformValue::Mat4(value));
    }

    fn set_sampler(&mut self, name: &str, unit: u32) {
        self.put(name, UniformValue::Sampler(unit));
    }
}

/// Texture device that records creations, unit bindings, and destructions.
#[derive(Debug, Default)]
pub struct MockTextureDevice {
    pub created: Vec<(String, TextureData)>,
    pub bound: Vec<(u32, TextureHandle)>,
    pub destroyed: Vec<TextureHandle>,
    next_handle: u64,
}

impl MockTextureDevice {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TextureDevice for MockTextureDevice {
    fn create_texture(&mut self, label: &str, data: &TextureData) -> TextureHandle {
        self.next_handle += 1;
        self.created.push((label.to_string(), data.clone()));
        TextureHandle::from_raw(self.next_handle)
    }

    fn bind_unit(&mut self, unit: u32, handle: TextureHandle) {
        self.bound.push((unit, handle));
    }

    fn destroy_texture(&mut self, handle: TextureHandle) {
        self.destroyed.push(handle);
    }
}

/// Mesh provider that tracks loads and draws without any geometry.
#[derive(Debug, Default)]
pub struct CountingMeshes {
    pub loaded: Vec<PrimitiveKind>,
    pub drawn: Vec<PrimitiveKind>,
    /// When set, every load fails with this reason.
    pub fail_loads: Option<String>,
}

impl CountingMeshes {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MeshProvider for CountingMeshes {
    fn load(&mut self, kind: PrimitiveKind) -> Result<(), MeshError> {
        if let Some(reason) = &self.fail_loads {
            return Err(MeshError::LoadFailed {
                kind,
                reason: reason.clone(),
            });
        }
        if !self.loaded.contains(&kind) {
            self.loaded.push(kind);
        }
        Ok(())
    }

    fn draw(&mut self, kind: PrimitiveKind) {
        self.drawn.push(kind);
    }
}

/// A material with recognizable values for assertions.
pub fn test_material(tag: &str, shininess: f32) -> Material {
    Material {
        tag: tag.to_string(),
        ambient_color: vec3(0.2, 0.15, 0.1),
        ambient_strength: 0.4,
        diffuse_color: vec3(0.6, 0.4, 0.2),
        specular_color: vec3(0.4, 0.4, 0.4),
        shininess,
    }
}

/// A tiny encoded PNG usable with `register_from_memory`.
pub fn tiny_png() -> Vec<u8> {
    let mut bytes = Vec::new();
    image::RgbaImage::from_pixel(2, 2, image::Rgba([200, 180, 160, 255]))
        .write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Png)
        .unwrap();
    bytes
}
