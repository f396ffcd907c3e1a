//! Per-draw-call shader binding protocol.
//!
//! Each binding operation pushes only the uniforms it is responsible for;
//! nothing resets between calls. To draw one object correctly the caller
//! issues, in order: transform, then flat color *or* texture (and
//! optionally UV scale), then material, then the draw itself. A skipped
//! step silently reuses the previous object's value - that is the system's
//! core failure mode, and [`DrawState`] exists so it is at least visible.

use glam::{Mat4, Vec2, Vec4};
use tableau_core::{Material, Transform};

use crate::material::MaterialLibrary;
use crate::texture::TextureRegistry;
use crate::traits::ShaderInterface;
use crate::uniforms;

/// Everything the shader currently holds for the next draw call.
///
/// The binder keeps this in lockstep with the uniforms it pushes, so tests
/// and debugging can see exactly which values a draw would read - including
/// values left over from the previous object.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawState {
    pub model: Mat4,
    pub color: Vec4,
    pub use_texture: bool,
    /// Texture unit selected by the last successful texture bind.
    pub texture_unit: Option<u32>,
    pub uv_scale: Vec2,
    /// Material applied by the last successful material bind. Stays put on
    /// lookup misses; see [`ShaderBinder::bind_material`].
    pub material: Option<Material>,
}

impl Default for DrawState {
    fn default() -> Self {
        Self {
            model: Mat4::IDENTITY,
            color: Vec4::ONE,
            use_texture: false,
            texture_unit: None,
            uv_scale: Vec2::ONE,
            material: None,
        }
    }
}

/// The five per-draw binding operations over a shader interface.
///
/// Borrows the registries read-only and the draw state mutably; the scene
/// layer constructs one per frame and carries the state forward between
/// frames explicitly.
pub struct ShaderBinder<'a> {
    shader: &'a mut dyn ShaderInterface,
    textures: &'a TextureRegistry,
    materials: &'a MaterialLibrary,
    state: &'a mut DrawState,
}

impl<'a> ShaderBinder<'a> {
    pub fn new(
        shader: &'a mut dyn ShaderInterface,
        textures: &'a TextureRegistry,
        materials: &'a MaterialLibrary,
        state: &'a mut DrawState,
    ) -> Self {
        Self {
            shader,
            textures,
            materials,
            state,
        }
    }

    /// Composes the model matrix for `transform` and uploads it.
    pub fn bind_transform(&mut self, transform: &Transform) {
        let model = transform.matrix();
        self.state.model = model;
        self.shader.set_mat4(uniforms::MODEL, model);
    }

    /// Uploads a flat RGBA color and disables texturing.
    ///
    /// The texture-disable side effect means a later texture bind for the
    /// same object must come after this call, never before.
    pub fn bind_color(&mut self, color: Vec4) {
        self.state.color = color;
        self.state.use_texture = false;
        self.shader.set_bool(uniforms::USE_TEXTURE, false);
        self.shader.set_vec4(uniforms::OBJECT_COLOR, color);
    }

    /// Enables texturing and selects the unit registered under `tag`.
    ///
    /// An unknown tag disables texturing for this draw instead: lookup
    /// misses at draw time are never surfaced to the caller, only logged.
    pub fn bind_texture(&mut self, tag: &str) {
        match self.textures.slot(tag) {
            Some(unit) => {
                self.state.use_texture = true;
                self.state.texture_unit = Some(unit);
                self.shader.set_bool(uniforms::USE_TEXTURE, true);
                self.shader.set_sampler(uniforms::OBJECT_TEXTURE, unit);
            }
            None => {
                tracing::debug!(tag, "texture tag not registered, texturing disabled");
                self.state.use_texture = false;
                self.state.texture_unit = None;
                self.shader.set_bool(uniforms::USE_TEXTURE, false);
            }
        }
    }

    /// Uploads the texture coordinate multiplier, independent of the
    /// color/texture selection.
    pub fn bind_uv_scale(&mut self, u: f32, v: f32) {
        let scale = Vec2::new(u, v);
        self.state.uv_scale = scale;
        self.shader.set_vec2(uniforms::UV_SCALE, scale);
    }

    /// Uploads the material registered under `tag`.
    ///
    /// On a lookup miss every material uniform is left exactly as the
    /// previous object set it. Leave-as-is is deliberate - there is no
    /// neutral default material to fall back to - so a missing tag shows up
    /// as the wrong shading, not an error.
    pub fn bind_material(&mut self, tag: &str) {
        match self.materials.find(tag) {
            Ok(material) => {
                self.shader
                    .set_vec3(uniforms::material::AMBIENT_COLOR, material.ambient_color);
                self.shader
                    .set_float(uniforms::material::AMBIENT_STRENGTH, material.ambient_strength);
                self.shader
                    .set_vec3(uniforms::material::DIFFUSE_COLOR, material.diffuse_color);
                self.shader
                    .set_vec3(uniforms::material::SPECULAR_COLOR, material.specular_color);
                self.shader
                    .set_float(uniforms::material::SHININESS, material.shininess);
                self.state.material = Some(material.clone());
            }
            Err(err) => {
                tracing::debug!(tag, %err, "material uniforms left unchanged");
            }
        }
    }

    /// The state the next draw call would read.
    pub fn state(&self) -> &DrawState {
        self.state
    }
}
