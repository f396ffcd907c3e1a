//! Shader uniform interface contract.

use glam::{Mat4, Vec2, Vec3, Vec4};

/// Name-addressed uniform setters for a shader program.
///
/// Every setter overwrites shared state read by the next draw call; nothing
/// is reset between calls. A draw issued without the expected preceding
/// setters reuses whatever was last set, so callers own the binding order
/// (see [`crate::binding::ShaderBinder`]).
///
/// The fixed names used by the binding protocol live in [`crate::uniforms`].
/// Implementations should ignore unknown names the way GL ignores uniforms
/// with location -1, logging rather than failing.
pub trait ShaderInterface {
    fn set_bool(&mut self, name: &str, value: bool);
    fn set_int(&mut self, name: &str, value: i32);
    fn set_float(&mut self, name: &str, value: f32);
    fn set_vec2(&mut self, name: &str, value: Vec2);
    fn set_vec3(&mut self, name: &str, value: Vec3);
    fn set_vec4(&mut self, name: &str, value: Vec4);
    fn set_mat4(&mut self, name: &str, value: Mat4);

    /// Selects the texture unit a sampler uniform reads from.
    fn set_sampler(&mut self, name: &str, unit: u32);
}
