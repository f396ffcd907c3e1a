//! One-time scene lighting setup.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::traits::ShaderInterface;
use crate::uniforms;

/// A single point light.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointLight {
    pub position: Vec3,
    pub ambient: Vec3,
    pub diffuse: Vec3,
    pub specular: Vec3,
}

/// The scene's light rig.
///
/// Applied once during scene preparation, before any frame renders. Frames
/// never touch lighting uniforms, so whatever this configures is what every
/// draw reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LightingConfig {
    /// Camera position used for specular highlights.
    pub view_position: Vec3,
    /// Active lights, at most [`uniforms::MAX_POINT_LIGHTS`].
    pub lights: Vec<PointLight>,
}

impl LightingConfig {
    /// Pushes the whole rig into the shader.
    ///
    /// Enables the lighting flag, fills one slot per configured light, and
    /// explicitly deactivates every remaining point-light slot and the
    /// spotlight so no draw inherits a light from a previous scene. Extra
    /// lights beyond the slot count are dropped with a warning.
    pub fn apply(&self, shader: &mut dyn ShaderInterface) {
        if self.lights.len() > uniforms::MAX_POINT_LIGHTS {
            tracing::warn!(
                configured = self.lights.len(),
                slots = uniforms::MAX_POINT_LIGHTS,
                "too many point lights, extras ignored"
            );
        }

        shader.set_bool(uniforms::USE_LIGHTING, true);
        shader.set_vec3(uniforms::VIEW_POSITION, self.view_position);

        for (index, light) in self
            .lights
            .iter()
            .take(uniforms::MAX_POINT_LIGHTS)
            .enumerate()
        {
            shader.set_vec3(&uniforms::point_light(index, "position"), light.position);
            shader.set_vec3(&uniforms::point_light(index, "ambient"), light.ambient);
            shader.set_vec3(&uniforms::point_light(index, "diffuse"), light.diffuse);
            shader.set_vec3(&uniforms::point_light(index, "specular"), light.specular);
            shader.set_bool(&uniforms::point_light(index, "bActive"), true);
        }

        let active = self.lights.len().min(uniforms::MAX_POINT_LIGHTS);
        for index in active..uniforms::MAX_POINT_LIGHTS {
            shader.set_bool(&uniforms::point_light(index, "bActive"), false);
        }
        shader.set_bool(uniforms::SPOTLIGHT_ACTIVE, false);

        tracing::info!(lights = active, "scene lighting configured");
    }
}
