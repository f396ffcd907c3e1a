//! Fixed uniform names shared between the binding protocol and shaders.
//!
//! These strings are the wire format of the shader interface; the binding
//! protocol writes them and every [`crate::traits::ShaderInterface`]
//! implementation routes on them.

/// Model matrix, local to world space.
pub const MODEL: &str = "model";
/// Flat RGBA object color, read when texturing is disabled.
pub const OBJECT_COLOR: &str = "objectColor";
/// Sampler for the object texture; its value is a texture-unit index.
pub const OBJECT_TEXTURE: &str = "objectTexture";
/// Whether the fragment stage samples the texture or uses the flat color.
pub const USE_TEXTURE: &str = "bUseTexture";
/// Whether the lighting model runs at all.
pub const USE_LIGHTING: &str = "bUseLighting";
/// Camera position for specular computation.
pub const VIEW_POSITION: &str = "viewPosition";
/// Texture coordinate multiplier.
pub const UV_SCALE: &str = "UVscale";

/// Number of point-light slots the shader exposes.
pub const MAX_POINT_LIGHTS: usize = 5;

/// Spotlight active flag. The slot exists in the shader but this layer only
/// ever deactivates it.
pub const SPOTLIGHT_ACTIVE: &str = "spotLight.bActive";

/// Material block field names.
pub mod material {
    pub const AMBIENT_COLOR: &str = "material.ambientColor";
    pub const AMBIENT_STRENGTH: &str = "material.ambientStrength";
    pub const DIFFUSE_COLOR: &str = "material.diffuseColor";
    pub const SPECULAR_COLOR: &str = "material.specularColor";
    pub const SHININESS: &str = "material.shininess";
}

/// Point-light block field names, e.g. `point_light(1, "diffuse")` is
/// `"pointLights[1].diffuse"`.
pub fn point_light(index: usize, field: &str) -> String {
    format!("pointLights[{index}].{field}")
}

/// Splits a `pointLights[i].field` name into its index and field.
///
/// Returns `None` for anything that is not a well-formed point-light name.
pub fn parse_point_light(name: &str) -> Option<(usize, &str)> {
    let rest = name.strip_prefix("pointLights[")?;
    let (index, field) = rest.split_once("].")?;
    let index = index.parse().ok()?;
    if field.is_empty() {
        return None;
    }
    Some((index, field))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_light_names_round_trip() {
        let name = point_light(3, "specular");
        assert_eq!(name, "pointLights[3].specular");
        assert_eq!(parse_point_light(&name), Some((3, "specular")));
    }

    #[test]
    fn parse_rejects_malformed_names() {
        assert_eq!(parse_point_light("pointLights[0]"), None);
        assert_eq!(parse_point_light("pointLights[x].ambient"), None);
        assert_eq!(parse_point_light("spotLight.bActive"), None);
        assert_eq!(parse_point_light("pointLights[1]."), None);
    }
}
