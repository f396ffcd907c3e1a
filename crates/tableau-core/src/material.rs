//! Material property sets.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// A named bundle of lighting-shading parameters.
///
/// Materials are defined once during scene preparation and looked up by tag
/// at draw time. Color components are expected in the `0.0..=1.0` range but
/// are not validated; scenes own their palettes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    /// Lookup tag, e.g. `"box"` or `"lampShade"`.
    pub tag: String,
    pub ambient_color: Vec3,
    pub ambient_strength: f32,
    pub diffuse_color: Vec3,
    pub specular_color: Vec3,
    /// Specular exponent; higher is shinier.
    pub shininess: f32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::vec3;

    #[test]
    fn deserializes_from_ron_notation() {
        let material: Material = ron::from_str(
            r#"(
                tag: "plane",
                ambient_color: (0.3, 0.3, 0.25),
                ambient_strength: 0.3,
                diffuse_color: (0.8, 0.8, 0.8),
                specular_color: (0.2, 0.2, 0.2),
                shininess: 16.0,
            )"#,
        )
        .unwrap();

        assert_eq!(material.tag, "plane");
        assert_eq!(material.ambient_color, vec3(0.3, 0.3, 0.25));
        assert_eq!(material.shininess, 16.0);
    }
}
