//! Basic mesh shape kinds.

use serde::{Deserialize, Serialize};

/// The primitive mesh shapes a scene can request from its mesh provider.
///
/// One instance of each kind is loaded during scene preparation no matter
/// how many times it is drawn per frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PrimitiveKind {
    Plane,
    Box,
    Sphere,
    Cylinder,
    Cone,
}

impl PrimitiveKind {
    /// All primitive kinds, in a stable order.
    pub const ALL: [PrimitiveKind; 5] = [
        PrimitiveKind::Plane,
        PrimitiveKind::Box,
        PrimitiveKind::Sphere,
        PrimitiveKind::Cylinder,
        PrimitiveKind::Cone,
    ];

    /// Lowercase name for logs and labels.
    pub fn name(&self) -> &'static str {
        match self {
            PrimitiveKind::Plane => "plane",
            PrimitiveKind::Box => "box",
            PrimitiveKind::Sphere => "sphere",
            PrimitiveKind::Cylinder => "cylinder",
            PrimitiveKind::Cone => "cone",
        }
    }
}

impl std::fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
