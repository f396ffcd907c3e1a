//! Core value types for the Tableau scene renderer.
//!
//! This crate holds the dependency-light data types shared between the
//! renderer and application code:
//!
//! - [`Transform`] - model matrix composition from scale/rotation/translation
//! - [`Material`] - a named lighting material property set
//! - [`PrimitiveKind`] - the basic mesh shapes a scene can request

pub mod material;
pub mod primitive;
pub mod transform;

pub use material::Material;
pub use primitive::PrimitiveKind;
pub use transform::Transform;
