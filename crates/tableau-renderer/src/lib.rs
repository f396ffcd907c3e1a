//! Tableau scene renderer
//!
//! Scene preparation and per-draw shader binding on top of a retained-mode
//! GPU pipeline. The crate owns the mapping from string tags to GPU texture
//! units and material parameter sets, and the strict per-draw-call ordering
//! of transform, color/texture, UV scale, and material uniforms.
//!
//! # Architecture
//!
//! - [`traits`] - contracts for the external collaborators (shader uniform
//!   interface, texture device, mesh provider)
//! - [`texture::TextureRegistry`] - tag-to-texture-unit registry
//! - [`material::MaterialLibrary`] - tag-to-material-property-set registry
//! - [`binding::ShaderBinder`] - the per-draw uniform binding protocol
//! - [`lighting::LightingConfig`] - one-time light slot setup
//! - [`scene::Stage`] - two-phase prepare/render orchestration
//! - [`gpu`] - wgpu-backed implementations of the collaborator contracts
//!
//! # Example
//!
//! ```ignore
//! use tableau_renderer::{Stage, SceneScript};
//!
//! let stage = Stage::new(shader, meshes, texture_device);
//! let mut ready = stage.prepare(&mut script)?;
//!
//! // Once prepared, render any number of frames.
//! ready.render(&mut script);
//! ```

pub mod binding;
pub mod gpu;
pub mod lighting;
pub mod material;
pub mod scene;
pub mod texture;
pub mod traits;
pub mod uniforms;

#[cfg(test)]
pub(crate) mod test_support;

// Re-exports for convenience
pub use binding::{DrawState, ShaderBinder};
pub use lighting::{LightingConfig, PointLight};
pub use material::{MaterialLibrary, MaterialLookupError};
pub use scene::{Frame, ReadyStage, ScenePrep, SceneScript, Stage, StageError};
pub use texture::{TextureError, TextureRegistry, TextureSlot};
pub use traits::{MeshError, MeshProvider, ShaderInterface, TextureData, TextureDevice, TextureHandle};
