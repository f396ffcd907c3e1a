//! wgpu-backed implementations of the collaborator contracts.
//!
//! The rest of the crate never touches wgpu directly; these types plug the
//! [`crate::traits::TextureDevice`] and [`crate::traits::ShaderInterface`]
//! seams into a real device and queue.

mod texture;
mod uniforms;

pub use texture::*;
pub use uniforms::*;
