//! Contracts for the renderer's external collaborators.
//!
//! The registries and the binding protocol are written against these traits
//! rather than a concrete graphics API, which keeps the core testable and
//! lets the embedding application decide how uniforms, textures, and meshes
//! actually reach the GPU.

mod mesh;
mod shader;
mod texture;

pub use mesh::*;
pub use shader::*;
pub use texture::*;
