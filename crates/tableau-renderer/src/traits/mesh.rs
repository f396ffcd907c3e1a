//! Mesh provider contract.

use tableau_core::PrimitiveKind;
use thiserror::Error;

/// Mesh loading errors surfaced during scene preparation.
#[derive(Debug, Error)]
pub enum MeshError {
    #[error("failed to load {kind} mesh: {reason}")]
    LoadFailed { kind: PrimitiveKind, reason: String },
}

/// Load-once / draw-many access to primitive mesh geometry.
///
/// Geometry generation and storage are the provider's business; the scene
/// layer only ever asks for a kind to be resident and then drawn. `draw`
/// submits with whatever uniform state is currently bound, so it must come
/// last in a draw call's preparation sequence.
pub trait MeshProvider {
    /// Makes the given primitive kind resident. Loading a kind twice is a
    /// cheap no-op.
    fn load(&mut self, kind: PrimitiveKind) -> Result<(), MeshError>;

    /// Issues a draw of the given primitive kind.
    fn draw(&mut self, kind: PrimitiveKind);
}
