//! Two-phase scene orchestration.
//!
//! A scene runs as a strict state machine: everything is loaded, defined,
//! and bound during preparation, then frames replay a fixed draw sequence
//! that only reads the registries. The phase split is encoded in the types:
//! [`Stage::prepare`] consumes the stage and is the only way to obtain a
//! [`ReadyStage`], and the per-frame [`Frame`] context has no mutable
//! access to the registries at all.

use std::path::Path;

use glam::Vec4;
use tableau_core::{Material, PrimitiveKind, Transform};
use thiserror::Error;

use crate::binding::{DrawState, ShaderBinder};
use crate::lighting::LightingConfig;
use crate::material::{MaterialConfigError, MaterialLibrary};
use crate::texture::{TextureError, TextureRegistry};
use crate::traits::{MeshError, MeshProvider, ShaderInterface, TextureDevice, TextureHandle};

/// Errors surfaced while preparing a scene.
#[derive(Debug, Error)]
pub enum StageError {
    #[error(transparent)]
    Texture(#[from] TextureError),
    #[error(transparent)]
    Mesh(#[from] MeshError),
    #[error(transparent)]
    MaterialConfig(#[from] MaterialConfigError),
}

/// Scene content: what to load and what to draw.
///
/// The orchestrator owns the control flow - prepare fully, bind texture
/// units, then render frame after frame - while implementations of this
/// trait own the actual objects, positions, and dimensions.
pub trait SceneScript {
    /// One-time setup: define materials, load textures and meshes,
    /// configure lighting. Runs exactly once, before any frame.
    fn prepare(&mut self, scene: &mut ScenePrep<'_>) -> Result<(), StageError>;

    /// Draws one frame as a fixed sequence of transform / color-or-texture
    /// / material / draw tuples. Must be deterministic and repeatable.
    fn render(&mut self, frame: &mut Frame<'_>);
}

/// Preparation-phase context handed to [`SceneScript::prepare`].
pub struct ScenePrep<'a> {
    shader: &'a mut dyn ShaderInterface,
    meshes: &'a mut dyn MeshProvider,
    device: &'a mut dyn TextureDevice,
    textures: &'a mut TextureRegistry,
    materials: &'a mut MaterialLibrary,
}

impl ScenePrep<'_> {
    /// Decodes an image file and registers it under `tag`.
    ///
    /// Propagate the error to abort preparation, or log and ignore it to
    /// render on without the texture.
    pub fn load_texture(
        &mut self,
        path: impl AsRef<Path>,
        tag: impl Into<String>,
    ) -> Result<TextureHandle, TextureError> {
        self.textures.register(self.device, path, tag)
    }

    /// Registers a texture from encoded bytes held in memory.
    pub fn load_texture_from_memory(
        &mut self,
        bytes: &[u8],
        tag: impl Into<String>,
    ) -> Result<TextureHandle, TextureError> {
        self.textures.register_from_memory(self.device, bytes, tag)
    }

    /// Defines one material.
    pub fn define_material(&mut self, material: Material) {
        self.materials.define(material);
    }

    /// Defines every material from a RON table.
    pub fn define_materials_from_ron(&mut self, text: &str) -> Result<(), MaterialConfigError> {
        for material in MaterialLibrary::from_ron(text)?.iter() {
            self.materials.define(material.clone());
        }
        Ok(())
    }

    /// Makes a primitive mesh kind resident.
    pub fn load_mesh(&mut self, kind: PrimitiveKind) -> Result<(), MeshError> {
        self.meshes.load(kind)
    }

    /// Applies the light rig. Call once; later calls overwrite the rig.
    pub fn configure_lighting(&mut self, config: &LightingConfig) {
        config.apply(self.shader);
    }
}

/// Frame-phase context handed to [`SceneScript::render`].
///
/// Exposes the binding protocol plus draw requests and nothing else;
/// registries are only readable here, so a frame cannot redefine the scene
/// it is drawing.
pub struct Frame<'a> {
    binder: ShaderBinder<'a>,
    meshes: &'a mut dyn MeshProvider,
}

impl Frame<'_> {
    /// Uploads the model matrix for the next draw.
    pub fn transform(&mut self, transform: &Transform) {
        self.binder.bind_transform(transform);
    }

    /// Selects a flat color (and disables texturing) for the next draw.
    pub fn color(&mut self, color: Vec4) {
        self.binder.bind_color(color);
    }

    /// Selects a registered texture for the next draw.
    pub fn texture(&mut self, tag: &str) {
        self.binder.bind_texture(tag);
    }

    /// Sets the texture coordinate multiplier.
    pub fn uv_scale(&mut self, u: f32, v: f32) {
        self.binder.bind_uv_scale(u, v);
    }

    /// Applies a registered material to the next draw.
    pub fn material(&mut self, tag: &str) {
        self.binder.bind_material(tag);
    }

    /// Issues the draw with whatever state the preceding calls bound.
    pub fn draw(&mut self, kind: PrimitiveKind) {
        self.meshes.draw(kind);
    }

    /// The uniform state the next draw would read.
    pub fn state(&self) -> &DrawState {
        self.binder.state()
    }
}

/// An unprepared scene: collaborators assembled, registries empty.
pub struct Stage<S, M, D> {
    shader: S,
    meshes: M,
    device: D,
    textures: TextureRegistry,
    materials: MaterialLibrary,
}

impl<S, M, D> Stage<S, M, D>
where
    S: ShaderInterface,
    M: MeshProvider,
    D: TextureDevice,
{
    pub fn new(shader: S, meshes: M, device: D) -> Self {
        Self {
            shader,
            meshes,
            device,
            textures: TextureRegistry::new(),
            materials: MaterialLibrary::new(),
        }
    }

    /// Replaces the texture registry configuration (e.g. flip-on-load).
    pub fn with_texture_registry(mut self, textures: TextureRegistry) -> Self {
        self.textures = textures;
        self
    }

    /// Runs the script's preparation, then binds every registered texture
    /// to its unit.
    ///
    /// Preparation must complete fully before the first frame; on error the
    /// stage is dropped and nothing renders.
    pub fn prepare(mut self, script: &mut dyn SceneScript) -> Result<ReadyStage<S, M, D>, StageError> {
        {
            let mut prep = ScenePrep {
                shader: &mut self.shader,
                meshes: &mut self.meshes,
                device: &mut self.device,
                textures: &mut self.textures,
                materials: &mut self.materials,
            };
            script.prepare(&mut prep)?;
        }

        self.textures.bind_all(&mut self.device);
        tracing::info!(
            textures = self.textures.len(),
            materials = self.materials.len(),
            "scene prepared"
        );

        Ok(ReadyStage {
            shader: self.shader,
            meshes: self.meshes,
            device: self.device,
            textures: self.textures,
            materials: self.materials,
            state: DrawState::default(),
        })
    }
}

/// A prepared scene that can render frames.
///
/// Dropping it releases every registered texture exactly once.
pub struct ReadyStage<S, M, D>
where
    S: ShaderInterface,
    M: MeshProvider,
    D: TextureDevice,
{
    shader: S,
    meshes: M,
    device: D,
    textures: TextureRegistry,
    materials: MaterialLibrary,
    state: DrawState,
}

impl<S, M, D> ReadyStage<S, M, D>
where
    S: ShaderInterface,
    M: MeshProvider,
    D: TextureDevice,
{
    /// Renders one frame by replaying the script's draw sequence.
    ///
    /// The draw state is carried forward between frames explicitly, exactly
    /// like the shader's own retained uniforms.
    pub fn render(&mut self, script: &mut dyn SceneScript) {
        let mut frame = Frame {
            binder: ShaderBinder::new(
                &mut self.shader,
                &self.textures,
                &self.materials,
                &mut self.state,
            ),
            meshes: &mut self.meshes,
        };
        script.render(&mut frame);
    }

    pub fn shader(&self) -> &S {
        &self.shader
    }

    pub fn shader_mut(&mut self) -> &mut S {
        &mut self.shader
    }

    pub fn meshes(&self) -> &M {
        &self.meshes
    }

    pub fn textures(&self) -> &TextureRegistry {
        &self.textures
    }

    pub fn materials(&self) -> &MaterialLibrary {
        &self.materials
    }

    /// The uniform state left behind by the most recent frame.
    pub fn state(&self) -> &DrawState {
        &self.state
    }
}

impl<S, M, D> Drop for ReadyStage<S, M, D>
where
    S: ShaderInterface,
    M: MeshProvider,
    D: TextureDevice,
{
    fn drop(&mut self) {
        self.textures.release_all(&mut self.device);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{
        CountingMeshes, MockTextureDevice, RecordingShader, UniformValue, test_material, tiny_png,
    };
    use crate::uniforms;
    use glam::vec4;

    /// Three textures, two materials, a two-object frame.
    struct WorkshopScene;

    impl SceneScript for WorkshopScene {
        fn prepare(&mut self, scene: &mut ScenePrep<'_>) -> Result<(), StageError> {
            let png = tiny_png();
            scene.load_texture_from_memory(&png, "oakd")?;
            scene.load_texture_from_memory(&png, "oakl")?;
            scene.load_texture_from_memory(&png, "brass")?;

            scene.define_material(test_material("plane", 16.0));
            scene.define_material(test_material("box", 64.0));

            scene.load_mesh(PrimitiveKind::Plane)?;
            scene.load_mesh(PrimitiveKind::Box)?;
            Ok(())
        }

        fn render(&mut self, frame: &mut Frame<'_>) {
            frame.transform(&Transform::IDENTITY);
            frame.color(vec4(0.9, 0.85, 0.75, 1.0));
            frame.material("plane");
            frame.draw(PrimitiveKind::Plane);

            frame.transform(&Transform::IDENTITY);
            frame.texture("oakl");
            frame.uv_scale(2.0, 2.0);
            frame.material("box");
            frame.draw(PrimitiveKind::Box);
        }
    }

    #[test]
    fn end_to_end_binds_units_in_registration_order() {
        let stage = Stage::new(
            RecordingShader::new(),
            CountingMeshes::new(),
            MockTextureDevice::new(),
        );
        let mut script = WorkshopScene;
        let mut ready = stage.prepare(&mut script).unwrap();

        assert_eq!(ready.textures().slot("oakd"), Some(0));
        assert_eq!(ready.textures().slot("oakl"), Some(1));
        assert_eq!(ready.textures().slot("brass"), Some(2));

        ready.render(&mut script);

        // The second object selected "oakl", which lives on unit 1.
        assert_eq!(
            ready.shader().get(uniforms::OBJECT_TEXTURE),
            Some(&UniformValue::Sampler(1))
        );
        assert_eq!(ready.meshes().drawn, vec![PrimitiveKind::Plane, PrimitiveKind::Box]);
        assert_eq!(
            ready.meshes().loaded,
            vec![PrimitiveKind::Plane, PrimitiveKind::Box]
        );
    }

    #[test]
    fn frames_are_repeatable() {
        let stage = Stage::new(
            RecordingShader::new(),
            CountingMeshes::new(),
            MockTextureDevice::new(),
        );
        let mut script = WorkshopScene;
        let mut ready = stage.prepare(&mut script).unwrap();

        ready.render(&mut script);
        ready.render(&mut script);

        assert_eq!(ready.meshes().drawn.len(), 4);
        // Registries are untouched by rendering.
        assert_eq!(ready.textures().len(), 3);
        assert_eq!(ready.materials().len(), 2);
    }

    #[test]
    fn draw_state_carries_across_frames() {
        let stage = Stage::new(
            RecordingShader::new(),
            CountingMeshes::new(),
            MockTextureDevice::new(),
        );
        let mut script = WorkshopScene;
        let mut ready = stage.prepare(&mut script).unwrap();

        ready.render(&mut script);
        // The last object in the frame bound "box" and the "oakl" unit.
        assert_eq!(ready.state().material.as_ref().unwrap().tag, "box");
        assert_eq!(ready.state().texture_unit, Some(1));
    }

    #[test]
    fn mesh_load_failure_aborts_preparation() {
        let meshes = CountingMeshes {
            fail_loads: Some("no geometry backend".to_string()),
            ..Default::default()
        };
        let stage = Stage::new(RecordingShader::new(), meshes, MockTextureDevice::new());

        let err = stage.prepare(&mut WorkshopScene).unwrap_err();
        assert!(matches!(err, StageError::Mesh(_)));
    }

    #[test]
    fn dropping_a_ready_stage_releases_textures_once() {
        struct DropProbe;
        impl SceneScript for DropProbe {
            fn prepare(&mut self, scene: &mut ScenePrep<'_>) -> Result<(), StageError> {
                scene.load_texture_from_memory(&tiny_png(), "only")?;
                Ok(())
            }
            fn render(&mut self, _frame: &mut Frame<'_>) {}
        }

        let stage = Stage::new(
            RecordingShader::new(),
            CountingMeshes::new(),
            MockTextureDevice::new(),
        );
        let ready = stage.prepare(&mut DropProbe).unwrap();
        drop(ready);
        // Nothing to observe after the drop: the device went down with the
        // stage. Release behavior itself is covered in the texture tests;
        // this pins that dropping after a successful prepare is safe.
    }

    #[test]
    fn lighting_configured_in_prepare_is_visible_to_frames() {
        struct LitScene;
        impl SceneScript for LitScene {
            fn prepare(&mut self, scene: &mut ScenePrep<'_>) -> Result<(), StageError> {
                scene.configure_lighting(&LightingConfig {
                    view_position: glam::vec3(4.0, 1.0, 4.0),
                    lights: vec![],
                });
                Ok(())
            }
            fn render(&mut self, _frame: &mut Frame<'_>) {}
        }

        let stage = Stage::new(
            RecordingShader::new(),
            CountingMeshes::new(),
            MockTextureDevice::new(),
        );
        let ready = stage.prepare(&mut LitScene).unwrap();
        assert_eq!(
            ready.shader().get(uniforms::USE_LIGHTING),
            Some(&UniformValue::Bool(true))
        );
    }
}
