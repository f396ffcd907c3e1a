//! Headless bedroom scene demo.
//!
//! Prepares the bedroom scene against a real wgpu device - textures with
//! full mip chains, uniforms in a GPU buffer - and replays one frame,
//! logging every draw. Geometry submission is left to an embedding
//! pipeline, so the mesh provider here only records what would be drawn.

mod bedroom;

use std::sync::Arc;

use anyhow::Context;
use tableau_core::PrimitiveKind;
use tableau_renderer::gpu::{ShaderUniforms, WgpuTextureDevice};
use tableau_renderer::scene::Stage;
use tableau_renderer::traits::{MeshError, MeshProvider};

use bedroom::BedroomScene;

/// Mesh provider that logs loads and draws instead of owning geometry.
#[derive(Default)]
struct LoggedMeshes {
    draw_count: usize,
}

impl MeshProvider for LoggedMeshes {
    fn load(&mut self, kind: PrimitiveKind) -> Result<(), MeshError> {
        tracing::info!(%kind, "mesh resident");
        Ok(())
    }

    fn draw(&mut self, kind: PrimitiveKind) {
        self.draw_count += 1;
        tracing::info!(%kind, call = self.draw_count, "draw");
    }
}

async fn create_device() -> anyhow::Result<(Arc<wgpu::Device>, Arc<wgpu::Queue>)> {
    let instance = wgpu::Instance::default();
    let adapter = instance
        .request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::LowPower,
            force_fallback_adapter: false,
            compatible_surface: None,
        })
        .await
        .context("no compatible graphics adapter")?;

    let (device, queue) = adapter
        .request_device(
            &wgpu::DeviceDescriptor {
                label: Some("tableau-demo device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::downlevel_defaults(),
                memory_hints: wgpu::MemoryHints::default(),
            },
            None,
        )
        .await
        .context("failed to create device")?;

    Ok((Arc::new(device), Arc::new(queue)))
}

fn main() -> anyhow::Result<()> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tableau_demo=info,tableau_renderer=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("starting bedroom scene demo");

    let (device, queue) = pollster::block_on(create_device())?;

    let texture_dir = std::env::temp_dir().join("tableau-demo-textures");
    bedroom::write_placeholder_textures(&texture_dir)?;

    let shader = ShaderUniforms::new(&device, queue.clone());
    let textures = WgpuTextureDevice::new(device, queue);
    let mut script = BedroomScene::new(&texture_dir);

    let stage = Stage::new(shader, LoggedMeshes::default(), textures);
    let mut ready = stage.prepare(&mut script)?;

    ready.render(&mut script);
    ready.shader_mut().flush();

    let state = ready.state().clone();
    tracing::info!(
        draws = ready.meshes().draw_count,
        last_material = state.material.as_ref().map(|m| m.tag.as_str()),
        "frame complete"
    );

    Ok(())
}
