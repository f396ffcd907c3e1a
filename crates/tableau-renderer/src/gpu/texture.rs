//! wgpu texture device.

use std::collections::HashMap;
use std::sync::Arc;

use image::RgbaImage;
use image::imageops::FilterType;

use crate::texture::MAX_TEXTURE_UNITS;
use crate::traits::{TextureData, TextureDevice, TextureHandle};

/// Number of mip levels for a full chain down to 1x1.
pub fn mip_level_count(width: u32, height: u32) -> u32 {
    32 - width.max(height).max(1).leading_zeros()
}

/// Dimensions of the given mip level, clamped at 1.
pub fn mip_dimensions(width: u32, height: u32, level: u32) -> (u32, u32) {
    ((width >> level).max(1), (height >> level).max(1))
}

/// A texture object and its sampled view.
struct GpuTexture {
    texture: wgpu::Texture,
    view: wgpu::TextureView,
}

/// Texture device over a wgpu device/queue pair.
///
/// Owns every texture it creates, keyed by handle, plus one shared sampler
/// with repeat wrapping and linear filtering. wgpu does not generate
/// mipmaps, so the chain is downsampled on the CPU and uploaded level by
/// level.
///
/// Unit bindings are tracked as a table of views; the embedding render
/// pipeline assembles its texture bind group from [`bound_view`] and
/// [`sampler`].
///
/// [`bound_view`]: WgpuTextureDevice::bound_view
/// [`sampler`]: WgpuTextureDevice::sampler
pub struct WgpuTextureDevice {
    device: Arc<wgpu::Device>,
    queue: Arc<wgpu::Queue>,
    sampler: wgpu::Sampler,
    textures: HashMap<TextureHandle, GpuTexture>,
    bound: [Option<TextureHandle>; MAX_TEXTURE_UNITS],
    next_handle: u64,
}

impl WgpuTextureDevice {
    pub fn new(device: Arc<wgpu::Device>, queue: Arc<wgpu::Queue>) -> Self {
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("Scene Texture Sampler"),
            address_mode_u: wgpu::AddressMode::Repeat,
            address_mode_v: wgpu::AddressMode::Repeat,
            address_mode_w: wgpu::AddressMode::Repeat,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        Self {
            device,
            queue,
            sampler,
            textures: HashMap::new(),
            bound: [None; MAX_TEXTURE_UNITS],
            next_handle: 0,
        }
    }

    /// The shared repeat/linear sampler.
    pub fn sampler(&self) -> &wgpu::Sampler {
        &self.sampler
    }

    /// The view currently bound to a texture unit.
    pub fn bound_view(&self, unit: u32) -> Option<&wgpu::TextureView> {
        let handle = (*self.bound.get(unit as usize)?)?;
        self.textures.get(&handle).map(|texture| &texture.view)
    }

    /// The view behind a handle, bound or not.
    pub fn view(&self, handle: TextureHandle) -> Option<&wgpu::TextureView> {
        self.textures.get(&handle).map(|texture| &texture.view)
    }

    /// Number of live texture objects.
    pub fn texture_count(&self) -> usize {
        self.textures.len()
    }

    fn write_level(&self, texture: &wgpu::Texture, level: u32, width: u32, height: u32, pixels: &[u8]) {
        self.queue.write_texture(
            wgpu::ImageCopyTexture {
                texture,
                mip_level: level,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            pixels,
            wgpu::ImageDataLayout {
                offset: 0,
                bytes_per_row: Some(4 * width),
                rows_per_image: Some(height),
            },
            wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
        );
    }
}

impl TextureDevice for WgpuTextureDevice {
    fn create_texture(&mut self, label: &str, data: &TextureData) -> TextureHandle {
        let mip_count = mip_level_count(data.width, data.height);
        let texture = self.device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size: wgpu::Extent3d {
                width: data.width,
                height: data.height,
                depth_or_array_layers: 1,
            },
            mip_level_count: mip_count,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        self.write_level(&texture, 0, data.width, data.height, &data.pixels);

        match RgbaImage::from_raw(data.width, data.height, data.pixels.clone()) {
            Some(mut level_image) => {
                for level in 1..mip_count {
                    let (width, height) = mip_dimensions(data.width, data.height, level);
                    level_image =
                        image::imageops::resize(&level_image, width, height, FilterType::Triangle);
                    self.write_level(&texture, level, width, height, &level_image);
                }
            }
            None => {
                tracing::warn!(label, "pixel buffer size mismatch, mip chain skipped");
            }
        }

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        self.next_handle += 1;
        let handle = TextureHandle::from_raw(self.next_handle);
        self.textures.insert(handle, GpuTexture { texture, view });
        handle
    }

    fn bind_unit(&mut self, unit: u32, handle: TextureHandle) {
        match self.bound.get_mut(unit as usize) {
            Some(slot) => *slot = Some(handle),
            None => tracing::warn!(unit, "texture unit out of range, binding ignored"),
        }
    }

    fn destroy_texture(&mut self, handle: TextureHandle) {
        if let Some(entry) = self.textures.remove(&handle) {
            entry.texture.destroy();
        }
        for slot in &mut self.bound {
            if *slot == Some(handle) {
                *slot = None;
            }
        }
    }
}
