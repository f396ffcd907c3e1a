//! Tagged texture registry.
//!
//! Loads image files into device textures and maps string tags to scarce
//! texture-unit slots. Registration order is load-bearing: slot index `i`
//! is bound to texture unit `i`, and sampler uniforms address textures by
//! that index.

use std::path::{Path, PathBuf};

use image::DynamicImage;
use thiserror::Error;

use crate::traits::{TextureData, TextureDevice, TextureHandle};

/// Most texture units a registry will hand out.
///
/// Matches the minimum number of simultaneously bound units the host
/// graphics API guarantees.
pub const MAX_TEXTURE_UNITS: usize = 16;

/// Texture registration errors.
///
/// All of these surface at load time; lookups at draw time never error (see
/// [`crate::binding::ShaderBinder`]).
#[derive(Debug, Error)]
pub enum TextureError {
    #[error("failed to decode image {path:?}: {source}")]
    Decode {
        path: PathBuf,
        source: image::ImageError,
    },
    #[error("image {path:?} has {channels} color channels, expected 3 (RGB) or 4 (RGBA)")]
    UnsupportedChannelCount { path: PathBuf, channels: u8 },
    #[error("texture registry is full ({capacity} units)")]
    CapacityExceeded { capacity: usize },
}

/// A registered tag/texture pair. The slot's position in the registry is
/// its texture-unit binding index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureSlot {
    pub tag: String,
    pub handle: TextureHandle,
}

/// Ordered tag-to-texture registry.
///
/// Textures are registered once during scene preparation, bound to units in
/// registration order, looked up read-only while rendering, and released at
/// teardown.
pub struct TextureRegistry {
    slots: Vec<TextureSlot>,
    flip_vertically: bool,
}

impl TextureRegistry {
    /// Creates an empty registry.
    ///
    /// Vertical flip-on-load defaults to on: image files put the origin at
    /// the top-left while texture space puts it at the bottom-left. The
    /// setting applies to the whole registry, never per image.
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            flip_vertically: true,
        }
    }

    /// Disables or re-enables vertical flip-on-load for every subsequent
    /// registration.
    pub fn with_flip(mut self, flip_vertically: bool) -> Self {
        self.flip_vertically = flip_vertically;
        self
    }

    /// Decodes an image file and registers its texture under `tag`.
    ///
    /// The image must have exactly 3 or 4 color channels; anything else is
    /// an error, reported without mutating the registry. Decode and channel
    /// failures are the caller's decision to tolerate - a scene can render
    /// on without the texture.
    ///
    /// Duplicate tags are not rejected; lookups return the first
    /// registration, so a duplicate shadows its earlier namesake forever.
    pub fn register(
        &mut self,
        device: &mut dyn TextureDevice,
        path: impl AsRef<Path>,
        tag: impl Into<String>,
    ) -> Result<TextureHandle, TextureError> {
        let path = path.as_ref();
        let image = image::open(path).map_err(|source| TextureError::Decode {
            path: path.to_path_buf(),
            source,
        })?;
        self.register_decoded(device, image, path, tag.into())
    }

    /// Registers a texture from an already-encoded image held in memory.
    pub fn register_from_memory(
        &mut self,
        device: &mut dyn TextureDevice,
        bytes: &[u8],
        tag: impl Into<String>,
    ) -> Result<TextureHandle, TextureError> {
        let tag = tag.into();
        let path = PathBuf::from(format!("<memory:{tag}>"));
        let image = image::load_from_memory(bytes).map_err(|source| TextureError::Decode {
            path: path.clone(),
            source,
        })?;
        self.register_decoded(device, image, &path, tag)
    }

    fn register_decoded(
        &mut self,
        device: &mut dyn TextureDevice,
        image: DynamicImage,
        path: &Path,
        tag: String,
    ) -> Result<TextureHandle, TextureError> {
        if self.slots.len() >= MAX_TEXTURE_UNITS {
            return Err(TextureError::CapacityExceeded {
                capacity: MAX_TEXTURE_UNITS,
            });
        }

        let channels = image.color().channel_count();
        if channels != 3 && channels != 4 {
            return Err(TextureError::UnsupportedChannelCount {
                path: path.to_path_buf(),
                channels,
            });
        }

        let image = if self.flip_vertically {
            image.flipv()
        } else {
            image
        };

        // RGB is expanded here; devices only ever see tightly packed RGBA.
        let rgba = image.to_rgba8();
        let (width, height) = rgba.dimensions();
        let data = TextureData {
            width,
            height,
            pixels: rgba.into_raw(),
        };

        let handle = device.create_texture(&tag, &data);
        tracing::info!(
            path = %path.display(),
            tag = %tag,
            width,
            height,
            channels,
            slot = self.slots.len(),
            "loaded texture"
        );
        self.slots.push(TextureSlot { tag, handle });
        Ok(handle)
    }

    /// Binds every registered texture to its unit, slot `i` to unit `i`.
    ///
    /// Must run once after all registrations and before any draw that
    /// selects a texture by tag; [`slot`](Self::slot) indices only mean
    /// anything once unit bindings match registration order.
    pub fn bind_all(&self, device: &mut dyn TextureDevice) {
        for (unit, slot) in self.slots.iter().enumerate() {
            device.bind_unit(unit as u32, slot.handle);
        }
    }

    /// Texture-unit index for `tag`; first registration wins on duplicates.
    pub fn slot(&self, tag: &str) -> Option<u32> {
        self.slots
            .iter()
            .position(|slot| slot.tag == tag)
            .map(|index| index as u32)
    }

    /// Device handle for `tag`; first registration wins on duplicates.
    pub fn handle(&self, tag: &str) -> Option<TextureHandle> {
        self.slots
            .iter()
            .find(|slot| slot.tag == tag)
            .map(|slot| slot.handle)
    }

    /// Destroys every registered texture and empties the registry.
    ///
    /// Draining makes a second call a no-op, so there is no double-free
    /// hazard at teardown.
    pub fn release_all(&mut self, device: &mut dyn TextureDevice) {
        for slot in self.slots.drain(..) {
            device.destroy_texture(slot.handle);
        }
    }

    /// Returns the registered slots in binding order.
    pub fn slots(&self) -> &[TextureSlot] {
        &self.slots
    }

    /// Number of registered textures.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns true if nothing has been registered.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl Default for TextureRegistry {
    fn default() -> Self {
        Self::new()
    }
}
