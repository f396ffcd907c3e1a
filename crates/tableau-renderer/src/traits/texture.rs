//! Texture device contract.

/// Handle to a texture owned by a [`TextureDevice`].
///
/// Handles are opaque, lightweight, and can be copied freely; the actual
/// GPU object stays inside the device that issued the handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(u64);

impl TextureHandle {
    /// Returns the raw handle value.
    pub fn raw(&self) -> u64 {
        self.0
    }

    /// Creates a handle from a raw value.
    pub fn from_raw(value: u64) -> Self {
        Self(value)
    }
}

/// Decoded pixel data ready for upload, always tightly packed RGBA8.
///
/// The registry normalizes 3-channel images to RGBA before handing them
/// over, since not every graphics API exposes a 3-channel sampled format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureData {
    pub width: u32,
    pub height: u32,
    /// `width * height * 4` bytes, row-major, top row first.
    pub pixels: Vec<u8>,
}

/// GPU texture creation, unit binding, and destruction.
///
/// Implementations create sampled textures with repeat wrapping, linear
/// min/mag filtering, and a full mipmap chain, and support at least 16
/// simultaneously bound units.
pub trait TextureDevice {
    /// Creates a texture object from the given pixels and returns its handle.
    fn create_texture(&mut self, label: &str, data: &TextureData) -> TextureHandle;

    /// Binds a texture to a texture unit so samplers can address it by index.
    fn bind_unit(&mut self, unit: u32, handle: TextureHandle);

    /// Destroys the texture behind the handle. Unknown handles are ignored.
    fn destroy_texture(&mut self, handle: TextureHandle);
}
