//! Texture loading: decode on the CPU, then upload once.
//!
//! Decoded rows are flipped before upload. Image files store the top row
//! first while GL texture coordinates start at the bottom-left.

use std::path::Path;

use image::{imageops, DynamicImage};

use crate::error::TextureError;
use crate::gl::{gl_enum, gl_size, GlBackend};

/// Channel layouts the loader accepts.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PixelFormat {
    /// 3 channels, 8 bits each.
    Rgb8,
    /// 4 channels, 8 bits each.
    Rgba8,
}

impl PixelFormat {
    /// Bytes per pixel.
    #[must_use]
    pub fn channels(self) -> u8 {
        match self {
            PixelFormat::Rgb8 => 3,
            PixelFormat::Rgba8 => 4,
        }
    }

    /// `(internal_format, format)` pair for `tex_image_2d`.
    fn gl_formats(self) -> (i32, u32) {
        match self {
            PixelFormat::Rgb8 => (gl_enum(glow::RGB8), glow::RGB),
            PixelFormat::Rgba8 => (gl_enum(glow::RGBA8), glow::RGBA),
        }
    }
}

/// Decoded, bottom-row-first pixel data ready for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Channel layout of `pixels`.
    pub format: PixelFormat,
    /// Tightly packed rows, bottom row first.
    pub pixels: Vec<u8>,
}

/// Decode an encoded image (PNG, JPEG) held in memory.
///
/// # Errors
///
/// Returns [`TextureError::Decode`] for undecodable bytes and
/// [`TextureError::UnsupportedChannels`] for anything but 3 or 4 channels.
pub fn decode_texture(bytes: &[u8]) -> Result<TextureImage, TextureError> {
    let image = image::load_from_memory(bytes)?;
    to_texture_image(image)
}

/// Read and decode an image file.
///
/// # Errors
///
/// As [`decode_texture`], plus [`TextureError::Io`] if the file cannot be
/// read.
pub fn decode_texture_file(path: &Path) -> Result<TextureImage, TextureError> {
    let bytes = std::fs::read(path).map_err(|source| TextureError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    decode_texture(&bytes)
}

/// Convert to 8 bits per channel and flip rows.
fn to_texture_image(image: DynamicImage) -> Result<TextureImage, TextureError> {
    let (width, height) = (image.width(), image.height());
    let (format, pixels) = match image.color().channel_count() {
        3 => {
            let mut rgb = image.into_rgb8();
            imageops::flip_vertical_in_place(&mut rgb);
            (PixelFormat::Rgb8, rgb.into_raw())
        }
        4 => {
            let mut rgba = image.into_rgba8();
            imageops::flip_vertical_in_place(&mut rgba);
            (PixelFormat::Rgba8, rgba.into_raw())
        }
        n => return Err(TextureError::UnsupportedChannels(n)),
    };

    Ok(TextureImage {
        width,
        height,
        format,
        pixels,
    })
}

/// A 2D texture resident on the GPU.
pub struct Texture<G: GlBackend> {
    handle: G::Texture,
}

impl<G: GlBackend> Texture<G> {
    /// Upload with repeat wrapping, linear filtering and a full mipmap
    /// chain.
    ///
    /// # Safety
    ///
    /// Requires a valid, current OpenGL context.
    ///
    /// # Errors
    ///
    /// Returns [`TextureError::Create`] if the driver cannot create the
    /// texture object.
    pub unsafe fn upload(gl: &G, image: &TextureImage) -> Result<Self, TextureError> {
        let handle = unsafe { gl.create_texture() }.map_err(TextureError::Create)?;
        let (internal_format, format) = image.format.gl_formats();

        unsafe {
            gl.bind_texture(glow::TEXTURE_2D, Some(handle));

            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_S, gl_enum(glow::REPEAT));
            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_T, gl_enum(glow::REPEAT));
            gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_MIN_FILTER,
                gl_enum(glow::LINEAR),
            );
            gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_MAG_FILTER,
                gl_enum(glow::LINEAR),
            );

            // RGB rows are not 4-byte aligned for most widths.
            gl.pixel_store_i32(glow::UNPACK_ALIGNMENT, 1);
            gl.tex_image_2d(
                glow::TEXTURE_2D,
                0,
                internal_format,
                gl_size(image.width),
                gl_size(image.height),
                0,
                format,
                glow::UNSIGNED_BYTE,
                Some(&image.pixels),
            );
            gl.pixel_store_i32(glow::UNPACK_ALIGNMENT, 4);

            gl.generate_mipmap(glow::TEXTURE_2D);
            gl.bind_texture(glow::TEXTURE_2D, None);
        }

        log::info!(
            "uploaded texture {}x{} ({:?})",
            image.width,
            image.height,
            image.format
        );
        Ok(Self { handle })
    }

    /// Bind to `TEXTURE_2D` on the active texture unit.
    ///
    /// # Safety
    ///
    /// Requires the context the texture was uploaded with to be current.
    pub unsafe fn bind(&self, gl: &G) {
        unsafe { gl.bind_texture(glow::TEXTURE_2D, Some(self.handle)) };
    }

    /// Release the texture object.
    ///
    /// # Safety
    ///
    /// Requires the context the texture was uploaded with to be current.
    pub unsafe fn destroy(self, gl: &G) {
        unsafe { gl.delete_texture(self.handle) };
    }
}
