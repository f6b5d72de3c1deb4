//! Error types for each startup stage.
//!
//! Every error here is fatal to the demo: the binary reports it and exits
//! with a failure code. Nothing is retried.

use std::path::PathBuf;

use thiserror::Error;

/// Shader program build failure. Carries the driver's info log.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShaderError {
    /// The driver refused to create a shader or program object.
    #[error("failed to create GL object: {0}")]
    Create(String),
    /// The vertex stage did not compile.
    #[error("vertex shader compilation failed:\n{0}")]
    VertexCompile(String),
    /// The fragment stage did not compile.
    #[error("fragment shader compilation failed:\n{0}")]
    FragmentCompile(String),
    /// Both stages compiled but the program did not link.
    #[error("shader program linking failed:\n{0}")]
    Link(String),
    /// The linked program does not expose a uniform the renderer sets.
    #[error("uniform `{0}` missing from shader program")]
    MissingUniform(&'static str),
}

/// Texture load failure.
#[derive(Error, Debug)]
pub enum TextureError {
    /// The file could not be read.
    #[error("failed to read texture {path}: {source}")]
    Io {
        /// Path that was opened.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// The bytes are not a decodable image.
    #[error("failed to decode texture: {0}")]
    Decode(#[from] image::ImageError),
    /// Only RGB and RGBA images are handled.
    #[error("not implemented to handle image with {0} channels")]
    UnsupportedChannels(u8),
    /// The driver refused to create a texture object.
    #[error("failed to create GL texture: {0}")]
    Create(String),
}

/// Mesh upload failure.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MeshError {
    /// The driver refused to create a vertex array or buffer.
    #[error("failed to create GL object for mesh `{mesh}`: {reason}")]
    Create {
        /// Name of the mesh being uploaded.
        mesh: &'static str,
        /// Driver message.
        reason: String,
    },
}

/// Any failure while bringing the scene up.
#[derive(Error, Debug)]
pub enum DemoError {
    /// Shader build failed.
    #[error(transparent)]
    Shader(#[from] ShaderError),
    /// Texture load failed.
    #[error(transparent)]
    Texture(#[from] TextureError),
    /// Mesh upload failed.
    #[error(transparent)]
    Mesh(#[from] MeshError),
}
