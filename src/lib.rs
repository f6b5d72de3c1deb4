//! A free-fly OpenGL scene demo using [glow], [winit] and [glutin].
//!
//! The scene is fixed: a ground plane and a tree made of a cylindrical
//! trunk and a conical top, each an indexed mesh with per-vertex colors.
//! A [`Camera`] flies through it under keyboard and mouse control.
//!
//! # Controls
//!
//! - **W/A/S/D** move forward, left, backward and right.
//! - **Q/E** move up and down.
//! - **Mouse** looks around; the **wheel** zooms.
//! - **P** flips the camera's debug display flag.
//! - **Esc** or closing the window quits.
//!
//! # Layout
//!
//! Everything that can run without a window lives in this library and is
//! unit tested: the camera, input dispatch ([`App`] implements
//! [`InputHandler`]), frame timing, texture decoding, and the GL resource
//! code, which is written against the [`GlBackend`] trait rather than
//! directly against [`glow::Context`]. [`run`] connects it all to a real
//! window.
//!
//! # Safety
//!
//! Creating and using GPU resources ([`SceneRenderer`], [`Mesh`],
//! [`Texture`], [`compile_program`]) requires a valid, current OpenGL
//! context. Those functions are `unsafe` because they issue raw GL calls.
//!
//! [glow]: https://docs.rs/glow
//! [winit]: https://docs.rs/winit
//! [glutin]: https://docs.rs/glutin

pub mod app;
pub mod camera;
pub mod config;
pub mod error;
pub mod gl;
pub mod input;
pub mod logging;
pub mod mesh;
pub mod renderer;
pub mod runtime;
pub mod scene;
pub mod shaders;
pub mod shapes;
pub mod texture;
pub mod time;

pub use app::{App, LoopState};
pub use camera::{Camera, CameraMovement};
pub use config::DemoConfig;
pub use error::{DemoError, MeshError, ShaderError, TextureError};
pub use gl::GlBackend;
pub use input::{ButtonState, InputHandler, Key, MouseButton};
pub use logging::{init_logging, LoggingConfig};
pub use mesh::{Mesh, MeshDescriptor, Vertex};
pub use renderer::SceneRenderer;
pub use runtime::run;
pub use shaders::compile_program;
pub use texture::{decode_texture, decode_texture_file, PixelFormat, Texture, TextureImage};
pub use time::{FrameClock, FrameTime};
