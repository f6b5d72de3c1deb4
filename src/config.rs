//! Startup configuration.
//!
//! There are no command-line flags; the binary runs with
//! [`DemoConfig::default`].

use std::path::PathBuf;

use glam::Vec3;

use crate::logging::LoggingConfig;

/// Everything the demo needs to know before opening a window.
#[derive(Debug, Clone)]
pub struct DemoConfig {
    /// Window title.
    pub title: String,
    /// Initial inner size in logical pixels, `[width, height]`.
    pub window_size: [u32; 2],
    /// Image loaded as the scene texture, relative to the working directory.
    pub texture_path: PathBuf,
    /// Where the camera starts.
    pub camera_position: Vec3,
    /// RGBA clear color.
    pub clear_color: [f32; 4],
    /// Logger setup.
    pub logging: LoggingConfig,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            title: "Plane 3D Scene".to_owned(),
            window_size: [800, 600],
            texture_path: PathBuf::from("resources/textures/smiley.png"),
            camera_position: Vec3::new(0.0, 0.0, 3.0),
            clear_color: [0.0, 0.0, 0.0, 1.0],
            logging: LoggingConfig::default(),
        }
    }
}
