//! Application context: everything the render loop mutates between frames.

use glam::Vec3;

use crate::camera::Camera;
use crate::input::{ButtonState, InputHandler, Key, KeyboardState, MouseButton, MouseTracker};

/// Whether the render loop keeps going.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum LoopState {
    /// Frames are being rendered.
    #[default]
    Running,
    /// A quit was requested; the loop exits before the next frame.
    Terminating,
}

/// Camera plus the input state that drives it.
///
/// Window events reach it through [`InputHandler`]; once per frame the
/// runtime calls [`update`](Self::update) with the frame's delta time.
#[derive(Debug, Clone)]
pub struct App {
    camera: Camera,
    keys: KeyboardState,
    mouse: MouseTracker,
    relative_motion: bool,
    state: LoopState,
}

impl App {
    /// A running app with the camera at `camera_position`.
    #[must_use]
    pub fn new(camera_position: Vec3) -> Self {
        Self::with_camera(Camera::new(camera_position))
    }

    /// A running app around an existing camera.
    #[must_use]
    pub fn with_camera(camera: Camera) -> Self {
        Self {
            camera,
            keys: KeyboardState::default(),
            mouse: MouseTracker::default(),
            relative_motion: false,
            state: LoopState::Running,
        }
    }

    /// The camera, for rendering.
    #[must_use]
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Current loop state.
    #[must_use]
    pub fn state(&self) -> LoopState {
        self.state
    }

    /// `true` until a quit is requested.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.state == LoopState::Running
    }

    /// Ask the loop to stop after the current frame.
    pub fn request_exit(&mut self) {
        if self.state == LoopState::Running {
            log::info!("exit requested");
        }
        self.state = LoopState::Terminating;
    }

    /// Apply every held movement key for `dt` seconds.
    pub fn update(&mut self, dt: f32) {
        for movement in self.keys.held_movements() {
            self.camera.process_keyboard(movement, dt);
        }
    }

    /// Drop held keys and the cursor reference point, e.g. when the window
    /// loses focus and release events would be missed.
    pub fn reset_input(&mut self) {
        self.keys.clear();
        self.mouse.reset();
    }
}

impl InputHandler for App {
    fn on_key(&mut self, key: Key, state: ButtonState) {
        let pressed = self.keys.apply(key, state);
        match key {
            Key::Escape if pressed => self.request_exit(),
            Key::P if pressed => self.camera.toggle_display(),
            _ => {}
        }
    }

    fn on_cursor_moved(&mut self, x: f64, y: f64) {
        // Once raw motion arrives it drives the camera; absolute positions
        // would count the same movement twice.
        if self.relative_motion {
            return;
        }
        let (x_offset, y_offset) = self.mouse.offsets(x, y);
        self.camera.process_mouse_movement(x_offset, y_offset);
    }

    #[expect(clippy::cast_possible_truncation)]
    fn on_mouse_motion(&mut self, dx: f64, dy: f64) {
        self.relative_motion = true;
        self.camera.process_mouse_movement(dx as f32, -dy as f32);
    }

    #[expect(clippy::cast_possible_truncation)]
    fn on_scroll(&mut self, y_offset: f64) {
        self.camera.process_mouse_scroll(y_offset as f32);
    }

    fn on_mouse_button(&mut self, button: MouseButton, state: ButtonState) {
        let action = match state {
            ButtonState::Pressed => "pressed",
            ButtonState::Released => "released",
        };
        match button {
            MouseButton::Left => log::info!("Left mouse button {action}"),
            MouseButton::Middle => log::info!("Middle mouse button {action}"),
            MouseButton::Right => log::info!("Right mouse button {action}"),
            MouseButton::Other => log::info!("Unhandled mouse button event"),
        }
    }

    fn on_close_requested(&mut self) {
        self.request_exit();
    }
}
