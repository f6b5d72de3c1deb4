//! Platform-neutral input vocabulary and dispatch.
//!
//! The runtime translates winit events into [`InputHandler`] calls, so the
//! application logic can be driven by tests without a window.

use std::collections::HashSet;

use crate::camera::CameraMovement;

/// Keys the demo reacts to.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    /// Move forward.
    W,
    /// Strafe left.
    A,
    /// Move backward.
    S,
    /// Strafe right.
    D,
    /// Move up.
    Q,
    /// Move down.
    E,
    /// Toggle the camera's display flag.
    P,
    /// Quit.
    Escape,
}

impl Key {
    /// Camera movement bound to this key, if any.
    #[must_use]
    pub fn movement(self) -> Option<CameraMovement> {
        match self {
            Key::W => Some(CameraMovement::Forward),
            Key::S => Some(CameraMovement::Backward),
            Key::A => Some(CameraMovement::Left),
            Key::D => Some(CameraMovement::Right),
            Key::Q => Some(CameraMovement::Up),
            Key::E => Some(CameraMovement::Down),
            Key::P | Key::Escape => None,
        }
    }
}

/// Mouse buttons the demo reports.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Primary button.
    Left,
    /// Wheel button.
    Middle,
    /// Secondary button.
    Right,
    /// Anything else.
    Other,
}

/// Press or release.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ButtonState {
    /// Went down.
    Pressed,
    /// Went up.
    Released,
}

/// Receiver of translated window events.
pub trait InputHandler {
    /// A tracked key changed state. Repeats are filtered out by the caller.
    fn on_key(&mut self, key: Key, state: ButtonState);
    /// The cursor moved to an absolute window position (pixels, Y down).
    fn on_cursor_moved(&mut self, x: f64, y: f64);
    /// Raw relative mouse motion (device units, Y down). Unlike cursor
    /// positions it keeps arriving when the cursor is pinned at an edge.
    fn on_mouse_motion(&mut self, dx: f64, dy: f64);
    /// Vertical scroll in lines; positive away from the user.
    fn on_scroll(&mut self, y_offset: f64);
    /// A mouse button changed state.
    fn on_mouse_button(&mut self, button: MouseButton, state: ButtonState);
    /// The window's close button was pressed.
    fn on_close_requested(&mut self);
}

/// Set of currently held keys.
#[derive(Debug, Default, Clone)]
pub struct KeyboardState {
    held: HashSet<Key>,
}

impl KeyboardState {
    /// Record a key transition. Returns `true` when the key was not already
    /// held and is now pressed.
    pub fn apply(&mut self, key: Key, state: ButtonState) -> bool {
        match state {
            ButtonState::Pressed => self.held.insert(key),
            ButtonState::Released => {
                self.held.remove(&key);
                false
            }
        }
    }

    /// Whether `key` is currently down.
    #[must_use]
    pub fn is_held(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    /// Movements for every held movement key.
    pub fn held_movements(&self) -> impl Iterator<Item = CameraMovement> + '_ {
        self.held.iter().filter_map(|key| key.movement())
    }

    /// Forget all held keys (e.g. on focus loss).
    pub fn clear(&mut self) {
        self.held.clear();
    }
}

/// Converts absolute cursor positions into look offsets.
///
/// The first sample only establishes the reference point, so the camera
/// does not jump when the cursor first enters the window.
#[derive(Debug, Default, Clone)]
pub struct MouseTracker {
    last: Option<(f64, f64)>,
}

impl MouseTracker {
    /// Offsets since the previous sample: `x` grows to the right, `y`
    /// grows upward (screen Y is inverted).
    #[expect(clippy::cast_possible_truncation)]
    pub fn offsets(&mut self, x: f64, y: f64) -> (f32, f32) {
        let (last_x, last_y) = self.last.replace((x, y)).unwrap_or((x, y));
        ((x - last_x) as f32, (last_y - y) as f32)
    }

    /// Treat the next sample as the first again.
    pub fn reset(&mut self) {
        self.last = None;
    }
}
