//! Free-fly camera driven by discrete input events.
//!
//! Angles are in degrees. The front vector follows the usual
//! spherical-to-Cartesian convention:
//!
//! ```text
//! front = normalize(cos(yaw) * cos(pitch), sin(pitch), sin(yaw) * cos(pitch))
//! ```
//!
//! so `yaw = 0, pitch = 0` looks along `+X`, and the default `yaw = -90`
//! looks along `-Z`. None of the operations fail: out-of-range input is
//! clamped, never rejected.

use glam::{Mat4, Vec3};

/// Default yaw: looking down `-Z`.
pub const YAW: f32 = -90.0;
/// Default pitch: level.
pub const PITCH: f32 = 0.0;
/// Default movement speed, in world units per second.
pub const SPEED: f32 = 2.5;
/// Default mouse sensitivity, in degrees per pixel.
pub const SENSITIVITY: f32 = 0.1;
/// Default (and widest) field of view, in degrees.
pub const ZOOM: f32 = 45.0;

/// Pitch limit in degrees; staying short of 90 keeps `front` away from
/// `world_up`, so the cross products never degenerate. The limit itself is
/// never reached: pitch stays strictly inside `(-89, 89)`.
pub const PITCH_LIMIT: f32 = 89.0;
/// Largest pitch magnitude actually held, one rounding step inside the limit.
const PITCH_MAX: f32 = PITCH_LIMIT - PITCH_LIMIT * f32::EPSILON;
/// Narrowest field of view, in degrees.
pub const MIN_ZOOM: f32 = 1.0;
/// Widest field of view, in degrees.
pub const MAX_ZOOM: f32 = 45.0;

/// Near clip plane distance.
pub const NEAR_PLANE: f32 = 0.1;
/// Far clip plane distance.
pub const FAR_PLANE: f32 = 100.0;

/// Keyboard movement directions.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum CameraMovement {
    /// Along `front`.
    Forward,
    /// Against `front`.
    Backward,
    /// Against `right`.
    Left,
    /// Along `right`.
    Right,
    /// Along `world_up`.
    Up,
    /// Against `world_up`.
    Down,
}

/// An observer with a position and a yaw/pitch orientation.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    /// Eye position in world space.
    pub position: Vec3,
    world_up: Vec3,
    yaw: f32,
    pitch: f32,
    front: Vec3,
    right: Vec3,
    up: Vec3,
    /// World units per second.
    pub movement_speed: f32,
    /// Degrees of rotation per unit of mouse offset.
    pub mouse_sensitivity: f32,
    zoom: f32,
    display: bool,
}

impl Camera {
    /// A camera at `position` with default orientation and tuning.
    #[must_use]
    pub fn new(position: Vec3) -> Self {
        Self::with_orientation(position, Vec3::Y, YAW, PITCH)
    }

    /// A camera with explicit world-up and orientation.
    ///
    /// `pitch` is clamped like any mouse update would clamp it; a
    /// non-finite pitch falls back to [`PITCH`].
    #[must_use]
    pub fn with_orientation(position: Vec3, world_up: Vec3, yaw: f32, pitch: f32) -> Self {
        let mut camera = Self {
            position,
            world_up: world_up.normalize(),
            yaw,
            pitch: clamp_pitch(if pitch.is_finite() { pitch } else { PITCH }),
            front: Vec3::NEG_Z,
            right: Vec3::X,
            up: Vec3::Y,
            movement_speed: SPEED,
            mouse_sensitivity: SENSITIVITY,
            zoom: ZOOM,
            display: false,
        };
        camera.update_vectors();
        camera
    }

    /// Horizontal look angle in degrees. Not normalized.
    #[must_use]
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    /// Vertical look angle in degrees, strictly within `(-89, 89)`.
    #[must_use]
    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Field of view in degrees, within `[1, 45]`.
    #[must_use]
    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    /// Unit view direction.
    #[must_use]
    pub fn front(&self) -> Vec3 {
        self.front
    }

    /// Unit vector to the camera's right.
    #[must_use]
    pub fn right(&self) -> Vec3 {
        self.right
    }

    /// Unit camera-space up vector.
    #[must_use]
    pub fn up(&self) -> Vec3 {
        self.up
    }

    /// Fixed world up direction.
    #[must_use]
    pub fn world_up(&self) -> Vec3 {
        self.world_up
    }

    /// State of the debug display flag flipped by [`toggle_display`](Self::toggle_display).
    #[must_use]
    pub fn display(&self) -> bool {
        self.display
    }

    /// Look-at transform from `position` towards `position + front`.
    #[must_use]
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.front, self.up)
    }

    /// Perspective projection using the current zoom as vertical field of
    /// view.
    #[must_use]
    pub fn projection_matrix(&self, aspect_ratio: f32) -> Mat4 {
        Mat4::perspective_rh_gl(
            self.zoom.to_radians(),
            aspect_ratio,
            NEAR_PLANE,
            FAR_PLANE,
        )
    }

    /// Move by `movement_speed * delta_time` along the given direction.
    ///
    /// Position is unbounded.
    pub fn process_keyboard(&mut self, direction: CameraMovement, delta_time: f32) {
        let velocity = self.movement_speed * delta_time;
        let axis = match direction {
            CameraMovement::Forward => self.front,
            CameraMovement::Backward => -self.front,
            CameraMovement::Left => -self.right,
            CameraMovement::Right => self.right,
            CameraMovement::Up => self.world_up,
            CameraMovement::Down => -self.world_up,
        };
        self.position += axis * velocity;
    }

    /// Turn by mouse offsets (pixels). Positive `y_offset` looks up.
    ///
    /// Non-finite offsets are ignored.
    pub fn process_mouse_movement(&mut self, x_offset: f32, y_offset: f32) {
        let yaw = self.yaw + x_offset * self.mouse_sensitivity;
        let pitch = self.pitch + y_offset * self.mouse_sensitivity;
        if !(yaw.is_finite() && pitch.is_finite()) {
            return;
        }
        self.yaw = yaw;
        self.pitch = clamp_pitch(pitch);
        self.update_vectors();
    }

    /// Zoom in for positive `y_offset`, out for negative. Non-finite
    /// offsets are ignored.
    pub fn process_mouse_scroll(&mut self, y_offset: f32) {
        if !y_offset.is_finite() {
            return;
        }
        self.zoom = (self.zoom - y_offset).clamp(MIN_ZOOM, MAX_ZOOM);
    }

    /// Flip the debug display flag. Has no effect on the view.
    pub fn toggle_display(&mut self) {
        self.display = !self.display;
        log::debug!("camera display flag: {}", self.display);
    }

    /// Rebuild the orthonormal basis from yaw and pitch.
    fn update_vectors(&mut self) {
        let (yaw_sin, yaw_cos) = self.yaw.to_radians().sin_cos();
        let (pitch_sin, pitch_cos) = self.pitch.to_radians().sin_cos();
        self.front = Vec3::new(yaw_cos * pitch_cos, pitch_sin, yaw_sin * pitch_cos).normalize();
        self.right = self.front.cross(self.world_up).normalize();
        self.up = self.right.cross(self.front).normalize();
    }
}

fn clamp_pitch(pitch: f32) -> f32 {
    pitch.clamp(-PITCH_MAX, PITCH_MAX)
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vec3::ZERO)
    }
}
