//! Free-flight camera: yaw/pitch mouse-look, WASD translation, scroll zoom.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec2, Vec3};

/// Default field of view in degrees.
pub const DEFAULT_FOV: f32 = 45.0;
/// Zoom limits in degrees; scroll input clamps against these.
pub const DEFAULT_FOV_MIN: f32 = 20.0;
pub const DEFAULT_FOV_MAX: f32 = 80.0;
/// Pitch limit in degrees. Stopping short of 90° keeps the look-at basis
/// away from the gimbal flip at straight up/down.
const PITCH_LIMIT: f32 = 89.0;

/// Free camera with yaw/pitch orientation and scroll-controlled FOV.
///
/// Yaw and pitch are kept in degrees; yaw is unbounded (the trig wraps it),
/// pitch is clamped to ±89°. The derived `front` vector is rebuilt after
/// every look update.
#[derive(Debug, Clone)]
pub struct Camera {
    /// Camera position in world space.
    pub position: Vec3,
    /// Derived unit look direction.
    front: Vec3,
    /// World up. Constant +Y.
    up: Vec3,
    /// Yaw in degrees. −90° looks down −Z.
    yaw: f32,
    /// Pitch in degrees, clamped to ±89°.
    pitch: f32,
    /// Field of view in degrees, clamped to [fov_min, fov_max].
    pub fov_degrees: f32,
    pub fov_min: f32,
    pub fov_max: f32,
    /// Near clipping plane.
    pub near: f32,
    /// Far clipping plane.
    pub far: f32,
    /// Aspect ratio (width / height), tracked across resizes.
    pub aspect: f32,
    /// Mouse sensitivity, degrees per cursor pixel.
    pub sensitivity: f32,
    /// Movement speed in world units per second.
    pub move_speed: f32,
}

impl Default for Camera {
    fn default() -> Self {
        let mut camera = Self {
            position: Vec3::new(0.0, 1.5, 10.0),
            front: -Vec3::Z,
            up: Vec3::Y,
            yaw: -90.0,
            pitch: 0.0,
            fov_degrees: DEFAULT_FOV,
            fov_min: DEFAULT_FOV_MIN,
            fov_max: DEFAULT_FOV_MAX,
            near: 0.1,
            far: 100.0,
            aspect: 16.0 / 9.0,
            sensitivity: 0.1,
            move_speed: 2.5,
        };
        camera.update_front();
        camera
    }
}

impl Camera {
    /// Create a new camera at the given position.
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Update aspect ratio (call on window resize). Zero-height reports,
    /// as delivered while a window is minimized, are ignored.
    pub fn set_aspect(&mut self, width: u32, height: u32) {
        if height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }

    /// Process a mouse-look delta, already sign-adjusted so positive y means
    /// "cursor moved up". The caller skips this entirely while the cursor is
    /// not captured.
    pub fn process_mouse(&mut self, delta: Vec2) {
        self.yaw += delta.x * self.sensitivity;
        self.pitch = (self.pitch + delta.y * self.sensitivity).clamp(-PITCH_LIMIT, PITCH_LIMIT);
        self.update_front();
    }

    /// Translate along the view axes from held-key state.
    ///
    /// `axes.y` is forward/back, `axes.x` strafe right/left, each in −1..1.
    /// The two contributions add without renormalizing, so diagonal movement
    /// is √2 faster than a single axis — the long-standing behavior of this
    /// camera, kept as is.
    pub fn process_movement(&mut self, axes: Vec2, dt: f32) {
        let speed = self.move_speed * dt;
        let right = self.front.cross(self.up).normalize();
        self.position += self.front * (axes.y * speed);
        self.position += right * (axes.x * speed);
    }

    /// Zoom via scroll wheel: one degree of FOV per scroll line, clamped.
    pub fn process_scroll(&mut self, delta: f32) {
        self.fov_degrees = (self.fov_degrees - delta).clamp(self.fov_min, self.fov_max);
    }

    fn update_front(&mut self) {
        let (yaw, pitch) = (self.yaw.to_radians(), self.pitch.to_radians());
        self.front = Vec3::new(
            yaw.cos() * pitch.cos(),
            pitch.sin(),
            yaw.sin() * pitch.cos(),
        )
        .normalize();
    }

    /// Get the view matrix.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.front, self.up)
    }

    /// Get the projection matrix for the current FOV and aspect.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_degrees.to_radians(), self.aspect, self.near, self.far)
    }

    /// Get the combined view-projection matrix.
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Get the camera's unit look direction.
    pub fn front(&self) -> Vec3 {
        self.front
    }

    /// Get current yaw in degrees.
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    /// Get current pitch in degrees.
    pub fn pitch(&self) -> f32 {
        self.pitch
    }
}

/// Camera + light uniform data for the shaders.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
    /// Camera world position; w unused, padding.
    pub position: [f32; 4],
}

impl CameraUniform {
    pub fn new() -> Self {
        Self {
            view_proj: Mat4::IDENTITY.to_cols_array_2d(),
            position: [0.0; 4],
        }
    }

    pub fn update(&mut self, camera: &Camera) {
        self.view_proj = camera.view_projection_matrix().to_cols_array_2d();
        let pos = camera.position;
        self.position = [pos.x, pos.y, pos.z, 1.0];
    }
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self::new()
    }
}

/// Point-light uniform. The sun sits at the origin and never moves.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct LightUniform {
    /// Light world position; w unused, padding.
    pub position: [f32; 4],
    pub color: [f32; 4],
}

impl Default for LightUniform {
    fn default() -> Self {
        Self {
            position: [0.0, 0.0, 0.0, 1.0],
            color: [1.0, 1.0, 1.0, 1.0],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_looks_down_negative_z() {
        let camera = Camera::default();
        assert!((camera.front() - (-Vec3::Z)).length() < 1e-6);
    }

    #[test]
    fn pitch_clamps_at_limits() {
        let mut camera = Camera::default();
        // Far more vertical delta than the clamp range allows.
        for _ in 0..100 {
            camera.process_mouse(Vec2::new(0.0, 500.0));
        }
        assert_eq!(camera.pitch(), 89.0);
        for _ in 0..100 {
            camera.process_mouse(Vec2::new(0.0, -500.0));
        }
        assert_eq!(camera.pitch(), -89.0);
        // Front stays unit length at the clamp.
        assert!((camera.front().length() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn fov_clamps_at_configured_bounds() {
        let mut camera = Camera::default();
        for _ in 0..200 {
            camera.process_scroll(5.0);
        }
        assert_eq!(camera.fov_degrees, camera.fov_min);
        for _ in 0..200 {
            camera.process_scroll(-5.0);
        }
        assert_eq!(camera.fov_degrees, camera.fov_max);
    }

    #[test]
    fn fov_respects_custom_zoom_range() {
        let mut camera = Camera::default();
        camera.fov_min = 30.0;
        camera.fov_max = 60.0;
        camera.fov_degrees = camera.fov_degrees.clamp(camera.fov_min, camera.fov_max);
        for _ in 0..100 {
            camera.process_scroll(5.0);
        }
        assert_eq!(camera.fov_degrees, 30.0);
        for _ in 0..100 {
            camera.process_scroll(-5.0);
        }
        assert_eq!(camera.fov_degrees, 60.0);
    }

    #[test]
    fn mouse_up_looks_up() {
        let mut camera = Camera::default();
        camera.process_mouse(Vec2::new(0.0, 10.0));
        assert!(camera.pitch() > 0.0);
        assert!(camera.front().y > 0.0);
    }

    #[test]
    fn movement_is_frame_rate_scaled() {
        let mut fast = Camera::default();
        let mut slow = Camera::default();
        // One long frame vs. many short ones covers the same distance.
        fast.process_movement(Vec2::new(0.0, 1.0), 0.1);
        for _ in 0..10 {
            slow.process_movement(Vec2::new(0.0, 1.0), 0.01);
        }
        assert!((fast.position - slow.position).length() < 1e-4);
    }

    #[test]
    fn diagonal_movement_is_not_normalized() {
        let mut axis = Camera::default();
        let mut diagonal = Camera::default();
        let start = axis.position;
        axis.process_movement(Vec2::new(0.0, 1.0), 1.0);
        diagonal.process_movement(Vec2::new(1.0, 1.0), 1.0);
        let axis_dist = (axis.position - start).length();
        let diagonal_dist = (diagonal.position - start).length();
        assert!((diagonal_dist / axis_dist - std::f32::consts::SQRT_2).abs() < 1e-4);
    }

    #[test]
    fn zero_height_resize_is_ignored() {
        let mut camera = Camera::default();
        let aspect = camera.aspect;
        camera.set_aspect(1280, 0);
        assert_eq!(camera.aspect, aspect);
        camera.set_aspect(800, 600);
        assert!((camera.aspect - 800.0 / 600.0).abs() < 1e-6);
    }

    #[test]
    fn view_matrix_follows_position() {
        let camera = Camera::new(Vec3::new(0.0, 0.0, 5.0));
        let view = camera.view_matrix();
        // The origin should land 5 units in front of the camera.
        let origin_in_view = view * glam::Vec4::new(0.0, 0.0, 0.0, 1.0);
        assert!((origin_in_view.truncate() - Vec3::new(0.0, 0.0, -5.0)).length() < 1e-4);
    }
}
