use glam::{Mat4, Vec3};
use serde::Deserialize;

use crate::math::AABB;
use crate::types::CameraUniform;

pub const ROTATE_SPEED: f32 = 0.005;
pub const PAN_SPEED: f32 = 0.001;
/// Distance scale per scroll line
pub const ZOOM_STEP: f32 = 0.95;
/// Keeps the view direction away from the up vector
const PITCH_LIMIT: f32 = std::f32::consts::FRAC_PI_2 - 0.01;

/// Perspective and starting placement, all overridable from the config file
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    pub position: [f32; 3],
    pub target: [f32; 3],
    pub min_distance: f32,
    pub max_distance: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            fov_degrees: 75.0,
            near: 0.1,
            far: 1000.0,
            position: [70.0, 70.0, 70.0],
            target: [0.0, 0.0, 0.0],
            min_distance: 1.0,
            max_distance: 900.0,
        }
    }
}

/// Camera orbiting a target point, driven by drag, scroll and pan input
#[derive(Debug, Clone)]
pub struct OrbitCamera {
    pub target: Vec3,
    pub distance: f32,
    /// Rotation around +Y, radians; 0 looks down -Z
    pub yaw: f32,
    /// Elevation above the XZ plane, radians
    pub pitch: f32,
    pub fov_y: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    min_distance: f32,
    max_distance: f32,
}

impl OrbitCamera {
    pub fn new(settings: &CameraSettings, aspect: f32) -> Self {
        let target = Vec3::from_array(settings.target);
        let offset = Vec3::from_array(settings.position) - target;
        let distance = offset.length().max(f32::EPSILON);

        let mut camera = Self {
            target,
            distance,
            yaw: offset.x.atan2(offset.z),
            pitch: (offset.y / distance).clamp(-1.0, 1.0).asin(),
            fov_y: settings.fov_degrees.to_radians(),
            aspect,
            near: settings.near,
            far: settings.far,
            min_distance: settings.min_distance.min(settings.max_distance),
            max_distance: settings.max_distance.max(settings.min_distance),
        };
        camera.pitch = camera.pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT);
        camera
    }

    pub fn position(&self) -> Vec3 {
        let horizontal = self.distance * self.pitch.cos();
        self.target
            + Vec3::new(
                horizontal * self.yaw.sin(),
                self.distance * self.pitch.sin(),
                horizontal * self.yaw.cos(),
            )
    }

    pub fn forward(&self) -> Vec3 {
        (self.target - self.position()).normalize()
    }

    pub fn right(&self) -> Vec3 {
        self.forward().cross(Vec3::Y).normalize()
    }

    pub fn up(&self) -> Vec3 {
        self.right().cross(self.forward())
    }

    /// Update aspect ratio after a resize; zero-sized windows are ignored
    pub fn set_aspect(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.aspect = width as f32 / height as f32;
    }

    /// Drag rotation, in pixels of pointer movement
    pub fn rotate(&mut self, dx: f32, dy: f32) {
        self.yaw -= dx * ROTATE_SPEED;
        self.pitch = (self.pitch + dy * ROTATE_SPEED).clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    /// Scroll zoom; positive lines move closer
    pub fn zoom(&mut self, lines: f32) {
        self.distance =
            (self.distance * ZOOM_STEP.powf(lines)).clamp(self.min_distance, self.max_distance);
    }

    /// Move the target in the view plane, scaled by distance
    pub fn pan(&mut self, dx: f32, dy: f32) {
        let scale = self.distance * PAN_SPEED;
        self.target += (-self.right() * dx + self.up() * dy) * scale;
    }

    /// Re-target on a model's bounds, keeping the current view direction
    pub fn frame_bounds(&mut self, bounds: &AABB) {
        self.target = bounds.center();
        let fit = bounds.radius() / (self.fov_y * 0.5).sin();
        self.distance = fit.clamp(self.min_distance, self.max_distance);
    }

    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.position(), self.target, Vec3::Y)
    }

    pub fn projection(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, self.aspect, self.near, self.far)
    }

    pub fn to_uniform(&self) -> CameraUniform {
        CameraUniform {
            view_proj: (self.projection() * self.view()).to_cols_array_2d(),
            eye: self.position().to_array(),
            _pad: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_vec_near(a: Vec3, b: Vec3) {
        assert!((a - b).length() < 1e-2, "{:?} != {:?}", a, b);
    }

    #[test]
    fn test_initial_position_round_trips() {
        let camera = OrbitCamera::new(&CameraSettings::default(), 1.5);
        assert_vec_near(camera.position(), Vec3::new(70.0, 70.0, 70.0));
        assert_vec_near(camera.forward(), -Vec3::ONE.normalize());
    }

    #[test]
    fn test_default_perspective() {
        let camera = OrbitCamera::new(&CameraSettings::default(), 1.0);
        assert!((camera.fov_y - 75f32.to_radians()).abs() < 1e-6);
        assert_eq!(camera.near, 0.1);
        assert_eq!(camera.far, 1000.0);
    }

    #[test]
    fn test_up_is_orthogonal() {
        let camera = OrbitCamera::new(&CameraSettings::default(), 1.0);
        assert!(camera.up().dot(camera.forward()).abs() < 1e-5);
        assert!(camera.up().y > 0.0);
    }
}
