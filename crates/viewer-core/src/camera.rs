use crate::constants::{CAMERA_EYE, CAMERA_FOVY_DEGREES, CAMERA_TARGET, CAMERA_ZFAR, CAMERA_ZNEAR};
use crate::raycast::Ray;
use glam::{Mat4, Vec2, Vec3};

/// What the inspection engine needs from a camera.
pub trait ViewCamera {
    fn world_position(&self) -> Vec3;
    /// Unit vector the camera looks along.
    fn world_direction(&self) -> Vec3;
    /// Ray from the camera through a normalised-device-coordinate point.
    fn ray_from_ndc(&self, ndc: Vec2) -> Ray;
}

/// Simple right-handed camera description with perspective projection.
#[derive(Clone, Debug)]
pub struct PerspectiveCamera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Default for PerspectiveCamera {
    fn default() -> Self {
        Self {
            eye: CAMERA_EYE,
            target: CAMERA_TARGET,
            up: Vec3::Y,
            aspect: 16.0 / 9.0,
            fovy_radians: CAMERA_FOVY_DEGREES.to_radians(),
            znear: CAMERA_ZNEAR,
            zfar: CAMERA_ZFAR,
        }
    }
}

impl PerspectiveCamera {
    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }
    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    pub fn look_at(&mut self, target: Vec3) {
        self.target = target;
    }

    /// Track the drawing surface; degenerate sizes are ignored.
    pub fn set_aspect(&mut self, width: f32, height: f32) {
        if width > 0.0 && height > 0.0 {
            self.aspect = width / height;
        }
    }
}

impl ViewCamera for PerspectiveCamera {
    fn world_position(&self) -> Vec3 {
        self.eye
    }

    fn world_direction(&self) -> Vec3 {
        (self.target - self.eye).normalize_or_zero()
    }

    fn ray_from_ndc(&self, ndc: Vec2) -> Ray {
        let inv = self.view_projection().inverse();
        let p_far = inv.project_point3(Vec3::new(ndc.x, ndc.y, 1.0));
        Ray::new(self.eye, p_far - self.eye)
    }
}
