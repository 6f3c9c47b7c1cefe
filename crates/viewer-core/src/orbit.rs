//! Bounded orbit rig around a fixed target point.
//!
//! The camera lives on a sphere around `OrbitConfig::target`. Pointer drags
//! accumulate azimuth/polar deltas, the wheel scales the radius, and
//! [`OrbitControls::update`] integrates both (with optional damping) before
//! clamping every coordinate to the configured window.

use crate::camera::PerspectiveCamera;
use crate::constants::*;
use crate::error::{ensure_ordered, ConfigError};
use glam::{Vec2, Vec3};
use std::f32::consts::{PI, TAU};

/// Anything the inspection engine can switch off while it owns the view.
pub trait CameraControls {
    fn enabled(&self) -> bool;
    fn set_enabled(&mut self, enabled: bool);
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrbitConfig {
    pub min_distance: f32,
    pub max_distance: f32,
    pub min_azimuth: f32,
    pub max_azimuth: f32,
    pub min_polar: f32,
    pub max_polar: f32,
    pub target: Vec3,
    pub enable_damping: bool,
    pub damping_factor: f32,
    pub rotate_speed: f32,
    pub zoom_speed: f32,
}

impl Default for OrbitConfig {
    fn default() -> Self {
        Self {
            min_distance: ORBIT_MIN_DISTANCE,
            max_distance: ORBIT_MAX_DISTANCE,
            min_azimuth: ORBIT_MIN_AZIMUTH,
            max_azimuth: ORBIT_MAX_AZIMUTH,
            min_polar: ORBIT_MIN_POLAR,
            max_polar: ORBIT_MAX_POLAR,
            target: CAMERA_TARGET,
            enable_damping: true,
            damping_factor: ORBIT_DAMPING_FACTOR,
            rotate_speed: ORBIT_ROTATE_SPEED,
            zoom_speed: ORBIT_ZOOM_SPEED,
        }
    }
}

impl OrbitConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure_ordered("distance", self.min_distance, self.max_distance)?;
        ensure_ordered("azimuth", self.min_azimuth, self.max_azimuth)?;
        ensure_ordered("polar", self.min_polar, self.max_polar)?;
        if self.min_distance < 0.0 {
            return Err(ConfigError::OutOfRange {
                name: "min_distance",
                value: self.min_distance,
            });
        }
        if self.min_azimuth < -PI || self.max_azimuth > PI {
            let value = if self.min_azimuth < -PI {
                self.min_azimuth
            } else {
                self.max_azimuth
            };
            return Err(ConfigError::OutOfRange {
                name: "azimuth",
                value,
            });
        }
        if self.min_polar < 0.0 || self.max_polar > PI {
            let value = if self.min_polar < 0.0 {
                self.min_polar
            } else {
                self.max_polar
            };
            return Err(ConfigError::OutOfRange {
                name: "polar",
                value,
            });
        }
        if !(self.damping_factor > 0.0 && self.damping_factor <= 1.0) {
            return Err(ConfigError::OutOfRange {
                name: "damping_factor",
                value: self.damping_factor,
            });
        }
        Ok(())
    }
}

/// Radius, polar angle from +Y, and azimuth around +Y measured from +Z.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Spherical {
    pub radius: f32,
    pub polar: f32,
    pub azimuth: f32,
}

impl Spherical {
    pub fn from_offset(offset: Vec3) -> Self {
        let radius = offset.length();
        if radius == 0.0 {
            return Self {
                radius,
                polar: 0.0,
                azimuth: 0.0,
            };
        }
        Self {
            radius,
            polar: (offset.y / radius).clamp(-1.0, 1.0).acos(),
            azimuth: offset.x.atan2(offset.z),
        }
    }

    pub fn to_offset(self) -> Vec3 {
        let ring = self.polar.sin() * self.radius;
        Vec3::new(
            ring * self.azimuth.sin(),
            self.polar.cos() * self.radius,
            ring * self.azimuth.cos(),
        )
    }
}

#[derive(Clone, Debug)]
pub struct OrbitControls {
    config: OrbitConfig,
    enabled: bool,
    // x = azimuth, y = polar
    pending: Vec2,
    scale: f32,
    drag_from: Option<Vec2>,
}

impl OrbitControls {
    pub fn new(config: OrbitConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            enabled: true,
            pending: Vec2::ZERO,
            scale: 1.0,
            drag_from: None,
        })
    }

    pub fn config(&self) -> &OrbitConfig {
        &self.config
    }

    pub fn is_rotating(&self) -> bool {
        self.drag_from.is_some()
    }

    pub fn begin_rotate(&mut self, pos: Vec2) {
        if !self.enabled {
            return;
        }
        self.drag_from = Some(pos);
    }

    /// Convert pointer travel into pending orbit angles. A full viewport
    /// height of travel is one full turn.
    pub fn rotate_to(&mut self, pos: Vec2, viewport_height: f32) {
        if !self.enabled || viewport_height <= 0.0 {
            return;
        }
        let Some(from) = self.drag_from else {
            return;
        };
        let delta = (pos - from) * self.config.rotate_speed;
        self.pending.x -= TAU * delta.x / viewport_height;
        self.pending.y -= TAU * delta.y / viewport_height;
        self.drag_from = Some(pos);
    }

    pub fn end_rotate(&mut self) {
        self.drag_from = None;
    }

    /// Wheel input: negative deltas move the camera in, positive out.
    pub fn dolly(&mut self, wheel_delta_y: f32) {
        if !self.enabled || wheel_delta_y == 0.0 {
            return;
        }
        let step = ORBIT_ZOOM_BASE.powf(self.config.zoom_speed);
        if wheel_delta_y < 0.0 {
            self.scale *= step;
        } else {
            self.scale /= step;
        }
    }

    /// Move `camera` by the pending input, clamp it into the orbit window and
    /// aim it at the target. Returns true when the eye moved.
    pub fn update(&mut self, camera: &mut PerspectiveCamera) -> bool {
        let cfg = self.config;
        let mut s = Spherical::from_offset(camera.eye - cfg.target);

        if cfg.enable_damping {
            s.azimuth += self.pending.x * cfg.damping_factor;
            s.polar += self.pending.y * cfg.damping_factor;
        } else {
            s.azimuth += self.pending.x;
            s.polar += self.pending.y;
        }

        // a long drag pins to the edge it moved toward
        s.azimuth = s.azimuth.clamp(cfg.min_azimuth, cfg.max_azimuth);
        s.polar = s
            .polar
            .clamp(cfg.min_polar, cfg.max_polar)
            .clamp(ORBIT_POLE_EPSILON, PI - ORBIT_POLE_EPSILON);
        s.radius = (s.radius * self.scale).clamp(cfg.min_distance, cfg.max_distance);

        let eye = cfg.target + s.to_offset();
        let moved = eye.distance_squared(camera.eye) > f32::EPSILON;
        camera.eye = eye;
        camera.look_at(cfg.target);

        if cfg.enable_damping {
            self.pending *= 1.0 - cfg.damping_factor;
        } else {
            self.pending = Vec2::ZERO;
        }
        self.scale = 1.0;
        moved
    }
}

impl CameraControls for OrbitControls {
    fn enabled(&self) -> bool {
        self.enabled
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.drag_from = None;
        }
    }
}
