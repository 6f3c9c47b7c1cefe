use glam::Vec3;
use std::f32::consts::FRAC_PI_4;

// Shared tuning constants for the date-space viewer.

// Item inspection
pub const DRAG_THRESHOLD_PX: f32 = 5.0; // pointer travel that turns a click into a drag
pub const INSPECT_ROTATE_SENSITIVITY: f32 = 0.01; // radians per pixel of drag
pub const INSPECT_PITCH_LIMIT: f32 = 0.5; // |pitch| clamp while inspecting (radians)
pub const INSPECT_DISTANCE: f32 = 1.2; // how far in front of the camera an item is presented
pub const INSPECT_SCALE: f32 = 1.5; // uniform scale while inspected
pub const REST_SCALE: f32 = 1.0; // uniform scale the return animation aims for
pub const ANIMATE_LERP: f32 = 0.1; // fraction of the remaining gap closed per frame
pub const INSPECT_LERP: f32 = 0.15; // rotation follow rate while steadily inspecting
pub const SETTLE_EPSILON: f32 = 0.01; // position distance that ends an animation

// Camera
pub const CAMERA_FOVY_DEGREES: f32 = 70.0;
pub const CAMERA_ZNEAR: f32 = 0.1;
pub const CAMERA_ZFAR: f32 = 1000.0;
pub const CAMERA_EYE: Vec3 = Vec3::new(0.0, -1.5, 4.0); // seated at the lowered table
pub const CAMERA_TARGET: Vec3 = Vec3::new(0.0, -1.5, 0.0);

// Orbit rig
pub const ORBIT_MIN_DISTANCE: f32 = 2.0;
pub const ORBIT_MAX_DISTANCE: f32 = 3.6;
pub const ORBIT_MIN_AZIMUTH: f32 = -FRAC_PI_4;
pub const ORBIT_MAX_AZIMUTH: f32 = FRAC_PI_4;
pub const ORBIT_MIN_POLAR: f32 = 1.3; // don't look from the side
pub const ORBIT_MAX_POLAR: f32 = 1.5; // don't look past the horizon
pub const ORBIT_DAMPING_FACTOR: f32 = 0.05;
pub const ORBIT_ROTATE_SPEED: f32 = 1.0;
pub const ORBIT_ZOOM_SPEED: f32 = 1.0;
pub const ORBIT_ZOOM_BASE: f32 = 0.95; // per wheel notch before zoom speed is applied
pub const ORBIT_POLE_EPSILON: f32 = 1e-6;

// Lighting
pub const AMBIENT_INTENSITY: f32 = 0.4;
pub const CANDLE_COLOR: u32 = 0xffaa66;
pub const CANDLE_BASE_INTENSITY: f32 = 2.0;
pub const CANDLE_FLICKER_AMPLITUDE: f32 = 0.3;
pub const CANDLE_FLICKER_RATE: f32 = 5.0;
pub const CANDLE_RANGE: f32 = 8.0;
pub const FLICKER_TIME_STEP: f32 = 0.01; // animation clock advance per frame
pub const TOP_LIGHT_INTENSITY: f32 = 0.5;
pub const RIM_LIGHT_COLOR: u32 = 0xff6b9d;
pub const RIM_LIGHT_INTENSITY: f32 = 0.3;

// Atmosphere
pub const FOG_COLOR: u32 = 0x0a0a0a;
pub const FOG_NEAR: f32 = 5.0;
pub const FOG_FAR: f32 = 50.0;

// Ambient heart particles
pub const HEART_COUNT: usize = 20;
pub const HEART_RADIUS: f32 = 0.05;
pub const HEART_COLOR: u32 = 0xff69b4;
pub const HEART_OPACITY: f32 = 0.3;
pub const HEART_SPREAD: f32 = 10.0; // x/z extent of the spawn volume
pub const HEART_CEILING: f32 = 5.0; // particles wrap back to the floor above this height
pub const HEART_MIN_SPEED: f32 = 0.01;
pub const HEART_SPEED_SPAN: f32 = 0.02;

// Desk layout
pub const FURNITURE_SCALE: f32 = 0.3;
pub const TABLE_POSITION: Vec3 = Vec3::new(0.0, -0.75, 0.0); // surface lands at y = 0
pub const FRAME_POSITION: Vec3 = Vec3::new(0.5, 0.0, 0.0);
pub const CARD_POSITION: Vec3 = Vec3::new(-0.5, 0.0, 0.3);
pub const FLOOR_SIZE: f32 = 5.0;
pub const FLOOR_Y: f32 = -0.76; // just below the table legs

/// Convert a packed `0xRRGGBB` colour into linear-ish RGBA components.
#[inline]
pub fn rgba_from_hex(hex: u32, alpha: f32) -> [f32; 4] {
    let r = ((hex >> 16) & 0xff) as f32 / 255.0;
    let g = ((hex >> 8) & 0xff) as f32 / 255.0;
    let b = (hex & 0xff) as f32 / 255.0;
    [r, g, b, alpha]
}
