//! Light rig for the candle-lit desk.

use crate::constants::*;
use glam::Vec3;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointLight {
    pub position: Vec3,
    pub color: [f32; 3],
    pub intensity: f32,
    pub range: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DirectionalLight {
    /// Where the light shines from; it travels toward the origin.
    pub position: Vec3,
    pub color: [f32; 3],
    pub intensity: f32,
}

impl DirectionalLight {
    pub fn direction(&self) -> Vec3 {
        (-self.position).normalize_or_zero()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct LightRig {
    pub ambient_color: [f32; 3],
    pub ambient_intensity: f32,
    /// Warm point lights whose intensity flickers.
    pub candles: Vec<PointLight>,
    pub directional: Vec<DirectionalLight>,
}

fn rgb(hex: u32) -> [f32; 3] {
    let [r, g, b, _] = rgba_from_hex(hex, 1.0);
    [r, g, b]
}

impl Default for LightRig {
    fn default() -> Self {
        let candle = |x: f32| PointLight {
            position: Vec3::new(x, -1.5, 0.0),
            color: rgb(CANDLE_COLOR),
            intensity: CANDLE_BASE_INTENSITY,
            range: CANDLE_RANGE,
        };
        Self {
            ambient_color: [1.0, 1.0, 1.0],
            ambient_intensity: AMBIENT_INTENSITY,
            candles: vec![candle(-0.8), candle(0.8)],
            directional: vec![
                // soft top light
                DirectionalLight {
                    position: Vec3::new(0.0, 10.0, 5.0),
                    color: [1.0, 1.0, 1.0],
                    intensity: TOP_LIGHT_INTENSITY,
                },
                // rim light for atmosphere
                DirectionalLight {
                    position: Vec3::new(-5.0, 3.0, -5.0),
                    color: rgb(RIM_LIGHT_COLOR),
                    intensity: RIM_LIGHT_INTENSITY,
                },
            ],
        }
    }
}

impl LightRig {
    /// Candle `i` follows `base + sin(rate * time + i) * amplitude`, so
    /// neighbouring candles drift out of phase.
    pub fn flicker(&mut self, time: f32) {
        for (i, candle) in self.candles.iter_mut().enumerate() {
            candle.intensity = candle_intensity(time, i);
        }
    }
}

#[inline]
pub fn candle_intensity(time: f32, index: usize) -> f32 {
    CANDLE_BASE_INTENSITY
        + (time * CANDLE_FLICKER_RATE + index as f32).sin() * CANDLE_FLICKER_AMPLITUDE
}
