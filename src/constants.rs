// Web frontend wiring and rendering constants.
//
// DOM ids and render tuning live here so the wasm-only modules stay free of
// magic strings and numbers.

// DOM hooks
pub const CANVAS_CONTAINER_ID: &str = "canvas-container";
pub const INSPECT_OVERLAY_ID: &str = "inspect-overlay";
pub const OVERLAY_ACTIVE_CLASS: &str = "active";

// Canvas backing store never exceeds this many device pixels per CSS pixel
pub const MAX_PIXEL_RATIO: f64 = 2.0;

// Clear colour behind the scene (matches the fog so the room fades out)
pub const CLEAR_RGB: [f64; 3] = [0.039, 0.039, 0.039];

// GPU instance buffer starts with room for this many meshes and doubles
pub const INITIAL_INSTANCE_CAPACITY: usize = 64;

// Tessellation of the shared sphere mesh
pub const SPHERE_SEGMENTS: u32 = 16;
pub const SPHERE_RINGS: u32 = 12;

// Light slots available in the scene shader
pub const MAX_POINT_LIGHTS: usize = 4;
pub const MAX_DIRECTIONAL_LIGHTS: usize = 2;

// Seed for the ambient particle layout when no clock is available
pub const FALLBACK_PARTICLE_SEED: u64 = 0x0d47_e5ba_ce00_0001;
