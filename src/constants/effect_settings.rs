use bevy::math::Vec3;

// Wash sequence hold durations in seconds. Tunables, not contracts: the
// dirty hold gives the camera time to settle before foam starts.
pub const DIRTY_HOLD_SECS: f32 = 1.2;
pub const FOAMING_HOLD_SECS: f32 = 2.5;
pub const RINSE_HOLD_SECS: f32 = 1.8;

// Model-space convention for the showcased vehicle: nose toward +Z,
// driver side toward +X, ground plane at y = 0.
pub const VEHICLE_FORWARD: Vec3 = Vec3::Z;

// Foam spray.
pub const FOAM_EMITTER_ORIGIN: Vec3 = Vec3::new(3.2, 1.4, 0.4);
pub const FOAM_SPAWNS_PER_FRAME: usize = 6;
pub const FOAM_SPEED: f32 = 5.5;
pub const FOAM_SPEED_JITTER: f32 = 1.3;
pub const FOAM_AIM_JITTER: f32 = 0.35;
pub const FOAM_DAMPING_PER_SECOND: f32 = 0.55;
pub const FOAM_BUOYANCY: f32 = 0.9;
pub const FOAM_LIFE_SECS: f32 = 1.6;
pub const FOAM_MAX_TRAVEL: f32 = 9.0;
pub const FOAM_PARTICLE_SIZE: f32 = 0.085;
pub const FOAM_BROAD_PHASE_MARGIN: f32 = 0.25;

// Water rinse.
pub const RINSE_EMITTER_ORIGIN: Vec3 = Vec3::new(3.0, 2.2, 0.2);
pub const RINSE_SPAWNS_PER_FRAME: usize = 8;
pub const RINSE_SPEED: f32 = 7.0;
pub const RINSE_SPEED_JITTER: f32 = 1.8;
pub const RINSE_AIM_JITTER: f32 = 0.5;
pub const RINSE_GRAVITY: f32 = 9.8;
pub const RINSE_DAMPING_PER_SECOND: f32 = 0.2;
pub const RINSE_LIFE_SECS: f32 = 1.1;
pub const RINSE_MAX_TRAVEL: f32 = 11.0;
pub const RINSE_PARTICLE_SIZE: f32 = 0.055;

// Foam splat accumulation.
pub const SPLAT_SIZE_MIN: f32 = 0.12;
pub const SPLAT_SIZE_MAX: f32 = 0.26;
pub const SPLAT_SURFACE_OFFSET: f32 = 0.012;
pub const SPLAT_FADE_IN_PER_SECOND: f32 = 2.8;
pub const SPLAT_FADE_OUT_PER_SECOND: f32 = 0.45;
pub const SPLAT_RINSE_GRACE_SECS: f32 = 0.6;

// Dirt overlay.
pub const DIRT_DECAL_COUNT: usize = 90;
pub const DIRT_SIZE_MIN: f32 = 0.18;
pub const DIRT_SIZE_MAX: f32 = 0.5;
pub const DIRT_FADE_IN_PER_SECOND: f32 = 1.6;
pub const DIRT_FADE_OUT_PER_SECOND: f32 = 0.7;
pub const DIRT_MAX_ALPHA: f32 = 0.55;
pub const DIRT_SCATTER_SEED: u64 = 0x5eed_d127;

// Sparkle fields.
pub const SPARKLE_SCATTER_SEED: u64 = 0x5eed_0b5c;
pub const ENGINE_SPARKLE_VOLUME_CENTER: Vec3 = Vec3::new(0.0, 0.95, 1.55);
pub const ENGINE_SPARKLE_VOLUME_HALF: Vec3 = Vec3::new(0.6, 0.25, 0.45);
pub const HEADLIGHT_SPARKLE_VOLUME_CENTER: Vec3 = Vec3::new(0.62, 0.78, 2.18);
pub const HEADLIGHT_SPARKLE_VOLUME_HALF: Vec3 = Vec3::new(0.28, 0.12, 0.08);
pub const SPARKLE_POINT_SIZE: f32 = 0.035;
pub const SPARKLE_TWINKLE_SPEED: f32 = 5.2;
pub const SPARKLE_NOISE_GATE: f32 = 0.35;
pub const SPARKLE_POWER_CURVE: f32 = 4.0;
pub const HEADLIGHT_VIEWER_OFFSET: f32 = 0.06;
pub const FOG_MAX_ALPHA: f32 = 0.65;
pub const FOG_FADE_PER_SECOND: f32 = 1.4;

// Pet hair.
pub const HAIR_SCATTER_SEED: u64 = 0x5eed_4a12;
pub const HAIR_FLOOR_CENTER: Vec3 = Vec3::new(0.35, 0.42, -0.25);
pub const HAIR_FLOOR_HALF: Vec3 = Vec3::new(0.55, 0.0, 0.8);
pub const HAIR_STRAND_LENGTH: f32 = 0.055;
pub const HAIR_STRAND_WIDTH: f32 = 0.004;
pub const HAIR_FADE_IN_PER_SECOND: f32 = 1.2;
pub const HAIR_FADE_OUT_PER_SECOND: f32 = 0.8;

// Pivot rig.
pub const HOOD_OPEN_RADIANS: f32 = -0.8;
pub const DOOR_OPEN_RADIANS: f32 = 1.05;
pub const PIVOT_DAMPING_RATE: f32 = 4.0;

// Idle float of the whole vehicle while showcased.
pub const IDLE_BOB_AMPLITUDE: f32 = 0.015;
pub const IDLE_BOB_FREQUENCY: f32 = 0.9;

// Camera.
pub const CAMERA_FOLLOW_RATE: f32 = 3.5;
pub const ORBIT_RADIANS_PER_SECOND: f32 = 0.12;
