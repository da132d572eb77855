use crate::engine::quality::QualitySettings;

pub const LOW_TIER_SETTINGS: QualitySettings = QualitySettings {
    foam_pool_size: 220,
    rinse_pool_size: 260,
    splat_capacity: 48,
    sparkle_points_per_field: 60,
    hair_strand_count: 350,
    shadow_map_size: 1024,
    msaa_enabled: false,
    environment_map_size: 256,
    contact_shadow_size: 128,
};

pub const HIGH_TIER_SETTINGS: QualitySettings = QualitySettings {
    foam_pool_size: 550,
    rinse_pool_size: 650,
    splat_capacity: 96,
    sparkle_points_per_field: 160,
    hair_strand_count: 900,
    shadow_map_size: 4096,
    msaa_enabled: true,
    environment_map_size: 1024,
    contact_shadow_size: 512,
};

/// Strong-signal thresholds used when deciding whether a mobile device may
/// still land on the high tier.
pub const STRONG_CORE_COUNT: u32 = 8;
pub const STRONG_MEMORY_GB: f32 = 8.0;
pub const STRONG_PIXEL_RATIO: f32 = 3.0;

/// Desktop thresholds for the high tier.
pub const DESKTOP_HIGH_CORE_COUNT: u32 = 8;
pub const DESKTOP_HIGH_MEMORY_GB: f32 = 8.0;

pub const BASE_FOV_RADIANS: f32 = 0.82;
