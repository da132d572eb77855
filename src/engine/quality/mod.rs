use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::constants::render_settings::{
    DESKTOP_HIGH_CORE_COUNT, DESKTOP_HIGH_MEMORY_GB, HIGH_TIER_SETTINGS, LOW_TIER_SETTINGS,
    STRONG_CORE_COUNT, STRONG_MEMORY_GB, STRONG_PIXEL_RATIO,
};

/// Raw device capability signals, sampled exactly once at startup and never
/// recomputed mid-session.
#[derive(Resource, Debug, Clone, Copy)]
pub struct DeviceSignals {
    pub pixel_ratio: f32,
    pub logical_cores: u32,
    pub device_memory_gb: f32,
    pub is_mobile: bool,
}

impl Default for DeviceSignals {
    fn default() -> Self {
        Self {
            pixel_ratio: 1.0,
            logical_cores: 4,
            device_memory_gb: 4.0,
            is_mobile: false,
        }
    }
}

/// Coarse capability classification gating simulation density and render
/// quality for the whole session.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PerformanceTier {
    Low,
    High,
}

impl PerformanceTier {
    /// Derive the tier from device signals. Mobile devices default to the low
    /// tier unless several high-capability signals are present at once.
    pub fn from_signals(signals: &DeviceSignals) -> Self {
        if signals.is_mobile {
            let strong_signals = [
                signals.logical_cores >= STRONG_CORE_COUNT,
                signals.device_memory_gb >= STRONG_MEMORY_GB,
                signals.pixel_ratio >= STRONG_PIXEL_RATIO,
            ]
            .iter()
            .filter(|s| **s)
            .count();

            if strong_signals >= 2 {
                return Self::High;
            }
            return Self::Low;
        }

        if signals.logical_cores >= DESKTOP_HIGH_CORE_COUNT
            && signals.device_memory_gb >= DESKTOP_HIGH_MEMORY_GB
        {
            Self::High
        } else {
            Self::Low
        }
    }
}

/// Concrete quality knobs derived from the tier. Passed by explicit parameter
/// into every simulation constructor rather than read through a global.
#[derive(Resource, Debug, Clone, Copy)]
pub struct QualitySettings {
    pub foam_pool_size: usize,
    pub rinse_pool_size: usize,
    pub splat_capacity: usize,
    pub sparkle_points_per_field: usize,
    pub hair_strand_count: usize,
    pub shadow_map_size: usize,
    pub msaa_enabled: bool,
    pub environment_map_size: u32,
    pub contact_shadow_size: u32,
}

impl QualitySettings {
    pub fn for_tier(tier: PerformanceTier) -> Self {
        match tier {
            PerformanceTier::Low => LOW_TIER_SETTINGS,
            PerformanceTier::High => HIGH_TIER_SETTINGS,
        }
    }
}

pub struct QualityPlugin;

impl Plugin for QualityPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, sample_device_signals);
    }
}

/// Sample device signals once and derive the session-wide tier and settings.
pub fn sample_device_signals(mut commands: Commands, windows: Query<&Window, With<PrimaryWindow>>) {
    let mut signals = detect_platform_signals();

    // Prefer the live window scale factor over the platform guess when a
    // window already exists.
    if let Ok(window) = windows.single() {
        signals.pixel_ratio = window.scale_factor();
    }

    let tier = PerformanceTier::from_signals(&signals);
    let settings = QualitySettings::for_tier(tier);

    println!(
        "Performance tier: {:?} (pixel_ratio {:.1}, cores {}, memory {:.0} GB, mobile {})",
        tier,
        signals.pixel_ratio,
        signals.logical_cores,
        signals.device_memory_gb,
        signals.is_mobile
    );

    commands.insert_resource(signals);
    commands.insert_resource(tier);
    commands.insert_resource(settings);
}

#[cfg(target_arch = "wasm32")]
fn detect_platform_signals() -> DeviceSignals {
    let mut signals = DeviceSignals::default();

    if let Some(window) = web_sys::window() {
        signals.pixel_ratio = window.device_pixel_ratio() as f32;

        let navigator = window.navigator();
        let cores = navigator.hardware_concurrency();
        if cores.is_finite() && cores > 0.0 {
            signals.logical_cores = cores as u32;
        }

        // deviceMemory is not exposed by every browser; fall back to the
        // conservative default when absent.
        if let Ok(memory) = js_sys::Reflect::get(&navigator, &"deviceMemory".into()) {
            if let Some(gb) = memory.as_f64() {
                signals.device_memory_gb = gb as f32;
            }
        }

        if let Ok(user_agent) = navigator.user_agent() {
            signals.is_mobile = user_agent.contains("Mobi") || user_agent.contains("Android");
        }
    }

    signals
}

#[cfg(not(target_arch = "wasm32"))]
fn detect_platform_signals() -> DeviceSignals {
    let mut signals = DeviceSignals::default();

    if let Ok(cores) = std::thread::available_parallelism() {
        signals.logical_cores = cores.get() as u32;
    }

    // Native desktops have no portable memory probe here; assume a desktop
    // class machine and let the core count decide the tier.
    signals.device_memory_gb = 8.0;
    signals
}
