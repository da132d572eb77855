use bevy::prelude::*;
use serde::{Deserialize, Serialize};

pub mod view_rig;

pub use view_rig::{ViewRig, orbit_active, update_view_camera};

use crate::engine::EngineSet;
use crate::engine::quality::sample_device_signals;

/// Symbolic camera views the embedding UI can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewId {
    Home,
    Interior,
    InteriorDetail,
    Engine,
    Exterior,
    Paint,
    PaintDetail,
    FrontWheel,
    InteriorFloor,
    Default,
}

impl ViewId {
    /// Convert a string identifier to a view for RPC compatibility. Unknown
    /// identifiers fall back to the default pose rather than erroring.
    pub fn from_string(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "home" => Self::Home,
            "interior" => Self::Interior,
            "interior_detail" => Self::InteriorDetail,
            "engine" => Self::Engine,
            "exterior" => Self::Exterior,
            "paint" => Self::Paint,
            "paint_detail" => Self::PaintDetail,
            "front_wheel" | "front" | "wheel" => Self::FrontWheel,
            "interior_floor" => Self::InteriorFloor,
            _ => Self::Default,
        }
    }

    /// String identifier for frontend notifications.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Interior => "interior",
            Self::InteriorDetail => "interior_detail",
            Self::Engine => "engine",
            Self::Exterior => "exterior",
            Self::Paint => "paint",
            Self::PaintDetail => "paint_detail",
            Self::FrontWheel => "front_wheel",
            Self::InteriorFloor => "interior_floor",
            Self::Default => "default",
        }
    }
}

/// Immutable camera pose for one named view.
#[derive(Debug, Clone, Copy)]
pub struct CameraPose {
    pub position: Vec3,
    pub look_at: Vec3,
    pub zoom: f32,
}

pub struct CameraRigPlugin;

impl Plugin for CameraRigPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ViewRig>()
            .add_systems(
                Startup,
                view_rig::spawn_view_camera.after(sample_device_signals),
            )
            .add_systems(Update, update_view_camera.in_set(EngineSet::Present));
    }
}
