use bevy::asset::AssetMetaCheck;
use bevy::prelude::*;
use bevy::window::PresentMode;
use bevy_common_assets::json::JsonAssetPlugin;

use crate::engine::camera::CameraRigPlugin;
use crate::engine::core::app_state::{AppState, transition_to_rig_ready, transition_to_running};
use crate::engine::effects::EffectsPlugin;
use crate::engine::quality::QualityPlugin;
use crate::engine::rig::{PartManifest, RigPlugin};
use crate::engine::scene::ScenePlugin;
use crate::engine::shell::ShellPlugin;
use crate::engine::wash::WashPlugin;
use crate::rpc::web_rpc::WebRpcPlugin;

/// Assemble the full engine application.
pub fn create_app() -> App {
    let mut app = App::new();

    app.add_plugins(create_default_plugins())
        .add_plugins(JsonAssetPlugin::<PartManifest>::new(&["json"]))
        .init_state::<AppState>()
        .add_plugins((
            QualityPlugin,
            ScenePlugin,
            RigPlugin,
            CameraRigPlugin,
            WashPlugin,
            EffectsPlugin,
            ShellPlugin,
            WebRpcPlugin,
        ))
        .add_systems(Update, (transition_to_rig_ready, transition_to_running));

    app
}

fn create_default_plugins() -> impl PluginGroup {
    let window_config = WindowPlugin {
        primary_window: Some(create_window_config()),
        ..default()
    };

    let asset_config = AssetPlugin {
        meta_check: AssetMetaCheck::Never,
        ..default()
    };

    DefaultPlugins.set(window_config).set(asset_config)
}

fn create_window_config() -> Window {
    #[cfg(target_arch = "wasm32")]
    {
        Window {
            canvas: Some("#vehicle-viz".into()),
            fit_canvas_to_parent: true,
            prevent_default_event_handling: false,
            present_mode: PresentMode::AutoVsync,
            ..default()
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        Window {
            title: "Vehicle Showcase".into(),
            present_mode: PresentMode::AutoVsync,
            ..default()
        }
    }
}
