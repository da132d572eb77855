use bevy::prelude::*;

use crate::constants::effect_settings::{DOOR_OPEN_RADIANS, HOOD_OPEN_RADIANS};
use crate::engine::EngineSet;
use crate::engine::camera::{ViewId, ViewRig};
use crate::engine::core::app_state::AppState;
use crate::engine::effects::pet_hair::HairLayer;
use crate::engine::effects::sparkle::SparkleState;
use crate::engine::rig::PivotTargets;
use crate::engine::wash::{WashController, advance_wash_sequence};

/// Service selected in the embedding booking UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceSelection {
    pub id: String,
    pub name: String,
}

#[derive(Resource, Default)]
pub struct ActiveService(pub Option<ServiceSelection>);

/// Add-on selected in the embedding booking UI. The id is optional because
/// older content only carries display names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddOnSelection {
    pub id: Option<String>,
    pub name: String,
}

#[derive(Resource, Default)]
pub struct ActiveAddOn(pub Option<AddOnSelection>);

/// Engine-relevant service categories. Resolved from the stable id first;
/// the name substring match is a fallback for content that predates ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceKind {
    Exterior,
    Interior,
    Paint,
}

impl ServiceKind {
    pub fn from_selection(selection: &ServiceSelection) -> Option<Self> {
        match selection.id.as_str() {
            "exterior" => return Some(Self::Exterior),
            "interior" => return Some(Self::Interior),
            "paint" => return Some(Self::Paint),
            _ => {}
        }

        let name = selection.name.to_lowercase();
        if name.contains("exterior") {
            Some(Self::Exterior)
        } else if name.contains("interior") {
            Some(Self::Interior)
        } else if name.contains("paint") {
            Some(Self::Paint)
        } else {
            None
        }
    }

    pub fn view(self) -> ViewId {
        match self {
            Self::Exterior => ViewId::Exterior,
            Self::Interior => ViewId::Interior,
            Self::Paint => ViewId::Paint,
        }
    }
}

/// Engine-relevant add-ons, resolved the same way as services.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOnKind {
    EngineBay,
    HeadlightRestoration,
    PetHairRemoval,
}

impl AddOnKind {
    pub fn from_selection(selection: &AddOnSelection) -> Option<Self> {
        if let Some(id) = selection.id.as_deref() {
            match id {
                "engine_bay" => return Some(Self::EngineBay),
                "headlight_restoration" => return Some(Self::HeadlightRestoration),
                "pet_hair_removal" => return Some(Self::PetHairRemoval),
                _ => {}
            }
        }

        let name = &selection.name;
        if name.contains("Engine") {
            Some(Self::EngineBay)
        } else if name.contains("Headlight Restoration") {
            Some(Self::HeadlightRestoration)
        } else if name.contains("Pet Hair") {
            Some(Self::PetHairRemoval)
        } else {
            None
        }
    }

    pub fn view(self) -> ViewId {
        match self {
            Self::EngineBay => ViewId::Engine,
            Self::HeadlightRestoration => ViewId::FrontWheel,
            Self::PetHairRemoval => ViewId::InteriorFloor,
        }
    }
}

/// Scene composition shell: owns the boundary between the excluded booking
/// UI and the engine, and fixes the per-frame ordering of every subsystem.
pub struct ShellPlugin;

impl Plugin for ShellPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ActiveService>()
            .init_resource::<ActiveAddOn>()
            .configure_sets(
                Update,
                (
                    EngineSet::Sequence,
                    EngineSet::Spawn,
                    EngineSet::Integrate,
                    EngineSet::Present,
                )
                    .chain()
                    .run_if(in_state(AppState::Running)),
            )
            .add_systems(
                Update,
                (route_service_selection, route_add_on_selection)
                    .before(advance_wash_sequence)
                    .in_set(EngineSet::Sequence),
            );

        #[cfg(not(target_arch = "wasm32"))]
        app.add_systems(Update, debug_selection_input);
    }
}

/// React to service selection changes: the exterior service drives the wash
/// cycle, the interior service swings the door open. Deselecting the
/// exterior service cancels the cycle immediately, whatever state it is in.
pub fn route_service_selection(
    active: Res<ActiveService>,
    mut previous: Local<Option<ServiceKind>>,
    mut wash: ResMut<WashController>,
    mut rig: ResMut<ViewRig>,
    mut targets: ResMut<PivotTargets>,
) {
    if !active.is_changed() {
        return;
    }

    let current = active.0.as_ref().and_then(ServiceKind::from_selection);
    if current == *previous {
        return;
    }

    if *previous == Some(ServiceKind::Exterior) && current != Some(ServiceKind::Exterior) {
        wash.0.cancel();
    }

    let mut door_target = 0.0;
    match current {
        Some(ServiceKind::Exterior) => {
            wash.0.start();
            rig.set_view(ViewId::Exterior);
        }
        Some(ServiceKind::Interior) => {
            door_target = DOOR_OPEN_RADIANS;
            rig.set_view(ViewId::Interior);
        }
        Some(ServiceKind::Paint) => {
            rig.set_view(ViewId::Paint);
        }
        None => {
            rig.set_view(ViewId::Home);
        }
    }

    // Written to the target resource rather than the pivots themselves: the
    // rig may not exist yet while the vehicle is still loading.
    targets.door_angle = door_target;

    info!("Active service routed: {:?}", current);
    *previous = current;
}

/// React to add-on selection changes: each add-on routes to its camera view
/// and arms the matching effect layer. Clearing the add-on returns the view
/// to the active service's own view.
pub fn route_add_on_selection(
    active_add_on: Res<ActiveAddOn>,
    active_service: Res<ActiveService>,
    mut previous: Local<Option<AddOnKind>>,
    mut rig: ResMut<ViewRig>,
    mut targets: ResMut<PivotTargets>,
    mut sparkle: Option<ResMut<SparkleState>>,
    mut hair: Option<ResMut<HairLayer>>,
) {
    if !active_add_on.is_changed() {
        return;
    }

    let current = active_add_on.0.as_ref().and_then(AddOnKind::from_selection);
    if current == *previous {
        return;
    }

    if let Some(sparkle) = sparkle.as_deref_mut() {
        sparkle.engine_active = current == Some(AddOnKind::EngineBay);
        sparkle.headlight_active = current == Some(AddOnKind::HeadlightRestoration);
    }
    if let Some(hair) = hair.as_deref_mut() {
        hair.active = current == Some(AddOnKind::PetHairRemoval);
    }

    targets.hood_angle = if current == Some(AddOnKind::EngineBay) {
        HOOD_OPEN_RADIANS
    } else {
        0.0
    };

    match current {
        Some(add_on) => rig.set_view(add_on.view()),
        None => {
            let service_view = active_service
                .0
                .as_ref()
                .and_then(ServiceKind::from_selection)
                .map(ServiceKind::view)
                .unwrap_or(ViewId::Home);
            rig.set_view(service_view);
        }
    }

    info!("Active add-on routed: {:?}", current);
    *previous = current;
}

/// Local driving without the web UI: number keys pick services and add-ons.
#[cfg(not(target_arch = "wasm32"))]
fn debug_selection_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut active_service: ResMut<ActiveService>,
    mut active_add_on: ResMut<ActiveAddOn>,
) {
    if keyboard.just_pressed(KeyCode::Digit1) {
        active_service.0 = Some(ServiceSelection {
            id: "exterior".into(),
            name: "Exterior Detail".into(),
        });
        println!("Selected service: exterior");
    }
    if keyboard.just_pressed(KeyCode::Digit2) {
        active_service.0 = Some(ServiceSelection {
            id: "interior".into(),
            name: "Interior Detail".into(),
        });
        println!("Selected service: interior");
    }
    if keyboard.just_pressed(KeyCode::Digit3) {
        active_add_on.0 = Some(AddOnSelection {
            id: Some("engine_bay".into()),
            name: "Engine Bay Detail".into(),
        });
        println!("Selected add-on: engine bay");
    }
    if keyboard.just_pressed(KeyCode::Digit4) {
        active_add_on.0 = Some(AddOnSelection {
            id: Some("headlight_restoration".into()),
            name: "Headlight Restoration".into(),
        });
        println!("Selected add-on: headlight restoration");
    }
    if keyboard.just_pressed(KeyCode::Digit5) {
        active_add_on.0 = Some(AddOnSelection {
            id: Some("pet_hair_removal".into()),
            name: "Pet Hair Removal".into(),
        });
        println!("Selected add-on: pet hair removal");
    }
    if keyboard.just_pressed(KeyCode::Digit0) {
        active_service.0 = None;
        active_add_on.0 = None;
        println!("Selections cleared");
    }
}
