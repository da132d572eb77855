use crate::engine::camera::{CameraPose, ViewId};
use bevy::math::Vec3;

/// Static named-view pose table. Poses are expressed in vehicle model space
/// (nose toward +Z, ground at y = 0) and looked up by the camera rig every
/// time the symbolic view changes.
pub const fn pose_for(view: ViewId) -> CameraPose {
    match view {
        ViewId::Home => CameraPose {
            position: Vec3::new(4.6, 2.2, 5.2),
            look_at: Vec3::new(0.0, 0.7, 0.0),
            zoom: 1.0,
        },
        ViewId::Interior => CameraPose {
            position: Vec3::new(2.4, 1.5, 0.3),
            look_at: Vec3::new(0.2, 0.9, -0.1),
            zoom: 1.15,
        },
        ViewId::InteriorDetail => CameraPose {
            position: Vec3::new(1.3, 1.2, 0.1),
            look_at: Vec3::new(0.1, 0.8, -0.3),
            zoom: 1.45,
        },
        ViewId::Engine => CameraPose {
            position: Vec3::new(1.6, 2.0, 3.4),
            look_at: Vec3::new(0.0, 0.9, 1.5),
            zoom: 1.2,
        },
        ViewId::Exterior => CameraPose {
            position: Vec3::new(5.4, 1.6, 1.8),
            look_at: Vec3::new(0.0, 0.8, 0.0),
            zoom: 1.0,
        },
        ViewId::Paint => CameraPose {
            position: Vec3::new(3.8, 1.1, -2.6),
            look_at: Vec3::new(0.0, 0.9, -0.4),
            zoom: 1.1,
        },
        ViewId::PaintDetail => CameraPose {
            position: Vec3::new(2.2, 1.0, -1.4),
            look_at: Vec3::new(0.4, 0.95, -0.6),
            zoom: 1.6,
        },
        ViewId::FrontWheel => CameraPose {
            position: Vec3::new(2.6, 0.9, 3.2),
            look_at: Vec3::new(0.62, 0.75, 2.1),
            zoom: 1.35,
        },
        ViewId::InteriorFloor => CameraPose {
            position: Vec3::new(1.6, 1.6, 0.6),
            look_at: Vec3::new(0.35, 0.42, -0.25),
            zoom: 1.3,
        },
        ViewId::Default => CameraPose {
            position: Vec3::new(4.6, 2.2, 5.2),
            look_at: Vec3::new(0.0, 0.7, 0.0),
            zoom: 1.0,
        },
    }
}
