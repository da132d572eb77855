pub mod effect_settings;
pub mod render_settings;
pub mod view_poses;
