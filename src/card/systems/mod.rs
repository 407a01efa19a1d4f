//! Systems module for the sticker card
//!
//! This module contains all the Bevy systems of the app, organized into
//! submodules by functionality:
//!
//! - `setup`: Cameras and lights
//! - `card2d`: Flat card spawn and sticker sprite sync
//! - `card3d`: 3D card spawn, sticker peel/hover and edit rings
//! - `pointer`: Mouse/touch folding and drag tracking
//! - `drag2d` / `drag3d`: Sticker drag controllers per view
//! - `tilt`: Orientation source polling and card tilt
//! - `controls`: Tab bar, edit button, theme and gyroscope toggles
//! - `inventory`: Sticker selection panel
//! - `view`: 2D/3D camera and root switching

pub mod card2d;
pub mod card3d;
pub mod controls;
pub mod drag2d;
pub mod drag3d;
pub mod inventory;
pub mod pointer;
mod setup;
pub mod tilt;
mod view;

pub use card2d::{flat_sticker_translation, spawn_flat_card, sync_flat_stickers};
pub use card3d::{
    scene_sticker_translation, spawn_scene_card, sticker_pose, sync_scene_stickers, StickerPose,
};
pub use controls::{
    apply_palette, ensure_buttons_have_interaction, handle_edit_button, handle_gyroscope_toggle,
    handle_theme_toggle, handle_view_tabs, spawn_overlay_ui, sync_gyroscope_toggle,
    sync_view_tabs, update_edit_button_label, update_theme_toggle_label,
};
pub use drag2d::{drag_flat_stickers, pointer_card_percent};
pub use drag3d::{drag_scene_stickers, ray_card_intersection};
pub use inventory::{handle_inventory_clicks, highlight_selected_items, update_inventory_reveal};
pub use pointer::{
    drag_step, update_pointer_state, DragStep, DragTracker, FlatDrag, PointerState, SceneDrag,
    StickerDrag,
};
pub use setup::setup_cameras_and_lights;
pub use tilt::{detect_orientation_support, flat_tilt, OrientationPlugin};
pub use view::sync_active_view;
