//! Camera-related types and components
//!
//! One camera per view; only the camera of the active view is rendered.

use bevy::prelude::*;

/// Marker for the orthographic camera of the flat card.
#[derive(Component)]
pub struct FlatCamera;

/// Marker for the perspective camera of the 3D card.
#[derive(Component)]
pub struct SceneCamera;

/// Position of the 3D camera (looking at the origin).
pub const SCENE_CAMERA_POSITION: Vec3 = Vec3::new(0.0, 0.0, 15.0);

/// Vertical field of view of the 3D camera, in degrees.
pub const SCENE_CAMERA_FOV_DEGREES: f32 = 60.0;
