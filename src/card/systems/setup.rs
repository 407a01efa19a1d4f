//! Scene setup system
//!
//! Spawns one camera per view plus the lights of the 3D scene. Only the
//! camera of the active view is rendered.

use bevy::prelude::*;

use crate::card::types::*;

pub fn setup_cameras_and_lights(mut commands: Commands, active_view: Res<ActiveView>) {
    commands.spawn((
        Camera2d,
        Camera {
            is_active: *active_view == ActiveView::Flat,
            ..default()
        },
        FlatCamera,
        Name::new("FlatCamera"),
    ));

    commands.spawn((
        Camera3d::default(),
        Camera {
            is_active: *active_view == ActiveView::Scene,
            ..default()
        },
        Projection::from(PerspectiveProjection {
            fov: SCENE_CAMERA_FOV_DEGREES.to_radians(),
            ..default()
        }),
        Transform::from_translation(SCENE_CAMERA_POSITION).looking_at(Vec3::ZERO, Vec3::Y),
        SceneCamera,
        Name::new("SceneCamera"),
    ));

    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: 600.0,
        ..default()
    });

    commands.spawn((
        DirectionalLight {
            illuminance: 10000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(10.0, 10.0, 5.0).looking_at(Vec3::ZERO, Vec3::Y),
        Name::new("KeyLight"),
    ));

    commands.spawn((
        PointLight {
            intensity: 300_000.0,
            range: 50.0,
            ..default()
        },
        Transform::from_xyz(-10.0, -10.0, -5.0),
        Name::new("FillLight"),
    ));
}
