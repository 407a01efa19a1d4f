//! Headless app tests for the orientation systems

use bevy::prelude::*;

use sticker_card::card::sources::{ActiveOrientationSource, ReplayFile, ReplayOrientation};
use sticker_card::card::systems::OrientationPlugin;
use sticker_card::card::types::{
    EditMode, GyroscopeState, OrientationSample, PermissionState, SceneCardGroup, TiltBlend,
};

fn replay_app(samples: Vec<OrientationSample>) -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .add_plugins(OrientationPlugin)
        .insert_resource(ActiveOrientationSource(Box::new(
            ReplayOrientation::new(ReplayFile {
                interval: 0.1,
                samples,
            })
            .expect("positive interval"),
        )));
    app
}

#[test]
fn test_replayed_sample_tilts_scene_card() {
    let sample = OrientationSample::new(0.0, 60.0, -30.0);
    let mut app = replay_app(vec![sample]);
    let group = app
        .world_mut()
        .spawn((SceneCardGroup, Transform::default()))
        .id();

    app.update();

    let gyro = app.world().resource::<GyroscopeState>();
    assert!(gyro.is_supported);
    assert_eq!(gyro.permission, PermissionState::Granted);
    assert_eq!(gyro.latest, sample);

    let rotation = app
        .world()
        .get::<Transform>(group)
        .map(|t| t.rotation)
        .unwrap_or_default();
    assert!(rotation.angle_between(Quat::IDENTITY) > 0.01);
}

#[test]
fn test_edit_mode_eases_tilt_to_rest() {
    let mut app = replay_app(vec![OrientationSample::new(0.0, 30.0, 30.0)]);
    app.update();
    assert_eq!(app.world().resource::<TiltBlend>().to, 1.0);

    app.world_mut().resource_mut::<EditMode>().is_editing = true;
    app.update();
    let blend = *app.world().resource::<TiltBlend>();
    assert_eq!(blend.to, 0.0);
    assert_eq!(blend.from, 1.0);
}

#[test]
fn test_empty_replay_is_unsupported() {
    let mut app = replay_app(Vec::new());
    app.update();
    let gyro = app.world().resource::<GyroscopeState>();
    assert!(!gyro.is_supported);
    assert_eq!(gyro.permission, PermissionState::Unknown);
    assert_eq!(gyro.latest, OrientationSample::default());
}
