//! Orientation adapter systems
//!
//! Polls the active [`OrientationSource`](crate::card::sources::OrientationSource),
//! publishes samples as messages and turns the latest sample into card tilt.

use bevy::log::info;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::card::sources::{ActiveOrientationSource, SourceInput};
use crate::card::systems::pointer::PointerState;
use crate::card::types::{
    tilt_radians_3d, CardShadow, EditMode, FlatCardRoot, FlatCardShadow, GyroscopeState,
    OrientationSample, PermissionState, SceneCardGroup, TiltAngles, TiltBlend, CARD_2D,
};

/// Registers orientation messages, state and systems.
pub struct OrientationPlugin;

impl Plugin for OrientationPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<OrientationSample>()
            .init_resource::<ActiveOrientationSource>()
            .init_resource::<GyroscopeState>()
            .init_resource::<TiltBlend>()
            .init_resource::<EditMode>()
            .init_resource::<PointerState>()
            .add_systems(Startup, detect_orientation_support)
            .add_systems(
                Update,
                (
                    request_orientation_permission,
                    poll_orientation_source,
                    store_orientation_samples,
                    update_tilt_blend,
                    (apply_flat_tilt, apply_scene_tilt),
                )
                    .chain(),
            );
    }
}

pub fn detect_orientation_support(
    source: Res<ActiveOrientationSource>,
    mut gyro: ResMut<GyroscopeState>,
) {
    gyro.is_supported = source.is_supported();
    info!(
        "Orientation source '{}' supported: {}",
        source.name(),
        gyro.is_supported
    );
}

/// Ask for sensor access the first time the gyroscope is enabled.
pub fn request_orientation_permission(
    mut source: ResMut<ActiveOrientationSource>,
    mut gyro: ResMut<GyroscopeState>,
) {
    if !gyro.enabled || !gyro.is_supported || gyro.permission != PermissionState::Unknown {
        return;
    }
    let permission = source.request_permission();
    info!("Orientation permission: {:?}", permission);
    gyro.permission = permission;
}

pub fn poll_orientation_source(
    time: Res<Time>,
    windows: Query<&Window, With<PrimaryWindow>>,
    pointer: Res<PointerState>,
    edit_mode: Res<EditMode>,
    gyro: Res<GyroscopeState>,
    mut source: ResMut<ActiveOrientationSource>,
    mut samples: MessageWriter<OrientationSample>,
) {
    if !gyro.should_poll(edit_mode.is_editing) {
        return;
    }
    let window_size = windows
        .single()
        .map(|w| Vec2::new(w.width(), w.height()))
        .unwrap_or(Vec2::ZERO);
    let input = SourceInput {
        elapsed: time.elapsed_secs(),
        delta: time.delta_secs(),
        pointer: pointer.normalized(window_size),
    };
    if let Some(sample) = source.poll(&input) {
        samples.write(sample);
    }
}

/// Keep the most recent sample.
pub fn store_orientation_samples(
    mut samples: MessageReader<OrientationSample>,
    mut gyro: ResMut<GyroscopeState>,
) {
    if let Some(sample) = samples.read().last() {
        gyro.latest = *sample;
    }
}

/// Ease toward live tilt while the gyroscope is on and nobody is editing,
/// toward rest otherwise.
pub fn update_tilt_blend(
    time: Res<Time>,
    edit_mode: Res<EditMode>,
    gyro: Res<GyroscopeState>,
    mut blend: ResMut<TiltBlend>,
) {
    blend.retarget(gyro.tilt_active(edit_mode.is_editing));
    blend.tick(time.delta_secs());
}

/// Flat card rotation and drop shadow for the current sample and blend.
pub fn flat_tilt(gyro: &GyroscopeState, blend: &TiltBlend) -> (TiltAngles, CardShadow) {
    let tilt = TiltAngles::from_sample(&gyro.latest)
        .unwrap_or_default()
        .scaled(blend.value);
    let live_shadow = CardShadow::from_sample(&gyro.latest).unwrap_or(CardShadow::RESTING);
    let shadow = CardShadow::RESTING.lerp(&live_shadow, blend.value);
    (tilt, shadow)
}

pub fn apply_flat_tilt(
    gyro: Res<GyroscopeState>,
    blend: Res<TiltBlend>,
    mut cards: Query<&mut Transform, With<FlatCardRoot>>,
    mut shadows: Query<(&mut Transform, &mut Sprite), (With<FlatCardShadow>, Without<FlatCardRoot>)>,
) {
    let (tilt, shadow) = flat_tilt(&gyro, &blend);

    for mut transform in cards.iter_mut() {
        transform.rotation = tilt.to_rotation();
    }

    for (mut transform, mut sprite) in shadows.iter_mut() {
        // Shadow offsets are screen-space (+Y down).
        transform.translation.x = shadow.offset_x;
        transform.translation.y = -shadow.offset_y;
        sprite.custom_size = Some(CARD_2D.size() + Vec2::splat(shadow.blur * 2.0));
        sprite.color = Color::srgba(0.0, 0.0, 0.0, shadow.opacity);
    }
}

pub fn apply_scene_tilt(
    gyro: Res<GyroscopeState>,
    blend: Res<TiltBlend>,
    mut groups: Query<&mut Transform, With<SceneCardGroup>>,
) {
    let radians = tilt_radians_3d(&gyro.latest).unwrap_or(Vec2::ZERO) * blend.value;
    for mut transform in groups.iter_mut() {
        transform.rotation = Quat::from_euler(EulerRot::XYZ, radians.x, radians.y, 0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_tilt_at_rest() {
        let gyro = GyroscopeState {
            latest: OrientationSample::new(0.0, 60.0, -30.0),
            ..default()
        };
        let (tilt, shadow) = flat_tilt(&gyro, &TiltBlend::at(0.0));
        assert_eq!(tilt.x_deg, 0.0);
        assert_eq!(shadow, CardShadow::RESTING);
    }

    #[test]
    fn test_flat_tilt_live() {
        let gyro = GyroscopeState {
            latest: OrientationSample::new(0.0, 60.0, -30.0),
            ..default()
        };
        let (tilt, shadow) = flat_tilt(&gyro, &TiltBlend::at(1.0));
        assert!((tilt.x_deg - 10.0).abs() < 1e-5);
        assert!((tilt.y_deg - 5.0).abs() < 1e-5);
        assert!((shadow.offset_x - 10.0).abs() < 1e-5);
    }

    #[test]
    fn test_flat_tilt_without_sample_rests() {
        let gyro = GyroscopeState::default();
        let (tilt, shadow) = flat_tilt(&gyro, &TiltBlend::at(1.0));
        assert_eq!(tilt, TiltAngles::default());
        assert_eq!(shadow, CardShadow::RESTING);
    }
}
