//! 2D/3D view switching

use bevy::log::info;
use bevy::prelude::*;

use crate::card::types::*;

/// Activate the camera, card root and UI target of the active view.
#[allow(clippy::type_complexity)]
pub fn sync_active_view(
    mut commands: Commands,
    active_view: Res<ActiveView>,
    mut cameras: Query<(Entity, &mut Camera, Has<FlatCamera>, Has<SceneCamera>)>,
    mut flat_roots: Query<&mut Visibility, (With<FlatViewRoot>, Without<SceneViewRoot>)>,
    mut scene_roots: Query<&mut Visibility, (With<SceneViewRoot>, Without<FlatViewRoot>)>,
    overlays: Query<Entity, With<OverlayRoot>>,
) {
    if !active_view.is_changed() {
        return;
    }
    let flat = *active_view == ActiveView::Flat;

    let mut target = None;
    for (entity, mut camera, is_flat, is_scene) in cameras.iter_mut() {
        if !is_flat && !is_scene {
            continue;
        }
        camera.is_active = if is_flat { flat } else { !flat };
        if camera.is_active {
            target = Some(entity);
        }
    }

    let (flat_visibility, scene_visibility) = if flat {
        (Visibility::Visible, Visibility::Hidden)
    } else {
        (Visibility::Hidden, Visibility::Visible)
    };
    for mut visibility in flat_roots.iter_mut() {
        visibility.set_if_neq(flat_visibility);
    }
    for mut visibility in scene_roots.iter_mut() {
        visibility.set_if_neq(scene_visibility);
    }

    if let Some(camera) = target {
        for overlay in overlays.iter() {
            commands.entity(overlay).insert(UiTargetCamera(camera));
        }
    }

    info!("Active view: {}", active_view.label());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_switching_view_swaps_cameras_and_roots() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .insert_resource(ActiveView::Flat)
            .add_systems(Update, sync_active_view);

        let flat_camera = app.world_mut().spawn((Camera::default(), FlatCamera)).id();
        let scene_camera = app.world_mut().spawn((Camera::default(), SceneCamera)).id();
        let flat_root = app.world_mut().spawn((FlatViewRoot, Visibility::Hidden)).id();
        let scene_root = app.world_mut().spawn((SceneViewRoot, Visibility::Visible)).id();
        let overlay = app.world_mut().spawn(OverlayRoot).id();

        app.update();
        let camera_active = |app: &App, e: Entity| app.world().get::<Camera>(e).map(|c| c.is_active);
        assert_eq!(camera_active(&app, flat_camera), Some(true));
        assert_eq!(camera_active(&app, scene_camera), Some(false));
        assert_eq!(app.world().get::<Visibility>(flat_root), Some(&Visibility::Visible));
        assert_eq!(
            app.world().get::<UiTargetCamera>(overlay).map(|t| t.entity()),
            Some(flat_camera)
        );

        *app.world_mut().resource_mut::<ActiveView>() = ActiveView::Scene;
        app.update();
        assert_eq!(camera_active(&app, flat_camera), Some(false));
        assert_eq!(camera_active(&app, scene_camera), Some(true));
        assert_eq!(app.world().get::<Visibility>(scene_root), Some(&Visibility::Visible));
        assert_eq!(app.world().get::<Visibility>(flat_root), Some(&Visibility::Hidden));
        assert_eq!(
            app.world().get::<UiTargetCamera>(overlay).map(|t| t.entity()),
            Some(scene_camera)
        );
    }
}
