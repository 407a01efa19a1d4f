//! Sticker dragging on the 3D card
//!
//! A ray is cast from the scene camera through the pointer and intersected
//! with the card face in the card group's local frame. Stickers move by the
//! change of that intersection between frames.

use bevy::log::info;
use bevy::prelude::*;

use crate::card::systems::card3d::ASSET_LAYER_OFFSET;
use crate::card::systems::pointer::{drag_step, DragStep, PointerState, SceneDrag, StickerDrag};
use crate::card::types::*;

/// Local z of the plane the stickers lie on.
pub fn card_face_z() -> f32 {
    CARD_3D.thickness / 2.0 + ASSET_LAYER_OFFSET
}

/// Intersect a world-space ray with the card face.
///
/// Returns the hit in card-local coordinates, or `None` when the ray is
/// parallel to the face or the face is behind the ray origin.
pub fn ray_card_intersection(
    origin: Vec3,
    direction: Vec3,
    group_transform: &GlobalTransform,
) -> Option<Vec2> {
    let inverse = group_transform.affine().inverse();
    let local_origin = inverse.transform_point3(origin);
    let local_direction = inverse.transform_vector3(direction);

    if local_direction.z.abs() < 0.0001 {
        return None;
    }
    let t = (card_face_z() - local_origin.z) / local_direction.z;
    if t < 0.0 {
        return None;
    }
    Some((local_origin + local_direction * t).truncate())
}

/// Begin, move and end drags on the 3D card.
#[allow(clippy::too_many_arguments)]
pub fn drag_scene_stickers(
    pointer: Res<PointerState>,
    edit_mode: Res<EditMode>,
    active_view: Res<ActiveView>,
    selection: Res<StickerSelection>,
    cameras: Query<(&Camera, &GlobalTransform), With<SceneCamera>>,
    groups: Query<&GlobalTransform, With<SceneCardGroup>>,
    mut layer: ResMut<Sticker3dLayer>,
    mut drag: ResMut<SceneDrag>,
) {
    let active = edit_mode.is_editing && *active_view == ActiveView::Scene;
    let hit = if active {
        cameras
            .single()
            .ok()
            .zip(groups.single().ok())
            .zip(pointer.position)
            .and_then(|(((camera, camera_transform), group_transform), p)| {
                let ray = camera.viewport_to_world(camera_transform, p).ok()?;
                ray_card_intersection(ray.origin, *ray.direction, group_transform)
            })
    } else {
        None
    };

    let step = drag_step(&pointer, active, drag.sticker.is_some(), hit);
    apply_scene_step(step, &mut layer, &mut drag, &selection);
}

/// Apply one [`DragStep`] to the 3D layer. Stickers move by the change of the
/// card hit point, so grabbing off-center does not make them jump.
fn apply_scene_step(
    step: DragStep,
    layer: &mut StickerLayer,
    drag: &mut StickerDrag,
    selection: &StickerSelection,
) {
    match step {
        DragStep::Idle => {}
        DragStep::Release => {
            if let Some(id) = drag.finish() {
                layer.end_drag(id);
                info!("Placed {} on the 3D card", id);
            }
        }
        DragStep::Grab(hit) => {
            if let Some(id) = layer.hit_test(hit, selection) {
                layer.begin_drag(id);
                drag.begin(id, hit.extend(0.0));
            }
        }
        DragStep::Follow(hit) => {
            if let Some(id) = drag.sticker {
                if let Some(delta) = drag.tracker.update(hit.extend(0.0)) {
                    layer.move_by(id, delta.truncate());
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ray_hits_face_in_front() {
        let hit = ray_card_intersection(
            Vec3::new(1.0, 2.0, 15.0),
            Vec3::NEG_Z,
            &GlobalTransform::IDENTITY,
        );
        assert_eq!(hit, Some(Vec2::new(1.0, 2.0)));
    }

    #[test]
    fn test_parallel_or_behind_rays_miss() {
        let parallel = ray_card_intersection(Vec3::new(0.0, 0.0, 15.0), Vec3::X, &GlobalTransform::IDENTITY);
        assert_eq!(parallel, None);

        let behind = ray_card_intersection(Vec3::new(0.0, 0.0, 15.0), Vec3::Z, &GlobalTransform::IDENTITY);
        assert_eq!(behind, None);
    }

    #[test]
    fn test_intersection_follows_group_rotation() {
        let rotated = GlobalTransform::from(Transform::from_rotation(Quat::from_rotation_z(
            std::f32::consts::FRAC_PI_2,
        )));
        let hit = ray_card_intersection(Vec3::new(1.0, 0.0, 15.0), Vec3::NEG_Z, &rotated)
            .expect("ray faces the card");
        assert!((hit.x - 0.0).abs() < 1e-4);
        assert!((hit.y + 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_drag_delta_moves_within_bounds() {
        let mut layer = StickerLayer::initial_3d();
        let id = StickerId(1);
        layer.begin_drag(id);
        assert!(layer.move_by(id, Vec2::new(100.0, 0.0)));
        let position = layer.get(id).map(|s| s.position).unwrap_or_default();
        let bounds = layer.bounds_for(layer.get(id).expect("sticker 1 exists"));
        assert!(bounds.contains(position));
        assert!((position.x - bounds.max_x).abs() < 1e-5);
    }

    #[test]
    fn test_off_center_grab_moves_by_delta() {
        let mut layer = StickerLayer::initial_3d();
        let mut drag = StickerDrag::default();
        let selection = StickerSelection::all();
        let id = StickerId(3);
        let start = layer.get(id).map(|s| s.position).unwrap_or_default();
        let top = layer.max_z();

        let grab = start + Vec2::new(0.3, 0.2);
        apply_scene_step(DragStep::Grab(grab), &mut layer, &mut drag, &selection);
        assert_eq!(drag.sticker, Some(id));
        assert_eq!(layer.get(id).map(|s| s.z_index), Some(top + 1));

        apply_scene_step(
            DragStep::Follow(grab + Vec2::new(1.0, -0.5)),
            &mut layer,
            &mut drag,
            &selection,
        );
        let moved = layer.get(id).map(|s| s.position).unwrap_or_default();
        assert!((moved - (start + Vec2::new(1.0, -0.5))).length() < 1e-4);

        apply_scene_step(DragStep::Release, &mut layer, &mut drag, &selection);
        assert_eq!(layer.dragging(), None);
        assert_eq!(drag.sticker, None);
    }

    #[test]
    fn test_pointer_leaving_window_ends_scene_drag() {
        let mut layer = StickerLayer::initial_3d();
        let mut drag = StickerDrag::default();
        let selection = StickerSelection::all();
        let on_sticker = layer.get(StickerId(4)).map(|s| s.position);
        let press = PointerState {
            position: Some(Vec2::new(900.0, 400.0)),
            pressed: true,
            just_pressed: true,
            ..default()
        };
        let step = drag_step(&press, true, false, on_sticker);
        apply_scene_step(step, &mut layer, &mut drag, &selection);
        assert_eq!(drag.sticker, Some(StickerId(4)));

        let gone = PointerState {
            position: None,
            just_pressed: false,
            ..press
        };
        let step = drag_step(&gone, true, drag.sticker.is_some(), None);
        apply_scene_step(step, &mut layer, &mut drag, &selection);
        assert_eq!(drag.sticker, None);
        assert_eq!(layer.dragging(), None);
    }

    #[test]
    fn test_press_on_toolbar_does_not_grab_scene_sticker() {
        let mut layer = StickerLayer::initial_3d();
        let mut drag = StickerDrag::default();
        let selection = StickerSelection::all();
        let before = layer.clone();
        let press = PointerState {
            position: Some(Vec2::new(40.0, 20.0)),
            pressed: true,
            just_pressed: true,
            over_ui: true,
            ..default()
        };
        let step = drag_step(&press, true, false, Some(Vec2::ZERO));
        apply_scene_step(step, &mut layer, &mut drag, &selection);
        assert_eq!(drag.sticker, None);
        assert_eq!(layer, before);
    }
}
