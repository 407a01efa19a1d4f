//! Sticker dragging on the flat card
//!
//! The pointer is mapped from the window to the card's local frame and then
//! to percent of the card. Dragged stickers follow the pointer directly.

use bevy::log::info;
use bevy::prelude::*;

use crate::card::systems::pointer::{drag_step, DragStep, FlatDrag, PointerState, StickerDrag};
use crate::card::types::*;

/// Pointer position in percent of the flat card, if it can be resolved.
pub fn pointer_card_percent(
    pointer: Vec2,
    camera: &Camera,
    camera_transform: &GlobalTransform,
    card_transform: &GlobalTransform,
) -> Option<Vec2> {
    let world = camera.viewport_to_world_2d(camera_transform, pointer).ok()?;
    let local = card_transform
        .affine()
        .inverse()
        .transform_point3(world.extend(0.0));
    Some(cursor_to_card_percent(local.truncate(), CARD_2D.size()))
}

/// Begin, move and end drags on the flat card.
#[allow(clippy::too_many_arguments)]
pub fn drag_flat_stickers(
    pointer: Res<PointerState>,
    edit_mode: Res<EditMode>,
    active_view: Res<ActiveView>,
    selection: Res<StickerSelection>,
    cameras: Query<(&Camera, &GlobalTransform), With<FlatCamera>>,
    cards: Query<&GlobalTransform, With<FlatCardRoot>>,
    mut layer: ResMut<Sticker2dLayer>,
    mut drag: ResMut<FlatDrag>,
) {
    let active = edit_mode.is_editing && *active_view == ActiveView::Flat;
    let percent = if active {
        cameras
            .single()
            .ok()
            .zip(cards.single().ok())
            .zip(pointer.position)
            .and_then(|(((camera, camera_transform), card_transform), p)| {
                pointer_card_percent(p, camera, camera_transform, card_transform)
            })
    } else {
        None
    };

    let step = drag_step(&pointer, active, drag.sticker.is_some(), percent);
    apply_flat_step(step, &mut layer, &mut drag, &selection);
}

/// Apply one [`DragStep`] to the flat layer. Dragged stickers are centered
/// under the pointer.
fn apply_flat_step(
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
                info!("Placed {} on the flat card", id);
            }
        }
        DragStep::Grab(percent) => {
            if let Some(id) = layer.hit_test(percent, selection) {
                layer.begin_drag(id);
                drag.begin(id, percent.extend(0.0));
            }
        }
        DragStep::Follow(percent) => {
            if let Some(id) = drag.sticker {
                if drag.tracker.update(percent.extend(0.0)).is_some() {
                    layer.move_to(id, percent);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hit_then_move_stays_in_bounds() {
        let mut layer = StickerLayer::initial_2d();
        let selection = StickerSelection::all();
        let id = layer
            .hit_test(Vec2::new(55.0, 65.0), &selection)
            .expect("sticker 7 sits at 55,65");
        layer.begin_drag(id);
        assert_eq!(layer.dragging(), Some(id));

        let pointer = card_percent_to_local(Vec2::new(130.0, -20.0), CARD_2D.size());
        let percent = cursor_to_card_percent(pointer, CARD_2D.size());
        assert!(layer.move_to(id, percent));
        let bounds = StickerBounds::percent();
        let placed = layer.get(id).map(|s| s.position);
        assert_eq!(placed, Some(Vec2::new(bounds.max_x, bounds.min_y)));

        layer.end_drag(id);
        assert_eq!(layer.dragging(), None);
    }

    #[test]
    fn test_grab_brings_sticker_to_front_and_follows() {
        let mut layer = StickerLayer::initial_2d();
        let mut drag = StickerDrag::default();
        let selection = StickerSelection::all();
        let under = layer.get(StickerId(2)).map(|s| s.position).unwrap_or_default();
        let top = layer.max_z();

        apply_flat_step(DragStep::Grab(under), &mut layer, &mut drag, &selection);
        assert_eq!(drag.sticker, Some(StickerId(2)));
        assert_eq!(layer.get(StickerId(2)).map(|s| s.z_index), Some(top + 1));
        assert_eq!(layer.dragging(), Some(StickerId(2)));

        apply_flat_step(DragStep::Follow(Vec2::new(30.0, 30.0)), &mut layer, &mut drag, &selection);
        assert_eq!(
            layer.get(StickerId(2)).map(|s| s.position),
            Some(Vec2::new(30.0, 30.0))
        );

        apply_flat_step(DragStep::Release, &mut layer, &mut drag, &selection);
        assert_eq!(drag.sticker, None);
        assert_eq!(layer.dragging(), None);
    }

    #[test]
    fn test_grab_on_empty_card_or_hidden_sticker_misses() {
        let mut layer = StickerLayer::initial_2d();
        let mut drag = StickerDrag::default();
        let before = layer.clone();

        let hidden = StickerSelection::from_ids([StickerId(1)]);
        let on_seven = layer.get(StickerId(7)).map(|s| s.position).unwrap_or_default();
        apply_flat_step(DragStep::Grab(on_seven), &mut layer, &mut drag, &hidden);
        assert_eq!(drag.sticker, None);
        assert_eq!(layer, before);
    }

    #[test]
    fn test_press_over_ui_then_drag_leaves_stickers_alone() {
        let mut layer = StickerLayer::initial_2d();
        let mut drag = StickerDrag::default();
        let selection = StickerSelection::all();
        let before = layer.clone();
        let on_seven = layer.get(StickerId(7)).map(|s| s.position);

        let press = PointerState {
            position: Some(Vec2::new(640.0, 360.0)),
            pressed: true,
            just_pressed: true,
            over_ui: true,
            ..default()
        };
        let step = drag_step(&press, true, drag.sticker.is_some(), on_seven);
        apply_flat_step(step, &mut layer, &mut drag, &selection);

        let held = PointerState {
            just_pressed: false,
            ..press
        };
        let step = drag_step(&held, true, drag.sticker.is_some(), Some(Vec2::new(20.0, 20.0)));
        apply_flat_step(step, &mut layer, &mut drag, &selection);

        assert_eq!(drag.sticker, None);
        assert_eq!(layer, before);
    }

    #[test]
    fn test_leaving_edit_mode_drops_the_drag() {
        let mut layer = StickerLayer::initial_2d();
        let mut drag = StickerDrag::default();
        let selection = StickerSelection::all();
        let on_seven = layer.get(StickerId(7)).map(|s| s.position);
        let held = PointerState {
            position: Some(Vec2::ZERO),
            pressed: true,
            just_pressed: true,
            ..default()
        };

        let step = drag_step(&held, true, false, on_seven);
        apply_flat_step(step, &mut layer, &mut drag, &selection);
        assert_eq!(drag.sticker, Some(StickerId(7)));

        let step = drag_step(&held, false, drag.sticker.is_some(), None);
        assert_eq!(step, DragStep::Release);
        apply_flat_step(step, &mut layer, &mut drag, &selection);
        assert_eq!(drag.sticker, None);
        assert_eq!(layer.dragging(), None);
    }
}
