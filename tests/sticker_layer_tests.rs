//! Tests for sticker placement: bounds clamping and z-order

use bevy::math::Vec2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use sticker_card::card::types::{
    CardConfig, StickerBounds, StickerId, StickerLayer, StickerPositionSetting, StickerSelection,
    CARD_3D, STICKER_CATALOG,
};

fn assert_all_in_bounds(layer: &StickerLayer) {
    for sticker in &layer.stickers {
        let bounds = layer.bounds_for(sticker);
        assert!(
            bounds.contains(sticker.position),
            "{} at {:?} escaped {:?}",
            sticker.id,
            sticker.position,
            bounds
        );
    }
}

#[test]
fn test_initial_layouts_are_in_bounds() {
    assert_all_in_bounds(&StickerLayer::initial_2d());
    assert_all_in_bounds(&StickerLayer::initial_3d());
}

#[test]
fn test_initial_z_order() {
    let flat = StickerLayer::initial_2d();
    let z: Vec<u32> = flat.stickers.iter().map(|s| s.z_index).collect();
    assert_eq!(z, vec![1, 2, 3, 4, 5, 6, 7]);

    let scene = StickerLayer::initial_3d();
    let z: Vec<u32> = scene.stickers.iter().map(|s| s.z_index).collect();
    assert_eq!(z, vec![2, 3, 4, 5, 6, 7, 8]);
}

#[test]
fn test_random_drags_never_leave_the_card() {
    let mut rng = StdRng::seed_from_u64(2024);
    let mut flat = StickerLayer::initial_2d();
    let mut scene = StickerLayer::initial_3d();

    for _ in 0..500 {
        let id = STICKER_CATALOG[rng.gen_range(0..STICKER_CATALOG.len())].id;

        flat.begin_drag(id);
        flat.move_to(id, Vec2::new(rng.gen_range(-80.0..180.0), rng.gen_range(-80.0..180.0)));
        flat.end_drag(id);

        scene.begin_drag(id);
        scene.move_by(id, Vec2::new(rng.gen_range(-15.0..15.0), rng.gen_range(-15.0..15.0)));
        scene.end_drag(id);
    }

    assert_all_in_bounds(&flat);
    assert_all_in_bounds(&scene);
}

#[test]
fn test_world_drag_keeps_off_top_edge() {
    let mut scene = StickerLayer::initial_3d();
    let id = StickerId(2);
    scene.move_to(id, Vec2::new(0.0, 100.0));
    let sticker = scene.get(id).expect("sticker 2 exists");
    let top = sticker.position.y + sticker.size.y / 2.0;
    assert!(top < CARD_3D.height / 2.0);
}

#[test]
fn test_touch_brings_sticker_to_front() {
    let mut layer = StickerLayer::initial_2d();
    let selection = StickerSelection::all();

    for id in [StickerId(3), StickerId(1), StickerId(3)] {
        let before = layer.max_z();
        layer.begin_drag(id);
        assert_eq!(layer.get(id).map(|s| s.z_index), Some(before + 1));
        assert_eq!(layer.draw_order(&selection).last().map(|s| s.id), Some(id));
        layer.end_drag(id);
    }

    let z: Vec<u32> = layer.draw_order(&selection).iter().map(|s| s.z_index).collect();
    assert!(z.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn test_hit_test_prefers_top_sticker() {
    let mut layer = StickerLayer::initial_2d();
    let selection = StickerSelection::all();
    let point = layer.get(StickerId(5)).map(|s| s.position).unwrap_or_default();

    // Sticker 1 overlaps sticker 5; whichever was touched last wins.
    layer.move_to(StickerId(1), point);
    layer.bring_to_front(StickerId(1));
    assert_eq!(layer.hit_test(point, &selection), Some(StickerId(1)));
    layer.bring_to_front(StickerId(5));
    assert_eq!(layer.hit_test(point, &selection), Some(StickerId(5)));

    let only_one = StickerSelection::from_ids([StickerId(1)]);
    assert_eq!(layer.hit_test(point, &only_one), Some(StickerId(1)));
}

#[test]
fn test_config_positions_are_clamped() {
    let config = CardConfig {
        flat_positions: vec![StickerPositionSetting {
            sticker: 4,
            x: 250.0,
            y: -10.0,
        }],
        ..CardConfig::default()
    };
    let mut layer = StickerLayer::initial_2d();
    config.apply_flat_positions(&mut layer);

    let bounds = StickerBounds::percent();
    assert_eq!(
        layer.get(StickerId(4)).map(|s| s.position),
        Some(Vec2::new(bounds.max_x, bounds.min_y))
    );
    assert_all_in_bounds(&layer);
}
