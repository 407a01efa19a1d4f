//! Tests for the shipped sample configuration and replay files

use std::path::PathBuf;

use sticker_card::card::sources::ReplayOrientation;
use sticker_card::card::types::{
    ActiveView, CardConfig, OrientationSetting, StickerId, StickerLayer,
};

fn demo(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("demos").join(name)
}

#[test]
fn test_sample_config_loads() {
    let config = CardConfig::load_from_file(&demo("card.ron")).expect("sample config parses");
    assert_eq!(config.view.to_view(), ActiveView::Scene);
    assert_eq!(
        config.orientation,
        OrientationSetting::Replay("demos/tilt_replay.ron".to_string())
    );

    let selection = config.selection();
    assert!(selection.is_selected(StickerId(7)));
    assert!(!selection.is_selected(StickerId(3)));

    let mut layer = StickerLayer::initial_2d();
    config.apply_flat_positions(&mut layer);
    assert_eq!(
        layer.get(StickerId(1)).map(|s| s.position),
        Some(bevy::math::Vec2::new(20.0, 25.0))
    );
}

#[test]
fn test_sample_replay_loads() {
    let replay =
        ReplayOrientation::load_from_file(&demo("tilt_replay.ron")).expect("sample replay parses");
    assert_eq!(replay.len(), 13);
}

#[test]
fn test_missing_config_falls_back_to_defaults() {
    let config = CardConfig::load_or_default(Some(&demo("does-not-exist.ron")));
    assert_eq!(config, CardConfig::default());
}
