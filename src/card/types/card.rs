//! Card surface components for both views

use bevy::prelude::*;

use super::sticker::StickerId;

/// Everything drawn by the flat view; hidden while the 3D tab is active.
#[derive(Component)]
pub struct FlatViewRoot;

/// Everything drawn by the 3D view; hidden while the 2D tab is active.
#[derive(Component)]
pub struct SceneViewRoot;

/// The flat card itself. Tilt is applied here; the shadow is a sibling so it
/// stays on the ground plane.
#[derive(Component)]
pub struct FlatCardRoot;

/// Background sprite of the flat card.
#[derive(Component)]
pub struct FlatCardSurface;

/// Drop shadow sprite behind the flat card.
#[derive(Component)]
pub struct FlatCardShadow;

/// Balance shown on both cards.
pub const BALANCE_TEXT: &str = "$60.14";

/// Balance text on either card.
#[derive(Component)]
pub struct BalanceText;

/// Sticker sprite on the flat card.
#[derive(Component, Debug, Clone, Copy)]
pub struct FlatSticker {
    pub id: StickerId,
}

/// Group holding the 3D card mesh and its sticker layer; gyroscope rotation is
/// applied here.
#[derive(Component)]
pub struct SceneCardGroup;

/// The extruded card body mesh.
#[derive(Component)]
pub struct SceneCardBody;

/// Parent of everything lying on the card face.
#[derive(Component)]
pub struct SceneAssetLayer;

/// Sticker quad on the 3D card.
#[derive(Component, Debug, Clone, Copy)]
pub struct SceneSticker {
    pub id: StickerId,
}

/// Ring shown around 3D stickers while editing.
#[derive(Component)]
pub struct SceneStickerRing;

/// Peel-off animation of a 3D sticker while it is dragged.
#[derive(Component, Debug, Default, Clone, Copy, PartialEq)]
pub struct StickerPeel {
    pub intensity: f32,
}

impl StickerPeel {
    /// Ease toward fully peeled while dragging, back to flat otherwise.
    pub fn step(&mut self, dragging: bool, dt: f32) {
        let target = if dragging { 1.0 } else { 0.0 };
        let t = (dt * 10.0).clamp(0.0, 1.0);
        self.intensity += (target - self.intensity) * t;
    }

    pub fn rotation_z(&self) -> f32 {
        self.intensity * 0.2
    }

    pub fn lift(&self) -> f32 {
        self.intensity * 0.1
    }

    pub fn scale(&self) -> f32 {
        1.0 + self.intensity * 0.1
    }

    pub fn is_visible(&self) -> bool {
        self.intensity > 0.01
    }
}

/// Idle bob of stickers while editing (world units).
pub fn hover_bob(elapsed_secs: f32) -> f32 {
    (elapsed_secs * 2.0).sin() * 0.02 + 0.05
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_peel_converges() {
        let mut peel = StickerPeel::default();
        for _ in 0..60 {
            peel.step(true, 1.0 / 60.0);
        }
        assert!(peel.intensity > 0.99);
        assert!((peel.scale() - 1.1).abs() < 0.01);

        for _ in 0..120 {
            peel.step(false, 1.0 / 60.0);
        }
        assert!(!peel.is_visible());
    }

    #[test]
    fn test_large_dt_does_not_overshoot() {
        let mut peel = StickerPeel::default();
        peel.step(true, 1.0);
        assert_eq!(peel.intensity, 1.0);
    }

    #[test]
    fn test_hover_bob_range() {
        for i in 0..100 {
            let z = hover_bob(i as f32 * 0.1);
            assert!((0.029..=0.071).contains(&z));
        }
    }
}
