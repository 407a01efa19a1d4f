//! Flat card view
//!
//! The card is a tinted rounded sprite with its logo, balance and wordmark.
//! Sticker sprites are children of the card so they follow its tilt. Their
//! positions come from [`Sticker2dLayer`] in percent of the card.

use bevy::prelude::*;

use crate::card::textures::CardTextures;
use crate::card::types::*;

/// Distance of the logo, balance and wordmark from the card edges (px).
pub const FLAT_EDGE_INSET: f32 = 24.0;

const LOGO_SIZE: f32 = 64.0;
const TYB_LOGO_SIZE: Vec2 = Vec2::new(80.0, 40.0);
const BALANCE_FONT_SIZE: f32 = 28.0;
// Rough rendered width of the balance string at that font size.
const BALANCE_TEXT_WIDTH: f32 = 100.0;

const STICKER_BASE_Z: f32 = 1.0;
const STICKER_Z_STEP: f32 = 0.01;
const DRAGGING_SCALE: f32 = 1.1;

pub fn spawn_flat_card(
    mut commands: Commands,
    textures: Res<CardTextures>,
    layer: Res<Sticker2dLayer>,
    selection: Res<StickerSelection>,
    theme: Res<ThemeMode>,
    card_color: Res<CardColor>,
    active_view: Res<ActiveView>,
) {
    let palette = theme.palette(card_color.0);
    let card = CARD_2D.size();
    let half = card / 2.0;
    let view_visibility = if *active_view == ActiveView::Flat {
        Visibility::Visible
    } else {
        Visibility::Hidden
    };
    let order = layer.draw_order(&selection);

    commands
        .spawn((
            FlatViewRoot,
            Transform::default(),
            view_visibility,
            Name::new("FlatView"),
        ))
        .with_children(|view| {
            view.spawn((
                FlatCardShadow,
                Sprite {
                    image: textures.shadow.clone(),
                    custom_size: Some(card + Vec2::splat(CardShadow::RESTING.blur * 2.0)),
                    color: Color::srgba(0.0, 0.0, 0.0, CardShadow::RESTING.opacity),
                    ..default()
                },
                Transform::from_xyz(0.0, -CardShadow::RESTING.offset_y, -1.0),
            ));

            view.spawn((
                FlatCardRoot,
                Transform::default(),
                Visibility::Inherited,
            ))
            .with_children(|card_node| {
                card_node.spawn((
                    FlatCardSurface,
                    Sprite {
                        image: textures.card_face.clone(),
                        custom_size: Some(card),
                        color: palette.card,
                        ..default()
                    },
                    Transform::default(),
                ));

                card_node.spawn((
                    Sprite {
                        image: textures.logo.clone(),
                        custom_size: Some(Vec2::splat(LOGO_SIZE)),
                        ..default()
                    },
                    Transform::from_xyz(
                        -half.x + FLAT_EDGE_INSET + LOGO_SIZE / 2.0,
                        half.y - FLAT_EDGE_INSET - LOGO_SIZE / 2.0,
                        0.5,
                    ),
                ));

                card_node.spawn((
                    BalanceText,
                    Text2d::new(BALANCE_TEXT),
                    TextFont {
                        font_size: BALANCE_FONT_SIZE,
                        ..default()
                    },
                    TextColor(palette.ink),
                    Transform::from_xyz(
                        half.x - FLAT_EDGE_INSET - BALANCE_TEXT_WIDTH / 2.0,
                        -half.y + FLAT_EDGE_INSET + BALANCE_FONT_SIZE / 2.0,
                        0.5,
                    ),
                ));

                card_node.spawn((
                    Sprite {
                        image: textures.tyb_logo.clone(),
                        custom_size: Some(TYB_LOGO_SIZE),
                        ..default()
                    },
                    Transform::from_xyz(
                        -half.x + FLAT_EDGE_INSET + TYB_LOGO_SIZE.x / 2.0,
                        -half.y + FLAT_EDGE_INSET + TYB_LOGO_SIZE.y / 2.0,
                        0.5,
                    ),
                ));

                for info in STICKER_CATALOG.iter() {
                    let placed = layer.get(info.id);
                    let rank = order.iter().position(|s| s.id == info.id);
                    let (translation, visibility) = match (placed, rank) {
                        (Some(placed), Some(rank)) => {
                            (flat_sticker_translation(placed, rank), Visibility::Inherited)
                        }
                        _ => (Vec3::ZERO, Visibility::Hidden),
                    };
                    card_node.spawn((
                        FlatSticker { id: info.id },
                        Sprite {
                            image: textures.sticker(info.id),
                            custom_size: Some(info.pixel_size),
                            ..default()
                        },
                        Transform::from_translation(translation),
                        visibility,
                        Name::new(info.id.to_string()),
                    ));
                }
            });
        });
}

/// Card-local translation of a sticker drawn at `rank` in paint order.
pub fn flat_sticker_translation(placed: &PlacedSticker, rank: usize) -> Vec3 {
    card_percent_to_local(placed.position, CARD_2D.size())
        .extend(STICKER_BASE_Z + rank as f32 * STICKER_Z_STEP)
}

/// Mirror the flat sticker layer and the selection onto the sprites.
pub fn sync_flat_stickers(
    layer: Res<Sticker2dLayer>,
    selection: Res<StickerSelection>,
    mut stickers: Query<(&FlatSticker, &mut Transform, &mut Visibility)>,
) {
    if !layer.is_changed() && !selection.is_changed() {
        return;
    }
    let order = layer.draw_order(&selection);
    for (marker, mut transform, mut visibility) in stickers.iter_mut() {
        let rank = order.iter().position(|s| s.id == marker.id);
        match (rank, layer.get(marker.id)) {
            (Some(rank), Some(placed)) => {
                *visibility = Visibility::Inherited;
                transform.translation = flat_sticker_translation(placed, rank);
                transform.scale = Vec3::splat(if placed.is_dragging {
                    DRAGGING_SCALE
                } else {
                    1.0
                });
            }
            _ => *visibility = Visibility::Hidden,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sticker_translation_maps_percent_to_card() {
        let placed = PlacedSticker {
            id: StickerId(1),
            position: Vec2::new(50.0, 50.0),
            size: Vec2::splat(12.0),
            z_index: 1,
            is_dragging: false,
        };
        let t = flat_sticker_translation(&placed, 0);
        assert!(t.x.abs() < 1e-3 && t.y.abs() < 1e-3);
        assert_eq!(t.z, STICKER_BASE_Z);

        let top_left = PlacedSticker {
            position: Vec2::new(8.0, 14.0),
            ..placed
        };
        let t = flat_sticker_translation(&top_left, 3);
        assert!(t.x < 0.0 && t.y > 0.0);
        assert!(t.z > STICKER_BASE_Z);
    }

    #[test]
    fn test_paint_order_matches_z() {
        let mut layer = StickerLayer::initial_2d();
        layer.bring_to_front(StickerId(1));
        let selection = StickerSelection::all();
        let order = layer.draw_order(&selection);
        let z: Vec<f32> = order
            .iter()
            .enumerate()
            .map(|(rank, s)| flat_sticker_translation(s, rank).z)
            .collect();
        assert!(z.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(order.last().map(|s| s.id), Some(StickerId(1)));
    }
}
