//! 3D card view
//!
//! An extruded rounded slab with the logo, the balance and the sticker quads
//! lying on its front face. Sticker positions come from [`Sticker3dLayer`] in
//! world units relative to the card center.

use bevy::prelude::*;

use crate::card::meshes::{
    create_balance_text_mesh, create_rounded_card_mesh, create_rounded_plane_mesh,
    CARD_CORNER_RADIUS,
};
use crate::card::textures::CardTextures;
use crate::card::types::*;

/// Offset of the asset layer above the front face.
pub const ASSET_LAYER_OFFSET: f32 = 0.01;

const LOGO_SIZE: f32 = 3.2;
const LOGO_CORNER_RADIUS: f32 = 0.3;
const LOGO_POSITION: Vec2 = Vec2::new(-7.5, 4.2);
const BALANCE_FONT_SIZE: f32 = 1.2;
// Right edge and baseline of the balance text.
const BALANCE_ANCHOR: Vec2 = Vec2::new(8.2, -4.2);

const STICKER_Z_STEP: f32 = 0.002;
const DRAGGING_OPACITY: f32 = 0.9;
const RING_INNER: f32 = 0.6;
const RING_OUTER: f32 = 0.7;

/// Transform offsets of a sticker for its peel and hover animation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StickerPose {
    pub lift: f32,
    pub rotation_z: f32,
    pub scale: f32,
}

impl StickerPose {
    pub const FLAT: Self = Self {
        lift: 0.0,
        rotation_z: 0.0,
        scale: 1.0,
    };
}

/// Pose of a sticker this frame.
///
/// Dragged stickers peel up. While editing the others bob gently; outside
/// edit mode they lie flat.
pub fn sticker_pose(peel: &StickerPeel, dragging: bool, editing: bool, elapsed: f32) -> StickerPose {
    let mut pose = if dragging || peel.is_visible() {
        StickerPose {
            lift: peel.lift(),
            rotation_z: peel.rotation_z(),
            scale: peel.scale(),
        }
    } else {
        StickerPose::FLAT
    };

    if !dragging {
        if editing {
            pose.lift = hover_bob(elapsed);
        } else {
            pose = StickerPose::FLAT;
        }
    }
    pose
}

pub fn spawn_scene_card(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    textures: Res<CardTextures>,
    layer: Res<Sticker3dLayer>,
    selection: Res<StickerSelection>,
    theme: Res<ThemeMode>,
    card_color: Res<CardColor>,
    active_view: Res<ActiveView>,
    edit_mode: Res<EditMode>,
) {
    let palette = theme.palette(card_color.0);
    let card = CARD_3D;
    let view_visibility = if *active_view == ActiveView::Scene {
        Visibility::Visible
    } else {
        Visibility::Hidden
    };

    let body_mesh = meshes.add(create_rounded_card_mesh(
        card.width,
        card.height,
        CARD_CORNER_RADIUS,
        card.thickness,
    ));
    let body_material = materials.add(StandardMaterial {
        base_color: palette.card,
        perceptual_roughness: 0.1,
        metallic: 0.1,
        ..default()
    });

    let logo_mesh = meshes.add(create_rounded_plane_mesh(
        LOGO_SIZE,
        LOGO_SIZE,
        LOGO_CORNER_RADIUS,
    ));
    let logo_material = materials.add(StandardMaterial {
        base_color_texture: Some(textures.logo.clone()),
        alpha_mode: AlphaMode::Blend,
        perceptual_roughness: 0.4,
        ..default()
    });

    let balance_mesh = meshes.add(create_balance_text_mesh(BALANCE_TEXT, BALANCE_FONT_SIZE));
    let balance_material = materials.add(StandardMaterial {
        base_color: palette.ink,
        unlit: true,
        ..default()
    });

    let ring_material = materials.add(StandardMaterial {
        base_color: Color::srgba(1.0, 1.0, 1.0, 0.5),
        alpha_mode: AlphaMode::Blend,
        unlit: true,
        cull_mode: None,
        ..default()
    });
    let ring_visibility = if edit_mode.is_editing {
        Visibility::Inherited
    } else {
        Visibility::Hidden
    };

    let order = layer.draw_order(&selection);

    commands
        .spawn((
            SceneViewRoot,
            Transform::default(),
            view_visibility,
            Name::new("SceneView"),
        ))
        .with_children(|view| {
            view.spawn((SceneCardGroup, Transform::default(), Visibility::Inherited))
                .with_children(|group| {
                    group.spawn((
                        SceneCardBody,
                        Mesh3d(body_mesh),
                        MeshMaterial3d(body_material),
                        Transform::default(),
                        Name::new("CardBody"),
                    ));

                    group
                        .spawn((
                            SceneAssetLayer,
                            Transform::from_xyz(0.0, 0.0, card.thickness / 2.0 + ASSET_LAYER_OFFSET),
                            Visibility::Inherited,
                        ))
                        .with_children(|face| {
                            face.spawn((
                                Mesh3d(logo_mesh),
                                MeshMaterial3d(logo_material),
                                Transform::from_translation(LOGO_POSITION.extend(0.0)),
                                Name::new("Logo"),
                            ));

                            face.spawn((
                                BalanceText,
                                Mesh3d(balance_mesh),
                                MeshMaterial3d(balance_material),
                                Transform::from_translation(BALANCE_ANCHOR.extend(0.0)),
                                Name::new("Balance"),
                            ));

                            for info in STICKER_CATALOG.iter() {
                                let Some(placed) = layer.get(info.id) else {
                                    continue;
                                };
                                let rank = order.iter().position(|s| s.id == info.id);
                                let translation = scene_sticker_translation(placed, rank.unwrap_or(0));
                                let visibility = if rank.is_some() {
                                    Visibility::Inherited
                                } else {
                                    Visibility::Hidden
                                };
                                let quad = meshes.add(Rectangle::new(placed.size.x, placed.size.y));
                                let material = materials.add(StandardMaterial {
                                    base_color_texture: Some(textures.sticker(info.id)),
                                    alpha_mode: AlphaMode::Blend,
                                    ..default()
                                });
                                let ring = meshes.add(Annulus::new(
                                    placed.size.x * RING_INNER,
                                    placed.size.x * RING_OUTER,
                                ));

                                face.spawn((
                                    SceneSticker { id: info.id },
                                    StickerPeel::default(),
                                    Mesh3d(quad),
                                    MeshMaterial3d(material),
                                    Transform::from_translation(translation),
                                    visibility,
                                    Name::new(info.id.to_string()),
                                ))
                                .with_children(|sticker| {
                                    sticker.spawn((
                                        SceneStickerRing,
                                        Mesh3d(ring),
                                        MeshMaterial3d(ring_material.clone()),
                                        Transform::from_xyz(0.0, 0.0, 0.001),
                                        ring_visibility,
                                    ));
                                });
                            }
                        });
                });
        });
}

/// Translation of a sticker within the asset layer at paint `rank`.
pub fn scene_sticker_translation(placed: &PlacedSticker, rank: usize) -> Vec3 {
    placed.position.extend(rank as f32 * STICKER_Z_STEP)
}

/// Follow the 3D layer and the selection, animate peel and hover, and show
/// the edit rings.
pub fn sync_scene_stickers(
    time: Res<Time>,
    edit_mode: Res<EditMode>,
    layer: Res<Sticker3dLayer>,
    selection: Res<StickerSelection>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut stickers: Query<(
        &SceneSticker,
        &mut StickerPeel,
        &mut Transform,
        &mut Visibility,
        &MeshMaterial3d<StandardMaterial>,
    )>,
    mut rings: Query<&mut Visibility, (With<SceneStickerRing>, Without<SceneSticker>)>,
) {
    let order = layer.draw_order(&selection);
    let dt = time.delta_secs();
    let elapsed = time.elapsed_secs();

    for (marker, mut peel, mut transform, mut visibility, material) in stickers.iter_mut() {
        let rank = order.iter().position(|s| s.id == marker.id);
        let (Some(rank), Some(placed)) = (rank, layer.get(marker.id)) else {
            *visibility = Visibility::Hidden;
            continue;
        };
        *visibility = Visibility::Inherited;

        let dragging = placed.is_dragging && edit_mode.is_editing;
        peel.step(dragging, dt);
        let pose = sticker_pose(&peel, dragging, edit_mode.is_editing, elapsed);

        let base = scene_sticker_translation(placed, rank);
        transform.translation = base + Vec3::Z * pose.lift;
        transform.rotation = Quat::from_rotation_z(pose.rotation_z);
        transform.scale = Vec3::splat(pose.scale);

        let alpha = if dragging { DRAGGING_OPACITY } else { 1.0 };
        let stale = materials
            .get(&material.0)
            .is_some_and(|m| m.base_color.alpha() != alpha);
        if stale {
            if let Some(m) = materials.get_mut(&material.0) {
                m.base_color.set_alpha(alpha);
            }
        }
    }

    if edit_mode.is_changed() {
        let ring_visibility = if edit_mode.is_editing {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        };
        for mut visibility in rings.iter_mut() {
            *visibility = ring_visibility;
        }
    }
}
