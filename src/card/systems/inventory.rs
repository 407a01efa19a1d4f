//! Sticker inventory panel
//!
//! Shown while editing. Each entry toggles one sticker on both cards; entries
//! appear one after another when the panel opens.

use bevy::ecs::hierarchy::ChildSpawnerCommands;
use bevy::log::info;
use bevy::prelude::*;
use bevy_material_ui::button::ButtonLabel;
use bevy_material_ui::prelude::{ButtonClickEvent, MaterialButtonBuilder, MaterialTheme};

use crate::card::textures::CardTextures;
use crate::card::types::*;

const PANEL_WIDTH: f32 = 180.0;
const THUMBNAIL_SIZE: f32 = 28.0;
const CHECK_SIZE: f32 = 10.0;

pub fn spawn_inventory_panel(
    parent: &mut ChildSpawnerCommands,
    theme: &MaterialTheme,
    textures: &CardTextures,
    palette: &Palette,
    selection: &StickerSelection,
    is_editing: bool,
) {
    let visibility = if is_editing {
        Visibility::Inherited
    } else {
        Visibility::Hidden
    };

    parent
        .spawn((
            InventoryPanel,
            ThemedPanel,
            Node {
                position_type: PositionType::Absolute,
                right: Val::Px(16.0),
                top: Val::Px(72.0),
                width: Val::Px(PANEL_WIDTH),
                flex_direction: FlexDirection::Column,
                row_gap: Val::Px(4.0),
                padding: UiRect::all(Val::Px(8.0)),
                border: UiRect::all(Val::Px(1.0)),
                ..default()
            },
            BackgroundColor(palette.panel),
            BorderColor::all(palette.panel_border),
            BorderRadius::all(Val::Px(12.0)),
            visibility,
            Name::new("Inventory"),
        ))
        .with_children(|panel| {
            panel.spawn((
                Text::new("Stickers"),
                TextFont {
                    font_size: 16.0,
                    ..default()
                },
                TextColor(theme.on_surface),
            ));

            for (index, info) in STICKER_CATALOG.iter().enumerate() {
                panel
                    .spawn((
                        MaterialButtonBuilder::new(info.alt).text().build(theme),
                        InventoryItem { id: info.id, index },
                    ))
                    .insert((
                        Node {
                            flex_direction: FlexDirection::Row,
                            align_items: AlignItems::Center,
                            column_gap: Val::Px(8.0),
                            padding: UiRect::axes(Val::Px(6.0), Val::Px(4.0)),
                            ..default()
                        },
                        Visibility::Hidden,
                    ))
                    .with_children(|item| {
                        item.spawn((
                            ImageNode::new(textures.sticker(info.id)),
                            Node {
                                width: Val::Px(THUMBNAIL_SIZE),
                                height: Val::Px(THUMBNAIL_SIZE),
                                ..default()
                            },
                        ));
                        item.spawn((
                            ButtonLabel,
                            Text::new(info.alt),
                            TextFont {
                                font_size: 13.0,
                                ..default()
                            },
                            TextColor(theme.on_surface_variant),
                        ));
                        item.spawn((
                            InventoryCheck { id: info.id },
                            Node {
                                width: Val::Px(CHECK_SIZE),
                                height: Val::Px(CHECK_SIZE),
                                margin: UiRect::left(Val::Auto),
                                ..default()
                            },
                            BackgroundColor(check_color(palette, selection.is_selected(info.id))),
                            BorderRadius::all(Val::Px(CHECK_SIZE / 2.0)),
                        ));
                    });
            }
        });
}

fn check_color(palette: &Palette, selected: bool) -> Color {
    if selected {
        palette.accent
    } else {
        Color::NONE
    }
}

/// Show the panel while editing and reveal its entries one by one.
pub fn update_inventory_reveal(
    time: Res<Time>,
    edit_mode: Res<EditMode>,
    mut reveal: ResMut<InventoryReveal>,
    mut panels: Query<&mut Visibility, With<InventoryPanel>>,
    mut items: Query<(&InventoryItem, &mut Visibility), Without<InventoryPanel>>,
) {
    let open_for = if edit_mode.is_editing {
        Some(reveal.open_for.map_or(0.0, |t| t + time.delta_secs()))
    } else {
        None
    };
    if open_for == reveal.open_for && !edit_mode.is_changed() {
        return;
    }
    reveal.open_for = open_for;

    let panel_visibility = if edit_mode.is_editing {
        Visibility::Inherited
    } else {
        Visibility::Hidden
    };
    for mut visibility in panels.iter_mut() {
        visibility.set_if_neq(panel_visibility);
    }
    for (item, mut visibility) in items.iter_mut() {
        let shown = if reveal.item_visible(item.index) {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        };
        visibility.set_if_neq(shown);
    }
}

/// Toggle a sticker when its inventory entry is clicked.
pub fn handle_inventory_clicks(
    mut click_events: MessageReader<ButtonClickEvent>,
    items: Query<&InventoryItem>,
    mut selection: ResMut<StickerSelection>,
) {
    for event in click_events.read() {
        let Ok(item) = items.get(event.entity) else {
            continue;
        };
        let selected = selection.toggle(item.id);
        info!("{} {}", item.id, if selected { "shown" } else { "hidden" });
    }
}

/// Highlight the entries of selected stickers.
pub fn highlight_selected_items(
    selection: Res<StickerSelection>,
    mode: Res<ThemeMode>,
    card_color: Res<CardColor>,
    mut checks: Query<(&InventoryCheck, &mut BackgroundColor)>,
) {
    if !selection.is_changed() && !mode.is_changed() {
        return;
    }
    let palette = mode.palette(card_color.0);
    for (check, mut background) in checks.iter_mut() {
        background.0 = check_color(&palette, selection.is_selected(check.id));
    }
}
