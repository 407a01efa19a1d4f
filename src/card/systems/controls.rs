//! Overlay controls
//!
//! The 2D/3D tab bar, the edit button and the theme and gyroscope toggles,
//! built with bevy_material_ui, plus the systems reacting to them and the
//! palette refresh when the theme changes.

use bevy::ecs::hierarchy::ChildSpawnerCommands;
use bevy::log::{debug, info};
use bevy::prelude::*;
use bevy::ui::FocusPolicy;
use bevy_material_ui::button::ButtonLabel;
use bevy_material_ui::prelude::{
    ButtonClickEvent, MaterialButtonBuilder, MaterialTab, MaterialTabs, MaterialTheme,
    TabChangeEvent, TabVariant,
};

use crate::card::systems::inventory::spawn_inventory_panel;
use crate::card::systems::pointer::{FlatDrag, SceneDrag};
use crate::card::textures::CardTextures;
use crate::card::types::*;

const OVERLAY_PADDING: f32 = 16.0;
const CONTROL_FONT_SIZE: f32 = 14.0;
const TAB_BAR_WIDTH: f32 = 200.0;

pub fn gyroscope_label(enabled: bool) -> &'static str {
    if enabled {
        "Gyroscope: On"
    } else {
        "Gyroscope: Off"
    }
}

// ============================================================================
// Setup
// ============================================================================

/// Spawn the overlay with the tab bar, the toggles, the edit button and the
/// sticker inventory.
#[allow(clippy::too_many_arguments)]
pub fn spawn_overlay_ui(
    mut commands: Commands,
    material_theme: Option<Res<MaterialTheme>>,
    mode: Res<ThemeMode>,
    card_color: Res<CardColor>,
    edit_mode: Res<EditMode>,
    active_view: Res<ActiveView>,
    gyro: Res<GyroscopeState>,
    textures: Res<CardTextures>,
    selection: Res<StickerSelection>,
) {
    let theme = material_theme.map(|t| t.clone()).unwrap_or_default();
    let palette = mode.palette(card_color.0);

    commands
        .spawn((
            OverlayRoot,
            Node {
                position_type: PositionType::Absolute,
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                justify_content: JustifyContent::SpaceBetween,
                padding: UiRect::all(Val::Px(OVERLAY_PADDING)),
                ..default()
            },
            Name::new("Overlay"),
        ))
        .with_children(|root| {
            root.spawn(Node {
                flex_direction: FlexDirection::Row,
                justify_content: JustifyContent::SpaceBetween,
                align_items: AlignItems::Center,
                ..default()
            })
            .with_children(|top| {
                spawn_view_tabs(top, &theme, *active_view);

                top.spawn(Node {
                    flex_direction: FlexDirection::Row,
                    column_gap: Val::Px(8.0),
                    ..default()
                })
                .with_children(|toggles| {
                    toggles
                        .spawn((
                            MaterialButtonBuilder::new(mode.toggle_label())
                                .outlined()
                                .build(&theme),
                            ThemeToggleButton,
                        ))
                        .with_children(|btn| {
                            btn.spawn((
                                Text::new(mode.toggle_label()),
                                TextFont {
                                    font_size: CONTROL_FONT_SIZE,
                                    ..default()
                                },
                                TextColor(theme.primary),
                                ButtonLabel,
                                ThemeToggleText,
                            ));
                        });

                    let gyro_visibility = if gyro.is_supported {
                        Visibility::Inherited
                    } else {
                        Visibility::Hidden
                    };
                    toggles
                        .spawn((
                            MaterialButtonBuilder::new(gyroscope_label(gyro.enabled))
                                .outlined()
                                .build(&theme),
                            GyroscopeToggleButton,
                        ))
                        .insert(gyro_visibility)
                        .with_children(|btn| {
                            btn.spawn((
                                Text::new(gyroscope_label(gyro.enabled)),
                                TextFont {
                                    font_size: CONTROL_FONT_SIZE,
                                    ..default()
                                },
                                TextColor(theme.primary),
                                ButtonLabel,
                                GyroscopeToggleText,
                            ));
                        });
                });
            });

            spawn_inventory_panel(
                root,
                &theme,
                &textures,
                &palette,
                &selection,
                edit_mode.is_editing,
            );

            root.spawn(Node {
                flex_direction: FlexDirection::Row,
                justify_content: JustifyContent::Center,
                ..default()
            })
            .with_children(|bottom| {
                bottom
                    .spawn((
                        MaterialButtonBuilder::new(edit_mode.button_label())
                            .filled()
                            .build(&theme),
                        EditButton,
                    ))
                    .with_children(|btn| {
                        btn.spawn((
                            Text::new(edit_mode.button_label()),
                            TextFont {
                                font_size: 16.0,
                                ..default()
                            },
                            TextColor(theme.on_primary),
                            ButtonLabel,
                            EditButtonText,
                        ));
                    });
            });
        });
}

fn spawn_view_tabs(parent: &mut ChildSpawnerCommands, theme: &MaterialTheme, active: ActiveView) {
    parent
        .spawn((
            MaterialTabs::new()
                .with_variant(TabVariant::Primary)
                .selected(active.index()),
            Node {
                width: Val::Px(TAB_BAR_WIDTH),
                flex_direction: FlexDirection::Row,
                align_items: AlignItems::Stretch,
                ..default()
            },
            BackgroundColor(theme.surface),
            BorderRadius::all(Val::Px(8.0)),
            ViewTabBar,
            ThemedPanel,
        ))
        .with_children(|tabs| {
            for view in [ActiveView::Flat, ActiveView::Scene] {
                let selected = view == active;
                tabs.spawn((
                    MaterialTab::new(view.index(), view.label()).selected(selected),
                    Button,
                    Node {
                        flex_grow: 1.0,
                        padding: UiRect::axes(Val::Px(16.0), Val::Px(10.0)),
                        justify_content: JustifyContent::Center,
                        ..default()
                    },
                    BackgroundColor(Color::NONE),
                    ViewTabButton { view },
                ))
                .with_children(|tab| {
                    tab.spawn((
                        Text::new(view.label()),
                        TextFont {
                            font_size: CONTROL_FONT_SIZE,
                            ..default()
                        },
                        TextColor(if selected {
                            theme.primary
                        } else {
                            theme.on_surface_variant
                        }),
                    ));
                });
            }
        });
}

/// Make sure every `Button` can receive clicks.
pub fn ensure_buttons_have_interaction(
    mut commands: Commands,
    missing_interaction: Query<Entity, (With<Button>, Without<Interaction>)>,
    missing_focus_policy: Query<Entity, (With<Button>, Without<FocusPolicy>)>,
) {
    for entity in missing_interaction.iter() {
        commands.entity(entity).insert(Interaction::None);
    }

    for entity in missing_focus_policy.iter() {
        commands.entity(entity).insert(FocusPolicy::Block);
    }
}

// ============================================================================
// Edit button
// ============================================================================

/// Enter edit mode, or save and leave it.
pub fn handle_edit_button(
    mut click_events: MessageReader<ButtonClickEvent>,
    buttons: Query<(), With<EditButton>>,
    mut edit_mode: ResMut<EditMode>,
    mut transition: ResMut<EditLabelTransition>,
    mut flat_layer: ResMut<Sticker2dLayer>,
    mut scene_layer: ResMut<Sticker3dLayer>,
    mut flat_drag: ResMut<FlatDrag>,
    mut scene_drag: ResMut<SceneDrag>,
) {
    for event in click_events.read() {
        if buttons.get(event.entity).is_err() {
            continue;
        }

        edit_mode.press_button();
        transition.start();
        if !edit_mode.is_editing {
            flat_drag.finish();
            scene_drag.finish();
            flat_layer.end_all_drags();
            scene_layer.end_all_drags();
        }
        info!("Edit mode: {}", edit_mode.is_editing);
    }
}

pub fn update_edit_button_label(
    time: Res<Time>,
    edit_mode: Res<EditMode>,
    mut transition: ResMut<EditLabelTransition>,
    mut texts: Query<(&mut Text, &mut TextColor), With<EditButtonText>>,
) {
    if !edit_mode.is_changed() && !transition.is_active() {
        return;
    }
    transition.tick(time.delta_secs());
    let alpha = transition.label_alpha();
    for (mut text, mut color) in texts.iter_mut() {
        if text.0 != edit_mode.button_label() {
            **text = edit_mode.button_label().to_string();
        }
        color.0.set_alpha(alpha);
    }
}

// ============================================================================
// View tabs
// ============================================================================

/// Switch the active view from the tab bar.
pub fn handle_view_tabs(
    mut tab_events: MessageReader<TabChangeEvent>,
    tabs: Query<&ViewTabButton>,
    mut active_view: ResMut<ActiveView>,
) {
    for event in tab_events.read() {
        if let Ok(tab) = tabs.get(event.tab_entity) {
            if *active_view != tab.view {
                *active_view = tab.view;
            }
        }
    }
}

/// Keep the tab bar in step with [`ActiveView`].
pub fn sync_view_tabs(
    active_view: Res<ActiveView>,
    material_theme: Option<Res<MaterialTheme>>,
    mut bars: Query<&mut MaterialTabs, With<ViewTabBar>>,
    mut tabs: Query<(&ViewTabButton, &mut MaterialTab, &Children)>,
    mut texts: Query<&mut TextColor>,
) {
    if !active_view.is_changed() {
        return;
    }
    let theme = material_theme.map(|t| t.clone()).unwrap_or_default();
    let selected = active_view.index();

    for mut bar in bars.iter_mut() {
        bar.selected = selected;
    }
    for (tab, mut material_tab, children) in tabs.iter_mut() {
        let is_selected = tab.view.index() == selected;
        material_tab.selected = is_selected;
        for child in children.iter() {
            if let Ok(mut color) = texts.get_mut(child) {
                color.0 = if is_selected {
                    theme.primary
                } else {
                    theme.on_surface_variant
                };
            }
        }
    }
}

// ============================================================================
// Theme toggle
// ============================================================================

pub fn handle_theme_toggle(
    mut click_events: MessageReader<ButtonClickEvent>,
    buttons: Query<(), With<ThemeToggleButton>>,
    mut fade: ResMut<ThemeToggleFade>,
) {
    for event in click_events.read() {
        if buttons.get(event.entity).is_ok() && fade.start() {
            debug!("Theme toggle pressed");
        }
    }
}

/// Run the toggle fade and flip [`ThemeMode`] once the label has faded out.
pub fn update_theme_toggle_label(
    time: Res<Time>,
    mut mode: ResMut<ThemeMode>,
    mut fade: ResMut<ThemeToggleFade>,
    mut texts: Query<(&mut Text, &mut TextColor), With<ThemeToggleText>>,
) {
    if !mode.is_changed() && !fade.is_active() {
        return;
    }
    if fade.tick(time.delta_secs()) {
        *mode = mode.toggled();
        info!("Theme: {:?}", *mode);
    }
    let alpha = fade.label_alpha();
    for (mut text, mut color) in texts.iter_mut() {
        if text.0 != mode.toggle_label() {
            **text = mode.toggle_label().to_string();
        }
        color.0.set_alpha(alpha);
    }
}

/// Push the palette to the clear color, both cards and the panels.
#[allow(clippy::type_complexity)]
pub fn apply_palette(
    mode: Res<ThemeMode>,
    card_color: Res<CardColor>,
    mut clear_color: ResMut<ClearColor>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut surfaces: Query<&mut Sprite, With<FlatCardSurface>>,
    bodies: Query<&MeshMaterial3d<StandardMaterial>, With<SceneCardBody>>,
    mut panels: Query<(&mut BackgroundColor, Option<&mut BorderColor>), With<ThemedPanel>>,
    mut balance: Query<&mut TextColor, With<BalanceText>>,
) {
    if !mode.is_changed() && !card_color.is_changed() {
        return;
    }
    let palette = mode.palette(card_color.0);

    clear_color.0 = palette.background;
    for mut sprite in surfaces.iter_mut() {
        sprite.color = palette.card;
    }
    for material in bodies.iter() {
        if let Some(material) = materials.get_mut(&material.0) {
            material.base_color = palette.card;
        }
    }
    for (mut background, border) in panels.iter_mut() {
        background.0 = palette.panel;
        if let Some(mut border) = border {
            *border = BorderColor::all(palette.panel_border);
        }
    }
    for mut color in balance.iter_mut() {
        color.0 = palette.ink;
    }
}

// ============================================================================
// Gyroscope toggle
// ============================================================================

pub fn handle_gyroscope_toggle(
    mut click_events: MessageReader<ButtonClickEvent>,
    buttons: Query<(), With<GyroscopeToggleButton>>,
    mut gyro: ResMut<GyroscopeState>,
) {
    for event in click_events.read() {
        if buttons.get(event.entity).is_err() {
            continue;
        }
        gyro.enabled = !gyro.enabled;
        info!("Gyroscope enabled: {}", gyro.enabled);
    }
}

/// Show the toggle only for supported sources and keep its label current.
pub fn sync_gyroscope_toggle(
    gyro: Res<GyroscopeState>,
    mut buttons: Query<&mut Visibility, With<GyroscopeToggleButton>>,
    mut texts: Query<&mut Text, With<GyroscopeToggleText>>,
) {
    if !gyro.is_changed() {
        return;
    }
    let visibility = if gyro.is_supported {
        Visibility::Inherited
    } else {
        Visibility::Hidden
    };
    for mut v in buttons.iter_mut() {
        v.set_if_neq(visibility);
    }
    let label = gyroscope_label(gyro.enabled);
    for mut text in texts.iter_mut() {
        if text.0 != label {
            **text = label.to_string();
        }
    }
}
