// Hide console window on Windows for release builds (GUI app).
#![cfg_attr(all(windows, not(debug_assertions)), windows_subsystem = "windows")]

use std::path::PathBuf;

use bevy::log::{info, warn};
use bevy::prelude::*;
use bevy_material_ui::prelude::MaterialUiPlugin;
use clap::{Parser, ValueEnum};

use sticker_card::card::{
    apply_palette, build_source, detect_orientation_support, drag_flat_stickers,
    drag_scene_stickers, ensure_buttons_have_interaction, handle_edit_button,
    handle_gyroscope_toggle, handle_inventory_clicks, handle_theme_toggle, handle_view_tabs,
    highlight_selected_items, load_card_textures, setup_cameras_and_lights, spawn_flat_card,
    spawn_overlay_ui, spawn_scene_card, sync_active_view, sync_flat_stickers, sync_gyroscope_toggle,
    sync_scene_stickers, sync_view_tabs, update_edit_button_label, update_inventory_reveal,
    update_pointer_state, update_theme_toggle_label, CardColor, CardConfig, EditLabelTransition,
    EditMode, FlatDrag, GyroscopeState, InventoryReveal, OrientationPlugin, OrientationSetting,
    SceneDrag, Sticker2dLayer, Sticker3dLayer, StickerLayer, ThemeSetting, ThemeToggleFade,
    TiltBlend, ViewSetting,
};

const DEFAULT_LOG_FILTER: &str = "info,wgpu=error,bevy_material_ui=warn,bevy_material_ui::scroll=off";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ViewArg {
    #[value(name = "2d")]
    Flat,
    #[value(name = "3d")]
    Scene,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ThemeArg {
    Light,
    Dark,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OrientationArg {
    None,
    Pointer,
    Sway,
    Replay,
}

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Sticker Card - customizable card with draggable stickers in 2D and 3D"
)]
struct Cli {
    /// Initial view
    #[arg(long, value_enum)]
    view: Option<ViewArg>,

    /// Start in edit mode
    #[arg(long)]
    edit: bool,

    /// Orientation source driving the card tilt
    #[arg(long, value_enum)]
    orientation: Option<OrientationArg>,

    /// RON file of orientation samples (implies --orientation replay)
    #[arg(long)]
    replay: Option<PathBuf>,

    /// Path to a RON card configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Color theme
    #[arg(long, value_enum)]
    theme: Option<ThemeArg>,

    /// Log filter (tracing env-filter syntax)
    #[arg(long, default_value = DEFAULT_LOG_FILTER)]
    log_filter: String,
}

/// Fold command line flags over the loaded configuration.
fn apply_cli_overrides(cli: &Cli, config: &mut CardConfig) {
    if let Some(view) = cli.view {
        config.view = match view {
            ViewArg::Flat => ViewSetting::Flat,
            ViewArg::Scene => ViewSetting::Scene,
        };
    }

    if let Some(theme) = cli.theme {
        config.theme = match theme {
            ThemeArg::Light => ThemeSetting::Light,
            ThemeArg::Dark => ThemeSetting::Dark,
        };
    }

    let replay_path = cli
        .replay
        .as_ref()
        .map(|p| p.to_string_lossy().into_owned());
    match (cli.orientation, replay_path) {
        (Some(OrientationArg::None), _) => config.orientation = OrientationSetting::None,
        (Some(OrientationArg::Pointer), _) => config.orientation = OrientationSetting::Pointer,
        (Some(OrientationArg::Sway), _) => config.orientation = OrientationSetting::Sway,
        (Some(OrientationArg::Replay) | None, Some(path)) => {
            config.orientation = OrientationSetting::Replay(path)
        }
        (Some(OrientationArg::Replay), None) => {
            if !matches!(config.orientation, OrientationSetting::Replay(_)) {
                warn!("--orientation replay needs --replay <file>; orientation disabled");
                config.orientation = OrientationSetting::None;
            }
        }
        (None, None) => {}
    }
}

fn main() {
    let cli = Cli::parse();

    let mut app = App::new();
    app.add_plugins(
        DefaultPlugins
            .set(WindowPlugin {
                primary_window: Some(Window {
                    title: "Sticker Card".to_string(),
                    resolution: (1280u32, 720u32).into(),
                    ..default()
                }),
                ..default()
            })
            .set(bevy::log::LogPlugin {
                level: bevy::log::Level::INFO,
                filter: cli.log_filter.clone(),
                ..default()
            }),
    )
    .add_plugins(MaterialUiPlugin)
    .add_plugins(OrientationPlugin);

    // Logging is live from here on, so config warnings are visible.
    let mut config = CardConfig::load_or_default(cli.config.as_deref());
    apply_cli_overrides(&cli, &mut config);

    let mut flat_layer = StickerLayer::initial_2d();
    config.apply_flat_positions(&mut flat_layer);
    let mut scene_layer = StickerLayer::initial_3d();
    config.apply_scene_positions(&mut scene_layer);

    let card_color = config.card_color();
    let theme = config.theme.to_mode();
    let view = config.view.to_view();
    info!(
        "Starting in {} view, {:?} theme, editing: {}",
        view.label(),
        theme,
        cli.edit
    );

    app.insert_resource(Sticker2dLayer(flat_layer))
        .insert_resource(Sticker3dLayer(scene_layer))
        .insert_resource(config.selection())
        .insert_resource(CardColor(card_color))
        .insert_resource(ClearColor(theme.palette(card_color).background))
        .insert_resource(theme)
        .insert_resource(view)
        .insert_resource(EditMode {
            is_editing: cli.edit,
        })
        .insert_resource(TiltBlend::at(if cli.edit { 0.0 } else { 1.0 }))
        .insert_resource(GyroscopeState {
            enabled: config.gyroscope_enabled,
            ..default()
        })
        .insert_resource(build_source(&config.orientation))
        .insert_resource(FlatDrag::default())
        .insert_resource(SceneDrag::default())
        .insert_resource(EditLabelTransition::default())
        .insert_resource(ThemeToggleFade::default())
        .insert_resource(InventoryReveal::default())
        // Ensure UI Buttons spawned without ButtonBundle still receive click events
        .add_systems(PreUpdate, ensure_buttons_have_interaction)
        .add_systems(
            Startup,
            (
                load_card_textures,
                setup_cameras_and_lights,
                spawn_flat_card,
                spawn_scene_card,
                spawn_overlay_ui.after(detect_orientation_support),
            )
                .chain(),
        )
        .add_systems(
            Update,
            (
                // Input and UI focus are settled in PreUpdate.
                update_pointer_state,
                (
                    handle_edit_button,
                    handle_view_tabs,
                    handle_theme_toggle,
                    handle_gyroscope_toggle,
                    handle_inventory_clicks,
                ),
                (sync_active_view, drag_flat_stickers, drag_scene_stickers),
                (
                    sync_flat_stickers,
                    sync_scene_stickers,
                    apply_palette,
                    sync_view_tabs,
                    sync_gyroscope_toggle,
                    update_edit_button_label,
                    update_theme_toggle_label,
                    update_inventory_reveal,
                    highlight_selected_items,
                ),
            )
                .chain(),
        )
        .run();
}
