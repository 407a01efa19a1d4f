//! Startup configuration
//!
//! Configuration is read once from an optional RON file; nothing is written
//! back. Every field has a default so partial files are accepted.

use std::path::Path;

use bevy::log::{info, warn};
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use super::sticker::{StickerId, StickerSelection, StickerLayer, STICKER_CATALOG};
use super::ui::{ActiveView, ThemeMode};

/// Default card body color.
pub const DEFAULT_CARD_COLOR: &str = "#f6fbc7";

/// View setting as written in the config file.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum ViewSetting {
    #[default]
    #[serde(rename = "flat")]
    Flat,
    #[serde(rename = "scene")]
    Scene,
}

impl ViewSetting {
    pub fn to_view(self) -> ActiveView {
        match self {
            Self::Flat => ActiveView::Flat,
            Self::Scene => ActiveView::Scene,
        }
    }
}

/// Theme setting as written in the config file.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum ThemeSetting {
    #[default]
    #[serde(rename = "light")]
    Light,
    #[serde(rename = "dark")]
    Dark,
}

impl ThemeSetting {
    pub fn to_mode(self) -> ThemeMode {
        match self {
            Self::Light => ThemeMode::Light,
            Self::Dark => ThemeMode::Dark,
        }
    }
}

/// Orientation source as written in the config file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub enum OrientationSetting {
    #[serde(rename = "none")]
    None,
    #[default]
    #[serde(rename = "pointer")]
    Pointer,
    #[serde(rename = "sway")]
    Sway,
    #[serde(rename = "replay")]
    Replay(String),
}

/// Starting position of one sticker.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StickerPositionSetting {
    pub sticker: u8,
    pub x: f32,
    pub y: f32,
}

/// Startup configuration (RON).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardConfig {
    #[serde(default)]
    pub view: ViewSetting,

    #[serde(default)]
    pub theme: ThemeSetting,

    #[serde(default = "default_gyroscope_enabled")]
    pub gyroscope_enabled: bool,

    #[serde(default)]
    pub orientation: OrientationSetting,

    /// Stickers shown initially, as `sticker-N` ids. Defaults to all.
    #[serde(default = "default_selected_stickers")]
    pub selected_stickers: Vec<String>,

    /// Flat card positions, in percent of the card.
    #[serde(default)]
    pub flat_positions: Vec<StickerPositionSetting>,

    /// 3D card positions, in world units from the card center.
    #[serde(default)]
    pub scene_positions: Vec<StickerPositionSetting>,

    /// CSS color of the card body.
    #[serde(default = "default_card_color")]
    pub card_color: String,
}

fn default_gyroscope_enabled() -> bool {
    true
}

fn default_selected_stickers() -> Vec<String> {
    STICKER_CATALOG.iter().map(|s| s.id.to_string()).collect()
}

fn default_card_color() -> String {
    DEFAULT_CARD_COLOR.to_string()
}

impl Default for CardConfig {
    fn default() -> Self {
        Self {
            view: ViewSetting::default(),
            theme: ThemeSetting::default(),
            gyroscope_enabled: default_gyroscope_enabled(),
            orientation: OrientationSetting::default(),
            selected_stickers: default_selected_stickers(),
            flat_positions: Vec::new(),
            scene_positions: Vec::new(),
            card_color: default_card_color(),
        }
    }
}

impl CardConfig {
    pub fn parse(text: &str) -> Result<Self, String> {
        ron::from_str::<CardConfig>(text).map_err(|e| format!("Invalid card config: {}", e))
    }

    pub fn load_from_file(path: &Path) -> Result<Self, String> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
        let config = Self::parse(&text)?;
        info!("Loaded card config from {}", path.display());
        Ok(config)
    }

    /// Load `path` if given, falling back to defaults on any error.
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::default();
        };
        match Self::load_from_file(path) {
            Ok(config) => config,
            Err(e) => {
                warn!("{}; using defaults", e);
                Self::default()
            }
        }
    }

    /// Card body color, falling back to the default on unparsable input.
    pub fn card_color(&self) -> Color {
        parse_css_color(&self.card_color).unwrap_or_else(|e| {
            warn!("{}; using {}", e, DEFAULT_CARD_COLOR);
            parse_css_color(DEFAULT_CARD_COLOR).unwrap_or(Color::WHITE)
        })
    }

    /// Initial selection; unknown ids are skipped with a warning.
    pub fn selection(&self) -> StickerSelection {
        StickerSelection::from_ids(self.selected_stickers.iter().filter_map(|raw| {
            let id = StickerId::parse(raw);
            if id.is_none() {
                warn!("Unknown sticker id in config: {}", raw);
            }
            id
        }))
    }

    pub fn apply_flat_positions(&self, layer: &mut StickerLayer) {
        layer.apply_offsets(positions(&self.flat_positions));
    }

    pub fn apply_scene_positions(&self, layer: &mut StickerLayer) {
        layer.apply_offsets(positions(&self.scene_positions));
    }
}

fn positions(settings: &[StickerPositionSetting]) -> Vec<(StickerId, Vec2)> {
    settings
        .iter()
        .filter_map(|p| {
            let id = StickerId(p.sticker);
            id.info().map(|_| (id, Vec2::new(p.x, p.y)))
        })
        .collect()
}

/// Parse any CSS color (`#rgb`, `#rrggbb`, `rgb(...)`, names).
pub fn parse_css_color(input: &str) -> Result<Color, String> {
    let c = csscolorparser::parse(input.trim())
        .map_err(|e| format!("Invalid color '{}': {}", input, e))?;
    Ok(Color::srgba(c.r, c.g, c.b, c.a))
}

/// Card body color currently in use.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct CardColor(pub Color);

impl Default for CardColor {
    fn default() -> Self {
        Self(parse_css_color(DEFAULT_CARD_COLOR).unwrap_or(Color::WHITE))
    }
}
