//! Sticker catalog and the per-view sticker layer
//!
//! A [`StickerLayer`] owns every placed sticker of one render mode. All
//! position writes go through the layer so stickers can never leave the card,
//! and every touch promotes the sticker to the top of the z-order.

use std::collections::HashSet;
use std::fmt;

use bevy::prelude::*;

use super::geometry::{
    clamp_world_drag, fit_sticker_size, moved_enough, CardDimensions, StickerBounds, CARD_2D,
    CARD_3D,
};

/// Identifier of a catalog sticker (1-based).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StickerId(pub u8);

impl fmt::Display for StickerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sticker-{}", self.0)
    }
}

impl StickerId {
    /// Parse `sticker-N` (or a bare `N`).
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        let number = s.strip_prefix("sticker-").unwrap_or(s);
        let n: u8 = number.parse().ok()?;
        STICKER_CATALOG
            .iter()
            .any(|info| info.id.0 == n)
            .then_some(StickerId(n))
    }

    pub fn info(&self) -> Option<&'static StickerInfo> {
        STICKER_CATALOG.iter().find(|info| info.id == *self)
    }
}

/// Static description of a sticker in the inventory.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StickerInfo {
    pub id: StickerId,
    pub asset_path: &'static str,
    pub alt: &'static str,
    /// Size on the flat card, in logical pixels.
    pub pixel_size: Vec2,
    /// Maximum size on the 3D card, in world units.
    pub max_world_size: Vec2,
    /// Known aspect ratio of the artwork, if not square.
    pub aspect_ratio: Option<f32>,
}

impl StickerInfo {
    pub fn world_size(&self) -> Vec2 {
        fit_sticker_size(
            self.max_world_size.x,
            self.max_world_size.y,
            self.aspect_ratio,
        )
    }
}

const SQUARE_PX: Vec2 = Vec2::new(60.0, 60.0);
const DEFAULT_WORLD_MAX: Vec2 = Vec2::new(6.0, 2.0);

pub const STICKER_CATALOG: [StickerInfo; 7] = [
    StickerInfo {
        id: StickerId(1),
        asset_path: "stickers/sticker-01.png",
        alt: "Sticker 1",
        pixel_size: SQUARE_PX,
        max_world_size: DEFAULT_WORLD_MAX,
        aspect_ratio: None,
    },
    StickerInfo {
        id: StickerId(2),
        asset_path: "stickers/sticker-02.png",
        alt: "Sticker 2",
        pixel_size: SQUARE_PX,
        max_world_size: DEFAULT_WORLD_MAX,
        aspect_ratio: None,
    },
    StickerInfo {
        id: StickerId(3),
        asset_path: "stickers/sticker-03.png",
        alt: "Sticker 3",
        pixel_size: SQUARE_PX,
        max_world_size: DEFAULT_WORLD_MAX,
        aspect_ratio: None,
    },
    StickerInfo {
        id: StickerId(4),
        asset_path: "stickers/sticker-04.png",
        alt: "Sticker 4",
        pixel_size: SQUARE_PX,
        max_world_size: DEFAULT_WORLD_MAX,
        aspect_ratio: None,
    },
    StickerInfo {
        id: StickerId(5),
        asset_path: "stickers/sticker-05.png",
        alt: "Sticker 5",
        pixel_size: Vec2::new(90.0, 60.0),
        max_world_size: DEFAULT_WORLD_MAX,
        aspect_ratio: Some(1.5),
    },
    StickerInfo {
        id: StickerId(6),
        asset_path: "stickers/sticker-06.png",
        alt: "Sticker 6",
        pixel_size: SQUARE_PX,
        max_world_size: DEFAULT_WORLD_MAX,
        aspect_ratio: None,
    },
    StickerInfo {
        id: StickerId(7),
        asset_path: "stickers/sticker-07.png",
        alt: "Sticker 7",
        pixel_size: Vec2::new(72.0, 72.0),
        max_world_size: Vec2::new(6.0, 2.5),
        aspect_ratio: None,
    },
];

/// Which coordinate space a layer's positions are expressed in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CardSpace {
    /// Percent of the flat card, top-left origin.
    Percent,
    /// World units on the 3D card, centered origin.
    World(CardDimensions),
}

/// A sticker placed on a card.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedSticker {
    pub id: StickerId,
    pub position: Vec2,
    /// Size in the layer's space (percent for flat cards, world units for 3D).
    pub size: Vec2,
    pub z_index: u32,
    pub is_dragging: bool,
}

/// All stickers of one render mode.
#[derive(Debug, Clone, PartialEq)]
pub struct StickerLayer {
    pub space: CardSpace,
    pub stickers: Vec<PlacedSticker>,
}

const INITIAL_2D: [(u8, f32, f32); 7] = [
    (1, 40.0, 30.0),
    (2, 60.0, 50.0),
    (3, 30.0, 60.0),
    (4, 70.0, 35.0),
    (5, 45.0, 40.0),
    (6, 25.0, 45.0),
    (7, 55.0, 65.0),
];

const INITIAL_3D: [(u8, f32, f32); 7] = [
    (1, 0.0, 0.0),
    (2, 3.0, 2.0),
    (3, -2.0, 1.5),
    (4, 4.0, -1.0),
    (5, 1.0, -2.0),
    (6, -1.0, -1.5),
    (7, 2.0, -3.0),
];

impl StickerLayer {
    /// Default layout of the flat card (z 1..=7).
    pub fn initial_2d() -> Self {
        let card_px = CARD_2D.size();
        let stickers = INITIAL_2D
            .iter()
            .enumerate()
            .filter_map(|(i, &(n, x, y))| {
                let info = StickerId(n).info()?;
                Some(PlacedSticker {
                    id: info.id,
                    position: Vec2::new(x, y),
                    size: info.pixel_size / card_px * 100.0,
                    z_index: i as u32 + 1,
                    is_dragging: false,
                })
            })
            .collect();

        let mut layer = Self {
            space: CardSpace::Percent,
            stickers,
        };
        layer.revalidate();
        layer
    }

    /// Default layout of the 3D card (z 2..=8), validated into bounds.
    pub fn initial_3d() -> Self {
        Self::initial_3d_on(CARD_3D)
    }

    pub fn initial_3d_on(card: CardDimensions) -> Self {
        let stickers = INITIAL_3D
            .iter()
            .enumerate()
            .filter_map(|(i, &(n, x, y))| {
                let info = StickerId(n).info()?;
                Some(PlacedSticker {
                    id: info.id,
                    position: Vec2::new(x, y),
                    size: info.world_size(),
                    z_index: i as u32 + 2,
                    is_dragging: false,
                })
            })
            .collect();

        let mut layer = Self {
            space: CardSpace::World(card),
            stickers,
        };
        layer.revalidate();
        layer
    }

    /// Bounds the given sticker's center must stay within.
    pub fn bounds_for(&self, sticker: &PlacedSticker) -> StickerBounds {
        match self.space {
            CardSpace::Percent => StickerBounds::percent_for(sticker.size),
            CardSpace::World(card) => StickerBounds::world(&card, sticker.size),
        }
    }

    fn clamp_for(&self, sticker: &PlacedSticker, proposed: Vec2) -> Vec2 {
        match self.space {
            CardSpace::Percent => StickerBounds::percent_for(sticker.size).clamp(proposed),
            CardSpace::World(card) => clamp_world_drag(&card, sticker.size, proposed),
        }
    }

    /// Re-clamp every sticker into its bounds.
    pub fn revalidate(&mut self) {
        let clamped: Vec<Vec2> = self
            .stickers
            .iter()
            .map(|s| self.clamp_for(s, s.position))
            .collect();
        for (sticker, position) in self.stickers.iter_mut().zip(clamped) {
            sticker.position = position;
        }
    }

    pub fn get(&self, id: StickerId) -> Option<&PlacedSticker> {
        self.stickers.iter().find(|s| s.id == id)
    }

    pub fn get_mut(&mut self, id: StickerId) -> Option<&mut PlacedSticker> {
        self.stickers.iter_mut().find(|s| s.id == id)
    }

    pub fn max_z(&self) -> u32 {
        self.stickers.iter().map(|s| s.z_index).max().unwrap_or(0)
    }

    /// Give `id` a z-index above every other sticker.
    pub fn bring_to_front(&mut self, id: StickerId) {
        let top = self.max_z() + 1;
        if let Some(sticker) = self.get_mut(id) {
            sticker.z_index = top;
        }
    }

    /// Start dragging `id`: promotes it to the top and flags it.
    pub fn begin_drag(&mut self, id: StickerId) {
        self.bring_to_front(id);
        if let Some(sticker) = self.get_mut(id) {
            sticker.is_dragging = true;
        }
    }

    pub fn end_drag(&mut self, id: StickerId) {
        if let Some(sticker) = self.get_mut(id) {
            sticker.is_dragging = false;
        }
    }

    /// Clear every drag flag (used when edit mode ends mid-drag).
    pub fn end_all_drags(&mut self) {
        for sticker in &mut self.stickers {
            sticker.is_dragging = false;
        }
    }

    pub fn dragging(&self) -> Option<StickerId> {
        self.stickers.iter().find(|s| s.is_dragging).map(|s| s.id)
    }

    /// Move `id` to `proposed`, clamped into bounds.
    ///
    /// Returns `true` when the stored position changed by more than
    /// [`super::geometry::MOVE_EPSILON`] on either axis.
    pub fn move_to(&mut self, id: StickerId, proposed: Vec2) -> bool {
        let Some(index) = self.stickers.iter().position(|s| s.id == id) else {
            return false;
        };
        let clamped = self.clamp_for(&self.stickers[index], proposed);
        let sticker = &mut self.stickers[index];
        if !moved_enough(sticker.position, clamped) {
            return false;
        }
        sticker.position = clamped;
        true
    }

    /// Offset `id` by `delta` from its current position.
    pub fn move_by(&mut self, id: StickerId, delta: Vec2) -> bool {
        let Some(current) = self.get(id).map(|s| s.position) else {
            return false;
        };
        self.move_to(id, current + delta)
    }

    /// Place stickers at configured positions (clamped).
    pub fn apply_offsets(&mut self, overrides: impl IntoIterator<Item = (StickerId, Vec2)>) {
        for (id, position) in overrides {
            if let Some(index) = self.stickers.iter().position(|s| s.id == id) {
                let clamped = self.clamp_for(&self.stickers[index], position);
                self.stickers[index].position = clamped;
            }
        }
    }

    /// Visible stickers in paint order (ascending z).
    pub fn draw_order(&self, selection: &StickerSelection) -> Vec<&PlacedSticker> {
        let mut visible: Vec<&PlacedSticker> = self
            .stickers
            .iter()
            .filter(|s| selection.is_selected(s.id))
            .collect();
        visible.sort_by_key(|s| s.z_index);
        visible
    }

    /// Top-most visible sticker whose rectangle contains `point`.
    ///
    /// `point` is in the layer's space. Percent layers use +Y down, world
    /// layers +Y up; the rectangle test is symmetric so both work.
    pub fn hit_test(&self, point: Vec2, selection: &StickerSelection) -> Option<StickerId> {
        self.draw_order(selection)
            .into_iter()
            .rev()
            .find(|s| {
                let half = s.size / 2.0;
                (point.x - s.position.x).abs() <= half.x && (point.y - s.position.y).abs() <= half.y
            })
            .map(|s| s.id)
    }
}

/// Which stickers are currently shown on the card.
#[derive(Resource, Debug, Clone, PartialEq, Eq)]
pub struct StickerSelection {
    pub selected: HashSet<StickerId>,
}

impl Default for StickerSelection {
    fn default() -> Self {
        Self::all()
    }
}

impl StickerSelection {
    pub fn all() -> Self {
        Self {
            selected: STICKER_CATALOG.iter().map(|s| s.id).collect(),
        }
    }

    pub fn none() -> Self {
        Self {
            selected: HashSet::new(),
        }
    }

    pub fn from_ids(ids: impl IntoIterator<Item = StickerId>) -> Self {
        Self {
            selected: ids.into_iter().collect(),
        }
    }

    pub fn is_selected(&self, id: StickerId) -> bool {
        self.selected.contains(&id)
    }

    /// Flip the selection state of `id`; returns the new state.
    pub fn toggle(&mut self, id: StickerId) -> bool {
        if self.selected.remove(&id) {
            false
        } else {
            self.selected.insert(id);
            true
        }
    }
}

/// Sticker layer of the flat card.
#[derive(Resource, Debug, Clone, Deref, DerefMut)]
pub struct Sticker2dLayer(pub StickerLayer);

impl Default for Sticker2dLayer {
    fn default() -> Self {
        Self(StickerLayer::initial_2d())
    }
}

/// Sticker layer of the 3D card.
#[derive(Resource, Debug, Clone, Deref, DerefMut)]
pub struct Sticker3dLayer(pub StickerLayer);

impl Default for Sticker3dLayer {
    fn default() -> Self {
        Self(StickerLayer::initial_3d())
    }
}
