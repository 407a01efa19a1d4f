//! Card geometry and sticker bounds
//!
//! Stickers live in one of two coordinate spaces:
//! - the flat card, in percent of the card rectangle (origin top-left, +Y down)
//! - the 3D card, in world units (origin at the card center, +Y up)
//!
//! Both spaces clamp sticker centers into a rectangle that keeps the sticker
//! fully on the card with a safety margin.

use bevy::prelude::*;

/// Physical dimensions of the card surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardDimensions {
    pub width: f32,
    pub height: f32,
    pub thickness: f32,
    pub aspect_ratio: f32,
}

/// ISO/IEC 7810 ID-1 ratio (85.60 x 53.98 mm).
pub const CARD_ASPECT_RATIO: f32 = 85.6 / 53.98;

/// Card used by the 3D scene (world units).
pub const CARD_3D: CardDimensions = CardDimensions {
    width: 20.0,
    height: 12.6,
    thickness: 0.2,
    aspect_ratio: CARD_ASPECT_RATIO,
};

/// Width of the flat card in logical pixels.
pub const CARD_2D_WIDTH: f32 = 500.0;

/// Card used by the flat view (logical pixels, no depth).
pub const CARD_2D: CardDimensions = CardDimensions {
    width: CARD_2D_WIDTH,
    height: CARD_2D_WIDTH / 1.586,
    thickness: 0.0,
    aspect_ratio: 1.586,
};

impl CardDimensions {
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }
}

// Flat card: half of a 60px sticker on a ~500px card is ~6%.
const PERCENT_STICKER_HALF: f32 = 6.0;
const PERCENT_MARGIN_X: f32 = 2.0;
const PERCENT_MARGIN_Y: f32 = 8.0;

// 3D card margins (world units).
const WORLD_MARGIN_X: f32 = 0.1;
const WORLD_MARGIN_Y: f32 = 1.0;
const WORLD_ABSOLUTE_MARGIN_Y: f32 = 0.5;

/// Minimum per-axis change for a drag update to be applied.
pub const MOVE_EPSILON: f32 = 0.001;

/// Allowed rectangle for a sticker center.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StickerBounds {
    pub min_x: f32,
    pub max_x: f32,
    pub min_y: f32,
    pub max_y: f32,
}

impl StickerBounds {
    /// Bounds for a sticker of `sticker_size` on the 3D card.
    pub fn world(card: &CardDimensions, sticker_size: Vec2) -> Self {
        Self {
            min_x: -card.width / 2.0 + sticker_size.x / 2.0 + WORLD_MARGIN_X,
            max_x: card.width / 2.0 - sticker_size.x / 2.0 - WORLD_MARGIN_X,
            min_y: -card.height / 2.0 + sticker_size.y / 2.0 + WORLD_MARGIN_Y,
            max_y: card.height / 2.0 - sticker_size.y / 2.0 - WORLD_MARGIN_Y,
        }
    }

    /// Bounds for any sticker on the flat card, in percent.
    pub fn percent() -> Self {
        Self {
            min_x: PERCENT_STICKER_HALF + PERCENT_MARGIN_X,
            max_x: 100.0 - PERCENT_STICKER_HALF - PERCENT_MARGIN_X,
            min_y: PERCENT_STICKER_HALF + PERCENT_MARGIN_Y,
            max_y: 100.0 - PERCENT_STICKER_HALF - PERCENT_MARGIN_Y,
        }
    }

    /// Bounds for a sticker of `sticker_size` percent on the flat card.
    ///
    /// Same as [`StickerBounds::percent`] unless the sticker is wide or tall
    /// enough to overhang the card edge, in which case the inset grows to half
    /// its extent.
    pub fn percent_for(sticker_size: Vec2) -> Self {
        let base = Self::percent();
        let inset_x = base.min_x.max(sticker_size.x / 2.0);
        let inset_y = base.min_y.max(sticker_size.y / 2.0);
        Self {
            min_x: inset_x,
            max_x: 100.0 - inset_x,
            min_y: inset_y,
            max_y: 100.0 - inset_y,
        }
    }

    /// Clamp a point into the bounds.
    ///
    /// An inverted axis (sticker bigger than the allowed area) collapses to the
    /// midpoint of that axis.
    pub fn clamp(&self, point: Vec2) -> Vec2 {
        Vec2::new(
            clamp_axis(point.x, self.min_x, self.max_x),
            clamp_axis(point.y, self.min_y, self.max_y),
        )
    }

    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min_x.min(self.max_x)
            && point.x <= self.max_x.max(self.min_x)
            && point.y >= self.min_y.min(self.max_y)
            && point.y <= self.max_y.max(self.min_y)
    }
}

fn clamp_axis(value: f32, min: f32, max: f32) -> f32 {
    if min > max {
        return (min + max) / 2.0;
    }
    if value.is_nan() {
        return (min + max) / 2.0;
    }
    value.clamp(min, max)
}

/// Clamp a proposed 3D drag position, including the absolute Y guard that
/// keeps stickers off the rounded top/bottom edges.
pub fn clamp_world_drag(card: &CardDimensions, sticker_size: Vec2, proposed: Vec2) -> Vec2 {
    let bounded = StickerBounds::world(card, sticker_size).clamp(proposed);
    let absolute = card.height / 2.0 - sticker_size.y / 2.0 - WORLD_ABSOLUTE_MARGIN_Y;
    Vec2::new(bounded.x, clamp_axis(bounded.y, -absolute, absolute))
}

/// Size a sticker to fit `max_width` x `max_height` while keeping its aspect
/// ratio. Unknown (or non-positive) aspect ratios produce a square.
pub fn fit_sticker_size(max_width: f32, max_height: f32, aspect_ratio: Option<f32>) -> Vec2 {
    let Some(aspect) = aspect_ratio.filter(|a| *a > 0.0) else {
        let side = max_width.min(max_height);
        return Vec2::splat(side);
    };

    let mut width = max_width;
    let mut height = width / aspect;
    if height > max_height {
        height = max_height;
        width = height * aspect;
    }

    Vec2::new(width, height)
}

/// Map a card-local point (origin at card center, +Y up) to percent of the
/// card, measured from the top-left corner.
pub fn cursor_to_card_percent(local: Vec2, card_size: Vec2) -> Vec2 {
    if card_size.x <= 0.0 || card_size.y <= 0.0 {
        return Vec2::splat(50.0);
    }
    Vec2::new(
        (local.x + card_size.x / 2.0) / card_size.x * 100.0,
        (card_size.y / 2.0 - local.y) / card_size.y * 100.0,
    )
}

/// Inverse of [`cursor_to_card_percent`].
pub fn card_percent_to_local(percent: Vec2, card_size: Vec2) -> Vec2 {
    Vec2::new(
        percent.x / 100.0 * card_size.x - card_size.x / 2.0,
        card_size.y / 2.0 - percent.y / 100.0 * card_size.y,
    )
}

/// Whether `to` differs from `from` enough to count as a move.
pub fn moved_enough(from: Vec2, to: Vec2) -> bool {
    (to.x - from.x).abs() > MOVE_EPSILON || (to.y - from.y).abs() > MOVE_EPSILON
}
