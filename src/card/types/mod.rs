//! Type definitions for the sticker card
//!
//! This module is organized into submodules:
//! - `geometry` - Card dimensions, sticker bounds and coordinate mapping
//! - `sticker` - Sticker catalog, per-view sticker layers and selection
//! - `orientation` - Orientation samples, tilt and shadow math, tilt blend
//! - `card` - Card surface components for the flat and 3D views
//! - `camera` - Camera markers and placement
//! - `ui` - Edit mode, view tabs, theme and overlay markers
//! - `settings` - Startup configuration loaded from RON

pub mod camera;
pub mod card;
pub mod geometry;
pub mod orientation;
pub mod settings;
pub mod sticker;
pub mod ui;

// Re-export all public types for convenient access
pub use camera::*;
pub use card::*;
pub use geometry::*;
pub use orientation::*;
pub use settings::*;
pub use sticker::*;
pub use ui::*;
