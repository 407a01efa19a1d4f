//! UI state resources and marker components
//!
//! Edit mode, the active view tab, the light/dark palette, and the markers for
//! the overlay controls (edit button, tab control, theme and gyroscope
//! toggles, sticker inventory).

use bevy::prelude::*;

use super::sticker::StickerId;

// ============================================================================
// Edit mode
// ============================================================================

/// Whether stickers are currently editable.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct EditMode {
    pub is_editing: bool,
}

impl EditMode {
    pub fn toggle_edit(&mut self) {
        self.is_editing = !self.is_editing;
    }

    /// Leave edit mode. Sticker positions stay in memory as they are.
    pub fn save_changes(&mut self) {
        self.is_editing = false;
    }

    /// The edit button either enters edit mode or saves.
    pub fn press_button(&mut self) {
        if self.is_editing {
            self.save_changes();
        } else {
            self.toggle_edit();
        }
    }

    pub fn button_label(&self) -> &'static str {
        if self.is_editing {
            "Save Changes"
        } else {
            "Edit"
        }
    }
}

/// Brief dim of the edit button label when its text swaps.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct EditLabelTransition {
    pub remaining: f32,
}

impl EditLabelTransition {
    pub const DURATION: f32 = 0.3;
    pub const DIMMED_ALPHA: f32 = 0.3;

    pub fn start(&mut self) {
        self.remaining = Self::DURATION;
    }

    pub fn tick(&mut self, dt: f32) {
        self.remaining = (self.remaining - dt).max(0.0);
    }

    pub fn is_active(&self) -> bool {
        self.remaining > 0.0
    }

    pub fn label_alpha(&self) -> f32 {
        if self.is_active() {
            Self::DIMMED_ALPHA
        } else {
            1.0
        }
    }
}

impl Default for EditLabelTransition {
    fn default() -> Self {
        Self { remaining: 0.0 }
    }
}

// ============================================================================
// View tabs
// ============================================================================

/// Which card rendering is shown.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActiveView {
    /// Flat card ("2D" tab).
    #[default]
    Flat,
    /// 3D card scene ("3D" tab).
    Scene,
}

impl ActiveView {
    pub fn label(&self) -> &'static str {
        match self {
            ActiveView::Flat => "2D",
            ActiveView::Scene => "3D",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            ActiveView::Flat => 0,
            ActiveView::Scene => 1,
        }
    }

}

// ============================================================================
// Theme
// ============================================================================

/// Light or dark palette.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }

    /// Label of the toggle, which names the mode it switches to.
    pub fn toggle_label(&self) -> &'static str {
        match self {
            ThemeMode::Light => "Dark mode",
            ThemeMode::Dark => "Light mode",
        }
    }

    pub fn palette(&self, card_color: Color) -> Palette {
        match self {
            ThemeMode::Light => Palette {
                background: Color::srgb(0.93, 0.94, 0.96),
                card: card_color,
                ink: Color::srgb(0.05, 0.05, 0.05),
                panel: Color::srgba(1.0, 1.0, 1.0, 0.9),
                panel_border: Color::srgb(0.85, 0.86, 0.88),
                accent: Color::srgb(0.16, 0.5, 0.95),
                selected: Color::srgba(0.16, 0.5, 0.95, 0.25),
            },
            ThemeMode::Dark => Palette {
                background: Color::srgb(0.08, 0.09, 0.11),
                card: card_color,
                ink: Color::srgb(0.05, 0.05, 0.05),
                panel: Color::srgba(0.16, 0.17, 0.2, 0.92),
                panel_border: Color::srgb(0.28, 0.29, 0.33),
                accent: Color::srgb(0.45, 0.7, 1.0),
                selected: Color::srgba(0.45, 0.7, 1.0, 0.3),
            },
        }
    }
}

/// Colors derived from the active theme.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub background: Color,
    pub card: Color,
    pub ink: Color,
    pub panel: Color,
    pub panel_border: Color,
    pub accent: Color,
    pub selected: Color,
}

/// Theme swap animation: the toggle label fades out, the theme flips, then
/// the label fades back in.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq)]
pub struct ThemeToggleFade {
    /// Seconds since the toggle was pressed, `None` when idle.
    pub elapsed: Option<f32>,
    pub swapped: bool,
}

impl ThemeToggleFade {
    pub const FADE_OUT: f32 = 0.3;
    pub const FADE_IN: f32 = 0.1;

    /// Start a swap. Presses during a running swap are ignored.
    pub fn start(&mut self) -> bool {
        if self.is_active() {
            return false;
        }
        self.elapsed = Some(0.0);
        self.swapped = false;
        true
    }

    pub fn is_active(&self) -> bool {
        self.elapsed.is_some()
    }

    /// Advance the animation; returns `true` on the frame the theme should flip.
    pub fn tick(&mut self, dt: f32) -> bool {
        let Some(elapsed) = self.elapsed else {
            return false;
        };
        let elapsed = elapsed + dt.max(0.0);
        let swap = !self.swapped && elapsed >= Self::FADE_OUT;
        if swap {
            self.swapped = true;
        }
        self.elapsed = if self.swapped && elapsed >= Self::FADE_OUT + Self::FADE_IN {
            None
        } else {
            Some(elapsed)
        };
        swap
    }

    /// Opacity of the toggle label.
    pub fn label_alpha(&self) -> f32 {
        match self.elapsed {
            None => 1.0,
            Some(t) if !self.swapped => (1.0 - t / Self::FADE_OUT).clamp(0.0, 1.0),
            Some(t) => ((t - Self::FADE_OUT) / Self::FADE_IN).clamp(0.0, 1.0),
        }
    }
}

// ============================================================================
// Inventory
// ============================================================================

/// Staggered reveal of the inventory items when the panel opens.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq)]
pub struct InventoryReveal {
    /// Seconds since the panel was opened, `None` while closed.
    pub open_for: Option<f32>,
}

impl InventoryReveal {
    pub const INITIAL_DELAY: f32 = 0.05;
    pub const STAGGER: f32 = 0.05;

    /// Whether the item at `index` has appeared yet.
    pub fn item_visible(&self, index: usize) -> bool {
        match self.open_for {
            Some(t) => t >= Self::INITIAL_DELAY + index as f32 * Self::STAGGER,
            None => false,
        }
    }
}

// ============================================================================
// Marker components
// ============================================================================

/// Root node of all overlay UI.
#[derive(Component)]
pub struct OverlayRoot;

/// The Edit / Save Changes button.
#[derive(Component)]
pub struct EditButton;

/// Text inside the edit button.
#[derive(Component)]
pub struct EditButtonText;

/// The 2D/3D tab bar.
#[derive(Component)]
pub struct ViewTabBar;

/// One tab of the 2D/3D tab bar.
#[derive(Component, Debug, Clone, Copy)]
pub struct ViewTabButton {
    pub view: ActiveView,
}

/// Light/dark toggle button.
#[derive(Component)]
pub struct ThemeToggleButton;

/// Text inside the theme toggle.
#[derive(Component)]
pub struct ThemeToggleText;

/// Gyroscope toggle button.
#[derive(Component)]
pub struct GyroscopeToggleButton;

/// Text inside the gyroscope toggle.
#[derive(Component)]
pub struct GyroscopeToggleText;

/// Sticker inventory panel.
#[derive(Component)]
pub struct InventoryPanel;

/// One inventory entry.
#[derive(Component, Debug, Clone, Copy)]
pub struct InventoryItem {
    pub id: StickerId,
    pub index: usize,
}

/// Selection indicator inside an inventory entry.
#[derive(Component, Debug, Clone, Copy)]
pub struct InventoryCheck {
    pub id: StickerId,
}

/// Panel-colored UI surfaces that follow the theme.
#[derive(Component)]
pub struct ThemedPanel;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edit_button_flow() {
        let mut edit = EditMode::default();
        assert_eq!(edit.button_label(), "Edit");
        edit.press_button();
        assert!(edit.is_editing);
        assert_eq!(edit.button_label(), "Save Changes");
        edit.press_button();
        assert!(!edit.is_editing);
    }

    #[test]
    fn test_label_transition() {
        let mut t = EditLabelTransition::default();
        assert_eq!(t.label_alpha(), 1.0);
        t.start();
        assert_eq!(t.label_alpha(), EditLabelTransition::DIMMED_ALPHA);
        t.tick(0.5);
        assert!(!t.is_active());
    }

    #[test]
    fn test_view_labels_and_tab_index() {
        assert_eq!(ActiveView::Flat.label(), "2D");
        assert_eq!(ActiveView::Scene.label(), "3D");
        assert_eq!(ActiveView::Scene.index(), 1);
    }

    #[test]
    fn test_theme_toggle() {
        assert_eq!(ThemeMode::Light.toggled(), ThemeMode::Dark);
        assert_ne!(
            ThemeMode::Light.palette(Color::WHITE).background,
            ThemeMode::Dark.palette(Color::WHITE).background
        );
    }

    #[test]
    fn test_theme_fade_swaps_after_fade_out() {
        let mut fade = ThemeToggleFade::default();
        assert_eq!(fade.label_alpha(), 1.0);
        assert!(!fade.tick(1.0));

        assert!(fade.start());
        assert!(!fade.start());
        assert_eq!(fade.label_alpha(), 1.0);

        assert!(!fade.tick(0.15));
        assert!((fade.label_alpha() - 0.5).abs() < 1e-4);

        assert!(fade.tick(0.2));
        assert!(fade.swapped);
        assert!(fade.is_active());
        assert!((fade.label_alpha() - 0.5).abs() < 1e-4);

        assert!(!fade.tick(0.1));
        assert!(!fade.is_active());
        assert_eq!(fade.label_alpha(), 1.0);
    }

    #[test]
    fn test_long_frame_swaps_once_and_finishes() {
        let mut fade = ThemeToggleFade::default();
        fade.start();
        assert!(fade.tick(1.0));
        assert!(!fade.is_active());
        assert!(!fade.tick(1.0));
        assert!(fade.start());
    }

    #[test]
    fn test_inventory_stagger() {
        let mut reveal = InventoryReveal::default();
        assert!(!reveal.item_visible(0));
        reveal.open_for = Some(0.06);
        assert!(reveal.item_visible(0));
        assert!(!reveal.item_visible(1));
        reveal.open_for = Some(0.5);
        assert!(reveal.item_visible(6));
    }
}
