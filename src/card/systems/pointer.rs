//! Pointer input shared by both drag controllers
//!
//! Mouse and touch are folded into a single primary pointer so the drag
//! systems only deal with one position and one button.

use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::card::types::StickerId;

/// Primary pointer, refreshed at the start of `Update` before the drag systems.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq)]
pub struct PointerState {
    /// Window position in logical pixels (origin top-left), `None` when the
    /// pointer is outside the window.
    pub position: Option<Vec2>,
    pub pressed: bool,
    pub just_pressed: bool,
    pub just_released: bool,
    /// Pointer is over an interactive UI node.
    pub over_ui: bool,
}

impl PointerState {
    /// Position in `[-1, 1]` relative to the window center, +Y down.
    pub fn normalized(&self, window_size: Vec2) -> Option<Vec2> {
        let position = self.position?;
        if window_size.x <= 0.0 || window_size.y <= 0.0 {
            return None;
        }
        Some(position / window_size * 2.0 - Vec2::ONE)
    }
}

/// Tracks the last pointer position of an active drag and reports the
/// movement between updates.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct DragTracker {
    pub start: Option<Vec3>,
    pub last: Option<Vec3>,
}

impl DragTracker {
    pub fn start(&mut self, position: Vec3) {
        self.start = Some(position);
        self.last = Some(position);
    }

    /// Record `position`; returns the movement since the previous update.
    pub fn update(&mut self, position: Vec3) -> Option<Vec3> {
        self.start?;
        let delta = self.last.map(|last| position - last);
        self.last = Some(position);
        delta
    }

    pub fn end(&mut self) {
        self.start = None;
        self.last = None;
    }

    pub fn is_dragging(&self) -> bool {
        self.start.is_some()
    }
}

/// Active drag of one view.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct StickerDrag {
    pub sticker: Option<StickerId>,
    pub tracker: DragTracker,
}

impl StickerDrag {
    pub fn begin(&mut self, id: StickerId, at: Vec3) {
        self.sticker = Some(id);
        self.tracker.start(at);
    }

    /// Finish the drag, returning the sticker that was being dragged.
    pub fn finish(&mut self) -> Option<StickerId> {
        self.tracker.end();
        self.sticker.take()
    }
}

/// What a drag controller does with the pointer this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragStep {
    Idle,
    /// End the current drag.
    Release,
    /// Try to pick up the sticker under this card point.
    Grab(Vec2),
    /// Move the current drag to this card point.
    Follow(Vec2),
}

/// Drag state machine shared by both views.
///
/// `active` is edit mode on the controller's own view. `card_point` is the
/// pointer resolved onto the card, `None` when it misses the card plane.
/// A drag ends when the controller goes inactive, the pointer is released or
/// the pointer leaves the window. Presses over UI never start a drag.
pub fn drag_step(
    pointer: &PointerState,
    active: bool,
    dragging: bool,
    card_point: Option<Vec2>,
) -> DragStep {
    if !active {
        return if dragging {
            DragStep::Release
        } else {
            DragStep::Idle
        };
    }

    let released = pointer.just_released || !pointer.pressed || pointer.position.is_none();
    if released {
        return if dragging {
            DragStep::Release
        } else {
            DragStep::Idle
        };
    }

    let Some(point) = card_point else {
        return DragStep::Idle;
    };
    if dragging {
        DragStep::Follow(point)
    } else if pointer.just_pressed && !pointer.over_ui {
        DragStep::Grab(point)
    } else {
        DragStep::Idle
    }
}

/// Drag of the flat card.
#[derive(Resource, Debug, Default, Clone, Copy, Deref, DerefMut)]
pub struct FlatDrag(pub StickerDrag);

/// Drag of the 3D card.
#[derive(Resource, Debug, Default, Clone, Copy, Deref, DerefMut)]
pub struct SceneDrag(pub StickerDrag);

/// Fold mouse and touch input into [`PointerState`].
pub fn update_pointer_state(
    windows: Query<&Window, With<PrimaryWindow>>,
    mouse: Res<ButtonInput<MouseButton>>,
    touches: Res<Touches>,
    interactions: Query<&Interaction>,
    mut pointer: ResMut<PointerState>,
) {
    let cursor = windows.single().ok().and_then(|w| w.cursor_position());
    let touch = touches.first_pressed_position();

    let touch_active = touch.is_some() || touches.any_just_released();
    pointer.position = if touch_active {
        touch.or(pointer.position)
    } else {
        cursor
    };
    pointer.pressed = mouse.pressed(MouseButton::Left) || touch.is_some();
    pointer.just_pressed = mouse.just_pressed(MouseButton::Left) || touches.any_just_pressed();
    pointer.just_released =
        mouse.just_released(MouseButton::Left) || touches.any_just_released();
    pointer.over_ui = interactions.iter().any(|i| *i != Interaction::None);
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::input::mouse::MouseButtonInput;
    use bevy::input::{ButtonState, InputPlugin};

    #[test]
    fn test_tracker_reports_incremental_deltas() {
        let mut tracker = DragTracker::default();
        assert_eq!(tracker.update(Vec3::ONE), None);

        tracker.start(Vec3::ZERO);
        assert!(tracker.is_dragging());
        assert_eq!(tracker.update(Vec3::new(1.0, 2.0, 0.0)), Some(Vec3::new(1.0, 2.0, 0.0)));
        assert_eq!(tracker.update(Vec3::new(1.5, 2.0, 0.0)), Some(Vec3::new(0.5, 0.0, 0.0)));

        tracker.end();
        assert!(!tracker.is_dragging());
        assert_eq!(tracker.update(Vec3::ONE), None);
    }

    #[test]
    fn test_sticker_drag_finish() {
        let mut drag = StickerDrag::default();
        drag.begin(StickerId(3), Vec3::ZERO);
        assert_eq!(drag.finish(), Some(StickerId(3)));
        assert_eq!(drag.finish(), None);
        assert!(!drag.tracker.is_dragging());
    }

    fn pressed_at(position: Vec2) -> PointerState {
        PointerState {
            position: Some(position),
            pressed: true,
            just_pressed: true,
            ..default()
        }
    }

    #[test]
    fn test_press_grabs_unless_over_ui() {
        let point = Some(Vec2::new(40.0, 30.0));
        let press = pressed_at(Vec2::new(10.0, 10.0));
        assert_eq!(drag_step(&press, true, false, point), DragStep::Grab(Vec2::new(40.0, 30.0)));

        let on_button = PointerState {
            over_ui: true,
            ..press
        };
        assert_eq!(drag_step(&on_button, true, false, point), DragStep::Idle);

        // Pressing off the card does nothing.
        assert_eq!(drag_step(&press, true, false, None), DragStep::Idle);
    }

    #[test]
    fn test_held_pointer_follows_only_while_dragging() {
        let held = PointerState {
            just_pressed: false,
            ..pressed_at(Vec2::ZERO)
        };
        let point = Some(Vec2::new(1.0, 2.0));
        assert_eq!(drag_step(&held, true, true, point), DragStep::Follow(Vec2::new(1.0, 2.0)));
        assert_eq!(drag_step(&held, true, false, point), DragStep::Idle);
        assert_eq!(drag_step(&held, true, true, None), DragStep::Idle);
    }

    #[test]
    fn test_release_leave_and_edit_exit_end_the_drag() {
        let point = Some(Vec2::ONE);
        let released = PointerState {
            position: Some(Vec2::ZERO),
            just_released: true,
            ..default()
        };
        assert_eq!(drag_step(&released, true, true, point), DragStep::Release);
        assert_eq!(drag_step(&released, true, false, point), DragStep::Idle);

        let lifted = PointerState {
            position: Some(Vec2::ZERO),
            ..default()
        };
        assert_eq!(drag_step(&lifted, true, true, point), DragStep::Release);

        let left_window = PointerState {
            position: None,
            ..pressed_at(Vec2::ZERO)
        };
        assert_eq!(drag_step(&left_window, true, true, None), DragStep::Release);

        let held = pressed_at(Vec2::ZERO);
        assert_eq!(drag_step(&held, false, true, point), DragStep::Release);
        assert_eq!(drag_step(&held, false, false, point), DragStep::Idle);
    }

    #[test]
    fn test_pointer_state_reads_this_frames_clicks() {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, InputPlugin))
            .init_resource::<PointerState>()
            .add_systems(Update, update_pointer_state);

        let press = |app: &mut App, state: ButtonState| {
            app.world_mut().write_message(MouseButtonInput {
                button: MouseButton::Left,
                state,
                window: Entity::PLACEHOLDER,
            });
        };

        press(&mut app, ButtonState::Pressed);
        app.update();
        let pointer = *app.world().resource::<PointerState>();
        assert!(pointer.just_pressed && pointer.pressed);
        assert!(!pointer.over_ui);

        app.update();
        let pointer = *app.world().resource::<PointerState>();
        assert!(!pointer.just_pressed && pointer.pressed);

        press(&mut app, ButtonState::Released);
        app.update();
        let pointer = *app.world().resource::<PointerState>();
        assert!(pointer.just_released && !pointer.pressed);

        app.world_mut().spawn(Interaction::Pressed);
        app.update();
        assert!(app.world().resource::<PointerState>().over_ui);
    }

    #[test]
    fn test_normalized_pointer() {
        let pointer = PointerState {
            position: Some(Vec2::new(200.0, 0.0)),
            ..default()
        };
        assert_eq!(
            pointer.normalized(Vec2::new(400.0, 300.0)),
            Some(Vec2::new(0.0, -1.0))
        );
        assert_eq!(PointerState::default().normalized(Vec2::ONE), None);
    }
}
