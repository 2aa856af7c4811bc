use bevy::{input::InputSystem, prelude::*, window::{PrimaryWindow, WindowCloseRequested}};
use crate::{abilities::AbilityKey, clock::SimClock};

/// A discrete input from the player, stamped with the simulation time it arrived.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct GameInput {
    pub action: InputAction,
    pub at_ms: u64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputAction {
    Quit,
    SelectPrevious,
    SelectNext,
    Confirm,
    /// Pointer click in arena coordinates: a movement order.
    MoveTo(Vec2),
    /// Ability trigger with the cursor position at the moment of the key press.
    Ability { key: AbilityKey, cursor: Vec2 },
    ExitConfirm,
}

impl GameInput {
    pub fn new(action: InputAction, at_ms: u64) -> Self { Self { action, at_ms } }
}

/// Maps keyboard, mouse and window events onto `GameInput`.
pub struct ControlsPlugin;

impl Plugin for ControlsPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<GameInput>()
            .add_systems(PreUpdate, collect_player_input.after(InputSystem));
    }
}

const ABILITY_BINDINGS: [(KeyCode, AbilityKey); 4] = [
    (KeyCode::KeyQ, AbilityKey::Q),
    (KeyCode::KeyW, AbilityKey::W),
    (KeyCode::KeyE, AbilityKey::E),
    (KeyCode::KeyR, AbilityKey::R),
];

fn collect_player_input(
    keyboard_input: Res<ButtonInput<KeyCode>>,
    mouse_button_input: Res<ButtonInput<MouseButton>>,
    window_query: Query<&Window, With<PrimaryWindow>>,
    mut close_requests: EventReader<WindowCloseRequested>,
    clock: Res<SimClock>,
    mut last_cursor: Local<Vec2>,
    mut inputs: EventWriter<GameInput>,
) {
    let now = clock.now_ms();
    let mut emit = |action| { inputs.send(GameInput::new(action, now)); };

    if close_requests.read().count() > 0 { emit(InputAction::Quit); }
    if keyboard_input.just_pressed(KeyCode::ArrowLeft) { emit(InputAction::SelectPrevious); }
    if keyboard_input.just_pressed(KeyCode::ArrowRight) { emit(InputAction::SelectNext); }
    if keyboard_input.just_pressed(KeyCode::Enter) { emit(InputAction::Confirm); }
    if keyboard_input.just_pressed(KeyCode::Escape) { emit(InputAction::ExitConfirm); }

    // Window cursor coordinates are already top-left origin, y down: the arena's own frame.
    let live_cursor = window_query.get_single().ok().and_then(|window| window.cursor_position());
    if let Some(cursor) = live_cursor {
        *last_cursor = cursor;
        if mouse_button_input.just_pressed(MouseButton::Left) { emit(InputAction::MoveTo(cursor)); }
    }
    // Abilities fire from the last known cursor even while the pointer is outside the window.
    for (key_code, key) in ABILITY_BINDINGS {
        if keyboard_input.just_pressed(key_code) { emit(InputAction::Ability { key, cursor: *last_cursor }); }
    }
}
