use arena_moba::{
    abilities::AbilityKey,
    clock::SimClock,
    input::{ControlsPlugin, GameInput, InputAction},
};
use bevy::{prelude::*, window::WindowCloseRequested};

/// Controls without any window, so the pointer is never over the arena.
fn windowless_controls_app() -> App {
    let mut app = App::new();
    app.add_plugins(ControlsPlugin)
        .init_resource::<SimClock>()
        .init_resource::<ButtonInput<KeyCode>>()
        .init_resource::<ButtonInput<MouseButton>>()
        .add_event::<WindowCloseRequested>();
    app
}

fn emitted_actions(app: &App) -> Vec<InputAction> {
    app.world.resource::<Events<GameInput>>().iter_current_update_events().map(|input| input.action).collect()
}

#[test]
fn test_ability_keys_fire_without_live_cursor() {
    let mut app = windowless_controls_app();
    app.world.resource_mut::<ButtonInput<KeyCode>>().press(KeyCode::KeyQ);
    app.world.resource_mut::<ButtonInput<KeyCode>>().press(KeyCode::KeyE);
    app.world.resource_mut::<ButtonInput<MouseButton>>().press(MouseButton::Left);
    app.world.run_schedule(PreUpdate);

    assert_eq!(emitted_actions(&app), vec![
        InputAction::Ability { key: AbilityKey::Q, cursor: Vec2::ZERO },
        InputAction::Ability { key: AbilityKey::E, cursor: Vec2::ZERO },
    ]);
}

#[test]
fn test_menu_keys_map_to_actions() {
    let mut app = windowless_controls_app();
    app.world.resource_mut::<ButtonInput<KeyCode>>().press(KeyCode::ArrowLeft);
    app.world.resource_mut::<ButtonInput<KeyCode>>().press(KeyCode::Enter);
    app.world.run_schedule(PreUpdate);

    assert_eq!(emitted_actions(&app), vec![InputAction::SelectPrevious, InputAction::Confirm]);
}
