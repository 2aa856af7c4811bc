#![allow(dead_code)]
use arena_moba::{
    abilities::AbilityKey,
    clock::SimClock,
    components::{Body, Health},
    enemy::{enemy_bundle, Enemy},
    game::AppState,
    input::{GameInput, InputAction},
    player::Player,
    SimulationPlugin,
};
use bevy::prelude::*;

pub const TICK_MS: u64 = 16;

pub fn simulation_app() -> App {
    let mut app = App::new();
    app.add_plugins(SimulationPlugin);
    app.update();
    app
}

/// Headless app already in Playing, with the player standing at the arena centre.
pub fn playing_app() -> App {
    let mut app = simulation_app();
    app.world.resource_mut::<NextState<AppState>>().set(AppState::Playing);
    app.update();
    app
}

pub fn state(app: &App) -> AppState { *app.world.resource::<State<AppState>>().get() }

pub fn now_ms(app: &App) -> u64 { app.world.resource::<SimClock>().now_ms() }

pub fn tick(app: &mut App) {
    app.world.resource_mut::<SimClock>().advance_ms(TICK_MS);
    app.world.run_schedule(FixedUpdate);
}

pub fn tick_n(app: &mut App, ticks: usize) {
    for _ in 0..ticks { tick(app); }
}

pub fn send(app: &mut App, action: InputAction) {
    let at_ms = now_ms(app);
    app.world.send_event(GameInput::new(action, at_ms));
}

pub fn cast(app: &mut App, key: AbilityKey, cursor: Vec2) {
    send(app, InputAction::Ability { key, cursor });
}

pub fn spawn_enemy(app: &mut App, pos: Vec2) -> Entity {
    app.world.spawn(enemy_bundle(pos)).id()
}

pub fn player_entity(app: &mut App) -> Entity {
    app.world.query_filtered::<Entity, With<Player>>().single(&app.world)
}

pub fn player_center(app: &mut App) -> Vec2 {
    let player = player_entity(app);
    app.world.get::<Body>(player).map(|body| body.center()).unwrap_or(Vec2::ZERO)
}

pub fn enemy_health(app: &App, enemy: Entity) -> Option<i32> {
    app.world.get::<Health>(enemy).map(|health| health.current)
}

pub fn enemy_count(app: &mut App) -> usize {
    app.world.query_filtered::<(), With<Enemy>>().iter(&app.world).count()
}

pub fn count_with<T: Component>(app: &mut App) -> usize {
    app.world.query_filtered::<(), With<T>>().iter(&app.world).count()
}
