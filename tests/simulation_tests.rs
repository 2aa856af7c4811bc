mod common;

use arena_moba::{
    abilities::AbilityKey,
    effects::Projectile,
    components::{Body, Health, Tint},
    enemy::{edge_spawn_position, random_spawn_position, ArenaEdge, Enemy, ENEMY_SIZE},
    game::{AppState, ArenaConfig, ColorSelection, COLOR_OPTIONS},
    input::InputAction,
    player::Player,
};
use bevy::{app::AppExit, prelude::*};
use common::*;
use rand::{rngs::StdRng, SeedableRng};

fn enemy_positions(app: &mut App) -> Vec<Vec2> {
    app.world.query_filtered::<&Body, With<Enemy>>().iter(&app.world).map(|body| body.pos).collect()
}

fn is_outside(arena: &ArenaConfig, pos: Vec2) -> bool {
    pos.x < 0.0 || pos.y < 0.0 || pos.x > arena.width || pos.y > arena.height
}

#[test]
fn test_edge_spawn_positions_sit_just_outside_each_edge() {
    let arena = ArenaConfig::default();
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..200 {
        let top = edge_spawn_position(&mut rng, ArenaEdge::Top, &arena);
        assert_eq!(top.y, -ENEMY_SIZE);
        assert!((0.0..=arena.width - ENEMY_SIZE).contains(&top.x));

        let bottom = edge_spawn_position(&mut rng, ArenaEdge::Bottom, &arena);
        assert_eq!(bottom.y, arena.height + ENEMY_SIZE);
        assert!((0.0..=arena.width - ENEMY_SIZE).contains(&bottom.x));

        let left = edge_spawn_position(&mut rng, ArenaEdge::Left, &arena);
        assert_eq!(left.x, -ENEMY_SIZE);
        assert!((0.0..=arena.height - ENEMY_SIZE).contains(&left.y));

        let right = edge_spawn_position(&mut rng, ArenaEdge::Right, &arena);
        assert_eq!(right.x, arena.width + ENEMY_SIZE);
        assert!((0.0..=arena.height - ENEMY_SIZE).contains(&right.y));
    }
}

#[test]
fn test_random_spawn_position_uses_every_edge() {
    let arena = ArenaConfig::default();
    let mut rng = StdRng::seed_from_u64(42);
    let positions: Vec<Vec2> = (0..400).map(|_| random_spawn_position(&mut rng, &arena)).collect();
    assert!(positions.iter().all(|pos| is_outside(&arena, *pos)));
    assert!(positions.iter().any(|pos| pos.y == -ENEMY_SIZE));
    assert!(positions.iter().any(|pos| pos.y == arena.height + ENEMY_SIZE));
    assert!(positions.iter().any(|pos| pos.x == -ENEMY_SIZE));
    assert!(positions.iter().any(|pos| pos.x == arena.width + ENEMY_SIZE));
}

#[test]
fn test_spawner_emits_one_enemy_per_interval() {
    let mut app = playing_app();
    let arena = *app.world.resource::<ArenaConfig>();

    tick_n(&mut app, 124);
    assert_eq!(enemy_count(&mut app), 0);

    // 125 ticks of 16 ms is exactly 2000 ms.
    tick(&mut app);
    let positions = enemy_positions(&mut app);
    assert_eq!(positions.len(), 1);
    assert!(is_outside(&arena, positions[0]));

    tick_n(&mut app, 125);
    assert_eq!(enemy_count(&mut app), 2);
}

#[test]
fn test_enemies_pursue_player() {
    let mut app = playing_app();
    let enemy = spawn_enemy(&mut app, Vec2::new(-30.0, 100.0));
    let player_center = player_center(&mut app);
    let start = app.world.get::<Body>(enemy).unwrap().center().distance(player_center);
    tick_n(&mut app, 10);
    let end = app.world.get::<Body>(enemy).unwrap().center().distance(player_center);
    assert!(end < start);
}

#[test]
fn test_color_selection_wraps() {
    let mut selection = ColorSelection::default();
    selection.select_previous();
    assert_eq!(selection.index, COLOR_OPTIONS.len() - 1);
    selection.select_next();
    assert_eq!(selection.index, 0);
    selection.select_next();
    assert_eq!(selection.color(), COLOR_OPTIONS[1]);
}

#[test]
fn test_confirm_spawns_player_with_chosen_color() {
    let mut app = simulation_app();
    assert_eq!(state(&app), AppState::ColorSelect);

    send(&mut app, InputAction::SelectPrevious);
    send(&mut app, InputAction::Confirm);
    app.update();
    app.update();

    assert_eq!(state(&app), AppState::Playing);
    let players: Vec<(Body, Tint)> = app.world
        .query_filtered::<(&Body, &Tint), With<Player>>()
        .iter(&app.world)
        .map(|(body, tint)| (*body, *tint))
        .collect();
    assert_eq!(players.len(), 1);
    assert_eq!(players[0].0.pos, ArenaConfig::default().center());
    assert_eq!(players[0].1 .0, COLOR_OPTIONS[COLOR_OPTIONS.len() - 1]);
}

#[test]
fn test_player_death_freezes_simulation_until_exit() {
    let mut app = playing_app();
    let player = player_entity(&mut app);
    app.world.get_mut::<Health>(player).unwrap().current = 0;

    tick(&mut app);
    app.update();
    assert_eq!(state(&app), AppState::GameOver);

    tick_n(&mut app, 300);
    assert_eq!(enemy_count(&mut app), 0);

    send(&mut app, InputAction::ExitConfirm);
    app.update();
    app.update();
    assert_eq!(state(&app), AppState::Terminated);
    assert!(!app.world.resource::<Events<AppExit>>().is_empty());
}

#[test]
fn test_exit_confirm_ignored_while_playing() {
    let mut app = playing_app();
    send(&mut app, InputAction::ExitConfirm);
    app.update();
    app.update();
    assert_eq!(state(&app), AppState::Playing);
}

#[test]
fn test_quit_terminates_from_color_select() {
    let mut app = simulation_app();
    send(&mut app, InputAction::Quit);
    app.update();
    app.update();
    assert_eq!(state(&app), AppState::Terminated);
}

#[test]
fn test_player_death_freezes_tick_before_state_changes() {
    let mut app = playing_app();
    let center = player_center(&mut app);
    let enemy = spawn_enemy(&mut app, Vec2::new(-30.0, 100.0));
    cast(&mut app, AbilityKey::E, center + Vec2::new(-200.0, 0.0));
    tick(&mut app);

    let projectile_at = |app: &mut App| -> Vec<Vec2> {
        app.world.query::<&Projectile>().iter(&app.world).map(|projectile| projectile.pos).collect()
    };
    let projectile_before = projectile_at(&mut app);
    let enemy_before = app.world.get::<Body>(enemy).unwrap().pos;
    assert_eq!(projectile_before.len(), 1);

    let player = player_entity(&mut app);
    app.world.get_mut::<Health>(player).unwrap().current = 0;
    // No app.update() between ticks: the state is still Playing.
    tick(&mut app);
    tick(&mut app);

    assert_eq!(state(&app), AppState::Playing);
    assert_eq!(projectile_at(&mut app), projectile_before);
    assert_eq!(app.world.get::<Body>(enemy).unwrap().pos, enemy_before);

    app.update();
    assert_eq!(state(&app), AppState::GameOver);
}

#[test]
fn test_edge_spawn_position_in_tiny_arena() {
    let arena = ArenaConfig { width: 10.0, height: 10.0 };
    let mut rng = StdRng::seed_from_u64(3);
    for edge in ArenaEdge::ALL {
        let pos = edge_spawn_position(&mut rng, edge, &arena);
        assert!(is_outside(&arena, pos));
    }
}
