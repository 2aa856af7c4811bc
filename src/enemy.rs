use bevy::prelude::*;
use rand::Rng;
use std::time::Duration;
use crate::{
    clock::SimClock,
    components::{Body, Health, Tint},
    game::{AppState, ArenaConfig, SimulationSet},
    movement::Mover,
    player::{player_movement_system, Player},
};

pub const ENEMY_SIZE: f32 = 30.0;
pub const ENEMY_SPEED: f32 = 2.0;
pub const ENEMY_MAX_HEALTH: i32 = 30;
pub const ENEMY_SPAWN_INTERVAL_MS: u64 = 2000;
pub const ENEMY_COLOR: Color = Color::rgb(200.0 / 255.0, 50.0 / 255.0, 50.0 / 255.0);

#[derive(Component, Debug, Default)]
pub struct Enemy;

#[derive(Resource)]
pub struct EnemySpawnTimer { pub timer: Timer }
impl Default for EnemySpawnTimer { fn default() -> Self { Self { timer: Timer::new(Duration::from_millis(ENEMY_SPAWN_INTERVAL_MS), TimerMode::Repeating) } } }

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArenaEdge { Top, Bottom, Left, Right }

impl ArenaEdge {
    pub const ALL: [ArenaEdge; 4] = [ArenaEdge::Top, ArenaEdge::Bottom, ArenaEdge::Left, ArenaEdge::Right];
}

pub fn enemy_bundle(pos: Vec2) -> impl Bundle {
    (
        Enemy,
        Body::new(pos, ENEMY_SIZE),
        Health::new(ENEMY_MAX_HEALTH),
        Mover::pursuer(ENEMY_SPEED),
        Tint(ENEMY_COLOR),
        Name::new("Enemy"),
    )
}

/// Top-left corner for a new enemy: a random point along `edge`, one body length outside the arena.
pub fn edge_spawn_position<R: Rng + ?Sized>(rng: &mut R, edge: ArenaEdge, arena: &ArenaConfig) -> Vec2 {
    let max_x = ((arena.width - ENEMY_SIZE) as i32).max(0);
    let max_y = ((arena.height - ENEMY_SIZE) as i32).max(0);
    match edge {
        ArenaEdge::Top => Vec2::new(rng.gen_range(0..=max_x) as f32, -ENEMY_SIZE),
        ArenaEdge::Bottom => Vec2::new(rng.gen_range(0..=max_x) as f32, arena.height + ENEMY_SIZE),
        ArenaEdge::Left => Vec2::new(-ENEMY_SIZE, rng.gen_range(0..=max_y) as f32),
        ArenaEdge::Right => Vec2::new(arena.width + ENEMY_SIZE, rng.gen_range(0..=max_y) as f32),
    }
}

pub fn random_spawn_position<R: Rng + ?Sized>(rng: &mut R, arena: &ArenaConfig) -> Vec2 {
    let edge = ArenaEdge::ALL[rng.gen_range(0..ArenaEdge::ALL.len())];
    edge_spawn_position(rng, edge, arena)
}

pub struct EnemyPlugin;

impl Plugin for EnemyPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<EnemySpawnTimer>()
            .add_systems(OnEnter(AppState::Playing), reset_spawn_timer)
            .add_systems(FixedUpdate, enemy_spawn_system.in_set(SimulationSet::Spawn))
            .add_systems(FixedUpdate, enemy_pursuit_system.in_set(SimulationSet::Movement).after(player_movement_system));
    }
}

fn reset_spawn_timer(mut spawn_timer: ResMut<EnemySpawnTimer>) { spawn_timer.timer.reset(); }

fn enemy_spawn_system(mut commands: Commands, clock: Res<SimClock>, arena: Res<ArenaConfig>, mut spawn_timer: ResMut<EnemySpawnTimer>) {
    spawn_timer.timer.tick(clock.delta());
    let mut rng = rand::thread_rng();
    for _ in 0..spawn_timer.timer.times_finished_this_tick() {
        let pos = random_spawn_position(&mut rng, &arena);
        debug!("Enemy spawned at {:?}", pos);
        commands.spawn(enemy_bundle(pos));
    }
}

fn enemy_pursuit_system(
    player_query: Query<&Body, With<Player>>,
    mut enemy_query: Query<(&mut Body, &mut Mover, &Health), (With<Enemy>, Without<Player>)>,
) {
    let Ok(player_body) = player_query.get_single() else { return; };
    let player_pos = player_body.pos;
    for (mut body, mut mover, health) in enemy_query.iter_mut() {
        if health.is_depleted() { continue; }
        body.pos = mover.step(body.pos, player_pos);
    }
}
