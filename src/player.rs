// src/player.rs
use bevy::prelude::*;
use crate::{
    components::{Body, Health, Tint},
    game::{AppState, ArenaConfig, ColorSelection, SimulationSet},
    input::{GameInput, InputAction},
    movement::Mover,
};

pub const PLAYER_SIZE: f32 = 40.0;
pub const PLAYER_SPEED: f32 = 5.0;
pub const PLAYER_MAX_HEALTH: i32 = 100;

#[derive(Component, Debug, Default)]
pub struct Player;

pub fn player_bundle(pos: Vec2, color: Color) -> impl Bundle {
    (
        Player,
        Body::new(pos, PLAYER_SIZE),
        Health::new(PLAYER_MAX_HEALTH),
        Mover::seeker(PLAYER_SPEED),
        Tint(color),
        Name::new("Player"),
    )
}

pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(AppState::Playing), spawn_player.run_if(no_player_exists))
            .add_systems(FixedUpdate, apply_move_orders.in_set(SimulationSet::Input))
            .add_systems(FixedUpdate, player_movement_system.in_set(SimulationSet::Movement));
    }
}

fn no_player_exists(player_query: Query<(), With<Player>>) -> bool { player_query.is_empty() }

fn spawn_player(mut commands: Commands, arena: Res<ArenaConfig>, selection: Res<ColorSelection>) {
    info!("Player enters the arena at {:?}", arena.center());
    commands.spawn(player_bundle(arena.center(), selection.color()));
}

fn apply_move_orders(mut inputs: EventReader<GameInput>, mut player_query: Query<&mut Mover, With<Player>>) {
    let Ok(mut mover) = player_query.get_single_mut() else { return; };
    for input in inputs.read() {
        if let InputAction::MoveTo(destination) = input.action { mover.order_move(destination); }
    }
}

pub fn player_movement_system(mut player_query: Query<(&mut Body, &mut Mover), With<Player>>) {
    for (mut body, mut mover) in player_query.iter_mut() {
        if mover.move_target().is_none() { continue; }
        body.pos = mover.step(body.pos, body.pos);
    }
}
