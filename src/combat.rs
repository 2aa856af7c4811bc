use bevy::prelude::*;
use crate::{
    abilities::ATTACK_RANGE,
    clock::SimClock,
    components::{Body, Health},
    effects::spawn_enemy_telegraph,
    enemy::Enemy,
    game::SimulationSet,
    player::Player,
};

/// Width of the band just outside attack range in which enemies telegraph.
pub const TELEGRAPH_BAND: f32 = 20.0;

/// Sent the moment an enemy's health hits zero. The enemy is already queued for despawn.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct EnemyDefeated {
    pub entity: Entity,
    pub center: Vec2,
}

pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<EnemyDefeated>()
            .add_systems(FixedUpdate, enemy_attack_telegraph_system.in_set(SimulationSet::Telegraph));
    }
}

/// Applies damage and removes the enemy in the same step if it dies. Returns true on a kill.
pub fn strike_enemy(
    commands: &mut Commands,
    defeated: &mut EventWriter<EnemyDefeated>,
    entity: Entity,
    body: &Body,
    health: &mut Health,
    damage: i32,
    now_ms: u64,
) -> bool {
    health.take_damage(damage, now_ms);
    if health.is_alive() { return false; }
    debug!("Enemy {:?} defeated at {:?}", entity, body.center());
    commands.entity(entity).despawn_recursive();
    defeated.send(EnemyDefeated { entity, center: body.center() });
    true
}

/// Damages every live enemy whose centre lies within `radius` of `center`. Returns the hit count.
pub fn resolve_area_burst(
    commands: &mut Commands,
    enemy_query: &mut Query<(Entity, &Body, &mut Health), With<Enemy>>,
    defeated: &mut EventWriter<EnemyDefeated>,
    center: Vec2,
    radius: f32,
    damage: i32,
    now_ms: u64,
) -> usize {
    let mut hits = 0;
    for (entity, body, mut health) in enemy_query.iter_mut() {
        if health.is_depleted() || center.distance(body.center()) > radius { continue; }
        strike_enemy(commands, defeated, entity, body, &mut health, damage, now_ms);
        hits += 1;
    }
    hits
}

pub fn in_telegraph_band(distance: f32) -> bool {
    ATTACK_RANGE < distance && distance < ATTACK_RANGE + TELEGRAPH_BAND
}

// No debounce: an enemy idling in the band emits a telegraph every tick.
fn enemy_attack_telegraph_system(
    mut commands: Commands,
    clock: Res<SimClock>,
    player_query: Query<&Body, With<Player>>,
    enemy_query: Query<(Entity, &Body, &Health), With<Enemy>>,
) {
    let Ok(player_body) = player_query.get_single() else { return; };
    let player_center = player_body.center();
    for (entity, body, health) in enemy_query.iter() {
        if health.is_depleted() { continue; }
        if in_telegraph_band(body.center().distance(player_center)) {
            spawn_enemy_telegraph(&mut commands, entity, clock.now_ms());
        }
    }
}
