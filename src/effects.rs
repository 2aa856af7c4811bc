use bevy::prelude::*;
use std::collections::HashSet;
use crate::{
    clock::SimClock,
    combat::{strike_enemy, EnemyDefeated},
    components::{Body, Health},
    enemy::Enemy,
    game::{ArenaConfig, SimulationSet},
    player::Player,
};

pub const AREA_BURST_MARKER_MS: u64 = 300;
pub const ENEMY_TELEGRAPH_MS: u64 = 300;

pub const PROJECTILE_SPEED: f32 = 10.0;
pub const PROJECTILE_RADIUS: f32 = 8.0;

pub const SWORD_SPIN_MS: u64 = 500;
pub const SWORD_SPIN_RADIUS: f32 = 70.0;
pub const SWORD_SPIN_DEGREES_PER_TICK: f32 = 15.0;

/// Creation time plus fixed lifetime. The effect stays active until the elapsed time
/// exceeds the duration.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transient {
    pub spawned_at_ms: u64,
    pub duration_ms: u64,
}

impl Transient {
    pub fn new(spawned_at_ms: u64, duration_ms: u64) -> Self { Self { spawned_at_ms, duration_ms } }
    pub fn elapsed_ms(&self, now_ms: u64) -> u64 { now_ms.saturating_sub(self.spawned_at_ms) }
    pub fn is_expired(&self, now_ms: u64) -> bool { self.elapsed_ms(now_ms) > self.duration_ms }

    /// 1.0 when fresh, 0.0 at the end of the lifetime. Drives fade-outs.
    pub fn remaining_fraction(&self, now_ms: u64) -> f32 {
        if self.duration_ms == 0 { return 0.0; }
        (1.0 - self.elapsed_ms(now_ms) as f32 / self.duration_ms as f32).clamp(0.0, 1.0)
    }
}

/// Fading marker left by an area burst. Purely visual.
#[derive(Component, Debug, Clone, Copy)]
pub struct AreaBurstMarker {
    pub center: Vec2,
    pub radius: f32,
    pub color: Color,
}

#[derive(Component, Debug, Clone, Copy)]
pub struct Projectile {
    pub pos: Vec2,
    pub direction: Vec2,
    pub speed: f32,
    pub radius: f32,
    pub damage: i32,
    pub color: Color,
}

impl Projectile {
    pub fn new(start: Vec2, target: Vec2, damage: i32, color: Color) -> Self {
        let direction = target - start;
        let direction = if direction.length() != 0.0 { direction.normalize() } else { Vec2::X };
        Self { pos: start, direction, speed: PROJECTILE_SPEED, radius: PROJECTILE_RADIUS, damage, color }
    }

    pub fn advance(&mut self) { self.pos += self.direction * self.speed; }

    pub fn touches(&self, body: &Body) -> bool {
        self.pos.distance(body.center()) <= self.radius + body.half_extent()
    }
}

/// Melee sweep around the player. Each enemy is struck at most once per swing.
#[derive(Component, Debug, Clone)]
pub struct SwordSpin {
    pub damage: i32,
    pub radius: f32,
    pub angle_degrees: f32,
    pub damaged: HashSet<Entity>,
}

/// Visual cue for an enemy hovering just outside attack range.
#[derive(Component, Debug, Clone, Copy)]
pub struct EnemyTelegraph {
    pub enemy: Entity,
}

pub fn spawn_sword_spin(commands: &mut Commands, damage: i32, now_ms: u64) {
    commands.spawn((
        SwordSpin { damage, radius: SWORD_SPIN_RADIUS, angle_degrees: 0.0, damaged: HashSet::new() },
        Transient::new(now_ms, SWORD_SPIN_MS),
        Name::new("SwordSpin"),
    ));
}

pub fn spawn_projectile(commands: &mut Commands, start: Vec2, target: Vec2, damage: i32, color: Color) {
    commands.spawn((Projectile::new(start, target, damage, color), Name::new("Projectile")));
}

pub fn spawn_area_burst_marker(commands: &mut Commands, center: Vec2, radius: f32, color: Color, now_ms: u64) {
    commands.spawn((
        AreaBurstMarker { center, radius, color },
        Transient::new(now_ms, AREA_BURST_MARKER_MS),
        Name::new("AreaBurstMarker"),
    ));
}

pub fn spawn_enemy_telegraph(commands: &mut Commands, enemy: Entity, now_ms: u64) {
    commands.spawn((EnemyTelegraph { enemy }, Transient::new(now_ms, ENEMY_TELEGRAPH_MS), Name::new("EnemyTelegraph")));
}

pub struct EffectsPlugin;

impl Plugin for EffectsPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(FixedUpdate, (
                projectile_flight_system,
                sword_spin_system,
                expire_transient_effects,
            ).chain().in_set(SimulationSet::Effects));
    }
}

fn projectile_flight_system(
    mut commands: Commands,
    clock: Res<SimClock>,
    arena: Res<ArenaConfig>,
    mut projectile_query: Query<(Entity, &mut Projectile)>,
    mut enemy_query: Query<(Entity, &Body, &mut Health), With<Enemy>>,
    mut defeated: EventWriter<EnemyDefeated>,
) {
    let now = clock.now_ms();
    for (projectile_entity, mut projectile) in projectile_query.iter_mut() {
        projectile.advance();
        if !arena.contains(projectile.pos) {
            commands.entity(projectile_entity).despawn();
            continue;
        }
        for (enemy_entity, enemy_body, mut enemy_health) in enemy_query.iter_mut() {
            if enemy_health.is_depleted() || !projectile.touches(enemy_body) { continue; }
            strike_enemy(&mut commands, &mut defeated, enemy_entity, enemy_body, &mut enemy_health, projectile.damage, now);
            commands.entity(projectile_entity).despawn();
            break;
        }
    }
}

fn sword_spin_system(
    mut commands: Commands,
    clock: Res<SimClock>,
    player_query: Query<&Body, With<Player>>,
    mut spin_query: Query<(&mut SwordSpin, &Transient)>,
    mut enemy_query: Query<(Entity, &Body, &mut Health), With<Enemy>>,
    mut defeated: EventWriter<EnemyDefeated>,
) {
    let Ok(player_body) = player_query.get_single() else { return; };
    let now = clock.now_ms();
    let player_center = player_body.center();
    for (mut spin, lifetime) in spin_query.iter_mut() {
        if lifetime.is_expired(now) { continue; }
        spin.angle_degrees = (spin.angle_degrees + SWORD_SPIN_DEGREES_PER_TICK) % 360.0;
        for (enemy_entity, enemy_body, mut enemy_health) in enemy_query.iter_mut() {
            if enemy_health.is_depleted() || spin.damaged.contains(&enemy_entity) { continue; }
            if player_center.distance(enemy_body.center()) <= spin.radius {
                strike_enemy(&mut commands, &mut defeated, enemy_entity, enemy_body, &mut enemy_health, spin.damage, now);
                spin.damaged.insert(enemy_entity);
            }
        }
    }
}

fn expire_transient_effects(mut commands: Commands, clock: Res<SimClock>, query: Query<(Entity, &Transient)>) {
    let now = clock.now_ms();
    for (entity, lifetime) in query.iter() {
        if lifetime.is_expired(now) { commands.entity(entity).despawn(); }
    }
}
