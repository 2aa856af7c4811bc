// src/abilities.rs
use bevy::prelude::*;
use crate::{
    clock::SimClock,
    combat::{resolve_area_burst, EnemyDefeated},
    components::{Body, Health},
    effects::{spawn_area_burst_marker, spawn_projectile, spawn_sword_spin},
    enemy::Enemy,
    game::{AppState, SimulationSet},
    input::{GameInput, InputAction},
    player::Player,
};

/// Radius of the W burst; also the base of the enemy telegraph band.
pub const ATTACK_RANGE: f32 = 60.0;
pub const ULTIMATE_BURST_RADIUS: f32 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AbilityKey { Q, W, E, R }

impl AbilityKey {
    pub const ALL: [AbilityKey; 4] = [AbilityKey::Q, AbilityKey::W, AbilityKey::E, AbilityKey::R];

    pub fn index(self) -> usize {
        match self { AbilityKey::Q => 0, AbilityKey::W => 1, AbilityKey::E => 2, AbilityKey::R => 3 }
    }

    pub fn descriptor(self) -> &'static AbilityDescriptor { &ABILITIES[self.index()] }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AbilityEffect {
    /// Sweep around the player, anchored to them for the swing's lifetime.
    SwordSpin,
    /// Instant damage around the cursor.
    AreaBurst { radius: f32 },
    /// Single-hit bolt from the player centre toward the cursor.
    Projectile,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AbilityDescriptor {
    pub name: &'static str,
    pub damage: i32,
    pub cooldown_ms: u64,
    pub color: Color,
    pub effect: AbilityEffect,
}

pub const ABILITIES: [AbilityDescriptor; 4] = [
    AbilityDescriptor { name: "Q", damage: 20, cooldown_ms: 1500, color: Color::rgb(1.0, 1.0, 1.0), effect: AbilityEffect::SwordSpin },
    AbilityDescriptor { name: "W", damage: 20, cooldown_ms: 1500, color: Color::rgb(0.0, 1.0, 0.0), effect: AbilityEffect::AreaBurst { radius: ATTACK_RANGE } },
    AbilityDescriptor { name: "E", damage: 25, cooldown_ms: 2000, color: Color::rgb(0.0, 0.0, 1.0), effect: AbilityEffect::Projectile },
    AbilityDescriptor { name: "R", damage: 40, cooldown_ms: 5000, color: Color::rgb(1.0, 1.0, 0.0), effect: AbilityEffect::AreaBurst { radius: ULTIMATE_BURST_RADIUS } },
];

/// Last-use timestamps per trigger. A trigger that was never used is ready.
#[derive(Resource, Debug, Default, Clone)]
pub struct Cooldowns {
    last_use_ms: [Option<u64>; 4],
}

impl Cooldowns {
    pub fn last_use_ms(&self, key: AbilityKey) -> Option<u64> { self.last_use_ms[key.index()] }

    pub fn remaining_ms(&self, key: AbilityKey, now_ms: u64) -> u64 {
        let Some(last_use) = self.last_use_ms(key) else { return 0; };
        key.descriptor().cooldown_ms.saturating_sub(now_ms.saturating_sub(last_use))
    }

    pub fn is_ready(&self, key: AbilityKey, now_ms: u64) -> bool { self.remaining_ms(key, now_ms) == 0 }

    /// Records a use at `now_ms` if the trigger is off cooldown. Returns whether it fired.
    pub fn try_activate(&mut self, key: AbilityKey, now_ms: u64) -> bool {
        if !self.is_ready(key, now_ms) { return false; }
        self.last_use_ms[key.index()] = Some(now_ms);
        true
    }

    /// Whole seconds shown on the ability bar, rounded up. `None` while the ability is ready.
    pub fn display_seconds(&self, key: AbilityKey, now_ms: u64) -> Option<u64> {
        match self.remaining_ms(key, now_ms) {
            0 => None,
            remaining => Some(remaining / 1000 + 1),
        }
    }

    pub fn reset(&mut self) { self.last_use_ms = [None; 4]; }
}

pub struct AbilitiesPlugin;

impl Plugin for AbilitiesPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Cooldowns>()
            .add_systems(OnEnter(AppState::Playing), reset_cooldowns)
            .add_systems(FixedUpdate, activate_abilities.in_set(SimulationSet::Input));
    }
}

fn reset_cooldowns(mut cooldowns: ResMut<Cooldowns>) { cooldowns.reset(); }

fn activate_abilities(
    mut commands: Commands,
    mut inputs: EventReader<GameInput>,
    mut cooldowns: ResMut<Cooldowns>,
    clock: Res<SimClock>,
    player_query: Query<&Body, With<Player>>,
    mut enemy_query: Query<(Entity, &Body, &mut Health), With<Enemy>>,
    mut defeated: EventWriter<EnemyDefeated>,
) {
    let Ok(player_body) = player_query.get_single() else { return; };
    let now = clock.now_ms();
    for input in inputs.read() {
        let InputAction::Ability { key, cursor } = input.action else { continue; };
        if !cooldowns.try_activate(key, input.at_ms) {
            continue;
        }
        let ability = key.descriptor();
        debug!("Ability {} cast at {:?}", ability.name, cursor);
        match ability.effect {
            AbilityEffect::SwordSpin => spawn_sword_spin(&mut commands, ability.damage, now),
            AbilityEffect::Projectile => spawn_projectile(&mut commands, player_body.center(), cursor, ability.damage, ability.color),
            AbilityEffect::AreaBurst { radius } => {
                let hits = resolve_area_burst(&mut commands, &mut enemy_query, &mut defeated, cursor, radius, ability.damage, now);
                debug!("Area burst {} struck {} enemies", ability.name, hits);
                spawn_area_burst_marker(&mut commands, cursor, radius, ability.color, now);
            }
        }
    }
}
