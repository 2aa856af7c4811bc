use bevy::{app::PluginGroupBuilder, prelude::*};
use bevy_hanabi::HanabiPlugin;

pub mod abilities;
pub mod clock;
pub mod combat;
pub mod components;
pub mod effects;
pub mod enemy;
pub mod game;
pub mod hud;
pub mod input;
pub mod movement;
pub mod player;
pub mod render;

use abilities::AbilitiesPlugin;
use clock::ClockPlugin;
use combat::CombatPlugin;
use effects::EffectsPlugin;
use enemy::EnemyPlugin;
use game::GamePlugin;
use hud::HudPlugin;
use input::ControlsPlugin;
use player::PlayerPlugin;
use render::ArenaRenderPlugin;

/// The headless game: state machine, actors, abilities and combat. Needs no window,
/// renderer or wall clock, so tests drive it by advancing `SimClock` and running `FixedUpdate`.
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins((
            GamePlugin,
            PlayerPlugin,
            EnemyPlugin,
            AbilitiesPlugin,
            CombatPlugin,
            EffectsPlugin,
        ));
    }
}

/// Simulation plus everything needed to play it in a window.
pub struct ArenaMobaPlugins;

impl PluginGroup for ArenaMobaPlugins {
    fn build(self) -> PluginGroupBuilder {
        PluginGroupBuilder::start::<Self>()
            .add(SimulationPlugin)
            .add(ClockPlugin)
            .add(ControlsPlugin)
            .add(HanabiPlugin)
            .add(ArenaRenderPlugin)
            .add(HudPlugin)
    }
}
