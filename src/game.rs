use bevy::{app::AppExit, prelude::*};
use crate::{
    clock::SimClock,
    components::Health,
    input::{GameInput, InputAction},
    player::Player,
};

pub const ARENA_WIDTH: f32 = 800.0;
pub const ARENA_HEIGHT: f32 = 600.0;

pub const COLOR_OPTIONS: [Color; 5] = [
    Color::rgb(0.0, 128.0 / 255.0, 1.0),
    Color::rgb(1.0, 50.0 / 255.0, 50.0 / 255.0),
    Color::rgb(50.0 / 255.0, 1.0, 50.0 / 255.0),
    Color::rgb(1.0, 1.0, 0.0),
    Color::rgb(1.0, 0.0, 1.0),
];

#[derive(States, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AppState {
    #[default]
    ColorSelect,
    Playing,
    GameOver,
    Terminated,
}

/// Arena bounds in arena space: origin top-left, y down.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct ArenaConfig { pub width: f32, pub height: f32 }
impl Default for ArenaConfig { fn default() -> Self { Self { width: ARENA_WIDTH, height: ARENA_HEIGHT } } }

impl ArenaConfig {
    pub fn contains(&self, point: Vec2) -> bool {
        (0.0..=self.width).contains(&point.x) && (0.0..=self.height).contains(&point.y)
    }

    pub fn center(&self) -> Vec2 { Vec2::new(self.width / 2.0, self.height / 2.0) }
}

/// Order of one simulation tick. Every set only runs while a session is being played, and all
/// but `Outcome` stop the moment the player's health is depleted.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimulationSet {
    Input,
    Spawn,
    Movement,
    Telegraph,
    Outcome,
    Effects,
}

impl SimulationSet {
    pub const ORDER: [SimulationSet; 6] = [
        SimulationSet::Input,
        SimulationSet::Spawn,
        SimulationSet::Movement,
        SimulationSet::Telegraph,
        SimulationSet::Outcome,
        SimulationSet::Effects,
    ];
}

#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ColorSelection { pub index: usize }

impl ColorSelection {
    pub fn select_next(&mut self) { self.index = (self.index + 1) % COLOR_OPTIONS.len(); }
    pub fn select_previous(&mut self) { self.index = (self.index + COLOR_OPTIONS.len() - 1) % COLOR_OPTIONS.len(); }
    pub fn color(&self) -> Color { COLOR_OPTIONS[self.index % COLOR_OPTIONS.len()] }
}

pub struct GamePlugin;

impl Plugin for GamePlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<GameInput>()
            .init_state::<AppState>()
            .init_resource::<ArenaConfig>()
            .init_resource::<SimClock>()
            .init_resource::<ColorSelection>()
            .configure_sets(FixedUpdate, (
                SimulationSet::Input,
                SimulationSet::Spawn,
                SimulationSet::Movement,
                SimulationSet::Telegraph,
                SimulationSet::Outcome,
                SimulationSet::Effects,
            ).chain());
        for set in SimulationSet::ORDER {
            app.configure_sets(FixedUpdate, set.run_if(in_state(AppState::Playing)));
            // Outcome still runs so a dead player flips the state; everything else freezes at once.
            if set != SimulationSet::Outcome {
                app.configure_sets(FixedUpdate, set.run_if(player_alive));
            }
        }
        app.add_systems(Update, color_select_input_system.run_if(in_state(AppState::ColorSelect)))
            .add_systems(Update, game_over_input_system.run_if(in_state(AppState::GameOver)))
            .add_systems(Update, quit_input_system)
            .add_systems(FixedUpdate, check_game_over.in_set(SimulationSet::Outcome))
            .add_systems(OnEnter(AppState::Playing), log_session_start)
            .add_systems(OnEnter(AppState::GameOver), log_game_over)
            .add_systems(OnEnter(AppState::Terminated), exit_on_terminate);
    }
}

fn color_select_input_system(
    mut inputs: EventReader<GameInput>,
    mut selection: ResMut<ColorSelection>,
    mut next_app_state: ResMut<NextState<AppState>>,
) {
    for input in inputs.read() {
        match input.action {
            InputAction::SelectPrevious => selection.select_previous(),
            InputAction::SelectNext => selection.select_next(),
            InputAction::Confirm => { next_app_state.set(AppState::Playing); return; }
            _ => {}
        }
    }
}

fn game_over_input_system(mut inputs: EventReader<GameInput>, mut next_app_state: ResMut<NextState<AppState>>) {
    if inputs.read().any(|input| input.action == InputAction::ExitConfirm) {
        next_app_state.set(AppState::Terminated);
    }
}

fn quit_input_system(mut inputs: EventReader<GameInput>, mut next_app_state: ResMut<NextState<AppState>>) {
    if inputs.read().any(|input| input.action == InputAction::Quit) {
        next_app_state.set(AppState::Terminated);
    }
}

/// False once the player's health is depleted, before the state machine has caught up.
pub fn player_alive(player_query: Query<&Health, With<Player>>) -> bool {
    player_query.get_single().map_or(true, |health| health.is_alive())
}

fn check_game_over(player_query: Query<&Health, With<Player>>, mut next_app_state: ResMut<NextState<AppState>>) {
    let Ok(health) = player_query.get_single() else { return; };
    if health.is_depleted() { next_app_state.set(AppState::GameOver); }
}

fn log_session_start(selection: Res<ColorSelection>) { info!("Session started with colour option {}", selection.index); }
fn log_game_over(clock: Res<SimClock>) { info!("Game over at {} ms", clock.now_ms()); }

fn exit_on_terminate(mut exit: EventWriter<AppExit>) {
    info!("Terminating");
    exit.send(AppExit);
}
