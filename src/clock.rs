use bevy::prelude::*;
use std::time::Duration;

/// Monotonic simulation time. Cooldowns, effect expiry and the spawn timer read this,
/// never the wall clock.
#[derive(Resource, Debug, Default, Clone, Copy)]
pub struct SimClock {
    elapsed: Duration,
    last_delta: Duration,
}

impl SimClock {
    pub fn now_ms(&self) -> u64 { self.elapsed.as_millis() as u64 }
    pub fn delta(&self) -> Duration { self.last_delta }

    pub fn advance(&mut self, delta: Duration) {
        self.elapsed += delta;
        self.last_delta = delta;
    }

    pub fn advance_ms(&mut self, ms: u64) { self.advance(Duration::from_millis(ms)); }
}

pub const TICKS_PER_SECOND: f64 = 60.0;

/// Drives `SimClock` from Bevy's fixed timestep. Headless drivers leave this out and
/// advance the clock themselves.
pub struct ClockPlugin;

impl Plugin for ClockPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(Time::<Fixed>::from_hz(TICKS_PER_SECOND))
            .init_resource::<SimClock>()
            .add_systems(FixedFirst, advance_sim_clock);
    }
}

fn advance_sim_clock(time: Res<Time>, mut clock: ResMut<SimClock>) {
    clock.advance(time.delta());
}
