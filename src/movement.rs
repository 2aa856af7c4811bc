use bevy::prelude::*;

/// Movement capability shared by every actor; the policy decides how the target is chosen.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Mover {
    pub speed: f32,
    pub policy: MovementPolicy,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MovementPolicy {
    /// Walk to a fixed destination and stop there. `None` means standing still.
    SeekAndStop { target: Option<Vec2> },
    /// Chase the player's current position forever.
    PursuePlayer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    Moving,
    Arrived,
}

/// One seek tick. Snaps onto `target` once it is within `speed`, so the walker never overshoots.
pub fn seek_step(pos: Vec2, target: Vec2, speed: f32) -> (Vec2, StepOutcome) {
    let direction = target - pos;
    if direction.length() > speed {
        (pos + direction.normalize() * speed, StepOutcome::Moving)
    } else {
        (target, StepOutcome::Arrived)
    }
}

/// One pursuit tick. A zero-length direction leaves the position untouched.
pub fn pursue_step(pos: Vec2, target: Vec2, speed: f32) -> Vec2 {
    let direction = target - pos;
    if direction.length() == 0.0 {
        return pos;
    }
    pos + direction.normalize() * speed
}

impl Mover {
    pub fn seeker(speed: f32) -> Self { Self { speed, policy: MovementPolicy::SeekAndStop { target: None } } }
    pub fn pursuer(speed: f32) -> Self { Self { speed, policy: MovementPolicy::PursuePlayer } }

    pub fn order_move(&mut self, destination: Vec2) {
        if let MovementPolicy::SeekAndStop { target } = &mut self.policy {
            *target = Some(destination);
        }
    }

    pub fn move_target(&self) -> Option<Vec2> {
        match self.policy {
            MovementPolicy::SeekAndStop { target } => target,
            MovementPolicy::PursuePlayer => None,
        }
    }

    /// Advances `pos` by one tick. `player_pos` is only read by pursuers.
    pub fn step(&mut self, pos: Vec2, player_pos: Vec2) -> Vec2 {
        match &mut self.policy {
            MovementPolicy::SeekAndStop { target } => {
                let Some(destination) = *target else { return pos; };
                let (next, outcome) = seek_step(pos, destination, self.speed);
                if outcome == StepOutcome::Arrived {
                    *target = None;
                }
                next
            }
            MovementPolicy::PursuePlayer => pursue_step(pos, player_pos, self.speed),
        }
    }
}
