use bevy::prelude::*;

/// How long an entity renders white after taking a hit.
pub const HIT_FLASH_MS: u64 = 100;

/// Square footprint in arena space. `pos` is the top-left corner, y grows downwards.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Body {
    pub pos: Vec2,
    pub size: f32,
}

impl Body {
    pub fn new(pos: Vec2, size: f32) -> Self { Self { pos, size } }
    pub fn center(&self) -> Vec2 { self.pos + Vec2::splat(self.size / 2.0) }
    pub fn half_extent(&self) -> f32 { self.size / 2.0 }
}

/// Health pool. The lower bound is not clamped; callers check `is_depleted` right after damage.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Health {
    pub current: i32,
    pub max: i32,
    pub last_hit_ms: Option<u64>,
}

impl Health {
    pub fn new(max: i32) -> Self { Self { current: max, max, last_hit_ms: None } }

    pub fn take_damage(&mut self, amount: i32, now_ms: u64) {
        self.current -= amount;
        self.last_hit_ms = Some(now_ms);
    }

    pub fn is_depleted(&self) -> bool { self.current <= 0 }
    pub fn is_alive(&self) -> bool { !self.is_depleted() }

    pub fn is_flashing(&self, now_ms: u64) -> bool {
        self.last_hit_ms.is_some_and(|hit| now_ms.saturating_sub(hit) < HIT_FLASH_MS)
    }

    /// Fraction shown on the health bar, never below zero.
    pub fn ratio(&self) -> f32 {
        if self.max <= 0 { return 0.0; }
        self.current.max(0) as f32 / self.max as f32
    }
}

/// Display colour. Has no effect on the simulation.
#[derive(Component, Debug, Clone, Copy, PartialEq, Deref, DerefMut)]
pub struct Tint(pub Color);
