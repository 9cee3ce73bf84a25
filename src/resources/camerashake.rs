//! Camera shake service.
//!
//! Gameplay adds shake on hits, deaths and explosions; a renderer samples
//! [`CameraShake::offset`] each frame. The amount is capped and decays
//! linearly over time.

use bevy_ecs::prelude::Resource;
use glam::Vec2;

/// Upper bound of accumulated shake.
pub const MAX_SHAKE: f32 = 5.0;

#[derive(Resource, Debug, Clone)]
pub struct CameraShake {
    amount: f32,
    /// Shake removed per second.
    pub decay_rate: f32,
    rng: fastrand::Rng,
}

impl Default for CameraShake {
    fn default() -> Self {
        Self::new(10.0)
    }
}

impl CameraShake {
    pub fn new(decay_rate: f32) -> Self {
        Self {
            amount: 0.0,
            decay_rate,
            rng: fastrand::Rng::new(),
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = fastrand::Rng::with_seed(seed);
        self
    }

    pub fn amount(&self) -> f32 {
        self.amount
    }

    pub fn add(&mut self, amount: f32) {
        self.amount = (self.amount + amount).min(MAX_SHAKE);
    }

    pub fn decay(&mut self, dt: f32) {
        if self.amount > 0.0 {
            self.amount = (self.amount - dt * self.decay_rate).max(0.0);
        }
    }

    /// Random offset inside a circle of radius `amount`.
    pub fn offset(&mut self) -> Vec2 {
        if self.amount <= 0.0 {
            return Vec2::ZERO;
        }
        // Rejection sampling over the unit disc.
        loop {
            let p = Vec2::new(self.rng.f32() * 2.0 - 1.0, self.rng.f32() * 2.0 - 1.0);
            if p.length_squared() <= 1.0 {
                return p * self.amount;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-6;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    #[test]
    fn test_add_is_capped() {
        let mut shake = CameraShake::default();
        shake.add(3.0);
        shake.add(3.0);
        assert!(approx_eq(shake.amount(), MAX_SHAKE));
    }

    #[test]
    fn test_decay_stops_at_zero() {
        let mut shake = CameraShake::new(10.0);
        shake.add(0.75);
        shake.decay(0.05);
        assert!(approx_eq(shake.amount(), 0.25));
        shake.decay(1.0);
        assert_eq!(shake.amount(), 0.0);
    }

    #[test]
    fn test_offset_within_amount() {
        let mut shake = CameraShake::default().with_seed(7);
        assert_eq!(shake.offset(), Vec2::ZERO);
        shake.add(2.0);
        for _ in 0..100 {
            assert!(shake.offset().length() <= 2.0 + EPSILON);
        }
    }
}
