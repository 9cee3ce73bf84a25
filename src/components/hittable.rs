//! Damage protocol shared by everything that can be hit.
//!
//! Combat code never looks at concrete entity types. It sends a
//! [`HitEvent`](crate::events::combat::HitEvent) to a target, and the
//! generic [`hit_observer`](crate::systems::combat::hit_observer) forwards it
//! to whichever [`Hittable`] component the target carries.
//!
//! Every hittable entity also carries its [`Team`] as a component so
//! attackers can filter friendly fire before sending anything.

use bevy_ecs::prelude::Component;
use glam::Vec2;

/// Allegiance of a hittable entity.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Team {
    Player,
    Enemy,
    /// Hit by anyone (slime blocks).
    Neutral,
}

impl Team {
    /// Whether a hit from `source` lands on this team. Sourceless hits
    /// (explosions) land on everyone.
    pub fn accepts_hit_from(self, source: Option<Team>) -> bool {
        match source {
            None => true,
            Some(source) => source != self,
        }
    }
}

/// What a hit did to its target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HitOutcome {
    /// No effect (invincible, already dead).
    Ignored,
    /// Target survived; `shake` is camera shake to add.
    Damaged { shake: f32 },
    /// Target died on this hit.
    Destroyed { shake: f32 },
}

impl HitOutcome {
    pub fn shake(&self) -> f32 {
        match self {
            HitOutcome::Ignored => 0.0,
            HitOutcome::Damaged { shake } | HitOutcome::Destroyed { shake } => *shake,
        }
    }

    pub fn landed(&self) -> bool {
        !matches!(self, HitOutcome::Ignored)
    }
}

/// Something that takes damage and knockback.
///
/// `on_hit` updates only the component's own state. Knockback is returned to
/// the caller through the outcome contract: when the outcome is not
/// [`HitOutcome::Ignored`] the caller adds `knockback` to the target's
/// [`RigidBody`](super::rigidbody::RigidBody) velocity.
pub trait Hittable {
    fn team(&self) -> Team;
    fn on_hit(&mut self, amount: i32, knockback: Vec2) -> HitOutcome;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_friendly_fire_filtered() {
        assert!(!Team::Player.accepts_hit_from(Some(Team::Player)));
        assert!(Team::Player.accepts_hit_from(Some(Team::Enemy)));
        assert!(Team::Enemy.accepts_hit_from(Some(Team::Player)));
        assert!(Team::Neutral.accepts_hit_from(Some(Team::Player)));
    }

    #[test]
    fn test_sourceless_hits_land_on_everyone() {
        assert!(Team::Player.accepts_hit_from(None));
        assert!(Team::Enemy.accepts_hit_from(None));
        assert!(Team::Neutral.accepts_hit_from(None));
    }

    #[test]
    fn test_outcome_shake() {
        assert_eq!(HitOutcome::Ignored.shake(), 0.0);
        assert_eq!(HitOutcome::Damaged { shake: 2.0 }.shake(), 2.0);
        assert!(HitOutcome::Destroyed { shake: 0.0 }.landed());
        assert!(!HitOutcome::Ignored.landed());
    }
}
