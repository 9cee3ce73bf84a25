//! Collision layers and per-collider surface tags.
//!
//! Every collider in the [`CollisionWorld`](crate::resources::collisionworld::CollisionWorld)
//! lives on one or more layers. Movers and projectiles carry a [`LayerMask`]
//! selecting which layers they treat as solid, so the player, enemies, and
//! slimeballs can each see a different slice of the same world.

use bevy_ecs::prelude::Component;

/// Bitmask of collision layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct LayerMask(pub u32);

impl LayerMask {
    /// Nothing.
    pub const NONE: Self = Self(0);

    /// Level tiles: floors, walls, one-way ledges.
    pub const GROUND: Self = Self(1 << 0);

    /// The player body.
    pub const PLAYER: Self = Self(1 << 1);

    /// Enemy bodies.
    pub const ENEMY: Self = Self(1 << 2);

    /// Slime blocks built by purple slimeballs.
    pub const BLOCK: Self = Self(1 << 3);

    /// Collectable goo drops.
    pub const PICKUP: Self = Self(1 << 4);

    /// Trigger regions (ready region).
    pub const REGION: Self = Self(1 << 5);

    /// Every layer.
    pub const ALL: Self = Self(u32::MAX);

    /// What the player walks on.
    pub const MASK_PLAYER_SOLID: Self = Self(Self::GROUND.0 | Self::BLOCK.0);

    /// What enemies walk on.
    pub const MASK_ENEMY_SOLID: Self = Self(Self::GROUND.0 | Self::BLOCK.0);

    /// What pickups rest on.
    pub const MASK_PICKUP_SOLID: Self = Self(Self::GROUND.0 | Self::BLOCK.0);

    /// What slimeballs splash against.
    pub const MASK_PROJECTILE: Self = Self(Self::GROUND.0 | Self::BLOCK.0 | Self::ENEMY.0);

    /// Everything an explosion can reach.
    pub const MASK_EXPLOSION: Self = Self(Self::PLAYER.0 | Self::ENEMY.0 | Self::BLOCK.0);

    #[inline]
    pub fn contains(self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }

    #[inline]
    pub fn intersects(self, other: Self) -> bool {
        (self.0 & other.0) != 0
    }

    #[inline]
    pub fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    #[inline]
    pub fn difference(self, other: Self) -> Self {
        Self(self.0 & !other.0)
    }
}

impl std::ops::BitOr for LayerMask {
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl std::ops::BitAnd for LayerMask {
    type Output = Self;
    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

/// Makes an entity's [`BoxCollider`](super::boxcollider::BoxCollider) visible
/// to sweeps and overlap queries.
///
/// Entities without this component can still move and collide with the
/// world, but nothing else will ever hit them.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollisionLayer {
    pub layers: LayerMask,
    /// Blocks only downward vertical motion.
    pub one_way: bool,
    /// Reported by overlap queries but never by sweeps that ignore triggers.
    pub trigger: bool,
}

impl CollisionLayer {
    pub fn new(layers: LayerMask) -> Self {
        Self {
            layers,
            one_way: false,
            trigger: false,
        }
    }

    pub fn one_way(mut self) -> Self {
        self.one_way = true;
        self
    }

    pub fn trigger(mut self) -> Self {
        self.trigger = true;
        self
    }
}
