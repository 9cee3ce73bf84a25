//! Rebuilds the dynamic half of the [`CollisionWorld`] snapshot.
//!
//! Runs first every tick. Every entity with a [`CollisionLayer`] contributes
//! its current box; the static level geometry is left untouched. All sweeps
//! and overlap queries for the rest of the tick see this snapshot.

use bevy_ecs::prelude::*;

use crate::components::boxcollider::BoxCollider;
use crate::components::collisionlayer::CollisionLayer;
use crate::components::mapposition::MapPosition;
use crate::resources::collisionworld::{Collider, CollisionWorld};

pub fn sync_collision_world(
    mut world: ResMut<CollisionWorld>,
    query: Query<(Entity, &MapPosition, &BoxCollider, &CollisionLayer)>,
) {
    world.clear_dynamic();
    for (entity, position, collider, layer) in query.iter() {
        world.push_dynamic(Collider {
            bounds: collider.aabb(position.pos),
            layers: layer.layers,
            one_way: layer.one_way,
            trigger: layer.trigger,
            entity: Some(entity),
        });
    }
}
