//! World geometry queried by every sweep.
//!
//! The [`CollisionWorld`] resource holds two collider lists:
//!
//! - **static** colliders built once from the level layout (floors, walls,
//!   one-way ledges)
//! - **dynamic** colliders snapshotted from entities at the start of every
//!   tick by [`sync_collision_world`](crate::systems::collisionworld::sync_collision_world)
//!
//! Both lists are read-only while movers run, so a tick never observes a
//! half-updated world. Queries go through the [`GeometryQuery`] trait so the
//! movement code can be driven by any geometry source in tests.
//!
//! # Query semantics
//!
//! - Rays and circles report the **nearest** collider accepted by the
//!   [`QueryFilter`]; ties keep the first collider found (statics first).
//! - A ray starting inside a solid collider reports a hit at distance 0.
//!   A ray starting inside a one-way collider ignores it.
//! - A circle starting overlapped reports a hit at distance 0.

use bevy_ecs::prelude::*;
use glam::Vec2;
use smallvec::SmallVec;

use crate::components::boxcollider::Aabb;
use crate::components::collisionlayer::LayerMask;

/// A single collider as seen by the geometry queries.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Collider {
    pub bounds: Aabb,
    pub layers: LayerMask,
    pub one_way: bool,
    pub trigger: bool,
    /// Owning entity, `None` for level tiles.
    pub entity: Option<Entity>,
}

impl Collider {
    /// A solid level tile.
    pub fn solid(bounds: Aabb) -> Self {
        Self {
            bounds,
            layers: LayerMask::GROUND,
            one_way: false,
            trigger: false,
            entity: None,
        }
    }

    /// A level tile that only blocks downward motion.
    pub fn one_way_platform(bounds: Aabb) -> Self {
        Self {
            one_way: true,
            ..Self::solid(bounds)
        }
    }

    pub fn with_layers(mut self, layers: LayerMask) -> Self {
        self.layers = layers;
        self
    }

    pub fn with_entity(mut self, entity: Entity) -> Self {
        self.entity = Some(entity);
        self
    }
}

/// Selects which colliders a query may report.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QueryFilter {
    pub mask: LayerMask,
    /// Never report this entity (the caster itself).
    pub exclude: Option<Entity>,
    pub ignore_one_way: bool,
    pub ignore_triggers: bool,
}

impl QueryFilter {
    pub fn new(mask: LayerMask) -> Self {
        Self {
            mask,
            exclude: None,
            ignore_one_way: false,
            ignore_triggers: false,
        }
    }

    pub fn excluding(mut self, entity: Option<Entity>) -> Self {
        self.exclude = entity;
        self
    }

    pub fn ignoring_one_way(mut self, ignore: bool) -> Self {
        self.ignore_one_way = ignore;
        self
    }

    pub fn ignoring_triggers(mut self) -> Self {
        self.ignore_triggers = true;
        self
    }

    pub fn accepts(&self, collider: &Collider) -> bool {
        if !self.mask.intersects(collider.layers) {
            return false;
        }
        if self.exclude.is_some() && collider.entity == self.exclude {
            return false;
        }
        if self.ignore_one_way && collider.one_way {
            return false;
        }
        !(self.ignore_triggers && collider.trigger)
    }
}

/// Result of a ray or circle sweep.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RaycastHit {
    /// Distance travelled along the sweep direction before contact.
    pub distance: f32,
    /// Contact point on the collider surface.
    pub point: Vec2,
    /// Center of the swept shape at contact (equal to `point` for rays).
    pub centroid: Vec2,
    /// Surface normal at the contact point.
    pub normal: Vec2,
    pub entity: Option<Entity>,
    pub layers: LayerMask,
    pub one_way: bool,
    pub trigger: bool,
    /// Bounds of the collider that was hit.
    pub bounds: Aabb,
}

/// Nearest-hit geometry queries used by movers and projectiles.
pub trait GeometryQuery {
    /// Cast a ray from `origin` along `direction` for at most `max_distance`.
    fn raycast(
        &self,
        origin: Vec2,
        direction: Vec2,
        max_distance: f32,
        filter: QueryFilter,
    ) -> Option<RaycastHit>;

    /// Sweep a circle of `radius` from `origin` along `direction` for at most
    /// `max_distance`.
    fn circle_cast(
        &self,
        origin: Vec2,
        radius: f32,
        direction: Vec2,
        max_distance: f32,
        filter: QueryFilter,
    ) -> Option<RaycastHit>;
}

/// Static level geometry plus a per-tick snapshot of entity colliders.
#[derive(Resource, Debug, Clone, Default)]
pub struct CollisionWorld {
    statics: Vec<Collider>,
    dynamics: Vec<Collider>,
}

impl CollisionWorld {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_statics(statics: Vec<Collider>) -> Self {
        Self {
            statics,
            dynamics: Vec::new(),
        }
    }

    pub fn add_static(&mut self, collider: Collider) {
        self.statics.push(collider);
    }

    pub fn set_statics(&mut self, statics: Vec<Collider>) {
        self.statics = statics;
    }

    pub fn clear_dynamic(&mut self) {
        self.dynamics.clear();
    }

    pub fn push_dynamic(&mut self, collider: Collider) {
        self.dynamics.push(collider);
    }

    pub fn statics(&self) -> &[Collider] {
        &self.statics
    }

    pub fn dynamics(&self) -> &[Collider] {
        &self.dynamics
    }

    pub fn colliders(&self) -> impl Iterator<Item = &Collider> {
        self.statics.iter().chain(self.dynamics.iter())
    }

    /// Entities whose collider touches the circle, in snapshot order.
    pub fn overlap_circle(
        &self,
        center: Vec2,
        radius: f32,
        mask: LayerMask,
    ) -> SmallVec<[Entity; 8]> {
        let filter = QueryFilter::new(mask);
        self.colliders()
            .filter(|c| filter.accepts(c) && c.bounds.overlaps_circle(center, radius))
            .filter_map(|c| c.entity)
            .collect()
    }

    /// Entities whose collider overlaps the box, in snapshot order.
    pub fn overlap_box(&self, bounds: &Aabb, mask: LayerMask) -> SmallVec<[Entity; 8]> {
        let filter = QueryFilter::new(mask);
        self.colliders()
            .filter(|c| filter.accepts(c) && c.bounds.overlaps(bounds))
            .filter_map(|c| c.entity)
            .collect()
    }

    fn nearest<F>(&self, filter: QueryFilter, max_distance: f32, mut cast: F) -> Option<RaycastHit>
    where
        F: FnMut(&Collider) -> Option<RaycastHit>,
    {
        let mut best: Option<RaycastHit> = None;
        for collider in self.colliders().filter(|c| filter.accepts(c)) {
            let Some(hit) = cast(collider) else {
                continue;
            };
            if hit.distance > max_distance {
                continue;
            }
            if best.is_none_or(|b| hit.distance < b.distance) {
                best = Some(hit);
            }
        }
        best
    }
}

impl GeometryQuery for CollisionWorld {
    fn raycast(
        &self,
        origin: Vec2,
        direction: Vec2,
        max_distance: f32,
        filter: QueryFilter,
    ) -> Option<RaycastHit> {
        let dir = direction.try_normalize()?;
        if max_distance <= 0.0 {
            return None;
        }
        self.nearest(filter, max_distance, |collider| {
            let (t_enter, normal) = ray_aabb(origin, dir, &collider.bounds)?;
            let (distance, normal) = if t_enter < 0.0 {
                if collider.one_way {
                    return None;
                }
                (0.0, -dir)
            } else {
                (t_enter, normal)
            };
            let point = origin + dir * distance;
            Some(hit_on(collider, distance, point, point, normal))
        })
    }

    fn circle_cast(
        &self,
        origin: Vec2,
        radius: f32,
        direction: Vec2,
        max_distance: f32,
        filter: QueryFilter,
    ) -> Option<RaycastHit> {
        let dir = direction.try_normalize()?;
        if max_distance <= 0.0 {
            return None;
        }
        self.nearest(filter, max_distance, |collider| {
            let (distance, point, normal) = circle_aabb(origin, radius, dir, &collider.bounds)?;
            Some(hit_on(collider, distance, point, origin + dir * distance, normal))
        })
    }
}

fn hit_on(collider: &Collider, distance: f32, point: Vec2, centroid: Vec2, normal: Vec2) -> RaycastHit {
    RaycastHit {
        distance,
        point,
        centroid,
        normal,
        entity: collider.entity,
        layers: collider.layers,
        one_way: collider.one_way,
        trigger: collider.trigger,
        bounds: collider.bounds,
    }
}

/// Slab test of a unit-direction ray against a box.
///
/// Returns the entry parameter and the normal of the entered face. The
/// entry parameter is negative when the origin is inside the box.
pub fn ray_aabb(origin: Vec2, dir: Vec2, bounds: &Aabb) -> Option<(f32, Vec2)> {
    let mut t_enter = f32::NEG_INFINITY;
    let mut t_exit = f32::INFINITY;
    let mut normal = -dir;

    for axis in 0..2 {
        let o = origin[axis];
        let d = dir[axis];
        let (lo, hi) = (bounds.min[axis], bounds.max[axis]);
        let axis_unit = if axis == 0 { Vec2::X } else { Vec2::Y };

        if d.abs() <= f32::EPSILON {
            if o < lo || o > hi {
                return None;
            }
            continue;
        }

        let inv = 1.0 / d;
        let mut t0 = (lo - o) * inv;
        let mut t1 = (hi - o) * inv;
        let mut face = -axis_unit;
        if t0 > t1 {
            std::mem::swap(&mut t0, &mut t1);
            face = axis_unit;
        }
        if t0 > t_enter {
            t_enter = t0;
            normal = face;
        }
        t_exit = t_exit.min(t1);
        if t_enter > t_exit {
            return None;
        }
    }

    if t_exit < 0.0 {
        return None;
    }
    Some((t_enter, normal))
}

/// Entry parameter of a unit-direction ray against a circle, clamped to 0
/// when the origin is already inside.
pub fn ray_circle(origin: Vec2, dir: Vec2, center: Vec2, radius: f32) -> Option<f32> {
    let m = origin - center;
    let b = m.dot(dir);
    let c = m.length_squared() - radius * radius;
    if c > 0.0 && b > 0.0 {
        return None;
    }
    let discriminant = b * b - c;
    if discriminant < 0.0 {
        return None;
    }
    Some((-b - discriminant.sqrt()).max(0.0))
}

/// Sweep of a circle against a box: a ray against the box inflated by the
/// radius with rounded corners.
///
/// Returns (distance, contact point on the box, normal).
pub fn circle_aabb(origin: Vec2, radius: f32, dir: Vec2, bounds: &Aabb) -> Option<(f32, Vec2, Vec2)> {
    if bounds.overlaps_circle(origin, radius) {
        return Some((0.0, bounds.closest_point(origin), -dir));
    }

    let (t, face_normal) = ray_aabb(origin, dir, &bounds.expand(radius))?;
    let sample = origin + dir * t.max(0.0);

    let corner_x = if sample.x < bounds.min.x {
        Some(bounds.min.x)
    } else if sample.x > bounds.max.x {
        Some(bounds.max.x)
    } else {
        None
    };
    let corner_y = if sample.y < bounds.min.y {
        Some(bounds.min.y)
    } else if sample.y > bounds.max.y {
        Some(bounds.max.y)
    } else {
        None
    };

    match (corner_x, corner_y) {
        (Some(x), Some(y)) => {
            let corner = Vec2::new(x, y);
            let t = ray_circle(origin, dir, corner, radius)?;
            let centroid = origin + dir * t;
            let normal = (centroid - corner).try_normalize().unwrap_or(-dir);
            Some((t, corner, normal))
        }
        _ => {
            let t = t.max(0.0);
            let centroid = origin + dir * t;
            Some((t, centroid - face_normal * radius, face_normal))
        }
    }
}
