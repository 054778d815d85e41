//! In-memory collider set for headless simulation and tests.

use bevy::math::bounding::{Aabb2d, BoundingVolume, IntersectsVolume};
use bevy::prelude::*;

use crate::physics::query::{ColliderHit, HitBuffer, OverlapQuery, SurfaceProbe};

/// Tolerance for treating a box as resting on (not inside) a surface.
const CONTACT_EPSILON: f32 = 1e-4;

#[derive(Debug, Clone, Copy)]
pub struct StaticCollider {
    pub entity: Entity,
    pub owner: Entity,
    pub bounds: Aabb2d,
    pub layers: u32,
    pub trigger: bool,
}

impl StaticCollider {
    /// Solid box owned by itself.
    pub fn solid(entity: Entity, center: Vec2, size: Vec2, layers: u32) -> Self {
        Self {
            entity,
            owner: entity,
            bounds: Aabb2d::new(center, size * 0.5),
            layers,
            trigger: false,
        }
    }

    pub fn with_owner(mut self, owner: Entity) -> Self {
        self.owner = owner;
        self
    }

    pub fn as_trigger(mut self) -> Self {
        self.trigger = true;
        self
    }

    fn matches(&self, mask: u32) -> bool {
        self.layers & mask != 0
    }
}

/// Which sides of a moving box were stopped by solid geometry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Contacts {
    pub floor: bool,
    pub ceiling: bool,
    pub wall: bool,
}

#[derive(Debug, Default, Clone)]
pub struct ColliderSet {
    colliders: Vec<StaticCollider>,
}

impl ColliderSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, collider: StaticCollider) {
        self.colliders.push(collider);
    }

    /// Drop every collider belonging to `owner`.
    pub fn remove_owner(&mut self, owner: Entity) {
        self.colliders.retain(|c| c.owner != owner);
    }

    pub fn len(&self) -> usize {
        self.colliders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colliders.is_empty()
    }

    fn solids(&self, mask: u32) -> impl Iterator<Item = &StaticCollider> {
        self.colliders
            .iter()
            .filter(move |c| !c.trigger && c.matches(mask))
    }

    /// Move `bounds` by `delta`, stopping at solid geometry on `mask`.
    ///
    /// Resolves the vertical axis first, then the horizontal one. Returns the
    /// displacement actually applied and the contacts that limited it.
    pub fn move_box(&self, bounds: Aabb2d, delta: Vec2, mask: u32) -> (Vec2, Contacts) {
        let mut contacts = Contacts::default();

        let mut dy = delta.y;
        for solid in self.solids(mask) {
            let other = solid.bounds;
            if !spans_overlap(bounds.min.x, bounds.max.x, other.min.x, other.max.x) {
                continue;
            }
            if dy <= 0.0 && bounds.min.y >= other.max.y - CONTACT_EPSILON {
                let limit = other.max.y - bounds.min.y;
                if dy <= limit {
                    dy = limit;
                    contacts.floor = true;
                }
            } else if dy > 0.0 && bounds.max.y <= other.min.y + CONTACT_EPSILON {
                let limit = other.min.y - bounds.max.y;
                if dy >= limit {
                    dy = limit;
                    contacts.ceiling = true;
                }
            }
        }
        let moved = translate(bounds, Vec2::new(0.0, dy));

        let mut dx = delta.x;
        for solid in self.solids(mask) {
            let other = solid.bounds;
            if !spans_overlap(moved.min.y, moved.max.y, other.min.y, other.max.y) {
                continue;
            }
            if dx > 0.0 && moved.max.x <= other.min.x + CONTACT_EPSILON {
                let limit = other.min.x - moved.max.x;
                if dx >= limit {
                    dx = limit;
                    contacts.wall = true;
                }
            } else if dx < 0.0 && moved.min.x >= other.max.x - CONTACT_EPSILON {
                let limit = other.max.x - moved.min.x;
                if dx <= limit {
                    dx = limit;
                    contacts.wall = true;
                }
            }
        }

        (Vec2::new(dx, dy), contacts)
    }
}

/// Open-interval overlap so boxes that merely share an edge do not collide.
fn spans_overlap(a_min: f32, a_max: f32, b_min: f32, b_max: f32) -> bool {
    a_min < b_max - CONTACT_EPSILON && a_max > b_min + CONTACT_EPSILON
}

fn translate(bounds: Aabb2d, offset: Vec2) -> Aabb2d {
    Aabb2d {
        min: bounds.min + offset,
        max: bounds.max + offset,
    }
}

impl SurfaceProbe for ColliderSet {
    fn cast_box(
        &self,
        origin: Vec2,
        size: Vec2,
        direction: Dir2,
        distance: f32,
        mask: u32,
    ) -> bool {
        let start = Aabb2d::new(origin, size * 0.5);
        let swept = start.merge(&translate(start, *direction * distance));
        self.solids(mask).any(|c| swept.intersects(&c.bounds))
    }
}

impl OverlapQuery for ColliderSet {
    fn overlap_box(&self, area: Aabb2d, mask: u32, include_triggers: bool, buffer: &mut HitBuffer) {
        let candidates = self
            .colliders
            .iter()
            .filter(|c| c.matches(mask) && (include_triggers || !c.trigger))
            .filter(|c| area.intersects(&c.bounds));
        for collider in candidates {
            let stored = buffer.push(ColliderHit {
                collider: collider.entity,
                owner: collider.owner,
                bounds: collider.bounds,
            });
            if !stored {
                break;
            }
        }
    }
}
