//! Geometry query contracts consumed by locomotion and combat.

use bevy::math::bounding::Aabb2d;
use bevy::prelude::*;

/// Thin-box casts used for ground and ceiling detection.
pub trait SurfaceProbe {
    /// Sweep a box of `size` centred at `origin` along `direction` for
    /// `distance` and report whether it touches anything on `mask`.
    fn cast_box(&self, origin: Vec2, size: Vec2, direction: Dir2, distance: f32, mask: u32)
    -> bool;
}

/// Shape-overlap queries used for melee hit detection.
pub trait OverlapQuery {
    /// Fill `buffer` with colliders on `mask` overlapping `area`, in whatever
    /// order the backend produces. Stops silently once the buffer is full.
    fn overlap_box(&self, area: Aabb2d, mask: u32, include_triggers: bool, buffer: &mut HitBuffer);
}

/// One collider returned by an overlap query.
#[derive(Debug, Clone, Copy)]
pub struct ColliderHit {
    pub collider: Entity,
    /// Entity the collider belongs to (rigid body or parent). Equal to
    /// `collider` for free-standing colliders.
    pub owner: Entity,
    pub bounds: Aabb2d,
}

/// Fixed-capacity result buffer for overlap queries.
#[derive(Debug, Clone)]
pub struct HitBuffer {
    hits: Vec<ColliderHit>,
    capacity: usize,
}

impl HitBuffer {
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            hits: Vec::with_capacity(capacity),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.hits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    pub fn clear(&mut self) {
        self.hits.clear();
    }

    /// Append a hit. Returns `false` without storing it when the buffer is full.
    pub fn push(&mut self, hit: ColliderHit) -> bool {
        if self.is_saturated() {
            return false;
        }
        self.hits.push(hit);
        true
    }

    /// True once the query filled every slot; results may have been cut off.
    pub fn is_saturated(&self) -> bool {
        self.hits.len() >= self.capacity
    }

    pub fn hits(&self) -> &[ColliderHit] {
        &self.hits
    }
}
