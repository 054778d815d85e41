//! Combat domain: the hittable capability and its lookup table.

use bevy::prelude::*;
use std::collections::HashMap;

use crate::physics::ColliderHit;

/// Anything a melee attack can land on.
pub trait Hittable {
    /// True while the target is not accepting damage (recently hit or dead).
    fn was_hit(&self) -> bool;

    /// Whether a pogo off this target may use its own upward force.
    fn gives_upward_force(&self) -> bool {
        false
    }

    fn upward_force(&self) -> f32 {
        0.0
    }

    fn hit(&mut self, point: Vec2, direction: Vec2, damage: i32);
}

/// Resolves a query hit to the hittable it belongs to.
pub trait TargetTable {
    /// Look up by collider entity first, then by the collider's owner.
    /// Returns the target's identity alongside the capability.
    fn hittable(&mut self, hit: &ColliderHit) -> Option<(Entity, &mut dyn Hittable)>;
}

/// Health with a short invincibility window after each non-lethal hit.
#[derive(Component, Debug, Clone)]
pub struct Damageable {
    pub max_health: i32,
    pub invincibility_duration: f32,
    pub gives_upward_force: bool,
    pub upward_force: f32,
    current_health: i32,
    invincibility_timer: f32,
    was_hit: bool,
    last_hit: Option<(Vec2, Vec2)>,
}

impl Default for Damageable {
    fn default() -> Self {
        Self::new(3)
    }
}

impl Damageable {
    pub fn new(max_health: i32) -> Self {
        Self {
            max_health,
            invincibility_duration: 0.2,
            gives_upward_force: false,
            upward_force: 0.0,
            current_health: max_health,
            invincibility_timer: 0.0,
            was_hit: false,
            last_hit: None,
        }
    }

    pub fn with_invincibility(mut self, duration: f32) -> Self {
        self.invincibility_duration = duration;
        self
    }

    /// Opt in to boosting pogo recoil off this target.
    pub fn with_upward_force(mut self, force: f32) -> Self {
        self.gives_upward_force = true;
        self.upward_force = force;
        self
    }

    pub fn health(&self) -> i32 {
        self.current_health
    }

    pub fn is_dead(&self) -> bool {
        self.current_health <= 0
    }

    pub fn is_invincible(&self) -> bool {
        self.invincibility_timer > 0.0
    }

    /// Contact point and direction of the last hit that landed.
    pub fn last_hit(&self) -> Option<(Vec2, Vec2)> {
        self.last_hit
    }

    /// Returns true if the damage was applied.
    pub fn take_damage(&mut self, damage: i32) -> bool {
        if self.was_hit || self.current_health <= 0 {
            return false;
        }

        self.current_health -= damage;
        if self.current_health <= 0 {
            // Dead targets stay "hit" forever.
            self.current_health = 0;
            self.was_hit = true;
            self.invincibility_timer = 0.0;
        } else {
            self.was_hit = true;
            self.invincibility_timer = self.invincibility_duration;
        }
        true
    }

    /// Advance the invincibility window.
    pub fn tick(&mut self, dt: f32) {
        if self.invincibility_timer <= 0.0 {
            return;
        }
        self.invincibility_timer = (self.invincibility_timer - dt).max(0.0);
        if self.invincibility_timer <= 0.0 && !self.is_dead() {
            self.was_hit = false;
        }
    }
}

impl Hittable for Damageable {
    fn was_hit(&self) -> bool {
        self.was_hit
    }

    fn gives_upward_force(&self) -> bool {
        self.gives_upward_force
    }

    fn upward_force(&self) -> f32 {
        self.upward_force
    }

    fn hit(&mut self, point: Vec2, direction: Vec2, damage: i32) {
        if self.take_damage(damage) {
            self.last_hit = Some((point, direction));
        }
    }
}

/// In-memory target table keyed by entity.
#[derive(Debug, Clone)]
pub struct HittableMap<T = Damageable> {
    targets: HashMap<Entity, T>,
}

impl<T> Default for HittableMap<T> {
    fn default() -> Self {
        Self {
            targets: HashMap::default(),
        }
    }
}

impl<T: Hittable> HittableMap<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, entity: Entity, target: T) {
        self.targets.insert(entity, target);
    }

    pub fn remove(&mut self, entity: Entity) -> Option<T> {
        self.targets.remove(&entity)
    }

    pub fn get(&self, entity: Entity) -> Option<&T> {
        self.targets.get(&entity)
    }

    pub fn get_mut(&mut self, entity: Entity) -> Option<&mut T> {
        self.targets.get_mut(&entity)
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&Entity, &mut T)> {
        self.targets.iter_mut()
    }
}

impl<T: Hittable> TargetTable for HittableMap<T> {
    fn hittable(&mut self, hit: &ColliderHit) -> Option<(Entity, &mut dyn Hittable)> {
        let key = if self.targets.contains_key(&hit.collider) {
            hit.collider
        } else {
            hit.owner
        };
        self.targets
            .get_mut(&key)
            .map(|target| (key, target as &mut dyn Hittable))
    }
}
