//! avian2d-backed implementations of the probe and overlap contracts.

use avian2d::prelude::*;
use bevy::math::bounding::{Aabb2d, BoundingVolume};
use bevy::prelude::*;

use crate::physics::query::{ColliderHit, HitBuffer, OverlapQuery, SurfaceProbe};

/// Per-collider data needed to turn a spatial-query entity into a hit.
pub type ColliderInfo = (
    &'static ColliderAabb,
    Option<&'static ColliderOf>,
    Has<Sensor>,
);

/// Box casts against the physics world.
pub struct AvianSurfaces<'a, 'w, 's> {
    pub spatial: &'a SpatialQuery<'w, 's>,
}

impl SurfaceProbe for AvianSurfaces<'_, '_, '_> {
    fn cast_box(
        &self,
        origin: Vec2,
        size: Vec2,
        direction: Dir2,
        distance: f32,
        mask: u32,
    ) -> bool {
        let shape = Collider::rectangle(size.x, size.y);
        let filter = SpatialQueryFilter::from_mask(LayerMask(mask));
        let config = ShapeCastConfig::from_max_distance(distance);
        self.spatial
            .cast_shape(&shape, origin, 0.0, direction, &config, &filter)
            .is_some()
    }
}

/// Overlap queries against the physics world.
pub struct AvianOverlap<'a, 'w, 's, 'cw, 'cs> {
    pub spatial: &'a SpatialQuery<'w, 's>,
    pub colliders: &'a Query<'cw, 'cs, ColliderInfo>,
}

impl OverlapQuery for AvianOverlap<'_, '_, '_, '_, '_> {
    fn overlap_box(&self, area: Aabb2d, mask: u32, include_triggers: bool, buffer: &mut HitBuffer) {
        let size = area.max - area.min;
        let shape = Collider::rectangle(size.x, size.y);
        let filter = SpatialQueryFilter::from_mask(LayerMask(mask));

        for entity in self
            .spatial
            .shape_intersections(&shape, area.center(), 0.0, &filter)
        {
            let Ok((aabb, collider_of, is_sensor)) = self.colliders.get(entity) else {
                continue;
            };
            if is_sensor && !include_triggers {
                continue;
            }
            let stored = buffer.push(ColliderHit {
                collider: entity,
                owner: collider_of.map_or(entity, |c| c.body),
                bounds: Aabb2d {
                    min: aabb.min,
                    max: aabb.max,
                },
            });
            if !stored {
                break;
            }
        }
    }
}
