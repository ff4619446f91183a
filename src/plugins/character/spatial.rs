//! [`MotionWorld`] backed by avian shape casts against world geometry.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::common::layers::Layer;
use crate::common::space::screen_to_world;

use super::motion::MotionWorld;

/// Gap kept between a mover and what it hit, so the next cast does not
/// start in contact.
const SKIN: f32 = 0.05;

pub fn world_filter() -> SpatialQueryFilter {
    SpatialQueryFilter::from_mask(Layer::World)
}

pub struct SpatialMotion<'a, 'w, 's> {
    query: &'a SpatialQuery<'w, 's>,
    shape: &'a Collider,
    filter: &'a SpatialQueryFilter,
}

impl<'a, 'w, 's> SpatialMotion<'a, 'w, 's> {
    pub fn new(
        query: &'a SpatialQuery<'w, 's>,
        shape: &'a Collider,
        filter: &'a SpatialQueryFilter,
    ) -> Self {
        Self { query, shape, filter }
    }

    /// Distance to the first blocker along `displacement`, if within reach.
    fn cast(&self, position: Vec2, displacement: Vec2) -> Option<f32> {
        let Ok(dir) = Dir2::new(screen_to_world(displacement)) else {
            return None;
        };
        let config = ShapeCastConfig::from_max_distance(displacement.length());
        self.query
            .cast_shape(self.shape, screen_to_world(position), 0.0, dir, &config, self.filter)
            .map(|hit| hit.distance)
    }
}

impl MotionWorld for SpatialMotion<'_, '_, '_> {
    fn attempt_move(&mut self, position: &mut Vec2, displacement: Vec2) -> bool {
        match self.cast(*position, displacement) {
            None => {
                *position += displacement;
                false
            }
            Some(distance) => {
                let travel = (distance - SKIN).max(0.0);
                *position += displacement.normalize_or_zero() * travel;
                true
            }
        }
    }

    fn would_collide(&self, position: Vec2, displacement: Vec2) -> bool {
        self.cast(position, displacement).is_some()
    }
}
