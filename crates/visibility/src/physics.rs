use std::collections::BTreeSet;

use derive_more::Constructor;
use utility::*;

use crate::collision_filter::CollisionFilter;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Constructor)]
pub struct EntityId(u32);

impl EntityId {
    pub fn id(&self) -> u32 {
        self.0
    }
}

/// The queries the visibility engine needs from a physics engine. Everything is in meters.
pub trait PhysicsWorld {
    /// Every entity owning at least one shape that passes `filter` and whose bounding box overlaps `region`.
    fn query_region(&self, region: MeterRect, filter: &CollisionFilter) -> BTreeSet<EntityId>;

    /// Closest point on `start -> end` that touches a shape passing `filter`.
    /// Shapes belonging to `ignored` never block the ray.
    fn ray_cast(
        &self,
        start: MeterPoint,
        end: MeterPoint,
        filter: &CollisionFilter,
        ignored: Option<EntityId>,
    ) -> Option<MeterPoint>;

    /// Fraction along `start -> end` where the ray touches `edge`, if it does.
    fn ray_cast_against_edge(&self, start: MeterPoint, end: MeterPoint, edge: &MeterLine) -> Option<f32> {
        edge.ray_cast_fraction(start, end)
    }

    /// World-space vertices of every shape the entity owns, in shape order.
    fn shape_vertices(&self, entity: EntityId) -> MeterPointList;
}
