use std::collections::BTreeSet;

use log::trace;
use utility::*;

use crate::collision_filter::CollisionFilter;
use crate::physics::{EntityId, PhysicsWorld};

/// Entities that could block sight inside `vision_square`, never including the observer itself.
pub fn collect_candidate_obstacles<W: PhysicsWorld + ?Sized>(
    world: &W,
    observer: EntityId,
    vision_square: MeterRect,
    filter: &CollisionFilter,
) -> BTreeSet<EntityId> {
    let mut obstacles = world.query_region(vision_square, filter);
    obstacles.remove(&observer);
    trace!(
        "{} candidate obstacles around {:?}",
        obstacles.len(),
        observer
    );
    obstacles
}

#[cfg(test)]
mod tests {
    use euclid::point2;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::polygon_world::{PolygonShape, PolygonWorld};

    #[test]
    fn test_observer_is_never_a_candidate() {
        let observer = EntityId::new(0);
        let rock = EntityId::new(1);
        let far_rock = EntityId::new(2);
        let filter = CollisionFilter::default();
        let world = PolygonWorld::new()
            .with_shape(observer, PolygonShape::square(point2(0.0, 0.0), 0.5, filter))
            .with_shape(rock, PolygonShape::square(point2(3.0, 0.0), 1.0, filter))
            .with_shape(far_rock, PolygonShape::square(point2(30.0, 0.0), 1.0, filter));

        let found = collect_candidate_obstacles(
            &world,
            observer,
            square_around_point(point2(0.0, 0.0), 20.0),
            &filter,
        );
        assert_eq!(found, BTreeSet::from([rock]));
    }

    #[test]
    fn test_rejected_by_filter() {
        let glass = CollisionFilter::default().with_category(0b100);
        let sight = CollisionFilter::default().with_mask(0b011);
        let world = PolygonWorld::new().with_shape(
            EntityId::new(5),
            PolygonShape::square(point2(2.0, 2.0), 1.0, glass),
        );
        let found = collect_candidate_obstacles(
            &world,
            EntityId::new(0),
            square_around_point(point2(0.0, 0.0), 20.0),
            &sight,
        );
        assert!(found.is_empty());
    }
}
