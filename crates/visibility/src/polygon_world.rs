//! A small in-memory [PhysicsWorld] made of polygon shapes.

use std::collections::{BTreeMap, BTreeSet};

use derive_more::Constructor;
use getset::Getters;
use itertools::Itertools;
use log::trace;
use ordered_float::OrderedFloat;
use utility::*;

use crate::collision_filter::CollisionFilter;
use crate::physics::{EntityId, PhysicsWorld};

/// Closed polygon, or a lone edge when given two vertices.
#[derive(Clone, Debug, PartialEq, Constructor, Getters)]
#[get = "pub"]
pub struct PolygonShape {
    vertices: MeterPointList,
    filter: CollisionFilter,
}

impl PolygonShape {
    pub fn rectangle(min: MeterPoint, max: MeterPoint, filter: CollisionFilter) -> Self {
        Self::new(rect_corners_ccw(MeterRect::new(min, max)).to_vec(), filter)
    }

    pub fn square(center: MeterPoint, side_length: f32, filter: CollisionFilter) -> Self {
        let square = square_around_point(center, side_length);
        Self::rectangle(square.min, square.max, filter)
    }

    pub fn edges(&self) -> impl Iterator<Item = (MeterPoint, MeterPoint)> + '_ {
        self.vertices.iter().copied().circular_tuple_windows()
    }

    pub fn bounding_box(&self) -> Option<MeterRect> {
        if self.vertices.is_empty() {
            None
        } else {
            Some(MeterRect::from_points(self.vertices.iter().copied()))
        }
    }

    fn ray_cast_fraction(&self, start: MeterPoint, end: MeterPoint) -> Option<f32> {
        self.edges()
            .filter_map(|(a, b)| segment_intersection_fractions(start, end, a, b))
            .map(|(along_ray, _)| along_ray)
            .min_by_key(|&t| OrderedFloat(t))
    }
}

// Touching boxes overlap.
fn boxes_overlap(a: &MeterRect, b: &MeterRect) -> bool {
    a.min.x <= b.max.x && b.min.x <= a.max.x && a.min.y <= b.max.y && b.min.y <= a.max.y
}

#[derive(Clone, Debug, Default)]
pub struct PolygonWorld {
    bodies: BTreeMap<EntityId, Vec<PolygonShape>>,
}

impl PolygonWorld {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_shape(&mut self, entity: EntityId, shape: PolygonShape) {
        self.bodies.entry(entity).or_default().push(shape);
    }

    pub fn with_shape(mut self, entity: EntityId, shape: PolygonShape) -> Self {
        self.add_shape(entity, shape);
        self
    }

    pub fn shapes_of(&self, entity: EntityId) -> &[PolygonShape] {
        self.bodies.get(&entity).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn translate_body(&mut self, entity: EntityId, offset: MeterMove) {
        if let Some(shapes) = self.bodies.get_mut(&entity) {
            shapes
                .iter_mut()
                .flat_map(|shape| shape.vertices.iter_mut())
                .for_each(|vertex| *vertex += offset);
        }
    }
}

impl PhysicsWorld for PolygonWorld {
    fn query_region(&self, region: MeterRect, filter: &CollisionFilter) -> BTreeSet<EntityId> {
        self.bodies
            .iter()
            .filter(|(_, shapes)| {
                shapes.iter().any(|shape| {
                    filter.should_collide(shape.filter())
                        && shape
                            .bounding_box()
                            .map_or(false, |bounds| boxes_overlap(&bounds, &region))
                })
            })
            .map(|(&entity, _)| entity)
            .collect()
    }

    fn ray_cast(
        &self,
        start: MeterPoint,
        end: MeterPoint,
        filter: &CollisionFilter,
        ignored: Option<EntityId>,
    ) -> Option<MeterPoint> {
        let closest = self
            .bodies
            .iter()
            .filter(|&(&entity, _)| Some(entity) != ignored)
            .flat_map(|(_, shapes)| shapes)
            .filter(|shape| filter.should_collide(shape.filter()))
            .filter_map(|shape| shape.ray_cast_fraction(start, end))
            .min_by_key(|&t| OrderedFloat(t))?;
        trace!("ray {:?} -> {:?} stopped at fraction {}", start, end, closest);
        Some(start.lerp(end, closest))
    }

    fn shape_vertices(&self, entity: EntityId) -> MeterPointList {
        self.shapes_of(entity)
            .iter()
            .flat_map(|shape| shape.vertices().iter().copied())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use euclid::{point2, vec2};
    use ntest::{assert_about_eq, assert_false};
    use pretty_assertions::assert_eq;

    use super::*;

    fn wall_world() -> PolygonWorld {
        PolygonWorld::new().with_shape(
            EntityId::new(7),
            PolygonShape::rectangle(point2(2.0, -1.0), point2(3.0, 1.0), CollisionFilter::default()),
        )
    }

    #[test]
    fn test_ray_stops_at_near_face() {
        let hit = wall_world()
            .ray_cast(
                point2(0.0, 0.0),
                point2(10.0, 0.0),
                &CollisionFilter::default(),
                None,
            )
            .unwrap();
        assert_about_eq!(hit.x, 2.0);
        assert_about_eq!(hit.y, 0.0);
    }

    #[test]
    fn test_ignored_entity_does_not_block() {
        let hit = wall_world().ray_cast(
            point2(0.0, 0.0),
            point2(10.0, 0.0),
            &CollisionFilter::default(),
            Some(EntityId::new(7)),
        );
        assert_eq!(hit, None);
    }

    #[test]
    fn test_filtered_shapes_do_not_block() {
        let sight = CollisionFilter::default().with_mask(0b10);
        let hit = wall_world().ray_cast(point2(0.0, 0.0), point2(10.0, 0.0), &sight, None);
        assert_eq!(hit, None);
        assert!(wall_world()
            .query_region(square_around_point(point2(0.0, 0.0), 10.0), &sight)
            .is_empty());
    }

    #[test]
    fn test_query_region_counts_touching_boxes() {
        let world = wall_world();
        let touching = MeterRect::new(point2(-2.0, -2.0), point2(2.0, 2.0));
        let apart = MeterRect::new(point2(-2.0, -2.0), point2(1.9, 2.0));
        let filter = CollisionFilter::default();
        assert_eq!(
            world.query_region(touching, &filter),
            BTreeSet::from([EntityId::new(7)])
        );
        assert!(world.query_region(apart, &filter).is_empty());
    }

    #[test]
    fn test_short_ray_misses() {
        let hit = wall_world().ray_cast(
            point2(0.0, 0.0),
            point2(1.5, 0.0),
            &CollisionFilter::default(),
            None,
        );
        assert_false!(hit.is_some());
    }

    #[test]
    fn test_vertices_of_all_shapes_in_order() {
        let world = wall_world().with_shape(
            EntityId::new(7),
            PolygonShape::new(
                vec![point2(5.0, 5.0), point2(6.0, 5.0)],
                CollisionFilter::default(),
            ),
        );
        let vertices = world.shape_vertices(EntityId::new(7));
        assert_eq!(vertices.len(), 6);
        assert_eq!(vertices[0], point2(2.0, -1.0));
        assert_eq!(vertices[5], point2(6.0, 5.0));
        assert!(world.shape_vertices(EntityId::new(8)).is_empty());
    }

    #[test]
    fn test_translate_body_moves_every_vertex() {
        let mut world = wall_world();
        world.translate_body(EntityId::new(7), vec2(1.0, 0.0));
        assert_eq!(world.shape_vertices(EntityId::new(7))[0], point2(3.0, -1.0));
    }
}
