//! Vertex extraction and counter-clockwise ordering around the observer.
//!
//! Ordering uses a cheap monotone stand-in for `atan2` so that the order only depends
//! on `+ - * /` and is identical on every platform.

use std::collections::BTreeSet;

use derive_more::Constructor;
use euclid::Vector2D;
use getset::CopyGetters;
use log::debug;
use ordered_float::OrderedFloat;
use utility::*;

use crate::physics::{EntityId, PhysicsWorld};

#[derive(Clone, Copy, Debug, PartialEq, Constructor, CopyGetters)]
#[get_copy = "pub"]
pub struct CandidateVertex {
    angle_key: f32,
    point: MeterPoint,
    /// Corner of the vision square rather than a vertex of an obstacle.
    is_vision_corner: bool,
}

/// Strictly increasing with the true angle of `direction` over `(-PI, PI]`.
/// Ranges over `(-2, 2]`, with `+x` at `0` and `-x` at `2`.
pub fn comparable_angle<U>(direction: Vector2D<f32, U>) -> f32 {
    let ratio = direction.x / (direction.x.abs() + direction.y.abs());
    if direction.y >= 0.0 {
        1.0 - ratio
    } else {
        ratio - 1.0
    }
}

/// Appends one candidate per point, skipping points that sit on the observer.
pub fn push_candidate_vertices(
    origin: MeterPoint,
    points: impl IntoIterator<Item = MeterPoint>,
    is_vision_corner: bool,
    out: &mut Vec<CandidateVertex>,
) {
    for point in points {
        let direction = point - origin;
        if direction.square_length() == 0.0 {
            debug!("skipping vertex {:?} on top of the observer", point);
            continue;
        }
        out.push(CandidateVertex::new(
            comparable_angle(direction),
            point,
            is_vision_corner,
        ));
    }
}

pub fn gather_candidate_vertices<W: PhysicsWorld + ?Sized>(
    world: &W,
    origin: MeterPoint,
    obstacles: &BTreeSet<EntityId>,
    vision_corners: [MeterPoint; 4],
    out: &mut Vec<CandidateVertex>,
) {
    for &obstacle in obstacles {
        push_candidate_vertices(origin, world.shape_vertices(obstacle), false, out);
    }
    push_candidate_vertices(origin, vision_corners, true, out);
}

/// Stable, so vertices in the same direction keep their gathering order.
pub fn sort_by_angle(vertices: &mut [CandidateVertex]) {
    vertices.sort_by_key(|vertex| OrderedFloat(vertex.angle_key()));
}
