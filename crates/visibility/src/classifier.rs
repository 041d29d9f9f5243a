//! Casts two rays a hair to either side of each candidate vertex and decides what
//! the vertex means for the visible region.

use log::{debug, trace, warn};
use ordered_float::OrderedFloat;
use utility::*;

use crate::angular_sort::CandidateVertex;
use crate::collision_filter::CollisionFilter;
use crate::debug_lines::{
    DebugLineRecorder, BOUNDARY_RAY_COLOR, DIVERGENT_RAY_COLOR, OCCLUDED_RAY_COLOR,
    VERTEX_HIT_RAY_COLOR,
};
use crate::discontinuity::{PendingDiscontinuity, Winding};
use crate::double_ray::DoubleRay;
use crate::physics::{EntityId, PhysicsWorld};

/// All in meters, except the angle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayTolerances {
    pub ray_angle_radians: f32,
    pub vertex_hit_distance: f32,
    pub obstacle_hit_threshold: f32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum VertexClass {
    /// Something closer hides the vertex. Contributes nothing.
    Occluded,
    /// Both rays stopped on the vertex.
    VertexHit,
    /// Both rays hit, but one of them slipped past the vertex onto something further.
    Divergent,
    /// One ray hit and the other ran out to the vision square.
    BoundaryHit,
    /// A vision square corner with nothing in front of it.
    OpenCorner,
    /// Neither ray hit anything and the vertex is not a vision corner.
    Unresolved,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ClassifierOutput {
    pub double_rays: Vec<DoubleRay>,
    pub discontinuities: Vec<PendingDiscontinuity>,
    pub vertex_hits: MeterPointList,
}

impl ClassifierOutput {
    pub fn clear(&mut self) {
        self.double_rays.clear();
        self.discontinuities.clear();
        self.vertex_hits.clear();
    }

    // A right discontinuity borders the edge ending at the double ray about to be pushed,
    // a left one borders the edge starting there.
    fn push_discontinuity(&mut self, near: MeterPoint, far: MeterPoint, winding: Winding) {
        let upcoming = self.double_rays.len() as isize;
        let raw_edge_index = match winding {
            Winding::Right => upcoming - 1,
            Winding::Left => upcoming,
        };
        self.discontinuities
            .push(PendingDiscontinuity::new(near, far, winding, raw_edge_index));
    }
}

/// The per-layer state every vertex is classified against.
pub struct RayCaster<'w, W: PhysicsWorld + ?Sized> {
    pub world: &'w W,
    pub observer: EntityId,
    pub origin: MeterPoint,
    pub filter: CollisionFilter,
    /// Long enough to leave the vision square from the observer in any direction.
    pub ray_length: f32,
    pub vision_bounds: [MeterLine; 4],
    pub tolerances: RayTolerances,
}

impl<'w, W: PhysicsWorld + ?Sized> RayCaster<'w, W> {
    /// End points of the clockwise and anticlockwise rays around `vertex`.
    pub fn ray_targets(&self, vertex: MeterPoint) -> [MeterPoint; 2] {
        let direction = (vertex - self.origin).normalize();
        let offset = self.tolerances.ray_angle_radians;
        [-offset, offset].map(|angle| {
            self.origin + rotate_vect_by_small_angle(direction, angle) * self.ray_length
        })
    }

    /// Where a ray that hit nothing crosses the (extended) vision square.
    pub fn cast_against_vision_bounds(&self, target: MeterPoint) -> Option<MeterPoint> {
        self.vision_bounds
            .iter()
            .filter_map(|bound| self.world.ray_cast_against_edge(self.origin, target, bound))
            .min_by_key(|&t| OrderedFloat(t))
            .map(|t| self.origin.lerp(target, t))
    }

    fn cast(&self, target: MeterPoint) -> Option<MeterPoint> {
        self.world
            .ray_cast(self.origin, target, &self.filter, Some(self.observer))
    }

    pub fn classify_vertex(
        &self,
        vertex: &CandidateVertex,
        output: &mut ClassifierOutput,
        debug_lines: &mut DebugLineRecorder,
    ) -> VertexClass {
        let point = vertex.point();
        let targets = self.ray_targets(point);
        let class = match targets.map(|target| self.cast(target)) {
            [Some(clockwise_hit), Some(anticlockwise_hit)] => {
                self.classify_double_hit(point, clockwise_hit, anticlockwise_hit, output, debug_lines)
            }
            [Some(clockwise_hit), None] => self.classify_single_hit(
                point,
                clockwise_hit,
                targets[1],
                Winding::Right,
                output,
                debug_lines,
            ),
            [None, Some(anticlockwise_hit)] => self.classify_single_hit(
                point,
                anticlockwise_hit,
                targets[0],
                Winding::Left,
                output,
                debug_lines,
            ),
            [None, None] if vertex.is_vision_corner() => {
                output.double_rays.push(DoubleRay::at_vertex(point));
                VertexClass::OpenCorner
            }
            [None, None] => {
                debug!(
                    "neither ray around {:?} hit anything, including its own shape",
                    point
                );
                VertexClass::Unresolved
            }
        };
        trace!("vertex {:?} classified as {:?}", point, class);
        class
    }

    fn classify_double_hit(
        &self,
        vertex: MeterPoint,
        clockwise_hit: MeterPoint,
        anticlockwise_hit: MeterPoint,
        output: &mut ClassifierOutput,
        debug_lines: &mut DebugLineRecorder,
    ) -> VertexClass {
        // Squared on both sides, so the margin shrinks with distance from the observer.
        let threshold = self.tolerances.obstacle_hit_threshold;
        let vertex_square_distance = (vertex - self.origin).square_length();
        let hidden_by = |hit: MeterPoint| {
            (hit - self.origin).square_length() + threshold * threshold < vertex_square_distance
        };
        if hidden_by(clockwise_hit) && hidden_by(anticlockwise_hit) {
            debug_lines.cast_ray(self.origin, clockwise_hit, OCCLUDED_RAY_COLOR);
            return VertexClass::Occluded;
        }

        if (clockwise_hit - anticlockwise_hit).length() < self.tolerances.vertex_hit_distance {
            output.vertex_hits.push(vertex);
            output.double_rays.push(DoubleRay::at_vertex(vertex));
            debug_lines.cast_ray(self.origin, vertex, VERTEX_HIT_RAY_COLOR);
            return VertexClass::VertexHit;
        }

        let clockwise_gap = (clockwise_hit - vertex).square_length();
        let anticlockwise_gap = (anticlockwise_hit - vertex).square_length();
        if clockwise_gap < anticlockwise_gap {
            output.push_discontinuity(vertex, anticlockwise_hit, Winding::Right);
            output
                .double_rays
                .push(DoubleRay::new(vertex, anticlockwise_hit, true, false));
            debug_lines.cast_ray(self.origin, anticlockwise_hit, DIVERGENT_RAY_COLOR);
        } else {
            output.push_discontinuity(vertex, clockwise_hit, Winding::Left);
            output
                .double_rays
                .push(DoubleRay::new(clockwise_hit, vertex, false, true));
            debug_lines.cast_ray(self.origin, clockwise_hit, DIVERGENT_RAY_COLOR);
        }
        VertexClass::Divergent
    }

    /// `winding` is [Winding::Right] when the clockwise ray was the one that hit.
    fn classify_single_hit(
        &self,
        vertex: MeterPoint,
        hit: MeterPoint,
        missed_target: MeterPoint,
        winding: Winding,
        output: &mut ClassifierOutput,
        debug_lines: &mut DebugLineRecorder,
    ) -> VertexClass {
        let Some(boundary_point) = self.cast_against_vision_bounds(missed_target) else {
            warn!(
                "ray towards {:?} left the vision square without crossing its edge",
                missed_target
            );
            return VertexClass::Unresolved;
        };
        let near = if (hit - vertex).length() < self.tolerances.vertex_hit_distance {
            vertex
        } else {
            hit
        };
        output.push_discontinuity(near, boundary_point, winding);
        output.double_rays.push(match winding {
            Winding::Right => DoubleRay::new(near, boundary_point, true, false),
            Winding::Left => DoubleRay::new(boundary_point, near, false, true),
        });
        debug_lines.cast_ray(self.origin, boundary_point, BOUNDARY_RAY_COLOR);
        VertexClass::BoundaryHit
    }

    /// Classifies already sorted vertices in order, appending to `output`.
    pub fn classify_all(
        &self,
        sorted_vertices: &[CandidateVertex],
        output: &mut ClassifierOutput,
        debug_lines: &mut DebugLineRecorder,
    ) {
        for vertex in sorted_vertices {
            self.classify_vertex(vertex, output, debug_lines);
        }
    }
}

/// Sides of the vision square, each pushed outwards along itself by `extension` at both ends.
pub fn vision_bounds(corners: [MeterPoint; 4], extension: f32) -> [MeterLine; 4] {
    [0, 1, 2, 3]
        .map(|i| MeterLine::new(corners[i], corners[(i + 1) % 4]).extended_at_both_ends(extension))
}
