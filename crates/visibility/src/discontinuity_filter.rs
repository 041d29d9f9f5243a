//! Removes discontinuities whose gap is narrower than a threshold, so that small
//! cracks between obstacles do not count as ways through.
//!
//! Works entirely in pixels.

use derive_more::Constructor;
use log::trace;
use utility::*;

use crate::cyclic::CyclicIndex;
use crate::discontinuity::Discontinuity;
use crate::layer::VisibleEdge;

/// Span bridged by a removed discontinuity, from the closest point across the gap to its near point.
#[derive(Clone, Copy, Debug, PartialEq, Constructor)]
pub struct MarkedHole {
    pub start: PixelPoint,
    pub end: PixelPoint,
}

impl MarkedHole {
    pub fn blocks_sight_line(&self, observer: PixelPoint, target: PixelPoint) -> bool {
        segment_intersection_fractions(observer, target, self.start, self.end).is_some()
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct FilteredDiscontinuities {
    pub kept: Vec<Discontinuity>,
    pub marked_holes: Vec<MarkedHole>,
}

/// Points on the visible side of `discontinuity` within `threshold` of its near point.
fn points_across_short_gap(
    observer: PixelPoint,
    discontinuity: &Discontinuity,
    edges: &[VisibleEdge],
    discontinuities: &[Discontinuity],
    threshold: f32,
) -> PixelPointList {
    let near = discontinuity.near_point();
    let step = discontinuity.winding().sweep_step();
    let on_visible_side = |point: PixelPoint| step as f32 * cross_around(observer, near, point) > 0.0;
    let is_close = |point: PixelPoint| (point - near).length() < threshold;

    let mut close_points = vec![];
    let first_edge = CyclicIndex::new(discontinuity.edge_index() as isize, edges.len()).stepped(step);
    for index in first_edge.walk(step).take(edges.len() - 1) {
        let edge = &edges[index.index()];
        if !on_visible_side(edge.first) {
            break;
        }
        let closest = closest_point_on_segment(near, edge.first, edge.second);
        if is_close(closest) {
            close_points.push(closest);
        }
    }

    close_points.extend(
        discontinuities
            .iter()
            .filter(|other| {
                other.edge_index() != discontinuity.edge_index()
                    && on_visible_side(other.near_point())
            })
            .map(|other| closest_point_on_segment(near, other.near_point(), other.far_point()))
            .filter(|&closest| is_close(closest)),
    );
    close_points
}

pub fn filter_short_discontinuities(
    observer: PixelPoint,
    edges: &[VisibleEdge],
    discontinuities: &[Discontinuity],
    threshold: f32,
) -> FilteredDiscontinuities {
    if edges.is_empty() || threshold <= 0.0 {
        return FilteredDiscontinuities {
            kept: discontinuities.to_vec(),
            marked_holes: vec![],
        };
    }

    let mut survivors = vec![];
    let mut marked_holes = vec![];
    for discontinuity in discontinuities {
        let close_points =
            points_across_short_gap(observer, discontinuity, edges, discontinuities, threshold);
        match nearest_point_to(observer, close_points) {
            Some(closest) => {
                trace!(
                    "discontinuity at {:?} bridged to {:?}",
                    discontinuity.near_point(),
                    closest
                );
                marked_holes.push(MarkedHole::new(closest, discontinuity.near_point()));
            }
            None => survivors.push(*discontinuity),
        }
    }

    let kept = survivors
        .into_iter()
        .filter(|discontinuity| {
            !marked_holes
                .iter()
                .any(|hole| hole.blocks_sight_line(observer, discontinuity.near_point()))
        })
        .collect();
    FilteredDiscontinuities { kept, marked_holes }
}
