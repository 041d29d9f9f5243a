use itertools::Itertools;
use utility::*;

use crate::double_ray::DoubleRay;
use crate::layer::VisibleEdge;

/// Edge `i` runs from the anticlockwise end of double ray `i` to the clockwise end of double ray `i + 1`,
/// wrapping at the end.
pub fn stitch_edges(double_rays: &[DoubleRay], pixels_per_meter: f32) -> Vec<VisibleEdge> {
    double_rays
        .iter()
        .circular_tuple_windows()
        .map(|(current, next)| {
            VisibleEdge::new(
                meter_point_to_pixel_point(current.second, pixels_per_meter),
                meter_point_to_pixel_point(next.first, pixels_per_meter),
            )
        })
        .collect()
}

/// Every double ray end in sweep order, with repeats from single point double rays removed.
/// Consecutive points are joined either by a visible edge or by a double ray.
pub fn boundary_loop(double_rays: &[DoubleRay], pixels_per_meter: f32) -> PixelPointList {
    let mut points = double_rays
        .iter()
        .flat_map(|ray| [ray.first, ray.second])
        .map(|point| meter_point_to_pixel_point(point, pixels_per_meter))
        .collect_vec();
    points.dedup();
    if points.len() > 1 && points.first() == points.last() {
        points.pop();
    }
    points
}
