extern crate num;

use std::fmt::{Debug, Display, Formatter};

use euclid::*;
use num::traits::Signed;
use ordered_float::OrderedFloat;

pub mod coordinate_frame_conversions;
pub use coordinate_frame_conversions::*;

#[macro_export]
macro_rules! pub_mod_and_use {
    ($($module:ident), +) => {
        $(
            pub mod $module;
            pub use self::$module::*;
        )+
    };
}

#[derive(Clone, PartialEq, Copy)]
pub struct Line<T, U> {
    pub p1: Point2D<T, U>,
    pub p2: Point2D<T, U>,
}

impl<T, U> Line<T, U>
where
    T: Clone + Debug + PartialEq + Signed + Copy,
{
    pub fn new(p1: Point2D<T, U>, p2: Point2D<T, U>) -> Line<T, U> {
        assert_ne!(p1, p2);
        Line { p1, p2 }
    }
}

impl<U: Copy> Line<f32, U> {

    /// Fraction along `start -> end` where that ray first touches this segment.
    /// Both ends of the segment count as touching.
    pub fn ray_cast_fraction(&self, start: Point2D<f32, U>, end: Point2D<f32, U>) -> Option<f32> {
        segment_intersection_fractions(start, end, self.p1, self.p2)
            .map(|(along_ray, _along_segment)| along_ray)
    }

    pub fn extended_at_both_ends(&self, extra_length: f32) -> Self {
        let direction = (self.p2 - self.p1).normalize();
        Self::new(
            self.p1 - direction * extra_length,
            self.p2 + direction * extra_length,
        )
    }
}

impl<T, U> Debug for Line<T, U>
where
    T: Display + Copy,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "p1: {}, p2: {}",
            point_to_string(self.p1),
            point_to_string(self.p2),
        )
    }
}

/// Parametric crossing of segments `a1 -> a2` and `b1 -> b2`.
/// Returns `(t, u)` with the crossing at `a1 + t * (a2 - a1)` and `b1 + u * (b2 - b1)`.
/// Parallel segments never cross.
pub fn segment_intersection_fractions<U>(
    a1: Point2D<f32, U>,
    a2: Point2D<f32, U>,
    b1: Point2D<f32, U>,
    b2: Point2D<f32, U>,
) -> Option<(f32, f32)> {
    let a_dir = a2 - a1;
    let b_dir = b2 - b1;
    let denominator = a_dir.cross(b_dir);
    if denominator == 0.0 {
        return None;
    }
    let a1_to_b1 = b1 - a1;
    let t = a1_to_b1.cross(b_dir) / denominator;
    let u = a1_to_b1.cross(a_dir) / denominator;

    if (0.0..=1.0).contains(&t) && (0.0..=1.0).contains(&u) {
        Some((t, u))
    } else {
        None
    }
}

pub fn closest_point_on_segment<U>(
    point: Point2D<f32, U>,
    segment_start: Point2D<f32, U>,
    segment_end: Point2D<f32, U>,
) -> Point2D<f32, U> {
    let start_to_end = segment_end - segment_start;
    let square_length = start_to_end.square_length();
    if square_length == 0.0 {
        return segment_start;
    }
    let t = ((point - segment_start).dot(start_to_end) / square_length).clamp(0.0, 1.0);
    segment_start + start_to_end * t
}

/// Cross product of `a` and `b`, both taken relative to `origin`.
/// Positive when `b` is anticlockwise of `a` as seen from `origin`.
pub fn cross_around<U>(
    origin: Point2D<f32, U>,
    a: Point2D<f32, U>,
    b: Point2D<f32, U>,
) -> f32 {
    (a - origin).cross(b - origin)
}

/// Rotation for angles small enough that the third order Taylor terms are exact in f32.
/// Only uses `+ - *`, so it gives the same bits on every platform, unlike `sin` and `cos`.
pub fn rotate_vect_by_small_angle<U>(
    vector: Vector2D<f32, U>,
    delta_radians: f32,
) -> Vector2D<f32, U> {
    let squared = delta_radians * delta_radians;
    let cos = 1.0 - squared / 2.0;
    let sin = delta_radians - delta_radians * squared / 6.0;
    vec2(
        vector.x * cos - vector.y * sin,
        vector.x * sin + vector.y * cos,
    )
}

pub fn point_to_string<T: Display, U>(point: Point2D<T, U>) -> String {
    format!("(x: {}, y: {})", point.x, point.y)
}

pub fn nearest_point_to<U>(
    target: Point2D<f32, U>,
    points: impl IntoIterator<Item = Point2D<f32, U>>,
) -> Option<Point2D<f32, U>> {
    points
        .into_iter()
        .min_by_key(|&point| OrderedFloat((point - target).square_length()))
}

#[cfg(test)]
mod tests {
    use ntest::{assert_about_eq, assert_false};
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_closest_point_on_segment_clamps_to_ends() {
        let start: MeterPoint = point2(0.0, 0.0);
        let end: MeterPoint = point2(10.0, 0.0);
        assert_eq!(
            closest_point_on_segment(point2(-5.0, 3.0), start, end),
            start
        );
        assert_eq!(closest_point_on_segment(point2(15.0, -3.0), start, end), end);
        assert_eq!(
            closest_point_on_segment(point2(4.0, 7.0), start, end),
            point2(4.0, 0.0)
        );
    }

    #[test]
    fn test_closest_point_on_degenerate_segment_is_that_point() {
        let p: MeterPoint = point2(2.0, 2.0);
        assert_eq!(closest_point_on_segment(point2(5.0, 5.0), p, p), p);
    }

    #[test]
    fn test_ray_cast_fraction_hits_middle_of_segment() {
        let wall = MeterLine::new(point2(5.0, -1.0), point2(5.0, 1.0));
        let fraction = wall
            .ray_cast_fraction(point2(0.0, 0.0), point2(10.0, 0.0))
            .unwrap();
        assert_about_eq!(fraction, 0.5);
    }

    #[test]
    fn test_ray_cast_fraction_misses_short_ray_and_parallel_ray() {
        let wall = MeterLine::new(point2(5.0, -1.0), point2(5.0, 1.0));
        assert!(wall
            .ray_cast_fraction(point2(0.0, 0.0), point2(4.0, 0.0))
            .is_none());
        assert!(wall
            .ray_cast_fraction(point2(0.0, 0.0), point2(0.0, 10.0))
            .is_none());
    }

    #[test]
    fn test_ray_cast_touching_segment_end_counts() {
        let wall = MeterLine::new(point2(5.0, 0.0), point2(5.0, 1.0));
        assert!(wall
            .ray_cast_fraction(point2(0.0, 0.0), point2(10.0, 0.0))
            .is_some());
    }

    #[test]
    fn test_crossing_segments_meet_halfway() {
        let (along_a, along_b) = segment_intersection_fractions::<MetersInWorldFrame>(
            point2(0.0, 0.0),
            point2(2.0, 2.0),
            point2(0.0, 2.0),
            point2(2.0, 0.0),
        )
        .unwrap();
        assert_about_eq!(along_a, 0.5);
        assert_about_eq!(along_b, 0.5);
        assert_false!(segment_intersection_fractions::<MetersInWorldFrame>(
            point2(0.0, 0.0),
            point2(1.0, 0.0),
            point2(0.0, 1.0),
            point2(1.0, 1.0),
        )
        .is_some());
    }

    #[test]
    fn test_extended_line_keeps_direction() {
        let line = MeterLine::new(point2(0.0, 0.0), point2(2.0, 0.0));
        let extended = line.extended_at_both_ends(1.0);
        assert_eq!(extended.p1, point2(-1.0, 0.0));
        assert_eq!(extended.p2, point2(3.0, 0.0));
        assert_about_eq!((extended.p2 - extended.p1).length(), 4.0);
    }

    #[test]
    fn test_cross_around_sign_follows_rotation() {
        let origin: MeterPoint = point2(1.0, 1.0);
        assert!(cross_around(origin, point2(2.0, 1.0), point2(1.0, 2.0)) > 0.0);
        assert!(cross_around(origin, point2(1.0, 2.0), point2(2.0, 1.0)) < 0.0);
    }

    #[test]
    fn test_small_angle_rotation_matches_trig_rotation() {
        let v: MeterMove = vec2(3.0, -4.0);
        for delta in [1e-4_f32, -1e-4, 1.7e-3, -3e-3] {
            let fast = rotate_vect_by_small_angle(v, delta);
            let (sin, cos) = delta.sin_cos();
            assert_about_eq!(fast.x, v.x * cos - v.y * sin, 1e-4);
            assert_about_eq!(fast.y, v.x * sin + v.y * cos, 1e-4);
        }
    }

    #[test]
    fn test_nearest_point() {
        let target: MeterPoint = point2(0.0, 0.0);
        let nearest = nearest_point_to(
            target,
            vec![point2(3.0, 0.0), point2(0.0, -1.0), point2(2.0, 2.0)],
        );
        assert_eq!(nearest, Some(point2(0.0, -1.0)));
        assert_eq!(nearest_point_to(target, Vec::<MeterPoint>::new()), None);
    }
}
