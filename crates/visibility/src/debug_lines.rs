//! Optional line segments that show how a visibility layer was built.
//! Nothing here feeds back into the results.

use derive_more::Constructor;
use rgb::RGB8;
use serde::Deserialize;
use utility::*;

use crate::discontinuity::Discontinuity;
use crate::discontinuity_filter::MarkedHole;

pub const OCCLUDED_RAY_COLOR: RGB8 = RGB8::new(255, 0, 0);
pub const VERTEX_HIT_RAY_COLOR: RGB8 = RGB8::new(255, 255, 0);
pub const DIVERGENT_RAY_COLOR: RGB8 = RGB8::new(255, 0, 255);
pub const BOUNDARY_RAY_COLOR: RGB8 = RGB8::new(0, 0, 255);
pub const MARKED_HOLE_COLOR: RGB8 = RGB8::new(255, 255, 255);
pub const DISCONTINUITY_COLOR: RGB8 = RGB8::new(0, 127, 255);
pub const VISION_SQUARE_COLOR: RGB8 = RGB8::new(255, 255, 255);

#[derive(Clone, Copy, Debug, PartialEq, Constructor)]
pub struct DebugLine {
    pub start: PixelPoint,
    pub end: PixelPoint,
    pub color: RGB8,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DebugDrawFlags {
    pub draw_cast_rays: bool,
    pub draw_triangle_edges: bool,
    pub draw_discontinuities: bool,
}

impl DebugDrawFlags {
    pub fn everything() -> Self {
        DebugDrawFlags {
            draw_cast_rays: true,
            draw_triangle_edges: true,
            draw_discontinuities: true,
        }
    }
}

/// Appends lines to a shared buffer, but only for the enabled flags.
pub struct DebugLineRecorder<'a> {
    flags: DebugDrawFlags,
    pixels_per_meter: f32,
    lines: &'a mut Vec<DebugLine>,
}

impl<'a> DebugLineRecorder<'a> {
    pub fn new(flags: DebugDrawFlags, pixels_per_meter: f32, lines: &'a mut Vec<DebugLine>) -> Self {
        DebugLineRecorder {
            flags,
            pixels_per_meter,
            lines,
        }
    }

    fn push_meters(&mut self, start: MeterPoint, end: MeterPoint, color: RGB8) {
        self.lines.push(DebugLine::new(
            meter_point_to_pixel_point(start, self.pixels_per_meter),
            meter_point_to_pixel_point(end, self.pixels_per_meter),
            color,
        ));
    }

    pub fn cast_ray(&mut self, origin: MeterPoint, end: MeterPoint, color: RGB8) {
        if self.flags.draw_cast_rays {
            self.push_meters(origin, end, color);
        }
    }

    pub fn vision_square(&mut self, bounds: &[MeterLine; 4]) {
        if self.flags.draw_cast_rays || self.flags.draw_triangle_edges {
            for bound in bounds {
                self.push_meters(bound.p1, bound.p2, VISION_SQUARE_COLOR);
            }
        }
    }

    pub fn triangle(&mut self, origin: PixelPoint, first: PixelPoint, second: PixelPoint, color: RGB8) {
        if self.flags.draw_triangle_edges {
            self.lines.push(DebugLine::new(origin, first, color));
            self.lines.push(DebugLine::new(first, second, color));
            self.lines.push(DebugLine::new(second, origin, color));
        }
    }

    pub fn marked_hole(&mut self, hole: &MarkedHole) {
        if self.flags.draw_discontinuities {
            self.lines
                .push(DebugLine::new(hole.start, hole.end, MARKED_HOLE_COLOR));
        }
    }

    pub fn discontinuity(&mut self, discontinuity: &Discontinuity) {
        if self.flags.draw_discontinuities {
            self.lines.push(DebugLine::new(
                discontinuity.near_point(),
                discontinuity.far_point(),
                DISCONTINUITY_COLOR,
            ));
        }
    }
}
