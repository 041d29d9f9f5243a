use crate::*;

// empty enums for euclid typing
#[derive(Clone, PartialEq, Debug, Copy)]
pub struct MetersInWorldFrame;

#[derive(Clone, PartialEq, Debug, Copy)]
pub struct PixelsInWorldFrame;

pub type MeterPoint = Point2D<f32, MetersInWorldFrame>;
pub type MeterMove = Vector2D<f32, MetersInWorldFrame>;
pub type MeterRect = Box2D<f32, MetersInWorldFrame>;
pub type MeterLine = Line<f32, MetersInWorldFrame>;

pub type PixelPoint = Point2D<f32, PixelsInWorldFrame>;

pub type MeterPointList = Vec<MeterPoint>;
pub type PixelPointList = Vec<PixelPoint>;

pub type MetersToPixels = Scale<f32, MetersInWorldFrame, PixelsInWorldFrame>;
pub type PixelsToMeters = Scale<f32, PixelsInWorldFrame, MetersInWorldFrame>;

pub fn meters_to_pixels_scale(pixels_per_meter: f32) -> MetersToPixels {
    Scale::new(pixels_per_meter)
}

pub fn pixels_to_meters_scale(pixels_per_meter: f32) -> PixelsToMeters {
    meters_to_pixels_scale(pixels_per_meter).inverse()
}

pub fn meter_point_to_pixel_point(point: MeterPoint, pixels_per_meter: f32) -> PixelPoint {
    point * meters_to_pixels_scale(pixels_per_meter)
}

pub fn pixel_point_to_meter_point(point: PixelPoint, pixels_per_meter: f32) -> MeterPoint {
    point * pixels_to_meters_scale(pixels_per_meter)
}

pub fn pixel_length_to_meter_length(length: f32, pixels_per_meter: f32) -> f32 {
    length / pixels_per_meter
}

/// Axis-aligned square centered on `center`, given the full side length.
pub fn square_around_point(center: MeterPoint, side_length: f32) -> MeterRect {
    let half_extent = vec2(side_length / 2.0, side_length / 2.0);
    MeterRect::new(center - half_extent, center + half_extent)
}

/// Corners in counter-clockwise order, starting from the minimum corner.
pub fn rect_corners_ccw(rect: MeterRect) -> [MeterPoint; 4] {
    [
        rect.min,
        point2(rect.max.x, rect.min.y),
        rect.max,
        point2(rect.min.x, rect.max.y),
    ]
}
