use derive_more::Constructor;
use getset::CopyGetters;
use utility::*;

use crate::cyclic::CyclicIndex;

/// Which side of a discontinuity the visible area continues on,
/// as seen from the observer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Winding {
    Left,
    Right,
}

impl Winding {
    /// Edge index step that moves from a discontinuity into its visible side.
    pub fn sweep_step(&self) -> isize {
        match self {
            Winding::Right => 1,
            Winding::Left => -1,
        }
    }
}

/// Depth jump in the visible region: the closer occluder ends at `near_point`
/// and the view continues from `far_point` further away.
#[derive(Clone, Copy, Debug, PartialEq, Constructor, CopyGetters)]
#[get_copy = "pub"]
pub struct Discontinuity {
    near_point: PixelPoint,
    far_point: PixelPoint,
    winding: Winding,
    /// Index of the visible edge this discontinuity belongs to.
    edge_index: usize,
}

impl Discontinuity {
    pub fn gap_length(&self) -> f32 {
        (self.far_point - self.near_point).length()
    }
}

/// Discontinuity as found during classification, before the edges exist.
/// The edge index is relative to the double ray being pushed and may be `-1`.
#[derive(Clone, Copy, Debug, PartialEq, Constructor)]
pub struct PendingDiscontinuity {
    pub near_point: MeterPoint,
    pub far_point: MeterPoint,
    pub winding: Winding,
    pub raw_edge_index: isize,
}

impl PendingDiscontinuity {
    pub fn resolved(&self, edge_count: usize, pixels_per_meter: f32) -> Discontinuity {
        Discontinuity::new(
            meter_point_to_pixel_point(self.near_point, pixels_per_meter),
            meter_point_to_pixel_point(self.far_point, pixels_per_meter),
            self.winding,
            CyclicIndex::new(self.raw_edge_index, edge_count).index(),
        )
    }
}
