use derive_more::Constructor;
use utility::*;

/// The two ends found by the pair of rays cast around one vertex.
/// `first` comes from the clockwise ray and `second` from the anticlockwise one,
/// so `first` closes the previous visible edge and `second` opens the next.
#[derive(Clone, Copy, Debug, PartialEq, Constructor)]
pub struct DoubleRay {
    pub first: MeterPoint,
    pub second: MeterPoint,
    pub first_reached_vertex: bool,
    pub second_reached_vertex: bool,
}

impl DoubleRay {
    /// Both rays stopped on the vertex itself.
    pub fn at_vertex(vertex: MeterPoint) -> Self {
        Self::new(vertex, vertex, true, true)
    }
}
