use std::collections::BTreeMap;

use derive_more::Constructor;
use getset::{CopyGetters, Getters};
use rgb::RGB8;
use utility::*;

use crate::collision_filter::CollisionFilter;
use crate::discontinuity::Discontinuity;
use crate::error::VisibilityError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Constructor)]
pub struct LayerId(u32);

impl LayerId {
    pub fn id(&self) -> u32 {
        self.0
    }
}

/// What one layer of an observer wants to see. Sizes are in pixels.
#[derive(Clone, Copy, Debug, PartialEq, CopyGetters)]
#[get_copy = "pub"]
pub struct VisionRequest {
    /// Side of the square vision area centered on the observer.
    square_side: f32,
    filter: CollisionFilter,
    /// Zero turns discontinuity filtering off.
    ignore_discontinuities_shorter_than: f32,
    color: RGB8,
}

impl VisionRequest {
    pub fn new(square_side: f32) -> Result<Self, VisibilityError> {
        if !(square_side.is_finite() && square_side > 0.0) {
            return Err(VisibilityError::InvalidSquareSide(square_side));
        }
        Ok(VisionRequest {
            square_side,
            filter: CollisionFilter::default(),
            ignore_discontinuities_shorter_than: 0.0,
            color: RGB8::new(255, 255, 255),
        })
    }

    pub fn with_filter(mut self, filter: CollisionFilter) -> Self {
        self.filter = filter;
        self
    }

    pub fn with_gap_threshold(mut self, threshold: f32) -> Result<Self, VisibilityError> {
        if !threshold.is_finite() {
            return Err(VisibilityError::InvalidGapThreshold(threshold));
        }
        self.ignore_discontinuities_shorter_than = threshold;
        Ok(self)
    }

    pub fn with_color(mut self, color: RGB8) -> Self {
        self.color = color;
        self
    }

    pub fn filters_discontinuities(&self) -> bool {
        self.ignore_discontinuities_shorter_than > 0.0
    }
}

/// Visible stretch of the boundary, in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Constructor)]
pub struct VisibleEdge {
    pub first: PixelPoint,
    pub second: PixelPoint,
}

#[derive(Clone, Copy, Debug, PartialEq, Constructor)]
pub struct Triangle {
    pub origin: PixelPoint,
    pub first: PixelPoint,
    pub second: PixelPoint,
}

impl Triangle {
    /// Positive for counter-clockwise triangles.
    pub fn signed_area(&self) -> f32 {
        cross_around(self.origin, self.first, self.second) / 2.0
    }
}

/// One requested layer and the results of its most recent computation.
#[derive(Clone, Debug, PartialEq, Getters, CopyGetters)]
pub struct VisibilityLayer {
    #[get_copy = "pub"]
    request: VisionRequest,
    #[get = "pub"]
    edges: Vec<VisibleEdge>,
    #[get = "pub"]
    discontinuities: Vec<Discontinuity>,
    #[get = "pub"]
    vertex_hits: PixelPointList,
    #[get = "pub"]
    boundary_loop: PixelPointList,
}

impl VisibilityLayer {
    pub fn new(request: VisionRequest) -> Self {
        VisibilityLayer {
            request,
            edges: vec![],
            discontinuities: vec![],
            vertex_hits: vec![],
            boundary_loop: vec![],
        }
    }

    pub fn set_request(&mut self, request: VisionRequest) {
        self.request = request;
    }

    pub fn num_triangles(&self) -> usize {
        self.edges.len()
    }

    /// The fan triangle between the observer and visible edge `index`.
    pub fn triangle(&self, index: usize, origin: PixelPoint) -> Option<Triangle> {
        self.edges
            .get(index)
            .map(|edge| Triangle::new(origin, edge.first, edge.second))
    }

    pub fn discontinuity_on_edge(&self, edge_index: usize) -> Option<&Discontinuity> {
        self.discontinuities
            .iter()
            .find(|discontinuity| discontinuity.edge_index() == edge_index)
    }

    pub(crate) fn replace_results(
        &mut self,
        edges: Vec<VisibleEdge>,
        discontinuities: Vec<Discontinuity>,
        vertex_hits: PixelPointList,
        boundary_loop: PixelPointList,
    ) {
        self.edges = edges;
        self.discontinuities = discontinuities;
        self.vertex_hits = vertex_hits;
        self.boundary_loop = boundary_loop;
    }
}

/// Every layer one observer asked for.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Visibility {
    layers: BTreeMap<LayerId, VisibilityLayer>,
}

impl Visibility {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_layer(mut self, id: LayerId, request: VisionRequest) -> Self {
        self.request_layer(id, request);
        self
    }

    /// Adds a layer, or changes the request of an existing one while keeping its last results.
    pub fn request_layer(&mut self, id: LayerId, request: VisionRequest) {
        self.layers
            .entry(id)
            .and_modify(|layer| layer.set_request(request))
            .or_insert_with(|| VisibilityLayer::new(request));
    }

    pub fn remove_layer(&mut self, id: LayerId) -> Option<VisibilityLayer> {
        self.layers.remove(&id)
    }

    pub fn layer(&self, id: LayerId) -> Option<&VisibilityLayer> {
        self.layers.get(&id)
    }

    pub fn layers(&self) -> impl Iterator<Item = (&LayerId, &VisibilityLayer)> {
        self.layers.iter()
    }

    pub fn layers_mut(&mut self) -> impl Iterator<Item = (&LayerId, &mut VisibilityLayer)> {
        self.layers.iter_mut()
    }
}

#[cfg(test)]
mod tests {
    use euclid::point2;
    use ntest::assert_about_eq;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::discontinuity::Winding;

    #[test]
    fn test_request_rejects_bad_square() {
        assert_eq!(
            VisionRequest::new(0.0),
            Err(VisibilityError::InvalidSquareSide(0.0))
        );
        assert!(VisionRequest::new(f32::NAN).is_err());
        assert!(VisionRequest::new(f32::INFINITY).is_err());
    }

    #[test]
    fn test_negative_threshold_turns_filtering_off() {
        let request = VisionRequest::new(100.0).unwrap();
        assert!(!request.filters_discontinuities());
        assert!(!request
            .with_gap_threshold(-1.0)
            .unwrap()
            .filters_discontinuities());
        assert!(matches!(
            request.with_gap_threshold(f32::NAN),
            Err(VisibilityError::InvalidGapThreshold(_))
        ));
        assert_eq!(
            request.with_gap_threshold(f32::INFINITY),
            Err(VisibilityError::InvalidGapThreshold(f32::INFINITY))
        );
        assert!(request
            .with_gap_threshold(5.0)
            .unwrap()
            .filters_discontinuities());
    }

    #[test]
    fn test_triangles_fan_from_origin() {
        let mut layer = VisibilityLayer::new(VisionRequest::new(100.0).unwrap());
        layer.replace_results(
            vec![
                VisibleEdge::new(point2(1.0, 0.0), point2(0.0, 1.0)),
                VisibleEdge::new(point2(0.0, 1.0), point2(1.0, 0.0)),
            ],
            vec![Discontinuity::new(
                point2(0.0, 1.0),
                point2(0.0, 2.0),
                Winding::Left,
                1,
            )],
            vec![],
            vec![],
        );
        assert_eq!(layer.num_triangles(), 2);
        let triangle = layer.triangle(0, point2(0.0, 0.0)).unwrap();
        assert_about_eq!(triangle.signed_area(), 0.5);
        assert_eq!(layer.triangle(2, point2(0.0, 0.0)), None);
        assert_eq!(layer.discontinuity_on_edge(0), None);
        assert_eq!(layer.discontinuity_on_edge(1).unwrap().far_point(), point2(0.0, 2.0));
    }

    #[test]
    fn test_changing_request_keeps_results() {
        let id = LayerId::new(1);
        let mut visibility =
            Visibility::new().with_layer(id, VisionRequest::new(100.0).unwrap());
        visibility
            .layers_mut()
            .for_each(|(_, layer)| layer.replace_results(vec![], vec![], vec![point2(1.0, 1.0)], vec![]));
        visibility.request_layer(id, VisionRequest::new(200.0).unwrap());
        let layer = visibility.layer(id).unwrap();
        assert_eq!(layer.request().square_side(), 200.0);
        assert_eq!(layer.vertex_hits().len(), 1);
        assert!(visibility.remove_layer(id).is_some());
        assert!(visibility.layer(id).is_none());
    }
}
