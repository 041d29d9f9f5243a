//! Runs the whole pipeline for every layer of every observer.

use std::f32::consts::SQRT_2;

use derive_more::Constructor;
use log::{debug, trace};
use utility::*;

use crate::angular_sort::{gather_candidate_vertices, sort_by_angle, CandidateVertex};
use crate::candidates::collect_candidate_obstacles;
use crate::classifier::{vision_bounds, ClassifierOutput, RayCaster, RayTolerances};
use crate::config::VisibilityConfig;
use crate::debug_lines::{DebugLine, DebugLineRecorder};
use crate::discontinuity::Discontinuity;
use crate::discontinuity_filter::filter_short_discontinuities;
use crate::layer::{Visibility, VisibilityLayer};
use crate::physics::{EntityId, PhysicsWorld};
use crate::stitcher::{boundary_loop, stitch_edges};

/// An entity that wants to see, with its position in pixels.
#[derive(Clone, Debug, PartialEq, Constructor)]
pub struct Observer {
    pub entity: EntityId,
    pub position: PixelPoint,
    pub visibility: Visibility,
}

// Reused between layers so steady state processing does not allocate for them.
#[derive(Debug, Default)]
struct ScratchBuffers {
    vertices: Vec<CandidateVertex>,
    classified: ClassifierOutput,
}

#[derive(Debug, Default)]
pub struct VisibilitySystem {
    config: VisibilityConfig,
    scratch: ScratchBuffers,
    debug_lines: Vec<DebugLine>,
}

impl VisibilitySystem {
    pub fn new(config: VisibilityConfig) -> Self {
        VisibilitySystem {
            config,
            ..Default::default()
        }
    }

    pub fn config(&self) -> &VisibilityConfig {
        &self.config
    }

    /// Lines recorded since the last call to [Self::process_entities] started.
    pub fn debug_lines(&self) -> &[DebugLine] {
        &self.debug_lines
    }

    pub fn process_entities<W: PhysicsWorld + ?Sized>(&mut self, world: &W, observers: &mut [Observer]) {
        self.debug_lines.clear();
        for observer in observers.iter_mut() {
            for (layer_id, layer) in observer.visibility.layers_mut() {
                trace!("observer {:?} layer {:?}", observer.entity, layer_id);
                self.process_layer(world, observer.entity, observer.position, layer);
            }
        }
    }

    /// Recomputes one layer from scratch. Previous results of the layer are replaced.
    pub fn process_layer<W: PhysicsWorld + ?Sized>(
        &mut self,
        world: &W,
        observer: EntityId,
        position: PixelPoint,
        layer: &mut VisibilityLayer,
    ) {
        let VisibilitySystem {
            config,
            scratch,
            debug_lines,
        } = self;
        let pixels_per_meter = config.pixels_per_meter;
        let request = layer.request();
        let mut recorder = DebugLineRecorder::new(config.debug, pixels_per_meter, debug_lines);

        let origin = pixel_point_to_meter_point(position, pixels_per_meter);
        let side = pixel_length_to_meter_length(request.square_side(), pixels_per_meter);
        let vision_square = square_around_point(origin, side);
        let corners = rect_corners_ccw(vision_square);
        let bounds = vision_bounds(corners, config.boundary_edge_extension);
        recorder.vision_square(&bounds);

        let obstacles = collect_candidate_obstacles(world, observer, vision_square, &request.filter());

        scratch.vertices.clear();
        gather_candidate_vertices(world, origin, &obstacles, corners, &mut scratch.vertices);
        sort_by_angle(&mut scratch.vertices);

        let caster = RayCaster {
            world,
            observer,
            origin,
            filter: request.filter(),
            ray_length: side / 2.0 * SQRT_2 * config.ray_length_overshoot,
            vision_bounds: bounds,
            tolerances: RayTolerances {
                ray_angle_radians: config.epsilon_ray_angle_radians(),
                vertex_hit_distance: config.vertex_hit_distance_meters(),
                obstacle_hit_threshold: config.obstacle_hit_threshold_meters(),
            },
        };
        scratch.classified.clear();
        caster.classify_all(&scratch.vertices, &mut scratch.classified, &mut recorder);

        let double_rays = &scratch.classified.double_rays;
        let edges = stitch_edges(double_rays, pixels_per_meter);
        for edge in &edges {
            recorder.triangle(position, edge.first, edge.second, request.color());
        }

        let discontinuities: Vec<Discontinuity> = if edges.is_empty() {
            vec![]
        } else {
            scratch
                .classified
                .discontinuities
                .iter()
                .map(|pending| pending.resolved(edges.len(), pixels_per_meter))
                .collect()
        };
        let discontinuities = if request.filters_discontinuities() {
            let filtered = filter_short_discontinuities(
                position,
                &edges,
                &discontinuities,
                request.ignore_discontinuities_shorter_than(),
            );
            filtered
                .marked_holes
                .iter()
                .for_each(|hole| recorder.marked_hole(hole));
            filtered.kept
        } else {
            discontinuities
        };
        discontinuities
            .iter()
            .for_each(|discontinuity| recorder.discontinuity(discontinuity));

        let vertex_hits = scratch
            .classified
            .vertex_hits
            .iter()
            .map(|&hit| meter_point_to_pixel_point(hit, pixels_per_meter))
            .collect();
        let boundary = boundary_loop(double_rays, pixels_per_meter);

        debug!(
            "{:?}: {} obstacles, {} vertices, {} edges, {} discontinuities",
            observer,
            obstacles.len(),
            scratch.vertices.len(),
            edges.len(),
            discontinuities.len()
        );
        layer.replace_results(edges, discontinuities, vertex_hits, boundary);
    }
}
