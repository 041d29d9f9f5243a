use euclid::point2;
use utility::*;
use visibility::*;

pub const OBSERVER: u32 = 0;
pub const SQUARE_SIDE_PX: f32 = 1000.0;

pub fn observer_id() -> EntityId {
    EntityId::new(OBSERVER)
}

/// A world holding only the observer's own small body, centered on `position` (meters).
pub fn room_with_observer_at(position: MeterPoint) -> PolygonWorld {
    PolygonWorld::new().with_shape(
        observer_id(),
        PolygonShape::square(position, 0.5, CollisionFilter::default()),
    )
}

pub fn empty_room() -> PolygonWorld {
    room_with_observer_at(point2(0.0, 0.0))
}

pub fn add_box(world: &mut PolygonWorld, id: u32, min: (f32, f32), max: (f32, f32)) {
    world.add_shape(
        EntityId::new(id),
        PolygonShape::rectangle(
            point2(min.0, min.1),
            point2(max.0, max.1),
            CollisionFilter::default(),
        ),
    );
}

/// Box at x in [3, 4], y in [-1, 1].
pub fn room_with_one_box() -> PolygonWorld {
    let mut world = empty_room();
    add_box(&mut world, 1, (3.0, -1.0), (4.0, 1.0));
    world
}

/// The box of [room_with_one_box] in front of a tall wall, leaving a gap of about 105 px
/// between the box corners and the wall.
pub fn room_with_box_before_wall() -> PolygonWorld {
    let mut world = room_with_one_box();
    add_box(&mut world, 2, (5.0, -4.0), (6.0, 4.0));
    world
}

pub fn layer_id() -> LayerId {
    LayerId::new(1)
}

pub fn request() -> VisionRequest {
    VisionRequest::new(SQUARE_SIDE_PX).unwrap()
}

/// Runs a single observer at `position` (pixels) with one layer and returns that layer.
pub fn see_from(
    world: &PolygonWorld,
    position: PixelPoint,
    request: VisionRequest,
) -> VisibilityLayer {
    let mut system = VisibilitySystem::new(VisibilityConfig::default());
    let mut observers = vec![Observer::new(
        observer_id(),
        position,
        Visibility::new().with_layer(layer_id(), request),
    )];
    system.process_entities(world, &mut observers);
    observers[0]
        .visibility
        .layer(layer_id())
        .unwrap()
        .clone()
}

pub fn see(world: &PolygonWorld, request: VisionRequest) -> VisibilityLayer {
    see_from(world, point2(0.0, 0.0), request)
}
