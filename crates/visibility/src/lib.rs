//! Per-tick 2D visibility polygons for top-down games.
//!
//! For each observer and each requested layer, the [VisibilitySystem] finds the part
//! of a square around the observer that can be seen past the obstacles of a
//! [PhysicsWorld]. The result is a fan of triangles around the observer plus the
//! depth jumps ([Discontinuity]) where one occluder ends in front of another.

use utility::pub_mod_and_use;

pub_mod_and_use!(
    angular_sort,
    candidates,
    classifier,
    collision_filter,
    config,
    cyclic,
    debug_lines,
    discontinuity,
    discontinuity_filter,
    double_ray,
    error,
    layer,
    physics,
    polygon_world,
    stitcher,
    system
);
