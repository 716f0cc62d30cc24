//! Overlap tests between the droplet and world objects
//!
//! Everything compares squared distances, and touching counts as overlapping.

use glam::Vec2;

use super::state::{Shape, ShapeKind};

/// Circle vs circle
#[inline]
pub fn circles_overlap(a: Vec2, a_radius: f32, b: Vec2, b_radius: f32) -> bool {
    let min_distance = a_radius + b_radius;
    a.distance_squared(b) <= min_distance * min_distance
}

/// Point of an axis-aligned square closest to `p`
#[inline]
pub fn closest_point_on_square(p: Vec2, center: Vec2, half: f32) -> Vec2 {
    Vec2::new(
        p.x.min(center.x + half).max(center.x - half),
        p.y.min(center.y + half).max(center.y - half),
    )
}

/// Circle vs axis-aligned square given by centre and half extent
#[inline]
pub fn circle_square_overlap(circle: Vec2, radius: f32, center: Vec2, half: f32) -> bool {
    let closest = closest_point_on_square(circle, center, half);
    circle.distance_squared(closest) <= radius * radius
}

/// Does a circle of `radius` at `pos` touch this obstacle?
pub fn droplet_hits_shape(pos: Vec2, radius: f32, shape: &Shape) -> bool {
    match shape.kind {
        ShapeKind::Circle => circles_overlap(pos, radius, shape.pos, shape.half_size()),
        ShapeKind::Square => circle_square_overlap(pos, radius, shape.pos, shape.half_size()),
    }
}

/// Index of the first obstacle the droplet touches
pub fn first_hit(pos: Vec2, radius: f32, shapes: &[Shape]) -> Option<usize> {
    shapes
        .iter()
        .position(|shape| droplet_hits_shape(pos, radius, shape))
}
