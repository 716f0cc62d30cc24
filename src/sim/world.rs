//! World generation: obstacle shapes and golden circles
//!
//! All randomness comes from the caller's RNG so a seeded run is reproducible.

use glam::Vec2;
use rand::Rng;

use super::state::{GoldenCircle, Shape, ShapeKind};
use crate::consts::MAX_SHAPES;
use crate::tuning::Tuning;

/// Obstacle count for a viewport width: one per `pixels_per_shape`, with a floor
pub fn base_shape_count(width: f32, tuning: &Tuning) -> usize {
    let by_width = (width.max(0.0) / tuning.pixels_per_shape).floor() as usize;
    by_width.max(tuning.min_shapes).min(MAX_SHAPES)
}

/// Random obstacle anywhere in the viewport
pub fn random_shape<R: Rng + ?Sized>(rng: &mut R, width: f32, height: f32) -> Shape {
    let base_size = 10.0 + rng.random::<f32>() * 24.0;
    let size = base_size * (0.6 + rng.random::<f32>() * 1.4);
    Shape {
        pos: Vec2::new(rng.random::<f32>() * width, rng.random::<f32>() * height),
        size,
        kind: if rng.random_bool(0.5) {
            ShapeKind::Circle
        } else {
            ShapeKind::Square
        },
        alpha: 0.12 + rng.random::<f32>() * 0.18,
    }
}

/// Generate `count` obstacles
pub fn build_shapes<R: Rng + ?Sized>(rng: &mut R, count: usize, width: f32, height: f32) -> Vec<Shape> {
    (0..count).map(|_| random_shape(rng, width, height)).collect()
}

/// Random value in `[inset, extent - inset]`, or the midpoint if that range is empty
fn inset_coord<R: Rng + ?Sized>(rng: &mut R, extent: f32, inset: f32) -> f32 {
    let span = extent - inset * 2.0;
    if span <= 0.0 {
        return extent * 0.5;
    }
    (inset + rng.random::<f32>() * span).min(extent - inset)
}

/// Golden circle at an independent random spot, inset so it is fully on screen
pub fn spawn_golden_circle<R: Rng + ?Sized>(
    rng: &mut R,
    width: f32,
    height: f32,
    padding: f32,
) -> GoldenCircle {
    let radius = 10.0 + rng.random::<f32>() * 6.0;
    let inset = padding + radius;
    GoldenCircle {
        pos: Vec2::new(
            inset_coord(rng, width, inset),
            inset_coord(rng, height, inset),
        ),
        radius,
    }
}

/// Generate the full set of golden circles
pub fn build_golden_circles<R: Rng + ?Sized>(
    rng: &mut R,
    count: usize,
    width: f32,
    height: f32,
    padding: f32,
) -> Vec<GoldenCircle> {
    (0..count)
        .map(|_| spawn_golden_circle(rng, width, height, padding))
        .collect()
}
