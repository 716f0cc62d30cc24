//! Shape generation for 2D primitives
//!
//! Everything is emitted as triangle lists in CSS-pixel space (y down).

use glam::Vec2;
use std::f32::consts::TAU;

use super::vertex::{Vertex, mix};

/// Segment count that keeps a circle of this radius looking round
pub fn segments_for_radius(radius: f32) -> u32 {
    ((radius * 0.75) as u32).clamp(12, 48)
}

#[inline]
fn on_circle(center: Vec2, radius: f32, theta: f32) -> Vec2 {
    center + Vec2::new(theta.cos(), theta.sin()) * radius
}

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * TAU;
        let theta2 = ((i + 1) as f32 / segments as f32) * TAU;
        let p1 = on_circle(center, radius, theta1);
        let p2 = on_circle(center, radius, theta2);

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(p1.x, p1.y, color));
        vertices.push(Vertex::new(p2.x, p2.y, color));
    }

    vertices
}

/// Axis-aligned filled rectangle
pub fn rect(min: Vec2, size: Vec2, color: [f32; 4]) -> Vec<Vertex> {
    let max = min + size;
    vec![
        Vertex::new(min.x, min.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(min.x, max.y, color),
        Vertex::new(min.x, max.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(max.x, max.y, color),
    ]
}

/// Full-viewport vertical gradient. `stops` are `(offset 0-1, color)` in order.
pub fn vertical_gradient(width: f32, height: f32, stops: &[(f32, [f32; 4])]) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(stops.len().saturating_sub(1) * 6);

    for pair in stops.windows(2) {
        let (t1, c1) = pair[0];
        let (t2, c2) = pair[1];
        let y1 = t1 * height;
        let y2 = t2 * height;

        vertices.push(Vertex::new(0.0, y1, c1));
        vertices.push(Vertex::new(width, y1, c1));
        vertices.push(Vertex::new(0.0, y2, c2));
        vertices.push(Vertex::new(0.0, y2, c2));
        vertices.push(Vertex::new(width, y1, c1));
        vertices.push(Vertex::new(width, y2, c2));
    }

    vertices
}

/// Thick polyline with round caps and joins
pub fn polyline(points: &[Vec2], width: f32, color: [f32; 4]) -> Vec<Vertex> {
    if points.len() < 2 {
        return Vec::new();
    }

    let half = width * 0.5;
    let joint_segments = segments_for_radius(half);
    let mut vertices = Vec::with_capacity(points.len() * (6 + joint_segments as usize * 3));

    for pair in points.windows(2) {
        let (p1, p2) = (pair[0], pair[1]);
        // Perpendicular for width
        let dir = (p2 - p1).normalize_or_zero();
        let perp = Vec2::new(-dir.y, dir.x) * half;

        let v1a = p1 + perp;
        let v1b = p1 - perp;
        let v2a = p2 + perp;
        let v2b = p2 - perp;

        vertices.push(Vertex::new(v1a.x, v1a.y, color));
        vertices.push(Vertex::new(v1b.x, v1b.y, color));
        vertices.push(Vertex::new(v2a.x, v2a.y, color));

        vertices.push(Vertex::new(v2a.x, v2a.y, color));
        vertices.push(Vertex::new(v1b.x, v1b.y, color));
        vertices.push(Vertex::new(v2b.x, v2b.y, color));
    }

    for &p in points {
        vertices.extend(circle(p, half, color, joint_segments));
    }

    vertices
}

/// Color of a gradient at offset `t`, given sorted stops
pub fn gradient_color(stops: &[(f32, [f32; 4])], t: f32) -> [f32; 4] {
    let Some(&(first_t, first_c)) = stops.first() else {
        return [0.0; 4];
    };
    if t <= first_t {
        return first_c;
    }
    for pair in stops.windows(2) {
        let (t1, c1) = pair[0];
        let (t2, c2) = pair[1];
        if t <= t2 {
            let span = t2 - t1;
            let u = if span > 0.0 { (t - t1) / span } else { 1.0 };
            return mix(c1, c2, u);
        }
    }
    stops[stops.len() - 1].1
}

/// Two-circle radial gradient filling the outer circle
///
/// The gradient runs from a circle at `focus` of radius `inner_radius`
/// (offset 0) to the circle at `center` of radius `outer_radius` (offset 1).
/// Inside the inner circle the first stop's color is used.
pub fn radial_gradient_circle(
    focus: Vec2,
    inner_radius: f32,
    center: Vec2,
    outer_radius: f32,
    stops: &[(f32, [f32; 4])],
    segments: u32,
) -> Vec<Vertex> {
    let ring = |t: f32, theta: f32| {
        let c = focus.lerp(center, t);
        let r = inner_radius + (outer_radius - inner_radius) * t;
        on_circle(c, r, theta)
    };

    // Ring offsets: every stop inside (0, 1], plus the end
    let mut offsets: Vec<f32> = stops
        .iter()
        .map(|&(t, _)| t)
        .filter(|&t| t > 0.0 && t < 1.0)
        .collect();
    offsets.push(1.0);

    let mut vertices = circle(focus, inner_radius, gradient_color(stops, 0.0), segments);
    vertices.reserve(offsets.len() * segments as usize * 6);

    let mut t1 = 0.0;
    for &t2 in &offsets {
        let c1 = gradient_color(stops, t1);
        let c2 = gradient_color(stops, t2);
        for i in 0..segments {
            let theta1 = (i as f32 / segments as f32) * TAU;
            let theta2 = ((i + 1) as f32 / segments as f32) * TAU;

            let inner1 = ring(t1, theta1);
            let inner2 = ring(t1, theta2);
            let outer1 = ring(t2, theta1);
            let outer2 = ring(t2, theta2);

            vertices.push(Vertex::new(inner1.x, inner1.y, c1));
            vertices.push(Vertex::new(outer1.x, outer1.y, c2));
            vertices.push(Vertex::new(inner2.x, inner2.y, c1));

            vertices.push(Vertex::new(inner2.x, inner2.y, c1));
            vertices.push(Vertex::new(outer1.x, outer1.y, c2));
            vertices.push(Vertex::new(outer2.x, outer2.y, c2));
        }
        t1 = t2;
    }

    vertices
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: [f32; 4] = [1.0, 0.0, 0.0, 1.0];
    const BLUE: [f32; 4] = [0.0, 0.0, 1.0, 1.0];

    fn max_distance(vertices: &[Vertex], from: Vec2) -> f32 {
        vertices
            .iter()
            .map(|v| Vec2::from(v.position).distance(from))
            .fold(0.0, f32::max)
    }

    #[test]
    fn test_circle_vertices_on_radius() {
        let c = Vec2::new(50.0, 50.0);
        let v = circle(c, 10.0, RED, 16);
        assert_eq!(v.len(), 48);
        assert!((max_distance(&v, c) - 10.0).abs() < 1e-3);
    }

    #[test]
    fn test_segments_for_radius() {
        assert_eq!(segments_for_radius(2.0), 12);
        assert_eq!(segments_for_radius(32.0), 24);
        assert_eq!(segments_for_radius(500.0), 48);
    }

    #[test]
    fn test_rect_covers_bounds() {
        let v = rect(Vec2::new(10.0, 20.0), Vec2::new(30.0, 40.0), RED);
        assert_eq!(v.len(), 6);
        assert!(v.iter().all(|p| p.position[0] >= 10.0 && p.position[0] <= 40.0));
        assert!(v.iter().all(|p| p.position[1] >= 20.0 && p.position[1] <= 60.0));
    }

    #[test]
    fn test_vertical_gradient_bands() {
        let v = vertical_gradient(100.0, 200.0, &[(0.0, RED), (0.6, BLUE), (1.0, RED)]);
        assert_eq!(v.len(), 12);
        // Band boundary at 60% of the height carries the middle stop
        assert!(v
            .iter()
            .any(|p| (p.position[1] - 120.0).abs() < 1e-3 && p.color == BLUE));
    }

    #[test]
    fn test_polyline_needs_two_points() {
        assert!(polyline(&[Vec2::ZERO], 10.0, RED).is_empty());
        let v = polyline(&[Vec2::ZERO, Vec2::new(100.0, 0.0)], 10.0, RED);
        assert!(!v.is_empty());
        // Nothing strays farther than half the width from the segment
        assert!(v.iter().all(|p| p.position[1].abs() <= 5.0 + 1e-3));
        assert!(v.iter().all(|p| p.position[0] >= -5.0 - 1e-3 && p.position[0] <= 105.0 + 1e-3));
    }

    #[test]
    fn test_gradient_color() {
        let stops = [(0.0, RED), (0.5, BLUE)];
        assert_eq!(gradient_color(&stops, -1.0), RED);
        assert_eq!(gradient_color(&stops, 0.25), [0.5, 0.0, 0.5, 1.0]);
        assert_eq!(gradient_color(&stops, 0.9), BLUE);
        assert_eq!(gradient_color(&[], 0.5), [0.0; 4]);
    }

    #[test]
    fn test_radial_gradient_fills_outer_circle() {
        let center = Vec2::new(100.0, 100.0);
        let focus = center + Vec2::new(-5.4, -7.2);
        let v = radial_gradient_circle(focus, 3.6, center, 18.0, &[(0.0, RED), (0.45, BLUE), (1.0, RED)], 24);
        assert!((max_distance(&v, center) - 18.0).abs() < 1e-3);
        // Outermost vertices carry the last stop color
        let outer: Vec<_> = v
            .iter()
            .filter(|p| (Vec2::from(p.position).distance(center) - 18.0).abs() < 1e-3)
            .collect();
        assert!(!outer.is_empty());
        assert!(outer.iter().all(|p| p.color == RED));
    }
}
