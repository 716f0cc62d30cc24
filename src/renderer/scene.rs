//! Frame composition
//!
//! Turns a `GameState` into one triangle list plus the text layer. Nothing is
//! carried between frames.

use glam::Vec2;

use super::shapes;
use super::vertex::{Vertex, colors};
use crate::sim::{GameMode, GameState, ShapeKind};
use crate::ui::score_text;

/// Text drawn over the canvas for this frame
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HudText {
    /// Top-left score readout (only while playing)
    pub score: Option<String>,
    /// Centered "GAME OVER" banner
    pub game_over: bool,
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, Default)]
pub struct Frame {
    pub vertices: Vec<Vertex>,
    pub hud: HudText,
}

/// Sky gradient stops (offset, color)
const SKY: [(f32, [f32; 4]); 3] = [
    (0.0, colors::SKY_TOP),
    (0.6, colors::SKY_MID),
    (1.0, colors::SKY_BOTTOM),
];

/// Droplet shading stops
const DROPLET: [(f32, [f32; 4]); 3] = [
    (0.0, colors::DROPLET_HIGHLIGHT),
    (0.45, colors::DROPLET_BODY),
    (1.0, colors::DROPLET_EDGE),
];

/// Build the frame in paint order
pub fn compose(state: &GameState) -> Frame {
    let playing = state.mode() == GameMode::Playing;
    let mut vertices = shapes::vertical_gradient(state.width, state.height, &SKY);

    // Obstacles
    for shape in &state.shapes {
        let mut color = colors::SHAPE;
        color[3] = shape.alpha;
        let half = shape.half_size();
        match shape.kind {
            ShapeKind::Circle => vertices.extend(shapes::circle(
                shape.pos,
                half,
                color,
                shapes::segments_for_radius(half),
            )),
            ShapeKind::Square => vertices.extend(shapes::rect(
                shape.pos - Vec2::splat(half),
                Vec2::splat(shape.size),
                color,
            )),
        }
    }

    // Golden circles
    for circle in &state.golden_circles {
        vertices.extend(shapes::circle(
            circle.pos,
            circle.radius,
            colors::GOLDEN,
            shapes::segments_for_radius(circle.radius),
        ));
    }

    let droplet = &state.droplet;
    if playing && state.trail.len() >= 2 {
        let points: Vec<Vec2> = state.trail.iter().copied().collect();
        vertices.extend(shapes::polyline(&points, droplet.radius * 0.9, colors::TRAIL));
    }

    if playing {
        let r = droplet.radius;
        let focus = droplet.pos + Vec2::new(-r * 0.3, -r * 0.4);
        vertices.extend(shapes::radial_gradient_circle(
            focus,
            r * 0.2,
            droplet.pos,
            r,
            &DROPLET,
            shapes::segments_for_radius(r).max(32),
        ));
    }

    let hud = HudText {
        score: playing.then(|| score_text(state.score)),
        game_over: state.mode() == GameMode::GameOver,
    };

    Frame { vertices, hud }
}
