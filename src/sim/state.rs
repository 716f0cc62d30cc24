//! Game state and core simulation types
//!
//! One `GameState` owns everything the frame loop mutates. Platform code
//! never touches it directly except through `app::App`.

use std::collections::VecDeque;

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::mode::{GameMode, ModeController};
use super::world;
use crate::consts::TRAIL_CAPACITY;
use crate::tuning::Tuning;

/// Notifications produced by the simulation, drained once per frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// Score changed (pickup or reset at start)
    ScoreChanged { score: u64 },
    /// Mode transition happened
    ModeChanged { mode: GameMode },
    /// A golden circle was collected at this position
    PickupCollected { pos: Vec2 },
    /// The droplet touched an obstacle
    ObstacleHit { shape_index: usize },
    /// The droplet fell out the bottom and re-entered at the top
    Wrapped { shape_count: usize },
}

/// The player's falling droplet
#[derive(Debug, Clone)]
pub struct Droplet {
    pub pos: Vec2,
    pub radius: f32,
    /// Horizontal speed at 1x (pixels/s)
    pub speed: f32,
    /// Fall speed at 1x (pixels/s)
    pub fall_speed: f32,
}

impl Droplet {
    pub fn new(tuning: &Tuning, pos: Vec2) -> Self {
        Self {
            pos,
            radius: tuning.droplet_radius,
            speed: tuning.droplet_speed,
            fall_speed: tuning.fall_speed,
        }
    }
}

/// Obstacle kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeKind {
    Circle,
    Square,
}

/// A static obstacle. `size` is the diameter (circle) or side length (square).
#[derive(Debug, Clone)]
pub struct Shape {
    pub pos: Vec2,
    pub size: f32,
    pub kind: ShapeKind,
    /// Render opacity (0-1)
    pub alpha: f32,
}

impl Shape {
    #[inline]
    pub fn half_size(&self) -> f32 {
        self.size * 0.5
    }
}

/// A collectible worth one point
#[derive(Debug, Clone)]
pub struct GoldenCircle {
    pub pos: Vec2,
    pub radius: f32,
}

/// Recent droplet positions, oldest first
#[derive(Debug, Clone)]
pub struct Trail {
    points: VecDeque<Vec2>,
    capacity: usize,
}

impl Default for Trail {
    fn default() -> Self {
        Self::with_capacity(TRAIL_CAPACITY)
    }
}

impl Trail {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            points: VecDeque::with_capacity(capacity + 1),
            capacity: capacity.max(1),
        }
    }

    /// Append a point, evicting the oldest when full
    pub fn push(&mut self, pos: Vec2) {
        self.points.push_back(pos);
        while self.points.len() > self.capacity {
            self.points.pop_front();
        }
    }

    /// Replace the whole trail with a single point
    pub fn reset(&mut self, pos: Vec2) {
        self.points.clear();
        self.points.push_back(pos);
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn iter(&self) -> impl Iterator<Item = &Vec2> + '_ {
        self.points.iter()
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    pub tuning: Tuning,
    /// Viewport size in CSS pixels
    pub width: f32,
    pub height: f32,
    pub droplet: Droplet,
    pub shapes: Vec<Shape>,
    /// How many shapes the next regeneration produces
    pub shape_count: usize,
    pub golden_circles: Vec<GoldenCircle>,
    pub trail: Trail,
    /// Seconds of play since the last start
    pub elapsed: f32,
    pub score: u64,
    pub mode: ModeController,
    /// Events since the last drain
    pub events: Vec<GameEvent>,
    rng: Pcg32,
}

impl GameState {
    /// Create a state sized to the viewport, in `Start` mode with no world yet
    pub fn new(tuning: Tuning, width: f32, height: f32, seed: u64) -> Self {
        let droplet = Droplet::new(&tuning, Vec2::new(width * 0.5, height * 0.5));
        let mode = ModeController::new(tuning.game_over_reset_ms);
        Self {
            tuning,
            width,
            height,
            droplet,
            shapes: Vec::new(),
            shape_count: 0,
            golden_circles: Vec::new(),
            trail: Trail::default(),
            elapsed: 0.0,
            score: 0,
            mode,
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Current game mode
    #[inline]
    pub fn mode(&self) -> GameMode {
        self.mode.mode()
    }

    /// Shape count for the current viewport width
    pub fn base_shape_count(&self) -> usize {
        world::base_shape_count(self.width, &self.tuning)
    }

    /// Horizontal range the droplet centre may occupy
    pub fn horizontal_bounds(&self) -> (f32, f32) {
        let inset = self.droplet.radius + self.tuning.wall_margin;
        (inset, self.width - inset)
    }

    /// Clamp droplet x into the playfield (max wins if the viewport is too narrow)
    pub fn clamp_droplet_x(&mut self) {
        let (min_x, max_x) = self.horizontal_bounds();
        self.droplet.pos.x = self.droplet.pos.x.max(min_x).min(max_x);
    }

    /// Regenerate obstacles at the current `shape_count`
    pub fn rebuild_shapes(&mut self) {
        self.shapes = world::build_shapes(&mut self.rng, self.shape_count, self.width, self.height);
    }

    /// Regenerate the full set of golden circles
    pub fn rebuild_golden_circles(&mut self) {
        self.golden_circles = world::build_golden_circles(
            &mut self.rng,
            self.tuning.golden_count,
            self.width,
            self.height,
            self.tuning.golden_padding,
        );
    }

    /// Move one golden circle to a fresh random spot
    pub fn respawn_golden_circle(&mut self, index: usize) {
        if let Some(circle) = self.golden_circles.get_mut(index) {
            *circle = world::spawn_golden_circle(
                &mut self.rng,
                self.width,
                self.height,
                self.tuning.golden_padding,
            );
        }
    }

    /// Apply a new viewport size and regenerate the world for it
    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
        self.droplet.pos.y = height * 0.5;
        self.clamp_droplet_x();

        let base = self.base_shape_count();
        if self.mode() == GameMode::Start || self.shape_count < base {
            self.shape_count = base;
        }
        self.rebuild_shapes();
        self.rebuild_golden_circles();
        log::debug!(
            "Resized to {}x{}: {} shapes, {} golden circles",
            width,
            height,
            self.shapes.len(),
            self.golden_circles.len()
        );
    }

    /// Enter a mode and record the transition
    pub fn set_mode(&mut self, mode: GameMode, now_ms: f64) {
        self.mode.set(mode, now_ms);
        self.events.push(GameEvent::ModeChanged { mode });
    }

    /// Begin a new run. Ignored unless on the start screen.
    pub fn start_game(&mut self, now_ms: f64) -> bool {
        if self.mode() != GameMode::Start {
            return false;
        }
        self.droplet.pos = Vec2::new(self.width * 0.5, self.height * 0.5);
        self.clamp_droplet_x();
        self.shape_count = self.base_shape_count();
        self.elapsed = 0.0;
        self.trail.reset(self.droplet.pos);
        self.score = 0;
        self.events.push(GameEvent::ScoreChanged { score: 0 });
        self.rebuild_shapes();
        self.rebuild_golden_circles();
        self.set_mode(GameMode::Playing, now_ms);
        log::info!("Run started with {} shapes", self.shape_count);
        true
    }

    /// End the run. Only valid while playing.
    pub fn trigger_game_over(&mut self, now_ms: f64) -> bool {
        if self.mode() != GameMode::Playing {
            return false;
        }
        self.set_mode(GameMode::GameOver, now_ms);
        log::info!("Game over with score {}", self.score);
        true
    }

    /// Resume the current run from the game over screen
    pub fn revive(&mut self, now_ms: f64) -> bool {
        if self.mode() != GameMode::GameOver {
            log::debug!("Revive ignored in {:?} mode", self.mode());
            return false;
        }
        self.set_mode(GameMode::Playing, now_ms);
        log::info!("Revived at score {}", self.score);
        true
    }

    /// Fire the game over -> start timer if it is due
    pub fn poll_mode_timer(&mut self, now_ms: f64) -> bool {
        if self.mode.poll(now_ms) {
            self.events.push(GameEvent::ModeChanged {
                mode: self.mode(),
            });
            return true;
        }
        false
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_state(width: f32, height: f32) -> GameState {
        let mut state = GameState::new(Tuning::default(), width, height, 7);
        state.resize(width, height);
        state
    }

    #[test]
    fn test_trail_evicts_oldest() {
        let mut trail = Trail::with_capacity(3);
        for i in 0..5 {
            trail.push(Vec2::new(i as f32, 0.0));
        }
        assert_eq!(trail.len(), 3);
        let xs: Vec<f32> = trail.iter().map(|p| p.x).collect();
        assert_eq!(xs, vec![2.0, 3.0, 4.0]);

        trail.reset(Vec2::new(9.0, 9.0));
        assert_eq!(trail.len(), 1);
    }

    #[test]
    fn test_new_state_starts_in_start_mode() {
        let state = new_state(800.0, 600.0);
        assert_eq!(state.mode(), GameMode::Start);
        assert_eq!(state.shape_count, 10);
        assert_eq!(state.shapes.len(), 10);
        assert_eq!(state.golden_circles.len(), 4);
        assert_eq!(state.droplet.pos, Vec2::new(400.0, 300.0));
    }

    #[test]
    fn test_start_game_resets_run() {
        let mut state = new_state(800.0, 600.0);
        state.score = 12;
        state.elapsed = 30.0;
        state.droplet.pos = Vec2::new(100.0, 50.0);

        assert!(state.start_game(0.0));
        assert_eq!(state.mode(), GameMode::Playing);
        assert_eq!(state.score, 0);
        assert_eq!(state.elapsed, 0.0);
        assert_eq!(state.droplet.pos, Vec2::new(400.0, 300.0));
        assert_eq!(state.trail.len(), 1);

        let events = state.drain_events();
        assert!(events.contains(&GameEvent::ScoreChanged { score: 0 }));
        assert!(events.contains(&GameEvent::ModeChanged {
            mode: GameMode::Playing
        }));

        // Second start request while playing is ignored
        assert!(!state.start_game(10.0));
    }

    #[test]
    fn test_game_over_only_from_playing() {
        let mut state = new_state(800.0, 600.0);
        assert!(!state.trigger_game_over(0.0));
        state.start_game(0.0);
        assert!(state.trigger_game_over(100.0));
        assert!(!state.trigger_game_over(200.0));
        assert_eq!(state.mode(), GameMode::GameOver);
    }

    #[test]
    fn test_revive_only_from_game_over() {
        let mut state = new_state(800.0, 600.0);
        assert!(!state.revive(0.0));
        state.start_game(0.0);
        state.trigger_game_over(10.0);
        assert!(state.revive(20.0));
        assert_eq!(state.mode(), GameMode::Playing);
        assert_eq!(state.mode.pending_reset(), None);
    }

    #[test]
    fn test_resize_grows_world_with_width() {
        let mut state = new_state(800.0, 600.0);
        assert_eq!(state.shape_count, 10);

        state.resize(1600.0, 900.0);
        assert_eq!(state.shape_count, 20);
        assert_eq!(state.shapes.len(), 20);
        assert_eq!(state.golden_circles.len(), 4);
        for shape in &state.shapes {
            assert!(shape.pos.x >= 0.0 && shape.pos.x < 1600.0);
            assert!(shape.pos.y >= 0.0 && shape.pos.y < 900.0);
        }
        for circle in &state.golden_circles {
            let pad = 36.0 + circle.radius;
            assert!(circle.pos.x >= pad && circle.pos.x <= 1600.0 - pad);
            assert!(circle.pos.y >= pad && circle.pos.y <= 900.0 - pad);
        }
        assert_eq!(state.droplet.pos.y, 450.0);
    }

    #[test]
    fn test_resize_while_playing_keeps_grown_count() {
        let mut state = new_state(800.0, 600.0);
        state.start_game(0.0);
        state.shape_count = 18;

        // Same width: count is above the base and survives
        state.resize(800.0, 700.0);
        assert_eq!(state.shape_count, 18);
        assert_eq!(state.shapes.len(), 18);

        // Much wider: base overtakes it
        state.resize(2000.0, 700.0);
        assert_eq!(state.shape_count, 25);
    }

    #[test]
    fn test_resize_on_start_screen_resets_count() {
        let mut state = new_state(800.0, 600.0);
        state.shape_count = 30;
        state.resize(800.0, 600.0);
        assert_eq!(state.shape_count, 10);
    }

    #[test]
    fn test_resize_clamps_droplet_x() {
        let mut state = new_state(1600.0, 900.0);
        state.droplet.pos.x = 1500.0;
        state.resize(800.0, 600.0);
        let (_, max_x) = state.horizontal_bounds();
        assert_eq!(state.droplet.pos.x, max_x);
    }
}
