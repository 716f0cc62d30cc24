//! Game session
//!
//! Owns the simulation context and connects it to input, persistence and UI.
//! Browser callbacks only ever call into `App`; nothing here touches the DOM.

use crate::persistence::HighScoreRecord;
use crate::platform::{InputTracker, KeyValueStore};
use crate::sim::{GameEvent, GameMode, GameState, TickInput, tick};
use crate::tuning::Tuning;
use crate::ui::{PanelVisibility, UiSink};

pub struct App<S: KeyValueStore, U: UiSink> {
    pub state: GameState,
    pub input: InputTracker,
    high_score: HighScoreRecord<S>,
    ui: U,
    /// Timestamp of the previous frame (ms)
    last_frame: Option<f64>,
}

impl<S: KeyValueStore, U: UiSink> App<S, U> {
    /// Load the high score, build the world for the viewport, show the start screen
    pub fn new(tuning: Tuning, width: f32, height: f32, seed: u64, store: S, ui: U) -> Self {
        let high_score = HighScoreRecord::load(store);
        let mut app = Self {
            state: GameState::new(tuning, width, height, seed),
            input: InputTracker::new(),
            high_score,
            ui,
            last_frame: None,
        };
        let best = app.high_score.best();
        app.ui.set_high_score(best);
        app.state.resize(width, height);
        app.state.set_mode(GameMode::Start, 0.0);
        app.flush_events();
        log::info!("Session ready ({}x{}, seed {})", width, height, seed);
        app
    }

    pub fn ui(&self) -> &U {
        &self.ui
    }

    pub fn ui_mut(&mut self) -> &mut U {
        &mut self.ui
    }

    pub fn high_score(&self) -> u64 {
        self.high_score.best()
    }

    pub fn store(&self) -> &S {
        self.high_score.store()
    }

    /// Run one display frame
    pub fn frame(&mut self, timestamp_ms: f64) {
        let dt = match self.last_frame {
            Some(last) => ((timestamp_ms - last) / 1000.0) as f32,
            None => 0.0,
        };
        self.last_frame = Some(timestamp_ms);

        self.state.poll_mode_timer(timestamp_ms);

        let input = TickInput {
            direction: self.input.direction(),
            now_ms: timestamp_ms,
        };
        tick(&mut self.state, &input, dt);

        self.flush_events();
    }

    /// Start button / start panel activation
    pub fn request_start(&mut self, timestamp_ms: f64) {
        if self.state.start_game(timestamp_ms) {
            self.flush_events();
        }
    }

    /// Revive button: continue the run from the game over screen
    pub fn request_revive(&mut self, timestamp_ms: f64) {
        if self.state.revive(timestamp_ms) {
            self.flush_events();
        }
    }

    /// Viewport changed (CSS pixels)
    pub fn resize(&mut self, width: f32, height: f32) {
        self.state.resize(width, height);
    }

    pub fn key_down(&mut self, key: &str) -> bool {
        self.input.key_down(key)
    }

    pub fn key_up(&mut self, key: &str) -> bool {
        self.input.key_up(key)
    }

    /// Window lost focus
    pub fn blur(&mut self) {
        self.input.clear();
    }

    /// Route simulation events to persistence and the UI
    fn flush_events(&mut self) {
        for event in self.state.drain_events() {
            match event {
                GameEvent::ScoreChanged { score } => {
                    self.ui.set_final_score(score);
                    if let Some(best) = self.high_score.submit(score) {
                        self.ui.set_high_score(best);
                    }
                }
                GameEvent::ModeChanged { mode } => {
                    self.ui.show_panels(PanelVisibility::for_mode(mode));
                }
                GameEvent::PickupCollected { pos } => {
                    log::debug!("Pickup at ({:.0}, {:.0})", pos.x, pos.y);
                }
                GameEvent::ObstacleHit { shape_index } => {
                    log::debug!("Hit shape {}", shape_index);
                }
                GameEvent::Wrapped { shape_count } => {
                    log::debug!("Wrapped with {} shapes", shape_count);
                }
            }
        }
    }
}
