//! Coarse game mode and the game over -> start timer

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameMode {
    /// Title screen, waiting for a start action
    Start,
    /// Active gameplay
    Playing,
    /// Run ended; returns to `Start` after a delay
    GameOver,
}

impl GameMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameMode::Start => "start",
            GameMode::Playing => "playing",
            GameMode::GameOver => "gameover",
        }
    }
}

/// Mode state machine with a single pending reset deadline
///
/// Deadlines are in frame-clock milliseconds (the timestamp handed to the
/// animation frame callback).
#[derive(Debug, Clone)]
pub struct ModeController {
    mode: GameMode,
    reset_delay_ms: f64,
    reset_at: Option<f64>,
}

impl ModeController {
    pub fn new(reset_delay_ms: f64) -> Self {
        Self {
            mode: GameMode::Start,
            reset_delay_ms,
            reset_at: None,
        }
    }

    #[inline]
    pub fn mode(&self) -> GameMode {
        self.mode
    }

    /// Deadline of the scheduled return to `Start`, if any
    pub fn pending_reset(&self) -> Option<f64> {
        self.reset_at
    }

    /// Enter `mode`. Entering `GameOver` schedules the reset; anything else cancels it.
    pub fn set(&mut self, mode: GameMode, now_ms: f64) {
        if mode != self.mode {
            log::info!("Mode {} -> {}", self.mode.as_str(), mode.as_str());
        }
        self.mode = mode;
        self.reset_at = match mode {
            GameMode::GameOver => Some(now_ms + self.reset_delay_ms),
            GameMode::Start | GameMode::Playing => None,
        };
    }

    /// Enter `Start` if the reset deadline has passed. Returns true if it fired.
    pub fn poll(&mut self, now_ms: f64) -> bool {
        match self.reset_at {
            Some(at) if now_ms >= at => {
                self.set(GameMode::Start, now_ms);
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELAY: f64 = 4000.0;

    #[test]
    fn test_game_over_returns_to_start_after_delay() {
        let mut mode = ModeController::new(DELAY);
        mode.set(GameMode::Playing, 0.0);
        mode.set(GameMode::GameOver, 1000.0);
        assert_eq!(mode.pending_reset(), Some(5000.0));

        assert!(!mode.poll(4999.0));
        assert_eq!(mode.mode(), GameMode::GameOver);

        assert!(mode.poll(5000.0));
        assert_eq!(mode.mode(), GameMode::Start);
        assert_eq!(mode.pending_reset(), None);

        // Fires once
        assert!(!mode.poll(9000.0));
    }

    #[test]
    fn test_manual_start_cancels_timer() {
        let mut mode = ModeController::new(DELAY);
        mode.set(GameMode::GameOver, 0.0);
        mode.set(GameMode::Start, 1000.0);
        assert_eq!(mode.pending_reset(), None);

        mode.set(GameMode::Playing, 2000.0);
        assert!(!mode.poll(10_000.0));
        assert_eq!(mode.mode(), GameMode::Playing);
    }

    #[test]
    fn test_playing_cancels_timer() {
        let mut mode = ModeController::new(DELAY);
        mode.set(GameMode::GameOver, 0.0);
        mode.set(GameMode::Playing, 500.0);
        assert!(!mode.poll(4000.0));
        assert!(!mode.poll(60_000.0));
        assert_eq!(mode.mode(), GameMode::Playing);
    }

    #[test]
    fn test_mode_names() {
        assert_eq!(GameMode::Start.as_str(), "start");
        assert_eq!(GameMode::Playing.as_str(), "playing");
        assert_eq!(GameMode::GameOver.as_str(), "gameover");
    }
}
