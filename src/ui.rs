//! DOM user interface: start/game over panels and score readouts
//!
//! The session talks to a `UiSink`; the browser implementation writes into
//! elements of the host page.

#[cfg(target_arch = "wasm32")]
use crate::renderer::HudText;
use crate::sim::GameMode;

/// Which overlay panels are showing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelVisibility {
    pub start_panel: bool,
    pub gameover_panel: bool,
}

impl PanelVisibility {
    pub fn for_mode(mode: GameMode) -> Self {
        match mode {
            GameMode::Start => Self {
                start_panel: true,
                gameover_panel: false,
            },
            GameMode::Playing => Self {
                start_panel: false,
                gameover_panel: false,
            },
            GameMode::GameOver => Self {
                start_panel: false,
                gameover_panel: true,
            },
        }
    }
}

/// Text shown for the current run's score
pub fn score_text(score: u64) -> String {
    format!("Score {}", score)
}

/// Where the session sends UI updates
pub trait UiSink {
    fn show_panels(&mut self, panels: PanelVisibility);
    fn set_high_score(&mut self, best: u64);
    fn set_final_score(&mut self, score: u64);
}

/// Discards everything (native runs)
#[derive(Debug, Default)]
pub struct NullUi;

impl UiSink for NullUi {
    fn show_panels(&mut self, _panels: PanelVisibility) {}
    fn set_high_score(&mut self, _best: u64) {}
    fn set_final_score(&mut self, _score: u64) {}
}

/// CSS class used to hide panels
#[cfg(target_arch = "wasm32")]
const HIDDEN_CLASS: &str = "is-hidden";

/// UI backed by elements of the host page (WASM only)
#[cfg(target_arch = "wasm32")]
pub struct DomUi {
    start_panel: Option<web_sys::Element>,
    gameover_panel: Option<web_sys::Element>,
    high_score: Option<web_sys::Element>,
    final_score: Option<web_sys::Element>,
    hud_score: Option<web_sys::Element>,
    hud_game_over: Option<web_sys::Element>,
    last_hud: Option<HudText>,
}

#[cfg(target_arch = "wasm32")]
impl DomUi {
    /// Look up the page's UI elements. Missing ones are skipped silently.
    pub fn new(document: &web_sys::Document) -> Self {
        let by_id = |id: &str| document.get_element_by_id(id);
        let by_selector = |sel: &str| document.query_selector(sel).ok().flatten();
        Self {
            start_panel: by_selector(".start-panel"),
            gameover_panel: by_selector(".gameover-panel"),
            high_score: by_id("highScoreValue"),
            final_score: by_id("finalScore"),
            hud_score: by_id("hudScore"),
            hud_game_over: by_id("hudGameOver"),
            last_hud: None,
        }
    }

    pub fn start_panel(&self) -> Option<&web_sys::Element> {
        self.start_panel.as_ref()
    }

    fn set_hidden(el: Option<&web_sys::Element>, hidden: bool) {
        if let Some(el) = el {
            let classes = el.class_list();
            let _ = if hidden {
                classes.add_1(HIDDEN_CLASS)
            } else {
                classes.remove_1(HIDDEN_CLASS)
            };
        }
    }

    /// Draw the frame's text layer into the HUD overlay
    pub fn apply_hud(&mut self, hud: &HudText) {
        if self.last_hud.as_ref() == Some(hud) {
            return;
        }
        if let Some(el) = &self.hud_score {
            el.set_text_content(hud.score.as_deref());
        }
        Self::set_hidden(self.hud_score.as_ref(), hud.score.is_none());
        Self::set_hidden(self.hud_game_over.as_ref(), !hud.game_over);
        self.last_hud = Some(hud.clone());
    }
}

#[cfg(target_arch = "wasm32")]
impl UiSink for DomUi {
    fn show_panels(&mut self, panels: PanelVisibility) {
        Self::set_hidden(self.start_panel.as_ref(), !panels.start_panel);
        Self::set_hidden(self.gameover_panel.as_ref(), !panels.gameover_panel);
    }

    fn set_high_score(&mut self, best: u64) {
        if let Some(el) = &self.high_score {
            el.set_text_content(Some(&best.to_string()));
        }
    }

    fn set_final_score(&mut self, score: u64) {
        if let Some(el) = &self.final_score {
            el.set_text_content(Some(&score_text(score)));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_panels_for_mode() {
        assert_eq!(
            PanelVisibility::for_mode(GameMode::Start),
            PanelVisibility {
                start_panel: true,
                gameover_panel: false
            }
        );
        let playing = PanelVisibility::for_mode(GameMode::Playing);
        assert!(!playing.start_panel && !playing.gameover_panel);
        let over = PanelVisibility::for_mode(GameMode::GameOver);
        assert!(!over.start_panel && over.gameover_panel);
    }

    #[test]
    fn test_score_text() {
        assert_eq!(score_text(0), "Score 0");
        assert_eq!(score_text(17), "Score 17");
    }
}
