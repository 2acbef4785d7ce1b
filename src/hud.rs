//! HUD and overlay model
//!
//! Turns a simulation snapshot into the text, bar geometry and overlay
//! content a renderer needs. Nothing here draws; a backend consumes it.

use serde::Serialize;

use crate::sim::{EntityKind, Mode, Rect, Snapshot};

/// Help line shown under the score
pub const HELP_TEXT: &str = "F1 debug  |  P pause  |  R reset  |  Esc quit";

const BAR_W: i32 = 220;
const BAR_H: i32 = 22;
const BAR_Y: i32 = 18;
const BAR_INSET: i32 = 2;

/// Health bar color band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HealthBand {
    Ok,
    Warn,
    Bad,
}

impl HealthBand {
    pub fn from_fraction(fraction: f32) -> Self {
        if fraction <= 0.30 {
            HealthBand::Bad
        } else if fraction <= 0.60 {
            HealthBand::Warn
        } else {
            HealthBand::Ok
        }
    }
}

/// Text emphasis, mapped to palette colors by the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Tone {
    Text,
    Subtle,
    Accent,
    Danger,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverlayLine {
    pub text: String,
    /// Font size in pixels
    pub size: u32,
    pub tone: Tone,
}

impl OverlayLine {
    fn new(text: impl Into<String>, size: u32, tone: Tone) -> Self {
        Self {
            text: text.into(),
            size,
            tone,
        }
    }
}

/// Rectangles outlined when the debug overlay is on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum OutlineKind {
    Playfield,
    Agent,
    Coin,
    Hazard,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HudModel {
    pub score_text: String,
    pub health_text: String,
    pub health_fraction: f32,
    pub health_band: HealthBand,
    /// Outer frame of the health bar
    pub health_bar: Rect,
    /// Filled part, inside the inset
    pub health_fill: Rect,
    pub state_text: String,
    pub help_text: &'static str,
    /// Dimmed full-screen panel with centered lines, outside `Playing`
    pub overlay: Vec<OverlayLine>,
    pub outlines: Vec<(OutlineKind, Rect)>,
}

impl HudModel {
    pub fn from_snapshot(snap: &Snapshot) -> Self {
        let agent = &snap.agent;
        let fraction = if agent.max_health == 0 {
            0.0
        } else {
            (agent.health as f32 / agent.max_health as f32).clamp(0.0, 1.0)
        };

        let health_bar = Rect::new((snap.hud.width - BAR_W) / 2, BAR_Y, BAR_W, BAR_H);
        let inner = health_bar.inflate(-2 * BAR_INSET, -2 * BAR_INSET);
        let fill_w = (inner.width as f32 * fraction) as i32;

        Self {
            score_text: format!("Score: {}", snap.score),
            health_text: format!("HP {}/{}", agent.health, agent.max_health),
            health_fraction: fraction,
            health_band: HealthBand::from_fraction(fraction),
            health_bar,
            health_fill: Rect::new(inner.x, inner.y, fill_w, inner.height),
            state_text: format!("State: {}", snap.mode.label()),
            help_text: HELP_TEXT,
            overlay: overlay_for(snap.mode, snap.score),
            outlines: if snap.debug { outlines(snap) } else { Vec::new() },
        }
    }

    pub fn has_overlay(&self) -> bool {
        !self.overlay.is_empty()
    }
}

fn overlay_for(mode: Mode, score: u32) -> Vec<OverlayLine> {
    match mode {
        Mode::Playing => Vec::new(),
        Mode::Title => vec![
            OverlayLine::new("COIN ARENA", 54, Tone::Text),
            OverlayLine::new("Collect coins. Avoid hazards.", 28, Tone::Text),
            OverlayLine::new("Press Space to start", 32, Tone::Accent),
        ],
        Mode::Paused => vec![
            OverlayLine::new("PAUSED", 72, Tone::Text),
            OverlayLine::new("Press P to resume", 32, Tone::Subtle),
        ],
        Mode::GameOver => vec![
            OverlayLine::new("GAME OVER", 72, Tone::Danger),
            OverlayLine::new(format!("Final score: {}", score), 34, Tone::Text),
            OverlayLine::new("Press Space to restart", 32, Tone::Accent),
        ],
    }
}

fn outlines(snap: &Snapshot) -> Vec<(OutlineKind, Rect)> {
    let mut out = vec![
        (OutlineKind::Playfield, snap.playfield),
        (OutlineKind::Agent, snap.agent.rect),
    ];
    out.extend(snap.of_kind(EntityKind::Coin).map(|e| (OutlineKind::Coin, e.rect)));
    out.extend(snap.of_kind(EntityKind::Hazard).map(|e| (OutlineKind::Hazard, e.rect)));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::{Action, Game};

    #[test]
    fn test_health_bands() {
        assert_eq!(HealthBand::from_fraction(1.0), HealthBand::Ok);
        assert_eq!(HealthBand::from_fraction(0.61), HealthBand::Ok);
        assert_eq!(HealthBand::from_fraction(0.60), HealthBand::Warn);
        assert_eq!(HealthBand::from_fraction(0.40), HealthBand::Warn);
        assert_eq!(HealthBand::from_fraction(0.30), HealthBand::Bad);
        assert_eq!(HealthBand::from_fraction(0.0), HealthBand::Bad);
    }

    #[test]
    fn test_title_hud() {
        let hud = HudModel::from_snapshot(&Game::new(6).snapshot());
        assert_eq!(hud.score_text, "Score: 0");
        assert_eq!(hud.health_text, "HP 100/100");
        assert_eq!(hud.state_text, "State: title");
        assert_eq!(hud.overlay.len(), 3);
        assert_eq!(hud.overlay[2].text, "Press Space to start");
        assert!(hud.outlines.is_empty());
    }

    #[test]
    fn test_health_bar_geometry() {
        let mut game = Game::new(6);
        game.world.agent.health = 50;
        let hud = HudModel::from_snapshot(&game.snapshot());

        assert_eq!(hud.health_bar, Rect::new(370, 18, 220, 22));
        assert_eq!(hud.health_fill, Rect::new(372, 20, 108, 18));
        assert_eq!(hud.health_band, HealthBand::Warn);
    }

    #[test]
    fn test_playing_has_no_overlay_and_debug_outlines() {
        let mut game = Game::new(6);
        game.handle_action(Action::Start);
        game.handle_action(Action::ToggleDebug);
        let hud = HudModel::from_snapshot(&game.snapshot());

        assert!(!hud.has_overlay());
        assert_eq!(hud.state_text, "State: play");
        assert_eq!(hud.outlines.len(), 2 + COIN_COUNT + HAZARD_COUNT);
        assert_eq!(hud.outlines[0].0, OutlineKind::Playfield);
    }

    #[test]
    fn test_game_over_shows_final_score() {
        let mut game = Game::new(6);
        game.handle_action(Action::Start);
        game.score = 120;
        game.mode = Mode::GameOver;
        let hud = HudModel::from_snapshot(&game.snapshot());

        assert_eq!(hud.overlay[0].tone, Tone::Danger);
        assert_eq!(hud.overlay[1].text, "Final score: 120");
    }
}
