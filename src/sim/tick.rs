//! Per-frame simulation step and mode state machine
//!
//! Actions are applied first, then, only while `Playing`, the agent moves,
//! timers tick, coins are collected and hazards are checked.

use glam::Vec2;

use super::autopilot;
use super::collision::move_agent;
use super::rect::Rect;
use super::snapshot::Snapshot;
use super::spawn::{SpawnKind, Spawner};
use super::state::{DamageOutcome, EntityId, GameEvent, Mode, SimContext, World};
use crate::consts::*;

/// Movement keys currently held (arrows and WASD resolve to the same flags)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HeldKeys {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

impl HeldKeys {
    /// Unit-length direction (or zero); diagonals are not faster than axes.
    /// Screen coordinates: +y points down.
    pub fn direction(&self) -> Vec2 {
        let mut x = 0.0;
        let mut y = 0.0;
        if self.left {
            x -= 1.0;
        }
        if self.right {
            x += 1.0;
        }
        if self.up {
            y -= 1.0;
        }
        if self.down {
            y += 1.0;
        }
        Vec2::new(x, y).normalize_or_zero()
    }
}

/// Discrete player commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Start from the title screen, or restart after game over
    Start,
    TogglePause,
    ToggleDebug,
    /// Rebuild the level without changing mode
    Reset,
    Quit,
}

/// Input commands for a single frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub keys: HeldKeys,
    pub start: bool,
    pub pause: bool,
    pub reset: bool,
    pub toggle_debug: bool,
    pub quit: bool,
    /// Idle/demo mode - autopilot plays the game
    pub idle_mode: bool,
}

impl TickInput {
    /// One-shot actions in application order
    pub fn actions(&self) -> impl Iterator<Item = Action> {
        [
            (self.quit, Action::Quit),
            (self.toggle_debug, Action::ToggleDebug),
            (self.reset, Action::Reset),
            (self.pause, Action::TogglePause),
            (self.start, Action::Start),
        ]
        .into_iter()
        .filter_map(|(set, action)| set.then_some(action))
    }

    /// Clear one-shot flags after they were processed
    pub fn clear_actions(&mut self) {
        self.start = false;
        self.pause = false;
        self.reset = false;
        self.toggle_debug = false;
        self.quit = false;
    }
}

/// Clamp a measured frame delta into the range the simulation accepts
pub fn sanitize_dt(raw: f32, max_dt: f32) -> f32 {
    if raw.is_nan() {
        return 0.0;
    }
    raw.clamp(0.0, max_dt.max(0.0))
}

/// Complete game: context, current level, score and mode
#[derive(Debug, Clone)]
pub struct Game {
    pub ctx: SimContext,
    pub world: World,
    pub spawner: Spawner,
    pub score: u32,
    pub mode: Mode,
    /// Debug overlay flag; no effect on the simulation
    pub debug: bool,
    pub quit_requested: bool,
    events: Vec<GameEvent>,
}

impl Game {
    /// New game on the title screen with a freshly built level
    pub fn new(seed: u64) -> Self {
        Self::with_context(SimContext::new(seed))
    }

    pub fn with_context(ctx: SimContext) -> Self {
        let world = World::with_layout(&ctx.arena);
        let mut game = Self {
            ctx,
            world,
            spawner: Spawner::default(),
            score: 0,
            mode: Mode::Title,
            debug: false,
            quit_requested: false,
            events: Vec::new(),
        };
        game.reset_level();
        game
    }

    /// Replace the whole level: walls, centered agent, fresh coins and
    /// hazards, zero score. Mode is left alone.
    pub fn reset_level(&mut self) {
        self.world = World::with_layout(&self.ctx.arena);
        self.score = 0;

        for _ in 0..COIN_COUNT {
            self.spawn(SpawnKind::Coin);
        }
        for _ in 0..HAZARD_COUNT {
            self.spawn(SpawnKind::Hazard);
        }

        log::info!(
            "Level reset: {} coins, {} hazards (seed {})",
            self.world.coin_count(),
            self.world.hazard_count(),
            self.ctx.seed
        );
        self.events.push(GameEvent::LevelReset);
    }

    /// Apply one discrete action according to the mode transition table
    pub fn handle_action(&mut self, action: Action) {
        match action {
            Action::Quit => self.quit_requested = true,
            Action::ToggleDebug => self.debug = !self.debug,
            Action::Reset => self.reset_level(),
            Action::TogglePause => match self.mode {
                Mode::Playing => self.set_mode(Mode::Paused),
                Mode::Paused => self.set_mode(Mode::Playing),
                Mode::Title | Mode::GameOver => {}
            },
            Action::Start => match self.mode {
                Mode::Title | Mode::GameOver => {
                    self.reset_level();
                    self.set_mode(Mode::Playing);
                }
                Mode::Playing | Mode::Paused => {}
            },
        }
    }

    /// Advance the simulation by `dt` seconds. No-op unless `Playing`.
    ///
    /// `direction` must have length <= 1 and `dt` must be non-negative.
    pub fn update(&mut self, direction: Vec2, dt: f32) {
        if self.mode != Mode::Playing {
            return;
        }
        debug_assert!(dt >= 0.0, "negative frame delta");

        let walls: Vec<Rect> = self.world.walls().map(|(_, r)| *r).collect();
        let moved = move_agent(&mut self.world.agent, &walls, direction, dt);
        if moved.blocked_x || moved.blocked_y {
            log::trace!(
                "Agent blocked (x: {}, y: {}) at {:?}",
                moved.blocked_x,
                moved.blocked_y,
                self.world.agent.rect.center()
            );
        }

        self.world.agent.tick(dt);

        self.collect_coins();
        self.check_hazards();
    }

    fn collect_coins(&mut self) {
        let agent_rect = self.world.agent.rect;
        let collected: Vec<EntityId> = self
            .world
            .coins()
            .filter(|(_, rect)| rect.intersects(&agent_rect))
            .map(|(id, _)| id)
            .collect();

        for &id in &collected {
            self.world.remove(id);
            self.score += COIN_VALUE;
            log::debug!("Coin {} collected, score {}", id, self.score);
            self.events.push(GameEvent::CoinCollected { score: self.score });
        }
        for _ in &collected {
            self.spawn(SpawnKind::Coin);
        }
    }

    /// Only the first overlapping hazard counts; multiple contacts do not stack
    fn check_hazards(&mut self) {
        let agent_rect = self.world.agent.rect;
        let Some((hazard_id, _)) = self
            .world
            .hazards()
            .find(|(_, rect)| rect.intersects(&agent_rect))
        else {
            return;
        };

        match self
            .world
            .agent
            .apply_damage(HAZARD_DAMAGE, INVINCIBILITY_WINDOW)
        {
            DamageOutcome::Ignored => self.events.push(GameEvent::HitIgnored),
            DamageOutcome::Damaged { health } => {
                log::debug!("Hazard {} hit, health {}", hazard_id, health);
                self.events.push(GameEvent::Damaged { health });
            }
            DamageOutcome::Defeated => {
                self.events.push(GameEvent::Damaged { health: 0 });
                self.events.push(GameEvent::Defeated { score: self.score });
                self.set_mode(Mode::GameOver);
            }
        }
    }

    /// Spawn one entity; exhaustion is logged and reported as an event
    fn spawn(&mut self, kind: SpawnKind) -> Option<EntityId> {
        let playfield = self.ctx.arena.playfield;
        match self
            .spawner
            .spawn(kind, &mut self.world, &playfield, &mut self.ctx.rng)
        {
            Ok(id) => Some(id),
            Err(e) => {
                log::warn!("Spawn skipped: {}", e);
                self.events.push(GameEvent::SpawnFailed { kind });
                None
            }
        }
    }

    fn set_mode(&mut self, mode: Mode) {
        if self.mode == mode {
            return;
        }
        log::info!("Mode {} -> {}", self.mode.label(), mode.label());
        self.events.push(GameEvent::ModeChanged {
            from: self.mode,
            to: mode,
        });
        self.mode = mode;
    }

    /// Events recorded since the last drain.
    ///
    /// `tick` discards whatever is left over from the previous frame, so a
    /// driver that only calls `tick` sees one frame's worth. Callers that step
    /// with `update` directly must drain.
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Read-only view for the presentation layer
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(self)
    }
}

/// Advance the game by one frame: actions first, then the simulation
pub fn tick(game: &mut Game, input: &TickInput, dt: f32) {
    game.events.clear();

    for action in input.actions() {
        game.handle_action(action);
    }

    let direction = if input.idle_mode {
        if matches!(game.mode, Mode::Title | Mode::GameOver) {
            game.handle_action(Action::Start);
        }
        autopilot::steer(&game.world)
    } else {
        input.keys.direction()
    };

    game.update(direction, dt);
}
