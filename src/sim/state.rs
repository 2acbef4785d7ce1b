//! Game state and core simulation types
//!
//! Everything the controller owns between frames lives here: the arena
//! layout, the seeded RNG context, the agent, and the entity world.

use std::collections::BTreeMap;

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use super::spawn::SpawnKind;
use crate::consts::*;

/// Top-level mode of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Mode {
    /// Title screen, waiting for start
    #[default]
    Title,
    /// Active gameplay
    Playing,
    /// Game is paused
    Paused,
    /// Agent ran out of health
    GameOver,
}

impl Mode {
    /// Short label shown in the HUD
    pub fn label(&self) -> &'static str {
        match self {
            Mode::Title => "title",
            Mode::Playing => "play",
            Mode::Paused => "pause",
            Mode::GameOver => "gameover",
        }
    }
}

/// Notable things that happened during a frame (for HUD/audio collaborators)
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum GameEvent {
    LevelReset,
    ModeChanged { from: Mode, to: Mode },
    CoinCollected { score: u32 },
    Damaged { health: u32 },
    /// Hazard contact while invincible
    HitIgnored,
    Defeated { score: u32 },
    SpawnFailed { kind: SpawnKind },
}

/// Screen partition: HUD band on top, playfield below
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Arena {
    pub screen: Rect,
    pub hud: Rect,
    pub playfield: Rect,
}

impl Default for Arena {
    fn default() -> Self {
        Self::new(SCREEN_W, SCREEN_H, HUD_H, PADDING)
    }
}

impl Arena {
    pub fn new(screen_w: i32, screen_h: i32, hud_h: i32, padding: i32) -> Self {
        Self {
            screen: Rect::new(0, 0, screen_w, screen_h),
            hud: Rect::new(0, 0, screen_w, hud_h),
            playfield: Rect::new(
                padding,
                hud_h + padding,
                screen_w - 2 * padding,
                screen_h - hud_h - 2 * padding,
            ),
        }
    }

    /// Fixed wall layout: four border strips, then two interior walls
    pub fn wall_layout(&self) -> [Rect; 6] {
        let pf = self.playfield;
        let t = WALL_THICKNESS;
        [
            Rect::new(pf.left(), pf.top(), pf.width, t),
            Rect::new(pf.left(), pf.bottom() - t, pf.width, t),
            Rect::new(pf.left(), pf.top(), t, pf.height),
            Rect::new(pf.right() - t, pf.top(), t, pf.height),
            Rect::new(pf.left() + 260, pf.top() + 80, 18, 220),
            Rect::new(pf.left() + 520, pf.top() + 200, 260, 18),
        ]
    }

    /// Where the agent starts each level
    pub fn agent_start(&self) -> (i32, i32) {
        self.playfield.center()
    }
}

/// Explicit replacement for process-wide globals: layout plus seeded RNG
#[derive(Debug, Clone)]
pub struct SimContext {
    pub arena: Arena,
    pub seed: u64,
    pub rng: Pcg32,
}

impl SimContext {
    pub fn new(seed: u64) -> Self {
        Self::with_arena(Arena::default(), seed)
    }

    pub fn with_arena(arena: Arena, seed: u64) -> Self {
        Self {
            arena,
            seed,
            rng: Pcg32::seed_from_u64(seed),
        }
    }
}

/// Result of a hazard touching the agent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    /// Agent was invincible, nothing changed
    Ignored,
    Damaged { health: u32 },
    /// Health reached zero
    Defeated,
}

/// The player-controlled agent
///
/// `position` is authoritative; `rect` is derived from it and must be
/// resynchronised after every position change or rectangle correction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    pub position: Vec2,
    pub rect: Rect,
    pub velocity: Vec2,
    /// Units per second
    pub speed: f32,
    pub max_health: u32,
    pub health: u32,
    /// Seconds of post-hit invincibility left
    pub invincible_remaining: f32,
}

impl Agent {
    pub fn new(center: (i32, i32)) -> Self {
        let rect = Rect::from_center(center.0, center.1, AGENT_SIZE, AGENT_SIZE);
        Self {
            position: rect.center_vec(),
            rect,
            velocity: Vec2::ZERO,
            speed: AGENT_SPEED,
            max_health: AGENT_MAX_HEALTH,
            health: AGENT_MAX_HEALTH,
            invincible_remaining: 0.0,
        }
    }

    #[inline]
    pub fn is_invincible(&self) -> bool {
        self.invincible_remaining > 0.0
    }

    pub fn is_defeated(&self) -> bool {
        self.health == 0
    }

    /// Recompute the rectangle's horizontal center from `position.x`.
    /// Halves round to even, so 480.5 maps to 480 and 481.5 to 482.
    pub fn sync_rect_x(&mut self) {
        self.rect.set_center_x(self.position.x.round_ties_even() as i32);
    }

    /// Recompute the rectangle's vertical center from `position.y`
    pub fn sync_rect_y(&mut self) {
        self.rect.set_center_y(self.position.y.round_ties_even() as i32);
    }

    /// Per-frame timer tick
    pub fn tick(&mut self, dt: f32) {
        if self.invincible_remaining > 0.0 {
            self.invincible_remaining = (self.invincible_remaining - dt).max(0.0);
        }
    }

    /// Take a hit unless invincible; a hit opens a fresh invincibility window
    pub fn apply_damage(&mut self, amount: u32, window: f32) -> DamageOutcome {
        if self.is_invincible() {
            return DamageOutcome::Ignored;
        }

        self.health = self.health.saturating_sub(amount);
        self.invincible_remaining = window;

        if self.health == 0 {
            DamageOutcome::Defeated
        } else {
            DamageOutcome::Damaged {
                health: self.health,
            }
        }
    }
}

/// Static impassable rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wall {
    pub rect: Rect,
}

/// Collectible worth `COIN_VALUE` points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coin {
    pub rect: Rect,
}

impl Coin {
    pub fn at(cx: i32, cy: i32) -> Self {
        Self {
            rect: Rect::from_center(cx, cy, COIN_SIZE, COIN_SIZE),
        }
    }
}

/// Damages the agent on contact; never removed during a level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hazard {
    pub rect: Rect,
}

impl Hazard {
    pub fn at(cx: i32, cy: i32) -> Self {
        Self {
            rect: Rect::from_center(cx, cy, HAZARD_SIZE, HAZARD_SIZE),
        }
    }
}

/// Entity type tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Wall,
    Coin,
    Hazard,
}

/// Any non-agent entity in the world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Entity {
    Wall(Wall),
    Coin(Coin),
    Hazard(Hazard),
}

impl Entity {
    pub fn kind(&self) -> EntityKind {
        match self {
            Entity::Wall(_) => EntityKind::Wall,
            Entity::Coin(_) => EntityKind::Coin,
            Entity::Hazard(_) => EntityKind::Hazard,
        }
    }

    pub fn rect(&self) -> &Rect {
        match self {
            Entity::Wall(w) => &w.rect,
            Entity::Coin(c) => &c.rect,
            Entity::Hazard(h) => &h.rect,
        }
    }
}

pub type EntityId = u32;

/// All entities of one level instance
///
/// Entities live in one id-keyed map; per-kind id lists give fast typed
/// iteration. Ids only grow, so the lists stay sorted.
#[derive(Debug, Clone)]
pub struct World {
    pub agent: Agent,
    entities: BTreeMap<EntityId, Entity>,
    walls: Vec<EntityId>,
    coins: Vec<EntityId>,
    hazards: Vec<EntityId>,
    next_id: EntityId,
}

impl World {
    /// Empty world around the given agent
    pub fn new(agent: Agent) -> Self {
        Self {
            agent,
            entities: BTreeMap::new(),
            walls: Vec::new(),
            coins: Vec::new(),
            hazards: Vec::new(),
            next_id: 1,
        }
    }

    /// Agent centered on the playfield, walls placed, nothing spawned yet
    pub fn with_layout(arena: &Arena) -> Self {
        let mut world = Self::new(Agent::new(arena.agent_start()));
        for rect in arena.wall_layout() {
            world.insert(Entity::Wall(Wall { rect }));
        }
        world
    }

    pub fn insert(&mut self, entity: Entity) -> EntityId {
        let id = self.next_id;
        self.next_id += 1;

        match entity.kind() {
            EntityKind::Wall => self.walls.push(id),
            EntityKind::Coin => self.coins.push(id),
            EntityKind::Hazard => self.hazards.push(id),
        }
        self.entities.insert(id, entity);
        id
    }

    pub fn remove(&mut self, id: EntityId) -> Option<Entity> {
        let entity = self.entities.remove(&id)?;
        let index = match entity.kind() {
            EntityKind::Wall => &mut self.walls,
            EntityKind::Coin => &mut self.coins,
            EntityKind::Hazard => &mut self.hazards,
        };
        index.retain(|&e| e != id);
        Some(entity)
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(&id)
    }

    /// All entities in id order
    pub fn entities(&self) -> impl Iterator<Item = (EntityId, &Entity)> + '_ {
        self.entities.iter().map(|(&id, e)| (id, e))
    }

    /// Rectangles of one kind, in id order
    pub fn rects_of(&self, kind: EntityKind) -> impl Iterator<Item = (EntityId, &Rect)> + '_ {
        let index = match kind {
            EntityKind::Wall => &self.walls,
            EntityKind::Coin => &self.coins,
            EntityKind::Hazard => &self.hazards,
        };
        index
            .iter()
            .filter_map(|id| self.entities.get(id).map(|e| (*id, e.rect())))
    }

    pub fn walls(&self) -> impl Iterator<Item = (EntityId, &Rect)> + '_ {
        self.rects_of(EntityKind::Wall)
    }

    pub fn coins(&self) -> impl Iterator<Item = (EntityId, &Rect)> + '_ {
        self.rects_of(EntityKind::Coin)
    }

    pub fn hazards(&self) -> impl Iterator<Item = (EntityId, &Rect)> + '_ {
        self.rects_of(EntityKind::Hazard)
    }

    pub fn wall_count(&self) -> usize {
        self.walls.len()
    }

    pub fn coin_count(&self) -> usize {
        self.coins.len()
    }

    pub fn hazard_count(&self) -> usize {
        self.hazards.len()
    }
}
