//! Read-only frame snapshot handed to the presentation layer

use serde::Serialize;

use super::rect::Rect;
use super::state::{EntityId, EntityKind, Mode};
use super::tick::Game;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgentView {
    pub rect: Rect,
    pub health: u32,
    pub max_health: u32,
    pub invincible: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EntityView {
    pub id: EntityId,
    pub kind: EntityKind,
    pub rect: Rect,
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub mode: Mode,
    pub score: u32,
    pub debug: bool,
    pub hud: Rect,
    pub playfield: Rect,
    pub agent: AgentView,
    /// Walls, coins and hazards in id order
    pub entities: Vec<EntityView>,
}

impl Snapshot {
    pub fn capture(game: &Game) -> Self {
        let agent = &game.world.agent;
        Self {
            mode: game.mode,
            score: game.score,
            debug: game.debug,
            hud: game.ctx.arena.hud,
            playfield: game.ctx.arena.playfield,
            agent: AgentView {
                rect: agent.rect,
                health: agent.health,
                max_health: agent.max_health,
                invincible: agent.is_invincible(),
            },
            entities: game
                .world
                .entities()
                .map(|(id, e)| EntityView {
                    id,
                    kind: e.kind(),
                    rect: *e.rect(),
                })
                .collect(),
        }
    }

    pub fn of_kind(&self, kind: EntityKind) -> impl Iterator<Item = &EntityView> + '_ {
        self.entities.iter().filter(move |e| e.kind == kind)
    }
}
