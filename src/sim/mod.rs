//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only, owned by an explicit context
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod rect;
pub mod snapshot;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{Axis, MoveResult, move_agent, move_axis};
pub use rect::Rect;
pub use snapshot::{AgentView, EntityView, Snapshot};
pub use spawn::{SpawnError, SpawnKind, Spawner};
pub use state::{
    Agent, Arena, Coin, DamageOutcome, Entity, EntityId, EntityKind, GameEvent, Hazard, Mode,
    SimContext, Wall, World,
};
pub use tick::{Action, Game, HeldKeys, TickInput, sanitize_dt, tick};
