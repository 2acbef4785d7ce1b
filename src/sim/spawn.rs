//! Rejection-sampling placement of coins and hazards
//!
//! Candidates are drawn uniformly inside the playfield (inset by a per-kind
//! margin) and rejected if they would overlap a wall, the agent, or (for
//! coins) another coin. The attempt budget is bounded so a packed arena
//! can only under-spawn, never hang.

use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::rect::Rect;
use super::state::{Coin, Entity, EntityId, Hazard, World};
use crate::consts::*;

/// What the spawner can place
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpawnKind {
    Coin,
    Hazard,
}

impl SpawnKind {
    /// Inset from the playfield edge for candidate centers
    pub fn margin(&self) -> i32 {
        match self {
            SpawnKind::Coin => COIN_MARGIN,
            SpawnKind::Hazard => HAZARD_MARGIN,
        }
    }

    /// Coins must not overlap each other; hazards may
    pub fn avoids_own_kind(&self) -> bool {
        matches!(self, SpawnKind::Coin)
    }

    fn candidate(&self, cx: i32, cy: i32) -> Entity {
        match self {
            SpawnKind::Coin => Entity::Coin(Coin::at(cx, cy)),
            SpawnKind::Hazard => Entity::Hazard(Hazard::at(cx, cy)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SpawnError {
    #[error("no valid position for {kind:?} after {attempts} attempts")]
    NoValidPosition { kind: SpawnKind, attempts: u32 },
}

/// Bounded rejection sampler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Spawner {
    pub max_attempts: u32,
}

impl Default for Spawner {
    fn default() -> Self {
        Self {
            max_attempts: SPAWN_ATTEMPTS,
        }
    }
}

impl Spawner {
    pub fn new(max_attempts: u32) -> Self {
        Self { max_attempts }
    }

    /// Place one entity of `kind` into `world`, or report exhaustion.
    ///
    /// The world is untouched on failure.
    pub fn spawn<R: Rng>(
        &self,
        kind: SpawnKind,
        world: &mut World,
        playfield: &Rect,
        rng: &mut R,
    ) -> Result<EntityId, SpawnError> {
        let margin = kind.margin();
        let (x_lo, x_hi) = (playfield.left() + margin, playfield.right() - margin);
        let (y_lo, y_hi) = (playfield.top() + margin, playfield.bottom() - margin);

        // Playfield too small to hold any candidate center
        if x_lo > x_hi || y_lo > y_hi {
            return Err(SpawnError::NoValidPosition { kind, attempts: 0 });
        }

        for _ in 0..self.max_attempts {
            let x = rng.random_range(x_lo..=x_hi);
            let y = rng.random_range(y_lo..=y_hi);
            let candidate = kind.candidate(x, y);

            if is_clear(kind, candidate.rect(), world) {
                return Ok(world.insert(candidate));
            }
        }

        Err(SpawnError::NoValidPosition {
            kind,
            attempts: self.max_attempts,
        })
    }
}

fn is_clear(kind: SpawnKind, rect: &Rect, world: &World) -> bool {
    if world.walls().any(|(_, wall)| wall.intersects(rect)) {
        return false;
    }
    if kind.avoids_own_kind() && world.coins().any(|(_, coin)| coin.intersects(rect)) {
        return false;
    }
    !rect.intersects(&world.agent.rect)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Agent, Arena, EntityKind};
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn assert_disjoint(world: &World, id: EntityId) {
        let entity = world.get(id).expect("spawned entity exists");
        let rect = entity.rect();
        assert!(world.walls().all(|(_, w)| !w.intersects(rect)));
        assert!(!rect.intersects(&world.agent.rect));
        if entity.kind() == EntityKind::Coin {
            assert!(world
                .coins()
                .filter(|(other, _)| *other != id)
                .all(|(_, c)| !c.intersects(rect)));
        }
    }

    #[test]
    fn test_spawn_default_level() {
        let arena = Arena::default();
        let mut world = World::with_layout(&arena);
        let mut rng = Pcg32::seed_from_u64(6);
        let spawner = Spawner::default();

        for _ in 0..COIN_COUNT {
            let id = spawner
                .spawn(SpawnKind::Coin, &mut world, &arena.playfield, &mut rng)
                .expect("open arena has room");
            assert_disjoint(&world, id);
        }
        for _ in 0..HAZARD_COUNT {
            let id = spawner
                .spawn(SpawnKind::Hazard, &mut world, &arena.playfield, &mut rng)
                .expect("open arena has room");
            assert_disjoint(&world, id);
        }
        assert_eq!(world.coin_count(), COIN_COUNT);
        assert_eq!(world.hazard_count(), HAZARD_COUNT);
    }

    #[test]
    fn test_spawn_respects_margin() {
        let arena = Arena::default();
        let mut world = World::with_layout(&arena);
        let mut rng = Pcg32::seed_from_u64(42);
        let spawner = Spawner::default();
        let pf = arena.playfield;

        for _ in 0..20 {
            if let Ok(id) = spawner.spawn(SpawnKind::Hazard, &mut world, &pf, &mut rng) {
                let (cx, cy) = world.get(id).map(|e| e.rect().center()).unwrap_or_default();
                assert!(cx >= pf.left() + HAZARD_MARGIN && cx <= pf.right() - HAZARD_MARGIN);
                assert!(cy >= pf.top() + HAZARD_MARGIN && cy <= pf.bottom() - HAZARD_MARGIN);
            }
        }
    }

    #[test]
    fn test_spawn_exhaustion_when_blocked() {
        let arena = Arena::default();
        let mut world = World::new(Agent::new((-500, -500)));
        world.insert(Entity::Wall(crate::sim::state::Wall {
            rect: arena.playfield,
        }));
        let mut rng = Pcg32::seed_from_u64(1);

        let result = Spawner::default().spawn(SpawnKind::Coin, &mut world, &arena.playfield, &mut rng);
        assert_eq!(
            result,
            Err(SpawnError::NoValidPosition {
                kind: SpawnKind::Coin,
                attempts: SPAWN_ATTEMPTS,
            })
        );
        assert_eq!(world.coin_count(), 0);
    }

    #[test]
    fn test_spawn_rejects_agent_overlap() {
        // Single possible center, right on top of the agent
        let playfield = Rect::new(0, 0, 80, 80);
        let mut world = World::new(Agent::new((40, 40)));
        let mut rng = Pcg32::seed_from_u64(3);

        let result = Spawner::new(10).spawn(SpawnKind::Coin, &mut world, &playfield, &mut rng);
        assert!(matches!(
            result,
            Err(SpawnError::NoValidPosition { attempts: 10, .. })
        ));
    }

    #[test]
    fn test_coins_avoid_coins_but_hazards_stack() {
        let mut rng = Pcg32::seed_from_u64(9);
        let spawner = Spawner::default();

        let coin_field = Rect::new(0, 0, 80, 80);
        let mut world = World::new(Agent::new((1000, 1000)));
        assert!(spawner.spawn(SpawnKind::Coin, &mut world, &coin_field, &mut rng).is_ok());
        assert!(spawner.spawn(SpawnKind::Coin, &mut world, &coin_field, &mut rng).is_err());

        let hazard_field = Rect::new(0, 0, 120, 120);
        let mut world = World::new(Agent::new((1000, 1000)));
        assert!(spawner.spawn(SpawnKind::Hazard, &mut world, &hazard_field, &mut rng).is_ok());
        assert!(spawner.spawn(SpawnKind::Hazard, &mut world, &hazard_field, &mut rng).is_ok());
        assert_eq!(world.hazard_count(), 2);
    }

    #[test]
    fn test_playfield_smaller_than_margin() {
        let mut world = World::new(Agent::new((1000, 1000)));
        let mut rng = Pcg32::seed_from_u64(0);
        let result = Spawner::default().spawn(
            SpawnKind::Hazard,
            &mut world,
            &Rect::new(0, 0, 50, 50),
            &mut rng,
        );
        assert_eq!(
            result,
            Err(SpawnError::NoValidPosition {
                kind: SpawnKind::Hazard,
                attempts: 0,
            })
        );
    }

    proptest! {
        #[test]
        fn prop_spawned_entities_are_disjoint(seed in any::<u64>(), extra in 0usize..12) {
            let arena = Arena::default();
            let mut world = World::with_layout(&arena);
            let mut rng = Pcg32::seed_from_u64(seed);
            let spawner = Spawner::default();

            for i in 0..(COIN_COUNT + extra) {
                let kind = if i % 4 == 3 { SpawnKind::Hazard } else { SpawnKind::Coin };
                if let Ok(id) = spawner.spawn(kind, &mut world, &arena.playfield, &mut rng) {
                    assert_disjoint(&world, id);
                }
            }
        }
    }
}
