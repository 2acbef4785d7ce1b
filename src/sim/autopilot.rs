//! Idle/demo steering: head for the nearest coin

use std::cmp::Ordering;

use glam::Vec2;

use super::state::World;

/// Unit direction from the agent toward the closest live coin.
/// Zero when there are no coins or the agent already sits on the target.
pub fn steer(world: &World) -> Vec2 {
    let here = world.agent.position;

    // min_by keeps the first of equal candidates, i.e. the lowest id
    world
        .coins()
        .map(|(_, rect)| rect.center_vec())
        .min_by(|a, b| {
            a.distance_squared(here)
                .partial_cmp(&b.distance_squared(here))
                .unwrap_or(Ordering::Equal)
        })
        .map(|target| (target - here).normalize_or_zero())
        .unwrap_or(Vec2::ZERO)
}
