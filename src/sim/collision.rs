//! Agent movement and collision response against static walls
//!
//! Movement is resolved one axis at a time: X first, then Y starting from
//! the already-corrected X. Each axis step moves the continuous position,
//! re-derives the rectangle, then pushes the leading edge back out of every
//! wall it entered. This avoids corner snagging and lets the agent slide
//! along wall faces.

use glam::Vec2;

use super::rect::Rect;
use super::state::Agent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

/// Which axes were clamped by a wall this step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MoveResult {
    pub blocked_x: bool,
    pub blocked_y: bool,
}

/// Advance the agent by `direction * speed * dt`, resolving against `walls`.
///
/// `direction` must have length <= 1 and `dt` must be non-negative.
pub fn move_agent(agent: &mut Agent, walls: &[Rect], direction: Vec2, dt: f32) -> MoveResult {
    agent.velocity = direction * agent.speed;
    let step = agent.velocity * dt;

    MoveResult {
        blocked_x: move_axis(agent, walls, Axis::X, step.x),
        blocked_y: move_axis(agent, walls, Axis::Y, step.y),
    }
}

/// Move along one axis and push out of any wall entered.
///
/// Returns true if at least one correction was applied.
pub fn move_axis(agent: &mut Agent, walls: &[Rect], axis: Axis, amount: f32) -> bool {
    match axis {
        Axis::X => {
            agent.position.x += amount;
            agent.sync_rect_x();
        }
        Axis::Y => {
            agent.position.y += amount;
            agent.sync_rect_y();
        }
    }

    // Walls hit by the uncorrected rectangle, in slice order
    let hits: Vec<Rect> = walls
        .iter()
        .filter(|wall| wall.intersects(&agent.rect))
        .copied()
        .collect();
    if hits.is_empty() || amount == 0.0 {
        return false;
    }

    // Edges only ever move backwards against the motion, so the most
    // restrictive wall wins regardless of order.
    for wall in &hits {
        let rect = &mut agent.rect;
        match axis {
            Axis::X => {
                if amount > 0.0 {
                    rect.set_right(rect.right().min(wall.left()));
                } else {
                    rect.set_left(rect.left().max(wall.right()));
                }
                agent.position.x = agent.rect.center_x() as f32;
            }
            Axis::Y => {
                if amount > 0.0 {
                    rect.set_bottom(rect.bottom().min(wall.top()));
                } else {
                    rect.set_top(rect.top().max(wall.bottom()));
                }
                agent.position.y = agent.rect.center_y() as f32;
            }
        }
    }

    log::trace!("agent clamped on {:?} by {} wall(s)", axis, hits.len());
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Arena;

    fn default_walls() -> Vec<Rect> {
        Arena::default().wall_layout().to_vec()
    }

    fn overlaps_any(agent: &Agent, walls: &[Rect]) -> bool {
        walls.iter().any(|w| w.intersects(&agent.rect))
    }

    #[test]
    fn test_free_move_right() {
        let mut agent = Agent::new(Arena::default().agent_start());
        let start_x = agent.position.x;

        let result = move_agent(&mut agent, &default_walls(), Vec2::X, 0.1);
        assert_eq!(result, MoveResult::default());
        assert!((agent.position.x - start_x - 32.0).abs() < 1e-3);
        assert_eq!(agent.rect.center_x(), 512);
        assert_eq!(agent.velocity, Vec2::new(320.0, 0.0));
    }

    #[test]
    fn test_clamps_against_interior_wall() {
        let walls = default_walls();
        let mut agent = Agent::new(Arena::default().agent_start());

        move_agent(&mut agent, &walls, Vec2::X, 0.1);
        let result = move_agent(&mut agent, &walls, Vec2::X, 0.1);

        assert!(result.blocked_x);
        assert_eq!(agent.rect.right(), 532);
        assert_eq!(agent.position.x, 515.0);
        assert!(!overlaps_any(&agent, &walls));
    }

    #[test]
    fn test_clamps_against_left_border() {
        let walls = default_walls();
        let mut agent = Agent::new((50, 296));

        let result = move_agent(&mut agent, &walls, Vec2::NEG_X, 0.1);
        assert!(result.blocked_x);
        assert_eq!(agent.rect.left(), 28);
        assert_eq!(agent.position.x, 45.0);
    }

    #[test]
    fn test_clamps_against_top_border() {
        let walls = default_walls();
        let mut agent = Agent::new((480, 110));

        let result = move_agent(&mut agent, &walls, Vec2::NEG_Y, 0.1);
        assert!(result.blocked_y);
        assert!(!result.blocked_x);
        assert_eq!(agent.rect.top(), 92);
        assert_eq!(agent.position.y, 109.0);
    }

    #[test]
    fn test_diagonal_slides_along_wall() {
        let walls = default_walls();
        // Pressed up against the top border, moving up-right
        let mut agent = Agent::new((480, 109));
        let dir = Vec2::new(1.0, -1.0).normalize();

        let result = move_agent(&mut agent, &walls, dir, 0.1);
        assert!(result.blocked_y);
        assert!(!result.blocked_x);
        assert!(agent.position.x > 480.0);
        assert_eq!(agent.rect.top(), 92);
    }

    #[test]
    fn test_zero_movement_no_correction() {
        let walls = default_walls();
        let mut agent = Agent::new((480, 296));
        let before = agent.clone();

        let result = move_agent(&mut agent, &walls, Vec2::ZERO, 0.5);
        assert_eq!(result, MoveResult::default());
        assert_eq!(agent.rect, before.rect);
        assert_eq!(agent.position, before.position);
    }

    #[test]
    fn test_half_pixel_step_rounds_to_even() {
        let mut agent = Agent::new((480, 302));
        move_axis(&mut agent, &[], Axis::X, 0.5);
        assert_eq!(agent.position.x, 480.5);
        assert_eq!(agent.rect.center_x(), 480);

        move_axis(&mut agent, &[], Axis::X, 1.0);
        assert_eq!(agent.rect.center_x(), 482);
    }

    #[test]
    fn test_multiple_walls_any_order() {
        let a = Rect::new(100, 0, 10, 100);
        let b = Rect::new(95, 50, 10, 100);

        for walls in [vec![a, b], vec![b, a]] {
            let mut agent = Agent::new((80, 60));
            move_axis(&mut agent, &walls, Axis::X, 10.0);
            assert_eq!(agent.rect.right(), 95);
            assert!(!overlaps_any(&agent, &walls));
        }
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        fn direction() -> impl Strategy<Value = Vec2> {
            (-1i32..=1, -1i32..=1)
                .prop_map(|(x, y)| Vec2::new(x as f32, y as f32).normalize_or_zero())
        }

        proptest! {
            #[test]
            fn prop_agent_never_ends_inside_wall(
                steps in prop::collection::vec((direction(), 0.0f32..=0.1), 1..200)
            ) {
                let walls = default_walls();
                let mut agent = Agent::new(Arena::default().agent_start());

                for (dir, dt) in steps {
                    move_agent(&mut agent, &walls, dir, dt);
                    prop_assert!(!overlaps_any(&agent, &walls), "agent {:?} inside a wall", agent.rect);
                    prop_assert_eq!(agent.rect.center_x(), agent.position.x.round_ties_even() as i32);
                    prop_assert_eq!(agent.rect.center_y(), agent.position.y.round_ties_even() as i32);
                }
            }
        }
    }
}
