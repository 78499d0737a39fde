use crate::{Ball, Config, Events, Side};
use hecs::World;

/// Check whether the ball has left the arena.
///
/// The ball must be fully past an edge: past the left edge the opponent
/// scores, past the right edge the player scores.
pub fn check_scoring(world: &World, config: &Config, events: &mut Events) -> Option<Side> {
    let scorer = world.query::<&Ball>().iter().find_map(|(_entity, ball)| {
        if ball.pos.x + ball.radius < 0.0 {
            Some(Side::Opponent)
        } else if ball.pos.x - ball.radius > config.arena_width {
            Some(Side::Player)
        } else {
            None
        }
    });

    if let Some(side) = scorer {
        events.scored = Some(side);
    }
    scorer
}
