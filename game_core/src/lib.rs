pub mod components;
pub mod config;
pub mod params;
pub mod resources;
pub mod rules;
pub mod state;
pub mod systems;

pub use components::*;
pub use config::*;
pub use params::*;
pub use resources::*;
pub use rules::*;
pub use state::*;

use hecs::World;
use systems::*;

/// Advance the simulation by one display frame.
///
/// `rules` is the snapshot taken for this frame; it is read, never
/// mutated. Returns the side that scored, if any. Scoring ends the ball's
/// physics until it is served again.
pub fn step(state: &mut SimulationState, rules: &RuleSet, player_y: f32) -> Option<Side> {
    // Clear events at start of frame
    state.events.clear();

    if state.is_paused() {
        return None;
    }

    state.set_player_y(player_y);

    if state.ball_in_play {
        // 1. Forces and integration
        move_ball(&mut state.world, rules);

        // 2. Opponent tracks the ball
        move_opponent(&mut state.world, rules, &state.config);

        // 3. Walls, then both paddles
        check_collisions(
            &mut state.world,
            rules,
            &state.config,
            &mut state.rng,
            &mut state.events,
        );

        // 4. Ball left the arena
        if let Some(scorer) = check_scoring(&state.world, &state.config, &mut state.events) {
            state.ball_in_play = false;
            tracing::info!(?scorer, "point scored");
        }
    }

    // 5. Particle trail
    if state.ball_in_play && rules.ball.trail_enabled() {
        let origin = state.ball().pos;
        let seq = state.next_particle_seq();
        emit_particle(
            &mut state.world,
            origin,
            seq,
            state.config.max_particles,
            &mut state.rng,
        );
    }
    update_particles(&mut state.world);

    state.events.scored
}

/// Helper to create a paddle entity
pub fn create_paddle(world: &mut World, side: Side, y: f32) -> hecs::Entity {
    world.spawn((Paddle::new(side, y),))
}

/// Helper to create the ball entity
pub fn create_ball(world: &mut World, pos: glam::Vec2, vel: glam::Vec2, radius: f32) -> hecs::Entity {
    world.spawn((Ball::new(pos, vel, radius),))
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    #[test]
    fn test_paused_step_freezes_everything() {
        let mut rules = RuleSet::default();
        rules.ball.effects.particle_trail.enabled = true;
        let mut state = SimulationState::new(Config::new(), &rules, 4);
        step(&mut state, &rules, 240.0);
        let ball = state.ball();
        let particles = state.particles().len();

        state.pause();
        for _ in 0..10 {
            assert_eq!(step(&mut state, &rules, 100.0), None);
        }

        assert_eq!(state.ball().pos, ball.pos);
        assert_eq!(state.particles().len(), particles);
        assert_eq!(state.paddle(Side::Player).y, 240.0);
    }

    #[test]
    fn test_out_of_play_ball_stays_put() {
        let rules = RuleSet::default();
        let mut state = SimulationState::new(Config::new(), &rules, 4);
        {
            let ball = state.ball_mut();
            ball.pos = Vec2::new(-8.0, 240.0);
            ball.vel = Vec2::new(-5.0, 0.0);
        }

        assert_eq!(step(&mut state, &rules, 240.0), Some(Side::Opponent));
        let frozen = state.ball().pos;
        assert_eq!(step(&mut state, &rules, 240.0), None);
        assert_eq!(state.ball().pos, frozen);
    }

    #[test]
    fn test_trail_emits_one_particle_per_frame() {
        let mut rules = RuleSet::default();
        rules.ball.effects.particle_trail.enabled = true;
        let mut state = SimulationState::new(Config::new(), &rules, 4);

        for frame in 1..=10 {
            step(&mut state, &rules, 240.0);
            assert_eq!(state.particles().len(), frame);
        }
    }
}
