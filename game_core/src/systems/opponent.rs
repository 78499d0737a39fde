use crate::params::Params;
use crate::{Ball, Config, Paddle, RuleSet, Side};
use hecs::World;

/// Where the opponent wants its paddle centre to be.
///
/// While the ball recedes it simply follows the ball. While the ball
/// approaches it extrapolates to the paddle face, damped so the
/// prediction falls short.
pub fn opponent_target(ball: &Ball, config: &Config, paddle_width: f32) -> f32 {
    let target = if ball.vel.x > 0.0 {
        let face_x = config.paddle_face_x(Side::Opponent, paddle_width);
        let frames_to_paddle = (face_x - ball.pos.x).max(0.0) / ball.vel.x;
        ball.pos.y + ball.vel.y * frames_to_paddle * Params::OPPONENT_LOOKAHEAD_DAMPING
    } else {
        ball.pos.y
    };
    target.clamp(0.0, config.arena_height)
}

/// Move `current` by exactly `speed` toward `target`, or not at all when the
/// target is already within one step.
pub fn step_toward(current: f32, target: f32, speed: f32) -> f32 {
    if current < target - speed {
        current + speed
    } else if current > target + speed {
        current - speed
    } else {
        current
    }
}

/// Drive the opponent paddle toward its predicted target
pub fn move_opponent(world: &mut World, rules: &RuleSet, config: &Config) {
    let ball = match world.query::<&Ball>().iter().next() {
        Some((_e, ball)) => *ball,
        None => return,
    };

    let paddle_rules = &rules.opponent_paddle;
    let target = opponent_target(&ball, config, paddle_rules.shape.width);

    for (_entity, paddle) in world.query_mut::<&mut Paddle>() {
        if paddle.side == Side::Opponent {
            paddle.y = step_toward(paddle.y, target, paddle_rules.kinetics.movement_speed);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{create_ball, create_paddle};
    use glam::Vec2;

    #[test]
    fn test_target_follows_receding_ball() {
        let config = Config::new();
        let ball = Ball::new(Vec2::new(400.0, 123.0), Vec2::new(-5.0, 3.0), 10.0);
        assert_eq!(opponent_target(&ball, &config, 10.0), 123.0);
    }

    #[test]
    fn test_target_extrapolates_approaching_ball() {
        let config = Config::new();
        // Face at 824: 100 px away at 5 px/frame = 20 frames, 2 px/frame down
        let ball = Ball::new(Vec2::new(724.0, 200.0), Vec2::new(5.0, 2.0), 10.0);
        let target = opponent_target(&ball, &config, 10.0);
        assert!((target - (200.0 + 2.0 * 20.0 * 0.75)).abs() < 1e-3);
    }

    #[test]
    fn test_target_stays_in_arena() {
        let config = Config::new();
        let ball = Ball::new(Vec2::new(100.0, 400.0), Vec2::new(2.0, 10.0), 10.0);
        assert_eq!(opponent_target(&ball, &config, 10.0), config.arena_height);
    }

    #[test]
    fn test_step_toward_never_overshoots() {
        assert_eq!(step_toward(100.0, 200.0, 4.0), 104.0);
        assert_eq!(step_toward(100.0, 0.0, 4.0), 96.0);
        assert_eq!(step_toward(100.0, 103.0, 4.0), 100.0);
        assert_eq!(step_toward(100.0, 97.0, 4.0), 100.0);
    }

    #[test]
    fn test_opponent_displacement_bounded_by_speed() {
        let config = Config::new();
        let rules = RuleSet::default();
        let speed = rules.opponent_paddle.kinetics.movement_speed;
        let mut world = World::new();
        let paddle = create_paddle(&mut world, Side::Opponent, 10.0);
        create_ball(&mut world, Vec2::new(600.0, 470.0), Vec2::new(6.0, 3.0), 10.0);

        let mut last = 10.0;
        for _ in 0..50 {
            move_opponent(&mut world, &rules, &config);
            let y = world.get::<&Paddle>(paddle).unwrap().y;
            assert!((y - last).abs() <= speed + 1e-4);
            last = y;
        }
        assert!(last > 10.0, "paddle should have tracked down toward the ball");
    }

    #[test]
    fn test_player_paddle_is_not_moved() {
        let config = Config::new();
        let mut world = World::new();
        let player = create_paddle(&mut world, Side::Player, 50.0);
        create_ball(&mut world, Vec2::new(300.0, 400.0), Vec2::new(-3.0, 0.0), 10.0);

        move_opponent(&mut world, &RuleSet::default(), &config);

        assert_eq!(world.get::<&Paddle>(player).unwrap().y, 50.0);
    }
}
