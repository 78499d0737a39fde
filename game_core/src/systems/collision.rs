use crate::params::Params;
use crate::{Ball, BallRules, Config, Events, GameRng, Paddle, PaddleRules, RuleSet, Side};
use hecs::World;
use rand::Rng;

/// Bounce the ball off the top or bottom wall.
///
/// Only fires while the ball is moving into the wall it overlaps, so a ball
/// that is already heading back out is left alone. Returns true on a bounce.
pub fn resolve_wall(ball: &mut Ball, arena_height: f32) -> bool {
    let into_bottom = ball.pos.y + ball.radius > arena_height && ball.vel.y > 0.0;
    let into_top = ball.pos.y - ball.radius < 0.0 && ball.vel.y < 0.0;
    if !(into_bottom || into_top) {
        return false;
    }

    ball.vel.y = -ball.vel.y;
    ball.spin *= Params::WALL_SPIN_DAMPING;
    true
}

/// True when the ball is travelling toward `paddle`, its leading edge is
/// inside the paddle's horizontal band and its centre is within the
/// paddle's half-height.
pub fn paddle_contact(ball: &Ball, paddle: &Paddle, rules: &PaddleRules, config: &Config) -> bool {
    if ball.vel.x * paddle.side.approach_sign() <= 0.0 {
        return false;
    }

    let face = config.paddle_face_x(paddle.side, rules.shape.width);
    let back = config.paddle_back_x(paddle.side);
    let (lo, hi) = if face < back { (face, back) } else { (back, face) };
    let edge = ball.leading_x();

    let half = rules.half_height();
    edge > lo && edge < hi && ball.pos.y > paddle.y - half && ball.pos.y < paddle.y + half
}

/// Reflect the ball off a paddle.
///
/// In order: reflect and scale horizontal velocity, add the hit-offset
/// rebound term, add the random term, then add the paddle's spin.
pub fn resolve_paddle(
    ball: &mut Ball,
    paddle: &Paddle,
    ball_rules: &BallRules,
    paddle_rules: &PaddleRules,
    rng: &mut GameRng,
) {
    let physics = &ball_rules.physics;

    ball.vel.x = -ball.vel.x * physics.elasticity * paddle_rules.physics.bounciness_modifier;

    let rebound = (ball.pos.y - paddle.y) * Params::REBOUND_ANGLE_FACTOR;
    let random = if physics.rebound_randomness > 0.0 {
        (rng.0.gen::<f32>() - 0.5) * physics.rebound_randomness * ball.vel.y.abs()
    } else {
        0.0
    };
    ball.vel.y += rebound + random;

    ball.spin += paddle_rules.physics.spin_generation;
}

/// Run wall and paddle collision for the ball.
///
/// Wall and paddle checks are independent per-axis tests, so both may fire
/// in the same frame. Paddles are skipped entirely while the ball is phasing.
pub fn check_collisions(
    world: &mut World,
    rules: &RuleSet,
    config: &Config,
    rng: &mut GameRng,
    events: &mut Events,
) {
    let mut paddles: Vec<Paddle> = world
        .query::<&Paddle>()
        .iter()
        .map(|(_e, paddle)| *paddle)
        .collect();
    paddles.sort_by_key(|p| p.side != Side::Player);

    for (_entity, ball) in world.query_mut::<&mut Ball>() {
        if resolve_wall(ball, config.arena_height) {
            events.ball_hit_wall = true;
            tracing::trace!(spin = ball.spin, "wall bounce");
        }

        if rules.ball.is_phasing() {
            continue;
        }

        for paddle in &paddles {
            let paddle_rules = rules.paddle(paddle.side);
            if paddle_contact(ball, paddle, paddle_rules, config) {
                resolve_paddle(ball, paddle, &rules.ball, paddle_rules, rng);
                events.ball_hit_paddle = Some(paddle.side);
                tracing::debug!(side = ?paddle.side, vx = ball.vel.x, vy = ball.vel.y, "paddle hit");
            }
        }
    }
}
