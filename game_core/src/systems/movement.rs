use crate::{Ball, RuleSet};
use hecs::World;

/// Apply continuous forces to the ball and integrate its position.
///
/// Gravity is added first, then the Magnus term (horizontal velocity times
/// the spin accumulator) bends the vertical velocity.
pub fn move_ball(world: &mut World, rules: &RuleSet) {
    let gravity = rules.ball.physics.gravity_vector;
    for (_entity, ball) in world.query_mut::<&mut Ball>() {
        ball.vel.x += gravity.x;
        ball.vel.y += gravity.y;
        ball.vel.y += ball.vel.x * ball.spin;
        ball.pos += ball.vel;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{create_ball, Ball, RuleSet};
    use glam::Vec2;

    fn ball_of(world: &World) -> Ball {
        *world.query::<&Ball>().iter().next().unwrap().1
    }

    #[test]
    fn test_ball_moves_by_velocity() {
        let mut world = World::new();
        create_ball(&mut world, Vec2::new(100.0, 100.0), Vec2::new(5.0, -2.0), 10.0);

        move_ball(&mut world, &RuleSet::default());

        let ball = ball_of(&world);
        assert_eq!(ball.pos, Vec2::new(105.0, 98.0));
        assert_eq!(ball.vel, Vec2::new(5.0, -2.0));
    }

    #[test]
    fn test_gravity_accumulates_each_frame() {
        let mut world = World::new();
        create_ball(&mut world, Vec2::new(100.0, 100.0), Vec2::new(4.0, 0.0), 10.0);
        let mut rules = RuleSet::default();
        rules.ball.physics.gravity_vector.y = 0.1;

        move_ball(&mut world, &rules);
        move_ball(&mut world, &rules);

        let ball = ball_of(&world);
        assert!((ball.vel.y - 0.2).abs() < 1e-6);
        assert!((ball.pos.y - 100.3).abs() < 1e-4);
    }

    #[test]
    fn test_spin_curves_vertical_velocity() {
        let mut world = World::new();
        let entity = create_ball(&mut world, Vec2::new(100.0, 100.0), Vec2::new(5.0, 0.0), 10.0);
        world.query_one_mut::<&mut Ball>(entity).unwrap().spin = 0.02;

        move_ball(&mut world, &RuleSet::default());

        let ball = ball_of(&world);
        assert!((ball.vel.y - 0.1).abs() < 1e-6, "vy = vx * spin");
        assert_eq!(ball.spin, 0.02, "spin only decays on walls");
    }
}
