use crate::{create_ball, create_paddle, Ball, Config, Events, GameRng, Paddle, Particle, RuleSet, Side};
use glam::Vec2;
use hecs::{Entity, World};

/// Whether the simulation advances on `step`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimPhase {
    Running,
    /// Frozen while new rules are being generated; the frame is still drawn
    PausedForModification,
}

/// Everything one match's simulation mutates between frames.
///
/// Owned by the render loop and passed by reference into [`crate::step`].
pub struct SimulationState {
    pub world: World,
    pub config: Config,
    pub rng: GameRng,
    pub events: Events,
    phase: SimPhase,
    ball: Entity,
    player: Entity,
    opponent: Entity,
    next_particle_seq: u64,
    pub(crate) ball_in_play: bool,
}

impl SimulationState {
    /// Fresh match: paddles centred, ball served under `rules`
    pub fn new(config: Config, rules: &RuleSet, seed: u64) -> Self {
        let mut world = World::new();
        let center = config.center();
        let player = create_paddle(&mut world, Side::Player, center.y);
        let opponent = create_paddle(&mut world, Side::Opponent, center.y);
        let ball = create_ball(&mut world, center, Vec2::ZERO, config.ball_radius);

        let mut state = Self {
            world,
            config,
            rng: GameRng::new(seed),
            events: Events::new(),
            phase: SimPhase::Running,
            ball,
            player,
            opponent,
            next_particle_seq: 0,
            ball_in_play: false,
        };
        state.reset_ball(rules);
        state
    }

    pub fn phase(&self) -> SimPhase {
        self.phase
    }

    pub fn is_paused(&self) -> bool {
        self.phase == SimPhase::PausedForModification
    }

    pub fn ball_in_play(&self) -> bool {
        self.ball_in_play
    }

    /// Serve a new ball from the centre under `rules`
    pub fn reset_ball(&mut self, rules: &RuleSet) {
        let center = self.config.center();
        let speed = rules.ball.kinetics.velocity_magnitude;
        let spin = rules.ball.physics.trajectory_spin;
        if let Ok(ball) = self.world.query_one_mut::<&mut Ball>(self.ball) {
            ball.reset(center, speed, spin, &mut self.rng);
            tracing::debug!(vx = ball.vel.x, vy = ball.vel.y, spin, "ball served");
        }
        self.ball_in_play = true;
    }

    /// Freeze kinematics and particles until [`Self::resume`]
    pub fn pause(&mut self) {
        self.phase = SimPhase::PausedForModification;
    }

    /// Serve under the (possibly new) rules and start running again
    pub fn resume(&mut self, rules: &RuleSet) {
        self.reset_ball(rules);
        self.phase = SimPhase::Running;
    }

    pub fn ball(&self) -> Ball {
        self.world
            .get::<&Ball>(self.ball)
            .map(|ball| *ball)
            .unwrap_or_else(|_| Ball::new(self.config.center(), Vec2::ZERO, self.config.ball_radius))
    }

    pub fn paddle(&self, side: Side) -> Paddle {
        let entity = match side {
            Side::Player => self.player,
            Side::Opponent => self.opponent,
        };
        self.world
            .get::<&Paddle>(entity)
            .map(|paddle| *paddle)
            .unwrap_or_else(|_| Paddle::new(side, self.config.center().y))
    }

    /// Player paddle follows the pointer; nothing else writes it
    pub fn set_player_y(&mut self, y: f32) {
        if let Ok(paddle) = self.world.query_one_mut::<&mut Paddle>(self.player) {
            paddle.y = y;
        }
    }

    pub fn particles(&self) -> Vec<Particle> {
        self.world
            .query::<&Particle>()
            .iter()
            .map(|(_e, p)| *p)
            .collect()
    }

    pub(crate) fn next_particle_seq(&mut self) -> u64 {
        let seq = self.next_particle_seq;
        self.next_particle_seq += 1;
        seq
    }

    /// Put the ball at `pos` moving at `vel`, in play
    pub fn place_ball(&mut self, pos: Vec2, vel: Vec2, spin: f32) {
        if let Ok(ball) = self.world.query_one_mut::<&mut Ball>(self.ball) {
            ball.pos = pos;
            ball.vel = vel;
            ball.spin = spin;
        }
        self.ball_in_play = true;
    }

    /// Hold the ball still at the centre, out of play, until the next serve
    pub fn park_ball(&mut self) {
        let center = self.config.center();
        if let Ok(ball) = self.world.query_one_mut::<&mut Ball>(self.ball) {
            ball.pos = center;
            ball.vel = Vec2::ZERO;
            ball.spin = 0.0;
        }
        self.ball_in_play = false;
    }

    #[cfg(test)]
    pub(crate) fn ball_mut(&mut self) -> &mut Ball {
        self.world
            .query_one_mut::<&mut Ball>(self.ball)
            .expect("ball entity is spawned in new()")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_running_with_served_ball() {
        let rules = RuleSet::default();
        let state = SimulationState::new(Config::new(), &rules, 1);

        assert_eq!(state.phase(), SimPhase::Running);
        assert!(state.ball_in_play());
        let ball = state.ball();
        assert_eq!(ball.pos, state.config.center());
        assert!((ball.vel.length() - 5.0).abs() < 1e-4);
        assert_eq!(state.paddle(Side::Player).y, 240.0);
        assert_eq!(state.paddle(Side::Opponent).y, 240.0);
    }

    #[test]
    fn test_resume_serves_with_new_rules() {
        let mut rules = RuleSet::default();
        let mut state = SimulationState::new(Config::new(), &rules, 1);
        state.pause();
        assert!(state.is_paused());

        rules.ball.kinetics.velocity_magnitude = 11.0;
        rules.ball.physics.trajectory_spin = -0.03;
        state.resume(&rules);

        let ball = state.ball();
        assert_eq!(state.phase(), SimPhase::Running);
        assert!((ball.vel.length() - 11.0).abs() < 1e-4);
        assert_eq!(ball.spin, -0.03);
    }

    #[test]
    fn test_set_player_y_moves_only_player() {
        let mut state = SimulationState::new(Config::new(), &RuleSet::default(), 1);
        state.set_player_y(77.0);
        assert_eq!(state.paddle(Side::Player).y, 77.0);
        assert_eq!(state.paddle(Side::Opponent).y, 240.0);
    }

    #[test]
    fn test_park_ball_holds_centre_until_resume() {
        let rules = RuleSet::default();
        let mut state = SimulationState::new(Config::new(), &rules, 1);
        state.place_ball(Vec2::new(870.0, 40.0), Vec2::new(5.0, 2.0), 0.02);

        state.park_ball();
        state.pause();
        let ball = state.ball();
        assert_eq!(ball.pos, state.config.center());
        assert_eq!(ball.vel, Vec2::ZERO);
        assert!(!state.ball_in_play());

        state.resume(&rules);
        assert!(state.ball_in_play());
        assert!((state.ball().vel.length() - 5.0).abs() < 1e-4);
    }
}
