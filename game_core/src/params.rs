/// Fixed tuning constants for the alchemist Pong simulation
#[derive(Debug, Clone, Copy)]
pub struct Params;

impl Params {
    // Arena (pixels)
    pub const ARENA_WIDTH: f32 = 854.0;
    pub const ARENA_HEIGHT: f32 = 480.0;

    // Paddles sit this far in from their edge of the arena
    pub const PADDLE_MARGIN: f32 = 20.0;

    // Ball
    pub const BALL_RADIUS: f32 = 10.0;

    // Collision response
    pub const WALL_SPIN_DAMPING: f32 = 0.8;
    pub const REBOUND_ANGLE_FACTOR: f32 = 0.15;

    // Opponent under-predicts so it stays beatable
    pub const OPPONENT_LOOKAHEAD_DAMPING: f32 = 0.75;

    // Particles
    pub const PARTICLE_ALPHA_DECAY: f32 = 0.03;
    pub const PARTICLE_MIN_RADIUS: f32 = 1.0;
    pub const PARTICLE_MAX_RADIUS: f32 = 4.0;
    pub const PARTICLE_DRIFT: f32 = 0.5;
    pub const MAX_PARTICLES: usize = 256;
}
