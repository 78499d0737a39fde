use glam::Vec2;
use rand::Rng;

/// Which end of the arena a paddle (or a point) belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    /// Left, driven by the pointer
    Player,
    /// Right, driven by the opponent controller
    Opponent,
}

impl Side {
    /// Sign of horizontal velocity that carries the ball toward this side
    pub fn approach_sign(self) -> f32 {
        match self {
            Side::Player => -1.0,
            Side::Opponent => 1.0,
        }
    }
}

/// Paddle component
#[derive(Debug, Clone, Copy)]
pub struct Paddle {
    pub side: Side,
    pub y: f32, // centre
}

impl Paddle {
    pub fn new(side: Side, y: f32) -> Self {
        Self { side, y }
    }
}

/// Ball component - kinematics plus the spin accumulator
#[derive(Debug, Clone, Copy)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub spin: f32,
}

impl Ball {
    pub fn new(pos: Vec2, vel: Vec2, radius: f32) -> Self {
        Self {
            pos,
            vel,
            radius,
            spin: 0.0,
        }
    }

    /// Serve from `center` at `speed`, with a random angle within 45° of
    /// horizontal toward either side, and re-arm the spin accumulator.
    pub fn reset(&mut self, center: Vec2, speed: f32, spin: f32, rng: &mut crate::GameRng) {
        use std::f32::consts::{FRAC_PI_4, PI};

        self.pos = center;
        let mut angle: f32 = rng.0.gen_range(-FRAC_PI_4..FRAC_PI_4);
        if rng.0.gen_bool(0.5) {
            angle += PI;
        }
        self.vel = Vec2::new(angle.cos(), angle.sin()) * speed;
        self.spin = spin;
    }

    /// Leading edge in the direction of travel along x
    pub fn leading_x(&self) -> f32 {
        if self.vel.x < 0.0 {
            self.pos.x - self.radius
        } else {
            self.pos.x + self.radius
        }
    }
}

/// Decorative trail particle
#[derive(Debug, Clone, Copy)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub alpha: f32,
    pub color: [u8; 3],
    /// Emission order, used to evict the oldest when the pool is full
    pub seq: u64,
}
