use crate::params::Params;
use crate::Side;
use glam::Vec2;

/// Playfield configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub arena_width: f32,
    pub arena_height: f32,
    pub paddle_margin: f32,
    pub ball_radius: f32,
    pub max_particles: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            arena_width: Params::ARENA_WIDTH,
            arena_height: Params::ARENA_HEIGHT,
            paddle_margin: Params::PADDLE_MARGIN,
            ball_radius: Params::BALL_RADIUS,
            max_particles: Params::MAX_PARTICLES,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Centre of the arena, where the ball is served from
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.arena_width / 2.0, self.arena_height / 2.0)
    }

    /// X of the paddle edge that sits against the wall behind it
    pub fn paddle_back_x(&self, side: Side) -> f32 {
        match side {
            Side::Player => self.paddle_margin,
            Side::Opponent => self.arena_width - self.paddle_margin,
        }
    }

    /// X of the paddle face the ball strikes
    pub fn paddle_face_x(&self, side: Side, paddle_width: f32) -> f32 {
        match side {
            Side::Player => self.paddle_margin + paddle_width,
            Side::Opponent => self.arena_width - self.paddle_margin - paddle_width,
        }
    }

    /// Clamp a pointer position to the playfield
    pub fn clamp_pointer_y(&self, y: f32) -> f32 {
        y.clamp(0.0, self.arena_height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_paddle_faces() {
        let config = Config::new();
        assert_eq!(config.paddle_face_x(Side::Player, 10.0), 30.0);
        assert_eq!(config.paddle_face_x(Side::Opponent, 10.0), 824.0);
        assert_eq!(config.paddle_back_x(Side::Player), 20.0);
        assert_eq!(config.paddle_back_x(Side::Opponent), 834.0);
    }

    #[test]
    fn test_config_clamp_pointer_y() {
        let config = Config::new();
        assert_eq!(config.clamp_pointer_y(-50.0), 0.0);
        assert_eq!(config.clamp_pointer_y(1000.0), config.arena_height);
        assert_eq!(config.clamp_pointer_y(200.0), 200.0);
    }

    #[test]
    fn test_config_center() {
        let config = Config::new();
        assert_eq!(config.center(), Vec2::new(427.0, 240.0));
    }
}
