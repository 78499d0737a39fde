//! Numeric bounds every Rule Set crossing the wire must respect

use crate::ModifyError;
use game_core::{PaddleRules, RuleSet};

/// Inclusive range for one numeric field
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bound {
    pub min: f32,
    pub max: f32,
}

impl Bound {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    fn check(&self, field: &'static str, value: f32) -> Result<(), ModifyError> {
        if !value.is_finite() {
            return Err(ModifyError::NonFinite { field });
        }
        if value < self.min || value > self.max {
            return Err(ModifyError::OutOfBounds {
                field,
                value,
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }
}

pub const VELOCITY_MAGNITUDE: Bound = Bound::new(3.0, 15.0);
pub const OPACITY: Bound = Bound::new(0.1, 1.0);
pub const ELASTICITY: Bound = Bound::new(0.5, 1.5);
pub const GRAVITY_AXIS: Bound = Bound::new(-0.2, 0.2);
pub const TRAJECTORY_SPIN: Bound = Bound::new(-0.05, 0.05);
pub const REBOUND_RANDOMNESS: Bound = Bound::new(0.0, 1.0);
pub const PADDLE_HEIGHT: Bound = Bound::new(20.0, 200.0);
pub const PADDLE_WIDTH: Bound = Bound::new(5.0, 30.0);
pub const MOVEMENT_SPEED: Bound = Bound::new(3.0, 15.0);
pub const BOUNCINESS_MODIFIER: Bound = Bound::new(0.8, 1.2);
pub const SPIN_GENERATION: Bound = Bound::new(-0.02, 0.02);

/// Check every bounded field of `rules`, reporting the first violation
pub fn validate(rules: &RuleSet) -> Result<(), ModifyError> {
    let ball = &rules.ball;
    VELOCITY_MAGNITUDE.check("ball.kinetics.velocity_magnitude", ball.kinetics.velocity_magnitude)?;
    OPACITY.check("ball.visuals.opacity", ball.visuals.opacity)?;
    ELASTICITY.check("ball.physics.elasticity", ball.physics.elasticity)?;
    GRAVITY_AXIS.check("ball.physics.gravity_vector.x", ball.physics.gravity_vector.x)?;
    GRAVITY_AXIS.check("ball.physics.gravity_vector.y", ball.physics.gravity_vector.y)?;
    TRAJECTORY_SPIN.check("ball.physics.trajectory_spin", ball.physics.trajectory_spin)?;
    REBOUND_RANDOMNESS.check("ball.physics.rebound_randomness", ball.physics.rebound_randomness)?;

    validate_paddle(&PLAYER_FIELDS, &rules.player_paddle)?;
    validate_paddle(&OPPONENT_FIELDS, &rules.opponent_paddle)?;
    Ok(())
}

/// Wire names of one paddle's bounded fields
struct PaddleFields {
    height: &'static str,
    width: &'static str,
    movement_speed: &'static str,
    opacity: &'static str,
    bounciness_modifier: &'static str,
    spin_generation: &'static str,
}

const PLAYER_FIELDS: PaddleFields = PaddleFields {
    height: "playerPaddle.shape.height",
    width: "playerPaddle.shape.width",
    movement_speed: "playerPaddle.kinetics.movement_speed",
    opacity: "playerPaddle.visuals.opacity",
    bounciness_modifier: "playerPaddle.physics.bounciness_modifier",
    spin_generation: "playerPaddle.physics.spin_generation",
};

const OPPONENT_FIELDS: PaddleFields = PaddleFields {
    height: "opponentPaddle.shape.height",
    width: "opponentPaddle.shape.width",
    movement_speed: "opponentPaddle.kinetics.movement_speed",
    opacity: "opponentPaddle.visuals.opacity",
    bounciness_modifier: "opponentPaddle.physics.bounciness_modifier",
    spin_generation: "opponentPaddle.physics.spin_generation",
};

fn validate_paddle(fields: &PaddleFields, paddle: &PaddleRules) -> Result<(), ModifyError> {
    PADDLE_HEIGHT.check(fields.height, paddle.shape.height)?;
    PADDLE_WIDTH.check(fields.width, paddle.shape.width)?;
    MOVEMENT_SPEED.check(fields.movement_speed, paddle.kinetics.movement_speed)?;
    OPACITY.check(fields.opacity, paddle.visuals.opacity)?;
    BOUNCINESS_MODIFIER.check(fields.bounciness_modifier, paddle.physics.bounciness_modifier)?;
    SPIN_GENERATION.check(fields.spin_generation, paddle.physics.spin_generation)?;
    Ok(())
}
