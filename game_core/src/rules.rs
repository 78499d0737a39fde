//! Rule Set: the complete physical description of ball and paddles for the
//! current level. Replaced wholesale after every point, never edited in place.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Drawing form of the ball. Unknown forms are kept verbatim and drawn as circles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BallForm {
    Circle,
    Square,
    Star,
    Triangle,
    Other(String),
}

impl From<String> for BallForm {
    fn from(s: String) -> Self {
        match s.as_str() {
            "circle" => BallForm::Circle,
            "square" => BallForm::Square,
            "star" => BallForm::Star,
            "triangle" => BallForm::Triangle,
            _ => BallForm::Other(s),
        }
    }
}

impl From<BallForm> for String {
    fn from(form: BallForm) -> Self {
        form.to_string()
    }
}

impl fmt::Display for BallForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BallForm::Circle => f.write_str("circle"),
            BallForm::Square => f.write_str("square"),
            BallForm::Star => f.write_str("star"),
            BallForm::Triangle => f.write_str("triangle"),
            BallForm::Other(s) => f.write_str(s),
        }
    }
}

/// Special gameplay mode of the ball.
///
/// Only `Phasing` changes physics. `MultiBall` and `Payload` are accepted on
/// the wire and behave like `Normal`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BallState {
    #[default]
    Normal,
    Phasing,
    MultiBall,
    Payload,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BallShape {
    pub form: BallForm,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BallKinetics {
    pub velocity_magnitude: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Visuals {
    pub fill_color: String,
    pub opacity: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GravityVector {
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BallPhysics {
    pub elasticity: f32,
    pub gravity_vector: GravityVector,
    pub trajectory_spin: f32,
    pub rebound_randomness: f32,
    pub state: BallState,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParticleTrail {
    pub enabled: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BallEffects {
    pub particle_trail: ParticleTrail,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BallRules {
    pub shape: BallShape,
    pub kinetics: BallKinetics,
    pub visuals: Visuals,
    pub physics: BallPhysics,
    pub effects: BallEffects,
}

impl BallRules {
    pub fn is_phasing(&self) -> bool {
        self.physics.state == BallState::Phasing
    }

    pub fn trail_enabled(&self) -> bool {
        self.effects.particle_trail.enabled
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PaddleShape {
    pub height: f32,
    pub width: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PaddleKinetics {
    pub movement_speed: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PaddlePhysics {
    pub bounciness_modifier: f32,
    pub spin_generation: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaddleRules {
    pub shape: PaddleShape,
    pub kinetics: PaddleKinetics,
    pub visuals: Visuals,
    pub physics: PaddlePhysics,
}

impl PaddleRules {
    fn standard(movement_speed: f32, fill_color: &str) -> Self {
        Self {
            shape: PaddleShape {
                height: 100.0,
                width: 10.0,
            },
            kinetics: PaddleKinetics { movement_speed },
            visuals: Visuals {
                fill_color: fill_color.to_string(),
                opacity: 1.0,
            },
            physics: PaddlePhysics {
                bounciness_modifier: 1.0,
                spin_generation: 0.0,
            },
        }
    }

    pub fn half_height(&self) -> f32 {
        self.shape.height / 2.0
    }
}

/// Complete set of physical rules in force for a level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleSet {
    pub ball: BallRules,
    pub player_paddle: PaddleRules,
    pub opponent_paddle: PaddleRules,
}

impl Default for RuleSet {
    /// Level one: plain Pong
    fn default() -> Self {
        Self {
            ball: BallRules {
                shape: BallShape {
                    form: BallForm::Circle,
                },
                kinetics: BallKinetics {
                    velocity_magnitude: 5.0,
                },
                visuals: Visuals {
                    fill_color: "#FFFFFF".to_string(),
                    opacity: 1.0,
                },
                physics: BallPhysics {
                    elasticity: 1.0,
                    gravity_vector: GravityVector::default(),
                    trajectory_spin: 0.0,
                    rebound_randomness: 0.0,
                    state: BallState::Normal,
                },
                effects: BallEffects {
                    particle_trail: ParticleTrail { enabled: false },
                },
            },
            player_paddle: PaddleRules::standard(8.0, "#00FFFF"),
            opponent_paddle: PaddleRules::standard(4.0, "#FF00FF"),
        }
    }
}

impl RuleSet {
    pub fn paddle(&self, side: crate::Side) -> &PaddleRules {
        match side {
            crate::Side::Player => &self.player_paddle,
            crate::Side::Opponent => &self.opponent_paddle,
        }
    }
}

/// Versioned holder of the active Rule Set.
///
/// Readers take an `Arc` snapshot; `replace` swaps the whole value at once so
/// no reader can observe a half-updated set.
#[derive(Debug, Clone)]
pub struct RuleBook {
    current: Arc<RuleSet>,
    version: u64,
}

impl RuleBook {
    pub fn new(rules: RuleSet) -> Self {
        Self {
            current: Arc::new(rules),
            version: 0,
        }
    }

    /// Snapshot of the active rules
    pub fn current(&self) -> Arc<RuleSet> {
        Arc::clone(&self.current)
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    /// Install a new Rule Set, returning the new version
    pub fn replace(&mut self, rules: RuleSet) -> u64 {
        self.current = Arc::new(rules);
        self.version += 1;
        tracing::debug!(version = self.version, "rule set replaced");
        self.version
    }
}

impl Default for RuleBook {
    fn default() -> Self {
        Self::new(RuleSet::default())
    }
}
