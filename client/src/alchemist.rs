//! Rule generators
//!
//! A generator takes the active Rule Set and answers with raw response
//! JSON; the match controller parses and bound-checks whatever comes back.

use async_trait::async_trait;
use game_core::{BallForm, BallState, GravityVector, RuleSet};
use proto::schema::{self, Bound};
use proto::{ModifyError, ModifyRequest, ModifyResponse};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::time::Duration;
use tokio::sync::Mutex;

/// Anything that can rewrite a Rule Set
#[async_trait]
pub trait RuleGenerator: Send + Sync {
    /// Raw response body for `request`
    async fn modify(&self, request: ModifyRequest) -> Result<String, ModifyError>;
}

/// One way of rewriting a single field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mutation {
    BallForm,
    BallSpeed,
    BallColor,
    Gravity,
    Spin,
    Elasticity,
    Phasing,
    Trail,
    ReboundRandomness,
    PlayerHeight,
    OpponentHeight,
    OpponentSpeed,
    PlayerBounce,
}

const MUTATIONS: [Mutation; 13] = [
    Mutation::BallForm,
    Mutation::BallSpeed,
    Mutation::BallColor,
    Mutation::Gravity,
    Mutation::Spin,
    Mutation::Elasticity,
    Mutation::Phasing,
    Mutation::Trail,
    Mutation::ReboundRandomness,
    Mutation::PlayerHeight,
    Mutation::OpponentHeight,
    Mutation::OpponentSpeed,
    Mutation::PlayerBounce,
];

const COLORS: [(&str, &str); 6] = [
    ("#FF4500", "blazing orange"),
    ("#7FFF00", "acid green"),
    ("#FFD700", "molten gold"),
    ("#1E90FF", "deep blue"),
    ("#FF1493", "hot pink"),
    ("#FFFFFF", "ghostly white"),
];

fn sample(rng: &mut StdRng, bound: Bound) -> f32 {
    rng.gen_range(bound.min..=bound.max)
}

fn apply(mutation: Mutation, rules: &mut RuleSet, rng: &mut StdRng) -> String {
    match mutation {
        Mutation::BallForm => {
            let forms: Vec<BallForm> = [BallForm::Circle, BallForm::Square, BallForm::Star, BallForm::Triangle]
                .into_iter()
                .filter(|form| *form != rules.ball.shape.form)
                .collect();
            let form = forms.choose(rng).cloned().unwrap_or(BallForm::Star);
            let line = format!("the ball has become a {form}");
            rules.ball.shape.form = form;
            line
        }
        Mutation::BallSpeed => {
            let speed = sample(rng, schema::VELOCITY_MAGNITUDE);
            rules.ball.kinetics.velocity_magnitude = speed;
            if speed > 8.0 {
                "the ball is restless and fast".to_string()
            } else {
                "the ball has grown sluggish".to_string()
            }
        }
        Mutation::BallColor => {
            let (hex, name) = COLORS.choose(rng).copied().unwrap_or(COLORS[0]);
            rules.ball.visuals.fill_color = hex.to_string();
            rules.ball.visuals.opacity = sample(rng, schema::OPACITY).max(0.6);
            format!("the ball glows {name}")
        }
        Mutation::Gravity => {
            let gravity = GravityVector {
                x: sample(rng, schema::GRAVITY_AXIS),
                y: sample(rng, schema::GRAVITY_AXIS),
            };
            let line = if gravity.y > 0.0 {
                "gravity drags the ball downward"
            } else {
                "the ball drifts toward the ceiling"
            };
            rules.ball.physics.gravity_vector = gravity;
            line.to_string()
        }
        Mutation::Spin => {
            rules.ball.physics.trajectory_spin = sample(rng, schema::TRAJECTORY_SPIN);
            "the ball curves through the air".to_string()
        }
        Mutation::Elasticity => {
            rules.ball.physics.elasticity = sample(rng, schema::ELASTICITY);
            "every rebound changes the ball's pace".to_string()
        }
        Mutation::Phasing => {
            if rules.ball.is_phasing() {
                rules.ball.physics.state = BallState::Normal;
                "the ball is solid once more".to_string()
            } else {
                rules.ball.physics.state = BallState::Phasing;
                "the ball slips through paddles like a ghost".to_string()
            }
        }
        Mutation::Trail => {
            let trail = &mut rules.ball.effects.particle_trail;
            trail.enabled = !trail.enabled;
            if trail.enabled {
                "sparks trail behind the ball".to_string()
            } else {
                "the sparks have burned out".to_string()
            }
        }
        Mutation::ReboundRandomness => {
            rules.ball.physics.rebound_randomness = sample(rng, schema::REBOUND_RANDOMNESS);
            "the ball rebounds unpredictably".to_string()
        }
        Mutation::PlayerHeight => {
            let height = sample(rng, schema::PADDLE_HEIGHT);
            rules.player_paddle.shape.height = height;
            if height > 100.0 {
                "your paddle has grown".to_string()
            } else {
                "your paddle has shrunk".to_string()
            }
        }
        Mutation::OpponentHeight => {
            rules.opponent_paddle.shape.height = sample(rng, schema::PADDLE_HEIGHT);
            "the opponent's paddle has been reshaped".to_string()
        }
        Mutation::OpponentSpeed => {
            rules.opponent_paddle.kinetics.movement_speed = sample(rng, schema::MOVEMENT_SPEED);
            "the opponent moves with new urgency".to_string()
        }
        Mutation::PlayerBounce => {
            rules.player_paddle.physics.bounciness_modifier = sample(rng, schema::BOUNCINESS_MODIFIER);
            rules.player_paddle.physics.spin_generation = sample(rng, schema::SPIN_GENERATION);
            "your paddle puts a twist on every return".to_string()
        }
    }
}

fn capitalize(line: &str) -> String {
    let mut chars = line.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// In-process generator that rewrites one to three fields within bounds
pub struct LocalAlchemist {
    rng: Mutex<StdRng>,
    failure_rate: f64,
    latency: Duration,
}

impl LocalAlchemist {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
            failure_rate: 0.0,
            latency: Duration::ZERO,
        }
    }

    /// Fraction of requests answered with an error or a broken body.
    /// A non-finite rate means no failures.
    pub fn with_failure_rate(mut self, rate: f64) -> Self {
        self.failure_rate = if rate.is_finite() { rate.clamp(0.0, 1.0) } else { 0.0 };
        self
    }

    /// Simulated round-trip time
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    async fn brew(&self, mut rules: RuleSet) -> Result<String, ModifyError> {
        let mut rng = self.rng.lock().await;

        if rng.gen_bool(self.failure_rate) {
            return if rng.gen_bool(0.5) {
                Err(ModifyError::Transport("the alchemist's cauldron cracked".to_string()))
            } else {
                // Missing gameState entirely
                Ok(r#"{"description":"The potion fizzled"}"#.to_string())
            };
        }

        let count = rng.gen_range(1..=3);
        let chosen: Vec<Mutation> = MUTATIONS.choose_multiple(&mut *rng, count).copied().collect();
        let lines: Vec<String> = chosen
            .into_iter()
            .map(|mutation| apply(mutation, &mut rules, &mut rng))
            .collect();
        let description = format!("{}!", capitalize(&lines.join(" and ")));
        tracing::debug!(%description, "alchemist brewed new rules");

        ModifyResponse {
            description,
            game_state: rules,
        }
        .to_json()
    }
}

#[async_trait]
impl RuleGenerator for LocalAlchemist {
    async fn modify(&self, request: ModifyRequest) -> Result<String, ModifyError> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        self.brew(request.game_state).await
    }
}
