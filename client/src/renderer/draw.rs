use super::{Color, Theme};
use crate::mesh;
use game_core::{RuleSet, Side, SimulationState};
use glam::Vec2;

const PADDLE_GLOW: f32 = 10.0;
const BALL_GLOW: f32 = 15.0;
const PHASING_OPACITY: f32 = 0.3;
const CENTER_DASH: f32 = 10.0;
const CENTER_DASH_PERIOD: f32 = 20.0;
const CENTER_LINE_WIDTH: f32 = 2.0;

/// One filled primitive, in arena coordinates
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear { color: Color },
    Rect { min: Vec2, size: Vec2, color: Color, glow: f32 },
    Polygon { points: Vec<Vec2>, color: Color, glow: f32 },
    Circle { center: Vec2, radius: f32, color: Color },
}

/// Build the draw list for the current (possibly frozen) frame
pub fn build_frame(sim: &SimulationState, rules: &RuleSet, theme: &Theme) -> Vec<DrawCommand> {
    let config = &sim.config;
    let mut frame = vec![DrawCommand::Clear {
        color: theme.background,
    }];

    // Dashed centre line
    let mut y = 0.0;
    while y < config.arena_height {
        frame.push(DrawCommand::Rect {
            min: Vec2::new(config.arena_width / 2.0 - CENTER_LINE_WIDTH / 2.0, y),
            size: Vec2::new(CENTER_LINE_WIDTH, CENTER_DASH),
            color: theme.border,
            glow: 0.0,
        });
        y += CENTER_DASH_PERIOD;
    }

    for side in [Side::Player, Side::Opponent] {
        let paddle = sim.paddle(side);
        let paddle_rules = rules.paddle(side);
        let width = paddle_rules.shape.width;
        let left = config.paddle_face_x(side, width).min(config.paddle_back_x(side));
        frame.push(DrawCommand::Rect {
            min: Vec2::new(left, paddle.y - paddle_rules.half_height()),
            size: Vec2::new(width, paddle_rules.shape.height),
            color: theme
                .resolve(&paddle_rules.visuals.fill_color)
                .with_alpha(paddle_rules.visuals.opacity),
            glow: PADDLE_GLOW,
        });
    }

    let ball = sim.ball();
    let visuals = &rules.ball.visuals;
    let opacity = if rules.ball.is_phasing() {
        visuals.opacity * PHASING_OPACITY
    } else {
        visuals.opacity
    };
    frame.push(DrawCommand::Polygon {
        points: mesh::outline(&rules.ball.shape.form, ball.pos, ball.radius),
        color: theme.resolve(&visuals.fill_color).with_alpha(opacity),
        glow: BALL_GLOW,
    });

    for particle in sim.particles() {
        let [r, g, b] = particle.color;
        frame.push(DrawCommand::Circle {
            center: particle.pos,
            radius: particle.radius,
            color: Color::rgb(r, g, b).with_alpha(particle.alpha),
        });
    }

    frame
}
