//! Headless Alchemist Pong: an autopilot plays the left paddle against the
//! built-in opponent while a local alchemist rewrites the rules after each
//! point.
//!
//! Usage:
//!   cargo run -p client -- --frames 3600
//!   RUST_LOG=client=debug cargo run -p client -- --failure-rate 0.3

use anyhow::Result;
use clap::Parser;
use client::{
    ClientConfig, IntervalScheduler, LocalAlchemist, MatchController, PointerInput, RecordingSurface,
    RegenerateOn, RenderLoop, RuleGenerator,
};
use game_core::{Config, SimulationState};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{interval, Instant, MissedTickBehavior};
use tracing::info;

#[derive(Parser)]
#[command(name = "alchemist-pong")]
#[command(about = "Play a headless match of pong whose rules change after every point")]
struct Args {
    /// Seed for the ball serve and the alchemist
    #[arg(long, default_value_t = 12345)]
    seed: u64,

    /// Frames to run before quitting
    #[arg(long, default_value_t = 3600)]
    frames: u64,

    /// Display refresh rate
    #[arg(long, default_value_t = 60)]
    fps: u32,

    /// Fraction of rule rewrites that fail
    #[arg(long, default_value_t = 0.0)]
    failure_rate: f64,

    /// Simulated alchemist round trip, in milliseconds
    #[arg(long, default_value_t = 250)]
    latency_ms: u64,

    /// Rewrite the rules after the opponent's points too
    #[arg(long)]
    any_score: bool,

    /// Run frames back to back instead of at display rate
    #[arg(long)]
    unpaced: bool,
}

/// Autopilot hand speed, pixels per frame
const AUTOPILOT_SPEED: f32 = 6.0;

/// Move the pointer toward where the ball is, a little slower than a paddle could
fn autopilot(pointer: &PointerInput, sim: &SimulationState) {
    let ball = sim.ball();
    let target = if ball.vel.x < 0.0 {
        ball.pos.y
    } else {
        sim.config.center().y
    };
    let y = pointer.get();
    let delta = (target - y).clamp(-AUTOPILOT_SPEED, AUTOPILOT_SPEED);
    pointer.set(y + delta);
}

/// Frames between status lines: ten seconds' worth
fn status_every(fps: u32) -> u64 {
    u64::from(fps.max(1)) * 10
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::filter::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let config = ClientConfig {
        fps: args.fps,
        seed: args.seed,
        regenerate_on: if args.any_score {
            RegenerateOn::AnyScore
        } else {
            RegenerateOn::PlayerScore
        },
        ..ClientConfig::default()
    };
    let frame_interval = config.frame_interval();

    let generator: Arc<dyn RuleGenerator> = Arc::new(
        LocalAlchemist::new(args.seed)
            .with_failure_rate(args.failure_rate)
            .with_latency(Duration::from_millis(args.latency_ms)),
    );

    let controller = MatchController::new(config, Config::new());
    let mut render_loop = RenderLoop::new(controller, IntervalScheduler::default(), RecordingSurface::default());
    let pointer = render_loop.pointer();
    let replies = render_loop.replies();

    let mut ticker = interval(frame_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    info!(seed = args.seed, frames = args.frames, "starting match");
    render_loop.start();

    let mut last_tick = Instant::now();
    let mut frame = 0;
    while frame < args.frames && render_loop.scheduler().is_pending() {
        if args.unpaced {
            tokio::task::yield_now().await;
        } else {
            ticker.tick().await;
        }

        autopilot(&pointer, render_loop.controller().sim());
        let now = Instant::now();
        let dt = now.duration_since(last_tick);
        last_tick = now;
        let Some(report) = render_loop.tick(dt) else {
            break;
        };
        frame += 1;

        if let Some(side) = report.scored {
            let score = render_loop.controller().score();
            info!(?side, player = score.player, opponent = score.opponent, "point");
        }

        if let Some(pending) = report.request {
            let generator = Arc::clone(&generator);
            let replies = replies.clone();
            tokio::spawn(async move {
                let result = generator.modify(pending.request).await;
                // Receiver is gone once the loop has shut down
                let _ = replies.send((pending.ticket, result));
            });
        }

        if frame % status_every(args.fps) == 0 {
            let controller = render_loop.controller();
            info!(
                frame,
                state = ?controller.state(),
                level = controller.level(),
                particles = controller.sim().particles().len(),
                "status"
            );
        }
    }

    render_loop.shutdown();

    let controller = render_loop.controller();
    let score = controller.score();
    println!();
    println!("=== MATCH OVER ===");
    println!("  Frames:     {}", render_loop.surface().frames_presented);
    println!("  Score:      {} - {}", score.player, score.opponent);
    println!("  Level:      {}", controller.level());
    for record in controller.history().iter().rev() {
        println!("  Level {:>3}:  {}", record.level, record.description);
    }

    Ok(())
}
