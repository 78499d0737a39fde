//! Match controller
//!
//! Owns one match: the simulation, the active rules, score and level, and
//! the regeneration round trip that happens between points.

use crate::config::{ClientConfig, RegenerateOn};
use crate::fsm::{FsmState, GameAction, GameFsm};
use game_core::{step, Config, RuleBook, RuleSet, Score, Side, SimulationState};
use proto::{ModifyError, ModifyRequest, ModifyResponse};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// Identifies one regeneration request; stale tickets are discarded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTicket {
    pub generation: u64,
    pub level: u32,
}

/// A request the caller must hand to a rule generator
#[derive(Debug, Clone)]
pub struct PendingModification {
    pub ticket: RequestTicket,
    pub request: ModifyRequest,
}

/// One accepted modification
#[derive(Debug, Clone, PartialEq)]
pub struct ModificationRecord {
    pub level: u32,
    pub description: String,
    pub rule_set: RuleSet,
}

/// What happened during one match frame
#[derive(Debug, Default)]
pub struct FrameReport {
    pub scored: Option<Side>,
    pub request: Option<PendingModification>,
    pub resumed: bool,
}

/// What became of a generator response
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseOutcome {
    Applied { version: u64 },
    Rejected,
    /// Ticket did not match the outstanding request
    Discarded,
}

/// Countdown until play resumes after a modification round
#[derive(Debug, Clone, Copy, Default)]
pub struct ResumeTimer {
    remaining: Duration,
}

impl ResumeTimer {
    pub fn start_delay(&mut self, delay: Duration) {
        self.remaining = delay;
    }

    pub fn update(&mut self, dt: Duration) {
        self.remaining = self.remaining.saturating_sub(dt);
    }

    pub fn is_ready(&self) -> bool {
        self.remaining.is_zero()
    }
}

pub struct MatchController {
    config: ClientConfig,
    fsm: GameFsm,
    sim: SimulationState,
    rules: RuleBook,
    score: Score,
    level: u32,
    generation: u64,
    outstanding: Option<RequestTicket>,
    waited: Duration,
    resume_timer: ResumeTimer,
    message: Option<String>,
    history: Vec<ModificationRecord>,
}

impl MatchController {
    pub fn new(config: ClientConfig, arena: Config) -> Self {
        let rules = RuleBook::default();
        let sim = SimulationState::new(arena, &rules.current(), config.seed);
        Self {
            config,
            fsm: GameFsm::new(),
            sim,
            rules,
            score: Score::new(),
            level: 1,
            generation: 0,
            outstanding: None,
            waited: Duration::ZERO,
            resume_timer: ResumeTimer::default(),
            message: None,
            history: Vec::new(),
        }
    }

    /// Begin a fresh match on the initial rules
    pub fn start(&mut self) {
        self.generation += 1;
        self.score = Score::new();
        self.level = 1;
        self.rules = RuleBook::default();
        self.history.clear();
        self.message = None;
        self.outstanding = None;
        self.waited = Duration::ZERO;
        self.resume_timer = ResumeTimer::default();

        let arena = self.sim.config.clone();
        let seed = self.config.seed.wrapping_add(self.generation);
        self.sim = SimulationState::new(arena, &self.rules.current(), seed);
        self.fsm.transition(GameAction::Start);
        info!(generation = self.generation, "match started");
    }

    /// Run one display frame. `dt` is the time since the previous frame and
    /// only drives the between-points timers.
    pub fn frame(&mut self, player_y: f32, dt: Duration) -> FrameReport {
        let mut report = FrameReport::default();

        match self.fsm.state() {
            FsmState::Idle => {}
            FsmState::Playing => {
                let rules = self.rules.current();
                if let Some(side) = step(&mut self.sim, &rules, player_y) {
                    report.scored = Some(side);
                    self.score.increment(side);
                    if self.regenerates_on(side) {
                        report.request = Some(self.begin_modification(&rules));
                    } else {
                        self.sim.reset_ball(&rules);
                    }
                }
            }
            FsmState::AwaitingRules => {
                // Keeps events cleared; the simulation itself is frozen
                step(&mut self.sim, &self.rules.current(), player_y);
                self.waited += dt;
                if self.waited >= self.config.fallback_timeout {
                    self.outstanding = None;
                    self.reject(ModifyError::TimedOut(self.config.fallback_timeout));
                }
            }
            FsmState::Announcing | FsmState::Recovering => {
                self.resume_timer.update(dt);
                if self.resume_timer.is_ready() {
                    self.message = None;
                    self.sim.resume(&self.rules.current());
                    self.fsm.transition(GameAction::ResumeElapsed);
                    report.resumed = true;
                }
            }
        }

        report
    }

    /// Deliver the generator's answer for `ticket`
    pub fn apply_response(
        &mut self,
        ticket: RequestTicket,
        result: Result<String, ModifyError>,
    ) -> ResponseOutcome {
        if self.outstanding != Some(ticket) {
            warn!(
                ?ticket,
                current_generation = self.generation,
                "discarding stale modification response"
            );
            return ResponseOutcome::Discarded;
        }
        self.outstanding = None;

        match result.and_then(|raw| ModifyResponse::from_json(&raw)) {
            Ok(response) => {
                let version = self.rules.replace(response.game_state.clone());
                info!(level = ticket.level, version, description = %response.description, "rules rewritten");
                self.history.insert(
                    0,
                    ModificationRecord {
                        level: ticket.level,
                        description: response.description.clone(),
                        rule_set: response.game_state,
                    },
                );
                self.message = Some(response.description);
                self.fsm.transition(GameAction::RulesAccepted);
                self.resume_timer.start_delay(self.config.announce_duration);
                ResponseOutcome::Applied { version }
            }
            Err(err) => {
                self.reject(err);
                ResponseOutcome::Rejected
            }
        }
    }

    /// End the match; any response still in flight becomes stale
    pub fn teardown(&mut self) {
        self.generation += 1;
        self.outstanding = None;
        self.message = None;
        self.fsm.transition(GameAction::Quit);
        info!(player = self.score.player, opponent = self.score.opponent, level = self.level, "match ended");
    }

    fn regenerates_on(&self, side: Side) -> bool {
        match self.config.regenerate_on {
            RegenerateOn::PlayerScore => side == Side::Player,
            RegenerateOn::AnyScore => true,
        }
    }

    fn begin_modification(&mut self, rules: &RuleSet) -> PendingModification {
        self.level += 1;
        self.sim.park_ball();
        self.sim.pause();
        self.fsm.transition(GameAction::PointScored);
        self.waited = Duration::ZERO;

        let ticket = RequestTicket {
            generation: self.generation,
            level: self.level,
        };
        self.outstanding = Some(ticket);
        info!(level = self.level, "requesting new rules");
        PendingModification {
            ticket,
            request: ModifyRequest::new(rules.clone()),
        }
    }

    fn reject(&mut self, err: ModifyError) {
        warn!(error = %err, "rule modification failed; keeping current rules");
        self.message = Some(format!("{}: {}", err.title(), err));
        self.fsm.transition(GameAction::RulesRejected);
        self.resume_timer.start_delay(self.config.recover_duration);
    }

    pub fn state(&self) -> FsmState {
        self.fsm.state()
    }

    pub fn sim(&self) -> &SimulationState {
        &self.sim
    }

    pub fn sim_mut(&mut self) -> &mut SimulationState {
        &mut self.sim
    }

    /// Snapshot of the active rules
    pub fn rules(&self) -> Arc<RuleSet> {
        self.rules.current()
    }

    pub fn rules_version(&self) -> u64 {
        self.rules.version()
    }

    pub fn score(&self) -> Score {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Announcement or error currently on screen
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Accepted modifications, newest first
    pub fn history(&self) -> &[ModificationRecord] {
        &self.history
    }
}
