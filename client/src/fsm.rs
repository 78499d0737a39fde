//! Match State Machine
//!
//! Tracks where a match is between points, rule regeneration and resuming.

/// Match states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FsmState {
    Idle,
    Playing,
    /// Simulation parked, waiting on the rule generator
    AwaitingRules,
    /// New rules accepted, description on screen
    Announcing,
    /// Regeneration failed, error on screen
    Recovering,
}

/// Actions that trigger state transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    Start,
    PointScored,
    RulesAccepted,
    RulesRejected,
    ResumeElapsed,
    Quit,
}

/// Result of a state transition
#[derive(Debug, Clone)]
pub struct TransitionResult {
    pub success: bool,
    pub from_state: FsmState,
    pub to_state: FsmState,
    pub action: GameAction,
}

/// Match Finite State Machine
#[derive(Debug)]
pub struct GameFsm {
    state: FsmState,
}

impl GameFsm {
    pub fn new() -> Self {
        Self {
            state: FsmState::Idle,
        }
    }

    pub fn state(&self) -> FsmState {
        self.state
    }

    /// Attempt a transition
    pub fn transition(&mut self, action: GameAction) -> TransitionResult {
        let from_state = self.state;

        if let Some(next_state) = self.get_next_state(action) {
            self.state = next_state;
            tracing::debug!(?from_state, ?next_state, ?action, "match transition");
            TransitionResult {
                success: true,
                from_state,
                to_state: next_state,
                action,
            }
        } else {
            TransitionResult {
                success: false,
                from_state,
                to_state: from_state,
                action,
            }
        }
    }

    /// Get next state for a given action (if valid)
    fn get_next_state(&self, action: GameAction) -> Option<FsmState> {
        match (self.state, action) {
            // Start (or restart) from anywhere
            (_, GameAction::Start) => Some(FsmState::Playing),

            // From Playing
            (FsmState::Playing, GameAction::PointScored) => Some(FsmState::AwaitingRules),

            // From AwaitingRules
            (FsmState::AwaitingRules, GameAction::RulesAccepted) => Some(FsmState::Announcing),
            (FsmState::AwaitingRules, GameAction::RulesRejected) => Some(FsmState::Recovering),

            // Back to play
            (FsmState::Announcing, GameAction::ResumeElapsed) => Some(FsmState::Playing),
            (FsmState::Recovering, GameAction::ResumeElapsed) => Some(FsmState::Playing),

            // Quit from anywhere but Idle
            (FsmState::Idle, GameAction::Quit) => None,
            (_, GameAction::Quit) => Some(FsmState::Idle),

            // Invalid transition
            _ => None,
        }
    }
}

impl Default for GameFsm {
    fn default() -> Self {
        Self::new()
    }
}
