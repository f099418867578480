//! Negotiation Process
//!
//! A bounded-round state machine for one pair of agents. Each round both
//! agents decide whether to accept; if both do, the pair reconciles. Otherwise
//! conflict escalates and willingness decays for both before the next round.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::acceptance::{logistic_acceptance, sample_noise};

/// Conflict added to each agent after a failed round
pub const ESCALATION_RATE: f64 = 0.05;
/// Willingness removed from each agent after a failed round
pub const DECAY_RATE: f64 = 0.05;
/// Maximum rounds evaluated before a negotiation times out
pub const ROUND_LIMIT: u32 = 100;
/// Starting conflict for agent A
pub const INITIAL_CONFLICT_A: f64 = 0.4;
/// Starting conflict for agent B
pub const INITIAL_CONFLICT_B: f64 = 0.5;

/// Constants governing every negotiation in a sweep.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NegotiationRules {
    /// Conflict increase per failed round (alpha)
    pub escalation_rate: f64,
    /// Willingness decrease per failed round (beta)
    pub decay_rate: f64,
    /// Rounds evaluated before timing out
    pub round_limit: u32,
    /// Conflict agent A starts with
    pub initial_conflict_a: f64,
    /// Conflict agent B starts with
    pub initial_conflict_b: f64,
}

impl Default for NegotiationRules {
    fn default() -> Self {
        Self {
            escalation_rate: ESCALATION_RATE,
            decay_rate: DECAY_RATE,
            round_limit: ROUND_LIMIT,
            initial_conflict_a: INITIAL_CONFLICT_A,
            initial_conflict_b: INITIAL_CONFLICT_B,
        }
    }
}

impl NegotiationRules {
    /// Both agents of a symmetric trial, initialized from one grid cell.
    pub fn agents_for(&self, cell: CellParams) -> (AgentState, AgentState) {
        (
            AgentState::new(cell.willingness, self.initial_conflict_a, cell.reactivity),
            AgentState::new(cell.willingness, self.initial_conflict_b, cell.reactivity),
        )
    }
}

/// The (willingness, reactivity) pair a grid cell assigns to both agents.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CellParams {
    pub willingness: f64,
    pub reactivity: f64,
}

impl CellParams {
    pub fn new(willingness: f64, reactivity: f64) -> Self {
        Self {
            willingness,
            reactivity,
        }
    }
}

/// Internal state of one negotiating agent.
///
/// Reactivity is fixed at construction; willingness and conflict only move
/// through [`AgentState::escalate`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AgentState {
    willingness: f64,
    conflict: f64,
    reactivity: f64,
}

impl AgentState {
    pub fn new(willingness: f64, conflict: f64, reactivity: f64) -> Self {
        Self {
            willingness,
            conflict,
            reactivity,
        }
    }

    pub fn willingness(&self) -> f64 {
        self.willingness
    }

    pub fn conflict(&self) -> f64 {
        self.conflict
    }

    pub fn reactivity(&self) -> f64 {
        self.reactivity
    }

    /// Acceptance probability for the given noise draw.
    pub fn acceptance(&self, epsilon: f64) -> f64 {
        logistic_acceptance(self.willingness, self.conflict, self.reactivity, epsilon)
    }

    /// Applies one failed round: conflict rises, willingness falls.
    pub fn escalate(&mut self, escalation_rate: f64, decay_rate: f64) {
        self.conflict += escalation_rate;
        self.willingness -= decay_rate;
    }
}

/// Random inputs consumed by one round.
///
/// Sampling order is fixed: agent A's noise, agent B's noise, then both
/// uniform acceptance rolls. Both rolls are always drawn, even when A's roll
/// alone already rules out success, so a seeded stream replays exactly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoundDraws {
    pub epsilon_a: f64,
    pub epsilon_b: f64,
    pub u_a: f64,
    pub u_b: f64,
}

impl RoundDraws {
    pub fn sample<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let epsilon_a = sample_noise(rng);
        let epsilon_b = sample_noise(rng);
        let u_a: f64 = rng.gen();
        let u_b: f64 = rng.gen();
        Self {
            epsilon_a,
            epsilon_b,
            u_a,
            u_b,
        }
    }
}

/// Lifecycle of a negotiation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NegotiationState {
    /// Waiting to evaluate the round with this zero-based index
    Running { round: u32 },
    /// Both agents accepted during this zero-based round
    Succeeded { round: u32 },
    /// Ended without agreement
    Failed { timed_out: bool },
}

impl NegotiationState {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, NegotiationState::Running { .. })
    }

    pub fn is_success(&self) -> bool {
        matches!(self, NegotiationState::Succeeded { .. })
    }
}

/// Result of one finished trial.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialOutcome {
    /// Whether both agents accepted within the round limit
    pub reconciled: bool,
    /// Rounds evaluated, including the successful one
    pub rounds: u32,
}

/// One negotiation between agents A and B.
#[derive(Debug, Clone)]
pub struct Negotiation {
    agent_a: AgentState,
    agent_b: AgentState,
    rules: NegotiationRules,
    state: NegotiationState,
    rounds_evaluated: u32,
}

impl Negotiation {
    /// Starts a negotiation between two independently configured agents.
    pub fn new(agent_a: AgentState, agent_b: AgentState, rules: NegotiationRules) -> Self {
        let state = if rules.round_limit == 0 {
            NegotiationState::Failed { timed_out: true }
        } else {
            NegotiationState::Running { round: 0 }
        };
        Self {
            agent_a,
            agent_b,
            rules,
            state,
            rounds_evaluated: 0,
        }
    }

    /// Starts a negotiation where both agents come from the same grid cell.
    pub fn symmetric(cell: CellParams, rules: NegotiationRules) -> Self {
        let (agent_a, agent_b) = rules.agents_for(cell);
        Self::new(agent_a, agent_b, rules)
    }

    pub fn state(&self) -> NegotiationState {
        self.state
    }

    pub fn agent_a(&self) -> &AgentState {
        &self.agent_a
    }

    pub fn agent_b(&self) -> &AgentState {
        &self.agent_b
    }

    pub fn rounds_evaluated(&self) -> u32 {
        self.rounds_evaluated
    }

    /// Acceptance probabilities both agents would have this round.
    pub fn acceptance_pair(&self, epsilon_a: f64, epsilon_b: f64) -> (f64, f64) {
        (
            self.agent_a.acceptance(epsilon_a),
            self.agent_b.acceptance(epsilon_b),
        )
    }

    /// Evaluates one round with caller-supplied draws.
    ///
    /// A terminal negotiation ignores the draws and keeps its state.
    pub fn step_with(&mut self, draws: RoundDraws) -> NegotiationState {
        let NegotiationState::Running { round } = self.state else {
            return self.state;
        };

        self.rounds_evaluated += 1;
        let (p_a, p_b) = self.acceptance_pair(draws.epsilon_a, draws.epsilon_b);
        let accepted_a = draws.u_a < p_a;
        let accepted_b = draws.u_b < p_b;

        self.state = if accepted_a && accepted_b {
            NegotiationState::Succeeded { round }
        } else {
            self.agent_a
                .escalate(self.rules.escalation_rate, self.rules.decay_rate);
            self.agent_b
                .escalate(self.rules.escalation_rate, self.rules.decay_rate);

            let next = round + 1;
            if next >= self.rules.round_limit {
                NegotiationState::Failed { timed_out: true }
            } else {
                NegotiationState::Running { round: next }
            }
        };
        self.state
    }

    /// Evaluates one round, sampling its draws from `rng`.
    ///
    /// Terminal negotiations consume nothing from the stream.
    pub fn step<R: Rng + ?Sized>(&mut self, rng: &mut R) -> NegotiationState {
        if self.state.is_terminal() {
            return self.state;
        }
        let draws = RoundDraws::sample(rng);
        self.step_with(draws)
    }

    /// Runs to a terminal state.
    pub fn run<R: Rng + ?Sized>(mut self, rng: &mut R) -> TrialOutcome {
        while !self.state.is_terminal() {
            self.step(rng);
        }
        let outcome = TrialOutcome {
            reconciled: self.state.is_success(),
            rounds: self.rounds_evaluated,
        };
        tracing::trace!(
            reconciled = outcome.reconciled,
            rounds = outcome.rounds,
            "negotiation finished"
        );
        outcome
    }
}
