use std::{fmt, time::Duration};

use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::{
    algo::{q_learning_update, sarsa_update, td_update, value_iteration_step, Params},
    exp::Exp,
    exploration::epsilon_greedy_action,
    grid::{Action, Grid, Pos},
    transition::{next_cell, Dynamics},
};

/// An online learning rule
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Learner {
    TemporalDifference,
    QLearning,
    Sarsa,
}

/// Which algorithm a [`Simulation`] runs on each step
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Mode {
    ValueIteration,
    Online(Learner),
}

impl Mode {
    pub const ALL: [Mode; 4] = [
        Mode::ValueIteration,
        Mode::Online(Learner::TemporalDifference),
        Mode::Online(Learner::QLearning),
        Mode::Online(Learner::Sarsa),
    ];

    pub fn name(self) -> &'static str {
        match self {
            Mode::ValueIteration => "Value Iteration",
            Mode::Online(Learner::TemporalDifference) => "TD(0)",
            Mode::Online(Learner::QLearning) => "Q-Learning",
            Mode::Online(Learner::Sarsa) => "SARSA",
        }
    }

    /// How often an auto-playing driver should step in this mode
    pub fn tick_interval(self) -> Duration {
        match self {
            Mode::ValueIteration => Duration::from_millis(500),
            Mode::Online(_) => Duration::from_millis(100),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Where the agent is and what it has collected during the current episode
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AgentState {
    pub pos: Pos,
    pub last_action: Option<Action>,
    /// Sum of rewards since the last respawn
    pub total_reward: f32,
    /// The action already selected for the next step (SARSA only)
    pub next_action: Option<Action>,
}

impl AgentState {
    pub fn at(pos: Pos) -> Self {
        Self {
            pos,
            last_action: None,
            total_reward: 0.0,
            next_action: None,
        }
    }
}

/// Result of one online learning step
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StepOutcome {
    pub exp: Exp,
    /// The TD error of the applied update
    pub td_error: f32,
    /// Whether `exp.next_state` ended the episode
    pub terminal: bool,
    /// Total reward of the episode that just ended
    pub episode_return: Option<f32>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct EpisodeStats {
    /// Completed episodes
    pub episodes: u32,
    /// Steps taken in the current episode
    pub steps: u32,
    pub total_steps: u64,
    pub last_return: Option<f32>,
    /// Value iteration sweeps applied
    pub sweeps: u32,
}

/// Owns the grid, the agent and the random source, and sequences one step at a time
///
/// Every step runs to completion before the next may begin.
pub struct Simulation<R: Rng = StdRng> {
    grid: Grid,
    agent: AgentState,
    params: Params,
    mode: Mode,
    rng: R,
    stats: EpisodeStats,
}

impl Simulation<StdRng> {
    /// Simulate the classic grid with an entropy seeded random source
    pub fn new(mode: Mode, params: Params) -> Self {
        Self::with_rng(mode, params, StdRng::from_entropy())
    }

    pub fn seeded(mode: Mode, params: Params, seed: u64) -> Self {
        Self::with_rng(mode, params, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> Simulation<R> {
    pub fn with_rng(mode: Mode, params: Params, rng: R) -> Self {
        Self::with_grid(Grid::classic(params.step_reward), mode, params, rng)
    }

    /// Simulate a custom grid; `params.step_reward` is ignored in favor of the grid's own rewards
    pub fn with_grid(grid: Grid, mode: Mode, params: Params, rng: R) -> Self {
        Self {
            agent: AgentState::at(grid.start()),
            grid,
            params,
            mode,
            rng,
            stats: EpisodeStats::default(),
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn agent(&self) -> &AgentState {
        &self.agent
    }

    pub fn params(&self) -> &Params {
        &self.params
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn stats(&self) -> &EpisodeStats {
        &self.stats
    }

    pub fn is_agent_at(&self, pos: Pos) -> bool {
        self.agent.pos == pos
    }

    /// Advance by one step of the current mode
    ///
    /// **Returns** the observed transition, or `None` for a value iteration sweep
    pub fn step(&mut self) -> Option<StepOutcome> {
        match self.mode {
            Mode::ValueIteration => {
                self.value_iteration_step();
                None
            }
            Mode::Online(learner) => Some(self.rl_step(learner)),
        }
    }

    /// Replace the grid with one synchronous Bellman backup of itself
    pub fn value_iteration_step(&mut self) {
        self.grid = value_iteration_step(&self.grid, self.params.gamma);
        self.stats.sweeps += 1;
        log::debug!("Value iteration sweep {}", self.stats.sweeps);
    }

    /// Act, move, learn and advance the agent
    ///
    /// The agent is sent back to the start after entering a terminal cell.
    pub fn rl_step(&mut self, learner: Learner) -> StepOutcome {
        let state = self.agent.pos;
        let epsilon = self.params.epsilon;
        let action = match self.agent.next_action.take() {
            Some(action) => action,
            None => epsilon_greedy_action(&self.grid[state], epsilon, &mut self.rng),
        };

        let next_state = next_cell(
            &self.grid,
            state,
            action,
            Dynamics::Stochastic,
            &mut self.rng,
        );
        let reward = self.grid[next_state].reward();
        let terminal = self.grid[next_state].is_terminal();
        let exp = Exp {
            state,
            action,
            reward,
            next_state,
        };

        let td_error = match learner {
            Learner::TemporalDifference => td_update(&mut self.grid, &exp, &self.params),
            Learner::QLearning => {
                q_learning_update(&mut self.grid, &exp, &self.params, &mut self.rng)
            }
            Learner::Sarsa => {
                // a' is drawn before the update and executed on the next step
                let next_action = (!terminal)
                    .then(|| epsilon_greedy_action(&self.grid[next_state], epsilon, &mut self.rng));
                let td_error = sarsa_update(
                    &mut self.grid,
                    &exp,
                    next_action.unwrap_or(action),
                    &self.params,
                    &mut self.rng,
                );
                self.agent.next_action = next_action;
                td_error
            }
        };

        self.grid[next_state].visits += 1;
        self.stats.steps += 1;
        self.stats.total_steps += 1;
        self.agent.total_reward += reward;
        self.agent.last_action = Some(action);

        let episode_return = if terminal {
            let total = self.agent.total_reward;
            self.stats.episodes += 1;
            self.stats.last_return = Some(total);
            log::debug!(
                "Episode {} ended at {:?} after {} steps with return {:.3}",
                self.stats.episodes,
                next_state,
                self.stats.steps,
                total
            );
            self.stats.steps = 0;
            self.agent = AgentState::at(self.grid.start());
            Some(total)
        } else {
            self.agent.pos = next_state;
            None
        };

        StepOutcome {
            exp,
            td_error,
            terminal,
            episode_return,
        }
    }

    /// Forget everything learned and respawn the agent
    pub fn reset(&mut self) {
        self.grid.reset_values();
        self.agent = AgentState::at(self.grid.start());
        self.stats = EpisodeStats::default();
        log::info!("Reset {} simulation", self.mode);
    }

    /// Switch algorithms, starting over from a fresh grid
    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
        self.reset();
    }
}
