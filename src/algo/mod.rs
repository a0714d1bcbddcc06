pub mod tabular;
pub mod value_iteration;

pub use tabular::{q_learning_update, sarsa_update, td_update};
pub use value_iteration::{value_iteration, value_iteration_step};

/// Hyperparameters shared by every algorithm
///
/// None of the values are validated; out of range values only change how
/// (and whether) the estimates converge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Params {
    /// Discount factor
    pub gamma: f32,
    /// Learning rate
    pub alpha: f32,
    /// Exploration rate
    pub epsilon: f32,
    /// Reward for entering any non-terminal cell
    pub step_reward: f32,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            gamma: 0.9,
            alpha: 0.1,
            epsilon: 0.1,
            step_reward: -0.04,
        }
    }
}
