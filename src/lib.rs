//! Classic reinforcement learning on a small grid world
//!
//! Value iteration over the known model, TD(0) prediction, and Q-learning and
//! SARSA control, all on the same stochastic grid where moves slip sideways
//! 20% of the time.
//!
//! ```
//! use gridworld::{algo::Params, sim::{Learner, Mode, Simulation}};
//!
//! let mut sim = Simulation::seeded(Mode::Online(Learner::QLearning), Params::default(), 0);
//! for _ in 0..100 {
//!     sim.step();
//! }
//! println!("{}", sim.grid());
//! ```

/// Value iteration and the online learning rules
pub mod algo;

pub mod error;

/// Observed transitions
pub mod exp;

/// Action selection policies
pub mod exploration;

/// Cells, tiles and the grid layout
pub mod grid;

/// Sequencing of single simulation steps
pub mod sim;

/// Movement and slip dynamics
pub mod transition;

/// Terminal visualizer
#[cfg(feature = "viz")]
pub mod viz;

mod util;

pub use error::Error;
pub use grid::{Action, Grid, Pos};
