//! Incremental updates from a single observed transition
//!
//! Every rule writes only to the fields of `exp.state` and requires it to be
//! a cell that can learn (neither a wall nor a terminal).

mod q_learning;
mod sarsa;
mod td;

pub use q_learning::q_learning_update;
pub use sarsa::sarsa_update;
pub use td::td_update;

use rand::Rng;

use crate::{
    exploration::greedy_action,
    grid::{Grid, Pos},
};

fn assert_learnable(grid: &Grid, pos: Pos) {
    assert!(
        grid[pos].is_learnable(),
        "Cannot learn at {:?}: {:?} cells hold no values",
        pos,
        grid[pos].tile()
    );
}

/// Recompute the utility and policy shown for `pos` from its Q-values
fn refresh_from_q<R: Rng + ?Sized>(grid: &mut Grid, pos: Pos, rng: &mut R) {
    let policy = greedy_action(&grid[pos], rng);
    let cell = &mut grid[pos];
    cell.utility = cell.q.max();
    cell.policy = Some(policy);
}
