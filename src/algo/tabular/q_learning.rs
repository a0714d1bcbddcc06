use rand::Rng;

use crate::{algo::Params, exp::Exp, grid::Grid};

use super::{assert_learnable, refresh_from_q};

/// Off-policy Q-learning update:
/// `Q(s,a) <- Q(s,a) + alpha * (r + gamma * max_a' Q(s',a') - Q(s,a))`
///
/// The bootstrap term is 0 for a terminal successor, since its reward is
/// already part of `r`. The action taken next is never consulted.
///
/// **Returns** the TD error
pub fn q_learning_update<R>(grid: &mut Grid, exp: &Exp, params: &Params, rng: &mut R) -> f32
where
    R: Rng + ?Sized,
{
    let &Exp {
        state,
        action,
        reward,
        next_state,
    } = exp;
    assert_learnable(grid, state);

    let next = &grid[next_state];
    let max_next_q = if next.is_terminal() {
        0.0
    } else {
        next.q().max()
    };

    let q_value = grid[state].q()[action];
    let td_error = reward + params.gamma * max_next_q - q_value;
    grid[state].q[action] = q_value + params.alpha * td_error;
    refresh_from_q(grid, state, rng);

    log::trace!(
        "Q-learning {:?} {:?} -> {:?}: Q = {:.4} (error {:.4})",
        state,
        action,
        next_state,
        grid[state].q()[action],
        td_error
    );
    td_error
}
