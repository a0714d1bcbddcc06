use rand::Rng;

use crate::{
    algo::Params,
    exp::Exp,
    grid::{Action, Grid},
};

use super::{assert_learnable, refresh_from_q};

/// On-policy SARSA update:
/// `Q(s,a) <- Q(s,a) + alpha * (r + gamma * Q(s',a') - Q(s,a))`
///
/// `next_action` is the action actually selected at `s'`. It is ignored when
/// `s'` is terminal, where the bootstrap term is 0.
///
/// **Returns** the TD error
pub fn sarsa_update<R>(
    grid: &mut Grid,
    exp: &Exp,
    next_action: Action,
    params: &Params,
    rng: &mut R,
) -> f32
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
    let next_q = if next.is_terminal() {
        0.0
    } else {
        next.q()[next_action]
    };

    let q_value = grid[state].q()[action];
    let td_error = reward + params.gamma * next_q - q_value;
    grid[state].q[action] = q_value + params.alpha * td_error;
    refresh_from_q(grid, state, rng);

    log::trace!(
        "SARSA {:?} {:?} -> {:?} {:?}: Q = {:.4} (error {:.4})",
        state,
        action,
        next_state,
        next_action,
        grid[state].q()[action],
        td_error
    );
    td_error
}
