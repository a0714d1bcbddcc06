use crate::{algo::Params, exp::Exp, grid::Grid};

use super::assert_learnable;

/// TD(0) prediction: `U(s) <- U(s) + alpha * (r + gamma * U(s') - U(s))`
///
/// A terminal successor contributes its own reward as `U(s')`.
///
/// **Returns** the TD error
pub fn td_update(grid: &mut Grid, exp: &Exp, params: &Params) -> f32 {
    let &Exp {
        state,
        reward,
        next_state,
        ..
    } = exp;
    assert_learnable(grid, state);

    let next = &grid[next_state];
    let next_value = if next.is_terminal() {
        next.reward()
    } else {
        next.utility()
    };

    let utility = grid[state].utility();
    let td_error = reward + params.gamma * next_value - utility;
    grid[state].utility = utility + params.alpha * td_error;

    log::trace!(
        "TD(0) {:?} -> {:?}: U = {:.4} (error {:.4})",
        state,
        next_state,
        grid[state].utility(),
        td_error
    );
    td_error
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{Action, ActionValues};

    fn params() -> Params {
        Params {
            gamma: 0.9,
            alpha: 0.5,
            ..Default::default()
        }
    }

    #[test]
    fn bootstraps_from_stored_utility() {
        let mut grid = Grid::classic(-0.04);
        grid[(2, 0)].utility = 0.2;
        grid[(1, 0)].utility = 0.6;
        let exp = Exp {
            state: (2, 0),
            action: Action::Up,
            reward: -0.04,
            next_state: (1, 0),
        };

        let error = td_update(&mut grid, &exp, &params());
        let expected_error = -0.04 + 0.9 * 0.6 - 0.2;
        assert!((error - expected_error).abs() < 1e-6);
        assert!((grid[(2, 0)].utility() - (0.2 + 0.5 * expected_error)).abs() < 1e-6);
    }

    #[test]
    fn terminal_successor_uses_its_reward() {
        let mut grid = Grid::classic(-0.04);
        grid[(0, 3)].utility = 123.0;
        let exp = Exp {
            state: (0, 2),
            action: Action::Right,
            reward: 1.0,
            next_state: (0, 3),
        };

        td_update(&mut grid, &exp, &params());
        let expected = 0.5 * (1.0 + 0.9 * 1.0);
        assert!((grid[(0, 2)].utility() - expected).abs() < 1e-6);
    }

    #[test]
    fn touches_only_the_source_utility() {
        let mut grid = Grid::classic(-0.04);
        let before = grid.clone();
        let exp = Exp {
            state: (2, 1),
            action: Action::Right,
            reward: -0.04,
            next_state: (2, 2),
        };

        td_update(&mut grid, &exp, &params());
        for (a, b) in grid.cells().zip(before.cells()) {
            if a.pos() == (2, 1) {
                assert_eq!(*a.q(), ActionValues::default(), "Q untouched");
                assert_eq!(a.policy(), None, "Policy untouched");
            } else {
                assert_eq!(a, b, "Cell {:?} changed", a.pos());
            }
        }
    }

    #[test]
    #[should_panic(expected = "Cannot learn")]
    fn rejects_terminal_source() {
        let mut grid = Grid::classic(-0.04);
        let exp = Exp {
            state: (0, 3),
            action: Action::Left,
            reward: -0.04,
            next_state: (0, 2),
        };
        td_update(&mut grid, &exp, &params());
    }
}
