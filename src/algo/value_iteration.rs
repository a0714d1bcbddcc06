use strum::VariantArray;

use crate::{
    grid::{Action, Grid, Pos, Tile},
    transition::{move_to, outcomes},
};

/// Expected utility of intending `action` from `pos`, weighted over every slip outcome
fn expected_utility(grid: &Grid, pos: Pos, action: Action) -> f32 {
    outcomes(action)
        .into_iter()
        .map(|(executed, p)| p * grid[move_to(grid, pos, executed)].utility())
        .sum()
}

/// One synchronous Bellman backup over every cell
///
/// All new utilities are computed from the utilities in `grid`, never from
/// values already updated during the same sweep. Terminal utilities are
/// pinned to their reward and walls are left untouched.
pub fn value_iteration_step(grid: &Grid, gamma: f32) -> Grid {
    let mut next = grid.clone();

    for cell in grid.cells() {
        let pos = cell.pos();
        match cell.tile() {
            Tile::Wall => continue,
            Tile::Terminal => {
                next[pos].utility = cell.reward();
                continue;
            }
            Tile::Empty | Tile::Start => {}
        }

        // Ties keep the first action found
        let mut best = (Action::Up, f32::NEG_INFINITY);
        for &action in Action::VARIANTS {
            let value = expected_utility(grid, pos, action);
            if value > best.1 {
                best = (action, value);
            }
        }

        let target = &mut next[pos];
        target.utility = cell.reward() + gamma * best.1;
        target.policy = Some(best.0);
    }

    next
}

/// Run `sweeps` backups in a row
pub fn value_iteration(grid: &Grid, gamma: f32, sweeps: usize) -> Grid {
    (0..sweeps).fold(grid.clone(), |g, _| value_iteration_step(&g, gamma))
}

#[cfg(test)]
mod tests {
    use super::*;

    const GAMMA: f32 = 0.9;

    #[test]
    fn first_sweep_is_synchronous() {
        let grid = value_iteration_step(&Grid::classic(-0.04), GAMMA);

        let beside_goal = grid[(0, 2)].utility();
        assert!(
            (beside_goal - (-0.04 + GAMMA * 0.8)).abs() < 1e-6,
            "Cell next to the goal sees the goal, got {}",
            beside_goal
        );
        assert_eq!(grid[(0, 2)].policy(), Some(Action::Right));

        // (1,2) would see the fresh value at (0,2) under an in-place sweep
        assert_eq!(grid[(1, 2)].utility(), -0.04);
        assert_eq!(grid[(1, 2)].policy(), Some(Action::Left), "Hugs the wall away from the pit");
        assert_eq!(grid[(0, 1)].utility(), -0.04);
    }

    #[test]
    fn terminals_stay_pinned() {
        let mut grid = Grid::classic(-0.04);
        for _ in 0..50 {
            grid = value_iteration_step(&grid, GAMMA);
            assert_eq!(grid[(0, 3)].utility(), 1.0);
            assert_eq!(grid[(1, 3)].utility(), -1.0);
            assert_eq!(grid[(0, 3)].policy(), None);
        }
    }

    #[test]
    fn walls_untouched() {
        let original = Grid::classic(-0.04);
        let grid = value_iteration(&original, GAMMA, 30);
        assert_eq!(grid[(1, 1)], original[(1, 1)]);
    }

    #[test]
    fn converges_toward_the_goal() {
        let grid = value_iteration(&Grid::classic(-0.04), GAMMA, 100);

        let start = grid.start();
        let action = grid[start].policy().expect("Start has a policy");
        assert_ne!(
            move_to(&grid, start, action),
            start,
            "Start policy {:?} bumps into a wall or the edge",
            action
        );
        assert!(
            grid[(0, 2)].utility() > grid[(2, 0)].utility(),
            "Cell next to the goal is worth more than the start"
        );

        for cell in grid.cells() {
            let expected = cell.is_learnable();
            assert_eq!(cell.policy().is_some(), expected, "Policy at {:?}", cell.pos());
        }
    }

    #[test]
    fn sweeps_settle() {
        let settled = value_iteration(&Grid::classic(-0.04), GAMMA, 200);
        let once_more = value_iteration_step(&settled, GAMMA);
        for (a, b) in settled.cells().zip(once_more.cells()) {
            assert!((a.utility() - b.utility()).abs() < 1e-5, "Drift at {:?}", a.pos());
        }
    }

    #[test]
    fn zero_sweeps_is_identity() {
        let grid = Grid::classic(-0.04);
        assert_eq!(value_iteration(&grid, GAMMA, 0), grid);
    }
}
