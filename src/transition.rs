use rand::Rng;

use crate::{
    assert_interval,
    grid::{Action, Grid, Pos},
};

/// Probability that the intended action is executed
pub const P_INTENDED: f32 = 0.8;

/// Probability of slipping into each of the two orthogonal actions
pub const P_SLIP: f32 = 0.1;

/// How an intended action turns into an executed one
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Dynamics {
    /// The intended action is always executed
    Deterministic,
    /// The intended action slips sideways with probability `2 * P_SLIP`
    Stochastic,
}

/// Move one cell in the direction of `action`
///
/// Moves that would leave the grid or enter a wall bump and stay at `pos`.
pub fn move_to(grid: &Grid, pos: Pos, action: Action) -> Pos {
    let (dr, dc) = action.delta();
    let target = pos
        .0
        .checked_add_signed(dr)
        .zip(pos.1.checked_add_signed(dc));

    match target.and_then(|t| grid.get(t)) {
        Some(cell) if !cell.is_wall() => cell.pos(),
        _ => pos,
    }
}

/// Map a uniform draw `roll` in `[0,1)` to the action actually executed
///
/// **Panics** if `roll` is not in the interval `[0,1]`
pub fn slip(action: Action, roll: f32) -> Action {
    assert_interval!(roll, 0.0, 1.0);
    let [left, right] = action.orthogonal();
    if roll < P_INTENDED {
        action
    } else if roll < P_INTENDED + P_SLIP {
        left
    } else {
        right
    }
}

/// Every action that may be executed when `action` is intended, with its probability
pub fn outcomes(action: Action) -> [(Action, f32); 3] {
    let [left, right] = action.orthogonal();
    [(action, P_INTENDED), (left, P_SLIP), (right, P_SLIP)]
}

/// Resolve an intended action from `pos` into the cell finally occupied
///
/// Consumes one random draw under [`Dynamics::Stochastic`], none otherwise.
pub fn next_cell<R>(grid: &Grid, pos: Pos, action: Action, dynamics: Dynamics, rng: &mut R) -> Pos
where
    R: Rng + ?Sized,
{
    let executed = match dynamics {
        Dynamics::Deterministic => action,
        Dynamics::Stochastic => slip(action, rng.gen()),
    };
    move_to(grid, pos, executed)
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};
    use statrs::{distribution::Binomial, statistics::Distribution};
    use strum::{IntoEnumIterator, VariantArray};

    use super::*;

    #[test]
    fn deterministic_moves() {
        let grid = Grid::classic(-0.04);
        let mut rng = StdRng::seed_from_u64(0);
        let det = Dynamics::Deterministic;
        assert_eq!(next_cell(&grid, (2, 0), Action::Up, det, &mut rng), (1, 0));
        assert_eq!(next_cell(&grid, (2, 0), Action::Right, det, &mut rng), (2, 1));
        assert_eq!(next_cell(&grid, (0, 2), Action::Right, det, &mut rng), (0, 3));
        assert_eq!(next_cell(&grid, (1, 2), Action::Down, det, &mut rng), (2, 2));
    }

    #[test]
    fn transitions_stay_in_bounds() {
        let grid = Grid::classic(-0.04);
        let mut rng = StdRng::seed_from_u64(7);
        for cell in grid.cells().filter(|c| !c.is_wall()) {
            for action in Action::iter() {
                for dynamics in [Dynamics::Deterministic, Dynamics::Stochastic] {
                    for _ in 0..20 {
                        let next = next_cell(&grid, cell.pos(), action, dynamics, &mut rng);
                        assert!(grid.contains(next), "{:?} left the grid", next);
                        assert!(!grid[next].is_wall(), "{:?} entered a wall", next);
                    }
                }
            }
        }
    }

    #[test]
    fn edges_bump() {
        let grid = Grid::classic(-0.04);
        assert_eq!(move_to(&grid, (2, 0), Action::Down), (2, 0), "Bottom edge");
        assert_eq!(move_to(&grid, (2, 0), Action::Left), (2, 0), "Left edge");
        assert_eq!(move_to(&grid, (0, 0), Action::Up), (0, 0), "Top edge");
        assert_eq!(move_to(&grid, (2, 3), Action::Right), (2, 3), "Right edge");
    }

    #[test]
    fn walls_bump() {
        let grid = Grid::classic(-0.04);
        let wall = (1, 1);
        for &action in Action::VARIANTS {
            let (dr, dc) = action.delta();
            let origin = (
                (wall.0 as isize - dr) as usize,
                (wall.1 as isize - dc) as usize,
            );
            assert_eq!(
                move_to(&grid, origin, action),
                origin,
                "Moving {:?} from {:?} into the wall stays put",
                action,
                origin
            );
        }
    }

    #[test]
    fn slip_thresholds() {
        assert_eq!(slip(Action::Up, 0.0), Action::Up);
        assert_eq!(slip(Action::Up, 0.79), Action::Up);
        assert_eq!(slip(Action::Up, 0.85), Action::Left);
        assert_eq!(slip(Action::Up, 0.95), Action::Right);
        assert_eq!(slip(Action::Right, 0.85), Action::Up);
        assert_eq!(slip(Action::Right, 0.95), Action::Down);
    }

    #[test]
    #[should_panic(expected = "Invalid value for `roll`")]
    fn slip_rejects_out_of_range_roll() {
        slip(Action::Up, 1.5);
    }

    #[test]
    fn outcome_probabilities_sum_to_one() {
        for action in Action::iter() {
            let total: f32 = outcomes(action).iter().map(|&(_, p)| p).sum();
            assert!((total - 1.0).abs() < 1e-6, "{:?} sums to {}", action, total);
        }
    }

    #[test]
    fn stochastic_distribution() {
        const TRIALS: u64 = 100_000;
        let grid = Grid::from_layout(&["...", ".S.", "..."], -0.04).unwrap();
        let mut rng = StdRng::seed_from_u64(42);

        let mut counts = [0u64; 3];
        for _ in 0..TRIALS {
            match next_cell(&grid, (1, 1), Action::Up, Dynamics::Stochastic, &mut rng) {
                (0, 1) => counts[0] += 1,
                (1, 0) => counts[1] += 1,
                (1, 2) => counts[2] += 1,
                other => panic!("Unexpected outcome {:?}", other),
            }
        }

        let expected = [P_INTENDED, P_SLIP, P_SLIP];
        for (count, p) in counts.into_iter().zip(expected) {
            let binomial = Binomial::new(p as f64, TRIALS).unwrap();
            let mean = binomial.mean().unwrap();
            let tolerance = 5.0 * binomial.std_dev().unwrap();
            assert!(
                (count as f64 - mean).abs() < tolerance,
                "Observed {} outcomes, expected {} +/- {}",
                count,
                mean,
                tolerance
            );
        }
    }
}
