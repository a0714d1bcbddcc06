use rand::{seq::SliceRandom, Rng};
use strum::VariantArray;

use crate::grid::{Action, Cell};

/// Exploration policy result
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Choice {
    Explore,
    Exploit,
}

/// Epsilon greedy exploration policy with a fixed epsilon
///
/// Epsilon is not validated: values at or below 0 never explore and values
/// at or above 1 always explore.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EpsilonGreedy {
    epsilon: f32,
}

impl EpsilonGreedy {
    pub fn new(epsilon: f32) -> Self {
        Self { epsilon }
    }

    pub fn epsilon(&self) -> f32 {
        self.epsilon
    }

    /// Draw the explore/exploit decision
    pub fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> Choice {
        if rng.gen::<f32>() < self.epsilon {
            Choice::Explore
        } else {
            Choice::Exploit
        }
    }

    /// Pick an action for `cell`
    pub fn act<R: Rng + ?Sized>(&self, cell: &Cell, rng: &mut R) -> Action {
        match self.choose(rng) {
            Choice::Explore => random_action(rng),
            Choice::Exploit => greedy_action(cell, rng),
        }
    }
}

/// Uniformly random action
pub fn random_action<R: Rng + ?Sized>(rng: &mut R) -> Action {
    *Action::VARIANTS
        .choose(rng)
        .expect("There is always at least one action available")
}

/// The action with the highest Q-value, exact ties broken uniformly at random
pub fn greedy_action<R: Rng + ?Sized>(cell: &Cell, rng: &mut R) -> Action {
    *cell
        .q()
        .best_actions()
        .choose(rng)
        .expect("Q-values must not be NaN")
}

pub fn epsilon_greedy_action<R: Rng + ?Sized>(cell: &Cell, epsilon: f32, rng: &mut R) -> Action {
    EpsilonGreedy::new(epsilon).act(cell, rng)
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};
    use statrs::distribution::{ChiSquared, ContinuousCDF};

    use super::*;
    use crate::grid::Grid;

    fn counts<F: FnMut() -> Action>(n: usize, mut pick: F) -> [usize; 4] {
        let mut counts = [0; 4];
        for _ in 0..n {
            counts[pick() as usize] += 1;
        }
        counts
    }

    #[test]
    fn greedy_picks_the_maximum() {
        let mut grid = Grid::classic(-0.04);
        grid[(2, 0)].q[Action::Right] = 0.4;
        grid[(2, 0)].q[Action::Up] = 0.2;
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..100 {
            assert_eq!(greedy_action(&grid[(2, 0)], &mut rng), Action::Right);
        }
    }

    #[test]
    fn greedy_breaks_ties_among_the_tied_set_only() {
        let mut grid = Grid::classic(-0.04);
        grid[(2, 0)].q[Action::Up] = 0.5;
        grid[(2, 0)].q[Action::Left] = 0.5;
        grid[(2, 0)].q[Action::Down] = -0.1;
        let mut rng = StdRng::seed_from_u64(2);

        let counts = counts(2_000, || greedy_action(&grid[(2, 0)], &mut rng));
        assert_eq!(counts[Action::Down as usize], 0);
        assert_eq!(counts[Action::Right as usize], 0);
        assert!(counts[Action::Up as usize] > 800, "Up chosen {:?}", counts);
        assert!(counts[Action::Left as usize] > 800, "Left chosen {:?}", counts);
    }

    #[test]
    fn greedy_tie_break_is_fair() {
        const CALLS: usize = 40_000;
        let grid = Grid::classic(-0.04);
        let mut rng = StdRng::seed_from_u64(3);

        let counts = counts(CALLS, || greedy_action(&grid[(0, 0)], &mut rng));
        let expected = CALLS as f64 / 4.0;
        let statistic: f64 = counts
            .iter()
            .map(|&c| (c as f64 - expected).powi(2) / expected)
            .sum();
        let critical = ChiSquared::new(3.0).unwrap().inverse_cdf(0.999);
        assert!(
            statistic < critical,
            "Chi-squared {} exceeds {} for counts {:?}",
            statistic,
            critical,
            counts
        );
    }

    #[test]
    fn epsilon_extremes() {
        let mut grid = Grid::classic(-0.04);
        grid[(2, 0)].q[Action::Up] = 1.0;
        let mut rng = StdRng::seed_from_u64(4);

        let greedy = counts(1_000, || epsilon_greedy_action(&grid[(2, 0)], 0.0, &mut rng));
        assert_eq!(greedy[Action::Up as usize], 1_000, "Epsilon 0 never explores");

        let random = counts(4_000, || epsilon_greedy_action(&grid[(2, 0)], 1.0, &mut rng));
        for (i, &c) in random.iter().enumerate() {
            assert!(c > 800, "Epsilon 1 explores every action, got {} for {}", c, i);
        }
    }

    #[test]
    fn epsilon_rate() {
        let policy = EpsilonGreedy::new(0.25);
        let mut rng = StdRng::seed_from_u64(5);
        let explored = (0..10_000)
            .filter(|_| policy.choose(&mut rng) == Choice::Explore)
            .count();
        assert!((2_250..2_750).contains(&explored), "Explored {} times", explored);
    }
}
