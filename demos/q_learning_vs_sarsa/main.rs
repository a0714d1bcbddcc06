use std::{error::Error, fs, path::Path};

use gridworld::{
    algo::Params,
    sim::{Learner, Mode, Simulation},
};

const NUM_STEPS: u32 = 20_000;
const SEED: u64 = 7;

fn main() -> Result<(), Box<dyn Error>> {
    let path = Path::new("demos/q_learning_vs_sarsa");
    let params = Params {
        alpha: 0.2,
        epsilon: 0.2,
        ..Default::default()
    };

    fs::create_dir_all(path.join("out"))?;

    let mut wtr = csv::Writer::from_path(path.join("out/data.csv"))?;
    wtr.write_record(["learner", "episode", "step", "return"])?;

    for learner in [Learner::QLearning, Learner::Sarsa] {
        let mode = Mode::Online(learner);
        let mut sim = Simulation::seeded(mode, params, SEED);

        for step in 0..NUM_STEPS {
            let Some(outcome) = sim.step() else {
                continue;
            };
            if let Some(ret) = outcome.episode_return {
                wtr.write_record([
                    mode.name().to_string(),
                    sim.stats().episodes.to_string(),
                    step.to_string(),
                    ret.to_string(),
                ])?;
            }
        }

        println!(
            "{mode}: {} episodes in {NUM_STEPS} steps\n\n{}",
            sim.stats().episodes,
            sim.grid()
        );
    }

    wtr.flush()?;

    Ok(())
}
