use std::error::Error;

use gridworld::{algo::Params, sim::Mode, viz};

fn main() -> Result<(), Box<dyn Error>> {
    viz::run(Mode::ValueIteration, Params::default())?;
    Ok(())
}
