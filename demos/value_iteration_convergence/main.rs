use std::{error::Error, fs, path::Path};

use gridworld::{
    algo::{value_iteration_step, Params},
    Grid,
};

const NUM_SWEEPS: u32 = 100;

fn main() -> Result<(), Box<dyn Error>> {
    let path = Path::new("demos/value_iteration_convergence");
    let params = Params::default();
    let mut grid = Grid::classic(params.step_reward);

    let tracked = grid
        .cells()
        .filter(|c| c.is_learnable())
        .map(|c| c.pos())
        .collect::<Vec<_>>();

    fs::create_dir_all(path.join("out"))?;

    let mut wtr = csv::Writer::from_path(path.join("out/data.csv"))?;
    let mut header = vec![String::from("sweep")];
    header.extend(tracked.iter().map(|(r, c)| format!("u_{r}_{c}")));
    wtr.write_record(&header)?;

    for sweep in 1..=NUM_SWEEPS {
        grid = value_iteration_step(&grid, params.gamma);

        let mut record = vec![sweep.to_string()];
        record.extend(tracked.iter().map(|&pos| grid[pos].utility().to_string()));
        wtr.write_record(&record)?;
    }

    wtr.flush()?;

    println!("Utilities and policy after {NUM_SWEEPS} sweeps:\n\n{grid}");

    Ok(())
}
