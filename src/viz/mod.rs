use std::io;

use crate::{
    algo::Params,
    sim::{Mode, Simulation},
};

mod app;
mod components;
mod tui;
mod util;

pub use app::App;

/// Run the visualizer on the classic grid until the user quits
///
/// Installs [`tui_logger`] as the global logger, so records emitted by the
/// simulation show up in the Logs tab.
pub fn run(mode: Mode, params: Params) -> io::Result<()> {
    tui_logger::init_logger(log::LevelFilter::Trace).map_err(io::Error::other)?;
    tui_logger::set_default_level(log::LevelFilter::Debug);

    App::new(Simulation::new(mode, params)).run()
}
