mod grid;
mod help;
mod info;
mod logs;

pub use grid::GridView;
pub use help::render_help;
pub use info::InfoPanel;
pub use logs::Logs;

use crossterm::event::KeyCode;

/// A widget with state of its own that reacts to key presses
pub trait Component {
    /// **Returns** whether the key was consumed
    fn handle_key(&mut self, key: KeyCode) -> bool;
}
