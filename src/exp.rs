use crate::grid::{Action, Pos};

/// Represents a single observed transition in the grid
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Exp {
    /// The cell the agent acted from
    pub state: Pos,
    /// The action the agent intended to take
    pub action: Action,
    /// The reward of the cell finally occupied
    pub reward: f32,
    /// The cell finally occupied, which equals `state` after a bump
    pub next_state: Pos,
}
