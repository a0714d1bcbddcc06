use std::{
    fmt,
    ops::{Index, IndexMut},
};

use strum::{EnumIter, VariantArray};

use crate::error::Error;

/// Cell coordinates as `(row, col)`, with `(0, 0)` in the top left corner
pub type Pos = (usize, usize);

/// The canonical 3x4 world: a wall in the middle, a +1 exit top right,
/// a -1 exit just below it and the start in the bottom left corner
pub const CLASSIC_LAYOUT: [&str; 3] = ["...+", ".#.-", "S..."];

#[derive(EnumIter, VariantArray, Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub enum Action {
    Up = 0,
    Down = 1,
    Left = 2,
    Right = 3,
}

impl Action {
    /// Row and column offset of one move in this direction
    pub fn delta(self) -> (isize, isize) {
        match self {
            Action::Up => (-1, 0),
            Action::Down => (1, 0),
            Action::Left => (0, -1),
            Action::Right => (0, 1),
        }
    }

    /// The two actions an intended move can slip into
    pub fn orthogonal(self) -> [Action; 2] {
        match self {
            Action::Up | Action::Down => [Action::Left, Action::Right],
            Action::Left | Action::Right => [Action::Up, Action::Down],
        }
    }

    pub fn arrow(self) -> char {
        match self {
            Action::Up => '↑',
            Action::Down => '↓',
            Action::Left => '←',
            Action::Right => '→',
        }
    }
}

/// Q-values of a single cell, one per [`Action`]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ActionValues([f32; 4]);

impl ActionValues {
    pub fn iter(&self) -> impl Iterator<Item = (Action, f32)> + '_ {
        Action::VARIANTS.iter().copied().zip(self.0.iter().copied())
    }

    pub fn max(&self) -> f32 {
        self.0.iter().copied().fold(f32::NEG_INFINITY, f32::max)
    }

    /// All actions whose value equals the maximum exactly
    pub fn best_actions(&self) -> Vec<Action> {
        let max = self.max();
        self.iter()
            .filter(|&(_, q)| q == max)
            .map(|(a, _)| a)
            .collect()
    }
}

impl Index<Action> for ActionValues {
    type Output = f32;

    fn index(&self, action: Action) -> &Self::Output {
        &self.0[action as usize]
    }
}

impl IndexMut<Action> for ActionValues {
    fn index_mut(&mut self, action: Action) -> &mut Self::Output {
        &mut self.0[action as usize]
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Tile {
    Empty,
    /// Respawn point, otherwise behaves like [`Tile::Empty`]
    Start,
    /// Impassable, never holds a learned value
    Wall,
    /// Ends the episode on entry
    Terminal,
}

/// A single grid position together with everything learned about it
#[derive(Clone, Debug, PartialEq)]
pub struct Cell {
    pos: Pos,
    tile: Tile,
    reward: f32,
    pub(crate) utility: f32,
    pub(crate) q: ActionValues,
    pub(crate) policy: Option<Action>,
    pub(crate) visits: u32,
}

impl Cell {
    fn new(pos: Pos, tile: Tile, reward: f32) -> Self {
        let mut cell = Self {
            pos,
            tile,
            reward,
            utility: 0.0,
            q: ActionValues::default(),
            policy: None,
            visits: 0,
        };
        cell.reset();
        cell
    }

    /// Restore the learned fields to their initial values
    fn reset(&mut self) {
        self.utility = if self.is_terminal() { self.reward } else { 0.0 };
        self.q = ActionValues::default();
        self.policy = None;
        self.visits = 0;
    }

    pub fn pos(&self) -> Pos {
        self.pos
    }

    pub fn tile(&self) -> Tile {
        self.tile
    }

    /// Reward received upon entering this cell
    pub fn reward(&self) -> f32 {
        self.reward
    }

    pub fn utility(&self) -> f32 {
        self.utility
    }

    pub fn q(&self) -> &ActionValues {
        &self.q
    }

    pub fn policy(&self) -> Option<Action> {
        self.policy
    }

    pub fn visits(&self) -> u32 {
        self.visits
    }

    pub fn is_wall(&self) -> bool {
        self.tile == Tile::Wall
    }

    pub fn is_terminal(&self) -> bool {
        self.tile == Tile::Terminal
    }

    /// Whether values are ever learned for this cell
    pub fn is_learnable(&self) -> bool {
        !self.is_wall() && !self.is_terminal()
    }
}

/// A fixed rectangle of cells stored in row-major order
#[derive(Clone, Debug, PartialEq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
    start: Pos,
}

impl Grid {
    /// Build the canonical 3x4 world where every non-terminal cell costs `step_reward` to enter
    pub fn classic(step_reward: f32) -> Self {
        Self::from_layout(&CLASSIC_LAYOUT, step_reward).expect("classic layout is well formed")
    }

    /// Build a grid from rows of tile characters
    ///
    /// | char | tile |
    /// |------|------|
    /// | `.`  | empty, rewards `step_reward` |
    /// | `S`  | start, rewards `step_reward` |
    /// | `#`  | wall |
    /// | `+`  | terminal, rewards `1.0` |
    /// | `-`  | terminal, rewards `-1.0` |
    pub fn from_layout<S: AsRef<str>>(layout: &[S], step_reward: f32) -> Result<Self, Error> {
        let rows = layout.len();
        let cols = layout.first().map_or(0, |r| r.as_ref().chars().count());
        if cols == 0 {
            return Err(Error::EmptyLayout);
        }

        let mut cells = Vec::with_capacity(rows * cols);
        let mut starts = Vec::new();
        for (row, line) in layout.iter().enumerate() {
            let line = line.as_ref();
            let got = line.chars().count();
            if got != cols {
                return Err(Error::RaggedRow {
                    row,
                    expected: cols,
                    got,
                });
            }

            for (col, tile) in line.chars().enumerate() {
                let pos = (row, col);
                let cell = match tile {
                    '.' => Cell::new(pos, Tile::Empty, step_reward),
                    'S' => {
                        starts.push(pos);
                        Cell::new(pos, Tile::Start, step_reward)
                    }
                    '#' => Cell::new(pos, Tile::Wall, 0.0),
                    '+' => Cell::new(pos, Tile::Terminal, 1.0),
                    '-' => Cell::new(pos, Tile::Terminal, -1.0),
                    _ => return Err(Error::UnknownTile { tile, row, col }),
                };
                cells.push(cell);
            }
        }

        let [start] = starts[..] else {
            return Err(Error::StartCount(starts.len()));
        };

        Ok(Self {
            rows,
            cols,
            cells,
            start,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn start(&self) -> Pos {
        self.start
    }

    pub fn contains(&self, pos: Pos) -> bool {
        pos.0 < self.rows && pos.1 < self.cols
    }

    pub fn get(&self, pos: Pos) -> Option<&Cell> {
        self.contains(pos)
            .then(|| &self.cells[pos.0 * self.cols + pos.1])
    }

    /// Cells in row-major order
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    pub fn row(&self, row: usize) -> &[Cell] {
        &self.cells[row * self.cols..(row + 1) * self.cols]
    }

    /// Forget everything learned while keeping the layout
    pub fn reset_values(&mut self) {
        self.cells.iter_mut().for_each(Cell::reset);
    }

    fn offset(&self, pos: Pos) -> usize {
        assert!(
            self.contains(pos),
            "Position {:?} is outside the {}x{} grid",
            pos,
            self.rows,
            self.cols
        );
        pos.0 * self.cols + pos.1
    }
}

impl Index<Pos> for Grid {
    type Output = Cell;

    fn index(&self, pos: Pos) -> &Self::Output {
        &self.cells[self.offset(pos)]
    }
}

impl IndexMut<Pos> for Grid {
    fn index_mut(&mut self, pos: Pos) -> &mut Self::Output {
        let i = self.offset(pos);
        &mut self.cells[i]
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.rows {
            for cell in self.row(row) {
                match cell.tile {
                    Tile::Wall => write!(f, "  ##### ")?,
                    Tile::Terminal => write!(f, "{:+7.3}*", cell.reward)?,
                    Tile::Empty | Tile::Start => {
                        let arrow = cell.policy.map_or(' ', Action::arrow);
                        write!(f, "{:+7.3}{}", cell.utility, arrow)?
                    }
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
