use thiserror::Error;

/// Errors raised while building a [`Grid`](crate::grid::Grid) from a text layout
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    #[error("layout has no cells")]
    EmptyLayout,

    #[error("row {row} has {got} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        got: usize,
    },

    #[error("unknown tile '{tile}' at ({row}, {col})")]
    UnknownTile { tile: char, row: usize, col: usize },

    #[error("layout must contain exactly one start cell, found {0}")]
    StartCount(usize),
}
