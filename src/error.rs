use crate::components::Cell;

#[derive(thiserror::Error, Debug)]
pub enum MazeError {
    /// Every generation attempt left the goal cut off from the start.
    #[error("level {level}: no solvable layout after {attempts} attempts")]
    GenerationExhausted { level: u32, attempts: u32 },

    #[error("endpoint {cell} lies outside a {size}x{size} grid")]
    EndpointOutOfBounds { cell: Cell, size: usize },

    #[error("endpoint {cell} is blocked")]
    BlockedEndpoint { cell: Cell },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type MazeResult<T> = Result<T, MazeError>;
