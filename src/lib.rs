pub mod error;
pub mod experiment;
pub mod generators;
pub mod logging;
pub mod maze;
pub mod solvers;

pub use error::{MazeError, Result};
pub use maze::{Grid, Position};
