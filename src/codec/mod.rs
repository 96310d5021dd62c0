//! Pattern codec
//!
//! Stateless helpers that move a pattern between its flat vector form
//! and a row-major grid, and that corrupt a vector with sign-flip noise.

pub mod grid;
pub mod noise;
pub mod vector;

pub use grid::{from_grid, to_grid, Grid};
pub use noise::add_noise;
pub use vector::{BipolarVector, OFF, ON};
