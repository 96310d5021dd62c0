//! Hopfield Recall
//!
//! A small associative-memory engine:
//! - Hebbian outer-product training of a dense symmetric weight matrix
//! - Synchronous sign-threshold recall until a fixed point or an iteration cap
//! - Codec between flat bipolar vectors and row-major grids, with sign-flip noise
//! - A session type that mirrors the actions of an interactive pattern editor

pub mod codec;
pub mod config;
pub mod error;
pub mod memory;
pub mod patterns;
pub mod session;

pub use codec::{add_noise, from_grid, to_grid, BipolarVector, Grid};
pub use config::RecallConfig;
pub use error::{HopfieldError, Result};
pub use memory::{HopfieldMemory, RecallOutcome, RecallStatus, TrainingMode};
pub use patterns::{reference_library, ReferencePattern};
pub use session::RecallSession;
