//! Associative memory
//!
//! A classical Hopfield network: Hebbian outer-product training over a
//! dense weight matrix and synchronous sign-threshold recall.

pub mod network;
pub mod trial;

pub use network::{HopfieldMemory, RecallOutcome, RecallStatus, TrainingMode};
pub use trial::{run_trials, TrialReport};
