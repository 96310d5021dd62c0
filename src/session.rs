//! Interactive recall session.
//!
//! Holds everything a front end needs between user actions: a trained
//! memory, the state currently on screen and the configured defaults.
//! Rendering is left to the caller via [`RecallSession::grid`].

use rand::Rng;
use tracing::debug;

use crate::codec::{self, BipolarVector, Grid};
use crate::config::RecallConfig;
use crate::error::{HopfieldError, Result};
use crate::memory::{HopfieldMemory, RecallOutcome};

pub struct RecallSession {
    memory: HopfieldMemory,
    config: RecallConfig,
    current: BipolarVector,
}

impl RecallSession {
    /// Build a memory sized from `config`, train it on `library`, and start
    /// from an all-positive state.
    pub fn new(config: RecallConfig, library: &[BipolarVector]) -> Result<Self> {
        config.validate()?;
        let mut memory = HopfieldMemory::new(config.size());
        memory.train_with_mode(library, config.training_mode)?;
        let current = BipolarVector::filled(config.size());
        Ok(Self {
            memory,
            config,
            current,
        })
    }

    pub fn config(&self) -> &RecallConfig {
        &self.config
    }

    pub fn memory(&self) -> &HopfieldMemory {
        &self.memory
    }

    pub fn current(&self) -> &BipolarVector {
        &self.current
    }

    /// Current state as a `rows × cols` grid.
    pub fn grid(&self) -> Result<Grid> {
        codec::to_grid(&self.current, self.config.rows, self.config.cols)
    }

    /// Retrain using the configured training mode.
    pub fn retrain(&mut self, library: &[BipolarVector]) -> Result<()> {
        self.memory.train_with_mode(library, self.config.training_mode)
    }

    /// Replace the current state with a copy of `pattern`.
    pub fn load_pattern(&mut self, pattern: &BipolarVector) -> Result<()> {
        if pattern.len() != self.config.size() {
            return Err(HopfieldError::ShapeMismatch {
                expected: self.config.size(),
                actual: pattern.len(),
            });
        }
        self.current = pattern.clone();
        Ok(())
    }

    /// Flip the cell at `(row, col)`.
    pub fn toggle(&mut self, row: usize, col: usize) -> Result<()> {
        let mut grid = self.grid()?;
        grid.toggle(row, col)?;
        self.current = codec::from_grid(&grid);
        Ok(())
    }

    /// Corrupt the current state with the configured flip probability.
    pub fn add_noise<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<()> {
        self.current = codec::add_noise(&self.current, self.config.noise_probability, rng)?;
        Ok(())
    }

    /// Replace the current state with its recalled version.
    pub fn restore(&mut self) -> Result<RecallOutcome> {
        let outcome = self
            .memory
            .recall_detailed(&self.current, self.config.max_iterations)?;
        debug!(
            "Session restore: {:?} after {} sweeps",
            outcome.status, outcome.sweeps
        );
        self.current = outcome.state.clone();
        Ok(outcome)
    }

    /// Set every cell to -1.
    pub fn clear(&mut self) {
        self.current = BipolarVector::cleared(self.config.size());
    }
}
