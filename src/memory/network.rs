//! Hopfield Memory
//!
//! Stores bipolar patterns in a dense symmetric weight matrix using the
//! Hebbian outer-product rule, and reconstructs stored patterns from
//! corrupted input by synchronous relaxation:
//! 1. **Train**: `w[i][j] = Σ_p p[i]·p[j] / P` for every `i ≠ j`, zero diagonal
//! 2. **Sweep**: every neuron is recomputed from the *previous* sweep's state,
//!    `s[i] = sign(Σ_j w[i][j]·prev[j])` with zero mapping to +1
//! 3. **Stop**: when a sweep changes nothing, or after `max_iterations` sweeps
//!
//! `train` takes `&mut self` and `recall` takes `&self`; callers that share
//! one memory across threads wrap it in a `RwLock`.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::codec::{BipolarVector, OFF, ON};
use crate::error::{HopfieldError, Result};

// ============================================================================
// Result types
// ============================================================================

/// How a recall run terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecallStatus {
    /// A full sweep left the state unchanged.
    Converged,
    /// `max_iterations` sweeps ran and the last one still changed something.
    Exhausted,
}

/// Final state of a recall run plus how it got there.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecallOutcome {
    /// The relaxed state. Identical to what `recall` returns.
    pub state: BipolarVector,
    pub status: RecallStatus,
    /// Number of sweeps performed, including the final unchanged one when converged.
    pub sweeps: usize,
}

impl RecallOutcome {
    pub fn converged(&self) -> bool {
        self.status == RecallStatus::Converged
    }
}

/// Whether a training call starts from a clean matrix or adds to it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrainingMode {
    /// Reset the matrix to zero before learning the new library.
    #[default]
    Replace,
    /// Add the new outer products to the existing matrix, then divide the
    /// whole matrix by the new library's size.
    Accumulate,
}

// ============================================================================
// Memory
// ============================================================================

/// Associative memory over bipolar vectors of a fixed size.
#[derive(Debug, Clone)]
pub struct HopfieldMemory {
    size: usize,
    /// Row-major `size × size`.
    weights: Vec<f64>,
}

impl HopfieldMemory {
    /// Create an untrained memory with an all-zero weight matrix.
    pub fn new(size: usize) -> Self {
        Self {
            size,
            weights: vec![0.0; size * size],
        }
    }

    /// Number of neurons.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Weight between neurons `i` and `j`.
    pub fn weight(&self, i: usize, j: usize) -> Option<f64> {
        if i < self.size && j < self.size {
            Some(self.weights[i * self.size + j])
        } else {
            None
        }
    }

    /// The full matrix, row-major.
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Learn `patterns`, discarding anything learned before.
    pub fn train(&mut self, patterns: &[BipolarVector]) -> Result<()> {
        self.train_with_mode(patterns, TrainingMode::Replace)
    }

    /// Learn `patterns` on top of the current matrix.
    ///
    /// Earlier contributions are kept and then divided again by the size
    /// of this library, so repeated calls shrink them.
    pub fn train_additive(&mut self, patterns: &[BipolarVector]) -> Result<()> {
        self.train_with_mode(patterns, TrainingMode::Accumulate)
    }

    /// Learn `patterns` with explicit reset semantics.
    ///
    /// On error the matrix is left exactly as it was.
    pub fn train_with_mode(
        &mut self,
        patterns: &[BipolarVector],
        mode: TrainingMode,
    ) -> Result<()> {
        if patterns.is_empty() {
            return Err(HopfieldError::EmptyLibrary);
        }
        for pattern in patterns {
            self.check_len(pattern)?;
        }

        if mode == TrainingMode::Replace {
            self.weights.iter_mut().for_each(|w| *w = 0.0);
        }

        let n = self.size;
        for pattern in patterns {
            let p = pattern.as_slice();
            for i in 0..n {
                let row = &mut self.weights[i * n..(i + 1) * n];
                let pi = f64::from(p[i]);
                for (j, w) in row.iter_mut().enumerate() {
                    if i != j {
                        *w += pi * f64::from(p[j]);
                    }
                }
            }
        }

        let count = patterns.len() as f64;
        self.weights.iter_mut().for_each(|w| *w /= count);

        debug!(
            "Trained {}-neuron memory on {} patterns ({:?})",
            n,
            patterns.len(),
            mode
        );
        Ok(())
    }

    /// Relax `state` until a fixed point or `max_iterations` sweeps.
    pub fn recall(&self, state: &BipolarVector, max_iterations: usize) -> Result<BipolarVector> {
        self.recall_detailed(state, max_iterations).map(|outcome| outcome.state)
    }

    /// Same as [`recall`](Self::recall), also reporting whether the run
    /// converged or hit the iteration cap.
    pub fn recall_detailed(
        &self,
        state: &BipolarVector,
        max_iterations: usize,
    ) -> Result<RecallOutcome> {
        self.check_len(state)?;
        if max_iterations == 0 {
            return Err(HopfieldError::InvalidIterations);
        }

        let mut current = state.as_slice().to_vec();
        let mut next = vec![ON; self.size];
        let mut status = RecallStatus::Exhausted;
        let mut sweeps = 0;

        for _ in 0..max_iterations {
            self.sweep(&current, &mut next);
            sweeps += 1;
            let unchanged = next == current;
            std::mem::swap(&mut current, &mut next);
            if unchanged {
                status = RecallStatus::Converged;
                break;
            }
        }

        debug!("Recall finished after {} sweeps: {:?}", sweeps, status);

        Ok(RecallOutcome {
            state: BipolarVector::from_spins(current),
            status,
            sweeps,
        })
    }

    /// True if one sweep leaves `state` unchanged.
    pub fn is_fixed_point(&self, state: &BipolarVector) -> Result<bool> {
        self.check_len(state)?;
        let mut next = vec![ON; self.size];
        self.sweep(state.as_slice(), &mut next);
        Ok(next.as_slice() == state.as_slice())
    }

    /// One synchronous update: every `out[i]` is computed from `prev` only.
    fn sweep(&self, prev: &[i8], out: &mut [i8]) {
        for (i, row) in self.weights.chunks_exact(self.size.max(1)).enumerate() {
            let activation: f64 = row
                .iter()
                .zip(prev)
                .map(|(w, s)| w * f64::from(*s))
                .sum();
            out[i] = if activation >= 0.0 { ON } else { OFF };
        }
    }

    fn check_len(&self, v: &BipolarVector) -> Result<()> {
        if v.len() != self.size {
            return Err(HopfieldError::ShapeMismatch {
                expected: self.size,
                actual: v.len(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bv(values: &[i8]) -> BipolarVector {
        BipolarVector::new(values.to_vec()).unwrap()
    }

    fn assert_symmetric_zero_diagonal(memory: &HopfieldMemory) {
        let n = memory.size();
        for i in 0..n {
            assert_eq!(memory.weight(i, i), Some(0.0), "diagonal at {}", i);
            for j in 0..n {
                assert_eq!(memory.weight(i, j), memory.weight(j, i), "w[{}][{}]", i, j);
            }
        }
    }

    #[test]
    fn test_new_memory_is_zero() {
        let memory = HopfieldMemory::new(4);
        assert_eq!(memory.size(), 4);
        assert_eq!(memory.weights().len(), 16);
        assert!(memory.weights().iter().all(|w| *w == 0.0));
        assert_eq!(memory.weight(4, 0), None);
    }

    #[test]
    fn test_hebbian_weights_single_pattern() {
        let mut memory = HopfieldMemory::new(3);
        memory.train(&[bv(&[1, -1, 1])]).unwrap();
        assert_eq!(memory.weight(0, 1), Some(-1.0));
        assert_eq!(memory.weight(0, 2), Some(1.0));
        assert_eq!(memory.weight(1, 2), Some(-1.0));
        assert_symmetric_zero_diagonal(&memory);
    }

    #[test]
    fn test_weights_averaged_over_patterns() {
        let mut memory = HopfieldMemory::new(2);
        memory.train(&[bv(&[1, 1]), bv(&[1, -1])]).unwrap();
        // (1·1 + 1·-1) / 2
        assert_eq!(memory.weight(0, 1), Some(0.0));

        memory.train(&[bv(&[1, 1]), bv(&[1, 1]), bv(&[-1, 1])]).unwrap();
        assert_eq!(memory.weight(0, 1), Some(1.0 / 3.0));
        assert_symmetric_zero_diagonal(&memory);
    }

    #[test]
    fn test_empty_library_rejected_and_weights_untouched() {
        let mut memory = HopfieldMemory::new(3);
        assert_eq!(memory.train(&[]), Err(HopfieldError::EmptyLibrary));
        assert!(memory.weights().iter().all(|w| *w == 0.0));

        memory.train(&[bv(&[1, -1, 1])]).unwrap();
        let before = memory.weights().to_vec();
        assert_eq!(memory.train(&[]), Err(HopfieldError::EmptyLibrary));
        assert_eq!(memory.weights(), before.as_slice());
    }

    #[test]
    fn test_wrong_length_pattern_rejected_and_weights_untouched() {
        let mut memory = HopfieldMemory::new(3);
        let err = memory.train(&[bv(&[1, -1, 1]), bv(&[1, 1])]).unwrap_err();
        assert_eq!(
            err,
            HopfieldError::ShapeMismatch {
                expected: 3,
                actual: 2
            }
        );
        assert!(memory.weights().iter().all(|w| *w == 0.0));
    }

    #[test]
    fn test_replace_resets_previous_training() {
        let mut memory = HopfieldMemory::new(2);
        memory.train(&[bv(&[1, 1])]).unwrap();
        memory.train(&[bv(&[1, -1])]).unwrap();
        assert_eq!(memory.weight(0, 1), Some(-1.0));
    }

    #[test]
    fn test_additive_training_accumulates_then_divides() {
        let mut memory = HopfieldMemory::new(2);
        memory.train(&[bv(&[1, 1])]).unwrap();
        memory.train_additive(&[bv(&[1, 1]), bv(&[1, 1])]).unwrap();
        // (1 + 2) / 2
        assert_eq!(memory.weight(0, 1), Some(1.5));
        assert_symmetric_zero_diagonal(&memory);
    }

    #[test]
    fn test_recall_rejects_bad_input() {
        let memory = HopfieldMemory::new(3);
        assert_eq!(
            memory.recall(&bv(&[1, 1]), 10),
            Err(HopfieldError::ShapeMismatch {
                expected: 3,
                actual: 2
            })
        );
        assert_eq!(
            memory.recall(&bv(&[1, 1, 1]), 0),
            Err(HopfieldError::InvalidIterations)
        );
    }

    #[test]
    fn test_untrained_memory_maps_everything_to_positive() {
        // Zero weights give zero activation, which breaks ties toward +1.
        let memory = HopfieldMemory::new(4);
        let outcome = memory.recall_detailed(&bv(&[-1, 1, -1, -1]), 10).unwrap();
        assert_eq!(outcome.state, BipolarVector::filled(4));
        assert_eq!(outcome.status, RecallStatus::Converged);
        assert_eq!(outcome.sweeps, 2);
    }

    #[test]
    fn test_stored_pattern_converges_in_one_sweep() {
        let mut memory = HopfieldMemory::new(4);
        let p = bv(&[1, -1, 1, -1]);
        memory.train(std::slice::from_ref(&p)).unwrap();
        let outcome = memory.recall_detailed(&p, 100).unwrap();
        assert_eq!(outcome.state, p);
        assert!(outcome.converged());
        assert_eq!(outcome.sweeps, 1);
        assert!(memory.is_fixed_point(&p).unwrap());
    }

    #[test]
    fn test_synchronous_update_oscillates() {
        // Two neurons with negative coupling: synchronous updates swap
        // [1, 1] <-> [-1, -1] forever; an asynchronous rule would settle.
        let mut memory = HopfieldMemory::new(2);
        memory.train(&[bv(&[1, -1])]).unwrap();

        let start = bv(&[1, 1]);
        let outcome = memory.recall_detailed(&start, 5).unwrap();
        assert_eq!(outcome.status, RecallStatus::Exhausted);
        assert_eq!(outcome.sweeps, 5);
        assert_eq!(outcome.state, bv(&[-1, -1]));

        let outcome = memory.recall_detailed(&start, 4).unwrap();
        assert_eq!(outcome.state, start);
        assert_eq!(outcome.status, RecallStatus::Exhausted);
    }

    #[test]
    fn test_recall_does_not_mutate_inputs() {
        let mut memory = HopfieldMemory::new(3);
        memory.train(&[bv(&[1, -1, 1])]).unwrap();
        let weights = memory.weights().to_vec();
        let state = bv(&[-1, -1, 1]);
        let _ = memory.recall(&state, 10).unwrap();
        assert_eq!(state, bv(&[-1, -1, 1]));
        assert_eq!(memory.weights(), weights.as_slice());
    }

    #[test]
    fn test_zero_size_memory() {
        let mut memory = HopfieldMemory::new(0);
        let empty = bv(&[]);
        memory.train(std::slice::from_ref(&empty)).unwrap();
        let outcome = memory.recall_detailed(&empty, 3).unwrap();
        assert!(outcome.state.is_empty());
        assert!(outcome.converged());
    }

    #[test]
    fn test_outcome_serializes() {
        let outcome = RecallOutcome {
            state: bv(&[1, -1]),
            status: RecallStatus::Converged,
            sweeps: 2,
        };
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["status"], "converged");
        assert_eq!(json["sweeps"], 2);
        assert_eq!(json["state"], serde_json::json!([1, -1]));
    }
}
