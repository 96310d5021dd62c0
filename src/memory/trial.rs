//! Recall-rate trials: how often a stored pattern survives `k` flipped bits.

use rand::seq::index;
use rand::Rng;
use serde::Serialize;
use tracing::info;

use crate::codec::BipolarVector;
use crate::error::{HopfieldError, Result};

use super::network::HopfieldMemory;

/// Aggregate of a batch of corrupt-then-recall runs.
#[derive(Debug, Clone, Serialize)]
pub struct TrialReport {
    pub trials: usize,
    pub flips: usize,
    /// Runs whose recalled state equals the original pattern.
    pub recovered: usize,
    /// Runs that hit the iteration cap without converging.
    pub exhausted: usize,
}

impl TrialReport {
    /// Fraction of runs recovered exactly. 0.0 when no trials ran.
    pub fn recall_rate(&self) -> f64 {
        if self.trials == 0 {
            0.0
        } else {
            self.recovered as f64 / self.trials as f64
        }
    }
}

/// Flip exactly `flips` distinct random elements of `pattern` per trial,
/// recall, and count exact recoveries.
pub fn run_trials<R: Rng + ?Sized>(
    memory: &HopfieldMemory,
    pattern: &BipolarVector,
    flips: usize,
    trials: usize,
    max_iterations: usize,
    rng: &mut R,
) -> Result<TrialReport> {
    if flips > pattern.len() {
        return Err(HopfieldError::TooManyFlips {
            flips,
            len: pattern.len(),
        });
    }

    let mut report = TrialReport {
        trials,
        flips,
        recovered: 0,
        exhausted: 0,
    };

    for _ in 0..trials {
        let mut corrupted = pattern.clone();
        for i in index::sample(rng, pattern.len(), flips) {
            corrupted.flip(i)?;
        }
        let outcome = memory.recall_detailed(&corrupted, max_iterations)?;
        if outcome.state == *pattern {
            report.recovered += 1;
        }
        if !outcome.converged() {
            report.exhausted += 1;
        }
    }

    info!(
        "Trial: {}/{} recovered with {} flips ({} hit the iteration cap)",
        report.recovered, report.trials, flips, report.exhausted
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_zero_flips_always_recovers_stored_pattern() {
        let p = BipolarVector::new(vec![1, -1, 1, -1, 1, 1]).unwrap();
        let mut memory = HopfieldMemory::new(6);
        memory.train(std::slice::from_ref(&p)).unwrap();

        let mut rng = StdRng::seed_from_u64(3);
        let report = run_trials(&memory, &p, 0, 20, 10, &mut rng).unwrap();
        assert_eq!(report.recovered, 20);
        assert_eq!(report.exhausted, 0);
        assert!((report.recall_rate() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_too_many_flips_rejected() {
        let p = BipolarVector::filled(3);
        let memory = HopfieldMemory::new(3);
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(
            run_trials(&memory, &p, 4, 1, 10, &mut rng).unwrap_err(),
            HopfieldError::TooManyFlips { flips: 4, len: 3 }
        );
        // flipping every cell is allowed
        assert!(run_trials(&memory, &p, 3, 1, 10, &mut rng).is_ok());
    }

    #[test]
    fn test_empty_report_rate() {
        let report = TrialReport {
            trials: 0,
            flips: 1,
            recovered: 0,
            exhausted: 0,
        };
        assert_eq!(report.recall_rate(), 0.0);
    }
}
