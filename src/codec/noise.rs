//! Independent per-element sign-flip noise.

use rand::Rng;

use crate::error::{HopfieldError, Result};

use super::vector::BipolarVector;

/// Return a copy of `vector` where each element is flipped with
/// probability `probability`, using one independent draw per element.
pub fn add_noise<R: Rng + ?Sized>(
    vector: &BipolarVector,
    probability: f64,
    rng: &mut R,
) -> Result<BipolarVector> {
    check_probability(probability)?;
    let noisy = vector
        .iter()
        .map(|v| if rng.gen::<f64>() < probability { -v } else { v })
        .collect();
    Ok(BipolarVector::from_spins(noisy))
}

pub(crate) fn check_probability(probability: f64) -> Result<()> {
    if (0.0..=1.0).contains(&probability) {
        Ok(())
    } else {
        Err(HopfieldError::InvalidProbability(probability))
    }
}
