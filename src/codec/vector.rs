//! Bipolar vectors: the only value type the network reads and writes.

use std::fmt;
use std::ops::Index;

use serde::{Deserialize, Serialize};

use crate::error::{HopfieldError, Result};

/// Positive spin.
pub const ON: i8 = 1;
/// Negative spin.
pub const OFF: i8 = -1;

/// An ordered sequence whose elements are each exactly +1 or -1.
///
/// The checked constructors are the only way in, so a `BipolarVector`
/// never holds a zero or any other magnitude.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<i8>", into = "Vec<i8>")]
pub struct BipolarVector(Vec<i8>);

impl BipolarVector {
    /// Build a vector, rejecting any element outside {+1, -1}.
    pub fn new(values: Vec<i8>) -> Result<Self> {
        if let Some((index, &value)) = values
            .iter()
            .enumerate()
            .find(|(_, v)| **v != ON && **v != OFF)
        {
            return Err(HopfieldError::InvalidElement { index, value });
        }
        Ok(Self(values))
    }

    /// All elements +1.
    pub fn filled(len: usize) -> Self {
        Self(vec![ON; len])
    }

    /// All elements -1.
    pub fn cleared(len: usize) -> Self {
        Self(vec![OFF; len])
    }

    /// Internal constructor for values already known to be bipolar.
    pub(crate) fn from_spins(values: Vec<i8>) -> Self {
        debug_assert!(values.iter().all(|v| *v == ON || *v == OFF));
        Self(values)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[i8] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = i8> + '_ {
        self.0.iter().copied()
    }

    /// Flip the sign of exactly one element.
    pub fn flip(&mut self, index: usize) -> Result<()> {
        let len = self.0.len();
        let value = self
            .0
            .get_mut(index)
            .ok_or(HopfieldError::IndexOutOfBounds { index, len })?;
        *value = -*value;
        Ok(())
    }

    /// Copy of `self` with one element flipped.
    pub fn flipped(&self, index: usize) -> Result<Self> {
        let mut out = self.clone();
        out.flip(index)?;
        Ok(out)
    }

    /// Number of positions where `self` and `other` differ.
    ///
    /// Vectors of different lengths count the missing tail as differing.
    pub fn hamming_distance(&self, other: &Self) -> usize {
        let common = self
            .0
            .iter()
            .zip(other.0.iter())
            .filter(|(a, b)| a != b)
            .count();
        common + self.0.len().abs_diff(other.0.len())
    }

    pub fn into_inner(self) -> Vec<i8> {
        self.0
    }
}

impl TryFrom<Vec<i8>> for BipolarVector {
    type Error = HopfieldError;

    fn try_from(values: Vec<i8>) -> Result<Self> {
        Self::new(values)
    }
}

impl From<BipolarVector> for Vec<i8> {
    fn from(v: BipolarVector) -> Self {
        v.0
    }
}

impl Index<usize> for BipolarVector {
    type Output = i8;

    fn index(&self, index: usize) -> &i8 {
        &self.0[index]
    }
}

impl fmt::Display for BipolarVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for v in &self.0 {
            f.write_str(if *v == ON { "+" } else { "-" })?;
        }
        Ok(())
    }
}
