//! Reference pattern library: three 5×5 glyphs.

use crate::codec::BipolarVector;
use crate::error::{HopfieldError, Result};

/// Side length of the reference glyphs.
pub const GRID_SIDE: usize = 5;
/// Neuron count for a memory trained on the reference library.
pub const PATTERN_SIZE: usize = GRID_SIDE * GRID_SIDE;

#[rustfmt::skip]
const X: [i8; PATTERN_SIZE] = [
     1, -1, -1, -1,  1,
    -1,  1, -1,  1, -1,
    -1, -1,  1, -1, -1,
    -1,  1, -1,  1, -1,
     1, -1, -1, -1,  1,
];

#[rustfmt::skip]
const O: [i8; PATTERN_SIZE] = [
     1,  1,  1,  1,  1,
     1, -1, -1, -1,  1,
     1, -1, -1, -1,  1,
     1, -1, -1, -1,  1,
     1,  1,  1,  1,  1,
];

#[rustfmt::skip]
const PLUS: [i8; PATTERN_SIZE] = [
    -1, -1,  1, -1, -1,
    -1, -1,  1, -1, -1,
     1,  1,  1,  1,  1,
    -1, -1,  1, -1, -1,
    -1, -1,  1, -1, -1,
];

/// One of the shipped glyphs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferencePattern {
    X,
    O,
    Plus,
}

impl ReferencePattern {
    /// Library order.
    pub const ALL: [ReferencePattern; 3] = [Self::X, Self::O, Self::Plus];

    pub fn name(self) -> &'static str {
        match self {
            Self::X => "x",
            Self::O => "o",
            Self::Plus => "plus",
        }
    }

    /// Case-insensitive lookup; `+` is accepted for `plus`.
    pub fn from_name(name: &str) -> Result<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "x" => Ok(Self::X),
            "o" => Ok(Self::O),
            "plus" | "+" => Ok(Self::Plus),
            _ => Err(HopfieldError::UnknownPattern(name.to_string())),
        }
    }

    pub fn vector(self) -> BipolarVector {
        let cells = match self {
            Self::X => &X,
            Self::O => &O,
            Self::Plus => &PLUS,
        };
        BipolarVector::from_spins(cells.to_vec())
    }
}

/// X, O and + in that order.
pub fn reference_library() -> Vec<BipolarVector> {
    ReferencePattern::ALL.iter().map(|p| p.vector()).collect()
}
