use std::fmt;
use thiserror::Error;

/// Search-breadth tiers controlling how wide a coefficient range is enumerated
/// per building block.
///
/// Levels are ordered from narrowest to widest: `Strict` assumes chemically
/// common stoichiometries, `Loose` widens the ranges for exploratory searches
/// at higher computational cost. The numeric codes (1, 2, 3) are the values
/// accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CoarsenessLevel {
    Strict = 1,
    Moderate = 2,
    Loose = 3,
}

/// Error for coarseness level codes outside the defined set.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("Coarseness level code must be 1, 2, or 3, got {0}")]
pub struct UnknownLevelCode(pub u8);

impl CoarsenessLevel {
    /// All defined levels in ascending strictness-relaxation order. "Scan all"
    /// searches run them in this order so cheap tiers are tried first.
    pub const ALL: [CoarsenessLevel; 3] = [
        CoarsenessLevel::Strict,
        CoarsenessLevel::Moderate,
        CoarsenessLevel::Loose,
    ];

    /// The numeric code exposed on the CLI surface.
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Human-readable tier name.
    pub fn label(self) -> &'static str {
        match self {
            CoarsenessLevel::Strict => "strict",
            CoarsenessLevel::Moderate => "moderate",
            CoarsenessLevel::Loose => "loose",
        }
    }
}

impl TryFrom<u8> for CoarsenessLevel {
    type Error = UnknownLevelCode;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(CoarsenessLevel::Strict),
            2 => Ok(CoarsenessLevel::Moderate),
            3 => Ok(CoarsenessLevel::Loose),
            other => Err(UnknownLevelCode(other)),
        }
    }
}

impl fmt::Display for CoarsenessLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
