use crate::core::chem::adducts::IonMode;
use crate::core::chem::coarseness::CoarsenessLevel;
use crate::engine::error::EngineError;
use thiserror::Error;

/// Hits reported per adduct/charge combination unless overridden; keeps the
/// output manageable for peaks that match many loose-tier formulas.
pub const DEFAULT_MAX_HITS_PER_ADDUCT: usize = 30;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum AnnotationConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
}

/// Which coarseness tiers a search runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelSelection {
    /// A single tier.
    Single(CoarsenessLevel),
    /// Every defined tier, ascending, with cross-tier deduplication.
    All,
}

impl LevelSelection {
    /// The ordered set of levels this selection expands to.
    pub fn resolve(self) -> Vec<CoarsenessLevel> {
        match self {
            LevelSelection::Single(level) => vec![level],
            LevelSelection::All => CoarsenessLevel::ALL.to_vec(),
        }
    }
}

/// A single search invocation: the neutral target mass to match, the relative
/// tolerance, and the coarseness tier(s) to enumerate.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchRequest {
    /// Neutral target mass in daltons. Must be positive.
    pub target_mass: f64,
    /// Maximum allowed deviation in parts per million. Must be positive.
    pub ppm_tolerance: f64,
    pub levels: LevelSelection,
}

impl SearchRequest {
    pub fn new(target_mass: f64, ppm_tolerance: f64, levels: LevelSelection) -> Self {
        Self {
            target_mass,
            ppm_tolerance,
            levels,
        }
    }

    /// Checks the request preconditions. Called by the engine before any
    /// enumeration work starts.
    pub fn validate(&self) -> Result<(), EngineError> {
        if !(self.target_mass > 0.0) {
            return Err(EngineError::InvalidRequest(format!(
                "target mass must be positive, got {}",
                self.target_mass
            )));
        }
        if !(self.ppm_tolerance > 0.0) {
            return Err(EngineError::InvalidRequest(format!(
                "ppm tolerance must be positive, got {}",
                self.ppm_tolerance
            )));
        }
        Ok(())
    }
}

/// Configuration for the peak-annotation workflow.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotationConfig {
    pub ppm_tolerance: f64,
    pub levels: LevelSelection,
    pub mode: IonMode,
    /// Charge states to consider; usually just ±1 for MALDI/ESI spectra.
    pub charges: Vec<i32>,
    pub max_hits_per_adduct: usize,
    /// Whether to apply the cluster-plausibility constraints to engine hits.
    pub apply_cluster_filter: bool,
}

#[derive(Default)]
pub struct AnnotationConfigBuilder {
    ppm_tolerance: Option<f64>,
    levels: Option<LevelSelection>,
    mode: Option<IonMode>,
    charges: Option<Vec<i32>>,
    max_hits_per_adduct: Option<usize>,
    apply_cluster_filter: Option<bool>,
}

impl AnnotationConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ppm_tolerance(mut self, ppm: f64) -> Self {
        self.ppm_tolerance = Some(ppm);
        self
    }
    pub fn levels(mut self, levels: LevelSelection) -> Self {
        self.levels = Some(levels);
        self
    }
    pub fn mode(mut self, mode: IonMode) -> Self {
        self.mode = Some(mode);
        self
    }
    pub fn charges(mut self, charges: Vec<i32>) -> Self {
        self.charges = Some(charges);
        self
    }
    pub fn max_hits_per_adduct(mut self, max_hits: usize) -> Self {
        self.max_hits_per_adduct = Some(max_hits);
        self
    }
    pub fn apply_cluster_filter(mut self, apply: bool) -> Self {
        self.apply_cluster_filter = Some(apply);
        self
    }

    pub fn build(self) -> Result<AnnotationConfig, AnnotationConfigError> {
        let ppm_tolerance = self
            .ppm_tolerance
            .ok_or(AnnotationConfigError::MissingParameter("ppm_tolerance"))?;
        let mode = self.mode.unwrap_or_default();
        let charges = self
            .charges
            .unwrap_or_else(|| mode.default_charges().to_vec());

        Ok(AnnotationConfig {
            ppm_tolerance,
            levels: self
                .levels
                .unwrap_or(LevelSelection::Single(CoarsenessLevel::Moderate)),
            mode,
            charges,
            max_hits_per_adduct: self
                .max_hits_per_adduct
                .unwrap_or(DEFAULT_MAX_HITS_PER_ADDUCT),
            apply_cluster_filter: self.apply_cluster_filter.unwrap_or(true),
        })
    }
}
