use crate::core::chem::blocks::BuildingBlockTable;
use crate::core::chem::coarseness::CoarsenessLevel;
use crate::engine::config::SearchRequest;
use crate::engine::enumeration::{CoefficientGrid, candidate_count};
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use std::collections::HashSet;
use tracing::{debug, info, instrument};

/// Candidates enumerated between two progress reports.
const PROGRESS_BATCH: u64 = 4096;

/// Inclusive parts-per-million tolerance predicate.
pub fn within_ppm(mass: f64, target: f64, ppm: f64) -> bool {
    (mass - target).abs() <= target * ppm * 1e-6
}

/// A candidate formula whose computed mass matched the target within tolerance.
///
/// Immutable once constructed; `coefficients` is ordered like the block table
/// that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    pub coefficients: Vec<u32>,
    pub computed_mass: f64,
    /// Signed relative error, (computed − target) / target × 10⁶.
    pub ppm_error: f64,
    /// The strictest coarseness level that discovered this candidate.
    pub level: CoarsenessLevel,
}

impl SearchResult {
    /// Absolute deviation in parts per million; the primary sort key.
    pub fn deviation_ppm(&self) -> f64 {
        self.ppm_error.abs()
    }
}

/// Enumerates coefficient tuples within the block table's bounds and selects
/// those whose mass matches the request target within tolerance.
///
/// The engine borrows the table and owns nothing else, so one table can serve
/// any number of engines and searches concurrently.
pub struct FormulaSearchEngine<'a> {
    table: &'a BuildingBlockTable,
}

impl<'a> FormulaSearchEngine<'a> {
    pub fn new(table: &'a BuildingBlockTable) -> Self {
        Self { table }
    }

    /// Runs a search without progress reporting.
    pub fn search(&self, request: &SearchRequest) -> Result<Vec<SearchResult>, EngineError> {
        self.search_with_progress(request, &ProgressReporter::new())
    }

    /// Runs a search, emitting one phase per coarseness level and batched
    /// candidate-count advances.
    ///
    /// Results are sorted ascending by absolute ppm deviation, ties broken by
    /// the coefficient tuple in block order. When several levels are scanned,
    /// a tuple rediscovered at a wider tier keeps its first (strictest)
    /// attribution and appears exactly once.
    #[instrument(
        skip_all,
        name = "formula_search",
        fields(target = request.target_mass, ppm = request.ppm_tolerance)
    )]
    pub fn search_with_progress(
        &self,
        request: &SearchRequest,
        reporter: &ProgressReporter,
    ) -> Result<Vec<SearchResult>, EngineError> {
        request.validate()?;

        let levels = request.levels.resolve();
        let multi_level = levels.len() > 1;
        let mut seen: HashSet<Vec<u32>> = HashSet::new();
        let mut results = Vec::new();

        for level in levels {
            let bounds = self.table.bounds(level)?;
            let total = candidate_count(bounds);
            reporter.report(Progress::PhaseStart {
                name: level.label(),
            });
            reporter.report(Progress::TaskStart { total_steps: total });
            debug!(
                level = level.label(),
                candidates = total,
                "Enumerating coefficient grid"
            );

            let mut pending = 0u64;
            let mut hits_at_level = 0usize;
            for coefficients in CoefficientGrid::new(bounds) {
                pending += 1;
                if pending == PROGRESS_BATCH {
                    reporter.report(Progress::TaskAdvance { steps: pending });
                    pending = 0;
                }

                let computed_mass = self.table.mass_of(&coefficients);
                if !within_ppm(computed_mass, request.target_mass, request.ppm_tolerance) {
                    continue;
                }
                if multi_level && !seen.insert(coefficients.clone()) {
                    continue;
                }

                let ppm_error =
                    (computed_mass - request.target_mass) / request.target_mass * 1e6;
                hits_at_level += 1;
                results.push(SearchResult {
                    coefficients,
                    computed_mass,
                    ppm_error,
                    level,
                });
            }

            if pending > 0 {
                reporter.report(Progress::TaskAdvance { steps: pending });
            }
            reporter.report(Progress::TaskFinish);
            reporter.report(Progress::PhaseFinish);
            debug!(level = level.label(), hits = hits_at_level, "Level finished");
        }

        results.sort_by(|a, b| {
            a.deviation_ppm()
                .total_cmp(&b.deviation_ppm())
                .then_with(|| a.coefficients.cmp(&b.coefficients))
        });
        info!(hits = results.len(), "Search complete");
        Ok(results)
    }
}
