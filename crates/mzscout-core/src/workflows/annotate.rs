use crate::core::chem::blocks::BuildingBlockTable;
use crate::engine::config::{AnnotationConfig, SearchRequest};
use crate::engine::error::EngineError;
use crate::engine::progress::ProgressReporter;
use crate::engine::search::{FormulaSearchEngine, SearchResult};
use tracing::{debug, info, instrument};

/// One accepted formula assignment for an observed peak.
#[derive(Debug, Clone, PartialEq)]
pub struct PeakAnnotation {
    /// The observed m/z value this annotation explains.
    pub mz: f64,
    pub charge: i32,
    pub adduct: &'static str,
    /// The neutral mass derived from m/z, charge, and adduct.
    pub neutral_mass: f64,
    /// Rendered formula string, e.g. `Y1Mn4(tBuCOO)7O2H0C0`.
    pub formula: String,
    pub hit: SearchResult,
}

/// Chemical-plausibility constraints for metal-carboxylate cluster formulas.
///
/// The constraints mirror what a chemist would reject on sight: a cluster needs
/// at least one metal center, at least one oxygen donor (free oxide or
/// carboxylate), and enough oxygen donors to coordinate its metals (each
/// carboxylate contributes two). Block positions are resolved by name, and each
/// rule only applies when the table actually carries the blocks it mentions, so
/// custom tables outside the cluster chemistry pass through unfiltered.
#[derive(Debug, Clone)]
pub struct ClusterFilter {
    metal_indices: Vec<usize>,
    ligand_index: Option<usize>,
    oxygen_index: Option<usize>,
}

impl ClusterFilter {
    const METAL_NAMES: [&'static str; 3] = ["Y", "La", "Mn"];

    pub fn for_table(table: &BuildingBlockTable) -> Self {
        let position = |name: &str| {
            table
                .blocks()
                .iter()
                .position(|block| block.name == name)
        };

        Self {
            metal_indices: Self::METAL_NAMES
                .iter()
                .copied()
                .filter_map(&position)
                .collect(),
            ligand_index: position("tBuCOO"),
            oxygen_index: position("O"),
        }
    }

    pub fn admits(&self, coefficients: &[u32]) -> bool {
        let count = |index: Option<usize>| {
            index
                .and_then(|i| coefficients.get(i))
                .copied()
                .unwrap_or(0)
        };

        let metals: u32 = self
            .metal_indices
            .iter()
            .filter_map(|&i| coefficients.get(i))
            .sum();
        let ligand = count(self.ligand_index);
        let oxygen = count(self.oxygen_index);

        if !self.metal_indices.is_empty() && metals == 0 {
            return false;
        }
        if (self.ligand_index.is_some() || self.oxygen_index.is_some())
            && ligand == 0
            && oxygen == 0
        {
            return false;
        }
        if ligand > 0 && 2 * ligand + oxygen < metals {
            return false;
        }
        true
    }
}

/// Annotates a single observed peak.
///
/// For every configured charge state and every adduct of the configured ion
/// mode, the observed m/z is converted to a neutral candidate mass, the engine
/// searches it at the configured coarseness selection, and the surviving hits
/// are tagged with their ionization context. Results across all adduct/charge
/// combinations are merged and sorted by absolute ppm deviation.
#[instrument(skip_all, name = "annotate_peak", fields(mz))]
pub fn annotate_peak(
    table: &BuildingBlockTable,
    mz: f64,
    config: &AnnotationConfig,
    reporter: &ProgressReporter,
) -> Result<Vec<PeakAnnotation>, EngineError> {
    if !(mz > 0.0) {
        return Err(EngineError::InvalidRequest(format!(
            "m/z value must be positive, got {mz}"
        )));
    }

    let engine = FormulaSearchEngine::new(table);
    let filter = config
        .apply_cluster_filter
        .then(|| ClusterFilter::for_table(table));
    let mut annotations = Vec::new();

    for &charge in &config.charges {
        for adduct in config.mode.adducts() {
            let neutral_mass = adduct.neutral_mass(mz, charge);
            if neutral_mass <= 0.0 {
                debug!(
                    adduct = adduct.name,
                    charge, "Skipping adduct with non-positive neutral mass"
                );
                continue;
            }

            let request = SearchRequest::new(neutral_mass, config.ppm_tolerance, config.levels);
            let hits = engine.search_with_progress(&request, reporter)?;

            let mut kept = 0usize;
            for hit in hits {
                if let Some(filter) = &filter {
                    if !filter.admits(&hit.coefficients) {
                        continue;
                    }
                }
                if kept == config.max_hits_per_adduct {
                    break;
                }
                kept += 1;
                annotations.push(PeakAnnotation {
                    mz,
                    charge,
                    adduct: adduct.name,
                    neutral_mass,
                    formula: table.formula(&hit.coefficients),
                    hit,
                });
            }
        }
    }

    sort_annotations(&mut annotations);
    info!(mz, hits = annotations.len(), "Peak annotated");
    Ok(annotations)
}

/// Annotates a list of peaks, e.g. an exported centroid list, returning the
/// flattened annotations ordered by absolute ppm deviation across all peaks.
#[instrument(skip_all, name = "annotate_peaks", fields(peaks = peaks.len()))]
pub fn annotate_peaks(
    table: &BuildingBlockTable,
    peaks: &[f64],
    config: &AnnotationConfig,
    reporter: &ProgressReporter,
) -> Result<Vec<PeakAnnotation>, EngineError> {
    let mut annotations = Vec::new();
    for &mz in peaks {
        annotations.extend(annotate_peak(table, mz, config, reporter)?);
    }
    sort_annotations(&mut annotations);
    Ok(annotations)
}

fn sort_annotations(annotations: &mut [PeakAnnotation]) {
    annotations.sort_by(|a, b| {
        a.hit
            .deviation_ppm()
            .total_cmp(&b.hit.deviation_ppm())
            .then_with(|| a.hit.coefficients.cmp(&b.hit.coefficients))
    });
}
