use super::coarseness::CoarsenessLevel;
use super::elements::{
    self, MASS_C, MASS_H, MASS_LA, MASS_MN, MASS_O, MASS_TBUCOO, MASS_Y,
};
use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use thiserror::Error;

/// A named mass-contributing unit of the cluster family.
///
/// Blocks are immutable and registered once per table; the order of the block
/// sequence fixes the position of each coefficient in every candidate tuple
/// produced by the search engine.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildingBlock {
    /// Element or group symbol (e.g., "Y", "Mn", "tBuCOO").
    pub name: String,
    /// Monoisotopic mass in daltons. Always positive.
    pub mass: f64,
}

/// Inclusive coefficient range searched for one block at one coarseness level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoefficientRange {
    pub min: u32,
    pub max: u32,
}

impl CoefficientRange {
    pub fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    /// Number of integer coefficients in the range.
    pub fn span(self) -> u64 {
        u64::from(self.max - self.min) + 1
    }

    pub fn contains(self, value: u32) -> bool {
        self.min <= value && value <= self.max
    }
}

/// Metal bases supported by the built-in cluster tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Metal {
    #[default]
    Y,
    La,
}

impl Metal {
    pub fn symbol(self) -> &'static str {
        match self {
            Metal::Y => "Y",
            Metal::La => "La",
        }
    }

    fn mass(self) -> f64 {
        match self {
            Metal::Y => MASS_Y,
            Metal::La => MASS_LA,
        }
    }
}

impl fmt::Display for Metal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Error raised when a table is asked for bounds it does not define.
///
/// The built-in tables define all three levels; user-loaded tables may omit
/// level sections, and the omission only surfaces when that level is requested.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("No coefficient bounds defined for coarseness level '{0}'")]
    MissingLevelBounds(CoarsenessLevel),
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum TableValidationError {
    #[error("Table must define at least one building block")]
    NoBlocks,

    #[error("Table must define bounds for at least one coarseness level")]
    NoLevels,

    #[error("Unknown element or group symbol '{0}' and no explicit mass given")]
    UnknownElement(String),

    #[error("Unknown coarseness level name '{0}' (expected strict, moderate, or loose)")]
    UnknownLevelName(String),

    #[error("Block '{name}' must have a positive mass, got {mass}")]
    NonPositiveMass { name: String, mass: f64 },

    #[error(
        "Bounds for level '{level}' list {found} range(s) but the table has {expected} block(s)"
    )]
    MisalignedBounds {
        level: CoarsenessLevel,
        expected: usize,
        found: usize,
    },

    #[error("Range for block '{name}' at level '{level}' has min {min} > max {max}")]
    InvertedRange {
        name: String,
        level: CoarsenessLevel,
        min: u32,
        max: u32,
    },
}

#[derive(Debug, Error)]
pub enum TableLoadError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("TOML parsing error for '{path}': {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },

    #[error("Invalid table in '{path}': {source}")]
    Invalid {
        path: String,
        source: TableValidationError,
    },
}

#[derive(Debug, Deserialize)]
struct RawTable {
    blocks: Vec<RawBlock>,
    levels: HashMap<String, Vec<[u32; 2]>>,
}

#[derive(Debug, Deserialize)]
struct RawBlock {
    name: String,
    #[serde(default)]
    element: Option<String>,
    #[serde(default)]
    mass: Option<f64>,
}

/// The fixed, ordered registry of building blocks and their coarseness-dependent
/// coefficient bounds.
///
/// A table is constructed once (built-in via [`BuildingBlockTable::for_metal`],
/// or from a TOML file via [`BuildingBlockTable::load`]) and is read-only
/// afterwards, so it can be shared freely across concurrent searches.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildingBlockTable {
    blocks: Vec<BuildingBlock>,
    bounds: HashMap<CoarsenessLevel, Vec<CoefficientRange>>,
}

impl BuildingBlockTable {
    /// Builds a table from explicit blocks and per-level bounds, validating that
    /// every bound list aligns positionally with the block list and that each
    /// range satisfies `min <= max`.
    pub fn new(
        blocks: Vec<BuildingBlock>,
        bounds: HashMap<CoarsenessLevel, Vec<CoefficientRange>>,
    ) -> Result<Self, TableValidationError> {
        if blocks.is_empty() {
            return Err(TableValidationError::NoBlocks);
        }
        if bounds.is_empty() {
            return Err(TableValidationError::NoLevels);
        }
        for block in &blocks {
            if block.mass <= 0.0 {
                return Err(TableValidationError::NonPositiveMass {
                    name: block.name.clone(),
                    mass: block.mass,
                });
            }
        }
        for (&level, ranges) in &bounds {
            if ranges.len() != blocks.len() {
                return Err(TableValidationError::MisalignedBounds {
                    level,
                    expected: blocks.len(),
                    found: ranges.len(),
                });
            }
            for (block, range) in blocks.iter().zip(ranges) {
                if range.min > range.max {
                    return Err(TableValidationError::InvertedRange {
                        name: block.name.clone(),
                        level,
                        min: range.min,
                        max: range.max,
                    });
                }
            }
        }
        Ok(Self { blocks, bounds })
    }

    /// The built-in table for the Yₐ/Laₐ Mn_b (tBuCOO)_c O_d H_e C_f family.
    ///
    /// Oxygen, hydrogen, and carbon allowances widen from `Strict` to `Loose`;
    /// the metal, manganese, and pivalate ranges are common to all tiers.
    pub fn for_metal(metal: Metal) -> Self {
        let blocks = vec![
            BuildingBlock {
                name: metal.symbol().to_string(),
                mass: metal.mass(),
            },
            BuildingBlock {
                name: "Mn".to_string(),
                mass: MASS_MN,
            },
            BuildingBlock {
                name: "tBuCOO".to_string(),
                mass: MASS_TBUCOO,
            },
            BuildingBlock {
                name: "O".to_string(),
                mass: MASS_O,
            },
            BuildingBlock {
                name: "H".to_string(),
                mass: MASS_H,
            },
            BuildingBlock {
                name: "C".to_string(),
                mass: MASS_C,
            },
        ];

        let tier = |o_max: u32, h_max: u32, c_max: u32| {
            vec![
                CoefficientRange::new(0, 2),
                CoefficientRange::new(0, 5),
                CoefficientRange::new(0, 11),
                CoefficientRange::new(0, o_max),
                CoefficientRange::new(0, h_max),
                CoefficientRange::new(0, c_max),
            ]
        };

        let mut bounds = HashMap::new();
        bounds.insert(CoarsenessLevel::Strict, tier(5, 0, 0));
        bounds.insert(CoarsenessLevel::Moderate, tier(7, 4, 2));
        bounds.insert(CoarsenessLevel::Loose, tier(10, 10, 5));

        Self { blocks, bounds }
    }

    /// Loads a table from a TOML file.
    ///
    /// Each `[[blocks]]` entry names a block and gives either an explicit `mass`
    /// or an `element` symbol resolved against the built-in element masses (the
    /// block name itself is tried when both are omitted). The `[levels]` table
    /// maps tier names to one inclusive `[min, max]` pair per block.
    pub fn load(path: &Path) -> Result<Self, TableLoadError> {
        let content = std::fs::read_to_string(path).map_err(|e| TableLoadError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        let raw: RawTable = toml::from_str(&content).map_err(|e| TableLoadError::Toml {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;

        Self::from_raw(raw).map_err(|e| TableLoadError::Invalid {
            path: path.to_string_lossy().to_string(),
            source: e,
        })
    }

    fn from_raw(raw: RawTable) -> Result<Self, TableValidationError> {
        let mut blocks = Vec::with_capacity(raw.blocks.len());
        for entry in raw.blocks {
            let mass = match (entry.mass, entry.element.as_deref()) {
                (Some(mass), _) => mass,
                (None, Some(symbol)) => elements::element_mass(symbol)
                    .ok_or_else(|| TableValidationError::UnknownElement(symbol.to_string()))?,
                (None, None) => elements::element_mass(&entry.name)
                    .ok_or_else(|| TableValidationError::UnknownElement(entry.name.clone()))?,
            };
            blocks.push(BuildingBlock {
                name: entry.name,
                mass,
            });
        }

        let mut bounds = HashMap::new();
        for (name, ranges) in raw.levels {
            let level = CoarsenessLevel::ALL
                .into_iter()
                .find(|level| level.label() == name)
                .ok_or_else(|| TableValidationError::UnknownLevelName(name.clone()))?;
            let ranges = ranges
                .into_iter()
                .map(|[min, max]| CoefficientRange::new(min, max))
                .collect();
            bounds.insert(level, ranges);
        }

        Self::new(blocks, bounds)
    }

    /// The fixed, ordered block list. Never empty; stable across calls.
    pub fn blocks(&self) -> &[BuildingBlock] {
        &self.blocks
    }

    /// The inclusive coefficient ranges searched at `level`, positionally
    /// aligned with [`blocks`](Self::blocks).
    pub fn bounds(&self, level: CoarsenessLevel) -> Result<&[CoefficientRange], ConfigError> {
        self.bounds
            .get(&level)
            .map(Vec::as_slice)
            .ok_or(ConfigError::MissingLevelBounds(level))
    }

    /// Total mass of a coefficient assignment, Σ coefficientᵢ × massᵢ.
    pub fn mass_of(&self, coefficients: &[u32]) -> f64 {
        self.blocks
            .iter()
            .zip(coefficients)
            .map(|(block, &n)| f64::from(n) * block.mass)
            .sum()
    }

    /// Renders a coefficient tuple as a subscripted formula string, e.g.
    /// `Y1Mn2(tBuCOO)3O4H0C0`. Multi-character group names are parenthesized.
    pub fn formula(&self, coefficients: &[u32]) -> String {
        let mut out = String::new();
        for (block, &n) in self.blocks.iter().zip(coefficients) {
            if block.name.chars().count() > 2 {
                out.push('(');
                out.push_str(&block.name);
                out.push(')');
            } else {
                out.push_str(&block.name);
            }
            out.push_str(&n.to_string());
        }
        out
    }
}

impl Default for BuildingBlockTable {
    fn default() -> Self {
        Self::for_metal(Metal::Y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn built_in_table_has_six_blocks_in_fixed_order() {
        let table = BuildingBlockTable::for_metal(Metal::Y);
        let names: Vec<&str> = table.blocks().iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, ["Y", "Mn", "tBuCOO", "O", "H", "C"]);
    }

    #[test]
    fn lanthanum_table_swaps_the_metal_block() {
        let table = BuildingBlockTable::for_metal(Metal::La);
        assert_eq!(table.blocks()[0].name, "La");
        assert!((table.blocks()[0].mass - 138.90547).abs() < 1e-9);
    }

    #[test]
    fn bounds_align_with_blocks_for_every_level() {
        let table = BuildingBlockTable::default();
        for level in CoarsenessLevel::ALL {
            let bounds = table.bounds(level).unwrap();
            assert_eq!(bounds.len(), table.blocks().len());
        }
    }

    #[test]
    fn bounds_widen_monotonically_from_strict_to_loose() {
        let table = BuildingBlockTable::default();
        let strict = table.bounds(CoarsenessLevel::Strict).unwrap().to_vec();
        let moderate = table.bounds(CoarsenessLevel::Moderate).unwrap().to_vec();
        let loose = table.bounds(CoarsenessLevel::Loose).unwrap().to_vec();

        for ((s, m), l) in strict.iter().zip(&moderate).zip(&loose) {
            assert!(m.min <= s.min && s.max <= m.max);
            assert!(l.min <= m.min && m.max <= l.max);
        }
    }

    #[test]
    fn mass_of_computes_the_weighted_sum() {
        let table = BuildingBlockTable::default();
        // 1×Y + 2×O
        let mass = table.mass_of(&[1, 0, 0, 2, 0, 0]);
        assert!((mass - (88.90584 + 2.0 * 15.99491461957)).abs() < 1e-9);
    }

    #[test]
    fn formula_parenthesizes_multi_character_groups() {
        let table = BuildingBlockTable::default();
        assert_eq!(table.formula(&[1, 2, 3, 4, 5, 6]), "Y1Mn2(tBuCOO)3O4H5C6");
        assert_eq!(table.formula(&[0, 0, 0, 0, 0, 0]), "Y0Mn0(tBuCOO)0O0H0C0");
    }

    #[test]
    fn new_rejects_empty_block_list() {
        let mut bounds = HashMap::new();
        bounds.insert(CoarsenessLevel::Strict, vec![]);
        let result = BuildingBlockTable::new(vec![], bounds);
        assert_eq!(result.unwrap_err(), TableValidationError::NoBlocks);
    }

    #[test]
    fn new_rejects_misaligned_bounds() {
        let blocks = vec![BuildingBlock {
            name: "Y".to_string(),
            mass: 88.91,
        }];
        let mut bounds = HashMap::new();
        bounds.insert(
            CoarsenessLevel::Strict,
            vec![CoefficientRange::new(0, 1), CoefficientRange::new(0, 1)],
        );
        let result = BuildingBlockTable::new(blocks, bounds);
        assert!(matches!(
            result.unwrap_err(),
            TableValidationError::MisalignedBounds {
                level: CoarsenessLevel::Strict,
                expected: 1,
                found: 2,
            }
        ));
    }

    #[test]
    fn new_rejects_inverted_ranges() {
        let blocks = vec![BuildingBlock {
            name: "Y".to_string(),
            mass: 88.91,
        }];
        let mut bounds = HashMap::new();
        bounds.insert(CoarsenessLevel::Strict, vec![CoefficientRange::new(3, 1)]);
        let result = BuildingBlockTable::new(blocks, bounds);
        assert!(matches!(
            result.unwrap_err(),
            TableValidationError::InvertedRange { min: 3, max: 1, .. }
        ));
    }

    #[test]
    fn new_rejects_non_positive_masses() {
        let blocks = vec![BuildingBlock {
            name: "X".to_string(),
            mass: 0.0,
        }];
        let mut bounds = HashMap::new();
        bounds.insert(CoarsenessLevel::Strict, vec![CoefficientRange::new(0, 1)]);
        let result = BuildingBlockTable::new(blocks, bounds);
        assert!(matches!(
            result.unwrap_err(),
            TableValidationError::NonPositiveMass { .. }
        ));
    }

    #[test]
    fn missing_level_bounds_surface_as_config_error() {
        let blocks = vec![BuildingBlock {
            name: "Y".to_string(),
            mass: 88.91,
        }];
        let mut bounds = HashMap::new();
        bounds.insert(CoarsenessLevel::Strict, vec![CoefficientRange::new(0, 2)]);
        let table = BuildingBlockTable::new(blocks, bounds).unwrap();

        assert!(table.bounds(CoarsenessLevel::Strict).is_ok());
        assert_eq!(
            table.bounds(CoarsenessLevel::Loose),
            Err(ConfigError::MissingLevelBounds(CoarsenessLevel::Loose))
        );
    }

    #[test]
    fn load_succeeds_with_valid_toml() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("table.toml");
        let mut file = File::create(&file_path).unwrap();
        writeln!(
            file,
            r#"
            [[blocks]]
            name = "Y"

            [[blocks]]
            name = "O"
            element = "O"

            [[blocks]]
            name = "pivalate"
            mass = 101.0602545

            [levels]
            strict = [[0, 2], [0, 5], [0, 11]]
            loose = [[0, 3], [0, 8], [0, 11]]
            "#
        )
        .unwrap();

        let table = BuildingBlockTable::load(&file_path).unwrap();
        assert_eq!(table.blocks().len(), 3);
        assert!((table.blocks()[0].mass - 88.90584).abs() < 1e-9);
        assert!((table.blocks()[1].mass - 15.99491461957).abs() < 1e-9);
        assert_eq!(table.bounds(CoarsenessLevel::Strict).unwrap().len(), 3);
        assert!(table.bounds(CoarsenessLevel::Moderate).is_err());
    }

    #[test]
    fn load_propagates_io_errors_for_missing_files() {
        let result = BuildingBlockTable::load(Path::new("/nonexistent/table.toml"));
        assert!(matches!(result.unwrap_err(), TableLoadError::Io { .. }));
    }

    #[test]
    fn load_reports_toml_syntax_errors() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("broken.toml");
        std::fs::write(&file_path, "blocks = not valid toml [").unwrap();
        let result = BuildingBlockTable::load(&file_path);
        assert!(matches!(result.unwrap_err(), TableLoadError::Toml { .. }));
    }

    #[test]
    fn load_rejects_unknown_element_symbols() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("unknown.toml");
        std::fs::write(
            &file_path,
            r#"
            [[blocks]]
            name = "Zz"

            [levels]
            strict = [[0, 1]]
            "#,
        )
        .unwrap();
        let result = BuildingBlockTable::load(&file_path);
        assert!(matches!(
            result.unwrap_err(),
            TableLoadError::Invalid {
                source: TableValidationError::UnknownElement(_),
                ..
            }
        ));
    }

    #[test]
    fn coefficient_range_span_and_contains() {
        let range = CoefficientRange::new(2, 5);
        assert_eq!(range.span(), 4);
        assert!(range.contains(2));
        assert!(range.contains(5));
        assert!(!range.contains(1));
        assert!(!range.contains(6));
    }
}
