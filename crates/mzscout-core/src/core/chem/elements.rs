use phf::{Map, phf_map};

/// Monoisotopic mass of ⁸⁹Y in daltons.
pub const MASS_Y: f64 = 88.90584;
/// Monoisotopic mass of ¹³⁹La in daltons.
pub const MASS_LA: f64 = 138.90547;
/// Monoisotopic mass of ⁵⁵Mn in daltons.
pub const MASS_MN: f64 = 54.938044;
/// Monoisotopic mass of ¹⁶O in daltons.
pub const MASS_O: f64 = 15.99491461957;
/// Monoisotopic mass of the neutral ¹H atom in daltons.
pub const MASS_H: f64 = 1.00782503223;
/// Mass of ¹²C in daltons (exact by definition).
pub const MASS_C: f64 = 12.0;
/// Monoisotopic mass of ¹⁹F in daltons.
pub const MASS_F: f64 = 18.998403163;
/// Monoisotopic mass of ¹⁴N in daltons.
pub const MASS_N: f64 = 14.00307400443;

/// Monoisotopic mass of the tert-butyl carboxylate group (pivalate, C5H9O2),
/// assembled from its constituent elements.
pub const MASS_TBUCOO: f64 = 5.0 * MASS_C + 9.0 * MASS_H + 2.0 * MASS_O;

/// Mass of the proton (H⁺) in daltons, used for [M−H]⁻ and [M+H]⁺ arithmetic.
pub const PROTON: f64 = 1.00727646688;
/// Mass of the ³⁵Cl⁻ chloride in daltons.
pub const CL35: f64 = 34.968852682;
/// Mass of ²³Na in daltons.
pub const NA23: f64 = 22.98976928;
/// Mass of ³⁹K in daltons.
pub const K39: f64 = 38.96370649;
/// Mass of the ammonium group (N + 4H) in daltons.
pub const NH4: f64 = MASS_N + 4.0 * MASS_H;

static ELEMENT_MASSES: Map<&'static str, f64> = phf_map! {
    "Y" => MASS_Y,
    "La" => MASS_LA,
    "Mn" => MASS_MN,
    "O" => MASS_O,
    "H" => MASS_H,
    "C" => MASS_C,
    "F" => MASS_F,
    "N" => MASS_N,
    "tBuCOO" => MASS_TBUCOO,
};

/// Looks up the monoisotopic mass of a named element or group.
///
/// Returns `None` for symbols outside the cluster chemistry handled here; callers
/// loading user-defined block tables surface that as a validation error.
pub fn element_mass(symbol: &str) -> Option<f64> {
    ELEMENT_MASSES.get(symbol.trim()).copied()
}
