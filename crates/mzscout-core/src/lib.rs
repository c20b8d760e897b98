//! # mzscout Core Library
//!
//! A combinatorial mass-search library for annotating mass-spectrometry peaks of
//! metal-carboxylate cluster families of the general form Yₐ Mn_b (tBuCOO)_c O_d H_e C_f.
//!
//! ## Architectural Philosophy
//!
//! The library is designed with a strict three-layer architecture to ensure a clear
//! separation of concerns, making it modular, testable, and extensible.
//!
//! - **[`core`]: The Foundation.** Contains the stateless chemistry data: monoisotopic
//!   element masses, the building-block table with its per-level coefficient bounds,
//!   and the adduct definitions used to convert observed m/z values to neutral masses.
//!
//! - **[`engine`]: The Logic Core.** Implements the combinatorial search itself: the
//!   lazy cartesian-product enumeration over coefficient ranges, the parts-per-million
//!   tolerance predicate, cross-level deduplication, and result ordering.
//!
//! - **[`workflows`]: The Public API.** The highest-level, user-facing layer. It ties
//!   the `engine` and `core` together to annotate observed peaks across charge states
//!   and adducts, providing a simple entry point for end-users of the library.

pub mod core;
pub mod engine;
pub mod workflows;
