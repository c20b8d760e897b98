//! # Workflows Module
//!
//! This module provides the high-level, user-facing entry points of mzscout.
//!
//! ## Overview
//!
//! Workflows tie the chemistry data and the search engine together into
//! complete procedures. The annotation workflow takes an observed m/z value as
//! a chemist would read it off a spectrum, fans it out over the charge states
//! and adducts of the selected ion mode, searches each derived neutral mass,
//! and returns a merged, deduplicated, deviation-ordered list of plausible
//! cluster formulas.
//!
//! - **Peak Annotation** ([`annotate`]) - Single-peak and batch peak-list
//!   annotation across adducts and charge states, with the cluster
//!   plausibility filter applied to raw engine hits.

pub mod annotate;
