//! Chemistry data for the cluster family handled by the search.
//!
//! The submodules hold, in order of increasing structure: raw element and particle
//! masses ([`elements`]), the search-breadth tiers ([`coarseness`]), the
//! building-block registry with its per-tier coefficient bounds ([`blocks`]), and
//! the ionization adducts used for m/z-to-neutral-mass conversion ([`adducts`]).

pub mod adducts;
pub mod blocks;
pub mod coarseness;
pub mod elements;
