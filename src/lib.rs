//! TP53 Cancer Resistance Explorer
//!
//! A Rust application for browsing precomputed TP53 comparative-analysis
//! results over human and elephant TP53-like sequences.

pub mod data;

pub use data::*;
