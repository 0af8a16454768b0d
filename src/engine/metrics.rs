//! Engine run metrics.
//!
//! Counters are collected on every run (they are a handful of integers);
//! timings are only surfaced by the verbose API.

use super::{Extraction, Resolution};
use std::time::Duration;

/// What the extractor saw and what it skipped.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ExtractMetrics {
    /// Non-blank substitution clauses.
    pub clauses: usize,
    /// Clauses dropped for not naming exactly one phone number.
    pub skipped_clauses: usize,
    /// Timeslot fragments in accepted clauses.
    pub fragments: usize,
    /// Fragments that could not be read.
    pub skipped_fragments: usize,
    /// Edges returned, including a synthesized default edge.
    pub edges: usize,
}

/// Stage timings for one run.
#[derive(Debug, Default, Clone, Copy)]
pub struct RunMetrics {
    pub total: Duration,
    pub extract: Duration,
    pub resolve: Duration,
}

/// Both stage outputs bundled with timing information.
#[derive(Debug, Clone)]
pub struct RunResult {
    pub extraction: Extraction,
    pub resolution: Resolution,
    pub metrics: RunMetrics,
}
