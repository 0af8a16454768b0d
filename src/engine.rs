//! Extraction and resolution engine.
//!
//! Turning an annotation into a redirect timeline is a two stage pipeline:
//!
//! ```text
//! message ── extract (extract.rs) ──────────────┐
//!   - split into clauses (grammar.rs)           │
//!   - one phone number per clause               │
//!   - timeslots -> FROM / TILL edges            │
//!   - synthesize the default base edge          │
//!   - sort by (time, FROM < TILL)               v
//!                                        Vec<Edge> (sorted)
//!                                               │
//!             resolve (resolve.rs) ◀────────────┘
//!   - sweep edges over an active stack
//!   - record (time, top of stack) boundaries
//!   - boundaries -> contiguous intervals
//!                                               │
//!                                               v
//!                                        Vec<Interval>
//! ```
//!
//! Both stages are pure: they read only their arguments and return their
//! diagnostics next to their results, so runs for different shifts can happen
//! concurrently without coordination.
//!
//! ## Responsibilities by module
//!
//! - `extract.rs`: the rule extractor. Never fails as a whole; a malformed
//!   clause or fragment is skipped and reported as a [`Diagnostic`].
//! - `resolve.rs`: the priority-stack sweep. Requires sorted input.
//! - `metrics.rs`: counters and stage timings for verbose runs.
//!
//! ## Debugging
//!
//! Every stage logs through `tracing`; run the CLI with
//! `RUST_LOG=oncall_redirect=debug` to see clauses, fragments and edges.
//!
//! [`Diagnostic`]: crate::Diagnostic

#[path = "engine/extract.rs"]
mod extract;
#[path = "engine/metrics.rs"]
mod metrics;
#[path = "engine/resolve.rs"]
mod resolve;
#[cfg(test)]
#[path = "engine/tests.rs"]
mod tests;

pub use extract::{Extraction, extract};
pub use metrics::{ExtractMetrics, RunMetrics, RunResult};
pub use resolve::{Resolution, resolve};

use crate::{Edge, Options, ShiftWindow};
use std::time::Instant;

/// Sort edges by the ordering law: time first, `From` before `Till` at equal
/// times. The sort is stable, so equal keys keep their extraction order.
pub fn sort_edges(edges: &mut [Edge]) {
    edges.sort_by_key(Edge::sort_key);
}

/// Run both stages for one shift and collect stage timings.
pub(crate) fn run_with_metrics(
    window: &ShiftWindow,
    default_number: &str,
    message: &str,
    options: &Options,
) -> RunResult {
    let total_start = Instant::now();
    let extraction = extract(window, default_number, message, options);
    let extract_elapsed = total_start.elapsed();

    let resolve_start = Instant::now();
    let resolution = resolve(&extraction.edges, default_number, window.end());
    let resolve_elapsed = resolve_start.elapsed();

    RunResult {
        extraction,
        resolution,
        metrics: RunMetrics { total: total_start.elapsed(), extract: extract_elapsed, resolve: resolve_elapsed },
    }
}
