//! Rule extraction: annotation text to timeline edges.
//!
//! Each accepted clause contributes edges for its phone number:
//!
//! ```text
//! 13:30 - 14:15   ─▶  FROM 13:30 #n   TILL 14:15 #n     (fresh pair id)
//! bis 12:00       ─▶  FROM <start>    TILL 12:00        (no pair id)
//! ab 17:00        ─▶  FROM 17:00      TILL <end>        (no pair id)
//! ```
//!
//! Open-ended rules carry no pair id so that they, and the synthesized
//! default edge, are told apart from explicit ranges purely by
//! `(phone_number, pair_id)`.

use super::metrics::ExtractMetrics;
use super::sort_edges;
use crate::grammar::{self, Timeslot};
use crate::{Diagnostic, Edge, EdgeKind, Options, ShiftWindow, TimeOfDay};
use tracing::{debug, warn};

/// Extractor output: sorted edges plus everything that was skipped.
#[derive(Debug, Clone)]
pub struct Extraction {
    /// The shift the edges were placed on.
    pub window: ShiftWindow,
    /// Edges sorted by the ordering law.
    pub edges: Vec<Edge>,
    pub diagnostics: Vec<Diagnostic>,
    pub metrics: ExtractMetrics,
}

/// Extract the edges of `message` for one shift.
///
/// Total: malformed clauses and fragments are skipped and reported, the rest
/// of the message is still used. The result always holds a FROM edge at the
/// shift start; when the message provides none, one for `default_number` is
/// added.
pub fn extract(window: &ShiftWindow, default_number: &str, message: &str, options: &Options) -> Extraction {
    let mut edges = Vec::new();
    let mut diagnostics = Vec::new();
    let mut metrics = ExtractMetrics::default();
    let mut next_pair_id: u32 = 1;

    debug!(text = message, start = %window.start(), end = %window.end(), "extracting substitutions");

    for clause in grammar::split_clauses(message) {
        metrics.clauses += 1;

        let numbers = grammar::phone_numbers(clause);
        let [number] = numbers.as_slice() else {
            let diagnostic = Diagnostic::Clause { clause: clause.trim().to_string(), found: numbers.len() };
            warn!("{diagnostic}");
            diagnostics.push(diagnostic);
            metrics.skipped_clauses += 1;
            continue;
        };
        debug!(clause, phone_number = number.text, "found phone number");

        for fragment in grammar::split_timeslots(clause, number) {
            metrics.fragments += 1;

            let slot = match Timeslot::parse(&fragment) {
                Ok(slot) => slot,
                Err(reason) => {
                    let diagnostic = Diagnostic::Fragment { fragment, reason };
                    warn!("{diagnostic}");
                    diagnostics.push(diagnostic);
                    metrics.skipped_fragments += 1;
                    continue;
                }
            };
            debug!(fragment = fragment.as_str(), ?slot, "read timeslot");

            let mut place = |time| place_on_shift(window, options, &fragment, time, &mut diagnostics);
            match slot {
                Timeslot::Range { from, till } => {
                    let (from, till) = (place(from), place(till));
                    if till < from {
                        let reason = format!("range ends at {till} before it starts at {from}");
                        let diagnostic = Diagnostic::Fragment { fragment, reason };
                        warn!("{diagnostic}");
                        diagnostics.push(diagnostic);
                        metrics.skipped_fragments += 1;
                        continue;
                    }
                    let pair_id = Some(next_pair_id);
                    next_pair_id += 1;
                    edges.push(Edge::starting(from, number.text, pair_id));
                    edges.push(Edge::ending(till, number.text, pair_id));
                }
                Timeslot::Until(till) => {
                    let till = place(till);
                    edges.push(Edge::starting(window.start(), number.text, None));
                    edges.push(Edge::ending(till, number.text, None));
                }
                Timeslot::After(from) => {
                    let from = place(from);
                    edges.push(Edge::starting(from, number.text, None));
                    if options.close_open_ended {
                        edges.push(Edge::ending(window.end(), number.text, None));
                    }
                }
            }
        }
    }

    let has_base = edges.iter().any(|edge| edge.kind == EdgeKind::From && edge.time == window.start());
    if !has_base {
        debug!(phone_number = default_number, "no substitution at shift start, adding default");
        edges.push(Edge::starting(window.start(), default_number, None));
    }

    sort_edges(&mut edges);
    metrics.edges = edges.len();

    for edge in &edges {
        debug!(%edge, "edge");
    }

    Extraction { window: *window, edges, diagnostics, metrics }
}

/// Anchor a clock time onto the shift timeline and, if enabled, pull it back
/// inside the shift.
fn place_on_shift(
    window: &ShiftWindow,
    options: &Options,
    fragment: &str,
    time: TimeOfDay,
    diagnostics: &mut Vec<Diagnostic>,
) -> TimeOfDay {
    let anchored = window.anchor(time);
    if !options.clamp_to_shift || window.contains(anchored) {
        return anchored;
    }

    let clamped = window.clamp(anchored);
    let diagnostic = Diagnostic::OutsideShift { fragment: fragment.to_string(), time, clamped };
    warn!("{diagnostic}");
    diagnostics.push(diagnostic);
    clamped
}
