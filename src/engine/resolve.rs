//! Interval resolution: sorted edges to a contiguous redirect timeline.
//!
//! The sweep keeps an *active stack* of substitutions. The top of the stack is
//! the number that is reachable right now:
//!
//! ```text
//! edge            stack (top right)            boundary
//! ─────────────   ──────────────────────────   ─────────────
//! (start)         [D]
//! 08:00 FROM D    [D, D]                       08:00 -> D
//! 09:00 FROM A    [D, D, A]                    09:00 -> A
//! 13:00 FROM B#1  [D, D, A, B#1]               13:00 -> B
//! 14:00 TILL B#1  [D, D, A]                    14:00 -> A
//! 20:00 TILL A    [D, D]                       20:00 -> D
//! ```
//!
//! A FROM shadows whatever was active without removing it, so when an
//! override ends the timeline falls back to the substitution declared before
//! it rather than to the default number. A TILL removes the entry nearest the
//! top that is substitution-equal to it (same number and pair id).
//!
//! Boundaries become intervals by pairing each boundary with the next one's
//! time (the last with the shift end); zero-width intervals are dropped.

use crate::{Diagnostic, Edge, EdgeKind, Interval, Substitute, TimeOfDay};
use tracing::{debug, warn};

/// Resolver output.
#[derive(Debug, Clone)]
pub struct Resolution {
    pub intervals: Vec<Interval>,
    /// Only ever warnings (TILL edges with nothing to close).
    pub diagnostics: Vec<Diagnostic>,
}

/// Resolve sorted edges into intervals ending at `shift_end`.
///
/// `edges` must be sorted by [`Edge::sort_key`] (see [`sort_edges`]) and
/// `shift_end` must be on the same timeline as the edges, for example
/// [`ShiftWindow::end`]. Unsorted input is a caller bug; debug builds panic on
/// it, release builds return an unspecified timeline.
///
/// [`sort_edges`]: crate::sort_edges
/// [`ShiftWindow::end`]: crate::ShiftWindow::end
pub fn resolve(edges: &[Edge], default_number: &str, shift_end: TimeOfDay) -> Resolution {
    debug_assert!(edges.is_sorted_by_key(Edge::sort_key), "edges must be sorted by (time, FROM before TILL)");

    let mut stack = vec![Substitute::new(default_number, None)];
    let mut boundaries: Vec<(TimeOfDay, String)> = Vec::with_capacity(edges.len());
    let mut diagnostics = Vec::new();

    for edge in edges {
        match edge.kind {
            EdgeKind::From => stack.push(edge.substitute()),
            EdgeKind::Till => match stack.iter().rposition(|entry| edge.matches(entry)) {
                Some(idx) => {
                    stack.remove(idx);
                }
                None => {
                    let diagnostic = Diagnostic::DanglingTill {
                        time: edge.time,
                        phone_number: edge.phone_number.clone(),
                        pair_id: edge.pair_id,
                    };
                    warn!("{diagnostic}");
                    diagnostics.push(diagnostic);
                }
            },
        }

        // The sentinel can only be removed by a TILL for the default number
        // itself; the default stays reachable in that case.
        let active = stack.last().map_or(default_number, |entry| entry.phone_number.as_str());
        debug!(%edge, active, depth = stack.len(), "applied edge");
        boundaries.push((edge.time, active.to_string()));
    }

    let mut intervals = Vec::with_capacity(boundaries.len());
    let mut points = boundaries.into_iter().peekable();
    while let Some((start, phone_number)) = points.next() {
        let end = points.peek().map_or(shift_end, |(time, _)| *time);
        if start < end {
            intervals.push(Interval { start, end, phone_number });
        }
    }

    Resolution { intervals, diagnostics }
}
