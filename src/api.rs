use crate::engine::{self, ExtractMetrics, Extraction, Resolution};
use crate::error::Result;
use crate::{Diagnostic, Edge, Interval, ShiftWindow, TimeOfDay};
use std::time::Duration;

/// Options that affect extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    /// Emit a TILL edge at the shift end for `ab hh:mm`. The timeline is the
    /// same either way; the edge list is not.
    pub close_open_ended: bool,
    /// Pull annotation times that lie outside the shift onto the nearest
    /// shift boundary (reported as [`Diagnostic::OutsideShift`]).
    pub clamp_to_shift: bool,
}

impl Default for Options {
    fn default() -> Self {
        Options { close_open_ended: true, clamp_to_shift: true }
    }
}

/// The nominal data of one shift, as delivered by the schedule scraper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shift {
    pub start: TimeOfDay,
    pub end: TimeOfDay,
    /// Number to use wherever the annotation says nothing.
    pub default_number: String,
}

impl Shift {
    pub fn new(start: TimeOfDay, end: TimeOfDay, default_number: impl Into<String>) -> Self {
        Shift { start, end, default_number: default_number.into() }
    }

    /// Build a shift from `HH:MM` strings.
    pub fn parse(start: &str, end: &str, default_number: &str) -> Result<Self> {
        Ok(Shift::new(TimeOfDay::parse(start)?, TimeOfDay::parse(end)?, default_number))
    }

    pub fn window(&self) -> ShiftWindow {
        ShiftWindow::new(self.start, self.end)
    }
}

/// Result from [`plan`] and [`plan_with`].
#[derive(Debug, Clone)]
pub struct Plan {
    /// The annotation that was read.
    pub message: String,
    pub window: ShiftWindow,
    /// Contiguous intervals from the shift start to the shift end.
    pub intervals: Vec<Interval>,
    /// Extractor errors and resolver warnings, in that order.
    pub diagnostics: Vec<Diagnostic>,
    /// Total elapsed time.
    pub elapsed: Duration,
}

impl Plan {
    /// The interval covering the clock time `time`, if it falls inside the
    /// shift.
    pub fn active_at(&self, time: TimeOfDay) -> Option<&Interval> {
        let time = self.window.anchor(time);
        self.intervals.iter().find(|interval| interval.contains(time))
    }

    /// Whether part of the annotation had to be ignored.
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }
}

/// Additional details returned by [`plan_verbose_with`].
#[derive(Debug, Clone)]
pub struct PlanDetails {
    /// Sorted edges handed to the resolver.
    pub edges: Vec<Edge>,
    pub extract_metrics: ExtractMetrics,
    pub total: Duration,
    pub extract: Duration,
    pub resolve: Duration,
}

/// Result from [`plan_verbose_with`].
#[derive(Debug, Clone)]
pub struct PlanVerbose {
    pub plan: Plan,
    pub details: PlanDetails,
}

/// Rule extractor entry point: edges for one shift annotation, sorted by the
/// ordering law. Uses default [`Options`].
///
/// # Example
/// ```
/// use oncall_redirect::{TimeOfDay, extract};
///
/// let start = TimeOfDay::parse("08:00").unwrap();
/// let end = TimeOfDay::parse("20:00").unwrap();
/// let out = extract(start, end, "+49767676", "13:00-14:00 +4911111");
/// assert_eq!(out.edges.len(), 3);
/// assert!(out.diagnostics.is_empty());
/// ```
pub fn extract(shift_start: TimeOfDay, shift_end: TimeOfDay, default_number: &str, message: &str) -> Extraction {
    engine::extract(&ShiftWindow::new(shift_start, shift_end), default_number, message, &Options::default())
}

/// Interval resolver entry point. `edges` must be sorted (as returned by
/// [`extract`]) and `shift_end` must be on the edges' timeline, i.e.
/// [`Extraction::window`]`.end()`.
pub fn resolve(edges: &[Edge], default_number: &str, shift_end: TimeOfDay) -> Resolution {
    engine::resolve(edges, default_number, shift_end)
}

/// Extract and resolve `message` for `shift` with default [`Options`].
pub fn plan(shift: &Shift, message: &str) -> Plan {
    plan_with(shift, message, &Options::default())
}

/// Extract and resolve `message` for `shift`.
pub fn plan_with(shift: &Shift, message: &str, options: &Options) -> Plan {
    plan_verbose_with(shift, message, options).plan
}

/// Like [`plan_with`], but also returns the edge list and stage timings.
pub fn plan_verbose_with(shift: &Shift, message: &str, options: &Options) -> PlanVerbose {
    let window = shift.window();
    let run = engine::run_with_metrics(&window, &shift.default_number, message, options);

    let mut diagnostics = run.extraction.diagnostics;
    diagnostics.extend(run.resolution.diagnostics);

    let plan = Plan {
        message: message.to_string(),
        window,
        intervals: run.resolution.intervals,
        diagnostics,
        elapsed: run.metrics.total,
    };
    let details = PlanDetails {
        edges: run.extraction.edges,
        extract_metrics: run.extraction.metrics,
        total: run.metrics.total,
        extract: run.metrics.extract,
        resolve: run.metrics.resolve,
    };

    PlanVerbose { plan, details }
}
