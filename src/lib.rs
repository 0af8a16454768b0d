//! Turns the free-text annotation of an on-call shift into a gap-free,
//! non-overlapping timeline of "this phone number is reachable from A to B"
//! intervals.
//!
//! ```
//! use oncall_redirect::{Shift, plan};
//!
//! let shift = Shift::parse("08:00", "20:00", "+49767676").unwrap();
//! let out = plan(&shift, "bis 12:00 Uhr +491231");
//!
//! let rows: Vec<String> = out.intervals.iter().map(|i| i.to_string()).collect();
//! assert_eq!(rows, ["08:00-12:00 +491231", "12:00-20:00 +49767676"]);
//! ```

#[macro_use]
mod macros;
mod api;
mod engine;
mod error;
mod grammar;
mod table;
mod time_of_day;

pub use api::{Options, Plan, PlanDetails, PlanVerbose, Shift, extract, plan, plan_verbose_with, plan_with, resolve};
pub use engine::{ExtractMetrics, Extraction, Resolution, sort_edges};
pub use error::{Diagnostic, Error, Result, Severity};
pub use table::render_table;
pub use time_of_day::{ShiftWindow, TimeOfDay};

use std::fmt;

// --- Timeline events ----------------------------------------------------------

/// Whether an edge opens or closes a substitution.
///
/// The declaration order is the tie-break of the ordering law: at equal times
/// `From` sorts before `Till`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EdgeKind {
    From,
    Till,
}

/// The identity used to close a substitution: two entries are the same
/// substitution iff both phone number and pair id match.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Substitute {
    pub phone_number: String,
    /// Shared by the FROM/TILL pair of one explicit `hh:mm - hh:mm` range.
    pub pair_id: Option<u32>,
}

impl Substitute {
    pub fn new(phone_number: impl Into<String>, pair_id: Option<u32>) -> Self {
        Substitute { phone_number: phone_number.into(), pair_id }
    }
}

/// One timeline event produced by the extractor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    pub time: TimeOfDay,
    pub kind: EdgeKind,
    pub phone_number: String,
    pub pair_id: Option<u32>,
}

impl Edge {
    pub fn starting(time: TimeOfDay, phone_number: impl Into<String>, pair_id: Option<u32>) -> Self {
        Edge { time, kind: EdgeKind::From, phone_number: phone_number.into(), pair_id }
    }

    pub fn ending(time: TimeOfDay, phone_number: impl Into<String>, pair_id: Option<u32>) -> Self {
        Edge { time, kind: EdgeKind::Till, phone_number: phone_number.into(), pair_id }
    }

    /// Key of the ordering law: time first, `From` before `Till`.
    pub fn sort_key(&self) -> (TimeOfDay, EdgeKind) {
        (self.time, self.kind)
    }

    pub fn substitute(&self) -> Substitute {
        Substitute::new(self.phone_number.clone(), self.pair_id)
    }

    /// Substitution equality against an active-stack entry.
    pub fn matches(&self, entry: &Substitute) -> bool {
        self.pair_id == entry.pair_id && self.phone_number == entry.phone_number
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.kind {
            EdgeKind::From => "from",
            EdgeKind::Till => "till",
        };
        write!(f, "{} {} {}", self.time, kind, self.phone_number)?;
        if let Some(pair) = self.pair_id {
            write!(f, " #{pair}")?;
        }
        Ok(())
    }
}

// --- Resolved output ------------------------------------------------------------

/// A half-open `[start, end)` span during which `phone_number` is reachable.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Interval {
    pub start: TimeOfDay,
    pub end: TimeOfDay,
    pub phone_number: String,
}

impl Interval {
    pub fn new(start: TimeOfDay, end: TimeOfDay, phone_number: impl Into<String>) -> Self {
        Interval { start, end, phone_number: phone_number.into() }
    }

    pub fn contains(&self, time: TimeOfDay) -> bool {
        self.start <= time && time < self.end
    }

    pub fn duration_minutes(&self) -> u16 {
        self.end.minutes().saturating_sub(self.start.minutes())
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{} {}", self.start, self.end, self.phone_number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(s: &str) -> TimeOfDay {
        TimeOfDay::parse(s).unwrap()
    }

    #[test]
    fn from_sorts_before_till_at_equal_time() {
        let till = Edge::ending(t("12:00"), "+4911111", None);
        let from = Edge::starting(t("12:00"), "+4922222", None);
        assert!(from.sort_key() < till.sort_key());
        assert!(till.sort_key() < Edge::starting(t("12:01"), "+4911111", None).sort_key());
    }

    #[test]
    fn matching_needs_number_and_pair() {
        let edge = Edge::ending(t("14:00"), "+4911111", Some(2));
        assert!(edge.matches(&Substitute::new("+4911111", Some(2))));
        assert!(!edge.matches(&Substitute::new("+4911111", Some(1))));
        assert!(!edge.matches(&Substitute::new("+4911111", None)));
        assert!(!edge.matches(&Substitute::new("+4922222", Some(2))));

        let open = Edge::ending(t("14:00"), "+4911111", None);
        assert!(open.matches(&Substitute::new("+4911111", None)));
    }

    #[test]
    fn interval_is_half_open() {
        let interval = Interval::new(t("08:00"), t("12:00"), "+491231");
        assert!(interval.contains(t("08:00")));
        assert!(interval.contains(t("11:59")));
        assert!(!interval.contains(t("12:00")));
        assert_eq!(interval.duration_minutes(), 240);
    }

    #[test]
    fn edge_display_includes_pair() {
        assert_eq!(Edge::starting(t("9:30"), "+4911111", Some(3)).to_string(), "09:30 from +4911111 #3");
        assert_eq!(Edge::ending(t("10:00"), "+4911111", None).to_string(), "10:00 till +4911111");
    }
}
