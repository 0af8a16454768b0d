//! Error and diagnostic types.
//!
//! Two kinds of problems exist:
//!
//! - [`Error`] is returned at the API boundary when an input cannot be used at
//!   all (for example a shift boundary that is not a valid `HH:MM` time).
//! - [`Diagnostic`] is a non-fatal finding produced while extracting or
//!   resolving. The offending clause, fragment or edge is skipped and the run
//!   continues; diagnostics are handed back next to the result.

use crate::time_of_day::TimeOfDay;

/// Fatal errors at the API boundary.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A time string could not be read as `HH:MM`.
    #[error("invalid time `{input}`: {reason}")]
    InvalidTime { input: String, reason: &'static str },
}

pub type Result<T> = std::result::Result<T, Error>;

/// How serious a [`Diagnostic`] is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    /// Tolerated; the result is exactly what the annotation asked for.
    Warning,
    /// Part of the annotation was ignored.
    Error,
}

/// A non-fatal problem found in an annotation or an edge list.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Diagnostic {
    /// A substitution clause did not contain exactly one phone number.
    #[error("expected exactly one phone number in `{clause}`, found {found}")]
    Clause { clause: String, found: usize },

    /// A timeslot fragment matched neither `hh:mm - hh:mm` nor `ab/bis hh:mm`.
    #[error("could not read timeslot `{fragment}`: {reason}")]
    Fragment { fragment: String, reason: String },

    /// A time in the annotation lies outside the shift and was moved onto
    /// the nearest shift boundary.
    #[error("time {time} in `{fragment}` lies outside the shift, using {clamped}")]
    OutsideShift { fragment: String, time: TimeOfDay, clamped: TimeOfDay },

    /// A TILL edge found nothing to close on the active stack.
    #[error("nothing to end for {phone_number} at {time}")]
    DanglingTill { time: TimeOfDay, phone_number: String, pair_id: Option<u32> },
}

impl Diagnostic {
    pub fn severity(&self) -> Severity {
        match self {
            Diagnostic::Clause { .. } | Diagnostic::Fragment { .. } => Severity::Error,
            Diagnostic::OutsideShift { .. } | Diagnostic::DanglingTill { .. } => Severity::Warning,
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity() == Severity::Error
    }
}
