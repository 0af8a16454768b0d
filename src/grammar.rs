//! Tokenizer for the shift annotation mini-language.
//!
//! ```text
//! "bis 10:00 Uhr +491234; 12:20 - 13:00, 14:00-14:20 und ab 17:00 Uhr +494321"
//!  └──── clause ────────┘ └───────────────── clause ─────────────────────────┘
//!                          └ timeslot ──┘ └ timeslot ─┘    └ timeslot ─┘
//! ```
//!
//! - Clauses are separated by `;` and name exactly one phone number.
//! - Timeslots are separated by `,` or the word `und`.
//! - A timeslot is `hh:mm [uhr] - hh:mm [uhr]`, `bis hh:mm` or `ab hh:mm`.
//!
//! Matching is case-insensitive and whitespace around punctuation is ignored.

use crate::time_of_day::TimeOfDay;
use std::ops::Range;

/// Split a message into its substitution clauses. Blank clauses (an empty
/// message, a trailing `;`) are dropped.
pub(crate) fn split_clauses(message: &str) -> impl Iterator<Item = &str> {
    message.split(';').filter(|clause| !clause.trim().is_empty())
}

/// A phone number token inside a clause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PhoneToken<'a> {
    pub text: &'a str,
    /// Byte range of the number (without the preceding whitespace).
    pub span: Range<usize>,
}

/// Every candidate phone number in `clause`: five or more digits, optionally
/// prefixed with `+`, preceded by whitespace.
pub(crate) fn phone_numbers(clause: &str) -> Vec<PhoneToken<'_>> {
    regex!(r"\s(\+?\d{5,})")
        .captures_iter(clause)
        .filter_map(|caps| caps.get(1))
        .map(|m| PhoneToken { text: m.as_str(), span: m.range() })
        .collect()
}

/// Split a clause into timeslot fragments. The clause's phone number is cut
/// out first, so a fragment holding nothing but the number disappears instead
/// of being reported as unreadable.
pub(crate) fn split_timeslots(clause: &str, number: &PhoneToken<'_>) -> Vec<String> {
    let mut stripped = String::with_capacity(clause.len());
    stripped.push_str(&clause[..number.span.start]);
    stripped.push(' ');
    stripped.push_str(&clause[number.span.end..]);

    let mut fragments = Vec::new();
    let mut rest = 0;
    for separator in separators(&stripped) {
        fragments.push(&stripped[rest..separator.start]);
        rest = separator.end;
    }
    fragments.push(&stripped[rest..]);

    fragments.into_iter().map(str::trim).filter(|fragment| !fragment.is_empty()).map(str::to_string).collect()
}

/// `,` always separates. `und` separates unless it is part of a longer word
/// (`Stunde`); digits or punctuation next to it are fine (`11:00und 12:00`).
fn separators(text: &str) -> impl Iterator<Item = Range<usize>> + '_ {
    regex!(r"(?i)und|,")
        .find_iter(text)
        .filter(move |m| {
            let glued_before = text[..m.start()].chars().next_back().is_some_and(char::is_alphabetic);
            let glued_after = text[m.end()..].chars().next().is_some_and(char::is_alphabetic);
            m.as_str() == "," || !(glued_before || glued_after)
        })
        .map(|m| m.range())
}

/// One parsed timeslot fragment, in raw clock times.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Timeslot {
    /// `hh:mm - hh:mm`
    Range { from: TimeOfDay, till: TimeOfDay },
    /// `bis hh:mm`: from the start of the shift until the given time.
    Until(TimeOfDay),
    /// `ab hh:mm`: from the given time until the end of the shift.
    After(TimeOfDay),
}

impl Timeslot {
    /// Try the range shape first, then the open-ended one. The whole fragment
    /// must be consumed. The error is a human readable reason.
    pub(crate) fn parse(fragment: &str) -> Result<Self, String> {
        let range = regex!(r"(?i)^\s*(\d{1,2}:\d{2})\s*(?:uhr)?\s*-\s*(\d{1,2}:\d{2})\s*(?:uhr)?");
        if let Some(caps) = range.captures(fragment) {
            expect_end(fragment, caps.get(0).map_or(0, |m| m.end()))?;
            return Ok(Timeslot::Range { from: clock(&caps[1])?, till: clock(&caps[2])? });
        }

        let open = regex!(r"(?i)^\s*(bis|ab)\s*(\d{1,2}:\d{2})\s*(?:uhr)?");
        if let Some(caps) = open.captures(fragment) {
            expect_end(fragment, caps.get(0).map_or(0, |m| m.end()))?;
            let time = clock(&caps[2])?;
            return Ok(if caps[1].eq_ignore_ascii_case("bis") { Timeslot::Until(time) } else { Timeslot::After(time) });
        }

        Err("expected `hh:mm - hh:mm`, `ab hh:mm` or `bis hh:mm`".to_string())
    }
}

fn expect_end(fragment: &str, matched: usize) -> Result<(), String> {
    match fragment[matched..].trim() {
        "" => Ok(()),
        rest => Err(format!("unexpected `{rest}` after timeslot")),
    }
}

fn clock(text: &str) -> Result<TimeOfDay, String> {
    TimeOfDay::parse(text).map_err(|err| err.to_string())
}
