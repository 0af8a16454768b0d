//! Plain-text rendering of a redirect timeline, as posted to the chat front
//! end:
//!
//! ```text
//! |Start| End |  Phone  |
//! |-----|-----|---------|
//! |08:00|12:00|+491231  |
//! |12:00|20:00|+49767676|
//! ```

use crate::Interval;
use std::fmt::Write;

const PHONE_HEADER: &str = "Phone";

/// Render intervals as a fixed-width table. The phone column is as wide as
/// the longest number (at least as wide as its header).
pub fn render_table(intervals: &[Interval]) -> String {
    let width = intervals.iter().map(|interval| interval.phone_number.chars().count()).max().unwrap_or(0);
    let width = width.max(PHONE_HEADER.len());
    let slack = width - PHONE_HEADER.len();
    let (left, right) = (slack.div_ceil(2), slack / 2);

    let mut out = String::new();
    let _ = writeln!(out, "|Start| End |{}{PHONE_HEADER}{}|", " ".repeat(left), " ".repeat(right));
    let _ = writeln!(out, "|-----|-----|{}|", "-".repeat(width));
    for interval in intervals {
        let _ = writeln!(out, "|{}|{}|{:<width$}|", interval.start, interval.end, interval.phone_number);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TimeOfDay;

    fn t(s: &str) -> TimeOfDay {
        TimeOfDay::parse(s).unwrap()
    }

    #[test]
    fn pads_phone_column_to_longest_number() {
        let intervals =
            [Interval::new(t("08:00"), t("12:00"), "+491231"), Interval::new(t("12:00"), t("20:00"), "+49767676")];
        let expected = "\
|Start| End |  Phone  |
|-----|-----|---------|
|08:00|12:00|+491231  |
|12:00|20:00|+49767676|
";
        assert_eq!(render_table(&intervals), expected);
    }

    #[test]
    fn odd_slack_leans_left() {
        let intervals = [Interval::new(t("08:00"), t("20:00"), "+4912345")];
        assert!(render_table(&intervals).starts_with("|Start| End |  Phone |\n"));
    }

    #[test]
    fn empty_timeline_renders_header_only() {
        assert_eq!(render_table(&[]), "|Start| End |Phone|\n|-----|-----|-----|\n");
    }
}
