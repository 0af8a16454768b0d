use crate::{Diagnostic, Edge, EdgeKind, Interval, Options, ShiftWindow, TimeOfDay, sort_edges};

use super::{extract, resolve};

const DEFAULT: &str = "+49767676";

fn t(s: &str) -> TimeOfDay {
    TimeOfDay::parse(s).unwrap()
}

fn run(start: &str, end: &str, message: &str) -> (Vec<Interval>, Vec<Diagnostic>) {
    let window = ShiftWindow::new(t(start), t(end));
    let extraction = extract(&window, DEFAULT, message, &Options::default());
    let resolution = resolve(&extraction.edges, DEFAULT, window.end());
    let mut diagnostics = extraction.diagnostics;
    diagnostics.extend(resolution.diagnostics);
    (resolution.intervals, diagnostics)
}

fn rows(intervals: &[Interval]) -> Vec<String> {
    intervals.iter().map(|interval| interval.to_string()).collect()
}

fn assert_covers(intervals: &[Interval], window: &ShiftWindow, message: &str) {
    assert!(!intervals.is_empty(), "no intervals for `{message}`");
    assert_eq!(intervals[0].start, window.start(), "first start for `{message}`");
    assert_eq!(intervals[intervals.len() - 1].end, window.end(), "last end for `{message}`");
    for interval in intervals {
        assert!(interval.start < interval.end, "empty interval {interval} for `{message}`");
    }
    for pair in intervals.windows(2) {
        assert_eq!(pair[0].end, pair[1].start, "gap or overlap for `{message}`");
    }
}

#[test]
fn annotated_example_resolves_to_expected_timeline() {
    let message = "bis 12:00 Uhr +491231; ab 17:00 Uhr +467898; 13:30 Uhr - 14:15 Uhr, 14:30-14:45, ab 16:00 Uhr +472892; 16:00-16:20 +4934623";
    let (intervals, diagnostics) = run("08:00", "20:00", message);

    assert_eq!(
        rows(&intervals),
        [
            "08:00-12:00 +491231",
            "12:00-13:30 +49767676",
            "13:30-14:15 +472892",
            "14:15-14:30 +49767676",
            "14:30-14:45 +472892",
            "14:45-16:00 +49767676",
            "16:00-16:20 +4934623",
            "16:20-17:00 +472892",
            "17:00-20:00 +467898",
        ]
    );
    assert!(diagnostics.is_empty());
}

#[test]
fn annotated_example_extracts_expected_edges() {
    let message = "bis 12:00 Uhr +491231; ab 17:00 Uhr +467898; 13:30 Uhr - 14:15 Uhr, 14:30-14:45, ab 16:00 Uhr +472892; 16:00-16:20 +4934623";
    let window = ShiftWindow::new(t("08:00"), t("20:00"));
    let out = extract(&window, DEFAULT, message, &Options::default());

    let expected = vec![
        Edge::starting(t("08:00"), "+491231", None),
        Edge::ending(t("12:00"), "+491231", None),
        Edge::starting(t("13:30"), "+472892", Some(1)),
        Edge::ending(t("14:15"), "+472892", Some(1)),
        Edge::starting(t("14:30"), "+472892", Some(2)),
        Edge::ending(t("14:45"), "+472892", Some(2)),
        Edge::starting(t("16:00"), "+472892", None),
        Edge::starting(t("16:00"), "+4934623", Some(3)),
        Edge::ending(t("16:20"), "+4934623", Some(3)),
        Edge::starting(t("17:00"), "+467898", None),
        Edge::ending(t("20:00"), "+467898", None),
        Edge::ending(t("20:00"), "+472892", None),
    ];
    assert_eq!(out.edges, expected);
}

#[test]
fn empty_message_uses_default_for_whole_shift() {
    for message in ["", "   ", ";"] {
        let (intervals, diagnostics) = run("08:00", "20:00", message);
        assert_eq!(intervals, vec![Interval::new(t("08:00"), t("20:00"), DEFAULT)], "message `{message}`");
        assert!(diagnostics.is_empty());
    }

    let (intervals, diagnostics) = run("08:00", "20:00", "bis 12:00 +4911111;");
    assert_eq!(rows(&intervals), ["08:00-12:00 +4911111", "12:00-20:00 +49767676"]);
    assert!(diagnostics.is_empty());
}

#[test]
fn und_glued_to_a_time_keeps_both_timeslots() {
    let (intervals, diagnostics) = run("08:00", "20:00", "10:00-11:00und 12:00-13:00 +4911111");
    assert_eq!(
        rows(&intervals),
        [
            "08:00-10:00 +49767676",
            "10:00-11:00 +4911111",
            "11:00-12:00 +49767676",
            "12:00-13:00 +4911111",
            "13:00-20:00 +49767676",
        ]
    );
    assert!(diagnostics.is_empty());
}

#[test]
fn unread_text_after_a_timeslot_is_reported() {
    let (intervals, diagnostics) = run("08:00", "20:00", "10:00-11:00 12:00-13:00 +4911111");
    assert_eq!(intervals, vec![Interval::new(t("08:00"), t("20:00"), DEFAULT)]);
    assert!(matches!(
        diagnostics.as_slice(),
        [Diagnostic::Fragment { fragment, .. }] if fragment == "10:00-11:00 12:00-13:00"
    ));
}

#[test]
fn fully_malformed_message_degrades_to_default() {
    let (intervals, diagnostics) = run("08:00", "20:00", "Herr Meier übernimmt; irgendwann später");
    assert_eq!(intervals, vec![Interval::new(t("08:00"), t("20:00"), DEFAULT)]);
    assert_eq!(diagnostics.len(), 2);
}

#[test]
fn nested_override_falls_back_to_enclosing_substitute() {
    let (intervals, _) = run("08:00", "20:00", "ab 09:00 +4911111; 13:00-14:00 +4922222");
    assert_eq!(
        rows(&intervals),
        ["08:00-09:00 +49767676", "09:00-13:00 +4911111", "13:00-14:00 +4922222", "14:00-20:00 +4911111"]
    );
}

#[test]
fn closing_one_pair_keeps_the_other_active() {
    let (intervals, diagnostics) = run("08:00", "20:00", "09:00-11:00 und 10:00-12:00 +4911111; 09:30-13:00 +4922222");
    assert_eq!(
        rows(&intervals),
        [
            "08:00-09:00 +49767676",
            "09:00-09:30 +4911111",
            "09:30-10:00 +4922222",
            "10:00-11:00 +4911111",
            "11:00-12:00 +4911111",
            "12:00-13:00 +4922222",
            "13:00-20:00 +49767676",
        ]
    );
    assert!(diagnostics.is_empty());
}

#[test]
fn malformed_clause_changes_nothing_but_diagnostics() {
    let good = "bis 12:00 +4911111";
    let (clean, clean_diagnostics) = run("08:00", "20:00", good);
    let (noisy, noisy_diagnostics) = run("08:00", "20:00", "bis 12:00 +4911111; ab 15:00 +4922222 oder +4933333");

    assert_eq!(clean, noisy);
    assert!(clean_diagnostics.is_empty());
    assert_eq!(noisy_diagnostics.len(), 1);
    assert!(matches!(&noisy_diagnostics[0], Diagnostic::Clause { found: 2, .. }));
}

#[test]
fn night_shift_resolves_across_midnight() {
    let (intervals, diagnostics) = run("20:00", "08:00", "23:00-01:30 +4911111; ab 06:00 +4922222");
    assert_eq!(
        rows(&intervals),
        ["20:00-23:00 +49767676", "23:00-01:30 +4911111", "01:30-06:00 +49767676", "06:00-08:00 +4922222"]
    );
    assert!(diagnostics.is_empty());
}

#[test]
fn full_day_shift_ends_at_midnight() {
    let (intervals, _) = run("00:00", "24:00", "ab 22:00 +4911111");
    assert_eq!(rows(&intervals), ["00:00-22:00 +49767676", "22:00-24:00 +4911111"]);
}

#[test]
fn outside_times_keep_the_timeline_inside_the_shift() {
    let (intervals, diagnostics) = run("08:00", "20:00", "06:00-09:00 +4911111; ab 21:00 +4922222");
    assert_eq!(rows(&intervals), ["08:00-09:00 +4911111", "09:00-20:00 +49767676"]);
    assert_eq!(diagnostics.iter().filter(|d| matches!(d, Diagnostic::OutsideShift { .. })).count(), 2);
}

#[test]
fn every_message_covers_the_shift() {
    let messages = [
        "",
        "bis 12:00 +4911111",
        "ab 12:00 +4911111",
        "08:00-20:00 +4911111",
        "ab 08:00 +4911111; bis 20:00 +4922222",
        "12:00-12:00 +4911111",
        "10:00-11:00 und 10:00-11:00 +4911111",
        "ab 10:00, bis 9:00 +4911111; 09:00-18:00 +4922222; 11:00 - 12:00 uhr +4933333",
        "bis 07:00 +4911111; ab 23:00 +4922222",
        "15:00-14:00 +4911111; quatsch",
        "ab 10:00 +4911111 +4922222",
        "9:15 - 9:45 und ab 19:59 Uhr +4911111",
    ];
    for (start, end) in [("08:00", "20:00"), ("20:00", "08:00"), ("00:00", "24:00"), ("06:30", "06:30")] {
        let window = ShiftWindow::new(t(start), t(end));
        for message in messages {
            let (intervals, _) = run(start, end, message);
            assert_covers(&intervals, &window, message);
        }
    }
}

#[test]
fn sorting_is_idempotent() {
    let window = ShiftWindow::new(t("08:00"), t("20:00"));
    let out = extract(&window, DEFAULT, "ab 16:00 +4911111; 16:00-16:20 +4922222; bis 16:00 +4933333", &Options::default());

    let mut resorted = out.edges.clone();
    sort_edges(&mut resorted);
    assert_eq!(resorted, out.edges);
}

#[test]
fn sort_keeps_from_before_till_and_relative_order() {
    let mut edges = vec![
        Edge::starting(t("08:00"), "0", Some(1)),
        Edge::ending(t("08:00"), "1", Some(2)),
        Edge::starting(t("08:00"), "2", Some(3)),
    ];
    sort_edges(&mut edges);
    let numbers: Vec<&str> = edges.iter().map(|edge| edge.phone_number.as_str()).collect();
    assert_eq!(numbers, ["0", "2", "1"]);
    assert_eq!(edges[2].kind, EdgeKind::Till);
}

#[test]
fn sort_orders_by_time_then_kind() {
    let mut edges = vec![
        Edge::starting(t("09:42"), "0", Some(1)),
        Edge::ending(t("09:37"), "1", Some(3)),
        Edge::ending(t("10:00"), "2", Some(2)),
        Edge::starting(t("09:37"), "3", Some(3)),
    ];
    sort_edges(&mut edges);
    let numbers: Vec<&str> = edges.iter().map(|edge| edge.phone_number.as_str()).collect();
    assert_eq!(numbers, ["3", "1", "0", "2"]);
}
