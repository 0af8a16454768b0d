use oncall_redirect::{Diagnostic, PlanVerbose, Severity, TimeOfDay, render_table};

mod ansi {
    pub const RESET: &str = "\x1b[0m";
    pub const DIM: &str = "\x1b[2m";
    pub const BOLD: &str = "\x1b[1m";

    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const RED: &str = "\x1b[31m";
    pub const BLUE: &str = "\x1b[34m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GRAY: &str = "\x1b[90m";

    pub struct Palette {
        enabled: bool,
    }

    impl Palette {
        pub fn new(enabled: bool) -> Self {
            Self { enabled }
        }

        pub fn paint(&self, s: impl AsRef<str>, color: &str) -> String {
            if self.enabled { format!("{}{}{}", color, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }

        pub fn bold(&self, s: impl AsRef<str>) -> String {
            if self.enabled { format!("{}{}{}", BOLD, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }

        pub fn dim(&self, s: impl AsRef<str>) -> String {
            if self.enabled { format!("{}{}{}", DIM, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }
    }
}

pub fn print_run(res: &PlanVerbose, now: TimeOfDay, show_edges: bool, color: bool) {
    let palette = ansi::Palette::new(color);
    let plan = &res.plan;

    println!("\n{}", palette.bold(palette.paint(format!("⚙  Annotation: \"{}\"", plan.message.trim()), ansi::CYAN)));
    println!(
        "  {} {} – {}",
        palette.dim("shift:"),
        palette.paint(plan.window.start().to_string(), ansi::YELLOW),
        palette.paint(plan.window.end().to_string(), ansi::YELLOW),
    );

    if !plan.diagnostics.is_empty() {
        println!("\n{}", palette.paint("━━━ Diagnostics ━━━", ansi::GRAY));
        for diagnostic in &plan.diagnostics {
            println!("  {}", fmt_diagnostic(diagnostic, &palette));
        }
    }

    if show_edges {
        println!("\n{}", palette.paint("━━━ Edges ━━━", ansi::GRAY));
        for (idx, edge) in res.details.edges.iter().enumerate() {
            println!("  {} {}", palette.paint(format!("[{}]", idx), ansi::GRAY), palette.paint(edge.to_string(), ansi::BLUE));
        }
        let m = &res.details.extract_metrics;
        println!(
            "  {}",
            palette.dim(format!(
                "clauses {} (skipped {}) │ timeslots {} (skipped {}) │ edges {}",
                m.clauses, m.skipped_clauses, m.fragments, m.skipped_fragments, m.edges
            ))
        );
    }

    println!("\n{}", palette.paint("━━━ Timeline ━━━", ansi::GRAY));
    print!("{}", render_table(&plan.intervals));
    match plan.active_at(now) {
        Some(interval) => println!(
            "\n  {} {} {}",
            palette.dim(format!("active at {now}:")),
            palette.bold(palette.paint(&interval.phone_number, ansi::GREEN)),
            palette.dim(format!("(until {})", interval.end)),
        ),
        None => println!("\n  {}", palette.dim(format!("{now} is outside this shift"))),
    }

    println!("\n{}", palette.paint("━━━ Timing ━━━", ansi::GRAY));
    println!(
        "  Total: {}  │  Extract: {}  │  Resolve: {}",
        palette.paint(format!("{:?}", res.details.total), ansi::GREEN),
        palette.paint(format!("{:?}", res.details.extract), ansi::CYAN),
        palette.dim(format!("{:?}", res.details.resolve)),
    );
    println!();
}

fn fmt_diagnostic(diagnostic: &Diagnostic, palette: &ansi::Palette) -> String {
    let label = match diagnostic.severity() {
        Severity::Error => palette.paint("✗ error:", ansi::RED),
        Severity::Warning => palette.paint("! warning:", ansi::YELLOW),
    };
    format!("{} {}", label, diagnostic)
}
