mod debug_report;

use chrono::Local;
use oncall_redirect::{Options, Shift, TimeOfDay, plan_verbose_with};
use std::io::{self, IsTerminal, Read};
use tracing_subscriber::EnvFilter;

const DEFAULT_START: &str = "08:00";
const DEFAULT_END: &str = "20:00";

fn main() {
    init_tracing("error");

    let config = match parse_args() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    };

    let res = plan_verbose_with(&config.shift, &config.input, &config.options);
    debug_report::print_run(&res, config.now, config.show_edges, config.color);

    if res.plan.has_errors() {
        std::process::exit(1);
    }
}

/// Diagnostics are printed by the report; `RUST_LOG` turns on engine traces.
fn init_tracing(default_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).with_writer(io::stderr).compact().init();
}

struct CliConfig {
    input: String,
    shift: Shift,
    options: Options,
    now: TimeOfDay,
    show_edges: bool,
    color: bool,
}

fn parse_args() -> Result<CliConfig, String> {
    let mut input: Option<String> = None;
    let mut start = parse_time("--start", DEFAULT_START)?;
    let mut end = parse_time("--end", DEFAULT_END)?;
    let mut default_number: Option<String> = None;
    let mut now = TimeOfDay::from(Local::now().time());
    let mut options = Options::default();
    let mut show_edges = false;
    let mut color = io::stdout().is_terminal();
    let mut args = std::env::args().skip(1);

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            "-V" | "--version" => {
                println!("oncall-redirect {}", env!("CARGO_PKG_VERSION"));
                std::process::exit(0);
            }
            "--color" => color = true,
            "--no-color" => color = false,
            "--edges" => show_edges = true,
            "--keep-open" => options.close_open_ended = false,
            "--no-clamp" => options.clamp_to_shift = false,
            "-s" | "--start" => start = parse_time("--start", &expect_value(&mut args, "--start")?)?,
            "-e" | "--end" => end = parse_time("--end", &expect_value(&mut args, "--end")?)?,
            "--now" => now = parse_time("--now", &expect_value(&mut args, "--now")?)?,
            "-d" | "--default" => default_number = Some(expect_value(&mut args, "--default")?),
            "--" => {
                let rest = args.collect::<Vec<_>>().join(" ");
                if !rest.trim().is_empty() {
                    set_input(&mut input, rest)?;
                }
                break;
            }
            _ if arg.starts_with("--start=") => start = parse_time("--start", arg.trim_start_matches("--start="))?,
            _ if arg.starts_with("--end=") => end = parse_time("--end", arg.trim_start_matches("--end="))?,
            _ if arg.starts_with("--now=") => now = parse_time("--now", arg.trim_start_matches("--now="))?,
            _ if arg.starts_with("--default=") => {
                default_number = Some(arg.trim_start_matches("--default=").to_string());
            }
            _ if arg.starts_with('-') => {
                return Err(format!("error: unknown option '{arg}'"));
            }
            _ => {
                let rest = std::iter::once(arg).chain(args).collect::<Vec<_>>().join(" ");
                set_input(&mut input, rest)?;
                break;
            }
        }
    }

    let default_number = match default_number {
        Some(number) if !number.trim().is_empty() => number,
        _ => return Err(format!("error: --default is required\n\n{}", help_text())),
    };

    // An empty annotation is valid: the whole shift goes to the default number.
    let input = match input {
        Some(value) => value,
        None if io::stdin().is_terminal() => String::new(),
        None => read_stdin_input()?,
    };

    Ok(CliConfig { input, shift: Shift::new(start, end, default_number), options, now, show_edges, color })
}

fn expect_value(args: &mut impl Iterator<Item = String>, flag: &str) -> Result<String, String> {
    args.next().ok_or_else(|| format!("error: {flag} expects a value"))
}

fn set_input(input: &mut Option<String>, value: String) -> Result<(), String> {
    if input.is_some() {
        return Err("error: input provided multiple times".to_string());
    }
    *input = Some(value);
    Ok(())
}

fn read_stdin_input() -> Result<String, String> {
    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer).map_err(|err| format!("error: failed to read stdin: {err}"))?;
    Ok(buffer)
}

fn parse_time(flag: &str, value: &str) -> Result<TimeOfDay, String> {
    TimeOfDay::parse(value).map_err(|err| format!("error: {flag}: {err}"))
}

fn print_help() {
    println!("{}", help_text());
}

fn help_text() -> String {
    format!(
        "oncall-redirect {version}

Resolve a shift annotation into a phone redirect timeline.

Usage:
  oncall-redirect [OPTIONS] --default <number> [--] <annotation...>
  echo '<annotation>' | oncall-redirect [OPTIONS] --default <number>

Annotation format:
  bis 10:00 Uhr +491234; 12:20 - 13:00, 14:00-14:20 und ab 17:00 Uhr +494321
  Clauses are separated by ';' and name exactly one phone number. Timeslots
  within a clause are separated by ',' or 'und'.

Options:
  -d, --default <number>     Number used wherever the annotation says nothing.
  -s, --start <HH:MM>        Shift start. Default: {default_start}
  -e, --end <HH:MM>          Shift end; at or before the start means the shift
                             runs past midnight. Default: {default_end}
  --now <HH:MM>              Time used to mark the active interval.
                             Default: local clock
  --edges                    Also print the extracted edges.
  --keep-open                Do not emit an end edge for 'ab hh:mm'.
  --no-clamp                 Keep times outside the shift instead of moving
                             them onto the nearest shift boundary.
  --color                    Force ANSI color output.
  --no-color                 Disable ANSI color output.
  -h, --help                 Show this help message.
  -V, --version              Print version information.

Environment:
  RUST_LOG                   Engine trace filter, e.g. oncall_redirect=debug.

Exit codes:
  0  Success.
  1  Parts of the annotation were ignored (see diagnostics).
  2  Invalid arguments.
",
        version = env!("CARGO_PKG_VERSION"),
        default_start = DEFAULT_START,
        default_end = DEFAULT_END
    )
}
