//! Interactive logging loop
//!
//! Each line is either a reading (`HH:MM PPM`, or just `PPM` stamped with the local time)
//! or a command. Rejected readings are reported and the session is left unchanged.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Result;
use chrono::Local;

use co2vent_core::export::export_session;
use co2vent_core::session::Session;

use crate::render;

const HELP: &str = "\
Enter readings as 'HH:MM PPM' or 'PPM' (uses the current time).
Commands: table, chart, reset, export <file.csv|file.json>, help, quit";

/// Words that are never read as a wall clock or concentration
const COMMAND_WORDS: &[&str] = &[
    "table", "t", "chart", "c", "reset", "export", "help", "?", "quit", "exit", "q",
];

#[derive(Debug, Clone, PartialEq)]
enum Line {
    Reading {
        wall_clock: Option<String>,
        concentration: String,
    },
    Table,
    Chart,
    Reset,
    Export(PathBuf),
    Help,
    Quit,
    Empty,
}

fn parse_line(line: &str) -> Line {
    let mut parts = line.split_whitespace();
    let Some(first) = parts.next() else {
        return Line::Empty;
    };
    let rest: Vec<&str> = parts.collect();

    match (first.to_lowercase().as_str(), rest.as_slice()) {
        ("table" | "t", []) => Line::Table,
        ("chart" | "c", []) => Line::Chart,
        ("reset", []) => Line::Reset,
        ("export", [path]) => Line::Export(PathBuf::from(*path)),
        ("quit" | "exit" | "q", []) => Line::Quit,
        // Wrong argument count for a command
        (word, _) if COMMAND_WORDS.contains(&word) => Line::Help,
        (_, [ppm]) => Line::Reading {
            wall_clock: Some(first.to_string()),
            concentration: ppm.to_string(),
        },
        (_, []) => Line::Reading {
            wall_clock: None,
            concentration: first.to_string(),
        },
        _ => Line::Help,
    }
}

fn current_wall_clock() -> String {
    Local::now().format("%H:%M").to_string()
}

/// Run the loop until `quit` or end of input
pub fn run<R: BufRead, W: Write>(
    session: &mut Session,
    mut input: R,
    out: &mut W,
    json: bool,
) -> Result<()> {
    writeln!(out, "{HELP}")?;
    while let Some(line) = read_line(&mut input)? {
        match parse_line(&line) {
            Line::Reading {
                wall_clock,
                concentration,
            } => {
                let wall_clock = wall_clock.unwrap_or_else(current_wall_clock);
                match session.submit_reading(&wall_clock, &concentration) {
                    Ok(m) => {
                        writeln!(
                            out,
                            "{} -> minute {}, {} ppm",
                            m.wall_clock(),
                            m.elapsed_minutes(),
                            m.concentration_ppm()
                        )?;
                        render::write_summary(session, out)?;
                    }
                    Err(e) => writeln!(out, "Error: {e}")?,
                }
            }
            Line::Table => render::write_table(&session.table_rows(), out)?,
            Line::Chart => render::report(session, out, true)?,
            Line::Reset => {
                session.reset();
                writeln!(out, "Session cleared.")?;
            }
            Line::Export(path) => match export_session(&path, session) {
                Ok(format) => writeln!(
                    out,
                    "Exported {} readings to {} ({})",
                    session.len(),
                    path.display(),
                    format.extension()
                )?,
                Err(e) => writeln!(out, "Error: {e}")?,
            },
            Line::Help => writeln!(out, "{HELP}")?,
            Line::Quit => break,
            Line::Empty => {}
        }
    }

    if json {
        render::write_json(session, out)?;
    }
    Ok(())
}

fn read_line<R: BufRead>(input: &mut R) -> io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line))
}
