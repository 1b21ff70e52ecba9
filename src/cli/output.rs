//! Rendering of command outcomes to a terminal

use std::io::{self, Write};

use serde_json::Value;

use crate::shell::catalog::CommandKind;
use crate::shell::completion::Suggestion;
use crate::shell::dispatcher::Output;
use crate::shell::interrupt::Interrupt;

/// Space between table and pair columns
const GUTTER: &str = "   ";

/// Write `output` from `command` to `out`. Streams are written and
/// flushed line by line so followed logs show up as they arrive, and stop
/// early once `interrupt` is raised. Only pull and build streams carry
/// JSON progress messages.
pub fn render<W: Write>(
    output: Output,
    command: Option<CommandKind>,
    interrupt: &Interrupt,
    out: &mut W,
) -> io::Result<()> {
    match output {
        Output::Nothing => {}
        Output::Lines(lines) => {
            for line in lines {
                writeln!(out, "{line}")?;
            }
        }
        Output::Pairs(pairs) => {
            let width = pairs.iter().map(|(key, _)| key.chars().count()).max().unwrap_or(0);
            for (key, value) in pairs {
                writeln!(out, "{key:<width$}{GUTTER}{value}")?;
            }
        }
        Output::Table { headers, rows } => write_table(&headers, &rows, out)?,
        Output::Documents(documents) => {
            for document in documents {
                match document {
                    Value::String(text) => writeln!(out, "{text}")?,
                    other => writeln!(out, "{}", serde_json::to_string_pretty(&other)?)?,
                }
            }
        }
        Output::Stream(stream) => {
            let progress = matches!(command, Some(CommandKind::Pull | CommandKind::Build));
            for line in stream {
                if interrupt.is_raised() {
                    break;
                }
                let line = if progress {
                    match progress_line(&line) {
                        Some(line) => line,
                        None => continue,
                    }
                } else {
                    line
                };
                writeln!(out, "{line}")?;
                out.flush()?;
            }
        }
        Output::Clear => {
            write!(out, "\x1b[2J\x1b[H")?;
        }
    }
    out.flush()
}

fn write_table<W: Write>(headers: &[String], rows: &[Vec<String>], out: &mut W) -> io::Result<()> {
    let mut widths: Vec<usize> = headers.iter().map(|header| header.chars().count()).collect();
    for row in rows {
        for (column, value) in row.iter().enumerate() {
            let width = value.chars().count();
            match widths.get_mut(column) {
                Some(current) => *current = (*current).max(width),
                None => widths.push(width),
            }
        }
    }

    let format_row = |cells: &[String]| {
        let last = cells.len().saturating_sub(1);
        cells
            .iter()
            .enumerate()
            .map(|(column, value)| {
                if column == last {
                    value.clone()
                } else {
                    format!("{value:<width$}", width = widths[column])
                }
            })
            .collect::<Vec<_>>()
            .join(GUTTER)
    };

    writeln!(out, "{}", format_row(headers))?;
    for row in rows {
        writeln!(out, "{}", format_row(row.as_slice()))?;
    }
    Ok(())
}

/// Pull and build report progress as JSON objects, one per line. Show the
/// readable part; anything else passes through as it is.
pub fn progress_line(line: &str) -> Option<String> {
    let Ok(Value::Object(message)) = serde_json::from_str::<Value>(line) else {
        return Some(line.to_string());
    };

    if let Some(error) = message.get("error").and_then(Value::as_str) {
        return Some(error.to_string());
    }
    if let Some(stream) = message.get("stream").and_then(Value::as_str) {
        let stream = stream.trim_end();
        return (!stream.is_empty()).then(|| stream.to_string());
    }

    let Some(status) = message.get("status").and_then(Value::as_str) else {
        return Some(line.to_string());
    };
    let mut text = match message.get("id").and_then(Value::as_str) {
        Some(id) => format!("{id}: {status}"),
        None => status.to_string(),
    };
    if let Some(progress) = message.get("progress").and_then(Value::as_str) {
        text.push(' ');
        text.push_str(progress);
    }
    Some(text)
}

/// Completion candidates, one per line, with their labels when present
pub fn render_suggestions<W: Write>(suggestions: &[Suggestion], out: &mut W) -> io::Result<()> {
    for suggestion in suggestions {
        match &suggestion.display {
            Some(display) => writeln!(out, "{}{GUTTER}{display}", suggestion.text)?,
            None => writeln!(out, "{}", suggestion.text)?,
        }
    }
    out.flush()
}
