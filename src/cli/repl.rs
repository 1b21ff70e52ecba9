//! The interactive read loop

use std::io::{self, BufRead, Write};

use tracing::{debug, warn};

use crate::cli::output::{render, render_suggestions};
use crate::shell::completion::Completer;
use crate::shell::dispatcher::{Dispatcher, Refresh};
use crate::shell::interrupt::Interrupt;

const PROMPT: &str = "skiff> ";

/// A line ending in `?` lists completions for what precedes it
const SUGGEST_MARKER: char = '?';

/// Dispatcher plus the completion cache it keeps current
pub struct Shell {
    dispatcher: Dispatcher,
    completer: Completer,
    interrupt: Interrupt,
}

impl Shell {
    pub fn new(dispatcher: Dispatcher, completer: Completer) -> Self {
        Self {
            dispatcher,
            completer,
            interrupt: Interrupt::new(),
        }
    }

    /// Stop streams when `interrupt` is raised
    pub fn with_interrupt(mut self, interrupt: Interrupt) -> Self {
        self.interrupt = interrupt;
        self
    }

    /// Fill every completion list before the first prompt
    pub fn prime(&mut self) {
        self.refresh(Refresh::ALL);
    }

    /// Read lines from `input` until `exit`, `quit` or end of input.
    /// Bytes that are not UTF-8 are replaced rather than ending the session.
    pub fn run<R, W, E>(&mut self, mut input: R, out: &mut W, err: &mut E) -> io::Result<()>
    where
        R: BufRead,
        W: Write,
        E: Write,
    {
        let mut buffer = Vec::new();
        loop {
            write!(out, "{PROMPT}")?;
            out.flush()?;

            buffer.clear();
            if input.read_until(b'\n', &mut buffer)? == 0 {
                writeln!(out)?;
                return Ok(());
            }

            let line = String::from_utf8_lossy(&buffer);
            let line = line.trim_end_matches(['\n', '\r']);
            if matches!(line.trim(), "exit" | "quit") {
                return Ok(());
            }
            self.run_line(line, out, err)?;
        }
    }

    /// Dispatch one line, render what it produced and bring the completion
    /// lists up to date
    pub fn run_line<W: Write, E: Write>(&mut self, line: &str, out: &mut W, err: &mut E) -> io::Result<()> {
        if let Some(text) = line.trim_end().strip_suffix(SUGGEST_MARKER) {
            return render_suggestions(&self.completer.suggest(text), out);
        }

        self.interrupt.clear();
        let outcome = match self.dispatcher.handle(line) {
            Ok(outcome) => outcome,
            Err(e) => {
                writeln!(err, "{e}")?;
                return err.flush();
            }
        };

        debug!(command = ?outcome.command, refresh = ?outcome.refresh, "rendering outcome");
        let refresh = outcome.refresh;
        render(outcome.output, outcome.command, &self.interrupt, out)?;
        if self.interrupt.clear() {
            debug!("command interrupted");
        }
        if let Some(after) = outcome.after {
            for line in after.run() {
                writeln!(out, "{line}")?;
            }
            out.flush()?;
        }

        if refresh.any() {
            self.refresh(refresh);
        }
        Ok(())
    }

    fn refresh(&mut self, refresh: Refresh) {
        let engine = &self.dispatcher.context().engine;
        if let Err(e) = self.completer.refresh(engine.as_ref(), refresh) {
            warn!(error = %e, "could not refresh completions");
        }
    }
}
