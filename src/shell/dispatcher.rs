//! Per-line command dispatch
//!
//! [`Dispatcher::handle`] takes one typed line through tokenizing, help
//! detection, option parsing and the command handler, and returns a fresh
//! [`Outcome`]. Nothing carries over from one line to the next.

use std::fmt;
use std::rc::Rc;

use tracing::{debug, warn};

use crate::engine::{Engine, EngineError, LineStream};
use crate::shell::catalog::CommandKind;
use crate::shell::fallback::TerminalHandoff;
use crate::shell::help::{format_command_help, help_rows};
use crate::shell::parser::{parse, OptionFormatError, ParseError};
use crate::shell::tokenizer::{split_command_and_args, tokenize_lossy};
use crate::shell::value::Kwargs;
use crate::SkiffError;

/// Collaborators every handler can reach
pub struct Context {
    pub engine: Rc<dyn Engine>,
    pub handoff: Rc<dyn TerminalHandoff>,
    /// Reference CLI used for interactive commands
    pub cli_binary: String,
    /// Spell flags long when rebuilding reference CLI command lines
    pub prefer_long: bool,
}

/// Positional arguments and options of one call
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Invocation {
    pub args: Vec<String>,
    pub options: Kwargs,
}

impl Invocation {
    pub fn new(args: Vec<String>, options: Kwargs) -> Self {
        Self { args, options }
    }
}

pub type Handler = fn(&Context, Invocation) -> crate::Result<Outcome>;

/// Completion lists that may be stale after a command
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Refresh {
    pub containers: bool,
    pub running: bool,
    pub images: bool,
    pub volumes: bool,
}

impl Refresh {
    pub const ALL: Refresh = Refresh {
        containers: true,
        running: true,
        images: true,
        volumes: true,
    };

    pub const CONTAINERS: Refresh = Refresh {
        containers: true,
        running: true,
        images: false,
        volumes: false,
    };

    pub const RUNNING: Refresh = Refresh {
        containers: false,
        running: true,
        images: false,
        volumes: false,
    };

    pub const IMAGES: Refresh = Refresh {
        containers: false,
        running: false,
        images: true,
        volumes: false,
    };

    pub const VOLUMES: Refresh = Refresh {
        containers: false,
        running: false,
        images: false,
        volumes: true,
    };

    pub fn any(&self) -> bool {
        self.containers || self.running || self.images || self.volumes
    }
}

/// Closing lines to print once the command's output is drained
pub struct AfterAction(Box<dyn FnOnce() -> Vec<String>>);

impl AfterAction {
    pub fn new<F>(action: F) -> Self
    where
        F: FnOnce() -> Vec<String> + 'static,
    {
        Self(Box::new(action))
    }

    pub fn run(self) -> Vec<String> {
        (self.0)()
    }
}

impl fmt::Debug for AfterAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AfterAction")
    }
}

/// What a command produced, in the shape the renderer understands
#[derive(Debug, Default)]
pub enum Output {
    /// The command owned the terminal, or had nothing to say
    #[default]
    Nothing,
    Lines(Vec<String>),
    /// Two-column rows such as `help` or `info`
    Pairs(Vec<(String, String)>),
    Table {
        headers: Vec<String>,
        rows: Vec<Vec<String>>,
    },
    /// Pretty-printed JSON objects
    Documents(Vec<serde_json::Value>),
    /// Lines produced while the caller reads them
    Stream(LineStream),
    /// Ask the front end to clear the screen
    Clear,
}

/// Result of one dispatched line
#[derive(Debug, Default)]
pub struct Outcome {
    /// Command that produced the output; `None` when it failed or was unknown
    pub command: Option<CommandKind>,
    pub output: Output,
    pub refresh: Refresh,
    pub after: Option<AfterAction>,
}

impl Outcome {
    pub fn nothing() -> Self {
        Self::default()
    }

    pub fn new(output: Output) -> Self {
        Self {
            output,
            ..Self::default()
        }
    }

    pub fn message(text: impl Into<String>) -> Self {
        Self::new(Output::Lines(vec![text.into()]))
    }

    pub fn lines(lines: Vec<String>) -> Self {
        Self::new(Output::Lines(lines))
    }

    pub fn pairs(pairs: Vec<(String, String)>) -> Self {
        Self::new(Output::Pairs(pairs))
    }

    pub fn table(headers: &[&str], rows: Vec<Vec<String>>) -> Self {
        Self::new(Output::Table {
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows,
        })
    }

    pub fn documents(documents: Vec<serde_json::Value>) -> Self {
        Self::new(Output::Documents(documents))
    }

    pub fn stream(stream: LineStream) -> Self {
        Self::new(Output::Stream(stream))
    }

    pub fn refreshing(mut self, refresh: Refresh) -> Self {
        self.refresh = refresh;
        self
    }

    pub fn after<F>(mut self, action: F) -> Self
    where
        F: FnOnce() -> Vec<String> + 'static,
    {
        self.after = Some(AfterAction::new(action));
        self
    }

    fn for_command(mut self, kind: CommandKind) -> Self {
        self.command = Some(kind);
        self
    }
}

/// Routes typed lines to command handlers
pub struct Dispatcher {
    context: Context,
}

impl Dispatcher {
    pub fn new(context: Context) -> Self {
        Self { context }
    }

    pub fn context(&self) -> &Context {
        &self.context
    }

    /// Run one line of input.
    ///
    /// Only option-format errors escape, so the front end can show them
    /// apart from regular output. Every other failure becomes a single
    /// output line.
    pub fn handle(&self, text: &str) -> Result<Outcome, OptionFormatError> {
        let tokens = tokenize_lossy(text);
        let Some((name, params)) = split_command_and_args(&tokens) else {
            return Ok(Outcome::nothing());
        };
        if name.is_empty() {
            return Ok(Outcome::nothing());
        }

        let Some(kind) = CommandKind::from_name(&name) else {
            debug!(command = %name, "unknown command, showing help");
            return Ok(Outcome::pairs(help_rows()));
        };

        if params.is_empty() {
            debug!(command = %kind, "calling handler without arguments");
            return self.call(kind, Invocation::default());
        }

        if tokens.iter().any(|token| token == "-h" || token == "--help") {
            return Ok(Outcome::message(format_command_help(kind)).for_command(kind));
        }

        let parsed = match parse(kind, &params) {
            Ok(parsed) => parsed,
            Err(ParseError::Format(e)) => {
                warn!(command = %kind, flag = %e.flag, "option format error");
                return Err(e);
            }
            Err(e @ ParseError::Invalid(_)) => {
                debug!(command = %kind, error = %e, "parse error");
                return Ok(Outcome::message(e.to_string()));
            }
        };

        let mut options = parsed.options;
        options.remove("help");
        self.call(kind, Invocation::new(parsed.args, options))
    }

    fn call(&self, kind: CommandKind, invocation: Invocation) -> Result<Outcome, OptionFormatError> {
        match (kind.handler())(&self.context, invocation) {
            Ok(outcome) => Ok(outcome.for_command(kind)),
            Err(SkiffError::OptionFormat(e)) => Err(e),
            Err(SkiffError::Engine(EngineError::Api { status, explanation })) => {
                warn!(command = %kind, status, %explanation, "engine refused the request");
                Ok(Outcome::message(explanation))
            }
            Err(e) => {
                warn!(command = %kind, error = %e, "command failed");
                Ok(Outcome::message(e.to_string()))
            }
        }
    }
}
