//! Command-line flags, the read loop, output rendering and the shell
//! command handlers

pub mod build;
pub mod exec;
pub mod images;
pub mod inspect;
pub mod logs;
pub mod output;
pub mod ps;
pub mod pull;
pub mod push;
pub mod repl;
pub mod rm;
pub mod run;
pub mod start;
pub mod stop;
pub mod system;
pub mod tag;
pub mod volume;

use std::path::PathBuf;
use std::rc::Rc;

use clap::Parser;

use crate::engine::{Engine, EngineResult, LineStream};
use crate::shell::adapter::truncate;

/// Skiff - an interactive shell for Docker-compatible container engines
#[derive(Parser, Debug)]
#[command(name = "skiff")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Engine address (tcp://HOST:PORT); overrides DOCKER_HOST and the config file
    #[arg(long, short = 'H', value_name = "HOST")]
    pub host: Option<String>,

    /// Seconds to wait for non-streaming engine calls
    #[arg(long, value_name = "SECONDS")]
    pub timeout: Option<u64>,

    /// Path to the configuration file (default ~/.skiff/config.json)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Log level written to ~/.skiff/skiff.log (RUST_LOG wins when set)
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Run one command line and exit
    #[arg(short, long, value_name = "LINE")]
    pub command: Option<String>,
}

/// Width used when naming a failed item in a status line
const ITEM_WIDTH: usize = 25;

/// Apply `action` to each target as the stream is read, one line per
/// target. Failures are reported inline and don't stop the rest.
pub(crate) fn each_target<F>(
    engine: &Rc<dyn Engine>,
    targets: Vec<String>,
    shorten: bool,
    action: F,
) -> impl Iterator<Item = String>
where
    F: Fn(&dyn Engine, &str) -> EngineResult<()> + 'static,
{
    let engine = Rc::clone(engine);
    targets.into_iter().map(move |target| match action(&*engine, &target) {
        Ok(()) if shorten => truncate(&target, ITEM_WIDTH),
        Ok(()) => target,
        Err(e) => format!("{}: {e}", truncate(&target, ITEM_WIDTH)),
    })
}

/// Same as [`each_target`], boxed as a [`LineStream`]
pub(crate) fn target_stream<F>(engine: &Rc<dyn Engine>, targets: Vec<String>, action: F) -> LineStream
where
    F: Fn(&dyn Engine, &str) -> EngineResult<()> + 'static,
{
    LineStream::new(each_target(engine, targets, false, action))
}

/// Render a JSON scalar for a two-column or table cell
pub(crate) fn cell(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::Null => String::new(),
        serde_json::Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// Sorted key/value pairs of a JSON object
pub(crate) fn sorted_pairs(value: &serde_json::Value) -> Vec<(String, String)> {
    let mut pairs: Vec<(String, String)> = value
        .as_object()
        .map(|map| map.iter().map(|(key, value)| (key.clone(), cell(value))).collect())
        .unwrap_or_default();
    pairs.sort();
    pairs
}

#[cfg(test)]
pub(crate) mod testing {
    use std::rc::Rc;

    use crate::engine::fake::FakeEngine;
    use crate::engine::Engine;
    use crate::shell::catalog::CommandKind;
    use crate::shell::dispatcher::{Context, Invocation, Outcome, Output};
    use crate::shell::fallback::testing::RecordingHandoff;
    use crate::shell::fallback::TerminalHandoff;
    use crate::shell::parser::parse;

    /// Context over a fake engine and a recording handoff
    pub fn context(engine: FakeEngine) -> (Context, Rc<FakeEngine>, Rc<RecordingHandoff>) {
        let engine = Rc::new(engine);
        let handoff = Rc::new(RecordingHandoff::default());
        let ctx = Context {
            engine: Rc::clone(&engine) as Rc<dyn Engine>,
            handoff: Rc::clone(&handoff) as Rc<dyn TerminalHandoff>,
            cli_binary: "docker".to_string(),
            prefer_long: false,
        };
        (ctx, engine, handoff)
    }

    /// Parse `line` the way the dispatcher would for `kind`
    pub fn invocation(kind: CommandKind, line: &str) -> Invocation {
        let tokens: Vec<String> = line.split_whitespace().map(String::from).collect();
        let parsed = parse(kind, &tokens).unwrap();
        let mut options = parsed.options;
        options.remove("help");
        Invocation::new(parsed.args, options)
    }

    /// Text lines of an outcome, draining streams
    pub fn lines(outcome: Outcome) -> Vec<String> {
        match outcome.output {
            Output::Lines(lines) => lines,
            Output::Stream(stream) => stream.collect(),
            Output::Nothing => Vec::new(),
            other => panic!("expected lines, got {other:?}"),
        }
    }

    pub fn table(outcome: Outcome) -> (Vec<String>, Vec<Vec<String>>) {
        match outcome.output {
            Output::Table { headers, rows } => (headers, rows),
            other => panic!("expected a table, got {other:?}"),
        }
    }
}
