//! `rm` and `rmi` handlers
//!
//! Besides explicit names both accept shortcuts that expand to a listing
//! from the engine: `rm --all-stopped`, `rm --all`, `rmi --all-dangling`
//! and `rmi --all`.

use std::cell::Cell;
use std::rc::Rc;

use serde_json::{json, Value};

use crate::cli::each_target;
use crate::engine::{Engine, EngineResult, LineStream};
use crate::shell::dispatcher::{Context, Invocation, Outcome, Refresh};
use crate::shell::value::{ArgValue, Kwargs};

pub fn execute(ctx: &Context, call: Invocation) -> crate::Result<Outcome> {
    let force = call.options.flag("force");
    let all_stopped = call.options.flag("all_stopped");
    let all = call.options.flag("all");

    let (targets, shortcut) = if all_stopped || all {
        if !call.args.is_empty() {
            let flag = if all_stopped { "--all-stopped" } else { "--all" };
            return Ok(Outcome::message(format!("Provide either {flag}, or container name(s).")));
        }

        let listing = if all_stopped {
            Kwargs::new().with(
                "filters",
                ArgValue::Nested(json!({"status": ["exited"]})),
            )
        } else {
            Kwargs::new().with("all", ArgValue::Flag(true))
        };
        let targets = ids(&ctx.engine.containers(&listing)?);
        if targets.is_empty() {
            let message = if all_stopped {
                "There are no stopped containers."
            } else {
                "There are no containers."
            };
            return Ok(Outcome::message(message));
        }
        (targets, true)
    } else if call.args.is_empty() {
        return Ok(Outcome::message("Container name is required."));
    } else {
        (call.args, false)
    };

    let stream = removal_stream(ctx, targets, shortcut.then_some("container"), move |engine, container| {
        engine.remove_container(container, force)
    });
    Ok(Outcome::stream(stream).refreshing(Refresh::CONTAINERS))
}

pub fn execute_rmi(ctx: &Context, call: Invocation) -> crate::Result<Outcome> {
    let all_dangling = call.options.flag("all_dangling");
    let all = call.options.flag("all");

    let (targets, shortcut) = if all_dangling || all {
        if !call.args.is_empty() {
            let flag = if all_dangling { "--all-dangling" } else { "--all" };
            return Ok(Outcome::message(format!("Provide either {flag}, or image name(s).")));
        }

        let listing = if all_dangling {
            Kwargs::new().with("filters", ArgValue::Nested(json!({"dangling": ["true"]})))
        } else {
            Kwargs::new()
        };
        let targets = ids(&ctx.engine.images(&listing)?);
        if targets.is_empty() {
            let message = if all_dangling {
                "There are no dangling images."
            } else {
                "There are no images."
            };
            return Ok(Outcome::message(message));
        }
        (targets, true)
    } else if call.args.is_empty() {
        return Ok(Outcome::message("Image name is required."));
    } else {
        (call.args, false)
    };

    let stream = removal_stream(ctx, targets, shortcut.then_some("image"), |engine, image| {
        engine.remove_image(image)
    });
    Ok(Outcome::stream(stream).refreshing(Refresh::IMAGES))
}

fn ids(listing: &[Value]) -> Vec<String> {
    listing
        .iter()
        .filter_map(|item| item["Id"].as_str())
        .map(String::from)
        .collect()
}

/// One line per target. Shortcut removals (`noun` set) shorten the lines
/// and end with a `Removed: N noun(s).` count of the successful ones.
fn removal_stream<F>(ctx: &Context, targets: Vec<String>, noun: Option<&'static str>, remove: F) -> LineStream
where
    F: Fn(&dyn Engine, &str) -> EngineResult<()> + 'static,
{
    let removed = Rc::new(Cell::new(0usize));
    let tally = Rc::clone(&removed);
    let lines = each_target(&ctx.engine, targets, noun.is_some(), move |engine, target| {
        remove(engine, target)?;
        tally.set(tally.get() + 1);
        Ok(())
    });

    let Some(noun) = noun else {
        return LineStream::new(lines);
    };
    let summary = std::iter::once_with(move || format!("Removed: {} {noun}(s).", removed.get()));
    LineStream::new(lines.chain(summary))
}
