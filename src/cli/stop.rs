//! `stop`, `kill`, `pause` and `unpause` handlers

use crate::cli::target_stream;
use crate::shell::dispatcher::{Context, Invocation, Outcome, Refresh};

const CONTAINER_REQUIRED: &str = "Container name is required.";

/// Stop each named container, reporting one line per container
pub fn execute(ctx: &Context, call: Invocation) -> crate::Result<Outcome> {
    if call.args.is_empty() {
        return Ok(Outcome::message(CONTAINER_REQUIRED));
    }

    let stream = target_stream(&ctx.engine, call.args, |engine, container| engine.stop(container));
    Ok(Outcome::stream(stream).refreshing(Refresh::RUNNING))
}

/// Send a signal (KILL unless `-s` says otherwise) to each named container
pub fn kill(ctx: &Context, call: Invocation) -> crate::Result<Outcome> {
    if call.args.is_empty() {
        return Ok(Outcome::message(CONTAINER_REQUIRED));
    }

    let signal = call.options.text("signal").unwrap_or("KILL").to_string();
    let stream = target_stream(&ctx.engine, call.args, move |engine, container| {
        engine.kill(container, &signal)
    });
    Ok(Outcome::stream(stream).refreshing(Refresh::RUNNING))
}

pub fn pause(ctx: &Context, call: Invocation) -> crate::Result<Outcome> {
    let Some(container) = call.args.first() else {
        return Ok(Outcome::message(CONTAINER_REQUIRED));
    };
    ctx.engine.pause(container)?;
    Ok(Outcome::message(container.clone()))
}

pub fn unpause(ctx: &Context, call: Invocation) -> crate::Result<Outcome> {
    let Some(container) = call.args.first() else {
        return Ok(Outcome::message(CONTAINER_REQUIRED));
    };
    ctx.engine.unpause(container)?;
    Ok(Outcome::message(container.clone()))
}
