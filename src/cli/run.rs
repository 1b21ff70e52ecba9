//! `run` and `create` handlers
//!
//! A foreground `run` needs the user's terminal and goes to the reference
//! CLI. A detached `run` is a create followed by a start through the
//! engine API; `create` stops after the first step.

use serde_json::Value;

use crate::shell::adapter::{allowed_args, prepare_container, split_two_phase};
use crate::shell::catalog::CommandKind;
use crate::shell::dispatcher::{Context, Invocation, Outcome, Refresh};
use crate::shell::fallback::{maybe_delegate, Delegation};

pub fn execute(ctx: &Context, call: Invocation) -> crate::Result<Outcome> {
    if call.args.is_empty() {
        return Ok(Outcome::message("Image name is required."));
    }

    let detach = call.options.flag("detach");
    if call.options.flag("remove") && detach {
        return Ok(Outcome::message("Use either --rm or --detach."));
    }

    let (args, options) = match maybe_delegate(ctx, CommandKind::Run, call.args, call.options, !detach)? {
        Delegation::Handled(outcome) => return Ok(outcome),
        Delegation::Declined { args, options } => (args, options),
    };

    let kwargs = prepare_container(options, &args)?;
    let (create, start) = split_two_phase(&kwargs);

    let created = ctx.engine.create_container(&create)?;
    let Some(id) = created["Id"].as_str() else {
        return Ok(Outcome::message("There was a problem running the container."));
    };
    ctx.engine.start(id, &start)?;

    let mut lines = warnings(&created);
    lines.push(id.to_string());
    Ok(Outcome::lines(lines).refreshing(Refresh::CONTAINERS))
}

/// Create a container without starting it
pub fn create(ctx: &Context, call: Invocation) -> crate::Result<Outcome> {
    if call.args.is_empty() {
        return Ok(Outcome::message("Image name is required."));
    }

    let kwargs = prepare_container(call.options, &call.args)?;
    let created = ctx.engine.create_container(&allowed_args(CommandKind::Create, kwargs))?;
    let Some(id) = created["Id"].as_str() else {
        return Ok(Outcome::message("There was a problem creating the container."));
    };

    let mut lines = warnings(&created);
    lines.push(id.to_string());
    Ok(Outcome::lines(lines).refreshing(Refresh::CONTAINERS))
}

fn warnings(created: &Value) -> Vec<String> {
    created["Warnings"]
        .as_array()
        .map(|warnings| {
            warnings
                .iter()
                .filter_map(Value::as_str)
                .map(|warning| format!("Warning: {warning}"))
                .collect()
        })
        .unwrap_or_default()
}
