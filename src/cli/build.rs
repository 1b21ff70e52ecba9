//! `build` handler

use crate::shell::adapter::allowed_args;
use crate::shell::catalog::CommandKind;
use crate::shell::dispatcher::{Context, Invocation, Outcome, Refresh};
use crate::shell::value::ArgValue;

/// Build an image from a context directory or URL
pub fn execute(ctx: &Context, call: Invocation) -> crate::Result<Outcome> {
    let Some(path) = call.args.first().cloned() else {
        return Ok(Outcome::message("Directory path or URL is required."));
    };

    let options = allowed_args(CommandKind::Build, call.options).with("path", ArgValue::Text(path));
    let stream = ctx.engine.build(&options)?;
    Ok(Outcome::stream(stream).refreshing(Refresh::IMAGES))
}
