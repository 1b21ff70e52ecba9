//! `pull` handler

use crate::shell::dispatcher::{Context, Invocation, Outcome, Refresh};

/// Pull an image, streaming the engine's progress lines
pub fn execute(ctx: &Context, call: Invocation) -> crate::Result<Outcome> {
    let Some(image) = call.args.first() else {
        return Ok(Outcome::message("Image name is required."));
    };

    let stream = ctx.engine.pull(image)?;
    Ok(Outcome::stream(stream).refreshing(Refresh::IMAGES))
}
