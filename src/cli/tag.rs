//! `tag` handler

use crate::shell::adapter::split_repo_tag;
use crate::shell::dispatcher::{Context, Invocation, Outcome, Refresh};

/// Tag an image into a repository, `repo[:tag]`
pub fn execute(ctx: &Context, call: Invocation) -> crate::Result<Outcome> {
    let [image, name, ..] = call.args.as_slice() else {
        return Ok(Outcome::message("Image name and repository name are required."));
    };

    let (repository, tag) = split_repo_tag(name);
    ctx.engine
        .tag(image, &repository, tag.as_deref(), call.options.flag("force"))?;
    Ok(Outcome::message(format!("Tagged {image} into {name}.")).refreshing(Refresh::IMAGES))
}
