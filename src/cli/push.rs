//! `push` and `login` handlers
//!
//! Both prompt for credentials or print registry progress meant for a real
//! terminal, so they always run through the reference CLI.

use crate::shell::adapter::{check_repo_tag, split_repo_tag};
use crate::shell::catalog::CommandKind;
use crate::shell::dispatcher::{Context, Invocation, Outcome};
use crate::shell::fallback::{command_line, hand_over};

pub fn execute(ctx: &Context, call: Invocation) -> crate::Result<Outcome> {
    let Some(name) = call.args.first() else {
        return Ok(Outcome::message("Image name (tagged) is required."));
    };

    let (repository, _) = split_repo_tag(name);
    if let Err(reason) = check_repo_tag(&repository) {
        return Ok(Outcome::message(reason));
    }

    let argv = command_line(CommandKind::Push, ctx.prefer_long, &ctx.cli_binary, &call.args, &call.options);
    hand_over(ctx, &argv)?;
    Ok(Outcome::nothing())
}

pub fn login(ctx: &Context, call: Invocation) -> crate::Result<Outcome> {
    let argv = command_line(CommandKind::Login, ctx.prefer_long, &ctx.cli_binary, &call.args, &call.options);
    hand_over(ctx, &argv)?;
    Ok(Outcome::nothing())
}
