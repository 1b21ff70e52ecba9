//! `start` and `restart` handlers

use crate::cli::target_stream;
use crate::shell::adapter::allowed_args;
use crate::shell::catalog::CommandKind;
use crate::shell::dispatcher::{Context, Invocation, Outcome, Refresh};
use crate::shell::fallback::{maybe_delegate, Delegation};

/// Start a container. `-i` hands the terminal to the reference CLI; `-a`
/// follows the container's output once it is running.
pub fn execute(ctx: &Context, call: Invocation) -> crate::Result<Outcome> {
    if call.args.is_empty() {
        return Ok(Outcome::message("Container name is required."));
    }

    let (args, options) = match maybe_delegate(ctx, CommandKind::Start, call.args, call.options, false)? {
        Delegation::Handled(outcome) => return Ok(outcome),
        Delegation::Declined { args, options } => (args, options),
    };

    let container = &args[0];
    ctx.engine.start(container, &allowed_args(CommandKind::Start, options.clone()))?;

    if options.flag("attach") {
        let stream = ctx.engine.logs(container, true)?;
        return Ok(Outcome::stream(stream).refreshing(Refresh::RUNNING));
    }
    Ok(Outcome::message(container.clone()).refreshing(Refresh::RUNNING))
}

/// Restart each named container, with an optional stop timeout
pub fn restart(ctx: &Context, call: Invocation) -> crate::Result<Outcome> {
    if call.args.is_empty() {
        return Ok(Outcome::message("Container name is required."));
    }

    let timeout = call.options.number("timeout");
    let stream = target_stream(&ctx.engine, call.args, move |engine, container| {
        engine.restart(container, timeout)
    });
    Ok(Outcome::stream(stream).refreshing(Refresh::RUNNING))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::testing::{context, invocation, lines};
    use crate::engine::fake::FakeEngine;

    #[test]
    fn test_start_prints_the_container() {
        let (ctx, engine, handoff) = context(FakeEngine::new());
        let outcome = execute(&ctx, invocation(CommandKind::Start, "web")).unwrap();

        assert_eq!(outcome.refresh, Refresh::RUNNING);
        assert_eq!(lines(outcome), vec!["web"]);
        assert_eq!(engine.calls(), vec!["start web"]);
        assert!(handoff.last().is_none());
    }

    #[test]
    fn test_start_attached_follows_logs() {
        let (ctx, engine, _) = context(FakeEngine::new().with_logs(&["hello", "world"]));
        let outcome = execute(&ctx, invocation(CommandKind::Start, "-a web")).unwrap();

        assert_eq!(lines(outcome), vec!["hello", "world"]);
        assert_eq!(engine.calls(), vec!["start web", "logs_follow web"]);
    }

    #[test]
    fn test_start_interactive_is_delegated() {
        let (ctx, engine, handoff) = context(FakeEngine::new());
        let outcome = execute(&ctx, invocation(CommandKind::Start, "-i web")).unwrap();

        assert_eq!(handoff.last().unwrap(), vec!["docker", "start", "-i", "web"]);
        assert!(engine.calls().is_empty());
        assert_eq!(outcome.after.unwrap().run(), vec!["Interactive terminal is closed."]);
    }

    #[test]
    fn test_start_requires_a_container() {
        let (ctx, _, _) = context(FakeEngine::new());
        let outcome = execute(&ctx, Invocation::default()).unwrap();
        assert_eq!(lines(outcome), vec!["Container name is required."]);
    }

    #[test]
    fn test_restart_passes_timeout() {
        let (ctx, engine, _) = context(FakeEngine::new());
        let outcome = restart(&ctx, invocation(CommandKind::Restart, "-t 3 web db")).unwrap();

        assert_eq!(lines(outcome), vec!["web", "db"]);
        assert_eq!(engine.calls(), vec!["restart web", "timeout 3", "restart db", "timeout 3"]);
    }
}
