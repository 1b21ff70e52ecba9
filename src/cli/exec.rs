//! `exec`, `attach` and `shell` handlers

use crate::shell::catalog::CommandKind;
use crate::shell::dispatcher::{Context, Invocation, Outcome, Refresh};
use crate::shell::fallback::{command_line, hand_over, maybe_delegate, Delegation};

/// Run a command in a running container. With `-i` or `-t` the reference
/// CLI takes the terminal; otherwise the output is streamed back.
pub fn execute(ctx: &Context, call: Invocation) -> crate::Result<Outcome> {
    if call.args.len() < 2 {
        return Ok(Outcome::message("Container ID and command is required."));
    }

    let (args, options) = match maybe_delegate(ctx, CommandKind::Exec, call.args, call.options, false)? {
        Delegation::Handled(outcome) => return Ok(outcome),
        Delegation::Declined { args, options } => (args, options),
    };

    let (container, cmd) = (&args[0], &args[1..]);
    let tty = options.flag("tty");
    let exec_id = ctx.engine.exec_create(container, cmd, tty)?;
    let stream = ctx.engine.exec_start(&exec_id, options.flag("detach"), tty)?;
    Ok(Outcome::stream(stream))
}

/// Attach the terminal to a running container until the user detaches
pub fn attach(ctx: &Context, call: Invocation) -> crate::Result<Outcome> {
    let Some(container) = call.args.first().cloned() else {
        return Ok(Outcome::message("Container name or ID is required."));
    };

    let argv = command_line(
        CommandKind::Attach,
        ctx.prefer_long,
        &ctx.cli_binary,
        &call.args,
        &call.options,
    );
    hand_over(ctx, &argv)?;

    Ok(Outcome::nothing()
        .refreshing(Refresh::CONTAINERS)
        .after(move || vec![format!("Detached from {container}.")]))
}

/// Open an interactive shell inside a running container
pub fn shell(ctx: &Context, call: Invocation) -> crate::Result<Outcome> {
    let Some((container, command)) = call.args.split_first() else {
        return Ok(Outcome::message("Container name is required."));
    };

    let mut argv = vec![
        ctx.cli_binary.clone(),
        "exec".to_string(),
        "-it".to_string(),
        container.clone(),
    ];
    if command.is_empty() {
        argv.push("bash".to_string());
    } else {
        argv.extend(command.iter().cloned());
    }
    hand_over(ctx, &argv)?;

    let container = container.clone();
    Ok(Outcome::nothing()
        .refreshing(Refresh::CONTAINERS)
        .after(move || vec![format!("Shell to {container} is closed.")]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::testing::{context, invocation, lines};
    use crate::engine::fake::FakeEngine;

    #[test]
    fn test_exec_streams_output() {
        let (ctx, engine, handoff) = context(FakeEngine::new().with_logs(&["total 0"]));
        let outcome = execute(&ctx, invocation(CommandKind::Exec, "web ls -l")).unwrap();

        assert_eq!(lines(outcome), vec!["total 0"]);
        assert_eq!(engine.calls(), vec!["exec_create web", "cmd ls -l", "exec_start e1e1e1"]);
        assert!(handoff.last().is_none());
    }

    #[test]
    fn test_exec_interactive_is_delegated() {
        let (ctx, engine, handoff) = context(FakeEngine::new());
        execute(&ctx, invocation(CommandKind::Exec, "-it web bash")).unwrap();

        assert_eq!(handoff.last().unwrap(), vec!["docker", "exec", "-i", "-t", "web", "bash"]);
        assert!(engine.calls().is_empty());
    }

    #[test]
    fn test_exec_needs_container_and_command() {
        let (ctx, _, _) = context(FakeEngine::new());
        let outcome = execute(&ctx, invocation(CommandKind::Exec, "web")).unwrap();
        assert_eq!(lines(outcome), vec!["Container ID and command is required."]);
    }

    #[test]
    fn test_attach_hands_over_the_terminal() {
        let (ctx, _, handoff) = context(FakeEngine::new());
        let outcome = attach(&ctx, invocation(CommandKind::Attach, "web")).unwrap();

        assert_eq!(handoff.last().unwrap(), vec!["docker", "attach", "web"]);
        assert_eq!(outcome.refresh, Refresh::CONTAINERS);
        assert_eq!(outcome.after.unwrap().run(), vec!["Detached from web."]);
    }

    #[test]
    fn test_shell_defaults_to_bash() {
        let (ctx, _, handoff) = context(FakeEngine::new());
        let outcome = shell(&ctx, invocation(CommandKind::Shell, "web")).unwrap();

        assert_eq!(handoff.last().unwrap(), vec!["docker", "exec", "-it", "web", "bash"]);
        assert_eq!(outcome.after.unwrap().run(), vec!["Shell to web is closed."]);
    }

    #[test]
    fn test_shell_with_command() {
        let (ctx, _, handoff) = context(FakeEngine::new());
        shell(&ctx, invocation(CommandKind::Shell, "web /bin/sh")).unwrap();

        assert_eq!(handoff.last().unwrap(), vec!["docker", "exec", "-it", "web", "/bin/sh"]);
    }
}
