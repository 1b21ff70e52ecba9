//! `logs` handler

use crate::shell::dispatcher::{Context, Invocation, Outcome};

/// Print a container's output; `-f` keeps following it
pub fn execute(ctx: &Context, call: Invocation) -> crate::Result<Outcome> {
    let Some(container) = call.args.first() else {
        return Ok(Outcome::message("Container ID/name is required."));
    };

    let stream = ctx.engine.logs(container, call.options.flag("stream"))?;
    Ok(Outcome::stream(stream))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::testing::{context, invocation, lines};
    use crate::engine::fake::FakeEngine;
    use crate::shell::catalog::CommandKind;

    #[test]
    fn test_logs_stream_lines() {
        let (ctx, engine, _) = context(FakeEngine::new().with_logs(&["one", "two"]));
        let outcome = execute(&ctx, invocation(CommandKind::Logs, "web")).unwrap();

        assert_eq!(lines(outcome), vec!["one", "two"]);
        assert_eq!(engine.calls(), vec!["logs web"]);
    }

    #[test]
    fn test_logs_follow() {
        let (ctx, engine, _) = context(FakeEngine::new());
        lines(execute(&ctx, invocation(CommandKind::Logs, "-f web")).unwrap());
        assert_eq!(engine.calls(), vec!["logs_follow web"]);
    }

    #[test]
    fn test_logs_requires_a_container() {
        let (ctx, _, _) = context(FakeEngine::new());
        let outcome = execute(&ctx, Invocation::default()).unwrap();
        assert_eq!(lines(outcome), vec!["Container ID/name is required."]);
    }
}
