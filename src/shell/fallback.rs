//! Handoff to the reference CLI for commands that need a real terminal
//!
//! The engine API can't give an interactive session the terminal it
//! expects, so those commands are rebuilt as a reference CLI command line
//! and run as a child process that owns stdin/stdout until it exits.

use std::process::{Command, Stdio};

use tracing::{info, warn};

use crate::shell::catalog::{self, CommandKind};
use crate::shell::dispatcher::{Context, Outcome, Refresh};
use crate::shell::option::DefaultValue;
use crate::shell::value::{ArgValue, Kwargs};
use crate::{Result, SkiffError};

/// Runs a child process attached to the controlling terminal and blocks
/// until it exits
pub trait TerminalHandoff {
    /// Returns the child's exit code
    fn interact(&self, argv: &[String]) -> Result<i32>;
}

/// Spawns the child with inherited stdio
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessHandoff;

impl TerminalHandoff for ProcessHandoff {
    fn interact(&self, argv: &[String]) -> Result<i32> {
        let (program, rest) = argv
            .split_first()
            .ok_or_else(|| SkiffError::Spawn("No command specified".to_string()))?;

        let status = Command::new(program)
            .args(rest)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|e| SkiffError::Spawn(format!("{program}: {e}")))?;

        Ok(status.code().unwrap_or(1))
    }
}

/// Result of offering a command to the fallback
pub enum Delegation {
    /// The reference CLI ran the command
    Handled(Outcome),
    /// Not interactive; continue through the engine API
    Declined { args: Vec<String>, options: Kwargs },
}

/// Rebuild `kind` as a reference CLI argv.
///
/// Only flags marked cli-visible are echoed. Values equal to the option's
/// default are left out, so the child applies its own defaults.
pub fn command_line(
    kind: CommandKind,
    prefer_long: bool,
    binary: &str,
    args: &[String],
    options: &Kwargs,
) -> Vec<String> {
    let mut argv = vec![binary.to_string()];
    argv.extend(kind.name().split(' ').map(String::from));

    let mut echoed = Vec::new();
    for option in catalog::all_options(kind, false) {
        if !option.is_flag() || !option.cli_visible || echoed.contains(&option.dest_key()) {
            continue;
        }
        let Some(value) = options.get(option.dest_key()) else {
            continue;
        };
        echoed.push(option.dest_key());

        let name = option.preferred_name(prefer_long).to_string();
        match value {
            ArgValue::Flag(set) => {
                let typed = *set != option.negated;
                if typed && option.default != Some(DefaultValue::Flag(*set)) {
                    argv.push(name);
                }
            }
            ArgValue::Text(text) => {
                if !matches!(option.default, Some(DefaultValue::Text(default)) if default == text.as_str()) {
                    argv.push(name);
                    argv.push(text.clone());
                }
            }
            ArgValue::Number(number) => {
                argv.push(name);
                argv.push(number.to_string());
            }
            ArgValue::List(values) => {
                for value in values {
                    argv.push(name.clone());
                    argv.push(value.clone());
                }
            }
            ArgValue::Unset | ArgValue::Nested(_) => {}
        }
    }

    argv.extend(args.iter().cloned());
    argv
}

/// Run `argv` through the terminal handoff and report the exit code
pub fn hand_over(ctx: &Context, argv: &[String]) -> Result<i32> {
    info!(command = %argv.join(" "), "handing terminal to external CLI");
    let code = ctx.handoff.interact(argv)?;
    if code != 0 {
        warn!(code, "external CLI exited with an error");
    }
    Ok(code)
}

/// Delegate to the reference CLI when the command needs a terminal: when
/// `force` is set, or `-i`, `-t` or `-a STREAM` were given. Otherwise the
/// arguments are handed back untouched.
pub fn maybe_delegate(
    ctx: &Context,
    kind: CommandKind,
    args: Vec<String>,
    options: Kwargs,
    force: bool,
) -> Result<Delegation> {
    let attach_streams = options
        .get("attach")
        .and_then(ArgValue::as_list)
        .is_some_and(|streams| !streams.is_empty());
    let attached = attach_streams || options.flag("attach");

    if !(force || options.flag("interactive") || options.flag("tty") || attach_streams) {
        return Ok(Delegation::Declined { args, options });
    }

    let argv = command_line(kind, ctx.prefer_long, &ctx.cli_binary, &args, &options);
    hand_over(ctx, &argv)?;

    let closing = if attached {
        "Container exited."
    } else {
        "Interactive terminal is closed."
    };
    Ok(Delegation::Handled(
        Outcome::nothing()
            .refreshing(Refresh {
                containers: true,
                running: true,
                ..Refresh::default()
            })
            .after(move || vec![closing.to_string()]),
    ))
}


#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::testing::RecordingHandoff;
    use super::*;
    use crate::engine::fake::FakeEngine;
    use crate::shell::dispatcher::Output;
    use crate::shell::parser::parse;

    fn tokens(line: &str) -> Vec<String> {
        line.split_whitespace().map(String::from).collect()
    }

    fn context(handoff: Rc<RecordingHandoff>, prefer_long: bool) -> Context {
        Context {
            engine: Rc::new(FakeEngine::new()),
            handoff,
            cli_binary: "docker".to_string(),
            prefer_long,
        }
    }

    #[test]
    fn test_command_line_echoes_visible_flags() {
        let parsed = parse(
            CommandKind::Run,
            &tokens("--rm -e FOO=1 -e BAR=2 -p 8080:80 -it --name web ubuntu bash"),
        )
        .unwrap();
        let argv = command_line(CommandKind::Run, false, "docker", &parsed.args, &parsed.options);

        assert_eq!(&argv[..2], &["docker", "run"]);
        assert!(argv.windows(2).any(|pair| pair == ["-e", "FOO=1"]));
        assert!(argv.windows(2).any(|pair| pair == ["-e", "BAR=2"]));
        assert!(argv.windows(2).any(|pair| pair == ["-p", "8080:80"]));
        assert!(argv.windows(2).any(|pair| pair == ["--name", "web"]));
        assert!(argv.contains(&"-i".to_string()));
        assert!(argv.contains(&"-t".to_string()));
        assert!(argv.contains(&"--rm".to_string()));
        assert_eq!(&argv[argv.len() - 2..], &["ubuntu", "bash"]);
        // hidden create options never reach the command line
        assert!(!argv.iter().any(|word| word.contains("stdin_open")));
    }

    #[test]
    fn test_command_line_prefers_long_names() {
        let parsed = parse(CommandKind::Exec, &tokens("-it web sh")).unwrap();
        let argv = command_line(CommandKind::Exec, true, "docker", &parsed.args, &parsed.options);
        assert_eq!(argv, vec!["docker", "exec", "--interactive", "--tty", "web", "sh"]);
    }

    #[test]
    fn test_translator_only_flags_are_not_echoed() {
        let parsed = parse(CommandKind::Rm, &tokens("--all-stopped -f")).unwrap();
        let argv = command_line(CommandKind::Rm, false, "docker", &parsed.args, &parsed.options);
        assert_eq!(argv, vec!["docker", "rm", "-f"]);
    }

    #[test]
    fn test_negated_and_default_values() {
        let parsed = parse(CommandKind::Ps, &tokens("--no-trunc -a")).unwrap();
        let argv = command_line(CommandKind::Ps, false, "docker", &parsed.args, &parsed.options);
        assert_eq!(argv, vec!["docker", "ps", "-a", "--no-trunc"]);

        let parsed = parse(CommandKind::Kill, &tokens("web")).unwrap();
        let argv = command_line(CommandKind::Kill, false, "docker", &parsed.args, &parsed.options);
        assert_eq!(argv, vec!["docker", "kill", "web"]);
    }

    #[test]
    fn test_delegates_interactive_exec() {
        let handoff = Rc::new(RecordingHandoff::default());
        let ctx = context(Rc::clone(&handoff), false);
        let parsed = parse(CommandKind::Exec, &tokens("-i web sh")).unwrap();

        let delegation =
            maybe_delegate(&ctx, CommandKind::Exec, parsed.args, parsed.options, false).unwrap();
        let Delegation::Handled(outcome) = delegation else {
            panic!("expected delegation");
        };
        assert!(matches!(outcome.output, Output::Nothing));
        assert!(outcome.refresh.containers && outcome.refresh.running);
        assert_eq!(
            outcome.after.map(|after| after.run()),
            Some(vec!["Interactive terminal is closed.".to_string()])
        );
        assert_eq!(handoff.last(), Some(tokens("docker exec -i web sh")));
    }

    #[test]
    fn test_attach_streams_delegate_with_exit_message() {
        let handoff = Rc::new(RecordingHandoff::default());
        let ctx = context(Rc::clone(&handoff), false);
        let parsed = parse(CommandKind::Create, &tokens("-a stdout ubuntu")).unwrap();

        let Delegation::Handled(outcome) =
            maybe_delegate(&ctx, CommandKind::Create, parsed.args, parsed.options, false).unwrap()
        else {
            panic!("expected delegation");
        };
        assert_eq!(
            outcome.after.map(|after| after.run()),
            Some(vec!["Container exited.".to_string()])
        );
    }

    #[test]
    fn test_declines_plain_commands() {
        let handoff = Rc::new(RecordingHandoff::default());
        let ctx = context(Rc::clone(&handoff), false);
        let parsed = parse(CommandKind::Exec, &tokens("web ls -la")).unwrap();
        let expected_args = parsed.args.clone();

        match maybe_delegate(&ctx, CommandKind::Exec, parsed.args, parsed.options, false).unwrap() {
            Delegation::Declined { args, .. } => assert_eq!(args, expected_args),
            Delegation::Handled(_) => panic!("should not delegate"),
        }
        assert!(handoff.last().is_none());
    }
}
