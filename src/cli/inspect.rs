//! `inspect`, `port` and `top` handlers

use serde_json::Value;
use tracing::debug;

use crate::cli::cell;
use crate::shell::adapter::with_protocol;
use crate::shell::dispatcher::{Context, Invocation, Outcome};

/// Low-level details of containers or images. Each name is looked up as a
/// container first, then as an image.
pub fn execute(ctx: &Context, call: Invocation) -> crate::Result<Outcome> {
    if call.args.is_empty() {
        return Ok(Outcome::message("Container or image ID is required."));
    }

    let mut documents = Vec::with_capacity(call.args.len());
    for name in &call.args {
        let document = match ctx.engine.inspect_container(name) {
            Ok(container) => container,
            Err(e) => {
                debug!(name = %name, error = %e, "not a container, trying images");
                ctx.engine.inspect_image(name)?
            }
        };
        documents.push(document);
    }
    Ok(Outcome::documents(documents))
}

/// Public-facing port mappings, optionally for a single private port
pub fn port(ctx: &Context, call: Invocation) -> crate::Result<Outcome> {
    let Some(container) = call.args.first() else {
        return Ok(Outcome::message("Container name is required."));
    };
    let wanted = call.args.get(1).map(|port| with_protocol(port));

    let details = ctx.engine.inspect_container(container)?;
    let mut lines = Vec::new();
    if let Some(ports) = details["NetworkSettings"]["Ports"].as_object() {
        for (private, bindings) in ports {
            if wanted.as_ref().is_some_and(|wanted| wanted != private) {
                continue;
            }
            for binding in bindings.as_array().into_iter().flatten() {
                lines.push(format!(
                    "{private} -> {}:{}",
                    cell(&binding["HostIp"]),
                    cell(&binding["HostPort"])
                ));
            }
        }
    }

    if lines.is_empty() {
        return Ok(Outcome::message(format!("There are no port mappings for {container}.")));
    }
    Ok(Outcome::lines(lines))
}

/// Processes running inside a container
pub fn top(ctx: &Context, call: Invocation) -> crate::Result<Outcome> {
    let Some(container) = call.args.first() else {
        return Ok(Outcome::message("Container name is required."));
    };

    let processes = ctx.engine.top(container)?;
    let headers: Vec<String> = strings(&processes["Titles"]);
    let rows = processes["Processes"]
        .as_array()
        .map(|rows| rows.iter().map(strings).collect())
        .unwrap_or_default();

    let headers: Vec<&str> = headers.iter().map(String::as_str).collect();
    Ok(Outcome::table(&headers, rows))
}

fn strings(value: &Value) -> Vec<String> {
    value
        .as_array()
        .map(|items| items.iter().map(cell).collect())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::testing::{context, invocation, lines, table};
    use crate::engine::fake::FakeEngine;
    use crate::shell::catalog::CommandKind;
    use crate::shell::dispatcher::Output;

    #[test]
    fn test_inspect_falls_back_to_images() {
        let (ctx, engine, _) = context(FakeEngine::new().with_container("aaaa", "web", "running"));
        let outcome = execute(&ctx, invocation(CommandKind::Inspect, "web ubuntu")).unwrap();

        let Output::Documents(documents) = outcome.output else {
            panic!("expected documents");
        };
        assert_eq!(documents.len(), 2);
        assert_eq!(documents[0]["Id"], "aaaa");
        assert_eq!(documents[1]["Architecture"], "amd64");
        assert_eq!(
            engine.calls(),
            vec!["inspect_container web", "inspect_container ubuntu", "inspect_image ubuntu"]
        );
    }

    #[test]
    fn test_inspect_requires_a_name() {
        let (ctx, _, _) = context(FakeEngine::new());
        let outcome = execute(&ctx, Invocation::default()).unwrap();
        assert_eq!(lines(outcome), vec!["Container or image ID is required."]);
    }

    #[test]
    fn test_port_mappings() {
        let (ctx, _, _) = context(FakeEngine::new().with_container("aaaa", "db", "running"));

        let outcome = port(&ctx, invocation(CommandKind::Port, "db")).unwrap();
        assert_eq!(lines(outcome), vec!["3306/tcp -> 0.0.0.0:9999"]);

        let outcome = port(&ctx, invocation(CommandKind::Port, "db 3306")).unwrap();
        assert_eq!(lines(outcome), vec!["3306/tcp -> 0.0.0.0:9999"]);

        let outcome = port(&ctx, invocation(CommandKind::Port, "db 80")).unwrap();
        assert_eq!(lines(outcome), vec!["There are no port mappings for db."]);
    }

    #[test]
    fn test_top_table() {
        let (ctx, _, _) = context(FakeEngine::new());
        let (headers, rows) = table(top(&ctx, invocation(CommandKind::Top, "web")).unwrap());

        assert_eq!(headers, vec!["UID", "PID", "CMD"]);
        assert_eq!(rows, vec![vec!["root", "4242", "bash"]]);
    }
}
