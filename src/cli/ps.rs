//! `ps` handler

use serde_json::Value;

use crate::shell::adapter::{allowed_args, format_unix_time_ago, short_id, truncate};
use crate::shell::catalog::CommandKind;
use crate::shell::dispatcher::{Context, Invocation, Outcome};

const COMMAND_WIDTH: usize = 20;

/// List containers; only running ones unless `-a`, `-l` or `-n` widen it
pub fn execute(ctx: &Context, call: Invocation) -> crate::Result<Outcome> {
    let trunc = call.options.flag_or("trunc", true);
    let quiet = call.options.flag("quiet");
    let containers = ctx.engine.containers(&allowed_args(CommandKind::Ps, call.options))?;

    if containers.is_empty() {
        return Ok(Outcome::message("There are no containers to list."));
    }

    let id = |container: &Value| {
        let id = container["Id"].as_str().unwrap_or_default();
        if trunc {
            short_id(id).to_string()
        } else {
            id.to_string()
        }
    };

    if quiet {
        return Ok(Outcome::lines(containers.iter().map(id).collect()));
    }

    let rows = containers
        .iter()
        .map(|container| {
            let command = container["Command"].as_str().unwrap_or_default();
            let command = if trunc { truncate(command, COMMAND_WIDTH) } else { command.to_string() };
            vec![
                id(container),
                container["Image"].as_str().unwrap_or_default().to_string(),
                format!("\"{command}\""),
                container["Created"]
                    .as_i64()
                    .map(format_unix_time_ago)
                    .unwrap_or_default(),
                container["Status"].as_str().unwrap_or_default().to_string(),
                format_ports(&container["Ports"]),
                format_names(&container["Names"]),
            ]
        })
        .collect();

    Ok(Outcome::table(
        &["CONTAINER ID", "IMAGE", "COMMAND", "CREATED", "STATUS", "PORTS", "NAMES"],
        rows,
    ))
}

/// `0.0.0.0:9999->3306/tcp`, or just `3306/tcp` when the port isn't published
fn format_ports(ports: &Value) -> String {
    let Some(ports) = ports.as_array() else {
        return String::new();
    };
    ports
        .iter()
        .map(|port| {
            let private = format!(
                "{}/{}",
                port["PrivatePort"].as_i64().unwrap_or_default(),
                port["Type"].as_str().unwrap_or("tcp")
            );
            match (port["IP"].as_str(), port["PublicPort"].as_i64()) {
                (Some(ip), Some(public)) => format!("{ip}:{public}->{private}"),
                _ => private,
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn format_names(names: &Value) -> String {
    names
        .as_array()
        .map(|names| {
            names
                .iter()
                .filter_map(Value::as_str)
                .map(|name| name.trim_start_matches('/'))
                .collect::<Vec<_>>()
                .join(",")
        })
        .unwrap_or_default()
}
