//! Translation of parsed options into the keyword set the engine accepts
//!
//! Users describe ports, volumes and links as flat strings. The engine wants
//! them folded into one host configuration object; the helpers here build
//! and merge that object, filter option bags down to what an operation
//! accepts, and format engine values for display.

use std::collections::BTreeMap;

use chrono::{DateTime, TimeZone, Utc};
use serde_json::{json, Map, Value};

use crate::shell::catalog::{allowed_destinations, CommandKind};
use crate::shell::value::{ArgValue, Kwargs};
use crate::{Result, SkiffError};

/// Where a container port is published on the host
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PortBinding {
    /// Any free host port on every interface
    Any,
    HostPort(String),
    Interface { ip: String, port: Option<String> },
}

impl PortBinding {
    fn host_ip_and_port(&self) -> (&str, &str) {
        match self {
            PortBinding::Any => ("", ""),
            PortBinding::HostPort(port) => ("", port),
            PortBinding::Interface { ip, port } => (ip, port.as_deref().unwrap_or("")),
        }
    }
}

/// A host path mounted into the container
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VolumeBind {
    pub bind: String,
    pub ro: bool,
}

/// Value of one `KEY=VALUE` pair, optionally coerced to a boolean
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KvValue {
    Text(String),
    Flag(bool),
}

/// Parse `[ip:]hostPort:containerPort` or a bare `containerPort`
pub fn parse_port_bindings(bindings: &[String]) -> BTreeMap<String, PortBinding> {
    let non_empty = |s: &str| (!s.is_empty()).then(|| s.to_string());

    bindings
        .iter()
        .map(|binding| {
            let parts: Vec<&str> = binding.split(':').collect();
            match parts.as_slice() {
                [ip, host, container, ..] => (
                    container.to_string(),
                    PortBinding::Interface {
                        ip: ip.to_string(),
                        port: non_empty(*host),
                    },
                ),
                [host, container] => (
                    container.to_string(),
                    non_empty(*host).map_or(PortBinding::Any, PortBinding::HostPort),
                ),
                _ => (binding.clone(), PortBinding::Any),
            }
        })
        .collect()
}

/// Parse exposed ports; `3300-3302` expands to every port in the range
pub fn parse_exposed_ports(ports: &[String]) -> Result<BTreeMap<String, PortBinding>> {
    let mut result = BTreeMap::new();
    for port in ports {
        match port.split_once('-') {
            Some((first, last)) => {
                let parse = |s: &str| {
                    s.trim().parse::<u16>().map_err(|_| {
                        SkiffError::InvalidArgument(format!("Invalid port range: {port}"))
                    })
                };
                for number in parse(first)?..=parse(last)? {
                    result.insert(number.to_string(), PortBinding::Any);
                }
            }
            None => {
                result.insert(port.clone(), PortBinding::Any);
            }
        }
    }
    Ok(result)
}

/// Parse `hostPath:containerPath[:ro]`; a bare container path binds nothing
pub fn parse_volume_bindings(volumes: &[String]) -> BTreeMap<String, VolumeBind> {
    volumes
        .iter()
        .filter_map(|volume| {
            let parts: Vec<&str> = volume.split(':').collect();
            let (host, bind, ro) = match parts.as_slice() {
                [host, bind, mode, ..] => (*host, *bind, *mode == "ro"),
                [host, bind] => (*host, *bind, false),
                _ => return None,
            };
            (!host.is_empty()).then(|| {
                (
                    host.to_string(),
                    VolumeBind {
                        bind: bind.to_string(),
                        ro,
                    },
                )
            })
        })
        .collect()
}

/// Container paths named by `-v` values, bound or anonymous
pub fn container_volume_paths(volumes: &[String]) -> Vec<String> {
    volumes
        .iter()
        .map(|volume| match volume.split(':').collect::<Vec<_>>().as_slice() {
            [_, container, ..] => container.to_string(),
            _ => volume.clone(),
        })
        .collect()
}

/// Parse `name:alias` links; a missing alias defaults to the name
pub fn parse_links(links: &[String]) -> BTreeMap<String, String> {
    links
        .iter()
        .map(|link| match link.split_once(':') {
            Some((name, alias)) => (name.to_string(), alias.to_string()),
            None => (link.clone(), link.clone()),
        })
        .collect()
}

/// Parse `KEY=VALUE` pairs, turning literal true/false into booleans when asked
pub fn parse_kv(values: &[String], coerce_bool: bool) -> BTreeMap<String, KvValue> {
    values
        .iter()
        .map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair.as_str(), ""));
            let value = match value.to_ascii_lowercase().as_str() {
                "true" if coerce_bool => KvValue::Flag(true),
                "false" if coerce_bool => KvValue::Flag(false),
                _ => KvValue::Text(value.to_string()),
            };
            (key.to_string(), value)
        })
        .collect()
}

pub fn kv_to_json(pairs: &BTreeMap<String, KvValue>) -> Value {
    pairs
        .iter()
        .map(|(key, value)| {
            let value = match value {
                KvValue::Text(text) => Value::String(text.clone()),
                KvValue::Flag(flag) => Value::Bool(*flag),
            };
            (key.clone(), value)
        })
        .collect::<Map<_, _>>()
        .into()
}

/// Host-side settings of a new container
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HostConfig {
    pub port_bindings: BTreeMap<String, PortBinding>,
    pub binds: BTreeMap<String, VolumeBind>,
    pub links: BTreeMap<String, String>,
    pub volumes_from: Vec<String>,
    pub network_mode: Option<String>,
    pub publish_all_ports: bool,
}

impl HostConfig {
    pub fn is_empty(&self) -> bool {
        *self == HostConfig::default()
    }

    /// Engine API representation
    pub fn to_api(&self) -> Value {
        let mut config = Map::new();

        if !self.port_bindings.is_empty() {
            let bindings: Map<String, Value> = self
                .port_bindings
                .iter()
                .map(|(port, binding)| {
                    let (ip, host_port) = binding.host_ip_and_port();
                    (
                        with_protocol(port),
                        json!([{ "HostIp": ip, "HostPort": host_port }]),
                    )
                })
                .collect();
            config.insert("PortBindings".into(), bindings.into());
        }
        if !self.binds.is_empty() {
            let binds: Vec<String> = self
                .binds
                .iter()
                .map(|(host, bind)| {
                    let mode = if bind.ro { "ro" } else { "rw" };
                    format!("{host}:{}:{mode}", bind.bind)
                })
                .collect();
            config.insert("Binds".into(), binds.into());
        }
        if !self.links.is_empty() {
            let links: Vec<String> = self
                .links
                .iter()
                .map(|(name, alias)| format!("{name}:{alias}"))
                .collect();
            config.insert("Links".into(), links.into());
        }
        if !self.volumes_from.is_empty() {
            config.insert("VolumesFrom".into(), self.volumes_from.clone().into());
        }
        if let Some(mode) = &self.network_mode {
            config.insert("NetworkMode".into(), mode.clone().into());
        }
        if self.publish_all_ports {
            config.insert("PublishAllPorts".into(), true.into());
        }

        Value::Object(config)
    }
}

/// `3306` becomes `3306/tcp`; ports that name a protocol are kept
pub fn with_protocol(port: &str) -> String {
    if port.contains('/') {
        port.to_string()
    } else {
        format!("{port}/tcp")
    }
}

/// Drop every key `kind` does not forward to the engine
pub fn allowed_args(kind: CommandKind, mut kwargs: Kwargs) -> Kwargs {
    let allowed = allowed_destinations(kind);
    kwargs.retain_keys(|key| allowed.contains(key));
    kwargs
}

/// Expand run/create options into a complete create-container keyword set.
///
/// `args` holds the image followed by the command. The returned bag still
/// carries translator-only keys; filter it with [`allowed_args`] or
/// [`split_two_phase`] before calling the engine.
pub fn prepare_container(mut kwargs: Kwargs, args: &[String]) -> Result<Kwargs> {
    let image = args
        .first()
        .ok_or_else(|| SkiffError::InvalidArgument("Image name is required.".into()))?;
    kwargs.insert("image", ArgValue::Text(image.clone()));
    kwargs.insert("command", ArgValue::List(args[1..].to_vec()));

    let mut host = HostConfig::default();
    let mut ports: Vec<String> = Vec::new();

    let published = parse_port_bindings(&kwargs.list("port_bindings"));
    let exposed = parse_exposed_ports(&kwargs.list("expose"))?;
    for port in published.keys().chain(exposed.keys()) {
        if !ports.contains(port) {
            ports.push(port.clone());
        }
    }
    host.port_bindings.extend(exposed);
    host.port_bindings.extend(published);

    let volumes = kwargs.list("volumes");
    if !volumes.is_empty() {
        host.binds = parse_volume_bindings(&volumes);
        kwargs.insert("volumes", ArgValue::List(container_volume_paths(&volumes)));
    }

    host.links = parse_links(&kwargs.list("links"));

    host.volumes_from = kwargs
        .list("volumes_from")
        .join(",")
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(String::from)
        .collect();

    host.network_mode = kwargs.text("net").map(String::from);
    host.publish_all_ports = kwargs.flag("publish_all_ports");

    if !ports.is_empty() {
        kwargs.insert("ports", ArgValue::List(ports));
    }
    if !host.is_empty() {
        let merged = merge_json(kwargs.nested("host_config"), host.to_api());
        kwargs.insert("host_config", ArgValue::Nested(merged));
    }

    Ok(kwargs)
}

fn merge_json(existing: Option<&Value>, update: Value) -> Value {
    match existing {
        Some(existing) => merge_value(existing.clone(), update),
        None => update,
    }
}

/// Nested maps merge key by key; lists gain the entries they lack
fn merge_value(existing: Value, update: Value) -> Value {
    match (existing, update) {
        (Value::Object(mut merged), Value::Object(update)) => {
            for (key, value) in update {
                let value = match merged.remove(&key) {
                    Some(current) => merge_value(current, value),
                    None => value,
                };
                merged.insert(key, value);
            }
            Value::Object(merged)
        }
        (Value::Array(mut merged), Value::Array(update)) => {
            for item in update {
                if !merged.contains(&item) {
                    merged.push(item);
                }
            }
            Value::Array(merged)
        }
        (_, update) => update,
    }
}

/// Split a two-phase command's options into the create and start subsets
pub fn split_two_phase(kwargs: &Kwargs) -> (Kwargs, Kwargs) {
    (
        allowed_args(CommandKind::Create, kwargs.clone()),
        allowed_args(CommandKind::Start, kwargs.clone()),
    )
}

/// Human readable size using 1024-based steps
pub fn filesize(size: i64) -> String {
    const UNITS: [&str; 9] = ["B", "KB", "MB", "GB", "TB", "PB", "EB", "ZB", "YB"];

    if size <= 0 {
        return "0 B".to_string();
    }

    let mut scaled = size as f64;
    let mut unit = 0;
    while scaled >= 1024.0 && unit < UNITS.len() - 1 {
        scaled /= 1024.0;
        unit += 1;
    }

    let rounded = (scaled * 1000.0).round() / 1000.0;
    if rounded.fract() == 0.0 {
        format!("{rounded:.1} {}", UNITS[unit])
    } else {
        format!("{rounded} {}", UNITS[unit])
    }
}

/// `repo:tag` split on the last colon that isn't part of a registry host
pub fn split_repo_tag(name: &str) -> (String, Option<String>) {
    match name.rsplit_once(':') {
        Some((repo, tag)) if !tag.contains('/') => (repo.to_string(), Some(tag.to_string())),
        _ => (name.to_string(), None),
    }
}

/// First 12 hex digits of an engine id
pub fn short_id(id: &str) -> &str {
    let id = id.strip_prefix("sha256:").unwrap_or(id);
    &id[..id.len().min(12)]
}

/// Replace the `<none>` sentinel with the object's short id, for display only
pub fn display_name(value: &str, id: &str) -> String {
    if value == "<none>" {
        short_id(id).to_string()
    } else {
        value.to_string()
    }
}

/// First `width` characters, for per-item status lines
pub fn truncate(text: &str, width: usize) -> String {
    text.chars().take(width).collect()
}

/// Image filter typed after `images -f`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFilter {
    pub repository: String,
    pub tag: Option<String>,
}

impl ImageFilter {
    pub fn parse(filter: &str) -> Self {
        let (repository, tag) = split_repo_tag(filter);
        Self { repository, tag }
    }

    pub fn matches(&self, repository: &str, tag: &str) -> bool {
        self.repository == repository && self.tag.as_deref().map_or(true, |t| t == tag)
    }
}

/// Format a timestamp as a human-readable "time ago" string
pub fn format_time_ago(time: DateTime<Utc>) -> String {
    let duration = Utc::now().signed_duration_since(time);

    if duration.num_days() > 365 {
        format!("{} years ago", duration.num_days() / 365)
    } else if duration.num_days() > 30 {
        format!("{} months ago", duration.num_days() / 30)
    } else if duration.num_days() > 7 {
        format!("{} weeks ago", duration.num_days() / 7)
    } else if duration.num_days() > 0 {
        format!("{} days ago", duration.num_days())
    } else if duration.num_hours() > 0 {
        format!("{} hours ago", duration.num_hours())
    } else if duration.num_minutes() > 0 {
        format!("{} minutes ago", duration.num_minutes())
    } else {
        "Less than a minute ago".to_string()
    }
}

/// Same as [`format_time_ago`] for the engine's unix-seconds timestamps
pub fn format_unix_time_ago(seconds: i64) -> String {
    match Utc.timestamp_opt(seconds, 0).single() {
        Some(time) => format_time_ago(time),
        None => seconds.to_string(),
    }
}

/// Repositories pushed to a registry must be `user/repo` with a valid user
pub fn check_repo_tag(repo: &str) -> std::result::Result<(), &'static str> {
    let Some((user, _)) = repo.split_once('/') else {
        return Err("Format: user_name/repository_name[:tag].");
    };
    let valid = (4..=30).contains(&user.len())
        && user
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_');
    if valid {
        Ok(())
    } else {
        Err("Only [a-z0-9_] are allowed in user name, size between 4 and 30")
    }
}
