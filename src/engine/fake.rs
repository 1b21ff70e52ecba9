//! In-memory engine used by handler and dispatcher tests

use std::cell::RefCell;
use std::collections::BTreeSet;
use std::io;

use serde_json::{json, Value};

use super::{Engine, EngineError, EngineResult, LineStream};
use crate::shell::value::Kwargs;

/// Canned engine state plus a log of every call made against it
#[derive(Default)]
pub struct FakeEngine {
    containers: Vec<Value>,
    images: Vec<Value>,
    volumes: Vec<Value>,
    log_lines: Vec<String>,
    failing: BTreeSet<String>,
    unreachable: BTreeSet<String>,
    calls: RefCell<Vec<String>>,
    kwargs: RefCell<Vec<(String, Kwargs)>>,
}

impl FakeEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_container(mut self, id: &str, name: &str, state: &str) -> Self {
        self.containers.push(json!({
            "Id": id,
            "Names": [format!("/{name}")],
            "Image": "ubuntu:latest",
            "Command": "bash",
            "Created": 1_420_070_400,
            "State": state,
            "Status": if state == "running" { "Up 2 hours" } else { "Exited (0) 1 hour ago" },
            "Ports": [{"PrivatePort": 3306, "PublicPort": 9999, "Type": "tcp", "IP": "0.0.0.0"}],
        }));
        self
    }

    pub fn with_image(mut self, id: &str, tags: Option<&[&str]>, size: i64) -> Self {
        self.images.push(json!({
            "Id": id,
            "RepoTags": tags,
            "Created": 1_420_070_400,
            "Size": size,
            "VirtualSize": size,
        }));
        self
    }

    pub fn with_volume(mut self, name: &str) -> Self {
        self.volumes.push(json!({
            "Name": name,
            "Driver": "local",
            "Mountpoint": format!("/var/lib/docker/volumes/{name}/_data"),
        }));
        self
    }

    pub fn with_logs(mut self, lines: &[&str]) -> Self {
        self.log_lines = lines.iter().map(|line| line.to_string()).collect();
        self
    }

    /// Every call naming `target` fails with an API error
    pub fn failing_on(mut self, target: &str) -> Self {
        self.failing.insert(target.to_string());
        self
    }

    /// Every call naming `target` fails as if the engine went away
    pub fn unreachable_on(mut self, target: &str) -> Self {
        self.unreachable.insert(target.to_string());
        self
    }

    /// Calls so far, as `"operation target"`
    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    /// Keyword bag of the latest call to `operation`
    pub fn last_kwargs(&self, operation: &str) -> Option<Kwargs> {
        self.kwargs
            .borrow()
            .iter()
            .rev()
            .find(|(name, _)| name == operation)
            .map(|(_, kwargs)| kwargs.clone())
    }

    fn record(&self, operation: &str, target: &str) -> EngineResult<()> {
        let entry = if target.is_empty() {
            operation.to_string()
        } else {
            format!("{operation} {target}")
        };
        self.calls.borrow_mut().push(entry);
        if self.failing.contains(target) {
            return Err(EngineError::api(404, format!("No such object: {target}")));
        }
        if self.unreachable.contains(target) {
            return Err(EngineError::Io(io::Error::new(
                io::ErrorKind::ConnectionRefused,
                "connection refused",
            )));
        }
        Ok(())
    }

    fn record_kwargs(&self, operation: &str, kwargs: &Kwargs) {
        self.kwargs
            .borrow_mut()
            .push((operation.to_string(), kwargs.clone()));
    }

    fn find_container(&self, name: &str) -> Option<&Value> {
        self.containers.iter().find(|container| {
            container["Id"] == name
                || container["Names"]
                    .as_array()
                    .is_some_and(|names| names.iter().any(|n| n == &format!("/{name}")))
        })
    }
}

impl Engine for FakeEngine {
    fn ping(&self) -> EngineResult<()> {
        self.record("ping", "")
    }

    fn version(&self) -> EngineResult<Value> {
        self.record("version", "")?;
        Ok(json!({"Version": "24.0.7", "ApiVersion": "1.43", "Os": "linux"}))
    }

    fn info(&self) -> EngineResult<Value> {
        self.record("info", "")?;
        Ok(json!({"Containers": self.containers.len(), "Images": self.images.len()}))
    }

    fn containers(&self, options: &Kwargs) -> EngineResult<Vec<Value>> {
        self.record("containers", "")?;
        self.record_kwargs("containers", options);

        let status = options
            .nested("filters")
            .and_then(|filters| filters["status"][0].as_str().map(String::from));
        let all = options.flag("all") || options.flag("latest") || options.number("limit").is_some();
        Ok(self
            .containers
            .iter()
            .filter(|container| match &status {
                Some(status) => container["State"] == status.as_str(),
                None => all || container["State"] == "running",
            })
            .cloned()
            .collect())
    }

    fn inspect_container(&self, container: &str) -> EngineResult<Value> {
        self.record("inspect_container", container)?;
        self.find_container(container)
            .map(|found| {
                json!({
                    "Id": found["Id"],
                    "Name": found["Names"][0],
                    "NetworkSettings": {"Ports": {"3306/tcp": [{"HostIp": "0.0.0.0", "HostPort": "9999"}]}},
                })
            })
            .ok_or_else(|| EngineError::api(404, format!("No such container: {container}")))
    }

    fn create_container(&self, options: &Kwargs) -> EngineResult<Value> {
        self.record("create_container", options.text("image").unwrap_or_default())?;
        self.record_kwargs("create_container", options);
        Ok(json!({"Id": "f00dfeedbeef0123456789", "Warnings": null}))
    }

    fn start(&self, container: &str, options: &Kwargs) -> EngineResult<()> {
        self.record("start", container)?;
        self.record_kwargs("start", options);
        Ok(())
    }

    fn stop(&self, container: &str) -> EngineResult<()> {
        self.record("stop", container)
    }

    fn kill(&self, container: &str, signal: &str) -> EngineResult<()> {
        self.record("kill", container)?;
        self.calls.borrow_mut().push(format!("signal {signal}"));
        Ok(())
    }

    fn restart(&self, container: &str, timeout: Option<i64>) -> EngineResult<()> {
        self.record("restart", container)?;
        if let Some(timeout) = timeout {
            self.calls.borrow_mut().push(format!("timeout {timeout}"));
        }
        Ok(())
    }

    fn pause(&self, container: &str) -> EngineResult<()> {
        self.record("pause", container)
    }

    fn unpause(&self, container: &str) -> EngineResult<()> {
        self.record("unpause", container)
    }

    fn remove_container(&self, container: &str, force: bool) -> EngineResult<()> {
        self.record("remove_container", container)?;
        if force {
            self.calls.borrow_mut().push("force".to_string());
        }
        Ok(())
    }

    fn top(&self, container: &str) -> EngineResult<Value> {
        self.record("top", container)?;
        Ok(json!({
            "Titles": ["UID", "PID", "CMD"],
            "Processes": [["root", "4242", "bash"]],
        }))
    }

    fn logs(&self, container: &str, follow: bool) -> EngineResult<LineStream> {
        self.record(if follow { "logs_follow" } else { "logs" }, container)?;
        Ok(LineStream::from_lines(self.log_lines.clone()))
    }

    fn exec_create(&self, container: &str, cmd: &[String], _tty: bool) -> EngineResult<String> {
        self.record("exec_create", container)?;
        self.calls.borrow_mut().push(format!("cmd {}", cmd.join(" ")));
        Ok("e1e1e1".to_string())
    }

    fn exec_start(&self, exec_id: &str, detach: bool, _tty: bool) -> EngineResult<LineStream> {
        self.record("exec_start", exec_id)?;
        if detach {
            return Ok(LineStream::empty());
        }
        Ok(LineStream::from_lines(self.log_lines.clone()))
    }

    fn images(&self, options: &Kwargs) -> EngineResult<Vec<Value>> {
        self.record("images", "")?;
        self.record_kwargs("images", options);

        let dangling = options
            .nested("filters")
            .is_some_and(|filters| filters["dangling"] == json!(["true"]));
        Ok(self
            .images
            .iter()
            .filter(|image| {
                !dangling || image["RepoTags"].is_null() || image["RepoTags"] == json!(["<none>:<none>"])
            })
            .cloned()
            .collect())
    }

    fn inspect_image(&self, image: &str) -> EngineResult<Value> {
        self.record("inspect_image", image)?;
        Ok(json!({"Id": image, "Architecture": "amd64"}))
    }

    fn remove_image(&self, image: &str) -> EngineResult<()> {
        self.record("remove_image", image)
    }

    fn pull(&self, image: &str) -> EngineResult<LineStream> {
        self.record("pull", image)?;
        Ok(LineStream::from_lines(vec![
            r#"{"status":"Pulling from library/ubuntu","id":"latest"}"#.to_string(),
            r#"{"status":"Download complete","id":"a1b2c3"}"#.to_string(),
        ]))
    }

    fn build(&self, options: &Kwargs) -> EngineResult<LineStream> {
        self.record("build", options.text("path").unwrap_or_default())?;
        self.record_kwargs("build", options);
        Ok(LineStream::from_lines(vec![
            r#"{"stream":"Step 1/1 : FROM scratch\n"}"#.to_string(),
        ]))
    }

    fn search(&self, term: &str) -> EngineResult<Vec<Value>> {
        self.record("search", term)?;
        if term == "nothing" {
            return Ok(Vec::new());
        }
        Ok(vec![json!({
            "name": term,
            "description": "Official image",
            "star_count": 10,
            "is_official": true,
            "is_automated": false,
        })])
    }

    fn tag(&self, image: &str, repository: &str, tag: Option<&str>, force: bool) -> EngineResult<()> {
        self.record("tag", image)?;
        self.calls.borrow_mut().push(format!(
            "into {repository} {} {force}",
            tag.unwrap_or("-")
        ));
        Ok(())
    }

    fn volumes(&self, filters: Option<&Value>) -> EngineResult<Vec<Value>> {
        self.record("volumes", "")?;
        if let Some(filters) = filters {
            self.calls.borrow_mut().push(format!("filters {filters}"));
        }
        Ok(self.volumes.clone())
    }

    fn create_volume(&self, options: &Kwargs) -> EngineResult<Value> {
        self.record("create_volume", options.text("name").unwrap_or_default())?;
        self.record_kwargs("create_volume", options);
        Ok(json!({"Name": options.text("name").unwrap_or("0a1b2c3d"), "Driver": "local"}))
    }

    fn inspect_volume(&self, name: &str) -> EngineResult<Value> {
        self.record("inspect_volume", name)?;
        self.volumes
            .iter()
            .find(|volume| volume["Name"] == name)
            .cloned()
            .ok_or_else(|| EngineError::api(404, format!("no such volume: {name}")))
    }

    fn remove_volume(&self, name: &str) -> EngineResult<()> {
        self.record("remove_volume", name)
    }
}
