//! Docker Engine REST API client
//!
//! The shell is synchronous; this client owns a current-thread tokio
//! runtime and blocks on each request. `unix://` hosts are reached through
//! the daemon socket with hyper, TCP hosts with reqwest. Streaming
//! responses are pulled one chunk at a time as the caller iterates the
//! returned [`LineStream`], and Ctrl-C ends them early.

use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use flate2::write::GzEncoder;
use flate2::Compression;
use futures_util::{Stream, StreamExt};
use http_body_util::{BodyExt, Full};
use hyper::body::Bytes;
use hyper_util::rt::TokioIo;
use reqwest::{Method, Url};
use serde_json::{json, Map, Value};
use tokio::net::UnixStream;
use tokio::runtime::Runtime;
use tracing::{debug, info, warn};

use super::stream::{Demuxer, LineSplitter, LineStream};
use super::{ConnectError, Engine, EngineError, EngineResult};
use crate::shell::adapter::{split_repo_tag, with_protocol};
use crate::shell::interrupt::Interrupt;
use crate::shell::value::Kwargs;

type ChunkStream = Pin<Box<dyn Stream<Item = EngineResult<Vec<u8>>>>>;

/// Engines before this API version take host settings at start
const LAST_LEGACY_START: (u32, u32) = (1, 23);

enum Transport {
    Tcp(reqwest::Client),
    Unix(PathBuf),
}

/// One engine request; path segments and query are percent-encoded
struct EngineRequest {
    method: Method,
    url: Url,
    body: Option<(&'static str, Vec<u8>)>,
}

impl EngineRequest {
    fn query<K: AsRef<str>, V: AsRef<str>>(mut self, pairs: &[(K, V)]) -> Self {
        if !pairs.is_empty() {
            self.url.query_pairs_mut().extend_pairs(pairs.iter());
        }
        self
    }

    fn json(mut self, body: &Value) -> Self {
        self.body = Some(("application/json", body.to_string().into_bytes()));
        self
    }

    fn tar(mut self, archive: Vec<u8>) -> Self {
        self.body = Some(("application/x-tar", archive));
        self
    }

    /// Path and query as written in the request line
    fn target(&self) -> String {
        match self.url.query() {
            Some(query) => format!("{}?{query}", self.url.path()),
            None => self.url.path().to_string(),
        }
    }
}

/// Engine client for `unix://`, `tcp://`, `http://` and `https://` hosts
pub struct HttpEngine {
    transport: Transport,
    base: Url,
    timeout: Duration,
    runtime: Arc<Runtime>,
    interrupt: Interrupt,
    api_version: Option<(u32, u32)>,
}

impl HttpEngine {
    /// Build a client for `host` and check that the engine answers.
    ///
    /// `DOCKER_TLS_VERIFY` switches `tcp://` hosts to HTTPS, and
    /// `DOCKER_CERT_PATH/ca.pem` is trusted when present.
    pub fn connect(host: &str, timeout: Duration, interrupt: Interrupt) -> Result<Self, ConnectError> {
        let (transport, base) = transport_for(host)?;
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;

        let mut engine = Self {
            transport,
            base,
            timeout,
            runtime: Arc::new(runtime),
            interrupt,
            api_version: None,
        };

        info!(host, "connecting to engine");
        match engine.ping() {
            Ok(()) => {}
            Err(EngineError::Api { status: 401 | 403, .. }) => return Err(ConnectError::PermissionDenied),
            Err(EngineError::Io(e)) if e.kind() == std::io::ErrorKind::PermissionDenied => {
                return Err(ConnectError::PermissionDenied)
            }
            Err(EngineError::Http(e)) if is_tls_failure(&e) => {
                return Err(ConnectError::Tls {
                    host: host.to_string(),
                    reason: e.to_string(),
                })
            }
            Err(e) => {
                warn!(error = %e, "engine ping failed");
                return Err(ConnectError::Unreachable {
                    host: host.to_string(),
                });
            }
        }

        engine.api_version = engine.version().ok().as_ref().and_then(api_version);
        debug!(api_version = ?engine.api_version, "engine answered");
        Ok(engine)
    }

    fn request(&self, method: Method, segments: &[&str]) -> EngineRequest {
        let mut url = self.base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        debug!(%method, path = url.path(), "engine request");
        EngineRequest {
            method,
            url,
            body: None,
        }
    }

    /// Send `request` and return the status with the unread body
    async fn dispatch(&self, request: EngineRequest) -> EngineResult<(u16, ChunkStream)> {
        match &self.transport {
            Transport::Tcp(client) => {
                let mut builder = client.request(request.method, request.url);
                if let Some((content_type, body)) = request.body {
                    builder = builder
                        .header(reqwest::header::CONTENT_TYPE, content_type)
                        .body(body);
                }
                let response = builder.send().await?;
                let status = response.status().as_u16();
                let chunks: ChunkStream = Box::pin(
                    response
                        .bytes_stream()
                        .map(|chunk| chunk.map(|bytes| bytes.to_vec()).map_err(EngineError::from)),
                );
                Ok((status, chunks))
            }
            Transport::Unix(socket) => socket_request(socket, request).await,
        }
    }

    /// Whole request and body within the configured timeout
    fn send_bytes(&self, request: EngineRequest) -> EngineResult<Vec<u8>> {
        self.runtime.block_on(async {
            let call = async {
                let (status, chunks) = self.dispatch(request).await?;
                collect(check(status, chunks).await?).await
            };
            tokio::time::timeout(self.timeout, call)
                .await
                .map_err(|_| EngineError::Timeout(self.timeout))?
        })
    }

    fn send(&self, request: EngineRequest) -> EngineResult<()> {
        self.send_bytes(request)?;
        Ok(())
    }

    fn send_json(&self, request: EngineRequest) -> EngineResult<Value> {
        let body = self.send_bytes(request)?;
        if body.is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_slice(&body)?)
    }

    fn send_list(&self, request: EngineRequest) -> EngineResult<Vec<Value>> {
        match self.send_json(request)? {
            Value::Array(items) => Ok(items),
            Value::Null => Ok(Vec::new()),
            other => Err(EngineError::Protocol(format!("expected a list, got {other}"))),
        }
    }

    /// Long-running responses are read lazily. `head_timeout` bounds the
    /// wait for the response head only; the body may take as long as the
    /// engine keeps sending.
    fn send_stream(
        &self,
        request: EngineRequest,
        demux: bool,
        head_timeout: Option<Duration>,
    ) -> EngineResult<LineStream> {
        let chunks = self.runtime.block_on(async {
            let head = async {
                let (status, chunks) = self.dispatch(request).await?;
                check(status, chunks).await
            };
            let bounded = async {
                match head_timeout {
                    Some(limit) => tokio::time::timeout(limit, head)
                        .await
                        .map_err(|_| EngineError::Timeout(limit))?,
                    None => head.await,
                }
            };
            tokio::select! {
                head = bounded => head,
                () = self.interrupt.raised() => Err(EngineError::Interrupted),
            }
        })?;

        Ok(chunk_lines(
            Arc::clone(&self.runtime),
            chunks,
            demux,
            self.interrupt.clone(),
        ))
    }

    fn post_empty(&self, segments: &[&str], query: &[(&str, String)]) -> EngineResult<()> {
        self.send(self.request(Method::POST, segments).query(query))
    }
}

fn transport_for(host: &str) -> Result<(Transport, Url), ConnectError> {
    if let Some(socket) = host.strip_prefix("unix://") {
        let base = Url::parse("http://localhost/").map_err(|_| ConnectError::UnsupportedHost(host.to_string()))?;
        return Ok((Transport::Unix(PathBuf::from(socket)), base));
    }

    let tls = std::env::var_os("DOCKER_TLS_VERIFY").is_some_and(|v| !v.is_empty());
    let base = base_url(host, tls)?;

    let mut builder = reqwest::Client::builder().user_agent(user_agent());
    if let Some(cert_path) = std::env::var_os("DOCKER_CERT_PATH") {
        let ca = Path::new(&cert_path).join("ca.pem");
        if ca.exists() {
            let pem = std::fs::read(&ca)?;
            let certificate = reqwest::Certificate::from_pem(&pem).map_err(|e| ConnectError::Tls {
                host: host.to_string(),
                reason: e.to_string(),
            })?;
            builder = builder.add_root_certificate(certificate);
        }
    }
    let client = builder.build().map_err(|e| ConnectError::Tls {
        host: host.to_string(),
        reason: e.to_string(),
    })?;
    Ok((Transport::Tcp(client), base))
}

fn base_url(host: &str, tls: bool) -> Result<Url, ConnectError> {
    let scheme = if tls { "https" } else { "http" };
    let base = if let Some(address) = host.strip_prefix("tcp://") {
        format!("{scheme}://{address}")
    } else if host.starts_with("http://") || host.starts_with("https://") {
        host.to_string()
    } else if host.contains("://") {
        return Err(ConnectError::UnsupportedHost(host.to_string()));
    } else {
        format!("{scheme}://{host}")
    };
    Url::parse(&base).map_err(|_| ConnectError::UnsupportedHost(host.to_string()))
}

fn user_agent() -> String {
    format!("skiff/{}", crate::VERSION)
}

/// HTTP/1.1 over the daemon's Unix socket, one connection per request
async fn socket_request(socket: &Path, request: EngineRequest) -> EngineResult<(u16, ChunkStream)> {
    let stream = UnixStream::connect(socket).await?;
    let (mut sender, connection) = hyper::client::conn::http1::handshake(TokioIo::new(stream)).await?;
    tokio::spawn(async move {
        if let Err(e) = connection.await {
            debug!(error = %e, "engine socket connection closed");
        }
    });

    let method = hyper::Method::from_bytes(request.method.as_str().as_bytes())
        .map_err(|e| EngineError::Protocol(e.to_string()))?;
    let mut builder = hyper::Request::builder()
        .method(method)
        .uri(request.target())
        .header(hyper::header::HOST, "localhost")
        .header(hyper::header::USER_AGENT, user_agent());
    let body = match request.body {
        Some((content_type, body)) => {
            builder = builder.header(hyper::header::CONTENT_TYPE, content_type);
            body
        }
        None => Vec::new(),
    };
    let request = builder
        .body(Full::new(Bytes::from(body)))
        .map_err(|e| EngineError::Protocol(e.to_string()))?;

    let response = sender.send_request(request).await?;
    let status = response.status().as_u16();
    let chunks: ChunkStream = Box::pin(
        response
            .into_body()
            .into_data_stream()
            .map(|chunk| chunk.map(|bytes| bytes.to_vec()).map_err(EngineError::from)),
    );
    Ok((status, chunks))
}

fn is_tls_failure(error: &reqwest::Error) -> bool {
    let mut source: Option<&dyn std::error::Error> = Some(error);
    while let Some(current) = source {
        let text = current.to_string().to_lowercase();
        if text.contains("certificate") || text.contains("tls") || text.contains("ssl") {
            return true;
        }
        source = current.source();
    }
    false
}

async fn collect(mut chunks: ChunkStream) -> EngineResult<Vec<u8>> {
    let mut body = Vec::new();
    while let Some(chunk) = chunks.next().await {
        body.extend(chunk?);
    }
    Ok(body)
}

/// Error statuses become `Api` carrying the engine's explanation
async fn check(status: u16, chunks: ChunkStream) -> EngineResult<ChunkStream> {
    if (200..300).contains(&status) || status == 304 {
        return Ok(chunks);
    }
    let body = collect(chunks).await.unwrap_or_default();
    let body = String::from_utf8_lossy(&body);
    let explanation = serde_json::from_str::<Value>(&body)
        .ok()
        .and_then(|v| v.get("message").and_then(Value::as_str).map(String::from))
        .unwrap_or_else(|| body.trim().to_string());
    Err(EngineError::api(status, explanation))
}

/// Turn a chunked response into lines, blocking on the runtime per chunk.
/// A transport error ends the stream after one line describing it; an
/// interrupt ends it at once.
fn chunk_lines(runtime: Arc<Runtime>, mut chunks: ChunkStream, demux: bool, interrupt: Interrupt) -> LineStream {
    let mut demuxer = demux.then(Demuxer::default);
    let mut splitter = LineSplitter::default();
    let mut pending = std::collections::VecDeque::new();
    let mut done = false;

    LineStream::new(std::iter::from_fn(move || loop {
        if let Some(line) = pending.pop_front() {
            return Some(line);
        }
        if done {
            return None;
        }

        let next = runtime.block_on(async {
            tokio::select! {
                chunk = chunks.next() => Some(chunk),
                () = interrupt.raised() => None,
            }
        });
        let Some(next) = next else {
            debug!("stream interrupted");
            done = true;
            return None;
        };

        match next {
            Some(Ok(bytes)) => {
                let payload = match demuxer.as_mut() {
                    Some(demuxer) => demuxer.push(&bytes),
                    None => bytes,
                };
                pending.extend(splitter.push(&payload));
            }
            Some(Err(e)) => {
                done = true;
                pending.push_back(format!("Error: {e}"));
            }
            None => {
                done = true;
                if let Some(demuxer) = demuxer.as_mut() {
                    let rest = demuxer.finish();
                    pending.extend(splitter.push(&rest));
                }
                pending.extend(splitter.finish());
            }
        }
    }))
}

fn set_flag(query: &mut Vec<(&'static str, String)>, key: &'static str, value: bool) {
    query.push((key, if value { "1" } else { "0" }.to_string()));
}

/// `ApiVersion` of a version document, as (major, minor)
fn api_version(version: &Value) -> Option<(u32, u32)> {
    let (major, minor) = version.get("ApiVersion")?.as_str()?.split_once('.')?;
    Some((major.parse().ok()?, minor.parse().ok()?))
}

/// Host settings sent with start. Newer engines refuse them there; they
/// get the same settings in the create call's host config.
fn start_config(options: &Kwargs, api_version: Option<(u32, u32)>) -> Option<Value> {
    let legacy = api_version.is_some_and(|version| version <= LAST_LEGACY_START);
    (legacy && options.flag("publish_all_ports")).then(|| json!({ "PublishAllPorts": true }))
}

/// Image references keep their `/` separators in the request path
fn image_path<'a>(image: &'a str, tail: &[&'a str]) -> Vec<&'a str> {
    let mut segments = vec!["images"];
    segments.extend(image.split('/'));
    segments.extend_from_slice(tail);
    segments
}

/// Gzip-compressed tar of a build context directory
fn context_archive(path: &Path) -> EngineResult<Vec<u8>> {
    let encoder = GzEncoder::new(Vec::new(), Compression::default());
    let mut archive = tar::Builder::new(encoder);
    archive.follow_symlinks(false);
    archive.append_dir_all(".", path)?;
    let encoder = archive.into_inner()?;
    Ok(encoder.finish()?)
}

fn is_remote_context(path: &str) -> bool {
    ["http://", "https://", "git://", "github.com/"]
        .iter()
        .any(|prefix| path.starts_with(prefix))
}

impl Engine for HttpEngine {
    fn ping(&self) -> EngineResult<()> {
        self.send(self.request(Method::GET, &["_ping"]))
    }

    fn version(&self) -> EngineResult<Value> {
        self.send_json(self.request(Method::GET, &["version"]))
    }

    fn info(&self) -> EngineResult<Value> {
        self.send_json(self.request(Method::GET, &["info"]))
    }

    fn containers(&self, options: &Kwargs) -> EngineResult<Vec<Value>> {
        let mut query = Vec::new();
        let limit = if options.flag("latest") {
            Some(1)
        } else {
            options.number("limit")
        };
        set_flag(&mut query, "all", options.flag("all") || limit.is_some());
        if let Some(limit) = limit {
            query.push(("limit", limit.to_string()));
        }

        let mut filters = match options.nested("filters") {
            Some(Value::Object(map)) => map.clone(),
            _ => Map::new(),
        };
        for key in ["before", "since"] {
            if let Some(value) = options.text(key) {
                filters.insert(key.to_string(), json!([value]));
            }
        }
        if !filters.is_empty() {
            query.push(("filters", Value::Object(filters).to_string()));
        }

        self.send_list(self.request(Method::GET, &["containers", "json"]).query(&query))
    }

    fn inspect_container(&self, container: &str) -> EngineResult<Value> {
        self.send_json(self.request(Method::GET, &["containers", container, "json"]))
    }

    fn create_container(&self, options: &Kwargs) -> EngineResult<Value> {
        let mut body = Map::new();
        if let Some(image) = options.text("image") {
            body.insert("Image".into(), image.into());
        }
        let command = options.list("command");
        if !command.is_empty() {
            body.insert("Cmd".into(), command.into());
        }
        let environment = options.list("environment");
        if !environment.is_empty() {
            body.insert("Env".into(), environment.into());
        }
        if let Some(hostname) = options.text("hostname") {
            body.insert("Hostname".into(), hostname.into());
        }
        let tty = options.flag("tty");
        let stdin_open = options.flag("stdin_open");
        body.insert("Tty".into(), tty.into());
        body.insert("OpenStdin".into(), stdin_open.into());
        body.insert("AttachStdin".into(), stdin_open.into());
        body.insert("AttachStdout".into(), true.into());
        body.insert("AttachStderr".into(), true.into());

        let ports: Map<String, Value> = options
            .list("ports")
            .iter()
            .map(|port| (with_protocol(port), json!({})))
            .collect();
        if !ports.is_empty() {
            body.insert("ExposedPorts".into(), ports.into());
        }
        let volumes: Map<String, Value> = options
            .list("volumes")
            .into_iter()
            .map(|path| (path, json!({})))
            .collect();
        if !volumes.is_empty() {
            body.insert("Volumes".into(), volumes.into());
        }
        if let Some(host_config) = options.nested("host_config") {
            body.insert("HostConfig".into(), host_config.clone());
        }

        let mut request = self.request(Method::POST, &["containers", "create"]);
        if let Some(name) = options.text("name") {
            request = request.query(&[("name", name)]);
        }
        self.send_json(request.json(&Value::Object(body)))
    }

    fn start(&self, container: &str, options: &Kwargs) -> EngineResult<()> {
        let mut request = self.request(Method::POST, &["containers", container, "start"]);
        match start_config(options, self.api_version) {
            Some(config) => request = request.json(&config),
            None => debug!(?options, "start options were applied at create"),
        }
        self.send(request)
    }

    fn stop(&self, container: &str) -> EngineResult<()> {
        self.post_empty(&["containers", container, "stop"], &[])
    }

    fn kill(&self, container: &str, signal: &str) -> EngineResult<()> {
        self.post_empty(
            &["containers", container, "kill"],
            &[("signal", signal.to_string())],
        )
    }

    fn restart(&self, container: &str, timeout: Option<i64>) -> EngineResult<()> {
        let query: Vec<(&str, String)> = timeout.map(|t| ("t", t.to_string())).into_iter().collect();
        self.post_empty(&["containers", container, "restart"], &query)
    }

    fn pause(&self, container: &str) -> EngineResult<()> {
        self.post_empty(&["containers", container, "pause"], &[])
    }

    fn unpause(&self, container: &str) -> EngineResult<()> {
        self.post_empty(&["containers", container, "unpause"], &[])
    }

    fn remove_container(&self, container: &str, force: bool) -> EngineResult<()> {
        let mut query = Vec::new();
        set_flag(&mut query, "force", force);
        self.send(self.request(Method::DELETE, &["containers", container]).query(&query))
    }

    fn top(&self, container: &str) -> EngineResult<Value> {
        self.send_json(self.request(Method::GET, &["containers", container, "top"]))
    }

    fn logs(&self, container: &str, follow: bool) -> EngineResult<LineStream> {
        let mut query = Vec::new();
        set_flag(&mut query, "stdout", true);
        set_flag(&mut query, "stderr", true);
        set_flag(&mut query, "follow", follow);
        let request = self
            .request(Method::GET, &["containers", container, "logs"])
            .query(&query);
        self.send_stream(request, true, Some(self.timeout))
    }

    fn exec_create(&self, container: &str, cmd: &[String], tty: bool) -> EngineResult<String> {
        let body = json!({
            "Cmd": cmd,
            "AttachStdout": true,
            "AttachStderr": true,
            "Tty": tty,
        });
        let created = self.send_json(
            self.request(Method::POST, &["containers", container, "exec"])
                .json(&body),
        )?;
        created
            .get("Id")
            .and_then(Value::as_str)
            .map(String::from)
            .ok_or_else(|| EngineError::Protocol("exec create returned no Id".into()))
    }

    fn exec_start(&self, exec_id: &str, detach: bool, tty: bool) -> EngineResult<LineStream> {
        let request = self
            .request(Method::POST, &["exec", exec_id, "start"])
            .json(&json!({ "Detach": detach, "Tty": tty }));
        if detach {
            self.send(request)?;
            return Ok(LineStream::empty());
        }
        self.send_stream(request, !tty, Some(self.timeout))
    }

    fn images(&self, options: &Kwargs) -> EngineResult<Vec<Value>> {
        let mut query = Vec::new();
        set_flag(&mut query, "all", options.flag("all"));

        let mut filters = match options.nested("filters") {
            Some(Value::Object(map)) => map.clone(),
            _ => Map::new(),
        };
        if let Some(name) = options.text("name") {
            filters.insert("reference".into(), json!([name]));
        }
        if !filters.is_empty() {
            query.push(("filters", Value::Object(filters).to_string()));
        }

        self.send_list(self.request(Method::GET, &["images", "json"]).query(&query))
    }

    fn inspect_image(&self, image: &str) -> EngineResult<Value> {
        self.send_json(self.request(Method::GET, &image_path(image, &["json"])))
    }

    fn remove_image(&self, image: &str) -> EngineResult<()> {
        self.send(self.request(Method::DELETE, &image_path(image, &[])))
    }

    fn pull(&self, image: &str) -> EngineResult<LineStream> {
        let (repository, tag) = split_repo_tag(image);
        let query = [
            ("fromImage", repository),
            ("tag", tag.unwrap_or_else(|| "latest".to_string())),
        ];
        let request = self.request(Method::POST, &["images", "create"]).query(&query);
        self.send_stream(request, false, Some(self.timeout))
    }

    /// The context upload can outlast the timeout, so only Ctrl-C bounds it
    fn build(&self, options: &Kwargs) -> EngineResult<LineStream> {
        let path = options
            .text("path")
            .ok_or_else(|| EngineError::Protocol("build needs a context path".into()))?;

        let mut query: Vec<(&str, String)> = Vec::new();
        if let Some(tag) = options.text("tag") {
            query.push(("t", tag.to_string()));
        }
        set_flag(&mut query, "q", options.flag("quiet"));
        set_flag(&mut query, "nocache", options.flag("nocache"));
        set_flag(&mut query, "rm", options.text("rm") != Some("false"));

        let mut request = self.request(Method::POST, &["build"]);
        if is_remote_context(path) {
            query.push(("remote", path.to_string()));
        } else {
            let archive = context_archive(Path::new(path))?;
            debug!(path, bytes = archive.len(), "build context archived");
            request = request.tar(archive);
        }
        self.send_stream(request.query(&query), false, None)
    }

    fn search(&self, term: &str) -> EngineResult<Vec<Value>> {
        self.send_list(self.request(Method::GET, &["images", "search"]).query(&[("term", term)]))
    }

    fn tag(&self, image: &str, repository: &str, tag: Option<&str>, force: bool) -> EngineResult<()> {
        let mut query = vec![("repo", repository.to_string())];
        if let Some(tag) = tag {
            query.push(("tag", tag.to_string()));
        }
        set_flag(&mut query, "force", force);
        self.post_empty(&image_path(image, &["tag"]), &query)
    }

    fn volumes(&self, filters: Option<&Value>) -> EngineResult<Vec<Value>> {
        let mut request = self.request(Method::GET, &["volumes"]);
        if let Some(filters) = filters {
            request = request.query(&[("filters", filters.to_string())]);
        }
        let listing = self.send_json(request)?;
        match listing.get("Volumes") {
            Some(Value::Array(volumes)) => Ok(volumes.clone()),
            _ => Ok(Vec::new()),
        }
    }

    fn create_volume(&self, options: &Kwargs) -> EngineResult<Value> {
        let mut body = Map::new();
        if let Some(name) = options.text("name") {
            body.insert("Name".into(), name.into());
        }
        if let Some(driver) = options.text("driver") {
            body.insert("Driver".into(), driver.into());
        }
        if let Some(opts) = options.nested("driver_opts") {
            body.insert("DriverOpts".into(), opts.clone());
        }
        self.send_json(
            self.request(Method::POST, &["volumes", "create"])
                .json(&Value::Object(body)),
        )
    }

    fn inspect_volume(&self, name: &str) -> EngineResult<Value> {
        self.send_json(self.request(Method::GET, &["volumes", name]))
    }

    fn remove_volume(&self, name: &str) -> EngineResult<()> {
        self.send(self.request(Method::DELETE, &["volumes", name]))
    }
}
