//! Container engine client capability
//!
//! The shell talks to the engine through the object-safe [`Engine`] trait.
//! [`HttpEngine`] implements it against the Docker Engine REST API over the
//! daemon socket or TCP; tests substitute an in-memory fake.

pub mod http;
pub mod stream;

#[cfg(test)]
pub mod fake;

use serde_json::Value;
use thiserror::Error;

use crate::shell::value::Kwargs;

pub use http::HttpEngine;
pub use stream::LineStream;

/// Errors raised by engine calls after the client is connected
#[derive(Error, Debug)]
pub enum EngineError {
    /// The engine understood the request and refused it
    #[error("{explanation}")]
    Api { status: u16, explanation: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Socket error: {0}")]
    Socket(#[from] hyper::Error),

    #[error("The engine did not answer within {} seconds", .0.as_secs())]
    Timeout(std::time::Duration),

    #[error("Interrupted")]
    Interrupted,

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unexpected engine response: {0}")]
    Protocol(String),
}

impl EngineError {
    pub fn api(status: u16, explanation: impl Into<String>) -> Self {
        EngineError::Api {
            status,
            explanation: explanation.into(),
        }
    }
}

pub type EngineResult<T> = std::result::Result<T, EngineError>;

const PERMISSION_HELP: &str = r#"You don't have the necessary permissions to call Docker API.
Try the following:

  # Add a docker group if it does not exist yet.
  sudo groupadd docker

  # Add the connected user "${USER}" to the docker group.
  # Change the user name to match your preferred user.
  sudo gpasswd -a ${USER} docker

  # Restart the Docker daemon.
  sudo service docker restart

You may need to reboot the machine.
"#;

/// Startup failures; each message tells the user how to fix the problem
#[derive(Error, Debug)]
pub enum ConnectError {
    #[error("The Docker daemon does not seem to be running at {host}.\nStart it, or point DOCKER_HOST (or --host) at a reachable engine.")]
    Unreachable { host: String },

    #[error("Could not establish a trusted TLS connection to {host}: {reason}\nCheck that DOCKER_CERT_PATH contains the engine's ca.pem, or unset DOCKER_TLS_VERIFY for a plain TCP engine.")]
    Tls { host: String, reason: String },

    #[error("{}", PERMISSION_HELP)]
    PermissionDenied,

    #[error("Unsupported engine host '{0}'.\nPoint DOCKER_HOST (or --host) at a unix://, tcp://, http:// or https:// address.")]
    UnsupportedHost(String),

    #[error("Could not start the engine client: {0}")]
    Io(#[from] std::io::Error),
}

/// Operations the shell needs from a container engine.
///
/// Calls that take many optional settings receive the adapter's keyword
/// bag; everything else takes plain arguments. Streaming calls return a
/// single-pass [`LineStream`].
pub trait Engine {
    fn ping(&self) -> EngineResult<()>;
    fn version(&self) -> EngineResult<Value>;
    fn info(&self) -> EngineResult<Value>;

    /// Keys: `all`, `before`, `since`, `latest`, `limit`, `filters`
    fn containers(&self, options: &Kwargs) -> EngineResult<Vec<Value>>;
    fn inspect_container(&self, container: &str) -> EngineResult<Value>;
    /// Keys: `image`, `command`, `environment`, `hostname`, `name`, `tty`,
    /// `stdin_open`, `volumes`, `ports`, `host_config`
    fn create_container(&self, options: &Kwargs) -> EngineResult<Value>;
    /// Keys: the start half of a two-phase command, `publish_all_ports`
    fn start(&self, container: &str, options: &Kwargs) -> EngineResult<()>;
    fn stop(&self, container: &str) -> EngineResult<()>;
    fn kill(&self, container: &str, signal: &str) -> EngineResult<()>;
    fn restart(&self, container: &str, timeout: Option<i64>) -> EngineResult<()>;
    fn pause(&self, container: &str) -> EngineResult<()>;
    fn unpause(&self, container: &str) -> EngineResult<()>;
    fn remove_container(&self, container: &str, force: bool) -> EngineResult<()>;
    fn top(&self, container: &str) -> EngineResult<Value>;
    fn logs(&self, container: &str, follow: bool) -> EngineResult<LineStream>;
    /// Returns the exec instance id
    fn exec_create(&self, container: &str, cmd: &[String], tty: bool) -> EngineResult<String>;
    fn exec_start(&self, exec_id: &str, detach: bool, tty: bool) -> EngineResult<LineStream>;

    /// Keys: `all`, `name`, `filters`
    fn images(&self, options: &Kwargs) -> EngineResult<Vec<Value>>;
    fn inspect_image(&self, image: &str) -> EngineResult<Value>;
    fn remove_image(&self, image: &str) -> EngineResult<()>;
    fn pull(&self, image: &str) -> EngineResult<LineStream>;
    /// Keys: `path`, `tag`, `quiet`, `nocache`, `rm`
    fn build(&self, options: &Kwargs) -> EngineResult<LineStream>;
    fn search(&self, term: &str) -> EngineResult<Vec<Value>>;
    fn tag(&self, image: &str, repository: &str, tag: Option<&str>, force: bool) -> EngineResult<()>;

    fn volumes(&self, filters: Option<&Value>) -> EngineResult<Vec<Value>>;
    /// Keys: `name`, `driver`, `driver_opts`
    fn create_volume(&self, options: &Kwargs) -> EngineResult<Value>;
    fn inspect_volume(&self, name: &str) -> EngineResult<Value>;
    fn remove_volume(&self, name: &str) -> EngineResult<()>;
}
