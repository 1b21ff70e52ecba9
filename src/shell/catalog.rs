//! Static catalog of every shell command and the options it accepts
//!
//! Commands form a closed enum. Each variant knows its spelling (which may
//! span two words, as in `volume create`), its one-line description, its
//! ordered option table, and the handler that executes it.

use std::collections::BTreeSet;

use crate::cli;
use crate::shell::dispatcher::Handler;
use crate::shell::option::{CommandOption, OptionKind};

/// Every command the shell understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CommandKind {
    Attach,
    Build,
    Clear,
    Create,
    Exec,
    Help,
    Images,
    Info,
    Inspect,
    Kill,
    Login,
    Logs,
    Pause,
    Port,
    Ps,
    Pull,
    Push,
    Refresh,
    Restart,
    Rm,
    Rmi,
    Run,
    Search,
    Shell,
    Start,
    Stop,
    Tag,
    Top,
    Unpause,
    Version,
    VolumeCreate,
    VolumeInspect,
    VolumeLs,
    VolumeRm,
}

impl CommandKind {
    /// All commands, in the order `help` lists them
    pub const ALL: [CommandKind; 34] = [
        CommandKind::Attach,
        CommandKind::Build,
        CommandKind::Clear,
        CommandKind::Create,
        CommandKind::Exec,
        CommandKind::Help,
        CommandKind::Images,
        CommandKind::Info,
        CommandKind::Inspect,
        CommandKind::Kill,
        CommandKind::Login,
        CommandKind::Logs,
        CommandKind::Ps,
        CommandKind::Pull,
        CommandKind::Pause,
        CommandKind::Port,
        CommandKind::Push,
        CommandKind::Refresh,
        CommandKind::Restart,
        CommandKind::Run,
        CommandKind::Rm,
        CommandKind::Rmi,
        CommandKind::Search,
        CommandKind::Shell,
        CommandKind::Start,
        CommandKind::Stop,
        CommandKind::Tag,
        CommandKind::Top,
        CommandKind::Unpause,
        CommandKind::Version,
        CommandKind::VolumeCreate,
        CommandKind::VolumeInspect,
        CommandKind::VolumeLs,
        CommandKind::VolumeRm,
    ];

    /// Command name as typed by the user
    pub fn name(self) -> &'static str {
        match self {
            CommandKind::Attach => "attach",
            CommandKind::Build => "build",
            CommandKind::Clear => "clear",
            CommandKind::Create => "create",
            CommandKind::Exec => "exec",
            CommandKind::Help => "help",
            CommandKind::Images => "images",
            CommandKind::Info => "info",
            CommandKind::Inspect => "inspect",
            CommandKind::Kill => "kill",
            CommandKind::Login => "login",
            CommandKind::Logs => "logs",
            CommandKind::Pause => "pause",
            CommandKind::Port => "port",
            CommandKind::Ps => "ps",
            CommandKind::Pull => "pull",
            CommandKind::Push => "push",
            CommandKind::Refresh => "refresh",
            CommandKind::Restart => "restart",
            CommandKind::Rm => "rm",
            CommandKind::Rmi => "rmi",
            CommandKind::Run => "run",
            CommandKind::Search => "search",
            CommandKind::Shell => "shell",
            CommandKind::Start => "start",
            CommandKind::Stop => "stop",
            CommandKind::Tag => "tag",
            CommandKind::Top => "top",
            CommandKind::Unpause => "unpause",
            CommandKind::Version => "version",
            CommandKind::VolumeCreate => "volume create",
            CommandKind::VolumeInspect => "volume inspect",
            CommandKind::VolumeLs => "volume ls",
            CommandKind::VolumeRm => "volume rm",
        }
    }

    pub fn from_name(name: &str) -> Option<CommandKind> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    /// Number of tokens the command name spans
    pub fn word_count(self) -> usize {
        self.name().split(' ').count()
    }

    /// One-line description shown by `help`
    pub fn description(self) -> &'static str {
        match self {
            CommandKind::Attach => "Attach to a running container.",
            CommandKind::Build => "Build a new image from the source code",
            CommandKind::Clear => "Clear the window.",
            CommandKind::Create => "Create a new container.",
            CommandKind::Exec => "Run a command in a running container.",
            CommandKind::Help => "Help on available commands.",
            CommandKind::Images => "List images.",
            CommandKind::Info => "Display system-wide information.",
            CommandKind::Inspect => "Return low-level information on a container or image.",
            CommandKind::Kill => "Kill one or more running containers",
            CommandKind::Login => {
                "Register or log in to a Docker registry server (default \"https://index.docker.io/v1/\")."
            }
            CommandKind::Logs => "Fetch the logs of a container.",
            CommandKind::Pause => "Pause all processes within a container.",
            CommandKind::Port => {
                "List port mappings for the container, or lookup the public-facing port that is NAT-ed to the private_port."
            }
            CommandKind::Ps => "List containers.",
            CommandKind::Pull => "Pull an image or a repository from the registry.",
            CommandKind::Push => "Push an image or a repository to the registry.",
            CommandKind::Refresh => "Refresh autocompletions.",
            CommandKind::Restart => "Restart a running container.",
            CommandKind::Rm => "Remove one or more containers.",
            CommandKind::Rmi => "Remove one or more images.",
            CommandKind::Run => "Run a command in a new container.",
            CommandKind::Search => "Search the Docker Hub for images.",
            CommandKind::Shell => "Get shell into a running container.",
            CommandKind::Start => "Restart a stopped container.",
            CommandKind::Stop => "Stop a running container.",
            CommandKind::Tag => "Tag an image into a repository.",
            CommandKind::Top => "Display the running processes of a container.",
            CommandKind::Unpause => "Unpause all processes within a container.",
            CommandKind::Version => "Show the Docker version information.",
            CommandKind::VolumeCreate => "Create a new volume.",
            CommandKind::VolumeInspect => "Inspect one or more volumes.",
            CommandKind::VolumeLs => "List volumes.",
            CommandKind::VolumeRm => "Remove a volume.",
        }
    }

    /// Visible options, in parse and display order
    pub fn options(self) -> &'static [CommandOption] {
        match self {
            CommandKind::Attach => ATTACH_OPTIONS,
            CommandKind::Build => BUILD_OPTIONS,
            CommandKind::Create => CREATE_OPTIONS,
            CommandKind::Exec => EXEC_OPTIONS,
            CommandKind::Images => IMAGES_OPTIONS,
            CommandKind::Inspect => INSPECT_OPTIONS,
            CommandKind::Kill => KILL_OPTIONS,
            CommandKind::Login => LOGIN_OPTIONS,
            CommandKind::Logs => LOGS_OPTIONS,
            CommandKind::Pause
            | CommandKind::Stop
            | CommandKind::Top
            | CommandKind::Unpause => RUNNING_CONTAINER_OPTIONS,
            CommandKind::Port => PORT_OPTIONS,
            CommandKind::Ps => PS_OPTIONS,
            CommandKind::Pull => PULL_OPTIONS,
            CommandKind::Push => PUSH_OPTIONS,
            CommandKind::Restart => RESTART_OPTIONS,
            CommandKind::Rm => RM_OPTIONS,
            CommandKind::Rmi => RMI_OPTIONS,
            CommandKind::Run => RUN_OPTIONS,
            CommandKind::Search => SEARCH_OPTIONS,
            CommandKind::Shell => SHELL_OPTIONS,
            CommandKind::Start => START_OPTIONS,
            CommandKind::Tag => TAG_OPTIONS,
            CommandKind::VolumeCreate => VOLUME_CREATE_OPTIONS,
            CommandKind::VolumeInspect | CommandKind::VolumeRm => VOLUME_NAMES_OPTIONS,
            CommandKind::VolumeLs => VOLUME_LS_OPTIONS,
            CommandKind::Clear
            | CommandKind::Help
            | CommandKind::Info
            | CommandKind::Refresh
            | CommandKind::Version => &[],
        }
    }

    /// Options the engine accepts but the reference CLI doesn't expose.
    /// They are never suggested and never read from user tokens.
    pub fn hidden_options(self) -> &'static [CommandOption] {
        match self {
            CommandKind::Start => START_HIDDEN,
            CommandKind::Run | CommandKind::Create => CREATE_HIDDEN,
            _ => &[],
        }
    }

    /// Function that executes the command
    pub fn handler(self) -> Handler {
        match self {
            CommandKind::Attach => cli::exec::attach,
            CommandKind::Build => cli::build::execute,
            CommandKind::Clear => cli::system::clear,
            CommandKind::Create => cli::run::create,
            CommandKind::Exec => cli::exec::execute,
            CommandKind::Help => cli::system::help,
            CommandKind::Images => cli::images::execute,
            CommandKind::Info => cli::system::info,
            CommandKind::Inspect => cli::inspect::execute,
            CommandKind::Kill => cli::stop::kill,
            CommandKind::Login => cli::push::login,
            CommandKind::Logs => cli::logs::execute,
            CommandKind::Pause => cli::stop::pause,
            CommandKind::Port => cli::inspect::port,
            CommandKind::Ps => cli::ps::execute,
            CommandKind::Pull => cli::pull::execute,
            CommandKind::Push => cli::push::execute,
            CommandKind::Refresh => cli::system::refresh,
            CommandKind::Restart => cli::start::restart,
            CommandKind::Rm => cli::rm::execute,
            CommandKind::Rmi => cli::rm::execute_rmi,
            CommandKind::Run => cli::run::execute,
            CommandKind::Search => cli::images::search,
            CommandKind::Shell => cli::exec::shell,
            CommandKind::Start => cli::start::execute,
            CommandKind::Stop => cli::stop::execute,
            CommandKind::Tag => cli::tag::execute,
            CommandKind::Top => cli::inspect::top,
            CommandKind::Unpause => cli::stop::unpause,
            CommandKind::Version => cli::system::version,
            CommandKind::VolumeCreate => cli::volume::create,
            CommandKind::VolumeInspect => cli::volume::inspect,
            CommandKind::VolumeLs => cli::volume::list,
            CommandKind::VolumeRm => cli::volume::remove,
        }
    }
}

impl std::fmt::Display for CommandKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Implicit `-h/--help`, prepended to every command
pub const HELP: CommandOption = CommandOption::flag(OptionKind::Boolean, Some("-h"), Some("--help"))
    .dest("help")
    .help("Display help for this command.");

/// Options in display order, `-h/--help` first
pub fn all_options(kind: CommandKind, include_hidden: bool) -> Vec<&'static CommandOption> {
    let mut options = vec![&HELP];
    options.extend(kind.options());
    if include_hidden {
        options.extend(kind.hidden_options());
    }
    options
}

/// Look an option up by any of its spellings
pub fn find_option(kind: CommandKind, token: &str) -> Option<&'static CommandOption> {
    if let Some(option) = kind
        .options()
        .iter()
        .find(|option| option.names().contains(&token))
    {
        return Some(option);
    }
    match token {
        "help" | "-h" | "--help" => Some(&HELP),
        _ => None,
    }
}

/// Destination keys that may be forwarded to the engine for `kind`
pub fn allowed_destinations(kind: CommandKind) -> BTreeSet<&'static str> {
    kind.options()
        .iter()
        .filter(|option| option.api_visible)
        .chain(kind.hidden_options())
        .map(CommandOption::dest_key)
        .collect()
}

const ATTACH_CHOICE: CommandOption = CommandOption::flag(OptionKind::Choice, Some("-a"), Some("--attach"))
    .dest("attach")
    .repeatable()
    .choices(&["stdin", "stdout", "stderr"])
    .api_hidden()
    .help("Attach to STDIN, STDOUT, or STDERR (can use multiple times).");

const ATTACH_FLAG: CommandOption = CommandOption::flag(OptionKind::Boolean, Some("-a"), Some("--attach"))
    .dest("attach")
    .api_hidden()
    .help("Attach container's STDOUT and STDERR and forward all signals to the process.");

const ENV: CommandOption = CommandOption::flag(OptionKind::KeyValue, Some("-e"), Some("--env"))
    .dest("environment")
    .repeatable()
    .help("Set environment variables.");

const EXPOSE: CommandOption = CommandOption::flag(OptionKind::Text, None, Some("--expose"))
    .dest("expose")
    .repeatable()
    .api_hidden()
    .help(
        "Expose a port or a range of ports (e.g. --expose=3300-3310) from the container without publishing it to your host.",
    );

const HOSTNAME: CommandOption = CommandOption::flag(OptionKind::Text, Some("-h"), Some("--hostname"))
    .dest("hostname")
    .help("Container host name.");

const CONTAINER_NAME: CommandOption = CommandOption::flag(OptionKind::Container, None, Some("--name"))
    .dest("name")
    .help("Assign a name to the container.");

const LINK: CommandOption = CommandOption::flag(OptionKind::Container, None, Some("--link"))
    .dest("links")
    .repeatable()
    .api_hidden()
    .help(
        "Add link to another container in the form of <name|id>:alias. To add multiple links: --link name1:alias1 --link name2:alias2...",
    );

const PUBLISH_ALL: CommandOption = CommandOption::flag(OptionKind::Boolean, Some("-P"), Some("--publish-all"))
    .dest("publish_all_ports")
    .api_hidden()
    .help("Publish all exposed ports to the host interfaces.");

const PUBLISH: CommandOption = CommandOption::flag(OptionKind::Text, Some("-p"), Some("--publish"))
    .dest("port_bindings")
    .repeatable()
    .api_hidden()
    .help(
        "Publish a container's port to the host. Format: ip:hostPort:containerPort or ip::containerPort or hostPort:containerPort or containerPort. To add multiple ports: --publish 1111:2222 --publish 3333:4444...",
    );

const INTERACTIVE: CommandOption = CommandOption::flag(OptionKind::Boolean, Some("-i"), Some("--interactive"))
    .dest("interactive")
    .default_flag(false)
    .api_hidden()
    .help("Keep STDIN open even if not attached.");

const TTY: CommandOption = CommandOption::flag(OptionKind::Boolean, Some("-t"), Some("--tty"))
    .dest("tty")
    .default_flag(false)
    .help("Allocate a pseudo-TTY.");

const REMOVE_ON_EXIT: CommandOption = CommandOption::flag(OptionKind::Boolean, None, Some("--rm"))
    .dest("remove")
    .api_hidden()
    .help("Remove the container when it exits. Can't be used with --detach");

const VOLUME: CommandOption = CommandOption::flag(OptionKind::FilePath, Some("-v"), Some("--volume"))
    .dest("volumes")
    .repeatable()
    .help(
        "Bind mount a volume (e.g., from the host: -v /host-path:/container-path, from Docker: -v /container-path).",
    );

const VOLUMES_FROM: CommandOption = CommandOption::flag(OptionKind::Container, None, Some("--volumes-from"))
    .dest("volumes_from")
    .repeatable()
    .api_hidden()
    .help(
        "Mount volumes from the specified containers. Can be specified multiple times. Alternatively, can accept a comma-separated string of container names.",
    );

const NET: CommandOption = CommandOption::flag(OptionKind::Text, None, Some("--net"))
    .dest("net")
    .choices(&["bridge", "none", "container:", "host"])
    .api_hidden()
    .help(
        "Network mode for the container. Possible values are \"bridge\", \"none\", \"container:<name|id>\", \"host\".",
    );

const IMAGE: CommandOption =
    CommandOption::positional(OptionKind::Image, "image").help("Image ID or name to use.");

const COMMAND: CommandOption = CommandOption::positional(OptionKind::Command, "command")
    .optional()
    .help("Command to run in a container.");

const CONTAINER: CommandOption =
    CommandOption::positional(OptionKind::Container, "container").help("Container ID or name to use.");

const RUNNING_CONTAINER: CommandOption = CommandOption::positional(OptionKind::RunningContainer, "container")
    .help("Container ID or name to use.");

const VOLUME_NAMES: CommandOption = CommandOption::positional(OptionKind::Volume, "name")
    .repeatable()
    .help("Volume name.");

const QUIET_IDS: CommandOption = CommandOption::flag(OptionKind::Boolean, Some("-q"), Some("--quiet"))
    .dest("quiet")
    .help("Only display numeric IDs.");

const ATTACH_OPTIONS: &[CommandOption] = &[
    CommandOption::flag(OptionKind::Boolean, None, Some("--no-stdin"))
        .dest("no_stdin")
        .default_flag(false)
        .api_hidden()
        .help("Do not attach STDIN."),
    CommandOption::flag(OptionKind::Choice, None, Some("--sig-proxy"))
        .dest("sig_proxy")
        .default_text("true")
        .choices(&["true", "false"])
        .api_hidden()
        .help("Proxy all received signals to the process."),
    RUNNING_CONTAINER,
    CommandOption::flag(OptionKind::Text, None, Some("--detach-keys"))
        .dest("detach_keys")
        .api_hidden()
        .help("Override the key sequence for detaching a container."),
];

const BUILD_OPTIONS: &[CommandOption] = &[
    CommandOption::flag(OptionKind::Image, Some("-t"), Some("--tag"))
        .dest("tag")
        .help("Repository name (and optionally a tag) to be applied to the resulting image in case of success."),
    CommandOption::flag(OptionKind::Boolean, Some("-q"), Some("--quiet"))
        .dest("quiet")
        .help("Suppress the verbose output generated by the containers."),
    CommandOption::flag(OptionKind::Choice, None, Some("--rm"))
        .dest("rm")
        .default_text("true")
        .choices(&["true", "false"])
        .help("Remove intermediate containers after a successful build."),
    CommandOption::flag(OptionKind::Boolean, None, Some("--no-cache"))
        .dest("nocache")
        .help("Do not use cache when building the image."),
    CommandOption::positional(OptionKind::DirPath, "path").help("Path or URL where the Dockerfile is located."),
];

const CREATE_OPTIONS: &[CommandOption] = &[
    ATTACH_CHOICE,
    ENV,
    EXPOSE,
    INTERACTIVE,
    LINK,
    HOSTNAME,
    CONTAINER_NAME,
    PUBLISH_ALL,
    PUBLISH,
    TTY,
    VOLUME,
    VOLUMES_FROM,
    IMAGE,
    COMMAND,
    NET,
];

const EXEC_OPTIONS: &[CommandOption] = &[
    CommandOption::flag(OptionKind::Boolean, Some("-d"), Some("--detach"))
        .dest("detach")
        .help("Detached mode: run command in the background."),
    INTERACTIVE,
    TTY,
    RUNNING_CONTAINER,
    CommandOption::positional(OptionKind::Command, "cmd")
        .optional()
        .help("Command to run in a container."),
];

const IMAGES_OPTIONS: &[CommandOption] = &[
    CommandOption::flag(OptionKind::Boolean, Some("-a"), Some("--all"))
        .dest("all")
        .help("Show all images (by default filter out the intermediate image layers)."),
    CommandOption::flag(OptionKind::Image, Some("-f"), Some("--filter"))
        .dest("name")
        .help("Provide name to filter on."),
    CommandOption::flag(OptionKind::Boolean, Some("-q"), Some("--quiet"))
        .dest("quiet")
        .help("Only show numeric IDs."),
];

const INSPECT_OPTIONS: &[CommandOption] = &[
    CommandOption::positional(OptionKind::Image, "image")
        .dest("image_id")
        .repeatable()
        .optional()
        .help("Image to inspect."),
    CommandOption::positional(OptionKind::Container, "container")
        .repeatable()
        .optional()
        .help("Container to inspect."),
];

/// Signal names accepted by `kill -s`
pub const SIGNALS: &[&str] = &[
    "ABRT", "ALRM", "BUS", "CLD", "CONT", "FPE", "HUP", "ILL", "INT", "KILL", "PIPE", "POLL",
    "PROF", "PWR", "QUIT", "RTMAX", "RTMIN", "SEGV", "STOP", "SYS", "TERM", "TRAP", "TSTP",
    "TTIN", "TTOU", "URG", "USR1", "USR2", "VTALRM", "WINCH", "XCPU", "XFSZ",
];

const KILL_OPTIONS: &[CommandOption] = &[
    CommandOption::flag(OptionKind::Choice, Some("-s"), Some("--signal"))
        .dest("signal")
        .default_text("KILL")
        .choices(SIGNALS)
        .help("Signal to send to the container"),
    RUNNING_CONTAINER,
];

const LOGIN_OPTIONS: &[CommandOption] = &[
    CommandOption::flag(OptionKind::Text, Some("-e"), Some("--email")).help("Email."),
    CommandOption::flag(OptionKind::Text, Some("-p"), Some("--password")).help("Password."),
    CommandOption::flag(OptionKind::Text, Some("-u"), Some("--username")).help("Username."),
    CommandOption::positional(OptionKind::Text, "server")
        .dest("registry")
        .optional()
        .help("Registry server."),
];

const LOGS_OPTIONS: &[CommandOption] = &[
    CommandOption::flag(OptionKind::Boolean, Some("-f"), Some("--follow"))
        .dest("stream")
        .help("Follow log output."),
    CONTAINER,
];

const RUNNING_CONTAINER_OPTIONS: &[CommandOption] = &[RUNNING_CONTAINER];

const PORT_OPTIONS: &[CommandOption] = &[
    CONTAINER,
    CommandOption::positional(OptionKind::Text, "port")
        .optional()
        .help("Port number (optionally with protocol)."),
];

const PS_OPTIONS: &[CommandOption] = &[
    CommandOption::flag(OptionKind::Boolean, Some("-a"), Some("--all"))
        .dest("all")
        .help("Show all containers. Only running containers are shown by default."),
    CommandOption::flag(OptionKind::Container, None, Some("--before"))
        .dest("before")
        .help("Show only container created before Id or Name, include non-running ones."),
    CommandOption::flag(OptionKind::Boolean, Some("-l"), Some("--latest"))
        .dest("latest")
        .help("Show only the latest created container, include non-running ones."),
    CommandOption::flag(OptionKind::Numeric, Some("-n"), None)
        .dest("limit")
        .help("Show n last created containers, include non-running ones."),
    CommandOption::flag(OptionKind::Boolean, None, Some("--no-trunc"))
        .dest("trunc")
        .negated()
        .help("Don't truncate output."),
    QUIET_IDS,
    // `-s` shares `latest` with `-l`
    CommandOption::flag(OptionKind::Boolean, Some("-s"), Some("--size"))
        .dest("latest")
        .help("Display total file sizes."),
    CommandOption::flag(OptionKind::Container, None, Some("--since"))
        .dest("since")
        .help("Show only containers created since Id or Name, include non-running ones."),
];

const PULL_OPTIONS: &[CommandOption] =
    &[CommandOption::positional(OptionKind::Image, "image").help("Image name to pull.")];

const PUSH_OPTIONS: &[CommandOption] = &[CommandOption::positional(OptionKind::TaggedImage, "name")
    .help("Image name to push (format: \"name[:tag]\").")];

const RUN_OPTIONS: &[CommandOption] = &[
    CommandOption::flag(OptionKind::Boolean, Some("-d"), Some("--detach"))
        .dest("detach")
        .help("Detached mode: run the container in the background and print the new container ID"),
    ATTACH_CHOICE,
    ENV,
    EXPOSE,
    HOSTNAME,
    CONTAINER_NAME,
    LINK,
    PUBLISH_ALL,
    PUBLISH,
    INTERACTIVE,
    TTY,
    REMOVE_ON_EXIT,
    VOLUME,
    VOLUMES_FROM,
    CommandOption::positional(OptionKind::TaggedImage, "image").help("Image name."),
    COMMAND,
    NET,
];

/// Shells offered by the `shell` command
pub const SHELLS: &[&str] = &[
    "bash",
    "sh",
    "zsh",
    "/bin/sh",
    "/usr/bin/bash",
    "/usr/bin/sh",
    "/usr/bin/zsh",
    "/usr/local/bin/bash",
    "/usr/local/bin/sh",
    "/usr/local/bin/zsh",
];

const SHELL_OPTIONS: &[CommandOption] = &[
    RUNNING_CONTAINER,
    CommandOption::positional(OptionKind::Choice, "command")
        .optional()
        .default_text("bash")
        .choices(SHELLS)
        .help("Shell command to execute."),
];

const START_OPTIONS: &[CommandOption] = &[
    ATTACH_FLAG,
    CommandOption::flag(OptionKind::Boolean, Some("-i"), Some("--interactive"))
        .dest("interactive")
        .default_flag(false)
        .api_hidden()
        .help("Attach container's STDIN."),
    CONTAINER,
];

const RESTART_OPTIONS: &[CommandOption] = &[
    CommandOption::flag(OptionKind::Numeric, Some("-t"), Some("--timeout"))
        .dest("timeout")
        .help(
            "Number of seconds to try to stop for before killing the container. Once killed it will then be restarted. Default is 10 seconds.",
        ),
    CommandOption::positional(OptionKind::Container, "container")
        .repeatable()
        .help("Container ID or name to use."),
];

const RM_OPTIONS: &[CommandOption] = &[
    CommandOption::positional(OptionKind::Container, "container")
        .repeatable()
        .help("Container ID or name to use."),
    CommandOption::flag(OptionKind::Boolean, None, Some("--all-stopped"))
        .dest("all_stopped")
        .api_hidden()
        .cli_hidden()
        .help("Shortcut to remove all stopped containers."),
    CommandOption::flag(OptionKind::Boolean, None, Some("--all"))
        .dest("all")
        .api_hidden()
        .cli_hidden()
        .help("Shortcut to remove all containers."),
    CommandOption::flag(OptionKind::Boolean, Some("-f"), Some("--force"))
        .dest("force")
        .help("Force the removal of a running container (uses SIGKILL)."),
];

const RMI_OPTIONS: &[CommandOption] = &[
    CommandOption::positional(OptionKind::TaggedImage, "image")
        .repeatable()
        .help("Image name name to remove."),
    CommandOption::flag(OptionKind::Boolean, None, Some("--all-dangling"))
        .dest("all_dangling")
        .api_hidden()
        .cli_hidden()
        .help("Shortcut to remove all dangling images."),
    CommandOption::flag(OptionKind::Boolean, None, Some("--all"))
        .dest("all")
        .api_hidden()
        .cli_hidden()
        .help("Shortcut to remove all images."),
];

const SEARCH_OPTIONS: &[CommandOption] =
    &[CommandOption::positional(OptionKind::Image, "term").help("A term to search for.")];

const TAG_OPTIONS: &[CommandOption] = &[
    CommandOption::flag(OptionKind::Boolean, Some("-f"), Some("--force"))
        .dest("force")
        .help("Force."),
    CommandOption::positional(OptionKind::Image, "image").help("The image to tag (format: \"image[:tag]\")."),
    CommandOption::positional(OptionKind::Text, "name")
        .help("The tag name (format: \"[registryhost/][username/]name[:tag]\")."),
];

const VOLUME_CREATE_OPTIONS: &[CommandOption] = &[
    CommandOption::flag(OptionKind::Volume, None, Some("--name"))
        .dest("name")
        .help("Specify volume name."),
    CommandOption::flag(OptionKind::Text, Some("-d"), Some("--driver"))
        .dest("driver")
        .help("Specify volume driver name (--driver local)."),
    CommandOption::flag(OptionKind::KeyValue, Some("-o"), Some("--opt"))
        .dest("driver_opts")
        .repeatable()
        .help("Set driver specific options (e.g. \"tardis=blue\")."),
];

const VOLUME_NAMES_OPTIONS: &[CommandOption] = &[VOLUME_NAMES];

const VOLUME_LS_OPTIONS: &[CommandOption] = &[
    CommandOption::flag(OptionKind::Boolean, Some("-q"), Some("--quiet"))
        .dest("quiet")
        .help("Only display volume names."),
    CommandOption::flag(OptionKind::KeyValue, None, Some("--filter"))
        .dest("filters")
        .repeatable()
        .help("Provide filter values (i.e. \"dangling=true\")."),
];

const START_HIDDEN: &[CommandOption] = &[PUBLISH_ALL];

const CREATE_HIDDEN: &[CommandOption] = &[
    CommandOption::positional(OptionKind::Numeric, "ports")
        .dest("ports")
        .repeatable()
        .optional(),
    CommandOption::positional(OptionKind::Object, "host_config").dest("host_config"),
    CommandOption::positional(OptionKind::Boolean, "stdin_open")
        .dest("stdin_open")
        .default_flag(false),
];
