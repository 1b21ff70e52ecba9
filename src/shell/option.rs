//! Declarative description of one command flag or positional argument

/// Semantic type of an option's value, used for parsing and completion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionKind {
    Boolean,
    Numeric,
    Text,
    Choice,
    KeyValue,
    FilePath,
    DirPath,
    Container,
    RunningContainer,
    Image,
    TaggedImage,
    Volume,
    Command,
    Object,
}

/// Default value of an option when the user does not supply it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultValue {
    Flag(bool),
    Text(&'static str),
}

/// One flag or positional argument of one command
///
/// Options are built in `const` context so the whole catalog is static data:
///
/// ```
/// use skiff::shell::option::{CommandOption, OptionKind};
///
/// const ENV: CommandOption = CommandOption::flag(OptionKind::KeyValue, Some("-e"), Some("--env"))
///     .dest("environment")
///     .repeatable()
///     .help("Set environment variables.");
///
/// assert_eq!(ENV.dest_key(), "environment");
/// assert_eq!(ENV.display(), "-e/--env");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandOption {
    pub kind: OptionKind,
    pub short: Option<&'static str>,
    pub long: Option<&'static str>,
    dest: Option<&'static str>,
    pub multiple: bool,
    pub optional: bool,
    /// Boolean flag that stores `false` when present (`--no-trunc`)
    pub negated: bool,
    pub default: Option<DefaultValue>,
    /// Whether the value is ever forwarded to the engine client
    pub api_visible: bool,
    /// Whether the flag is echoed when rebuilding a reference-CLI command line
    pub cli_visible: bool,
    pub choices: &'static [&'static str],
    pub help: &'static str,
}

impl CommandOption {
    /// A dash-prefixed flag with a short and/or long spelling
    pub const fn flag(
        kind: OptionKind,
        short: Option<&'static str>,
        long: Option<&'static str>,
    ) -> Self {
        Self {
            kind,
            short,
            long,
            dest: None,
            multiple: false,
            optional: true,
            negated: false,
            default: None,
            api_visible: true,
            cli_visible: true,
            choices: &[],
            help: "",
        }
    }

    /// A positional argument, displayed by its bare name
    pub const fn positional(kind: OptionKind, name: &'static str) -> Self {
        Self {
            optional: false,
            ..Self::flag(kind, None, Some(name))
        }
    }

    pub const fn dest(self, dest: &'static str) -> Self {
        Self {
            dest: Some(dest),
            ..self
        }
    }

    /// Accept the flag many times, accumulating values in order
    pub const fn repeatable(self) -> Self {
        Self {
            multiple: true,
            ..self
        }
    }

    pub const fn optional(self) -> Self {
        Self {
            optional: true,
            ..self
        }
    }

    pub const fn negated(self) -> Self {
        Self {
            negated: true,
            ..self
        }
    }

    pub const fn default_flag(self, value: bool) -> Self {
        Self {
            default: Some(DefaultValue::Flag(value)),
            ..self
        }
    }

    pub const fn default_text(self, value: &'static str) -> Self {
        Self {
            default: Some(DefaultValue::Text(value)),
            ..self
        }
    }

    /// Keep the option for the translator's own logic only
    pub const fn api_hidden(self) -> Self {
        Self {
            api_visible: false,
            ..self
        }
    }

    /// Never echo the option back to the reference CLI
    pub const fn cli_hidden(self) -> Self {
        Self {
            cli_visible: false,
            ..self
        }
    }

    pub const fn choices(self, choices: &'static [&'static str]) -> Self {
        Self { choices, ..self }
    }

    pub const fn help(self, help: &'static str) -> Self {
        Self { help, ..self }
    }

    /// Primary name: the long spelling when there is one
    pub fn name(&self) -> &'static str {
        self.long.or(self.short).unwrap_or_default()
    }

    /// All spellings, short first
    pub fn names(&self) -> Vec<&'static str> {
        self.short.into_iter().chain(self.long).collect()
    }

    /// Display form such as `-e/--env`
    pub fn display(&self) -> String {
        self.names().join("/")
    }

    /// Key under which the value is stored and forwarded
    pub fn dest_key(&self) -> &'static str {
        self.dest
            .unwrap_or_else(|| self.name().trim_start_matches('-'))
    }

    /// Flags start with a dash, positionals don't
    pub fn is_flag(&self) -> bool {
        self.name().starts_with('-')
    }

    /// Boolean flags never consume a value token
    pub fn takes_value(&self) -> bool {
        self.kind != OptionKind::Boolean
    }

    /// Preferred spelling, falling back to whichever one exists
    pub fn preferred_name(&self, prefer_long: bool) -> &'static str {
        let (first, second) = if prefer_long {
            (self.long, self.short)
        } else {
            (self.short, self.long)
        };
        first.or(second).unwrap_or_default()
    }

    /// Whether this option can be suggested while `word` is being typed
    pub fn is_match(&self, word: &str) -> bool {
        word.is_empty() || self.names().iter().any(|name| name.starts_with(word))
    }

    pub fn is_choice(&self) -> bool {
        self.kind == OptionKind::Choice || !self.choices.is_empty()
    }

    pub fn is_container(&self) -> bool {
        self.kind == OptionKind::Container
    }

    pub fn is_running_container(&self) -> bool {
        self.kind == OptionKind::RunningContainer
    }

    pub fn is_image(&self) -> bool {
        self.kind == OptionKind::Image
    }

    pub fn is_tagged_image(&self) -> bool {
        self.kind == OptionKind::TaggedImage
    }

    pub fn is_volume(&self) -> bool {
        self.kind == OptionKind::Volume
    }

    pub fn is_file_path(&self) -> bool {
        self.kind == OptionKind::FilePath
    }

    pub fn is_dir_path(&self) -> bool {
        self.kind == OptionKind::DirPath
    }

    pub fn is_key_value(&self) -> bool {
        self.kind == OptionKind::KeyValue
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LINK: CommandOption = CommandOption::flag(OptionKind::Container, None, Some("--link"))
        .dest("links")
        .repeatable()
        .api_hidden();

    const NAME: CommandOption = CommandOption::flag(OptionKind::Container, None, Some("--name"));

    const LIMIT: CommandOption = CommandOption::flag(OptionKind::Numeric, Some("-n"), None).dest("limit");

    const IMAGE: CommandOption = CommandOption::positional(OptionKind::Image, "image");

    #[test]
    fn test_names_and_display() {
        assert_eq!(LINK.names(), vec!["--link"]);
        assert_eq!(LINK.display(), "--link");
        assert_eq!(LIMIT.display(), "-n");
        assert_eq!(LIMIT.name(), "-n");
        assert_eq!(IMAGE.name(), "image");
    }

    #[test]
    fn test_dest_defaults_to_trimmed_name() {
        assert_eq!(NAME.dest_key(), "name");
        assert_eq!(LINK.dest_key(), "links");
        assert_eq!(IMAGE.dest_key(), "image");
    }

    #[test]
    fn test_preferred_name_falls_back() {
        assert_eq!(LIMIT.preferred_name(true), "-n");
        assert_eq!(LINK.preferred_name(false), "--link");
    }

    #[test]
    fn test_flags_and_positionals() {
        assert!(LINK.is_flag());
        assert!(!IMAGE.is_flag());
        assert!(!IMAGE.optional);
        assert!(NAME.optional);
        assert!(LINK.multiple);
        assert!(!LINK.api_visible);
        assert!(LINK.cli_visible);
    }

    #[test]
    fn test_is_match() {
        assert!(LINK.is_match(""));
        assert!(LINK.is_match("--li"));
        assert!(!LINK.is_match("--na"));
        assert!(LIMIT.is_match("-n"));
    }

    #[test]
    fn test_type_predicates() {
        assert!(LINK.is_container());
        assert!(IMAGE.is_image());
        assert!(!IMAGE.is_tagged_image());
        assert!(LIMIT.takes_value());
        assert!(!CommandOption::flag(OptionKind::Boolean, Some("-q"), None).takes_value());
    }
}
