//! Completion suggestions driven by the option catalog
//!
//! The completer keeps cached name lists (containers, images, volumes) and
//! only reloads the ones an [`Outcome`](crate::shell::dispatcher::Outcome)
//! marks stale.

use std::collections::BTreeSet;
use std::path::Path;

use serde_json::Value;
use tracing::debug;

use crate::engine::{Engine, EngineResult};
use crate::shell::catalog::{self, CommandKind};
use crate::shell::dispatcher::Refresh;
use crate::shell::option::CommandOption;
use crate::shell::tokenizer::{split_command_and_args, tokenize_lossy};
use crate::shell::value::{ArgValue, Kwargs};

/// One candidate for the word being typed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    pub text: String,
    /// Label shown next to the candidate, e.g. `-e/--env`
    pub display: Option<String>,
    /// Characters before the cursor the candidate replaces
    pub replace: usize,
}

impl Suggestion {
    fn new(text: impl Into<String>, word: &str) -> Self {
        Self {
            text: text.into(),
            display: None,
            replace: word.chars().count(),
        }
    }
}

#[derive(Debug, Default, Clone)]
pub struct Completer {
    containers: BTreeSet<String>,
    running: BTreeSet<String>,
    images: BTreeSet<String>,
    tagged: BTreeSet<String>,
    volumes: BTreeSet<String>,
    long_options: bool,
}

impl Completer {
    pub fn new(long_options: bool) -> Self {
        Self {
            long_options,
            ..Self::default()
        }
    }

    pub fn set_containers(&mut self, names: impl IntoIterator<Item = String>) {
        self.containers = names.into_iter().collect();
    }

    pub fn set_running(&mut self, names: impl IntoIterator<Item = String>) {
        self.running = names.into_iter().collect();
    }

    pub fn set_images(&mut self, names: impl IntoIterator<Item = String>) {
        self.images = names.into_iter().collect();
    }

    pub fn set_tagged(&mut self, names: impl IntoIterator<Item = String>) {
        self.tagged = names.into_iter().collect();
    }

    pub fn set_volumes(&mut self, names: impl IntoIterator<Item = String>) {
        self.volumes = names.into_iter().collect();
    }

    /// Reload the lists `refresh` marks stale
    pub fn refresh(&mut self, engine: &dyn Engine, refresh: Refresh) -> EngineResult<()> {
        if refresh.containers {
            let all = Kwargs::new().with("all", ArgValue::Flag(true));
            self.set_containers(container_names(&engine.containers(&all)?));
        }
        if refresh.running {
            self.set_running(container_names(&engine.containers(&Kwargs::new())?));
        }
        if refresh.images {
            let images = engine.images(&Kwargs::new())?;
            let tags: Vec<String> = images
                .iter()
                .flat_map(|image| image["RepoTags"].as_array().cloned().unwrap_or_default())
                .filter_map(|tag| tag.as_str().map(String::from))
                .filter(|tag| tag != "<none>:<none>")
                .collect();
            self.set_images(tags.iter().map(|tag| match tag.rsplit_once(':') {
                Some((repo, _)) => repo.to_string(),
                None => tag.clone(),
            }));
            self.set_tagged(tags);
        }
        if refresh.volumes {
            let volumes = engine.volumes(None)?;
            self.set_volumes(
                volumes
                    .iter()
                    .filter_map(|volume| volume["Name"].as_str().map(String::from)),
            );
        }
        debug!(?refresh, "completions refreshed");
        Ok(())
    }

    /// Candidates for the end of `text`, where the cursor sits
    pub fn suggest(&self, text: &str) -> Vec<Suggestion> {
        if in_quoted_string(text) {
            return Vec::new();
        }

        let word = if text.ends_with(char::is_whitespace) {
            ""
        } else {
            text.split_whitespace().last().unwrap_or("")
        };
        let words = tokenize_lossy(text.trim());
        let command = split_command_and_args(&words)
            .map(|(command, _)| command)
            .unwrap_or_default();

        let in_command = words.len() > 1 || (word.is_empty() && !command.is_empty());
        if !in_command {
            let word = word.to_lowercase();
            return collection_matches(&word, CommandKind::ALL.iter().map(|kind| kind.name()));
        }

        let parts: Vec<&str> = text.split_whitespace().collect();
        let previous = if word.is_empty() {
            parts.last().copied()
        } else {
            parts.len().checked_sub(2).map(|i| parts[i])
        }
        .unwrap_or("");

        match CommandKind::from_name(&command) {
            Some(kind) => self.command_matches(kind, word, previous, &words[1..]),
            None => Vec::new(),
        }
    }

    fn values_for(&self, option: &CommandOption) -> Vec<&str> {
        let names = if option.is_container() {
            &self.containers
        } else if option.is_running_container() {
            &self.running
        } else if option.is_image() {
            &self.images
        } else if option.is_tagged_image() {
            &self.tagged
        } else if option.is_volume() {
            &self.volumes
        } else {
            return option.choices.to_vec();
        };
        names.iter().map(String::as_str).collect()
    }

    fn command_matches(
        &self,
        kind: CommandKind,
        word: &str,
        previous: &str,
        params: &[String],
    ) -> Vec<Suggestion> {
        let mut suggestions = Vec::new();
        let mut add_directories = false;
        let mut add_files = false;

        let current = (!previous.is_empty())
            .then(|| catalog::find_option(kind, previous))
            .flatten()
            .filter(|option| option.takes_value());

        let mut value_suggestions = Vec::new();
        if let Some(option) = current {
            value_suggestions = self.values_for(option);
            add_directories = option.is_dir_path();
            add_files = option.is_file_path();
            suggestions.extend(collection_matches(word, value_suggestions.iter().copied()));
        }

        if value_suggestions.is_empty() {
            let used = |name: Option<&str>| name.is_some_and(|name| params.iter().any(|p| p == name));
            let possible: Vec<&CommandOption> = catalog::all_options(kind, false)
                .into_iter()
                .filter(|option| {
                    !(used(option.long) || used(option.short))
                        || option.names().contains(&word)
                        || option.multiple
                })
                .collect();

            let mut named: Vec<&CommandOption> =
                possible.iter().copied().filter(|option| option.is_flag()).collect();
            named.sort_by_key(|option| option.preferred_name(self.long_options));
            named.dedup_by_key(|option| option.preferred_name(self.long_options));
            suggestions.extend(
                named
                    .into_iter()
                    .map(|option| (option.preferred_name(self.long_options), option.display()))
                    .filter(|(name, _)| word.is_empty() || name.starts_with(word))
                    .map(|(name, display)| Suggestion {
                        display: Some(display),
                        ..Suggestion::new(name, word)
                    }),
            );

            let mut positional_values = Vec::new();
            for option in possible.iter().filter(|option| !option.is_flag()) {
                if option.is_dir_path() {
                    add_directories = true;
                } else if option.is_file_path() {
                    add_files = true;
                } else {
                    positional_values.extend(self.values_for(option));
                }
            }
            suggestions.extend(collection_matches(word, positional_values.into_iter()));
        }

        if add_directories || add_files {
            suggestions.extend(path_matches(word, add_directories && !add_files));
        }
        suggestions
    }
}

fn container_names(containers: &[Value]) -> Vec<String> {
    containers
        .iter()
        .filter_map(|container| container["Names"][0].as_str())
        .map(|name| name.trim_start_matches('/').to_string())
        .collect()
}

fn collection_matches<'a>(word: &str, candidates: impl Iterator<Item = &'a str>) -> Vec<Suggestion> {
    let sorted: BTreeSet<&str> = candidates
        .filter(|candidate| word.is_empty() || candidate.starts_with(word))
        .collect();
    sorted
        .into_iter()
        .map(|candidate| Suggestion::new(candidate, word))
        .collect()
}

/// Entries of the directory named by `word` whose names continue it
fn path_matches(word: &str, dirs_only: bool) -> Vec<Suggestion> {
    let (base, prefix) = match word.rfind('/') {
        Some(index) => (&word[..=index], &word[index + 1..]),
        None => ("", word),
    };
    let directory = if base.is_empty() { Path::new(".") } else { Path::new(base) };
    let expanded;
    let directory = match base.strip_prefix("~/") {
        Some(rest) => match dirs::home_dir() {
            Some(home) => {
                expanded = home.join(rest);
                expanded.as_path()
            }
            None => directory,
        },
        None => directory,
    };

    let Ok(entries) = std::fs::read_dir(directory) else {
        return Vec::new();
    };
    let mut names: Vec<String> = entries
        .filter_map(|entry| entry.ok())
        .filter(|entry| !dirs_only || entry.path().is_dir())
        .filter_map(|entry| {
            let name = entry.file_name().to_string_lossy().into_owned();
            let visible = !name.starts_with('.') || prefix.starts_with('.');
            (visible && name.starts_with(prefix)).then(|| {
                if entry.path().is_dir() {
                    format!("{name}/")
                } else {
                    name
                }
            })
        })
        .collect();
    names.sort();
    names
        .into_iter()
        .map(|name| Suggestion::new(name, prefix))
        .collect()
}

/// Whether the cursor is inside an open quote
fn in_quoted_string(text: &str) -> bool {
    let mut open: Vec<char> = Vec::new();
    for c in text.trim().chars().filter(|c| *c == '"' || *c == '\'') {
        if open.last() == Some(&c) {
            open.pop();
        } else {
            open.push(c);
        }
    }
    !open.is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::fake::FakeEngine;

    fn texts(suggestions: &[Suggestion]) -> Vec<&str> {
        suggestions.iter().map(|s| s.text.as_str()).collect()
    }

    fn completer() -> Completer {
        let mut completer = Completer::new(true);
        completer.set_containers(["web".to_string(), "db".to_string(), "worker".to_string()]);
        completer.set_running(["web".to_string()]);
        completer.set_images(["ubuntu".to_string(), "alpine".to_string()]);
        completer.set_tagged(["ubuntu:22.04".to_string()]);
        completer.set_volumes(["data".to_string()]);
        completer
    }

    #[test]
    fn test_command_names() {
        let completer = completer();
        assert_eq!(texts(&completer.suggest("vol")), vec!["volume create", "volume inspect", "volume ls", "volume rm"]);
        assert_eq!(texts(&completer.suggest("PU")), vec!["pull", "push"]);
        assert!(completer.suggest("").len() >= CommandKind::ALL.len());
    }

    #[test]
    fn test_flag_values_follow_option_type() {
        let completer = completer();
        assert_eq!(texts(&completer.suggest("run --name w")), vec!["web", "worker"]);
        assert_eq!(texts(&completer.suggest("kill -s SIGT")), Vec::<&str>::new());
        assert_eq!(texts(&completer.suggest("kill -s TE")), vec!["TERM"]);
    }

    #[test]
    fn test_positionals_follow_option_type() {
        let completer = completer();
        assert_eq!(texts(&completer.suggest("stop ")).last(), Some(&"web"));
        assert!(texts(&completer.suggest("stop ")).contains(&"--help"));
        assert_eq!(texts(&completer.suggest("pull a")), vec!["alpine"]);
        assert_eq!(texts(&completer.suggest("push u")), vec!["ubuntu:22.04"]);
        assert_eq!(texts(&completer.suggest("volume rm d")), vec!["data"]);
    }

    #[test]
    fn test_used_flags_are_not_offered_again() {
        let completer = completer();
        let offered = completer.suggest("ps --all --");
        assert!(!texts(&offered).contains(&"--all"));
        assert!(texts(&offered).contains(&"--quiet"));

        let offered = completer.suggest("run --env A=1 --e");
        assert!(texts(&offered).contains(&"--env"));
        assert!(texts(&offered).contains(&"--expose"));
        assert_eq!(
            offered.iter().find(|s| s.text == "--env").and_then(|s| s.display.as_deref()),
            Some("-e/--env")
        );
    }

    #[test]
    fn test_short_names_when_configured() {
        let completer = Completer::new(false);
        let offered = completer.suggest("ps -");
        assert!(texts(&offered).contains(&"-a"));
        assert!(texts(&offered).contains(&"--before"));
        assert!(offered.iter().all(|s| s.replace == 1));
    }

    #[test]
    fn test_no_suggestions_inside_quotes() {
        let completer = completer();
        assert!(completer.suggest("run -e \"A=b ").is_empty());
    }

    #[test]
    fn test_directory_paths() {
        let dir = tempfile::TempDir::new().unwrap();
        std::fs::create_dir(dir.path().join("app")).unwrap();
        std::fs::write(dir.path().join("apple.txt"), "").unwrap();

        let word = format!("{}/ap", dir.path().display());
        let offered = Completer::new(true).suggest(&format!("build {word}"));
        assert_eq!(texts(&offered), vec!["app/"]);
        assert_eq!(offered[0].replace, 2);
    }

    #[test]
    fn test_refresh_only_reloads_stale_lists() {
        let engine = FakeEngine::new()
            .with_container("c1", "web", "running")
            .with_container("c2", "db", "exited")
            .with_image("i1", Some(&["ubuntu:22.04", "ubuntu:latest"]), 10)
            .with_image("i2", None, 10)
            .with_volume("data");

        let mut completer = Completer::new(true);
        completer.refresh(&engine, Refresh::CONTAINERS).unwrap();
        assert_eq!(completer.containers.len(), 2);
        assert_eq!(completer.running.iter().collect::<Vec<_>>(), vec!["web"]);
        assert!(completer.images.is_empty());
        assert!(!engine.calls().contains(&"volumes".to_string()));

        completer.refresh(&engine, Refresh::ALL).unwrap();
        assert_eq!(completer.images.iter().collect::<Vec<_>>(), vec!["ubuntu"]);
        assert_eq!(completer.tagged.len(), 2);
        assert!(completer.volumes.contains("data"));
    }
}
