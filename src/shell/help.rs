//! Help text rendered from the catalog at request time

use crate::shell::catalog::{self, CommandKind};
use crate::shell::option::CommandOption;

const WIDTH: usize = 79;
const HELP_COLUMN: usize = 24;

/// `(command, description)` rows for the `help` command
pub fn help_rows() -> Vec<(String, String)> {
    CommandKind::ALL
        .iter()
        .map(|kind| (kind.name().to_string(), kind.description().to_string()))
        .collect()
}

/// Usage line plus flag descriptions for one command. Options the reference
/// CLI doesn't know are listed under "Non-standard options".
pub fn format_command_help(kind: CommandKind) -> String {
    let options = catalog::all_options(kind, false);

    let mut usage = vec![kind.name().to_string(), "[options]".to_string()];
    usage.extend(options.iter().filter(|option| !option.is_flag()).map(|option| {
        if option.optional {
            format!("[{}]", option.name())
        } else {
            option.name().to_string()
        }
    }));

    let mut out = format!("Usage: {}\n\nOptions:\n", usage.join(" "));

    for option in options.iter().filter(|o| o.is_flag() && o.cli_visible) {
        out.push_str(&format_option(option, 2));
    }

    let extras: Vec<_> = options
        .iter()
        .filter(|o| o.is_flag() && !o.cli_visible)
        .collect();
    if !extras.is_empty() {
        out.push_str("\n  Non-standard options:\n");
        for option in extras {
            out.push_str(&format_option(option, 4));
        }
    }

    out
}

/// `-t TAG, --tag=TAG` for value flags, `-a, --all` for booleans
fn option_strings(option: &CommandOption) -> String {
    let metavar = option.dest_key().to_uppercase();
    let mut spellings = Vec::new();
    if let Some(short) = option.short {
        if option.takes_value() {
            spellings.push(format!("{short} {metavar}"));
        } else {
            spellings.push(short.to_string());
        }
    }
    if let Some(long) = option.long {
        if option.takes_value() {
            spellings.push(format!("{long}={metavar}"));
        } else {
            spellings.push(long.to_string());
        }
    }
    spellings.join(", ")
}

fn format_option(option: &CommandOption, indent: usize) -> String {
    let names = format!("{}{}", " ".repeat(indent), option_strings(option));
    let help_lines = wrap(option.help, WIDTH - HELP_COLUMN);

    let mut out = String::new();
    let mut lines = help_lines.iter();
    if names.len() + 2 <= HELP_COLUMN {
        out.push_str(&format!("{:<width$}", names, width = HELP_COLUMN));
        if let Some(first) = lines.next() {
            out.push_str(first);
        }
        out.push('\n');
    } else {
        out.push_str(&names);
        out.push('\n');
    }
    for line in lines {
        out.push_str(&" ".repeat(HELP_COLUMN));
        out.push_str(line);
        out.push('\n');
    }
    out
}

fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if !current.is_empty() && current.len() + 1 + word.len() > width {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_usage_line_brackets_optional_positionals() {
        let help = format_command_help(CommandKind::Run);
        assert!(help.starts_with("Usage: run [options] image [command]\n"));

        let help = format_command_help(CommandKind::Ps);
        assert!(help.starts_with("Usage: ps [options]\n"));
    }

    #[test]
    fn test_help_lists_declared_options() {
        let help = format_command_help(CommandKind::Ps);
        assert!(help.contains("-h, --help"));
        assert!(help.contains("-a, --all"));
        assert!(help.contains("-n LIMIT"));
        assert!(help.contains("--before=BEFORE"));
        assert!(help.contains("--no-trunc"));
        assert!(!help.contains("Non-standard options"));
    }

    #[test]
    fn test_non_standard_section() {
        let help = format_command_help(CommandKind::Rm);
        let (standard, extra) = help.split_once("Non-standard options:").unwrap();
        assert!(standard.contains("-f, --force"));
        assert!(!standard.contains("--all-stopped"));
        assert!(extra.contains("--all-stopped"));
        assert!(extra.contains("--all "));
    }

    #[test]
    fn test_long_help_wraps() {
        let help = format_command_help(CommandKind::Run);
        assert!(help.lines().all(|line| line.len() <= WIDTH));
    }

    #[test]
    fn test_help_rows_cover_every_command() {
        let rows = help_rows();
        assert_eq!(rows.len(), CommandKind::ALL.len());
        assert_eq!(rows[0], ("attach".to_string(), "Attach to a running container.".to_string()));
        assert!(rows.iter().any(|(name, _)| name == "volume ls"));
    }
}
