//! GNU-style flag parsing driven by the option catalog

use thiserror::Error;
use tracing::debug;

use crate::shell::catalog::{self, CommandKind};
use crate::shell::option::{CommandOption, DefaultValue, OptionKind};
use crate::shell::value::{ArgValue, Kwargs};

/// A key-value flag was given a value without `=`
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{usage}")]
pub struct OptionFormatError {
    /// Short usage hint, e.g. `Usage: -e KEY1=VALUE1 -e KEY2=VALUE2...`
    pub usage: String,
    /// Spelling of the offending flag
    pub flag: String,
}

impl OptionFormatError {
    fn for_option(option: &CommandOption) -> Self {
        let flag = option.preferred_name(false);
        Self {
            usage: format!("Usage: {flag} KEY1=VALUE1 {flag} KEY2=VALUE2..."),
            flag: flag.to_string(),
        }
    }
}

/// Everything that can go wrong while parsing one command's tokens
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error(transparent)]
    Format(#[from] OptionFormatError),

    /// Unknown flag, missing value, bad number or choice
    #[error("Error parsing options: {0}")]
    Invalid(String),
}

/// One parsed input line
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedInvocation {
    pub command: CommandKind,
    pub options: Kwargs,
    pub args: Vec<String>,
}

/// Parse the tokens that follow a command name.
///
/// Every flag of the command, hidden ones included, starts at its default.
/// Parsing stops at the first positional argument or at `--`; everything
/// after it is positional.
pub fn parse(kind: CommandKind, tokens: &[String]) -> Result<ParsedInvocation, ParseError> {
    let mut options = Kwargs::new();
    for option in catalog::all_options(kind, true) {
        if !option.is_flag() {
            continue;
        }
        match option.default {
            Some(default) => options.insert(option.dest_key(), default_value(default)),
            None if !options.contains(option.dest_key()) => {
                options.insert(option.dest_key(), ArgValue::Unset)
            }
            None => {}
        }
    }

    let mut args = Vec::new();
    let mut index = 0;
    while index < tokens.len() {
        let token = &tokens[index];
        index += 1;

        if token == "--" {
            args.extend_from_slice(&tokens[index..]);
            break;
        }

        if let Some(long) = token.strip_prefix("--") {
            let (name, attached) = match long.split_once('=') {
                Some((name, value)) => (format!("--{name}"), Some(value.to_string())),
                None => (token.clone(), None),
            };
            let option = match_long(kind, &name)?;
            let value = if option.takes_value() {
                match attached {
                    Some(value) => Some(value),
                    None => {
                        let value = tokens.get(index).cloned().ok_or_else(|| {
                            ParseError::Invalid(format!("{name} option requires 1 argument"))
                        })?;
                        index += 1;
                        Some(value)
                    }
                }
            } else if attached.is_some() {
                return Err(ParseError::Invalid(format!(
                    "{} option does not take a value",
                    option.name()
                )));
            } else {
                None
            };
            store(&mut options, option, &name, value)?;
            continue;
        }

        if token.len() > 1 && token.starts_with('-') {
            let cluster: Vec<char> = token.chars().skip(1).collect();
            for (position, c) in cluster.iter().enumerate() {
                let name = format!("-{c}");
                let option = match_short(kind, &name)?;
                if !option.takes_value() {
                    store(&mut options, option, &name, None)?;
                    continue;
                }
                let rest: String = cluster[position + 1..].iter().collect();
                let value = if !rest.is_empty() {
                    rest
                } else {
                    let value = tokens.get(index).cloned().ok_or_else(|| {
                        ParseError::Invalid(format!("{name} option requires 1 argument"))
                    })?;
                    index += 1;
                    value
                };
                store(&mut options, option, &name, Some(value))?;
                break;
            }
            continue;
        }

        args.extend_from_slice(&tokens[index - 1..]);
        break;
    }

    assert_key_value_format(kind, &options)?;

    for option in kind.hidden_options() {
        if let Some(default) = option.default {
            options.insert(option.dest_key(), default_value(default));
        }
    }

    debug!(command = %kind, ?options, ?args, "parsed invocation");
    Ok(ParsedInvocation {
        command: kind,
        options,
        args,
    })
}

fn default_value(default: DefaultValue) -> ArgValue {
    match default {
        DefaultValue::Flag(value) => ArgValue::Flag(value),
        DefaultValue::Text(value) => ArgValue::Text(value.to_string()),
    }
}

/// Flags the user may type: the command's own first, then `--help`
fn user_flags(kind: CommandKind) -> impl Iterator<Item = &'static CommandOption> {
    kind.options()
        .iter()
        .chain(std::iter::once(&catalog::HELP))
        .filter(|option| option.is_flag())
}

fn match_short(kind: CommandKind, name: &str) -> Result<&'static CommandOption, ParseError> {
    user_flags(kind)
        .find(|option| option.short == Some(name))
        .ok_or_else(|| ParseError::Invalid(format!("no such option: {name}")))
}

/// Exact long names win; otherwise a unique prefix is accepted
fn match_long(kind: CommandKind, name: &str) -> Result<&'static CommandOption, ParseError> {
    if let Some(option) = user_flags(kind).find(|option| option.long == Some(name)) {
        return Ok(option);
    }

    let mut candidates: Vec<&'static CommandOption> = user_flags(kind)
        .filter(|option| option.long.is_some_and(|long| long.starts_with(name)))
        .collect();
    candidates.dedup_by_key(|option| option.long);

    match candidates.as_slice() {
        [option] => Ok(*option),
        [] => Err(ParseError::Invalid(format!("no such option: {name}"))),
        many => {
            let names: Vec<&str> = many.iter().filter_map(|option| option.long).collect();
            Err(ParseError::Invalid(format!(
                "ambiguous option: {name} ({}?)",
                names.join(", ")
            )))
        }
    }
}

fn store(
    options: &mut Kwargs,
    option: &CommandOption,
    name: &str,
    value: Option<String>,
) -> Result<(), ParseError> {
    let key = option.dest_key();
    let Some(raw) = value else {
        options.insert(key, ArgValue::Flag(!option.negated));
        return Ok(());
    };

    if option.kind == OptionKind::Choice && !option.choices.contains(&raw.as_str()) {
        let choices: Vec<String> = option.choices.iter().map(|c| format!("'{c}'")).collect();
        return Err(ParseError::Invalid(format!(
            "option {name}: invalid choice: '{raw}' (choose from {})",
            choices.join(", ")
        )));
    }

    if option.multiple {
        let mut values = options.list(key);
        values.push(raw);
        options.insert(key, ArgValue::List(values));
        return Ok(());
    }

    let value = if option.kind == OptionKind::Numeric {
        let number = raw.parse::<i64>().map_err(|_| {
            ParseError::Invalid(format!("option {name}: invalid integer value: '{raw}'"))
        })?;
        ArgValue::Number(number)
    } else {
        ArgValue::Text(raw)
    };
    options.insert(key, value);
    Ok(())
}

/// Key-value flags must be spelled `KEY=VALUE`, never `KEY VALUE`
fn assert_key_value_format(kind: CommandKind, options: &Kwargs) -> Result<(), OptionFormatError> {
    for option in kind.options().iter().filter(|option| option.is_key_value()) {
        if options
            .list(option.dest_key())
            .iter()
            .any(|value| !value.contains('='))
        {
            return Err(OptionFormatError::for_option(option));
        }
    }
    Ok(())
}
