//! Shell-style splitting of a command line into tokens

use thiserror::Error;

use crate::shell::catalog::CommandKind;

/// Input that POSIX shell quoting rules cannot split
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenizeError {
    #[error("No closing quotation")]
    UnterminatedQuote,

    #[error("No escaped character")]
    TrailingEscape,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum State {
    Between,
    Word,
    Single,
    Double,
}

/// Split `text` on whitespace, honoring single quotes, double quotes and
/// backslash escapes the way a POSIX shell does.
pub fn tokenize(text: &str) -> Result<Vec<String>, TokenizeError> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut state = State::Between;
    let mut chars = text.chars();

    while let Some(c) = chars.next() {
        match state {
            State::Between | State::Word => match c {
                c if c.is_whitespace() => {
                    if state == State::Word {
                        tokens.push(std::mem::take(&mut current));
                        state = State::Between;
                    }
                }
                '\'' => state = State::Single,
                '"' => state = State::Double,
                '\\' => {
                    let escaped = chars.next().ok_or(TokenizeError::TrailingEscape)?;
                    current.push(escaped);
                    state = State::Word;
                }
                c => {
                    current.push(c);
                    state = State::Word;
                }
            },
            State::Single => match c {
                '\'' => state = State::Word,
                c => current.push(c),
            },
            State::Double => match c {
                '"' => state = State::Word,
                '\\' => {
                    let escaped = chars.next().ok_or(TokenizeError::UnterminatedQuote)?;
                    if escaped != '"' && escaped != '\\' {
                        current.push('\\');
                    }
                    current.push(escaped);
                }
                c => current.push(c),
            },
        }
    }

    match state {
        State::Single | State::Double => Err(TokenizeError::UnterminatedQuote),
        State::Word => {
            tokens.push(current);
            Ok(tokens)
        }
        State::Between => Ok(tokens),
    }
}

/// Never fails: input that cannot be split becomes one raw token
pub fn tokenize_lossy(text: &str) -> Vec<String> {
    tokenize(text).unwrap_or_else(|_| vec![text.to_string()])
}

/// First token of a possibly half-typed line, or "" if it can't be split
pub fn first_token(text: &str) -> String {
    tokenize(text.trim())
        .ok()
        .and_then(|tokens| tokens.into_iter().next())
        .unwrap_or_default()
}

/// Separate the command name, which may span several tokens, from its
/// arguments. Unknown names fall back to a single-token command.
pub fn split_command_and_args(tokens: &[String]) -> Option<(String, Vec<String>)> {
    let first = tokens.first()?;

    let length = CommandKind::ALL
        .iter()
        .filter(|kind| kind.word_count() > 1)
        .find(|kind| {
            let words: Vec<&str> = kind.name().split(' ').collect();
            tokens.len() >= words.len()
                && tokens.iter().zip(&words).all(|(token, word)| token == word)
        })
        .map(|kind| kind.word_count())
        .unwrap_or(1);

    if length == 1 {
        return Some((first.clone(), tokens[1..].to_vec()));
    }
    Some((tokens[..length].join(" "), tokens[length..].to_vec()))
}
