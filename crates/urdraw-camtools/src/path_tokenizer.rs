//! SVG path data tokenizer.
//!
//! Splits a `d` attribute into command letters and numbers. Separators are
//! whitespace and commas, but numbers may also abut each other the way SVG
//! allows: `10-5` is two numbers, and so is `.5.5`.

use regex::Regex;
use std::fmt;
use std::ops::Range;

/// Command letters understood by the path interpreter
pub const PATH_COMMANDS: &str = "MmLlHhVvCcSsQqTtAaZz";

/// A lexical token of path data
#[derive(Debug, Clone, PartialEq)]
pub enum PathToken {
    /// One of [`PATH_COMMANDS`]
    Command(char),
    /// A numeric literal, including exponent forms
    Number(f64),
    /// Anything else; the interpreter skips these
    Unknown(String),
}

impl PathToken {
    pub fn is_command(&self) -> bool {
        matches!(self, Self::Command(_))
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(*value),
            _ => None,
        }
    }
}

impl fmt::Display for PathToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Command(c) => write!(f, "{}", c),
            Self::Number(v) => write!(f, "{}", v),
            Self::Unknown(s) => write!(f, "{}", s),
        }
    }
}

fn number_regex() -> &'static Regex {
    static NUMBER_REGEX: std::sync::OnceLock<Regex> = std::sync::OnceLock::new();
    NUMBER_REGEX.get_or_init(|| {
        Regex::new(r"^[+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?").expect("invalid regex pattern")
    })
}

fn is_separator(c: char) -> bool {
    c.is_whitespace() || c == ','
}

fn is_command(c: char) -> bool {
    PATH_COMMANDS.contains(c)
}

fn starts_number(c: char) -> bool {
    c.is_ascii_digit() || matches!(c, '+' | '-' | '.')
}

/// Tokenize path data. Never fails; unreadable input becomes
/// [`PathToken::Unknown`].
pub fn tokenize(data: &str) -> Vec<PathToken> {
    tokenize_spanned(data)
        .into_iter()
        .map(|(token, _)| token)
        .collect()
}

/// Tokenize path data, keeping the byte range each token came from
pub fn tokenize_spanned(data: &str) -> Vec<(PathToken, Range<usize>)> {
    let mut tokens = Vec::new();
    let mut rest = data;

    loop {
        rest = rest.trim_start_matches(is_separator);
        let start = data.len() - rest.len();
        let Some(c) = rest.chars().next() else {
            break;
        };

        let (token, len) = if is_command(c) {
            (PathToken::Command(c), c.len_utf8())
        } else if starts_number(c) {
            match number_regex().find(rest) {
                // Overflowing literals such as 1e400 are not usable coordinates
                Some(m) => match m.as_str().parse::<f64>() {
                    Ok(value) if value.is_finite() => (PathToken::Number(value), m.end()),
                    _ => (PathToken::Unknown(m.as_str().to_string()), m.end()),
                },
                // A lone sign or dot
                None => (PathToken::Unknown(c.to_string()), c.len_utf8()),
            }
        } else {
            let end = rest
                .char_indices()
                .find(|&(_, ch)| is_separator(ch) || is_command(ch) || starts_number(ch))
                .map(|(i, _)| i)
                .unwrap_or(rest.len());
            (PathToken::Unknown(rest[..end].to_string()), end)
        };

        tokens.push((token, start..start + len));
        rest = &rest[len..];
    }

    tokens
}

/// Split an arc flag off the front of a number literal.
///
/// Flags are a single `0` or `1` and need no separator, so `015` reads as
/// the flag `0` followed by `15`. Returns `None` when `text` is already a
/// lone flag or does not start with one.
pub fn split_flag(text: &str) -> Option<(f64, &str)> {
    let rest = text.get(1..).filter(|rest| !rest.is_empty())?;
    match text.as_bytes()[0] {
        b'0' => Some((0.0, rest)),
        b'1' => Some((1.0, rest)),
        _ => None,
    }
}

/// Read a whitespace/comma separated list of numbers, as used by the
/// `points` attribute. Returns `None` if anything other than numbers appears.
pub fn parse_number_list(data: &str) -> Option<Vec<f64>> {
    tokenize(data)
        .into_iter()
        .map(|token| token.as_number())
        .collect()
}
