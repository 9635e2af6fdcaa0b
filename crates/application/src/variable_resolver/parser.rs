//! Placeholder parser for `${scope}` / `${scope:argument}` syntax
//!
//! Parses strings to extract placeholder tokens with their positions.
//! There is no escape syntax: any `${...}` without a `}` inside is a token.

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

/// Matches any placeholder; group 1 is the inner text.
pub static TOKEN_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]*)\}").expect("valid regex"));

/// Matches `${command:<id>}`; group 1 is the command identifier.
pub static COMMAND_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{command:([^}]*)\}").expect("valid regex"));

/// One placeholder occurrence in a string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// The full placeholder text, e.g. `${env:HOME}`.
    pub match_text: String,

    /// Text before the first `:`, or the whole inner text.
    pub scope: String,

    /// Text after the first `:`, if there is one.
    pub argument: Option<String>,

    /// Byte range in the original string where this token appears.
    pub span: Range<usize>,
}

impl Token {
    /// Builds a token from its inner text (between `${` and `}`).
    #[must_use]
    pub fn from_inner(inner: &str, span: Range<usize>) -> Self {
        let (scope, argument) = match inner.split_once(':') {
            Some((scope, argument)) => (scope.to_string(), Some(argument.to_string())),
            None => (inner.to_string(), None),
        };
        Self {
            match_text: format!("${{{inner}}}"),
            scope,
            argument,
            span,
        }
    }

    /// Returns the argument if present and non-empty.
    #[must_use]
    pub fn non_empty_argument(&self) -> Option<&str> {
        self.argument.as_deref().filter(|a| !a.is_empty())
    }
}

/// Parses a string and extracts all placeholder tokens, left to right.
///
/// # Examples
///
/// ```
/// use qvars_application::variable_resolver::parser::parse_tokens;
///
/// let tokens = parse_tokens("${workspaceFolder}/out/${env:USER}.log");
/// assert_eq!(tokens.len(), 2);
/// assert_eq!(tokens[0].scope, "workspaceFolder");
/// assert_eq!(tokens[1].argument.as_deref(), Some("USER"));
/// ```
#[must_use]
pub fn parse_tokens(input: &str) -> Vec<Token> {
    TOKEN_PATTERN
        .captures_iter(input)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let inner = caps.get(1)?;
            Some(Token::from_inner(inner.as_str(), whole.range()))
        })
        .collect()
}

/// Returns true if the input contains at least one placeholder.
#[must_use]
pub fn has_tokens(input: &str) -> bool {
    TOKEN_PATTERN.is_match(input)
}

/// Distinct scope names used in the input, in first-appearance order.
#[must_use]
pub fn scope_names(input: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for token in parse_tokens(input) {
        if !names.contains(&token.scope) {
            names.push(token.scope);
        }
    }
    names
}
