//! Input parsing: groups a flat token list into download jobs.
//!
//! Tokens come from the command line, one interactive line, or one line of a
//! batch file. A URL starts a job; it may be followed by a size hint and then
//! (only when a `.netrc` is available) an opaque authentication code.

mod size;

pub use size::{convert_to_bits, is_size_hint};

use thiserror::Error;

/// One download request. Built by the parser and consumed once by the dispatcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    pub url: String,
    /// Target output size such as `9.5M`; always passes [`is_size_hint`].
    pub size_hint: Option<String>,
    /// Two-factor code handed to the fetch tool verbatim.
    pub auth_code: Option<String>,
}

impl Job {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            size_hint: None,
            auth_code: None,
        }
    }

    pub fn with_size_hint(mut self, hint: impl Into<String>) -> Self {
        self.size_hint = Some(hint.into());
        self
    }

    pub fn with_auth_code(mut self, code: impl Into<String>) -> Self {
        self.auth_code = Some(code.into());
        self
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    /// A token appeared where a URL was expected.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

/// True for tokens starting with `http://` or `https://`.
pub fn is_url(token: &str) -> bool {
    token.starts_with("http://") || token.starts_with("https://")
}

/// Parses `tokens` into jobs, left to right.
///
/// After a URL, the next non-URL token is taken as the size hint if it looks
/// like one; then, if `auth_enabled`, the next non-URL token is taken as the
/// auth code. Any other token where a URL is expected fails the whole list.
pub fn parse_tokens<S: AsRef<str>>(tokens: &[S], auth_enabled: bool) -> Result<Vec<Job>, ParseError> {
    let mut jobs = Vec::new();
    let mut rest = tokens.iter().map(AsRef::as_ref).peekable();

    while let Some(token) = rest.next() {
        if !is_url(token) {
            return Err(ParseError::InvalidUrl(token.to_string()));
        }
        let mut job = Job::new(token);

        if let Some(hint) = rest.next_if(|t| !is_url(t) && is_size_hint(t)) {
            job.size_hint = Some(hint.to_string());
        }
        if auth_enabled {
            if let Some(code) = rest.next_if(|t| !is_url(t)) {
                job.auth_code = Some(code.to_string());
            }
        }
        jobs.push(job);
    }

    Ok(jobs)
}

/// Splits one input line on whitespace and parses it.
pub fn parse_line(line: &str, auth_enabled: bool) -> Result<Vec<Job>, ParseError> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    parse_tokens(&tokens, auth_enabled)
}
