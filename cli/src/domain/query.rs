//! Search-term micro-language for the local directory.
//!
//! A term is a comma-separated list of `key=value` clauses, for example
//! `name=web*,version=1.0`. Each clause becomes one `dirctl search` flag.
//! Rejected terms are a value, not an error: the local backend answers them
//! with an empty result set.

#![allow(clippy::expect_used)] // Regex is a compile-time constant

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

/// Characters a search term may contain.
pub static SEARCH_TERM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_=,*.\-]+$").expect("valid regex"));

/// Keys accepted on the left of `=`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryKey {
    Locator,
    Module,
    Name,
    Skill,
    SkillId,
    Version,
}

impl QueryKey {
    pub const ALL: [QueryKey; 6] = [
        Self::Locator,
        Self::Module,
        Self::Name,
        Self::Skill,
        Self::SkillId,
        Self::Version,
    ];

    #[must_use]
    pub fn parse(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == key)
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Locator => "locator",
            Self::Module => "module",
            Self::Name => "name",
            Self::Skill => "skill",
            Self::SkillId => "skill-id",
            Self::Version => "version",
        }
    }

    /// The `dirctl search` flag for this key.
    #[must_use]
    pub fn flag(self) -> String {
        format!("--{}", self.as_str())
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One `key=value` pair, trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clause {
    pub key: QueryKey,
    pub value: String,
}

/// Outcome of parsing a non-rejected term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedQuery {
    /// The empty term: search without filters.
    Unfiltered,
    /// One clause per comma-separated pair, in input order.
    Filtered(Vec<Clause>),
}

impl ParsedQuery {
    /// Flatten into `dirctl search` arguments, in input order.
    #[must_use]
    pub fn to_flags(&self) -> Vec<String> {
        match self {
            Self::Unfiltered => Vec::new(),
            Self::Filtered(clauses) => clauses
                .iter()
                .flat_map(|c| [c.key.flag(), c.value.clone()])
                .collect(),
        }
    }
}

/// Why a term was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryRejection {
    #[error("search term may only contain letters, digits and _ = , * . -")]
    IllegalCharacters,

    #[error("clause {0:?} is not of the form key=value")]
    MalformedClause(String),

    #[error("clause {0:?} has an empty key or value")]
    EmptyKeyOrValue(String),

    #[error("unknown search key {0:?} (expected one of: locator, module, name, skill, skill-id, version)")]
    UnknownKey(String),
}

/// Parse a search term.
///
/// # Errors
///
/// Returns the first [`QueryRejection`] found, checking the character class
/// before any clause.
pub fn parse(term: &str) -> Result<ParsedQuery, QueryRejection> {
    let term = term.trim();
    if term.is_empty() {
        return Ok(ParsedQuery::Unfiltered);
    }
    if !SEARCH_TERM_RE.is_match(term) {
        return Err(QueryRejection::IllegalCharacters);
    }

    let mut clauses = Vec::new();
    for pair in term.split(',') {
        let parts: Vec<&str> = pair.split('=').collect();
        let [key, value] = parts.as_slice() else {
            return Err(QueryRejection::MalformedClause(pair.to_string()));
        };
        let (key, value) = (key.trim(), value.trim());
        if key.is_empty() || value.is_empty() {
            return Err(QueryRejection::EmptyKeyOrValue(pair.to_string()));
        }
        let key = QueryKey::parse(key).ok_or_else(|| QueryRejection::UnknownKey(key.to_string()))?;
        clauses.push(Clause {
            key,
            value: value.to_string(),
        });
    }
    Ok(ParsedQuery::Filtered(clauses))
}
