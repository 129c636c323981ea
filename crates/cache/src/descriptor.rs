//! Connection descriptor parsing
//!
//! A descriptor selects a backend and configures it:
//!
//! ```text
//! kind ":" location ["?" query]
//! ```
//!
//! e.g. `dir:/home/me/.vir?gzip=1`. The query uses URL query-string
//! encoding; the first value of a repeated option wins.

use crate::errors::{CacheError, Result};
use std::collections::HashMap;
use std::fmt;
use std::path::Path;

const KIND_SEPARATOR: char = ':';
const QUERY_SEPARATOR: char = '?';

/// A parsed connection descriptor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Descriptor {
    kind: String,
    location: String,
    options: HashMap<String, String>,
}

impl Descriptor {
    /// Parse a descriptor string. Pure; never touches a backend.
    pub fn parse(descriptor: &str) -> Result<Self> {
        let Some((kind, rest)) = descriptor.split_once(KIND_SEPARATOR) else {
            return Err(CacheError::invalid_descriptor(
                descriptor,
                "expected '<kind>:<location>'",
            ));
        };

        if kind.is_empty() {
            return Err(CacheError::invalid_descriptor(
                descriptor,
                "backend kind is empty",
            ));
        }

        let (location, options) = match rest.split_once(QUERY_SEPARATOR) {
            Some((location, query)) => (location, parse_query(descriptor, query)?),
            None => (rest, HashMap::new()),
        };

        Ok(Self {
            kind: kind.to_string(),
            location: location.to_string(),
            options,
        })
    }

    /// Backend kind as written; compare with [`Descriptor::kind_matches`]
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Case-insensitive kind comparison
    pub fn kind_matches(&self, name: &str) -> bool {
        self.kind.eq_ignore_ascii_case(name)
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn options(&self) -> &HashMap<String, String> {
        &self.options
    }

    pub fn option(&self, name: &str) -> Option<&str> {
        self.options.get(name).map(String::as_str)
    }

    pub fn has_option(&self, name: &str) -> bool {
        self.options.contains_key(name)
    }
}

impl std::str::FromStr for Descriptor {
    type Err = CacheError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Descriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.kind, KIND_SEPARATOR, self.location)?;
        if !self.options.is_empty() {
            let mut names: Vec<&String> = self.options.keys().collect();
            names.sort();
            let mut query = url::form_urlencoded::Serializer::new(String::new());
            for name in names {
                query.append_pair(name, &self.options[name]);
            }
            write!(f, "{}{}", QUERY_SEPARATOR, query.finish())?;
        }
        Ok(())
    }
}

/// Descriptor for a plain directory store
pub fn dir_descriptor(dir: impl AsRef<Path>) -> String {
    format!("dir{}{}", KIND_SEPARATOR, dir.as_ref().display())
}

/// Descriptor for a gzip-compressed directory store
pub fn dir_descriptor_with_gzip(dir: impl AsRef<Path>) -> String {
    format!("{}{}gzip=1", dir_descriptor(dir), QUERY_SEPARATOR)
}

#[derive(Debug, thiserror::Error)]
enum QueryError {
    #[error("invalid URL escape '{0}'")]
    InvalidEscape(String),
    #[error("invalid semicolon separator in query")]
    Semicolon,
}

fn parse_query(descriptor: &str, query: &str) -> Result<HashMap<String, String>> {
    validate_query(query).map_err(|e| CacheError::InvalidDescriptor {
        descriptor: descriptor.to_string(),
        reason: format!("invalid query '{query}'"),
        source: Some(Box::new(e)),
    })?;

    let mut options = HashMap::new();
    for (name, value) in url::form_urlencoded::parse(query.as_bytes()) {
        options
            .entry(name.into_owned())
            .or_insert_with(|| value.into_owned());
    }
    Ok(options)
}

/// `form_urlencoded` is lenient; reject what a strict query parser would.
fn validate_query(query: &str) -> std::result::Result<(), QueryError> {
    if query.contains(';') {
        return Err(QueryError::Semicolon);
    }

    let bytes = query.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let escape = bytes.get(i + 1..i + 3);
            match escape {
                Some(hex) if hex.iter().all(u8::is_ascii_hexdigit) => i += 3,
                _ => {
                    let end = (i + 3).min(bytes.len());
                    return Err(QueryError::InvalidEscape(
                        String::from_utf8_lossy(&bytes[i..end]).into_owned(),
                    ));
                }
            }
        } else {
            i += 1;
        }
    }
    Ok(())
}
