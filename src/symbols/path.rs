// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use core::fmt;

/// Location pattern of a path rule, e.g. `/users/$uid/profile`.
///
/// Parts starting with `$` capture the key at that position.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "ast", derive(serde::Serialize))]
#[cfg_attr(feature = "ast", serde(transparent))]
pub struct PathTemplate {
    parts: Vec<String>,
}

impl PathTemplate {
    pub fn new(parts: Vec<String>) -> Self {
        Self { parts }
    }

    /// Parse a slash separated template. `{name}` is accepted as a
    /// spelling of the capture `$name`.
    pub fn parse(path: &str) -> Self {
        path.split('/')
            .filter(|p| !p.is_empty())
            .map(|p| match p.strip_prefix('{').and_then(|p| p.strip_suffix('}')) {
                Some(name) if name.starts_with('$') => name.to_string(),
                Some(name) => format!("${name}"),
                None => p.to_string(),
            })
            .collect()
    }

    pub fn parts(&self) -> &[String] {
        &self.parts
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    pub fn is_wildcard(part: &str) -> bool {
        part.starts_with('$')
    }

    /// Capture names in the template, in order, including the leading `$`.
    pub fn captures(&self) -> impl Iterator<Item = &str> + '_ {
        self.parts
            .iter()
            .map(String::as_str)
            .filter(|p| Self::is_wildcard(p))
    }

    /// Registry key of the template.
    pub fn key(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for PathTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.parts.is_empty() {
            return f.write_str("/");
        }
        for part in &self.parts {
            write!(f, "/{part}")?;
        }
        Ok(())
    }
}

impl<S: Into<String>> FromIterator<S> for PathTemplate {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(Into::into).collect())
    }
}
