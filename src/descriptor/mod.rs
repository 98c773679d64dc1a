//! Version descriptor resources
//!
//! A descriptor is the flat key/value content of a `.version` file:
//!
//! ```text
//! # generated by the build
//! artifactId=swissknife
//! version=1.0
//! buildNumber=3a77
//! ```
//!
//! # Modules
//!
//! - [`loader`]: `DescriptorLoader` trait used by the resolver
//! - [`fs`]: loader reading descriptors below resource root directories
//! - [`embedded`]: loader over descriptors compiled into the binary

pub mod embedded;
pub mod fs;
pub mod loader;

pub use embedded::EmbeddedDescriptorLoader;
pub use fs::FsDescriptorLoader;
pub use loader::DescriptorLoader;

use indexmap::IndexMap;

use crate::config::{KEY_ARTIFACT_ID, KEY_BUILD_NUMBER, KEY_VERSION};

/// Parsed key/value pairs of one descriptor, in file order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Descriptor {
    entries: IndexMap<String, String>,
}

impl Descriptor {
    /// Parse properties-style content
    ///
    /// Lines are `key=value`, `key:value` or `key value`. Blank lines and
    /// lines starting with `#` or `!` are skipped. A line ending in an odd
    /// number of `\` continues on the next line, whose leading whitespace is
    /// dropped. Other backslash escapes (`\=`, `\uXXXX`) are kept verbatim.
    /// A later duplicate key replaces the earlier value.
    pub fn parse(content: &str) -> Self {
        let entries = logical_lines(content)
            .iter()
            .map(|line| line.trim())
            .filter(|line| !line.is_empty())
            .map(split_entry)
            .filter(|(key, _)| !key.is_empty())
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();

        Self { entries }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Value for `key`, treating a blank value as missing
    pub fn non_blank(&self, key: &str) -> Option<&str> {
        self.get(key).filter(|value| !value.trim().is_empty())
    }

    pub fn artifact_id(&self) -> Option<&str> {
        self.non_blank(KEY_ARTIFACT_ID)
    }

    pub fn version(&self) -> Option<&str> {
        self.non_blank(KEY_VERSION)
    }

    pub fn build_number(&self) -> Option<&str> {
        self.non_blank(KEY_BUILD_NUMBER)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Descriptor {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

fn logical_lines(content: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut pending: Option<String> = None;

    for raw in content.lines() {
        let line = raw.trim_start();
        let mut current = match pending.take() {
            Some(mut head) => {
                head.push_str(line);
                head
            }
            None if line.is_empty() || line.starts_with(['#', '!']) => continue,
            None => line.to_string(),
        };

        if continues(&current) {
            current.pop();
            pending = Some(current);
        } else {
            lines.push(current);
        }
    }

    lines.extend(pending);
    lines
}

fn continues(line: &str) -> bool {
    line.chars().rev().take_while(|&c| c == '\\').count() % 2 == 1
}

fn split_entry(line: &str) -> (&str, &str) {
    match line.find(['=', ':', ' ', '\t']) {
        Some(pos) => {
            let key = line[..pos].trim_end();
            let rest = line[pos..].trim_start();
            let value = rest
                .strip_prefix(['=', ':'])
                .unwrap_or(rest)
                .trim_start();
            (key, value)
        }
        None => (line, ""),
    }
}
