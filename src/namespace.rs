//! Hierarchical namespaces and the ancestor walk used to find descriptors
//!
//! A namespace is a dot-separated name such as `org.mrcool.swissknife.db`.
//! Every segment must be an identifier (ASCII letters, digits, underscore,
//! not starting with a digit). Namespaces are validated once on construction,
//! so everything downstream can assume a well-formed name.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};

use crate::config::DESCRIPTOR_FILE_NAME;
use crate::version::error::VersionError;

static SEGMENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").unwrap());

const SEPARATOR: char = '.';

/// A validated, dot-separated namespace name
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Namespace(String);

impl Namespace {
    /// Validate and wrap a dotted namespace name
    ///
    /// Rejects empty names, empty segments (`a..b`, `.a`, `a.`) and segments
    /// that are not identifiers (`org.#abc`).
    pub fn parse(name: &str) -> Result<Self, VersionError> {
        if name.is_empty() {
            return Err(VersionError::invalid_namespace(name, "namespace is empty"));
        }

        for (index, segment) in name.split(SEPARATOR).enumerate() {
            if segment.is_empty() {
                return Err(VersionError::invalid_namespace(
                    name,
                    format!("segment {} is empty", index),
                ));
            }
            if !SEGMENT_RE.is_match(segment) {
                return Err(VersionError::invalid_namespace(
                    name,
                    format!("segment {:?} is not a valid identifier", segment),
                ));
            }
        }

        Ok(Self(name.to_string()))
    }

    /// Convert a Rust module path (`module_path!()`) into a namespace
    ///
    /// `my_crate::db::pool` becomes `my_crate.db.pool`.
    pub fn from_module_path(module_path: &str) -> Result<Self, VersionError> {
        Self::parse(&module_path.replace("::", "."))
    }

    /// Namespace of the module that defines `T`
    ///
    /// Generic arguments are ignored and the type's own name is dropped, so
    /// `my_crate::db::Pool<u8>` yields `my_crate.db`. Types without an
    /// enclosing module (primitives, slices, tuples) are rejected.
    pub fn of<T: ?Sized>() -> Result<Self, VersionError> {
        let type_name = std::any::type_name::<T>();
        let path = type_name.split('<').next().unwrap_or(type_name);

        match path.rsplit_once("::") {
            Some((module, _)) => Self::from_module_path(module),
            None => Err(VersionError::invalid_namespace(
                type_name,
                "type has no enclosing module",
            )),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Number of segments
    pub fn depth(&self) -> usize {
        self.segments().count()
    }

    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split(SEPARATOR)
    }

    /// First segment, e.g. `org` for `org.mrcool.swissknife`
    pub fn root(&self) -> &str {
        self.0.split(SEPARATOR).next().unwrap_or(&self.0)
    }

    /// Enclosing namespace, or None for a single-segment namespace
    pub fn parent(&self) -> Option<Namespace> {
        self.0
            .rsplit_once(SEPARATOR)
            .map(|(parent, _)| Namespace(parent.to_string()))
    }

    /// The namespace itself followed by each enclosing namespace, nearest first
    ///
    /// The walk ends with the single-segment root, which is always yielded.
    /// Each call returns a fresh iterator.
    pub fn ancestors(&self) -> Ancestors<'_> {
        Ancestors {
            name: &self.0,
            end: Some(self.0.len()),
        }
    }

    /// Whether `self` equals `other` or encloses it
    pub fn contains(&self, other: &Namespace) -> bool {
        other.0 == self.0
            || (other.0.starts_with(&self.0)
                && other.0.as_bytes().get(self.0.len()) == Some(&(SEPARATOR as u8)))
    }

    /// Logical resource path of this namespace's descriptor: `a/b/c/.version`
    pub fn resource_path(&self) -> String {
        let mut path = self.0.replace(SEPARATOR, "/");
        path.push('/');
        path.push_str(DESCRIPTOR_FILE_NAME);
        path
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Namespace {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::str::FromStr for Namespace {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl<'de> Deserialize<'de> for Namespace {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Self::parse(&name).map_err(serde::de::Error::custom)
    }
}

/// Iterator over a namespace and its ancestors, see [`Namespace::ancestors`]
#[derive(Debug, Clone)]
pub struct Ancestors<'a> {
    name: &'a str,
    end: Option<usize>,
}

impl Iterator for Ancestors<'_> {
    type Item = Namespace;

    fn next(&mut self) -> Option<Self::Item> {
        let end = self.end?;
        let current = &self.name[..end];
        self.end = current.rfind(SEPARATOR);
        Some(Namespace(current.to_string()))
    }
}
