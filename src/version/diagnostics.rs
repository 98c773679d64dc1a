//! Diagnostics raised while interpreting descriptors
//!
//! The resolver never fails on a bad descriptor. It reports through a
//! [`DiagnosticSink`] instead; [`TracingSink`] turns diagnostics into
//! `tracing` events.

use std::sync::{LazyLock, PoisonError, RwLock};

#[cfg(test)]
use mockall::automock;

use regex::Regex;
use tracing::{error, warn};

use crate::config::{ENV_SUPPRESS_VAR_FOUND_WARNING, parse_flag};
use crate::namespace::Namespace;

static VARIABLE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\$\{[^}]*\}").unwrap());

/// A condition found while building a version from a descriptor
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// Descriptor has no `artifactId`; the namespace is used instead
    MissingArtifactId { namespace: Namespace },
    /// Descriptor has no `version`; the result is unknown
    MissingVersion { namespace: Namespace },
    /// A field still contains an unexpanded `${...}` build variable
    UnresolvedVariable {
        namespace: Namespace,
        field: &'static str,
        value: String,
    },
}

impl Diagnostic {
    pub fn namespace(&self) -> &Namespace {
        match self {
            Self::MissingArtifactId { namespace }
            | Self::MissingVersion { namespace }
            | Self::UnresolvedVariable { namespace, .. } => namespace,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::MissingVersion { .. })
    }
}

/// Receiver of resolver diagnostics
#[cfg_attr(test, automock)]
pub trait DiagnosticSink: Send + Sync {
    fn emit(&self, diagnostic: &Diagnostic);
}

/// Emits diagnostics as `tracing` events
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn emit(&self, diagnostic: &Diagnostic) {
        match diagnostic {
            Diagnostic::MissingArtifactId { namespace } => {
                warn!(%namespace, "artifact not defined in .version file: {}", namespace);
            }
            Diagnostic::MissingVersion { namespace } => {
                error!(%namespace, "version not defined in .version file: {}", namespace);
            }
            Diagnostic::UnresolvedVariable {
                namespace,
                field,
                value,
            } => {
                warn!(
                    %namespace,
                    field = *field,
                    value = %value,
                    "variable found in .version file for {}",
                    namespace
                );
            }
        }
    }
}

/// Whether `value` contains a `${...}` placeholder
pub fn contains_variable(value: &str) -> bool {
    VARIABLE_RE.is_match(value)
}

/// Controls the unresolved-variable warning
///
/// The suppression flag is read every time a warning is about to be emitted:
/// an explicit override when one is set, otherwise the
/// `MODULE_VERSION_SUPPRESS_VAR_FOUND_WARNING` environment variable.
#[derive(Debug)]
pub struct WarningSettings {
    suppress_override: RwLock<Option<bool>>,
    env_var: Option<&'static str>,
}

impl Default for WarningSettings {
    fn default() -> Self {
        Self {
            suppress_override: RwLock::new(None),
            env_var: Some(ENV_SUPPRESS_VAR_FOUND_WARNING),
        }
    }
}

impl WarningSettings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Settings that ignore the environment and only honor the override
    pub fn detached() -> Self {
        Self {
            suppress_override: RwLock::new(None),
            env_var: None,
        }
    }

    /// Set the suppression flag from a boolean-like value (e.g. `"true"`, `"yes"`)
    pub fn set_suppress(&self, value: &str) {
        self.set_suppressed(parse_flag(value));
    }

    pub fn set_suppressed(&self, suppressed: bool) {
        *self
            .suppress_override
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(suppressed);
    }

    /// Remove the override; the environment decides again
    pub fn clear_suppress(&self) {
        *self
            .suppress_override
            .write()
            .unwrap_or_else(PoisonError::into_inner) = None;
    }

    pub fn is_suppressed(&self) -> bool {
        let override_value = *self
            .suppress_override
            .read()
            .unwrap_or_else(PoisonError::into_inner);

        override_value.unwrap_or_else(|| {
            self.env_var
                .and_then(|name| std::env::var(name).ok())
                .is_some_and(|value| parse_flag(&value))
        })
    }

    /// True when `value` has a placeholder and the warning is not suppressed
    pub fn should_warn_if_variable_found(&self, value: &str) -> bool {
        contains_variable(value) && !self.is_suppressed()
    }
}
