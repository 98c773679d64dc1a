//! Host metadata fallback
//!
//! When no `.version` descriptor exists anywhere in a namespace's hierarchy,
//! the resolver asks the host for the implementation version of the
//! namespace itself. In Rust the natural host metadata is the Cargo package
//! version, registered per crate with [`register_package!`](crate::register_package).

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

#[cfg(test)]
use mockall::automock;

use tracing::debug;

use crate::namespace::Namespace;

/// Implementation version reported by the host
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostVersion {
    pub implementation_version: String,
    /// Build qualifier when it can be told apart from the version
    pub build_qualifier: Option<String>,
}

/// Read-only lookup of host-provided version metadata
#[cfg_attr(test, automock)]
pub trait HostMetadata: Send + Sync {
    /// Version metadata for exactly this namespace, if the host has any
    fn lookup(&self, namespace: &Namespace) -> Option<HostVersion>;
}

/// Host metadata that never reports anything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHostMetadata;

impl HostMetadata for NoHostMetadata {
    fn lookup(&self, _namespace: &Namespace) -> Option<HostVersion> {
        None
    }
}

/// Cargo package versions keyed by crate name
///
/// A namespace matches a package when its root segment equals the crate's
/// library name (`my-lib` is registered as `my_lib`).
#[derive(Debug, Default)]
pub struct PackageRegistry {
    packages: RwLock<HashMap<String, String>>,
}

impl PackageRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with this crate's own package already registered
    pub fn with_current_crate() -> Self {
        let registry = Self::new();
        registry.register(env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
        registry
    }

    /// Register (or replace) the version of a crate
    pub fn register(&self, crate_name: &str, version: &str) {
        let name = crate_name.replace('-', "_");
        debug!("Registered package {} {}", name, version);
        self.packages
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(name, version.to_string());
    }

    pub fn version_of(&self, crate_name: &str) -> Option<String> {
        self.packages
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&crate_name.replace('-', "_"))
            .cloned()
    }
}

impl HostMetadata for PackageRegistry {
    fn lookup(&self, namespace: &Namespace) -> Option<HostVersion> {
        self.version_of(namespace.root())
            .map(|version| split_build_metadata(&version))
    }
}

/// Split semver build metadata (`1.2.3+abc`) off a version string
///
/// Strings that are not valid semver are returned whole, without a qualifier.
pub fn split_build_metadata(version: &str) -> HostVersion {
    match semver::Version::parse(version) {
        Ok(mut parsed) if !parsed.build.is_empty() => {
            let build = parsed.build.to_string();
            parsed.build = semver::BuildMetadata::EMPTY;
            HostVersion {
                implementation_version: parsed.to_string(),
                build_qualifier: Some(build),
            }
        }
        _ => HostVersion {
            implementation_version: version.to_string(),
            build_qualifier: None,
        },
    }
}

/// Register the calling crate's Cargo package version
///
/// Without arguments the package goes into the default resolver's registry;
/// pass a [`PackageRegistry`] to register elsewhere.
///
/// ```
/// let registry = module_version::version::host::PackageRegistry::new();
/// module_version::register_package!(registry);
/// assert!(registry.version_of("module_version").is_some());
/// ```
#[macro_export]
macro_rules! register_package {
    () => {
        $crate::packages().register(env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
    };
    ($registry:expr) => {
        $registry.register(env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
    };
}
