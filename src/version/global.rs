//! Process-wide default resolver
//!
//! Built lazily on first use from [`ResolverConfig::from_env`]: descriptors are
//! read from the roots in `MODULE_VERSION_PATH` (default: the current
//! directory) and the host fallback is the default [`PackageRegistry`].

use std::sync::{Arc, LazyLock};

use crate::config::ResolverConfig;
use crate::version::error::VersionError;
use crate::version::host::PackageRegistry;
use crate::version::record::Version;
use crate::version::resolver::VersionResolver;

static PACKAGES: LazyLock<Arc<PackageRegistry>> =
    LazyLock::new(|| Arc::new(PackageRegistry::with_current_crate()));

static DEFAULT: LazyLock<VersionResolver> = LazyLock::new(|| {
    VersionResolver::from_config(&ResolverConfig::from_env(), PACKAGES.clone())
});

/// The resolver shared by the whole process
pub fn default_resolver() -> &'static VersionResolver {
    &DEFAULT
}

/// Package registry used as host metadata by the default resolver
pub fn packages() -> &'static PackageRegistry {
    &PACKAGES
}

/// Version of the module that defines `T`
pub fn of<T: ?Sized>() -> Result<Arc<Version>, VersionError> {
    default_resolver().resolve_type::<T>()
}

/// Version of a dotted namespace
pub fn of_namespace(namespace: &str) -> Result<Arc<Version>, VersionError> {
    default_resolver().resolve(namespace)
}

/// Version of a Rust module path, see [`version!`](crate::version!)
pub fn of_module_path(module_path: &str) -> Result<Arc<Version>, VersionError> {
    default_resolver().resolve_module_path(module_path)
}

/// Reset the default resolver's cache
pub fn clear_cache() {
    default_resolver().clear_cache();
}
