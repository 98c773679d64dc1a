//! Module version resolution
//!
//! Finds the build/version identity (artifact id, project version, build
//! number) of a module by walking its namespace hierarchy for the nearest
//! `.version` descriptor:
//!
//! ```text
//! resources/org/mrcool/swissknife/.version
//!     artifactId=swissknife
//!     version=1.0
//!     buildNumber=3a77
//! ```
//!
//! Every namespace below `org.mrcool.swissknife` without a descriptor of its
//! own resolves to the same shared record, displayed as `swissknife-r1.0-3a77`.
//! Namespaces with no descriptor anywhere fall back to the Cargo package
//! version registered for their root crate, or to [`Version::unknown`].
//!
//! ```
//! use std::sync::Arc;
//! use module_version::descriptor::EmbeddedDescriptorLoader;
//! use module_version::version::host::NoHostMetadata;
//! use module_version::VersionResolver;
//!
//! let loader = EmbeddedDescriptorLoader::new().with_resource(
//!     "org/mrcool/swissknife/.version",
//!     "artifactId=swissknife\nversion=1.0\nbuildNumber=3a77\n",
//! );
//! let resolver = VersionResolver::new(Arc::new(loader), Arc::new(NoHostMetadata));
//!
//! let version = resolver.resolve("org.mrcool.swissknife.db").unwrap();
//! assert_eq!(version.to_string(), "swissknife-r1.0-3a77");
//! ```

pub mod config;
pub mod descriptor;
pub mod namespace;
pub mod version;

pub use namespace::Namespace;
pub use version::error::VersionError;
pub use version::global::{
    clear_cache, default_resolver, of, of_module_path, of_namespace, packages,
};
pub use version::record::{Version, decorated_project_version};
pub use version::resolver::VersionResolver;
pub use version::versioned::Versioned;

/// Version of the module this macro is invoked in, from the default resolver
///
/// ```
/// let version = module_version::version!().unwrap();
/// assert!(version.is_unknown() || !version.project_version().is_empty());
/// ```
#[macro_export]
macro_rules! version {
    () => {
        $crate::of_module_path(module_path!())
    };
}
