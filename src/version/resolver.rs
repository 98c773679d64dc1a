//! Namespace version resolver
//!
//! Resolution of a namespace `a.b.c`:
//!
//! 1. Validate the name (the only failure path)
//! 2. Return the cached record for `a.b.c` if there is one
//! 3. Walk `a.b.c`, `a.b`, `a` and stop at the first level with a
//!    descriptor; that level becomes the record's group id
//! 4. Without any descriptor, ask the host metadata for `a.b.c` itself,
//!    otherwise the result is [`Version::unknown`]
//! 5. Cache the result under `a.b.c` and return it
//!
//! A nested descriptor fully overrides its parents; fields are never merged
//! across levels. A descriptor without `version` makes the result unknown
//! even when a parent level has a complete descriptor.

use std::sync::Arc;

use tracing::debug;

use crate::config::{KEY_ARTIFACT_ID, KEY_BUILD_NUMBER, KEY_VERSION, ResolverConfig};
use crate::descriptor::{Descriptor, DescriptorLoader, FsDescriptorLoader};
use crate::namespace::Namespace;
use crate::version::cache::VersionCache;
use crate::version::diagnostics::{Diagnostic, DiagnosticSink, TracingSink, WarningSettings};
use crate::version::error::VersionError;
use crate::version::host::HostMetadata;
use crate::version::record::Version;

/// Resolves namespaces to shared [`Version`] records
///
/// Owns the cache and the warning settings. One instance is meant to be
/// shared by the whole process (see [`crate::default_resolver`]); it is
/// `Send + Sync` and resolution only takes short cache locks, so concurrent
/// resolutions of one uncached namespace may both load descriptors and then
/// converge on the first stored record.
pub struct VersionResolver {
    loader: Arc<dyn DescriptorLoader>,
    host: Arc<dyn HostMetadata>,
    diagnostics: Arc<dyn DiagnosticSink>,
    settings: WarningSettings,
    cache: VersionCache,
}

impl VersionResolver {
    pub fn new(loader: Arc<dyn DescriptorLoader>, host: Arc<dyn HostMetadata>) -> Self {
        Self {
            loader,
            host,
            diagnostics: Arc::new(TracingSink),
            settings: WarningSettings::new(),
            cache: VersionCache::new(),
        }
    }

    /// Resolver reading descriptors below the configured resource roots
    pub fn from_config(config: &ResolverConfig, host: Arc<dyn HostMetadata>) -> Self {
        let resolver = Self::new(
            Arc::new(FsDescriptorLoader::new(config.resource_roots.clone())),
            host,
        );
        if let Some(suppress) = config.suppress_var_found_warning {
            resolver.settings.set_suppressed(suppress);
        }
        resolver
    }

    pub fn with_diagnostics(mut self, diagnostics: Arc<dyn DiagnosticSink>) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    pub fn with_settings(mut self, settings: WarningSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn settings(&self) -> &WarningSettings {
        &self.settings
    }

    pub fn cache(&self) -> &VersionCache {
        &self.cache
    }

    /// Resolve a dotted namespace name
    ///
    /// # Returns
    /// * `Ok(Arc<Version>)` - The resolved record, or [`Version::unknown`]
    /// * `Err(VersionError::InvalidNamespace)` - The name is malformed; nothing was looked up
    pub fn resolve(&self, namespace: &str) -> Result<Arc<Version>, VersionError> {
        let namespace = Namespace::parse(namespace)?;
        Ok(self.resolve_namespace(&namespace))
    }

    /// Resolve the namespace of the module defining `T`
    pub fn resolve_type<T: ?Sized>(&self) -> Result<Arc<Version>, VersionError> {
        let namespace = Namespace::of::<T>()?;
        Ok(self.resolve_namespace(&namespace))
    }

    /// Resolve a Rust module path such as `module_path!()`
    pub fn resolve_module_path(&self, module_path: &str) -> Result<Arc<Version>, VersionError> {
        let namespace = Namespace::from_module_path(module_path)?;
        Ok(self.resolve_namespace(&namespace))
    }

    pub fn resolve_namespace(&self, namespace: &Namespace) -> Arc<Version> {
        if let Some(version) = self.cache.lookup(namespace) {
            return version;
        }

        let version = self
            .find_in_hierarchy(namespace)
            .unwrap_or_else(|| self.version_from_host(namespace));

        self.cache.store(namespace.clone(), version)
    }

    /// Forget every resolved namespace
    ///
    /// Not meant to race with in-flight resolutions.
    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    pub fn should_warn_if_variable_found(&self, value: &str) -> bool {
        self.settings.should_warn_if_variable_found(value)
    }

    /// Record built from the nearest descriptor, or None when no level has one
    fn find_in_hierarchy(&self, namespace: &Namespace) -> Option<Arc<Version>> {
        for candidate in namespace.ancestors() {
            if let Some(version) = self.cache.lookup_owned(&candidate) {
                debug!("Reusing descriptor of {} for {}", candidate, namespace);
                return Some(version);
            }

            if let Some(descriptor) = self.loader.load(&candidate) {
                debug!("Found descriptor for {} at {}", namespace, candidate);
                let version = self.version_from_descriptor(&candidate, &descriptor);
                return Some(self.cache.store_owned(candidate, version));
            }
        }

        None
    }

    fn version_from_descriptor(&self, owner: &Namespace, descriptor: &Descriptor) -> Arc<Version> {
        let artifact_id = descriptor.artifact_id();
        if artifact_id.is_none() {
            self.diagnostics.emit(&Diagnostic::MissingArtifactId {
                namespace: owner.clone(),
            });
        }

        let Some(project_version) = descriptor.version() else {
            self.diagnostics.emit(&Diagnostic::MissingVersion {
                namespace: owner.clone(),
            });
            return Version::unknown();
        };

        let build_number = descriptor.build_number();

        for (field, value) in [
            (KEY_ARTIFACT_ID, artifact_id),
            (KEY_VERSION, Some(project_version)),
            (KEY_BUILD_NUMBER, build_number),
        ] {
            if let Some(value) = value {
                self.check_variable(owner, field, value);
            }
        }

        Arc::new(Version::new(
            owner.as_str(),
            artifact_id.unwrap_or(owner.as_str()),
            project_version,
            build_number.unwrap_or_default(),
        ))
    }

    fn version_from_host(&self, namespace: &Namespace) -> Arc<Version> {
        match self.host.lookup(namespace) {
            Some(host) => {
                debug!(
                    "Using host metadata for {}: {}",
                    namespace, host.implementation_version
                );
                Arc::new(Version::new(
                    namespace.as_str(),
                    namespace.as_str(),
                    host.implementation_version,
                    host.build_qualifier.unwrap_or_default(),
                ))
            }
            None => {
                debug!("No version information for {}", namespace);
                Version::unknown()
            }
        }
    }

    fn check_variable(&self, owner: &Namespace, field: &'static str, value: &str) {
        if self.settings.should_warn_if_variable_found(value) {
            self.diagnostics.emit(&Diagnostic::UnresolvedVariable {
                namespace: owner.clone(),
                field,
                value: value.to_string(),
            });
        }
    }
}
