//! Resolver test utilities

use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use module_version::VersionResolver;
use module_version::descriptor::{Descriptor, DescriptorLoader, FsDescriptorLoader};
use module_version::namespace::Namespace;
use module_version::version::diagnostics::{Diagnostic, DiagnosticSink, WarningSettings};
use module_version::version::host::{HostMetadata, NoHostMetadata};

/// Checked-in resource tree with `.version` fixtures
pub fn fixtures_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/resources")
}

/// Sink that keeps every diagnostic for later assertions
#[derive(Default)]
pub struct RecordingSink {
    diagnostics: Mutex<Vec<Diagnostic>>,
}

impl RecordingSink {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.diagnostics.lock().unwrap().clone()
    }

    pub fn errors(&self) -> Vec<Diagnostic> {
        self.diagnostics()
            .into_iter()
            .filter(Diagnostic::is_error)
            .collect()
    }

    pub fn warnings(&self) -> Vec<Diagnostic> {
        self.diagnostics()
            .into_iter()
            .filter(|d| !d.is_error())
            .collect()
    }
}

impl DiagnosticSink for RecordingSink {
    fn emit(&self, diagnostic: &Diagnostic) {
        self.diagnostics.lock().unwrap().push(diagnostic.clone());
    }
}

/// Filesystem loader over the fixtures that counts load attempts
pub struct CountingFsLoader {
    inner: FsDescriptorLoader,
    loads: AtomicUsize,
}

impl CountingFsLoader {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            inner: FsDescriptorLoader::with_root(fixtures_root()),
            loads: AtomicUsize::new(0),
        })
    }

    pub fn loads(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }
}

impl DescriptorLoader for CountingFsLoader {
    fn load(&self, namespace: &Namespace) -> Option<Descriptor> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        self.inner.load(namespace)
    }
}

/// Everything a fixture-backed test needs to inspect
pub struct Fixture {
    pub resolver: VersionResolver,
    pub loader: Arc<CountingFsLoader>,
    pub sink: Arc<RecordingSink>,
}

impl Fixture {
    pub fn new() -> Self {
        Self::with_host(Arc::new(NoHostMetadata))
    }

    pub fn with_host(host: Arc<dyn HostMetadata>) -> Self {
        Self::with_parts(host, WarningSettings::detached())
    }

    /// Fixture whose suppression flag also follows the process environment
    pub fn with_env_settings() -> Self {
        Self::with_parts(Arc::new(NoHostMetadata), WarningSettings::new())
    }

    fn with_parts(host: Arc<dyn HostMetadata>, settings: WarningSettings) -> Self {
        let loader = CountingFsLoader::new();
        let sink = RecordingSink::new();
        let resolver = VersionResolver::new(loader.clone(), host)
            .with_diagnostics(sink.clone())
            .with_settings(settings);

        Self {
            resolver,
            loader,
            sink,
        }
    }
}
