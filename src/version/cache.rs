use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::debug;

use crate::namespace::Namespace;
use crate::version::record::Version;

#[derive(Debug, Default)]
struct Entries {
    /// Final result per queried namespace
    resolved: HashMap<Namespace, Arc<Version>>,
    /// Result of the descriptor found at a namespace, keyed by that namespace
    owned: HashMap<Namespace, Arc<Version>>,
}

/// Memoized resolution results shared by every caller of a resolver
///
/// Both maps are first-writer-wins: a `store` on a present key keeps the
/// existing record and returns it, so racing resolutions of one namespace
/// converge on a single instance.
///
/// `clear` is meant for tests and administrative resets. Running it while
/// resolutions are in flight is allowed but a racing resolution may re-populate
/// entries right after the wipe.
#[derive(Debug, Default)]
pub struct VersionCache {
    entries: RwLock<Entries>,
}

impl VersionCache {
    pub fn new() -> Self {
        Self::default()
    }

    // Records are immutable, so a writer that panicked cannot leave a torn entry
    fn read(&self) -> RwLockReadGuard<'_, Entries> {
        self.entries.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Entries> {
        self.entries.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Cached result for a queried namespace
    pub fn lookup(&self, namespace: &Namespace) -> Option<Arc<Version>> {
        self.read().resolved.get(namespace).cloned()
    }

    /// Remember the result for a queried namespace; returns the cached instance
    pub fn store(&self, namespace: Namespace, version: Arc<Version>) -> Arc<Version> {
        let mut entries = self.write();
        Arc::clone(entries.resolved.entry(namespace).or_insert(version))
    }

    /// Cached record built from the descriptor located at `owner`
    pub fn lookup_owned(&self, owner: &Namespace) -> Option<Arc<Version>> {
        self.read().owned.get(owner).cloned()
    }

    /// Remember the record built from the descriptor at `owner`; returns the cached instance
    pub fn store_owned(&self, owner: Namespace, version: Arc<Version>) -> Arc<Version> {
        let mut entries = self.write();
        Arc::clone(entries.owned.entry(owner).or_insert(version))
    }

    /// Drop every entry
    pub fn clear(&self) {
        let mut entries = self.write();
        debug!(
            "Clearing version cache ({} resolved, {} owned)",
            entries.resolved.len(),
            entries.owned.len()
        );
        entries.resolved.clear();
        entries.owned.clear();
    }

    /// Number of queried namespaces with a cached result
    pub fn len(&self) -> usize {
        self.read().resolved.len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().resolved.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ns(name: &str) -> Namespace {
        Namespace::parse(name).unwrap()
    }

    fn record(group_id: &str) -> Arc<Version> {
        Arc::new(Version::new(group_id, "swissknife", "1.0", "3a77"))
    }

    #[test]
    fn lookup_returns_none_for_unknown_namespace() {
        let cache = VersionCache::new();

        assert!(cache.lookup(&ns("org.mrcool")).is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn store_then_lookup_returns_same_instance() {
        let cache = VersionCache::new();
        let version = record("org.mrcool");

        cache.store(ns("org.mrcool"), Arc::clone(&version));

        let cached = cache.lookup(&ns("org.mrcool")).unwrap();
        assert!(Arc::ptr_eq(&cached, &version));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn store_on_present_key_keeps_first_record() {
        let cache = VersionCache::new();
        let first = record("org.mrcool");
        let second = record("org.mrcool");

        cache.store(ns("org.mrcool"), Arc::clone(&first));
        let kept = cache.store(ns("org.mrcool"), second);

        assert!(Arc::ptr_eq(&kept, &first));
        assert!(Arc::ptr_eq(&cache.lookup(&ns("org.mrcool")).unwrap(), &first));
    }

    #[test]
    fn owned_entries_are_separate_from_resolved_entries() {
        let cache = VersionCache::new();
        cache.store_owned(ns("org.mrcool"), record("org.mrcool"));

        assert!(cache.lookup(&ns("org.mrcool")).is_none());
        assert!(cache.lookup_owned(&ns("org.mrcool")).is_some());
        assert!(cache.is_empty());
    }

    #[test]
    fn clear_wipes_everything() {
        let cache = VersionCache::new();
        cache.store(ns("org.mrcool"), record("org.mrcool"));
        cache.store(ns("org.mrcool.db"), record("org.mrcool"));
        cache.store_owned(ns("org.mrcool"), record("org.mrcool"));

        cache.clear();

        assert!(cache.is_empty());
        assert!(cache.lookup(&ns("org.mrcool.db")).is_none());
        assert!(cache.lookup_owned(&ns("org.mrcool")).is_none());
    }

    #[test]
    fn concurrent_stores_converge_on_one_instance() {
        let cache = Arc::new(VersionCache::new());

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let cache = Arc::clone(&cache);
                std::thread::spawn(move || cache.store(ns("org.mrcool"), record("org.mrcool")))
            })
            .collect();
        let results: Vec<Arc<Version>> = handles.into_iter().map(|h| h.join().unwrap()).collect();

        let cached = cache.lookup(&ns("org.mrcool")).unwrap();
        assert!(results.iter().all(|v| Arc::ptr_eq(v, &cached)));
    }
}
