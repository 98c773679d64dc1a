//! In-memory descriptor loader
//!
//! Useful for shipping descriptors inside the binary:
//!
//! ```
//! use module_version::descriptor::EmbeddedDescriptorLoader;
//!
//! let loader = EmbeddedDescriptorLoader::new()
//!     .with_resource("org/mrcool/.version", "artifactId=mrcool\nversion=1.0\n");
//! assert_eq!(loader.len(), 1);
//! ```

use std::collections::HashMap;

use crate::descriptor::{Descriptor, DescriptorLoader};
use crate::namespace::Namespace;

/// Descriptor contents keyed by logical resource path (`a/b/.version`)
#[derive(Debug, Clone, Default)]
pub struct EmbeddedDescriptorLoader {
    resources: HashMap<String, String>,
}

impl EmbeddedDescriptorLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_resource(mut self, resource_path: &str, content: &str) -> Self {
        self.insert(resource_path, content);
        self
    }

    /// Register the descriptor content for a namespace
    pub fn with_namespace(self, namespace: &Namespace, content: &str) -> Self {
        let resource_path = namespace.resource_path();
        self.with_resource(&resource_path, content)
    }

    pub fn insert(&mut self, resource_path: &str, content: &str) {
        self.resources
            .insert(resource_path.trim_start_matches('/').to_string(), content.to_string());
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }
}

impl DescriptorLoader for EmbeddedDescriptorLoader {
    fn load(&self, namespace: &Namespace) -> Option<Descriptor> {
        self.resources
            .get(&namespace.resource_path())
            .map(|content| Descriptor::parse(content))
    }
}
