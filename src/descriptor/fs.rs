//! Filesystem descriptor loader

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::descriptor::{Descriptor, DescriptorLoader};
use crate::namespace::Namespace;
use crate::version::error::DescriptorError;

/// Loads descriptors from `<root>/<a>/<b>/<c>/.version`
///
/// Roots are searched in order and the first root holding the file wins.
/// Files are decoded as ISO-8859-1, so any byte sequence yields a descriptor.
#[derive(Debug, Clone, Default)]
pub struct FsDescriptorLoader {
    roots: Vec<PathBuf>,
}

impl FsDescriptorLoader {
    pub fn new(roots: Vec<PathBuf>) -> Self {
        Self { roots }
    }

    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self::new(vec![root.into()])
    }

    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    fn read_from(root: &Path, resource_path: &str) -> Result<Vec<u8>, DescriptorError> {
        let path = root.join(resource_path);
        std::fs::read(&path).map_err(|source| match source.kind() {
            ErrorKind::NotFound => DescriptorError::NotFound(resource_path.to_string()),
            _ => DescriptorError::Io { path, source },
        })
    }
}

impl DescriptorLoader for FsDescriptorLoader {
    fn load(&self, namespace: &Namespace) -> Option<Descriptor> {
        let resource_path = namespace.resource_path();

        for root in &self.roots {
            match Self::read_from(root, &resource_path) {
                Ok(bytes) => {
                    debug!("Loaded descriptor {} from {:?}", resource_path, root);
                    return Some(Descriptor::parse(&decode_latin1(&bytes)));
                }
                Err(DescriptorError::NotFound(_)) => continue,
                Err(e) => {
                    // Unreadable resources count as absent
                    debug!("Skipping descriptor: {}", e);
                    return None;
                }
            }
        }

        None
    }
}

fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}
