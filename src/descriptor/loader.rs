//! Descriptor loader trait

#[cfg(test)]
use mockall::automock;

use crate::descriptor::Descriptor;
use crate::namespace::Namespace;

/// Trait for looking up the `.version` descriptor of a single namespace level
#[cfg_attr(test, automock)]
pub trait DescriptorLoader: Send + Sync {
    /// Load the descriptor stored at `namespace.resource_path()`
    ///
    /// # Returns
    /// * `Some(Descriptor)` - The resource exists and was read
    /// * `None` - No resource at this level, or it could not be read
    ///
    /// Read failures are reported as absence; implementations log them instead
    /// of returning an error.
    fn load(&self, namespace: &Namespace) -> Option<Descriptor>;
}
