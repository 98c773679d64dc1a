//! Marker for types that anchor their module's version
//!
//! Implement [`Versioned`] on a typical type of a library or application
//! (its entry point or facade) whose module ships a `.version` descriptor:
//!
//! ```
//! use module_version::Versioned;
//!
//! pub struct SwissKnife;
//!
//! impl Versioned for SwissKnife {}
//!
//! let version = SwissKnife::version().unwrap();
//! println!("running {}", version);
//! ```

use std::sync::Arc;

use crate::version::error::VersionError;
use crate::version::record::Version;
use crate::version::resolver::VersionResolver;

pub trait Versioned {
    /// Version of the implementing type's module, from the default resolver
    fn version() -> Result<Arc<Version>, VersionError>
    where
        Self: Sized,
    {
        crate::of::<Self>()
    }

    /// Version of the implementing type's module, from `resolver`
    fn version_with(resolver: &VersionResolver) -> Result<Arc<Version>, VersionError>
    where
        Self: Sized,
    {
        resolver.resolve_type::<Self>()
    }
}
