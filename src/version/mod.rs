//! Version resolution layer
//!
//! Turns a namespace into the version of the module it belongs to by finding
//! the nearest `.version` descriptor in its hierarchy.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  Namespace  │────▶│  Resolver   │────▶│    Cache    │
//! │ (ancestors) │     │ (nearest    │     │ (queried +  │
//! └─────────────┘     │  descriptor)│     │  owner keys)│
//!                     └─────────────┘     └─────────────┘
//!                       │    │    │
//!            ┌──────────┘    │    └──────────┐
//!            ▼               ▼               ▼
//!     ┌─────────────┐ ┌─────────────┐ ┌─────────────┐
//!     │ Descriptor  │ │    Host     │ │ Diagnostics │
//!     │   Loader    │ │  Metadata   │ │    Sink     │
//!     └─────────────┘ └─────────────┘ └─────────────┘
//! ```
//!
//! # Modules
//!
//! - [`record`]: `Version` record, tag and display formatting
//! - [`cache`]: memoized results shared across callers
//! - [`resolver`]: the resolution algorithm
//! - [`host`]: host metadata fallback (Cargo package versions)
//! - [`diagnostics`]: descriptor warnings/errors and their suppression
//! - [`global`]: the process-wide default resolver
//! - [`versioned`]: marker trait for version anchor types
//! - [`error`]: error types

pub mod cache;
pub mod diagnostics;
pub mod error;
pub mod global;
pub mod host;
pub mod record;
pub mod resolver;
pub mod versioned;
