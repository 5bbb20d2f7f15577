//! Cadence Core
//!
//! Platform-agnostic core types and error handling for Cadence.
//!
//! This crate provides the building blocks shared by the playback session and
//! the applications that drive it.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Track`, `TrackId`
//! - **Catalog**: an ordered, validated list of tracks loaded from JSON
//! - **Error Handling**: Unified `CadenceError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use cadence_core::{Catalog, Track};
//!
//! let track = Track::new("t1", "Midnight City", "M83")
//!     .with_year(2011)
//!     .with_duration_secs(243);
//!
//! let catalog = Catalog::new(vec![track]).unwrap();
//! assert_eq!(catalog.len(), 1);
//! assert_eq!(catalog.get("t1").unwrap().title, "Midnight City");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod catalog;
pub mod error;
pub mod types;

// Re-export commonly used types
pub use catalog::Catalog;
pub use error::{CadenceError, Result};
pub use types::{Track, TrackId};
