//! News ingestion pipeline: load heterogeneous headline datasets, normalize
//! each to the common `NewsItem` shape, union them tagged by source, drop
//! rows without a headline, and sort by time.
//!
//! Each known source is described by a [`SourceSpec`] column mapping rather
//! than per-source code branches, so adding a source is a registry entry.

pub mod combine;
pub mod error;
pub mod loader;
pub mod normalize;
pub mod sources;
pub mod types;

pub use combine::combine_sources;
pub use error::LoadError;
pub use loader::{load_source, load_source_from_reader};
pub use sources::{source_spec, SourceSpec};
pub use types::NewsItem;
