pub mod almanac;
pub mod fetch;

use crate::catalog::RsoRecord;

pub use fetch::{FetchError, Health, HttpSource};

/// Where the view gets its catalog from.
///
/// Calls block; the view controller runs each one on its own thread.
pub trait RsoSource: Send + Sync {
    fn fetch_all_records(&self) -> Result<Vec<RsoRecord>, FetchError>;

    /// Informational size of the reference catalog.
    fn fetch_catalog_size(&self) -> Result<usize, FetchError>;
}
