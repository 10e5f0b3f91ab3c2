//! Query construction module
//!
//! Classifies user-selected filter tokens and turns search criteria into
//! upstream business-search requests. Nothing here performs I/O.

mod builder;
mod filters;

pub use builder::{
    radius_meters, QueryBuilder, RequestSpec, DEFAULT_LIMIT, METERS_PER_MILE, METERS_THRESHOLD,
};
pub use filters::{is_known, CatalogSection, SearchFilter, CATALOG, OPEN_NOW, PRICE_SIGIL};
