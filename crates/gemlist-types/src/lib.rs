//! Core types shared by every gemlist crate.
//!
//! This crate only holds schemas: catalog kinds, facets, filter models,
//! query parameter bags, pagination and normalized listing items. The
//! transformations between them live in `gemlist-engine`.

pub mod catalog;
pub mod error;
pub mod facet;
pub mod filters;
pub mod items;
pub mod pagination;
pub mod query;

pub use catalog::{CatalogKind, Family, Subtype};
pub use error::{Error, Result};
pub use facet::{Facet, FacetKind, FacetMut, FacetRef, RangeBounds, Selection};
pub use filters::{DiamondFilters, FilterModel, GemstoneFilters, WatchFilters};
pub use items::{Diamond, GemstoneItem, NormalizedItem, WatchProduct};
pub use pagination::{DEFAULT_PAGE_SIZE, ListingPage, MAX_PAGE_SIZE, PageRequest, Pagination};
pub use query::{ParamValue, QueryParams, format_number};
