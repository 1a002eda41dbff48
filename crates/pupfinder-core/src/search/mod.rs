//! Catalog search: criteria, normalized queries, result pages and the
//! client-side text filter.

pub mod criteria;
pub mod filter;
pub mod page;
pub mod service;
pub mod sort;

pub use criteria::{Cursor, DEFAULT_PAGE_SIZE, SearchCriteria, SearchQuery};
pub use filter::TextFilter;
pub use page::{ResolvedPage, SearchResultPage, cursor_from_link};
pub use service::CatalogService;
pub use sort::{SortDirection, SortField, SortOrder};
