pub mod pagination;
pub mod scheme_query;

pub use pagination::{Page, Pagination};
pub use scheme_query::{ListParams, SchemeQuery};
