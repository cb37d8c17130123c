//! SELECT clause converters.
//!
//! Clause converters produce the pieces the statement converter composes: a condition
//! for WHERE/HAVING, key lists for GROUP BY and ORDER BY, pagination values, and the
//! right-hand relation of a set operation.

mod combine;
mod filter;
mod group_by;
mod order_by;
mod pagination;

pub use combine::{set_operation, CombineConverter};
pub use filter::{HavingConverter, WhereConverter};
pub use group_by::GroupByConverter;
pub use order_by::{OrderByConverter, OrderByItemConverter};
pub use pagination::{OffsetConverter, PaginationValueConverter, RowCountConverter};
