//! Statement segment model.
//!
//! A parsed SQL statement is a tree of segments, each carrying the [`Span`] of the source
//! text it was parsed from. Segments are produced once by the parser and never mutated by
//! the compiler; every type here is a plain owned value with no back-references.
//!
//! The dispatchable families ([`TableSegment`], [`ProjectionSegment`],
//! [`ExpressionSegment`], [`Statement`]) are `#[non_exhaustive]`: the parser may grow
//! variants faster than the compiler learns to convert them, and the compiler must treat
//! such variants as a fatal configuration error.

pub mod clause;
pub mod expr;
pub mod kind;
pub mod projection;
pub mod span;
pub mod statement;
pub mod table;

pub use clause::*;
pub use expr::*;
pub use kind::SegmentKind;
pub use projection::*;
pub use span::Span;
pub use statement::*;
pub use table::*;
