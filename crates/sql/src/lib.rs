//! Segment to relational-algebra conversion for sqlfed.
//!
//! This crate turns the segment tree produced by the SQL parser into a relational tree the
//! federation optimizer consumes:
//! - **Relational model**: nodes, calls and the operator vocabulary (`rel`).
//! - **Converters**: one stateless converter per segment kind, dispatched through a
//!   registry (`converter`).
//! - **Engine**: the statement-level entry point (`engine`).
pub mod converter;
pub mod engine;
pub mod rel;

pub use converter::{ConvertError, ConvertResult, ConverterRegistry, SegmentConverter};
pub use engine::SqlFederationConverter;
pub use rel::{Call, Operator, RelNode};
