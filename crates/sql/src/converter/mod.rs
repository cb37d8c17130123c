//! Segment converters
//!
//! One stateless converter per segment kind. A converter receives an optional segment and
//! returns an optional relational node: an absent segment always converts to `Ok(None)`
//! without touching the context. Converters never call each other's types directly for
//! nested segments; they delegate through [`ConversionContext`], which dispatches on the
//! segment kind via the [`ConverterRegistry`].

pub mod clause;
pub mod context;
pub mod error;
pub mod expression;
pub mod from;
pub mod projection;
pub mod registry;
pub mod statement;

pub use context::{ConversionContext, Scope};
pub use error::{ConvertError, ConvertResult};
pub use registry::{ConverterRegistry, ConverterRegistryBuilder, DispatchTable};

use crate::rel::RelNode;

pub trait SegmentConverter<S>: Send + Sync {
    fn convert(
        &self,
        ctx: &mut ConversionContext<'_>,
        segment: Option<&S>,
    ) -> ConvertResult<Option<RelNode>>;
}
