//! Table source converters (FROM, UPDATE and DELETE targets).

mod join;
mod simple;
mod subquery;

pub use join::JoinTableConverter;
pub use simple::SimpleTableConverter;
pub use subquery::SubqueryTableConverter;

use crate::converter::{ConversionContext, ConvertResult, SegmentConverter};
use crate::rel::RelNode;
use sqlfed_segment::TableSegment;

/// Converts any table source by dispatching on its variant.
#[derive(Debug, Clone, Copy, Default)]
pub struct TableConverter;

impl SegmentConverter<TableSegment> for TableConverter {
    fn convert(
        &self,
        ctx: &mut ConversionContext<'_>,
        segment: Option<&TableSegment>,
    ) -> ConvertResult<Option<RelNode>> {
        ctx.convert_table(segment)
    }
}
