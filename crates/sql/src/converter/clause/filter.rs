use crate::converter::{ConversionContext, ConvertResult, SegmentConverter};
use crate::rel::RelNode;
use sqlfed_segment::{HavingSegment, WhereSegment};

/// WHERE → its condition expression.
#[derive(Debug, Clone, Copy, Default)]
pub struct WhereConverter;

impl SegmentConverter<WhereSegment> for WhereConverter {
    fn convert(
        &self,
        ctx: &mut ConversionContext<'_>,
        segment: Option<&WhereSegment>,
    ) -> ConvertResult<Option<RelNode>> {
        let Some(segment) = segment else {
            return Ok(None);
        };
        ctx.convert_expression(Some(&segment.expr))
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct HavingConverter;

impl SegmentConverter<HavingSegment> for HavingConverter {
    fn convert(
        &self,
        ctx: &mut ConversionContext<'_>,
        segment: Option<&HavingSegment>,
    ) -> ConvertResult<Option<RelNode>> {
        let Some(segment) = segment else {
            return Ok(None);
        };
        ctx.convert_expression(Some(&segment.expr))
    }
}
