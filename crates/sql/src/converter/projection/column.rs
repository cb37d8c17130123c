use crate::converter::expression::ColumnConverter;
use crate::converter::{ConversionContext, ConvertResult, SegmentConverter};
use crate::rel::{Call, RelNode};
use sqlfed_segment::ColumnProjectionSegment;

/// Column projections keep their name; only an explicit alias adds an `AS`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ColumnProjectionConverter;

impl SegmentConverter<ColumnProjectionSegment> for ColumnProjectionConverter {
    fn convert(
        &self,
        ctx: &mut ConversionContext<'_>,
        segment: Option<&ColumnProjectionSegment>,
    ) -> ConvertResult<Option<RelNode>> {
        let Some(segment) = segment else {
            return Ok(None);
        };
        let Some(column) = ColumnConverter.convert(ctx, Some(&segment.column))? else {
            return Ok(None);
        };

        match &segment.alias {
            Some(alias) => Ok(Some(Call::aliased(column, alias.clone()).with_span(segment.span).into())),
            None => Ok(Some(column)),
        }
    }
}
