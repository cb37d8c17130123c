use crate::converter::{ConversionContext, ConvertError, ConvertResult, SegmentConverter};
use crate::rel::RelNode;
use sqlfed_segment::{LimitSegment, LiteralValue, PaginationValueSegment, SegmentKind};

/// A LIMIT/OFFSET value: a number literal or a `?` marker.
#[derive(Debug, Clone, Copy, Default)]
pub struct PaginationValueConverter;

impl SegmentConverter<PaginationValueSegment> for PaginationValueConverter {
    fn convert(
        &self,
        _ctx: &mut ConversionContext<'_>,
        segment: Option<&PaginationValueSegment>,
    ) -> ConvertResult<Option<RelNode>> {
        let Some(segment) = segment else {
            return Ok(None);
        };
        match *segment {
            PaginationValueSegment::Number { value, span } => {
                let value = i64::try_from(value).map_err(|_| ConvertError::MalformedSegment {
                    kind: SegmentKind::Limit,
                    message: format!("pagination value {} is out of range", value),
                    span,
                })?;
                Ok(Some(RelNode::literal(LiteralValue::Integer(value), span)))
            }
            PaginationValueSegment::Parameter { index, span } => {
                Ok(Some(RelNode::DynamicParam { index, span }))
            }
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct OffsetConverter;

impl SegmentConverter<LimitSegment> for OffsetConverter {
    fn convert(
        &self,
        ctx: &mut ConversionContext<'_>,
        segment: Option<&LimitSegment>,
    ) -> ConvertResult<Option<RelNode>> {
        PaginationValueConverter.convert(ctx, segment.and_then(|s| s.offset.as_ref()))
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RowCountConverter;

impl SegmentConverter<LimitSegment> for RowCountConverter {
    fn convert(
        &self,
        ctx: &mut ConversionContext<'_>,
        segment: Option<&LimitSegment>,
    ) -> ConvertResult<Option<RelNode>> {
        PaginationValueConverter.convert(ctx, segment.and_then(|s| s.row_count.as_ref()))
    }
}
