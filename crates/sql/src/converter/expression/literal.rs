use crate::converter::{ConversionContext, ConvertResult, SegmentConverter};
use crate::rel::RelNode;
use sqlfed_segment::{LiteralSegment, ParameterMarkerSegment};

#[derive(Debug, Clone, Copy, Default)]
pub struct LiteralExpressionConverter;

impl SegmentConverter<LiteralSegment> for LiteralExpressionConverter {
    fn convert(
        &self,
        _ctx: &mut ConversionContext<'_>,
        segment: Option<&LiteralSegment>,
    ) -> ConvertResult<Option<RelNode>> {
        Ok(segment.map(|s| RelNode::literal(s.value.clone(), s.span)))
    }
}

/// `?` → `DynamicParam(index)`; the index is the marker's 0-based position in the statement.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParameterMarkerConverter;

impl SegmentConverter<ParameterMarkerSegment> for ParameterMarkerConverter {
    fn convert(
        &self,
        _ctx: &mut ConversionContext<'_>,
        segment: Option<&ParameterMarkerSegment>,
    ) -> ConvertResult<Option<RelNode>> {
        Ok(segment.map(|s| RelNode::DynamicParam {
            index: s.index,
            span: s.span,
        }))
    }
}
