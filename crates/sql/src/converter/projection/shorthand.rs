use crate::converter::{ConversionContext, ConvertResult, SegmentConverter};
use crate::rel::RelNode;
use sqlfed_segment::ShorthandProjectionSegment;

/// `*` → `Identifier(*)`, `t.*` → `Identifier(t.*)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShorthandProjectionConverter;

impl SegmentConverter<ShorthandProjectionSegment> for ShorthandProjectionConverter {
    fn convert(
        &self,
        _ctx: &mut ConversionContext<'_>,
        segment: Option<&ShorthandProjectionSegment>,
    ) -> ConvertResult<Option<RelNode>> {
        let Some(segment) = segment else {
            return Ok(None);
        };
        Ok(Some(RelNode::star(segment.owner.as_deref(), segment.span)))
    }
}
