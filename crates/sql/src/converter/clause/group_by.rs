use super::order_by::item_key;
use crate::converter::{ConversionContext, ConvertResult, SegmentConverter};
use crate::rel::RelNode;
use sqlfed_segment::GroupBySegment;

/// GROUP BY → `List` of grouping keys. Any direction written on a key (MySQL) is ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct GroupByConverter;

impl SegmentConverter<GroupBySegment> for GroupByConverter {
    fn convert(
        &self,
        ctx: &mut ConversionContext<'_>,
        segment: Option<&GroupBySegment>,
    ) -> ConvertResult<Option<RelNode>> {
        let Some(segment) = segment else {
            return Ok(None);
        };

        let mut keys = Vec::with_capacity(segment.items.len());
        for item in &segment.items {
            if let Some(key) = item_key(ctx, item)? {
                keys.push(key);
            }
        }
        if keys.is_empty() {
            return Ok(None);
        }
        Ok(Some(RelNode::List {
            items: keys,
            span: segment.span,
        }))
    }
}
