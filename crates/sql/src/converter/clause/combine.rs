use crate::converter::{ConversionContext, ConvertResult, SegmentConverter};
use crate::rel::{RelNode, SetOpKind};
use sqlfed_segment::{CombineSegment, CombineType};

/// Set operation kind and ALL flag for a combine type. `MINUS` is `EXCEPT`.
pub fn set_operation(combine_type: CombineType) -> (SetOpKind, bool) {
    match combine_type {
        CombineType::Union => (SetOpKind::Union, false),
        CombineType::UnionAll => (SetOpKind::Union, true),
        CombineType::Intersect => (SetOpKind::Intersect, false),
        CombineType::IntersectAll => (SetOpKind::Intersect, true),
        CombineType::Except | CombineType::Minus => (SetOpKind::Except, false),
        CombineType::ExceptAll => (SetOpKind::Except, true),
    }
}

/// Converts the right-hand SELECT of a set operation.
#[derive(Debug, Clone, Copy, Default)]
pub struct CombineConverter;

impl SegmentConverter<CombineSegment> for CombineConverter {
    fn convert(
        &self,
        ctx: &mut ConversionContext<'_>,
        segment: Option<&CombineSegment>,
    ) -> ConvertResult<Option<RelNode>> {
        let Some(segment) = segment else {
            return Ok(None);
        };
        ctx.convert_select(Some(&segment.select.select))
    }
}
