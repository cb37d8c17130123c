use crate::converter::{ConversionContext, ConvertResult, SegmentConverter};
use crate::rel::{Call, Operator, RelNode};
use sqlfed_segment::{ExistsSubquerySegment, SubquerySegment};

/// Scalar subquery → `SCALAR_QUERY(<converted select>)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SubqueryExpressionConverter;

impl SegmentConverter<SubquerySegment> for SubqueryExpressionConverter {
    fn convert(
        &self,
        ctx: &mut ConversionContext<'_>,
        segment: Option<&SubquerySegment>,
    ) -> ConvertResult<Option<RelNode>> {
        let Some(segment) = segment else {
            return Ok(None);
        };
        let Some(query) = ctx.convert_select(Some(&segment.select))? else {
            return Ok(None);
        };
        Ok(Some(Call::new(Operator::ScalarQuery, vec![query])?.with_span(segment.span).into()))
    }
}

/// `[NOT] EXISTS (..)`; the negated form stays `NOT(EXISTS(..))`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExistsSubqueryConverter;

impl SegmentConverter<ExistsSubquerySegment> for ExistsSubqueryConverter {
    fn convert(
        &self,
        ctx: &mut ConversionContext<'_>,
        segment: Option<&ExistsSubquerySegment>,
    ) -> ConvertResult<Option<RelNode>> {
        let Some(segment) = segment else {
            return Ok(None);
        };
        let Some(query) = ctx.convert_select(Some(&segment.subquery.select))? else {
            return Ok(None);
        };

        let exists: RelNode = Call::new(Operator::Exists, vec![query])?
            .with_span(segment.span)
            .into();
        if !segment.not {
            return Ok(Some(exists));
        }
        Ok(Some(Call::new(Operator::Not, vec![exists])?.with_span(segment.span).into()))
    }
}
