use crate::converter::{ConversionContext, ConvertResult, SegmentConverter};
use crate::rel::{Call, Operator, RelNode};
use sqlfed_segment::{
    BetweenSegment, ExpressionSegment, InSegment, ListSegment, NotSegment, SegmentKind,
};

#[derive(Debug, Clone, Copy, Default)]
pub struct NotExpressionConverter;

impl SegmentConverter<NotSegment> for NotExpressionConverter {
    fn convert(
        &self,
        ctx: &mut ConversionContext<'_>,
        segment: Option<&NotSegment>,
    ) -> ConvertResult<Option<RelNode>> {
        let Some(segment) = segment else {
            return Ok(None);
        };
        let Some(operand) = ctx.convert_expression(Some(&segment.expr))? else {
            return Ok(None);
        };
        Ok(Some(Call::new(Operator::Not, vec![operand])?.with_span(segment.span).into()))
    }
}

/// `a [NOT] IN (..)` → `IN|NOT_IN(a, List)`; a subquery on the right is converted as a
/// relation rather than a scalar.
#[derive(Debug, Clone, Copy, Default)]
pub struct InExpressionConverter;

impl SegmentConverter<InSegment> for InExpressionConverter {
    fn convert(
        &self,
        ctx: &mut ConversionContext<'_>,
        segment: Option<&InSegment>,
    ) -> ConvertResult<Option<RelNode>> {
        let Some(segment) = segment else {
            return Ok(None);
        };
        let Some(left) = ctx.convert_expression(Some(&segment.left))? else {
            return Ok(None);
        };

        let right = match segment.right.as_ref() {
            ExpressionSegment::Subquery(subquery) => ctx.convert_select(Some(&subquery.select))?,
            other => ctx.convert_expression(Some(other))?,
        };
        let Some(right) = right else {
            return Ok(None);
        };

        let op = if segment.not { Operator::NotIn } else { Operator::In };
        Ok(Some(Call::new(op, vec![left, right])?.with_span(segment.span).into()))
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct BetweenExpressionConverter;

impl SegmentConverter<BetweenSegment> for BetweenExpressionConverter {
    fn convert(
        &self,
        ctx: &mut ConversionContext<'_>,
        segment: Option<&BetweenSegment>,
    ) -> ConvertResult<Option<RelNode>> {
        let Some(segment) = segment else {
            return Ok(None);
        };
        let operands = [
            segment.left.as_ref().clone(),
            segment.between.as_ref().clone(),
            segment.and.as_ref().clone(),
        ];
        let Some(operands) = ctx.convert_expressions(&operands, SegmentKind::Between)? else {
            return Ok(None);
        };

        let op = if segment.not {
            Operator::NotBetween
        } else {
            Operator::Between
        };
        Ok(Some(Call::new(op, operands)?.with_span(segment.span).into()))
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ListExpressionConverter;

impl SegmentConverter<ListSegment> for ListExpressionConverter {
    fn convert(
        &self,
        ctx: &mut ConversionContext<'_>,
        segment: Option<&ListSegment>,
    ) -> ConvertResult<Option<RelNode>> {
        let Some(segment) = segment else {
            return Ok(None);
        };
        let Some(items) = ctx.convert_expressions(&segment.items, SegmentKind::List)? else {
            return Ok(None);
        };
        Ok(Some(RelNode::List {
            items,
            span: segment.span,
        }))
    }
}
