use crate::converter::expression::{AggregationExpressionConverter, SubqueryExpressionConverter};
use crate::converter::{ConversionContext, ConvertResult, SegmentConverter};
use crate::rel::{Call, RelNode};
use sqlfed_segment::{
    AggregationProjectionSegment, ExpressionProjectionSegment, SegmentKind, Span,
    SubqueryProjectionSegment,
};

/// Attach the explicit alias, or derive `<prefix><ordinal>` for an anonymous projection.
fn name_projection(
    ctx: &ConversionContext<'_>,
    node: RelNode,
    alias: Option<&String>,
    kind: SegmentKind,
    span: Span,
) -> RelNode {
    let alias = match alias {
        Some(alias) => Some(alias.clone()),
        None => {
            let derived = ctx.anonymous_alias();
            if let Some(name) = &derived {
                tracing::debug!(target: "sqlfed::converter", %kind, alias = %name, "Derived anonymous projection alias");
            }
            derived
        }
    };

    match alias {
        Some(alias) => Call::aliased(node, alias).with_span(span).into(),
        None => node,
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ExpressionProjectionConverter;

impl SegmentConverter<ExpressionProjectionSegment> for ExpressionProjectionConverter {
    fn convert(
        &self,
        ctx: &mut ConversionContext<'_>,
        segment: Option<&ExpressionProjectionSegment>,
    ) -> ConvertResult<Option<RelNode>> {
        let Some(segment) = segment else {
            return Ok(None);
        };
        let Some(node) = ctx.convert_expression(Some(&segment.expr))? else {
            return Ok(None);
        };
        Ok(Some(name_projection(
            ctx,
            node,
            segment.alias.as_ref(),
            SegmentKind::ExpressionProjection,
            segment.span,
        )))
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AggregationProjectionConverter;

impl SegmentConverter<AggregationProjectionSegment> for AggregationProjectionConverter {
    fn convert(
        &self,
        ctx: &mut ConversionContext<'_>,
        segment: Option<&AggregationProjectionSegment>,
    ) -> ConvertResult<Option<RelNode>> {
        let Some(segment) = segment else {
            return Ok(None);
        };
        let Some(node) = AggregationExpressionConverter.convert(ctx, Some(&segment.aggregation))?
        else {
            return Ok(None);
        };
        Ok(Some(name_projection(
            ctx,
            node,
            segment.alias.as_ref(),
            SegmentKind::AggregationProjection,
            segment.span,
        )))
    }
}

/// Scalar subquery in the select list.
#[derive(Debug, Clone, Copy, Default)]
pub struct SubqueryProjectionConverter;

impl SegmentConverter<SubqueryProjectionSegment> for SubqueryProjectionConverter {
    fn convert(
        &self,
        ctx: &mut ConversionContext<'_>,
        segment: Option<&SubqueryProjectionSegment>,
    ) -> ConvertResult<Option<RelNode>> {
        let Some(segment) = segment else {
            return Ok(None);
        };
        let Some(node) = SubqueryExpressionConverter.convert(ctx, Some(&segment.subquery))? else {
            return Ok(None);
        };
        Ok(Some(name_projection(
            ctx,
            node,
            segment.alias.as_ref(),
            SegmentKind::SubqueryProjection,
            segment.span,
        )))
    }
}
