//! Select-list converters.

mod column;
mod expression;
mod shorthand;

pub use column::ColumnProjectionConverter;
pub use expression::{
    AggregationProjectionConverter, ExpressionProjectionConverter, SubqueryProjectionConverter,
};
pub use shorthand::ShorthandProjectionConverter;

use crate::converter::{ConversionContext, ConvertResult, SegmentConverter};
use crate::rel::RelNode;
use sqlfed_segment::{ProjectionSegment, ProjectionsSegment};

/// Converts the whole select list into a `List` of projected expressions.
///
/// Items converting to nothing are dropped; a list left empty converts to nothing. The
/// DISTINCT flag is not part of the list, the statement converter reads it off the segment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProjectionsConverter;

impl SegmentConverter<ProjectionsSegment> for ProjectionsConverter {
    fn convert(
        &self,
        ctx: &mut ConversionContext<'_>,
        segment: Option<&ProjectionsSegment>,
    ) -> ConvertResult<Option<RelNode>> {
        let Some(segment) = segment else {
            return Ok(None);
        };

        let mut items = Vec::with_capacity(segment.projections.len());
        for (ordinal, projection) in segment.projections.iter().enumerate() {
            ctx.set_projection_ordinal(ordinal);
            if let Some(node) = ctx.convert_projection(Some(projection))? {
                items.push(node);
            }
        }

        if items.is_empty() {
            return Ok(None);
        }
        Ok(Some(RelNode::List {
            items,
            span: segment.span,
        }))
    }
}

/// Converts a single projection by dispatching on its variant.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProjectionConverter;

impl SegmentConverter<ProjectionSegment> for ProjectionConverter {
    fn convert(
        &self,
        ctx: &mut ConversionContext<'_>,
        segment: Option<&ProjectionSegment>,
    ) -> ConvertResult<Option<RelNode>> {
        ctx.convert_projection(segment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::converter::ConverterRegistry;
    use sqlfed_common::CompilerConfig;
    use sqlfed_segment::{ExpressionProjectionSegment, ExpressionSegment, Span};

    #[test]
    fn test_ordinals_drive_anonymous_aliases() {
        let config = CompilerConfig::default();
        let mut ctx = ConversionContext::new(ConverterRegistry::standard(), &config);
        ctx.push_scope();

        let segment = ProjectionsSegment::new(vec![
            ProjectionSegment::column("user_id"),
            ProjectionSegment::Expression(ExpressionProjectionSegment {
                expr: ExpressionSegment::binary(
                    ExpressionSegment::column("price"),
                    "*",
                    ExpressionSegment::integer(2),
                ),
                alias: None,
                span: Span::ZERO,
            }),
        ]);

        let node = ProjectionsConverter.convert(&mut ctx, Some(&segment)).unwrap().unwrap();
        assert_eq!(
            node.to_string(),
            "(user_id, AS(MULTIPLY(price, 2), EXPR$1))"
        );
    }

    #[test]
    fn test_absent_projections() {
        let config = CompilerConfig::default();
        let mut ctx = ConversionContext::new(ConverterRegistry::standard(), &config);
        assert_eq!(ProjectionsConverter.convert(&mut ctx, None).unwrap(), None);
        assert_eq!(ProjectionConverter.convert(&mut ctx, None).unwrap(), None);
    }
}
