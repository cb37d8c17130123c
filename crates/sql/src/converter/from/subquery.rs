use crate::converter::{ConversionContext, ConvertResult, SegmentConverter};
use crate::rel::{Call, RelNode};
use sqlfed_segment::{SelectStatement, SubqueryTableSegment};

/// `(SELECT ...) [AS alias]` as a table source.
///
/// A nested select without a projection list is a bare table reference and becomes
/// `EXPLICIT_TABLE(source)`; anything else is converted in full. The result is always
/// wrapped in `AS`, with the alias identifier as second operand when one is present.
/// The optimizer tells aliased from unaliased sources by the operand count alone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SubqueryTableConverter;

impl SegmentConverter<SubqueryTableSegment> for SubqueryTableConverter {
    fn convert(
        &self,
        ctx: &mut ConversionContext<'_>,
        segment: Option<&SubqueryTableSegment>,
    ) -> ConvertResult<Option<RelNode>> {
        let Some(segment) = segment else {
            return Ok(None);
        };

        let select: &SelectStatement = &segment.subquery.select;
        let source: RelNode = if select.projections.is_none() {
            match ctx.convert_table(select.from.as_ref())? {
                Some(from) => Call::explicit_table(from).into(),
                None => {
                    tracing::debug!(
                        target: "sqlfed::converter",
                        span = %segment.span,
                        "Projection-less subquery has no table source"
                    );
                    return Ok(None);
                }
            }
        } else {
            match ctx.convert_select(Some(select))? {
                Some(node) => node,
                None => return Ok(None),
            }
        };

        if let Some(alias) = &segment.alias {
            ctx.bind_alias(alias);
        }

        Ok(Some(
            Call::alias(source, segment.alias.clone())
                .with_span(segment.span)
                .into(),
        ))
    }
}
