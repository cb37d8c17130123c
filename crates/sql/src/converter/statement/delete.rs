use super::{modify_condition, modify_target, reject_ordering};
use crate::converter::{ConversionContext, ConvertResult, SegmentConverter};
use crate::rel::{ModifyOperation, RelNode};
use sqlfed_segment::DeleteStatement;

/// `DELETE FROM t WHERE c` → `TableModify(DELETE, t, where=c)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeleteStatementConverter;

impl SegmentConverter<DeleteStatement> for DeleteStatementConverter {
    fn convert(
        &self,
        ctx: &mut ConversionContext<'_>,
        segment: Option<&DeleteStatement>,
    ) -> ConvertResult<Option<RelNode>> {
        let Some(segment) = segment else {
            return Ok(None);
        };
        reject_ordering(
            "DELETE",
            segment.order_by.as_ref(),
            segment.limit.as_ref(),
            segment.span,
        )?;

        ctx.scoped(|ctx| {
            let target = modify_target(ctx, &segment.table)?;
            let condition = modify_condition(ctx, segment.where_clause.as_ref())?;
            Ok(Some(RelNode::TableModify {
                operation: ModifyOperation::Delete,
                target: Box::new(target),
                columns: Vec::new(),
                source: None,
                expressions: Vec::new(),
                condition: condition.map(Box::new),
            }))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::converter::{ConvertError, ConverterRegistry};
    use sqlfed_common::CompilerConfig;
    use sqlfed_segment::{
        ExpressionSegment, LimitSegment, PaginationValueSegment, SimpleTableSegment, Span,
        WhereSegment,
    };

    fn delete(limit: Option<LimitSegment>) -> DeleteStatement {
        DeleteStatement {
            table: SimpleTableSegment::new("t_order").with_alias("o").into(),
            where_clause: Some(WhereSegment::new(ExpressionSegment::binary(
                ExpressionSegment::qualified_column("o", "order_id"),
                "=",
                ExpressionSegment::integer(3),
            ))),
            order_by: None,
            limit,
            span: Span::new(0, 44),
        }
    }

    #[test]
    fn test_delete() {
        let config = CompilerConfig::default();
        let mut ctx = ConversionContext::new(ConverterRegistry::standard(), &config);
        let node = DeleteStatementConverter
            .convert(&mut ctx, Some(&delete(None)))
            .unwrap()
            .unwrap();
        assert_eq!(
            node.to_string(),
            "TableModify(DELETE, AS(Scan(t_order), o), where=EQUALS(o.order_id, 3))"
        );
        assert_eq!(ctx.scope_stack_len(), 0);
    }

    #[test]
    fn test_delete_with_limit_is_unsupported() {
        let config = CompilerConfig::default();
        let mut ctx = ConversionContext::new(ConverterRegistry::standard(), &config);
        let limit = LimitSegment {
            offset: None,
            row_count: Some(PaginationValueSegment::number(1)),
            span: Span::ZERO,
        };
        let err = DeleteStatementConverter
            .convert(&mut ctx, Some(&delete(Some(limit))))
            .unwrap_err();
        assert_eq!(
            err,
            ConvertError::Unsupported {
                feature: "DELETE with ORDER BY or LIMIT".to_string(),
                span: Span::new(0, 44),
            }
        );
    }
}
