use super::{assignments, modify_condition, modify_target, reject_ordering};
use crate::converter::{ConversionContext, ConvertError, ConvertResult, SegmentConverter};
use crate::rel::{ModifyOperation, RelNode};
use sqlfed_segment::UpdateStatement;

/// `UPDATE t SET c = v WHERE p` → `TableModify(UPDATE, t, columns=[c], set=[v], where=p)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct UpdateStatementConverter;

impl SegmentConverter<UpdateStatement> for UpdateStatementConverter {
    fn convert(
        &self,
        ctx: &mut ConversionContext<'_>,
        segment: Option<&UpdateStatement>,
    ) -> ConvertResult<Option<RelNode>> {
        let Some(segment) = segment else {
            return Ok(None);
        };
        reject_ordering(
            "UPDATE",
            segment.order_by.as_ref(),
            segment.limit.as_ref(),
            segment.span,
        )?;

        ctx.scoped(|ctx| {
            let target = modify_target(ctx, &segment.table)?;
            let Some((columns, expressions)) = assignments(ctx, &segment.set_assignment)? else {
                return Ok(None);
            };
            if columns.is_empty() {
                return Err(ConvertError::EmptyClause {
                    clause: "SET",
                    span: segment.set_assignment.span,
                });
            }
            let condition = modify_condition(ctx, segment.where_clause.as_ref())?;

            Ok(Some(RelNode::TableModify {
                operation: ModifyOperation::Update,
                target: Box::new(target),
                columns,
                source: None,
                expressions,
                condition: condition.map(Box::new),
            }))
        })
    }
}
