use crate::converter::{ConversionContext, ConvertError, ConvertResult, SegmentConverter};
use crate::rel::{JoinCondition, JoinKind, RelNode};
use sqlfed_segment::{JoinTableSegment, JoinType, SegmentKind, TableSegment};

#[derive(Debug, Clone, Copy, Default)]
pub struct JoinTableConverter;

fn join_kind(join_type: JoinType) -> JoinKind {
    match join_type {
        JoinType::Inner => JoinKind::Inner,
        JoinType::Left => JoinKind::Left,
        JoinType::Right => JoinKind::Right,
        JoinType::Full => JoinKind::Full,
        JoinType::Cross => JoinKind::Cross,
        JoinType::Comma => JoinKind::Comma,
    }
}

fn malformed(segment: &JoinTableSegment, message: &str) -> ConvertError {
    ConvertError::MalformedSegment {
        kind: SegmentKind::JoinTable,
        message: message.to_string(),
        span: segment.span,
    }
}

fn convert_side(
    ctx: &mut ConversionContext<'_>,
    segment: &JoinTableSegment,
    side: &TableSegment,
) -> ConvertResult<RelNode> {
    match ctx.convert_table(Some(side))? {
        Some(node) => Ok(node),
        None => Err(malformed(segment, "join operand produced no relation")),
    }
}

impl SegmentConverter<JoinTableSegment> for JoinTableConverter {
    fn convert(
        &self,
        ctx: &mut ConversionContext<'_>,
        segment: Option<&JoinTableSegment>,
    ) -> ConvertResult<Option<RelNode>> {
        let Some(segment) = segment else {
            return Ok(None);
        };

        let kind = join_kind(segment.join_type);
        let has_on = segment.condition.is_some();
        let has_using = !segment.using.is_empty();

        if has_on && has_using {
            return Err(malformed(segment, "join has both ON and USING"));
        }
        if segment.natural && (has_on || has_using) {
            return Err(malformed(segment, "NATURAL join cannot carry a join condition"));
        }
        if matches!(kind, JoinKind::Cross | JoinKind::Comma) && (has_on || has_using) {
            return Err(malformed(segment, "cross join cannot carry a join condition"));
        }

        // both sides bind their aliases before the condition is converted
        let left = convert_side(ctx, segment, &segment.left)?;
        let right = convert_side(ctx, segment, &segment.right)?;

        let condition = if let Some(on) = &segment.condition {
            match ctx.convert_expression(Some(on))? {
                Some(node) => JoinCondition::On(Box::new(node)),
                None => {
                    return Err(ConvertError::EmptyClause {
                        clause: "ON",
                        span: on.span(),
                    })
                }
            }
        } else if has_using {
            JoinCondition::Using(segment.using.iter().map(|c| c.name.clone()).collect())
        } else {
            JoinCondition::None
        };

        Ok(Some(RelNode::Join {
            left: Box::new(left),
            right: Box::new(right),
            kind,
            natural: segment.natural,
            condition,
        }))
    }
}
