use crate::converter::{ConversionContext, ConvertError, ConvertResult, SegmentConverter};
use crate::rel::{Call, Operator, RelNode};
use sqlfed_segment::{BinaryOperationSegment, ExpressionSegment, LiteralSegment, LiteralValue};

/// Postfix operator for `IS [NOT] NULL|TRUE|FALSE`; the literal operand is dropped.
fn postfix_operator(negated: bool, right: &ExpressionSegment) -> Option<Operator> {
    let ExpressionSegment::Literal(LiteralSegment { value, .. }) = right else {
        return None;
    };
    let op = match (value, negated) {
        (LiteralValue::Null, false) => Operator::IsNull,
        (LiteralValue::Null, true) => Operator::IsNotNull,
        (LiteralValue::Boolean(true), false) => Operator::IsTrue,
        (LiteralValue::Boolean(true), true) => Operator::IsNotTrue,
        (LiteralValue::Boolean(false), false) => Operator::IsFalse,
        (LiteralValue::Boolean(false), true) => Operator::IsNotFalse,
        _ => return None,
    };
    Some(op)
}

fn unsupported_operator(segment: &BinaryOperationSegment) -> ConvertError {
    ConvertError::UnsupportedOperator {
        operator: segment.operator.clone(),
        expression: format!(
            "{} {} {}",
            segment.left.kind(),
            segment.operator,
            segment.right.kind()
        ),
        span: segment.span,
    }
}

/// `left <op> right` → `OP(left, right)`, with the operator text resolved through the
/// context's [`OperatorTable`](crate::rel::OperatorTable).
#[derive(Debug, Clone, Copy, Default)]
pub struct BinaryOperationConverter;

impl SegmentConverter<BinaryOperationSegment> for BinaryOperationConverter {
    fn convert(
        &self,
        ctx: &mut ConversionContext<'_>,
        segment: Option<&BinaryOperationSegment>,
    ) -> ConvertResult<Option<RelNode>> {
        let Some(segment) = segment else {
            return Ok(None);
        };

        let text = segment.operator.split_whitespace().collect::<Vec<_>>().join(" ");
        let negated = match text.to_ascii_uppercase().as_str() {
            "IS" => Some(false),
            "IS NOT" => Some(true),
            _ => None,
        };

        if let Some(negated) = negated {
            let op = postfix_operator(negated, &segment.right)
                .ok_or_else(|| unsupported_operator(segment))?;
            let Some(left) = ctx.convert_expression(Some(&segment.left))? else {
                return Ok(None);
            };
            let call = Call::new(op, vec![left])?.with_span(segment.span);
            return Ok(Some(call.into()));
        }

        let op = ctx
            .operators()
            .resolve_binary(&text)
            .ok_or_else(|| unsupported_operator(segment))?;

        let Some(left) = ctx.convert_expression(Some(&segment.left))? else {
            return Ok(None);
        };
        let Some(right) = ctx.convert_expression(Some(&segment.right))? else {
            return Ok(None);
        };

        let call = Call::new(op, vec![left, right])?.with_span(segment.span);
        Ok(Some(call.into()))
    }
}
