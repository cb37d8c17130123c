use crate::converter::{ConversionContext, ConvertError, ConvertResult, SegmentConverter};
use crate::rel::{Call, Operator, RelNode};
use sqlfed_segment::{CaseWhenSegment, LiteralValue, SegmentKind, Span};

/// Searched CASE → `CASE(w1, t1, .., else)`; simple CASE →
/// `SIMPLE_CASE(operand, w1, t1, .., else)`. A missing ELSE becomes `NULL`.
#[derive(Debug, Clone, Copy, Default)]
pub struct CaseWhenConverter;

impl SegmentConverter<CaseWhenSegment> for CaseWhenConverter {
    fn convert(
        &self,
        ctx: &mut ConversionContext<'_>,
        segment: Option<&CaseWhenSegment>,
    ) -> ConvertResult<Option<RelNode>> {
        let Some(segment) = segment else {
            return Ok(None);
        };

        if segment.when_exprs.is_empty() || segment.when_exprs.len() != segment.then_exprs.len() {
            return Err(ConvertError::MalformedSegment {
                kind: SegmentKind::CaseWhen,
                message: format!(
                    "{} WHEN branch(es) with {} THEN result(s)",
                    segment.when_exprs.len(),
                    segment.then_exprs.len()
                ),
                span: segment.span,
            });
        }

        let mut operands = Vec::with_capacity(segment.when_exprs.len() * 2 + 2);
        if let Some(case_expr) = &segment.case_expr {
            let Some(operand) = ctx.convert_expression(Some(case_expr))? else {
                return Ok(None);
            };
            operands.push(operand);
        }

        for (when, then) in segment.when_exprs.iter().zip(&segment.then_exprs) {
            let Some(when) = ctx.convert_expression(Some(when))? else {
                return Ok(None);
            };
            let Some(then) = ctx.convert_expression(Some(then))? else {
                return Ok(None);
            };
            operands.push(when);
            operands.push(then);
        }

        let otherwise = match &segment.else_expr {
            Some(expr) => match ctx.convert_expression(Some(expr))? {
                Some(node) => node,
                None => return Ok(None),
            },
            None => RelNode::literal(LiteralValue::Null, Span::ZERO),
        };
        operands.push(otherwise);

        let op = if segment.case_expr.is_some() {
            Operator::SimpleCase
        } else {
            Operator::Case
        };
        Ok(Some(Call::new(op, operands)?.with_span(segment.span).into()))
    }
}
