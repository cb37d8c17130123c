use crate::converter::{ConversionContext, ConvertError, ConvertResult, SegmentConverter};
use crate::rel::{Call, Operator, RelNode};
use sqlfed_segment::{AggregationSegment, AggregationType, FunctionSegment, SegmentKind, Span};

/// `name(args..)` → the mapped operator, or the unresolved `Function(NAME)` call.
#[derive(Debug, Clone, Copy, Default)]
pub struct FunctionConverter;

impl SegmentConverter<FunctionSegment> for FunctionConverter {
    fn convert(
        &self,
        ctx: &mut ConversionContext<'_>,
        segment: Option<&FunctionSegment>,
    ) -> ConvertResult<Option<RelNode>> {
        let Some(segment) = segment else {
            return Ok(None);
        };

        let op = ctx.operators().resolve_function(&segment.name);
        if let Operator::Function(name) = &op {
            tracing::debug!(target: "sqlfed::converter", function = %name, "Function left for the optimizer to resolve");
        }

        let expected = op.arity();
        if !expected.accepts(segment.parameters.len()) {
            return Err(ConvertError::MalformedSegment {
                kind: SegmentKind::Function,
                message: format!(
                    "{} expects {} argument(s), got {}",
                    op,
                    expected,
                    segment.parameters.len()
                ),
                span: segment.span,
            });
        }

        let Some(operands) = ctx.convert_expressions(&segment.parameters, SegmentKind::Function)?
        else {
            return Ok(None);
        };
        Ok(Some(Call::new(op, operands)?.with_span(segment.span).into()))
    }
}

fn aggregate_operator(aggregation_type: AggregationType) -> Operator {
    match aggregation_type {
        AggregationType::Count => Operator::Count,
        AggregationType::Sum => Operator::Sum,
        AggregationType::Avg => Operator::Avg,
        AggregationType::Min => Operator::Min,
        AggregationType::Max => Operator::Max,
    }
}

/// `COUNT(*)`, `SUM(DISTINCT x)`, ...
#[derive(Debug, Clone, Copy, Default)]
pub struct AggregationExpressionConverter;

impl SegmentConverter<AggregationSegment> for AggregationExpressionConverter {
    fn convert(
        &self,
        ctx: &mut ConversionContext<'_>,
        segment: Option<&AggregationSegment>,
    ) -> ConvertResult<Option<RelNode>> {
        let Some(segment) = segment else {
            return Ok(None);
        };
        let op = aggregate_operator(segment.aggregation_type);

        let operands = if segment.parameters.is_empty() {
            if op != Operator::Count {
                return Err(ConvertError::MalformedSegment {
                    kind: SegmentKind::Aggregation,
                    message: format!("{} requires an argument", op),
                    span: segment.span,
                });
            }
            vec![RelNode::star(None, Span::ZERO)]
        } else {
            let expected = op.arity();
            if !expected.accepts(segment.parameters.len()) {
                return Err(ConvertError::MalformedSegment {
                    kind: SegmentKind::Aggregation,
                    message: format!(
                        "{} expects {} argument(s), got {}",
                        op,
                        expected,
                        segment.parameters.len()
                    ),
                    span: segment.span,
                });
            }
            match ctx.convert_expressions(&segment.parameters, SegmentKind::Aggregation)? {
                Some(operands) => operands,
                None => return Ok(None),
            }
        };

        let call = Call::new(op, operands)?
            .with_distinct(segment.distinct)
            .with_span(segment.span);
        Ok(Some(call.into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::converter::ConverterRegistry;
    use sqlfed_common::CompilerConfig;
    use sqlfed_segment::ExpressionSegment;

    fn function(name: &str, parameters: Vec<ExpressionSegment>) -> FunctionSegment {
        FunctionSegment {
            name: name.to_string(),
            parameters,
            span: Span::new(7, 30),
        }
    }

    fn aggregation(
        aggregation_type: AggregationType,
        distinct: bool,
        parameters: Vec<ExpressionSegment>,
    ) -> AggregationSegment {
        AggregationSegment {
            aggregation_type,
            distinct,
            parameters,
            span: Span::ZERO,
        }
    }

    #[test]
    fn test_builtin_alias_and_unresolved_function() {
        let config = CompilerConfig::default();
        let mut ctx = ConversionContext::new(ConverterRegistry::standard(), &config);

        let ifnull = function(
            "ifnull",
            vec![ExpressionSegment::column("nick"), ExpressionSegment::string("-")],
        );
        let node = FunctionConverter.convert(&mut ctx, Some(&ifnull)).unwrap().unwrap();
        assert_eq!(node.to_string(), "COALESCE(nick, '-')");

        let udf = function("date_format", vec![ExpressionSegment::column("created_at")]);
        let node = FunctionConverter.convert(&mut ctx, Some(&udf)).unwrap().unwrap();
        assert_eq!(node.to_string(), "DATE_FORMAT(created_at)");
    }

    #[test]
    fn test_function_arity_is_reported_as_malformed() {
        let config = CompilerConfig::default();
        let mut ctx = ConversionContext::new(ConverterRegistry::standard(), &config);

        let upper = function("upper", vec![]);
        let err = FunctionConverter.convert(&mut ctx, Some(&upper)).unwrap_err();
        assert!(matches!(
            err,
            ConvertError::MalformedSegment {
                kind: SegmentKind::Function,
                span: Span { start: 7, stop: 30 },
                ..
            }
        ));
        assert!(!err.is_fatal());
    }

    #[test]
    fn test_aggregations() {
        let config = CompilerConfig::default();
        let mut ctx = ConversionContext::new(ConverterRegistry::standard(), &config);

        let count = aggregation(AggregationType::Count, false, vec![]);
        let node = AggregationExpressionConverter
            .convert(&mut ctx, Some(&count))
            .unwrap()
            .unwrap();
        assert_eq!(node.to_string(), "COUNT(*)");

        let sum = aggregation(AggregationType::Sum, true, vec![ExpressionSegment::column("amount")]);
        let node = AggregationExpressionConverter
            .convert(&mut ctx, Some(&sum))
            .unwrap()
            .unwrap();
        assert_eq!(node.to_string(), "SUM(DISTINCT amount)");
        assert!(node.as_call().is_some_and(|c| c.operator().is_aggregate()));

        let max = aggregation(AggregationType::Max, false, vec![]);
        assert!(matches!(
            AggregationExpressionConverter.convert(&mut ctx, Some(&max)),
            Err(ConvertError::MalformedSegment { .. })
        ));
    }
}
