use crate::fixtures::*;
use sqlfed_sql::converter::clause::*;
use sqlfed_sql::converter::expression::*;
use sqlfed_sql::converter::from::*;
use sqlfed_sql::converter::projection::*;
use sqlfed_sql::converter::statement::*;

/// An absent segment converts to nothing and leaves the context untouched.
fn assert_absent<S, C: SegmentConverter<S>>(name: &str, converter: C) {
    let config = CompilerConfig::default();
    let mut ctx = ConversionContext::new(ConverterRegistry::standard(), &config);
    ctx.push_scope();
    ctx.bind_alias("o");
    ctx.set_projection_ordinal(3);

    let depth = ctx.depth();
    let scopes = ctx.scope_stack_len();

    let result = converter.convert(&mut ctx, None);
    assert!(
        matches!(result, Ok(None)),
        "{} converted an absent segment to {:?}",
        name,
        result
    );
    assert_eq!(ctx.depth(), depth, "{} changed the depth", name);
    assert_eq!(ctx.scope_stack_len(), scopes, "{} changed the scope stack", name);
    assert_eq!(ctx.projection_ordinal(), 3, "{} changed the projection ordinal", name);
    assert_eq!(ctx.qualifier_depth("o"), Some(0), "{} changed the bound aliases", name);
}

macro_rules! assert_all_absent {
    ($($converter:expr => $segment:ty),* $(,)?) => {
        $( assert_absent::<$segment, _>(stringify!($converter), $converter); )*
    };
}

#[test]
fn test_every_converter_maps_absence_to_nothing() {
    assert_all_absent! {
        // from
        TableConverter => TableSegment,
        SimpleTableConverter => SimpleTableSegment,
        JoinTableConverter => JoinTableSegment,
        SubqueryTableConverter => SubqueryTableSegment,
        // projection
        ProjectionsConverter => ProjectionsSegment,
        ProjectionConverter => ProjectionSegment,
        ColumnProjectionConverter => ColumnProjectionSegment,
        ShorthandProjectionConverter => ShorthandProjectionSegment,
        ExpressionProjectionConverter => ExpressionProjectionSegment,
        AggregationProjectionConverter => AggregationProjectionSegment,
        SubqueryProjectionConverter => SubqueryProjectionSegment,
        // expression
        ExpressionConverter => ExpressionSegment,
        ColumnConverter => ColumnSegment,
        LiteralExpressionConverter => LiteralSegment,
        ParameterMarkerConverter => ParameterMarkerSegment,
        BinaryOperationConverter => BinaryOperationSegment,
        NotExpressionConverter => NotSegment,
        InExpressionConverter => InSegment,
        BetweenExpressionConverter => BetweenSegment,
        ListExpressionConverter => ListSegment,
        FunctionConverter => FunctionSegment,
        AggregationExpressionConverter => AggregationSegment,
        SubqueryExpressionConverter => SubquerySegment,
        ExistsSubqueryConverter => ExistsSubquerySegment,
        CaseWhenConverter => CaseWhenSegment,
        // clause
        WhereConverter => WhereSegment,
        HavingConverter => HavingSegment,
        GroupByConverter => GroupBySegment,
        OrderByConverter => OrderBySegment,
        OrderByItemConverter => OrderByItemSegment,
        OffsetConverter => LimitSegment,
        RowCountConverter => LimitSegment,
        PaginationValueConverter => PaginationValueSegment,
        CombineConverter => CombineSegment,
        // statement
        StatementConverter => Statement,
        SelectStatementConverter => SelectStatement,
        InsertStatementConverter => InsertStatement,
        UpdateStatementConverter => UpdateStatement,
        DeleteStatementConverter => DeleteStatement,
    }
}

#[test]
fn test_absent_limit_parts_convert_to_nothing() {
    // a LIMIT without an OFFSET (and vice versa) is the common partial case
    with_context!(ctx, {
        let limit_only = LimitSegment {
            offset: None,
            row_count: Some(PaginationValueSegment::Number {
                value: 10,
                span: Span::ZERO,
            }),
            span: Span::ZERO,
        };
        assert_eq!(OffsetConverter.convert(&mut ctx, Some(&limit_only)).unwrap(), None);
        assert!(RowCountConverter
            .convert(&mut ctx, Some(&limit_only))
            .unwrap()
            .is_some());
    });
}
