use crate::fixtures::*;
use sqlfed_error::{ErrorCode, ErrorContext};
use sqlfed_sql::converter::ConverterRegistryBuilder;

#[test]
fn test_raw_expression_in_where_is_fatal() {
    let statement: Statement = select(&["a"], table("t"))
        .with_where(WhereSegment::new(ExpressionSegment::Common(
            CommonExpressionSegment {
                text: "MATCH (title) AGAINST ('rust')".to_string(),
                span: Span::new(22, 52),
            },
        )))
        .into();

    let converter = SqlFederationConverter::default();
    let err = converter.try_convert(&statement).unwrap_err();
    assert!(err.is_fatal());
    assert_eq!(
        err,
        ConvertError::UnsupportedSegment {
            kind: SegmentKind::CommonExpression,
            span: Span::new(22, 52),
            path: vec![SegmentKind::SelectStatement, SegmentKind::CommonExpression],
        }
    );

    let mapped = converter.convert(&statement).unwrap_err();
    assert_eq!(mapped.code, ErrorCode::UnsupportedSegment);
    assert!(mapped.is_internal());
}

#[test]
fn test_nested_unknown_source_reports_full_path() {
    let multi = TableSegment::DeleteMultiTable(DeleteMultiTableSegment {
        targets: vec![table("t1"), table("t2")],
        relation: Box::new(table("t1").into()),
        span: Span::new(30, 45),
    });
    let statement: Statement = SelectStatement::new()
        .with_projections(ProjectionsSegment::new(vec![ProjectionSegment::star()]))
        .with_from(derived(table_only(multi), Some("d")))
        .into();

    let mapped = SqlFederationConverter::default()
        .convert(&statement)
        .unwrap_err();
    assert_eq!(mapped.code, ErrorCode::UnsupportedSegment);
    match mapped.context {
        Some(ErrorContext::Segment { kind, path, .. }) => {
            assert_eq!(kind, "DeleteMultiTable");
            assert_eq!(
                path,
                vec!["SelectStatement", "SubqueryTable", "DeleteMultiTable"]
            );
        }
        other => panic!("unexpected context: {:?}", other),
    }
}

#[test]
fn test_registry_without_subquery_sources() {
    let registry = ConverterRegistryBuilder::standard()
        .without(SegmentKind::SubqueryTable)
        .build();
    let converter = SqlFederationConverter::with_registry(CompilerConfig::default(), registry);

    let plain: Statement = select(&["a"], table("t")).into();
    assert!(converter.convert(&plain).is_ok());

    let nested: Statement = select(&["a"], derived(select(&["a"], table("t")), Some("x"))).into();
    let err = converter.try_convert(&nested).unwrap_err();
    assert!(matches!(
        err,
        ConvertError::UnsupportedSegment {
            kind: SegmentKind::SubqueryTable,
            ..
        }
    ));
}

#[test]
fn test_depth_limit() {
    let mut source: TableSegment = table("t").into();
    for i in 0..10 {
        source = derived(select(&["a"], source), Some(format!("d{}", i).as_str())).into();
    }
    let statement: Statement = select(&["a"], source).into();

    let shallow = SqlFederationConverter::new(CompilerConfig {
        max_depth: 8,
        ..Default::default()
    });
    let err = shallow.try_convert(&statement).unwrap_err();
    assert_eq!(err, ConvertError::MaxRecursion(8));
    assert!(!err.is_fatal());

    assert!(SqlFederationConverter::default().convert(&statement).is_ok());
}

#[test]
fn test_unknown_operator_suggests_closest() {
    let statement: Statement = select(&["a"], table("t"))
        .with_where(WhereSegment::new(ExpressionSegment::binary(
            ExpressionSegment::column("a"),
            "=>",
            ExpressionSegment::integer(1),
        )))
        .into();

    let mapped = SqlFederationConverter::default()
        .convert(&statement)
        .unwrap_err();
    assert_eq!(mapped.code, ErrorCode::UnsupportedOperator);
    assert!(!mapped.is_internal());
    assert!(mapped.hint.is_some());
}

#[test]
fn test_empty_from_is_reported() {
    let statement: Statement = select(&["a"], derived(SelectStatement::new(), Some("x"))).into();
    let err = SqlFederationConverter::default()
        .try_convert(&statement)
        .unwrap_err();
    assert!(matches!(err, ConvertError::EmptyClause { clause: "FROM", .. }));
}
