use crate::fixtures::*;

fn join_on(left: TableSegment, join_type: JoinType, right: TableSegment, on: ExpressionSegment) -> TableSegment {
    JoinTableSegment::new(left, join_type, right).on(on).into()
}

#[test]
fn test_join_with_derived_table() {
    // SELECT o.order_id, i.amount
    // FROM t_order o JOIN (SELECT order_id, amount FROM t_order_item) i ON o.order_id = i.order_id
    let items = derived(select(&["order_id", "amount"], table("t_order_item")), Some("i"));
    let from = join_on(
        table("t_order").with_alias("o").into(),
        JoinType::Inner,
        items.into(),
        ExpressionSegment::binary(
            ExpressionSegment::qualified_column("o", "order_id"),
            "=",
            ExpressionSegment::qualified_column("i", "order_id"),
        ),
    );
    let statement = SelectStatement::new()
        .with_projections(ProjectionsSegment::new(vec![
            ProjectionSegment::Column(ColumnProjectionSegment {
                column: ColumnSegment::new("order_id").with_owner("o"),
                alias: None,
                span: Span::ZERO,
            }),
            ProjectionSegment::Column(ColumnProjectionSegment {
                column: ColumnSegment::new("amount").with_owner("i"),
                alias: None,
                span: Span::ZERO,
            }),
        ]))
        .with_from(from);

    assert_converts!(
        statement,
        "Project([o.order_id, i.amount], Join(INNER, AS(Scan(t_order), o), \
         AS(Project([order_id, amount], Scan(t_order_item)), i), ON EQUALS(o.order_id, i.order_id)))"
    );
}

#[test]
fn test_correlated_exists_in_where() {
    let inner = select(&["order_id"], table("t_order_item").with_alias("i")).with_where(
        WhereSegment::new(ExpressionSegment::binary(
            ExpressionSegment::qualified_column("i", "order_id"),
            "=",
            ExpressionSegment::qualified_column("o", "order_id"),
        )),
    );
    let statement = select(&["order_id"], table("t_order").with_alias("o")).with_where(
        WhereSegment::new(ExpressionSegment::Exists(ExistsSubquerySegment {
            subquery: SubquerySegment::new(inner),
            not: false,
            span: Span::ZERO,
        })),
    );

    assert_converts!(
        statement,
        "Project([order_id], Filter(EXISTS(Project([order_id], \
         Filter(EQUALS(i.order_id, o.order_id), AS(Scan(t_order_item), i)))), AS(Scan(t_order), o)))"
    );
}

#[test]
fn test_scalar_subquery_projection_gets_anonymous_alias() {
    let count = SelectStatement::new()
        .with_projections(ProjectionsSegment::new(vec![ProjectionSegment::Aggregation(
            AggregationProjectionSegment {
                aggregation: AggregationSegment {
                    aggregation_type: AggregationType::Count,
                    distinct: false,
                    parameters: vec![],
                    span: Span::ZERO,
                },
                alias: None,
                span: Span::ZERO,
            },
        )]))
        .with_from(table("t_order_item"));
    let statement = SelectStatement::new()
        .with_projections(ProjectionsSegment::new(vec![
            ProjectionSegment::column("order_id"),
            ProjectionSegment::Subquery(SubqueryProjectionSegment {
                subquery: SubquerySegment::new(count),
                alias: None,
                span: Span::ZERO,
            }),
        ]))
        .with_from(table("t_order"));

    // ordinals restart inside the nested select
    assert_converts!(
        statement,
        "Project([order_id, AS(SCALAR_QUERY(Project([AS(COUNT(*), EXPR$0)], Scan(t_order_item))), EXPR$1)], Scan(t_order))"
    );
}

#[test]
fn test_paginated_union_with_parameters() {
    let statement = select(&["id"], table("t_live"))
        .with_combine(CombineSegment {
            combine_type: CombineType::Minus,
            select: SubquerySegment::new(select(&["id"], table("t_removed"))),
            span: Span::ZERO,
        })
        .with_limit(LimitSegment {
            offset: Some(PaginationValueSegment::Parameter {
                index: 0,
                span: Span::ZERO,
            }),
            row_count: Some(PaginationValueSegment::Parameter {
                index: 1,
                span: Span::ZERO,
            }),
            span: Span::ZERO,
        });

    assert_converts!(
        statement,
        "Sort([], offset=?0, fetch=?1, SetOp(EXCEPT, Project([id], Scan(t_live)), Project([id], Scan(t_removed))))"
    );
}

#[test]
fn test_degenerate_subquery_in_from() {
    let statement = SelectStatement::new()
        .with_projections(ProjectionsSegment::new(vec![ProjectionSegment::star()]))
        .with_from(derived(table_only(table("t_user")), Some("u")));

    assert_converts!(statement, "Project([*], AS(EXPLICIT_TABLE(Scan(t_user)), u))");
}

#[test]
fn test_json_statement_round_trip() {
    let json = r#"{
        "type": "Select",
        "projections": {
            "projections": [
                {"type": "Column", "column": {"name": "user_id"}},
                {"type": "Expression", "expr": {
                    "type": "Binary",
                    "left": {"type": "Column", "name": "amount"},
                    "operator": "*",
                    "right": {"type": "Literal", "value": {"Integer": 2}}
                }, "alias": "doubled"}
            ]
        },
        "from": {"type": "Simple", "name": "t_order", "alias": "o"}
    }"#;
    let statement: Statement = serde_json::from_str(json).expect("valid statement json");
    let node = SqlFederationConverter::default().convert(&statement).unwrap();
    assert_eq!(
        node.to_string(),
        "Project([user_id, AS(MULTIPLY(amount, 2), doubled)], AS(Scan(t_order), o))"
    );

    let encoded = serde_json::to_string(&node).unwrap();
    let decoded: RelNode = serde_json::from_str(&encoded).unwrap();
    assert_eq!(decoded, node);
}
