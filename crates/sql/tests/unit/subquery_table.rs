use crate::fixtures::*;

#[test]
fn test_absent_subquery_converts_to_nothing() {
    with_context!(ctx, {
        let node = SubqueryTableConverter.convert(&mut ctx, None).unwrap();
        assert_eq!(node, None);
        assert_eq!(ctx.depth(), 0);
        assert_eq!(ctx.scope_stack_len(), 0);
    });
}

#[test]
fn test_projection_less_subquery_is_an_explicit_table() {
    with_context!(ctx, {
        ctx.push_scope();
        let segment = derived(table_only(table("t_order")), None);
        let node = SubqueryTableConverter
            .convert(&mut ctx, Some(&segment))
            .unwrap()
            .unwrap();
        assert_eq!(node.to_string(), "AS(EXPLICIT_TABLE(Scan(t_order)))");
        assert_eq!(alias_arities(&node), vec![1]);
    });
}

#[test]
fn test_projection_less_subquery_keeps_its_alias() {
    with_context!(ctx, {
        ctx.push_scope();
        let segment = derived(table_only(table("t_order")), Some("o"));
        let node = SubqueryTableConverter
            .convert(&mut ctx, Some(&segment))
            .unwrap()
            .unwrap();
        assert_eq!(node.to_string(), "AS(EXPLICIT_TABLE(Scan(t_order)), o)");
        assert_eq!(ctx.qualifier_depth("o"), Some(0));
    });
}

#[test]
fn test_projecting_subquery_is_converted_in_full() {
    with_context!(ctx, {
        ctx.push_scope();
        let segment = derived(select(&["order_id", "user_id"], table("t_order")), Some("x"));
        let node = SubqueryTableConverter
            .convert(&mut ctx, Some(&segment))
            .unwrap()
            .unwrap();
        assert_eq!(
            node.to_string(),
            "AS(Project([order_id, user_id], Scan(t_order)), x)"
        );
    });
}

#[test]
fn test_unaliased_projecting_subquery_has_one_operand() {
    with_context!(ctx, {
        ctx.push_scope();
        let segment = derived(select(&["a"], table("t")), None);
        let node = SubqueryTableConverter
            .convert(&mut ctx, Some(&segment))
            .unwrap()
            .unwrap();
        assert_eq!(node.to_string(), "AS(Project([a], Scan(t)))");
        assert_eq!(alias_arities(&node), vec![1]);
    });
}

#[test]
fn test_three_levels_of_nesting() {
    // SELECT * FROM (SELECT * FROM (FROM t_user) AS a) AS b
    let inner = derived(table_only(table("t_user")), Some("a"));
    let middle = SelectStatement::new()
        .with_projections(ProjectionsSegment::new(vec![ProjectionSegment::star()]))
        .with_from(inner);
    let outer = derived(middle, Some("b"));

    with_context!(ctx, {
        ctx.push_scope();
        let node = SubqueryTableConverter
            .convert(&mut ctx, Some(&outer))
            .unwrap()
            .unwrap();
        assert_eq!(
            node.to_string(),
            "AS(Project([*], AS(EXPLICIT_TABLE(Scan(t_user)), a)), b)"
        );
        assert_eq!(alias_arities(&node), vec![2, 2]);
        assert_eq!(ctx.depth(), 0);
    });
}

#[test]
fn test_input_is_left_untouched() {
    let segment = derived(select(&["a"], table("t").with_alias("x")), Some("y"));
    let before = segment.clone();
    with_context!(ctx, {
        ctx.push_scope();
        SubqueryTableConverter.convert(&mut ctx, Some(&segment)).unwrap();
    });
    assert_eq!(segment, before);
}

#[test]
fn test_unknown_source_variant_is_fatal() {
    let multi = TableSegment::DeleteMultiTable(DeleteMultiTableSegment {
        targets: vec![table("t1")],
        relation: Box::new(table("t1").into()),
        span: Span::new(14, 20),
    });
    let segment = derived(table_only(multi), Some("m"));

    with_context!(ctx, {
        ctx.push_scope();
        let err = SubqueryTableConverter
            .convert(&mut ctx, Some(&segment))
            .unwrap_err();
        assert!(err.is_fatal());
        assert!(matches!(
            err,
            ConvertError::UnsupportedSegment {
                kind: SegmentKind::DeleteMultiTable,
                ..
            }
        ));
    });
}
