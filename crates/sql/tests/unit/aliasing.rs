use crate::fixtures::*;
use proptest::prelude::*;

/// One level of FROM-clause nesting: whether it has a select list and an alias.
#[derive(Debug, Clone)]
struct Level {
    projecting: bool,
    alias: Option<String>,
}

fn level() -> impl Strategy<Value = Level> {
    (any::<bool>(), proptest::option::of("[a-z]{1,6}")).prop_map(|(projecting, alias)| Level {
        projecting,
        alias,
    })
}

/// Wraps `t_base` in one derived table per level, innermost first.
fn nested(levels: &[Level]) -> SubqueryTableSegment {
    let mut source: TableSegment = table("t_base").into();
    let mut current = None;
    for level in levels {
        let inner = if level.projecting {
            SelectStatement::new()
                .with_projections(ProjectionsSegment::new(vec![ProjectionSegment::star()]))
                .with_from(source.clone())
        } else {
            table_only(source.clone())
        };
        let segment = derived(inner, level.alias.as_deref());
        source = segment.clone().into();
        current = Some(segment);
    }
    current.unwrap_or_else(|| derived(table_only(source), None))
}

fn convert(segment: &SubqueryTableSegment) -> RelNode {
    let config = CompilerConfig::default();
    let mut ctx = ConversionContext::new(ConverterRegistry::standard(), &config);
    ctx.push_scope();
    SubqueryTableConverter
        .convert(&mut ctx, Some(segment))
        .expect("conversion succeeds")
        .expect("a table source is always produced")
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn test_alias_calls_have_one_or_two_operands(levels in prop::collection::vec(level(), 1..6)) {
        let segment = nested(&levels);
        let node = convert(&segment);

        let arities = alias_arities(&node);
        prop_assert_eq!(arities.len(), levels.len());
        for arity in &arities {
            prop_assert!(*arity == 1 || *arity == 2);
        }

        // outermost level first
        let expected: Vec<usize> = levels
            .iter()
            .rev()
            .map(|l| if l.alias.is_some() { 2 } else { 1 })
            .collect();
        prop_assert_eq!(arities, expected);
    }

    #[test]
    fn test_conversion_is_idempotent(levels in prop::collection::vec(level(), 1..6)) {
        let segment = nested(&levels);
        prop_assert_eq!(convert(&segment), convert(&segment));
    }

    #[test]
    fn test_outer_alias_is_the_segment_alias(levels in prop::collection::vec(level(), 1..6)) {
        let segment = nested(&levels);
        let node = convert(&segment);
        let call = node.as_call().expect("outermost node is a call");
        prop_assert_eq!(call.operator(), &Operator::As);
        prop_assert_eq!(call.alias_name(), segment.alias.as_deref());
    }
}
