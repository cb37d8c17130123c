use crate::fixtures::*;
use std::sync::Arc;

fn statement(i: usize) -> Statement {
    let alias = format!("s{}", i % 4);
    let inner = derived(select(&["user_id", "amount"], table("t_order")), Some(alias.as_str()));
    SelectStatement::new()
        .with_projections(ProjectionsSegment::new(vec![ProjectionSegment::star()]))
        .with_from(inner)
        .into()
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_shared_converter_across_tasks() -> anyhow::Result<()> {
    let converter = Arc::new(SqlFederationConverter::default());

    let mut handles = Vec::new();
    for i in 0..32 {
        let converter = Arc::clone(&converter);
        handles.push(tokio::spawn(async move {
            let statement = statement(i);
            let node = converter.convert(&statement)?;
            Ok::<_, sqlfed_error::SqlFedError>((i, node))
        }));
    }

    for handle in handles {
        let (i, node) = handle.await??;
        assert_eq!(
            node.to_string(),
            format!(
                "Project([*], AS(Project([user_id, amount], Scan(t_order)), s{}))",
                i % 4
            )
        );
    }
    Ok(())
}

#[test]
fn test_standard_registry_is_shared_between_converters() {
    let a = SqlFederationConverter::default();
    let b = SqlFederationConverter::new(CompilerConfig::default());
    assert!(std::ptr::eq(a.registry(), b.registry()));
    assert!(std::ptr::eq(a.registry(), ConverterRegistry::standard()));
}
