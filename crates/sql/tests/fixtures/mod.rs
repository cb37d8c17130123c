#[macro_use]
pub mod macros;

pub use sqlfed_common::CompilerConfig;
pub use sqlfed_segment::*;
pub use sqlfed_sql::converter::from::SubqueryTableConverter;
pub use sqlfed_sql::converter::{ConversionContext, ConvertError, ConverterRegistry};
pub use sqlfed_sql::rel::{Operator, RelNode};
pub use sqlfed_sql::{SegmentConverter, SqlFederationConverter};

pub fn table(name: &str) -> SimpleTableSegment {
    SimpleTableSegment::new(name)
}

pub fn columns(names: &[&str]) -> ProjectionsSegment {
    ProjectionsSegment::new(names.iter().map(|n| ProjectionSegment::column(*n)).collect())
}

/// `SELECT <names> FROM <from>`
pub fn select(names: &[&str], from: impl Into<TableSegment>) -> SelectStatement {
    SelectStatement::new()
        .with_projections(columns(names))
        .with_from(from)
}

/// `(<select>) [AS alias]` as a FROM source.
pub fn derived(select: SelectStatement, alias: Option<&str>) -> SubqueryTableSegment {
    let segment = SubqueryTableSegment::new(SubquerySegment::new(select));
    match alias {
        Some(alias) => segment.with_alias(alias),
        None => segment,
    }
}

/// A SELECT with neither projections nor anything but a FROM source.
pub fn table_only(from: impl Into<TableSegment>) -> SelectStatement {
    SelectStatement::new().with_from(from)
}

/// Every `AS` call in the tree, as operand counts.
pub fn alias_arities(node: &RelNode) -> Vec<usize> {
    let mut arities = Vec::new();
    node.walk(&mut |n| {
        if let Some(call) = n.as_call() {
            if *call.operator() == Operator::As {
                arities.push(call.operands().len());
            }
        }
    });
    arities
}
