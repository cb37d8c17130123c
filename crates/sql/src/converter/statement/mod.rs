//! Statement-level converters.

mod delete;
mod insert;
mod select;
mod update;

pub use delete::DeleteStatementConverter;
pub use insert::InsertStatementConverter;
pub use select::SelectStatementConverter;
pub use update::UpdateStatementConverter;

use crate::converter::clause::WhereConverter;
use crate::converter::expression::ColumnConverter;
use crate::converter::{ConversionContext, ConvertError, ConvertResult, SegmentConverter};
use crate::rel::RelNode;
use sqlfed_segment::{
    ColumnSegment, LimitSegment, OrderBySegment, SetAssignmentSegment, Span, Statement,
    TableSegment, WhereSegment,
};

/// Converts any statement by dispatching on its variant.
#[derive(Debug, Clone, Copy, Default)]
pub struct StatementConverter;

impl SegmentConverter<Statement> for StatementConverter {
    fn convert(
        &self,
        ctx: &mut ConversionContext<'_>,
        segment: Option<&Statement>,
    ) -> ConvertResult<Option<RelNode>> {
        ctx.convert_statement(segment)
    }
}

/// Items of a `List` node; any other node is a single item.
pub(crate) fn into_items(node: RelNode) -> Vec<RelNode> {
    match node {
        RelNode::List { items, .. } => items,
        other => vec![other],
    }
}

fn reject_ordering(
    statement: &str,
    order_by: Option<&OrderBySegment>,
    limit: Option<&LimitSegment>,
    span: Span,
) -> ConvertResult<()> {
    if order_by.is_some() || limit.is_some() {
        return Err(ConvertError::Unsupported {
            feature: format!("{} with ORDER BY or LIMIT", statement),
            span,
        });
    }
    Ok(())
}

fn modify_target(
    ctx: &mut ConversionContext<'_>,
    table: &TableSegment,
) -> ConvertResult<RelNode> {
    ctx.convert_table(Some(table))?
        .ok_or(ConvertError::EmptyClause {
            clause: "TABLE",
            span: table.span(),
        })
}

fn modify_condition(
    ctx: &mut ConversionContext<'_>,
    where_clause: Option<&WhereSegment>,
) -> ConvertResult<Option<RelNode>> {
    let Some(clause) = where_clause else {
        return Ok(None);
    };
    match WhereConverter.convert(ctx, Some(clause))? {
        Some(condition) => Ok(Some(condition)),
        None => Err(ConvertError::EmptyClause {
            clause: "WHERE",
            span: clause.span,
        }),
    }
}

fn column_identifiers(
    ctx: &mut ConversionContext<'_>,
    columns: &[ColumnSegment],
) -> ConvertResult<Vec<RelNode>> {
    let mut identifiers = Vec::with_capacity(columns.len());
    for column in columns {
        if let Some(node) = ColumnConverter.convert(ctx, Some(column))? {
            identifiers.push(node);
        }
    }
    Ok(identifiers)
}

/// `SET c = v, ..` as parallel column and value lists. Row-value assignments
/// (`(a, b) = (..)`) have no relational form and are rejected.
fn assignments(
    ctx: &mut ConversionContext<'_>,
    set: &SetAssignmentSegment,
) -> ConvertResult<Option<(Vec<RelNode>, Vec<RelNode>)>> {
    let mut columns = Vec::with_capacity(set.assignments.len());
    let mut values = Vec::with_capacity(set.assignments.len());
    for assignment in &set.assignments {
        let [column] = assignment.columns.as_slice() else {
            return Err(ConvertError::Unsupported {
                feature: format!(
                    "assignment to {} columns at once",
                    assignment.columns.len()
                ),
                span: assignment.span,
            });
        };
        let Some(column) = ColumnConverter.convert(ctx, Some(column))? else {
            return Ok(None);
        };
        let Some(value) = ctx.convert_expression(Some(&assignment.value))? else {
            return Ok(None);
        };
        columns.push(column);
        values.push(value);
    }
    Ok(Some((columns, values)))
}
