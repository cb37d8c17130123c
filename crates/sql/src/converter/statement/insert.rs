use super::{assignments, column_identifiers};
use crate::converter::{ConversionContext, ConvertError, ConvertResult, SegmentConverter};
use crate::rel::{ModifyOperation, RelNode};
use sqlfed_segment::{InsertStatement, SegmentKind};

/// INSERT with a `VALUES` list, a MySQL `SET` list or a SELECT source.
///
/// `INSERT .. SET a = 1, b = 2` converts like `INSERT (a, b) VALUES (1, 2)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct InsertStatementConverter;

impl SegmentConverter<InsertStatement> for InsertStatementConverter {
    fn convert(
        &self,
        ctx: &mut ConversionContext<'_>,
        segment: Option<&InsertStatement>,
    ) -> ConvertResult<Option<RelNode>> {
        let Some(segment) = segment else {
            return Ok(None);
        };

        let sources = [
            !segment.values.is_empty(),
            segment.set_assignment.is_some(),
            segment.select.is_some(),
        ];
        if sources.iter().filter(|present| **present).count() != 1 {
            return Err(ConvertError::MalformedSegment {
                kind: SegmentKind::InsertStatement,
                message: "expected exactly one of VALUES, SET or SELECT".to_string(),
                span: segment.span,
            });
        }

        ctx.scoped(|ctx| {
            ctx.bind_alias(segment.table.binding_name());
            let target = RelNode::scan(segment.table.qualified_name(), segment.table.span);
            let mut columns = column_identifiers(ctx, &segment.columns)?;

            let source = if let Some(set) = &segment.set_assignment {
                if !columns.is_empty() {
                    return Err(ConvertError::MalformedSegment {
                        kind: SegmentKind::InsertStatement,
                        message: "SET assignments cannot follow a column list".to_string(),
                        span: segment.span,
                    });
                }
                let Some((set_columns, values)) = assignments(ctx, set)? else {
                    return Ok(None);
                };
                columns = set_columns;
                RelNode::Values { rows: vec![values] }
            } else if let Some(select) = &segment.select {
                ctx.convert_select(Some(&select.select))?
                    .ok_or(ConvertError::EmptyClause {
                        clause: "SELECT",
                        span: select.span,
                    })?
            } else {
                // without a column list the first row fixes the width
                let width = match (columns.len(), segment.values.first()) {
                    (0, Some(first)) => first.values.len(),
                    (n, _) => n,
                };
                let mut rows = Vec::with_capacity(segment.values.len());
                for row in &segment.values {
                    if row.values.len() != width {
                        return Err(ConvertError::MalformedSegment {
                            kind: SegmentKind::InsertStatement,
                            message: format!(
                                "VALUES row has {} value(s), expected {}",
                                row.values.len(),
                                width
                            ),
                            span: row.span,
                        });
                    }
                    let Some(values) =
                        ctx.convert_expressions(&row.values, SegmentKind::InsertStatement)?
                    else {
                        return Ok(None);
                    };
                    rows.push(values);
                }
                RelNode::Values { rows }
            };

            Ok(Some(RelNode::TableModify {
                operation: ModifyOperation::Insert,
                target: Box::new(target),
                columns,
                source: Some(Box::new(source)),
                expressions: Vec::new(),
                condition: None,
            }))
        })
    }
}
