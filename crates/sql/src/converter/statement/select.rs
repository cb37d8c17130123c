use crate::converter::clause::{
    set_operation, CombineConverter, GroupByConverter, HavingConverter, OffsetConverter,
    OrderByConverter, RowCountConverter, WhereConverter,
};
use crate::converter::projection::ProjectionsConverter;
use crate::converter::{ConversionContext, ConvertError, ConvertResult, SegmentConverter};
use crate::rel::RelNode;
use sqlfed_segment::{SelectStatement, Span};

use super::into_items;

fn required(
    node: Option<RelNode>,
    clause: &'static str,
    span: Span,
) -> ConvertResult<RelNode> {
    node.ok_or(ConvertError::EmptyClause { clause, span })
}

/// Converts a SELECT in its own scope.
///
/// Clauses are converted in a fixed order (FROM, WHERE, GROUP BY, HAVING, select list,
/// ORDER BY and pagination, combine) and composed innermost first:
/// `Sort(SetOp(Project(Filter(Aggregate(Filter(source))))), right)`. Every clause is
/// optional on its own; one that is present but converts to nothing is an error.
#[derive(Debug, Clone, Copy, Default)]
pub struct SelectStatementConverter;

impl SegmentConverter<SelectStatement> for SelectStatementConverter {
    fn convert(
        &self,
        ctx: &mut ConversionContext<'_>,
        segment: Option<&SelectStatement>,
    ) -> ConvertResult<Option<RelNode>> {
        let Some(segment) = segment else {
            return Ok(None);
        };
        ctx.scoped(|ctx| convert_select(ctx, segment)).map(Some)
    }
}

fn convert_select(
    ctx: &mut ConversionContext<'_>,
    segment: &SelectStatement,
) -> ConvertResult<RelNode> {
    let source = match &segment.from {
        Some(from) => required(ctx.convert_table(Some(from))?, "FROM", from.span())?,
        None => RelNode::single_row(),
    };

    let condition = match &segment.where_clause {
        Some(clause) => Some(required(
            WhereConverter.convert(ctx, Some(clause))?,
            "WHERE",
            clause.span,
        )?),
        None => None,
    };

    let group_keys = match &segment.group_by {
        Some(clause) => Some(into_items(required(
            GroupByConverter.convert(ctx, Some(clause))?,
            "GROUP BY",
            clause.span,
        )?)),
        None => None,
    };

    let having = match &segment.having {
        Some(clause) => Some(required(
            HavingConverter.convert(ctx, Some(clause))?,
            "HAVING",
            clause.span,
        )?),
        None => None,
    };

    let projections = match &segment.projections {
        Some(list) => Some(into_items(required(
            ProjectionsConverter.convert(ctx, Some(list))?,
            "SELECT",
            list.span,
        )?)),
        None => None,
    };

    let order_by = match &segment.order_by {
        Some(clause) => into_items(required(
            OrderByConverter.convert(ctx, Some(clause))?,
            "ORDER BY",
            clause.span,
        )?),
        None => Vec::new(),
    };
    let offset = OffsetConverter.convert(ctx, segment.limit.as_ref())?;
    let fetch = RowCountConverter.convert(ctx, segment.limit.as_ref())?;

    let combined = match &segment.combine {
        Some(combine) => Some((
            combine.combine_type,
            required(
                CombineConverter.convert(ctx, Some(combine))?,
                "COMBINE",
                combine.span,
            )?,
        )),
        None => None,
    };

    let mut plan = source;
    if let Some(condition) = condition {
        plan = RelNode::filter(plan, condition);
    }
    if group_keys.is_some() || having.is_some() {
        plan = RelNode::aggregate(plan, group_keys.unwrap_or_default());
    }
    if let Some(having) = having {
        plan = RelNode::filter(plan, having);
    }
    if let Some(exprs) = projections {
        let distinct = segment
            .projections
            .as_ref()
            .is_some_and(|p| p.distinct_row);
        plan = RelNode::project(plan, exprs, distinct);
    }
    if let Some((combine_type, right)) = combined {
        let (kind, all) = set_operation(combine_type);
        plan = RelNode::SetOp {
            kind,
            all,
            left: Box::new(plan),
            right: Box::new(right),
        };
    }
    if !order_by.is_empty() || offset.is_some() || fetch.is_some() {
        plan = RelNode::Sort {
            input: Box::new(plan),
            order_by,
            offset: offset.map(Box::new),
            fetch: fetch.map(Box::new),
        };
    }

    Ok(plan)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::converter::ConverterRegistry;
    use sqlfed_common::CompilerConfig;
    use sqlfed_segment::{
        AggregationProjectionSegment, AggregationSegment, AggregationType, ColumnSegment,
        CombineSegment, CombineType, ExpressionSegment, GroupBySegment, HavingSegment,
        LimitSegment, OrderByItemSegment, OrderBySegment, OrderDirection,
        PaginationValueSegment, ProjectionSegment, ProjectionsSegment, SimpleTableSegment,
        SubquerySegment, SubqueryTableSegment, WhereSegment,
    };

    fn convert(select: &SelectStatement) -> ConvertResult<Option<RelNode>> {
        let config = CompilerConfig::default();
        let mut ctx = ConversionContext::new(ConverterRegistry::standard(), &config);
        let result = SelectStatementConverter.convert(&mut ctx, Some(select));
        assert_eq!(ctx.scope_stack_len(), 0);
        result
    }

    fn columns(names: &[&str]) -> ProjectionsSegment {
        ProjectionsSegment::new(names.iter().map(|n| ProjectionSegment::column(*n)).collect())
    }

    #[test]
    fn test_full_clause_composition() {
        let count = ProjectionSegment::Aggregation(AggregationProjectionSegment {
            aggregation: AggregationSegment {
                aggregation_type: AggregationType::Count,
                distinct: false,
                parameters: vec![],
                span: Span::ZERO,
            },
            alias: Some("cnt".to_string()),
            span: Span::ZERO,
        });
        let select = SelectStatement::new()
            .with_projections(ProjectionsSegment::new(vec![
                ProjectionSegment::column("user_id"),
                count,
            ]))
            .with_from(SimpleTableSegment::new("t_order"))
            .with_where(WhereSegment::new(ExpressionSegment::binary(
                ExpressionSegment::column("status"),
                "=",
                ExpressionSegment::string("paid"),
            )))
            .with_group_by(GroupBySegment {
                items: vec![OrderByItemSegment::column(
                    ColumnSegment::new("user_id"),
                    OrderDirection::Asc,
                )],
                span: Span::ZERO,
            })
            .with_having(HavingSegment::new(ExpressionSegment::binary(
                ExpressionSegment::column("cnt"),
                ">",
                ExpressionSegment::integer(1),
            )))
            .with_order_by(OrderBySegment {
                items: vec![OrderByItemSegment::column(
                    ColumnSegment::new("cnt"),
                    OrderDirection::Desc,
                )],
                span: Span::ZERO,
            })
            .with_limit(LimitSegment {
                offset: None,
                row_count: Some(PaginationValueSegment::number(10)),
                span: Span::ZERO,
            });

        let node = convert(&select).unwrap().unwrap();
        assert_eq!(
            node.to_string(),
            "Sort([DESC(cnt)], fetch=10, Project([user_id, AS(COUNT(*), cnt)], \
             Filter(GREATER_THAN(cnt, 1), Aggregate([user_id], \
             Filter(EQUALS(status, 'paid'), Scan(t_order))))))"
        );
    }

    #[test]
    fn test_from_less_select() {
        let select = SelectStatement::new().with_projections(ProjectionsSegment::new(vec![
            ProjectionSegment::Expression(sqlfed_segment::ExpressionProjectionSegment {
                expr: ExpressionSegment::integer(1),
                alias: None,
                span: Span::ZERO,
            }),
        ]));
        let node = convert(&select).unwrap().unwrap();
        assert_eq!(node.to_string(), "Project([AS(1, EXPR$0)], Values([]))");
    }

    #[test]
    fn test_sort_wraps_set_operation() {
        let right = SelectStatement::new()
            .with_projections(columns(&["id"]))
            .with_from(SimpleTableSegment::new("t_archive"));
        let select = SelectStatement::new()
            .with_projections(columns(&["id"]))
            .with_from(SimpleTableSegment::new("t_live"))
            .with_combine(CombineSegment {
                combine_type: CombineType::UnionAll,
                select: SubquerySegment::new(right),
                span: Span::ZERO,
            })
            .with_order_by(OrderBySegment {
                items: vec![OrderByItemSegment::column(
                    ColumnSegment::new("id"),
                    OrderDirection::Asc,
                )],
                span: Span::ZERO,
            });

        let node = convert(&select).unwrap().unwrap();
        assert_eq!(
            node.to_string(),
            "Sort([id], SetOp(UNION ALL, Project([id], Scan(t_live)), Project([id], Scan(t_archive))))"
        );
    }

    #[test]
    fn test_empty_from_subquery_is_an_empty_clause() {
        let hollow = SubqueryTableSegment::new(SubquerySegment::new(SelectStatement::new()));
        let select = SelectStatement::new()
            .with_projections(columns(&["a"]))
            .with_from(hollow);

        assert!(matches!(
            convert(&select),
            Err(ConvertError::EmptyClause { clause: "FROM", .. })
        ));
    }

    #[test]
    fn test_distinct_rows() {
        let select = SelectStatement::new()
            .with_projections(columns(&["city"]).distinct())
            .with_from(SimpleTableSegment::new("t_user"));
        let node = convert(&select).unwrap().unwrap();
        assert_eq!(node.to_string(), "Project(DISTINCT [city], Scan(t_user))");
    }
}
