//! Dispatch registry
//!
//! Maps a segment's [`SegmentKind`] to the converter for that variant. Every family table
//! carries an explicit default entry which raises the fatal
//! [`ConvertError::UnsupportedSegment`]: a kind without a converter is a defect in the
//! converter set, never something to skip.

use crate::converter::context::ConversionContext;
use crate::converter::error::{ConvertError, ConvertResult};
use crate::converter::expression::{
    AggregationExpressionConverter, BetweenExpressionConverter, CaseWhenConverter,
    BinaryOperationConverter, ColumnConverter, ExistsSubqueryConverter, FunctionConverter,
    InExpressionConverter, ListExpressionConverter, LiteralExpressionConverter,
    NotExpressionConverter, ParameterMarkerConverter, SubqueryExpressionConverter,
};
use crate::converter::from::{JoinTableConverter, SimpleTableConverter, SubqueryTableConverter};
use crate::converter::projection::{
    AggregationProjectionConverter, ColumnProjectionConverter, ExpressionProjectionConverter,
    ShorthandProjectionConverter, SubqueryProjectionConverter,
};
use crate::converter::statement::{
    DeleteStatementConverter, InsertStatementConverter, SelectStatementConverter,
    UpdateStatementConverter,
};
use crate::converter::SegmentConverter;
use crate::rel::{OperatorTable, RelNode};
use sqlfed_segment::{
    ExpressionSegment, ProjectionSegment, SegmentKind, SelectStatement, Span, Statement,
    TableSegment,
};
use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

/// A segment family the registry dispatches over.
pub trait Dispatchable {
    fn kind(&self) -> SegmentKind;
    fn span(&self) -> Span;
}

macro_rules! impl_dispatchable {
    ($($family:ty),* $(,)?) => {
        $(
            impl Dispatchable for $family {
                fn kind(&self) -> SegmentKind {
                    <$family>::kind(self)
                }

                fn span(&self) -> Span {
                    <$family>::span(self)
                }
            }
        )*
    };
}

impl_dispatchable!(TableSegment, ProjectionSegment, ExpressionSegment, Statement);

pub type ConvertFn<S> = fn(&mut ConversionContext<'_>, &S) -> ConvertResult<Option<RelNode>>;

pub type SelectFn = ConvertFn<SelectStatement>;

fn unsupported<S: Dispatchable>(
    ctx: &mut ConversionContext<'_>,
    segment: &S,
) -> ConvertResult<Option<RelNode>> {
    let kind = segment.kind();
    let span = segment.span();
    tracing::error!(
        target: "sqlfed::registry",
        %kind,
        %span,
        path = ?ctx.segment_path(),
        "No converter registered for segment kind"
    );
    Err(ConvertError::UnsupportedSegment {
        kind,
        span,
        path: ctx.segment_path().to_vec(),
    })
}

/// Kind → converter entries for one segment family, plus the fatal default.
pub struct DispatchTable<S> {
    entries: HashMap<SegmentKind, ConvertFn<S>>,
    default: ConvertFn<S>,
}

impl<S: Dispatchable> DispatchTable<S> {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
            default: unsupported::<S>,
        }
    }

    pub fn register(&mut self, kind: SegmentKind, converter: ConvertFn<S>) {
        self.entries.insert(kind, converter);
    }

    pub fn remove(&mut self, kind: SegmentKind) {
        self.entries.remove(&kind);
    }

    pub fn resolve(&self, kind: SegmentKind) -> ConvertFn<S> {
        self.entries.get(&kind).copied().unwrap_or(self.default)
    }

    pub fn contains(&self, kind: SegmentKind) -> bool {
        self.entries.contains_key(&kind)
    }

    pub fn kinds(&self) -> Vec<SegmentKind> {
        let mut kinds: Vec<SegmentKind> = self.entries.keys().copied().collect();
        kinds.sort();
        kinds
    }
}

impl<S: Dispatchable> Default for DispatchTable<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> Clone for DispatchTable<S> {
    fn clone(&self) -> Self {
        Self {
            entries: self.entries.clone(),
            default: self.default,
        }
    }
}

impl<S> fmt::Debug for DispatchTable<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DispatchTable")
            .field("entries", &self.entries.len())
            .finish()
    }
}

/// Generates the adapter that unwraps one variant of a family and hands it to its
/// converter. A variant other than the expected one means the table is miswired.
macro_rules! entry {
    ($name:ident, $family:ident :: $variant:ident => $converter:expr, $kind:expr) => {
        fn $name(ctx: &mut ConversionContext<'_>, segment: &$family) -> ConvertResult<Option<RelNode>> {
            match segment {
                $family::$variant(inner) => SegmentConverter::convert(&$converter, ctx, Some(inner)),
                other => Err(ConvertError::ConverterMismatch {
                    expected: $kind,
                    actual: other.kind(),
                }),
            }
        }
    };
}

entry!(simple_table, TableSegment::Simple => SimpleTableConverter, SegmentKind::SimpleTable);
entry!(join_table, TableSegment::Join => JoinTableConverter, SegmentKind::JoinTable);
entry!(subquery_table, TableSegment::Subquery => SubqueryTableConverter, SegmentKind::SubqueryTable);

entry!(column_projection, ProjectionSegment::Column => ColumnProjectionConverter, SegmentKind::ColumnProjection);
entry!(expression_projection, ProjectionSegment::Expression => ExpressionProjectionConverter, SegmentKind::ExpressionProjection);
entry!(aggregation_projection, ProjectionSegment::Aggregation => AggregationProjectionConverter, SegmentKind::AggregationProjection);
entry!(shorthand_projection, ProjectionSegment::Shorthand => ShorthandProjectionConverter, SegmentKind::ShorthandProjection);
entry!(subquery_projection, ProjectionSegment::Subquery => SubqueryProjectionConverter, SegmentKind::SubqueryProjection);

entry!(column_expression, ExpressionSegment::Column => ColumnConverter, SegmentKind::Column);
entry!(literal_expression, ExpressionSegment::Literal => LiteralExpressionConverter, SegmentKind::Literal);
entry!(parameter_expression, ExpressionSegment::Parameter => ParameterMarkerConverter, SegmentKind::ParameterMarker);
entry!(binary_expression, ExpressionSegment::Binary => BinaryOperationConverter, SegmentKind::BinaryOperation);
entry!(not_expression, ExpressionSegment::Not => NotExpressionConverter, SegmentKind::Not);
entry!(in_expression, ExpressionSegment::In => InExpressionConverter, SegmentKind::In);
entry!(between_expression, ExpressionSegment::Between => BetweenExpressionConverter, SegmentKind::Between);
entry!(list_expression, ExpressionSegment::List => ListExpressionConverter, SegmentKind::List);
entry!(function_expression, ExpressionSegment::Function => FunctionConverter, SegmentKind::Function);
entry!(aggregation_expression, ExpressionSegment::Aggregation => AggregationExpressionConverter, SegmentKind::Aggregation);
entry!(subquery_expression, ExpressionSegment::Subquery => SubqueryExpressionConverter, SegmentKind::Subquery);
entry!(exists_expression, ExpressionSegment::Exists => ExistsSubqueryConverter, SegmentKind::ExistsSubquery);
entry!(case_when_expression, ExpressionSegment::CaseWhen => CaseWhenConverter, SegmentKind::CaseWhen);

entry!(select_statement, Statement::Select => SelectStatementConverter, SegmentKind::SelectStatement);
entry!(insert_statement, Statement::Insert => InsertStatementConverter, SegmentKind::InsertStatement);
entry!(update_statement, Statement::Update => UpdateStatementConverter, SegmentKind::UpdateStatement);
entry!(delete_statement, Statement::Delete => DeleteStatementConverter, SegmentKind::DeleteStatement);

fn nested_select(
    ctx: &mut ConversionContext<'_>,
    segment: &SelectStatement,
) -> ConvertResult<Option<RelNode>> {
    SelectStatementConverter.convert(ctx, Some(segment))
}

/// Immutable set of dispatch tables shared by every conversion.
#[derive(Debug, Clone)]
pub struct ConverterRegistry {
    tables: DispatchTable<TableSegment>,
    projections: DispatchTable<ProjectionSegment>,
    expressions: DispatchTable<ExpressionSegment>,
    statements: DispatchTable<Statement>,
    select: SelectFn,
    operators: OperatorTable,
}

impl ConverterRegistry {
    /// The full converter set, built once and shared read-only across threads.
    pub fn standard() -> &'static ConverterRegistry {
        static STANDARD: OnceLock<ConverterRegistry> = OnceLock::new();

        STANDARD.get_or_init(|| {
            let registry = ConverterRegistryBuilder::standard().build();
            tracing::debug!(
                target: "sqlfed::registry",
                tables = registry.tables.entries.len(),
                projections = registry.projections.entries.len(),
                expressions = registry.expressions.entries.len(),
                statements = registry.statements.entries.len(),
                "Initialized standard converter registry"
            );
            registry
        })
    }

    /// An empty registry: every kind resolves to the fatal default.
    pub fn builder() -> ConverterRegistryBuilder {
        ConverterRegistryBuilder::empty()
    }

    pub fn tables(&self) -> &DispatchTable<TableSegment> {
        &self.tables
    }

    pub fn projections(&self) -> &DispatchTable<ProjectionSegment> {
        &self.projections
    }

    pub fn expressions(&self) -> &DispatchTable<ExpressionSegment> {
        &self.expressions
    }

    pub fn statements(&self) -> &DispatchTable<Statement> {
        &self.statements
    }

    pub fn select_converter(&self) -> SelectFn {
        self.select
    }

    pub fn operators(&self) -> &OperatorTable {
        &self.operators
    }
}

pub struct ConverterRegistryBuilder {
    registry: ConverterRegistry,
}

impl ConverterRegistryBuilder {
    pub fn empty() -> Self {
        Self {
            registry: ConverterRegistry {
                tables: DispatchTable::new(),
                projections: DispatchTable::new(),
                expressions: DispatchTable::new(),
                statements: DispatchTable::new(),
                select: nested_select,
                operators: OperatorTable::standard().clone(),
            },
        }
    }

    pub fn standard() -> Self {
        Self::empty()
            .table(SegmentKind::SimpleTable, simple_table)
            .table(SegmentKind::JoinTable, join_table)
            .table(SegmentKind::SubqueryTable, subquery_table)
            .projection(SegmentKind::ColumnProjection, column_projection)
            .projection(SegmentKind::ExpressionProjection, expression_projection)
            .projection(SegmentKind::AggregationProjection, aggregation_projection)
            .projection(SegmentKind::ShorthandProjection, shorthand_projection)
            .projection(SegmentKind::SubqueryProjection, subquery_projection)
            .expression(SegmentKind::Column, column_expression)
            .expression(SegmentKind::Literal, literal_expression)
            .expression(SegmentKind::ParameterMarker, parameter_expression)
            .expression(SegmentKind::BinaryOperation, binary_expression)
            .expression(SegmentKind::Not, not_expression)
            .expression(SegmentKind::In, in_expression)
            .expression(SegmentKind::Between, between_expression)
            .expression(SegmentKind::List, list_expression)
            .expression(SegmentKind::Function, function_expression)
            .expression(SegmentKind::Aggregation, aggregation_expression)
            .expression(SegmentKind::Subquery, subquery_expression)
            .expression(SegmentKind::ExistsSubquery, exists_expression)
            .expression(SegmentKind::CaseWhen, case_when_expression)
            .statement(SegmentKind::SelectStatement, select_statement)
            .statement(SegmentKind::InsertStatement, insert_statement)
            .statement(SegmentKind::UpdateStatement, update_statement)
            .statement(SegmentKind::DeleteStatement, delete_statement)
    }

    pub fn table(mut self, kind: SegmentKind, converter: ConvertFn<TableSegment>) -> Self {
        self.registry.tables.register(kind, converter);
        self
    }

    pub fn projection(mut self, kind: SegmentKind, converter: ConvertFn<ProjectionSegment>) -> Self {
        self.registry.projections.register(kind, converter);
        self
    }

    pub fn expression(mut self, kind: SegmentKind, converter: ConvertFn<ExpressionSegment>) -> Self {
        self.registry.expressions.register(kind, converter);
        self
    }

    pub fn statement(mut self, kind: SegmentKind, converter: ConvertFn<Statement>) -> Self {
        self.registry.statements.register(kind, converter);
        self
    }

    /// Drop a kind from whichever family table holds it.
    pub fn without(mut self, kind: SegmentKind) -> Self {
        self.registry.tables.remove(kind);
        self.registry.projections.remove(kind);
        self.registry.expressions.remove(kind);
        self.registry.statements.remove(kind);
        self
    }

    pub fn select(mut self, converter: SelectFn) -> Self {
        self.registry.select = converter;
        self
    }

    pub fn operators(mut self, operators: OperatorTable) -> Self {
        self.registry.operators = operators;
        self
    }

    pub fn build(self) -> ConverterRegistry {
        self.registry
    }
}
