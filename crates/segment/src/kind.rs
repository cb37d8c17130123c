use serde::{Deserialize, Serialize};
use std::fmt;

/// Tag naming every segment variant the parser can produce.
///
/// Converters are registered against these tags, and diagnostics report them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[non_exhaustive]
pub enum SegmentKind {
    // statements
    SelectStatement,
    InsertStatement,
    UpdateStatement,
    DeleteStatement,

    // table sources
    SimpleTable,
    JoinTable,
    SubqueryTable,
    DeleteMultiTable,

    // projections
    ColumnProjection,
    ExpressionProjection,
    AggregationProjection,
    ShorthandProjection,
    SubqueryProjection,

    // expressions
    Column,
    Literal,
    ParameterMarker,
    BinaryOperation,
    Not,
    In,
    Between,
    List,
    Function,
    Aggregation,
    Subquery,
    ExistsSubquery,
    CaseWhen,
    CommonExpression,

    // clauses
    Projections,
    Where,
    GroupBy,
    Having,
    OrderBy,
    OrderByItem,
    Limit,
    Combine,
    SetAssignment,
}

impl SegmentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SegmentKind::SelectStatement => "SelectStatement",
            SegmentKind::InsertStatement => "InsertStatement",
            SegmentKind::UpdateStatement => "UpdateStatement",
            SegmentKind::DeleteStatement => "DeleteStatement",
            SegmentKind::SimpleTable => "SimpleTable",
            SegmentKind::JoinTable => "JoinTable",
            SegmentKind::SubqueryTable => "SubqueryTable",
            SegmentKind::DeleteMultiTable => "DeleteMultiTable",
            SegmentKind::ColumnProjection => "ColumnProjection",
            SegmentKind::ExpressionProjection => "ExpressionProjection",
            SegmentKind::AggregationProjection => "AggregationProjection",
            SegmentKind::ShorthandProjection => "ShorthandProjection",
            SegmentKind::SubqueryProjection => "SubqueryProjection",
            SegmentKind::Column => "Column",
            SegmentKind::Literal => "Literal",
            SegmentKind::ParameterMarker => "ParameterMarker",
            SegmentKind::BinaryOperation => "BinaryOperation",
            SegmentKind::Not => "Not",
            SegmentKind::In => "In",
            SegmentKind::Between => "Between",
            SegmentKind::List => "List",
            SegmentKind::Function => "Function",
            SegmentKind::Aggregation => "Aggregation",
            SegmentKind::Subquery => "Subquery",
            SegmentKind::ExistsSubquery => "ExistsSubquery",
            SegmentKind::CaseWhen => "CaseWhen",
            SegmentKind::CommonExpression => "CommonExpression",
            SegmentKind::Projections => "Projections",
            SegmentKind::Where => "Where",
            SegmentKind::GroupBy => "GroupBy",
            SegmentKind::Having => "Having",
            SegmentKind::OrderBy => "OrderBy",
            SegmentKind::OrderByItem => "OrderByItem",
            SegmentKind::Limit => "Limit",
            SegmentKind::Combine => "Combine",
            SegmentKind::SetAssignment => "SetAssignment",
        }
    }
}

impl fmt::Display for SegmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
