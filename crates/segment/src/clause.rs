use serde::{Deserialize, Serialize};

use crate::expr::{ColumnSegment, ExpressionSegment, SubquerySegment};
use crate::{SegmentKind, Span};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WhereSegment {
    pub expr: ExpressionSegment,
    #[serde(default)]
    pub span: Span,
}

impl WhereSegment {
    pub fn new(expr: ExpressionSegment) -> Self {
        Self {
            expr,
            span: Span::ZERO,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HavingSegment {
    pub expr: ExpressionSegment,
    #[serde(default)]
    pub span: Span,
}

impl HavingSegment {
    pub fn new(expr: ExpressionSegment) -> Self {
        Self {
            expr,
            span: Span::ZERO,
        }
    }
}

/// GROUP BY items share the order-by item shape (MySQL allows `GROUP BY a DESC`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupBySegment {
    pub items: Vec<OrderByItemSegment>,
    #[serde(default)]
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderBySegment {
    pub items: Vec<OrderByItemSegment>,
    #[serde(default)]
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderDirection {
    #[default]
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum NullsOrder {
    First,
    Last,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum OrderByItemSegment {
    Column(ColumnOrderByItemSegment),
    Expression(ExpressionOrderByItemSegment),
    /// `ORDER BY 2`: 1-based position in the select list.
    Index(IndexOrderByItemSegment),
}

impl OrderByItemSegment {
    pub fn direction(&self) -> OrderDirection {
        match self {
            OrderByItemSegment::Column(s) => s.direction,
            OrderByItemSegment::Expression(s) => s.direction,
            OrderByItemSegment::Index(s) => s.direction,
        }
    }

    pub fn nulls_order(&self) -> Option<NullsOrder> {
        match self {
            OrderByItemSegment::Column(s) => s.nulls_order,
            OrderByItemSegment::Expression(s) => s.nulls_order,
            OrderByItemSegment::Index(s) => s.nulls_order,
        }
    }

    pub fn span(&self) -> Span {
        match self {
            OrderByItemSegment::Column(s) => s.span,
            OrderByItemSegment::Expression(s) => s.span,
            OrderByItemSegment::Index(s) => s.span,
        }
    }

    pub fn column(column: ColumnSegment, direction: OrderDirection) -> Self {
        OrderByItemSegment::Column(ColumnOrderByItemSegment {
            column,
            direction,
            nulls_order: None,
            span: Span::ZERO,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnOrderByItemSegment {
    pub column: ColumnSegment,
    #[serde(default)]
    pub direction: OrderDirection,
    #[serde(default)]
    pub nulls_order: Option<NullsOrder>,
    #[serde(default)]
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpressionOrderByItemSegment {
    pub expr: ExpressionSegment,
    #[serde(default)]
    pub direction: OrderDirection,
    #[serde(default)]
    pub nulls_order: Option<NullsOrder>,
    #[serde(default)]
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexOrderByItemSegment {
    pub index: u64,
    #[serde(default)]
    pub direction: OrderDirection,
    #[serde(default)]
    pub nulls_order: Option<NullsOrder>,
    #[serde(default)]
    pub span: Span,
}

/// `LIMIT [offset,] row_count` / `LIMIT row_count OFFSET offset`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LimitSegment {
    #[serde(default)]
    pub offset: Option<PaginationValueSegment>,
    #[serde(default)]
    pub row_count: Option<PaginationValueSegment>,
    #[serde(default)]
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PaginationValueSegment {
    Number {
        value: u64,
        #[serde(default)]
        span: Span,
    },
    Parameter {
        index: usize,
        #[serde(default)]
        span: Span,
    },
}

impl PaginationValueSegment {
    pub fn number(value: u64) -> Self {
        PaginationValueSegment::Number {
            value,
            span: Span::ZERO,
        }
    }

    pub fn span(&self) -> Span {
        match self {
            PaginationValueSegment::Number { span, .. }
            | PaginationValueSegment::Parameter { span, .. } => *span,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CombineType {
    Union,
    UnionAll,
    Intersect,
    IntersectAll,
    Except,
    ExceptAll,
    /// Oracle spelling of EXCEPT.
    Minus,
}

/// `<current select> <combine type> <select>`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombineSegment {
    pub combine_type: CombineType,
    pub select: SubquerySegment,
    #[serde(default)]
    pub span: Span,
}

impl CombineSegment {
    pub fn kind(&self) -> SegmentKind {
        SegmentKind::Combine
    }
}

/// `SET c1 = v1, (c2, c3) = v2`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetAssignmentSegment {
    pub assignments: Vec<AssignmentSegment>,
    #[serde(default)]
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignmentSegment {
    pub columns: Vec<ColumnSegment>,
    pub value: ExpressionSegment,
    #[serde(default)]
    pub span: Span,
}

impl AssignmentSegment {
    pub fn new(column: ColumnSegment, value: ExpressionSegment) -> Self {
        Self {
            columns: vec![column],
            value,
            span: Span::ZERO,
        }
    }
}

/// One `VALUES (...)` row of an INSERT.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsertValuesSegment {
    pub values: Vec<ExpressionSegment>,
    #[serde(default)]
    pub span: Span,
}
