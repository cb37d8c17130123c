use serde::{Deserialize, Serialize};

use crate::statement::SelectStatement;
use crate::{SegmentKind, Span};

/// Scalar and predicate expressions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
#[non_exhaustive]
pub enum ExpressionSegment {
    Column(ColumnSegment),
    Literal(LiteralSegment),
    Parameter(ParameterMarkerSegment),
    Binary(BinaryOperationSegment),
    Not(NotSegment),
    In(InSegment),
    Between(BetweenSegment),
    List(ListSegment),
    Function(FunctionSegment),
    Aggregation(AggregationSegment),
    Subquery(SubquerySegment),
    Exists(ExistsSubquerySegment),
    CaseWhen(CaseWhenSegment),
    /// Raw expression text the parser did not analyse.
    Common(CommonExpressionSegment),
}

impl ExpressionSegment {
    pub fn kind(&self) -> SegmentKind {
        match self {
            ExpressionSegment::Column(_) => SegmentKind::Column,
            ExpressionSegment::Literal(_) => SegmentKind::Literal,
            ExpressionSegment::Parameter(_) => SegmentKind::ParameterMarker,
            ExpressionSegment::Binary(_) => SegmentKind::BinaryOperation,
            ExpressionSegment::Not(_) => SegmentKind::Not,
            ExpressionSegment::In(_) => SegmentKind::In,
            ExpressionSegment::Between(_) => SegmentKind::Between,
            ExpressionSegment::List(_) => SegmentKind::List,
            ExpressionSegment::Function(_) => SegmentKind::Function,
            ExpressionSegment::Aggregation(_) => SegmentKind::Aggregation,
            ExpressionSegment::Subquery(_) => SegmentKind::Subquery,
            ExpressionSegment::Exists(_) => SegmentKind::ExistsSubquery,
            ExpressionSegment::CaseWhen(_) => SegmentKind::CaseWhen,
            ExpressionSegment::Common(_) => SegmentKind::CommonExpression,
        }
    }

    pub fn span(&self) -> Span {
        match self {
            ExpressionSegment::Column(s) => s.span,
            ExpressionSegment::Literal(s) => s.span,
            ExpressionSegment::Parameter(s) => s.span,
            ExpressionSegment::Binary(s) => s.span,
            ExpressionSegment::Not(s) => s.span,
            ExpressionSegment::In(s) => s.span,
            ExpressionSegment::Between(s) => s.span,
            ExpressionSegment::List(s) => s.span,
            ExpressionSegment::Function(s) => s.span,
            ExpressionSegment::Aggregation(s) => s.span,
            ExpressionSegment::Subquery(s) => s.span,
            ExpressionSegment::Exists(s) => s.span,
            ExpressionSegment::CaseWhen(s) => s.span,
            ExpressionSegment::Common(s) => s.span,
        }
    }

    pub fn column(name: impl Into<String>) -> Self {
        ExpressionSegment::Column(ColumnSegment::new(name))
    }

    pub fn qualified_column(owner: impl Into<String>, name: impl Into<String>) -> Self {
        ExpressionSegment::Column(ColumnSegment::new(name).with_owner(owner))
    }

    pub fn literal(value: LiteralValue) -> Self {
        ExpressionSegment::Literal(LiteralSegment {
            value,
            span: Span::ZERO,
        })
    }

    pub fn integer(value: i64) -> Self {
        Self::literal(LiteralValue::Integer(value))
    }

    pub fn string(value: impl Into<String>) -> Self {
        Self::literal(LiteralValue::String(value.into()))
    }

    pub fn null() -> Self {
        Self::literal(LiteralValue::Null)
    }

    pub fn binary(left: ExpressionSegment, operator: impl Into<String>, right: ExpressionSegment) -> Self {
        ExpressionSegment::Binary(BinaryOperationSegment {
            left: Box::new(left),
            operator: operator.into(),
            right: Box::new(right),
            span: Span::ZERO,
        })
    }

    pub fn is_null_literal(&self) -> bool {
        matches!(
            self,
            ExpressionSegment::Literal(LiteralSegment {
                value: LiteralValue::Null,
                ..
            })
        )
    }
}

/// `[owner.]name`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSegment {
    #[serde(default)]
    pub owner: Option<String>,
    pub name: String,
    #[serde(default)]
    pub span: Span,
}

impl ColumnSegment {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            owner: None,
            name: name.into(),
            span: Span::ZERO,
        }
    }

    pub fn with_owner(mut self, owner: impl Into<String>) -> Self {
        self.owner = Some(owner.into());
        self
    }

    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    pub fn qualified_name(&self) -> Vec<String> {
        match &self.owner {
            Some(owner) => vec![owner.clone(), self.name.clone()],
            None => vec![self.name.clone()],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LiteralValue {
    Null,
    Boolean(bool),
    Integer(i64),
    /// Exact numeric kept as its source text.
    Decimal(String),
    String(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiteralSegment {
    pub value: LiteralValue,
    #[serde(default)]
    pub span: Span,
}

/// Positional `?` marker; `index` is 0-based in statement order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterMarkerSegment {
    pub index: usize,
    #[serde(default)]
    pub span: Span,
}

/// `left <operator> right` with the operator kept as written (`=`, `<=>`, `IS NOT`, `LIKE`, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinaryOperationSegment {
    pub left: Box<ExpressionSegment>,
    pub operator: String,
    pub right: Box<ExpressionSegment>,
    #[serde(default)]
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotSegment {
    pub expr: Box<ExpressionSegment>,
    #[serde(default)]
    pub span: Span,
}

/// `left [NOT] IN right`, where `right` is a list or a subquery.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InSegment {
    pub left: Box<ExpressionSegment>,
    pub right: Box<ExpressionSegment>,
    #[serde(default)]
    pub not: bool,
    #[serde(default)]
    pub span: Span,
}

/// `left [NOT] BETWEEN between AND and`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BetweenSegment {
    pub left: Box<ExpressionSegment>,
    pub between: Box<ExpressionSegment>,
    pub and: Box<ExpressionSegment>,
    #[serde(default)]
    pub not: bool,
    #[serde(default)]
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListSegment {
    pub items: Vec<ExpressionSegment>,
    #[serde(default)]
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionSegment {
    pub name: String,
    #[serde(default)]
    pub parameters: Vec<ExpressionSegment>,
    #[serde(default)]
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AggregationType {
    Count,
    Sum,
    Avg,
    Min,
    Max,
}

/// An aggregate call. Empty `parameters` denotes the `*` argument (`COUNT(*)`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregationSegment {
    pub aggregation_type: AggregationType,
    #[serde(default)]
    pub distinct: bool,
    #[serde(default)]
    pub parameters: Vec<ExpressionSegment>,
    #[serde(default)]
    pub span: Span,
}

/// A parenthesised SELECT appearing inside another statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubquerySegment {
    pub select: Box<SelectStatement>,
    #[serde(default)]
    pub span: Span,
}

impl SubquerySegment {
    pub fn new(select: SelectStatement) -> Self {
        let span = select.span;
        Self {
            select: Box::new(select),
            span,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExistsSubquerySegment {
    pub subquery: SubquerySegment,
    #[serde(default)]
    pub not: bool,
    #[serde(default)]
    pub span: Span,
}

/// `CASE [case_expr] WHEN .. THEN .. [ELSE ..] END`; `when_exprs` and `then_exprs` pair up by position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseWhenSegment {
    #[serde(default)]
    pub case_expr: Option<Box<ExpressionSegment>>,
    pub when_exprs: Vec<ExpressionSegment>,
    pub then_exprs: Vec<ExpressionSegment>,
    #[serde(default)]
    pub else_expr: Option<Box<ExpressionSegment>>,
    #[serde(default)]
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommonExpressionSegment {
    pub text: String,
    #[serde(default)]
    pub span: Span,
}
