use serde::{Deserialize, Serialize};

use crate::expr::{AggregationSegment, ColumnSegment, ExpressionSegment, SubquerySegment};
use crate::{SegmentKind, Span};

/// The select list: `[DISTINCT] p1, p2, ...`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionsSegment {
    #[serde(default)]
    pub distinct_row: bool,
    pub projections: Vec<ProjectionSegment>,
    #[serde(default)]
    pub span: Span,
}

impl ProjectionsSegment {
    pub fn new(projections: Vec<ProjectionSegment>) -> Self {
        Self {
            distinct_row: false,
            projections,
            span: Span::ZERO,
        }
    }

    pub fn distinct(mut self) -> Self {
        self.distinct_row = true;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
#[non_exhaustive]
pub enum ProjectionSegment {
    Column(ColumnProjectionSegment),
    Expression(ExpressionProjectionSegment),
    Aggregation(AggregationProjectionSegment),
    Shorthand(ShorthandProjectionSegment),
    Subquery(SubqueryProjectionSegment),
}

impl ProjectionSegment {
    pub fn kind(&self) -> SegmentKind {
        match self {
            ProjectionSegment::Column(_) => SegmentKind::ColumnProjection,
            ProjectionSegment::Expression(_) => SegmentKind::ExpressionProjection,
            ProjectionSegment::Aggregation(_) => SegmentKind::AggregationProjection,
            ProjectionSegment::Shorthand(_) => SegmentKind::ShorthandProjection,
            ProjectionSegment::Subquery(_) => SegmentKind::SubqueryProjection,
        }
    }

    pub fn span(&self) -> Span {
        match self {
            ProjectionSegment::Column(s) => s.span,
            ProjectionSegment::Expression(s) => s.span,
            ProjectionSegment::Aggregation(s) => s.span,
            ProjectionSegment::Shorthand(s) => s.span,
            ProjectionSegment::Subquery(s) => s.span,
        }
    }

    pub fn alias(&self) -> Option<&str> {
        match self {
            ProjectionSegment::Column(s) => s.alias.as_deref(),
            ProjectionSegment::Expression(s) => s.alias.as_deref(),
            ProjectionSegment::Aggregation(s) => s.alias.as_deref(),
            ProjectionSegment::Subquery(s) => s.alias.as_deref(),
            ProjectionSegment::Shorthand(_) => None,
        }
    }

    pub fn column(name: impl Into<String>) -> Self {
        ProjectionSegment::Column(ColumnProjectionSegment {
            column: ColumnSegment::new(name),
            alias: None,
            span: Span::ZERO,
        })
    }

    pub fn star() -> Self {
        ProjectionSegment::Shorthand(ShorthandProjectionSegment {
            owner: None,
            span: Span::ZERO,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnProjectionSegment {
    pub column: ColumnSegment,
    #[serde(default)]
    pub alias: Option<String>,
    #[serde(default)]
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpressionProjectionSegment {
    pub expr: ExpressionSegment,
    #[serde(default)]
    pub alias: Option<String>,
    #[serde(default)]
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregationProjectionSegment {
    pub aggregation: AggregationSegment,
    #[serde(default)]
    pub alias: Option<String>,
    #[serde(default)]
    pub span: Span,
}

/// `*` or `owner.*`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShorthandProjectionSegment {
    #[serde(default)]
    pub owner: Option<String>,
    #[serde(default)]
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubqueryProjectionSegment {
    pub subquery: SubquerySegment,
    #[serde(default)]
    pub alias: Option<String>,
    #[serde(default)]
    pub span: Span,
}
