use serde::{Deserialize, Serialize};

use crate::clause::{
    CombineSegment, GroupBySegment, HavingSegment, InsertValuesSegment, LimitSegment,
    OrderBySegment, SetAssignmentSegment, WhereSegment,
};
use crate::expr::{ColumnSegment, SubquerySegment};
use crate::projection::ProjectionsSegment;
use crate::table::{SimpleTableSegment, TableSegment};
use crate::{SegmentKind, Span};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
#[non_exhaustive]
pub enum Statement {
    Select(SelectStatement),
    Insert(InsertStatement),
    Update(UpdateStatement),
    Delete(DeleteStatement),
}

impl Statement {
    pub fn kind(&self) -> SegmentKind {
        match self {
            Statement::Select(_) => SegmentKind::SelectStatement,
            Statement::Insert(_) => SegmentKind::InsertStatement,
            Statement::Update(_) => SegmentKind::UpdateStatement,
            Statement::Delete(_) => SegmentKind::DeleteStatement,
        }
    }

    pub fn span(&self) -> Span {
        match self {
            Statement::Select(s) => s.span,
            Statement::Insert(s) => s.span,
            Statement::Update(s) => s.span,
            Statement::Delete(s) => s.span,
        }
    }
}

impl From<SelectStatement> for Statement {
    fn from(value: SelectStatement) -> Self {
        Statement::Select(value)
    }
}

/// Every clause is optional; a bare `SELECT` with nothing else is representable.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SelectStatement {
    #[serde(default)]
    pub projections: Option<ProjectionsSegment>,
    #[serde(default)]
    pub from: Option<TableSegment>,
    #[serde(default)]
    pub where_clause: Option<WhereSegment>,
    #[serde(default)]
    pub group_by: Option<GroupBySegment>,
    #[serde(default)]
    pub having: Option<HavingSegment>,
    #[serde(default)]
    pub order_by: Option<OrderBySegment>,
    #[serde(default)]
    pub limit: Option<LimitSegment>,
    #[serde(default)]
    pub combine: Option<CombineSegment>,
    #[serde(default)]
    pub span: Span,
}

impl SelectStatement {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_projections(mut self, projections: ProjectionsSegment) -> Self {
        self.projections = Some(projections);
        self
    }

    pub fn with_from(mut self, from: impl Into<TableSegment>) -> Self {
        self.from = Some(from.into());
        self
    }

    pub fn with_where(mut self, where_clause: WhereSegment) -> Self {
        self.where_clause = Some(where_clause);
        self
    }

    pub fn with_group_by(mut self, group_by: GroupBySegment) -> Self {
        self.group_by = Some(group_by);
        self
    }

    pub fn with_having(mut self, having: HavingSegment) -> Self {
        self.having = Some(having);
        self
    }

    pub fn with_order_by(mut self, order_by: OrderBySegment) -> Self {
        self.order_by = Some(order_by);
        self
    }

    pub fn with_limit(mut self, limit: LimitSegment) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_combine(mut self, combine: CombineSegment) -> Self {
        self.combine = Some(combine);
        self
    }

    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }
}

/// `INSERT INTO table [(columns)] VALUES ... | SET ... | SELECT ...`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsertStatement {
    pub table: SimpleTableSegment,
    #[serde(default)]
    pub columns: Vec<ColumnSegment>,
    #[serde(default)]
    pub values: Vec<InsertValuesSegment>,
    #[serde(default)]
    pub set_assignment: Option<SetAssignmentSegment>,
    #[serde(default)]
    pub select: Option<SubquerySegment>,
    #[serde(default)]
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateStatement {
    pub table: TableSegment,
    pub set_assignment: SetAssignmentSegment,
    #[serde(default)]
    pub where_clause: Option<WhereSegment>,
    #[serde(default)]
    pub order_by: Option<OrderBySegment>,
    #[serde(default)]
    pub limit: Option<LimitSegment>,
    #[serde(default)]
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteStatement {
    pub table: TableSegment,
    #[serde(default)]
    pub where_clause: Option<WhereSegment>,
    #[serde(default)]
    pub order_by: Option<OrderBySegment>,
    #[serde(default)]
    pub limit: Option<LimitSegment>,
    #[serde(default)]
    pub span: Span,
}
