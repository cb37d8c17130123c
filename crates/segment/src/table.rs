use serde::{Deserialize, Serialize};

use crate::expr::{ColumnSegment, ExpressionSegment, SubquerySegment};
use crate::{SegmentKind, Span};

/// A table source in a FROM, UPDATE or DELETE clause.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
#[non_exhaustive]
pub enum TableSegment {
    Simple(SimpleTableSegment),
    Join(JoinTableSegment),
    Subquery(SubqueryTableSegment),
    DeleteMultiTable(DeleteMultiTableSegment),
}

impl TableSegment {
    pub fn kind(&self) -> SegmentKind {
        match self {
            TableSegment::Simple(_) => SegmentKind::SimpleTable,
            TableSegment::Join(_) => SegmentKind::JoinTable,
            TableSegment::Subquery(_) => SegmentKind::SubqueryTable,
            TableSegment::DeleteMultiTable(_) => SegmentKind::DeleteMultiTable,
        }
    }

    pub fn span(&self) -> Span {
        match self {
            TableSegment::Simple(s) => s.span,
            TableSegment::Join(s) => s.span,
            TableSegment::Subquery(s) => s.span,
            TableSegment::DeleteMultiTable(s) => s.span,
        }
    }

    /// Alias the source is visible under, if any. Joins expose no alias of their own.
    pub fn alias(&self) -> Option<&str> {
        match self {
            TableSegment::Simple(s) => s.alias.as_deref(),
            TableSegment::Subquery(s) => s.alias.as_deref(),
            TableSegment::Join(_) | TableSegment::DeleteMultiTable(_) => None,
        }
    }
}

impl From<SimpleTableSegment> for TableSegment {
    fn from(value: SimpleTableSegment) -> Self {
        TableSegment::Simple(value)
    }
}

impl From<JoinTableSegment> for TableSegment {
    fn from(value: JoinTableSegment) -> Self {
        TableSegment::Join(value)
    }
}

impl From<SubqueryTableSegment> for TableSegment {
    fn from(value: SubqueryTableSegment) -> Self {
        TableSegment::Subquery(value)
    }
}

/// `[owner.]name [AS alias]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimpleTableSegment {
    #[serde(default)]
    pub owner: Option<String>,
    pub name: String,
    #[serde(default)]
    pub alias: Option<String>,
    #[serde(default)]
    pub span: Span,
}

impl SimpleTableSegment {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            owner: None,
            name: name.into(),
            alias: None,
            span: Span::ZERO,
        }
    }

    pub fn with_owner(mut self, owner: impl Into<String>) -> Self {
        self.owner = Some(owner.into());
        self
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    /// Qualified name parts, owner first.
    pub fn qualified_name(&self) -> Vec<String> {
        match &self.owner {
            Some(owner) => vec![owner.clone(), self.name.clone()],
            None => vec![self.name.clone()],
        }
    }

    /// Name other segments use to qualify columns of this table.
    pub fn binding_name(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum JoinType {
    Inner,
    Left,
    Right,
    Full,
    Cross,
    /// `FROM a, b`
    Comma,
}

/// `left <join type> JOIN right [ON condition | USING (columns)]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JoinTableSegment {
    pub left: Box<TableSegment>,
    pub right: Box<TableSegment>,
    pub join_type: JoinType,
    #[serde(default)]
    pub natural: bool,
    #[serde(default)]
    pub condition: Option<ExpressionSegment>,
    #[serde(default)]
    pub using: Vec<ColumnSegment>,
    #[serde(default)]
    pub span: Span,
}

impl JoinTableSegment {
    pub fn new(left: TableSegment, join_type: JoinType, right: TableSegment) -> Self {
        Self {
            left: Box::new(left),
            right: Box::new(right),
            join_type,
            natural: false,
            condition: None,
            using: Vec::new(),
            span: Span::ZERO,
        }
    }

    pub fn on(mut self, condition: ExpressionSegment) -> Self {
        self.condition = Some(condition);
        self
    }

    pub fn using(mut self, columns: Vec<ColumnSegment>) -> Self {
        self.using = columns;
        self
    }

    pub fn natural(mut self) -> Self {
        self.natural = true;
        self
    }
}

/// `(SELECT ...) [AS alias]` used as a table source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubqueryTableSegment {
    pub subquery: SubquerySegment,
    #[serde(default)]
    pub alias: Option<String>,
    #[serde(default)]
    pub span: Span,
}

impl SubqueryTableSegment {
    pub fn new(subquery: SubquerySegment) -> Self {
        let span = subquery.span;
        Self {
            subquery,
            alias: None,
            span,
        }
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }
}

/// MySQL `DELETE t1, t2 FROM t1 JOIN t2 ...` target list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteMultiTableSegment {
    pub targets: Vec<SimpleTableSegment>,
    pub relation: Box<TableSegment>,
    #[serde(default)]
    pub span: Span,
}
