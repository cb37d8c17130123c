//! Relational-node model
//!
//! The output of conversion: a closed tree of relational operators (`Scan`, `Project`,
//! `Filter`, ...) and scalar leaves (`Call`, `Identifier`, `Literal`, ...). Every node owns
//! its children, so each converted statement is a disjoint tree.

mod display;
pub mod operator;

pub use operator::{Arity, BuiltinFunction, Operator, OperatorTable};

use serde::{Deserialize, Serialize};
use sqlfed_segment::{LiteralValue, Span};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum JoinKind {
    Inner,
    Left,
    Right,
    Full,
    Cross,
    Comma,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum JoinCondition {
    None,
    On(Box<RelNode>),
    Using(Vec<String>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SetOpKind {
    Union,
    Intersect,
    Except,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ModifyOperation {
    Insert,
    Update,
    Delete,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "node")]
pub enum RelNode {
    /// Table reference by qualified name.
    Scan {
        table: Vec<String>,
        #[serde(default)]
        span: Span,
    },
    Project {
        input: Box<RelNode>,
        exprs: Vec<RelNode>,
        #[serde(default)]
        distinct: bool,
    },
    Filter {
        input: Box<RelNode>,
        condition: Box<RelNode>,
    },
    Join {
        left: Box<RelNode>,
        right: Box<RelNode>,
        kind: JoinKind,
        #[serde(default)]
        natural: bool,
        condition: JoinCondition,
    },
    SetOp {
        kind: SetOpKind,
        all: bool,
        left: Box<RelNode>,
        right: Box<RelNode>,
    },
    Aggregate {
        input: Box<RelNode>,
        group_by: Vec<RelNode>,
    },
    Sort {
        input: Box<RelNode>,
        order_by: Vec<RelNode>,
        #[serde(default)]
        offset: Option<Box<RelNode>>,
        #[serde(default)]
        fetch: Option<Box<RelNode>>,
    },
    Values {
        rows: Vec<Vec<RelNode>>,
    },
    TableModify {
        operation: ModifyOperation,
        target: Box<RelNode>,
        #[serde(default)]
        columns: Vec<RelNode>,
        #[serde(default)]
        source: Option<Box<RelNode>>,
        #[serde(default)]
        expressions: Vec<RelNode>,
        #[serde(default)]
        condition: Option<Box<RelNode>>,
    },
    Call(Call),
    /// Possibly qualified name; the star of `t.*` is the name `*`.
    Identifier {
        names: Vec<String>,
        #[serde(default)]
        span: Span,
    },
    Literal {
        value: LiteralValue,
        #[serde(default)]
        span: Span,
    },
    DynamicParam {
        index: usize,
        #[serde(default)]
        span: Span,
    },
    List {
        items: Vec<RelNode>,
        #[serde(default)]
        span: Span,
    },
}

impl RelNode {
    pub fn scan(table: Vec<String>, span: Span) -> Self {
        RelNode::Scan { table, span }
    }

    pub fn identifier(name: impl Into<String>) -> Self {
        RelNode::Identifier {
            names: vec![name.into()],
            span: Span::ZERO,
        }
    }

    pub fn qualified_identifier(names: Vec<String>, span: Span) -> Self {
        RelNode::Identifier { names, span }
    }

    pub fn star(owner: Option<&str>, span: Span) -> Self {
        let mut names: Vec<String> = owner.map(str::to_string).into_iter().collect();
        names.push("*".to_string());
        RelNode::Identifier { names, span }
    }

    pub fn literal(value: LiteralValue, span: Span) -> Self {
        RelNode::Literal { value, span }
    }

    pub fn project(input: RelNode, exprs: Vec<RelNode>, distinct: bool) -> Self {
        RelNode::Project {
            input: Box::new(input),
            exprs,
            distinct,
        }
    }

    pub fn filter(input: RelNode, condition: RelNode) -> Self {
        RelNode::Filter {
            input: Box::new(input),
            condition: Box::new(condition),
        }
    }

    pub fn aggregate(input: RelNode, group_by: Vec<RelNode>) -> Self {
        RelNode::Aggregate {
            input: Box::new(input),
            group_by,
        }
    }

    /// The single empty row a FROM-less SELECT reads from.
    pub fn single_row() -> Self {
        RelNode::Values {
            rows: vec![Vec::new()],
        }
    }

    /// Whether this node produces rows (as opposed to a scalar leaf or call).
    pub fn is_relational(&self) -> bool {
        !matches!(
            self,
            RelNode::Call(_)
                | RelNode::Identifier { .. }
                | RelNode::Literal { .. }
                | RelNode::DynamicParam { .. }
                | RelNode::List { .. }
        )
    }

    pub fn as_call(&self) -> Option<&Call> {
        match self {
            RelNode::Call(call) => Some(call),
            _ => None,
        }
    }

    /// Qualified names of every `Scan` in the tree, depth first.
    pub fn scanned_tables(&self) -> Vec<String> {
        let mut tables = Vec::new();
        self.walk(&mut |node| {
            if let RelNode::Scan { table, .. } = node {
                tables.push(table.join("."));
            }
        });
        tables
    }

    /// Pre-order traversal over this node and all descendants.
    pub fn walk(&self, visit: &mut dyn FnMut(&RelNode)) {
        visit(self);
        match self {
            RelNode::Scan { .. }
            | RelNode::Identifier { .. }
            | RelNode::Literal { .. }
            | RelNode::DynamicParam { .. } => {}
            RelNode::Project { input, exprs, .. } => {
                input.walk(visit);
                exprs.iter().for_each(|e| e.walk(visit));
            }
            RelNode::Filter { input, condition } => {
                input.walk(visit);
                condition.walk(visit);
            }
            RelNode::Join {
                left,
                right,
                condition,
                ..
            } => {
                left.walk(visit);
                right.walk(visit);
                if let JoinCondition::On(on) = condition {
                    on.walk(visit);
                }
            }
            RelNode::SetOp { left, right, .. } => {
                left.walk(visit);
                right.walk(visit);
            }
            RelNode::Aggregate { input, group_by } => {
                input.walk(visit);
                group_by.iter().for_each(|e| e.walk(visit));
            }
            RelNode::Sort {
                input,
                order_by,
                offset,
                fetch,
            } => {
                input.walk(visit);
                order_by.iter().for_each(|e| e.walk(visit));
                offset.iter().chain(fetch.iter()).for_each(|e| e.walk(visit));
            }
            RelNode::Values { rows } => rows.iter().flatten().for_each(|e| e.walk(visit)),
            RelNode::TableModify {
                target,
                columns,
                source,
                expressions,
                condition,
                ..
            } => {
                target.walk(visit);
                columns.iter().for_each(|e| e.walk(visit));
                source.iter().for_each(|e| e.walk(visit));
                expressions.iter().for_each(|e| e.walk(visit));
                condition.iter().for_each(|e| e.walk(visit));
            }
            RelNode::Call(call) => call.operands.iter().for_each(|e| e.walk(visit)),
            RelNode::List { items, .. } => items.iter().for_each(|e| e.walk(visit)),
        }
    }
}

impl From<Call> for RelNode {
    fn from(call: Call) -> Self {
        RelNode::Call(call)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("operator {operator} expects {expected} operand(s), got {actual}")]
pub struct ArityError {
    pub operator: String,
    pub expected: Arity,
    pub actual: usize,
}

/// An operator applied to operands.
///
/// Fields are private so every call satisfies its operator's arity; in particular an `AS`
/// call always has exactly one operand (unaliased) or two (target, alias identifier).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCall")]
pub struct Call {
    operator: Operator,
    operands: Vec<RelNode>,
    #[serde(default)]
    distinct: bool,
    #[serde(default)]
    span: Span,
}

#[derive(Deserialize)]
struct RawCall {
    operator: Operator,
    operands: Vec<RelNode>,
    #[serde(default)]
    distinct: bool,
    #[serde(default)]
    span: Span,
}

impl TryFrom<RawCall> for Call {
    type Error = ArityError;

    fn try_from(raw: RawCall) -> Result<Self, Self::Error> {
        Ok(Call::new(raw.operator, raw.operands)?
            .with_distinct(raw.distinct)
            .with_span(raw.span))
    }
}

impl Call {
    pub fn new(operator: Operator, operands: Vec<RelNode>) -> Result<Self, ArityError> {
        let expected = operator.arity();
        if !expected.accepts(operands.len()) {
            return Err(ArityError {
                operator: operator.name().to_string(),
                expected,
                actual: operands.len(),
            });
        }
        Ok(Self {
            operator,
            operands,
            distinct: false,
            span: Span::ZERO,
        })
    }

    /// `AS(target)` when `alias` is absent, `AS(target, Identifier(alias))` otherwise.
    pub fn alias(target: RelNode, alias: Option<String>) -> Self {
        let mut operands = Vec::with_capacity(2);
        operands.push(target);
        if let Some(alias) = alias {
            operands.push(RelNode::identifier(alias));
        }
        Self {
            operator: Operator::As,
            operands,
            distinct: false,
            span: Span::ZERO,
        }
    }

    pub fn aliased(target: RelNode, alias: impl Into<String>) -> Self {
        Self::alias(target, Some(alias.into()))
    }

    pub fn explicit_table(source: RelNode) -> Self {
        Self {
            operator: Operator::ExplicitTable,
            operands: vec![source],
            distinct: false,
            span: Span::ZERO,
        }
    }

    pub fn with_distinct(mut self, distinct: bool) -> Self {
        self.distinct = distinct;
        self
    }

    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    pub fn operator(&self) -> &Operator {
        &self.operator
    }

    pub fn operands(&self) -> &[RelNode] {
        &self.operands
    }

    pub fn is_distinct(&self) -> bool {
        self.distinct
    }

    pub fn span(&self) -> Span {
        self.span
    }

    /// The alias name of a two-operand `AS` call.
    pub fn alias_name(&self) -> Option<&str> {
        if self.operator != Operator::As {
            return None;
        }
        match self.operands.get(1) {
            Some(RelNode::Identifier { names, .. }) => names.last().map(String::as_str),
            _ => None,
        }
    }
}
