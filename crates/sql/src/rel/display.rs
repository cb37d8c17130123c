use super::{Call, JoinCondition, JoinKind, ModifyOperation, RelNode, SetOpKind};
use sqlfed_segment::LiteralValue;
use std::fmt::{self, Display, Formatter, Write};

fn write_list(f: &mut Formatter<'_>, items: &[RelNode]) -> fmt::Result {
    f.write_char('[')?;
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{}", item)?;
    }
    f.write_char(']')
}

fn join_label(kind: JoinKind, natural: bool) -> String {
    let kind = match kind {
        JoinKind::Inner => "INNER",
        JoinKind::Left => "LEFT",
        JoinKind::Right => "RIGHT",
        JoinKind::Full => "FULL",
        JoinKind::Cross => "CROSS",
        JoinKind::Comma => "COMMA",
    };
    if natural {
        format!("NATURAL {}", kind)
    } else {
        kind.to_string()
    }
}

fn set_op_label(kind: SetOpKind, all: bool) -> &'static str {
    match (kind, all) {
        (SetOpKind::Union, false) => "UNION",
        (SetOpKind::Union, true) => "UNION ALL",
        (SetOpKind::Intersect, false) => "INTERSECT",
        (SetOpKind::Intersect, true) => "INTERSECT ALL",
        (SetOpKind::Except, false) => "EXCEPT",
        (SetOpKind::Except, true) => "EXCEPT ALL",
    }
}

fn modify_label(op: ModifyOperation) -> &'static str {
    match op {
        ModifyOperation::Insert => "INSERT",
        ModifyOperation::Update => "UPDATE",
        ModifyOperation::Delete => "DELETE",
    }
}

fn fmt_literal(f: &mut Formatter<'_>, value: &LiteralValue) -> fmt::Result {
    match value {
        LiteralValue::Null => f.write_str("NULL"),
        LiteralValue::Boolean(true) => f.write_str("TRUE"),
        LiteralValue::Boolean(false) => f.write_str("FALSE"),
        LiteralValue::Integer(i) => write!(f, "{}", i),
        LiteralValue::Decimal(d) => f.write_str(d),
        LiteralValue::String(s) => write!(f, "'{}'", s.replace('\'', "''")),
    }
}

impl Display for Call {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.operator)?;
        if self.distinct {
            f.write_str("DISTINCT ")?;
        }
        for (i, operand) in self.operands.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", operand)?;
        }
        f.write_char(')')
    }
}

/// Compact single-line rendering, e.g. `AS(EXPLICIT_TABLE(Scan(t)))`.
impl Display for RelNode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            RelNode::Scan { table, .. } => write!(f, "Scan({})", table.join(".")),
            RelNode::Project {
                input,
                exprs,
                distinct,
            } => {
                f.write_str("Project(")?;
                if *distinct {
                    f.write_str("DISTINCT ")?;
                }
                write_list(f, exprs)?;
                write!(f, ", {})", input)
            }
            RelNode::Filter { input, condition } => write!(f, "Filter({}, {})", condition, input),
            RelNode::Join {
                left,
                right,
                kind,
                natural,
                condition,
            } => {
                write!(f, "Join({}, {}, {}", join_label(*kind, *natural), left, right)?;
                match condition {
                    JoinCondition::None => {}
                    JoinCondition::On(on) => write!(f, ", ON {}", on)?,
                    JoinCondition::Using(columns) => write!(f, ", USING [{}]", columns.join(", "))?,
                }
                f.write_char(')')
            }
            RelNode::SetOp {
                kind,
                all,
                left,
                right,
            } => write!(f, "SetOp({}, {}, {})", set_op_label(*kind, *all), left, right),
            RelNode::Aggregate { input, group_by } => {
                f.write_str("Aggregate(")?;
                write_list(f, group_by)?;
                write!(f, ", {})", input)
            }
            RelNode::Sort {
                input,
                order_by,
                offset,
                fetch,
            } => {
                f.write_str("Sort(")?;
                write_list(f, order_by)?;
                if let Some(offset) = offset {
                    write!(f, ", offset={}", offset)?;
                }
                if let Some(fetch) = fetch {
                    write!(f, ", fetch={}", fetch)?;
                }
                write!(f, ", {})", input)
            }
            RelNode::Values { rows } => {
                f.write_str("Values(")?;
                for (i, row) in rows.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write_list(f, row)?;
                }
                f.write_char(')')
            }
            RelNode::TableModify {
                operation,
                target,
                columns,
                source,
                expressions,
                condition,
            } => {
                write!(f, "TableModify({}, {}", modify_label(*operation), target)?;
                if !columns.is_empty() {
                    f.write_str(", columns=")?;
                    write_list(f, columns)?;
                }
                if !expressions.is_empty() {
                    f.write_str(", set=")?;
                    write_list(f, expressions)?;
                }
                if let Some(condition) = condition {
                    write!(f, ", where={}", condition)?;
                }
                if let Some(source) = source {
                    write!(f, ", {}", source)?;
                }
                f.write_char(')')
            }
            RelNode::Call(call) => write!(f, "{}", call),
            RelNode::Identifier { names, .. } => f.write_str(&names.join(".")),
            RelNode::Literal { value, .. } => fmt_literal(f, value),
            RelNode::DynamicParam { index, .. } => write!(f, "?{}", index),
            RelNode::List { items, .. } => {
                f.write_char('(')?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_char(')')
            }
        }
    }
}

fn list_string(items: &[RelNode]) -> String {
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

impl RelNode {
    /// One relational operator per line, children indented, scalar parts inline.
    pub fn display_indent(&self) -> String {
        let mut out = String::new();
        self.fmt_indent(0, &mut out);
        out
    }

    fn fmt_indent(&self, depth: usize, out: &mut String) {
        let pad = "  ".repeat(depth);
        let mut line = |text: String| {
            out.push_str(&pad);
            out.push_str(&text);
            out.push('\n');
        };

        match self {
            RelNode::Scan { table, .. } => line(format!("Scan: {}", table.join("."))),
            RelNode::Project {
                input,
                exprs,
                distinct,
            } => {
                let distinct = if *distinct { " distinct" } else { "" };
                line(format!("Project:{} [{}]", distinct, list_string(exprs)));
                input.fmt_indent(depth + 1, out);
            }
            RelNode::Filter { input, condition } => {
                line(format!("Filter: {}", condition));
                input.fmt_indent(depth + 1, out);
            }
            RelNode::Join {
                left,
                right,
                kind,
                natural,
                condition,
            } => {
                let condition = match condition {
                    JoinCondition::None => String::new(),
                    JoinCondition::On(on) => format!(" ON {}", on),
                    JoinCondition::Using(columns) => format!(" USING [{}]", columns.join(", ")),
                };
                line(format!("Join: {}{}", join_label(*kind, *natural), condition));
                left.fmt_indent(depth + 1, out);
                right.fmt_indent(depth + 1, out);
            }
            RelNode::SetOp {
                kind,
                all,
                left,
                right,
            } => {
                line(format!("SetOp: {}", set_op_label(*kind, *all)));
                left.fmt_indent(depth + 1, out);
                right.fmt_indent(depth + 1, out);
            }
            RelNode::Aggregate { input, group_by } => {
                line(format!("Aggregate: group_by=[{}]", list_string(group_by)));
                input.fmt_indent(depth + 1, out);
            }
            RelNode::Sort {
                input,
                order_by,
                offset,
                fetch,
            } => {
                let mut text = format!("Sort: [{}]", list_string(order_by));
                if let Some(offset) = offset {
                    let _ = write!(text, " offset={}", offset);
                }
                if let Some(fetch) = fetch {
                    let _ = write!(text, " fetch={}", fetch);
                }
                line(text);
                input.fmt_indent(depth + 1, out);
            }
            RelNode::TableModify {
                operation,
                target,
                columns,
                source,
                expressions,
                condition,
            } => {
                let mut text = format!("TableModify: {} {}", modify_label(*operation), target);
                if !columns.is_empty() {
                    let _ = write!(text, " columns=[{}]", list_string(columns));
                }
                if !expressions.is_empty() {
                    let _ = write!(text, " set=[{}]", list_string(expressions));
                }
                if let Some(condition) = condition {
                    let _ = write!(text, " where={}", condition);
                }
                line(text);
                if let Some(source) = source {
                    source.fmt_indent(depth + 1, out);
                }
            }
            // structural calls over relations keep the tree shape
            RelNode::Call(call) if call.operands().iter().any(RelNode::is_relational) => {
                let mut text = format!("{}:", call.operator());
                if let Some(alias) = call.alias_name() {
                    let _ = write!(text, " {}", alias);
                }
                line(text);
                for operand in call.operands().iter().filter(|o| o.is_relational()) {
                    operand.fmt_indent(depth + 1, out);
                }
            }
            other => line(other.to_string()),
        }
    }
}
