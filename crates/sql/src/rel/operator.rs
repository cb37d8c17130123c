//! Operator vocabulary
//!
//! The operator names rendered here are the contract with the optimizer, which recognises
//! calls by name. Renaming a variant's `name()` is a breaking change downstream.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

/// Built-in scalar functions with a fixed relational mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltinFunction {
    Coalesce,
    NullIf,
    Upper,
    Lower,
    Abs,
    CharLength,
    Substring,
    Trim,
    Round,
    Floor,
    Ceil,
    CurrentTimestamp,
}

impl BuiltinFunction {
    pub const ALL: [BuiltinFunction; 12] = [
        BuiltinFunction::Coalesce,
        BuiltinFunction::NullIf,
        BuiltinFunction::Upper,
        BuiltinFunction::Lower,
        BuiltinFunction::Abs,
        BuiltinFunction::CharLength,
        BuiltinFunction::Substring,
        BuiltinFunction::Trim,
        BuiltinFunction::Round,
        BuiltinFunction::Floor,
        BuiltinFunction::Ceil,
        BuiltinFunction::CurrentTimestamp,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            BuiltinFunction::Coalesce => "COALESCE",
            BuiltinFunction::NullIf => "NULLIF",
            BuiltinFunction::Upper => "UPPER",
            BuiltinFunction::Lower => "LOWER",
            BuiltinFunction::Abs => "ABS",
            BuiltinFunction::CharLength => "CHAR_LENGTH",
            BuiltinFunction::Substring => "SUBSTRING",
            BuiltinFunction::Trim => "TRIM",
            BuiltinFunction::Round => "ROUND",
            BuiltinFunction::Floor => "FLOOR",
            BuiltinFunction::Ceil => "CEIL",
            BuiltinFunction::CurrentTimestamp => "CURRENT_TIMESTAMP",
        }
    }

    fn arity(&self) -> Arity {
        match self {
            BuiltinFunction::Coalesce => Arity::AtLeast(1),
            BuiltinFunction::NullIf => Arity::Exact(2),
            BuiltinFunction::Upper
            | BuiltinFunction::Lower
            | BuiltinFunction::Abs
            | BuiltinFunction::CharLength
            | BuiltinFunction::Trim
            | BuiltinFunction::Floor
            | BuiltinFunction::Ceil => Arity::Exact(1),
            BuiltinFunction::Substring => Arity::Between(2, 3),
            BuiltinFunction::Round => Arity::Between(1, 2),
            BuiltinFunction::CurrentTimestamp => Arity::Between(0, 1),
        }
    }
}

/// Operand count an operator accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Exact(usize),
    Between(usize, usize),
    AtLeast(usize),
}

impl Arity {
    pub fn accepts(&self, count: usize) -> bool {
        match *self {
            Arity::Exact(n) => count == n,
            Arity::Between(min, max) => (min..=max).contains(&count),
            Arity::AtLeast(min) => count >= min,
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arity::Exact(n) => write!(f, "{}", n),
            Arity::Between(min, max) => write!(f, "{} or {}", min, max),
            Arity::AtLeast(min) => write!(f, "at least {}", min),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum Operator {
    // structural
    As,
    ExplicitTable,

    // logical
    And,
    Or,
    Not,
    Xor,

    // comparison
    Equals,
    NotEquals,
    LessThan,
    LessThanOrEqual,
    GreaterThan,
    GreaterThanOrEqual,
    IsNotDistinctFrom,
    IsDistinctFrom,

    // null-sensitive postfix
    IsNull,
    IsNotNull,
    IsTrue,
    IsNotTrue,
    IsFalse,
    IsNotFalse,

    // arithmetic / string
    Plus,
    Minus,
    Multiply,
    Divide,
    Mod,
    Concat,
    Like,
    NotLike,

    // membership / range
    In,
    NotIn,
    Between,
    NotBetween,

    // subqueries
    Exists,
    ScalarQuery,

    // conditional
    Case,
    SimpleCase,

    // ordering
    Desc,
    NullsFirst,
    NullsLast,

    // aggregates
    Count,
    Sum,
    Avg,
    Min,
    Max,

    Builtin(BuiltinFunction),
    /// Function the compiler has no mapping for; resolved by the optimizer's catalog.
    Function(String),
}

impl Operator {
    pub fn name(&self) -> &str {
        match self {
            Operator::As => "AS",
            Operator::ExplicitTable => "EXPLICIT_TABLE",
            Operator::And => "AND",
            Operator::Or => "OR",
            Operator::Not => "NOT",
            Operator::Xor => "XOR",
            Operator::Equals => "EQUALS",
            Operator::NotEquals => "NOT_EQUALS",
            Operator::LessThan => "LESS_THAN",
            Operator::LessThanOrEqual => "LESS_THAN_OR_EQUAL",
            Operator::GreaterThan => "GREATER_THAN",
            Operator::GreaterThanOrEqual => "GREATER_THAN_OR_EQUAL",
            Operator::IsNotDistinctFrom => "IS_NOT_DISTINCT_FROM",
            Operator::IsDistinctFrom => "IS_DISTINCT_FROM",
            Operator::IsNull => "IS_NULL",
            Operator::IsNotNull => "IS_NOT_NULL",
            Operator::IsTrue => "IS_TRUE",
            Operator::IsNotTrue => "IS_NOT_TRUE",
            Operator::IsFalse => "IS_FALSE",
            Operator::IsNotFalse => "IS_NOT_FALSE",
            Operator::Plus => "PLUS",
            Operator::Minus => "MINUS",
            Operator::Multiply => "MULTIPLY",
            Operator::Divide => "DIVIDE",
            Operator::Mod => "MOD",
            Operator::Concat => "CONCAT",
            Operator::Like => "LIKE",
            Operator::NotLike => "NOT_LIKE",
            Operator::In => "IN",
            Operator::NotIn => "NOT_IN",
            Operator::Between => "BETWEEN",
            Operator::NotBetween => "NOT_BETWEEN",
            Operator::Exists => "EXISTS",
            Operator::ScalarQuery => "SCALAR_QUERY",
            Operator::Case => "CASE",
            Operator::SimpleCase => "SIMPLE_CASE",
            Operator::Desc => "DESC",
            Operator::NullsFirst => "NULLS_FIRST",
            Operator::NullsLast => "NULLS_LAST",
            Operator::Count => "COUNT",
            Operator::Sum => "SUM",
            Operator::Avg => "AVG",
            Operator::Min => "MIN",
            Operator::Max => "MAX",
            Operator::Builtin(f) => f.name(),
            Operator::Function(name) => name.as_str(),
        }
    }

    /// Operand counts a well-formed call with this operator carries.
    pub fn arity(&self) -> Arity {
        match self {
            Operator::As => Arity::Between(1, 2),
            Operator::ExplicitTable
            | Operator::Not
            | Operator::IsNull
            | Operator::IsNotNull
            | Operator::IsTrue
            | Operator::IsNotTrue
            | Operator::IsFalse
            | Operator::IsNotFalse
            | Operator::Exists
            | Operator::ScalarQuery
            | Operator::Desc
            | Operator::NullsFirst
            | Operator::NullsLast
            | Operator::Sum
            | Operator::Avg
            | Operator::Min
            | Operator::Max => Arity::Exact(1),
            Operator::And | Operator::Or | Operator::Concat => Arity::AtLeast(2),
            Operator::Xor
            | Operator::Equals
            | Operator::NotEquals
            | Operator::LessThan
            | Operator::LessThanOrEqual
            | Operator::GreaterThan
            | Operator::GreaterThanOrEqual
            | Operator::IsNotDistinctFrom
            | Operator::IsDistinctFrom
            | Operator::Plus
            | Operator::Minus
            | Operator::Multiply
            | Operator::Divide
            | Operator::Mod
            | Operator::Like
            | Operator::NotLike
            | Operator::In
            | Operator::NotIn => Arity::Exact(2),
            Operator::Between | Operator::NotBetween => Arity::Exact(3),
            // WHEN/THEN pairs plus ELSE, with the operand first for SIMPLE_CASE
            Operator::Case => Arity::AtLeast(3),
            Operator::SimpleCase => Arity::AtLeast(4),
            Operator::Count => Arity::AtLeast(1),
            Operator::Builtin(f) => f.arity(),
            Operator::Function(_) => Arity::AtLeast(0),
        }
    }

    pub fn is_aggregate(&self) -> bool {
        matches!(
            self,
            Operator::Count | Operator::Sum | Operator::Avg | Operator::Min | Operator::Max
        )
    }

    fn fixed() -> impl Iterator<Item = Operator> {
        [
            Operator::As,
            Operator::ExplicitTable,
            Operator::And,
            Operator::Or,
            Operator::Not,
            Operator::Xor,
            Operator::Equals,
            Operator::NotEquals,
            Operator::LessThan,
            Operator::LessThanOrEqual,
            Operator::GreaterThan,
            Operator::GreaterThanOrEqual,
            Operator::IsNotDistinctFrom,
            Operator::IsDistinctFrom,
            Operator::IsNull,
            Operator::IsNotNull,
            Operator::IsTrue,
            Operator::IsNotTrue,
            Operator::IsFalse,
            Operator::IsNotFalse,
            Operator::Plus,
            Operator::Minus,
            Operator::Multiply,
            Operator::Divide,
            Operator::Mod,
            Operator::Concat,
            Operator::Like,
            Operator::NotLike,
            Operator::In,
            Operator::NotIn,
            Operator::Between,
            Operator::NotBetween,
            Operator::Exists,
            Operator::ScalarQuery,
            Operator::Case,
            Operator::SimpleCase,
            Operator::Desc,
            Operator::NullsFirst,
            Operator::NullsLast,
            Operator::Count,
            Operator::Sum,
            Operator::Avg,
            Operator::Min,
            Operator::Max,
        ]
        .into_iter()
        .chain(BuiltinFunction::ALL.into_iter().map(Operator::Builtin))
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<Operator> for String {
    fn from(op: Operator) -> String {
        op.name().to_string()
    }
}

/// Names outside the fixed vocabulary come back as unresolved functions.
impl From<String> for Operator {
    fn from(name: String) -> Self {
        Operator::fixed()
            .find(|op| op.name() == name)
            .unwrap_or(Operator::Function(name))
    }
}

fn normalize(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_ascii_uppercase()
}

/// Case-insensitive lookup from source operator text and function names to [`Operator`].
///
/// Binary operator text with no entry is unresolvable (the caller reports it), while
/// function names fall back to [`Operator::Function`].
#[derive(Debug, Clone, Default)]
pub struct OperatorTable {
    binary: HashMap<String, Operator>,
    functions: HashMap<String, Operator>,
}

impl OperatorTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn binary(mut self, text: &str, op: Operator) -> Self {
        self.binary.insert(normalize(text), op);
        self
    }

    pub fn function(mut self, name: &str, op: Operator) -> Self {
        self.functions.insert(normalize(name), op);
        self
    }

    /// Shared table covering the MySQL, PostgreSQL and SQL:2016 operator spellings.
    pub fn standard() -> &'static OperatorTable {
        static STANDARD: OnceLock<OperatorTable> = OnceLock::new();

        STANDARD.get_or_init(|| {
            let mut table = OperatorTable::new()
                .binary("=", Operator::Equals)
                .binary("==", Operator::Equals)
                .binary("<>", Operator::NotEquals)
                .binary("!=", Operator::NotEquals)
                .binary("<", Operator::LessThan)
                .binary("<=", Operator::LessThanOrEqual)
                .binary(">", Operator::GreaterThan)
                .binary(">=", Operator::GreaterThanOrEqual)
                .binary("<=>", Operator::IsNotDistinctFrom)
                .binary("IS NOT DISTINCT FROM", Operator::IsNotDistinctFrom)
                .binary("IS DISTINCT FROM", Operator::IsDistinctFrom)
                .binary("AND", Operator::And)
                .binary("&&", Operator::And)
                .binary("OR", Operator::Or)
                .binary("XOR", Operator::Xor)
                .binary("+", Operator::Plus)
                .binary("-", Operator::Minus)
                .binary("*", Operator::Multiply)
                .binary("/", Operator::Divide)
                .binary("%", Operator::Mod)
                .binary("MOD", Operator::Mod)
                .binary("||", Operator::Concat)
                .binary("LIKE", Operator::Like)
                .binary("NOT LIKE", Operator::NotLike)
                .function("ifnull", Operator::Builtin(BuiltinFunction::Coalesce))
                .function("nvl", Operator::Builtin(BuiltinFunction::Coalesce))
                .function("character_length", Operator::Builtin(BuiltinFunction::CharLength))
                .function("substr", Operator::Builtin(BuiltinFunction::Substring))
                .function("ucase", Operator::Builtin(BuiltinFunction::Upper))
                .function("lcase", Operator::Builtin(BuiltinFunction::Lower))
                .function("ceiling", Operator::Builtin(BuiltinFunction::Ceil))
                .function("now", Operator::Builtin(BuiltinFunction::CurrentTimestamp))
                .function("concat", Operator::Concat)
                .function("count", Operator::Count)
                .function("sum", Operator::Sum)
                .function("avg", Operator::Avg)
                .function("min", Operator::Min)
                .function("max", Operator::Max);

            for builtin in BuiltinFunction::ALL {
                table = table.function(builtin.name(), Operator::Builtin(builtin));
            }
            table
        })
    }

    pub fn resolve_binary(&self, text: &str) -> Option<Operator> {
        self.binary.get(&normalize(text)).cloned()
    }

    pub fn resolve_function(&self, name: &str) -> Operator {
        let key = normalize(name);
        match self.functions.get(&key) {
            Some(op) => op.clone(),
            None => Operator::Function(key),
        }
    }

    pub fn has_function(&self, name: &str) -> bool {
        self.functions.contains_key(&normalize(name))
    }

    /// Binary operator spellings, sorted, for diagnostics.
    pub fn binary_operators(&self) -> Vec<String> {
        let mut ops: Vec<String> = self.binary.keys().cloned().collect();
        ops.sort();
        ops
    }
}
