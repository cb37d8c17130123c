use crate::rel::{ArityError, OperatorTable};
use sqlfed_error::{find_closest_match, ErrorCode, ErrorContext, SqlFedError};
use sqlfed_segment::{SegmentKind, Span};
use thiserror::Error;

pub type ConvertResult<T> = Result<T, ConvertError>;

fn format_path(path: &[SegmentKind]) -> String {
    path.iter()
        .map(SegmentKind::as_str)
        .collect::<Vec<_>>()
        .join(" > ")
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConvertError {
    #[error("No converter registered for segment kind {kind} at {span} (path: {})", format_path(.path))]
    UnsupportedSegment {
        kind: SegmentKind,
        span: Span,
        path: Vec<SegmentKind>,
    },

    #[error("Converter for {expected} was dispatched a {actual} segment")]
    ConverterMismatch {
        expected: SegmentKind,
        actual: SegmentKind,
    },

    #[error("Unsupported operator '{operator}' in {expression} at {span}")]
    UnsupportedOperator {
        operator: String,
        expression: String,
        span: Span,
    },

    #[error("Malformed {kind} segment at {span}: {message}")]
    MalformedSegment {
        kind: SegmentKind,
        message: String,
        span: Span,
    },

    #[error("{clause} clause at {span} produced no relational node")]
    EmptyClause { clause: &'static str, span: Span },

    #[error("Unsupported feature at {span}: {feature}")]
    Unsupported { feature: String, span: Span },

    #[error("Maximum recursion depth ({0}) exceeded")]
    MaxRecursion(usize),

    #[error("Converter produced an invalid call: {0}")]
    InvalidArity(#[from] ArityError),
}

impl ConvertError {
    /// Fatal errors mean the converter set is out of sync with the segment model; they are
    /// never caused by the statement being converted.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            ConvertError::UnsupportedSegment { .. }
                | ConvertError::ConverterMismatch { .. }
                | ConvertError::InvalidArity(_)
        )
    }

    pub fn to_sqlfed_error(self) -> SqlFedError {
        match self {
            ConvertError::UnsupportedSegment { kind, span, path } => SqlFedError::new(
                ErrorCode::UnsupportedSegment,
                format!(
                    "No converter registered for segment kind '{}' at {}",
                    kind, span
                ),
            )
            .with_segment(
                kind.to_string(),
                span.start,
                span.stop,
                path.iter().map(ToString::to_string).collect(),
            )
            .with_hint("The converter registry is out of sync with the segment model; register a converter for this kind"),
            ConvertError::ConverterMismatch { expected, actual } => SqlFedError::new(
                ErrorCode::ConverterMismatch,
                format!(
                    "Converter for '{}' was dispatched a '{}' segment",
                    expected, actual
                ),
            )
            .with_hint("Check the registry wiring for this segment kind"),
            ConvertError::UnsupportedOperator {
                operator,
                expression,
                span: _,
            } => {
                let supported = OperatorTable::standard().binary_operators();
                let hint = match find_closest_match(&operator, &supported) {
                    Some(candidate) => format!("Did you mean '{}'?", candidate),
                    None => "Rewrite the predicate using a supported operator".to_string(),
                };
                SqlFedError::new(
                    ErrorCode::UnsupportedOperator,
                    format!("Operator '{}' has no relational mapping", operator),
                )
                .with_context(ErrorContext::Operator {
                    operator,
                    expression,
                    supported,
                })
                .with_hint(hint)
            }
            ConvertError::MalformedSegment {
                kind,
                message,
                span,
            } => SqlFedError::new(
                ErrorCode::MalformedSegment,
                format!("Malformed {} segment: {}", kind, message),
            )
            .with_segment(kind.to_string(), span.start, span.stop, vec![])
            .with_hint("The parser produced a segment tree that violates its structural contract"),
            ConvertError::EmptyClause { clause, span } => SqlFedError::new(
                ErrorCode::EmptyClause,
                format!("{} clause produced no relational node", clause),
            )
            .with_segment(clause, span.start, span.stop, vec![])
            .with_hint("A subquery without projections must still name a table source"),
            ConvertError::Unsupported { feature, span } => SqlFedError::new(
                ErrorCode::UnsupportedFeature,
                format!("Not supported by the federation compiler: {}", feature),
            )
            .with_segment("Statement", span.start, span.stop, vec![])
            .with_hint("Route this statement to a single data source instead of federating it"),
            ConvertError::MaxRecursion(limit) => SqlFedError::new(
                ErrorCode::RecursionLimit,
                format!("Maximum recursion depth ({}) exceeded", limit),
            )
            .with_context(ErrorContext::Recursion { limit })
            .with_hint("Flatten nested subqueries or raise compiler.max_depth"),
            ConvertError::InvalidArity(e) => {
                SqlFedError::new(ErrorCode::InternalPanic, e.to_string())
                    .with_hint("A converter assembled a call with the wrong number of operands")
            }
        }
    }
}

impl From<ConvertError> for SqlFedError {
    fn from(err: ConvertError) -> Self {
        err.to_sqlfed_error()
    }
}
