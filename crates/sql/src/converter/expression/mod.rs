//! Scalar and predicate expression converters.

mod binary;
mod case_when;
mod column;
mod function;
mod literal;
mod predicate;
mod subquery;

pub use binary::BinaryOperationConverter;
pub use case_when::CaseWhenConverter;
pub use column::ColumnConverter;
pub use function::{AggregationExpressionConverter, FunctionConverter};
pub use literal::{LiteralExpressionConverter, ParameterMarkerConverter};
pub use predicate::{
    BetweenExpressionConverter, InExpressionConverter, ListExpressionConverter,
    NotExpressionConverter,
};
pub use subquery::{ExistsSubqueryConverter, SubqueryExpressionConverter};

use crate::converter::{ConversionContext, ConvertResult, SegmentConverter};
use crate::rel::RelNode;
use sqlfed_segment::ExpressionSegment;

/// Converts any expression by dispatching on its variant.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExpressionConverter;

impl SegmentConverter<ExpressionSegment> for ExpressionConverter {
    fn convert(
        &self,
        ctx: &mut ConversionContext<'_>,
        segment: Option<&ExpressionSegment>,
    ) -> ConvertResult<Option<RelNode>> {
        ctx.convert_expression(segment)
    }
}
