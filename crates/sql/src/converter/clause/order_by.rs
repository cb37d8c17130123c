use crate::converter::expression::ColumnConverter;
use crate::converter::{ConversionContext, ConvertError, ConvertResult, SegmentConverter};
use crate::rel::{Call, Operator, RelNode};
use sqlfed_segment::{
    LiteralValue, NullsOrder, OrderByItemSegment, OrderBySegment, OrderDirection, SegmentKind,
};

/// The sort key of an item, without direction or null ordering.
pub(crate) fn item_key(
    ctx: &mut ConversionContext<'_>,
    item: &OrderByItemSegment,
) -> ConvertResult<Option<RelNode>> {
    match item {
        OrderByItemSegment::Column(item) => ColumnConverter.convert(ctx, Some(&item.column)),
        OrderByItemSegment::Expression(item) => ctx.convert_expression(Some(&item.expr)),
        OrderByItemSegment::Index(item) => {
            let index = i64::try_from(item.index).map_err(|_| ConvertError::MalformedSegment {
                kind: SegmentKind::OrderByItem,
                message: format!("ordinal {} is out of range", item.index),
                span: item.span,
            })?;
            Ok(Some(RelNode::literal(LiteralValue::Integer(index), item.span)))
        }
    }
}

/// `x DESC NULLS FIRST` → `NULLS_FIRST(DESC(x))`; ascending keys stay bare.
#[derive(Debug, Clone, Copy, Default)]
pub struct OrderByItemConverter;

impl SegmentConverter<OrderByItemSegment> for OrderByItemConverter {
    fn convert(
        &self,
        ctx: &mut ConversionContext<'_>,
        segment: Option<&OrderByItemSegment>,
    ) -> ConvertResult<Option<RelNode>> {
        let Some(segment) = segment else {
            return Ok(None);
        };
        let Some(mut key) = item_key(ctx, segment)? else {
            return Ok(None);
        };

        if segment.direction() == OrderDirection::Desc {
            key = Call::new(Operator::Desc, vec![key])?.with_span(segment.span()).into();
        }
        key = match segment.nulls_order() {
            Some(NullsOrder::First) => Call::new(Operator::NullsFirst, vec![key])?.into(),
            Some(NullsOrder::Last) => Call::new(Operator::NullsLast, vec![key])?.into(),
            None => key,
        };
        Ok(Some(key))
    }
}

/// ORDER BY → `List` of sort keys; items converting to nothing are dropped.
#[derive(Debug, Clone, Copy, Default)]
pub struct OrderByConverter;

impl SegmentConverter<OrderBySegment> for OrderByConverter {
    fn convert(
        &self,
        ctx: &mut ConversionContext<'_>,
        segment: Option<&OrderBySegment>,
    ) -> ConvertResult<Option<RelNode>> {
        let Some(segment) = segment else {
            return Ok(None);
        };

        let mut items = Vec::with_capacity(segment.items.len());
        for item in &segment.items {
            if let Some(node) = OrderByItemConverter.convert(ctx, Some(item))? {
                items.push(node);
            }
        }
        if items.is_empty() {
            return Ok(None);
        }
        Ok(Some(RelNode::List {
            items,
            span: segment.span,
        }))
    }
}
