use crate::converter::{ConversionContext, ConvertResult, SegmentConverter};
use crate::rel::{Call, RelNode};
use sqlfed_segment::SimpleTableSegment;

/// `t` → `Scan(t)`, `t AS x` → `AS(Scan(t), x)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimpleTableConverter;

impl SegmentConverter<SimpleTableSegment> for SimpleTableConverter {
    fn convert(
        &self,
        ctx: &mut ConversionContext<'_>,
        segment: Option<&SimpleTableSegment>,
    ) -> ConvertResult<Option<RelNode>> {
        let Some(segment) = segment else {
            return Ok(None);
        };

        ctx.bind_alias(segment.binding_name());
        let scan = RelNode::scan(segment.qualified_name(), segment.span);

        match &segment.alias {
            Some(alias) => Ok(Some(Call::aliased(scan, alias.clone()).with_span(segment.span).into())),
            None => Ok(Some(scan)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::converter::ConverterRegistry;
    use sqlfed_common::CompilerConfig;

    #[test]
    fn test_simple_table() {
        let config = CompilerConfig::default();
        let mut ctx = ConversionContext::new(ConverterRegistry::standard(), &config);
        ctx.push_scope();

        let plain = SimpleTableConverter
            .convert(&mut ctx, Some(&SimpleTableSegment::new("t_order").with_owner("db")))
            .unwrap()
            .unwrap();
        assert_eq!(plain.to_string(), "Scan(db.t_order)");

        let aliased = SimpleTableConverter
            .convert(&mut ctx, Some(&SimpleTableSegment::new("t_order").with_alias("o")))
            .unwrap()
            .unwrap();
        assert_eq!(aliased.to_string(), "AS(Scan(t_order), o)");

        assert_eq!(ctx.qualifier_depth("o"), Some(0));
        assert_eq!(ctx.qualifier_depth("t_order"), Some(0));
    }

    #[test]
    fn test_absent_table() {
        let config = CompilerConfig::default();
        let mut ctx = ConversionContext::new(ConverterRegistry::standard(), &config);
        assert_eq!(SimpleTableConverter.convert(&mut ctx, None).unwrap(), None);
    }
}
