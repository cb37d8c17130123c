use crate::converter::{ConversionContext, ConvertResult, SegmentConverter};
use crate::rel::RelNode;
use sqlfed_segment::ColumnSegment;

/// `[owner.]name` → `Identifier([owner, name])`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ColumnConverter;

impl SegmentConverter<ColumnSegment> for ColumnConverter {
    fn convert(
        &self,
        ctx: &mut ConversionContext<'_>,
        segment: Option<&ColumnSegment>,
    ) -> ConvertResult<Option<RelNode>> {
        let Some(segment) = segment else {
            return Ok(None);
        };

        if let Some(owner) = &segment.owner {
            match ctx.qualifier_depth(owner) {
                Some(0) | None => {}
                Some(depth) => {
                    tracing::debug!(
                        target: "sqlfed::converter",
                        owner = %owner,
                        column = %segment.name,
                        depth,
                        "Correlated column reference"
                    );
                }
            }
        }

        Ok(Some(RelNode::qualified_identifier(
            segment.qualified_name(),
            segment.span,
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::converter::ConverterRegistry;
    use sqlfed_common::CompilerConfig;

    #[test]
    fn test_column_identifiers() {
        let config = CompilerConfig::default();
        let mut ctx = ConversionContext::new(ConverterRegistry::standard(), &config);

        let bare = ColumnConverter
            .convert(&mut ctx, Some(&ColumnSegment::new("user_id")))
            .unwrap()
            .unwrap();
        assert_eq!(bare.to_string(), "user_id");

        let qualified = ColumnConverter
            .convert(&mut ctx, Some(&ColumnSegment::new("user_id").with_owner("o")))
            .unwrap()
            .unwrap();
        assert_eq!(
            qualified,
            RelNode::qualified_identifier(vec!["o".into(), "user_id".into()], Default::default())
        );

        assert_eq!(ColumnConverter.convert(&mut ctx, None).unwrap(), None);
    }
}
