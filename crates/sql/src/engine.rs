//! Statement conversion entry point.
//!
//! [`SqlFederationConverter`] owns a compiler configuration and a converter registry and
//! turns one parsed [`Statement`] at a time into a relational tree. It holds no per-call
//! state, so a single instance can be shared across threads.

use std::borrow::Cow;

use sqlfed_common::CompilerConfig;
use sqlfed_segment::Statement;

use crate::converter::{ConversionContext, ConvertError, ConvertResult, ConverterRegistry};
use crate::rel::RelNode;

#[derive(Debug, Clone)]
pub struct SqlFederationConverter {
    config: CompilerConfig,
    registry: Cow<'static, ConverterRegistry>,
}

impl SqlFederationConverter {
    /// Converter backed by the shared standard registry.
    pub fn new(config: CompilerConfig) -> Self {
        Self {
            config,
            registry: Cow::Borrowed(ConverterRegistry::standard()),
        }
    }

    pub fn with_registry(config: CompilerConfig, registry: ConverterRegistry) -> Self {
        Self {
            config,
            registry: Cow::Owned(registry),
        }
    }

    pub fn config(&self) -> &CompilerConfig {
        &self.config
    }

    pub fn registry(&self) -> &ConverterRegistry {
        &self.registry
    }

    /// Raw conversion result: `Ok(None)` when the statement converts to nothing.
    pub fn try_convert(&self, statement: &Statement) -> ConvertResult<Option<RelNode>> {
        let mut ctx = ConversionContext::new(&self.registry, &self.config);
        ctx.convert_statement(Some(statement))
    }

    /// Converts a statement, mapping failures to [`sqlfed_error::SqlFedError`].
    pub fn convert(&self, statement: &Statement) -> sqlfed_error::Result<RelNode> {
        let kind = statement.kind();
        tracing::debug!(target: "sqlfed::converter", %kind, span = %statement.span(), "Converting statement");

        let result = self.try_convert(statement).and_then(|node| {
            node.ok_or(ConvertError::EmptyClause {
                clause: "STATEMENT",
                span: statement.span(),
            })
        });

        match result {
            Ok(node) => {
                tracing::debug!(target: "sqlfed::converter", %kind, plan = %node, "Converted statement");
                Ok(node)
            }
            Err(err) => {
                if err.is_fatal() {
                    tracing::error!(target: "sqlfed::converter", %kind, error = %err, "Converter set cannot handle statement");
                } else {
                    tracing::debug!(target: "sqlfed::converter", %kind, error = %err, "Statement conversion failed");
                }
                Err(err.to_sqlfed_error())
            }
        }
    }
}

impl Default for SqlFederationConverter {
    fn default() -> Self {
        Self::new(CompilerConfig::default())
    }
}
