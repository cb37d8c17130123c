use crate::converter::error::{ConvertError, ConvertResult};
use crate::converter::registry::{ConverterRegistry, Dispatchable, DispatchTable};
use crate::rel::{OperatorTable, RelNode};
use sqlfed_common::CompilerConfig;
use sqlfed_segment::{
    ExpressionSegment, ProjectionSegment, SegmentKind, SelectStatement, Statement, TableSegment,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Bindings visible inside one SELECT.
#[derive(Debug, Clone, Default)]
pub struct Scope {
    /// Table and subquery aliases bound by the FROM clause.
    pub aliases: Vec<String>,
    /// 0-based position of the projection currently being converted.
    pub projection_ordinal: usize,
}

/// Represents a state in the scope stack that can be rolled back to.
pub struct Checkpoint {
    pub(crate) stack_len: usize,
}

pub(crate) struct RecursionGuard {
    level: Arc<AtomicUsize>,
}

impl RecursionGuard {
    pub(crate) fn new(level: Arc<AtomicUsize>, max_depth: usize) -> ConvertResult<Self> {
        let current = level.fetch_add(1, Ordering::SeqCst);
        if current >= max_depth {
            level.fetch_sub(1, Ordering::SeqCst);
            return Err(ConvertError::MaxRecursion(max_depth));
        }
        Ok(Self { level })
    }
}

impl Drop for RecursionGuard {
    fn drop(&mut self) {
        self.level.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Per-statement conversion state.
///
/// Converters themselves are stateless; everything that varies during one descent lives
/// here. All recursive delegation goes through the `convert_*` methods, which consult the
/// registry, guard the depth and maintain the segment path.
pub struct ConversionContext<'r> {
    registry: &'r ConverterRegistry,
    config: &'r CompilerConfig,
    recursion_level: Arc<AtomicUsize>,
    path: Vec<SegmentKind>,
    scope_stack: Vec<Scope>,
}

impl<'r> ConversionContext<'r> {
    pub fn new(registry: &'r ConverterRegistry, config: &'r CompilerConfig) -> Self {
        Self {
            registry,
            config,
            recursion_level: Arc::new(AtomicUsize::new(0)),
            path: Vec::new(),
            scope_stack: Vec::new(),
        }
    }

    pub fn config(&self) -> &CompilerConfig {
        self.config
    }

    pub fn operators(&self) -> &OperatorTable {
        self.registry.operators()
    }

    pub fn depth(&self) -> usize {
        self.recursion_level.load(Ordering::SeqCst)
    }

    /// Segment kinds from the statement root down to the segment being converted.
    pub fn segment_path(&self) -> &[SegmentKind] {
        &self.path
    }

    fn dispatch<S: Dispatchable>(
        &mut self,
        table: &DispatchTable<S>,
        segment: &S,
    ) -> ConvertResult<Option<RelNode>> {
        let _guard = RecursionGuard::new(self.recursion_level.clone(), self.config.max_depth)?;
        let kind = segment.kind();

        tracing::trace!(target: "sqlfed::converter", %kind, depth = self.depth(), "Converting segment");

        self.path.push(kind);
        let result = (table.resolve(kind))(self, segment);
        self.path.pop();
        result
    }

    pub fn convert_table(
        &mut self,
        segment: Option<&TableSegment>,
    ) -> ConvertResult<Option<RelNode>> {
        let Some(segment) = segment else {
            return Ok(None);
        };
        let registry = self.registry;
        self.dispatch(registry.tables(), segment)
    }

    pub fn convert_projection(
        &mut self,
        segment: Option<&ProjectionSegment>,
    ) -> ConvertResult<Option<RelNode>> {
        let Some(segment) = segment else {
            return Ok(None);
        };
        let registry = self.registry;
        self.dispatch(registry.projections(), segment)
    }

    pub fn convert_expression(
        &mut self,
        segment: Option<&ExpressionSegment>,
    ) -> ConvertResult<Option<RelNode>> {
        let Some(segment) = segment else {
            return Ok(None);
        };
        let registry = self.registry;
        self.dispatch(registry.expressions(), segment)
    }

    pub fn convert_statement(
        &mut self,
        segment: Option<&Statement>,
    ) -> ConvertResult<Option<RelNode>> {
        let Some(segment) = segment else {
            return Ok(None);
        };
        let registry = self.registry;
        self.dispatch(registry.statements(), segment)
    }

    /// Full recursive conversion of a nested SELECT.
    pub fn convert_select(
        &mut self,
        segment: Option<&SelectStatement>,
    ) -> ConvertResult<Option<RelNode>> {
        let Some(segment) = segment else {
            return Ok(None);
        };
        let _guard = RecursionGuard::new(self.recursion_level.clone(), self.config.max_depth)?;

        tracing::trace!(target: "sqlfed::converter", kind = %SegmentKind::SelectStatement, depth = self.depth(), "Converting nested select");

        self.path.push(SegmentKind::SelectStatement);
        let result = (self.registry.select_converter())(self, segment);
        self.path.pop();
        result
    }

    /// Converts every expression, failing when any of them converts to nothing.
    pub fn convert_expressions(
        &mut self,
        segments: &[ExpressionSegment],
        owner: SegmentKind,
    ) -> ConvertResult<Option<Vec<RelNode>>> {
        let mut nodes = Vec::with_capacity(segments.len());
        for segment in segments {
            match self.convert_expression(Some(segment))? {
                Some(node) => nodes.push(node),
                None => {
                    tracing::debug!(target: "sqlfed::converter", %owner, operand = %segment.kind(), "Operand converted to nothing");
                    return Ok(None);
                }
            }
        }
        Ok(Some(nodes))
    }

    /// Run `f` inside a fresh SELECT scope, discarding any scopes it leaves behind.
    pub fn scoped<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> ConvertResult<T>,
    ) -> ConvertResult<T> {
        let checkpoint = self.checkpoint();
        self.push_scope();
        let result = f(self);
        self.rollback(checkpoint);
        result
    }

    pub fn push_scope(&mut self) {
        self.scope_stack.push(Scope::default());
        tracing::trace!(target: "sqlfed::converter", stack_len = self.scope_stack.len(), "Pushed scope");
    }

    pub fn current_scope(&self) -> Option<&Scope> {
        self.scope_stack.last()
    }

    pub fn scope_stack_len(&self) -> usize {
        self.scope_stack.len()
    }

    /// Create a checkpoint of the current scope stack state.
    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            stack_len: self.scope_stack.len(),
        }
    }

    /// Roll back the scope stack to a previously created checkpoint.
    pub fn rollback(&mut self, checkpoint: Checkpoint) {
        if self.scope_stack.len() > checkpoint.stack_len {
            let diff = self.scope_stack.len() - checkpoint.stack_len;
            tracing::trace!(target: "sqlfed::converter", count = diff, "Rolling back scopes");
            self.scope_stack.truncate(checkpoint.stack_len);
        }
    }

    /// Record an alias bound by the FROM clause of the current SELECT.
    pub fn bind_alias(&mut self, alias: &str) {
        if let Some(scope) = self.scope_stack.last_mut() {
            scope.aliases.push(alias.to_string());
        }
    }

    pub fn set_projection_ordinal(&mut self, ordinal: usize) {
        if let Some(scope) = self.scope_stack.last_mut() {
            scope.projection_ordinal = ordinal;
        }
    }

    pub fn projection_ordinal(&self) -> usize {
        self.current_scope()
            .map(|s| s.projection_ordinal)
            .unwrap_or_default()
    }

    /// How many SELECT levels out `owner` is bound: 0 for the current SELECT, more for
    /// correlated references. `None` when no enclosing SELECT binds it.
    pub fn qualifier_depth(&self, owner: &str) -> Option<usize> {
        self.scope_stack
            .iter()
            .rev()
            .position(|scope| scope.aliases.iter().any(|a| a.eq_ignore_ascii_case(owner)))
    }

    /// `<prefix><ordinal>` name for an unaliased projection, when derivation is enabled.
    pub fn anonymous_alias(&self) -> Option<String> {
        if !self.config.derive_anonymous_aliases {
            return None;
        }
        Some(format!(
            "{}{}",
            self.config.anonymous_alias_prefix,
            self.projection_ordinal()
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recursion_guard_limits_depth() {
        let level = Arc::new(AtomicUsize::new(0));
        let first = RecursionGuard::new(level.clone(), 2).unwrap();
        let second = RecursionGuard::new(level.clone(), 2).unwrap();
        assert_eq!(
            RecursionGuard::new(level.clone(), 2).err(),
            Some(ConvertError::MaxRecursion(2))
        );
        drop(second);
        drop(first);
        assert_eq!(level.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_qualifier_depth_across_scopes() {
        let registry = ConverterRegistry::standard();
        let config = CompilerConfig::default();
        let mut ctx = ConversionContext::new(registry, &config);

        ctx.push_scope();
        ctx.bind_alias("o");
        ctx.push_scope();
        ctx.bind_alias("i");

        assert_eq!(ctx.qualifier_depth("i"), Some(0));
        assert_eq!(ctx.qualifier_depth("O"), Some(1));
        assert_eq!(ctx.qualifier_depth("missing"), None);
    }

    #[test]
    fn test_checkpoint_rollback() {
        let registry = ConverterRegistry::standard();
        let config = CompilerConfig::default();
        let mut ctx = ConversionContext::new(registry, &config);

        ctx.push_scope();
        let checkpoint = ctx.checkpoint();
        ctx.push_scope();
        ctx.push_scope();
        assert_eq!(ctx.scope_stack_len(), 3);
        ctx.rollback(checkpoint);
        assert_eq!(ctx.scope_stack_len(), 1);
    }

    #[test]
    fn test_anonymous_alias_follows_config() {
        let registry = ConverterRegistry::standard();
        let mut config = CompilerConfig::default();
        {
            let mut ctx = ConversionContext::new(registry, &config);
            ctx.push_scope();
            ctx.set_projection_ordinal(2);
            assert_eq!(ctx.anonymous_alias(), Some("EXPR$2".to_string()));
        }

        config.derive_anonymous_aliases = false;
        let ctx = ConversionContext::new(registry, &config);
        assert_eq!(ctx.anonymous_alias(), None);
    }
}
