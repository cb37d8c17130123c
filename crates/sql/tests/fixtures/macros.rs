/// Run `$body` with a fresh conversion context over the standard registry.
macro_rules! with_context {
    ($ctx:ident, $body:block) => {
        let config = $crate::fixtures::CompilerConfig::default();
        #[allow(unused_mut)]
        let mut $ctx = $crate::fixtures::ConversionContext::new(
            $crate::fixtures::ConverterRegistry::standard(),
            &config,
        );
        $body
    };
}

/// Convert a statement with the default engine and compare its compact rendering.
macro_rules! assert_converts {
    ($statement:expr, $expected:expr) => {
        let statement: $crate::fixtures::Statement = $statement.into();
        let node = $crate::fixtures::SqlFederationConverter::default()
            .convert(&statement)
            .unwrap_or_else(|e| panic!("conversion failed: {}", e));
        assert_eq!(node.to_string(), $expected);
    };
}
