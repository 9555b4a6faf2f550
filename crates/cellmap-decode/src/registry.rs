//! Type-name → decoder resolution.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::Decoder;
use crate::builtin::{
    BooleanDecoder, DoubleDecoder, FloatDecoder, IntDecoder, LongDecoder, PassThroughDecoder,
    ShortDecoder, Utf8Decoder,
};

/// Reserved name of the pass-through decoder; also the default `type` for
/// mappings that do not name one.
pub const PASS_THROUGH: &str = "bytes";

/// Resolves decoder type names to decoder instances.
///
/// The default registry carries the built-in decoder set. Callers may
/// register additional decoders under their own names before compiling
/// mapping rules; resolution happens once per rule at compile time.
#[derive(Clone)]
pub struct DecoderRegistry {
    decoders: BTreeMap<String, Arc<dyn Decoder>>,
}

impl Default for DecoderRegistry {
    fn default() -> Self {
        let mut registry = Self::empty();
        registry.register(PASS_THROUGH, Arc::new(PassThroughDecoder));
        registry.register("string", Arc::new(Utf8Decoder));
        registry.register("short", Arc::new(ShortDecoder));
        registry.register("int", Arc::new(IntDecoder));
        registry.register("long", Arc::new(LongDecoder));
        registry.register("float", Arc::new(FloatDecoder));
        registry.register("double", Arc::new(DoubleDecoder));
        registry.register("boolean", Arc::new(BooleanDecoder));
        registry
    }
}

impl DecoderRegistry {
    /// A registry with no decoders at all, not even the pass-through.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            decoders: BTreeMap::new(),
        }
    }

    /// Register `decoder` under `name`, replacing any previous entry.
    pub fn register(&mut self, name: impl Into<String>, decoder: Arc<dyn Decoder>) {
        self.decoders.insert(name.into(), decoder);
    }

    /// Look up a decoder by type name.
    #[must_use]
    pub fn resolve(&self, name: &str) -> Option<Arc<dyn Decoder>> {
        self.decoders.get(name).map(Arc::clone)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.decoders.contains_key(name)
    }

    /// Registered type names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.decoders.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use cellmap_model::Value;

    use super::*;
    use crate::error::Result;

    #[test]
    fn default_registry_has_builtins() {
        let registry = DecoderRegistry::default();
        for name in [
            PASS_THROUGH,
            "string",
            "short",
            "int",
            "long",
            "float",
            "double",
            "boolean",
        ] {
            assert!(registry.contains(name), "missing builtin: {name}");
        }
        assert!(registry.resolve("no-such-type").is_none());
    }

    #[test]
    fn custom_decoders_can_be_registered() {
        struct CommaSplit;

        impl Decoder for CommaSplit {
            fn decode(&self, input: &[u8]) -> Result<Vec<Value>> {
                Ok(String::from_utf8_lossy(input)
                    .split(',')
                    .map(|part| Value::Text(part.to_string()))
                    .collect())
            }
        }

        let mut registry = DecoderRegistry::default();
        registry.register("comma_split", Arc::new(CommaSplit));

        let decoder = registry.resolve("comma_split").unwrap();
        assert_eq!(
            decoder.decode(b"a,b").unwrap(),
            vec![
                Value::Text("a".to_string()),
                Value::Text("b".to_string())
            ]
        );
    }

    #[test]
    fn empty_registry_resolves_nothing() {
        assert!(DecoderRegistry::empty().resolve(PASS_THROUGH).is_none());
    }
}
