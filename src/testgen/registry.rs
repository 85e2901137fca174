use super::frameworks::{BuiltinGenerator, Framework};
use super::TestcaseGenerator;
use crate::error::{MorphError, Result};
use std::collections::BTreeMap;
use std::fmt;

/// Code generators keyed by lower-cased framework identifier.
#[derive(Default)]
pub struct GeneratorRegistry {
    generators: BTreeMap<String, Box<dyn TestcaseGenerator>>,
}

impl fmt::Debug for GeneratorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeneratorRegistry")
            .field("frameworks", &self.generators.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl GeneratorRegistry {
    /// An empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry with the `weka`, `sklearn` and `spark` generators.
    ///
    /// # Errors
    ///
    /// Returns [`MorphError::Template`] if a built-in template does not
    /// compile.
    pub fn with_builtin() -> Result<Self> {
        let mut registry = Self::new();
        for framework in Framework::all() {
            registry.register(Box::new(BuiltinGenerator::new(*framework)?));
        }
        Ok(registry)
    }

    /// Register `generator` under its framework id, returning the generator
    /// it replaces.
    pub fn register(
        &mut self,
        generator: Box<dyn TestcaseGenerator>,
    ) -> Option<Box<dyn TestcaseGenerator>> {
        self.generators
            .insert(generator.framework().to_lowercase(), generator)
    }

    /// Generator for `framework`, matched case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns [`MorphError::UnknownFramework`] if none is registered.
    pub fn get(&self, framework: &str) -> Result<&dyn TestcaseGenerator> {
        self.generators
            .get(&framework.to_lowercase())
            .map(|generator| &**generator)
            .ok_or_else(|| MorphError::UnknownFramework(framework.to_string()))
    }

    /// Registered framework ids, sorted.
    pub fn frameworks(&self) -> impl Iterator<Item = &str> {
        self.generators.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_lookup_is_case_insensitive() {
        let registry = GeneratorRegistry::with_builtin().unwrap();
        assert_eq!(registry.get("WEKA").unwrap().framework(), "weka");
        assert_eq!(registry.get("SkLearn").unwrap().framework(), "sklearn");
        assert_eq!(
            registry.frameworks().collect::<Vec<_>>(),
            vec!["sklearn", "spark", "weka"]
        );
    }

    #[test]
    fn test_unknown_framework() {
        let registry = GeneratorRegistry::new();
        let err = registry.get("X").err().unwrap();
        assert!(matches!(err, MorphError::UnknownFramework(ref id) if id == "X"));
    }

    #[test]
    fn test_register_replaces() {
        let mut registry = GeneratorRegistry::with_builtin().unwrap();
        let replaced = registry.register(Box::new(BuiltinGenerator::new(Framework::Weka).unwrap()));
        assert!(replaced.is_some());
        assert_eq!(registry.frameworks().count(), 3);
    }
}
