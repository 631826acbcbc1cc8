//! Name-to-factory registry resolving `with = "..."` identifiers.

use std::any::Any;
use std::sync::{OnceLock, PoisonError, RwLock};

use indexmap::IndexMap;

use crate::error::RenderError;
use crate::plugin::{Erased, ErasedFieldRenderer, FieldRenderer};

/// Builds a fresh plugin instance.
pub type PluginFactory = fn() -> Box<dyn ErasedFieldRenderer>;

/// Registry of renderer plugins keyed by identifier.
///
/// Registration is expected at process start; `render()` only takes read
/// locks. Identifiers keep their registration order for introspection.
#[derive(Default)]
pub struct PluginRegistry {
    factories: RwLock<IndexMap<String, PluginFactory>>,
}

impl PluginRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-global registry consulted by [`Renderer::new`].
    ///
    /// [`Renderer::new`]: crate::Renderer::new
    pub fn global() -> &'static PluginRegistry {
        static GLOBAL: OnceLock<PluginRegistry> = OnceLock::new();
        GLOBAL.get_or_init(PluginRegistry::new)
    }

    /// Registers plugin type `P` under `id`. Re-registering an identifier
    /// replaces the previous entry.
    ///
    /// An empty identifier is rejected: an empty marker means default
    /// formatting and must never resolve to a plugin.
    pub fn register<P, T>(&self, id: impl Into<String>) -> Result<(), RenderError>
    where
        P: FieldRenderer<T> + 'static,
        T: Any,
    {
        let id = id.into();
        if id.is_empty() {
            return Err(RenderError::InvalidArgument(
                "plugin identifier must not be empty".into(),
            ));
        }

        let mut factories = self
            .factories
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        factories.insert(id, erased_factory::<P, T>);
        Ok(())
    }

    /// Resolves `id` to a fresh plugin instance.
    pub fn resolve(&self, id: &str) -> Option<Box<dyn ErasedFieldRenderer>> {
        let factory = self
            .factories
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(id)
            .copied();
        factory.map(|build| build())
    }

    /// Registered identifiers in registration order.
    pub fn names(&self) -> Vec<String> {
        self.factories
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect()
    }
}

fn erased_factory<P, T>() -> Box<dyn ErasedFieldRenderer>
where
    P: FieldRenderer<T> + 'static,
    T: Any,
{
    Box::new(Erased::<P, T>::fresh())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugin::IntVecRenderer;

    #[test]
    fn empty_identifier_is_rejected() {
        let registry = PluginRegistry::new();
        let err = registry
            .register::<IntVecRenderer, Vec<i32>>("")
            .unwrap_err();
        assert!(matches!(err, RenderError::InvalidArgument(_)));
    }

    #[test]
    fn resolve_builds_a_working_instance_per_call() {
        let registry = PluginRegistry::new();
        registry
            .register::<IntVecRenderer, Vec<i32>>("int_vec")
            .unwrap();

        for _ in 0..2 {
            let plugin = registry.resolve("int_vec").unwrap();
            let rendered = plugin.render_erased(&vec![7i32]).unwrap();
            assert_eq!(rendered, "(Type Vec<i32>): [7, ]\n");
        }
    }

    #[test]
    fn unknown_identifier_resolves_to_none() {
        let registry = PluginRegistry::new();
        assert!(registry.resolve("missing").is_none());
    }

    #[test]
    fn names_keep_registration_order() {
        let registry = PluginRegistry::new();
        registry
            .register::<IntVecRenderer, Vec<i32>>("second")
            .unwrap();
        registry
            .register::<IntVecRenderer, Vec<i32>>("first")
            .unwrap();
        assert_eq!(registry.names(), vec!["second", "first"]);
    }
}
