//! The renderer: walks a target's member tables and assembles the dump.

use tracing::{debug, trace};

use crate::error::RenderError;
use crate::member::{FieldSpec, Renderable};
use crate::plugin::PluginCallError;
use crate::registry::PluginRegistry;

/// Renders one target object into a line-oriented text dump.
///
/// The renderer borrows the target for the duration of a call and keeps no
/// state between calls: output is a pure function of the target's current
/// field values, its member tables, and the registry contents.
pub struct Renderer<'a, T: Renderable> {
    target: &'a T,
    registry: &'a PluginRegistry,
}

impl<'a, T: Renderable> Renderer<'a, T> {
    /// Renderer over `target`, resolving plugins through the process-global
    /// registry.
    pub fn new(target: &'a T) -> Self {
        Self {
            target,
            registry: PluginRegistry::global(),
        }
    }

    /// Renderer over `target` with an explicit registry.
    pub fn with_registry(target: &'a T, registry: &'a PluginRegistry) -> Self {
        Self { target, registry }
    }

    /// Produces the dump: header line, one line per marked field, one line
    /// per marked value-returning method, in declaration order.
    pub fn render(&self) -> Result<String, RenderError> {
        debug!(instance = T::type_name(), "rendering instance");

        let mut out = String::new();
        out.push_str("Instance of ");
        out.push_str(T::type_name());
        out.push_str(":\n");

        for spec in T::field_specs() {
            let line = match spec.plugin {
                None => self.render_default(spec)?,
                Some(id) => self.render_delegated(spec, id)?,
            };
            out.push_str(&line);
        }

        for spec in T::method_specs() {
            let Some(returns) = &spec.returns else {
                trace!(method = spec.name, "skipping method returning no value");
                continue;
            };
            out.push_str(spec.name);
            out.push_str(" returns: ");
            out.push_str(returns.resolve());
            out.push('\n');
        }

        Ok(out)
    }

    fn render_default(&self, spec: &FieldSpec<T>) -> Result<String, RenderError> {
        trace!(field = spec.name, "default formatting");

        let value = (spec.display)(self.target).map_err(|err| RenderError::Invocation {
            field: spec.name,
            source: Box::new(err),
        })?;

        Ok(format!("{} (Type {}): {}\n", spec.name, spec.label, value))
    }

    fn render_delegated(
        &self,
        spec: &FieldSpec<T>,
        id: &'static str,
    ) -> Result<String, RenderError> {
        trace!(field = spec.name, plugin = id, "delegated formatting");

        let plugin = self
            .registry
            .resolve(id)
            .ok_or_else(|| RenderError::TypeResolution { id: id.to_string() })?;

        // The plugin supplies its own trailing newline; nothing is appended.
        let rendered = plugin
            .render_erased((spec.value)(self.target))
            .map_err(|err| match err {
                PluginCallError::TypeMismatch { expected } => RenderError::ContractViolation {
                    id: id.to_string(),
                    field: spec.name,
                    expected,
                },
                PluginCallError::Failed(source) => RenderError::Invocation {
                    field: spec.name,
                    source: source.into(),
                },
            })?;

        Ok(format!("{} {}", spec.name, rendered))
    }
}
