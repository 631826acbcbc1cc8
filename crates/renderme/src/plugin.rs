//! The external-renderer capability and its type-erased form.

use std::any::{Any, type_name};
use std::fmt::Write as _;
use std::marker::PhantomData;

/// Capability contract for delegated field formatting.
///
/// An implementation converts one field value to text. The contract is:
/// no side effects beyond formatting, no state retained between invocations,
/// the same text for the same input, and the produced text **must end with a
/// newline** — the renderer appends nothing after delegated output.
///
/// `Default` is the no-argument constructor the registry invokes; a fresh
/// instance is built per field per render call.
pub trait FieldRenderer<T>: Default {
    fn render(&self, value: &T) -> anyhow::Result<String>;
}

/// Why an erased plugin invocation failed.
#[derive(Debug)]
pub enum PluginCallError {
    /// The value's concrete type is not the parameter type the plugin
    /// declares.
    TypeMismatch { expected: &'static str },
    /// The plugin's `render` returned an error.
    Failed(anyhow::Error),
}

/// Object-safe form of [`FieldRenderer`], dispatched through the registry.
pub trait ErasedFieldRenderer {
    /// Name of the parameter type this plugin accepts.
    fn expects(&self) -> &'static str;

    /// Downcasts and renders one field value.
    fn render_erased(&self, value: &dyn Any) -> Result<String, PluginCallError>;
}

/// Adapter carrying a concrete plugin across the erasure boundary.
pub(crate) struct Erased<P, T> {
    plugin: P,
    _param: PhantomData<fn(&T)>,
}

impl<P, T> Erased<P, T>
where
    P: FieldRenderer<T>,
{
    pub(crate) fn fresh() -> Self {
        Self {
            plugin: P::default(),
            _param: PhantomData,
        }
    }
}

impl<P, T> ErasedFieldRenderer for Erased<P, T>
where
    P: FieldRenderer<T>,
    T: Any,
{
    fn expects(&self) -> &'static str {
        type_name::<T>()
    }

    fn render_erased(&self, value: &dyn Any) -> Result<String, PluginCallError> {
        let value = value
            .downcast_ref::<T>()
            .ok_or(PluginCallError::TypeMismatch {
                expected: type_name::<T>(),
            })?;
        self.plugin.render(value).map_err(PluginCallError::Failed)
    }
}

/// Built-in plugin formatting `Vec<i32>` fields as
/// `(Type Vec<i32>): [v1, v2, ]` with a trailing newline.
#[derive(Debug, Default)]
pub struct IntVecRenderer;

impl FieldRenderer<Vec<i32>> for IntVecRenderer {
    fn render(&self, value: &Vec<i32>) -> anyhow::Result<String> {
        let mut items = String::new();
        for n in value {
            write!(items, "{n}, ")?;
        }
        Ok(format!("(Type Vec<i32>): [{items}]\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn int_vec_renderer_formats_with_trailing_separator() {
        let rendered = IntVecRenderer.render(&vec![1, 2, 3]).unwrap();
        assert_eq!(rendered, "(Type Vec<i32>): [1, 2, 3, ]\n");
    }

    #[test]
    fn int_vec_renderer_handles_empty_input() {
        let rendered = IntVecRenderer.render(&Vec::new()).unwrap();
        assert_eq!(rendered, "(Type Vec<i32>): []\n");
    }

    #[test]
    fn erased_adapter_rejects_foreign_value_types() {
        let erased = Erased::<IntVecRenderer, Vec<i32>>::fresh();
        let err = erased.render_erased(&"not a vec").unwrap_err();
        assert!(matches!(err, PluginCallError::TypeMismatch { .. }));
    }
}
