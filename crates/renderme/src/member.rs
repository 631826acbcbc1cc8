//! Static member tables emitted by the derive macros.

use std::any::Any;
use std::fmt;

/// Text label for a member's declared type.
///
/// Rust's scalar primitives render as their bare token (`i32`), matching the
/// simple-name rule; every other type resolves to its fully-qualified runtime
/// name.
#[derive(Clone, Copy)]
pub enum TypeLabel {
    /// Bare token of a built-in scalar type.
    Primitive(&'static str),
    /// Deferred lookup of a fully-qualified type name.
    Named(fn() -> &'static str),
}

impl TypeLabel {
    pub fn resolve(&self) -> &'static str {
        match self {
            TypeLabel::Primitive(token) => token,
            TypeLabel::Named(lookup) => lookup(),
        }
    }
}

impl fmt::Display for TypeLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.resolve())
    }
}

impl fmt::Debug for TypeLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TypeLabel").field(&self.resolve()).finish()
    }
}

/// One marked field, in declaration order.
///
/// The fn pointers are generated inside the target type's own module, which
/// is what grants the renderer access to private fields.
pub struct FieldSpec<T> {
    /// Field name as declared.
    pub name: &'static str,
    /// Label for the field's declared type.
    pub label: TypeLabel,
    /// Plugin identifier from `with = "..."`; `None` means default formatting.
    pub plugin: Option<&'static str>,
    /// Writes the field's current value through its `Display` impl.
    pub display: fn(&T) -> Result<String, fmt::Error>,
    /// Hands the field's current value to the delegated-formatting path.
    pub value: fn(&T) -> &dyn Any,
}

/// One marked zero-argument method, in declaration order.
pub struct MethodSpec {
    /// Method name as declared.
    pub name: &'static str,
    /// Label for the return type; `None` means the method returns no value
    /// and is filtered out at render time.
    pub returns: Option<TypeLabel>,
}

/// Implemented by `#[derive(Renderable)]`.
///
/// The tables are `&'static` data baked in at compile time; their order is
/// the declaration order of the marked members.
pub trait Renderable: Sized + 'static {
    /// Fully-qualified name of the target type.
    fn type_name() -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Marked fields in declaration order.
    fn field_specs() -> &'static [FieldSpec<Self>];

    /// Marked zero-argument methods in declaration order.
    fn method_specs() -> &'static [MethodSpec] {
        &[]
    }
}
