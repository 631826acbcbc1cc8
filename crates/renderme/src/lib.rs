//! renderme — marker-driven object introspection rendering.
//!
//! Given an instance of a type deriving [`Renderable`], a [`Renderer`]
//! produces a text dump of the fields and zero-argument methods carrying a
//! `#[render]` marker. A field marker may name an external renderer plugin
//! (`#[render(with = "...")]`), resolved through the [`PluginRegistry`] in
//! place of default formatting.
//!
//! # Usage
//!
//! ```
//! use renderme::{Renderable, Renderer};
//!
//! #[derive(Renderable)]
//! struct Sample {
//!     #[render]
//!     count: i32,
//!     ignored: String,
//! }
//!
//! let sample = Sample { count: 5, ignored: String::new() };
//! let dump = Renderer::new(&sample).render()?;
//! assert!(dump.ends_with("count (Type i32): 5\n"));
//! # Ok::<(), renderme::RenderError>(())
//! ```
//!
//! Rendering is deterministic: lines follow the declaration order of the
//! marked members, and the same target state yields byte-identical output
//! on every call.

mod error;
mod member;
mod plugin;
mod registry;
mod renderer;

pub mod telemetry;

pub use error::RenderError;
pub use member::{FieldSpec, MethodSpec, Renderable, TypeLabel};
pub use plugin::{ErasedFieldRenderer, FieldRenderer, IntVecRenderer, PluginCallError};
pub use registry::{PluginFactory, PluginRegistry};
pub use renderer::Renderer;

// Re-export the macros.
#[cfg(feature = "derive")]
pub use renderme_derive::{Renderable, render_methods};

/// Registers a plugin in the process-global registry.
///
/// Convenience for [`PluginRegistry::global`] + [`PluginRegistry::register`],
/// intended for population at process start.
pub fn register_plugin<P, T>(id: impl Into<String>) -> Result<(), RenderError>
where
    P: FieldRenderer<T> + 'static,
    T: std::any::Any,
{
    PluginRegistry::global().register::<P, T>(id)
}
