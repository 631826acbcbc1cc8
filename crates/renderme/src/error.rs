//! Failure taxonomy for rendering and registry operations.

use thiserror::Error;

/// What went wrong while rendering or configuring plugins.
///
/// None of these are recovered internally: the first failure aborts the
/// whole `render()` call and surfaces here. There is no partial output.
#[derive(Debug, Error)]
pub enum RenderError {
    /// A caller-supplied argument is unusable, such as an empty plugin
    /// identifier at registration.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A marker names a plugin identifier with no registry entry.
    #[error("no renderer plugin registered under `{id}`")]
    TypeResolution { id: String },

    /// The resolved plugin does not accept the field's declared type.
    #[error("plugin `{id}` cannot render field `{field}`: expects a value of type {expected}")]
    ContractViolation {
        id: String,
        field: &'static str,
        expected: &'static str,
    },

    /// Formatting the field value failed, either in the field's `Display`
    /// impl or inside the delegated plugin.
    #[error("rendering field `{field}` failed: {source}")]
    Invocation {
        field: &'static str,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}
