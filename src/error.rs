//! Error types for style construction and rendering.

/// Errors raised while turning style input into CSS text.
///
/// Raised before the registry is touched, so a failed registration never
/// leaves partial state behind.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StyleError {
    #[error("invalid value for {property}: {message}")]
    InvalidValue { property: String, message: String },
    #[error("empty property name")]
    EmptyProperty,
    #[error("declaration `{property}` has no selector; nest it under a selector key")]
    MissingSelector { property: String },
    #[error("keyframes expect frame blocks, found `{property}`")]
    InvalidKeyframes { property: String },
}

/// Errors from the snapshot renderers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RenderError {
    #[error("rewind clears accumulated styles and is only available on the server")]
    RewindInBrowser,
}
