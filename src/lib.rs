//! # free-style
//!
//! A reference-counted, content-addressed CSS rule registry.
//!
//! Styles are registered as declaration trees and come back as generated
//! class names. Identical content is stored once and reference-counted, so a
//! rule stays while any user holds it and disappears with its last user.
//! Registries compose: a parent can merge a child's rules and later unmerge
//! them, and serialization is deterministic for server rendering.
//!
//! ```
//! use free_style::{Registry, Style};
//!
//! let mut registry = Registry::new();
//! let class = registry
//!     .register_style(&Style::new().set("backgroundColor", "red"))
//!     .unwrap();
//! assert_eq!(registry.get_styles(), format!(".{class}{{background-color:red}}"));
//! ```
//!
//! ## Core Systems
//!
//! - **[`hash`]**: content hash and [`StyleKey`]
//! - **[`style`]**: [`Style`] input trees, property formatting, JSON input
//! - **[`node`]**: immutable [`StyleNode`]s with memoized CSS text
//! - **[`registry`]**: the [`Registry`], options, style sheet helpers
//! - **[`notify`]**: change listeners
//! - **[`render`]**: server snapshot and live sheet consumers

// Foundation
pub mod error;
pub mod hash;
pub mod style;

// Core
pub mod node;
pub mod notify;
pub mod registry;

// Consumers
pub mod render;

pub use error::{RenderError, StyleError};
pub use hash::{string_hash, HashFn, StyleKey};
pub use node::{NodeKind, StyleNode};
pub use notify::{Change, ListenerId, Notifier};
pub use registry::sheet::{join, register_style_sheet};
pub use registry::{Registry, RegistryOptions};
pub use render::{Environment, MemoryRenderer, NoopRenderer, Renderer, SheetMirror, STYLE_ID};
pub use style::{Style, StyleValue};

// Proc macros (feature-gated)
#[cfg(feature = "macros")]
pub use free_style_macros::style;
