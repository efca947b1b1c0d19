//! Renderers: consumers that collect registries into output CSS.
//!
//! - [`NoopRenderer`] ignores everything (a safe default context).
//! - [`MemoryRenderer`] accumulates merged registries for server rendering,
//!   with non-clearing [`peek`](MemoryRenderer::peek) and clearing
//!   [`rewind`](MemoryRenderer::rewind).
//! - [`SheetMirror`] tracks a registry's nodes by position, the way a live
//!   stylesheet adapter inserts and deletes rules by index.

pub mod memory;
pub mod mirror;

pub use memory::MemoryRenderer;
pub use mirror::SheetMirror;

use crate::registry::Registry;

/// `id` attribute of the rendered `<style>` element.
pub const STYLE_ID: &str = "__free_style__";

/// Where a renderer runs. Decides whether clearing snapshots are allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    /// One renderer per request; rewinding between requests is expected.
    #[default]
    Server,
    /// One long-lived renderer; rewinding would drop styles still mounted.
    Browser,
}

/// A sink that components merge their registries into.
pub trait Renderer {
    /// Take one reference on every node of `registry`.
    fn merge(&mut self, registry: &Registry);

    /// Release the references taken by [`merge`](Renderer::merge).
    fn unmerge(&mut self, registry: &Registry);

    /// Current CSS text.
    fn to_css(&self) -> String;

    /// Current CSS wrapped in a `<style>` element.
    fn to_style_tag(&self) -> String {
        format!("<style id=\"{STYLE_ID}\">{}</style>", self.to_css())
    }
}

/// Renderer that drops everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopRenderer;

impl Renderer for NoopRenderer {
    fn merge(&mut self, _registry: &Registry) {}

    fn unmerge(&mut self, _registry: &Registry) {}

    fn to_css(&self) -> String {
        String::new()
    }
}
