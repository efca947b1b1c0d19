//! The style registry: ordered, reference-counted, content-addressed nodes.
//!
//! Registering content that is already present only bumps its count; the
//! node keeps its position and listeners are not told. A node is evicted
//! (and listeners are told) when its count drops to zero. Merging another
//! registry adds one reference per node it currently holds, appended in its
//! order; unmerging removes the same references.

pub mod options;
pub mod sheet;

use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;
use tracing::{debug, trace};

use crate::error::StyleError;
use crate::hash::StyleKey;
use crate::node::StyleNode;
use crate::notify::{Change, ListenerId, Notifier};
use crate::style::Style;

pub use options::RegistryOptions;

#[derive(Debug, Clone)]
struct Entry {
    node: Rc<StyleNode>,
    count: usize,
}

/// A reference-counted collection of style nodes.
///
/// Single-threaded: nodes are shared through `Rc`, so a registry never
/// crosses threads.
#[derive(Debug, Default)]
pub struct Registry {
    /// Insertion-ordered; the key set doubles as the reference-count key set.
    entries: IndexMap<StyleKey, Entry>,
    change_id: u64,
    notifier: Notifier,
    options: RegistryOptions,
}

impl Registry {
    /// Create an empty registry with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty registry with the given options.
    pub fn with_options(options: RegistryOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    /// The options this registry builds nodes with.
    pub fn options(&self) -> &RegistryOptions {
        &self.options
    }

    // ── Node construction ──────────────────────────────────────────────

    /// Build a style node without registering it.
    pub fn create_style(&self, style: &Style) -> Result<Rc<StyleNode>, StyleError> {
        StyleNode::style(style, self.options.hash, self.options.debug).map(Rc::new)
    }

    /// Build a keyframes node without registering it.
    pub fn create_keyframes(&self, frames: &Style) -> Result<Rc<StyleNode>, StyleError> {
        StyleNode::keyframes(frames, self.options.hash, self.options.debug).map(Rc::new)
    }

    /// Build a raw rule node without registering it.
    pub fn create_rule(&self, selector: &str, style: &Style) -> Result<Rc<StyleNode>, StyleError> {
        StyleNode::rule(selector, style, self.options.hash).map(Rc::new)
    }

    /// Build a global CSS node without registering it.
    pub fn create_css(&self, style: &Style) -> Result<Rc<StyleNode>, StyleError> {
        self.create_rule("", style)
    }

    // ── Registration ───────────────────────────────────────────────────

    /// Register a style and return its class name.
    ///
    /// Identical content always yields the same class name, whatever the
    /// declaration order or display name of later registrations.
    pub fn register_style(&mut self, style: &Style) -> Result<String, StyleError> {
        let node = self.create_style(style)?;
        Ok(identifier_of(&self.add(node)))
    }

    /// Register keyframes and return the animation name.
    pub fn register_keyframes(&mut self, frames: &Style) -> Result<String, StyleError> {
        let node = self.create_keyframes(frames)?;
        Ok(identifier_of(&self.add(node)))
    }

    /// Register a raw rule under a verbatim selector.
    pub fn register_rule(&mut self, selector: &str, style: &Style) -> Result<StyleKey, StyleError> {
        let node = self.create_rule(selector, style)?;
        Ok(self.add(node).key().clone())
    }

    /// Register global CSS: every nested key is used as a selector as-is.
    pub fn register_css(&mut self, style: &Style) -> Result<StyleKey, StyleError> {
        let node = self.create_css(style)?;
        Ok(self.add(node).key().clone())
    }

    /// Add one reference to a node, inserting it at the end if new.
    ///
    /// Returns the node now held by the registry, which is the previously
    /// registered one when the key already existed.
    pub fn add(&mut self, node: Rc<StyleNode>) -> Rc<StyleNode> {
        if let Some(entry) = self.entries.get_mut(node.key()) {
            entry.count += 1;
            trace!(key = %node.key(), count = entry.count, "style reference added");
            return Rc::clone(&entry.node);
        }

        let (index, _) = self.entries.insert_full(
            node.key().clone(),
            Entry {
                node: Rc::clone(&node),
                count: 1,
            },
        );
        self.change_id += 1;
        debug!(key = %node.key(), index, "style inserted");
        self.notifier.emit(&Change::Added {
            index,
            node: Rc::clone(&node),
        });
        node
    }

    /// Drop one reference to a node. Returns `false` if it was not present.
    pub fn remove(&mut self, node: &StyleNode) -> bool {
        self.remove_key(node.key())
    }

    /// Drop one reference by key, evicting the node at zero.
    ///
    /// Unknown keys are ignored, so a doubled teardown is harmless.
    pub fn remove_key(&mut self, key: &StyleKey) -> bool {
        let Some(entry) = self.entries.get_mut(key) else {
            trace!(%key, "remove of absent style ignored");
            return false;
        };
        entry.count -= 1;
        if entry.count > 0 {
            trace!(%key, count = entry.count, "style reference dropped");
            return true;
        }

        if let Some((index, _, entry)) = self.entries.shift_remove_full(key) {
            self.change_id += 1;
            debug!(%key, index, "style evicted");
            self.notifier.emit(&Change::Removed {
                index,
                node: entry.node,
            });
        }
        true
    }

    // ── Composition ────────────────────────────────────────────────────

    /// Add one reference for every node currently in `other`.
    ///
    /// A point-in-time copy: later changes to `other` are not reflected.
    pub fn merge(&mut self, other: &Registry) {
        debug!(nodes = other.len(), "merging registry");
        for entry in other.entries.values() {
            self.add(Rc::clone(&entry.node));
        }
    }

    /// Remove one reference for every node currently in `other`.
    pub fn unmerge(&mut self, other: &Registry) {
        debug!(nodes = other.len(), "unmerging registry");
        for key in other.entries.keys() {
            self.remove_key(key);
        }
    }

    // ── Queries ────────────────────────────────────────────────────────

    /// Whether a node with this key is present.
    pub fn has(&self, key: &StyleKey) -> bool {
        self.entries.contains_key(key)
    }

    /// The node registered under `key`.
    pub fn get(&self, key: &StyleKey) -> Option<&Rc<StyleNode>> {
        self.entries.get(key).map(|entry| &entry.node)
    }

    /// Current reference count (0 when absent).
    pub fn ref_count(&self, key: &StyleKey) -> usize {
        self.entries.get(key).map_or(0, |entry| entry.count)
    }

    /// Position of a node in output order.
    pub fn index_of(&self, key: &StyleKey) -> Option<usize> {
        self.entries.get_index_of(key)
    }

    /// Number of distinct nodes.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Nodes in output order.
    pub fn nodes(&self) -> impl Iterator<Item = &Rc<StyleNode>> {
        self.entries.values().map(|entry| &entry.node)
    }

    /// Incremented on every membership change.
    pub fn change_id(&self) -> u64 {
        self.change_id
    }

    // ── Serialization ──────────────────────────────────────────────────

    /// Concatenated CSS text of every node, in order. Pure.
    pub fn get_styles(&self) -> String {
        self.entries
            .values()
            .map(|entry| entry.node.css_text())
            .collect()
    }

    // ── Change listeners ───────────────────────────────────────────────

    /// Subscribe to membership changes.
    pub fn add_change_listener(&self, listener: impl FnMut(&Change) + 'static) -> ListenerId {
        self.notifier.subscribe(listener)
    }

    /// Unsubscribe. Returns `false` if the listener was not registered.
    pub fn remove_change_listener(&self, id: ListenerId) -> bool {
        self.notifier.unsubscribe(id)
    }

    /// A handle onto this registry's listener set, usable from inside a
    /// listener.
    pub fn notifier(&self) -> Notifier {
        self.notifier.clone()
    }
}

/// Copies membership, counts, and options. Listeners are not copied.
impl Clone for Registry {
    fn clone(&self) -> Self {
        Self {
            entries: self.entries.clone(),
            change_id: self.change_id,
            notifier: Notifier::new(),
            options: self.options,
        }
    }
}

impl fmt::Display for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for entry in self.entries.values() {
            f.write_str(entry.node.css_text())?;
        }
        Ok(())
    }
}

fn identifier_of(node: &StyleNode) -> String {
    node.identifier().unwrap_or_default().to_owned()
}
