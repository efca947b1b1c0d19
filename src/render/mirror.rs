//! Positional mirror of a registry, updated incrementally from change events.

use std::cell::RefCell;
use std::rc::Rc;

use crate::notify::{Change, ListenerId, Notifier};
use crate::registry::Registry;

/// Keeps one CSS entry per registry node, at the node's index.
///
/// Models a live stylesheet: each change is applied as a single insert or
/// delete at the reported position, never as a full rewrite. Unsubscribes
/// on drop.
#[derive(Debug)]
pub struct SheetMirror {
    rules: Rc<RefCell<Vec<String>>>,
    notifier: Notifier,
    listener: ListenerId,
}

impl SheetMirror {
    /// Snapshot `registry` and follow its changes from now on.
    pub fn attach(registry: &Registry) -> Self {
        let rules: Vec<String> = registry
            .nodes()
            .map(|node| node.css_text().to_owned())
            .collect();
        let rules = Rc::new(RefCell::new(rules));

        let sink = Rc::clone(&rules);
        let notifier = registry.notifier();
        let listener = notifier.subscribe(move |change| {
            let mut rules = sink.borrow_mut();
            match change {
                Change::Added { index, node } => {
                    let index = (*index).min(rules.len());
                    rules.insert(index, node.css_text().to_owned());
                }
                Change::Removed { index, .. } => {
                    if *index < rules.len() {
                        rules.remove(*index);
                    }
                }
            }
        });

        Self {
            rules,
            notifier,
            listener,
        }
    }

    /// Entries in order.
    pub fn rules(&self) -> Vec<String> {
        self.rules.borrow().clone()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.rules.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.borrow().is_empty()
    }

    /// Entries concatenated; equals the registry's `get_styles()`.
    pub fn css(&self) -> String {
        self.rules.borrow().concat()
    }

    /// Stop following the registry. Same as dropping the mirror.
    pub fn detach(self) {
        drop(self);
    }
}

impl Drop for SheetMirror {
    fn drop(&mut self) {
        self.notifier.unsubscribe(self.listener);
    }
}
