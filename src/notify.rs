//! Change notification for registries.
//!
//! A [`Notifier`] is a cloneable handle onto a shared listener set. Listeners
//! are called synchronously after every membership change, over a snapshot of
//! the set taken when dispatch starts, so a listener can unsubscribe itself or
//! another listener (through a cloned handle) while being notified.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use slotmap::{new_key_type, SlotMap};

use crate::node::StyleNode;

new_key_type! {
    /// Handle returned by [`Notifier::subscribe`].
    pub struct ListenerId;
}

/// A membership change, with the position the node occupied.
#[derive(Debug, Clone)]
pub enum Change {
    /// A node was appended at `index`.
    Added { index: usize, node: Rc<StyleNode> },
    /// The node previously at `index` was evicted.
    Removed { index: usize, node: Rc<StyleNode> },
}

impl Change {
    /// Position the change applies to.
    pub fn index(&self) -> usize {
        match self {
            Change::Added { index, .. } | Change::Removed { index, .. } => *index,
        }
    }

    /// The node that was added or removed.
    pub fn node(&self) -> &Rc<StyleNode> {
        match self {
            Change::Added { node, .. } | Change::Removed { node, .. } => node,
        }
    }
}

type Listener = Rc<RefCell<dyn FnMut(&Change)>>;

/// Shared listener set.
#[derive(Clone, Default)]
pub struct Notifier {
    listeners: Rc<RefCell<SlotMap<ListenerId, Listener>>>,
}

impl Notifier {
    /// Create an empty listener set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener.
    pub fn subscribe(&self, listener: impl FnMut(&Change) + 'static) -> ListenerId {
        let listener: Listener = Rc::new(RefCell::new(listener));
        self.listeners.borrow_mut().insert(listener)
    }

    /// Remove a listener. Returns `false` if it was not registered.
    pub fn unsubscribe(&self, id: ListenerId) -> bool {
        self.listeners.borrow_mut().remove(id).is_some()
    }

    /// Number of registered listeners.
    pub fn len(&self) -> usize {
        self.listeners.borrow().len()
    }

    /// Whether no listeners are registered.
    pub fn is_empty(&self) -> bool {
        self.listeners.borrow().is_empty()
    }

    /// Call every listener registered when dispatch starts and still
    /// registered when its turn comes.
    pub(crate) fn emit(&self, change: &Change) {
        let snapshot: Vec<(ListenerId, Listener)> = self
            .listeners
            .borrow()
            .iter()
            .map(|(id, listener)| (id, Rc::clone(listener)))
            .collect();

        for (id, listener) in snapshot {
            if !self.listeners.borrow().contains_key(id) {
                continue;
            }
            // A listener already running (re-entrant emit) is skipped.
            if let Ok(mut callback) = listener.try_borrow_mut() {
                (&mut *callback)(change);
            }
        }
    }
}

impl fmt::Debug for Notifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Notifier")
            .field("listeners", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::string_hash;
    use crate::style::Style;
    use std::cell::Cell;

    fn change() -> Change {
        let node = StyleNode::style(&Style::new().set("color", "red"), string_hash, false).unwrap();
        Change::Added {
            index: 0,
            node: Rc::new(node),
        }
    }

    #[test]
    fn subscribe_and_emit() {
        let notifier = Notifier::new();
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        notifier.subscribe(move |_| counter.set(counter.get() + 1));

        notifier.emit(&change());
        notifier.emit(&change());
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn unsubscribe_stops_calls() {
        let notifier = Notifier::new();
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        let id = notifier.subscribe(move |_| counter.set(counter.get() + 1));

        assert!(notifier.unsubscribe(id));
        assert!(!notifier.unsubscribe(id));
        notifier.emit(&change());
        assert_eq!(calls.get(), 0);
        assert!(notifier.is_empty());
    }

    #[test]
    fn listener_can_remove_itself() {
        let notifier = Notifier::new();
        let calls = Rc::new(Cell::new(0));
        let own_id: Rc<Cell<Option<ListenerId>>> = Rc::new(Cell::new(None));

        let handle = notifier.clone();
        let counter = Rc::clone(&calls);
        let slot = Rc::clone(&own_id);
        let id = notifier.subscribe(move |_| {
            counter.set(counter.get() + 1);
            if let Some(id) = slot.get() {
                handle.unsubscribe(id);
            }
        });
        own_id.set(Some(id));

        notifier.emit(&change());
        notifier.emit(&change());
        assert_eq!(calls.get(), 1);
        assert_eq!(notifier.len(), 0);
    }

    #[test]
    fn listener_can_remove_a_later_listener() {
        let notifier = Notifier::new();
        let second_calls = Rc::new(Cell::new(0));
        let victim: Rc<Cell<Option<ListenerId>>> = Rc::new(Cell::new(None));

        let handle = notifier.clone();
        let slot = Rc::clone(&victim);
        notifier.subscribe(move |_| {
            if let Some(id) = slot.take() {
                handle.unsubscribe(id);
            }
        });
        let counter = Rc::clone(&second_calls);
        let second = notifier.subscribe(move |_| counter.set(counter.get() + 1));
        victim.set(Some(second));

        notifier.emit(&change());
        assert_eq!(second_calls.get(), 0);
        assert_eq!(notifier.len(), 1);
    }

    #[test]
    fn change_accessors() {
        let c = change();
        assert_eq!(c.index(), 0);
        assert!(c.node().identifier().is_some());
    }
}
