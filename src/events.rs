//! Tree-change notifications
//!
//! An external tree view stays in sync by subscribing a [`TreeListener`]
//! to the scene. Each event names the parent (as a root-to-parent handle
//! path), the child indices that changed, and the children themselves.

use slotmap::SlotMap;

use crate::shapes::ShapeId;

slotmap::new_key_type! {
    /// Subscription handle returned by [`Listeners::subscribe`]
    pub struct ListenerId;
}

/// One structural change under a single parent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeEvent {
    /// Handles from the root down to the parent, inclusive
    pub path: Vec<ShapeId>,
    /// Positions in the parent's child list (before removal, after insertion)
    pub child_indices: Vec<usize>,
    /// The inserted or removed children, matching `child_indices`
    pub children: Vec<ShapeId>,
}

impl TreeEvent {
    pub fn single(path: Vec<ShapeId>, index: usize, child: ShapeId) -> Self {
        Self {
            path,
            child_indices: vec![index],
            children: vec![child],
        }
    }

    /// The container the change happened in
    pub fn parent(&self) -> Option<ShapeId> {
        self.path.last().copied()
    }
}

/// Observer of structural changes
pub trait TreeListener {
    fn nodes_inserted(&mut self, event: &TreeEvent);

    /// Called after the children are detached but before they are freed, so
    /// their handles still resolve for the duration of the call
    fn nodes_removed(&mut self, event: &TreeEvent);
}

/// Registered tree listeners
#[derive(Default)]
pub struct Listeners {
    listeners: SlotMap<ListenerId, Box<dyn TreeListener + Send>>,
}

impl Listeners {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, listener: Box<dyn TreeListener + Send>) -> ListenerId {
        self.listeners.insert(listener)
    }

    /// Drop a subscription, handing the listener back
    pub fn unsubscribe(&mut self, id: ListenerId) -> Option<Box<dyn TreeListener + Send>> {
        self.listeners.remove(id)
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    pub fn notify_inserted(&mut self, event: &TreeEvent) {
        for listener in self.listeners.values_mut() {
            listener.nodes_inserted(event);
        }
    }

    pub fn notify_removed(&mut self, event: &TreeEvent) {
        for listener in self.listeners.values_mut() {
            listener.nodes_removed(event);
        }
    }
}

impl std::fmt::Debug for Listeners {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Listeners")
            .field("count", &self.listeners.len())
            .finish()
    }
}
