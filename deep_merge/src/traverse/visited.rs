//! Cycle guard for shared destination nodes.
//!
//! Only nodes reachable through shared handles can alias or form cycles, so
//! the set tracks `Rc<RefCell<T>>` allocations. Each visited handle is kept
//! alive until the set is dropped, which pins its identity for the whole
//! merge call.
//!
//! The set also remembers which shared source nodes are currently being read,
//! so a destination node that is busy only because it doubles as a live
//! source can be told apart from one borrowed by the caller.

use std::any::{Any, TypeId};
use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

/// Identity of a shared node: its allocation plus the node type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) struct NodeId {
    addr: usize,
    type_id: TypeId,
}

impl NodeId {
    pub(crate) fn of<T: 'static>(node: &Rc<RefCell<T>>) -> Self {
        Self {
            addr: Rc::as_ptr(node).cast::<()>().addr(),
            type_id: TypeId::of::<T>(),
        }
    }
}

/// Nodes already entered during one merge call.
#[derive(Default)]
pub(crate) struct VisitedSet {
    seen: HashSet<NodeId>,
    reading: HashSet<NodeId>,
    anchors: Vec<Rc<dyn Any>>,
}

impl VisitedSet {
    /// Records `node`, returning `false` when it was already visited.
    pub(crate) fn insert<T: 'static>(&mut self, node: &Rc<RefCell<T>>) -> bool {
        if !self.seen.insert(NodeId::of(node)) {
            return false;
        }
        let anchor: Rc<RefCell<T>> = Rc::clone(node);
        self.anchors.push(anchor);
        true
    }

    /// Marks `node` as a source being read, returning `false` when it already was.
    pub(crate) fn begin_read<T: 'static>(&mut self, node: &Rc<RefCell<T>>) -> bool {
        self.reading.insert(NodeId::of(node))
    }

    pub(crate) fn end_read<T: 'static>(&mut self, node: &Rc<RefCell<T>>) {
        self.reading.remove(&NodeId::of(node));
    }

    pub(crate) fn is_reading<T: 'static>(&self, node: &Rc<RefCell<T>>) -> bool {
        self.reading.contains(&NodeId::of(node))
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.seen.len()
    }
}
