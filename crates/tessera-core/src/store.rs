//! Entity storage backed by petgraph's `StableGraph`.
//!
//! Every IR entity of a function is a node weight in an [`EntityStore`] and is
//! referred to by a small copyable handle pairing the node index with an
//! allocation serial. `StableGraph` keeps the indices of live nodes stable
//! across removals but recycles vacant ones, so the serial is what tells a
//! handle held past erasure apart from a newer entity in the same slot.

use petgraph::graph::NodeIndex;
use petgraph::stable_graph::StableGraph;
use std::fmt;
use std::marker::PhantomData;

/// A handle type that addresses an [`EntityStore`].
pub trait EntityId: Copy + Eq + fmt::Debug {
    fn from_parts(node: NodeIndex, serial: u32) -> Self;

    /// The node holding the entity.
    fn node(self) -> NodeIndex;

    /// Allocation serial, unique within the store.
    fn serial(self) -> u32;
}

/// Declares a handle type implementing [`EntityId`].
///
/// Handles order and display by allocation serial.
macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name {
            serial: u32,
            node: petgraph::graph::NodeIndex,
        }

        impl $crate::store::EntityId for $name {
            fn from_parts(node: petgraph::graph::NodeIndex, serial: u32) -> Self {
                Self { serial, node }
            }

            fn node(self) -> petgraph::graph::NodeIndex {
                self.node
            }

            fn serial(self) -> u32 {
                self.serial
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, concat!($prefix, "{}"), self.serial)
            }
        }
    };
}

pub(crate) use entity_id;

#[derive(Debug, Clone)]
struct Slot<T> {
    serial: u32,
    value: T,
}

/// Storage of `T` addressed by handles of type `K`.
///
/// Only node weights are used; relations between entities are kept in the
/// entities themselves.
#[derive(Debug, Clone)]
pub struct EntityStore<K, T> {
    graph: StableGraph<Slot<T>, ()>,
    next_serial: u32,
    _marker: PhantomData<fn() -> K>,
}

impl<K: EntityId, T> EntityStore<K, T> {
    pub fn new() -> Self {
        Self {
            graph: StableGraph::new(),
            next_serial: 0,
            _marker: PhantomData,
        }
    }

    /// Store a value and return its handle.
    pub fn alloc(&mut self, value: T) -> K {
        let serial = self.next_serial;
        self.next_serial += 1;
        let node = self.graph.add_node(Slot { serial, value });
        K::from_parts(node, serial)
    }

    pub fn get(&self, id: K) -> Option<&T> {
        self.graph
            .node_weight(id.node())
            .filter(|slot| slot.serial == id.serial())
            .map(|slot| &slot.value)
    }

    pub fn get_mut(&mut self, id: K) -> Option<&mut T> {
        self.graph
            .node_weight_mut(id.node())
            .filter(|slot| slot.serial == id.serial())
            .map(|slot| &mut slot.value)
    }

    /// Remove a value. Its handle is dead from then on, even if the node
    /// index is later recycled.
    pub fn remove(&mut self, id: K) -> Option<T> {
        if !self.contains(id) {
            return None;
        }
        self.graph.remove_node(id.node()).map(|slot| slot.value)
    }

    /// Check whether a handle refers to a live value.
    pub fn contains(&self, id: K) -> bool {
        self.get(id).is_some()
    }

    /// Number of live values.
    pub fn len(&self) -> usize {
        self.graph.node_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Iterate over live values in allocation order.
    pub fn iter(&self) -> impl Iterator<Item = (K, &T)> {
        let mut live: Vec<_> = self
            .graph
            .node_indices()
            .filter_map(|node| {
                let slot = self.graph.node_weight(node)?;
                Some((K::from_parts(node, slot.serial), &slot.value))
            })
            .collect();
        live.sort_by_key(|(id, _)| id.serial());
        live.into_iter()
    }
}

impl<K: EntityId, T> Default for EntityStore<K, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: EntityId, T: PartialEq> PartialEq for EntityStore<K, T> {
    fn eq(&self, other: &Self) -> bool {
        self.next_serial == other.next_serial
            && self.len() == other.len()
            && self.iter().eq(other.iter())
    }
}
