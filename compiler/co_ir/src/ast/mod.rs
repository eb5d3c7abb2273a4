//! The Co AST.
//!
//! Every node lives in a [`NodeArena`] and is addressed by a [`NodeId`].
//! A [`Node`] is a small common head (positions, flags, value type)
//! followed by a [`NodeData`] payload with one variant per [`NodeKind`].
//!
//! # Module Structure
//!
//! - `kind`: node kinds and their bands
//! - `flags`: node attribute flags
//! - `data`: per-kind payload structs
//! - `node`: the node record and its typed accessors
//! - `arena`: node storage and printable descriptions

mod arena;
pub mod data;
mod flags;
mod kind;
mod node;

use std::fmt;

use smallvec::SmallVec;

pub use arena::NodeArena;
pub use data::NodeData;
pub use flags::NodeFlags;
pub use kind::NodeKind;
pub use node::Node;

/// Index into a [`NodeArena`].
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
#[repr(transparent)]
pub struct NodeId(u32);

impl NodeId {
    /// Sentinel for child links that have not been set.
    pub const INVALID: NodeId = NodeId(u32::MAX);

    #[inline]
    pub const fn new(index: u32) -> Self {
        NodeId(index)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn is_valid(self) -> bool {
        self.0 != u32::MAX
    }
}

impl Default for NodeId {
    fn default() -> Self {
        Self::INVALID
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            write!(f, "NodeId({})", self.0)
        } else {
            write!(f, "NodeId::INVALID")
        }
    }
}

/// Child list with in-place storage for the first few entries.
pub type NodeList = SmallVec<[NodeId; 4]>;

#[cfg(target_pointer_width = "64")]
mod size_asserts {
    use super::{Node, NodeData, NodeId};
    crate::static_assert_size!(NodeId, 4);
    crate::static_assert_max_size!(NodeData, 64);
    crate::static_assert_max_size!(Node, 96);
}

#[cfg(test)]
mod tests;
