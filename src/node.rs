/*!
# Node & Distance Representation

We choose `Node = u32` as almost all use-cases involve less than `2^32` nodes.
This saves space compared to `usize`/`u64` and allows manipulating node values directly.

Distances are `Dist = u64`: weighted shortest-path distances are sums of up to `n - 1`
edge weights and can exceed `u32` long before the node count does.
*/

use std::num::NonZero;
use stream_bitset::bitset::BitSetImpl;

/// Nodes can be any unsigned integer from `0` to `Node::MAX - 1`
pub type Node = u32;

/// Node-Value that is considered invalid
pub const INVALID_NODE: Node = Node::MAX;

/// There can be at most `2^32 - 1` nodes in a graph!
pub type NumNodes = Node;

/// BitSet for Nodes
pub type NodeBitSet = BitSetImpl<Node>;

/// Weight of a single edge. Unweighted graphs store the implicit weight `1`.
pub type Weight = u64;

/// A shortest-path distance: a sum of edge weights (or a hop count for BFS).
pub type Dist = u64;

/// As `Option<Node>` uses additional bytes for padding, it can be inefficient
/// since we often need to use `Vec<Option<Node>>`. This instead uses the
/// `NonZero`-Wrapper to assign a constant value (often)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct OptionalNodeImpl<const N: Node>(NonZero<Node>);

/// Often, `INVALID_NODE` is safe to pick as the `None`-Value
pub type OptionalNode = OptionalNodeImpl<INVALID_NODE>;

impl<const N: Node> OptionalNodeImpl<N> {
    /// Returns `Some(OptionalNodeImpl)` if `n != N` and `None` otherwise
    pub const fn new(n: Node) -> Option<Self> {
        match NonZero::new(n ^ N) {
            Some(inner) => Some(OptionalNodeImpl(inner)),
            None => None,
        }
    }

    /// Gets the underlying Node-Value
    pub const fn get(&self) -> Node {
        self.0.get() ^ N
    }
}

/// Niche-compressed distance so that `Vec<Option<OptionalDist>>` takes 8 bytes
/// per entry. `Dist::MAX` doubles as the `None`-Value: it is exactly the
/// "infinite" distance an unreached node would carry, so the unreached
/// representation is a proper `Option` instead of a magic sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct OptionalDistImpl<const N: Dist>(NonZero<Dist>);

/// `Dist::MAX` is never a finite distance
pub type OptionalDist = OptionalDistImpl<{ Dist::MAX }>;

impl<const N: Dist> OptionalDistImpl<N> {
    /// Returns `Some(OptionalDistImpl)` if `d != N` and `None` otherwise
    pub const fn new(d: Dist) -> Option<Self> {
        match NonZero::new(d ^ N) {
            Some(inner) => Some(OptionalDistImpl(inner)),
            None => None,
        }
    }

    /// Gets the underlying distance
    pub const fn get(&self) -> Dist {
        self.0.get() ^ N
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn optional_node_roundtrip() {
        for u in [0 as Node, 1, 42, INVALID_NODE - 1] {
            assert_eq!(OptionalNode::new(u).unwrap().get(), u);
        }
        assert!(OptionalNode::new(INVALID_NODE).is_none());
        assert_eq!(std::mem::size_of::<Option<OptionalNode>>(), 4);
    }

    #[test]
    fn optional_dist_roundtrip() {
        for d in [0 as Dist, 1, 1 << 40, Dist::MAX - 1] {
            assert_eq!(OptionalDist::new(d).unwrap().get(), d);
        }
        assert!(OptionalDist::new(Dist::MAX).is_none());
        assert_eq!(std::mem::size_of::<Option<OptionalDist>>(), 8);
    }
}
