/*!
# Node Representation

Nodes are dense indices `0..n` and carry no data of their own; everything known about a node
lives in the adjacency of the graph that owns it.

We choose `Node = u32` as flow networks with more than `2^32` nodes do not fit into memory
with a map-based adjacency anyway.
*/

use bitvec::vec::BitVec;

/// Nodes can be any unsigned integer from `0` to `Node::MAX - 1`
pub type Node = u32;

/// There can be at most `2^32 - 1` nodes in a graph!
pub type NumNodes = Node;

/// BitSet for Nodes, one bit per node index
pub type NodeBitSet = BitVec;

/// Returns *true* if `u` is a valid node index in a graph with `n` nodes
#[inline]
pub fn is_node_in_range(u: Node, n: NumNodes) -> bool {
    u < n
}
