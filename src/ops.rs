/*!
# Graph Operations

Traits describing what algorithms may ask of a weighted, directed graph. Algorithms and IO
are written against these traits rather than against [`WeightedDigraph`](crate::repr::WeightedDigraph)
directly, mirroring how a capacity, flow and residual graph all share one interface.
*/

use std::ops::Range;

use crate::*;

/// Provides getters pertaining to the node-size of a graph
pub trait GraphNodeOrder {
    /// Returns the number of nodes of the graph
    fn number_of_nodes(&self) -> NumNodes;

    /// Return the number of nodes as usize
    fn len(&self) -> usize {
        self.number_of_nodes() as usize
    }

    /// Returns a range over all vertices `0..n`.
    ///
    /// The range does not borrow `self` and may thus be used while the graph is mutated.
    fn vertices(&self) -> Range<Node> {
        0..self.number_of_nodes()
    }

    /// Returns *true* if `u` is a node of this graph
    fn contains_node(&self, u: Node) -> bool {
        is_node_in_range(u, self.number_of_nodes())
    }

    /// Returns *true* if the graph has no nodes (and thus no edges)
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Provides getters pertaining to the edge-size of a graph
pub trait GraphEdgeOrder {
    /// Returns the number of edges of the graph
    fn number_of_edges(&self) -> NumEdges;

    /// Returns *true* if the graph has no edges
    fn is_singleton(&self) -> bool {
        self.number_of_edges() == 0
    }
}

/// Getters for weighted out-neighborhoods.
///
/// Iteration over the out-neighborhood of a node is the *adjacency order* used by all
/// path searches. Implementations must keep it deterministic.
pub trait WeightedAdjacencyList: GraphNodeOrder + GraphEdgeOrder {
    /// Returns an iterator over `(v, weight)` for all edges `u -> v`.
    /// ** Panics if `u >= n` **
    fn weighted_neighbors_of(&self, u: Node) -> impl Iterator<Item = (Node, Weight)> + '_;

    /// Returns the weight of edge `u -> v` if it exists.
    /// ** Panics if `u >= n` **
    fn weight_of(&self, u: Node, v: Node) -> Option<Weight>;

    /// Returns the number of outgoing edges of `u`
    /// ** Panics if `u >= n` **
    fn degree_of(&self, u: Node) -> NumNodes;

    /// Returns *true* if the edge `u -> v` exists (regardless of its weight)
    fn has_edge(&self, u: Node, v: Node) -> bool {
        self.weight_of(u, v).is_some()
    }

    /// Returns an iterator over the out-neighbors of `u`
    fn neighbors_of(&self, u: Node) -> impl Iterator<Item = Node> + '_ {
        self.weighted_neighbors_of(u).map(|(v, _)| v)
    }

    /// Returns an iterator over all outgoing edges of `u`
    fn edges_of(&self, u: Node) -> impl Iterator<Item = WeightedEdge> + '_ {
        self.weighted_neighbors_of(u)
            .map(move |(v, w)| WeightedEdge::new(u, v, w))
    }

    /// Returns an iterator over all edges of the graph, grouped by their source node
    fn edges(&self) -> impl Iterator<Item = WeightedEdge> + '_ {
        self.vertices().flat_map(move |u| self.edges_of(u))
    }

    /// Sum of all weights leaving `u`. Returns `None` if the sum overflows.
    fn total_weight_out_of(&self, u: Node) -> Option<Weight> {
        self.weighted_neighbors_of(u)
            .try_fold(0 as Weight, |acc, (_, w)| acc.checked_add(w))
    }
}

/// Access to the predecessor index: for every node, the nodes holding an edge into it.
///
/// This allows traversing edges backwards without scanning the whole graph.
pub trait InNeighbors: WeightedAdjacencyList {
    /// Returns an iterator over all `u` with an edge `u -> v`
    /// ** Panics if `v >= n` **
    fn in_neighbors_of(&self, v: Node) -> impl Iterator<Item = Node> + '_;

    /// Returns the number of incoming edges of `v`
    /// ** Panics if `v >= n` **
    fn in_degree_of(&self, v: Node) -> NumNodes;

    /// Sum of all weights entering `v`. Returns `None` if the sum overflows.
    fn total_weight_into(&self, v: Node) -> Option<Weight> {
        self.in_neighbors_of(v).try_fold(0 as Weight, |acc, u| {
            acc.checked_add(self.weight_of(u, v).unwrap_or(0))
        })
    }
}

/// Creates a graph with `n` nodes and no edges
pub trait GraphNew {
    fn new(n: NumNodes) -> Self;
}

/// Mutation of edge weights
pub trait GraphEdgeEditing: WeightedAdjacencyList {
    /// Inserts the edge `u -> v` with the given weight or overwrites the weight of an existing
    /// edge. Returns the previous weight if the edge existed.
    /// ** Panics if `u >= n || v >= n` **
    fn set_weight(&mut self, u: Node, v: Node, weight: Weight) -> Option<Weight>;

    /// Removes the edge `u -> v` and returns its weight if it existed.
    /// ** Panics if `u >= n || v >= n` **
    fn remove_edge(&mut self, u: Node, v: Node) -> Option<Weight>;

    /// Adds `delta` to the weight of an existing edge `u -> v` and returns the new weight.
    /// Returns `None` (and leaves the graph untouched) if the edge does not exist or the
    /// addition overflows.
    fn add_to_weight(&mut self, u: Node, v: Node, delta: Weight) -> Option<Weight> {
        let updated = self.weight_of(u, v)?.checked_add(delta)?;
        self.set_weight(u, v, updated);
        Some(updated)
    }

    /// Subtracts `delta` from the weight of an existing edge `u -> v` and returns the new weight.
    /// Returns `None` (and leaves the graph untouched) if the edge does not exist or the weight
    /// would become negative.
    fn sub_from_weight(&mut self, u: Node, v: Node, delta: Weight) -> Option<Weight> {
        let updated = self.weight_of(u, v)?.checked_sub(delta)?;
        self.set_weight(u, v, updated);
        Some(updated)
    }
}

/// Builds a graph from a list of edges. If the same `(from, to)` pair occurs more than once,
/// the last occurrence wins.
pub trait GraphFromScratch {
    fn from_edges<I, E>(n: NumNodes, edges: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Into<WeightedEdge>;
}

impl<G> GraphFromScratch for G
where
    G: GraphNew + GraphEdgeEditing,
{
    fn from_edges<I, E>(n: NumNodes, edges: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Into<WeightedEdge>,
    {
        let mut graph = Self::new(n);
        for edge in edges {
            let WeightedEdge { from, to, weight } = edge.into();
            graph.set_weight(from, to, weight);
        }
        graph
    }
}
