use std::{
    collections::{BTreeMap, BTreeSet},
    fmt::Display,
};

use super::*;

/// Adjacency of a single node inside a [`WeightedDigraph`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeAdjacency {
    /// Outgoing edges `to -> weight`
    out_edges: BTreeMap<Node, Weight>,
    /// Nodes having an edge into this node
    predecessors: BTreeSet<Node>,
}

impl NodeAdjacency {
    /// Returns the outgoing edges of this node as `to -> weight`
    pub fn out_edges(&self) -> &BTreeMap<Node, Weight> {
        &self.out_edges
    }

    /// Returns all nodes having an edge into this node
    pub fn predecessors(&self) -> &BTreeSet<Node> {
        &self.predecessors
    }
}

/// A directed multigraph with integer weights where parallel edges collapse into one.
///
/// Outgoing edges are iterated in ascending order of their target which makes every search
/// on this graph deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WeightedDigraph {
    nodes: Vec<NodeAdjacency>,
    num_edges: NumEdges,
}

impl WeightedDigraph {
    /// Returns the adjacency of node `u`
    /// ** Panics if `u >= n` **
    pub fn node(&self, u: Node) -> &NodeAdjacency {
        &self.nodes[u as usize]
    }

    /// Returns a graph with the same nodes and the same edge key-set, but with all weights set
    /// to `0`. This is the initial flow graph of a max-flow computation.
    pub fn zeroed(&self) -> Self {
        let nodes = self
            .nodes
            .iter()
            .map(|adj| NodeAdjacency {
                out_edges: adj.out_edges.keys().map(|&v| (v, 0)).collect(),
                predecessors: adj.predecessors.clone(),
            })
            .collect();

        Self {
            nodes,
            num_edges: self.num_edges,
        }
    }

    /// Returns *true* if both graphs have the same number of nodes and the same edge key-set,
    /// ignoring weights
    pub fn has_same_shape(&self, other: &Self) -> bool {
        self.number_of_nodes() == other.number_of_nodes()
            && self.number_of_edges() == other.number_of_edges()
            && self
                .nodes
                .iter()
                .zip(&other.nodes)
                .all(|(a, b)| a.out_edges.keys().eq(b.out_edges.keys()))
    }
}

impl GraphNodeOrder for WeightedDigraph {
    fn number_of_nodes(&self) -> NumNodes {
        self.nodes.len() as NumNodes
    }
}

impl GraphEdgeOrder for WeightedDigraph {
    fn number_of_edges(&self) -> NumEdges {
        self.num_edges
    }
}

impl WeightedAdjacencyList for WeightedDigraph {
    fn weighted_neighbors_of(&self, u: Node) -> impl Iterator<Item = (Node, Weight)> + '_ {
        self.nodes[u as usize]
            .out_edges
            .iter()
            .map(|(&v, &w)| (v, w))
    }

    fn weight_of(&self, u: Node, v: Node) -> Option<Weight> {
        self.nodes[u as usize].out_edges.get(&v).copied()
    }

    fn degree_of(&self, u: Node) -> NumNodes {
        self.nodes[u as usize].out_edges.len() as NumNodes
    }
}

impl InNeighbors for WeightedDigraph {
    fn in_neighbors_of(&self, v: Node) -> impl Iterator<Item = Node> + '_ {
        self.nodes[v as usize].predecessors.iter().copied()
    }

    fn in_degree_of(&self, v: Node) -> NumNodes {
        self.nodes[v as usize].predecessors.len() as NumNodes
    }
}

impl GraphNew for WeightedDigraph {
    fn new(n: NumNodes) -> Self {
        Self {
            nodes: vec![NodeAdjacency::default(); n as usize],
            num_edges: 0,
        }
    }
}

impl GraphEdgeEditing for WeightedDigraph {
    fn set_weight(&mut self, u: Node, v: Node, weight: Weight) -> Option<Weight> {
        assert!(
            self.contains_node(v),
            "Edge {u} -> {v} leaves the node range 0..{}",
            self.number_of_nodes()
        );

        let previous = self.nodes[u as usize].out_edges.insert(v, weight);
        if previous.is_none() {
            self.nodes[v as usize].predecessors.insert(u);
            self.num_edges += 1;
        }
        previous
    }

    fn remove_edge(&mut self, u: Node, v: Node) -> Option<Weight> {
        let removed = self.nodes[u as usize].out_edges.remove(&v)?;
        assert!(self.nodes[v as usize].predecessors.remove(&u));
        self.num_edges -= 1;
        Some(removed)
    }
}

/// Debug view of all edges, one `u -(w)-> v` line per edge
impl Display for WeightedDigraph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Graph")?;
        writeln!(f, "{{")?;
        for edge in self.edges() {
            writeln!(f, "\t{edge}")?;
        }
        writeln!(f, "}}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use itertools::Itertools;
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg64Mcg;

    #[test]
    fn graph_new() {
        for n in 0..20 {
            let graph = WeightedDigraph::new(n);

            assert_eq!(graph.number_of_edges(), 0);
            assert_eq!(graph.number_of_nodes(), n);
            assert_eq!(graph.vertices().collect_vec(), (0..n).collect_vec());
        }
    }

    #[test]
    fn last_write_wins() {
        let graph = WeightedDigraph::from_edges(3, [(0, 1, 5), (1, 2, 3), (0, 1, 7)]);

        assert_eq!(graph.number_of_edges(), 2);
        assert_eq!(graph.weight_of(0, 1), Some(7));
        assert_eq!(graph.weight_of(1, 0), None);
        assert_eq!(graph.in_neighbors_of(1).collect_vec(), vec![0]);
    }

    #[test]
    fn predecessor_index() {
        let rng = &mut Pcg64Mcg::seed_from_u64(3);

        for n in [5 as NumNodes, 20, 50] {
            for _ in 0..10 {
                let edges = (0..n * 4)
                    .map(|_| {
                        (
                            rng.random_range(0..n),
                            rng.random_range(0..n),
                            rng.random_range(0..100 as Weight),
                        )
                    })
                    .collect_vec();

                let mut graph = WeightedDigraph::from_edges(n, edges.iter());

                let distinct = edges.iter().map(|&(u, v, _)| (u, v)).unique().count();
                assert_eq!(graph.number_of_edges() as usize, distinct);

                for v in graph.vertices() {
                    let expected = graph
                        .vertices()
                        .filter(|&u| graph.has_edge(u, v))
                        .collect_vec();
                    assert_eq!(graph.in_neighbors_of(v).collect_vec(), expected);
                    assert_eq!(graph.in_degree_of(v) as usize, expected.len());
                }

                // removing every second edge keeps both indices in sync
                let to_remove = graph.edges().step_by(2).collect_vec();
                for e in &to_remove {
                    assert_eq!(graph.remove_edge(e.from, e.to), Some(e.weight));
                    assert!(!graph.in_neighbors_of(e.to).contains(&e.from));
                }
                assert_eq!(graph.number_of_edges() as usize, distinct - to_remove.len());
            }
        }
    }

    #[test]
    fn zeroed_keeps_shape() {
        let graph = WeightedDigraph::from_edges(4, [(0, 1, 3), (0, 2, 2), (1, 2, 1), (2, 3, 3)]);
        let zero = graph.zeroed();

        assert!(zero.has_same_shape(&graph));
        assert!(zero.edges().all(|e| e.weight == 0));
        assert_eq!(
            zero.in_neighbors_of(2).collect_vec(),
            graph.in_neighbors_of(2).collect_vec()
        );
        assert!(!zero.has_same_shape(&WeightedDigraph::new(4)));
    }

    #[test]
    fn checked_weight_updates() {
        let mut graph = WeightedDigraph::from_edges(2, [(0, 1, 3)]);

        assert_eq!(graph.add_to_weight(0, 1, 2), Some(5));
        assert_eq!(graph.sub_from_weight(0, 1, 5), Some(0));
        assert_eq!(graph.sub_from_weight(0, 1, 1), None);
        assert_eq!(graph.weight_of(0, 1), Some(0));
        assert_eq!(graph.add_to_weight(1, 0, 1), None);
        assert!(!graph.has_edge(1, 0));
    }

    #[test]
    fn totals() {
        let graph = WeightedDigraph::from_edges(3, [(0, 1, 3), (0, 2, 2), (1, 2, 1)]);
        assert_eq!(graph.total_weight_out_of(0), Some(5));
        assert_eq!(graph.total_weight_into(2), Some(3));

        let huge = WeightedDigraph::from_edges(3, [(0, 1, Weight::MAX), (0, 2, 1)]);
        assert_eq!(huge.total_weight_out_of(0), None);
    }

    #[test]
    fn display() {
        let graph = WeightedDigraph::from_edges(3, [(1, 2, 4), (0, 1, 3)]);
        assert_eq!(
            graph.to_string(),
            "Graph\n{\n\t0 -(3)-> 1\n\t1 -(4)-> 2\n}\n"
        );
    }

    #[test]
    #[should_panic]
    fn out_of_range_edge() {
        let mut graph = WeightedDigraph::new(2);
        graph.set_weight(0, 2, 1);
    }
}
