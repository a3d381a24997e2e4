use std::collections::{btree_map, btree_set};

use log::trace;

use super::*;

/// The mutable state of a single max-flow run.
///
/// For every edge `u -> v` of the capacity graph it tracks
/// - the flow currently pushed along the edge, and
/// - the residual capacity `capacity - flow` of the edge.
///
/// A search standing at `u` may take a *forward* step to `v` if `u -> v` has residual capacity
/// left, or a *backward* step to `p` if the edge `p -> u` carries flow that can be cancelled.
/// A pair of opposite edges `u -> v` and `v -> u` are two independent forward edges.
///
/// The capacity graph is borrowed and never modified.
#[derive(Debug, Clone)]
pub struct ResidualNetwork<'a, G> {
    capacities: &'a G,
    flow: WeightedDigraph,
    residual: WeightedDigraph,
}

impl<'a, G> ResidualNetwork<'a, G>
where
    G: WeightedAdjacencyList,
{
    /// Creates the network of an empty flow: all flows are `0`, residual capacities equal
    /// the capacities
    pub fn new(capacities: &'a G) -> Self {
        let residual = WeightedDigraph::from_edges(capacities.number_of_nodes(), capacities.edges());
        let flow = residual.zeroed();

        Self {
            capacities,
            flow,
            residual,
        }
    }

    /// The capacity graph of this run
    pub fn capacities(&self) -> &'a G {
        self.capacities
    }

    /// Flow currently pushed along every edge
    pub fn flow(&self) -> &WeightedDigraph {
        &self.flow
    }

    /// Remaining capacity of every edge
    pub fn residual(&self) -> &WeightedDigraph {
        &self.residual
    }

    /// Returns every step a search may take from `u`: first all forward steps in adjacency
    /// order, then all backward steps in ascending order of their target.
    /// ** Panics if `u >= n` **
    pub fn options(&self, u: Node) -> ResidualOptions<'_> {
        ResidualOptions {
            node: u,
            forward: self.residual.node(u).out_edges().iter(),
            backward: self.flow.node(u).predecessors().iter(),
            flow: &self.flow,
        }
    }

    /// Pushes the bottleneck of `path` through the network and returns it.
    ///
    /// Flow and residual graph are both updated in `O(path length)`. Any error leaves the
    /// network in an inconsistent state and the run has to be aborted.
    pub fn augment(&mut self, path: &AugmentingPath) -> Result<Weight, FlowError> {
        let pushed = add_augmenting_path(path, &mut self.flow)?;
        let debited = subtract_augmenting_path(path, &mut self.residual)?;
        debug_assert_eq!(pushed, debited);
        trace!("Pushed {pushed} along {path}");
        Ok(pushed)
    }

    /// Total flow leaving `u`
    pub fn flow_out_of(&self, u: Node) -> Result<Weight, FlowError> {
        self.flow.total_weight_out_of(u).ok_or(FlowError::Overflow)
    }

    /// Consumes the network and returns the flow and residual graph
    pub fn into_parts(self) -> (WeightedDigraph, WeightedDigraph) {
        (self.flow, self.residual)
    }
}

/// Iterator over the steps a search may take from a fixed node.
/// See [`ResidualNetwork::options`].
pub struct ResidualOptions<'a> {
    node: Node,
    forward: btree_map::Iter<'a, Node, Weight>,
    backward: btree_set::Iter<'a, Node>,
    flow: &'a WeightedDigraph,
}

impl Iterator for ResidualOptions<'_> {
    type Item = PathStep;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some((&v, &w)) = self.forward.by_ref().find(|&(_, &w)| w > 0) {
            return Some(PathStep::forward(v, w));
        }

        let node = self.node;
        let flow = self.flow;
        self.backward.by_ref().find_map(|&p| {
            flow.weight_of(p, node)
                .filter(|&f| f > 0)
                .map(|f| PathStep::backward(p, f))
        })
    }
}

/// Computes the residual graph `capacities - flow` from scratch.
///
/// The result has exactly the edges of `capacities`. Flow on an edge missing from `flow` is `0`.
///
/// # Errors
/// Returns [`FlowError::NegativeResidual`] if the flow on some edge exceeds its capacity,
/// including positive flow on an edge that does not exist in `capacities`.
pub fn residual_of<C, F>(capacities: &C, flow: &F) -> Result<WeightedDigraph, FlowError>
where
    C: WeightedAdjacencyList,
    F: WeightedAdjacencyList,
{
    let mut residual = WeightedDigraph::new(capacities.number_of_nodes());

    for WeightedEdge { from, to, weight } in capacities.edges() {
        let pushed = if flow.contains_node(from) {
            flow.weight_of(from, to).unwrap_or(0)
        } else {
            0
        };

        let remaining = weight
            .checked_sub(pushed)
            .ok_or(FlowError::NegativeResidual { from, to })?;
        residual.set_weight(from, to, remaining);
    }

    if let Some(e) = flow.edges().find(|e| {
        e.weight > 0 && !(capacities.contains_node(e.from) && capacities.has_edge(e.from, e.to))
    }) {
        return Err(FlowError::NegativeResidual {
            from: e.from,
            to: e.to,
        });
    }

    Ok(residual)
}

#[cfg(test)]
mod tests {
    use super::*;
    use itertools::Itertools;

    fn diamond() -> WeightedDigraph {
        WeightedDigraph::from_edges(4, [(0, 1, 3), (0, 2, 2), (1, 2, 1), (1, 3, 2), (2, 3, 3)])
    }

    #[test]
    fn initial_state() {
        let capacities = diamond();
        let network = ResidualNetwork::new(&capacities);

        assert_eq!(network.residual(), &capacities);
        assert!(network.flow().has_same_shape(&capacities));
        assert!(network.flow().edges().all(|e| e.weight == 0));

        assert_eq!(
            network.options(0).collect_vec(),
            vec![PathStep::forward(1, 3), PathStep::forward(2, 2)]
        );
        assert_eq!(network.options(3).count(), 0);
    }

    #[test]
    fn options_include_cancellations() {
        let capacities = diamond();
        let mut network = ResidualNetwork::new(&capacities);

        let path = AugmentingPath::from_steps(
            0,
            vec![
                PathStep::forward(1, 3),
                PathStep::forward(2, 1),
                PathStep::forward(3, 3),
            ],
        );
        assert_eq!(network.augment(&path), Ok(1));

        // 1 -> 2 is saturated, but 2 may now cancel the unit pushed along 1 -> 2
        assert_eq!(network.options(1).collect_vec(), vec![
            PathStep::forward(3, 2),
            PathStep::backward(0, 1),
        ]);
        assert_eq!(network.options(2).collect_vec(), vec![
            PathStep::forward(3, 2),
            PathStep::backward(1, 1),
        ]);
        assert_eq!(network.flow_out_of(0), Ok(1));
    }

    #[test]
    fn opposite_edges_are_independent() {
        let capacities = WeightedDigraph::from_edges(2, [(0, 1, 4), (1, 0, 6)]);
        let mut network = ResidualNetwork::new(&capacities);

        let path = AugmentingPath::from_steps(0, vec![PathStep::forward(1, 4)]);
        network.augment(&path).unwrap();

        assert_eq!(network.options(1).collect_vec(), vec![
            PathStep::forward(0, 6),
            PathStep::backward(0, 4),
        ]);
        assert_eq!(network.residual().weight_of(1, 0), Some(6));
    }

    #[test]
    fn recomputed_residual() {
        let capacities = diamond();
        let flow = WeightedDigraph::from_edges(4, [(0, 1, 2), (1, 3, 2)]);

        let residual = residual_of(&capacities, &flow).unwrap();
        assert_eq!(residual.weight_of(0, 1), Some(1));
        assert_eq!(residual.weight_of(1, 3), Some(0));
        assert_eq!(residual.weight_of(2, 3), Some(3));
        assert!(residual.has_same_shape(&capacities));

        let too_much = WeightedDigraph::from_edges(4, [(1, 2, 2)]);
        assert_eq!(
            residual_of(&capacities, &too_much),
            Err(FlowError::NegativeResidual { from: 1, to: 2 })
        );

        let unknown_edge = WeightedDigraph::from_edges(4, [(3, 0, 1)]);
        assert_eq!(
            residual_of(&capacities, &unknown_edge),
            Err(FlowError::NegativeResidual { from: 3, to: 0 })
        );
    }

    #[test]
    fn network_matches_recomputation() {
        let capacities = diamond();
        let mut network = ResidualNetwork::new(&capacities);

        for path in [
            AugmentingPath::from_steps(
                0,
                vec![PathStep::forward(1, 3), PathStep::forward(2, 1), PathStep::forward(3, 3)],
            ),
            AugmentingPath::from_steps(
                0,
                vec![PathStep::forward(2, 2), PathStep::backward(1, 1), PathStep::forward(3, 2)],
            ),
        ] {
            network.augment(&path).unwrap();
            assert_eq!(
                &residual_of(&capacities, network.flow()).unwrap(),
                network.residual()
            );
        }
    }
}
