use std::{
    fmt::Display,
    time::{Duration, Instant},
};

use log::{debug, info};

use super::*;

/// The two augmenting path strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Algorithm {
    /// Augment along the first path found by a depth-first search
    FordFulkerson,
    /// Augment along a shortest path found by a breadth-first search
    #[default]
    EdmondsKarp,
}

impl Algorithm {
    /// Both algorithms in the order they are reported
    pub const ALL: [Algorithm; 2] = [Algorithm::FordFulkerson, Algorithm::EdmondsKarp];

    /// Two-letter abbreviation used in reports
    pub fn abbreviation(&self) -> &'static str {
        match self {
            Algorithm::FordFulkerson => "FF",
            Algorithm::EdmondsKarp => "EK",
        }
    }
}

impl Display for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Algorithm::FordFulkerson => write!(f, "Ford-Fulkerson"),
            Algorithm::EdmondsKarp => write!(f, "Edmonds-Karp"),
        }
    }
}

/// Computes a maximum flow from `source` to `sink` with the augmenting path method:
/// starting from the empty flow, repeatedly search an augmenting path in the residual
/// network and push its bottleneck until no path is left.
///
/// Configuration follows the setter pattern:
/// ```
/// use wgraphs::{algo::*, prelude::*};
///
/// let graph = WeightedDigraph::from_edges(2, [(0, 1, 10)]);
/// let result = MaxFlow::new(&graph, 0, 1)
///     .unwrap()
///     .max_iterations(Some(100))
///     .run_with(Algorithm::FordFulkerson)
///     .unwrap();
///
/// assert_eq!(result.value(), 10);
/// assert_eq!(result.iterations(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct MaxFlow<'a, G> {
    capacities: &'a G,
    source: Node,
    sink: Node,
    max_iterations: Option<usize>,
    verify: bool,
}

impl<'a, G> MaxFlow<'a, G>
where
    G: WeightedAdjacencyList,
{
    /// Creates a new computation. Verification of the result is enabled and the number of
    /// augmentations is unbounded.
    ///
    /// # Errors
    /// Fails if `source` or `sink` are not nodes of `capacities` or if they are equal.
    pub fn new(capacities: &'a G, source: Node, sink: Node) -> Result<Self, FlowError> {
        let n = capacities.number_of_nodes();
        if !capacities.contains_node(source) {
            return Err(FlowError::SourceOutOfRange { node: source, n });
        }
        if !capacities.contains_node(sink) {
            return Err(FlowError::SinkOutOfRange { node: sink, n });
        }
        if source == sink {
            return Err(FlowError::SourceIsSink { node: source });
        }

        Ok(Self {
            capacities,
            source,
            sink,
            max_iterations: None,
            verify: true,
        })
    }

    /// Aborts with [`FlowError::IterationLimit`] if more than `limit` augmentations are needed.
    /// `None` removes the limit.
    pub fn max_iterations(mut self, limit: Option<usize>) -> Self {
        self.max_iterations = limit;
        self
    }

    /// If enabled, every result is checked with [`FlowResult::validate`] before it is returned
    pub fn verify(mut self, verify: bool) -> Self {
        self.verify = verify;
        self
    }

    pub fn source(&self) -> Node {
        self.source
    }

    pub fn sink(&self) -> Node {
        self.sink
    }

    /// Runs the search-augment loop with the given path finder
    pub fn run<F>(&self, finder: &mut F) -> Result<FlowResult<'a, G>, FlowError>
    where
        F: PathFinder,
    {
        let mut network = ResidualNetwork::new(self.capacities);
        let mut iterations = 0usize;

        while let Some(path) = finder.find_path(&network, self.source, self.sink) {
            if let Some(limit) = self.max_iterations.filter(|&limit| iterations >= limit) {
                return Err(FlowError::IterationLimit { limit });
            }

            let pushed = network.augment(&path)?;
            iterations += 1;
            debug!(
                "Augmentation {iterations}: pushed {pushed} along {} steps ({} cancelling)",
                path.len(),
                path.number_of_cancellations()
            );
        }

        let value = network.flow_out_of(self.source)?;
        info!(
            "Maximum flow from {} to {} is {value} after {iterations} augmentations",
            self.source, self.sink
        );

        let (flow, residual) = network.into_parts();
        let result = FlowResult {
            capacities: self.capacities,
            source: self.source,
            sink: self.sink,
            value,
            iterations,
            flow,
            residual,
        };

        if self.verify {
            result.validate()?;
        }

        Ok(result)
    }

    /// Runs Ford-Fulkerson: augmenting paths are found by depth-first search
    pub fn ford_fulkerson(&self) -> Result<FlowResult<'a, G>, FlowError> {
        self.run(&mut DepthFirst::new())
    }

    /// Runs Edmonds-Karp: augmenting paths are shortest paths found by breadth-first search.
    /// The number of augmentations is in `O(nm)`.
    pub fn edmonds_karp(&self) -> Result<FlowResult<'a, G>, FlowError> {
        self.run(&mut BreadthFirst::new())
    }

    /// Runs the given algorithm
    pub fn run_with(&self, algorithm: Algorithm) -> Result<FlowResult<'a, G>, FlowError> {
        match algorithm {
            Algorithm::FordFulkerson => self.ford_fulkerson(),
            Algorithm::EdmondsKarp => self.edmonds_karp(),
        }
    }

    /// Runs and times the given algorithm
    pub fn timed(&self, algorithm: Algorithm) -> Result<RunReport, FlowError> {
        let start = Instant::now();
        let result = self.run_with(algorithm)?;
        let elapsed = start.elapsed();

        Ok(RunReport {
            algorithm,
            value: result.value(),
            iterations: result.iterations(),
            elapsed,
        })
    }

    /// Runs both algorithms and compares their values.
    ///
    /// # Errors
    /// Besides the errors of the individual runs, returns [`FlowError::AlgorithmMismatch`] if
    /// both runs finish with different values.
    pub fn cross_check(&self) -> Result<CrossCheck, FlowError> {
        let depth_first = self.timed(Algorithm::FordFulkerson)?;
        let breadth_first = self.timed(Algorithm::EdmondsKarp)?;

        if depth_first.value != breadth_first.value {
            return Err(FlowError::AlgorithmMismatch {
                depth_first: depth_first.value,
                breadth_first: breadth_first.value,
            });
        }

        Ok(CrossCheck {
            depth_first,
            breadth_first,
        })
    }
}

/// The outcome of a max-flow computation
#[derive(Debug, Clone)]
pub struct FlowResult<'a, G> {
    capacities: &'a G,
    source: Node,
    sink: Node,
    value: Weight,
    iterations: usize,
    flow: WeightedDigraph,
    residual: WeightedDigraph,
}

impl<'a, G> FlowResult<'a, G>
where
    G: WeightedAdjacencyList,
{
    /// Value of the maximum flow, i.e. the total flow on all edges leaving the source
    pub fn value(&self) -> Weight {
        self.value
    }

    /// Number of augmentations performed
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    pub fn source(&self) -> Node {
        self.source
    }

    pub fn sink(&self) -> Node {
        self.sink
    }

    /// Final flow on every edge of the capacity graph
    pub fn flow_graph(&self) -> &WeightedDigraph {
        &self.flow
    }

    /// Final residual capacity of every edge of the capacity graph
    pub fn residual_graph(&self) -> &WeightedDigraph {
        &self.residual
    }

    /// Consumes the result and returns the flow graph
    pub fn into_flow_graph(self) -> WeightedDigraph {
        self.flow
    }

    /// Net flow leaving the source, or `None` if more flow enters the source than leaves it
    pub fn outflow_of_source(&self) -> Option<Weight> {
        self.flow
            .total_weight_out_of(self.source)?
            .checked_sub(self.flow.total_weight_into(self.source)?)
    }

    /// Net flow entering the sink, or `None` if more flow leaves the sink than enters it
    pub fn inflow_of_sink(&self) -> Option<Weight> {
        self.flow
            .total_weight_into(self.sink)?
            .checked_sub(self.flow.total_weight_out_of(self.sink)?)
    }

    /// Checks that the flow is a valid flow of value [`FlowResult::value`]:
    /// - no edge carries more flow than its capacity,
    /// - the residual graph equals capacities minus flow,
    /// - every node except source and sink emits exactly the flow it receives, and
    /// - the net flow leaving the source equals the net flow entering the sink equals the value.
    pub fn validate(&self) -> Result<(), FlowError> {
        for WeightedEdge { from, to, weight } in self.capacities.edges() {
            let flow = self.flow.weight_of(from, to).unwrap_or(0);
            if flow > weight {
                return Err(FlowError::CapacityExceeded {
                    from,
                    to,
                    flow,
                    capacity: weight,
                });
            }
        }

        let expected = residual_of(self.capacities, &self.flow)?;
        for WeightedEdge { from, to, weight } in expected.edges() {
            let actual = self.residual.weight_of(from, to).unwrap_or(0);
            if actual != weight {
                return Err(FlowError::ResidualMismatch {
                    from,
                    to,
                    actual,
                    expected: weight,
                });
            }
        }
        if let Some(e) = self.residual.edges().find(|e| !expected.has_edge(e.from, e.to)) {
            return Err(FlowError::ResidualMismatch {
                from: e.from,
                to: e.to,
                actual: e.weight,
                expected: 0,
            });
        }

        for node in self.flow.vertices() {
            if node == self.source || node == self.sink {
                continue;
            }

            let inflow = self
                .flow
                .total_weight_into(node)
                .ok_or(FlowError::Overflow)?;
            let outflow = self
                .flow
                .total_weight_out_of(node)
                .ok_or(FlowError::Overflow)?;
            if inflow != outflow {
                return Err(FlowError::ConservationViolated {
                    node,
                    inflow,
                    outflow,
                });
            }
        }

        let outflow = self.outflow_of_source();
        let inflow = self.inflow_of_sink();
        if outflow != Some(self.value) || inflow != Some(self.value) {
            return Err(FlowError::UnbalancedTerminals {
                value: self.value,
                outflow,
                inflow,
            });
        }

        Ok(())
    }
}

/// Measurements of a single timed run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunReport {
    pub algorithm: Algorithm,
    pub value: Weight,
    pub iterations: usize,
    pub elapsed: Duration,
}

impl RunReport {
    /// Average flow pushed per augmentation, `0.0` if no augmentation took place
    pub fn flow_per_iteration(&self) -> f64 {
        if self.iterations == 0 {
            0.0
        } else {
            self.value as f64 / self.iterations as f64
        }
    }
}

/// Reports of both algorithms on the same input, which are known to agree on the flow value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CrossCheck {
    pub depth_first: RunReport,
    pub breadth_first: RunReport,
}

impl CrossCheck {
    /// The common flow value
    pub fn value(&self) -> Weight {
        self.breadth_first.value
    }

    /// How much faster Edmonds-Karp ran than Ford-Fulkerson in percent (negative if slower)
    pub fn speedup_percent(&self) -> f64 {
        let depth_first = self.depth_first.elapsed.as_nanos() as f64;
        let breadth_first = self.breadth_first.elapsed.as_nanos().max(1) as f64;
        (depth_first / breadth_first - 1.0) * 100.0
    }
}

/// Max-flow algorithms directly on the capacity graph
pub trait NetworkFlow: WeightedAdjacencyList + Sized {
    /// Computes a maximum flow from `source` to `sink` with Ford-Fulkerson
    fn ford_fulkerson(&self, source: Node, sink: Node) -> Result<FlowResult<'_, Self>, FlowError> {
        MaxFlow::new(self, source, sink)?.ford_fulkerson()
    }

    /// Computes a maximum flow from `source` to `sink` with Edmonds-Karp
    fn edmonds_karp(&self, source: Node, sink: Node) -> Result<FlowResult<'_, Self>, FlowError> {
        MaxFlow::new(self, source, sink)?.edmonds_karp()
    }

    /// Returns the value of a maximum flow from `source` to `sink`
    fn max_flow_value(&self, source: Node, sink: Node) -> Result<Weight, FlowError> {
        Ok(self.edmonds_karp(source, sink)?.value())
    }
}

impl<G> NetworkFlow for G where G: WeightedAdjacencyList {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gens::RandomNetwork;
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg64Mcg;

    fn diamond() -> WeightedDigraph {
        WeightedDigraph::from_edges(4, [(0, 1, 3), (0, 2, 2), (1, 2, 1), (1, 3, 2), (2, 3, 3)])
    }

    #[test]
    fn diamond_flow() {
        let capacities = diamond();
        for algorithm in Algorithm::ALL {
            let result = MaxFlow::new(&capacities, 0, 3)
                .unwrap()
                .run_with(algorithm)
                .unwrap();

            assert_eq!(result.value(), 5, "{algorithm}");
            assert_eq!(result.outflow_of_source(), Some(5));
            assert_eq!(result.inflow_of_sink(), Some(5));
            assert!(result.validate().is_ok());
        }
    }

    #[test]
    fn single_edge() {
        let capacities = WeightedDigraph::from_edges(2, [(0, 1, 10)]);

        for result in [
            capacities.ford_fulkerson(0, 1).unwrap(),
            capacities.edmonds_karp(0, 1).unwrap(),
        ] {
            assert_eq!(result.value(), 10);
            assert_eq!(result.iterations(), 1);
            assert_eq!(result.residual_graph().weight_of(0, 1), Some(0));
        }
    }

    #[test]
    fn disconnected_sink() {
        let capacities = WeightedDigraph::from_edges(4, [(0, 1, 3), (1, 2, 3), (3, 2, 1)]);

        for algorithm in Algorithm::ALL {
            let result = MaxFlow::new(&capacities, 0, 3)
                .unwrap()
                .run_with(algorithm)
                .unwrap();
            assert_eq!(result.value(), 0);
            assert_eq!(result.iterations(), 0);
            assert!(result.flow_graph().edges().all(|e| e.weight == 0));
        }
    }

    #[test]
    fn wrong_first_path() {
        // DFS first saturates 0 -> 1 -> 2 -> 3 and has to cancel it again
        let capacities = WeightedDigraph::from_edges(
            4,
            [(0, 1, 100), (0, 2, 100), (1, 2, 1), (1, 3, 100), (2, 3, 100)],
        );

        let ff = capacities.ford_fulkerson(0, 3).unwrap();
        let ek = capacities.edmonds_karp(0, 3).unwrap();
        assert_eq!(ff.value(), 200);
        assert_eq!(ek.value(), 200);
        assert_eq!(ek.iterations(), 2);
        assert!(ff.iterations() >= ek.iterations());
    }

    #[test]
    fn invalid_terminals() {
        let capacities = diamond();
        assert_eq!(
            MaxFlow::new(&capacities, 4, 3).unwrap_err(),
            FlowError::SourceOutOfRange { node: 4, n: 4 }
        );
        assert_eq!(
            MaxFlow::new(&capacities, 0, 9).unwrap_err(),
            FlowError::SinkOutOfRange { node: 9, n: 4 }
        );
        assert_eq!(
            MaxFlow::new(&capacities, 2, 2).unwrap_err(),
            FlowError::SourceIsSink { node: 2 }
        );
    }

    #[test]
    fn iteration_limit() {
        let capacities = diamond();
        let max_flow = MaxFlow::new(&capacities, 0, 3).unwrap();

        assert_eq!(
            max_flow.clone().max_iterations(Some(1)).edmonds_karp().unwrap_err(),
            FlowError::IterationLimit { limit: 1 }
        );

        let result = max_flow.max_iterations(Some(10)).edmonds_karp().unwrap();
        assert_eq!(result.value(), 5);
    }

    #[test]
    fn validate_detects_broken_flows() {
        let capacities = diamond();
        let mut result = capacities.edmonds_karp(0, 3).unwrap();
        assert!(result.validate().is_ok());

        result.value += 1;
        assert!(matches!(
            result.validate(),
            Err(FlowError::UnbalancedTerminals { value: 6, .. })
        ));
        result.value -= 1;

        // 1 -> 3 is saturated by every maximum flow
        assert_eq!(result.flow.weight_of(1, 3), Some(2));
        result.flow.set_weight(1, 3, 1);
        result.residual.set_weight(1, 3, 1);
        assert!(matches!(
            result.validate(),
            Err(FlowError::ConservationViolated { node: 1, .. })
        ));

        result.flow.set_weight(1, 3, 7);
        assert!(matches!(
            result.validate(),
            Err(FlowError::CapacityExceeded { from: 1, to: 3, .. })
        ));

        result.flow.set_weight(1, 3, 2);
        result.residual.set_weight(1, 3, 0);
        assert!(result.validate().is_ok());

        result.residual.set_weight(0, 2, 2);
        assert!(matches!(
            result.validate(),
            Err(FlowError::ResidualMismatch { from: 0, to: 2, .. })
        ));
    }

    #[test]
    fn cross_check() {
        let capacities = diamond();
        let check = MaxFlow::new(&capacities, 0, 3).unwrap().cross_check().unwrap();

        assert_eq!(check.value(), 5);
        assert_eq!(check.depth_first.algorithm, Algorithm::FordFulkerson);
        assert_eq!(check.breadth_first.algorithm, Algorithm::EdmondsKarp);
        assert!(check.breadth_first.flow_per_iteration() > 0.0);
        assert!(check.speedup_percent().is_finite());
    }

    #[test]
    fn random_networks_agree() {
        let rng = &mut Pcg64Mcg::seed_from_u64(42);

        for _ in 0..100 {
            let n = rng.random_range(2..30 as NumNodes);
            let m = rng.random_range(0..=n * (n - 1));
            let capacities = WeightedDigraph::random_network_with_weights(rng, n, m, 0..20);

            let s = rng.random_range(0..n);
            let t = (s + rng.random_range(1..n)) % n;

            let check = MaxFlow::new(&capacities, s, t).unwrap().cross_check().unwrap();
            assert!(check.value() <= capacities.total_weight_out_of(s).unwrap());
            assert!(check.value() <= capacities.total_weight_into(t).unwrap());
        }
    }
}
