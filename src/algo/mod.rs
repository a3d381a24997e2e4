/*!
# Maximum Flow

This module computes maximum `s-t` flows on a capacity graph with the augmenting path method.
Everything is re-exported at the top level of this module, so you can simply do:
```rust
use wgraphs::algo::*;
```

## Building blocks
- [`ResidualNetwork`] holds the *flow* and *residual* graph of a single run and answers which
  steps a search may take from a node. Pushing flow along an edge `u -> v` opens a reverse step
  `v -> u` that can cancel up to the pushed amount again.
- [`AugmentingPath`] is the result of a search: a sequence of forward and cancellation steps.
- [`PathFinder`] is implemented by [`DepthFirst`] (first path found, Ford-Fulkerson) and
  [`BreadthFirst`] (shortest path, Edmonds-Karp).
- [`MaxFlow`] drives the search-augment loop and returns a [`FlowResult`].
- [`NetworkFlow`] exposes both algorithms directly on the graph.

The capacity graph is never modified. All state of a run is owned by that run, so one capacity
graph may be shared by any number of computations.
*/

mod augmenting_path;
mod network_flow;
mod path_search;
mod residual;

use crate::prelude::*;
use thiserror::Error;

pub use augmenting_path::*;
pub use network_flow::*;
pub use path_search::*;
pub use residual::*;

/// Errors raised by a max-flow computation.
///
/// Apart from the input validation errors and [`FlowError::IterationLimit`], every variant
/// signals a broken invariant: the computation is aborted rather than returning a wrong value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FlowError {
    #[error("source node {node} is not a node of the graph (0..{n})")]
    SourceOutOfRange { node: Node, n: NumNodes },

    #[error("sink node {node} is not a node of the graph (0..{n})")]
    SinkOutOfRange { node: Node, n: NumNodes },

    #[error("source and sink must differ, but both are node {node}")]
    SourceIsSink { node: Node },

    #[error("residual capacity of {from} -> {to} would become negative")]
    NegativeResidual { from: Node, to: Node },

    #[error("flow on {from} -> {to} would become negative")]
    NegativeFlow { from: Node, to: Node },

    #[error("augmenting path steps from {from} to {to} along an edge that does not exist")]
    MissingEdge { from: Node, to: Node },

    #[error("flow {flow} on {from} -> {to} exceeds its capacity {capacity}")]
    CapacityExceeded {
        from: Node,
        to: Node,
        flow: Weight,
        capacity: Weight,
    },

    #[error("node {node} receives {inflow} units of flow but emits {outflow}")]
    ConservationViolated {
        node: Node,
        inflow: Weight,
        outflow: Weight,
    },

    #[error(
        "net flow leaving the source ({outflow:?}) and entering the sink ({inflow:?}) must both equal {value}"
    )]
    UnbalancedTerminals {
        value: Weight,
        outflow: Option<Weight>,
        inflow: Option<Weight>,
    },

    #[error("residual capacity of {from} -> {to} is {actual}, but capacity minus flow is {expected}")]
    ResidualMismatch {
        from: Node,
        to: Node,
        actual: Weight,
        expected: Weight,
    },

    #[error("no maximum flow found within {limit} augmentations")]
    IterationLimit { limit: usize },

    #[error("Ford-Fulkerson found a flow of {depth_first}, but Edmonds-Karp found {breadth_first}")]
    AlgorithmMismatch {
        depth_first: Weight,
        breadth_first: Weight,
    },

    #[error("flow value does not fit into the weight type")]
    Overflow,
}
