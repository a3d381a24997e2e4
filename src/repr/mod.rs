/*!
# Weighted Directed Graph Representation

[`WeightedDigraph`] is an arena of nodes indexed by their dense id. Every node stores

- its **outgoing** edges as an ordered map `to -> weight` (keys are unique, so parallel edges
  collapse into one), and
- the set of **predecessors**, i.e. all nodes holding an edge into it.

The predecessor index allows walking edges backwards without scanning the whole graph, which
the max-flow algorithms rely on to cancel flow. Capacity, flow and residual graphs all use
this representation.
*/

use crate::{ops::*, *};

mod weighted;

pub use weighted::*;
