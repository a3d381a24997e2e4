/*!
`wgraphs` is a small library for maximum flows on graphs that are
- **w**eighted : Every edge carries a non-negative integer capacity
- directed : `u -> v` and `v -> u` are two independent edges
- dense-indexed : Nodes are numbered `0` to `n - 1`

# Representation

We represent **nodes** as `u32` in the range `0..n` where `n` is the number of nodes in the graph.
**Edges** are [`WeightedEdge`]s with a `u64` weight. Parallel edges collapse into one: inserting the
same `(from, to)` pair twice keeps the last weight.

The only representation is [`WeightedDigraph`](crate::repr::WeightedDigraph), an arena of per-node
adjacency maps that also keeps, for every node, the set of nodes holding an edge into it.

# Design

All algorithms/generators are provided as configurable structs that one can alter to their needs
using the *Builder* / *Setter* pattern before running them on a provided graph.
The most common functionality is also implemented via traits on the graph itself.

# Usage

There are *4* core submodules you probably want to interact with:
- [`prelude`] includes definitions for nodes, edges, basic graph operations, and the graph representation,
- [`algo`] includes the max-flow engine: Ford-Fulkerson (`graph.ford_fulkerson(s, t)`) and
  Edmonds-Karp (`graph.edmonds_karp(s, t)`) on top of a shared residual network,
- [`gens`] includes a random network generator,
- [`io`] reads and writes the plain-text edge-list format.

In most use-cases, `use wgraphs::{prelude::*, algo::*};` suffices for your needs.

```
use wgraphs::{algo::*, prelude::*};

let graph = WeightedDigraph::from_edges(4, [(0, 1, 3), (0, 2, 2), (1, 2, 1), (1, 3, 2), (2, 3, 3)]);
let flow = graph.edmonds_karp(0, 3).unwrap();
assert_eq!(flow.value(), 5);
```
*/

pub mod algo;
pub mod edge;
pub mod gens;
pub mod io;
pub mod node;
pub mod ops;
pub mod repr;

pub use edge::*;
pub use node::*;

/// `wgraphs::prelude` includes definitions for nodes and edges, all basic graph operation traits as well as the graph representation.
pub mod prelude {
    pub use super::{edge::*, node::*, ops::*, repr::*};
}
