/*!
# Graph Generators

Random weighted networks for experiments and tests.

Generators follow a builder-style pattern:

1. Create a generator instance (e.g., `WeightedGnm::new()`).
2. Set parameters using trait methods (e.g., `.nodes(n).edges(m)`).
3. Generate edges via `generate()` or `stream()`.

Generated networks never contain self-loops. They are *not* guaranteed to be connected, so a
chosen sink may well be unreachable from a chosen source.

The [`RandomNetwork`] trait wraps this into a single call on any graph type that can be built
from an edge list.
*/

use std::ops::Range;

use rand::Rng;

use crate::prelude::*;

mod gnm;

pub use gnm::*;

/// Smallest capacity drawn by default
pub const DEFAULT_MIN_WEIGHT: Weight = 1;

/// Capacities are drawn from `DEFAULT_MIN_WEIGHT..DEFAULT_MAX_WEIGHT` by default (exclusive)
pub const DEFAULT_MAX_WEIGHT: Weight = 1000;

/// Trait for generators that allow setting the number of nodes.
pub trait NumNodesGen {
    /// Sets the number of nodes in the graph generator.
    fn nodes(self, n: NumNodes) -> Self;
}

/// Trait for generators that allow setting the number of edges.
pub trait NumEdgesGen {
    /// Sets the number of edges in the graph generator.
    fn edges(self, m: NumEdges) -> Self;
}

/// Trait for generators that allow setting the range capacities are drawn from.
pub trait WeightRangeGen {
    /// Sets the (exclusive) range of weights.
    /// ** Panics if the range is empty **
    fn weights(self, range: Range<Weight>) -> Self;
}

/// General trait for a configurable random edge generator.
pub trait GraphGenerator {
    /// Generates a list of random edges.
    fn generate<R>(&self, rng: &mut R) -> Vec<WeightedEdge>
    where
        R: Rng,
    {
        self.stream(rng).collect()
    }

    /// Creates a lazy iterator (stream) over generated edges.
    fn stream<R>(&self, rng: &mut R) -> impl Iterator<Item = WeightedEdge>
    where
        R: Rng;
}

/// Trait for building random flow networks directly.
pub trait RandomNetwork: Sized {
    /// Creates a random network with `n` nodes and `m` distinct, loop-free edges whose
    /// capacities are drawn uniformly from the default weight range.
    fn random_network<R>(rng: &mut R, n: NumNodes, m: NumEdges) -> Self
    where
        R: Rng,
    {
        Self::random_network_with_weights(rng, n, m, DEFAULT_MIN_WEIGHT..DEFAULT_MAX_WEIGHT)
    }

    /// Same as [`RandomNetwork::random_network`] with a custom (exclusive) weight range.
    fn random_network_with_weights<R>(
        rng: &mut R,
        n: NumNodes,
        m: NumEdges,
        weights: Range<Weight>,
    ) -> Self
    where
        R: Rng;
}

impl<G> RandomNetwork for G
where
    G: GraphFromScratch,
{
    fn random_network_with_weights<R>(
        rng: &mut R,
        n: NumNodes,
        m: NumEdges,
        weights: Range<Weight>,
    ) -> Self
    where
        R: Rng,
    {
        Self::from_edges(
            n,
            WeightedGnm::new()
                .nodes(n)
                .edges(m)
                .weights(weights)
                .stream(rng),
        )
    }
}
