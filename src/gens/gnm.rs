use fxhash::FxHashMap;
use log::warn;
use rand_distr::{Distribution, Uniform};

use super::*;

/// Generator for uniform `G(n,m)` random networks with `n` nodes and `m` distinct directed edges
/// without self-loops. Every edge gets an independent uniformly random capacity.
///
/// The generator can be parameterized via:
/// - `.nodes(n)`: total number of nodes
/// - `.edges(m)`: total number of edges
/// - `.weights(a..b)`: capacities are drawn from `a..b`, by default `1..1000`
///
/// Requesting more than the `n(n-1)` possible edges yields all of them.
#[derive(Debug, Clone)]
pub struct WeightedGnm {
    n: u64,
    m: u64,
    weights: Range<Weight>,
}

impl Default for WeightedGnm {
    fn default() -> Self {
        Self {
            n: 0,
            m: 0,
            weights: DEFAULT_MIN_WEIGHT..DEFAULT_MAX_WEIGHT,
        }
    }
}

impl WeightedGnm {
    /// Creates a new empty generator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of possible loop-free directed edges
    fn edge_space(&self) -> u64 {
        self.n * self.n.saturating_sub(1)
    }
}

impl NumNodesGen for WeightedGnm {
    fn nodes(mut self, n: NumNodes) -> Self {
        self.n = n as u64;
        self
    }
}

impl NumEdgesGen for WeightedGnm {
    fn edges(mut self, m: NumEdges) -> Self {
        self.m = m as u64;
        self
    }
}

impl WeightRangeGen for WeightedGnm {
    fn weights(mut self, range: Range<Weight>) -> Self {
        assert!(!range.is_empty(), "Weight range {range:?} is empty");
        self.weights = range;
        self
    }
}

impl GraphGenerator for WeightedGnm {
    /// Returns a streaming iterator over a random edge set.
    /// Edges are sampled uniformly without replacement.
    fn stream<R>(&self, rng: &mut R) -> impl Iterator<Item = WeightedEdge>
    where
        R: Rng,
    {
        let end = self.edge_space();
        let m = if self.m > end {
            warn!(
                "Requested {} edges, but a loop-free network with {} nodes has at most {end}",
                self.m, self.n
            );
            end
        } else {
            self.m
        };

        let weights = Uniform::new(self.weights.start, self.weights.end)
            .expect("weight range is checked to be non-empty");

        WeightedGnmGenerator {
            n: self.n,
            rem: m,
            cur: 0,
            end,
            map: FxHashMap::with_capacity_and_hasher(m as usize, Default::default()),
            weights,
            rng,
        }
    }
}

/// Given `n` nodes and the space of all `n(n-1)` loop-free directed edges, this iterator
/// produces exactly `m` uniformly random and distinct edges without replacement.
///
/// The algorithm used is based on:
/// > *V. Batagelj and U. Brandes. Efficient Generation of Large Random Networks.
/// > Physical Review E 71.3 (2005): 036113.*
///
/// Instead of shuffling the whole edge space, a sparse map records which positions of a
/// virtual Fisher-Yates shuffle have been swapped.
pub struct WeightedGnmGenerator<'a, R>
where
    R: Rng,
{
    n: u64,
    rem: u64,
    cur: u64,
    end: u64,
    map: FxHashMap<u64, u64>,
    weights: Uniform<Weight>,
    rng: &'a mut R,
}

impl<R> WeightedGnmGenerator<'_, R>
where
    R: Rng,
{
    /// Selects the next unique edge index in `[0, end)`
    fn next_step(&mut self) -> Option<u64> {
        if self.rem == 0 {
            return None;
        }

        // Draw value and check if it was swapped before
        let drawn = self.rng.random_range(self.cur..self.end);
        let next = self.map.get(&drawn).copied().unwrap_or(drawn);

        // Move the value at `cur` into the drawn slot
        let replacement = self.map.get(&self.cur).copied().unwrap_or(self.cur);
        self.map.insert(drawn, replacement);

        self.cur += 1;
        self.rem -= 1;

        Some(next)
    }
}

impl<R> Iterator for WeightedGnmGenerator<'_, R>
where
    R: Rng,
{
    type Item = WeightedEdge;

    fn next(&mut self) -> Option<Self::Item> {
        let x = self.next_step()?;
        let mut edge = WeightedEdge::from_u64_no_loops(x, self.n);
        edge.weight = self.weights.sample(self.rng);
        Some(edge)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.rem as usize, Some(self.rem as usize))
    }
}

impl<R> ExactSizeIterator for WeightedGnmGenerator<'_, R> where R: Rng {}
