use std::fmt::{Debug, Display};

use crate::Node;

/// Capacities, flows and residual amounts are non-negative integers
pub type Weight = u64;

/// We limit the number of edges to `2^32 - 1`.
/// CHANGE it to `u64` if this does not suffice (which it usually should).
pub type NumEdges = u32;

/// A directed, weighted edge `from -> to`.
///
/// Depending on the graph it is stored in, `weight` is a capacity, a flow or a residual amount.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WeightedEdge {
    pub from: Node,
    pub to: Node,
    pub weight: Weight,
}

impl WeightedEdge {
    pub fn new(from: Node, to: Node, weight: Weight) -> Self {
        Self { from, to, weight }
    }

    /// Returns true if both endpoints are equal
    pub fn is_loop(&self) -> bool {
        self.from == self.to
    }

    /// Returns the same edge with the endpoints switched
    pub fn reverse(&self) -> Self {
        Self::new(self.to, self.from, self.weight)
    }

    /// Simple bijection from `0..n(n-1)` to all possible loop-free directed edges of `n` nodes.
    /// The weight is left at `0`.
    pub fn from_u64_no_loops(x: u64, n: u64) -> Self {
        debug_assert!(n > 1 && x < n * (n - 1));

        let u = x / (n - 1);
        let r = x % (n - 1);
        // skip the diagonal
        let v = if r >= u { r + 1 } else { r };

        Self::new(u as Node, v as Node, 0)
    }
}

impl Display for WeightedEdge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -({})-> {}", self.from, self.weight, self.to)
    }
}

impl Debug for WeightedEdge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        <Self as Display>::fmt(self, f)
    }
}

impl From<(Node, Node, Weight)> for WeightedEdge {
    fn from(value: (Node, Node, Weight)) -> Self {
        Self::new(value.0, value.1, value.2)
    }
}

impl From<&(Node, Node, Weight)> for WeightedEdge {
    fn from(value: &(Node, Node, Weight)) -> Self {
        Self::new(value.0, value.1, value.2)
    }
}

impl From<&WeightedEdge> for WeightedEdge {
    fn from(value: &WeightedEdge) -> Self {
        *value
    }
}

impl From<WeightedEdge> for (Node, Node, Weight) {
    fn from(value: WeightedEdge) -> Self {
        (value.from, value.to, value.weight)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use itertools::Itertools;

    #[test]
    fn no_loop_bijection() {
        for n in 2..12u64 {
            let edges = (0..n * (n - 1))
                .map(|x| WeightedEdge::from_u64_no_loops(x, n))
                .collect_vec();

            assert!(edges.iter().all(|e| !e.is_loop()));
            assert!(edges.iter().all(|e| (e.from as u64) < n && (e.to as u64) < n));
            assert_eq!(edges.iter().unique().count(), edges.len());
        }
    }

    #[test]
    fn display() {
        assert_eq!(WeightedEdge::new(3, 5, 7).to_string(), "3 -(7)-> 5");
        assert_eq!(WeightedEdge::new(3, 5, 7).reverse(), (5, 3, 7).into());
    }
}
