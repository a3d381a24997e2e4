use std::collections::VecDeque;

use log::trace;

use super::*;

/// Strategy for finding augmenting paths in a [`ResidualNetwork`].
///
/// A finder may keep buffers between calls; it must not keep any other state, as the network
/// changes between two searches.
pub trait PathFinder {
    /// Searches a path from `source` to `sink` where every step has positive capacity.
    /// Returns `None` if `sink` cannot be reached, which terminates the max-flow loop.
    fn find_path<G>(
        &mut self,
        network: &ResidualNetwork<'_, G>,
        source: Node,
        sink: Node,
    ) -> Option<AugmentingPath>
    where
        G: WeightedAdjacencyList;
}

/// Resets `visited` to `n` unset bits without giving up its allocation
fn reset_visited(visited: &mut NodeBitSet, n: NumNodes) {
    visited.clear();
    visited.resize(n as usize, false);
}

/// Depth-first search returning the first path found (Ford-Fulkerson).
///
/// Steps are explored in the order of [`ResidualNetwork::options`] and every node is entered
/// at most once per search, so cycles in the residual network are harmless. The search uses
/// an explicit stack whose depth is bounded by the number of nodes.
#[derive(Debug, Clone, Default)]
pub struct DepthFirst {
    visited: NodeBitSet,
    steps: Vec<PathStep>,
}

impl DepthFirst {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PathFinder for DepthFirst {
    fn find_path<G>(
        &mut self,
        network: &ResidualNetwork<'_, G>,
        source: Node,
        sink: Node,
    ) -> Option<AugmentingPath>
    where
        G: WeightedAdjacencyList,
    {
        if source == sink {
            return None;
        }

        reset_visited(&mut self.visited, network.flow().number_of_nodes());
        self.steps.clear();

        self.visited.set(source as usize, true);

        // `self.steps[i]` is the step leading into the node of frame `i + 1`
        let mut frames = vec![network.options(source)];
        while let Some(frame) = frames.last_mut() {
            let Some(step) = frame.next() else {
                frames.pop();
                self.steps.pop();
                continue;
            };

            if step.to == sink {
                self.steps.push(step);
                return Some(AugmentingPath::from_steps(source, self.steps.clone()));
            }

            if self.visited[step.to as usize] {
                continue;
            }

            self.visited.set(step.to as usize, true);
            self.steps.push(step);
            frames.push(network.options(step.to));
        }

        trace!("DFS: sink {sink} unreachable from {source}");
        None
    }
}

/// Breadth-first search returning a path with the fewest steps (Edmonds-Karp).
///
/// The search stops as soon as the sink is discovered and reconstructs the path from a
/// predecessor array.
#[derive(Debug, Clone, Default)]
pub struct BreadthFirst {
    visited: NodeBitSet,
    queue: VecDeque<Node>,
    predecessor: Vec<Option<(Node, PathStep)>>,
}

impl BreadthFirst {
    pub fn new() -> Self {
        Self::default()
    }

    /// Follows the predecessor array back from `sink`
    fn path_to(&self, source: Node, sink: Node) -> Option<AugmentingPath> {
        let mut steps = Vec::new();
        let mut v = sink;
        while v != source {
            let (u, step) = self.predecessor[v as usize]?;
            steps.push(step);
            v = u;
        }
        steps.reverse();

        Some(AugmentingPath::from_steps(source, steps))
    }
}

impl PathFinder for BreadthFirst {
    fn find_path<G>(
        &mut self,
        network: &ResidualNetwork<'_, G>,
        source: Node,
        sink: Node,
    ) -> Option<AugmentingPath>
    where
        G: WeightedAdjacencyList,
    {
        if source == sink {
            return None;
        }

        let n = network.flow().number_of_nodes();
        reset_visited(&mut self.visited, n);
        self.queue.clear();
        self.predecessor.clear();
        self.predecessor.resize(n as usize, None);

        self.visited.set(source as usize, true);
        self.queue.push_back(source);

        while let Some(u) = self.queue.pop_front() {
            for step in network.options(u) {
                if self.visited[step.to as usize] {
                    continue;
                }

                self.visited.set(step.to as usize, true);
                self.predecessor[step.to as usize] = Some((u, step));

                if step.to == sink {
                    return self.path_to(source, sink);
                }

                self.queue.push_back(step.to);
            }
        }

        trace!("BFS: sink {sink} unreachable from {source}");
        None
    }
}
