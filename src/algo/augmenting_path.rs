use std::fmt::Display;

use super::*;

/// How a step of an augmenting path uses the network
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StepDirection {
    /// The step follows an edge `u -> v` that has residual capacity left
    Forward,
    /// The step `u -> v` cancels flow that was previously pushed along the edge `v -> u`
    Backward,
}

/// A single step of an [`AugmentingPath`].
///
/// `capacity` is the amount that could be pushed along this step when the path was found:
/// the residual capacity for forward steps and the cancellable flow for backward steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PathStep {
    pub to: Node,
    pub capacity: Weight,
    pub direction: StepDirection,
}

impl PathStep {
    /// Creates a step along a real edge with residual capacity `capacity`
    pub fn forward(to: Node, capacity: Weight) -> Self {
        Self {
            to,
            capacity,
            direction: StepDirection::Forward,
        }
    }

    /// Creates a step that cancels up to `capacity` units of flow on the edge `to -> (current)`
    pub fn backward(to: Node, capacity: Weight) -> Self {
        Self {
            to,
            capacity,
            direction: StepDirection::Backward,
        }
    }

    /// Returns *true* if the step cancels existing flow
    pub fn is_cancellation(&self) -> bool {
        self.direction == StepDirection::Backward
    }
}

/// A path from a source through the residual network.
///
/// An empty path (no steps) is a valid value, but cannot be used for augmentation as it has
/// no bottleneck.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AugmentingPath {
    source: Node,
    steps: Vec<PathStep>,
}

impl AugmentingPath {
    /// Creates an empty path starting (and ending) at `source`
    pub fn new(source: Node) -> Self {
        Self {
            source,
            steps: Vec::new(),
        }
    }

    /// Creates a path from its steps
    pub fn from_steps(source: Node, steps: Vec<PathStep>) -> Self {
        Self { source, steps }
    }

    /// Appends a step to the end of the path
    pub fn push(&mut self, step: PathStep) {
        self.steps.push(step);
    }

    /// First node of the path
    pub fn source(&self) -> Node {
        self.source
    }

    /// Last node of the path
    pub fn sink(&self) -> Node {
        self.steps.last().map_or(self.source, |step| step.to)
    }

    /// All steps in order
    pub fn steps(&self) -> &[PathStep] {
        &self.steps
    }

    /// Number of steps
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Returns *true* if the path has no steps
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Number of steps cancelling existing flow
    pub fn number_of_cancellations(&self) -> usize {
        self.steps.iter().filter(|step| step.is_cancellation()).count()
    }

    /// Returns all nodes of the path, starting with the source
    pub fn nodes(&self) -> impl Iterator<Item = Node> + '_ {
        std::iter::once(self.source).chain(self.steps.iter().map(|step| step.to))
    }

    /// Returns every step together with the node it starts from
    pub fn arcs(&self) -> impl Iterator<Item = (Node, PathStep)> + '_ {
        self.nodes().zip(self.steps.iter().copied())
    }

    /// Smallest capacity along the path, or `None` for an empty path
    pub fn bottleneck(&self) -> Option<Weight> {
        self.steps.iter().map(|step| step.capacity).min()
    }
}

/// Renders forward steps as `u -> v` and cancellations as `u <- v`, following the orientation
/// of the edge whose flow is affected
impl Display for AugmentingPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.source)?;
        for step in &self.steps {
            match step.direction {
                StepDirection::Forward => write!(f, " -> {}", step.to)?,
                StepDirection::Backward => write!(f, " <- {}", step.to)?,
            }
        }
        Ok(())
    }
}

/// Pushes the bottleneck of `path` into the flow graph: forward steps increase the flow of
/// their edge, backward steps decrease the flow of the reversed edge.
///
/// Returns the amount pushed, which is `0` for an empty path. The flow graph is left partially
/// updated if an error is returned.
pub fn add_augmenting_path<G>(path: &AugmentingPath, flow: &mut G) -> Result<Weight, FlowError>
where
    G: GraphEdgeEditing,
{
    let Some(amount) = path.bottleneck() else {
        return Ok(0);
    };

    for (from, step) in path.arcs() {
        let to = step.to;
        match step.direction {
            StepDirection::Forward => {
                require_edge(flow, from, to)?;
                flow.add_to_weight(from, to, amount)
                    .ok_or(FlowError::Overflow)?;
            }
            StepDirection::Backward => {
                require_edge(flow, to, from)?;
                flow.sub_from_weight(to, from, amount)
                    .ok_or(FlowError::NegativeFlow { from: to, to: from })?;
            }
        }
    }

    Ok(amount)
}

/// Debits the bottleneck of `path` from the residual graph: forward steps lose residual
/// capacity, backward steps give capacity back to the reversed edge.
///
/// Returns the amount debited, which is `0` for an empty path. The residual graph is left
/// partially updated if an error is returned.
pub fn subtract_augmenting_path<G>(
    path: &AugmentingPath,
    residual: &mut G,
) -> Result<Weight, FlowError>
where
    G: GraphEdgeEditing,
{
    let Some(amount) = path.bottleneck() else {
        return Ok(0);
    };

    for (from, step) in path.arcs() {
        let to = step.to;
        match step.direction {
            StepDirection::Forward => {
                require_edge(residual, from, to)?;
                residual
                    .sub_from_weight(from, to, amount)
                    .ok_or(FlowError::NegativeResidual { from, to })?;
            }
            StepDirection::Backward => {
                require_edge(residual, to, from)?;
                residual
                    .add_to_weight(to, from, amount)
                    .ok_or(FlowError::Overflow)?;
            }
        }
    }

    Ok(amount)
}

fn require_edge<G: WeightedAdjacencyList>(graph: &G, from: Node, to: Node) -> Result<(), FlowError> {
    if graph.contains_node(from) && graph.contains_node(to) && graph.has_edge(from, to) {
        Ok(())
    } else {
        Err(FlowError::MissingEdge { from, to })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use itertools::Itertools;

    fn diamond() -> WeightedDigraph {
        WeightedDigraph::from_edges(4, [(0, 1, 3), (0, 2, 2), (1, 2, 1), (1, 3, 2), (2, 3, 3)])
    }

    #[test]
    fn bottleneck() {
        let mut path = AugmentingPath::new(0);
        assert_eq!(path.bottleneck(), None);
        assert_eq!(path.sink(), 0);

        path.push(PathStep::forward(1, 3));
        path.push(PathStep::backward(2, 1));
        path.push(PathStep::forward(3, 7));

        assert_eq!(path.bottleneck(), Some(1));
        assert_eq!(path.sink(), 3);
        assert_eq!(path.len(), 3);
        assert_eq!(path.number_of_cancellations(), 1);
        assert_eq!(path.nodes().collect_vec(), vec![0, 1, 2, 3]);
        assert_eq!(path.to_string(), "0 -> 1 <- 2 -> 3");
    }

    #[test]
    fn empty_path_changes_nothing() {
        let mut flow = diamond().zeroed();
        let path = AugmentingPath::new(0);

        assert_eq!(add_augmenting_path(&path, &mut flow), Ok(0));
        assert_eq!(flow, diamond().zeroed());
    }

    #[test]
    fn forward_then_cancel() {
        let capacities = diamond();
        let mut flow = capacities.zeroed();
        let mut residual = capacities.clone();

        let first = AugmentingPath::from_steps(
            0,
            vec![
                PathStep::forward(1, 3),
                PathStep::forward(2, 1),
                PathStep::forward(3, 3),
            ],
        );
        assert_eq!(add_augmenting_path(&first, &mut flow), Ok(1));
        assert_eq!(subtract_augmenting_path(&first, &mut residual), Ok(1));
        assert_eq!(flow.weight_of(1, 2), Some(1));
        assert_eq!(residual.weight_of(1, 2), Some(0));
        assert_eq!(residual.weight_of(0, 1), Some(2));

        // 0 -> 2 <- 1 -> 3 reroutes the unit on 1 -> 2
        let second = AugmentingPath::from_steps(
            0,
            vec![
                PathStep::forward(2, 2),
                PathStep::backward(1, 1),
                PathStep::forward(3, 2),
            ],
        );
        assert_eq!(add_augmenting_path(&second, &mut flow), Ok(1));
        assert_eq!(subtract_augmenting_path(&second, &mut residual), Ok(1));

        assert_eq!(flow.weight_of(1, 2), Some(0));
        assert_eq!(residual.weight_of(1, 2), Some(1));
        assert_eq!(flow.total_weight_out_of(0), Some(2));
        assert_eq!(flow.total_weight_into(3), Some(2));
    }

    #[test]
    fn invariant_violations() {
        let capacities = diamond();

        let mut residual = capacities.clone();
        let too_much = AugmentingPath::from_steps(0, vec![PathStep::forward(1, 5)]);
        assert_eq!(
            subtract_augmenting_path(&too_much, &mut residual),
            Err(FlowError::NegativeResidual { from: 0, to: 1 })
        );

        let mut flow = capacities.zeroed();
        let nothing_to_cancel =
            AugmentingPath::from_steps(2, vec![PathStep::backward(1, 1)]);
        assert_eq!(
            add_augmenting_path(&nothing_to_cancel, &mut flow),
            Err(FlowError::NegativeFlow { from: 1, to: 2 })
        );

        let no_edge = AugmentingPath::from_steps(3, vec![PathStep::forward(0, 1)]);
        assert_eq!(
            add_augmenting_path(&no_edge, &mut flow),
            Err(FlowError::MissingEdge { from: 3, to: 0 })
        );
    }
}
