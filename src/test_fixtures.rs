//! Small adjacency-matrix graphs used by the unit tests.

use crate::problem::Action;
use crate::problem::Problem;
use crate::problem::State;
use crate::value::Value;

/// A graph vertex together with the cost accumulated to reach it.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct GraphState {
    index: usize,
    cost: f64,
}

impl GraphState {
    pub(crate) fn new(index: usize) -> Self {
        Self::with_cost(index, 0.0)
    }

    pub(crate) fn with_cost(index: usize, cost: f64) -> Self {
        Self { index, cost }
    }
}

impl State for GraphState {
    type Key = usize;

    fn key(&self) -> Self::Key {
        self.index
    }

    fn value(&self) -> Value {
        Value::scalar(self.cost)
    }
}

/// Crossing one weighted edge.
#[derive(Clone, Debug)]
pub(crate) struct Traverse {
    target: usize,
    cost: f64,
}

impl Action<GraphState> for Traverse {
    fn apply(&self, state: &GraphState) -> GraphState {
        GraphState::with_cost(self.target, state.cost + self.cost)
    }
}

/// A directed graph as an adjacency matrix of optional edge costs.
#[derive(Debug)]
pub(crate) struct GraphProblem {
    edges: Vec<Vec<Option<f64>>>,
    start: usize,
    goal: usize,
}

impl GraphProblem {
    pub(crate) fn weighted(edges: Vec<Vec<Option<f64>>>, start: usize, goal: usize) -> Self {
        debug_assert!(edges.iter().all(|row| row.len() == edges.len()));
        Self { edges, start, goal }
    }

    /// A path graph `0 -> 1 -> .. -> n-1` with unit edges, solved at the end.
    pub(crate) fn unit_chain(n: usize) -> Self {
        let mut edges = vec![vec![None; n]; n];
        for i in 1..n {
            edges[i - 1][i] = Some(1.0);
        }
        Self::weighted(edges, 0, n - 1)
    }
}

impl Problem for GraphProblem {
    type State = GraphState;
    type Action = Traverse;

    fn initial_state(&self) -> Self::State {
        GraphState::new(self.start)
    }

    fn is_solution(&self, state: &Self::State) -> bool {
        state.index == self.goal
    }

    fn actions(&self, state: &Self::State) -> Vec<Self::Action> {
        self.edges[state.index]
            .iter()
            .enumerate()
            .filter_map(|(target, cost)| cost.map(|cost| Traverse { target, cost }))
            .collect()
    }
}
