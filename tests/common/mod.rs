//! Shared fixtures for the strategy integration tests.

use std::cell::Cell;

use informed_search::problem::Action;
use informed_search::problem::Heuristic;
use informed_search::problem::Problem;
use informed_search::problem::State;
use informed_search::value::Value;

/// A graph vertex together with the cost accumulated to reach it.
#[derive(Clone, Debug, PartialEq)]
pub struct GraphState {
    pub index: usize,
    pub cost: f64,
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
pub struct Traverse {
    pub target: usize,
    pub cost: f64,
}

impl Action<GraphState> for Traverse {
    fn apply(&self, state: &GraphState) -> GraphState {
        GraphState {
            index: self.target,
            cost: state.cost + self.cost,
        }
    }
}

/// A directed graph as an adjacency matrix of optional edge costs.
///
/// Counts `actions()` calls, so tests can check how many expansions a
/// strategy performed.
#[derive(Debug)]
pub struct GraphProblem {
    edges: Vec<Vec<Option<f64>>>,
    start: usize,
    goal: usize,
    expansions: Cell<usize>,
}

impl GraphProblem {
    pub fn weighted(edges: Vec<Vec<Option<f64>>>, start: usize, goal: usize) -> Self {
        assert!(edges.iter().all(|row| row.len() == edges.len()));
        Self {
            edges,
            start,
            goal,
            expansions: Cell::new(0),
        }
    }

    /// How many states have been branched so far.
    pub fn expansions(&self) -> usize {
        self.expansions.get()
    }
}

impl Problem for GraphProblem {
    type State = GraphState;
    type Action = Traverse;

    fn initial_state(&self) -> Self::State {
        GraphState {
            index: self.start,
            cost: 0.0,
        }
    }

    fn is_solution(&self, state: &Self::State) -> bool {
        state.index == self.goal
    }

    fn actions(&self, state: &Self::State) -> Vec<Self::Action> {
        self.expansions.set(self.expansions.get() + 1);
        self.edges[state.index]
            .iter()
            .enumerate()
            .filter_map(|(target, cost)| cost.map(|cost| Traverse { target, cost }))
            .collect()
    }
}

/// The three-vertex line `0 -> 1 -> 2` with unit edges.
pub fn three_node() -> GraphProblem {
    GraphProblem::weighted(
        vec![
            vec![None, Some(1.0), None],
            vec![None, None, Some(1.0)],
            vec![None, None, None],
        ],
        0,
        2,
    )
}

/// Two routes to vertex 3: `0 -> 2 -> 3` at cost 2 and `0 -> 1 -> 3` at
/// cost 6. Best-first with the zero heuristic reaches every vertex through
/// its cheapest route first on this graph.
pub fn two_route() -> GraphProblem {
    GraphProblem::weighted(
        vec![
            vec![None, Some(5.0), Some(1.0), None],
            vec![None, None, None, Some(1.0)],
            vec![None, None, None, Some(1.0)],
            vec![None, None, None, None],
        ],
        0,
        3,
    )
}

/// A diamond `0 -> {1, 2} -> 3 -> 4` with unit edges; vertex 3 is reachable
/// twice, so it exposes duplicate expansion.
pub fn diamond() -> GraphProblem {
    GraphProblem::weighted(
        vec![
            vec![None, Some(1.0), Some(1.0), None, None],
            vec![None, None, None, Some(1.0), None],
            vec![None, None, None, Some(1.0), None],
            vec![None, None, None, None, Some(1.0)],
            vec![None, None, None, None, None],
        ],
        0,
        4,
    )
}

/// The exact remaining distance to the goal of [`two_route`]. Admissible.
#[derive(Debug)]
pub struct RemainingDistance(pub Vec<f64>);

impl Heuristic<GraphState> for RemainingDistance {
    fn evaluate(&self, state: &GraphState) -> Value {
        Value::scalar(self.0[state.index])
    }
}

/// A heuristic of the wrong shape for scalar-valued problems.
#[derive(Debug)]
pub struct VectorEstimate;

impl Heuristic<GraphState> for VectorEstimate {
    fn evaluate(&self, _state: &GraphState) -> Value {
        Value::vector([0.0, 0.0])
    }
}

/// A state on the unbounded counter line.
#[derive(Clone, Debug)]
pub struct CounterState(pub u64);

impl State for CounterState {
    type Key = u64;

    fn key(&self) -> Self::Key {
        self.0
    }

    fn value(&self) -> Value {
        Value::scalar(self.0 as f64)
    }
}

#[derive(Clone, Debug)]
pub struct Increment;

impl Action<CounterState> for Increment {
    fn apply(&self, state: &CounterState) -> CounterState {
        CounterState(state.0 + 1)
    }
}

/// An unbounded problem with no solution; only a timeout stops it.
#[derive(Debug)]
pub struct CounterProblem;

impl Problem for CounterProblem {
    type State = CounterState;
    type Action = Increment;

    fn initial_state(&self) -> Self::State {
        CounterState(0)
    }

    fn is_solution(&self, _state: &Self::State) -> bool {
        false
    }

    fn actions(&self, _state: &Self::State) -> Vec<Self::Action> {
        vec![Increment]
    }
}

/// A state whose value is assigned per vertex rather than accumulated.
#[derive(Clone, Debug)]
pub struct RatedState {
    pub index: usize,
    pub rating: f64,
}

impl State for RatedState {
    type Key = usize;

    fn key(&self) -> Self::Key {
        self.index
    }

    fn value(&self) -> Value {
        Value::scalar(self.rating)
    }
}

#[derive(Clone, Debug)]
pub struct StepTo {
    target: usize,
    rating: f64,
}

impl Action<RatedState> for StepTo {
    fn apply(&self, _state: &RatedState) -> RatedState {
        RatedState {
            index: self.target,
            rating: self.rating,
        }
    }
}

/// A line of vertices with per-vertex ratings and no goal. Greedy descends
/// it while ratings improve and stops at the valley.
#[derive(Debug)]
pub struct ValleyProblem {
    pub ratings: Vec<f64>,
}

impl Problem for ValleyProblem {
    type State = RatedState;
    type Action = StepTo;

    fn initial_state(&self) -> Self::State {
        RatedState {
            index: 0,
            rating: self.ratings[0],
        }
    }

    fn is_solution(&self, _state: &Self::State) -> bool {
        false
    }

    fn actions(&self, state: &Self::State) -> Vec<Self::Action> {
        let next = state.index + 1;
        self.ratings
            .get(next)
            .map(|&rating| StepTo {
                target: next,
                rating,
            })
            .into_iter()
            .collect()
    }
}
