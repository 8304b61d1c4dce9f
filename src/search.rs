use std::time::Duration;
use std::time::Instant;

use rustc_hash::FxHashSet;
use thiserror::Error;

use crate::problem::Action;
use crate::problem::Problem;
use crate::problem::State;
use crate::value::Value;
use crate::value::ValueError;

pub type StateKey<P> = <<P as Problem>::State as State>::Key;

/// States already discovered within one `solve` invocation.
///
/// Owned exclusively by that invocation; grows monotonically and is
/// discarded when `solve` returns.
pub type SeenSet<P> = FxHashSet<StateKey<P>>;

#[derive(Debug, Error)]
pub enum SearchError {
    /// The hard deadline elapsed before the search terminated.
    #[error("hard timeout of {0:?} elapsed with no result")]
    Timeout(Duration),
    /// A `Value` operation mixed scalar and vector shapes. A programming
    /// error in the `Problem`/`Heuristic` implementation, surfaced rather
    /// than coerced.
    #[error(transparent)]
    Value(#[from] ValueError),
}

/// A discovered state together with the actions that reached it.
///
/// The engine extends `path` deterministically at every branching step;
/// states themselves are never mutated.
pub struct Node<P: Problem> {
    pub state: P::State,
    /// Actions taken from the initial state, in order.
    pub path: Vec<P::Action>,
}

impl<P: Problem> Node<P> {
    #[must_use]
    pub fn root(state: P::State) -> Self {
        Self {
            state,
            path: vec![],
        }
    }

    pub(crate) fn child(&self, action: P::Action) -> Self {
        let state = action.apply(&self.state);
        let mut path = self.path.clone();
        path.push(action);
        Self { state, path }
    }

    #[inline(always)]
    pub fn value(&self) -> Value {
        self.state.value()
    }

    #[inline(always)]
    pub fn key(&self) -> StateKey<P> {
        self.state.key()
    }

    #[inline(always)]
    #[must_use]
    pub fn depth(&self) -> usize {
        self.path.len()
    }
}

impl<P: Problem> Clone for Node<P> {
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
            path: self.path.clone(),
        }
    }
}

impl<P: Problem> std::fmt::Debug for Node<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("Node")
            .field("state", &self.state)
            .field("path", &self.path)
            .finish()
    }
}

impl<P: Problem> std::fmt::Display for Node<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "Node({}, {:?}:{:?})",
            self.value(),
            self.state,
            self.path.iter().take(20).collect::<Vec<_>>(),
        )
    }
}

/// Branches a node into its possible continuations.
#[must_use]
pub fn branch<P: Problem>(problem: &P, node: &Node<P>) -> Vec<Node<P>> {
    problem
        .actions(&node.state)
        .into_iter()
        .map(|action| node.child(action))
        .collect()
}

/// Per-invocation `solve` configuration.
pub struct SolveOptions<P: Problem> {
    /// Overrides `Problem::initial_state` when set.
    pub initial_state: Option<P::State>,
    /// Hard deadline. Checked once per outer iteration, so actual wall time
    /// may exceed it by up to one branching step.
    pub timeout: Option<Duration>,
    /// Soft deadline; honored only by the anytime strategy, which returns
    /// its incumbent solution instead of failing once this elapses.
    pub soft_timeout: Option<Duration>,
}

impl<P: Problem> SolveOptions<P> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            initial_state: None,
            timeout: None,
            soft_timeout: None,
        }
    }

    #[must_use]
    pub fn with_initial_state(mut self, state: P::State) -> Self {
        self.initial_state = Some(state);
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    #[must_use]
    pub fn with_soft_timeout(mut self, soft_timeout: Duration) -> Self {
        self.soft_timeout = Some(soft_timeout);
        self
    }
}

impl<P: Problem> Default for SolveOptions<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: Problem> Clone for SolveOptions<P> {
    fn clone(&self) -> Self {
        Self {
            initial_state: self.initial_state.clone(),
            timeout: self.timeout,
            soft_timeout: self.soft_timeout,
        }
    }
}

impl<P: Problem> std::fmt::Debug for SolveOptions<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("SolveOptions")
            .field("initial_state", &self.initial_state)
            .field("timeout", &self.timeout)
            .field("soft_timeout", &self.soft_timeout)
            .finish()
    }
}

/// A traversal strategy over the shared search loop.
///
/// A strategy supplies a frontier and its push/pop policy; the provided
/// `solve` owns everything else: seen-set discipline, timeout enforcement,
/// goal checks, branching. `BreadthFirstSearch`, `DepthFirstSearch` and
/// `BestFirstSearch` use the provided loop as-is; `GreedySearch` and
/// `IterativeDeepeningBestFirstSearch` override `solve`.
pub trait Search<P: Problem> {
    type Frontier;

    fn create_frontier(&self) -> Self::Frontier;

    /// Adds a node to the frontier. Fallible because priority strategies
    /// compute `f = g + h` here, which can mismatch shapes.
    fn frontier_push(
        &self,
        frontier: &mut Self::Frontier,
        node: Node<P>,
    ) -> Result<(), SearchError>;

    /// Removes the next node per the strategy's policy.
    fn frontier_pop(&self, frontier: &mut Self::Frontier) -> Option<Node<P>>;

    fn frontier_is_empty(&self, frontier: &Self::Frontier) -> bool;

    /// Adds a node to the frontier unless its state was already discovered,
    /// and marks it discovered.
    fn push_if_new(
        &self,
        frontier: &mut Self::Frontier,
        node: Node<P>,
        seen: &mut SeenSet<P>,
    ) -> Result<(), SearchError> {
        let key = node.key();
        if seen.contains(&key) {
            return Ok(());
        }
        self.frontier_push(frontier, node)?;
        seen.insert(key);
        Ok(())
    }

    /// Gets a solution to the problem.
    ///
    /// Returns the first goal state popped from the frontier, `Ok(None)`
    /// once the frontier empties without one, or `Err(SearchError::Timeout)`
    /// when the hard deadline elapses first.
    fn solve(
        &self,
        problem: &P,
        options: SolveOptions<P>,
    ) -> Result<Option<Node<P>>, SearchError> {
        let start = Instant::now();
        let initial = options
            .initial_state
            .unwrap_or_else(|| problem.initial_state());

        let mut frontier = self.create_frontier();
        let mut seen = SeenSet::<P>::default();
        self.push_if_new(&mut frontier, Node::root(initial), &mut seen)?;

        while !self.frontier_is_empty(&frontier) {
            if let Some(limit) = options.timeout {
                if start.elapsed() > limit {
                    return Err(SearchError::Timeout(limit));
                }
            }

            let Some(node) = self.frontier_pop(&mut frontier) else {
                break;
            };
            if problem.is_solution(&node.state) {
                log::debug!("goal reached after {} actions", node.depth());
                return Ok(Some(node));
            }

            for successor in branch(problem, &node) {
                self.push_if_new(&mut frontier, successor, &mut seen)?;
            }
        }

        Ok(None)
    }
}
