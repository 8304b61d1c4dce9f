use std::fmt::Debug;
use std::hash::Hash;

use crate::value::Value;

/// A state in the search for a solution.
///
/// Carries its accumulated cost and an identity key used for deduplication.
/// States are immutable; applying an [`Action`] produces a new one.
pub trait State: Clone + Debug {
    /// Identity for the seen set. Equal keys mean the same state, even when
    /// reached at different costs or along different paths.
    type Key: Clone + Debug + PartialEq + Eq + Hash;

    fn key(&self) -> Self::Key;

    /// The cost accumulated to reach this state.
    fn value(&self) -> Value;
}

/// A pure transformation from a state to a successor state.
///
/// Equality and `Debug` are only used for display; search correctness never
/// depends on action identity.
pub trait Action<S: State>: Clone + Debug {
    fn apply(&self, state: &S) -> S;
}

/// A problem to be solved.
///
/// Implementations must return a finite action sequence for any reachable
/// state; the engine does not protect against problems that violate this.
/// The engine never mutates a problem.
pub trait Problem: Debug {
    type State: State;
    type Action: Action<Self::State>;

    fn initial_state(&self) -> Self::State;

    fn is_solution(&self, state: &Self::State) -> bool;

    fn actions(&self, state: &Self::State) -> Vec<Self::Action>;
}

/// An estimate of the cost remaining to reach a goal.
///
/// Must produce values of the same shape as the problem's state values.
/// Best-first optimality holds only for admissible heuristics (never
/// overestimating); admissibility is a caller obligation, not verified.
pub trait Heuristic<S: State>: Debug {
    fn evaluate(&self, state: &S) -> Value;
}

/// The zero heuristic: always admissible, reduces best-first search to
/// uniform-cost search.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ZeroHeuristic;

impl<S: State> Heuristic<S> for ZeroHeuristic {
    /// A zero of the state's own value shape, so `g + h` never mixes shapes.
    fn evaluate(&self, state: &S) -> Value {
        state.value().zero_like()
    }
}
