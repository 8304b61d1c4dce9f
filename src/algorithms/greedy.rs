use std::time::Instant;

use crate::problem::Problem;
use crate::search::Node;
use crate::search::Search;
use crate::search::SearchError;
use crate::search::SeenSet;
use crate::search::SolveOptions;
use crate::search::branch;

/// A greedy search.
///
/// The frontier retains at most one node: among newly branched candidates, a
/// candidate replaces the retained node only if its value is strictly lower.
/// This is a single-path descent with no backtracking. The descent stops as
/// soon as the retained node is strictly worse than the incumbent, so
/// `solve` always returns the best-valued node reached along its single
/// chosen path, which need not be a goal; callers must check
/// `Problem::is_solution` on the result. On timeout the best node so far is
/// returned rather than a failure.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct GreedySearch;

impl GreedySearch {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl<P: Problem> Search<P> for GreedySearch {
    type Frontier = Option<Node<P>>;

    fn create_frontier(&self) -> Self::Frontier {
        None
    }

    fn frontier_push(
        &self,
        frontier: &mut Self::Frontier,
        node: Node<P>,
    ) -> Result<(), SearchError> {
        let improves = match frontier {
            Some(retained) => node.value() < retained.value(),
            None => true,
        };
        if improves {
            *frontier = Some(node);
        }
        Ok(())
    }

    fn frontier_pop(&self, frontier: &mut Self::Frontier) -> Option<Node<P>> {
        frontier.take()
    }

    fn frontier_is_empty(&self, frontier: &Self::Frontier) -> bool {
        frontier.is_none()
    }

    /// Gets the best-valued node along the greedy descent.
    ///
    /// Always `Ok(Some(..))`: the initial state seeds the incumbent.
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
        let root = Node::root(initial);
        let mut best_value = root.value();
        let mut best = root.clone();
        self.push_if_new(&mut frontier, root, &mut seen)?;

        while !self.frontier_is_empty(&frontier) {
            if let Some(limit) = options.timeout {
                if start.elapsed() > limit {
                    log::debug!("greedy descent timed out, returning best so far");
                    break;
                }
            }

            let Some(node) = self.frontier_pop(&mut frontier) else {
                break;
            };
            // The retained candidate no longer improves; the descent is over.
            if node.value() > best_value {
                break;
            }
            best_value = node.value();
            best = node.clone();

            for successor in branch(problem, &node) {
                self.push_if_new(&mut frontier, successor, &mut seen)?;
            }
        }

        Ok(Some(best))
    }
}
