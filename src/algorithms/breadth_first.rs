use std::collections::VecDeque;

use crate::problem::Problem;
use crate::search::Node;
use crate::search::Search;
use crate::search::SearchError;

/// A breadth first search.
///
/// The frontier is a FIFO queue, so exploration order alone drives the
/// traversal: with unit-cost actions the first goal found is reachable in
/// the fewest actions.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct BreadthFirstSearch;

impl BreadthFirstSearch {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl<P: Problem> Search<P> for BreadthFirstSearch {
    type Frontier = VecDeque<Node<P>>;

    fn create_frontier(&self) -> Self::Frontier {
        VecDeque::new()
    }

    fn frontier_push(
        &self,
        frontier: &mut Self::Frontier,
        node: Node<P>,
    ) -> Result<(), SearchError> {
        frontier.push_back(node);
        Ok(())
    }

    fn frontier_pop(&self, frontier: &mut Self::Frontier) -> Option<Node<P>> {
        frontier.pop_front()
    }

    fn frontier_is_empty(&self, frontier: &Self::Frontier) -> bool {
        frontier.is_empty()
    }
}
