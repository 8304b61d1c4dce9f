use crate::problem::Problem;
use crate::search::Node;
use crate::search::Search;
use crate::search::SearchError;

/// A depth first search.
///
/// The frontier is a LIFO stack. No shortest-path guarantee: a deep,
/// unnecessarily long solution may be found first, but frontier memory grows
/// with depth rather than breadth.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct DepthFirstSearch;

impl DepthFirstSearch {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl<P: Problem> Search<P> for DepthFirstSearch {
    type Frontier = Vec<Node<P>>;

    fn create_frontier(&self) -> Self::Frontier {
        Vec::new()
    }

    fn frontier_push(
        &self,
        frontier: &mut Self::Frontier,
        node: Node<P>,
    ) -> Result<(), SearchError> {
        frontier.push(node);
        Ok(())
    }

    fn frontier_pop(&self, frontier: &mut Self::Frontier) -> Option<Node<P>> {
        frontier.pop()
    }

    fn frontier_is_empty(&self, frontier: &Self::Frontier) -> bool {
        frontier.is_empty()
    }
}
