use std::cmp::Ordering;
use std::time::Duration;
use std::time::Instant;

use crate::algorithms::best_first::BestFirstFrontier;
use crate::problem::Heuristic;
use crate::problem::Problem;
use crate::problem::ZeroHeuristic;
use crate::search::Node;
use crate::search::Search;
use crate::search::SearchError;
use crate::search::SeenSet;
use crate::search::SolveOptions;
use crate::search::branch;
use crate::value::Value;

/// An anytime iterative-deepening best-first search.
///
/// Repeated bounded depth-first probes ("runs") under a best-first control
/// loop: each outer iteration pops the best `(f, node)` entry and probes
/// depth-first from it, pushing the siblings it passes over back onto the
/// frontier for later runs. Every successful run may improve the incumbent
/// solution, and the loop stops once the frontier's lower bound can no
/// longer beat it.
///
/// Deadlines make this anytime: once `soft_timeout` elapses the incumbent
/// is returned as-is, while `timeout` is a hard deadline that fails with
/// [`SearchError::Timeout`] only when no solution was found at all.
#[derive(Copy, Clone, Debug, Default)]
pub struct IterativeDeepeningBestFirstSearch<H = ZeroHeuristic> {
    heuristic: H,
}

impl IterativeDeepeningBestFirstSearch<ZeroHeuristic> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            heuristic: ZeroHeuristic,
        }
    }
}

impl<H> IterativeDeepeningBestFirstSearch<H> {
    #[must_use]
    pub fn with_heuristic(heuristic: H) -> Self {
        Self { heuristic }
    }

    #[inline(always)]
    pub fn heuristic(&self) -> &H {
        &self.heuristic
    }
}

impl<H> IterativeDeepeningBestFirstSearch<H> {
    /// Gets a temporary solution: a depth-first probe from `node`.
    ///
    /// At every step the cheapest acceptable successor (by `f = g + h`, ties
    /// by generation order) is descended into and its siblings are pushed
    /// onto the outer frontier, marked seen, for future runs. The descended
    /// node itself is *not* marked in the outer seen set, so a later run may
    /// rediscover the same goal through a cheaper route and improve the
    /// incumbent; a run-local set of descended states keeps the probe from
    /// looping through a cycle instead.
    ///
    /// The run fails on a dead end or when `budget` runs out.
    fn run<P>(
        &self,
        problem: &P,
        node: Node<P>,
        frontier: &mut BestFirstFrontier<P>,
        seen: &mut SeenSet<P>,
        budget: Option<Duration>,
    ) -> Result<Option<Node<P>>, SearchError>
    where
        P: Problem,
        H: Heuristic<P::State>,
    {
        let start = Instant::now();
        let mut current = node;
        let mut descended = SeenSet::<P>::default();
        descended.insert(current.key());

        loop {
            if let Some(limit) = budget {
                if start.elapsed() > limit {
                    log::trace!("run exhausted its budget at depth {}", current.depth());
                    return Ok(None);
                }
            }

            if problem.is_solution(&current.state) {
                return Ok(Some(current));
            }

            // Branch, dropping seen successors, this run's own ancestors,
            // and repeated siblings within this branching step.
            let mut sibling_keys = SeenSet::<P>::default();
            let mut ranked = Vec::new();
            for successor in branch(problem, &current) {
                let key = successor.key();
                if seen.contains(&key) || descended.contains(&key) || sibling_keys.contains(&key) {
                    continue;
                }
                sibling_keys.insert(key);

                let g = successor.value();
                let h = self.heuristic.evaluate(&successor.state);
                ranked.push((g.checked_add(&h)?, successor));
            }

            if ranked.is_empty() {
                // Dead end, no way to continue this run.
                return Ok(None);
            }

            let mut cheapest = 0;
            for (i, (f, _)) in ranked.iter().enumerate().skip(1) {
                if f.total_cmp(&ranked[cheapest].0) == Ordering::Less {
                    cheapest = i;
                }
            }
            let (_, chosen) = ranked.remove(cheapest);

            // Continue the run through the cheapest successor; store the
            // rest for another run.
            descended.insert(chosen.key());
            for (f, sibling) in ranked {
                seen.insert(sibling.key());
                frontier.push_keyed(f, sibling);
            }
            current = chosen;
        }
    }
}

impl<P, H> Search<P> for IterativeDeepeningBestFirstSearch<H>
where
    P: Problem,
    H: Heuristic<P::State>,
{
    type Frontier = BestFirstFrontier<P>;

    fn create_frontier(&self) -> Self::Frontier {
        BestFirstFrontier::new()
    }

    fn frontier_push(
        &self,
        frontier: &mut Self::Frontier,
        node: Node<P>,
    ) -> Result<(), SearchError> {
        let g = node.value();
        let h = self.heuristic.evaluate(&node.state);
        let f = g.checked_add(&h)?;
        frontier.push_keyed(f, node);
        Ok(())
    }

    fn frontier_pop(&self, frontier: &mut Self::Frontier) -> Option<Node<P>> {
        frontier.pop_keyed().map(|(_key, node)| node)
    }

    fn frontier_is_empty(&self, frontier: &Self::Frontier) -> bool {
        frontier.is_empty()
    }

    /// Gets a solution, iteratively improving it until it is optimal or
    /// time runs out.
    fn solve(
        &self,
        problem: &P,
        options: SolveOptions<P>,
    ) -> Result<Option<Node<P>>, SearchError> {
        let start = Instant::now();
        let hard = options.timeout;
        // The soft deadline never extends past the hard one.
        let soft = match (options.soft_timeout, hard) {
            (Some(s), Some(h)) => Some(s.min(h)),
            (Some(s), None) => Some(s),
            (None, h) => h,
        };

        let initial = options
            .initial_state
            .unwrap_or_else(|| problem.initial_state());

        let mut frontier = self.create_frontier();
        let mut seen = SeenSet::<P>::default();
        self.push_if_new(&mut frontier, Node::root(initial), &mut seen)?;

        let mut best: Option<(Value, Node<P>)> = None;

        while !frontier.is_empty() {
            let elapsed = start.elapsed();
            if best.is_some() && soft.is_some_and(|limit| elapsed > limit) {
                log::debug!("soft deadline elapsed, returning the incumbent");
                break;
            }
            if let Some(limit) = hard {
                if elapsed > limit {
                    return Err(SearchError::Timeout(limit));
                }
            }

            let Some((f, node)) = frontier.pop_keyed() else {
                break;
            };
            if let Some((best_value, _)) = &best {
                // Lower-bound pruning: nothing left on the frontier can beat
                // the incumbent. Incomparable vector keys do not prune.
                if f >= *best_value {
                    log::debug!("pruning at bound {f}, incumbent {best_value}");
                    break;
                }
            }

            let budget = hard.map(|limit| limit.saturating_sub(start.elapsed()));
            if let Some(found) = self.run(problem, node, &mut frontier, &mut seen, budget)? {
                let value = found.value();
                let improves = match &best {
                    Some((best_value, _)) => value < *best_value,
                    None => true,
                };
                if improves {
                    log::debug!("new incumbent {value} at depth {}", found.depth());
                    best = Some((value, found));
                }
            }
        }

        Ok(best.map(|(_value, node)| node))
    }
}
