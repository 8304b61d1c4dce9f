use std::cmp::Ordering;
use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::collections::hash_map::Entry;

use rustc_hash::FxHashMap;

use crate::problem::Heuristic;
use crate::problem::Problem;
use crate::problem::ZeroHeuristic;
use crate::search::Node;
use crate::search::Search;
use crate::search::SearchError;
use crate::value::Value;

/// A priority key over `f`-values.
///
/// `Value` is only partially ordered for vector shapes, so the heap orders
/// keys by [`Value::total_cmp`]: deterministic, and in agreement with the
/// product order whenever keys are comparable.
#[derive(Clone, Debug, PartialEq, Eq)]
struct FrontierKey(Value);

impl PartialOrd for FrontierKey {
    #[inline(always)]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for FrontierKey {
    #[inline(always)]
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

/// The best-first frontier.
///
/// Nodes sharing an `f`-value are grouped into a per-key stack; the heap
/// holds one entry per distinct key, which minimizes heap churn. Within a
/// shared key retrieval is LIFO, biasing exploration toward a depth-first
/// completion among ties.
#[derive(Debug)]
pub struct BestFirstFrontier<P: Problem> {
    /// One entry per distinct `f` key.
    ///
    /// ```pseudocode
    /// for Reverse(FrontierKey(key)) in self.keys:
    ///   assert!(self.buckets[key] is non-empty)
    /// ```
    keys: BinaryHeap<Reverse<FrontierKey>>,
    /// All frontier nodes sharing an `f` key, popped LIFO.
    buckets: FxHashMap<Value, Vec<Node<P>>>,
    len: usize,
}

impl<P: Problem> BestFirstFrontier<P> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            keys: BinaryHeap::new(),
            buckets: FxHashMap::default(),
            len: 0,
        }
    }

    #[inline(always)]
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline(always)]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Adds a node under an already-computed `f` key.
    pub fn push_keyed(&mut self, key: Value, node: Node<P>) {
        match self.buckets.entry(key.clone()) {
            Entry::Occupied(bucket) => bucket.into_mut().push(node),
            Entry::Vacant(slot) => {
                slot.insert(vec![node]);
                self.keys.push(Reverse(FrontierKey(key)));
            }
        }
        self.len += 1;
        self.verify_buckets();
    }

    /// Removes the most recently pushed node of the minimum `f` key.
    ///
    /// An emptied key is retired from both the heap and the bucket map.
    pub fn pop_keyed(&mut self) -> Option<(Value, Node<P>)> {
        let Reverse(FrontierKey(key)) = self.keys.peek()?;
        let key = key.clone();

        let bucket = self.buckets.get_mut(&key)?;
        debug_assert!(!bucket.is_empty(), "emptied bucket left behind");
        let node = bucket.pop()?;
        if bucket.is_empty() {
            self.buckets.remove(&key);
            self.keys.pop();
        }
        self.len -= 1;
        self.verify_buckets();

        Some((key, node))
    }

    #[inline(always)]
    #[cfg(not(feature = "verify"))]
    fn verify_buckets(&self) {
        // All good... (hopefully)
    }
    #[cfg(feature = "verify")]
    fn verify_buckets(&self) {
        debug_assert_eq!(self.keys.len(), self.buckets.len());

        let mut total = 0usize;
        for (key, bucket) in &self.buckets {
            debug_assert!(!bucket.is_empty(), "empty bucket for key {key}");
            total += bucket.len();
        }
        debug_assert_eq!(total, self.len);

        for Reverse(FrontierKey(key)) in &self.keys {
            debug_assert!(self.buckets.contains_key(key), "dangling heap key {key}");
        }
    }

    pub fn write_memory_stats<W: std::io::Write>(&self, mut out: W) -> std::io::Result<()> {
        use size::Size;
        use std::mem::size_of;
        use thousands::Separable;

        writeln!(out, "BestFirstFrontier Stats:")?;
        let s = size_of::<Node<P>>();
        let l = self.len;
        writeln!(
            out,
            "  - |Nodes|:  {} ({})",
            l.separate_with_commas(),
            Size::from_bytes(l * s)
        )?;

        let s = size_of::<(Value, Vec<Node<P>>)>();
        let l = self.buckets.len();
        let c = self.buckets.capacity();
        writeln!(
            out,
            "  - |Keys|:   {} ({})",
            l.separate_with_commas(),
            Size::from_bytes(l * s)
        )?;
        writeln!(
            out,
            "  - |Keys|*:  {} ({})",
            c.separate_with_commas(),
            Size::from_bytes(c * s)
        )?;

        Ok(())
    }
    pub fn print_memory_stats(&self) {
        self.write_memory_stats(std::io::stdout().lock()).unwrap()
    }
}

impl<P: Problem> Default for BestFirstFrontier<P> {
    #[inline(always)]
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "inspect")]
impl<P: Problem> Clone for BestFirstFrontier<P> {
    fn clone(&self) -> Self {
        Self {
            keys: self.keys.clone(),
            buckets: self.buckets.clone(),
            len: self.len,
        }
    }
}

/// A best-first (A*) search.
///
/// The frontier is keyed by `f = g + h`, where `g` is the node's accumulated
/// value and `h` the heuristic estimate. With the default [`ZeroHeuristic`]
/// this is uniform-cost search; with an admissible heuristic the first goal
/// popped has minimal value. LIFO retrieval among equal keys changes which
/// optimal path is found among ties, not optimality itself.
#[derive(Copy, Clone, Debug, Default)]
pub struct BestFirstSearch<H = ZeroHeuristic> {
    heuristic: H,
}

impl BestFirstSearch<ZeroHeuristic> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            heuristic: ZeroHeuristic,
        }
    }
}

impl<H> BestFirstSearch<H> {
    #[must_use]
    pub fn with_heuristic(heuristic: H) -> Self {
        Self { heuristic }
    }

    #[inline(always)]
    pub fn heuristic(&self) -> &H {
        &self.heuristic
    }
}

impl<P, H> Search<P> for BestFirstSearch<H>
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
}
