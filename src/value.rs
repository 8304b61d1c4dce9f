use std::cmp::Ordering;

use derive_more::Display;
use ordered_float::OrderedFloat;
use smallvec::SmallVec;
use smallvec::smallvec;
use thiserror::Error;

/// Vector values up to this arity live inline.
const INLINE_ARITY: usize = 4;

pub type Component = OrderedFloat<f64>;
pub(crate) type Components = SmallVec<[Component; INLINE_ARITY]>;

/// The shape of a `Value`, fixed at creation.
#[derive(Copy, Clone, Debug, Display, PartialEq, Eq)]
pub enum Shape {
    #[display("scalar")]
    Scalar,
    #[display("vector[{_0}]")]
    Vector(usize),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValueError {
    #[error("value shapes do not match: {left} vs {right}")]
    ShapeMismatch { left: Shape, right: Shape },
}

/// An accumulated cost or heuristic estimate.
///
/// Either a scalar or a fixed-arity vector of per-objective costs. Binary
/// operations require both operands to share a shape; `checked_add` and
/// `diff` report a mismatch as [`ValueError::ShapeMismatch`], while equality
/// and ordering across shapes are simply `false`/`None`.
///
/// Components are `OrderedFloat`, so a `Value` is `Eq + Hash` and usable as
/// a priority key.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Value {
    Scalar(Component),
    Vector(Components),
}

impl Value {
    #[inline(always)]
    pub fn scalar(value: f64) -> Self {
        Value::Scalar(OrderedFloat(value))
    }

    pub fn vector<I>(components: I) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        Value::Vector(components.into_iter().map(OrderedFloat).collect())
    }

    #[inline(always)]
    #[must_use]
    pub fn shape(&self) -> Shape {
        match self {
            Value::Scalar(_) => Shape::Scalar,
            Value::Vector(c) => Shape::Vector(c.len()),
        }
    }

    /// A zero of the same shape as `self`.
    #[must_use]
    pub fn zero_like(&self) -> Self {
        match self {
            Value::Scalar(_) => Value::Scalar(OrderedFloat(0.0)),
            Value::Vector(c) => Value::Vector(smallvec![OrderedFloat(0.0); c.len()]),
        }
    }

    #[inline(always)]
    #[must_use]
    pub fn is_zero(&self) -> bool {
        match self {
            Value::Scalar(v) => *v == OrderedFloat(0.0),
            Value::Vector(c) => c.iter().all(|v| *v == OrderedFloat(0.0)),
        }
    }

    /// Component-wise addition. Mismatched shapes are an error.
    pub fn checked_add(&self, other: &Self) -> Result<Self, ValueError> {
        match (self, other) {
            (Value::Scalar(a), Value::Scalar(b)) => Ok(Value::Scalar(*a + *b)),
            (Value::Vector(a), Value::Vector(b)) if a.len() == b.len() => Ok(Value::Vector(
                a.iter().zip(b.iter()).map(|(x, y)| *x + *y).collect(),
            )),
            _ => Err(self.shape_mismatch(other)),
        }
    }

    /// Normalized signed difference, for comparative reporting.
    ///
    /// Per component `(a - b) / max(|a|, |b|)`, with `0` where both
    /// components are zero; vectors report the maximum over components.
    pub fn diff(&self, other: &Self) -> Result<f64, ValueError> {
        match (self, other) {
            (Value::Scalar(a), Value::Scalar(b)) => Ok(component_diff(a.0, b.0)),
            (Value::Vector(a), Value::Vector(b)) if a.len() == b.len() => Ok(a
                .iter()
                .zip(b.iter())
                .map(|(x, y)| OrderedFloat(component_diff(x.0, y.0)))
                .max()
                .map_or(0.0, |m| m.0)),
            _ => Err(self.shape_mismatch(other)),
        }
    }

    /// A deterministic total order refining the product order.
    ///
    /// Shapes rank scalar-first, then by vector arity; within a shape the
    /// comparison is lexicographic over components. Whenever `partial_cmp`
    /// is `Some`, `total_cmp` agrees with it (all components `<=` implies
    /// the first differing component is strictly smaller), so a frontier
    /// keyed by this order still pops product-order minima and breaks
    /// incomparable keys the same way on every run.
    #[must_use]
    pub fn total_cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Value::Scalar(a), Value::Scalar(b)) => a.cmp(b),
            (Value::Scalar(_), Value::Vector(_)) => Ordering::Less,
            (Value::Vector(_), Value::Scalar(_)) => Ordering::Greater,
            (Value::Vector(a), Value::Vector(b)) => {
                a.len().cmp(&b.len()).then_with(|| a.cmp(b))
            }
        }
    }

    #[inline(always)]
    fn shape_mismatch(&self, other: &Self) -> ValueError {
        ValueError::ShapeMismatch {
            left: self.shape(),
            right: other.shape(),
        }
    }
}

#[inline(always)]
fn component_diff(a: f64, b: f64) -> f64 {
    if a == 0.0 && b == 0.0 {
        0.0
    } else {
        (a - b) / a.abs().max(b.abs())
    }
}

impl PartialOrd for Value {
    /// Product (Pareto) order.
    ///
    /// Scalars compare numerically. Equal-arity vectors compare `Less` iff
    /// every component is `<=` its counterpart and at least one is strictly
    /// smaller; vectors improving on different components are incomparable
    /// (`None`), as are operands of different shapes.
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Value::Scalar(a), Value::Scalar(b)) => Some(a.cmp(b)),
            (Value::Vector(a), Value::Vector(b)) if a.len() == b.len() => {
                let mut any_lt = false;
                let mut any_gt = false;
                for (x, y) in a.iter().zip(b.iter()) {
                    match x.cmp(y) {
                        Ordering::Less => any_lt = true,
                        Ordering::Greater => any_gt = true,
                        Ordering::Equal => {}
                    }
                }
                match (any_lt, any_gt) {
                    (false, false) => Some(Ordering::Equal),
                    (true, false) => Some(Ordering::Less),
                    (false, true) => Some(Ordering::Greater),
                    (true, true) => None,
                }
            }
            _ => None,
        }
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::scalar(value)
    }
}

impl<const N: usize> From<[f64; N]> for Value {
    fn from(components: [f64; N]) -> Self {
        Value::vector(components)
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Value::Scalar(v) => write!(f, "{v}"),
            Value::Vector(c) => {
                write!(f, "(")?;
                for (i, v) in c.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{v}")?;
                }
                write!(f, ")")
            }
        }
    }
}
