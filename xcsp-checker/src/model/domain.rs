use std::collections::BTreeSet;
use std::ops::RangeInclusive;
use std::rc::Rc;

use xcsp_solution_format::Value;

/// Whether a variable takes integers or symbols.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum VariableKind {
    Integer,
    Symbolic,
}

/// The initial domain of a variable.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Domain {
    Int(IntDomain),
    Symbolic(SymbolicDomain),
}

impl Domain {
    pub fn kind(&self) -> VariableKind {
        match self {
            Domain::Int(_) => VariableKind::Integer,
            Domain::Symbolic(_) => VariableKind::Symbolic,
        }
    }

    /// Test whether `value` is a member of the domain.
    ///
    /// An integer is never a member of a symbolic domain and vice versa. The wildcard is not a
    /// member of any domain.
    pub fn contains(&self, value: &Value) -> bool {
        match (self, value) {
            (Domain::Int(domain), Value::Int(value)) => domain.contains(*value),
            (Domain::Symbolic(domain), Value::Symbol(symbol)) => domain.contains(symbol),
            _ => false,
        }
    }
}

impl From<RangeInclusive<i64>> for Domain {
    fn from(value: RangeInclusive<i64>) -> Self {
        Domain::Int(IntDomain::from(value))
    }
}

/// A set of integers, stored as intervals.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IntDomain {
    /// A sorted list of inclusive intervals.
    ///
    /// Invariant: the intervals are non-empty, disjoint and consecutive intervals are merged.
    intervals: Vec<(i64, i64)>,
}

impl IntDomain {
    /// Create a domain from possibly overlapping intervals. Empty intervals are ignored.
    pub fn from_intervals(intervals: impl IntoIterator<Item = (i64, i64)>) -> IntDomain {
        let mut intervals = intervals
            .into_iter()
            .filter(|(lower, upper)| lower <= upper)
            .collect::<Vec<_>>();
        intervals.sort_unstable();

        let mut merged: Vec<(i64, i64)> = Vec::with_capacity(intervals.len());
        for (lower, upper) in intervals {
            match merged.last_mut() {
                Some(last) if last.1 >= lower.saturating_sub(1) => last.1 = last.1.max(upper),
                _ => merged.push((lower, upper)),
            }
        }

        IntDomain { intervals: merged }
    }

    /// The smallest element, or `None` if the domain is empty.
    pub fn lower_bound(&self) -> Option<i64> {
        self.intervals.first().map(|&(lower, _)| lower)
    }

    /// The largest element, or `None` if the domain is empty.
    pub fn upper_bound(&self) -> Option<i64> {
        self.intervals.last().map(|&(_, upper)| upper)
    }

    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    pub fn contains(&self, value: i64) -> bool {
        self.intervals
            .binary_search_by(|&(lower, upper)| {
                if upper < value {
                    std::cmp::Ordering::Less
                } else if lower > value {
                    std::cmp::Ordering::Greater
                } else {
                    std::cmp::Ordering::Equal
                }
            })
            .is_ok()
    }

    /// The intervals of the domain, sorted and disjoint.
    pub fn intervals(&self) -> &[(i64, i64)] {
        &self.intervals
    }
}

impl From<RangeInclusive<i64>> for IntDomain {
    fn from(value: RangeInclusive<i64>) -> Self {
        IntDomain::from_intervals([(*value.start(), *value.end())])
    }
}

impl FromIterator<i64> for IntDomain {
    fn from_iter<T: IntoIterator<Item = i64>>(iter: T) -> Self {
        IntDomain::from_intervals(iter.into_iter().map(|value| (value, value)))
    }
}

/// A set of symbols.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SymbolicDomain {
    symbols: BTreeSet<Rc<str>>,
}

impl SymbolicDomain {
    pub fn contains(&self, symbol: &str) -> bool {
        self.symbols.contains(symbol)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.symbols.iter().map(AsRef::as_ref)
    }
}

impl<S: Into<Rc<str>>> FromIterator<S> for SymbolicDomain {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        SymbolicDomain {
            symbols: iter.into_iter().map(Into::into).collect(),
        }
    }
}
