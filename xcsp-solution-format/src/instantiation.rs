use std::rc::Rc;

use crate::Value;

/// What an instantiation claims about itself through its `type` attribute.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum InstantiationKind {
    /// A (possibly non-optimal) solution.
    #[default]
    Solution,
    /// A solution which is claimed to be optimal.
    Optimum,
}

/// One `<instantiation>` element.
///
/// The reader does not validate the contents. In particular, the number of variables and values
/// may differ, and the costs are kept exactly as they were written.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Instantiation {
    /// The optional `id` attribute.
    pub id: Option<Rc<str>>,
    /// The `type` attribute.
    pub kind: InstantiationKind,
    /// The names in the `<list>` element, in order. Array references such as `x[]` are kept
    /// as-is.
    pub variables: Vec<Rc<str>>,
    /// The values in the `<values>` element, with repetitions (`0x3`) expanded.
    pub values: Vec<Value>,
    /// The costs in the `cost` attribute, one per objective of the instance.
    pub costs: Option<Vec<i64>>,
}

impl Instantiation {
    /// Create an instantiation of kind [`InstantiationKind::Solution`] without costs.
    pub fn new(
        variables: impl IntoIterator<Item = impl Into<Rc<str>>>,
        values: impl IntoIterator<Item = Value>,
    ) -> Self {
        Instantiation {
            id: None,
            kind: InstantiationKind::Solution,
            variables: variables.into_iter().map(Into::into).collect(),
            values: values.into_iter().collect(),
            costs: None,
        }
    }

    /// Attach declared costs to the instantiation.
    pub fn with_costs(mut self, costs: impl IntoIterator<Item = i64>) -> Self {
        self.costs = Some(costs.into_iter().collect());
        self
    }
}

/// The instantiations of a solution document, in the order in which they appear.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SolutionDocument {
    pub instantiations: Vec<Instantiation>,
}

impl SolutionDocument {
    pub fn iter(&self) -> std::slice::Iter<'_, Instantiation> {
        self.instantiations.iter()
    }

    pub fn len(&self) -> usize {
        self.instantiations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instantiations.is_empty()
    }
}

impl FromIterator<Instantiation> for SolutionDocument {
    fn from_iter<T: IntoIterator<Item = Instantiation>>(iter: T) -> Self {
        SolutionDocument {
            instantiations: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a SolutionDocument {
    type Item = &'a Instantiation;

    type IntoIter = std::slice::Iter<'a, Instantiation>;

    fn into_iter(self) -> Self::IntoIter {
        self.instantiations.iter()
    }
}
