use std::rc::Rc;

use super::Expr;
use super::VariableId;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OptimisationDirection {
    Minimise,
    Maximise,
}

/// An objective of the instance. The checker recomputes its value but does not judge
/// optimality, so the direction is informational.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Objective {
    pub direction: OptimisationDirection,
    pub function: ObjectiveFunction,
}

impl Objective {
    pub fn minimise(function: ObjectiveFunction) -> Objective {
        Objective {
            direction: OptimisationDirection::Minimise,
            function,
        }
    }

    pub fn maximise(function: ObjectiveFunction) -> Objective {
        Objective {
            direction: OptimisationDirection::Maximise,
            function,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ObjectiveFunction {
    Variable(VariableId),
    Expression(Expr),
    Aggregate(Aggregate),
    /// An objective of the named type which cannot be evaluated.
    Unsupported(Rc<str>),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AggregateKind {
    Sum,
    Product,
    Minimum,
    Maximum,
    NValues,
}

/// An aggregate over a list of variables. The coefficients, when given, multiply the values
/// before aggregating.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Aggregate {
    pub kind: AggregateKind,
    pub list: Vec<VariableId>,
    pub coefficients: Option<Vec<i64>>,
}
