use std::fmt::Display;

use super::VariableId;

/// A comparison `(operator, operand)` which is applied to a value computed by a constraint, e.g.
/// the sum in `sum` or the number of occurrences in `count`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Condition {
    pub operator: ConditionOperator,
    pub operand: ConditionOperand,
}

impl Condition {
    pub fn new(operator: ConditionOperator, operand: ConditionOperand) -> Condition {
        Condition { operator, operand }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ConditionOperator {
    Lt,
    Le,
    Ge,
    Gt,
    Ne,
    Eq,
    In,
    NotIn,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConditionOperand {
    Value(i64),
    Variable(VariableId),
    /// An inclusive interval `min..max`.
    Interval(i64, i64),
    Set(Vec<i64>),
}

impl Display for ConditionOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ConditionOperator::Lt => "lt",
            ConditionOperator::Le => "le",
            ConditionOperator::Ge => "ge",
            ConditionOperator::Gt => "gt",
            ConditionOperator::Ne => "ne",
            ConditionOperator::Eq => "eq",
            ConditionOperator::In => "in",
            ConditionOperator::NotIn => "notin",
        };

        write!(f, "{name}")
    }
}

impl Display for ConditionOperand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConditionOperand::Value(value) => write!(f, "{value}"),
            ConditionOperand::Variable(name) => write!(f, "{name}"),
            ConditionOperand::Interval(min, max) => write!(f, "{min}..{max}"),
            ConditionOperand::Set(values) => {
                write!(f, "{{")?;
                for (idx, value) in values.iter().enumerate() {
                    if idx > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "{value}")?;
                }
                write!(f, "}}")
            }
        }
    }
}

impl Display for Condition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{})", self.operator, self.operand)
    }
}
