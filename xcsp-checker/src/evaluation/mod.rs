//! Evaluation of expressions and conditions against the values of a solution.

mod condition;
mod expression;

use std::rc::Rc;

pub use expression::evaluate;
pub use expression::is_satisfied;

use crate::model::Literal;
use crate::model::Operand;
use crate::model::Operator;
use crate::model::VariableId;

/// Gives access to the values of variables while checking.
///
/// Symbolic values are represented by the integer they are interned as, so all checkers can work
/// on integers.
pub trait Valuation {
    /// The value of `variable`.
    ///
    /// Returns [`CheckError::Unassigned`] if the variable has no value or is assigned the
    /// wildcard.
    fn value(&mut self, variable: &str) -> Result<i64, CheckError>;

    /// The integer standing for `symbol`.
    fn symbol(&mut self, symbol: &str) -> i64;

    fn values(&mut self, variables: &[VariableId]) -> Result<Vec<i64>, CheckError> {
        variables
            .iter()
            .map(|variable| self.value(variable))
            .collect()
    }

    fn operand(&mut self, operand: &Operand) -> Result<i64, CheckError> {
        match operand {
            Operand::Constant(value) => Ok(*value),
            Operand::Variable(variable) => self.value(variable),
        }
    }

    fn operands(&mut self, operands: &[Operand]) -> Result<Vec<i64>, CheckError> {
        operands
            .iter()
            .map(|operand| self.operand(operand))
            .collect()
    }

    fn literal(&mut self, literal: &Literal) -> i64 {
        match literal {
            Literal::Int(value) => *value,
            Literal::Symbol(symbol) => self.symbol(symbol),
        }
    }
}

/// The reasons evaluating an expression or checking a constraint can fail.
///
/// These never abort verification. The constraint or objective that failed to evaluate is
/// reported as violated.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EvaluationError {
    #[error("division by zero")]
    DivisionByZero,

    #[error("arithmetic overflow")]
    Overflow,

    #[error("negative exponent {0}")]
    NegativeExponent(i64),

    #[error("operator '{operator}' cannot be applied to {arity} operands")]
    Arity { operator: Operator, arity: usize },

    #[error("a set can only be the second operand of 'in' or 'notin'")]
    MisplacedSet,

    #[error("expected {expected} parameters but got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("index {index} is outside of a list of length {length}")]
    IndexOutOfBounds { index: i64, length: usize },

    #[error("no transition from position {position} for value {value}")]
    MissingTransition { position: usize, value: i64 },

    #[error("the extremum of an empty list is undefined")]
    EmptyList,
}

/// The outcome of checking a constraint, other than a verdict.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CheckError {
    /// The constraint refers to a variable without a value. This is a hard error for the
    /// solution being verified.
    #[error("variable '{0}' is not assigned")]
    Unassigned(VariableId),

    #[error(transparent)]
    Evaluation(#[from] EvaluationError),

    #[error("'{0}' is not supported")]
    Unsupported(Rc<str>),
}

/// Test that `actual` equals the length a parameter list should have.
pub(crate) fn expect_length(expected: usize, actual: usize) -> Result<(), EvaluationError> {
    if expected == actual {
        Ok(())
    } else {
        Err(EvaluationError::LengthMismatch { expected, actual })
    }
}
