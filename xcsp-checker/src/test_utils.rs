//! Contains a bunch of utilities to help write tests for the checker.

use std::rc::Rc;

use fnv::FnvHashMap;

use crate::evaluation::CheckError;
use crate::evaluation::Valuation;
use crate::model::VariableId;
use crate::symbols::SymbolTable;

/// A [`Valuation`] over a fixed map of integer values.
#[derive(Debug, Default)]
pub(crate) struct TestValuation {
    values: FnvHashMap<Rc<str>, i64>,
    symbols: SymbolTable,
}

impl TestValuation {
    pub(crate) fn assign(&mut self, variable: &str, value: i64) {
        let _ = self.values.insert(Rc::from(variable), value);
    }
}

impl Valuation for TestValuation {
    fn value(&mut self, variable: &str) -> Result<i64, CheckError> {
        self.values
            .get(variable)
            .copied()
            .ok_or_else(|| CheckError::Unassigned(Rc::from(variable)))
    }

    fn symbol(&mut self, symbol: &str) -> i64 {
        self.symbols.intern(symbol)
    }
}

/// Create a valuation which assigns the given values.
pub(crate) fn valuation<const N: usize>(values: [(&str, i64); N]) -> TestValuation {
    let mut valuation = TestValuation::default();

    for (variable, value) in values {
        valuation.assign(variable, value);
    }

    valuation
}

/// Create a list of variable identifiers.
pub(crate) fn variables<const N: usize>(names: [&str; N]) -> Vec<VariableId> {
    names.into_iter().map(Rc::from).collect()
}

/// Create a valuation for the variables `x0, x1, ..` with the given values, together with the
/// list of those variables.
pub(crate) fn list_valuation<const N: usize>(values: [i64; N]) -> (Vec<VariableId>, TestValuation) {
    let mut valuation = TestValuation::default();

    let list = values
        .into_iter()
        .enumerate()
        .map(|(idx, value)| {
            let name = format!("x{idx}");
            valuation.assign(&name, value);
            Rc::from(name)
        })
        .collect();

    (list, valuation)
}

/// Create a [`crate::model::Condition`] using a DSL.
///
/// # Example
/// ```
/// condition!(<= 10);
/// condition!(== var y);
/// condition!(in [1, 5]);
/// condition!(notin {1, 3, 5});
/// ```
#[macro_export]
macro_rules! condition {
    (@to_operator <) => {
        $crate::model::ConditionOperator::Lt
    };
    (@to_operator <=) => {
        $crate::model::ConditionOperator::Le
    };
    (@to_operator >=) => {
        $crate::model::ConditionOperator::Ge
    };
    (@to_operator >) => {
        $crate::model::ConditionOperator::Gt
    };
    (@to_operator !=) => {
        $crate::model::ConditionOperator::Ne
    };
    (@to_operator ==) => {
        $crate::model::ConditionOperator::Eq
    };
    (@to_operator in) => {
        $crate::model::ConditionOperator::In
    };
    (@to_operator notin) => {
        $crate::model::ConditionOperator::NotIn
    };

    ($op:tt var $name:ident) => {
        $crate::model::Condition {
            operator: $crate::condition!(@to_operator $op),
            operand: $crate::model::ConditionOperand::Variable(std::rc::Rc::from(stringify!(
                $name
            ))),
        }
    };

    ($op:tt [$min:expr, $max:expr]) => {
        $crate::model::Condition {
            operator: $crate::condition!(@to_operator $op),
            operand: $crate::model::ConditionOperand::Interval($min, $max),
        }
    };

    ($op:tt {$($value:expr),* $(,)?}) => {
        $crate::model::Condition {
            operator: $crate::condition!(@to_operator $op),
            operand: $crate::model::ConditionOperand::Set(vec![$($value),*]),
        }
    };

    ($op:tt $value:expr) => {
        $crate::model::Condition {
            operator: $crate::condition!(@to_operator $op),
            operand: $crate::model::ConditionOperand::Value($value),
        }
    };
}
