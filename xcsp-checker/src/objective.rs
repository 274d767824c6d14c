use std::collections::BTreeSet;
use std::rc::Rc;

use crate::evaluation::evaluate;
use crate::evaluation::expect_length;
use crate::evaluation::CheckError;
use crate::evaluation::EvaluationError;
use crate::evaluation::Valuation;
use crate::model::Aggregate;
use crate::model::AggregateKind;
use crate::model::Objective;
use crate::model::ObjectiveFunction;

/// Compute the value of an objective.
///
/// Coefficients multiply the values before aggregating, also for `product`, `minimum`,
/// `maximum` and `nValues`.
pub fn evaluate_objective(
    objective: &Objective,
    valuation: &mut impl Valuation,
) -> Result<i64, CheckError> {
    match &objective.function {
        ObjectiveFunction::Variable(variable) => valuation.value(variable),
        ObjectiveFunction::Expression(expr) => evaluate(expr, valuation),
        ObjectiveFunction::Aggregate(aggregate) => evaluate_aggregate(aggregate, valuation),
        ObjectiveFunction::Unsupported(name) => Err(CheckError::Unsupported(Rc::clone(name))),
    }
}

fn evaluate_aggregate(
    aggregate: &Aggregate,
    valuation: &mut impl Valuation,
) -> Result<i64, CheckError> {
    let values = valuation.values(&aggregate.list)?;

    let terms = match &aggregate.coefficients {
        Some(coefficients) => {
            expect_length(values.len(), coefficients.len())?;
            values
                .iter()
                .zip(coefficients)
                .map(|(&value, &coefficient)| value.checked_mul(coefficient))
                .collect::<Option<Vec<_>>>()
                .ok_or(EvaluationError::Overflow)?
        }
        None => values,
    };

    let value = match aggregate.kind {
        AggregateKind::Sum => terms
            .iter()
            .try_fold(0_i64, |total, &term| total.checked_add(term))
            .ok_or(EvaluationError::Overflow)?,
        AggregateKind::Product => terms
            .iter()
            .try_fold(1_i64, |total, &term| total.checked_mul(term))
            .ok_or(EvaluationError::Overflow)?,
        AggregateKind::Minimum => terms
            .iter()
            .copied()
            .min()
            .ok_or(EvaluationError::EmptyList)?,
        AggregateKind::Maximum => terms
            .iter()
            .copied()
            .max()
            .ok_or(EvaluationError::EmptyList)?,
        AggregateKind::NValues => terms.iter().collect::<BTreeSet<_>>().len() as i64,
    };

    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Expr;
    use crate::model::Operator;
    use crate::test_utils::list_valuation;

    fn aggregate(
        kind: AggregateKind,
        list: Vec<crate::model::VariableId>,
        coefficients: Option<Vec<i64>>,
    ) -> Objective {
        Objective::minimise(ObjectiveFunction::Aggregate(Aggregate {
            kind,
            list,
            coefficients,
        }))
    }

    #[test]
    fn weighted_sum_is_exact() {
        let (list, mut valuation) = list_valuation([4, 5]);
        let objective = aggregate(AggregateKind::Sum, list, Some(vec![2, 3]));

        assert_eq!(evaluate_objective(&objective, &mut valuation), Ok(23));
    }

    #[test]
    fn aggregates_over_weighted_terms() {
        let (list, mut valuation) = list_valuation([3, -1, 3]);

        let product = aggregate(AggregateKind::Product, list.clone(), None);
        let minimum = aggregate(AggregateKind::Minimum, list.clone(), Some(vec![1, -5, 1]));
        let maximum = aggregate(AggregateKind::Maximum, list.clone(), None);
        let n_values = aggregate(AggregateKind::NValues, list, None);

        assert_eq!(evaluate_objective(&product, &mut valuation), Ok(-9));
        assert_eq!(evaluate_objective(&minimum, &mut valuation), Ok(3));
        assert_eq!(evaluate_objective(&maximum, &mut valuation), Ok(3));
        assert_eq!(evaluate_objective(&n_values, &mut valuation), Ok(2));
    }

    #[test]
    fn expression_objective() {
        let (_, mut valuation) = list_valuation([6, 2]);
        let objective = Objective::maximise(ObjectiveFunction::Expression(Expr::apply(
            Operator::Dist,
            [Expr::variable("x1"), Expr::variable("x0")],
        )));

        assert_eq!(evaluate_objective(&objective, &mut valuation), Ok(4));
    }

    #[test]
    fn unsupported_objective_is_reported() {
        let (_, mut valuation) = list_valuation([]);
        let objective = Objective::minimise(ObjectiveFunction::Unsupported("lex".into()));

        assert_eq!(
            evaluate_objective(&objective, &mut valuation),
            Err(CheckError::Unsupported("lex".into()))
        );
    }
}
