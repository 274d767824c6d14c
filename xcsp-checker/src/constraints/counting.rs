use std::collections::BTreeSet;

use crate::evaluation::expect_length;
use crate::evaluation::CheckError;
use crate::evaluation::EvaluationError;
use crate::evaluation::Valuation;
use crate::model::Cardinality;
use crate::model::Count;
use crate::model::NValues;
use crate::model::Occurs;
use crate::model::Sum;

pub(super) fn check_sum(sum: &Sum, valuation: &mut impl Valuation) -> Result<bool, CheckError> {
    let values = valuation.values(&sum.list)?;

    let coefficients = match &sum.coefficients {
        Some(coefficients) => {
            expect_length(values.len(), coefficients.len())?;
            valuation.operands(coefficients)?
        }
        None => vec![1; values.len()],
    };

    let total = weighted_sum(&values, &coefficients)?;
    sum.condition.holds(total, valuation)
}

pub(super) fn weighted_sum(values: &[i64], coefficients: &[i64]) -> Result<i64, EvaluationError> {
    values
        .iter()
        .zip(coefficients)
        .try_fold(0_i64, |total, (&value, &coefficient)| {
            value
                .checked_mul(coefficient)
                .and_then(|term| total.checked_add(term))
        })
        .ok_or(EvaluationError::Overflow)
}

/// The values of `count` are resolved first, and then counted like constants.
pub(super) fn check_count(
    count: &Count,
    valuation: &mut impl Valuation,
) -> Result<bool, CheckError> {
    let values = valuation.values(&count.list)?;
    let targets = valuation.operands(&count.values)?;

    let occurrences = values
        .iter()
        .filter(|value| targets.contains(value))
        .count();

    count.condition.holds(occurrences as i64, valuation)
}

pub(super) fn check_n_values(
    n_values: &NValues,
    valuation: &mut impl Valuation,
) -> Result<bool, CheckError> {
    let values = valuation.values(&n_values.list)?;
    let except = n_values
        .except
        .iter()
        .map(|literal| valuation.literal(literal))
        .collect::<Vec<_>>();

    let distinct = values
        .iter()
        .filter(|value| !except.contains(value))
        .collect::<BTreeSet<_>>();

    n_values.condition.holds(distinct.len() as i64, valuation)
}

pub(super) fn check_cardinality(
    cardinality: &Cardinality,
    valuation: &mut impl Valuation,
) -> Result<bool, CheckError> {
    expect_length(cardinality.values.len(), cardinality.occurs.len())?;

    let values = valuation.values(&cardinality.list)?;
    let targets = valuation.operands(&cardinality.values)?;

    if cardinality.closed && values.iter().any(|value| !targets.contains(value)) {
        return Ok(false);
    }

    for (target, occurs) in targets.iter().zip(&cardinality.occurs) {
        let occurrences = values.iter().filter(|&value| value == target).count() as i64;

        let satisfied = match occurs {
            Occurs::Exactly(operand) => occurrences == valuation.operand(operand)?,
            Occurs::Between(min, max) => (*min..=*max).contains(&occurrences),
        };

        if !satisfied {
            return Ok(false);
        }
    }

    Ok(true)
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;

    use super::*;
    use crate::condition;
    use crate::model::Literal;
    use crate::model::Operand;
    use crate::test_utils::list_valuation;

    #[test]
    fn sum_with_default_coefficients() {
        let (list, mut valuation) = list_valuation([4, 6]);
        let sum = Sum {
            list,
            coefficients: None,
            condition: condition!(== 10),
        };

        assert_eq!(check_sum(&sum, &mut valuation), Ok(true));
    }

    #[test]
    fn sum_with_variable_coefficients() {
        let (list, mut valuation) = list_valuation([4, 5]);
        valuation.assign("k", 3);
        let sum = Sum {
            list,
            coefficients: Some(vec![Operand::Constant(2), Operand::from("k")]),
            condition: condition!(<= 22),
        };

        assert_eq!(check_sum(&sum, &mut valuation), Ok(false));
    }

    #[test]
    fn sum_overflow_is_an_evaluation_error() {
        assert_eq!(
            weighted_sum(&[i64::MAX, 1], &[1, 1]),
            Err(EvaluationError::Overflow)
        );
    }

    #[test]
    fn count_with_a_variable_value() {
        let (list, mut valuation) = list_valuation([2, 3, 2, 1]);
        valuation.assign("v", 2);
        let count = Count {
            list,
            values: vec![Operand::from("v")],
            condition: condition!(== 2),
        };

        assert_eq!(check_count(&count, &mut valuation), Ok(true));
    }

    #[test]
    fn n_values_ignores_excepted_values() {
        let (list, mut valuation) = list_valuation([0, 1, 0, 2, 1]);
        let n_values = NValues {
            list,
            except: vec![Literal::Int(0)],
            condition: condition!(== 2),
        };

        assert_eq!(check_n_values(&n_values, &mut valuation), Ok(true));
    }

    #[test]
    fn cardinality_counts_each_value() {
        let (list, mut valuation) = list_valuation([1, 1, 2, 3]);
        let cardinality = Cardinality {
            list,
            values: vec![Operand::Constant(1), Operand::Constant(2)],
            occurs: vec![
                Occurs::Exactly(Operand::Constant(2)),
                Occurs::Between(0, 1),
            ],
            closed: false,
        };
        assert_eq!(check_cardinality(&cardinality, &mut valuation), Ok(true));

        let closed = Cardinality {
            closed: true,
            ..cardinality
        };
        assert_eq!(check_cardinality(&closed, &mut valuation), Ok(false));
    }

    #[test]
    fn unit_sum_and_count_over_the_whole_domain_are_conserved() {
        for values in (0..3).map(|_| 0..3_i64).multi_cartesian_product() {
            let total = values.iter().sum::<i64>();
            let values: [i64; 3] = values.try_into().expect("three values");
            let (list, mut valuation) = list_valuation(values);

            for (expected, satisfied) in [(total, true), (total + 1, false)] {
                let sum = Sum {
                    list: list.clone(),
                    coefficients: None,
                    condition: condition!(== expected),
                };
                assert_eq!(check_sum(&sum, &mut valuation), Ok(satisfied), "{values:?}");
            }

            let count = Count {
                list,
                values: (0..3).map(Operand::Constant).collect(),
                condition: condition!(== 3),
            };
            assert_eq!(check_count(&count, &mut valuation), Ok(true), "{values:?}");
        }
    }
}
