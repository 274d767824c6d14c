use std::cmp::Ordering;

use super::all_different::resolve_matrix;
use super::all_different::transpose;
use crate::evaluation::expect_length;
use crate::evaluation::CheckError;
use crate::evaluation::EvaluationError;
use crate::evaluation::Valuation;
use crate::model::Lex;
use crate::model::LexMatrix;
use crate::model::OrderOperator;
use crate::model::Ordered;

/// `list[i] + lengths[i] op list[i + 1]`. The lengths default to zero. A list of lengths may
/// have one entry per variable, in which case the last length is not used.
pub(super) fn check_ordered(
    ordered: &Ordered,
    valuation: &mut impl Valuation,
) -> Result<bool, CheckError> {
    let values = valuation.values(&ordered.list)?;
    let pairs = values.len().saturating_sub(1);

    let lengths = match &ordered.lengths {
        Some(lengths) => {
            if lengths.len() != pairs && lengths.len() != values.len() {
                return Err(EvaluationError::LengthMismatch {
                    expected: pairs,
                    actual: lengths.len(),
                }
                .into());
            }
            valuation.operands(lengths)?
        }
        None => vec![0; pairs],
    };

    for (idx, pair) in values.windows(2).enumerate() {
        let shifted = pair[0]
            .checked_add(lengths[idx])
            .ok_or(EvaluationError::Overflow)?;

        if !relates(shifted.cmp(&pair[1]), ordered.operator) {
            return Ok(false);
        }
    }

    Ok(true)
}

pub(super) fn check_lex(lex: &Lex, valuation: &mut impl Valuation) -> Result<bool, CheckError> {
    let tuples = lex
        .lists
        .iter()
        .map(|list| valuation.values(list))
        .collect::<Result<Vec<_>, _>>()?;

    lexicographically_ordered(&tuples, lex.operator)
}

pub(super) fn check_lex_matrix(
    lex: &LexMatrix,
    valuation: &mut impl Valuation,
) -> Result<bool, CheckError> {
    let rows = resolve_matrix(&lex.matrix, valuation)?;

    Ok(lexicographically_ordered(&rows, lex.operator)?
        && lexicographically_ordered(&transpose(&rows), lex.operator)?)
}

fn lexicographically_ordered(
    tuples: &[Vec<i64>],
    operator: OrderOperator,
) -> Result<bool, CheckError> {
    for pair in tuples.windows(2) {
        expect_length(pair[0].len(), pair[1].len())?;

        if !relates(pair[0].cmp(&pair[1]), operator) {
            return Ok(false);
        }
    }

    Ok(true)
}

/// Whether `a op b` holds given `a.cmp(b)`.
fn relates(ordering: Ordering, operator: OrderOperator) -> bool {
    match operator {
        OrderOperator::Lt => ordering == Ordering::Less,
        OrderOperator::Le => ordering != Ordering::Greater,
        OrderOperator::Ge => ordering != Ordering::Less,
        OrderOperator::Gt => ordering == Ordering::Greater,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Operand;
    use crate::test_utils::list_valuation;
    use crate::test_utils::valuation;
    use crate::test_utils::variables;

    #[test]
    fn increasing_list_is_ordered() {
        let (list, mut valuation) = list_valuation([1, 2, 2, 5]);

        let non_strict = Ordered {
            list: list.clone(),
            lengths: None,
            operator: OrderOperator::Le,
        };
        let strict = Ordered {
            list,
            lengths: None,
            operator: OrderOperator::Lt,
        };

        assert_eq!(check_ordered(&non_strict, &mut valuation), Ok(true));
        assert_eq!(check_ordered(&strict, &mut valuation), Ok(false));
    }

    #[test]
    fn lengths_shift_the_predecessor() {
        let (list, mut valuation) = list_valuation([0, 3, 5]);
        let ordered = Ordered {
            list,
            lengths: Some(vec![Operand::Constant(3), Operand::Constant(3)]),
            operator: OrderOperator::Le,
        };

        assert_eq!(check_ordered(&ordered, &mut valuation), Ok(false));
    }

    #[test]
    fn lex_compares_consecutive_lists() {
        let mut valuation = valuation([("a", 1), ("b", 3), ("c", 2), ("d", 0)]);
        let lex = Lex {
            lists: vec![variables(["a", "b"]), variables(["c", "d"])],
            operator: OrderOperator::Lt,
        };

        assert_eq!(check_lex(&lex, &mut valuation), Ok(true));
    }

    #[test]
    fn lex_matrix_also_orders_columns() {
        // [[2, 1],
        //  [3, 0]] has ordered rows, but the columns (2, 3) and (1, 0) are decreasing.
        let mut valuation = valuation([("a", 2), ("b", 1), ("c", 3), ("d", 0)]);
        let lex = LexMatrix {
            matrix: vec![variables(["a", "b"]), variables(["c", "d"])],
            operator: OrderOperator::Le,
        };

        assert_eq!(check_lex_matrix(&lex, &mut valuation), Ok(false));
    }
}
