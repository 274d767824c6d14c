use itertools::Itertools;

use crate::evaluation::expect_length;
use crate::evaluation::CheckError;
use crate::evaluation::Valuation;
use crate::model::AllDifferent;
use crate::model::AllDifferentList;
use crate::model::AllDifferentMatrix;
use crate::model::AllEqual;
use crate::model::VariableId;

pub(super) fn check_all_different(
    constraint: &AllDifferent,
    valuation: &mut impl Valuation,
) -> Result<bool, CheckError> {
    let values = valuation.values(&constraint.list)?;
    let except = constraint
        .except
        .iter()
        .map(|literal| valuation.literal(literal))
        .collect::<Vec<_>>();

    Ok(all_different(&values, &except))
}

/// No two lists are assigned the same tuple.
pub(super) fn check_all_different_list(
    constraint: &AllDifferentList,
    valuation: &mut impl Valuation,
) -> Result<bool, CheckError> {
    let tuples = constraint
        .lists
        .iter()
        .map(|list| valuation.values(list))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(tuples.iter().all_unique())
}

pub(super) fn check_all_different_matrix(
    constraint: &AllDifferentMatrix,
    valuation: &mut impl Valuation,
) -> Result<bool, CheckError> {
    let rows = resolve_matrix(&constraint.matrix, valuation)?;

    let rows_distinct = rows.iter().all(|row| all_different(row, &[]));
    let columns_distinct = transpose(&rows)
        .iter()
        .all(|column| all_different(column, &[]));

    Ok(rows_distinct && columns_distinct)
}

pub(super) fn check_all_equal(
    constraint: &AllEqual,
    valuation: &mut impl Valuation,
) -> Result<bool, CheckError> {
    let values = valuation.values(&constraint.list)?;

    Ok(values.iter().all_equal())
}

fn all_different(values: &[i64], except: &[i64]) -> bool {
    values
        .iter()
        .filter(|value| !except.contains(value))
        .all_unique()
}

/// Resolve the values of a matrix, which must be rectangular.
pub(super) fn resolve_matrix(
    matrix: &[Vec<VariableId>],
    valuation: &mut impl Valuation,
) -> Result<Vec<Vec<i64>>, CheckError> {
    let width = matrix.first().map_or(0, Vec::len);

    matrix
        .iter()
        .map(|row| -> Result<Vec<i64>, CheckError> {
            expect_length(width, row.len())?;
            valuation.values(row)
        })
        .collect()
}

/// The columns of a rectangular matrix.
pub(super) fn transpose(rows: &[Vec<i64>]) -> Vec<Vec<i64>> {
    let width = rows.first().map_or(0, Vec::len);

    (0..width)
        .map(|column| rows.iter().map(|row| row[column]).collect())
        .collect()
}
