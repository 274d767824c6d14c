use super::resolve_index;
use super::respects_rank;
use crate::evaluation::CheckError;
use crate::evaluation::Valuation;
use crate::model::Element;
use crate::model::ElementMatrix;

/// Without an index the value must occur in the list. With an index, the indexed entry must
/// hold the value.
pub(super) fn check_element(
    element: &Element,
    valuation: &mut impl Valuation,
) -> Result<bool, CheckError> {
    let values = valuation.operands(&element.list)?;
    let value = valuation.operand(&element.value)?;

    match &element.index {
        Some(index) => {
            let position = resolve_index(index, values.len(), valuation)?;
            Ok(respects_rank(&values, position, value, index.rank))
        }
        None => Ok(values.contains(&value)),
    }
}

pub(super) fn check_element_matrix(
    element: &ElementMatrix,
    valuation: &mut impl Valuation,
) -> Result<bool, CheckError> {
    let row = resolve_index(&element.row, element.matrix.len(), valuation)?;
    let column = resolve_index(&element.column, element.matrix[row].len(), valuation)?;

    let entry = valuation.operand(&element.matrix[row][column])?;
    let value = valuation.operand(&element.value)?;

    Ok(entry == value)
}
