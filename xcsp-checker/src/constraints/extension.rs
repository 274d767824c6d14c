use crate::evaluation::expect_length;
use crate::evaluation::CheckError;
use crate::evaluation::Valuation;
use crate::model::Cell;
use crate::model::Extension;
use crate::model::TableKind;

/// Look up the assigned tuple in the table. A `*` cell matches any value.
pub(super) fn check(
    extension: &Extension,
    valuation: &mut impl Valuation,
) -> Result<bool, CheckError> {
    let tuple = valuation.values(&extension.list)?;

    let mut is_listed = false;
    for row in &extension.tuples {
        expect_length(tuple.len(), row.len())?;

        if matches(&tuple, row, valuation) {
            is_listed = true;
            break;
        }
    }

    Ok(match extension.kind {
        TableKind::Supports => is_listed,
        TableKind::Conflicts => !is_listed,
    })
}

fn matches(tuple: &[i64], row: &[Cell], valuation: &mut impl Valuation) -> bool {
    tuple.iter().zip(row).all(|(&value, cell)| match cell {
        Cell::Any => true,
        Cell::Int(expected) => *expected == value,
        Cell::Symbol(symbol) => valuation.symbol(symbol) == value,
    })
}
