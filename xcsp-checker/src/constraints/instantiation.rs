use crate::evaluation::expect_length;
use crate::evaluation::CheckError;
use crate::evaluation::Valuation;
use crate::model::Instantiation;

pub(super) fn check(
    instantiation: &Instantiation,
    valuation: &mut impl Valuation,
) -> Result<bool, CheckError> {
    expect_length(instantiation.list.len(), instantiation.values.len())?;

    for (variable, literal) in instantiation.list.iter().zip(&instantiation.values) {
        if valuation.value(variable)? != valuation.literal(literal) {
            return Ok(false);
        }
    }

    Ok(true)
}
