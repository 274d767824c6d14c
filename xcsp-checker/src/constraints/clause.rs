use crate::evaluation::CheckError;
use crate::evaluation::Valuation;
use crate::model::Clause;

pub(super) fn check(clause: &Clause, valuation: &mut impl Valuation) -> Result<bool, CheckError> {
    let positive = valuation.values(&clause.positive)?;
    let negative = valuation.values(&clause.negative)?;

    Ok(positive.iter().any(|&value| value != 0) || negative.iter().any(|&value| value == 0))
}
