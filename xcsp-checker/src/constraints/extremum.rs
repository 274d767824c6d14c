use super::resolve_index;
use super::respects_rank;
use crate::evaluation::CheckError;
use crate::evaluation::EvaluationError;
use crate::evaluation::Valuation;
use crate::model::Extremum;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum Extreme {
    Maximum,
    Minimum,
}

/// The extremum satisfies the condition, and the index points at an occurrence of it.
pub(super) fn check(
    extremum: &Extremum,
    extreme: Extreme,
    valuation: &mut impl Valuation,
) -> Result<bool, CheckError> {
    let values = valuation.values(&extremum.list)?;

    let value = match extreme {
        Extreme::Maximum => values.iter().max(),
        Extreme::Minimum => values.iter().min(),
    }
    .copied()
    .ok_or(EvaluationError::EmptyList)?;

    if let Some(condition) = &extremum.condition {
        if !condition.holds(value, valuation)? {
            return Ok(false);
        }
    }

    if let Some(index) = &extremum.index {
        let position = resolve_index(index, values.len(), valuation)?;
        return Ok(respects_rank(&values, position, value, index.rank));
    }

    Ok(true)
}
