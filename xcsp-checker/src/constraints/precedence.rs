use crate::evaluation::CheckError;
use crate::evaluation::Valuation;
use crate::model::Precedence;

/// If `values[i + 1]` occurs, `values[i]` occurs earlier. When covered, every value occurs.
pub(super) fn check(
    precedence: &Precedence,
    valuation: &mut impl Valuation,
) -> Result<bool, CheckError> {
    let values = valuation.values(&precedence.list)?;

    let first_occurrences = precedence
        .values
        .iter()
        .map(|literal| {
            let value = valuation.literal(literal);
            values.iter().position(|&assigned| assigned == value)
        })
        .collect::<Vec<_>>();

    if precedence.covered && first_occurrences.iter().any(Option::is_none) {
        return Ok(false);
    }

    let ordered = first_occurrences
        .windows(2)
        .all(|pair| match (pair[0], pair[1]) {
            (_, None) => true,
            (None, Some(_)) => false,
            (Some(earlier), Some(later)) => earlier < later,
        });

    Ok(ordered)
}
