use std::collections::BTreeMap;

use crate::evaluation::expect_length;
use crate::evaluation::CheckError;
use crate::evaluation::EvaluationError;
use crate::evaluation::Valuation;
use crate::model::Cumulative;
use crate::model::NoOverlap;

/// An axis-aligned box, given by its origin and length in every dimension.
#[derive(Clone, Debug)]
struct Placement {
    origin: Vec<i64>,
    length: Vec<i64>,
}

impl Placement {
    /// Two boxes overlap unless they are separated in at least one dimension.
    fn is_separated_from(&self, other: &Placement) -> Result<bool, EvaluationError> {
        for dimension in 0..self.origin.len() {
            let end = checked_end(self.origin[dimension], self.length[dimension])?;
            let other_end = checked_end(other.origin[dimension], other.length[dimension])?;

            if end <= other.origin[dimension] || other_end <= self.origin[dimension] {
                return Ok(true);
            }
        }

        Ok(false)
    }
}

pub(super) fn check_no_overlap(
    no_overlap: &NoOverlap,
    valuation: &mut impl Valuation,
) -> Result<bool, CheckError> {
    expect_length(no_overlap.origins.len(), no_overlap.lengths.len())?;
    let dimensions = no_overlap.origins.first().map_or(0, Vec::len);

    let mut boxes = Vec::with_capacity(no_overlap.origins.len());
    for (origins, lengths) in no_overlap.origins.iter().zip(&no_overlap.lengths) {
        expect_length(dimensions, origins.len())?;
        expect_length(dimensions, lengths.len())?;

        let placement = Placement {
            origin: valuation.values(origins)?,
            length: valuation.operands(lengths)?,
        };

        if no_overlap.zero_ignored && placement.length.contains(&0) {
            continue;
        }

        boxes.push(placement);
    }

    for (idx, first) in boxes.iter().enumerate() {
        for second in &boxes[idx + 1..] {
            if !first.is_separated_from(second)? {
                return Ok(false);
            }
        }
    }

    Ok(true)
}

/// Sweeps over the start and end points of the tasks. Between two consecutive points the load
/// does not change, so the condition is tested at every point.
pub(super) fn check_cumulative(
    cumulative: &Cumulative,
    valuation: &mut impl Valuation,
) -> Result<bool, CheckError> {
    let tasks = cumulative.origins.len();
    expect_length(tasks, cumulative.lengths.len())?;
    expect_length(tasks, cumulative.heights.len())?;

    let origins = valuation.values(&cumulative.origins)?;
    let lengths = valuation.operands(&cumulative.lengths)?;
    let heights = valuation.operands(&cumulative.heights)?;

    let mut ends = Vec::with_capacity(tasks);
    for (&origin, &length) in origins.iter().zip(&lengths) {
        ends.push(checked_end(origin, length)?);
    }

    if let Some(declared_ends) = &cumulative.ends {
        expect_length(tasks, declared_ends.len())?;
        if valuation.values(declared_ends)? != ends {
            return Ok(false);
        }
    }

    let mut profile_changes = BTreeMap::new();
    for ((&origin, &end), &height) in origins.iter().zip(&ends).zip(&heights) {
        let (increase, decrease) = if end > origin { (height, height) } else { (0, 0) };

        let at_origin = profile_changes.entry(origin).or_insert(0_i64);
        *at_origin = at_origin
            .checked_add(increase)
            .ok_or(EvaluationError::Overflow)?;

        let at_end = profile_changes.entry(end).or_insert(0_i64);
        *at_end = at_end
            .checked_sub(decrease)
            .ok_or(EvaluationError::Overflow)?;
    }

    let mut load = 0_i64;
    for change in profile_changes.into_values() {
        load = load.checked_add(change).ok_or(EvaluationError::Overflow)?;

        if !cumulative.condition.holds(load, valuation)? {
            return Ok(false);
        }
    }

    Ok(true)
}

fn checked_end(origin: i64, length: i64) -> Result<i64, EvaluationError> {
    origin.checked_add(length).ok_or(EvaluationError::Overflow)
}
