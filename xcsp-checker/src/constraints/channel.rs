use super::position;
use crate::evaluation::CheckError;
use crate::evaluation::EvaluationError;
use crate::evaluation::Valuation;
use crate::model::Channel;
use crate::model::ChannelPair;
use crate::model::ChannelValue;

/// `list[i] = j => list[j] = i`, so the list is an involution.
pub(super) fn check_channel(
    channel: &Channel,
    valuation: &mut impl Valuation,
) -> Result<bool, CheckError> {
    let values = valuation.values(&channel.list)?;

    Ok(points_back(&values, channel.start_index, &values, channel.start_index)?)
}

/// `first[i] = j => second[j] = i`. For lists of equal length the converse is required too,
/// which makes them inverse permutations.
pub(super) fn check_channel_pair(
    channel: &ChannelPair,
    valuation: &mut impl Valuation,
) -> Result<bool, CheckError> {
    let first = valuation.values(&channel.first)?;
    let second = valuation.values(&channel.second)?;

    let forward = points_back(
        &first,
        channel.first_start_index,
        &second,
        channel.second_start_index,
    )?;

    if !forward || first.len() != second.len() {
        return Ok(forward);
    }

    Ok(points_back(
        &second,
        channel.second_start_index,
        &first,
        channel.first_start_index,
    )?)
}

/// Exactly one entry of the list is 1, all others are 0, and the value is the index of the 1.
pub(super) fn check_channel_value(
    channel: &ChannelValue,
    valuation: &mut impl Valuation,
) -> Result<bool, CheckError> {
    let values = valuation.values(&channel.list)?;
    let value = valuation.value(&channel.value)?;

    if values.iter().any(|&entry| entry != 0 && entry != 1) {
        return Ok(false);
    }

    let mut ones = values
        .iter()
        .enumerate()
        .filter(|&(_, &entry)| entry == 1)
        .map(|(idx, _)| idx);

    let (Some(one), None) = (ones.next(), ones.next()) else {
        return Ok(false);
    };

    Ok(position(value, channel.start_index, values.len()) == Ok(one))
}

/// For every `i`, `to[from[i]]` points back at `i`.
fn points_back(
    from: &[i64],
    from_start_index: i64,
    to: &[i64],
    to_start_index: i64,
) -> Result<bool, EvaluationError> {
    for (idx, &target) in from.iter().enumerate() {
        let target = position(target, to_start_index, to.len())?;

        if position(to[target], from_start_index, from.len()) != Ok(idx) {
            return Ok(false);
        }
    }

    Ok(true)
}
