use std::collections::BTreeMap;

use crate::evaluation::expect_length;
use crate::evaluation::CheckError;
use crate::evaluation::EvaluationError;
use crate::evaluation::Valuation;
use crate::model::BinPacking;

/// The load of every bin that receives at least one item satisfies the condition.
pub(super) fn check(
    bin_packing: &BinPacking,
    valuation: &mut impl Valuation,
) -> Result<bool, CheckError> {
    expect_length(bin_packing.list.len(), bin_packing.sizes.len())?;

    let bins = valuation.values(&bin_packing.list)?;
    let sizes = valuation.operands(&bin_packing.sizes)?;

    let mut loads = BTreeMap::new();
    for (&bin, &size) in bins.iter().zip(&sizes) {
        let load = loads.entry(bin).or_insert(0_i64);
        *load = load.checked_add(size).ok_or(EvaluationError::Overflow)?;
    }

    for load in loads.into_values() {
        if !bin_packing.condition.holds(load, valuation)? {
            return Ok(false);
        }
    }

    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::condition;
    use crate::model::Operand;
    use crate::test_utils::list_valuation;

    #[test]
    fn loads_respect_the_capacity() {
        let (list, mut valuation) = list_valuation([0, 1, 0, 1]);
        let bin_packing = BinPacking {
            list,
            sizes: [4, 3, 2, 5].into_iter().map(Operand::Constant).collect(),
            condition: condition!(<= 8),
        };
        assert_eq!(check(&bin_packing, &mut valuation), Ok(true));

        valuation.assign("x2", 1);
        assert_eq!(check(&bin_packing, &mut valuation), Ok(false));
    }
}
