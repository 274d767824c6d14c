use super::CheckError;
use super::Valuation;
use crate::model::Condition;
use crate::model::ConditionOperand;
use crate::model::ConditionOperator;

impl Condition {
    /// Test whether `value` satisfies the condition.
    ///
    /// For an interval or set operand, the ordered operators compare `value` against every
    /// member: `value < {..}` holds iff `value` is smaller than the smallest member, and so on. An
    /// empty interval or set satisfies all ordered operators. `=` requires the operand to hold
    /// exactly `value`, `!=` and `notin` require `value` not to be a member.
    pub fn holds(&self, value: i64, valuation: &mut impl Valuation) -> Result<bool, CheckError> {
        let holds = match &self.operand {
            ConditionOperand::Value(operand) => compare(value, self.operator, *operand),
            ConditionOperand::Variable(variable) => {
                let operand = valuation.value(variable)?;
                compare(value, self.operator, operand)
            }
            ConditionOperand::Interval(min, max) => {
                let bounds = (min <= max).then_some((*min, *max));
                compare_range(value, self.operator, bounds, |value| {
                    (*min..=*max).contains(&value)
                })
            }
            ConditionOperand::Set(members) => {
                let bounds = members
                    .iter()
                    .copied()
                    .min()
                    .zip(members.iter().copied().max());
                compare_range(value, self.operator, bounds, |value| {
                    members.contains(&value)
                })
            }
        };

        Ok(holds)
    }
}

fn compare(value: i64, operator: ConditionOperator, operand: i64) -> bool {
    match operator {
        ConditionOperator::Lt => value < operand,
        ConditionOperator::Le => value <= operand,
        ConditionOperator::Ge => value >= operand,
        ConditionOperator::Gt => value > operand,
        ConditionOperator::Ne | ConditionOperator::NotIn => value != operand,
        ConditionOperator::Eq | ConditionOperator::In => value == operand,
    }
}

/// Compare against a collection of integers, given by its bounds (`None` when empty) and a
/// membership test.
fn compare_range(
    value: i64,
    operator: ConditionOperator,
    bounds: Option<(i64, i64)>,
    contains: impl Fn(i64) -> bool,
) -> bool {
    match operator {
        ConditionOperator::In => contains(value),
        ConditionOperator::NotIn | ConditionOperator::Ne => !contains(value),
        ConditionOperator::Eq => bounds == Some((value, value)),
        ConditionOperator::Lt | ConditionOperator::Le => {
            let Some((min, _)) = bounds else {
                return true;
            };
            compare(value, operator, min)
        }
        ConditionOperator::Ge | ConditionOperator::Gt => {
            let Some((_, max)) = bounds else {
                return true;
            };
            compare(value, operator, max)
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::condition;
    use crate::test_utils::valuation;

    #[test]
    fn value_operand_compares_relationally() {
        let mut valuation = valuation([]);

        assert_eq!(condition!(<= 10).holds(10, &mut valuation), Ok(true));
        assert_eq!(condition!(< 10).holds(10, &mut valuation), Ok(false));
        assert_eq!(condition!(!= 3).holds(4, &mut valuation), Ok(true));
    }

    #[test]
    fn variable_operand_is_resolved() {
        let mut valuation = valuation([("y", 7)]);

        assert_eq!(condition!(== var y).holds(7, &mut valuation), Ok(true));
        assert_eq!(condition!(> var y).holds(7, &mut valuation), Ok(false));
    }

    #[test]
    fn interval_membership() {
        let mut valuation = valuation([]);

        assert_eq!(condition!(in [2, 5]).holds(5, &mut valuation), Ok(true));
        assert_eq!(condition!(in [2, 5]).holds(6, &mut valuation), Ok(false));
        assert_eq!(condition!(notin [2, 5]).holds(1, &mut valuation), Ok(true));
    }

    #[test]
    fn ordered_operators_compare_against_every_member() {
        let mut valuation = valuation([]);

        assert_eq!(condition!(< [2, 5]).holds(1, &mut valuation), Ok(true));
        assert_eq!(condition!(< [2, 5]).holds(3, &mut valuation), Ok(false));
        assert_eq!(condition!(>= [2, 5]).holds(5, &mut valuation), Ok(true));
        assert_eq!(condition!(>= [2, 5]).holds(4, &mut valuation), Ok(false));
        assert_eq!(condition!(> {1, 8}).holds(9, &mut valuation), Ok(true));
    }

    #[test]
    fn equality_with_a_range_requires_a_single_value() {
        let mut valuation = valuation([]);

        assert_eq!(condition!(== [4, 4]).holds(4, &mut valuation), Ok(true));
        assert_eq!(condition!(== [4, 5]).holds(4, &mut valuation), Ok(false));
        assert_eq!(condition!(!= {1, 3}).holds(2, &mut valuation), Ok(true));
        assert_eq!(condition!(!= {1, 3}).holds(3, &mut valuation), Ok(false));
    }
}
