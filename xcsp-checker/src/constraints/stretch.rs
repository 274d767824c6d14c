use itertools::Itertools;

use crate::evaluation::expect_length;
use crate::evaluation::CheckError;
use crate::evaluation::Valuation;
use crate::model::Stretch;

/// Splits the list into maximal runs of equal values and checks every run against the width of
/// its value. With patterns, no two successive runs may form one of the patterns.
pub(super) fn check(stretch: &Stretch, valuation: &mut impl Valuation) -> Result<bool, CheckError> {
    expect_length(stretch.values.len(), stretch.widths.len())?;

    let values = valuation.values(&stretch.list)?;
    let declared = stretch
        .values
        .iter()
        .map(|literal| valuation.literal(literal))
        .collect::<Vec<_>>();
    let runs = values.iter().copied().dedup_with_count().collect::<Vec<_>>();

    for &(length, value) in &runs {
        let Some(idx) = declared.iter().position(|&declared| declared == value) else {
            return Ok(false);
        };

        let (min, max) = stretch.widths[idx];
        if !(min..=max).contains(&(length as i64)) {
            return Ok(false);
        }
    }

    if let Some(patterns) = &stretch.patterns {
        let forbidden = patterns
            .iter()
            .map(|(first, second)| (valuation.literal(first), valuation.literal(second)))
            .collect::<Vec<_>>();

        let avoids_patterns = runs
            .iter()
            .tuple_windows()
            .all(|(&(_, first), &(_, second))| !forbidden.contains(&(first, second)));

        return Ok(avoids_patterns);
    }

    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Literal;
    use crate::test_utils::list_valuation;
    use crate::test_utils::variables;
    use crate::test_utils::TestValuation;

    fn stretch(
        list: Vec<crate::model::VariableId>,
        patterns: Option<Vec<(Literal, Literal)>>,
    ) -> Stretch {
        Stretch {
            list,
            values: vec![Literal::Int(0), Literal::Int(1)],
            widths: vec![(1, 2), (2, 3)],
            patterns,
        }
    }

    #[test]
    fn runs_within_their_widths() {
        let (list, mut valuation) = list_valuation([0, 1, 1, 0, 0, 1, 1, 1]);

        assert_eq!(check(&stretch(list, None), &mut valuation), Ok(true));
    }

    #[test]
    fn run_that_is_too_long_is_a_violation() {
        let (list, mut valuation) = list_valuation([0, 0, 0, 1, 1]);

        assert_eq!(check(&stretch(list, None), &mut valuation), Ok(false));
    }

    #[test]
    fn undeclared_value_is_a_violation() {
        let (list, mut valuation) = list_valuation([1, 1, 2]);

        assert_eq!(check(&stretch(list, None), &mut valuation), Ok(false));
    }

    #[test]
    fn successive_runs_must_avoid_the_patterns() {
        let (list, mut valuation) = list_valuation([0, 1, 1, 0]);

        let one_then_zero = stretch(list.clone(), Some(vec![(Literal::Int(1), Literal::Int(0))]));
        assert_eq!(check(&one_then_zero, &mut valuation), Ok(false));

        let unused_patterns = stretch(
            list,
            Some(vec![
                (Literal::Int(0), Literal::Int(0)),
                (Literal::Int(1), Literal::Int(1)),
            ]),
        );
        assert_eq!(check(&unused_patterns, &mut valuation), Ok(true));
    }

    #[test]
    fn symbolic_values_are_stretched() {
        let mut valuation = TestValuation::default();
        let day = valuation.symbol("day");
        let night = valuation.symbol("night");
        for (idx, value) in [day, day, night, night].into_iter().enumerate() {
            valuation.assign(&format!("s{idx}"), value);
        }
        let shifts = Stretch {
            list: variables(["s0", "s1", "s2", "s3"]),
            values: vec![Literal::from("day"), Literal::from("night")],
            widths: vec![(2, 2), (1, 3)],
            patterns: Some(vec![(Literal::from("night"), Literal::from("day"))]),
        };

        assert_eq!(check(&shifts, &mut valuation), Ok(true));
    }
}
