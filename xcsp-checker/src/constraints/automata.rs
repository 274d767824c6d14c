use std::collections::BTreeSet;

use fnv::FnvHashMap;

use crate::evaluation::CheckError;
use crate::evaluation::EvaluationError;
use crate::evaluation::Valuation;
use crate::model::Mdd;
use crate::model::Regular;
use crate::model::Transition;

type TransitionMap<'a> = FnvHashMap<(&'a str, i64), Vec<&'a str>>;

/// The automaton may be non-deterministic, so the walk tracks the set of reachable states.
pub(super) fn check_regular(
    regular: &Regular,
    valuation: &mut impl Valuation,
) -> Result<bool, CheckError> {
    let word = valuation.values(&regular.list)?;
    let transitions = transition_map(&regular.transitions, valuation);

    let states = walk(&transitions, regular.start.as_ref(), &word)?;

    Ok(regular
        .finals
        .iter()
        .any(|state| states.contains(state.as_ref())))
}

/// The root of the diagram is the source of the first transition. The word is accepted if it
/// labels a path starting at the root.
pub(super) fn check_mdd(mdd: &Mdd, valuation: &mut impl Valuation) -> Result<bool, CheckError> {
    let word = valuation.values(&mdd.list)?;

    let Some(root) = mdd.transitions.first().map(|transition| transition.from.as_ref()) else {
        return Ok(word.is_empty());
    };

    let transitions = transition_map(&mdd.transitions, valuation);
    let _ = walk(&transitions, root, &word)?;

    Ok(true)
}

fn transition_map<'a>(
    transitions: &'a [Transition],
    valuation: &mut impl Valuation,
) -> TransitionMap<'a> {
    let mut map = TransitionMap::default();

    for transition in transitions {
        let value = valuation.literal(&transition.value);
        map.entry((transition.from.as_ref(), value))
            .or_default()
            .push(transition.to.as_ref());
    }

    map
}

/// Follow the transitions labelled by `word` from `start`. Fails when no state has a transition
/// for the next value.
fn walk<'a>(
    transitions: &TransitionMap<'a>,
    start: &'a str,
    word: &[i64],
) -> Result<BTreeSet<&'a str>, EvaluationError> {
    let mut states = BTreeSet::from([start]);

    for (position, &value) in word.iter().enumerate() {
        states = states
            .iter()
            .filter_map(|&state| transitions.get(&(state, value)))
            .flatten()
            .copied()
            .collect();

        if states.is_empty() {
            return Err(EvaluationError::MissingTransition { position, value });
        }
    }

    Ok(states)
}
