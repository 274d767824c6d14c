//! Decision procedures for the constraint families.
//!
//! Every checker first resolves the variables and operands of its constraint through a
//! [`Valuation`], and then decides on the resulting integers. A checker returns `Ok(false)` for a
//! violated constraint, and an [`EvaluationError`] if the constraint cannot be evaluated for the
//! given values (which the verifier also counts as a violation).

mod all_different;
mod automata;
mod bin_packing;
mod channel;
mod circuit;
mod clause;
mod counting;
mod element;
mod extension;
mod extremum;
mod instantiation;
mod ordering;
mod precedence;
mod scheduling;
mod stretch;

use std::rc::Rc;

use crate::evaluation::is_satisfied;
use crate::evaluation::CheckError;
use crate::evaluation::EvaluationError;
use crate::evaluation::Valuation;
use crate::model::Constraint;
use crate::model::Index;
use crate::model::Rank;

/// Decide whether `constraint` is satisfied by the values in `valuation`.
///
/// Constraints of [`Constraint::Unsupported`] are reported with [`CheckError::Unsupported`].
pub fn check_constraint(
    constraint: &Constraint,
    valuation: &mut impl Valuation,
) -> Result<bool, CheckError> {
    match constraint {
        Constraint::Intension(expr) => is_satisfied(expr, valuation),
        Constraint::Extension(extension) => extension::check(extension, valuation),
        Constraint::Regular(regular) => automata::check_regular(regular, valuation),
        Constraint::Mdd(mdd) => automata::check_mdd(mdd, valuation),
        Constraint::AllDifferent(all_different) => {
            all_different::check_all_different(all_different, valuation)
        }
        Constraint::AllDifferentList(all_different) => {
            all_different::check_all_different_list(all_different, valuation)
        }
        Constraint::AllDifferentMatrix(all_different) => {
            all_different::check_all_different_matrix(all_different, valuation)
        }
        Constraint::AllEqual(all_equal) => all_different::check_all_equal(all_equal, valuation),
        Constraint::Ordered(ordered) => ordering::check_ordered(ordered, valuation),
        Constraint::Lex(lex) => ordering::check_lex(lex, valuation),
        Constraint::LexMatrix(lex) => ordering::check_lex_matrix(lex, valuation),
        Constraint::Sum(sum) => counting::check_sum(sum, valuation),
        Constraint::Count(count) => counting::check_count(count, valuation),
        Constraint::NValues(n_values) => counting::check_n_values(n_values, valuation),
        Constraint::Cardinality(cardinality) => {
            counting::check_cardinality(cardinality, valuation)
        }
        Constraint::Maximum(maximum) => {
            extremum::check(maximum, extremum::Extreme::Maximum, valuation)
        }
        Constraint::Minimum(minimum) => {
            extremum::check(minimum, extremum::Extreme::Minimum, valuation)
        }
        Constraint::Element(element) => element::check_element(element, valuation),
        Constraint::ElementMatrix(element) => element::check_element_matrix(element, valuation),
        Constraint::Channel(channel) => channel::check_channel(channel, valuation),
        Constraint::ChannelPair(channel) => channel::check_channel_pair(channel, valuation),
        Constraint::ChannelValue(channel) => channel::check_channel_value(channel, valuation),
        Constraint::Stretch(stretch) => stretch::check(stretch, valuation),
        Constraint::NoOverlap(no_overlap) => scheduling::check_no_overlap(no_overlap, valuation),
        Constraint::Cumulative(cumulative) => {
            scheduling::check_cumulative(cumulative, valuation)
        }
        Constraint::Instantiation(instantiation) => {
            instantiation::check(instantiation, valuation)
        }
        Constraint::Clause(clause) => clause::check(clause, valuation),
        Constraint::Circuit(circuit) => circuit::check(circuit, valuation),
        Constraint::Precedence(precedence) => precedence::check(precedence, valuation),
        Constraint::BinPacking(bin_packing) => bin_packing::check(bin_packing, valuation),
        Constraint::Unsupported(name) => Err(CheckError::Unsupported(Rc::clone(name))),
    }
}

/// Convert a value numbered from `start_index` into a position of a list of `length` elements.
fn position(value: i64, start_index: i64, length: usize) -> Result<usize, EvaluationError> {
    value
        .checked_sub(start_index)
        .and_then(|offset| usize::try_from(offset).ok())
        .filter(|&position| position < length)
        .ok_or(EvaluationError::IndexOutOfBounds {
            index: value,
            length,
        })
}

/// Resolve the index variable to a position of a list of `length` elements.
fn resolve_index(
    index: &Index,
    length: usize,
    valuation: &mut impl Valuation,
) -> Result<usize, CheckError> {
    let value = valuation.value(&index.variable)?;
    Ok(position(value, index.start_index, length)?)
}

/// Test whether `values[position]` is an occurrence of `target` which respects `rank`.
fn respects_rank(values: &[i64], position: usize, target: i64, rank: Rank) -> bool {
    if values.get(position) != Some(&target) {
        return false;
    }

    match rank {
        Rank::Any => true,
        Rank::First => !values[..position].contains(&target),
        Rank::Last => !values[position + 1..].contains(&target),
    }
}
