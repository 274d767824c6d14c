use super::position;
use crate::evaluation::CheckError;
use crate::evaluation::Valuation;
use crate::model::Circuit;

/// The successors must form a single cycle through every node which is not a self-loop. An
/// assignment in which every node is a self-loop has no cycle and violates the constraint.
pub(super) fn check(circuit: &Circuit, valuation: &mut impl Valuation) -> Result<bool, CheckError> {
    let values = valuation.values(&circuit.list)?;

    let mut successors = Vec::with_capacity(values.len());
    for &value in &values {
        successors.push(position(value, circuit.start_index, values.len())?);
    }

    let in_cycle = successors
        .iter()
        .enumerate()
        .filter(|&(node, &successor)| node != successor)
        .count();

    let Some(start) = (0..successors.len()).find(|&node| successors[node] != node) else {
        return Ok(false);
    };

    let mut node = start;
    let mut cycle_length = 0;
    loop {
        node = successors[node];
        cycle_length += 1;

        if node == start {
            break;
        }

        if cycle_length > successors.len() {
            // The walk entered a cycle that does not contain `start`.
            return Ok(false);
        }
    }

    if cycle_length != in_cycle {
        return Ok(false);
    }

    match &circuit.size {
        Some(size) => Ok(valuation.operand(size)? == cycle_length as i64),
        None => Ok(true),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Operand;
    use crate::test_utils::list_valuation;

    fn circuit(list: Vec<crate::model::VariableId>, size: Option<Operand>) -> Circuit {
        Circuit {
            list,
            start_index: 0,
            size,
        }
    }

    #[test]
    fn hamiltonian_cycle_satisfies_circuit() {
        let (list, mut valuation) = list_valuation([1, 2, 0]);

        assert_eq!(check(&circuit(list, None), &mut valuation), Ok(true));
    }

    #[test]
    fn only_self_loops_violate_circuit() {
        let (list, mut valuation) = list_valuation([0, 1, 2]);

        assert_eq!(check(&circuit(list, None), &mut valuation), Ok(false));
    }

    #[test]
    fn two_subtours_violate_circuit() {
        let (list, mut valuation) = list_valuation([1, 0, 3, 2]);

        assert_eq!(check(&circuit(list, None), &mut valuation), Ok(false));
    }

    #[test]
    fn self_loops_are_excluded_from_the_cycle() {
        let (list, mut valuation) = list_valuation([2, 1, 0]);

        assert_eq!(
            check(&circuit(list.clone(), None), &mut valuation),
            Ok(true)
        );
        assert_eq!(
            check(&circuit(list.clone(), Some(Operand::Constant(2))), &mut valuation),
            Ok(true)
        );
        assert_eq!(
            check(&circuit(list, Some(Operand::Constant(3))), &mut valuation),
            Ok(false)
        );
    }

    #[test]
    fn path_into_a_cycle_violates_circuit() {
        let (list, mut valuation) = list_valuation([1, 2, 1]);

        assert_eq!(check(&circuit(list, None), &mut valuation), Ok(false));
    }
}
