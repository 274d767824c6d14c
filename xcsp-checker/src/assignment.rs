use std::rc::Rc;

use fnv::FnvHashMap;
use xcsp_solution_format::Instantiation;
use xcsp_solution_format::Value;

use crate::evaluation::CheckError;
use crate::evaluation::Valuation;
use crate::model::Instance;
use crate::model::VariableId;
use crate::symbols::SymbolTable;
use crate::VerificationError;

/// The values of one solution, validated against the instance.
///
/// Every assigned variable is declared, assigned once and takes a value from its domain or the
/// wildcard. Variables of the instance which are not listed have no value.
#[derive(Clone, Debug, Default)]
pub struct Assignment {
    values: FnvHashMap<VariableId, Value>,
}

impl Assignment {
    /// Validate an instantiation against the instance. Array references such as `x[]` are
    /// expanded to the variables of the array.
    pub fn build(
        instance: &Instance,
        instantiation: &Instantiation,
    ) -> Result<Assignment, VerificationError> {
        let mut names = Vec::with_capacity(instantiation.variables.len());
        for name in &instantiation.variables {
            match instance.expand_array(name) {
                Some(variables) => names.extend(variables),
                None => names.push(Rc::clone(name)),
            }
        }

        if names.len() != instantiation.values.len() {
            return Err(VerificationError::LengthMismatch {
                variables: names.len(),
                values: instantiation.values.len(),
            });
        }

        let mut values = FnvHashMap::default();
        for (name, value) in names.iter().zip(&instantiation.values) {
            let variable = instance
                .variable(name)
                .ok_or_else(|| VerificationError::UndeclaredVariable(Rc::clone(name)))?;

            if !value.is_unassigned() && !variable.domain().contains(value) {
                return Err(VerificationError::ValueOutsideDomain {
                    variable: Rc::clone(name),
                    value: value.clone(),
                });
            }

            if values
                .insert(Rc::clone(variable.name()), value.clone())
                .is_some()
            {
                return Err(VerificationError::DuplicateAssignment(Rc::clone(name)));
            }
        }

        Ok(Assignment { values })
    }

    /// The value of `variable`, which may be [`Value::Unassigned`].
    pub fn get(&self, variable: &str) -> Option<&Value> {
        self.values.get(variable)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&VariableId, &Value)> + '_ {
        self.values.iter()
    }
}

/// Evaluates against an assignment, interning symbolic values in the table of the session.
#[derive(Debug)]
pub(crate) struct AssignmentValuation<'a> {
    assignment: &'a Assignment,
    symbols: &'a mut SymbolTable,
}

impl<'a> AssignmentValuation<'a> {
    pub(crate) fn new(
        assignment: &'a Assignment,
        symbols: &'a mut SymbolTable,
    ) -> AssignmentValuation<'a> {
        AssignmentValuation {
            assignment,
            symbols,
        }
    }
}

impl Valuation for AssignmentValuation<'_> {
    fn value(&mut self, variable: &str) -> Result<i64, CheckError> {
        match self.assignment.get(variable) {
            Some(Value::Int(value)) => Ok(*value),
            Some(Value::Symbol(symbol)) => Ok(self.symbols.intern(symbol)),
            Some(Value::Unassigned) | None => Err(CheckError::Unassigned(Rc::from(variable))),
        }
    }

    fn symbol(&mut self, symbol: &str) -> i64 {
        self.symbols.intern(symbol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Domain;

    fn instance() -> Instance {
        let mut instance = Instance::default();
        let _ = instance.add_variable("x[0]", Domain::from(0..=5));
        let _ = instance.add_variable("x[1]", Domain::from(0..=5));
        let _ = instance.add_variable(
            "colour",
            Domain::Symbolic(["red", "green"].into_iter().collect()),
        );
        instance
    }

    #[test]
    fn array_reference_is_expanded() {
        let instantiation = Instantiation::new(
            ["x[]", "colour"],
            [Value::Int(1), Value::Int(2), Value::from("red")],
        );

        let assignment = Assignment::build(&instance(), &instantiation).expect("valid assignment");

        assert_eq!(assignment.len(), 3);
        assert_eq!(assignment.get("x[1]"), Some(&Value::Int(2)));
    }

    #[test]
    fn wildcard_is_accepted_when_building() {
        let instantiation = Instantiation::new(["x[0]"], [Value::Unassigned]);

        let assignment = Assignment::build(&instance(), &instantiation).expect("valid assignment");

        assert_eq!(assignment.get("x[0]"), Some(&Value::Unassigned));
    }

    #[test]
    fn length_mismatch_is_an_error() {
        let instantiation = Instantiation::new(["x[0]", "x[1]"], [Value::Int(1)]);

        assert_eq!(
            Assignment::build(&instance(), &instantiation).map(|assignment| assignment.len()),
            Err(VerificationError::LengthMismatch {
                variables: 2,
                values: 1
            })
        );
    }

    #[test]
    fn undeclared_variable_is_an_error() {
        let instantiation = Instantiation::new(["y"], [Value::Int(1)]);

        assert_eq!(
            Assignment::build(&instance(), &instantiation).map(|assignment| assignment.len()),
            Err(VerificationError::UndeclaredVariable("y".into()))
        );
    }

    #[test]
    fn duplicate_assignment_is_an_error() {
        let instantiation = Instantiation::new(["x[0]", "x[0]"], [Value::Int(1), Value::Int(1)]);

        assert_eq!(
            Assignment::build(&instance(), &instantiation).map(|assignment| assignment.len()),
            Err(VerificationError::DuplicateAssignment("x[0]".into()))
        );
    }

    #[test]
    fn values_outside_the_domain_are_errors() {
        let too_large = Instantiation::new(["x[0]"], [Value::Int(6)]);
        let symbol_for_integer = Instantiation::new(["x[0]"], [Value::from("red")]);
        let integer_for_symbol = Instantiation::new(["colour"], [Value::Int(0)]);

        for instantiation in [too_large, symbol_for_integer, integer_for_symbol] {
            assert!(matches!(
                Assignment::build(&instance(), &instantiation),
                Err(VerificationError::ValueOutsideDomain { .. })
            ));
        }
    }

    #[test]
    fn wildcard_cannot_be_read() {
        let instantiation = Instantiation::new(["x[0]"], [Value::Unassigned]);
        let assignment = Assignment::build(&instance(), &instantiation).expect("valid assignment");
        let mut symbols = SymbolTable::default();

        let mut valuation = AssignmentValuation::new(&assignment, &mut symbols);

        assert_eq!(
            valuation.value("x[0]"),
            Err(CheckError::Unassigned("x[0]".into()))
        );
    }

    #[test]
    fn symbolic_values_are_interned() {
        let instantiation = Instantiation::new(["colour"], [Value::from("green")]);
        let assignment = Assignment::build(&instance(), &instantiation).expect("valid assignment");
        let mut symbols = SymbolTable::default();

        let mut valuation = AssignmentValuation::new(&assignment, &mut symbols);
        let green = valuation.symbol("green");

        assert_eq!(valuation.value("colour"), Ok(green));
    }
}
